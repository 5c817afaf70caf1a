//! libcurl-backed liveness probe.

use std::time::Duration;
use thiserror::Error;

/// Failure to obtain any HTTP status for a URL.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
}

/// Fetches a URL and reports the final HTTP status after redirects.
pub trait UrlProbe {
    fn probe(&mut self, url: &str) -> Result<u32, ProbeError>;
}

/// GET probe using one reused curl `Easy` handle (keeps connections alive across URLs).
pub struct CurlProbe {
    easy: curl::easy::Easy,
    timeout: Duration,
    user_agent: String,
}

impl CurlProbe {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            easy: curl::easy::Easy::new(),
            timeout,
            user_agent: user_agent.into(),
        }
    }
}

impl UrlProbe for CurlProbe {
    /// Runs in the current thread; the body is read and discarded.
    fn probe(&mut self, url: &str) -> Result<u32, ProbeError> {
        let easy = &mut self.easy;
        easy.reset();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(&self.user_agent)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()?;
        }

        Ok(easy.response_code()?)
    }
}
