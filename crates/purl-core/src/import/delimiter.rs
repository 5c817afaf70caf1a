//! Delimiter sniffing for import sources.
//!
//! Each candidate is scored by how many lines contain it and how evenly it
//! is spread across those lines; the best-scoring candidate wins.

use std::cmp::Ordering;

/// Delimiters considered, in tie-break order.
pub const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How much of the source is inspected.
pub const SAMPLE_BYTES: usize = 10_000;

#[derive(Debug, Clone, Copy, Default)]
struct Score {
    /// Lines with at least one occurrence.
    rows: usize,
    /// Mean occurrences per sampled line.
    mean: f64,
    stddev: f64,
}

impl Score {
    fn of(lines: &[&str], delimiter: u8) -> Self {
        if lines.is_empty() {
            return Self::default();
        }
        let counts: Vec<usize> = lines.iter().map(|l| count_unquoted(l, delimiter)).collect();
        let n = counts.len() as f64;
        let mean = counts.iter().sum::<usize>() as f64 / n;
        let var = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        Score {
            rows: counts.iter().filter(|&&c| c > 0).count(),
            mean,
            stddev: var.sqrt(),
        }
    }

    /// Lower is more consistent.
    fn variation(&self) -> f64 {
        self.stddev / self.mean
    }

    fn rank(&self, other: &Self) -> Ordering {
        match self.rows.cmp(&other.rows) {
            Ordering::Equal if self.rows == 0 => Ordering::Equal,
            Ordering::Equal => other
                .variation()
                .partial_cmp(&self.variation())
                .unwrap_or(Ordering::Equal),
            ord => ord,
        }
    }
}

/// Occurrences of `delimiter` outside double quotes.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut n = 0;
    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            n += 1;
        }
    }
    n
}

/// Pick the delimiter of `text` among `CANDIDATES`.
///
/// `;` wins outright when present without any `,`. Otherwise the most
/// consistent candidate wins, then the most frequent one, then `,`.
pub fn detect_delimiter(text: &str) -> u8 {
    let mut end = text.len().min(SAMPLE_BYTES);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let sample = &text[..end];

    if sample.contains(';') && !sample.contains(',') {
        return b';';
    }

    let lines: Vec<&str> = sample.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut best: Option<(u8, Score)> = None;
    for &d in &CANDIDATES {
        let score = Score::of(&lines, d);
        if score.rows == 0 {
            continue;
        }
        match &best {
            Some((_, b)) if score.rank(b) != Ordering::Greater => {}
            _ => best = Some((d, score)),
        }
    }
    if let Some((d, _)) = best {
        return d;
    }

    CANDIDATES
        .iter()
        .copied()
        .map(|d| (d, sample.bytes().filter(|&b| b == d).count()))
        .filter(|&(_, n)| n > 0)
        .max_by_key(|&(_, n)| n)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}
