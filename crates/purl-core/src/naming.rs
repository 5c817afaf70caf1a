//! Page file names: extension normalization and random unique names.

use rand::Rng;
use std::collections::HashSet;
use std::path::{Component, Path};

use crate::page::PAGE_EXTENSION;

/// Length of the random stem of generated names.
pub const RANDOM_STEM_LEN: usize = 7;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Trim `name` and append `.html` unless it already ends with it (any case).
/// A blank name stays blank.
pub fn ensure_html_ext(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }
    let has_ext = name.len() >= PAGE_EXTENSION.len()
        && name.is_char_boundary(name.len() - PAGE_EXTENSION.len())
        && name[name.len() - PAGE_EXTENSION.len()..].eq_ignore_ascii_case(PAGE_EXTENSION);
    if has_ext {
        name.to_string()
    } else {
        format!("{name}{PAGE_EXTENSION}")
    }
}

/// True when `name` is a single normal path component, i.e. it names a file
/// directly inside the output directory. Rejects `..`, absolute paths and
/// anything containing a separator.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains('/')
}

/// A random `[a-z0-9]{7}.html` name.
pub fn random_page_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name = String::with_capacity(RANDOM_STEM_LEN + PAGE_EXTENSION.len());
    for _ in 0..RANDOM_STEM_LEN {
        name.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    name.push_str(PAGE_EXTENSION);
    name
}

/// Draw random names until one is absent from every set in `taken`.
pub fn unique_page_name<R: Rng + ?Sized>(rng: &mut R, taken: &[&HashSet<String>]) -> String {
    loop {
        let candidate = random_page_name(rng);
        if !taken.iter().any(|set| set.contains(&candidate)) {
            return candidate;
        }
    }
}
