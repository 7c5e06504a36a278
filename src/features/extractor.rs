use std::sync::LazyLock;

use regex::Regex;

use super::{
    entropy::shannon_entropy,
    url::{sanitize, UrlParts},
    vector::{FeatureVector, FEATURE_COUNT},
};

// Unicode `\d`: every decimal digit (general category Nd), not only ASCII `0-9`.
static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is a valid regex"));

/// Maps a raw URL to its lexical feature vector.
///
/// Never fails: missing structure (no host, no path, no subdomains, no query, no fragment)
/// yields zero values, and the empty string yields the all-zero vector.
///
/// # Args
/// * `url` - Arbitrary user-supplied text.
///
/// # Returns
/// The 41 features in dataset order.
pub fn extract(url: &str) -> FeatureVector {
    let clean = sanitize(url);
    let parts = UrlParts::split(&clean);
    let host = parts.host;

    let labels: Vec<&str> = host.split('.').collect();
    let subdomains = &labels[..labels.len().saturating_sub(2)];

    let mut f = Features::new();

    f.push(char_len(url));
    f.push(count_char(url, '.'));
    f.push_flag(has_repeated_digit(url));
    f.push(count_digits(url));
    f.push(count_matching(url, |c| !c.is_ascii_alphanumeric()));
    for c in ['-', '_', '/', '?', '=', '@', '$', '!', '#', '%'] {
        f.push(count_char(url, c));
    }

    let is_domain_special = |c: char| !c.is_ascii_alphanumeric() && c != '.';
    f.push(char_len(host));
    f.push(count_char(host, '.'));
    f.push(count_char(host, '-'));
    f.push_flag(host.chars().any(is_domain_special));
    f.push(count_matching(host, is_domain_special));
    f.push_flag(DIGIT.is_match(host));
    f.push(count_digits(host));
    f.push_flag(has_repeated_digit(host));

    let is_special = |c: char| !c.is_ascii_alphanumeric();
    f.push(subdomains.len());
    f.push_flag(subdomains.iter().any(|s| s.contains('.')));
    f.push_flag(subdomains.iter().any(|s| s.contains('-')));
    f.push_value(mean(subdomains, |s| char_len(s)));
    f.push_value(mean(subdomains, |s| count_char(s, '.')));
    f.push_value(mean(subdomains, |s| count_char(s, '-')));
    f.push_flag(subdomains.iter().any(|s| s.chars().any(is_special)));
    f.push(subdomains.iter().map(|s| count_matching(s, is_special)).sum());
    f.push_flag(subdomains.iter().any(|s| DIGIT.is_match(s)));
    f.push(subdomains.iter().map(|s| count_digits(s)).sum());
    f.push_flag(subdomains.iter().any(|s| has_repeated_digit(s)));

    f.push_flag(!parts.path.is_empty());
    f.push(char_len(parts.path));
    f.push_flag(!parts.query.is_empty());
    f.push_flag(!parts.fragment.is_empty());
    // The anchor is looked up in the raw string and can disagree with the parsed fragment.
    f.push_flag(url.contains('#'));
    f.push_value(shannon_entropy(url));
    f.push_value(shannon_entropy(host));

    f.finish()
}

/// Fixed-capacity accumulator that keeps features in push order.
struct Features {
    values: [f64; FEATURE_COUNT],
    len: usize,
}

impl Features {
    fn new() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
            len: 0,
        }
    }

    fn push_value(&mut self, value: f64) {
        self.values[self.len] = value;
        self.len += 1;
    }

    fn push(&mut self, count: usize) {
        self.push_value(count as f64);
    }

    fn push_flag(&mut self, flag: bool) {
        self.push_value(if flag { 1.0 } else { 0.0 });
    }

    fn finish(self) -> FeatureVector {
        debug_assert_eq!(self.len, FEATURE_COUNT);
        FeatureVector::new(self.values)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn count_char(s: &str, needle: char) -> usize {
    s.chars().filter(|&c| c == needle).count()
}

fn count_digits(s: &str) -> usize {
    DIGIT.find_iter(s).count()
}

fn is_digit(c: char) -> bool {
    DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

fn count_matching<P: Fn(char) -> bool>(s: &str, pred: P) -> usize {
    s.chars().filter(|&c| pred(c)).count()
}

/// Whether some digit appears at least three times in a row.
fn has_repeated_digit(s: &str) -> bool {
    let mut run = 0;
    let mut prev = None;

    for c in s.chars() {
        let digit = is_digit(c);
        if digit && prev == Some(c) {
            run += 1;
        } else {
            run = 1;
        }

        if digit && run >= 3 {
            return true;
        }
        prev = Some(c);
    }

    false
}

fn mean<F: Fn(&str) -> usize>(labels: &[&str], f: F) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }

    let total: usize = labels.iter().map(|s| f(s)).sum();
    total as f64 / labels.len() as f64
}
