use std::collections::BTreeMap;

/// Shannon entropy, in bits, of the character distribution of `text`.
///
/// Probabilities are summed in character order, so the result depends only on the multiset of
/// characters and never on their arrangement.
///
/// # Returns
/// `0.0` for the empty string and for strings made of a single repeated character.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let mut len = 0usize;

    for c in text.chars() {
        *counts.entry(c).or_default() += 1;
        len += 1;
    }

    if len == 0 {
        return 0.0;
    }

    let len = len as f64;
    counts.values().fold(0.0, |acc, &count| {
        let p = count as f64 / len;
        acc - p * p.log2()
    })
}
