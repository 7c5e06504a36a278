use std::ops::Index;

use ndarray::ArrayView1;

use crate::{Result, SentinelErr};

/// The amount of lexical features the scoring network consumes.
pub const FEATURE_COUNT: usize = 41;

/// The dataset column name of each feature, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_length",
    "number_of_dots_in_url",
    "having_repeated_digits_in_url",
    "number_of_digits_in_url",
    "number_of_special_char_in_url",
    "number_of_hyphens_in_url",
    "number_of_underline_in_url",
    "number_of_slash_in_url",
    "number_of_questionmark_in_url",
    "number_of_equal_in_url",
    "number_of_at_in_url",
    "number_of_dollar_in_url",
    "number_of_exclamation_in_url",
    "number_of_hashtag_in_url",
    "number_of_percent_in_url",
    "domain_length",
    "number_of_dots_in_domain",
    "number_of_hyphens_in_domain",
    "having_special_characters_in_domain",
    "number_of_special_characters_in_domain",
    "having_digits_in_domain",
    "number_of_digits_in_domain",
    "having_repeated_digits_in_domain",
    "number_of_subdomains",
    "having_dot_in_subdomain",
    "having_hyphen_in_subdomain",
    "average_subdomain_length",
    "average_number_of_dots_in_subdomain",
    "average_number_of_hyphens_in_subdomain",
    "having_special_characters_in_subdomain",
    "number_of_special_characters_in_subdomain",
    "having_digits_in_subdomain",
    "number_of_digits_in_subdomain",
    "having_repeated_digits_in_subdomain",
    "having_path",
    "path_length",
    "having_query",
    "having_fragment",
    "having_anchor",
    "entropy_of_url",
    "entropy_of_domain",
];

/// An ordered, fixed-length vector of lexical features.
///
/// The length is part of the type, so a `FeatureVector` can never be missing a feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    /// Always [`FEATURE_COUNT`].
    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns an `ndarray` view over the features, for the numeric stages of the pipeline.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }

    /// Pairs every feature with its dataset column name.
    ///
    /// # Returns
    /// An iterator of `(name, value)` in vector order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = SentinelErr;

    fn try_from(values: &[f64]) -> Result<Self> {
        let values = values.try_into().map_err(|_| SentinelErr::Shape {
            what: "feature vector",
            got: values.len(),
            expected: FEATURE_COUNT,
        })?;

        Ok(Self(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names = FEATURE_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn named_follows_vector_order() {
        let mut values = [0.0; FEATURE_COUNT];
        values[15] = 14.0;
        let v = FeatureVector::new(values);

        let (name, value) = v.named().nth(15).unwrap();
        assert_eq!(name, "domain_length");
        assert_eq!(value, 14.0);
    }

    #[test]
    fn try_from_rejects_wrong_arity() {
        let short = [1.0; 40];
        let err = FeatureVector::try_from(&short[..]).unwrap_err();
        assert!(matches!(
            err,
            SentinelErr::Shape {
                got: 40,
                expected: 41,
                ..
            }
        ));
    }

    #[test]
    fn view_exposes_every_feature() {
        let v = FeatureVector::zeros();
        assert_eq!(v.view().len(), FEATURE_COUNT);
    }
}
