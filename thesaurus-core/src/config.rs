//! Taxonomy configuration

use serde::Deserialize;

/// Settings shared by every taxonomy instance.
///
/// Passed to [`TaxonomyBuilder::new`](crate::TaxonomyBuilder::new) and carried
/// by the frozen [`Taxonomy`](crate::Taxonomy); nothing is read from process
/// globals.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Language tag used for the root's sentinel label and as the default
    /// label filter
    pub language: String,
    /// Frequency reported for a concept with no frequency annotation
    pub default_frequency: f64,
    /// Starting value additive propagation adds onto when a concept has no
    /// frequency annotation yet
    pub propagation_baseline: f64,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            default_frequency: 1.0,
            propagation_baseline: 0.0,
        }
    }
}

impl TaxonomyConfig {
    /// Default config with a different label language
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }
}
