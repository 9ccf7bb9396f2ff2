//! Timing report configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::registry::{FilterName, Implementation};

/// Number of calls averaged per measurement unless configured otherwise.
pub const DEFAULT_CALLS: usize = 3;

/// Which filters and implementations to time, and how often.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```
/// use instapy_rust::{FilterName, TimingConfig};
///
/// let config: TimingConfig = serde_json::from_str(r#"{"calls": 5, "filters": ["color2gray"]}"#).unwrap();
/// assert_eq!(config.calls, 5);
/// assert_eq!(config.filters, vec![FilterName::Gray]);
/// assert_eq!(config.implementations.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Calls per measurement, at least 1
    pub calls: usize,
    /// Filters to report on, in order
    pub filters: Vec<FilterName>,
    /// Implementations to time against the reference, in order
    pub implementations: Vec<Implementation>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            calls: DEFAULT_CALLS,
            filters: FilterName::ALL.to_vec(),
            implementations: Implementation::ALL.to_vec(),
        }
    }
}

impl TimingConfig {
    pub fn with_calls(mut self, calls: usize) -> Self {
        self.calls = calls;
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = FilterName>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    pub fn with_implementations(
        mut self,
        implementations: impl IntoIterator<Item = Implementation>,
    ) -> Self {
        self.implementations = implementations.into_iter().collect();
        self
    }

    pub fn validate(&self) -> FilterResult<()> {
        check_calls(self.calls)
    }
}

/// A measurement needs at least one call.
pub(crate) fn check_calls(calls: usize) -> FilterResult<()> {
    if calls == 0 {
        return Err(FilterError::InvalidArgument(
            "repeat count must be at least 1".to_string(),
        ));
    }
    Ok(())
}
