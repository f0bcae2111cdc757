//! Evaluation settings.

/// What to do with an array subscript outside `0..len`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Read `0`, log a warning, and record an anomaly.
    #[default]
    Lenient,
    /// Fail with `ArrayIndexOutOfRange`.
    Strict,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalConfig {
    pub index_policy: IndexPolicy,
}

impl EvalConfig {
    pub fn strict() -> Self {
        EvalConfig {
            index_policy: IndexPolicy::Strict,
        }
    }

    #[must_use]
    pub fn with_index_policy(mut self, index_policy: IndexPolicy) -> Self {
        self.index_policy = index_policy;
        self
    }
}
