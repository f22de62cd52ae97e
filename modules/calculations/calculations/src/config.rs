//! Configuration for the calculations module.

use calc_expression::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH, Limits, MAX_DEPTH_CEILING, MAX_LENGTH_CEILING,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculationsConfig {
    /// Longest accepted expression, in bytes.
    pub max_expression_length: usize,
    /// Deepest accepted nesting of parentheses and prefix operators.
    pub max_nesting_depth: usize,
}

impl Default for CalculationsConfig {
    fn default() -> Self {
        Self {
            max_expression_length: DEFAULT_MAX_LENGTH,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CalculationsConfig {
    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits {
            max_length: self.max_expression_length,
            max_depth: self.max_nesting_depth,
        }
    }

    /// Both limits must be non-zero and no larger than the evaluator ceilings.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_expression_length == 0 || self.max_expression_length > MAX_LENGTH_CEILING {
            anyhow::bail!(
                "calculations.max_expression_length must be between 1 and {MAX_LENGTH_CEILING}"
            );
        }
        if self.max_nesting_depth == 0 || self.max_nesting_depth > MAX_DEPTH_CEILING {
            anyhow::bail!("calculations.max_nesting_depth must be between 1 and {MAX_DEPTH_CEILING}");
        }
        Ok(())
    }
}
