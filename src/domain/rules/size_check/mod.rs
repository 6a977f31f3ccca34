//! Output size validation
//!
//! Post-processing check that fails the file when the new size falls
//! outside a percentage band around the original size.

use tracing::{info, warn};

use crate::domain::context::DecisionContext;
use crate::domain::errors::DomainError;
use crate::domain::model::DecisionResult;
use crate::utils::size::{human_readable_size, size_ratio};

pub const DEFAULT_UPPER_BOUND_PERCENTAGE: f64 = 110.0;
pub const DEFAULT_LOWER_BOUND_PERCENTAGE: f64 = 30.0;

/// Allowed band for the new size, as percentages of the original
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    pub upper_percentage: f64,
    pub lower_percentage: f64,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            upper_percentage: DEFAULT_UPPER_BOUND_PERCENTAGE,
            lower_percentage: DEFAULT_LOWER_BOUND_PERCENTAGE,
        }
    }
}

/// Compare the processed file size against the original
///
/// Both sizes must use the same unit (MB as reported by the host). Sizes
/// that are not finite numbers count as zero.
pub fn check_new_file_size(
    new_size: f64,
    original_size: f64,
    bounds: &SizeBounds,
) -> Result<DecisionResult, DomainError> {
    let new_size = finite_or_zero(new_size);
    let original_size = finite_or_zero(original_size);
    let ratio = size_ratio(new_size, original_size);

    if new_size > bounds.upper_percentage / 100.0 * original_size {
        warn!(new_size, original_size, ratio, "New file above upper bound");
        return Err(DomainError::UpperSizeLimitExceeded {
            percentage: bounds.upper_percentage,
        });
    }

    if new_size < bounds.lower_percentage / 100.0 * original_size {
        warn!(new_size, original_size, ratio, "New file below lower bound");
        return Err(DomainError::LowerSizeLimitExceeded {
            percentage: bounds.lower_percentage,
        });
    }

    let mut ctx = DecisionContext::new();
    ctx.note(format!(
        "New file is {} ({:.2}%) of original file size {}.",
        human_readable_size(new_size),
        ratio,
        human_readable_size(original_size)
    ));
    info!(new_size, original_size, ratio, "New file size within bounds");

    Ok(ctx.finish(None, None))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
