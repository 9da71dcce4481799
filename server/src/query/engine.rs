//! Query engine implementation.
//!
//! Narrows a record collection by applying each criterion in turn. Records
//! are only ever dropped, never reordered, so the result is an
//! order-preserving subsequence of the input.

use super::criteria::Criteria;
use crate::types::Unicorn;

/// Return the records that satisfy every criterion, in their original order.
///
/// Total for any input: malformed criteria exclude records rather than fail.
#[must_use]
pub fn filter<'a>(records: &'a [Unicorn], criteria: &Criteria) -> Vec<&'a Unicorn> {
    let mut candidates: Vec<&Unicorn> = records.iter().collect();

    for criterion in &criteria.criteria {
        candidates.retain(|unicorn| criterion.matches(unicorn));
        if candidates.is_empty() {
            break;
        }
    }

    tracing::debug!(
        "Filter with {} criteria kept {} of {} records",
        criteria.len(),
        candidates.len(),
        records.len()
    );
    candidates
}
