use crate::rules::ScoredCategory;

/// Base added before doubling.
pub const SETTLE_BASE: u32 = 5;

/// Settlement score: (5 + Σ values) × 2, clamped at `u32::MAX`.
pub fn settle(categories: &[ScoredCategory]) -> u32 {
    let sum = categories
        .iter()
        .fold(0u32, |acc, c| acc.saturating_add(c.value));
    SETTLE_BASE.saturating_add(sum).saturating_mul(2)
}
