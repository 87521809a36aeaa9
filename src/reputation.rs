//! Reputation scoring, leveling, and the achievement log entry type.
//!
//! Score arithmetic is deliberately small and pure so it can be unit
//! tested without a ledger: deltas are signed, the score floors at zero,
//! and the level is integer division with a minimum of 1.

use soroban_sdk::{contracttype, String};

/// Points required per skill level.
pub const POINTS_PER_LEVEL: u64 = 100;

/// One entry in an identity's append-only achievement log.
///
/// Achievements are never edited or removed once recorded.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Achievement {
    /// Short achievement title.
    pub title: String,

    /// Free-form description.
    pub description: String,

    /// Reputation points awarded. Always positive.
    pub points: u32,

    /// Basis points added to the identity's price multiplier. May be zero.
    pub price_impact: u32,

    /// Ledger timestamp when the achievement was recorded.
    pub timestamp: u64,
}

/// Apply a signed delta to a score, flooring at zero.
pub fn apply_delta(score: u64, delta: i64) -> u64 {
    let next = score as i128 + delta as i128;
    if next < 0 {
        0
    } else {
        next as u64
    }
}

/// Derive the skill level for a score: `max(1, score / 100)`.
pub fn level_for(score: u64) -> u32 {
    let level = score / POINTS_PER_LEVEL;
    if level < 1 {
        1
    } else {
        u32::try_from(level).unwrap_or(u32::MAX)
    }
}

/// Whether an owner-initiated update at `now` falls inside the cooldown
/// window. A `last` of zero means the score has never been updated and
/// no window is open.
pub fn cooldown_active(last: u64, now: u64, cooldown: u64) -> bool {
    last != 0 && now.saturating_sub(last) < cooldown
}
