//! Identity struct and configuration types.

use soroban_sdk::{contracttype, Address, Bytes, String};

use crate::pricing::BASE_MULTIPLIER;
use crate::reputation;

/// Reputation score assigned to every freshly created identity.
pub const INITIAL_REPUTATION: u64 = 100;

/// Skill identity record.
///
/// One identity exists per owner address. The record is permanent once
/// created: ownership can move through the marketplace, but the id and
/// username are assigned exactly once and never reused.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Identity {
    /// Sequential identifier, assigned at creation, never reused.
    pub id: u64,

    /// Current owner's blockchain address.
    pub owner: Address,

    /// Unique username (validated format, byte-exact uniqueness).
    pub username: Bytes,

    /// Primary skill this identity is known for.
    pub primary_skill: String,

    /// Non-negative reputation score. Starts at [`INITIAL_REPUTATION`].
    pub reputation_score: u64,

    /// Derived level: `max(1, reputation_score / 100)`.
    pub skill_level: u32,

    /// Number of achievements in the append-only log.
    pub achievement_count: u32,

    /// Set by the administrator via `verify`.
    pub verified: bool,

    /// Timestamp of the last successful reputation change.
    /// Zero means the score has never been updated.
    pub last_reputation_update: u64,

    /// Price fixed at creation; the anchor for `current_price`.
    pub base_price: i128,

    /// Derived resale price, recomputed after every mutation.
    pub current_price: i128,

    /// Cumulative basis-point scalar applied to `base_price` (100 = 1.0x).
    pub price_multiplier: i128,

    /// Ledger timestamp at creation.
    pub created_at: u64,
}

impl Identity {
    /// Create a fresh identity with default reputation and pricing.
    pub fn new(
        id: u64,
        owner: Address,
        username: Bytes,
        primary_skill: String,
        base_price: i128,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            owner,
            username,
            primary_skill,
            reputation_score: INITIAL_REPUTATION,
            skill_level: reputation::level_for(INITIAL_REPUTATION),
            achievement_count: 0,
            verified: false,
            last_reputation_update: 0,
            base_price,
            current_price: base_price,
            price_multiplier: BASE_MULTIPLIER,
            created_at,
        }
    }
}

/// Process-wide contract configuration, set once at `init`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Config {
    /// Minimum seconds between two owner-initiated reputation updates.
    /// The administrator path bypasses this window.
    pub reputation_cooldown: u64,

    /// Base price (and initial current price) for new identities,
    /// denominated in the payment token.
    pub base_price: i128,

    /// Token contract used to settle marketplace purchases.
    pub payment_token: Address,
}
