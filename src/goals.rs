//! Goal types and lifecycle predicates.
//!
//! A goal moves `pending -> completed` when recorded progress reaches its
//! target, or `pending -> failed` when its deadline passes first. Both
//! outcomes are terminal; resolution happens exactly once.

use soroban_sdk::{contracttype, String};

/// A goal owned by one identity.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Goal {
    /// Short goal title.
    pub title: String,

    /// Free-form description.
    pub description: String,

    /// Ledger timestamp after which an unmet goal fails.
    pub deadline: u64,

    /// Progress value that completes the goal.
    pub target_value: u64,

    /// Latest recorded progress.
    pub current_value: u64,

    /// Reputation points applied on completion.
    pub reward_points: u32,

    /// Reputation points deducted on failure.
    pub penalty_points: u32,

    /// Basis points added to the price multiplier on completion.
    pub price_bonus: u32,

    /// Basis points removed from the price multiplier on failure.
    pub price_penalty: u32,

    /// Terminal completion flag. Mutually exclusive with `failed`.
    pub completed: bool,

    /// Terminal failure flag. Mutually exclusive with `completed`.
    pub failed: bool,
}

/// Caller-supplied parameters for a new goal.
#[contracttype]
#[derive(Clone, Debug)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub deadline: u64,
    pub target_value: u64,
    pub reward_points: u32,
    pub penalty_points: u32,
    pub price_bonus: u32,
    pub price_penalty: u32,
}

impl Goal {
    /// Build a pending goal from caller input.
    pub fn from_input(input: NewGoal) -> Self {
        Self {
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            target_value: input.target_value,
            current_value: 0,
            reward_points: input.reward_points,
            penalty_points: input.penalty_points,
            price_bonus: input.price_bonus,
            price_penalty: input.price_penalty,
            completed: false,
            failed: false,
        }
    }

    /// Whether the goal is still unresolved.
    pub fn is_pending(&self) -> bool {
        !self.completed && !self.failed
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.deadline
    }
}
