//! Resale price derivation.
//!
//! The price multiplier is recomputed from the stored achievement and goal
//! records every time, never maintained incrementally, so recomputation is
//! idempotent for unchanged inputs.

use soroban_sdk::{Env, Vec};

use crate::goals::Goal;
use crate::identity::Identity;
use crate::reputation::Achievement;
use crate::storage;

/// Multiplier of a fresh identity (100 = 1.0x).
pub const BASE_MULTIPLIER: i128 = 100;

/// Floor for the multiplier. Penalties can shrink the price but never
/// drive it to zero or below.
pub const MIN_MULTIPLIER: i128 = 1;

/// Fold achievement impacts and resolved goal bonuses/penalties into a
/// single basis-point multiplier, floored at [`MIN_MULTIPLIER`].
pub fn multiplier_for(achievements: &Vec<Achievement>, goals: &Vec<Goal>) -> i128 {
    let mut multiplier = BASE_MULTIPLIER;

    for achievement in achievements.iter() {
        multiplier += achievement.price_impact as i128;
    }

    for goal in goals.iter() {
        if goal.completed {
            multiplier += goal.price_bonus as i128;
        }
        if goal.failed {
            multiplier -= goal.price_penalty as i128;
        }
    }

    if multiplier < MIN_MULTIPLIER {
        MIN_MULTIPLIER
    } else {
        multiplier
    }
}

/// Apply a basis-point multiplier to a base price.
pub fn price_for(base_price: i128, multiplier: i128) -> i128 {
    base_price * multiplier / 100
}

/// Recompute the derived pricing fields on an identity from its stored
/// achievement and goal records. The caller persists the identity.
pub fn recompute(env: &Env, identity: &mut Identity) {
    let achievements = storage::read_achievements(env, identity.id);
    let goals = storage::read_goals(env, identity.id);

    identity.price_multiplier = multiplier_for(&achievements, &goals);
    identity.current_price = price_for(identity.base_price, identity.price_multiplier);
}
