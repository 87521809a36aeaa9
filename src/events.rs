//! Event emission helpers for the skill identity contract.
//!
//! One event per state transition, carrying enough data for an off-chain
//! indexer to rebuild the username, owner, and listing indexes.

use soroban_sdk::{Address, Bytes, Env, String, Symbol};

/// Emit an event when an identity is created.
pub fn emit_identity_created(env: &Env, id: u64, owner: &Address, username: &Bytes) {
    let topics = (Symbol::new(env, "identity_created"),);
    env.events()
        .publish(topics, (id, owner.clone(), username.clone()));
}

/// Emit an event when an identity is verified by the administrator.
pub fn emit_identity_verified(env: &Env, id: u64) {
    let topics = (Symbol::new(env, "identity_verified"),);
    env.events().publish(topics, id);
}

/// Emit an event when a reputation score changes.
pub fn emit_reputation_updated(env: &Env, id: u64, delta: i64, new_score: u64, reason: &Symbol) {
    let topics = (Symbol::new(env, "reputation_updated"),);
    env.events()
        .publish(topics, (id, delta, new_score, reason.clone()));
}

/// Emit an event when a reputation change crosses a level boundary.
pub fn emit_level_up(env: &Env, id: u64, new_level: u32, primary_skill: &String) {
    let topics = (Symbol::new(env, "level_up"),);
    env.events()
        .publish(topics, (id, new_level, primary_skill.clone()));
}

/// Emit an event when an achievement is recorded.
pub fn emit_achievement_added(env: &Env, id: u64, title: &String, points: u32) {
    let topics = (Symbol::new(env, "achievement_added"),);
    env.events().publish(topics, (id, title.clone(), points));
}

/// Emit an event when a goal is set.
pub fn emit_goal_set(env: &Env, id: u64, goal_ref: u32) {
    let topics = (Symbol::new(env, "goal_set"),);
    env.events().publish(topics, (id, goal_ref));
}

/// Emit an event when goal progress is recorded.
pub fn emit_goal_progress(env: &Env, id: u64, goal_ref: u32, current_value: u64) {
    let topics = (Symbol::new(env, "goal_progress"),);
    env.events().publish(topics, (id, goal_ref, current_value));
}

/// Emit an event when a goal resolves as completed.
pub fn emit_goal_completed(env: &Env, id: u64, goal_ref: u32) {
    let topics = (Symbol::new(env, "goal_completed"),);
    env.events().publish(topics, (id, goal_ref));
}

/// Emit an event when a goal resolves as failed.
pub fn emit_goal_failed(env: &Env, id: u64, goal_ref: u32) {
    let topics = (Symbol::new(env, "goal_failed"),);
    env.events().publish(topics, (id, goal_ref));
}

/// Emit an event when an identity is listed for sale.
pub fn emit_identity_listed(env: &Env, id: u64, seller: &Address, price: i128) {
    let topics = (Symbol::new(env, "identity_listed"),);
    env.events().publish(topics, (id, seller.clone(), price));
}

/// Emit an event when a listing is withdrawn.
pub fn emit_identity_unlisted(env: &Env, id: u64) {
    let topics = (Symbol::new(env, "identity_unlisted"),);
    env.events().publish(topics, id);
}

/// Emit an event when an identity is sold.
pub fn emit_identity_sold(env: &Env, id: u64, seller: &Address, buyer: &Address, price: i128) {
    let topics = (Symbol::new(env, "identity_sold"),);
    env.events()
        .publish(topics, (id, seller.clone(), buyer.clone(), price));
}
