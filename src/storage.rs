//! Storage keys and typed ledger access helpers.
//!
//! Singletons (admin, config, id counter) live in instance storage;
//! per-identity records and the two index maps live in persistent storage
//! and get their TTL extended on every write.

use soroban_sdk::{contracttype, Address, Bytes, Env, Vec};

use crate::goals::Goal;
use crate::identity::{Config, Identity};
use crate::listing::Listing;
use crate::reputation::Achievement;

/// Storage keys for the skill identity contract.
#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    /// Contract administrator address.
    Admin,

    /// Process-wide configuration struct.
    Config,

    /// Total identities created. Doubles as the sequential id allocator;
    /// ids start at 1 and are never reused.
    IdentityCount,

    /// Maps id to the Identity record.
    Identity(u64),

    /// Maps owner Address to identity id. Cleared and re-pointed on sale.
    OwnerIndex(Address),

    /// Maps username to identity id. Entries are permanent: a username
    /// stays consumed even after the identity changes hands.
    UsernameIndex(Bytes),

    /// Append-only achievement log for an identity.
    Achievements(u64),

    /// Goal list for an identity.
    Goals(u64),

    /// Active marketplace listing for an identity, if any.
    Listing(u64),
}

/// Time-to-live management for persistent ledger entries.
pub const LEDGER_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const LEDGER_TTL_EXTEND: u32 = 2592000; // ~150 days

fn extend_entry_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);
}

// ========== Singletons ==========

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_config(env: &Env) -> Option<Config> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn write_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_identity_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::IdentityCount)
        .unwrap_or(0)
}

pub fn write_identity_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::IdentityCount, &count);
}

// ========== Identities ==========

pub fn read_identity(env: &Env, id: u64) -> Option<Identity> {
    env.storage().persistent().get(&DataKey::Identity(id))
}

pub fn write_identity(env: &Env, identity: &Identity) {
    let key = DataKey::Identity(identity.id);
    env.storage().persistent().set(&key, identity);
    extend_entry_ttl(env, &key);
}

// ========== Indexes ==========

pub fn id_for_owner(env: &Env, owner: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerIndex(owner.clone()))
}

pub fn write_owner_index(env: &Env, owner: &Address, id: u64) {
    let key = DataKey::OwnerIndex(owner.clone());
    env.storage().persistent().set(&key, &id);
    extend_entry_ttl(env, &key);
}

pub fn clear_owner_index(env: &Env, owner: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::OwnerIndex(owner.clone()));
}

pub fn id_for_username(env: &Env, username: &Bytes) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UsernameIndex(username.clone()))
}

pub fn is_username_taken(env: &Env, username: &Bytes) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::UsernameIndex(username.clone()))
}

pub fn write_username_index(env: &Env, username: &Bytes, id: u64) {
    let key = DataKey::UsernameIndex(username.clone());
    env.storage().persistent().set(&key, &id);
    extend_entry_ttl(env, &key);
}

// ========== Achievements & goals ==========

pub fn read_achievements(env: &Env, id: u64) -> Vec<Achievement> {
    env.storage()
        .persistent()
        .get(&DataKey::Achievements(id))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_achievements(env: &Env, id: u64, achievements: &Vec<Achievement>) {
    let key = DataKey::Achievements(id);
    env.storage().persistent().set(&key, achievements);
    extend_entry_ttl(env, &key);
}

pub fn read_goals(env: &Env, id: u64) -> Vec<Goal> {
    env.storage()
        .persistent()
        .get(&DataKey::Goals(id))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_goals(env: &Env, id: u64, goals: &Vec<Goal>) {
    let key = DataKey::Goals(id);
    env.storage().persistent().set(&key, goals);
    extend_entry_ttl(env, &key);
}

// ========== Listings ==========

pub fn read_listing(env: &Env, id: u64) -> Option<Listing> {
    env.storage().persistent().get(&DataKey::Listing(id))
}

pub fn write_listing(env: &Env, listing: &Listing) {
    let key = DataKey::Listing(listing.identity_id);
    env.storage().persistent().set(&key, listing);
    extend_entry_ttl(env, &key);
}

pub fn clear_listing(env: &Env, id: u64) {
    env.storage().persistent().remove(&DataKey::Listing(id));
}
