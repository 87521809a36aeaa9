//! # Soroban Skill Identity
//!
//! Tradeable skill identity and reputation system for the Soroban
//! blockchain ecosystem.
//!
//! Each address owns at most one identity: a permanent record with a
//! unique username, a reputation score that rises through achievements
//! and goals, and a resale price derived from that track record. Features
//! include:
//!
//! - One identity per address with validated unique usernames
//! - Reputation scoring with floor-division skill levels
//! - Append-only achievement log with price impact accounting
//! - Goal lifecycle with rewards, penalties, and lazy deadline evaluation
//! - Dynamic pricing from a basis-point multiplier
//! - Peer-to-peer listing and atomic purchase of identities
//! - Deterministic token-metadata rendering
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Create an identity
//! let identity = client.create(&owner, &username, &primary_skill);
//!
//! // Record an achievement (owner or admin)
//! client.add_achievement(&identity.id, &title, &description, &25, &50, &owner);
//!
//! // Sell it
//! client.list(&identity.id, &1500, &owner);
//! client.buy(&identity.id, &1500, &buyer);
//! ```

#![no_std]

mod events;
mod goals;
mod identity;
mod listing;
mod metadata;
mod pricing;
mod reputation;
mod storage;
mod validation;

pub use goals::{Goal, NewGoal};
pub use identity::{Config, Identity, INITIAL_REPUTATION};
pub use listing::Listing;
pub use pricing::{BASE_MULTIPLIER, MIN_MULTIPLIER};
pub use reputation::Achievement;
pub use storage::DataKey;
pub use validation::{
    validate_username, MAX_SKILL_LENGTH, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH,
};

use soroban_sdk::{
    contract, contractimpl, panic_with_error, token, Address, Bytes, BytesN, Env, String, Symbol,
    Vec,
};

use crate::events::*;

/// Error codes for the skill identity contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum IdentityError {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized.
    NotInitialized = 2,
    /// Caller lacks the required relationship to the identity.
    Unauthorized = 3,
    /// Empty, zero, or malformed argument.
    InvalidInput = 4,
    /// Duplicate username, or the account already has an identity.
    AlreadyExists = 5,
    /// Unknown identity or goal reference.
    NotFound = 6,
    /// Owner-initiated reputation update inside the cooldown window.
    RateLimited = 7,
    /// An active listing already exists for this identity.
    AlreadyListed = 8,
    /// No active listing exists for this identity.
    NotListed = 9,
    /// Buyer is the seller.
    SelfTrade = 10,
    /// Payment does not match the live listing price.
    PriceMismatch = 11,
}

impl From<IdentityError> for soroban_sdk::Error {
    fn from(e: IdentityError) -> Self {
        soroban_sdk::Error::from_contract_error(e as u32)
    }
}

#[contract]
pub struct SkillIdentityContract;

#[contractimpl]
impl SkillIdentityContract {
    // ========== Initialization ==========

    /// Initialize the contract with an admin address and configuration.
    ///
    /// This must be called once before any other operations.
    pub fn init(env: Env, admin: Address, config: Config) {
        if storage::has_admin(&env) {
            panic_with_error!(&env, IdentityError::AlreadyInitialized);
        }
        if config.base_price <= 0 {
            panic_with_error!(&env, IdentityError::InvalidInput);
        }

        admin.require_auth();
        storage::write_admin(&env, &admin);
        storage::write_config(&env, &config);
        storage::write_identity_count(&env, 0);
    }

    /// Get the admin address.
    pub fn admin(env: Env) -> Address {
        Self::read_admin_or_panic(&env)
    }

    /// Get the contract configuration.
    pub fn config(env: Env) -> Config {
        Self::read_config_or_panic(&env)
    }

    // ========== Identity Registry ==========

    /// Create a new identity for `owner`.
    ///
    /// # Arguments
    /// * `owner` - Address that will own the identity
    /// * `username` - Unique username (3-32 chars, letter first, then
    ///   letters/digits/underscores; case-sensitive)
    /// * `primary_skill` - Non-empty skill name
    ///
    /// # Returns
    /// The created identity: score 100, level 1, unverified, priced at
    /// the configured base price.
    ///
    /// # Panics
    /// - `InvalidInput` if the username or skill fails validation
    /// - `AlreadyExists` if the owner already has an identity, or the
    ///   username was ever consumed (usernames are never reclaimed)
    pub fn create(env: Env, owner: Address, username: Bytes, primary_skill: String) -> Identity {
        owner.require_auth();
        let config = Self::read_config_or_panic(&env);

        if !validation::validate_username(&username) {
            panic_with_error!(&env, IdentityError::InvalidInput);
        }
        if !validation::validate_text(&primary_skill, validation::MAX_SKILL_LENGTH) {
            panic_with_error!(&env, IdentityError::InvalidInput);
        }
        if storage::id_for_owner(&env, &owner).is_some() {
            panic_with_error!(&env, IdentityError::AlreadyExists);
        }
        if storage::is_username_taken(&env, &username) {
            panic_with_error!(&env, IdentityError::AlreadyExists);
        }

        let id = storage::read_identity_count(&env) + 1;
        let now = env.ledger().timestamp();
        let record = Identity::new(
            id,
            owner.clone(),
            username.clone(),
            primary_skill,
            config.base_price,
            now,
        );

        storage::write_identity(&env, &record);
        storage::write_owner_index(&env, &owner, id);
        storage::write_username_index(&env, &username, id);
        storage::write_identity_count(&env, id);

        emit_identity_created(&env, id, &owner, &username);

        record
    }

    /// Mark an identity as verified (admin only). Idempotent.
    pub fn verify(env: Env, id: u64, caller: Address) {
        Self::require_admin(&env, &caller);

        let mut record = Self::load_identity(&env, id);
        record.verified = true;
        storage::write_identity(&env, &record);

        emit_identity_verified(&env, id);
    }

    /// Check if a username is valid and still available.
    pub fn is_username_available(env: Env, username: Bytes) -> bool {
        validation::validate_username(&username) && !storage::is_username_taken(&env, &username)
    }

    // ========== Reputation ==========

    /// Apply a signed reputation delta to an identity.
    ///
    /// Owner-initiated updates are rate limited: a second direct update
    /// inside the configured cooldown window fails with `RateLimited`.
    /// The administrator path bypasses the cooldown so operators can
    /// always correct state. The score floors at zero; crossing a level
    /// boundary upward emits a level-up event.
    ///
    /// # Returns
    /// The new reputation score.
    pub fn update_reputation(env: Env, id: u64, delta: i64, reason: Symbol, caller: Address) -> u64 {
        let mut record = Self::load_identity(&env, id);
        let is_admin = Self::require_owner_or_admin(&env, &record, &caller);

        let config = Self::read_config_or_panic(&env);
        let now = env.ledger().timestamp();
        if !is_admin
            && reputation::cooldown_active(
                record.last_reputation_update,
                now,
                config.reputation_cooldown,
            )
        {
            panic_with_error!(&env, IdentityError::RateLimited);
        }

        let new_score = Self::apply_score_change(&env, &mut record, delta, &reason, now);
        pricing::recompute(&env, &mut record);
        storage::write_identity(&env, &record);

        new_score
    }

    /// Record an achievement for an identity (owner or admin).
    ///
    /// Appends to the append-only log, awards `points` to the reputation
    /// score (exempt from the update cooldown; only direct score edits
    /// are gated), and folds `price_impact` basis points into the price
    /// multiplier.
    ///
    /// # Panics
    /// - `InvalidInput` if the title is empty/too long or `points` is zero
    pub fn add_achievement(
        env: Env,
        id: u64,
        title: String,
        description: String,
        points: u32,
        price_impact: u32,
        caller: Address,
    ) -> Achievement {
        if !validation::validate_text(&title, validation::MAX_TITLE_LENGTH)
            || !validation::validate_optional_text(&description, validation::MAX_DESCRIPTION_LENGTH)
            || points == 0
        {
            panic_with_error!(&env, IdentityError::InvalidInput);
        }

        let mut record = Self::load_identity(&env, id);
        Self::require_owner_or_admin(&env, &record, &caller);

        let now = env.ledger().timestamp();
        let achievement = Achievement {
            title: title.clone(),
            description,
            points,
            price_impact,
            timestamp: now,
        };

        let mut log = storage::read_achievements(&env, id);
        log.push_back(achievement.clone());
        storage::write_achievements(&env, id, &log);

        record.achievement_count += 1;
        Self::apply_score_change(
            &env,
            &mut record,
            points as i64,
            &Symbol::new(&env, "achievement"),
            now,
        );
        pricing::recompute(&env, &mut record);
        storage::write_identity(&env, &record);

        emit_achievement_added(&env, id, &title, points);

        achievement
    }

    // ========== Goals ==========

    /// Set a new goal for an identity (owner or admin).
    ///
    /// # Panics
    /// - `InvalidInput` if the title is invalid, the deadline is not
    ///   strictly in the future, or the target value is zero
    pub fn set_goal(env: Env, id: u64, goal: NewGoal, caller: Address) -> Goal {
        let now = env.ledger().timestamp();
        if !validation::validate_text(&goal.title, validation::MAX_TITLE_LENGTH)
            || !validation::validate_optional_text(
                &goal.description,
                validation::MAX_DESCRIPTION_LENGTH,
            )
            || goal.deadline <= now
            || goal.target_value == 0
        {
            panic_with_error!(&env, IdentityError::InvalidInput);
        }

        let record = Self::load_identity(&env, id);
        Self::require_owner_or_admin(&env, &record, &caller);

        let stored = Goal::from_input(goal);
        let mut list = storage::read_goals(&env, id);
        list.push_back(stored.clone());
        storage::write_goals(&env, id, &list);

        emit_goal_set(&env, id, list.len() - 1);

        stored
    }

    /// Record progress against a goal (owner or admin).
    ///
    /// Reaching the target while the goal is pending resolves it as
    /// completed: the reward is applied to reputation (cooldown-exempt)
    /// and the price bonus folds into the multiplier. Progress recorded
    /// against a resolved goal is a no-op.
    pub fn record_goal_progress(
        env: Env,
        id: u64,
        goal_ref: u32,
        new_value: u64,
        caller: Address,
    ) -> Goal {
        let mut record = Self::load_identity(&env, id);
        Self::require_owner_or_admin(&env, &record, &caller);

        let mut list = storage::read_goals(&env, id);
        let mut goal = match list.get(goal_ref) {
            Some(goal) => goal,
            None => panic_with_error!(&env, IdentityError::NotFound),
        };

        if !goal.is_pending() {
            return goal;
        }

        let now = env.ledger().timestamp();
        goal.current_value = new_value;
        emit_goal_progress(&env, id, goal_ref, new_value);

        if goal.current_value >= goal.target_value {
            goal.completed = true;
            Self::apply_score_change(
                &env,
                &mut record,
                goal.reward_points as i64,
                &Symbol::new(&env, "goal_reward"),
                now,
            );
            emit_goal_completed(&env, id, goal_ref);
        }

        list.set(goal_ref, goal.clone());
        storage::write_goals(&env, id, &list);
        pricing::recompute(&env, &mut record);
        storage::write_identity(&env, &record);

        goal
    }

    /// Evaluate a goal's deadline against the current ledger time.
    ///
    /// Deadlines are evaluated lazily; anyone may trigger this. A pending
    /// goal past its deadline resolves as failed: the penalty is deducted
    /// from reputation and the price penalty folds into the multiplier.
    /// Resolution is terminal; re-invoking afterwards is a no-op.
    pub fn evaluate_goal_deadline(env: Env, id: u64, goal_ref: u32) -> Goal {
        let mut record = Self::load_identity(&env, id);

        let mut list = storage::read_goals(&env, id);
        let mut goal = match list.get(goal_ref) {
            Some(goal) => goal,
            None => panic_with_error!(&env, IdentityError::NotFound),
        };

        let now = env.ledger().timestamp();
        if !goal.is_pending() || !goal.is_expired(now) {
            return goal;
        }

        goal.failed = true;
        Self::apply_score_change(
            &env,
            &mut record,
            -(goal.penalty_points as i64),
            &Symbol::new(&env, "goal_penalty"),
            now,
        );
        emit_goal_failed(&env, id, goal_ref);

        list.set(goal_ref, goal.clone());
        storage::write_goals(&env, id, &list);
        pricing::recompute(&env, &mut record);
        storage::write_identity(&env, &record);

        goal
    }

    // ========== Pricing ==========

    /// Recompute the derived price fields from stored state.
    ///
    /// Idempotent: with no intervening mutation, repeated calls yield the
    /// same price.
    pub fn recompute_price(env: Env, id: u64) -> i128 {
        let mut record = Self::load_identity(&env, id);
        pricing::recompute(&env, &mut record);
        storage::write_identity(&env, &record);
        record.current_price
    }

    // ========== Marketplace ==========

    /// List an identity for sale at a fixed price (owner only).
    pub fn list(env: Env, id: u64, price: i128, caller: Address) {
        let record = Self::load_identity(&env, id);

        caller.require_auth();
        if caller != record.owner {
            panic_with_error!(&env, IdentityError::Unauthorized);
        }
        if storage::read_listing(&env, id).is_some() {
            panic_with_error!(&env, IdentityError::AlreadyListed);
        }
        if price <= 0 {
            panic_with_error!(&env, IdentityError::InvalidInput);
        }

        let entry = Listing {
            identity_id: id,
            seller: caller.clone(),
            price,
            listed_at: env.ledger().timestamp(),
        };
        storage::write_listing(&env, &entry);

        emit_identity_listed(&env, id, &caller, price);
    }

    /// Buy a listed identity.
    ///
    /// All preconditions are re-validated against live state at execution
    /// time; in particular the payment must equal the listing price at
    /// this instant, not at the time the buyer observed it. Ownership and
    /// listing state are fully settled before payment leaves the buyer,
    /// so a reentrant callback during the token transfer observes only
    /// consistent state.
    ///
    /// # Panics
    /// - `NotListed` if there is no active listing
    /// - `SelfTrade` if the buyer is the seller
    /// - `PriceMismatch` if `payment` differs from the live listing price
    /// - `AlreadyExists` if the buyer already owns an identity
    pub fn buy(env: Env, id: u64, payment: i128, buyer: Address) {
        buyer.require_auth();
        let config = Self::read_config_or_panic(&env);

        let entry = match storage::read_listing(&env, id) {
            Some(entry) => entry,
            None => panic_with_error!(&env, IdentityError::NotListed),
        };
        if buyer == entry.seller {
            panic_with_error!(&env, IdentityError::SelfTrade);
        }
        if payment != entry.price {
            panic_with_error!(&env, IdentityError::PriceMismatch);
        }
        if storage::id_for_owner(&env, &buyer).is_some() {
            panic_with_error!(&env, IdentityError::AlreadyExists);
        }

        let mut record = Self::load_identity(&env, id);

        // Effects: settle ownership and listing state first. The username
        // index is untouched; names stay consumed across transfers.
        storage::clear_listing(&env, id);
        storage::clear_owner_index(&env, &record.owner);
        record.owner = buyer.clone();
        storage::write_owner_index(&env, &buyer, id);
        pricing::recompute(&env, &mut record);
        storage::write_identity(&env, &record);

        emit_identity_sold(&env, id, &entry.seller, &buyer, payment);

        // Interaction last: pay the seller.
        token::Client::new(&env, &config.payment_token).transfer(&buyer, &entry.seller, &payment);
    }

    /// Withdraw a listing (seller only).
    pub fn unlist(env: Env, id: u64, caller: Address) {
        caller.require_auth();

        let entry = match storage::read_listing(&env, id) {
            Some(entry) => entry,
            None => panic_with_error!(&env, IdentityError::NotListed),
        };
        if caller != entry.seller {
            panic_with_error!(&env, IdentityError::Unauthorized);
        }

        storage::clear_listing(&env, id);

        emit_identity_unlisted(&env, id);
    }

    // ========== Queries ==========

    /// Get an identity by id.
    pub fn get_identity(env: Env, id: u64) -> Identity {
        Self::load_identity(&env, id)
    }

    /// Get the identity id owned by an address.
    pub fn id_by_owner(env: Env, owner: Address) -> Option<u64> {
        storage::id_for_owner(&env, &owner)
    }

    /// Get the identity id a username resolves to.
    pub fn id_by_username(env: Env, username: Bytes) -> Option<u64> {
        storage::id_for_username(&env, &username)
    }

    /// Get the achievement log for an identity.
    pub fn get_achievements(env: Env, id: u64) -> Vec<Achievement> {
        Self::load_identity(&env, id);
        storage::read_achievements(&env, id)
    }

    /// Get the goal list for an identity.
    pub fn get_goals(env: Env, id: u64) -> Vec<Goal> {
        Self::load_identity(&env, id);
        storage::read_goals(&env, id)
    }

    /// Get the active listing for an identity, if any.
    pub fn get_listing(env: Env, id: u64) -> Option<Listing> {
        storage::read_listing(&env, id)
    }

    /// Get total identity count. Ids are sequential, so this is also the
    /// highest assigned id.
    pub fn identity_count(env: Env) -> u64 {
        storage::read_identity_count(&env)
    }

    /// Render the deterministic metadata document for an identity.
    pub fn render_metadata(env: Env, id: u64) -> Bytes {
        let record = Self::load_identity(&env, id);
        metadata::render(&env, &record)
    }

    // ========== Admin Functions ==========

    /// Upgrade the contract WASM (admin only).
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) {
        let admin = Self::read_admin_or_panic(&env);
        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    // ========== Internal Helpers ==========

    fn read_admin_or_panic(env: &Env) -> Address {
        storage::read_admin(env)
            .unwrap_or_else(|| panic_with_error!(env, IdentityError::NotInitialized))
    }

    fn read_config_or_panic(env: &Env) -> Config {
        storage::read_config(env)
            .unwrap_or_else(|| panic_with_error!(env, IdentityError::NotInitialized))
    }

    fn load_identity(env: &Env, id: u64) -> Identity {
        storage::read_identity(env, id)
            .unwrap_or_else(|| panic_with_error!(env, IdentityError::NotFound))
    }

    fn require_admin(env: &Env, caller: &Address) {
        let admin = Self::read_admin_or_panic(env);
        if *caller != admin {
            panic_with_error!(env, IdentityError::Unauthorized);
        }
        caller.require_auth();
    }

    /// Authorize `caller` as the identity owner or the administrator.
    /// Returns true for the admin path.
    fn require_owner_or_admin(env: &Env, record: &Identity, caller: &Address) -> bool {
        caller.require_auth();

        let admin = Self::read_admin_or_panic(env);
        if *caller == admin {
            return true;
        }
        if *caller != record.owner {
            panic_with_error!(env, IdentityError::Unauthorized);
        }
        false
    }

    /// Apply a score delta: clamp at zero, re-derive the level, stamp the
    /// update time, and emit reputation events. The caller persists the
    /// identity and triggers the price recomputation.
    fn apply_score_change(
        env: &Env,
        record: &mut Identity,
        delta: i64,
        reason: &Symbol,
        now: u64,
    ) -> u64 {
        let previous_level = record.skill_level;

        record.reputation_score = reputation::apply_delta(record.reputation_score, delta);
        record.skill_level = reputation::level_for(record.reputation_score);
        record.last_reputation_update = now;

        emit_reputation_updated(env, record.id, delta, record.reputation_score, reason);
        if record.skill_level > previous_level {
            emit_level_up(env, record.id, record.skill_level, &record.primary_skill);
        }

        record.reputation_score
    }
}
