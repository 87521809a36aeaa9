//! Integration tests for the skill identity contract.

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Bytes, Env, Error, String, Symbol,
};
use soroban_skill_identity::{
    Config, IdentityError, NewGoal, SkillIdentityContract, SkillIdentityContractClient,
};

const BASE_PRICE: i128 = 1000;
const COOLDOWN: u64 = 3600;
const START_TIME: u64 = 1_700_000_000;

struct Setup<'a> {
    env: Env,
    client: SkillIdentityContractClient<'a>,
    admin: Address,
    token: Address,
}

fn setup() -> Setup<'static> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|l| l.timestamp = START_TIME);

    let admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(admin.clone());

    let contract_id = env.register(SkillIdentityContract, ());
    let client = SkillIdentityContractClient::new(&env, &contract_id);

    client.init(
        &admin,
        &Config {
            reputation_cooldown: COOLDOWN,
            base_price: BASE_PRICE,
            payment_token: sac.address(),
        },
    );

    Setup {
        env,
        client,
        admin,
        token: sac.address(),
    }
}

fn contract_err(e: IdentityError) -> Option<Result<Error, soroban_sdk::InvokeError>> {
    Some(Ok(Error::from_contract_error(e as u32)))
}

fn advance(env: &Env, seconds: u64) {
    env.ledger().with_mut(|l| l.timestamp += seconds);
}

fn create_alice(s: &Setup) -> (Address, u64) {
    let owner = Address::generate(&s.env);
    let identity = s.client.create(
        &owner,
        &Bytes::from_slice(&s.env, b"alice"),
        &String::from_str(&s.env, "Rust"),
    );
    (owner, identity.id)
}

// ========== Initialization ==========

#[test]
fn test_init() {
    let s = setup();
    assert_eq!(s.client.admin(), s.admin);
    assert_eq!(s.client.identity_count(), 0);

    let config = s.client.config();
    assert_eq!(config.reputation_cooldown, COOLDOWN);
    assert_eq!(config.base_price, BASE_PRICE);
}

#[test]
fn test_double_init_fails() {
    let s = setup();
    let result = s.client.try_init(
        &s.admin,
        &Config {
            reputation_cooldown: COOLDOWN,
            base_price: BASE_PRICE,
            payment_token: s.token.clone(),
        },
    );
    assert_eq!(result.err(), contract_err(IdentityError::AlreadyInitialized));
}

// ========== Identity Creation ==========

#[test]
fn test_create_identity_defaults() {
    let s = setup();
    let owner = Address::generate(&s.env);
    let username = Bytes::from_slice(&s.env, b"alice");

    let identity = s.client.create(&owner, &username, &String::from_str(&s.env, "Rust"));

    assert_eq!(identity.id, 1);
    assert_eq!(identity.owner, owner);
    assert_eq!(identity.username, username);
    assert_eq!(identity.reputation_score, 100);
    assert_eq!(identity.skill_level, 1);
    assert_eq!(identity.achievement_count, 0);
    assert!(!identity.verified);
    assert_eq!(identity.base_price, BASE_PRICE);
    assert_eq!(identity.current_price, BASE_PRICE);
    assert_eq!(identity.price_multiplier, 100);

    assert_eq!(s.client.identity_count(), 1);
    assert_eq!(s.client.id_by_owner(&owner), Some(1));
    assert_eq!(s.client.id_by_username(&username), Some(1));
    assert!(!s.client.is_username_available(&username));
}

#[test]
fn test_create_assigns_sequential_ids() {
    let s = setup();
    let (_, first) = create_alice(&s);

    let other = Address::generate(&s.env);
    let second = s.client.create(
        &other,
        &Bytes::from_slice(&s.env, b"bob"),
        &String::from_str(&s.env, "Go"),
    );

    assert_eq!(first, 1);
    assert_eq!(second.id, 2);
    assert_eq!(s.client.identity_count(), 2);
}

#[test]
fn test_create_rejects_duplicates() {
    let s = setup();
    let (owner, _) = create_alice(&s);

    // Same owner, new username.
    let result = s.client.try_create(
        &owner,
        &Bytes::from_slice(&s.env, b"alice_two"),
        &String::from_str(&s.env, "Rust"),
    );
    assert_eq!(result.err(), contract_err(IdentityError::AlreadyExists));

    // New owner, taken username.
    let other = Address::generate(&s.env);
    let result = s.client.try_create(
        &other,
        &Bytes::from_slice(&s.env, b"alice"),
        &String::from_str(&s.env, "Go"),
    );
    assert_eq!(result.err(), contract_err(IdentityError::AlreadyExists));
}

#[test]
fn test_create_rejects_invalid_input() {
    let s = setup();
    let owner = Address::generate(&s.env);

    let result = s.client.try_create(
        &owner,
        &Bytes::from_slice(&s.env, b""),
        &String::from_str(&s.env, "Rust"),
    );
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));

    let result = s.client.try_create(
        &owner,
        &Bytes::from_slice(&s.env, b"alice"),
        &String::from_str(&s.env, ""),
    );
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));
}

#[test]
fn test_get_identity_not_found() {
    let s = setup();
    assert_eq!(
        s.client.try_get_identity(&99).err(),
        contract_err(IdentityError::NotFound)
    );
    assert_eq!(
        s.client.try_render_metadata(&99).err(),
        contract_err(IdentityError::NotFound)
    );
}

// ========== Verification ==========

#[test]
fn test_verify_is_admin_only() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    let result = s.client.try_verify(&id, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::Unauthorized));

    s.client.verify(&id, &s.admin);
    assert!(s.client.get_identity(&id).verified);

    // Idempotent.
    s.client.verify(&id, &s.admin);
    assert!(s.client.get_identity(&id).verified);
}

// ========== Reputation ==========

#[test]
fn test_reputation_leveling() {
    let s = setup();
    let (owner, id) = create_alice(&s);
    let reason = Symbol::new(&s.env, "manual");

    let score = s.client.update_reputation(&id, &100, &reason, &owner);
    assert_eq!(score, 200);
    assert_eq!(s.client.get_identity(&id).skill_level, 2);

    advance(&s.env, COOLDOWN);
    let score = s.client.update_reputation(&id, &100, &reason, &owner);
    assert_eq!(score, 300);
    assert_eq!(s.client.get_identity(&id).skill_level, 3);
}

#[test]
fn test_reputation_floors_at_zero() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    let score = s
        .client
        .update_reputation(&id, &-10_000, &Symbol::new(&s.env, "slash"), &owner);
    assert_eq!(score, 0);

    let identity = s.client.get_identity(&id);
    assert_eq!(identity.reputation_score, 0);
    assert_eq!(identity.skill_level, 1);
}

#[test]
fn test_reputation_rate_limit() {
    let s = setup();
    let (owner, id) = create_alice(&s);
    let reason = Symbol::new(&s.env, "manual");

    s.client.update_reputation(&id, &10, &reason, &owner);

    // Second owner update inside the window is rejected.
    let result = s.client.try_update_reputation(&id, &10, &reason, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::RateLimited));

    // The admin path bypasses the cooldown.
    s.client.update_reputation(&id, &10, &reason, &s.admin);
    s.client.update_reputation(&id, &10, &reason, &s.admin);
    assert_eq!(s.client.get_identity(&id).reputation_score, 130);

    // After the window the owner can update again.
    advance(&s.env, COOLDOWN);
    s.client.update_reputation(&id, &10, &reason, &owner);
    assert_eq!(s.client.get_identity(&id).reputation_score, 140);
}

#[test]
fn test_reputation_requires_owner_or_admin() {
    let s = setup();
    let (_, id) = create_alice(&s);
    let stranger = Address::generate(&s.env);

    let result =
        s.client
            .try_update_reputation(&id, &10, &Symbol::new(&s.env, "manual"), &stranger);
    assert_eq!(result.err(), contract_err(IdentityError::Unauthorized));
}

// ========== Achievements ==========

#[test]
fn test_add_achievement() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    let achievement = s.client.add_achievement(
        &id,
        &String::from_str(&s.env, "First PR merged"),
        &String::from_str(&s.env, "Landed a fix upstream"),
        &25,
        &50,
        &owner,
    );
    assert_eq!(achievement.points, 25);

    let identity = s.client.get_identity(&id);
    assert_eq!(identity.reputation_score, 125);
    assert_eq!(identity.achievement_count, 1);
    assert_eq!(identity.price_multiplier, 150);
    assert_eq!(identity.current_price, BASE_PRICE * 150 / 100);

    assert_eq!(s.client.get_achievements(&id).len(), 1);
}

#[test]
fn test_achievements_bypass_cooldown() {
    let s = setup();
    let (owner, id) = create_alice(&s);
    let title = String::from_str(&s.env, "Milestone");
    let empty = String::from_str(&s.env, "");

    // Back-to-back achievements are fine; only direct edits are gated.
    s.client.add_achievement(&id, &title, &empty, &10, &0, &owner);
    s.client.add_achievement(&id, &title, &empty, &10, &0, &owner);
    assert_eq!(s.client.get_identity(&id).reputation_score, 120);

    // A direct owner edit right after is inside the window.
    let result =
        s.client
            .try_update_reputation(&id, &10, &Symbol::new(&s.env, "manual"), &owner);
    assert_eq!(result.err(), contract_err(IdentityError::RateLimited));
}

#[test]
fn test_add_achievement_rejects_invalid_input() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    let result = s.client.try_add_achievement(
        &id,
        &String::from_str(&s.env, ""),
        &String::from_str(&s.env, ""),
        &25,
        &0,
        &owner,
    );
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));

    let result = s.client.try_add_achievement(
        &id,
        &String::from_str(&s.env, "Milestone"),
        &String::from_str(&s.env, ""),
        &0,
        &0,
        &owner,
    );
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));
}

// ========== Goals ==========

fn sample_goal(env: &Env, deadline: u64) -> NewGoal {
    NewGoal {
        title: String::from_str(env, "Ship v1"),
        description: String::from_str(env, "First release"),
        deadline,
        target_value: 10,
        reward_points: 40,
        penalty_points: 30,
        price_bonus: 30,
        price_penalty: 20,
    }
}

#[test]
fn test_goal_completion() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    let goal = s
        .client
        .set_goal(&id, &sample_goal(&s.env, START_TIME + 1000), &owner);
    assert!(!goal.completed);
    assert!(!goal.failed);

    // Partial progress resolves nothing.
    let goal = s.client.record_goal_progress(&id, &0, &5, &owner);
    assert_eq!(goal.current_value, 5);
    assert!(!goal.completed);
    assert_eq!(s.client.get_identity(&id).reputation_score, 100);

    // Reaching the target completes the goal and applies the reward.
    let goal = s.client.record_goal_progress(&id, &0, &10, &owner);
    assert!(goal.completed);
    assert!(!goal.failed);

    let identity = s.client.get_identity(&id);
    assert_eq!(identity.reputation_score, 140);
    assert_eq!(identity.price_multiplier, 130);
    assert_eq!(identity.current_price, BASE_PRICE * 130 / 100);

    // Resolution is terminal; further progress is a no-op.
    let goal = s.client.record_goal_progress(&id, &0, &99, &owner);
    assert_eq!(goal.current_value, 10);
    assert_eq!(s.client.get_identity(&id).reputation_score, 140);
}

#[test]
fn test_goal_rejects_invalid_input() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    // Deadline not strictly in the future.
    let result = s.client.try_set_goal(&id, &sample_goal(&s.env, START_TIME), &owner);
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));

    // Zero target.
    let mut goal = sample_goal(&s.env, START_TIME + 1000);
    goal.target_value = 0;
    let result = s.client.try_set_goal(&id, &goal, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));

    // Empty title.
    let mut goal = sample_goal(&s.env, START_TIME + 1000);
    goal.title = String::from_str(&s.env, "");
    let result = s.client.try_set_goal(&id, &goal, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));

    // Unknown goal reference.
    let result = s.client.try_record_goal_progress(&id, &7, &1, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::NotFound));
}

#[test]
fn test_goal_deadline_failure_applies_once() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    s.client
        .set_goal(&id, &sample_goal(&s.env, START_TIME + 1000), &owner);

    // Before the deadline nothing happens.
    let goal = s.client.evaluate_goal_deadline(&id, &0);
    assert!(goal.is_pending());

    advance(&s.env, 1001);

    let goal = s.client.evaluate_goal_deadline(&id, &0);
    assert!(goal.failed);
    assert!(!goal.completed);

    let identity = s.client.get_identity(&id);
    assert_eq!(identity.reputation_score, 70);
    assert_eq!(identity.price_multiplier, 80);

    // Re-evaluation after resolution is a no-op: penalty applies once.
    s.client.evaluate_goal_deadline(&id, &0);
    let identity = s.client.get_identity(&id);
    assert_eq!(identity.reputation_score, 70);
    assert_eq!(identity.price_multiplier, 80);

    // Progress against a failed goal is also a no-op.
    let goal = s.client.record_goal_progress(&id, &0, &10, &owner);
    assert!(goal.failed);
    assert_eq!(s.client.get_identity(&id).reputation_score, 70);
}

#[test]
fn test_goal_penalty_floors_multiplier() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    let mut goal = sample_goal(&s.env, START_TIME + 100);
    goal.price_penalty = 500;
    s.client.set_goal(&id, &goal, &owner);

    advance(&s.env, 101);
    s.client.evaluate_goal_deadline(&id, &0);

    let identity = s.client.get_identity(&id);
    assert_eq!(identity.price_multiplier, 1);
    assert_eq!(identity.current_price, BASE_PRICE / 100);
}

// ========== Pricing ==========

#[test]
fn test_recompute_price_is_idempotent() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    s.client.add_achievement(
        &id,
        &String::from_str(&s.env, "Milestone"),
        &String::from_str(&s.env, ""),
        &10,
        &25,
        &owner,
    );

    let first = s.client.recompute_price(&id);
    let second = s.client.recompute_price(&id);
    assert_eq!(first, second);
    assert_eq!(first, BASE_PRICE * 125 / 100);
}

// ========== Marketplace ==========

#[test]
fn test_list_and_unlist() {
    let s = setup();
    let (owner, id) = create_alice(&s);
    let stranger = Address::generate(&s.env);

    let result = s.client.try_list(&id, &1500, &stranger);
    assert_eq!(result.err(), contract_err(IdentityError::Unauthorized));

    let result = s.client.try_list(&id, &0, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::InvalidInput));

    s.client.list(&id, &1500, &owner);
    let entry = s.client.get_listing(&id).unwrap();
    assert_eq!(entry.seller, owner);
    assert_eq!(entry.price, 1500);

    let result = s.client.try_list(&id, &2000, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::AlreadyListed));

    // Only the seller can unlist.
    let result = s.client.try_unlist(&id, &stranger);
    assert_eq!(result.err(), contract_err(IdentityError::Unauthorized));

    s.client.unlist(&id, &owner);
    assert!(s.client.get_listing(&id).is_none());

    let result = s.client.try_unlist(&id, &owner);
    assert_eq!(result.err(), contract_err(IdentityError::NotListed));
}

#[test]
fn test_buy_transfers_ownership_and_payment() {
    let s = setup();
    let (seller, id) = create_alice(&s);
    let buyer = Address::generate(&s.env);

    token::StellarAssetClient::new(&s.env, &s.token).mint(&buyer, &5000);
    let balances = token::Client::new(&s.env, &s.token);

    s.client.list(&id, &1500, &seller);
    s.client.buy(&id, &1500, &buyer);

    // Ownership moved in both index directions; username still resolves.
    let identity = s.client.get_identity(&id);
    assert_eq!(identity.owner, buyer);
    assert_eq!(s.client.id_by_owner(&buyer), Some(id));
    assert_eq!(s.client.id_by_owner(&seller), None);
    assert_eq!(
        s.client.id_by_username(&Bytes::from_slice(&s.env, b"alice")),
        Some(id)
    );

    // Listing cleared, payment settled.
    assert!(s.client.get_listing(&id).is_none());
    assert_eq!(balances.balance(&seller), 1500);
    assert_eq!(balances.balance(&buyer), 3500);
}

#[test]
fn test_double_buy_fails_second_attempt() {
    let s = setup();
    let (seller, id) = create_alice(&s);
    let first = Address::generate(&s.env);
    let second = Address::generate(&s.env);

    let mint = token::StellarAssetClient::new(&s.env, &s.token);
    mint.mint(&first, &2000);
    mint.mint(&second, &2000);

    s.client.list(&id, &1500, &seller);
    s.client.buy(&id, &1500, &first);

    // The listing is gone the instant the first purchase commits.
    let result = s.client.try_buy(&id, &1500, &second);
    assert_eq!(result.err(), contract_err(IdentityError::NotListed));

    assert_eq!(s.client.get_identity(&id).owner, first);
}

#[test]
fn test_buy_preconditions() {
    let s = setup();
    let (seller, id) = create_alice(&s);
    let buyer = Address::generate(&s.env);
    token::StellarAssetClient::new(&s.env, &s.token).mint(&buyer, &5000);

    // Nothing listed yet.
    let result = s.client.try_buy(&id, &1500, &buyer);
    assert_eq!(result.err(), contract_err(IdentityError::NotListed));

    s.client.list(&id, &1500, &seller);

    // Sellers cannot buy their own listing.
    let result = s.client.try_buy(&id, &1500, &seller);
    assert_eq!(result.err(), contract_err(IdentityError::SelfTrade));

    // Payment must match the live price exactly.
    let result = s.client.try_buy(&id, &1400, &buyer);
    assert_eq!(result.err(), contract_err(IdentityError::PriceMismatch));
    let result = s.client.try_buy(&id, &1600, &buyer);
    assert_eq!(result.err(), contract_err(IdentityError::PriceMismatch));

    // One identity per account: existing holders cannot buy another.
    let holder = Address::generate(&s.env);
    token::StellarAssetClient::new(&s.env, &s.token).mint(&holder, &5000);
    s.client.create(
        &holder,
        &Bytes::from_slice(&s.env, b"bob"),
        &String::from_str(&s.env, "Go"),
    );
    let result = s.client.try_buy(&id, &1500, &holder);
    assert_eq!(result.err(), contract_err(IdentityError::AlreadyExists));
}

#[test]
fn test_username_never_reclaimed_after_sale() {
    let s = setup();
    let (seller, id) = create_alice(&s);
    let buyer = Address::generate(&s.env);
    token::StellarAssetClient::new(&s.env, &s.token).mint(&buyer, &2000);

    s.client.list(&id, &1000, &seller);
    s.client.buy(&id, &1000, &buyer);

    // The seller may start over, but the old username stays consumed.
    let result = s.client.try_create(
        &seller,
        &Bytes::from_slice(&s.env, b"alice"),
        &String::from_str(&s.env, "Zig"),
    );
    assert_eq!(result.err(), contract_err(IdentityError::AlreadyExists));

    let fresh = s.client.create(
        &seller,
        &Bytes::from_slice(&s.env, b"alice_reborn"),
        &String::from_str(&s.env, "Zig"),
    );
    assert_eq!(fresh.id, 2);
}

// ========== Metadata ==========

#[test]
fn test_metadata_is_deterministic() {
    let s = setup();
    let (owner, id) = create_alice(&s);

    s.client.add_achievement(
        &id,
        &String::from_str(&s.env, "Milestone"),
        &String::from_str(&s.env, ""),
        &25,
        &50,
        &owner,
    );

    let first = s.client.render_metadata(&id);
    let second = s.client.render_metadata(&id);
    assert_eq!(first, second);
    assert!(first.len() > 0);
}

#[test]
fn test_metadata_has_six_attributes() {
    let s = setup();
    let (_, id) = create_alice(&s);

    let doc = s.client.render_metadata(&id);
    let len = doc.len() as usize;
    let mut raw = [0u8; 1024];
    doc.copy_into_slice(&mut raw[..len]);

    let needle = b"trait_type";
    let count = raw[..len]
        .windows(needle.len())
        .filter(|w| w == needle)
        .count();
    assert_eq!(count, 6);
}
