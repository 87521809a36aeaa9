//! Deterministic metadata document rendering.
//!
//! Produces a token-metadata JSON document for an identity: name,
//! human-readable description, and exactly six attributes. The output is
//! a pure function of the identity record, so identical state renders to
//! byte-identical documents.

use soroban_sdk::{Bytes, Env, String};

use crate::identity::Identity;
use crate::validation::MAX_SKILL_LENGTH;

/// Render the metadata document for an identity.
pub fn render(env: &Env, identity: &Identity) -> Bytes {
    let mut doc = Bytes::new(env);

    append_slice(env, &mut doc, b"{\"name\":\"@");
    doc.append(&identity.username);
    append_slice(env, &mut doc, b"\",\"description\":\"Skill identity of @");
    doc.append(&identity.username);
    append_slice(env, &mut doc, b", specializing in ");
    doc.append(&string_to_bytes(env, &identity.primary_skill));
    append_slice(env, &mut doc, b"\",\"attributes\":[");

    append_numeric_attribute(
        env,
        &mut doc,
        b"Reputation Score",
        &u64_to_bytes(env, identity.reputation_score),
        false,
    );
    append_numeric_attribute(
        env,
        &mut doc,
        b"Skill Level",
        &u64_to_bytes(env, identity.skill_level as u64),
        false,
    );
    append_numeric_attribute(
        env,
        &mut doc,
        b"Achievement Count",
        &u64_to_bytes(env, identity.achievement_count as u64),
        false,
    );
    append_string_attribute(
        env,
        &mut doc,
        b"Primary Skill",
        &string_to_bytes(env, &identity.primary_skill),
    );
    append_numeric_attribute(
        env,
        &mut doc,
        b"Verified",
        &bool_to_bytes(env, identity.verified),
        false,
    );
    append_numeric_attribute(
        env,
        &mut doc,
        b"Current Price",
        &i128_to_bytes(env, identity.current_price),
        true,
    );

    append_slice(env, &mut doc, b"]}");

    doc
}

/// Append one `{"trait_type":...,"value":<bare>}` entry.
fn append_numeric_attribute(env: &Env, doc: &mut Bytes, name: &[u8], value: &Bytes, last: bool) {
    append_slice(env, doc, b"{\"trait_type\":\"");
    append_slice(env, doc, name);
    append_slice(env, doc, b"\",\"value\":");
    doc.append(value);
    append_slice(env, doc, b"}");
    if !last {
        append_slice(env, doc, b",");
    }
}

/// Append one `{"trait_type":...,"value":"<quoted>"}` entry.
fn append_string_attribute(env: &Env, doc: &mut Bytes, name: &[u8], value: &Bytes) {
    append_slice(env, doc, b"{\"trait_type\":\"");
    append_slice(env, doc, name);
    append_slice(env, doc, b"\",\"value\":\"");
    doc.append(value);
    append_slice(env, doc, b"\"},");
}

// ========== Byte Formatting Helpers ==========

fn append_slice(env: &Env, doc: &mut Bytes, slice: &[u8]) {
    doc.append(&Bytes::from_slice(env, slice));
}

/// Copy a contract String into Bytes. Lengths are bounded by validation,
/// so the stack buffer always fits.
fn string_to_bytes(env: &Env, s: &String) -> Bytes {
    let len = s.len() as usize;
    let mut buffer = [0u8; MAX_SKILL_LENGTH as usize];
    s.copy_into_slice(&mut buffer[..len]);
    Bytes::from_slice(env, &buffer[..len])
}

fn bool_to_bytes(env: &Env, value: bool) -> Bytes {
    if value {
        Bytes::from_slice(env, b"true")
    } else {
        Bytes::from_slice(env, b"false")
    }
}

/// Convert u64 to decimal Bytes.
fn u64_to_bytes(env: &Env, n: u64) -> Bytes {
    if n == 0 {
        return Bytes::from_slice(env, b"0");
    }

    let mut buffer = [0u8; 20];
    let mut idx = 20;
    let mut num = n;

    while num > 0 {
        idx -= 1;
        buffer[idx] = b'0' + (num % 10) as u8;
        num /= 10;
    }

    Bytes::from_slice(env, &buffer[idx..])
}

/// Convert i128 to decimal Bytes.
fn i128_to_bytes(env: &Env, n: i128) -> Bytes {
    if n == 0 {
        return Bytes::from_slice(env, b"0");
    }

    let is_negative = n < 0;
    let mut num = n.unsigned_abs();
    let mut buffer = [0u8; 40];
    let mut idx = 40;

    while num > 0 {
        idx -= 1;
        buffer[idx] = b'0' + (num % 10) as u8;
        num /= 10;
    }

    if is_negative {
        idx -= 1;
        buffer[idx] = b'-';
    }

    Bytes::from_slice(env, &buffer[idx..])
}
