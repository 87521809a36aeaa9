//! Marketplace listing type.

use soroban_sdk::{contracttype, Address};

/// An open offer to sell an identity at a fixed price.
///
/// At most one listing exists per identity; an identity is "listed" when
/// its listing entry is present in storage.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Listing {
    /// The identity offered for sale.
    pub identity_id: u64,

    /// Identity owner at listing time. Only the seller can unlist, and
    /// payment settles to this address.
    pub seller: Address,

    /// Asking price in the payment token. A buyer's payment must match
    /// this value exactly at execution time.
    pub price: i128,

    /// Ledger timestamp when the listing was created.
    pub listed_at: u64,
}
