use soroban_sdk::{contracterror, contracttype, Address};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,
    ContributorCount,
    TotalWeiRaised,
    TotalSoldTokens,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Operator(Address),
    Contribution(Address),
    Contributor(u32), // insertion index -> contributor
}

/// Cumulative amounts recorded for one contributor.
///
/// The presence of this entry is what marks an address as a known
/// contributor, so it is written on first contribution and never removed.
#[derive(Clone, Debug, Default, PartialEq)]
#[contracttype]
pub struct ContributorRecord {
    pub wei_contribution: i128,
    pub token_balance: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOwner = 3,
    NotOperator = 4,
    AlreadyOperator = 5,
    InvalidAmount = 6,
    IndexOutOfBounds = 7,
    Overflow = 8,
}

pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
