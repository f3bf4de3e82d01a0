use soroban_sdk::{contracterror, contracttype, Address};

use crate::bonus::BonusTable;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,
    Config,
    State,
    Finalized,
    Paused,
    WeiRaised,
    TokensSold,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Operator(Address),
    Deposit(Address),
}

/// Lifecycle of a crowdsale.
///
/// `Review` is the initial state. `Closed`, `Rejected` and `Expired` are
/// terminal; `Refunding` only lets investors pull their deposits back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CrowdsaleState {
    Review,
    Active,
    Refunding,
    Closed,
    Expired,
    Rejected,
}

/// Deployment parameters of a single crowdsale.
#[derive(Clone, Debug)]
#[contracttype]
pub struct CrowdsaleConfig {
    pub opening_time: u64,
    pub closing_time: u64,
    pub cap: i128,                // max payment-token amount accepted
    pub goal: i128,               // min amount for the sale to succeed
    pub rate: i128,               // tokens per payment unit, before bonus
    pub wallet: Address,          // receives proceeds and unsold tokens
    pub fee_wallet: Address,      // receives the platform fee
    pub fee_per_mille: u32,       // e.g. 50 = 5%
    pub token: Address,           // token being sold
    pub payment_token: Address,   // token contributions are paid in
    pub contributions: Address,   // contribution ledger contract
    pub dao: Address,             // membership / stake oracle
    pub bonus: BonusTable,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Construction-time validation
    InvalidRate = 3,
    InvalidCap = 4,
    InvalidGoal = 5,
    GoalExceedsCap = 6,
    InvalidTimeWindow = 7,
    OpeningTimeInPast = 8,
    InvalidWallet = 9,
    InvalidFeeWallet = 10,
    InvalidFeePerMille = 11,
    InvalidBonusTable = 12,

    // Authorization
    NotOwner = 13,
    NotOperator = 14,
    AlreadyOperator = 15,

    // State guards
    NotReviewing = 16,
    NotActive = 17,
    NotOpen = 18,
    NotClosed = 19,
    AlreadyFinalized = 20,
    NotRefunding = 21,
    NotExpired = 22,
    Paused = 23,
    NotPaused = 24,

    // Monetary
    ZeroValue = 25,
    InvalidBeneficiary = 26,
    CapExceeded = 27,
    NoDeposit = 28,
    Overflow = 29,

    // sold token and payment token must be distinct contracts
    SameToken = 30,
}

// Constants
pub const FEE_DENOMINATOR: i128 = 1000; // fee is expressed per mille
pub const MAX_FEE_PER_MILLE: u32 = 1000;
pub const EXPIRY_GRACE_PERIOD: u64 = 365 * 86400; // seconds after closing
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
