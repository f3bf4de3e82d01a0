use soroban_sdk::{contractclient, Address, Env};

/// Contribution ledger the crowdsale reports every purchase to.
///
/// The crowdsale passes its own address as `operator`, so it must have been
/// granted the operator role on the ledger before the sale opens.
#[allow(dead_code)]
#[contractclient(name = "ContributionsClient")]
pub trait ContributionsInterface {
    fn add_balance(env: Env, operator: Address, account: Address, wei_amount: i128, token_amount: i128);
}
