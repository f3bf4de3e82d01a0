use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::storage_types::CrowdsaleState;

#[contracttype]
#[derive(Clone)]
pub struct TokensPurchasedEvent {
    pub purchaser: Address,
    pub beneficiary: Address,
    pub value: i128,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct StateChangedEvent {
    pub operator: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct ExpiredEvent {
    pub operator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FinalizedEvent {
    pub state: CrowdsaleState,
    pub wei_raised: i128,
    pub unsold_tokens: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundsClosedEvent {
    pub fee: i128,
    pub payout: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundClaimedEvent {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct OperatorChangedEvent {
    pub operator: Address,
}

fn topic(env: &Env, name: &str) -> (Symbol, Symbol) {
    (Symbol::new(env, "crowdsale"), Symbol::new(env, name))
}

pub fn emit_tokens_purchased(env: &Env, event: TokensPurchasedEvent) {
    env.events().publish(topic(env, "tokens_purchased"), event);
}

pub fn emit_enabled(env: &Env, event: StateChangedEvent) {
    env.events().publish(topic(env, "enabled"), event);
}

pub fn emit_rejected(env: &Env, event: StateChangedEvent) {
    env.events().publish(topic(env, "rejected"), event);
}

pub fn emit_expired(env: &Env, event: ExpiredEvent) {
    env.events().publish(topic(env, "expired"), event);
}

pub fn emit_finalized(env: &Env, event: FinalizedEvent) {
    env.events().publish(topic(env, "finalized"), event);
}

pub fn emit_refunds_enabled(env: &Env) {
    env.events().publish(topic(env, "refunds_enabled"), ());
}

pub fn emit_refunds_closed(env: &Env, event: RefundsClosedEvent) {
    env.events().publish(topic(env, "refunds_closed"), event);
}

pub fn emit_refund_claimed(env: &Env, event: RefundClaimedEvent) {
    env.events().publish(topic(env, "refund_claimed"), event);
}

pub fn emit_paused(env: &Env, event: StateChangedEvent) {
    env.events().publish(topic(env, "paused"), event);
}

pub fn emit_unpaused(env: &Env, event: StateChangedEvent) {
    env.events().publish(topic(env, "unpaused"), event);
}

pub fn emit_operator_added(env: &Env, event: OperatorChangedEvent) {
    env.events().publish(topic(env, "operator_added"), event);
}

pub fn emit_operator_removed(env: &Env, event: OperatorChangedEvent) {
    env.events().publish(topic(env, "operator_removed"), event);
}
