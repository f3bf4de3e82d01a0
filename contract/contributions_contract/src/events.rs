use soroban_sdk::{contracttype, Address, Env, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct BalanceAddedEvent {
    pub account: Address,
    pub wei_amount: i128,
    pub token_amount: i128,
    pub new_contributor: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct OperatorChangedEvent {
    pub operator: Address,
}

pub fn emit_balance_added(env: &Env, event: BalanceAddedEvent) {
    env.events().publish(
        (Symbol::new(env, "balance_added"),),
        event,
    );
}

pub fn emit_operator_added(env: &Env, event: OperatorChangedEvent) {
    env.events().publish(
        (Symbol::new(env, "operator_added"),),
        event,
    );
}

pub fn emit_operator_removed(env: &Env, event: OperatorChangedEvent) {
    env.events().publish(
        (Symbol::new(env, "operator_removed"),),
        event,
    );
}
