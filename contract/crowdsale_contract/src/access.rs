use soroban_sdk::{Address, Env};

use crate::storage_types::{DataKey, Error, PersistentKey, TTL_PERSISTENT};

/// Roles of the crowdsale permission table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    Operator,
}

/// Whether `who` holds `role`. Pure lookup, no auth involved.
pub fn has_role(env: &Env, who: &Address, role: Role) -> bool {
    match role {
        Role::Owner => owner(env).as_ref() == Some(who),
        Role::Operator => env
            .storage()
            .persistent()
            .get(&PersistentKey::Operator(who.clone()))
            .unwrap_or(false),
    }
}

/// Authenticate `caller` and check it holds `role`.
pub fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    if has_role(env, caller, role) {
        if role == Role::Operator {
            env.storage().persistent().extend_ttl(
                &PersistentKey::Operator(caller.clone()),
                TTL_PERSISTENT,
                TTL_PERSISTENT,
            );
        }
        return Ok(());
    }
    Err(match role {
        Role::Owner => Error::NotOwner,
        Role::Operator => Error::NotOperator,
    })
}

/// Authenticate the stored owner.
pub fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner = owner(env).ok_or(Error::NotInitialized)?;
    owner.require_auth();
    Ok(owner)
}

pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn grant_operator(env: &Env, operator: &Address) -> Result<(), Error> {
    if has_role(env, operator, Role::Operator) {
        return Err(Error::AlreadyOperator);
    }
    let key = PersistentKey::Operator(operator.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
    Ok(())
}

pub fn revoke_operator(env: &Env, operator: &Address) -> Result<(), Error> {
    if !has_role(env, operator, Role::Operator) {
        return Err(Error::NotOperator);
    }
    env.storage()
        .persistent()
        .remove(&PersistentKey::Operator(operator.clone()));
    Ok(())
}
