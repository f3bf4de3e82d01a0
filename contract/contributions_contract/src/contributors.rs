use soroban_sdk::{Address, Env};

use crate::storage_types::{ContributorRecord, DataKey, PersistentKey, TTL_PERSISTENT};

/// Load the record for `account`, or `None` if it never contributed.
pub fn record_of(env: &Env, account: &Address) -> Option<ContributorRecord> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Contribution(account.clone()))
}

pub fn exists(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&PersistentKey::Contribution(account.clone()))
}

pub fn count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

pub fn at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&PersistentKey::Contributor(index))
}

/// Append `account` to the ordered contributor index.
///
/// Callers must check [`exists`] first; the index itself does not dedupe.
pub fn register(env: &Env, account: &Address) {
    let index = count(env);
    let key = PersistentKey::Contributor(index);
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
    env.storage()
        .instance()
        .set(&DataKey::ContributorCount, &(index + 1));
}

pub fn store_record(env: &Env, account: &Address, record: &ContributorRecord) {
    let key = PersistentKey::Contribution(account.clone());
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
}
