#![no_std]

mod contributors;
mod events;
mod storage_types;


use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Env};

pub use storage_types::{ContributorRecord, Error};
use storage_types::{DataKey, PersistentKey, TTL_INSTANCE, TTL_PERSISTENT};

/// Ledger of what every investor paid and received across a token sale.
///
/// Writes are restricted to operators (normally the crowdsale contract
/// itself); reads are open to anyone.
#[contract]
pub struct ContributionsContract;

#[contractimpl]
impl ContributionsContract {
    /// Initialize the ledger. The owner manages the operator set.
    pub fn initialize(env: Env, owner: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::ContributorCount, &0u32);
        env.storage().instance().set(&DataKey::TotalWeiRaised, &0i128);
        env.storage().instance().set(&DataKey::TotalSoldTokens, &0i128);
        extend_instance(&env);

        Ok(())
    }

    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        require_owner(&env)?;
        if is_operator(&env, &operator) {
            return Err(Error::AlreadyOperator);
        }

        set_operator(&env, &operator, true);
        events::emit_operator_added(&env, events::OperatorChangedEvent { operator });
        Ok(())
    }

    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        require_owner(&env)?;
        if !is_operator(&env, &operator) {
            return Err(Error::NotOperator);
        }

        set_operator(&env, &operator, false);
        events::emit_operator_removed(&env, events::OperatorChangedEvent { operator });
        Ok(())
    }

    /// Drop the operator role held by `operator` itself.
    pub fn renounce_operator(env: Env, operator: Address) -> Result<(), Error> {
        require_operator(&env, &operator)?;

        set_operator(&env, &operator, false);
        events::emit_operator_removed(&env, events::OperatorChangedEvent { operator });
        Ok(())
    }

    /// Add `wei_amount` and `token_amount` to the balances of `account`.
    ///
    /// Amounts accumulate, they never overwrite. The account joins the
    /// enumerable contributor list on its first call only.
    pub fn add_balance(
        env: Env,
        operator: Address,
        account: Address,
        wei_amount: i128,
        token_amount: i128,
    ) -> Result<(), Error> {
        require_operator(&env, &operator)?;
        if wei_amount < 0 || token_amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let new_contributor = !contributors::exists(&env, &account);
        let mut record = contributors::record_of(&env, &account).unwrap_or_default();
        record.wei_contribution = record
            .wei_contribution
            .checked_add(wei_amount)
            .ok_or(Error::Overflow)?;
        record.token_balance = record
            .token_balance
            .checked_add(token_amount)
            .ok_or(Error::Overflow)?;

        let total_wei = read_total(&env, DataKey::TotalWeiRaised)
            .checked_add(wei_amount)
            .ok_or(Error::Overflow)?;
        let total_tokens = read_total(&env, DataKey::TotalSoldTokens)
            .checked_add(token_amount)
            .ok_or(Error::Overflow)?;

        if new_contributor {
            contributors::register(&env, &account);
        }
        contributors::store_record(&env, &account, &record);
        env.storage().instance().set(&DataKey::TotalWeiRaised, &total_wei);
        env.storage().instance().set(&DataKey::TotalSoldTokens, &total_tokens);
        extend_instance(&env);

        log!(&env, "balance added", account, wei_amount, token_amount);
        events::emit_balance_added(
            &env,
            events::BalanceAddedEvent {
                account,
                wei_amount,
                token_amount,
                new_contributor,
            },
        );

        Ok(())
    }

    /// View functions
    pub fn owner(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotInitialized))
    }

    pub fn is_operator(env: Env, account: Address) -> bool {
        is_operator(&env, &account)
    }

    pub fn wei_contribution(env: Env, account: Address) -> i128 {
        contributors::record_of(&env, &account)
            .map(|r| r.wei_contribution)
            .unwrap_or(0)
    }

    pub fn token_balance(env: Env, account: Address) -> i128 {
        contributors::record_of(&env, &account)
            .map(|r| r.token_balance)
            .unwrap_or(0)
    }

    pub fn contributor_exists(env: Env, account: Address) -> bool {
        contributors::exists(&env, &account)
    }

    pub fn contributors_length(env: Env) -> u32 {
        contributors::count(&env)
    }

    pub fn contributor_at(env: Env, index: u32) -> Result<Address, Error> {
        contributors::at(&env, index).ok_or(Error::IndexOutOfBounds)
    }

    pub fn total_wei_raised(env: Env) -> i128 {
        read_total(&env, DataKey::TotalWeiRaised)
    }

    pub fn total_sold_tokens(env: Env) -> i128 {
        read_total(&env, DataKey::TotalSoldTokens)
    }
}

// Helper functions
fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn read_total(env: &Env, key: DataKey) -> i128 {
    env.storage().instance().get(&key).unwrap_or(0)
}

fn is_operator(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&PersistentKey::Operator(account.clone()))
        .unwrap_or(false)
}

fn set_operator(env: &Env, account: &Address, enabled: bool) {
    let key = PersistentKey::Operator(account.clone());
    if enabled {
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
    } else {
        env.storage().persistent().remove(&key);
    }
}

fn require_owner(env: &Env) -> Result<(), Error> {
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)?;
    owner.require_auth();
    Ok(())
}

fn require_operator(env: &Env, operator: &Address) -> Result<(), Error> {
    operator.require_auth();
    if !is_operator(env, operator) {
        return Err(Error::NotOperator);
    }
    Ok(())
}
