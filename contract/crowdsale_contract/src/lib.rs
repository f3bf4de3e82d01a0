#![no_std]


mod access;
mod bonus;
mod events;
mod ledger;
mod storage_types;
mod vault;

pub use access::Role;
pub use bonus::{BonusPolicy, BonusTable, BonusTier, DaoBonusPolicy, DaoClient, DaoInterface};
pub use ledger::{ContributionsClient, ContributionsInterface};
pub use storage_types::{CrowdsaleConfig, CrowdsaleState, Error};

use storage_types::{DataKey, EXPIRY_GRACE_PERIOD, MAX_FEE_PER_MILLE, TTL_INSTANCE};

use soroban_sdk::{contract, contractimpl, log, panic_with_error, token, Address, Env};

#[contract]
pub struct CrowdsaleContract;

#[contractimpl]
impl CrowdsaleContract {
    /// Initialize the crowdsale in the `Review` state.
    ///
    /// The whole config is validated before anything is stored. The owner
    /// also becomes the first operator.
    pub fn initialize(env: Env, owner: Address, config: CrowdsaleConfig) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        validate_config(&env, &config)?;

        access::set_owner(&env, &owner);
        access::grant_operator(&env, &owner)?;
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::State, &CrowdsaleState::Review);
        env.storage().instance().set(&DataKey::Finalized, &false);
        env.storage().instance().set(&DataKey::Paused, &false);
        env.storage().instance().set(&DataKey::WeiRaised, &0i128);
        env.storage().instance().set(&DataKey::TokensSold, &0i128);
        extend_instance(&env);

        log!(&env, "crowdsale initialized", owner, config.cap, config.goal);
        Ok(())
    }

    // Permission table

    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        access::require_owner(&env)?;
        access::grant_operator(&env, &operator)?;
        events::emit_operator_added(&env, events::OperatorChangedEvent { operator });
        Ok(())
    }

    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        access::require_owner(&env)?;
        access::revoke_operator(&env, &operator)?;
        events::emit_operator_removed(&env, events::OperatorChangedEvent { operator });
        Ok(())
    }

    pub fn renounce_operator(env: Env, operator: Address) -> Result<(), Error> {
        access::require_role(&env, &operator, Role::Operator)?;
        access::revoke_operator(&env, &operator)?;
        events::emit_operator_removed(&env, events::OperatorChangedEvent { operator });
        Ok(())
    }

    pub fn pause(env: Env, operator: Address) -> Result<(), Error> {
        access::require_role(&env, &operator, Role::Operator)?;
        if is_paused(&env) {
            return Err(Error::Paused);
        }
        env.storage().instance().set(&DataKey::Paused, &true);
        extend_instance(&env);
        events::emit_paused(&env, events::StateChangedEvent { operator });
        Ok(())
    }

    pub fn unpause(env: Env, operator: Address) -> Result<(), Error> {
        access::require_role(&env, &operator, Role::Operator)?;
        if !is_paused(&env) {
            return Err(Error::NotPaused);
        }
        env.storage().instance().set(&DataKey::Paused, &false);
        extend_instance(&env);
        events::emit_unpaused(&env, events::StateChangedEvent { operator });
        Ok(())
    }

    // Admission control

    /// Approve the crowdsale: `Review` -> `Active`.
    pub fn enable(env: Env, operator: Address) -> Result<(), Error> {
        access::require_role(&env, &operator, Role::Operator)?;
        if load_state(&env) != CrowdsaleState::Review {
            return Err(Error::NotReviewing);
        }

        set_state(&env, CrowdsaleState::Active);

        log!(&env, "crowdsale enabled", operator);
        events::emit_enabled(&env, events::StateChangedEvent { operator });
        Ok(())
    }

    /// Turn the crowdsale down: `Review` -> `Rejected`.
    ///
    /// Tokens already deposited for the sale go back to the wallet.
    pub fn reject(env: Env, operator: Address) -> Result<(), Error> {
        access::require_role(&env, &operator, Role::Operator)?;
        if load_state(&env) != CrowdsaleState::Review {
            return Err(Error::NotReviewing);
        }

        set_state(&env, CrowdsaleState::Rejected);

        let config = load_config(&env);
        let returned = vault::sweep(&env, &config.token, &config.wallet);

        log!(&env, "crowdsale rejected", operator, returned);
        events::emit_rejected(&env, events::StateChangedEvent { operator });
        Ok(())
    }

    // Purchases

    /// Buy tokens for `beneficiary`, paid by `purchaser`.
    ///
    /// Returns the amount of tokens issued.
    pub fn buy_tokens(
        env: Env,
        purchaser: Address,
        beneficiary: Address,
        value: i128,
    ) -> Result<i128, Error> {
        purchaser.require_auth();
        Self::process_purchase(&env, &purchaser, &beneficiary, value)
    }

    /// Buy tokens for the paying investor itself.
    pub fn contribute(env: Env, investor: Address, value: i128) -> Result<i128, Error> {
        investor.require_auth();
        Self::process_purchase(&env, &investor, &investor, value)
    }

    // Settlement

    /// Close the sale once its time is over. Anyone may call it, once.
    ///
    /// If the goal was reached the funds are released to the wallets,
    /// otherwise the crowdsale switches to `Refunding`. Unsold tokens are
    /// returned to the wallet in both cases.
    pub fn finalize(env: Env) -> Result<CrowdsaleState, Error> {
        let now = env.ledger().timestamp();
        let config = load_config(&env);

        if is_finalized(&env) {
            return Err(Error::AlreadyFinalized);
        }
        if now < config.closing_time {
            return Err(Error::NotClosed);
        }
        if load_state(&env) != CrowdsaleState::Active {
            return Err(Error::NotActive);
        }

        let raised = wei_raised(&env);
        env.storage().instance().set(&DataKey::Finalized, &true);

        let state = if raised >= config.goal {
            set_state(&env, CrowdsaleState::Closed);
            let (fee, payout) = vault::release(&env, &config, raised)?;
            events::emit_refunds_closed(&env, events::RefundsClosedEvent { fee, payout });
            CrowdsaleState::Closed
        } else {
            set_state(&env, CrowdsaleState::Refunding);
            events::emit_refunds_enabled(&env);
            CrowdsaleState::Refunding
        };

        let unsold_tokens = vault::sweep(&env, &config.token, &config.wallet);

        log!(&env, "crowdsale finalized", state, raised, unsold_tokens);
        events::emit_finalized(
            &env,
            events::FinalizedEvent {
                state,
                wei_raised: raised,
                unsold_tokens,
            },
        );
        Ok(state)
    }

    /// Pay back the deposit of `investor` after a failed sale.
    pub fn claim_refund(env: Env, investor: Address) -> Result<i128, Error> {
        if load_state(&env) != CrowdsaleState::Refunding {
            return Err(Error::NotRefunding);
        }

        let config = load_config(&env);
        let amount = vault::refund(&env, &config.payment_token, &investor)?;

        log!(&env, "refund claimed", investor, amount);
        events::emit_refund_claimed(&env, events::RefundClaimedEvent { investor, amount });
        Ok(amount)
    }

    /// Recover funds of a crowdsale nobody finalized within the grace period.
    ///
    /// The whole payment-token balance goes to the fee wallet.
    pub fn set_expired_and_withdraw(env: Env, operator: Address) -> Result<i128, Error> {
        access::require_role(&env, &operator, Role::Operator)?;
        let now = env.ledger().timestamp();
        let config = load_config(&env);

        if load_state(&env) != CrowdsaleState::Active {
            return Err(Error::NotActive);
        }
        if now < config.closing_time.saturating_add(EXPIRY_GRACE_PERIOD) {
            return Err(Error::NotExpired);
        }

        set_state(&env, CrowdsaleState::Expired);
        let amount = vault::sweep(&env, &config.payment_token, &config.fee_wallet);

        log!(&env, "crowdsale expired", operator, amount);
        events::emit_expired(&env, events::ExpiredEvent { operator, amount });
        Ok(amount)
    }

    /// View functions
    pub fn get_config(env: Env) -> CrowdsaleConfig {
        load_config(&env)
    }

    pub fn opening_time(env: Env) -> u64 {
        load_config(&env).opening_time
    }

    pub fn closing_time(env: Env) -> u64 {
        load_config(&env).closing_time
    }

    pub fn cap(env: Env) -> i128 {
        load_config(&env).cap
    }

    pub fn goal(env: Env) -> i128 {
        load_config(&env).goal
    }

    pub fn rate(env: Env) -> i128 {
        load_config(&env).rate
    }

    pub fn wallet(env: Env) -> Address {
        load_config(&env).wallet
    }

    pub fn fee_wallet(env: Env) -> Address {
        load_config(&env).fee_wallet
    }

    pub fn fee_per_mille(env: Env) -> u32 {
        load_config(&env).fee_per_mille
    }

    pub fn token(env: Env) -> Address {
        load_config(&env).token
    }

    pub fn state(env: Env) -> CrowdsaleState {
        load_state(&env)
    }

    pub fn finalized(env: Env) -> bool {
        is_finalized(&env)
    }

    pub fn paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn wei_raised(env: Env) -> i128 {
        wei_raised(&env)
    }

    pub fn tokens_sold(env: Env) -> i128 {
        tokens_sold(&env)
    }

    pub fn is_open(env: Env) -> bool {
        is_open(&load_config(&env), env.ledger().timestamp())
    }

    pub fn has_closed(env: Env) -> bool {
        env.ledger().timestamp() >= load_config(&env).closing_time
    }

    pub fn cap_reached(env: Env) -> bool {
        wei_raised(&env) >= load_config(&env).cap
    }

    pub fn goal_reached(env: Env) -> bool {
        wei_raised(&env) >= load_config(&env).goal
    }

    pub fn ended(env: Env) -> bool {
        let config = load_config(&env);
        env.ledger().timestamp() >= config.closing_time || wei_raised(&env) >= config.cap
    }

    /// Tokens `investor` would receive for `value`, bonus included.
    pub fn expected_token_amount(env: Env, investor: Address, value: i128) -> Result<i128, Error> {
        expected_token_amount(&env, &load_config(&env), &investor, value)
    }

    pub fn deposits_of(env: Env, payee: Address) -> i128 {
        vault::deposits_of(&env, &payee)
    }

    pub fn owner(env: Env) -> Address {
        access::owner(&env).unwrap_or_else(|| panic_with_error!(&env, Error::NotInitialized))
    }

    pub fn is_operator(env: Env, account: Address) -> bool {
        access::has_role(&env, &account, Role::Operator)
    }
}

impl CrowdsaleContract {
    fn process_purchase(
        env: &Env,
        purchaser: &Address,
        beneficiary: &Address,
        value: i128,
    ) -> Result<i128, Error> {
        let now = env.ledger().timestamp();
        let config = load_config(env);
        let this = env.current_contract_address();

        if load_state(env) != CrowdsaleState::Active {
            return Err(Error::NotActive);
        }
        if is_paused(env) {
            return Err(Error::Paused);
        }
        if !is_open(&config, now) {
            return Err(Error::NotOpen);
        }
        // amounts are i128, negative values are refused with zero
        if value <= 0 {
            return Err(Error::ZeroValue);
        }
        if *beneficiary == this {
            return Err(Error::InvalidBeneficiary);
        }
        let raised = wei_raised(env).checked_add(value).ok_or(Error::Overflow)?;
        if raised > config.cap {
            return Err(Error::CapExceeded);
        }

        let tokens = expected_token_amount(env, &config, beneficiary, value)?;
        let sold = tokens_sold(env)
            .checked_add(tokens)
            .ok_or(Error::Overflow)?;

        env.storage().instance().set(&DataKey::WeiRaised, &raised);
        env.storage().instance().set(&DataKey::TokensSold, &sold);
        vault::deposit(env, purchaser, value)?;
        extend_instance(env);

        token::Client::new(env, &config.payment_token).transfer(purchaser, &this, &value);
        ContributionsClient::new(env, &config.contributions).add_balance(
            &this,
            beneficiary,
            &value,
            &tokens,
        );
        token::Client::new(env, &config.token).transfer(&this, beneficiary, &tokens);

        events::emit_tokens_purchased(
            env,
            events::TokensPurchasedEvent {
                purchaser: purchaser.clone(),
                beneficiary: beneficiary.clone(),
                value,
                amount: tokens,
            },
        );
        Ok(tokens)
    }
}

// Helper functions
fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn validate_config(env: &Env, config: &CrowdsaleConfig) -> Result<(), Error> {
    let this = env.current_contract_address();

    if config.rate <= 0 {
        return Err(Error::InvalidRate);
    }
    if config.wallet == this {
        return Err(Error::InvalidWallet);
    }
    if config.fee_wallet == this {
        return Err(Error::InvalidFeeWallet);
    }
    if config.opening_time < env.ledger().timestamp() {
        return Err(Error::OpeningTimeInPast);
    }
    if config.closing_time <= config.opening_time {
        return Err(Error::InvalidTimeWindow);
    }
    if config.cap <= 0 {
        return Err(Error::InvalidCap);
    }
    if config.goal <= 0 {
        return Err(Error::InvalidGoal);
    }
    if config.goal > config.cap {
        return Err(Error::GoalExceedsCap);
    }
    if config.fee_per_mille > MAX_FEE_PER_MILLE {
        return Err(Error::InvalidFeePerMille);
    }
    if !config.bonus.is_valid() {
        return Err(Error::InvalidBonusTable);
    }
    // unsold-token sweeps would otherwise drain the refund vault
    if config.token == config.payment_token {
        return Err(Error::SameToken);
    }
    Ok(())
}

fn load_config(env: &Env) -> CrowdsaleConfig {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn load_state(env: &Env) -> CrowdsaleState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn set_state(env: &Env, state: CrowdsaleState) {
    env.storage().instance().set(&DataKey::State, &state);
    extend_instance(env);
}

fn is_finalized(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Finalized).unwrap_or(false)
}

fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

fn wei_raised(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::WeiRaised).unwrap_or(0)
}

fn tokens_sold(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TokensSold).unwrap_or(0)
}

fn is_open(config: &CrowdsaleConfig, now: u64) -> bool {
    config.opening_time <= now && now < config.closing_time
}

fn expected_token_amount(
    env: &Env,
    config: &CrowdsaleConfig,
    investor: &Address,
    value: i128,
) -> Result<i128, Error> {
    let policy = DaoBonusPolicy {
        dao: &config.dao,
        table: &config.bonus,
    };
    bonus::token_amount(value, config.rate, policy.multiplier(env, investor))
}
