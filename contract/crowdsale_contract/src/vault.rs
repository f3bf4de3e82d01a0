//! Escrow of the raised funds.
//!
//! Every accepted payment is credited to the purchaser as a refundable
//! deposit. At finalization the funds are either released to the wallets
//! (minus the platform fee) or left here for investors to claim back.

use soroban_sdk::{token, Address, Env};

use crate::storage_types::{CrowdsaleConfig, Error, PersistentKey, FEE_DENOMINATOR, TTL_PERSISTENT};

/// Claimable deposit of `payee`. Reading a live deposit renews its TTL.
pub fn deposits_of(env: &Env, payee: &Address) -> i128 {
    let key = PersistentKey::Deposit(payee.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            extend_persistent(env, &key);
            balance
        }
        None => 0,
    }
}

pub fn deposit(env: &Env, payee: &Address, amount: i128) -> Result<(), Error> {
    let key = PersistentKey::Deposit(payee.clone());
    let balance = deposits_of(env, payee)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    env.storage().persistent().set(&key, &balance);
    extend_persistent(env, &key);
    Ok(())
}

/// Pay back the whole deposit of `payee`.
///
/// The deposit is cleared before the transfer so it can never be paid twice.
pub fn refund(env: &Env, payment_token: &Address, payee: &Address) -> Result<i128, Error> {
    let amount = deposits_of(env, payee);
    if amount <= 0 {
        return Err(Error::NoDeposit);
    }
    env.storage()
        .persistent()
        .remove(&PersistentKey::Deposit(payee.clone()));

    token::Client::new(env, payment_token).transfer(
        &env.current_contract_address(),
        payee,
        &amount,
    );
    Ok(amount)
}

/// Split `raised` into `(fee, payout)`; the fee is rounded down.
pub fn split_fee(raised: i128, fee_per_mille: u32) -> Result<(i128, i128), Error> {
    let fee = raised
        .checked_mul(fee_per_mille as i128)
        .ok_or(Error::Overflow)?
        / FEE_DENOMINATOR;
    Ok((fee, raised - fee))
}

/// Forward `raised` to the fee wallet and the beneficiary wallet.
pub fn release(env: &Env, config: &CrowdsaleConfig, raised: i128) -> Result<(i128, i128), Error> {
    let (fee, payout) = split_fee(raised, config.fee_per_mille)?;

    let payment = token::Client::new(env, &config.payment_token);
    let this = env.current_contract_address();
    if fee > 0 {
        payment.transfer(&this, &config.fee_wallet, &fee);
    }
    if payout > 0 {
        payment.transfer(&this, &config.wallet, &payout);
    }
    Ok((fee, payout))
}

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

/// Move the contract's entire balance of `token` to `to`.
pub fn sweep(env: &Env, token: &Address, to: &Address) -> i128 {
    let client = token::Client::new(env, token);
    let this = env.current_contract_address();
    let balance = client.balance(&this);
    if balance > 0 {
        client.transfer(&this, to, &balance);
    }
    balance
}
