//! Bonus multipliers granted to DAO members.
//!
//! An investor's tier is resolved from the membership/stake oracle and then
//! mapped through a [`BonusTable`] fixed at initialization. Two schedules are
//! in use for the [`BonusTier::ActiveStaker`] tier (4x and 8x); both are
//! offered as presets and the deployer picks one explicitly.

use soroban_sdk::{contractclient, contracttype, Address, Env};

use crate::storage_types::Error;

/// Membership and staking oracle the bonus is keyed to.
#[allow(dead_code)]
#[contractclient(name = "DaoClient")]
pub trait DaoInterface {
    fn is_member(env: Env, account: Address) -> bool;
    fn staked_tokens(env: Env, account: Address) -> i128;
    fn used_tokens(env: Env, account: Address) -> i128;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusTier {
    NonMember,
    Member,       // member without stake
    Staker,       // member with stake, none of it used
    ActiveStaker, // member with stake, part of it used
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[contracttype]
pub struct BonusTable {
    pub non_member: u32,
    pub member: u32,
    pub staker: u32,
    pub active_staker: u32,
}

impl BonusTable {
    /// Staking doubles the member bonus, using the stake adds nothing.
    pub fn flat_stake() -> Self {
        BonusTable {
            non_member: 1,
            member: 2,
            staker: 4,
            active_staker: 4,
        }
    }

    /// Using the stake doubles the staker bonus once more.
    pub fn usage_boost() -> Self {
        BonusTable {
            non_member: 1,
            member: 2,
            staker: 4,
            active_staker: 8,
        }
    }

    pub fn multiplier(&self, tier: BonusTier) -> u32 {
        match tier {
            BonusTier::NonMember => self.non_member,
            BonusTier::Member => self.member,
            BonusTier::Staker => self.staker,
            BonusTier::ActiveStaker => self.active_staker,
        }
    }

    /// A multiplier of zero would sell tokens for nothing.
    pub fn is_valid(&self) -> bool {
        self.non_member >= 1 && self.member >= 1 && self.staker >= 1 && self.active_staker >= 1
    }
}

pub fn resolve_tier(is_member: bool, staked: i128, used: i128) -> BonusTier {
    if !is_member {
        BonusTier::NonMember
    } else if staked <= 0 {
        BonusTier::Member
    } else if used <= 0 {
        BonusTier::Staker
    } else {
        BonusTier::ActiveStaker
    }
}

/// Strategy deciding the multiplier applied to an investor's purchase.
pub trait BonusPolicy {
    fn multiplier(&self, env: &Env, investor: &Address) -> u32;
}

/// Bonus policy backed by the DAO oracle.
pub struct DaoBonusPolicy<'a> {
    pub dao: &'a Address,
    pub table: &'a BonusTable,
}

impl BonusPolicy for DaoBonusPolicy<'_> {
    fn multiplier(&self, env: &Env, investor: &Address) -> u32 {
        let dao = DaoClient::new(env, self.dao);
        if !dao.is_member(investor) {
            return self.table.multiplier(BonusTier::NonMember);
        }
        let tier = resolve_tier(true, dao.staked_tokens(investor), dao.used_tokens(investor));
        self.table.multiplier(tier)
    }
}

/// `value * rate * multiplier`, failing instead of wrapping.
pub fn token_amount(value: i128, rate: i128, multiplier: u32) -> Result<i128, Error> {
    value
        .checked_mul(rate)
        .and_then(|base| base.checked_mul(multiplier as i128))
        .ok_or(Error::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_membership_and_stake() {
        assert_eq!(resolve_tier(false, 100, 50), BonusTier::NonMember);
        assert_eq!(resolve_tier(true, 0, 0), BonusTier::Member);
        assert_eq!(resolve_tier(true, 0, 10), BonusTier::Member);
        assert_eq!(resolve_tier(true, 100, 0), BonusTier::Staker);
        assert_eq!(resolve_tier(true, 100, 10), BonusTier::ActiveStaker);
    }

    #[test]
    fn presets_differ_only_for_active_stakers() {
        let flat = BonusTable::flat_stake();
        let boost = BonusTable::usage_boost();

        for tier in [BonusTier::NonMember, BonusTier::Member, BonusTier::Staker] {
            assert_eq!(flat.multiplier(tier), boost.multiplier(tier));
        }
        assert_eq!(flat.multiplier(BonusTier::ActiveStaker), 4);
        assert_eq!(boost.multiplier(BonusTier::ActiveStaker), 8);
    }

    #[test]
    fn zero_multiplier_is_invalid() {
        let mut table = BonusTable::usage_boost();
        assert!(table.is_valid());
        table.member = 0;
        assert!(!table.is_valid());
    }

    #[test]
    fn token_amount_checks_overflow() {
        assert_eq!(token_amount(100, 1000, 4), Ok(400_000));
        assert_eq!(token_amount(i128::MAX, 2, 1), Err(Error::Overflow));
    }
}
