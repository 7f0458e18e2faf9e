use crate::{Bounty, BountyStatus, DataKey, FeeLedger};
use soroban_sdk::{token, Address, Env};

/// Which write path ran a check.
#[derive(Clone, Copy)]
enum CheckedWrite {
    Bounty,
    Ledger,
}

/// Per-path tallies of the checks run since the last reset.
#[cfg(test)]
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckTally {
    pub bounty_saves: u32,
    pub ledger_saves: u32,
    /// When set, the next write traps before it is checked.
    pub suspended: bool,
}

#[cfg(test)]
const TALLY: soroban_sdk::Symbol = soroban_sdk::symbol_short!("InvTally");

#[cfg(test)]
fn before_check(env: &Env, write: CheckedWrite) {
    let mut tally = tally_for_test(env);
    if tally.suspended {
        panic!("Invariant checks suspended");
    }
    match write {
        CheckedWrite::Bounty => tally.bounty_saves = tally.bounty_saves.saturating_add(1),
        CheckedWrite::Ledger => tally.ledger_saves = tally.ledger_saves.saturating_add(1),
    }
    env.storage().instance().set(&TALLY, &tally);
}

#[cfg(not(test))]
#[inline(always)]
fn before_check(_env: &Env, _write: CheckedWrite) {}

pub(crate) fn assert_bounty(env: &Env, bounty: &Bounty) {
    before_check(env, CheckedWrite::Bounty);
    if bounty.reward < 0 {
        panic!("Invariant violated: reward must be non-negative");
    }
    if bounty.escrowed < 0 {
        panic!("Invariant violated: escrowed must be non-negative");
    }
    if bounty.approver.is_some() != (bounty.status == BountyStatus::Approved) {
        panic!("Invariant violated: approver is set exactly when approved");
    }
    if !requester_consistent(bounty) {
        panic!("Invariant violated: requester does not match status");
    }
    if bounty.escrowed != 0 && !holds_escrow(&bounty.status) {
        panic!("Invariant violated: escrow held outside an active request");
    }
}

pub(crate) fn assert_ledger(env: &Env, ledger: &FeeLedger) {
    before_check(env, CheckedWrite::Ledger);
    if !verify_ledger_invariants(ledger) {
        panic!("Invariant violated: fee ledger exceeds contract balance");
    }
}

pub(crate) fn verify_bounty_invariants(bounty: &Bounty) -> bool {
    bounty.reward >= 0
        && bounty.escrowed >= 0
        && bounty.approver.is_some() == (bounty.status == BountyStatus::Approved)
        && requester_consistent(bounty)
        && (bounty.escrowed == 0 || holds_escrow(&bounty.status))
}

pub(crate) fn verify_ledger_invariants(ledger: &FeeLedger) -> bool {
    if ledger.fees_collected < 0
        || ledger.contract_balance < 0
        || ledger.total_escrowed < 0
        || ledger.total_payable < 0
    {
        return false;
    }
    ledger
        .fees_collected
        .checked_add(ledger.total_escrowed)
        .and_then(|sum| sum.checked_add(ledger.total_payable))
        .map(|committed| committed <= ledger.contract_balance)
        .unwrap_or(false)
}

/// Full sweep over every stored bounty plus the ledger.
///
/// Checks each bounty on its own, that the per-bounty escrow sums to
/// `total_escrowed`, and that the ledger never claims more than the
/// contract actually holds in the value token.
pub(crate) fn check_all(env: &Env) -> bool {
    let ledger: FeeLedger = env
        .storage()
        .instance()
        .get(&DataKey::FeeLedger)
        .unwrap_or_default();
    if !verify_ledger_invariants(&ledger) {
        return false;
    }

    let count: u64 = env
        .storage()
        .instance()
        .get(&DataKey::BountyCount)
        .unwrap_or(0);
    let mut escrow_sum: i128 = 0;
    for bounty_id in 0..count {
        let bounty: Option<Bounty> = env.storage().persistent().get(&DataKey::Bounty(bounty_id));
        let Some(bounty) = bounty else {
            return false;
        };
        if bounty.id != bounty_id || !verify_bounty_invariants(&bounty) {
            return false;
        }
        escrow_sum = match escrow_sum.checked_add(bounty.escrowed) {
            Some(sum) => sum,
            None => return false,
        };
    }
    if escrow_sum != ledger.total_escrowed {
        return false;
    }

    let token_addr: Option<Address> = env.storage().instance().get(&DataKey::Token);
    match token_addr {
        Some(token_addr) => {
            let held = token::Client::new(env, &token_addr).balance(&env.current_contract_address());
            ledger.contract_balance <= held
        }
        None => ledger.contract_balance == 0,
    }
}

fn holds_escrow(status: &BountyStatus) -> bool {
    matches!(status, BountyStatus::RequestPending | BountyStatus::Accepted)
}

fn requester_consistent(bounty: &Bounty) -> bool {
    match bounty.status {
        BountyStatus::Open => bounty.requester.is_none(),
        BountyStatus::RequestPending | BountyStatus::Accepted | BountyStatus::Approved => {
            bounty.requester.is_some()
        }
        // Cancellation keeps whatever requester was recorded.
        BountyStatus::Cancelled => true,
    }
}

#[cfg(test)]
pub(crate) fn reset_tally_for_test(env: &Env) {
    env.storage().instance().set(&TALLY, &CheckTally::default());
}

#[cfg(test)]
pub(crate) fn suspend_checks_for_test(env: &Env) {
    let mut tally = tally_for_test(env);
    tally.suspended = true;
    env.storage().instance().set(&TALLY, &tally);
}

#[cfg(test)]
pub(crate) fn tally_for_test(env: &Env) -> CheckTally {
    env.storage().instance().get(&TALLY).unwrap_or_default()
}
