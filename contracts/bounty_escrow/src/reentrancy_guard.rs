//! # Reentrancy Guard
//!
//! Every entry point that moves tokens (`request_to_accept_bounty`,
//! `cancel_bounty`, `withdraw_fees`, `claim_payout`) runs its body inside
//! [`with_guard`]. A token contract that calls back into the engine
//! mid-transfer finds the guard held and traps, which rolls the whole
//! invocation back.
//!
//! ## Notes
//!
//! - The guard is dropped whether the body returns `Ok` or `Err`. A host
//!   invocation would discard the flag on `Err` anyway, but direct callers
//!   of [`crate::BountyEscrowInterface`] get no rollback, so the release
//!   cannot depend on it.
//! - One flag is shared by all protected functions, so re-entry through a
//!   different entry point is blocked as well.

use crate::DataKey;
use soroban_sdk::Env;

/// Acquire the guard.
///
/// # Panics
/// Panics with `"Reentrancy detected"` if the guard is already held.
pub fn acquire(env: &Env) {
    if env.storage().instance().has(&DataKey::ReentrancyGuard) {
        panic!("Reentrancy detected");
    }
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &true);
}

pub fn release(env: &Env) {
    env.storage().instance().remove(&DataKey::ReentrancyGuard);
}

/// Run `body` with the guard held, releasing it on every return path.
pub fn with_guard<T, E>(env: &Env, body: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    acquire(env);
    let result = body();
    release(env);
    result
}

#[cfg(test)]
pub fn is_active(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::ReentrancyGuard)
}
