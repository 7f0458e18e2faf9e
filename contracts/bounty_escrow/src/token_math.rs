//! Escrow split and ledger arithmetic helpers.
//!
//! ## Split Policy
//!
//! When a bounty is approved, the value the requester attached is divided
//! into a **payout** and a **fee**. The payout is capped at the bounty's
//! reward; whatever the requester attached above the reward is retained by
//! the engine as fee. The invariant `payout + fee == escrowed` holds for
//! every split, and neither part is ever negative.
//!
//! All ledger arithmetic goes through the checked helpers below so an
//! overflow surfaces as `None` instead of wrapping.

/// Split `escrowed` into `(payout, fee)` where `payout + fee == escrowed`.
///
/// `payout = min(reward, escrowed)`, clamped at zero. Negative inputs are
/// treated as zero.
pub fn split_escrow(escrowed: i128, reward: i128) -> (i128, i128) {
    let escrowed = escrowed.max(0);
    let payout = reward.max(0).min(escrowed);
    (payout, escrowed - payout)
}

/// `balance + amount`, or `None` on overflow.
pub fn credit(balance: i128, amount: i128) -> Option<i128> {
    balance.checked_add(amount)
}

/// `balance - amount`, or `None` if the result would overflow or go negative.
pub fn debit(balance: i128, amount: i128) -> Option<i128> {
    balance.checked_sub(amount).filter(|rest| *rest >= 0)
}
