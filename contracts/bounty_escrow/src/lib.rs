#![no_std]
//! Bounty escrow engine.
//!
//! Owners post bounties, requesters ask to take them (optionally attaching
//! value), owners accept the request, and the owner or the admin approves
//! the work. Approval splits the attached value into a payout the requester
//! can claim and a fee kept by the engine. Fees are tracked in a side ledger
//! the admin can withdraw or reset.
//!
//! ```text
//! Open ──request──▶ RequestPending ──accept──▶ Accepted ──approve──▶ Approved
//!   │                    │
//!   └──────cancel────────┴──────────────▶ Cancelled
//! ```

mod events;
mod invariants;
mod reentrancy_guard;
pub mod token_math;
mod traits;

pub use traits::{BountyEscrowInterface, FeeLedgerInterface};

use events::{
    emit_admin_updated, emit_bounty_approved, emit_bounty_cancelled, emit_bounty_created,
    emit_engine_initialized, emit_fees_reset, emit_fees_withdrawn, emit_payout_claimed,
    emit_request_accepted, emit_request_to_accept, AdminUpdated, BountyApproved, BountyCancelled,
    BountyCreated, EngineInitialized, FeesReset, FeesWithdrawn, PayoutClaimed, RequestAccepted,
    RequestToAcceptBounty, EVENT_VERSION,
};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, symbol_short, token, Address, Env,
    IntoVal, String, Val, Vec,
};

pub mod monitoring {
    use crate::DataKey;
    use soroban_sdk::{contracttype, log, symbol_short, Address, Env, Symbol};

    /// Running operation counters, kept in instance storage.
    #[contracttype]
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Analytics {
        pub operation_count: u64,
        pub bounties_created: u64,
        pub bounties_approved: u64,
        pub bounties_cancelled: u64,
        pub last_operation_at: u64,
    }

    /// Record a committed operation.
    ///
    /// Only successful calls reach this point: a failed invocation is rolled
    /// back by the host together with anything written here.
    pub fn track_operation(env: &Env, operation: Symbol, caller: &Address) {
        let mut stats = get_analytics(env);
        stats.operation_count = stats.operation_count.saturating_add(1);
        if operation == symbol_short!("create") {
            stats.bounties_created = stats.bounties_created.saturating_add(1);
        } else if operation == symbol_short!("approve") {
            stats.bounties_approved = stats.bounties_approved.saturating_add(1);
        } else if operation == symbol_short!("cancel") {
            stats.bounties_cancelled = stats.bounties_cancelled.saturating_add(1);
        }
        stats.last_operation_at = env.ledger().timestamp();
        env.storage().instance().set(&DataKey::Analytics, &stats);

        log!(env, "operation committed", operation, caller.clone());
    }

    pub fn get_analytics(env: &Env) -> Analytics {
        env.storage()
            .instance()
            .get(&DataKey::Analytics)
            .unwrap_or_default()
    }
}

/// Persistent entries live roughly 30 days before they need bumping.
const BOUNTY_TTL_THRESHOLD: u32 = 17_280;
const BOUNTY_TTL_EXTEND_TO: u32 = 518_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Negative amount, empty text, or an owner requesting their own bounty.
    InvalidArgument = 3,
    /// Unknown bounty id.
    NotFound = 4,
    /// Operation not legal for the bounty's current status.
    InvalidState = 5,
    /// Caller lacks the role the operation requires.
    Unauthorized = 6,
    /// No fees (or no payout) to withdraw.
    NothingToWithdraw = 7,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BountyStatus {
    Open,
    RequestPending,
    Accepted,
    Approved,
    Cancelled,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bounty {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub reward: i128,
    pub owner: Address,
    pub status: BountyStatus,
    /// Set by `request_to_accept_bounty`; kept after cancellation for audit.
    pub requester: Option<Address>,
    /// Set exactly when the bounty is approved.
    pub approver: Option<Address>,
    /// Value attached by the requester and still held for this bounty.
    pub escrowed: i128,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeeLedger {
    pub fees_collected: i128,
    /// Everything the engine holds: fees, live escrow and unclaimed payouts.
    pub contract_balance: i128,
    pub total_escrowed: i128,
    pub total_payable: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub admin: Address,
    pub token: Address,
}

/// Result returned by `simulate_approve`.
///
/// Runs the same checks as `approve` without writing anything, so a UI can
/// show the payout/fee split before the approver signs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalPreview {
    pub success: bool,
    /// Error code that `approve` would return; zero on success.
    pub error_code: u32,
    pub payout: i128,
    pub fee: i128,
}

#[contracttype]
pub enum DataKey {
    Admin,
    Token,
    BountyCount,
    Bounty(u64),
    OwnerIndex(Address), // Vec<u64> of bounty ids by owner
    Payable(Address),    // unclaimed payout per requester
    FeeLedger,
    ReentrancyGuard,
    Analytics,
}

#[contract]
pub struct BountyEscrowContract;

#[contractimpl]
impl BountyEscrowContract {
    /// Initialize the engine with its admin and the token value moves in.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::BountyCount, &0_u64);
        env.storage()
            .instance()
            .set(&DataKey::FeeLedger, &FeeLedger::default());
        Self::bump_instance(&env);

        emit_engine_initialized(
            &env,
            EngineInitialized {
                admin,
                token,
                timestamp: env.ledger().timestamp(),
                version: EVENT_VERSION,
            },
        );
        Ok(())
    }

    /// Post a new bounty owned by `caller`. Returns its id.
    pub fn create_bounty(
        env: Env,
        caller: Address,
        title: String,
        description: String,
        reward: i128,
    ) -> Result<u64, Error> {
        caller.require_auth();
        Self::ensure_initialized(&env)?;

        if reward < 0 || title.len() == 0 || description.len() == 0 {
            return Err(Error::InvalidArgument);
        }

        let bounty_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::BountyCount)
            .unwrap_or(0);
        let next_id = bounty_id.checked_add(1).ok_or(Error::InvalidState)?;

        let bounty = Bounty {
            id: bounty_id,
            title,
            description,
            reward,
            owner: caller.clone(),
            status: BountyStatus::Open,
            requester: None,
            approver: None,
            escrowed: 0,
            created_at: env.ledger().timestamp(),
        };
        Self::save_bounty(&env, &bounty);
        env.storage()
            .instance()
            .set(&DataKey::BountyCount, &next_id);

        let owner_key = DataKey::OwnerIndex(caller.clone());
        let mut owner_index: Vec<u64> = env
            .storage()
            .persistent()
            .get(&owner_key)
            .unwrap_or(Vec::new(&env));
        owner_index.push_back(bounty_id);
        Self::save_persistent(&env, &owner_key, &owner_index);
        Self::bump_instance(&env);

        emit_bounty_created(
            &env,
            BountyCreated {
                bounty_id,
                owner: caller.clone(),
                reward,
                version: EVENT_VERSION,
            },
        );
        log!(&env, "bounty created", bounty_id, reward);
        monitoring::track_operation(&env, symbol_short!("create"), &caller);
        Ok(bounty_id)
    }

    /// Ask to take an open bounty, escrowing `attached_value` with the engine.
    ///
    /// # Reentrancy
    /// Guarded; the inbound token transfer runs after all state is written.
    pub fn request_to_accept_bounty(
        env: Env,
        caller: Address,
        bounty_id: u64,
        attached_value: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::ensure_initialized(&env)?;
        if attached_value < 0 {
            return Err(Error::InvalidArgument);
        }

        reentrancy_guard::with_guard(&env, || {
            let mut bounty = Self::load_bounty(&env, bounty_id)?;
            if bounty.owner == caller {
                return Err(Error::InvalidArgument);
            }
            if bounty.status != BountyStatus::Open {
                return Err(Error::InvalidState);
            }

            let mut ledger = Self::load_ledger(&env);
            ledger.contract_balance = token_math::credit(ledger.contract_balance, attached_value)
                .ok_or(Error::InvalidArgument)?;
            ledger.total_escrowed = token_math::credit(ledger.total_escrowed, attached_value)
                .ok_or(Error::InvalidArgument)?;
            let client = Self::token_client(&env)?;

            // EFFECTS
            bounty.requester = Some(caller.clone());
            bounty.status = BountyStatus::RequestPending;
            bounty.escrowed = attached_value;
            Self::save_bounty(&env, &bounty);
            Self::save_ledger(&env, &ledger);
            Self::bump_instance(&env);

            // INTERACTION
            if attached_value > 0 {
                client.transfer(&caller, &env.current_contract_address(), &attached_value);
            }

            emit_request_to_accept(
                &env,
                RequestToAcceptBounty {
                    bounty_id,
                    requester: caller.clone(),
                    attached_value,
                    version: EVENT_VERSION,
                },
            );
            log!(&env, "request to accept", bounty_id, attached_value);
            monitoring::track_operation(&env, symbol_short!("request"), &caller);
            Ok(())
        })
    }

    /// Owner accepts the pending request.
    pub fn accept_request(env: Env, caller: Address, bounty_id: u64) -> Result<(), Error> {
        caller.require_auth();
        Self::ensure_initialized(&env)?;

        let mut bounty = Self::load_bounty(&env, bounty_id)?;
        if bounty.owner != caller {
            return Err(Error::Unauthorized);
        }
        if bounty.status != BountyStatus::RequestPending {
            return Err(Error::InvalidState);
        }
        let requester = bounty.requester.clone().ok_or(Error::InvalidState)?;

        bounty.status = BountyStatus::Accepted;
        Self::save_bounty(&env, &bounty);
        Self::bump_instance(&env);

        emit_request_accepted(
            &env,
            RequestAccepted {
                bounty_id,
                owner: caller.clone(),
                requester,
                version: EVENT_VERSION,
            },
        );
        log!(&env, "request accepted", bounty_id);
        monitoring::track_operation(&env, symbol_short!("accept"), &caller);
        Ok(())
    }

    /// Approve an accepted bounty. Only the owner or the admin may approve.
    ///
    /// The escrow is split by [`token_math::split_escrow`]: the payout is
    /// credited to the requester (see `claim_payout`) and the rest becomes
    /// fee. No tokens move here.
    pub fn approve(env: Env, caller: Address, bounty_id: u64) -> Result<(), Error> {
        caller.require_auth();
        Self::ensure_initialized(&env)?;

        let mut bounty = Self::load_bounty(&env, bounty_id)?;
        let (payout, fee) = Self::check_approve(&env, &caller, &bounty)?;
        let requester = bounty.requester.clone().ok_or(Error::InvalidState)?;

        let mut ledger = Self::load_ledger(&env);
        ledger.total_escrowed =
            token_math::debit(ledger.total_escrowed, bounty.escrowed).ok_or(Error::InvalidState)?;
        ledger.total_payable =
            token_math::credit(ledger.total_payable, payout).ok_or(Error::InvalidState)?;
        ledger.fees_collected =
            token_math::credit(ledger.fees_collected, fee).ok_or(Error::InvalidState)?;

        let payable_key = DataKey::Payable(requester);
        let payable: i128 = env.storage().persistent().get(&payable_key).unwrap_or(0);
        let payable = token_math::credit(payable, payout).ok_or(Error::InvalidState)?;

        bounty.status = BountyStatus::Approved;
        bounty.approver = Some(caller.clone());
        bounty.escrowed = 0;
        Self::save_bounty(&env, &bounty);
        Self::save_ledger(&env, &ledger);
        if payout > 0 {
            Self::save_persistent(&env, &payable_key, &payable);
        }
        Self::bump_instance(&env);

        emit_bounty_approved(
            &env,
            BountyApproved {
                bounty_id,
                approver: caller.clone(),
                payout,
                fee,
                version: EVENT_VERSION,
            },
        );
        log!(&env, "bounty approved", bounty_id, payout, fee);
        monitoring::track_operation(&env, symbol_short!("approve"), &caller);
        Ok(())
    }

    /// Owner cancels an open or pending bounty. Any escrowed value goes back
    /// to the requester.
    ///
    /// # Reentrancy
    /// Guarded; the refund transfer is the last state-touching step.
    pub fn cancel_bounty(env: Env, caller: Address, bounty_id: u64) -> Result<(), Error> {
        caller.require_auth();
        Self::ensure_initialized(&env)?;

        reentrancy_guard::with_guard(&env, || {
            let mut bounty = Self::load_bounty(&env, bounty_id)?;
            if bounty.owner != caller {
                return Err(Error::Unauthorized);
            }
            if bounty.status != BountyStatus::Open && bounty.status != BountyStatus::RequestPending
            {
                return Err(Error::InvalidState);
            }

            let refund = bounty.escrowed;
            let refund_to = match (&bounty.requester, refund > 0) {
                (Some(requester), true) => Some(requester.clone()),
                (None, true) => return Err(Error::InvalidState),
                (_, false) => None,
            };

            let mut ledger = Self::load_ledger(&env);
            ledger.contract_balance =
                token_math::debit(ledger.contract_balance, refund).ok_or(Error::InvalidState)?;
            ledger.total_escrowed =
                token_math::debit(ledger.total_escrowed, refund).ok_or(Error::InvalidState)?;
            let client = Self::token_client(&env)?;

            // EFFECTS
            bounty.status = BountyStatus::Cancelled;
            bounty.escrowed = 0;
            Self::save_bounty(&env, &bounty);
            Self::save_ledger(&env, &ledger);
            Self::bump_instance(&env);

            // INTERACTION
            if let Some(refund_to) = refund_to {
                client.transfer(&env.current_contract_address(), &refund_to, &refund);
            }

            emit_bounty_cancelled(
                &env,
                BountyCancelled {
                    bounty_id,
                    refunded: refund,
                    version: EVENT_VERSION,
                },
            );
            log!(&env, "bounty cancelled", bounty_id, refund);
            monitoring::track_operation(&env, symbol_short!("cancel"), &caller);
            Ok(())
        })
    }

    /// Admin withdraws every collected fee to itself. Returns the amount.
    ///
    /// # Reentrancy
    /// Guarded; the outbound transfer happens after the ledger is zeroed.
    pub fn withdraw_fees(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();

        reentrancy_guard::with_guard(&env, || {
            Self::require_admin(&env, &caller)?;

            let mut ledger = Self::load_ledger(&env);
            let amount = ledger.fees_collected;
            if amount == 0 {
                return Err(Error::NothingToWithdraw);
            }
            ledger.contract_balance =
                token_math::debit(ledger.contract_balance, amount).ok_or(Error::InvalidState)?;
            ledger.fees_collected = 0;
            let client = Self::token_client(&env)?;

            Self::save_ledger(&env, &ledger);
            Self::bump_instance(&env);

            client.transfer(&env.current_contract_address(), &caller, &amount);

            emit_fees_withdrawn(
                &env,
                FeesWithdrawn {
                    caller: caller.clone(),
                    amount,
                    timestamp: env.ledger().timestamp(),
                    version: EVENT_VERSION,
                },
            );
            log!(&env, "fees withdrawn", amount);
            monitoring::track_operation(&env, symbol_short!("withdraw"), &caller);
            Ok(amount)
        })
    }

    /// Admin zeroes the fee counter without moving any value.
    pub fn reset_collected_fees(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut ledger = Self::load_ledger(&env);
        let previous = ledger.fees_collected;
        ledger.fees_collected = 0;
        Self::save_ledger(&env, &ledger);
        Self::bump_instance(&env);

        emit_fees_reset(
            &env,
            FeesReset {
                caller: caller.clone(),
                previous,
                timestamp: env.ledger().timestamp(),
                version: EVENT_VERSION,
            },
        );
        log!(&env, "fees reset", previous);
        monitoring::track_operation(&env, symbol_short!("reset"), &caller);
        Ok(())
    }

    /// Requester collects every payout credited to them by approvals.
    ///
    /// # Reentrancy
    /// Guarded; the payable entry is removed before the transfer.
    pub fn claim_payout(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        Self::ensure_initialized(&env)?;

        reentrancy_guard::with_guard(&env, || {
            let payable_key = DataKey::Payable(caller.clone());
            let amount: i128 = env.storage().persistent().get(&payable_key).unwrap_or(0);
            if amount == 0 {
                return Err(Error::NothingToWithdraw);
            }

            let mut ledger = Self::load_ledger(&env);
            ledger.total_payable =
                token_math::debit(ledger.total_payable, amount).ok_or(Error::InvalidState)?;
            ledger.contract_balance =
                token_math::debit(ledger.contract_balance, amount).ok_or(Error::InvalidState)?;
            let client = Self::token_client(&env)?;

            env.storage().persistent().remove(&payable_key);
            Self::save_ledger(&env, &ledger);
            Self::bump_instance(&env);

            client.transfer(&env.current_contract_address(), &caller, &amount);

            emit_payout_claimed(
                &env,
                PayoutClaimed {
                    recipient: caller.clone(),
                    amount,
                    timestamp: env.ledger().timestamp(),
                    version: EVENT_VERSION,
                },
            );
            log!(&env, "payout claimed", amount);
            monitoring::track_operation(&env, symbol_short!("claim"), &caller);
            Ok(amount)
        })
    }

    /// Hand the admin role to `new_admin` (current admin only).
    pub fn update_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&DataKey::Admin, &new_admin);
        Self::bump_instance(&env);

        emit_admin_updated(
            &env,
            AdminUpdated {
                previous: caller.clone(),
                new_admin,
                timestamp: env.ledger().timestamp(),
                version: EVENT_VERSION,
            },
        );
        monitoring::track_operation(&env, symbol_short!("admin"), &caller);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn get_bounty(env: Env, bounty_id: u64) -> Result<Bounty, Error> {
        Self::load_bounty(&env, bounty_id)
    }

    pub fn get_status(env: Env, bounty_id: u64) -> Result<BountyStatus, Error> {
        Ok(Self::load_bounty(&env, bounty_id)?.status)
    }

    pub fn get_requester(env: Env, bounty_id: u64) -> Result<Option<Address>, Error> {
        Ok(Self::load_bounty(&env, bounty_id)?.requester)
    }

    pub fn get_approver(env: Env, bounty_id: u64) -> Result<Option<Address>, Error> {
        Ok(Self::load_bounty(&env, bounty_id)?.approver)
    }

    pub fn is_approved(env: Env, bounty_id: u64) -> Result<bool, Error> {
        Ok(Self::load_bounty(&env, bounty_id)?.status == BountyStatus::Approved)
    }

    /// Number of bounties ever created; also the next id to be assigned.
    pub fn get_bounty_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::BountyCount)
            .unwrap_or(0)
    }

    pub fn get_fee_ledger(env: Env) -> Result<FeeLedger, Error> {
        Self::ensure_initialized(&env)?;
        Ok(Self::load_ledger(&env))
    }

    pub fn get_fees_collected(env: Env) -> i128 {
        Self::load_ledger(&env).fees_collected
    }

    pub fn get_contract_balance(env: Env) -> i128 {
        Self::load_ledger(&env).contract_balance
    }

    /// Raw token balance of the engine's address, as seen by the token.
    pub fn get_balance(env: Env) -> Result<i128, Error> {
        let client = Self::token_client(&env)?;
        Ok(client.balance(&env.current_contract_address()))
    }

    pub fn get_payable(env: Env, recipient: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Payable(recipient))
            .unwrap_or(0)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        Self::admin(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_config(env: Env) -> Result<EngineConfig, Error> {
        let admin = Self::admin(&env)?;
        let token = Self::get_token(env)?;
        Ok(EngineConfig { admin, token })
    }

    pub fn get_owner_bounties(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::OwnerIndex(owner))
            .unwrap_or(Vec::new(&env))
    }

    /// Page through bounties in id order, keeping those in `status`.
    pub fn query_bounties_by_status(
        env: Env,
        status: BountyStatus,
        offset: u32,
        limit: u32,
    ) -> Vec<Bounty> {
        let count = Self::get_bounty_count(env.clone());
        let mut results = Vec::new(&env);
        let mut taken = 0u32;
        let mut skipped = 0u32;

        for bounty_id in 0..count {
            if taken >= limit {
                break;
            }
            if let Some(bounty) = env
                .storage()
                .persistent()
                .get::<DataKey, Bounty>(&DataKey::Bounty(bounty_id))
            {
                if bounty.status == status {
                    if skipped < offset {
                        skipped = skipped.saturating_add(1);
                        continue;
                    }
                    results.push_back(bounty);
                    taken = taken.saturating_add(1);
                }
            }
        }
        results
    }

    /// Preview what `approve` would do for `caller` right now.
    pub fn simulate_approve(env: Env, caller: Address, bounty_id: u64) -> ApprovalPreview {
        let outcome = Self::ensure_initialized(&env)
            .and_then(|_| Self::load_bounty(&env, bounty_id))
            .and_then(|bounty| Self::check_approve(&env, &caller, &bounty));

        match outcome {
            Ok((payout, fee)) => ApprovalPreview {
                success: true,
                error_code: 0,
                payout,
                fee,
            },
            Err(err) => ApprovalPreview {
                success: false,
                error_code: err as u32,
                payout: 0,
                fee: 0,
            },
        }
    }

    pub fn verify_bounty(env: Env, bounty_id: u64) -> bool {
        env.storage()
            .persistent()
            .get::<DataKey, Bounty>(&DataKey::Bounty(bounty_id))
            .map(|bounty| invariants::verify_bounty_invariants(&bounty))
            .unwrap_or(false)
    }

    /// Check every bounty and the fee ledger against the token balance.
    pub fn verify_all_invariants(env: Env) -> bool {
        if !env.storage().instance().has(&DataKey::Admin) {
            return false;
        }
        invariants::check_all(&env)
    }

    pub fn get_analytics(env: Env) -> monitoring::Analytics {
        monitoring::get_analytics(&env)
    }
}

impl BountyEscrowContract {
    fn ensure_initialized(env: &Env) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        if Self::admin(env)? != *caller {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn token_client(env: &Env) -> Result<token::Client<'_>, Error> {
        let token_addr = Self::get_token(env.clone())?;
        Ok(token::Client::new(env, &token_addr))
    }

    fn load_bounty(env: &Env, bounty_id: u64) -> Result<Bounty, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Bounty(bounty_id))
            .ok_or(Error::NotFound)
    }

    fn save_bounty(env: &Env, bounty: &Bounty) {
        invariants::assert_bounty(env, bounty);
        Self::save_persistent(env, &DataKey::Bounty(bounty.id), bounty);
    }

    /// Write a persistent entry and push its expiry out with the bounties'.
    fn save_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
        env.storage().persistent().set(key, value);
        env.storage()
            .persistent()
            .extend_ttl(key, BOUNTY_TTL_THRESHOLD, BOUNTY_TTL_EXTEND_TO);
    }

    /// Admin, token, counters and the fee ledger live in instance storage.
    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(BOUNTY_TTL_THRESHOLD, BOUNTY_TTL_EXTEND_TO);
    }

    fn load_ledger(env: &Env) -> FeeLedger {
        env.storage()
            .instance()
            .get(&DataKey::FeeLedger)
            .unwrap_or_default()
    }

    fn save_ledger(env: &Env, ledger: &FeeLedger) {
        invariants::assert_ledger(env, ledger);
        env.storage().instance().set(&DataKey::FeeLedger, ledger);
    }

    /// Checks shared by `approve` and `simulate_approve`; yields the split.
    fn check_approve(env: &Env, caller: &Address, bounty: &Bounty) -> Result<(i128, i128), Error> {
        let admin = Self::admin(env)?;
        if bounty.owner != *caller && admin != *caller {
            return Err(Error::Unauthorized);
        }
        if bounty.status != BountyStatus::Accepted {
            return Err(Error::InvalidState);
        }
        Ok(token_math::split_escrow(bounty.escrowed, bounty.reward))
    }
}

impl traits::BountyEscrowInterface for BountyEscrowContract {
    fn create_bounty(
        env: &Env,
        caller: Address,
        title: String,
        description: String,
        reward: i128,
    ) -> Result<u64, Error> {
        BountyEscrowContract::create_bounty(env.clone(), caller, title, description, reward)
    }

    fn request_to_accept_bounty(
        env: &Env,
        caller: Address,
        bounty_id: u64,
        attached_value: i128,
    ) -> Result<(), Error> {
        BountyEscrowContract::request_to_accept_bounty(env.clone(), caller, bounty_id, attached_value)
    }

    fn accept_request(env: &Env, caller: Address, bounty_id: u64) -> Result<(), Error> {
        BountyEscrowContract::accept_request(env.clone(), caller, bounty_id)
    }

    fn approve(env: &Env, caller: Address, bounty_id: u64) -> Result<(), Error> {
        BountyEscrowContract::approve(env.clone(), caller, bounty_id)
    }

    fn cancel_bounty(env: &Env, caller: Address, bounty_id: u64) -> Result<(), Error> {
        BountyEscrowContract::cancel_bounty(env.clone(), caller, bounty_id)
    }

    fn get_bounty(env: &Env, bounty_id: u64) -> Result<Bounty, Error> {
        BountyEscrowContract::get_bounty(env.clone(), bounty_id)
    }
}

impl traits::FeeLedgerInterface for BountyEscrowContract {
    fn withdraw_fees(env: &Env, caller: Address) -> Result<i128, Error> {
        BountyEscrowContract::withdraw_fees(env.clone(), caller)
    }

    fn reset_collected_fees(env: &Env, caller: Address) -> Result<(), Error> {
        BountyEscrowContract::reset_collected_fees(env.clone(), caller)
    }

    fn get_fee_ledger(env: &Env) -> Result<FeeLedger, Error> {
        BountyEscrowContract::get_fee_ledger(env.clone())
    }
}

#[cfg(test)]
mod test_invariants;
