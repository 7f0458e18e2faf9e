use soroban_sdk::{contracttype, symbol_short, Address, Env};

pub const EVENT_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineInitialized {
    pub admin: Address,
    pub token: Address,
    pub timestamp: u64,
    pub version: u32,
}

pub fn emit_engine_initialized(env: &Env, event: EngineInitialized) {
    let topics = (symbol_short!("init"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyCreated {
    pub bounty_id: u64,
    pub owner: Address,
    pub reward: i128,
    pub version: u32,
}

pub fn emit_bounty_created(env: &Env, event: BountyCreated) {
    let topics = (symbol_short!("b_create"), event.bounty_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestToAcceptBounty {
    pub bounty_id: u64,
    pub requester: Address,
    pub attached_value: i128,
    pub version: u32,
}

pub fn emit_request_to_accept(env: &Env, event: RequestToAcceptBounty) {
    let topics = (symbol_short!("b_request"), event.bounty_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestAccepted {
    pub bounty_id: u64,
    pub owner: Address,
    pub requester: Address,
    pub version: u32,
}

pub fn emit_request_accepted(env: &Env, event: RequestAccepted) {
    let topics = (symbol_short!("b_accept"), event.bounty_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyApproved {
    pub bounty_id: u64,
    pub approver: Address,
    pub payout: i128,
    pub fee: i128,
    pub version: u32,
}

pub fn emit_bounty_approved(env: &Env, event: BountyApproved) {
    let topics = (symbol_short!("b_approve"), event.bounty_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyCancelled {
    pub bounty_id: u64,
    pub refunded: i128,
    pub version: u32,
}

pub fn emit_bounty_cancelled(env: &Env, event: BountyCancelled) {
    let topics = (symbol_short!("b_cancel"), event.bounty_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesWithdrawn {
    pub caller: Address,
    pub amount: i128,
    pub timestamp: u64,
    pub version: u32,
}

pub fn emit_fees_withdrawn(env: &Env, event: FeesWithdrawn) {
    let topics = (symbol_short!("fee_wd"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesReset {
    pub caller: Address,
    /// Fee total discarded by the reset.
    pub previous: i128,
    pub timestamp: u64,
    pub version: u32,
}

pub fn emit_fees_reset(env: &Env, event: FeesReset) {
    let topics = (symbol_short!("fee_reset"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutClaimed {
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
    pub version: u32,
}

pub fn emit_payout_claimed(env: &Env, event: PayoutClaimed) {
    let topics = (symbol_short!("payout"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminUpdated {
    pub previous: Address,
    pub new_admin: Address,
    pub timestamp: u64,
    pub version: u32,
}

pub fn emit_admin_updated(env: &Env, event: AdminUpdated) {
    let topics = (symbol_short!("admin"),);
    env.events().publish(topics, event);
}
