use soroban_sdk::{Address, Env, String};

/// Bounty lifecycle surface shared with contracts that embed or wrap the
/// engine.
pub trait BountyEscrowInterface {
    fn create_bounty(
        env: &Env,
        caller: Address,
        title: String,
        description: String,
        reward: i128,
    ) -> Result<u64, crate::Error>;

    fn request_to_accept_bounty(
        env: &Env,
        caller: Address,
        bounty_id: u64,
        attached_value: i128,
    ) -> Result<(), crate::Error>;

    fn accept_request(env: &Env, caller: Address, bounty_id: u64) -> Result<(), crate::Error>;

    fn approve(env: &Env, caller: Address, bounty_id: u64) -> Result<(), crate::Error>;

    fn cancel_bounty(env: &Env, caller: Address, bounty_id: u64) -> Result<(), crate::Error>;

    fn get_bounty(env: &Env, bounty_id: u64) -> Result<crate::Bounty, crate::Error>;
}

/// Fee ledger surface.
pub trait FeeLedgerInterface {
    fn withdraw_fees(env: &Env, caller: Address) -> Result<i128, crate::Error>;

    fn reset_collected_fees(env: &Env, caller: Address) -> Result<(), crate::Error>;

    fn get_fee_ledger(env: &Env) -> Result<crate::FeeLedger, crate::Error>;
}
