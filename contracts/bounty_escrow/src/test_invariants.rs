use super::*;
use crate::invariants;
use soroban_sdk::{testutils::Address as _, token, Address, Env, String};

fn setup_engine(env: &Env) -> (BountyEscrowContractClient<'static>, Address, Address, Address) {
    env.mock_all_auths();
    let contract_id = env.register_contract(None, BountyEscrowContract);
    let client = BountyEscrowContractClient::new(env, &contract_id);

    let admin = Address::generate(env);
    let owner = Address::generate(env);
    let requester = Address::generate(env);
    let token_admin = Address::generate(env);
    let token_id = env
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    token::StellarAssetClient::new(env, &token_id).mint(&requester, &50_000);

    client.init(&admin, &token_id);

    (client, admin, owner, requester)
}

fn create(env: &Env, client: &BountyEscrowContractClient, owner: &Address, reward: i128) -> u64 {
    client.create_bounty(
        owner,
        &String::from_str(env, "Bounty Title"),
        &String::from_str(env, "Bounty Description"),
        &reward,
    )
}

fn sample_bounty(env: &Env, status: BountyStatus) -> Bounty {
    Bounty {
        id: 0,
        title: String::from_str(env, "t"),
        description: String::from_str(env, "d"),
        reward: 100,
        owner: Address::generate(env),
        status,
        requester: None,
        approver: None,
        escrowed: 0,
        created_at: 0,
    }
}

/// Every write of a bounty record or of the fee ledger goes through an
/// invariant check. If a flow stops calling `assert_bounty`/`assert_ledger`
/// the matching tally drops and this test fails.
#[test]
fn test_invariant_checker_called_in_major_bounty_flows() {
    let env = Env::default();
    let (client, _admin, owner, requester) = setup_engine(&env);
    env.as_contract(&client.address, || invariants::reset_tally_for_test(&env));

    let id = create(&env, &client, &owner, 1_000);
    client.request_to_accept_bounty(&requester, &id, &1_500);
    client.accept_request(&owner, &id);
    client.approve(&owner, &id);

    let tally = env.as_contract(&client.address, || invariants::tally_for_test(&env));
    assert_eq!(
        tally.bounty_saves, 4,
        "create, request, accept and approve each save the bounty once"
    );
    assert_eq!(
        tally.ledger_saves, 2,
        "only request and approve touch the fee ledger"
    );
}

#[test]
fn test_invariant_checker_called_in_fee_flows() {
    let env = Env::default();
    let (client, admin, owner, requester) = setup_engine(&env);

    let id = create(&env, &client, &owner, 100);
    client.request_to_accept_bounty(&requester, &id, &300);
    client.accept_request(&owner, &id);
    client.approve(&owner, &id);

    env.as_contract(&client.address, || invariants::reset_tally_for_test(&env));
    client.withdraw_fees(&admin);
    client.claim_payout(&requester);
    client.reset_collected_fees(&admin);

    let tally = env.as_contract(&client.address, || invariants::tally_for_test(&env));
    assert_eq!(tally.bounty_saves, 0, "fee flows never rewrite a bounty");
    assert_eq!(tally.ledger_saves, 3, "withdraw, claim and reset each save the ledger once");
}

#[test]
#[should_panic(expected = "Invariant checks suspended")]
fn test_write_traps_while_checks_suspended() {
    let env = Env::default();
    let (client, _admin, owner, _requester) = setup_engine(&env);
    env.as_contract(&client.address, || invariants::suspend_checks_for_test(&env));

    create(&env, &client, &owner, 100);
}

#[test]
fn test_verify_all_invariants_holds_through_lifecycle() {
    let env = Env::default();
    let (client, admin, owner, requester) = setup_engine(&env);
    assert!(client.verify_all_invariants());

    let a = create(&env, &client, &owner, 500);
    let b = create(&env, &client, &owner, 500);
    assert!(client.verify_all_invariants());

    client.request_to_accept_bounty(&requester, &a, &700);
    client.request_to_accept_bounty(&requester, &b, &200);
    assert!(client.verify_all_invariants());

    client.accept_request(&owner, &a);
    client.approve(&admin, &a);
    client.cancel_bounty(&owner, &b);
    assert!(client.verify_all_invariants());

    client.claim_payout(&requester);
    client.withdraw_fees(&admin);
    assert!(client.verify_all_invariants());
}

#[test]
fn test_verify_all_invariants_false_before_init() {
    let env = Env::default();
    let contract_id = env.register_contract(None, BountyEscrowContract);
    let client = BountyEscrowContractClient::new(&env, &contract_id);
    assert!(!client.verify_all_invariants());
}

#[test]
fn test_verify_bounty_missing_id_is_false() {
    let env = Env::default();
    let (client, _admin, owner, _requester) = setup_engine(&env);
    let id = create(&env, &client, &owner, 10);

    assert!(client.verify_bounty(&id));
    assert!(!client.verify_bounty(&(id + 1)));
}

#[test]
fn test_verify_all_invariants_detects_orphan_escrow() {
    let env = Env::default();
    let (client, _admin, owner, _requester) = setup_engine(&env);
    let id = create(&env, &client, &owner, 10);

    // Write an inconsistent record straight into storage, bypassing the checks.
    env.as_contract(&client.address, || {
        let mut bounty: Bounty = env
            .storage()
            .persistent()
            .get(&DataKey::Bounty(id))
            .unwrap();
        bounty.escrowed = 50;
        env.storage().persistent().set(&DataKey::Bounty(id), &bounty);
    });

    assert!(!client.verify_bounty(&id));
    assert!(!client.verify_all_invariants());
}

#[test]
fn test_verify_all_invariants_detects_unbacked_ledger() {
    let env = Env::default();
    let (client, _admin, _owner, _requester) = setup_engine(&env);

    // Ledger claims value the token contract never received.
    env.as_contract(&client.address, || {
        let ledger = FeeLedger {
            fees_collected: 10,
            contract_balance: 10,
            total_escrowed: 0,
            total_payable: 0,
        };
        env.storage().instance().set(&DataKey::FeeLedger, &ledger);
    });

    assert!(!client.verify_all_invariants());
}

#[test]
fn test_verify_all_invariants_detects_missing_bounty() {
    let env = Env::default();
    let (client, _admin, owner, _requester) = setup_engine(&env);
    let id = create(&env, &client, &owner, 10);

    env.as_contract(&client.address, || {
        env.storage().persistent().remove(&DataKey::Bounty(id));
    });

    assert!(!client.verify_all_invariants());
}

// ---------------------------------------------------------------------------
// Pure checks
// ---------------------------------------------------------------------------

#[test]
fn test_bounty_invariants_on_constructed_records() {
    let env = Env::default();

    let open = sample_bounty(&env, BountyStatus::Open);
    assert!(invariants::verify_bounty_invariants(&open));

    let mut open_with_requester = open.clone();
    open_with_requester.requester = Some(Address::generate(&env));
    assert!(!invariants::verify_bounty_invariants(&open_with_requester));

    let mut pending = sample_bounty(&env, BountyStatus::RequestPending);
    assert!(!invariants::verify_bounty_invariants(&pending));
    pending.requester = Some(Address::generate(&env));
    pending.escrowed = 40;
    assert!(invariants::verify_bounty_invariants(&pending));

    let mut approved = pending.clone();
    approved.status = BountyStatus::Approved;
    approved.escrowed = 0;
    assert!(!invariants::verify_bounty_invariants(&approved));
    approved.approver = Some(Address::generate(&env));
    assert!(invariants::verify_bounty_invariants(&approved));

    let mut cancelled = sample_bounty(&env, BountyStatus::Cancelled);
    assert!(invariants::verify_bounty_invariants(&cancelled));
    cancelled.requester = Some(Address::generate(&env));
    assert!(invariants::verify_bounty_invariants(&cancelled));
    cancelled.escrowed = 1;
    assert!(!invariants::verify_bounty_invariants(&cancelled));

    let mut negative = sample_bounty(&env, BountyStatus::Open);
    negative.reward = -1;
    assert!(!invariants::verify_bounty_invariants(&negative));
}

#[test]
fn test_ledger_invariants_on_constructed_records() {
    assert!(invariants::verify_ledger_invariants(&FeeLedger::default()));

    let backed = FeeLedger {
        fees_collected: 50,
        contract_balance: 200,
        total_escrowed: 100,
        total_payable: 50,
    };
    assert!(invariants::verify_ledger_invariants(&backed));

    let over_committed = FeeLedger {
        contract_balance: 199,
        ..backed.clone()
    };
    assert!(!invariants::verify_ledger_invariants(&over_committed));

    let negative = FeeLedger {
        fees_collected: -1,
        ..FeeLedger::default()
    };
    assert!(!invariants::verify_ledger_invariants(&negative));

    let overflowing = FeeLedger {
        fees_collected: i128::MAX,
        contract_balance: i128::MAX,
        total_escrowed: 1,
        total_payable: 0,
    };
    assert!(!invariants::verify_ledger_invariants(&overflowing));
}

// ---------------------------------------------------------------------------
// Write-path assertions
// ---------------------------------------------------------------------------

#[test]
#[should_panic(expected = "Invariant violated: reward must be non-negative")]
fn test_invariant_checker_catches_negative_reward() {
    let env = Env::default();
    let (client, _admin, _owner, _requester) = setup_engine(&env);
    let mut bounty = sample_bounty(&env, BountyStatus::Open);
    bounty.reward = -5;

    env.as_contract(&client.address, || {
        invariants::assert_bounty(&env, &bounty);
    });
}

#[test]
#[should_panic(expected = "Invariant violated: approver is set exactly when approved")]
fn test_invariant_checker_catches_approver_without_approval() {
    let env = Env::default();
    let (client, _admin, _owner, _requester) = setup_engine(&env);
    let mut bounty = sample_bounty(&env, BountyStatus::Open);
    bounty.approver = Some(Address::generate(&env));

    env.as_contract(&client.address, || {
        invariants::assert_bounty(&env, &bounty);
    });
}

#[test]
#[should_panic(expected = "Invariant violated: escrow held outside an active request")]
fn test_invariant_checker_catches_escrow_on_open_bounty() {
    let env = Env::default();
    let (client, _admin, _owner, _requester) = setup_engine(&env);
    let mut bounty = sample_bounty(&env, BountyStatus::Open);
    bounty.escrowed = 10;

    env.as_contract(&client.address, || {
        invariants::assert_bounty(&env, &bounty);
    });
}

#[test]
#[should_panic(expected = "Invariant violated: fee ledger exceeds contract balance")]
fn test_invariant_checker_catches_overcommitted_ledger() {
    let env = Env::default();
    let (client, _admin, _owner, _requester) = setup_engine(&env);
    let ledger = FeeLedger {
        fees_collected: 10,
        contract_balance: 5,
        total_escrowed: 0,
        total_payable: 0,
    };

    env.as_contract(&client.address, || {
        invariants::assert_ledger(&env, &ledger);
    });
}
