//! End-to-end properties of the harness, exercised against the in-memory
//! reference application.

use atria_core::{
    BankModule, BondStatus, Chain, ConsAddress, EpochsModule, SlashingModule, StakingModule,
    ValAddress, ValidatorKey,
};
use atria_memchain::MemChain;
use atria_testenv::{HarnessConfig, HarnessError, TestEnv, BOND_DENOM};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn genesis_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn bootstrap_env() -> (tempfile::TempDir, TestEnv<MemChain>) {
    let dir = tempfile::tempdir().unwrap();

    let app = MemChain::new(dir.path()).unwrap();
    let config = HarnessConfig::new(dir.path()).with_genesis_time(genesis_time());

    let env = TestEnv::bootstrap(app, config).unwrap();

    (dir, env)
}

fn find_validator_account(env: &TestEnv<MemChain>, address: &ConsAddress) -> ValAddress {
    env.app()
        .staking()
        .all_validators(env.ctx())
        .unwrap()
        .into_iter()
        .find(|v| &v.cons_address().unwrap() == address)
        .expect("validator should exist")
        .operator_address
}

#[test]
fn bootstrap_establishes_height_zero_with_signing_infos() {
    let (_dir, env) = bootstrap_env();

    assert_eq!(env.ctx().block_height(), 0);
    assert_eq!(env.ctx().block_time(), genesis_time());

    let validators = env.app().staking().all_validators(env.ctx()).unwrap();
    assert!(!validators.is_empty());

    for validator in validators {
        let address = validator.cons_address().unwrap();
        let info = env
            .app()
            .slashing()
            .signing_info(env.ctx(), &address)
            .unwrap()
            .expect("genesis validator should have signing info");

        assert_eq!(info.start_height, 0);
        assert_eq!(info.missed_blocks_counter, 0);
        assert!(!info.tombstoned);
    }
}

#[test]
fn create_and_bond_extends_the_validator_set_by_one() {
    let (_dir, mut env) = bootstrap_env();

    let before = env.validator_addresses().unwrap().len();

    let (_key, operator) = env
        .create_and_bond_validator(BondStatus::Bonded)
        .unwrap();

    let addresses = env.validator_addresses().unwrap();
    assert_eq!(addresses.len(), before + 1);

    let validator = env
        .app()
        .staking()
        .validator(env.ctx(), &operator)
        .unwrap()
        .expect("created validator should exist");
    assert_eq!(validator.status, BondStatus::Bonded);

    let address = validator.cons_address().unwrap();
    let info = env
        .app()
        .slashing()
        .signing_info(env.ctx(), &address)
        .unwrap();
    assert!(info.is_some(), "created validator should have signing info");
}

#[test]
fn requested_bond_status_is_honored() {
    let (_dir, mut env) = bootstrap_env();

    let (_key, operator) = env
        .create_and_bond_validator(BondStatus::Unbonding)
        .unwrap();

    let validator = env
        .app()
        .staking()
        .validator(env.ctx(), &operator)
        .unwrap()
        .unwrap();

    assert_eq!(validator.status, BondStatus::Unbonding);
}

#[test]
fn init_validator_funds_the_account_to_the_max() {
    let (_dir, mut env) = bootstrap_env();

    let address = env.init_validator().unwrap();

    let operator = find_validator_account(&env, &address);
    let account = operator.account().unwrap();

    let balance = env
        .app()
        .bank()
        .balance(env.ctx(), &account, BOND_DENOM)
        .unwrap();

    assert_eq!(balance, u128::MAX);
    assert_eq!(env.validator_keys().len(), 1);
}

#[test]
fn plain_advance_moves_height_by_one_and_time_by_the_increase() {
    let (_dir, mut env) = bootstrap_env();

    env.begin_block(false, 7).unwrap();
    assert_eq!(env.ctx().block_height(), 1);
    assert_eq!(env.ctx().block_time(), genesis_time() + Duration::seconds(7));

    // a zero increase still advances the height
    env.begin_block(false, 0).unwrap();
    assert_eq!(env.ctx().block_height(), 2);
    assert_eq!(env.ctx().block_time(), genesis_time() + Duration::seconds(7));
}

#[test]
fn epoch_advance_lands_one_second_past_the_boundary() {
    let (_dir, mut env) = bootstrap_env();

    // first block starts the day epoch at its block time
    env.begin_block(false, 10).unwrap();
    let epoch_start = genesis_time() + Duration::seconds(10);

    let identifier = env
        .app()
        .epochs()
        .distr_epoch_identifier(env.ctx())
        .unwrap();
    let epoch = env
        .app()
        .epochs()
        .epoch_info(env.ctx(), &identifier)
        .unwrap()
        .unwrap();
    assert_eq!(epoch.current_epoch_start_time, Some(epoch_start));

    // the time increase is ignored in epoch mode
    env.begin_block(true, 999_999).unwrap();

    let boundary = epoch_start + epoch.duration();
    assert_eq!(env.ctx().block_height(), 2);
    assert_eq!(env.ctx().block_time(), boundary + Duration::seconds(1));
    assert!(env.ctx().block_time() > boundary);
}

#[test]
fn consecutive_epoch_advances_keep_jumping_boundaries() {
    let (_dir, mut env) = bootstrap_env();

    env.begin_block(false, 0).unwrap();
    env.begin_block(true, 0).unwrap();
    let after_first = env.ctx().block_time();

    env.begin_block(true, 0).unwrap();

    assert_eq!(env.ctx().block_height(), 3);
    assert!(env.ctx().block_time() > after_first);
}

#[test]
fn environments_are_mutually_isolated() {
    let (_dir_a, mut a) = bootstrap_env();
    let (_dir_b, b) = bootstrap_env();

    a.init_validator().unwrap();
    a.begin_block(false, 60).unwrap();

    assert_eq!(b.ctx().block_height(), 0);
    assert_eq!(b.ctx().block_time(), genesis_time());
    assert_eq!(b.validator_addresses().unwrap().len(), 1);
    assert_eq!(a.validator_addresses().unwrap().len(), 2);
}

#[test]
fn validator_addresses_cover_genesis_and_created_validators() {
    let (_dir, mut env) = bootstrap_env();

    env.create_and_bond_validator(BondStatus::Bonded).unwrap();
    env.create_and_bond_validator(BondStatus::Unbonded).unwrap();

    let addresses = env.validator_addresses().unwrap();
    assert_eq!(addresses.len(), 3);

    let mut deduped = addresses.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), addresses.len(), "addresses must be unique");
}

#[test]
fn injected_genesis_time_is_used_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let time = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();

    let app = MemChain::new(dir.path()).unwrap();
    let env = TestEnv::bootstrap(app, HarnessConfig::new(dir.path()).with_genesis_time(time))
        .unwrap();

    assert_eq!(env.ctx().block_time(), time);
}

#[test]
fn unknown_proposer_is_a_precondition_violation() {
    let (_dir, mut env) = bootstrap_env();

    let stranger = ValAddress::from_pub_key(&ValidatorKey::from_seed([42u8; 32]).public_key())
        .unwrap();

    let err = env
        .begin_block_with_proposer(false, &stranger, 1)
        .unwrap_err();

    assert!(matches!(err, HarnessError::ValidatorNotFound(_)));
    assert!(err.is_precondition());
}

#[test]
fn application_failures_are_classified_as_upstream() {
    let dir = tempfile::tempdir().unwrap();

    let app = MemChain::new(dir.path()).unwrap();
    let first = TestEnv::bootstrap(app, HarnessConfig::new(dir.path())).unwrap();

    // hand the already-initialized application to a second bootstrap
    let Err(err) = TestEnv::bootstrap(first.into_app(), HarnessConfig::new(dir.path())) else {
        panic!("second bootstrap should fail");
    };

    assert!(matches!(err, HarnessError::App(_)));
    assert!(!err.is_precondition());
}

#[test]
fn unrepresentable_time_increases_are_rejected() {
    let (_dir, mut env) = bootstrap_env();

    // would wrap negative through a truncating cast
    let err = env.begin_block(false, u64::MAX).unwrap_err();
    assert!(matches!(err, HarnessError::TimeIncreaseOutOfRange(_)));
    assert!(err.is_precondition());

    // beyond the representable block-time range
    let err = env.begin_block(false, 10_000_000_000_000_000).unwrap_err();
    assert!(matches!(err, HarnessError::TimeIncreaseOutOfRange(_)));

    // the chain did not move
    assert_eq!(env.ctx().block_height(), 0);
    assert_eq!(env.ctx().block_time(), genesis_time());
}

#[test]
fn default_validator_signing_info_targets_the_first_enumerated_validator() {
    let (_dir, mut env) = bootstrap_env();

    let first = env.app().staking().all_validators(env.ctx()).unwrap()[0]
        .cons_address()
        .unwrap();

    env.begin_block(false, 1).unwrap();
    env.seed_default_validator_signing_info().unwrap();

    let info = env
        .app()
        .slashing()
        .signing_info(env.ctx(), &first)
        .unwrap()
        .unwrap();

    assert_eq!(info.start_height, 1);
    assert_eq!(info.missed_blocks_counter, 0);
}

#[test]
fn seeding_signing_info_twice_overwrites_the_record() {
    let (_dir, mut env) = bootstrap_env();

    let (_key, operator) = env.create_and_bond_validator(BondStatus::Bonded).unwrap();
    let address = env
        .app()
        .staking()
        .validator(env.ctx(), &operator)
        .unwrap()
        .unwrap()
        .cons_address()
        .unwrap();

    env.begin_block(false, 1).unwrap();
    env.seed_signing_info(&address).unwrap();

    let info = env
        .app()
        .slashing()
        .signing_info(env.ctx(), &address)
        .unwrap()
        .unwrap();

    assert_eq!(info.start_height, 1);
}
