use votechain_ledger::Chain;
use votechain_nullables::{NullClock, NullStore};
use votechain_store::{ChainStore, MetaStore, RosterStore, StoreError};
use votechain_types::{Clock, LedgerParams, PublicKey};

#[test]
fn clock_only_moves_when_told() {
    let clock = NullClock::new(1_000);
    assert_eq!(clock.now().as_secs(), 1_000);
    clock.advance(5);
    assert_eq!(clock.now().as_secs(), 1_005);
    clock.set(42);
    assert_eq!(clock.now().as_secs(), 42);
}

#[test]
fn store_enforces_block_order() {
    let store = NullStore::new();
    let genesis = Chain::new(LedgerParams::default()).blocks()[0].clone();
    store.append_block(&genesis).unwrap();
    assert!(matches!(
        store.append_block(&genesis),
        Err(StoreError::OutOfOrder { expected: 1, found: 0 })
    ));
    assert_eq!(store.block_count().unwrap(), 1);
}

#[test]
fn failing_writes_leave_state_untouched() {
    let store = NullStore::new();
    store.fail_writes(true);
    assert!(matches!(
        store.put_voter("V1", &PublicKey([1u8; 32])),
        Err(StoreError::Backend(_))
    ));
    assert!(store.put_meta("k", b"v").is_err());
    store.fail_writes(false);
    store.put_voter("V1", &PublicKey([1u8; 32])).unwrap();
    assert_eq!(store.load_voters().unwrap().len(), 1);
}
