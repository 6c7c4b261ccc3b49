//! Property and concurrency tests for the dedup gate.

use proptest::prelude::*;
use signalgate_server::DedupGate;
use std::sync::Arc;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Replaying a key is suppressed exactly while inside the window.
    #[test]
    fn replay_is_suppressed_only_inside_window(
        window in 1u64..10_000,
        start in 0i64..1_000_000,
        delay in 0i64..20_000,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let gate = DedupGate::open(dir.path().join("state.json"), window).unwrap();
        prop_assert!(gate.is_fresh_at("k", start).unwrap());
        let fresh = gate.is_fresh_at("k", start + delay).unwrap();
        prop_assert_eq!(fresh, delay >= window as i64);
    }

    /// At most one call per key passes within a single window.
    #[test]
    fn one_pass_per_window(offsets in prop::collection::vec(0i64..899, 1..20)) {
        let dir = tempfile::tempdir().unwrap();
        let gate = DedupGate::open(dir.path().join("state.json"), 900).unwrap();
        let mut sorted = offsets;
        sorted.sort_unstable();
        let passed = sorted
            .iter()
            .filter(|&&t| gate.is_fresh_at("k", 10_000 + t).unwrap())
            .count();
        prop_assert_eq!(passed, 1);
    }
}

#[test]
fn concurrent_callers_pass_once() {
    let dir = tempfile::tempdir().unwrap();
    let gate = Arc::new(DedupGate::open(dir.path().join("state.json"), 900).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || gate.is_fresh_at("ESIM:FIRST_MOVE:A:4:true", 42).unwrap())
        })
        .collect();

    let passed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&fresh| fresh)
        .count();
    assert_eq!(passed, 1);
}
