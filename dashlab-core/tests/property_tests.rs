//! Property tests for basket aggregation.
//!
//! Uses proptest to verify:
//! 1. One trade-log row per event, numbered 1..N in timestamp order
//! 2. One basket per exit event
//! 3. Aggregation is deterministic and ignores input order
//! 4. Durations never drop below the floor
//! 5. Global counter ends at 1 + number of exits

use dashlab_core::basket::MIN_DURATION_SECS;
use dashlab_core::{BasketAggregator, EventKind, TradeEvent};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_kind() -> impl Strategy<Value = EventKind> {
    prop_oneof![Just(EventKind::Entry), Just(EventKind::Exit)]
}

fn arb_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("A".to_string())),
        Just(Some("B".to_string())),
        Just(Some("C".to_string())),
    ]
}

fn arb_size() -> impl Strategy<Value = f64> {
    (-100.0..100.0_f64).prop_map(|s| (s * 100.0).round() / 100.0)
}

fn arb_pnl() -> impl Strategy<Value = Option<f64>> {
    prop::option::of((-5000.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0))
}

/// Events with strictly increasing timestamps (gaps up to a day).
fn arb_events(max: usize) -> impl Strategy<Value = Vec<TradeEvent>> {
    prop::collection::vec(
        (arb_kind(), arb_strategy(), arb_size(), arb_pnl(), 1..86_400_000_000_000_i64),
        0..max,
    )
    .prop_map(|raw| {
        let mut ts = 1_600_000_000_000_000_000_i64;
        raw.into_iter()
            .map(|(kind, strategy, size, pnl, gap)| {
                ts += gap;
                TradeEvent {
                    timestamp: ts,
                    kind,
                    strategy,
                    size,
                    pnl,
                }
            })
            .collect()
    })
}

fn arb_shuffled_pair() -> impl Strategy<Value = (Vec<TradeEvent>, Vec<TradeEvent>)> {
    arb_events(40).prop_flat_map(|events| {
        let shuffled = Just(events.clone()).prop_shuffle();
        (Just(events), shuffled)
    })
}

// ── 1–2. Output cardinality ──────────────────────────────────────────

proptest! {
    /// Every event yields exactly one trade-log row; trade numbers are 1..N.
    #[test]
    fn trade_log_covers_every_event(events in arb_events(60)) {
        let out = BasketAggregator::default().aggregate(&events);
        prop_assert_eq!(out.trade_log.len(), events.len());
        for (i, row) in out.trade_log.iter().enumerate() {
            prop_assert_eq!(row.trade_num, i + 1);
        }
    }

    /// Every exit closes exactly one basket.
    #[test]
    fn one_basket_per_exit(events in arb_events(60)) {
        let out = BasketAggregator::default().aggregate(&events);
        let exits = events.iter().filter(|e| e.kind == EventKind::Exit).count();
        prop_assert_eq!(out.baskets.len(), exits);
    }

    /// Lot sizes are absolute values of the sorted events' sizes.
    #[test]
    fn lot_sizes_follow_sorted_order(events in arb_events(40)) {
        let out = BasketAggregator::default().aggregate(&events);
        for (row, event) in out.trade_log.iter().zip(events.iter()) {
            prop_assert_eq!(row.lot_size, event.size.abs());
        }
    }
}

// ── 3. Determinism ───────────────────────────────────────────────────

proptest! {
    /// Running twice on the same input gives identical output.
    #[test]
    fn aggregation_is_idempotent(events in arb_events(40)) {
        let aggregator = BasketAggregator::default();
        let first = aggregator.aggregate(&events);
        let second = aggregator.aggregate(&events.clone());
        prop_assert_eq!(first, second);
    }

    /// Shuffling the input does not change the output.
    #[test]
    fn aggregation_ignores_input_order((events, shuffled) in arb_shuffled_pair()) {
        let aggregator = BasketAggregator::default();
        prop_assert_eq!(aggregator.aggregate(&events), aggregator.aggregate(&shuffled));
    }
}

// ── 4–5. Durations and counter ───────────────────────────────────────

proptest! {
    /// Durations are never below the floor.
    #[test]
    fn durations_respect_floor(events in arb_events(60)) {
        let out = BasketAggregator::default().aggregate(&events);
        for basket in &out.baskets {
            prop_assert!(basket.duration_seconds >= MIN_DURATION_SECS);
        }
    }

    /// The global counter advances once per exit, starting from 1.
    #[test]
    fn global_counter_tracks_exits(events in arb_events(60)) {
        let out = BasketAggregator::default().aggregate(&events);
        let exits = events.iter().filter(|e| e.kind == EventKind::Exit).count() as u64;
        prop_assert_eq!(out.next_sequence, exits + 1);

        // A row's sequence equals 1 + exits strictly before it.
        let mut closed = 0_u64;
        for (row, event) in out.trade_log.iter().zip(events.iter()) {
            prop_assert_eq!(row.basket_id.sequence, closed + 1);
            if event.kind == EventKind::Exit {
                closed += 1;
            }
        }
    }
}
