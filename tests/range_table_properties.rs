//! Property tests for range tables and card selection
//!
//! Tables are generated as random partitions of the domain, fed to the
//! constructor in shuffled order.

use at_bat_engine::core::{CardSide, Count, EngineError};
use at_bat_engine::tables::{CardPreferences, CountFrequencyEntry, CountTable, RangeEntry, RangeTable};
use proptest::prelude::*;

const DOMAIN: u32 = 1000;

/// Random partition of `0..domain` into inclusive ranges, shuffled
fn partition(domain: u32) -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::btree_set(1..domain, 0..24)
        .prop_map(move |cuts| {
            let mut bounds = vec![0];
            bounds.extend(cuts);
            bounds.push(domain);
            bounds
                .windows(2)
                .map(|w| (w[0], w[1] - 1))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn labeled(ranges: &[(u32, u32)]) -> Vec<RangeEntry<usize>> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(s, e))| RangeEntry::new(s, e, i))
        .collect()
}

proptest! {
    #[test]
    fn every_draw_resolves_to_exactly_one_range(ranges in partition(DOMAIN)) {
        let table = RangeTable::new(DOMAIN, labeled(&ranges)).unwrap();

        let mut coverage = vec![0u8; DOMAIN as usize];
        for entry in table.entries() {
            for d in entry.start..=entry.end {
                coverage[d as usize] += 1;
            }
        }
        prop_assert!(coverage.iter().all(|&hits| hits == 1));

        for draw in 0..DOMAIN {
            let entry = table.resolve(draw).unwrap();
            prop_assert!(entry.contains(draw));
            let (s, e) = ranges[entry.value];
            prop_assert!(s <= draw && draw <= e);
        }
    }

    #[test]
    fn input_order_does_not_change_results(ranges in partition(DOMAIN)) {
        let forward = RangeTable::new(DOMAIN, labeled(&ranges)).unwrap();
        let mut reversed_entries = labeled(&ranges);
        reversed_entries.reverse();
        let reversed = RangeTable::new(DOMAIN, reversed_entries).unwrap();

        for draw in 0..DOMAIN {
            prop_assert_eq!(
                forward.resolve_value(draw).unwrap(),
                reversed.resolve_value(draw).unwrap()
            );
        }
    }

    #[test]
    fn widened_range_is_overlap(ranges in partition(DOMAIN), pick in any::<prop::sample::Index>()) {
        prop_assume!(ranges.len() >= 2);
        let mut ranges = ranges;
        let not_last: Vec<usize> = (0..ranges.len())
            .filter(|&i| ranges[i].1 < DOMAIN - 1)
            .collect();
        let i = not_last[pick.index(not_last.len())];
        ranges[i].1 += 1;

        let err = RangeTable::new(DOMAIN, labeled(&ranges)).unwrap_err();
        let is_overlap = matches!(err, EngineError::RangeOverlap { .. });
        prop_assert!(is_overlap);
    }

    #[test]
    fn narrowed_range_is_gap(ranges in partition(DOMAIN), pick in any::<prop::sample::Index>()) {
        let wide: Vec<usize> = (0..ranges.len())
            .filter(|&i| ranges[i].1 > ranges[i].0)
            .collect();
        prop_assume!(!wide.is_empty());
        let mut ranges = ranges;
        let i = wide[pick.index(wide.len())];
        let dropped = ranges[i].1;
        ranges[i].1 -= 1;

        prop_assert_eq!(
            RangeTable::new(DOMAIN, labeled(&ranges)).unwrap_err(),
            EngineError::RangeGap { draw: dropped, domain: DOMAIN }
        );
    }

    #[test]
    fn count_table_resolves_every_draw(ranges in partition(DOMAIN)) {
        let entries: Vec<CountFrequencyEntry> = ranges
            .iter()
            .enumerate()
            .map(|(i, &(s, e))| {
                let count = Count::ALL[i % Count::ALL.len()];
                CountFrequencyEntry::new(count.balls, count.strikes, s as i64, e as i64)
            })
            .collect();
        let table = CountTable::new(DOMAIN, &entries).unwrap();

        for draw in 0..DOMAIN {
            prop_assert!(table.resolve_count(draw).is_ok());
        }
    }

    #[test]
    fn card_selection_is_monotonic(threshold in 0u32..=100, draw in 0u32..100) {
        let count = Count::new(2, 1).unwrap();
        let prefs = CardPreferences::new(100, [(count, threshold)]).unwrap();
        let side = prefs.select(count, draw).unwrap();

        if draw < threshold {
            prop_assert_eq!(side, CardSide::Pitcher);
        } else {
            prop_assert_eq!(side, CardSide::Batter);
        }
    }
}

#[test]
fn threshold_bounds_pick_one_side_for_every_draw() {
    let count = Count::new(0, 0).unwrap();
    let batter_only = CardPreferences::new(100, [(count, 0)]).unwrap();
    let pitcher_only = CardPreferences::new(100, [(count, 100)]).unwrap();

    for draw in 0..100 {
        assert_eq!(batter_only.select(count, draw).unwrap(), CardSide::Batter);
        assert_eq!(pitcher_only.select(count, draw).unwrap(), CardSide::Pitcher);
    }
}

#[test]
fn count_draw_lands_in_containing_range() {
    let entries = vec![
        CountFrequencyEntry::new(0, 0, 0, 199),
        CountFrequencyEntry::new(1, 0, 200, 599),
        CountFrequencyEntry::new(0, 1, 600, 849),
        CountFrequencyEntry::new(1, 1, 850, 999),
    ];
    let table = CountTable::new(1000, &entries).unwrap();
    assert_eq!(table.resolve_count(500).unwrap(), Count::new(1, 0).unwrap());
}
