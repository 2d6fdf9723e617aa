use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::ingest::EventId;
use crate::parse::ParsedEvent;

/// Class name → driver name → points earned per event, in ascending event
/// order. A driver absent from an event contributes no entry for it.
pub type SeasonAggregate = BTreeMap<String, BTreeMap<String, Vec<u32>>>;

/// One driver's season line within a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverStanding {
    pub name: String,
    /// Retained per-event scores, descending after trimming.
    pub scores: Vec<u32>,
    pub total: u32,
}

/// Fold every event's per-class, per-driver points into season sequences.
/// Events arrive in a `BTreeMap`, so append order is ascending event id.
pub fn combine(events: &BTreeMap<EventId, ParsedEvent>) -> SeasonAggregate {
    let mut season = SeasonAggregate::new();
    for event in events.values() {
        for (class, drivers) in event {
            let class_entry = season.entry(class.clone()).or_default();
            for (driver, &points) in drivers {
                class_entry.entry(driver.clone()).or_default().push(points);
            }
        }
    }
    season
}

/// The drop-lowest rule: keep each driver's best `keep` scores, descending,
/// with zero scores dropped even inside the kept window. `None` disables
/// trimming entirely (the keep-all season variant). Idempotent.
pub fn trim_scores(season: &mut SeasonAggregate, keep: Option<NonZeroUsize>) {
    let Some(keep) = keep else {
        return;
    };
    for drivers in season.values_mut() {
        for scores in drivers.values_mut() {
            scores.sort_unstable_by(|a, b| b.cmp(a));
            scores.retain(|&s| s > 0);
            scores.truncate(keep.get());
        }
    }
}

/// Per class, one standing per driver with `total = sum(scores)`, sorted by
/// total descending. The sort is stable and driver maps iterate in name
/// order, so ties stay in name order with no secondary key.
pub fn rank(season: &SeasonAggregate) -> BTreeMap<String, Vec<DriverStanding>> {
    let mut ranked = BTreeMap::new();
    for (class, drivers) in season {
        let mut standings: Vec<DriverStanding> = drivers
            .iter()
            .map(|(name, scores)| DriverStanding {
                name: name.clone(),
                scores: scores.clone(),
                total: scores.iter().sum(),
            })
            .collect();
        standings.sort_by(|a, b| b.total.cmp(&a.total));
        ranked.insert(class.clone(), standings);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keep(n: usize) -> Option<NonZeroUsize> {
        NonZeroUsize::new(n)
    }

    fn one_driver_season(scores: &[u32]) -> SeasonAggregate {
        BTreeMap::from([(
            "GT3".to_string(),
            BTreeMap::from([("Alice Driver".to_string(), scores.to_vec())]),
        )])
    }

    #[test]
    fn combine_appends_in_event_order() {
        let mut events = BTreeMap::new();
        for (id, points) in [(1u32, 10u32), (2, 7)] {
            let event: ParsedEvent = BTreeMap::from([(
                "GT3".to_string(),
                BTreeMap::from([("Alice Driver".to_string(), points)]),
            )]);
            events.insert(id, event);
        }
        // third event: Alice absent, so no entry (not a zero)
        events.insert(3, ParsedEvent::from([("GT3".to_string(), BTreeMap::new())]));

        let season = combine(&events);
        assert_eq!(season["GT3"]["Alice Driver"], vec![10, 7]);
    }

    #[test]
    fn combine_scenario_continues_through_trim_and_rank() {
        let mut season = one_driver_season(&[10, 7]);
        trim_scores(&mut season, keep(4));
        assert_eq!(season["GT3"]["Alice Driver"], vec![10, 7]);

        let ranked = rank(&season);
        assert_eq!(
            ranked["GT3"],
            vec![DriverStanding {
                name: "Alice Driver".to_string(),
                scores: vec![10, 7],
                total: 17,
            }]
        );
    }

    #[test]
    fn trim_keeps_best_n_descending_and_drops_zeros() {
        let mut season = one_driver_season(&[3, 10, 0, 7, 9, 1]);
        trim_scores(&mut season, keep(4));
        assert_eq!(season["GT3"]["Alice Driver"], vec![10, 9, 7, 3]);

        let mut zeros = one_driver_season(&[5, 0, 0]);
        trim_scores(&mut zeros, keep(4));
        // zeros are dropped even inside the kept window
        assert_eq!(zeros["GT3"]["Alice Driver"], vec![5]);
    }

    #[test]
    fn trim_is_idempotent_and_bounds_length() {
        let mut season = one_driver_season(&[2, 8, 6, 4, 10, 9]);
        trim_scores(&mut season, keep(3));
        let once = season.clone();
        trim_scores(&mut season, keep(3));
        assert_eq!(season, once);

        let scores = &season["GT3"]["Alice Driver"];
        assert!(scores.len() <= 3);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn trim_none_is_a_passthrough() {
        let mut season = one_driver_season(&[1, 0, 9]);
        trim_scores(&mut season, None);
        // untouched, not even re-sorted
        assert_eq!(season["GT3"]["Alice Driver"], vec![1, 0, 9]);
    }

    #[test]
    fn trim_handles_empty_sequences() {
        let mut season = one_driver_season(&[]);
        trim_scores(&mut season, keep(4));
        assert_eq!(season["GT3"]["Alice Driver"], Vec::<u32>::new());
    }

    #[test]
    fn rank_sorts_by_total_descending_with_stable_ties() {
        let season: SeasonAggregate = BTreeMap::from([(
            "GT3".to_string(),
            BTreeMap::from([
                ("Alice Driver".to_string(), vec![5, 5]),
                ("Bob Racer".to_string(), vec![10, 7]),
                ("Carol Speed".to_string(), vec![6, 4]),
            ]),
        )]);
        let ranked = rank(&season);
        let names: Vec<_> = ranked["GT3"].iter().map(|s| s.name.as_str()).collect();
        // Alice and Carol tie on 10; name (encounter) order decides
        assert_eq!(names, vec!["Bob Racer", "Alice Driver", "Carol Speed"]);
        for standing in &ranked["GT3"] {
            assert_eq!(standing.total, standing.scores.iter().sum::<u32>());
        }
    }
}
