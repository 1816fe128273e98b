use std::cmp::Ordering;

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::run::Run;

/// Direction of the pace ordering on the tracker screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// fastest pace first
    Best,
    /// slowest pace first
    Worst,
}

/// Returns the runs ordered by pace without mutating the input. The sort
/// is stable, so equal-pace runs keep their relative order, and runs whose
/// pace is not a finite number land at the end under both criteria.
pub fn sort_by_pace(runs: &[Run], criterion: SortCriterion) -> Vec<Run> {
    runs.iter()
        .cloned()
        .sorted_by(|a, b| compare_pace(a, b, criterion))
        .collect()
}

fn compare_pace(a: &Run, b: &Run, criterion: SortCriterion) -> Ordering {
    match (pace_key(a), pace_key(b)) {
        (Some(pace_a), Some(pace_b)) => {
            let ascending = pace_a.partial_cmp(&pace_b).unwrap_or(Ordering::Equal);
            match criterion {
                SortCriterion::Best => ascending,
                SortCriterion::Worst => ascending.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn pace_key(run: &Run) -> Option<f64> {
    let pace = run.pace();
    pace.is_finite().then_some(pace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs() -> Vec<Run> {
        vec![
            Run::new("slow", 5.0, 2000.0),   // 400 s/km
            Run::new("fast", 10.0, 3000.0),  // 300 s/km
            Run::new("medium", 8.0, 2800.0), // 350 s/km
        ]
    }

    #[test]
    fn test_best_is_ascending_in_pace() {
        let sorted = sort_by_pace(&runs(), SortCriterion::Best);
        let ids: Vec<_> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["fast", "medium", "slow"]);
        assert!(sorted.windows(2).all(|w| w[0].pace() <= w[1].pace()));
    }

    #[test]
    fn test_worst_is_descending_in_pace() {
        let sorted = sort_by_pace(&runs(), SortCriterion::Worst);
        let ids: Vec<_> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["slow", "medium", "fast"]);
        assert!(sorted.windows(2).all(|w| w[0].pace() >= w[1].pace()));
    }

    #[test]
    fn test_equal_pace_keeps_original_order() {
        let ties = vec![
            Run::new("a", 5.0, 1500.0),
            Run::new("b", 10.0, 3000.0),
            Run::new("c", 2.0, 600.0),
        ];
        for criterion in [SortCriterion::Best, SortCriterion::Worst] {
            let ids: Vec<_> = sort_by_pace(&ties, criterion)
                .into_iter()
                .map(|r| r.id)
                .collect();
            assert_eq!(ids, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_malformed_records_always_land_last() {
        let mixed = vec![
            Run::new("broken", 0.0, 1800.0),
            Run::new("ok", 5.0, 1500.0),
            Run::new("empty", 0.0, 0.0),
        ];
        for criterion in [SortCriterion::Best, SortCriterion::Worst] {
            let sorted = sort_by_pace(&mixed, criterion);
            assert_eq!(sorted[0].id, "ok");
            assert_eq!(sorted[1].id, "broken");
            assert_eq!(sorted[2].id, "empty");
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let original = runs();
        let _ = sort_by_pace(&original, SortCriterion::Best);
        assert_eq!(original, runs());
    }

    #[test]
    fn test_criterion_display() {
        assert_eq!(SortCriterion::Best.to_string(), "Best");
        assert_eq!(SortCriterion::Worst.to_string(), "Worst");
    }
}
