//! Collection statistics
//!
//! Everything here is recomputed from the catalog and the status map on
//! demand; a full pass is a few thousand cheap comparisons, so nothing is
//! cached or incrementally maintained.

use crate::catalog::{generation_range, region_for_generation, Pokemon, GENERATIONS};
use crate::pokedex::{status_of, StatusMap};

/// Shared ratio guard: zero denominators read as zero, never NaN
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Integer percentage, rounded half up
pub fn percent_round(count: usize, total: usize) -> u32 {
    (ratio(count, total) * 100.0).round() as u32
}

/// Percentage with display precision left to the caller (formatted `{:.1}`)
pub fn percent_f64(count: usize, total: usize) -> f64 {
    ratio(count, total) * 100.0
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub total_caught: usize,
    pub total_shiny: usize,
    pub total_lucky: usize,
    pub total_shadow: usize,
    pub total_purified: usize,
    pub completion_percentage: u32,
}

impl Stats {
    pub fn compute(catalog: &[Pokemon], statuses: &StatusMap) -> Stats {
        let mut stats = Stats::default();
        for p in catalog {
            let status = status_of(statuses, p.id);
            if status.caught {
                stats.total_caught += 1;
            }
            if status.shiny {
                stats.total_shiny += 1;
            }
            if status.lucky {
                stats.total_lucky += 1;
            }
            if status.shadow {
                stats.total_shadow += 1;
            }
            if status.purified {
                stats.total_purified += 1;
            }
        }
        stats.completion_percentage = percent_round(stats.total_caught, catalog.len());
        stats
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationProgress {
    pub generation: u8,
    pub region: &'static str,
    pub first: u32,
    pub last: u32,
    pub caught: usize,
    pub total: usize,
    pub percentage: u32,
}

pub fn generation_progress(
    catalog: &[Pokemon],
    statuses: &StatusMap,
    generation: u8,
) -> GenerationProgress {
    let (first, last) = generation_range(generation);
    let mut caught = 0;
    let mut total = 0;
    for p in catalog.iter().filter(|p| p.generation == generation) {
        total += 1;
        if status_of(statuses, p.id).caught {
            caught += 1;
        }
    }
    GenerationProgress {
        generation,
        region: region_for_generation(generation),
        first,
        last,
        caught,
        total,
        percentage: percent_round(caught, total),
    }
}

pub fn all_generation_progress(catalog: &[Pokemon], statuses: &StatusMap) -> Vec<GenerationProgress> {
    GENERATIONS
        .iter()
        .map(|&g| generation_progress(catalog, statuses, g))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypeCount {
    pub type_name: &'static str,
    pub count: usize,
    /// Share of the caught collection, meant for one-decimal display
    pub percentage: f64,
}

/// Type breakdown of the caught subset, largest first. Types with no
/// caught member are omitted.
pub fn type_distribution(catalog: &[Pokemon], statuses: &StatusMap) -> Vec<TypeCount> {
    use std::collections::HashMap;

    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    let mut total_caught = 0;
    for p in catalog {
        if status_of(statuses, p.id).caught {
            total_caught += 1;
            for t in &p.types {
                *counts.entry(t).or_insert(0) += 1;
            }
        }
    }

    let mut distribution: Vec<TypeCount> = counts
        .into_iter()
        .map(|(type_name, count)| TypeCount {
            type_name,
            count,
            percentage: percent_f64(count, total_caught),
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then(a.type_name.cmp(b.type_name)));
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::filters::{filter_catalog, FilterSpec};
    use crate::catalog;
    use crate::pokedex;
    use crate::types::{CaptureFlag, StatusFilter};
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn totals_match_the_caught_filter() {
        let mut statuses = StatusMap::new();
        for id in [1, 4, 25, 150, 400, 906] {
            pokedex::set_caught(&mut statuses, id, true, now());
        }
        pokedex::set_flag(&mut statuses, 25, CaptureFlag::Shiny, true);

        let stats = Stats::compute(catalog::all(), &statuses);
        let spec = FilterSpec {
            status: StatusFilter::Caught,
            ..Default::default()
        };
        assert_eq!(
            stats.total_caught,
            filter_catalog(catalog::all(), &statuses, &spec).len()
        );
        assert_eq!(stats.total_shiny, 1);
    }

    #[test]
    fn worked_example_percentages() {
        // Three entities, two caught: completion rounds 66.67 up to 67
        let three: Vec<_> = [1u32, 4, 152]
            .iter()
            .map(|&id| catalog::by_id(id).unwrap().clone())
            .collect();
        let mut statuses = StatusMap::new();
        pokedex::set_caught(&mut statuses, 1, true, now());
        pokedex::set_flag(&mut statuses, 1, CaptureFlag::Shiny, true);
        pokedex::set_caught(&mut statuses, 152, true, now());

        let stats = Stats::compute(&three, &statuses);
        assert_eq!(stats.total_caught, 2);
        assert_eq!(stats.total_shiny, 1);
        assert_eq!(stats.completion_percentage, 67);
    }

    #[test]
    fn zero_denominators_read_as_zero() {
        let empty: Vec<crate::catalog::Pokemon> = Vec::new();
        let statuses = StatusMap::new();
        let stats = Stats::compute(&empty, &statuses);
        assert_eq!(stats.completion_percentage, 0);
        assert_eq!(percent_round(5, 0), 0);
        assert_eq!(percent_f64(5, 0), 0.0);
        assert!(type_distribution(catalog::all(), &statuses).is_empty());
    }

    #[test]
    fn generation_progress_counts_only_that_generation() {
        let mut statuses = StatusMap::new();
        pokedex::set_caught(&mut statuses, 1, true, now()); // gen 1
        pokedex::set_caught(&mut statuses, 152, true, now()); // gen 2
        pokedex::set_caught(&mut statuses, 200, true, now()); // gen 2

        let gen2 = generation_progress(catalog::all(), &statuses, 2);
        assert_eq!(gen2.caught, 2);
        assert_eq!(gen2.total, 100);
        assert_eq!(gen2.percentage, 2);
        assert_eq!(gen2.region, "Johto");
        assert_eq!((gen2.first, gen2.last), (152, 251));

        let gen9 = generation_progress(catalog::all(), &statuses, 9);
        assert_eq!(gen9.caught, 0);
        assert_eq!(gen9.total, 120);
    }

    #[test]
    fn type_distribution_covers_caught_only_and_sorts_desc() {
        let mut statuses = StatusMap::new();
        // Two Grass/Poison, one Fire; Squirtle stays uncaught
        pokedex::set_caught(&mut statuses, 1, true, now());
        pokedex::set_caught(&mut statuses, 2, true, now());
        pokedex::set_caught(&mut statuses, 4, true, now());

        let distribution = type_distribution(catalog::all(), &statuses);
        assert_eq!(distribution[0].type_name, "Grass");
        assert_eq!(distribution[0].count, 2);
        assert!((distribution[0].percentage - 66.666).abs() < 0.1);
        assert!(distribution.iter().all(|t| t.type_name != "Water"));
        for pair in distribution.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }
}
