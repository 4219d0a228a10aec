//! Pokédex filtering logic

use super::App;
use crate::catalog::{Pokemon, TYPE_NAMES};
use crate::constants::{KEY_FILTER_STATUS, KEY_FILTER_TYPE};
use crate::pokedex::{status_of, StatusMap};
use crate::types::StatusFilter;
use tracing::warn;

/// Active filter axes. Every axis defaults to "no constraint" and all
/// active axes combine with AND.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub search: String,
    pub generation: Option<u8>,
    pub ptype: Option<&'static str>,
    pub status: StatusFilter,
}

impl FilterSpec {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.generation.is_some()
            || self.ptype.is_some()
            || self.status != StatusFilter::All
    }

    pub fn clear(&mut self) {
        *self = FilterSpec::default();
    }
}

/// Resolve a stored/typed type tag against the known set. Unrecognized
/// tags impose no constraint rather than erroring.
pub fn parse_type(tag: &str) -> Option<&'static str> {
    TYPE_NAMES.iter().find(|t| t.eq_ignore_ascii_case(tag)).copied()
}

/// Single pass over the catalog, cheapest predicates first. Returns
/// positions into `catalog`, preserving its order.
pub fn filter_catalog(catalog: &[Pokemon], statuses: &StatusMap, spec: &FilterSpec) -> Vec<usize> {
    let query = spec.search.trim().to_lowercase();

    catalog
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            if !query.is_empty() && !p.name.to_lowercase().contains(&query) {
                return None;
            }

            if let Some(generation) = spec.generation {
                if p.generation != generation {
                    return None;
                }
            }

            if let Some(tag) = spec.ptype {
                if !p.types.iter().any(|t| *t == tag) {
                    return None;
                }
            }

            if spec.status != StatusFilter::All {
                let status = status_of(statuses, p.id);
                let keep = match spec.status {
                    StatusFilter::All => true,
                    StatusFilter::Caught => status.caught,
                    StatusFilter::Missing => !status.caught,
                    StatusFilter::Shiny => status.shiny,
                    StatusFilter::Lucky => status.lucky,
                };
                if !keep {
                    return None;
                }
            }

            Some(i)
        })
        .collect()
}

impl App {
    /// Recompute the filtered view and drop the windowing back to its
    /// initial position. Runs on every filter edit.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter_catalog(self.catalog, &self.statuses, &self.filters);
        self.pager.reset();
        self.persist_filters();
    }

    /// Remember the categorical axes across launches. Search text is not
    /// worth restoring.
    fn persist_filters(&self) {
        if let Err(e) = self.db.set_setting(KEY_FILTER_STATUS, self.filters.status.key()) {
            warn!(error = %e, "Failed to persist status filter");
        }
        let tag = self.filters.ptype.unwrap_or("all");
        if let Err(e) = self.db.set_setting(KEY_FILTER_TYPE, tag) {
            warn!(error = %e, "Failed to persist type filter");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::pokedex;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    /// Bulbasaur caught shiny, Charmander missing, Chikorita caught
    fn worked_statuses() -> StatusMap {
        let mut statuses = StatusMap::new();
        pokedex::set_caught(&mut statuses, 1, true, now());
        pokedex::set_flag(&mut statuses, 1, crate::types::CaptureFlag::Shiny, true);
        pokedex::set_caught(&mut statuses, 152, true, now());
        statuses
    }

    #[test]
    fn grass_and_caught_keeps_order() {
        let statuses = worked_statuses();
        let spec = FilterSpec {
            ptype: Some("Grass"),
            status: StatusFilter::Caught,
            ..Default::default()
        };

        let ids: Vec<u32> = filter_catalog(catalog::all(), &statuses, &spec)
            .into_iter()
            .map(|i| catalog::all()[i].id)
            .collect();
        assert_eq!(ids, vec![1, 152]);
    }

    #[test]
    fn conjunction_equals_intersection_of_axes() {
        let statuses = worked_statuses();
        let catalog = catalog::all();

        let by_type = FilterSpec {
            ptype: Some("Grass"),
            ..Default::default()
        };
        let by_status = FilterSpec {
            status: StatusFilter::Caught,
            ..Default::default()
        };
        let combined = FilterSpec {
            ptype: Some("Grass"),
            status: StatusFilter::Caught,
            ..Default::default()
        };

        let a = filter_catalog(catalog, &statuses, &by_type);
        let b = filter_catalog(catalog, &statuses, &by_status);
        let both = filter_catalog(catalog, &statuses, &combined);

        let intersection: Vec<usize> =
            a.iter().copied().filter(|i| b.contains(i)).collect();
        assert_eq!(both, intersection);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let statuses = StatusMap::new();
        let spec = FilterSpec {
            search: "CHAR".to_string(),
            ..Default::default()
        };
        let names: Vec<&str> = filter_catalog(catalog::all(), &statuses, &spec)
            .into_iter()
            .map(|i| catalog::all()[i].name.as_str())
            .collect();
        assert!(names.contains(&"Charmander"));
        assert!(names.contains(&"Charizard"));
        assert!(!names.contains(&"Bulbasaur"));
    }

    #[test]
    fn generation_axis_matches_breakpoints() {
        let statuses = StatusMap::new();
        let spec = FilterSpec {
            generation: Some(2),
            ..Default::default()
        };
        let indices = filter_catalog(catalog::all(), &statuses, &spec);
        assert_eq!(indices.len(), 100);
        assert!(indices
            .iter()
            .all(|&i| catalog::all()[i].generation == 2));
    }

    #[test]
    fn missing_is_the_complement_of_caught() {
        let statuses = worked_statuses();
        let catalog = catalog::all();

        let caught = filter_catalog(
            catalog,
            &statuses,
            &FilterSpec {
                status: StatusFilter::Caught,
                ..Default::default()
            },
        );
        let missing = filter_catalog(
            catalog,
            &statuses,
            &FilterSpec {
                status: StatusFilter::Missing,
                ..Default::default()
            },
        );
        assert_eq!(caught.len() + missing.len(), catalog.len());
        assert!(caught.iter().all(|i| !missing.contains(i)));
    }

    #[test]
    fn no_match_yields_an_empty_list() {
        let statuses = StatusMap::new();
        let spec = FilterSpec {
            search: "zzzzzz".to_string(),
            ..Default::default()
        };
        assert!(filter_catalog(catalog::all(), &statuses, &spec).is_empty());
    }

    #[test]
    fn stale_filter_values_impose_no_constraint() {
        assert_eq!(parse_type("grass"), Some("Grass"));
        assert_eq!(parse_type("Cosmic"), None);
        assert_eq!(parse_type("all"), None);
        assert_eq!(StatusFilter::from_key("favourites"), StatusFilter::All);
    }

    #[test]
    fn status_keys_round_trip() {
        for status in StatusFilter::ALL {
            assert_eq!(StatusFilter::from_key(status.key()), status);
        }
    }
}
