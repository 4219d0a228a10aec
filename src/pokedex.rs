//! Per-user capture records
//!
//! A missing entry means the same thing as an all-false record, so lookups
//! go through [`status_of`] and mutations keep blank records harmless.

use crate::types::CaptureFlag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection state for one Pokémon. `caught` gates every other flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureStatus {
    pub caught: bool,
    pub shiny: bool,
    pub lucky: bool,
    pub shadow: bool,
    pub purified: bool,
    pub date_added: Option<DateTime<Utc>>,
}

impl CaptureStatus {
    pub fn flag(&self, flag: CaptureFlag) -> bool {
        match flag {
            CaptureFlag::Shiny => self.shiny,
            CaptureFlag::Lucky => self.lucky,
            CaptureFlag::Shadow => self.shadow,
            CaptureFlag::Purified => self.purified,
        }
    }

    fn flag_mut(&mut self, flag: CaptureFlag) -> &mut bool {
        match flag {
            CaptureFlag::Shiny => &mut self.shiny,
            CaptureFlag::Lucky => &mut self.lucky,
            CaptureFlag::Shadow => &mut self.shadow,
            CaptureFlag::Purified => &mut self.purified,
        }
    }
}

pub type StatusMap = HashMap<u32, CaptureStatus>;

/// Record for an id, defaulting to all-false when absent
pub fn status_of(statuses: &StatusMap, id: u32) -> CaptureStatus {
    statuses.get(&id).copied().unwrap_or_default()
}

/// Toggle the caught gate. Catching stamps `date_added` only on a real
/// false→true transition; uncatching resets the whole record in one step.
/// Returns whether anything changed.
pub fn set_caught(statuses: &mut StatusMap, id: u32, caught: bool, now: DateTime<Utc>) -> bool {
    if caught {
        let entry = statuses.entry(id).or_default();
        if entry.caught {
            return false;
        }
        entry.caught = true;
        entry.date_added = Some(now);
        true
    } else {
        match statuses.get_mut(&id) {
            Some(entry) if *entry != CaptureStatus::default() => {
                *entry = CaptureStatus::default();
                true
            }
            _ => false,
        }
    }
}

/// Set a post-capture flag. Rejected while the Pokémon is not caught.
/// Returns whether anything changed.
pub fn set_flag(statuses: &mut StatusMap, id: u32, flag: CaptureFlag, value: bool) -> bool {
    match statuses.get_mut(&id) {
        Some(entry) if entry.caught => {
            let slot = entry.flag_mut(flag);
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn absent_record_reads_as_all_false() {
        let statuses = StatusMap::new();
        let s = status_of(&statuses, 42);
        assert!(!s.caught && !s.shiny && !s.lucky && !s.shadow && !s.purified);
        assert!(s.date_added.is_none());
    }

    #[test]
    fn catching_stamps_date_once() {
        let mut statuses = StatusMap::new();
        assert!(set_caught(&mut statuses, 1, true, now()));
        let stamped = status_of(&statuses, 1).date_added;
        assert!(stamped.is_some());

        let later = now() + chrono::Duration::hours(2);
        assert!(!set_caught(&mut statuses, 1, true, later));
        assert_eq!(status_of(&statuses, 1).date_added, stamped);
    }

    #[test]
    fn uncatching_resets_everything_from_any_state() {
        // Every combination of the four derived flags
        for bits in 0u8..16 {
            let mut statuses = StatusMap::new();
            set_caught(&mut statuses, 7, true, now());
            for (i, flag) in CaptureFlag::ALL.iter().enumerate() {
                if bits & (1 << i) != 0 {
                    set_flag(&mut statuses, 7, *flag, true);
                }
            }

            set_caught(&mut statuses, 7, false, now());
            let s = status_of(&statuses, 7);
            assert_eq!(s, CaptureStatus::default(), "bits {:04b}", bits);
            assert!(s.date_added.is_none());
        }
    }

    #[test]
    fn flags_are_rejected_while_uncaught() {
        let mut statuses = StatusMap::new();
        assert!(!set_flag(&mut statuses, 9, CaptureFlag::Shiny, true));
        assert!(!status_of(&statuses, 9).shiny);

        set_caught(&mut statuses, 9, true, now());
        assert!(set_flag(&mut statuses, 9, CaptureFlag::Shiny, true));
        assert!(status_of(&statuses, 9).shiny);

        // Redundant writes report no change
        assert!(!set_flag(&mut statuses, 9, CaptureFlag::Shiny, true));
    }

    #[test]
    fn uncatching_a_blank_record_is_a_no_op() {
        let mut statuses = StatusMap::new();
        assert!(!set_caught(&mut statuses, 3, false, now()));
    }
}
