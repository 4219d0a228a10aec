//! Achievement definitions and progress evaluation
//!
//! Achievements are a static table; progress is a deterministic function of
//! the catalog and the user's capture records, so there is nothing to
//! persist. Unlocks fall out of the collection itself.

use crate::catalog::Pokemon;
use crate::pokedex::{status_of, StatusMap};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    Capture,
    Collection,
    Rarity,
    Special,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Capture,
        Category::Collection,
        Category::Rarity,
        Category::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Capture => "Capture",
            Category::Collection => "Collection",
            Category::Rarity => "Rarity",
            Category::Special => "Special",
        }
    }
}

/// What an achievement measures
#[derive(Clone, Copy, Debug)]
enum Metric {
    TotalCaught,
    TotalShiny,
    TotalLucky,
    TotalPurified,
    CaughtOfType(&'static str),
    CaughtInGeneration(u8),
    CaughtLegendary,
    CaughtMythical,
    CaughtSet(&'static [u32]),
}

pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub target: usize,
    pub points: u32,
    metric: Metric,
}

/// Eevee and every evolution
const EEVEE_LINE: &[u32] = &[133, 134, 135, 136, 196, 197, 470, 471, 700];
/// The legendary birds of Kanto
const KANTO_BIRDS: &[u32] = &[144, 145, 146];

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "capture_1",
        name: "First Catch",
        description: "Catch your first Pokémon.",
        category: Category::Capture,
        target: 1,
        points: 10,
        metric: Metric::TotalCaught,
    },
    Achievement {
        id: "capture_10",
        name: "Getting Started",
        description: "Catch 10 different Pokémon.",
        category: Category::Capture,
        target: 10,
        points: 20,
        metric: Metric::TotalCaught,
    },
    Achievement {
        id: "capture_100",
        name: "Centurion",
        description: "Catch 100 different Pokémon.",
        category: Category::Capture,
        target: 100,
        points: 100,
        metric: Metric::TotalCaught,
    },
    Achievement {
        id: "capture_500",
        name: "Half the Dex",
        description: "Catch 500 different Pokémon.",
        category: Category::Capture,
        target: 500,
        points: 250,
        metric: Metric::TotalCaught,
    },
    Achievement {
        id: "capture_water_10",
        name: "Junior Water Master",
        description: "Catch 10 Water-type Pokémon.",
        category: Category::Capture,
        target: 10,
        points: 30,
        metric: Metric::CaughtOfType("Water"),
    },
    Achievement {
        id: "capture_fire_10",
        name: "Junior Flame Tamer",
        description: "Catch 10 Fire-type Pokémon.",
        category: Category::Capture,
        target: 10,
        points: 30,
        metric: Metric::CaughtOfType("Fire"),
    },
    Achievement {
        id: "capture_grass_10",
        name: "Junior Gardener",
        description: "Catch 10 Grass-type Pokémon.",
        category: Category::Capture,
        target: 10,
        points: 30,
        metric: Metric::CaughtOfType("Grass"),
    },
    Achievement {
        id: "collection_kanto_50",
        name: "Kanto Collector",
        description: "Register 50 Pokémon from the Kanto region.",
        category: Category::Collection,
        target: 50,
        points: 50,
        metric: Metric::CaughtInGeneration(1),
    },
    Achievement {
        id: "collection_johto_30",
        name: "Johto Collector",
        description: "Register 30 Pokémon from the Johto region.",
        category: Category::Collection,
        target: 30,
        points: 50,
        metric: Metric::CaughtInGeneration(2),
    },
    Achievement {
        id: "collection_kanto_full",
        name: "Kanto Completionist",
        description: "Register all 151 Pokémon from the Kanto region.",
        category: Category::Collection,
        target: 151,
        points: 300,
        metric: Metric::CaughtInGeneration(1),
    },
    Achievement {
        id: "collection_eevee_line",
        name: "Eevee Master",
        description: "Catch Eevee and every one of its evolutions.",
        category: Category::Collection,
        target: EEVEE_LINE.len(),
        points: 150,
        metric: Metric::CaughtSet(EEVEE_LINE),
    },
    Achievement {
        id: "collection_living_dex",
        name: "Living Dex",
        description: "Catch every Pokémon in the National Dex.",
        category: Category::Collection,
        target: 1025,
        points: 1000,
        metric: Metric::TotalCaught,
    },
    Achievement {
        id: "rarity_shiny_1",
        name: "Rare Sparkle",
        description: "Catch your first shiny Pokémon.",
        category: Category::Rarity,
        target: 1,
        points: 50,
        metric: Metric::TotalShiny,
    },
    Achievement {
        id: "rarity_shiny_10",
        name: "Shiny Hunter",
        description: "Catch 10 shiny Pokémon.",
        category: Category::Rarity,
        target: 10,
        points: 150,
        metric: Metric::TotalShiny,
    },
    Achievement {
        id: "rarity_lucky_1",
        name: "Lucky Friend",
        description: "Get your first lucky Pokémon.",
        category: Category::Rarity,
        target: 1,
        points: 40,
        metric: Metric::TotalLucky,
    },
    Achievement {
        id: "rarity_purified_5",
        name: "Purifier",
        description: "Purify 5 shadow Pokémon.",
        category: Category::Rarity,
        target: 5,
        points: 60,
        metric: Metric::TotalPurified,
    },
    Achievement {
        id: "special_legendary_1",
        name: "Legend Hunter",
        description: "Catch your first legendary Pokémon.",
        category: Category::Special,
        target: 1,
        points: 200,
        metric: Metric::CaughtLegendary,
    },
    Achievement {
        id: "special_mythical_1",
        name: "Myth Made Real",
        description: "Catch your first mythical Pokémon.",
        category: Category::Special,
        target: 1,
        points: 200,
        metric: Metric::CaughtMythical,
    },
    Achievement {
        id: "special_kanto_birds",
        name: "Winged Mirages",
        description: "Catch Articuno, Zapdos and Moltres.",
        category: Category::Special,
        target: KANTO_BIRDS.len(),
        points: 250,
        metric: Metric::CaughtSet(KANTO_BIRDS),
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub current: usize,
    pub target: usize,
    pub unlocked: bool,
    /// 0.0..=1.0 for progress bars
    pub fraction: f32,
}

fn metric_value(metric: Metric, catalog: &[Pokemon], statuses: &StatusMap) -> usize {
    match metric {
        Metric::TotalCaught => catalog
            .iter()
            .filter(|p| status_of(statuses, p.id).caught)
            .count(),
        Metric::TotalShiny => catalog
            .iter()
            .filter(|p| status_of(statuses, p.id).shiny)
            .count(),
        Metric::TotalLucky => catalog
            .iter()
            .filter(|p| status_of(statuses, p.id).lucky)
            .count(),
        Metric::TotalPurified => catalog
            .iter()
            .filter(|p| status_of(statuses, p.id).purified)
            .count(),
        Metric::CaughtOfType(tag) => catalog
            .iter()
            .filter(|p| p.types.contains(&tag) && status_of(statuses, p.id).caught)
            .count(),
        Metric::CaughtInGeneration(generation) => catalog
            .iter()
            .filter(|p| p.generation == generation && status_of(statuses, p.id).caught)
            .count(),
        Metric::CaughtLegendary => catalog
            .iter()
            .filter(|p| p.is_legendary && status_of(statuses, p.id).caught)
            .count(),
        Metric::CaughtMythical => catalog
            .iter()
            .filter(|p| p.is_mythical && status_of(statuses, p.id).caught)
            .count(),
        Metric::CaughtSet(ids) => ids
            .iter()
            .filter(|&&id| status_of(statuses, id).caught)
            .count(),
    }
}

impl Achievement {
    pub fn progress(&self, catalog: &[Pokemon], statuses: &StatusMap) -> Progress {
        let current = metric_value(self.metric, catalog, statuses);
        Progress {
            current,
            target: self.target,
            unlocked: current >= self.target,
            fraction: (current as f32 / self.target as f32).min(1.0),
        }
    }
}

/// Points earned from unlocked achievements
pub fn total_points(catalog: &[Pokemon], statuses: &StatusMap) -> u32 {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.progress(catalog, statuses).unlocked)
        .map(|a| a.points)
        .sum()
}

pub fn unlocked_count(catalog: &[Pokemon], statuses: &StatusMap) -> usize {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.progress(catalog, statuses).unlocked)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::pokedex;
    use crate::types::CaptureFlag;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    fn by_id(id: &str) -> &'static Achievement {
        ACHIEVEMENTS.iter().find(|a| a.id == id).unwrap()
    }

    #[test]
    fn first_catch_unlocks_on_one() {
        let mut statuses = StatusMap::new();
        let ach = by_id("capture_1");
        assert!(!ach.progress(catalog::all(), &statuses).unlocked);

        pokedex::set_caught(&mut statuses, 7, true, now());
        let progress = ach.progress(catalog::all(), &statuses);
        assert!(progress.unlocked);
        assert_eq!(progress.current, 1);
        assert_eq!(progress.fraction, 1.0);
    }

    #[test]
    fn type_metric_counts_caught_members_only() {
        let mut statuses = StatusMap::new();
        pokedex::set_caught(&mut statuses, 7, true, now()); // Squirtle, Water
        pokedex::set_caught(&mut statuses, 4, true, now()); // Charmander, Fire

        let water = by_id("capture_water_10").progress(catalog::all(), &statuses);
        assert_eq!(water.current, 1);
        assert!(!water.unlocked);
        assert!((water.fraction - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn set_metric_needs_every_member() {
        let mut statuses = StatusMap::new();
        for &id in &[144, 145] {
            pokedex::set_caught(&mut statuses, id, true, now());
        }
        let birds = by_id("special_kanto_birds").progress(catalog::all(), &statuses);
        assert_eq!(birds.current, 2);
        assert!(!birds.unlocked);

        pokedex::set_caught(&mut statuses, 146, true, now());
        assert!(by_id("special_kanto_birds")
            .progress(catalog::all(), &statuses)
            .unlocked);
    }

    #[test]
    fn rarity_metrics_follow_flags() {
        let mut statuses = StatusMap::new();
        pokedex::set_caught(&mut statuses, 25, true, now());
        pokedex::set_flag(&mut statuses, 25, CaptureFlag::Shiny, true);

        assert!(by_id("rarity_shiny_1")
            .progress(catalog::all(), &statuses)
            .unlocked);

        // Uncatching strips the flag, which locks the achievement again
        pokedex::set_caught(&mut statuses, 25, false, now());
        assert!(!by_id("rarity_shiny_1")
            .progress(catalog::all(), &statuses)
            .unlocked);
    }

    #[test]
    fn points_sum_over_unlocked_only() {
        let mut statuses = StatusMap::new();
        assert_eq!(total_points(catalog::all(), &statuses), 0);

        pokedex::set_caught(&mut statuses, 150, true, now()); // legendary
        let points = total_points(catalog::all(), &statuses);
        // First catch (10) + first legendary (200)
        assert_eq!(points, 210);
        assert_eq!(unlocked_count(catalog::all(), &statuses), 2);
    }
}
