//! Static Pokémon catalog
//!
//! The catalog is built once at startup and never mutated. Entries carry
//! factual fields only; species without a curated entry get a neutral
//! placeholder name and stats derived from the dex number, so the data set
//! is stable across runs. `id` is the join key used everywhere else.

use crate::constants::{SPRITES_BASE_URL, TOTAL_POKEMON};
use std::sync::OnceLock;

pub const TYPE_NAMES: [&str; 18] = [
    "Normal", "Fire", "Water", "Electric", "Grass", "Ice", "Fighting", "Poison", "Ground",
    "Flying", "Psychic", "Bug", "Rock", "Ghost", "Dragon", "Dark", "Steel", "Fairy",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.hp + self.attack + self.defense + self.sp_attack + self.sp_defense + self.speed
    }
}

/// One catalog entry. Immutable for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<&'static str>,
    pub generation: u8,
    pub region: &'static str,
    pub height_m: f32,
    pub weight_kg: f32,
    pub category: String,
    pub abilities: Vec<&'static str>,
    pub stats: BaseStats,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub description: String,
}

impl Pokemon {
    pub fn sprite_url(&self) -> String {
        format!("{}/{}.png", SPRITES_BASE_URL, self.id)
    }

    pub fn shiny_sprite_url(&self) -> String {
        format!("{}/shiny/{}.png", SPRITES_BASE_URL, self.id)
    }
}

/// National Dex generation breakpoints
pub fn generation_for_id(id: u32) -> u8 {
    match id {
        0..=151 => 1,
        152..=251 => 2,
        252..=386 => 3,
        387..=493 => 4,
        494..=649 => 5,
        650..=721 => 6,
        722..=809 => 7,
        810..=905 => 8,
        _ => 9,
    }
}

pub fn region_for_generation(generation: u8) -> &'static str {
    match generation {
        1 => "Kanto",
        2 => "Johto",
        3 => "Hoenn",
        4 => "Sinnoh",
        5 => "Unova",
        6 => "Kalos",
        7 => "Alola",
        8 => "Galar",
        9 => "Paldea",
        _ => "Unknown",
    }
}

/// Inclusive dex-number range of a generation
pub fn generation_range(generation: u8) -> (u32, u32) {
    match generation {
        1 => (1, 151),
        2 => (152, 251),
        3 => (252, 386),
        4 => (387, 493),
        5 => (494, 649),
        6 => (650, 721),
        7 => (722, 809),
        8 => (810, 905),
        _ => (906, 1025),
    }
}

pub const GENERATIONS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

struct Notable {
    id: u32,
    name: &'static str,
    types: &'static [&'static str],
    category: &'static str,
    height_m: f32,
    weight_kg: f32,
    abilities: &'static [&'static str],
    stats: [u16; 6],
    is_legendary: bool,
    is_mythical: bool,
    description: &'static str,
}

/// Hand-curated species. Everything else is derived from the dex number.
const NOTABLE: &[Notable] = &[
    Notable {
        id: 1,
        name: "Bulbasaur",
        types: &["Grass", "Poison"],
        category: "Seed Pokémon",
        height_m: 0.7,
        weight_kg: 6.9,
        abilities: &["Overgrow", "Chlorophyll"],
        stats: [45, 49, 49, 65, 65, 45],
        is_legendary: false,
        is_mythical: false,
        description: "A seed on its back grows steadily by soaking up sunlight.",
    },
    Notable {
        id: 2,
        name: "Ivysaur",
        types: &["Grass", "Poison"],
        category: "Seed Pokémon",
        height_m: 1.0,
        weight_kg: 13.0,
        abilities: &["Overgrow", "Chlorophyll"],
        stats: [60, 62, 63, 80, 80, 60],
        is_legendary: false,
        is_mythical: false,
        description: "The bulb on its back grows heavy as it nears evolution.",
    },
    Notable {
        id: 3,
        name: "Venusaur",
        types: &["Grass", "Poison"],
        category: "Seed Pokémon",
        height_m: 2.0,
        weight_kg: 100.0,
        abilities: &["Overgrow", "Chlorophyll"],
        stats: [80, 82, 83, 100, 100, 80],
        is_legendary: false,
        is_mythical: false,
        description: "Its flower releases a soothing scent after rainy days.",
    },
    Notable {
        id: 4,
        name: "Charmander",
        types: &["Fire"],
        category: "Lizard Pokémon",
        height_m: 0.6,
        weight_kg: 8.5,
        abilities: &["Blaze", "Solar Power"],
        stats: [39, 52, 43, 60, 50, 65],
        is_legendary: false,
        is_mythical: false,
        description: "The flame on its tail shows the strength of its life force.",
    },
    Notable {
        id: 5,
        name: "Charmeleon",
        types: &["Fire"],
        category: "Flame Pokémon",
        height_m: 1.1,
        weight_kg: 19.0,
        abilities: &["Blaze", "Solar Power"],
        stats: [58, 64, 58, 80, 65, 80],
        is_legendary: false,
        is_mythical: false,
        description: "It has a barbaric nature; its claws and fiery tail are its weapons.",
    },
    Notable {
        id: 6,
        name: "Charizard",
        types: &["Fire", "Flying"],
        category: "Flame Pokémon",
        height_m: 1.7,
        weight_kg: 90.5,
        abilities: &["Blaze", "Solar Power"],
        stats: [78, 84, 78, 109, 85, 100],
        is_legendary: false,
        is_mythical: false,
        description: "Breathes fire hot enough to melt boulders, but never at weaker foes.",
    },
    Notable {
        id: 7,
        name: "Squirtle",
        types: &["Water"],
        category: "Tiny Turtle Pokémon",
        height_m: 0.5,
        weight_kg: 9.0,
        abilities: &["Torrent", "Rain Dish"],
        stats: [44, 48, 65, 50, 64, 43],
        is_legendary: false,
        is_mythical: false,
        description: "Its shell hardens soon after birth and softens blows.",
    },
    Notable {
        id: 8,
        name: "Wartortle",
        types: &["Water"],
        category: "Turtle Pokémon",
        height_m: 1.0,
        weight_kg: 22.5,
        abilities: &["Torrent", "Rain Dish"],
        stats: [59, 63, 80, 65, 80, 58],
        is_legendary: false,
        is_mythical: false,
        description: "A symbol of longevity; algae on its tail marks its age.",
    },
    Notable {
        id: 9,
        name: "Blastoise",
        types: &["Water"],
        category: "Shellfish Pokémon",
        height_m: 1.6,
        weight_kg: 85.5,
        abilities: &["Torrent", "Rain Dish"],
        stats: [79, 83, 100, 85, 105, 78],
        is_legendary: false,
        is_mythical: false,
        description: "Pressurized water jets on its shell strike with pinpoint accuracy.",
    },
    Notable {
        id: 25,
        name: "Pikachu",
        types: &["Electric"],
        category: "Mouse Pokémon",
        height_m: 0.4,
        weight_kg: 6.0,
        abilities: &["Static", "Lightning Rod"],
        stats: [35, 55, 40, 50, 50, 90],
        is_legendary: false,
        is_mythical: false,
        description: "Groups of them can build up enough electricity to cause storms.",
    },
    Notable {
        id: 133,
        name: "Eevee",
        types: &["Normal"],
        category: "Evolution Pokémon",
        height_m: 0.3,
        weight_kg: 6.5,
        abilities: &["Run Away", "Adaptability"],
        stats: [55, 55, 50, 45, 65, 55],
        is_legendary: false,
        is_mythical: false,
        description: "Its unstable genetic makeup lets it evolve in many directions.",
    },
    Notable {
        id: 144,
        name: "Articuno",
        types: &["Ice", "Flying"],
        category: "Freeze Pokémon",
        height_m: 1.7,
        weight_kg: 55.4,
        abilities: &["Pressure"],
        stats: [90, 85, 100, 95, 125, 85],
        is_legendary: true,
        is_mythical: false,
        description: "A legendary bird said to appear before doomed travelers in icy mountains.",
    },
    Notable {
        id: 145,
        name: "Zapdos",
        types: &["Electric", "Flying"],
        category: "Electric Pokémon",
        height_m: 1.6,
        weight_kg: 52.6,
        abilities: &["Pressure"],
        stats: [90, 90, 85, 125, 90, 100],
        is_legendary: true,
        is_mythical: false,
        description: "A legendary bird that gains power when struck by lightning.",
    },
    Notable {
        id: 146,
        name: "Moltres",
        types: &["Fire", "Flying"],
        category: "Flame Pokémon",
        height_m: 2.0,
        weight_kg: 60.0,
        abilities: &["Pressure"],
        stats: [90, 100, 90, 125, 85, 90],
        is_legendary: true,
        is_mythical: false,
        description: "A legendary bird whose appearance is said to herald spring.",
    },
    Notable {
        id: 150,
        name: "Mewtwo",
        types: &["Psychic"],
        category: "Genetic Pokémon",
        height_m: 2.0,
        weight_kg: 122.0,
        abilities: &["Pressure", "Unnerve"],
        stats: [106, 110, 90, 154, 90, 130],
        is_legendary: true,
        is_mythical: false,
        description: "Created by genetic manipulation; its heart remained untouched by science.",
    },
    Notable {
        id: 151,
        name: "Mew",
        types: &["Psychic"],
        category: "New Species Pokémon",
        height_m: 0.4,
        weight_kg: 4.0,
        abilities: &["Synchronize"],
        stats: [100, 100, 100, 100, 100, 100],
        is_legendary: false,
        is_mythical: true,
        description: "Said to carry the genetic codes of every Pokémon.",
    },
    Notable {
        id: 152,
        name: "Chikorita",
        types: &["Grass"],
        category: "Leaf Pokémon",
        height_m: 0.9,
        weight_kg: 6.4,
        abilities: &["Overgrow", "Leaf Guard"],
        stats: [45, 49, 65, 49, 65, 45],
        is_legendary: false,
        is_mythical: false,
        description: "It waves the leaf on its head to check the humidity and temperature.",
    },
    Notable {
        id: 249,
        name: "Lugia",
        types: &["Psychic", "Flying"],
        category: "Diving Pokémon",
        height_m: 5.2,
        weight_kg: 216.0,
        abilities: &["Pressure", "Multiscale"],
        stats: [106, 90, 130, 90, 154, 110],
        is_legendary: true,
        is_mythical: false,
        description: "It sleeps in a deep-sea trench because its powers are too strong.",
    },
    Notable {
        id: 251,
        name: "Celebi",
        types: &["Psychic", "Grass"],
        category: "Time Travel Pokémon",
        height_m: 0.6,
        weight_kg: 5.0,
        abilities: &["Natural Cure"],
        stats: [100, 100, 100, 100, 100, 100],
        is_legendary: false,
        is_mythical: true,
        description: "A mythical guardian of the forest that wanders across time.",
    },
    Notable {
        id: 384,
        name: "Rayquaza",
        types: &["Dragon", "Flying"],
        category: "Sky High Pokémon",
        height_m: 7.0,
        weight_kg: 206.5,
        abilities: &["Air Lock"],
        stats: [105, 150, 90, 150, 90, 95],
        is_legendary: true,
        is_mythical: false,
        description: "It lives in the ozone layer, descending only to quell clashing titans.",
    },
];

/// Single-type pattern cycled over the dex number for non-curated species
fn derived_types(id: u32) -> Vec<&'static str> {
    vec![TYPE_NAMES[(id as usize) % TYPE_NAMES.len()]]
}

/// Deterministic placeholder stats. Same formula every run, no randomness.
fn derived_stats(id: u32) -> BaseStats {
    let base = 50 + (id % 30) as u16;
    BaseStats {
        hp: base + ((id * 7) % 40) as u16,
        attack: base + ((id * 13) % 40) as u16,
        defense: base + ((id * 17) % 40) as u16,
        sp_attack: base + ((id * 23) % 40) as u16,
        sp_defense: base + ((id * 29) % 40) as u16,
        speed: base + ((id * 31) % 40) as u16,
    }
}

fn derived_entry(id: u32) -> Pokemon {
    let generation = generation_for_id(id);
    Pokemon {
        id,
        name: format!("Pokemon{}", id),
        types: derived_types(id),
        generation,
        region: region_for_generation(generation),
        height_m: 0.3 + (id % 20) as f32 / 10.0,
        weight_kg: 5.0 + (id % 50) as f32 * 1.3,
        category: "Pokémon".to_string(),
        abilities: Vec::new(),
        stats: derived_stats(id),
        is_legendary: false,
        is_mythical: false,
        description: String::new(),
    }
}

fn build_catalog() -> Vec<Pokemon> {
    (1..=TOTAL_POKEMON)
        .map(|id| match NOTABLE.iter().find(|n| n.id == id) {
            Some(n) => {
                let generation = generation_for_id(n.id);
                Pokemon {
                    id: n.id,
                    name: n.name.to_string(),
                    types: n.types.to_vec(),
                    generation,
                    region: region_for_generation(generation),
                    height_m: n.height_m,
                    weight_kg: n.weight_kg,
                    category: n.category.to_string(),
                    abilities: n.abilities.to_vec(),
                    stats: BaseStats {
                        hp: n.stats[0],
                        attack: n.stats[1],
                        defense: n.stats[2],
                        sp_attack: n.stats[3],
                        sp_defense: n.stats[4],
                        speed: n.stats[5],
                    },
                    is_legendary: n.is_legendary,
                    is_mythical: n.is_mythical,
                    description: n.description.to_string(),
                }
            }
            None => derived_entry(id),
        })
        .collect()
}

/// The full catalog, built on first access
pub fn all() -> &'static [Pokemon] {
    static CATALOG: OnceLock<Vec<Pokemon>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

/// Lookup by dex number. Ids are contiguous so this is an index.
pub fn by_id(id: u32) -> Option<&'static Pokemon> {
    if id == 0 {
        return None;
    }
    all().get(id as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_full_dex_in_order() {
        let catalog = all();
        assert_eq!(catalog.len(), TOTAL_POKEMON as usize);
        for (i, p) in catalog.iter().enumerate() {
            assert_eq!(p.id, i as u32 + 1);
        }
    }

    #[test]
    fn generation_breakpoints() {
        assert_eq!(generation_for_id(1), 1);
        assert_eq!(generation_for_id(151), 1);
        assert_eq!(generation_for_id(152), 2);
        assert_eq!(generation_for_id(251), 2);
        assert_eq!(generation_for_id(252), 3);
        assert_eq!(generation_for_id(386), 3);
        assert_eq!(generation_for_id(387), 4);
        assert_eq!(generation_for_id(493), 4);
        assert_eq!(generation_for_id(494), 5);
        assert_eq!(generation_for_id(649), 5);
        assert_eq!(generation_for_id(650), 6);
        assert_eq!(generation_for_id(721), 6);
        assert_eq!(generation_for_id(722), 7);
        assert_eq!(generation_for_id(809), 7);
        assert_eq!(generation_for_id(810), 8);
        assert_eq!(generation_for_id(905), 8);
        assert_eq!(generation_for_id(906), 9);
        assert_eq!(generation_for_id(1025), 9);
    }

    #[test]
    fn generation_ranges_tile_the_dex() {
        let mut next = 1;
        for gen in GENERATIONS {
            let (first, last) = generation_range(gen);
            assert_eq!(first, next);
            assert!(last >= first);
            next = last + 1;
        }
        assert_eq!(next, TOTAL_POKEMON + 1);
    }

    #[test]
    fn curated_entries_resolve() {
        let pikachu = by_id(25).unwrap();
        assert_eq!(pikachu.name, "Pikachu");
        assert_eq!(pikachu.types, vec!["Electric"]);
        assert_eq!(pikachu.region, "Kanto");

        let chikorita = by_id(152).unwrap();
        assert_eq!(chikorita.generation, 2);
        assert!(chikorita.types.contains(&"Grass"));

        assert!(by_id(150).unwrap().is_legendary);
        assert!(by_id(151).unwrap().is_mythical);
        assert!(by_id(0).is_none());
    }

    #[test]
    fn derived_entries_are_deterministic() {
        let a = derived_entry(600);
        let b = derived_entry(600);
        assert_eq!(a.stats.total(), b.stats.total());
        assert_eq!(a.types, b.types);
        assert_eq!(a.name, "Pokemon600");
    }
}
