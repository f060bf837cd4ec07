//! Board presets: the resource and token lists a standard board is built from.
//!
//! Lists are positional, in the hex order of [`hexes_in_radius`] for radius 2,
//! so index 9 is always the center hex. Fixed presets put the desert there;
//! `random-balanced` shuffles everything from a seed and keeps 6s and 8s apart.

use crate::board::{LayoutParams, Terrain, STANDARD_RADIUS};
use crate::hex::{hexes_in_radius, HexCoord};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of hexes on a standard board
pub const STANDARD_HEX_COUNT: usize = 19;

/// Index of the center hex on a standard board
pub const CENTER_INDEX: usize = 9;

/// Give up on random token placement after this many tries
const MAX_TOKEN_ATTEMPTS: usize = 220;

/// Dice tokens of the base game (no 7)
const TOKEN_BAG: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// Token layout shared by every fixed preset
const FIXED_TOKENS: [Option<u8>; STANDARD_HEX_COUNT] = [
    Some(5),
    Some(2),
    Some(6),
    Some(3),
    Some(8),
    Some(10),
    Some(9),
    Some(12),
    Some(11),
    None,
    Some(4),
    Some(8),
    Some(10),
    Some(9),
    Some(4),
    Some(5),
    Some(6),
    Some(3),
    Some(11),
];

/// Errors that can occur when building a preset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("A seed is required for the random-balanced preset")]
    MissingSeed,

    #[error("Failed to place tokens after {attempts} attempts")]
    TokenPlacementFailed { attempts: usize },

    #[error("Preset {id} is invalid: {reason}")]
    InvalidPreset { id: &'static str, reason: &'static str },
}

/// Known presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PresetId {
    #[default]
    ClassicBalanced,
    TradeHeavy,
    SheepWheatBoom,
    HighOre,
    HighBrickWood,
    RandomBalanced,
}

impl PresetId {
    /// All presets in menu order
    pub const ALL: [PresetId; 6] = [
        PresetId::ClassicBalanced,
        PresetId::TradeHeavy,
        PresetId::SheepWheatBoom,
        PresetId::HighOre,
        PresetId::HighBrickWood,
        PresetId::RandomBalanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetId::ClassicBalanced => "classic-balanced",
            PresetId::TradeHeavy => "trade-heavy",
            PresetId::SheepWheatBoom => "sheep-wheat-boom",
            PresetId::HighOre => "high-ore",
            PresetId::HighBrickWood => "high-brick-wood",
            PresetId::RandomBalanced => "random-balanced",
        }
    }

    /// Display name for menus
    pub fn name(&self) -> &'static str {
        match self {
            PresetId::ClassicBalanced => "Classic Balanced",
            PresetId::TradeHeavy => "Trade Heavy",
            PresetId::SheepWheatBoom => "Sheep/Wheat Boom",
            PresetId::HighOre => "High Ore",
            PresetId::HighBrickWood => "Brick/Wood Rush",
            PresetId::RandomBalanced => "Random (Balanced-ish)",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == id)
    }
}

/// Menu entry for a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetMeta {
    pub id: PresetId,
    pub name: String,
}

/// All presets as menu entries
pub fn preset_catalog() -> Vec<PresetMeta> {
    PresetId::ALL
        .into_iter()
        .map(|id| PresetMeta {
            id,
            name: id.name().to_string(),
        })
        .collect()
}

/// Resource and token assignment for a standard board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDefinition {
    pub id: PresetId,
    pub name: String,
    pub resources: Vec<Terrain>,
    pub tokens: Vec<Option<u8>>,
    pub desert_index: usize,
    /// Only set for random presets
    pub seed: Option<String>,
}

impl PresetDefinition {
    /// Layout parameters for generating this preset's board
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::standard(self.resources.clone(), self.tokens.clone())
    }
}

/// Look up a preset by ID.
///
/// Unknown IDs fall back to `classic-balanced`. `seed` is only used (and then
/// required) by `random-balanced`.
pub fn preset_definition(id: &str, seed: Option<&str>) -> Result<PresetDefinition, PresetError> {
    let preset = PresetId::parse(id).unwrap_or_else(|| {
        warn!("Unknown preset {:?}, falling back to classic-balanced", id);
        PresetId::ClassicBalanced
    });

    match preset {
        PresetId::RandomBalanced => random_balanced(seed.unwrap_or_default()),
        fixed => fixed_preset(fixed),
    }
}

fn fixed_preset(id: PresetId) -> Result<PresetDefinition, PresetError> {
    use Terrain::{Brick, Desert, Ore, Sheep, Wheat, Wood};

    let resources: [Terrain; STANDARD_HEX_COUNT] = match id {
        PresetId::TradeHeavy => [
            Wood, Brick, Sheep, Wheat, Ore, Wood, Brick, Ore, Wheat, Desert, Ore, Wood, Brick,
            Sheep, Wheat, Wood, Wheat, Sheep, Sheep,
        ],
        PresetId::SheepWheatBoom => [
            Wood, Ore, Sheep, Brick, Wheat, Sheep, Sheep, Ore, Wood, Desert, Ore, Wheat, Sheep,
            Wheat, Brick, Wood, Wheat, Brick, Wood,
        ],
        PresetId::HighOre => [
            Wheat, Ore, Wheat, Sheep, Ore, Ore, Sheep, Wood, Brick, Desert, Wood, Brick, Wood,
            Brick, Sheep, Wheat, Wood, Sheep, Wheat,
        ],
        PresetId::HighBrickWood => [
            Brick, Wood, Brick, Wood, Wood, Brick, Wood, Wheat, Ore, Desert, Ore, Wheat, Sheep,
            Wheat, Sheep, Wheat, Sheep, Sheep, Ore,
        ],
        _ => [
            Wood, Brick, Sheep, Wheat, Ore, Wood, Brick, Sheep, Wheat, Desert, Ore, Wood, Brick,
            Sheep, Wheat, Ore, Wood, Sheep, Wheat,
        ],
    };

    if resources[CENTER_INDEX] != Desert {
        return Err(PresetError::InvalidPreset {
            id: id.as_str(),
            reason: "center hex must be desert",
        });
    }
    if FIXED_TOKENS[CENTER_INDEX].is_some() {
        return Err(PresetError::InvalidPreset {
            id: id.as_str(),
            reason: "center token must be empty",
        });
    }

    Ok(PresetDefinition {
        id,
        name: id.name().to_string(),
        resources: resources.to_vec(),
        tokens: FIXED_TOKENS.to_vec(),
        desert_index: CENTER_INDEX,
        seed: None,
    })
}

/// RNG seeded from a string (FNV-1a hash)
pub fn seeded_rng(seed: &str) -> StdRng {
    let hash = seed.bytes().fold(2_166_136_261_u32, |h, byte| {
        (h ^ u32::from(byte)).wrapping_mul(16_777_619)
    });
    StdRng::seed_from_u64(u64::from(hash))
}

fn is_hot(token: u8) -> bool {
    token == 6 || token == 8
}

/// Outer-ring hexes on a straight axis from the center
fn is_corner_hex(coord: &HexCoord) -> bool {
    coord.ring() == 2 && (coord.q == 0 || coord.r == 0 || coord.s() == 0)
}

/// For every hex index, the indices of its on-board neighbors
fn neighbor_indices(coords: &[HexCoord]) -> Vec<Vec<usize>> {
    let index_by_coord: HashMap<HexCoord, usize> =
        coords.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    coords
        .iter()
        .map(|c| {
            let mut list: Vec<usize> = c
                .neighbors()
                .iter()
                .filter_map(|n| index_by_coord.get(n).copied())
                .collect();
            list.sort_unstable();
            list
        })
        .collect()
}

/// Weighted toward the middle; never a corner hex
fn choose_desert_index<R: Rng>(coords: &[HexCoord], rng: &mut R) -> usize {
    let candidates: Vec<(usize, u32)> = coords
        .iter()
        .enumerate()
        .filter(|(_, c)| !is_corner_hex(c))
        .map(|(i, c)| {
            let weight = match c.ring() {
                0 => 3,
                1 => 2,
                _ => 1,
            };
            (i, weight)
        })
        .collect();

    candidates
        .choose_weighted(rng, |&(_, weight)| weight)
        .map(|&(i, _)| i)
        .unwrap_or(CENTER_INDEX)
}

fn can_place(token: u8, idx: usize, neighbors: &[Vec<usize>], tokens: &[Option<u8>]) -> bool {
    !is_hot(token)
        || !neighbors[idx]
            .iter()
            .any(|&n| tokens[n].is_some_and(is_hot))
}

fn place_tokens<R: Rng>(
    ordered: &[u8],
    open: &[usize],
    neighbors: &[Vec<usize>],
    tokens: &mut [Option<u8>],
    rng: &mut R,
) -> bool {
    let Some((&token, rest)) = ordered.split_first() else {
        return true;
    };

    let mut viable: Vec<usize> = open
        .iter()
        .copied()
        .filter(|&idx| can_place(token, idx, neighbors, tokens))
        .collect();
    viable.shuffle(rng);

    for idx in viable {
        tokens[idx] = Some(token);
        let remaining: Vec<usize> = open.iter().copied().filter(|&i| i != idx).collect();
        if place_tokens(rest, &remaining, neighbors, tokens, rng) {
            return true;
        }
        tokens[idx] = None;
    }

    false
}

/// One randomized backtracking pass; hot tokens go down first
fn try_assign_tokens<R: Rng>(
    neighbors: &[Vec<usize>],
    desert_index: usize,
    rng: &mut R,
) -> Option<Vec<Option<u8>>> {
    let (mut hot, mut rest): (Vec<u8>, Vec<u8>) =
        TOKEN_BAG.iter().copied().partition(|&t| is_hot(t));
    hot.shuffle(rng);
    rest.shuffle(rng);
    let ordered: Vec<u8> = hot.into_iter().chain(rest).collect();

    let open: Vec<usize> = (0..neighbors.len()).filter(|&i| i != desert_index).collect();
    let mut tokens = vec![None; neighbors.len()];

    place_tokens(&ordered, &open, neighbors, &mut tokens, rng).then_some(tokens)
}

fn random_balanced(seed: &str) -> Result<PresetDefinition, PresetError> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(PresetError::MissingSeed);
    }

    let mut rng = seeded_rng(seed);
    let coords = hexes_in_radius(STANDARD_RADIUS);
    let desert_index = choose_desert_index(&coords, &mut rng);

    let mut bag: Vec<Terrain> = [
        (Terrain::Wood, 4),
        (Terrain::Brick, 3),
        (Terrain::Sheep, 4),
        (Terrain::Wheat, 4),
        (Terrain::Ore, 3),
    ]
    .into_iter()
    .flat_map(|(terrain, count)| std::iter::repeat(terrain).take(count))
    .collect();
    bag.shuffle(&mut rng);

    let mut bag = bag.into_iter();
    let resources: Vec<Terrain> = (0..coords.len())
        .map(|i| {
            if i == desert_index {
                Terrain::Desert
            } else {
                bag.next().unwrap_or_default()
            }
        })
        .collect();

    let neighbors = neighbor_indices(&coords);
    let tokens = (0..MAX_TOKEN_ATTEMPTS)
        .find_map(|_| try_assign_tokens(&neighbors, desert_index, &mut rng))
        .ok_or(PresetError::TokenPlacementFailed {
            attempts: MAX_TOKEN_ATTEMPTS,
        })?;

    debug!(seed, desert_index, "Generated random-balanced preset");

    Ok(PresetDefinition {
        id: PresetId::RandomBalanced,
        name: PresetId::RandomBalanced.name().to_string(),
        resources,
        tokens,
        desert_index,
        seed: Some(seed.to_string()),
    })
}
