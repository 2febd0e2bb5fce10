// Data-driven build configuration.
//
// All tunable parameters live here in `BuildConfig`, loaded from JSON at
// startup. The pipeline never uses magic numbers — it reads from the config.
// This enables tuning scans, routing, and paving without recompilation.
//
// Parameters are grouped into nested sub-structs: `ScanParams` (terrain
// sampling), `RouteParams` (path planning), `PaveParams` (surface laying),
// and `MaterialClasses` (the identifier sets that drive terrain
// classification). The `Default` impl is the reference configuration; a JSON
// config file must spell out every field, exactly as serialized.
//
// See also: `terrain.rs` which reads `ScanParams` and `MaterialClasses`,
// `path.rs` which reads `RouteParams`, `pave.rs` which reads `PaveParams`.
//
// **Critical constraint: determinism.** Config values feed directly into
// sampling and planning. Identical configs over identical worlds must
// produce identical routes and identical paved output.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Parameter groups
// ---------------------------------------------------------------------------

/// Controls the vertical window terrain scans walk through.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanParams {
    /// Highest Y tested by a column scan (inclusive). Scans walk downward
    /// from here.
    pub top: i32,
    /// Lowest Y tested by a column scan (inclusive). A column with nothing
    /// recordable above this is treated as having no ground.
    pub bottom: i32,
    /// How many blocks above ground level the obstruction probe checks for
    /// built material. A built block within this window marks the column
    /// blocked even though it has a ground elevation.
    pub obstruction_probe_height: u32,
}

/// Controls route planning over the heightmap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteParams {
    /// Cost added per block of elevation change between adjacent columns.
    /// Higher values make the planner hug contour lines.
    pub elevation_penalty: f32,
    /// Elevation assigned to route steps whose column has no sampled ground
    /// (only reachable on the degraded direct-walk fallback).
    pub fallback_elevation: i32,
    /// Extra columns sampled on every side of the start/goal bounding
    /// rectangle, giving the planner room to detour around obstructions.
    pub sample_margin: u32,
}

/// Controls how a planned route is materialized into the world.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaveParams {
    /// Total path width in blocks. The surface extends `width / 2` blocks
    /// either side of the route centerline.
    pub width: u32,
    /// Blocks of walking room cleared above each paved cell. Liquids are
    /// never cleared.
    pub clearance: u32,
    /// Identifier of the block laid as the path surface.
    pub surface_block: String,
}

/// The identifier sets that drive terrain classification.
///
/// A scan walking down a column skips `vegetation`, records `natural` ground,
/// and treats `built` according to the query's surface rule. Identifiers in
/// none of the sets count as ground, so unconfigured modded terrain behaves
/// like stone rather than like a wall.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialClasses {
    pub natural: Vec<String>,
    pub built: Vec<String>,
    pub vegetation: Vec<String>,
}

// ---------------------------------------------------------------------------
// Top-level build config
// ---------------------------------------------------------------------------

/// Top-level configuration. Loaded from JSON, never mutated at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildConfig {
    pub scan: ScanParams,
    pub route: RouteParams,
    pub paving: PaveParams,
    pub materials: MaterialClasses,
    /// Directory template keys resolve against.
    pub template_dir: PathBuf,
}

impl BuildConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        let qualified = |names: &[&str]| -> Vec<String> {
            names.iter().map(|n| format!("minecraft:{n}")).collect()
        };

        Self {
            scan: ScanParams {
                top: 160,
                bottom: -16,
                obstruction_probe_height: 2,
            },
            route: RouteParams {
                elevation_penalty: 3.0,
                fallback_elevation: 64,
                sample_margin: 8,
            },
            paving: PaveParams {
                width: 3,
                clearance: 3,
                surface_block: "minecraft:gravel".to_string(),
            },
            materials: MaterialClasses {
                natural: qualified(&[
                    "grass_block",
                    "dirt",
                    "coarse_dirt",
                    "podzol",
                    "mycelium",
                    "stone",
                    "deepslate",
                    "granite",
                    "diorite",
                    "andesite",
                    "tuff",
                    "calcite",
                    "gravel",
                    "sand",
                    "red_sand",
                    "sandstone",
                    "clay",
                    "moss_block",
                    "snow_block",
                    "bedrock",
                ]),
                built: qualified(&[
                    "oak_planks",
                    "spruce_planks",
                    "birch_planks",
                    "oak_log",
                    "spruce_log",
                    "birch_log",
                    "oak_stairs",
                    "oak_slab",
                    "oak_door",
                    "cobblestone",
                    "stone_bricks",
                    "deepslate_bricks",
                    "bricks",
                    "smooth_stone",
                    "quartz_block",
                    "polished_andesite",
                    "polished_diorite",
                    "iron_block",
                    "glass",
                    "glass_pane",
                ]),
                vegetation: qualified(&[
                    "short_grass",
                    "tall_grass",
                    "fern",
                    "large_fern",
                    "dandelion",
                    "poppy",
                    "oxeye_daisy",
                    "azure_bluet",
                    "cornflower",
                    "lily_of_the_valley",
                    "oak_leaves",
                    "spruce_leaves",
                    "birch_leaves",
                    "vine",
                    "sugar_cane",
                    "sweet_berry_bush",
                    "snow",
                ]),
            },
            template_dir: PathBuf::from("templates"),
        }
    }
}
