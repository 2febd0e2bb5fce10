// Terrain sampling and obstruction classification.
//
// The sampler walks each column top-down through the configured scan band and
// records a ground elevation per column into a `HeightMap`. What counts as
// ground depends on material class (see `MaterialClasses` in `config.rs`)
// and on the query's `SurfaceRule`:
//
// - vegetation is skipped entirely,
// - liquids are skipped but do not end the scan, so a lake records its bed,
// - natural material records its elevation and ends the scan,
// - built material either ends the scan unrecorded (`GroundOnly`) or records
//   like ground (`AnySurface`),
// - identifiers in no class record like ground, so unconfigured terrain from
//   other content packs behaves like stone rather than like a wall.
//
// The classifier then derives the set of columns routing must avoid: columns
// with no recorded ground, and columns whose ground has built material within
// the obstruction probe window above it.
//
// Column scans are independent, so `sample_bounds` fans them out with rayon
// and reassembles the results into an ordered map.
//
// See also: `path.rs` which consumes the heightmap and blocked set.
//
// **Critical constraint: determinism.** Results are keyed maps and sets, so
// the parallel scan order never leaks into output.

use crate::block::BlockSpec;
use crate::config::{MaterialClasses, ScanParams};
use crate::types::{Column, ColumnRect};
use crate::world::World;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};

/// Ground elevation per column. Columns without recordable ground are absent.
pub type HeightMap = BTreeMap<Column, i32>;

// ---------------------------------------------------------------------------
// Material palette
// ---------------------------------------------------------------------------

/// Identifier sets from the config, indexed for O(1) membership tests.
///
/// Built once per operation; the underlying hash sets are lookup-only and
/// never iterated.
#[derive(Clone, Debug)]
pub struct TerrainPalette {
    natural: FxHashSet<String>,
    built: FxHashSet<String>,
    vegetation: FxHashSet<String>,
}

/// How one block participates in a column scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Material {
    Natural,
    Built,
    Vegetation,
    Liquid,
    Unknown,
}

impl TerrainPalette {
    pub fn from_classes(classes: &MaterialClasses) -> Self {
        let to_set = |names: &[String]| names.iter().cloned().collect::<FxHashSet<String>>();
        Self {
            natural: to_set(&classes.natural),
            built: to_set(&classes.built),
            vegetation: to_set(&classes.vegetation),
        }
    }

    pub fn is_natural(&self, name: &str) -> bool {
        self.natural.contains(name)
    }

    pub fn is_built(&self, name: &str) -> bool {
        self.built.contains(name)
    }

    pub fn is_vegetation(&self, name: &str) -> bool {
        self.vegetation.contains(name)
    }

    fn classify(&self, spec: &BlockSpec) -> Material {
        if spec.is_liquid() {
            Material::Liquid
        } else if self.is_vegetation(&spec.name) {
            Material::Vegetation
        } else if self.is_natural(&spec.name) {
            Material::Natural
        } else if self.is_built(&spec.name) {
            Material::Built
        } else {
            Material::Unknown
        }
    }
}

// ---------------------------------------------------------------------------
// Surface rules
// ---------------------------------------------------------------------------

/// What a column scan should do when it reaches built material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceRule {
    /// Only natural terrain counts as ground. Built material ends the scan
    /// without recording, leaving the column with no elevation. Use this for
    /// route planning, where standing on a roof is not an option.
    GroundOnly,
    /// Any standable surface counts, built or natural. Use this for
    /// placement queries like "what is under this point".
    AnySurface,
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Scan one column top-down through the scan band.
///
/// Returns the recorded ground elevation, or `None` when the scan ends
/// without recording (nothing but air and skippable cover, or built material
/// under a `GroundOnly` rule).
pub fn scan_column<W: World>(
    world: &W,
    column: Column,
    scan: &ScanParams,
    palette: &TerrainPalette,
    rule: SurfaceRule,
) -> Option<i32> {
    let mut y = scan.top;
    while y >= scan.bottom {
        if let Some(spec) = world.get(column.at(y)) {
            match palette.classify(&spec) {
                // Cover that never counts as ground and never ends the scan.
                Material::Vegetation | Material::Liquid => {}
                Material::Natural | Material::Unknown => return Some(y),
                Material::Built => {
                    return match rule {
                        SurfaceRule::GroundOnly => None,
                        SurfaceRule::AnySurface => Some(y),
                    };
                }
            }
        }
        y -= 1;
    }
    None
}

/// Sample every column in `bounds`, fanning the scans out across threads.
pub fn sample_bounds<W: World + Sync>(
    world: &W,
    bounds: ColumnRect,
    scan: &ScanParams,
    palette: &TerrainPalette,
    rule: SurfaceRule,
) -> HeightMap {
    let columns: Vec<Column> = bounds.columns().collect();
    let sampled: Vec<(Column, Option<i32>)> = columns
        .par_iter()
        .map(|&column| (column, scan_column(world, column, scan, palette, rule)))
        .collect();

    let heights: HeightMap = sampled
        .into_iter()
        .filter_map(|(column, height)| height.map(|h| (column, h)))
        .collect();
    log::debug!(
        "sampled {} columns in {bounds}, {} with ground",
        bounds.column_count(),
        heights.len()
    );
    heights
}

/// Sample the square of columns within `radius` of `center`.
pub fn sample_around<W: World + Sync>(
    world: &W,
    center: Column,
    radius: u32,
    scan: &ScanParams,
    palette: &TerrainPalette,
    rule: SurfaceRule,
) -> HeightMap {
    sample_bounds(world, ColumnRect::around(center, radius), scan, palette, rule)
}

// ---------------------------------------------------------------------------
// Obstruction classification
// ---------------------------------------------------------------------------

/// Columns within `bounds` that routing must avoid.
///
/// A column is blocked when the heightmap has no entry for it, or when built
/// material sits within `scan.obstruction_probe_height` blocks above its
/// ground elevation. Natural overhangs above ground do not block.
pub fn blocked_columns<W: World>(
    world: &W,
    heights: &HeightMap,
    bounds: ColumnRect,
    scan: &ScanParams,
    palette: &TerrainPalette,
) -> BTreeSet<Column> {
    let mut blocked = BTreeSet::new();
    for column in bounds.columns() {
        let Some(&ground) = heights.get(&column) else {
            blocked.insert(column);
            continue;
        };
        let probe = scan.obstruction_probe_height as i32;
        for dy in 1..=probe {
            if let Some(spec) = world.get(column.at(ground + dy)) {
                if palette.is_built(&spec.name) {
                    blocked.insert(column);
                    break;
                }
            }
        }
    }
    blocked
}
