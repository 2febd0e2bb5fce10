// World access: the `World` trait and the in-memory reference implementation.
//
// Every stage of the pipeline (terrain sampling, paving, template capture and
// replay, structure building) reads and writes blocks through the `World`
// trait, so the same code drives the bundled `MemoryWorld` and any adapter a
// host application supplies over its own storage.
//
// `MemoryWorld` is sparse: a `BTreeMap` from position to spec, where absence
// means empty air. There are no bounds — reads outside anything ever written
// simply return `None`. Snapshots persist as a JSON list of block rows and
// reload into an identical map.
//
// See also: `terrain.rs` which scans worlds top-down, `template.rs` which
// copies regions in and out, `builder.rs` which stamps whole structures.
//
// **Critical constraint: determinism.** `MemoryWorld` iterates its cells in
// position order, so snapshots serialize identically for identical contents.

use crate::block::{BlockRecord, BlockSpec};
use crate::error::Result;
use crate::types::BlockPos;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::Path;

// ---------------------------------------------------------------------------
// The World trait
// ---------------------------------------------------------------------------

/// Read/write access to a block grid.
///
/// `get` returns an owned spec (`None` when the cell is empty), which keeps
/// the trait implementable over storage that cannot hand out references,
/// such as a world behind a network protocol or an FFI boundary.
pub trait World {
    /// Read the block at `pos`, or `None` if the cell is empty.
    fn get(&self, pos: BlockPos) -> Option<BlockSpec>;

    /// Place a block at `pos`, replacing whatever was there.
    fn set(&mut self, pos: BlockPos, block: BlockSpec);

    /// Empty the cell at `pos`. Clearing an already-empty cell is a no-op.
    fn clear(&mut self, pos: BlockPos);

    /// Whether the cell at `pos` is empty.
    fn is_empty_at(&self, pos: BlockPos) -> bool {
        self.get(pos).is_none()
    }
}

// ---------------------------------------------------------------------------
// In-memory world
// ---------------------------------------------------------------------------

/// Sparse, unbounded block storage keyed by position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryWorld {
    cells: BTreeMap<BlockPos, BlockSpec>,
}

/// On-disk shape of a world snapshot.
#[derive(Serialize, Deserialize)]
struct WorldSnapshot {
    blocks: Vec<BlockRecord>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat terrain centered on the origin: bedrock under stone under dirt,
    /// grass on top at `ground_y`, covering x and z in `[-extent, extent]`.
    pub fn flat(extent: u32, ground_y: i32) -> Self {
        let e = extent as i32;
        let mut world = Self::new();
        for x in -e..=e {
            for z in -e..=e {
                world.set(BlockPos::new(x, ground_y - 3, z), BlockSpec::new("bedrock"));
                world.set(BlockPos::new(x, ground_y - 2, z), BlockSpec::new("stone"));
                world.set(BlockPos::new(x, ground_y - 1, z), BlockSpec::new("dirt"));
                world.set(BlockPos::new(x, ground_y, z), BlockSpec::new("grass_block"));
            }
        }
        world
    }

    /// Number of occupied cells.
    pub fn block_count(&self) -> usize {
        self.cells.len()
    }

    /// Minimum and maximum corners of the occupied region, or `None` for an
    /// empty world.
    pub fn bounds(&self) -> Option<(BlockPos, BlockPos)> {
        let mut iter = self.cells.keys();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;
        for pos in iter {
            min = min.min_corner(*pos);
            max = max.max_corner(*pos);
        }
        Some((min, max))
    }

    /// Iterate occupied cells in position order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, &BlockSpec)> {
        self.cells.iter().map(|(pos, spec)| (*pos, spec))
    }

    /// Write the world to `path` as a JSON snapshot.
    ///
    /// Serializes to a buffer first and writes it in one call, so a failed
    /// or short write surfaces as an error instead of a truncated file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let snapshot = WorldSnapshot {
            blocks: self
                .cells
                .iter()
                .map(|(pos, spec)| BlockRecord::from_parts(*pos, spec))
                .collect(),
        };
        let json = serde_json::to_vec(&snapshot)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a world from a JSON snapshot written by [`MemoryWorld::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let snapshot: WorldSnapshot = serde_json::from_reader(BufReader::new(file))?;
        let mut world = Self::new();
        for record in snapshot.blocks {
            let (pos, spec) = record.into_parts();
            world.set(pos, spec);
        }
        Ok(world)
    }
}

impl World for MemoryWorld {
    fn get(&self, pos: BlockPos) -> Option<BlockSpec> {
        self.cells.get(&pos).cloned()
    }

    fn set(&mut self, pos: BlockPos, block: BlockSpec) {
        self.cells.insert(pos, block);
    }

    fn clear(&mut self, pos: BlockPos) {
        self.cells.remove(&pos);
    }

    fn is_empty_at(&self, pos: BlockPos) -> bool {
        !self.cells.contains_key(&pos)
    }
}
