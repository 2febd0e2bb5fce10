// Structure templates: capturing regions and stamping them back.
//
// A template is a sparse, relocatable copy of a world region. Capture walks
// the region's bounding box and records every occupied cell with its position
// relative to the minimum corner; empty cells are simply absent. Replay adds
// the recorded blocks at a new origin and touches nothing else, so templates
// compose — a gazebo stamped onto a hillside leaves the hillside around it
// intact.
//
// Capture iterates Y, then Z, then X (innermost), and that entry order is
// preserved through transforms and persistence. Two captures of identical
// regions produce identical templates.
//
// See also: `transform.rs` for rotation and mirroring, `store.rs` for the
// on-disk document format.

use crate::block::BlockSpec;
use crate::types::BlockPos;
use crate::world::World;

/// Where a template was captured from. Corners are recorded exactly as the
/// caller gave them, unnormalized, and ride along through transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateMeta {
    pub scanned_from: BlockPos,
    pub scanned_to: BlockPos,
}

/// A relocatable copy of a world region.
///
/// `size` is the bounding box extent per axis (always at least 1). Entry
/// positions are relative to the region's minimum corner and lie inside
/// `size` on every axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub size: [i32; 3],
    pub entries: Vec<(BlockPos, BlockSpec)>,
    pub meta: TemplateMeta,
}

impl Template {
    /// Copy the region between `a` and `b` (inclusive, either corner order)
    /// out of the world.
    pub fn capture<W: World>(world: &W, a: BlockPos, b: BlockPos) -> Self {
        let min = a.min_corner(b);
        let max = a.max_corner(b);
        let size = [max.x - min.x + 1, max.y - min.y + 1, max.z - min.z + 1];

        let mut entries = Vec::new();
        for y in 0..size[1] {
            for z in 0..size[2] {
                for x in 0..size[0] {
                    let world_pos = BlockPos::new(min.x + x, min.y + y, min.z + z);
                    if let Some(spec) = world.get(world_pos) {
                        entries.push((BlockPos::new(x, y, z), spec));
                    }
                }
            }
        }

        Self {
            size,
            entries,
            meta: TemplateMeta {
                scanned_from: a,
                scanned_to: b,
            },
        }
    }

    /// Stamp the template into the world with its minimum corner at
    /// `origin`. Additive: cells the template has no entry for are left
    /// untouched. Returns the number of blocks placed.
    pub fn paste<W: World>(&self, world: &mut W, origin: BlockPos) -> usize {
        for (rel, spec) in &self.entries {
            world.set(
                BlockPos::new(origin.x + rel.x, origin.y + rel.y, origin.z + rel.z),
                spec.clone(),
            );
        }
        self.entries.len()
    }

    /// Number of recorded blocks.
    pub fn block_count(&self) -> usize {
        self.entries.len()
    }

    pub const fn size_x(&self) -> i32 {
        self.size[0]
    }

    pub const fn size_y(&self) -> i32 {
        self.size[1]
    }

    pub const fn size_z(&self) -> i32 {
        self.size[2]
    }
}
