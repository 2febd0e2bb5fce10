// Test-world builders for the pipeline integration tests.
//
// These construct realistic `MemoryWorld` fixtures — rolling terrain, ponds,
// obstacle walls — using the same `World` trait writes the library itself
// uses. The only test-specific code here is the region-equality assertion
// helper; everything the tests exercise goes through real library paths.
//
// See also: `tests/full_pipeline.rs` for the integration test scenarios.

use blockwright_core::block::BlockSpec;
use blockwright_core::types::{BlockPos, Column};
use blockwright_core::world::{MemoryWorld, World};
use std::fs;
use std::path::PathBuf;

/// Deterministic ground elevation for [`hilly_world`] at a column: gentle
/// ridges running diagonally, varying over four levels above `base_y`.
pub fn hill_height(base_y: i32, column: Column) -> i32 {
    base_y + ((column.x - column.z) / 5).rem_euclid(4)
}

/// Rolling grass terrain over `[-extent, extent]^2`: stone under dirt under
/// a grass surface whose height follows [`hill_height`].
pub fn hilly_world(extent: i32, base_y: i32) -> MemoryWorld {
    let mut world = MemoryWorld::new();
    for x in -extent..=extent {
        for z in -extent..=extent {
            let h = hill_height(base_y, Column::new(x, z));
            world.set(BlockPos::new(x, h - 2, z), BlockSpec::new("stone"));
            world.set(BlockPos::new(x, h - 1, z), BlockSpec::new("dirt"));
            world.set(BlockPos::new(x, h, z), BlockSpec::new("grass_block"));
        }
    }
    world
}

/// Carve a flat pond over the given column box: terrain above the waterline
/// removed, a sand bed at `base_y - 2`, water filling the two cells above.
pub fn dig_pond(world: &mut MemoryWorld, base_y: i32, min: Column, max: Column) {
    for x in min.x..=max.x {
        for z in min.z..=max.z {
            let h = hill_height(base_y, Column::new(x, z));
            for y in (base_y + 1)..=h {
                world.clear(BlockPos::new(x, y, z));
            }
            world.set(BlockPos::new(x, base_y - 2, z), BlockSpec::new("sand"));
            world.set(BlockPos::new(x, base_y - 1, z), BlockSpec::new("water"));
            world.set(BlockPos::new(x, base_y, z), BlockSpec::new("water"));
        }
    }
}

/// A fresh directory under the system temp dir for store/snapshot tests.
/// Any leftovers from a previous run are removed first.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("blockwright_pipeline_tests").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Assert that two worlds hold identical contents over the inclusive box
/// between `a` and `b`, panicking with the first differing position.
pub fn assert_region_equal(left: &MemoryWorld, right: &MemoryWorld, a: BlockPos, b: BlockPos) {
    let min = a.min_corner(b);
    let max = a.max_corner(b);
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let pos = BlockPos::new(x, y, z);
                assert_eq!(
                    left.get(pos),
                    right.get(pos),
                    "worlds differ at {pos}"
                );
            }
        }
    }
}
