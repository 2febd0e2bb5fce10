// Paving: materializing a planned route into the world.
//
// Each route step stamps a square of surface blocks centered on its column
// at the step's elevation, `width / 2` blocks to each side, then clears the
// configured amount of walking room above every stamped cell. Liquids are
// never cleared — a path may run along a riverbed, but the paver does not
// drain the river.
//
// Paving the same route twice produces the same world. Within one call, a
// cell is stamped at most once, and a cell stamped as surface is never
// cleared again: on slopes, a step's clearance window overlaps the next
// step's surface row.
//
// See also: `path.rs` for how routes are planned.

use crate::block::BlockSpec;
use crate::config::PaveParams;
use crate::path::Route;
use crate::types::{BlockPos, Column};
use crate::world::World;
use rustc_hash::FxHashSet;

/// Counts of world mutations performed by one paving call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaveReport {
    /// Distinct cells written with the surface block.
    pub surface_blocks: usize,
    /// Distinct cells emptied to make walking room.
    pub cleared_blocks: usize,
}

/// Lay the route into the world: surface blocks under, walking room above.
pub fn pave_route<W: World>(world: &mut W, route: &Route, params: &PaveParams) -> PaveReport {
    let surface = BlockSpec::new(params.surface_block.as_str());
    let half = (params.width / 2) as i32;
    let clearance = params.clearance as i32;

    let mut report = PaveReport::default();
    let mut paved: FxHashSet<BlockPos> = FxHashSet::default();

    for step in &route.steps {
        for dx in -half..=half {
            for dz in -half..=half {
                let column = Column::new(step.column.x + dx, step.column.z + dz);

                let surface_pos = column.at(step.elevation);
                if paved.insert(surface_pos) {
                    world.set(surface_pos, surface.clone());
                    report.surface_blocks += 1;
                }

                for dy in 1..=clearance {
                    let above = column.at(step.elevation + dy);
                    // Never clear a cell this call already paved: on slopes a
                    // step's clearance window overlaps a neighbor's surface.
                    if paved.contains(&above) {
                        continue;
                    }
                    if let Some(spec) = world.get(above) {
                        if !spec.is_liquid() {
                            world.clear(above);
                            report.cleared_blocks += 1;
                        }
                    }
                }
            }
        }
    }

    log::debug!(
        "paved {} steps: {} surface blocks, {} cleared",
        route.steps.len(),
        report.surface_blocks,
        report.cleared_blocks
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::RouteStep;
    use crate::world::MemoryWorld;

    fn test_params(width: u32, clearance: u32) -> PaveParams {
        PaveParams {
            width,
            clearance,
            surface_block: "minecraft:gravel".to_string(),
        }
    }

    fn straight_route(len: i32, elevation: i32) -> Route {
        Route {
            steps: (0..len)
                .map(|x| RouteStep {
                    column: Column::new(x, 0),
                    elevation,
                })
                .collect(),
            cost: (len - 1) as f32,
            fallback: false,
        }
    }

    #[test]
    fn surface_covers_the_route_footprint() {
        let mut world = MemoryWorld::new();
        let route = straight_route(5, 64);
        let report = pave_route(&mut world, &route, &test_params(3, 2));
        // Footprint: x in [-1, 5], z in [-1, 1], one layer.
        assert_eq!(report.surface_blocks, 7 * 3);
        assert_eq!(report.cleared_blocks, 0);
        for x in -1..=5 {
            for z in -1..=1 {
                assert_eq!(
                    world.get(BlockPos::new(x, 64, z)).unwrap().name,
                    "minecraft:gravel"
                );
            }
        }
        assert!(world.get(BlockPos::new(6, 64, 0)).is_none());
    }

    #[test]
    fn width_one_paves_the_centerline_only() {
        let mut world = MemoryWorld::new();
        let route = straight_route(4, 64);
        let report = pave_route(&mut world, &route, &test_params(1, 0));
        assert_eq!(report.surface_blocks, 4);
        assert!(world.get(BlockPos::new(0, 64, 1)).is_none());
    }

    #[test]
    fn clearance_empties_walking_room() {
        let mut world = MemoryWorld::new();
        // A hedge through the route at head height.
        for x in 0..4 {
            world.set(BlockPos::new(x, 65, 0), BlockSpec::new("oak_leaves"));
            world.set(BlockPos::new(x, 66, 0), BlockSpec::new("oak_leaves"));
            world.set(BlockPos::new(x, 68, 0), BlockSpec::new("oak_leaves"));
        }
        let route = straight_route(4, 64);
        let report = pave_route(&mut world, &route, &test_params(1, 3));
        // 65..=67 cleared; 68 is above the window.
        assert_eq!(report.cleared_blocks, 8);
        for x in 0..4 {
            assert!(world.get(BlockPos::new(x, 65, 0)).is_none());
            assert!(world.get(BlockPos::new(x, 66, 0)).is_none());
            assert!(world.get(BlockPos::new(x, 68, 0)).is_some());
        }
    }

    #[test]
    fn liquids_are_never_cleared() {
        let mut world = MemoryWorld::new();
        world.set(BlockPos::new(1, 65, 0), BlockSpec::new("water"));
        world.set(BlockPos::new(2, 65, 0), BlockSpec::new("oak_leaves"));
        let route = straight_route(4, 64);
        let report = pave_route(&mut world, &route, &test_params(1, 2));
        assert_eq!(report.cleared_blocks, 1);
        assert_eq!(
            world.get(BlockPos::new(1, 65, 0)).unwrap().name,
            "minecraft:water"
        );
        assert!(world.get(BlockPos::new(2, 65, 0)).is_none());
    }

    #[test]
    fn sloped_route_keeps_both_surface_rows() {
        let mut world = MemoryWorld::new();
        // Downhill: the second step's clearance window covers the first
        // step's surface elevation.
        let route = Route {
            steps: vec![
                RouteStep {
                    column: Column::new(0, 0),
                    elevation: 65,
                },
                RouteStep {
                    column: Column::new(1, 0),
                    elevation: 64,
                },
            ],
            cost: 1.0 + 3.0,
            fallback: false,
        };
        pave_route(&mut world, &route, &test_params(3, 3));
        // The first step paved (1, 65, 0); the second step must not clear it.
        assert_eq!(
            world.get(BlockPos::new(1, 65, 0)).unwrap().name,
            "minecraft:gravel"
        );
        assert_eq!(
            world.get(BlockPos::new(1, 64, 0)).unwrap().name,
            "minecraft:gravel"
        );
    }

    #[test]
    fn paving_twice_is_idempotent() {
        let mut world = MemoryWorld::new();
        let route = straight_route(5, 64);
        let params = test_params(3, 2);
        let first = pave_route(&mut world, &route, &params);
        let after_first = world.clone();
        let second = pave_route(&mut world, &route, &params);
        assert_eq!(world, after_first);
        assert_eq!(first.surface_blocks, second.surface_blocks);
        assert_eq!(second.cleared_blocks, 0);
    }
}
