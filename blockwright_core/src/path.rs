// Route planning over sampled terrain.
//
// Implements A* over the 8-connected column grid using a `BinaryHeap`
// (min-heap via reversed ordering). The search is sparse — scores and
// came-from data live in `FxHashMap`s keyed by column — because routes cover
// an unbounded world, not a fixed-size graph. Those maps are lookup-only and
// never iterated; repeatability comes from the fixed neighbor order and the
// heap tie-break on insertion sequence.
//
// Step cost is 1 for cardinal moves and √2 for diagonals, plus a configured
// penalty per block of elevation change. The heuristic is plain Manhattan
// distance, which overestimates diagonal travel (a diagonal step costs √2
// but closes 2 of Manhattan), so returned routes are not guaranteed
// cost-optimal. The heuristic also ignores elevation entirely.
//
// When no clear route exists — an endpoint is blocked or unsampled, or the
// open set drains — planning degrades to a straight Manhattan walk that
// ignores obstructions, and the result carries `fallback = true` so callers
// can warn before paving through something.
//
// See also: `terrain.rs` for how the heightmap and blocked set are produced,
// `pave.rs` which materializes the planned route.
//
// **Critical constraint: determinism.** Planning is a pure function of the
// heightmap, blocked set, endpoints, and params. Ties in the open set break
// by insertion order via a sequence counter, with `total_cmp` for f32
// ordering.

use crate::config::RouteParams;
use crate::terrain::HeightMap;
use crate::types::Column;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};
use std::f32::consts::SQRT_2;

/// One column of a planned route, with the elevation to pave at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteStep {
    pub column: Column,
    pub elevation: i32,
}

/// The result of route planning, start to goal inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub steps: Vec<RouteStep>,
    /// Total traversal cost (step costs plus elevation penalties).
    pub cost: f32,
    /// `true` when the planner could not find a clear route and degraded to
    /// a direct walk that ignores obstructions.
    pub fallback: bool,
}

impl Route {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the route visits the given column.
    pub fn visits(&self, column: Column) -> bool {
        self.steps.iter().any(|s| s.column == column)
    }
}

/// Entry in the A* open set (min-heap via reversed ordering).
struct OpenEntry {
    column: Column,
    f_score: f32,
    /// Insertion sequence number; equal f-scores pop earliest-pushed first.
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.total_cmp(&other.f_score) == Ordering::Equal && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score is "greatest".
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Fixed expansion order: cardinals first, then diagonals. The order is part
/// of the planner's determinism contract.
const NEIGHBOR_STEPS: [(i32, i32, f32); 8] = [
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 1, SQRT_2),
    (1, -1, SQRT_2),
    (-1, 1, SQRT_2),
    (-1, -1, SQRT_2),
];

fn neighbors(column: Column) -> SmallVec<[(Column, f32); 8]> {
    NEIGHBOR_STEPS
        .iter()
        .map(|&(dx, dz, cost)| (Column::new(column.x + dx, column.z + dz), cost))
        .collect()
}

/// Manhattan distance to the goal. Elevation-blind, and an overestimate
/// across diagonals.
fn heuristic(from: Column, goal: Column) -> f32 {
    from.manhattan_distance(goal) as f32
}

/// Plan a route from `start` to `goal` over the sampled terrain.
///
/// Always returns a route; check [`Route::fallback`] to see whether the
/// planner found a clear path or degraded to a direct walk.
pub fn plan_route(
    heights: &HeightMap,
    blocked: &BTreeSet<Column>,
    start: Column,
    goal: Column,
    params: &RouteParams,
) -> Route {
    let plannable = |c: Column| heights.contains_key(&c) && !blocked.contains(&c);

    if !plannable(start) || !plannable(goal) {
        log::warn!("route endpoint blocked or unsampled ({start} -> {goal}); walking a direct line");
        return direct_walk(heights, start, goal, params);
    }
    if start == goal {
        return Route {
            steps: vec![RouteStep {
                column: start,
                elevation: heights[&start],
            }],
            cost: 0.0,
            fallback: false,
        };
    }

    // g_score[column] = cost of cheapest known path from start to column.
    let mut g_score: FxHashMap<Column, f32> = FxHashMap::default();
    let mut came_from: FxHashMap<Column, Column> = FxHashMap::default();
    let mut closed: FxHashSet<Column> = FxHashSet::default();

    g_score.insert(start, 0.0);

    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        column: start,
        f_score: heuristic(start, goal),
        seq,
    });

    while let Some(current) = open.pop() {
        let current_column = current.column;

        if current_column == goal {
            return reconstruct_route(&came_from, heights, start, goal, g_score[&goal]);
        }

        if !closed.insert(current_column) {
            continue;
        }

        let current_g = g_score[&current_column];
        let current_elevation = heights[&current_column];

        for (neighbor, base_cost) in neighbors(current_column) {
            if closed.contains(&neighbor) || !plannable(neighbor) {
                continue;
            }

            let climb = (heights[&neighbor] - current_elevation).unsigned_abs();
            let tentative_g = current_g + base_cost + params.elevation_penalty * climb as f32;

            let best = g_score.get(&neighbor).copied().unwrap_or(f32::INFINITY);
            if tentative_g < best {
                g_score.insert(neighbor, tentative_g);
                came_from.insert(neighbor, current_column);
                seq += 1;
                open.push(OpenEntry {
                    column: neighbor,
                    f_score: tentative_g + heuristic(neighbor, goal),
                    seq,
                });
            }
        }
    }

    log::warn!("no clear route from {start} to {goal}; walking a direct line");
    direct_walk(heights, start, goal, params)
}

/// Reconstruct the route from came-from data.
fn reconstruct_route(
    came_from: &FxHashMap<Column, Column>,
    heights: &HeightMap,
    start: Column,
    goal: Column,
    cost: f32,
) -> Route {
    let mut columns = Vec::new();
    let mut current = goal;

    loop {
        columns.push(current);
        if current == start {
            break;
        }
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }

    columns.reverse();

    Route {
        steps: columns
            .into_iter()
            .map(|column| RouteStep {
                column,
                elevation: heights[&column],
            })
            .collect(),
        cost,
        fallback: false,
    }
}

/// Degraded planning: a straight Manhattan walk that alternates X and Z
/// steps toward the goal, ignoring obstructions. Steps take their column's
/// sampled elevation where one exists and the configured fallback elevation
/// where none does.
fn direct_walk(heights: &HeightMap, start: Column, goal: Column, params: &RouteParams) -> Route {
    let elevation_at =
        |c: Column| heights.get(&c).copied().unwrap_or(params.fallback_elevation);

    let mut steps = vec![RouteStep {
        column: start,
        elevation: elevation_at(start),
    }];
    let mut cost = 0.0;
    let mut current = start;
    let mut step_x = true;

    while current != goal {
        let dx = goal.x - current.x;
        let dz = goal.z - current.z;
        current = if dx != 0 && (step_x || dz == 0) {
            Column::new(current.x + dx.signum(), current.z)
        } else {
            Column::new(current.x, current.z + dz.signum())
        };
        step_x = !step_x;
        cost += 1.0;
        steps.push(RouteStep {
            column: current,
            elevation: elevation_at(current),
        });
    }

    Route {
        steps,
        cost,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnRect;

    fn test_params() -> RouteParams {
        RouteParams {
            elevation_penalty: 3.0,
            fallback_elevation: 64,
            sample_margin: 8,
        }
    }

    /// Flat heightmap covering the square of the given radius around origin.
    fn flat_heights(radius: u32, elevation: i32) -> HeightMap {
        ColumnRect::around(Column::new(0, 0), radius)
            .columns()
            .map(|c| (c, elevation))
            .collect()
    }

    #[test]
    fn trivial_route_start_equals_goal() {
        let heights = flat_heights(2, 64);
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(0, 0),
            Column::new(0, 0),
            &test_params(),
        );
        assert_eq!(route.len(), 1);
        assert_eq!(route.cost, 0.0);
        assert!(!route.fallback);
        assert_eq!(route.steps[0].elevation, 64);
    }

    #[test]
    fn straight_route_on_flat_ground() {
        let heights = flat_heights(6, 64);
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(-5, 0),
            Column::new(5, 0),
            &test_params(),
        );
        assert!(!route.fallback);
        assert_eq!(route.len(), 11);
        assert!((route.cost - 10.0).abs() < 1e-4);
        assert_eq!(route.steps.first().unwrap().column, Column::new(-5, 0));
        assert_eq!(route.steps.last().unwrap().column, Column::new(5, 0));
    }

    #[test]
    fn diagonal_route_uses_diagonal_steps() {
        let heights = flat_heights(6, 64);
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(0, 0),
            Column::new(5, 5),
            &test_params(),
        );
        assert!(!route.fallback);
        // Five diagonal steps beat any cardinal staircase.
        assert_eq!(route.len(), 6);
        assert!((route.cost - 5.0 * SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn consecutive_steps_are_adjacent() {
        let heights = flat_heights(6, 64);
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(-4, -4),
            Column::new(5, 2),
            &test_params(),
        );
        for pair in route.steps.windows(2) {
            assert_eq!(pair[0].column.chebyshev_distance(pair[1].column), 1);
        }
    }

    #[test]
    fn route_detours_around_blocked_wall() {
        let heights = flat_heights(6, 64);
        // A wall across x = 0 with a gap at z = 5.
        let blocked: BTreeSet<Column> = (-6..5).map(|z| Column::new(0, z)).collect();
        let route = plan_route(
            &heights,
            &blocked,
            Column::new(-4, 0),
            Column::new(4, 0),
            &test_params(),
        );
        assert!(!route.fallback);
        for step in &route.steps {
            assert!(!blocked.contains(&step.column), "route crossed the wall");
            assert!(heights.contains_key(&step.column));
        }
        // The only way through is the gap.
        assert!(route.visits(Column::new(0, 5)) || route.visits(Column::new(0, 6)));
    }

    #[test]
    fn elevation_penalty_steers_around_ridges() {
        let mut heights = flat_heights(6, 64);
        // A tall ridge across x = 0 except at z = 4, where it stays level.
        for z in -6..=6 {
            if z != 4 {
                heights.insert(Column::new(0, z), 80);
            }
        }
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(-4, 0),
            Column::new(4, 0),
            &test_params(),
        );
        assert!(!route.fallback);
        // Climbing 16 up and 16 down costs far more than walking the long
        // way to the level crossing.
        for step in &route.steps {
            assert_ne!(step.elevation, 80, "route climbed the ridge");
        }
    }

    #[test]
    fn blocked_goal_falls_back_to_direct_walk() {
        let heights = flat_heights(6, 64);
        let blocked: BTreeSet<Column> = [Column::new(4, 0)].into_iter().collect();
        let route = plan_route(
            &heights,
            &blocked,
            Column::new(0, 0),
            Column::new(4, 0),
            &test_params(),
        );
        assert!(route.fallback);
        assert_eq!(route.steps.first().unwrap().column, Column::new(0, 0));
        assert_eq!(route.steps.last().unwrap().column, Column::new(4, 0));
        // Direct walk takes Manhattan-distance unit steps.
        assert_eq!(route.len(), 5);
        assert!((route.cost - 4.0).abs() < 1e-4);
    }

    #[test]
    fn unreachable_goal_falls_back_after_exhausting_search() {
        let heights = flat_heights(6, 64);
        // Ring of blocked columns sealing the goal in.
        let goal = Column::new(4, 4);
        let blocked: BTreeSet<Column> = ColumnRect::around(goal, 1)
            .columns()
            .filter(|&c| c != goal)
            .collect();
        let route = plan_route(&heights, &blocked, Column::new(-4, -4), goal, &test_params());
        assert!(route.fallback);
        assert_eq!(route.steps.last().unwrap().column, goal);
    }

    #[test]
    fn direct_walk_alternates_axes() {
        // Endpoints outside any sampled terrain force the fallback.
        let heights = HeightMap::new();
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(0, 0),
            Column::new(3, 3),
            &test_params(),
        );
        assert!(route.fallback);
        let columns: Vec<Column> = route.steps.iter().map(|s| s.column).collect();
        assert_eq!(
            columns,
            vec![
                Column::new(0, 0),
                Column::new(1, 0),
                Column::new(1, 1),
                Column::new(2, 1),
                Column::new(2, 2),
                Column::new(3, 2),
                Column::new(3, 3),
            ]
        );
        // No sampled ground anywhere: every step takes the fallback elevation.
        assert!(route.steps.iter().all(|s| s.elevation == 64));
    }

    #[test]
    fn fallback_steps_keep_sampled_elevations_where_present() {
        let mut heights = HeightMap::new();
        heights.insert(Column::new(0, 0), 70);
        // Goal unsampled: fallback, but the start keeps its real elevation.
        let route = plan_route(
            &heights,
            &BTreeSet::new(),
            Column::new(0, 0),
            Column::new(2, 0),
            &test_params(),
        );
        assert!(route.fallback);
        assert_eq!(route.steps[0].elevation, 70);
        assert_eq!(route.steps[1].elevation, 64);
    }

    #[test]
    fn planning_is_deterministic() {
        let heights = flat_heights(8, 64);
        let blocked: BTreeSet<Column> = (-3..=3).map(|z| Column::new(2, z)).collect();
        let a = plan_route(
            &heights,
            &blocked,
            Column::new(-6, -2),
            Column::new(7, 3),
            &test_params(),
        );
        let b = plan_route(
            &heights,
            &blocked,
            Column::new(-6, -2),
            Column::new(7, 3),
            &test_params(),
        );
        assert_eq!(a, b);
    }
}
