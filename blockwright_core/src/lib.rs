// blockwright_core — voxel world survey, routing, and construction library.
//
// This crate contains all of blockwright's logic: block/position types, the
// `World` storage trait with an in-memory implementation, terrain surface
// sampling, A* route planning, road paving, structure templates with
// rotation/mirror transforms, a JSON template store, and preset structure
// builders. It has no I/O beyond explicit JSON load/save and can be tested
// and benchmarked headless.
//
// Module overview:
// - `types.rs`:     BlockPos, Column, ColumnRect — integer grid geometry.
// - `block.rs`:     BlockSpec (namespaced id + state props), Facing, wire records.
// - `world.rs`:     The `World` trait + sparse `MemoryWorld` with JSON snapshots.
// - `config.rs`:    BuildConfig — scan/route/paving parameters and material classes.
// - `terrain.rs`:   Top-down surface sampling into heightmaps; obstruction masks.
// - `path.rs`:      A* route planning over heightmaps with direct-walk fallback.
// - `pave.rs`:      Road surfacing and headroom clearing along a route.
// - `template.rs`:  Region capture into relative-coordinate templates; paste.
// - `transform.rs`: Quarter-turn rotation and mirroring of templates.
// - `store.rs`:     Template persistence as JSON documents under a directory.
// - `builder.rs`:   Box/wall/roof primitives and preset structures.
// - `error.rs`:     The crate-wide `Error` enum and `Result` alias.
//
// The companion crate `blockwright_cli` wraps this library as a command-line
// tool over world snapshot files.
//
// **Critical constraint: determinism.** Every operation is a pure function of
// world contents and parameters: heightmaps and obstruction sets are ordered
// maps, route ties break by insertion order, and the meadow builder draws
// from a caller-seeded PRNG. Re-running a pipeline on the same snapshot
// produces an identical snapshot. `FxHashMap`/`FxHashSet` appear only as
// lookup tables whose iteration order is never observed.

pub mod block;
pub mod builder;
pub mod config;
pub mod error;
pub mod path;
pub mod pave;
pub mod store;
pub mod template;
pub mod terrain;
pub mod transform;
pub mod types;
pub mod world;

pub use error::{Error, Result};
