// Structure builders: box/wall/floor/roof primitives and preset buildings.
//
// The primitives stamp simple geometric shells — filled boxes, hollow rooms,
// perimeter walls with distinct corner posts, floors with an optional
// checkerboard, pitched stair roofs — and a few composite fixtures (doors,
// beds, window strips) whose state properties must come out right for the
// result to read as a building rather than a pile of blocks.
//
// On top of the primitives sit preset structures: a small cottage, a
// glass-curtain tower, and a flower meadow. The presets are deliberately
// opinionated about materials; callers wanting different palettes compose
// the primitives themselves.
//
// Everything here writes through the `World` trait and is deterministic;
// `scatter_meadow` takes its randomness from a caller-seeded generator.
//
// See also: `template.rs` — build once, capture, and stamp copies instead of
// rebuilding.

use crate::block::{BlockSpec, Facing};
use crate::config::ScanParams;
use crate::terrain::{self, SurfaceRule, TerrainPalette};
use crate::types::{BlockPos, Column};
use crate::world::World;
use rand::Rng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Box and wall primitives
// ---------------------------------------------------------------------------

/// Fill the box between `a` and `b` (inclusive, either corner order).
pub fn fill_box<W: World>(world: &mut W, a: BlockPos, b: BlockPos, block: &BlockSpec) {
    let min = a.min_corner(b);
    let max = a.max_corner(b);
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                world.set(BlockPos::new(x, y, z), block.clone());
            }
        }
    }
}

/// Empty every cell in the box between `a` and `b`.
pub fn clear_box<W: World>(world: &mut W, a: BlockPos, b: BlockPos) {
    let min = a.min_corner(b);
    let max = a.max_corner(b);
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                world.clear(BlockPos::new(x, y, z));
            }
        }
    }
}

/// Build the six faces of the box and empty its interior.
pub fn hollow_box<W: World>(world: &mut W, a: BlockPos, b: BlockPos, block: &BlockSpec) {
    let min = a.min_corner(b);
    let max = a.max_corner(b);
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let pos = BlockPos::new(x, y, z);
                let on_face = x == min.x
                    || x == max.x
                    || y == min.y
                    || y == max.y
                    || z == min.z
                    || z == max.z;
                if on_face {
                    world.set(pos, block.clone());
                } else {
                    world.clear(pos);
                }
            }
        }
    }
}

/// Build the four perimeter walls of the footprint between `a` and `b`,
/// spanning their Y range. No floor, no ceiling. The four corner columns use
/// `corner` when given, `wall` otherwise.
pub fn build_walls<W: World>(
    world: &mut W,
    a: BlockPos,
    b: BlockPos,
    wall: &BlockSpec,
    corner: Option<&BlockSpec>,
) {
    let min = a.min_corner(b);
    let max = a.max_corner(b);
    let corner = corner.unwrap_or(wall);
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            for z in min.z..=max.z {
                let edge_x = x == min.x || x == max.x;
                let edge_z = z == min.z || z == max.z;
                if edge_x && edge_z {
                    world.set(BlockPos::new(x, y, z), corner.clone());
                } else if edge_x || edge_z {
                    world.set(BlockPos::new(x, y, z), wall.clone());
                }
            }
        }
    }
}

/// Lay a single-layer floor at `y` over the footprint between `a` and `b`.
/// With `checker`, cells of odd coordinate parity take the alternate block.
pub fn build_floor<W: World>(
    world: &mut W,
    a: Column,
    b: Column,
    y: i32,
    block: &BlockSpec,
    checker: Option<&BlockSpec>,
) {
    let min_x = a.x.min(b.x);
    let max_x = a.x.max(b.x);
    let min_z = a.z.min(b.z);
    let max_z = a.z.max(b.z);
    for x in min_x..=max_x {
        for z in min_z..=max_z {
            let spec = match checker {
                Some(alt) if (x + z).rem_euclid(2) == 1 => alt,
                _ => block,
            };
            world.set(BlockPos::new(x, y, z), spec.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Roofs
// ---------------------------------------------------------------------------

/// Which horizontal axis a pitched roof's ridge line runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoofAxis {
    AlongX,
    AlongZ,
}

/// Build a pitched roof over the footprint between `a` and `b`, rising one
/// block per course from `base_y`. Courses are stairs facing uphill from
/// both eaves; when the two sides meet on a shared center row, the ridge is
/// capped with top-half slabs instead.
pub fn build_pitched_roof<W: World>(
    world: &mut W,
    a: Column,
    b: Column,
    base_y: i32,
    stair: &str,
    slab: &str,
    axis: RoofAxis,
) {
    let min_x = a.x.min(b.x);
    let max_x = a.x.max(b.x);
    let min_z = a.z.min(b.z);
    let max_z = a.z.max(b.z);

    let stair_course = |facing: Facing| {
        BlockSpec::new(stair)
            .with_prop("facing", facing.as_str())
            .with_prop("half", "bottom")
            .with_prop("shape", "straight")
            .with_prop("waterlogged", "false")
    };
    let ridge_slab = BlockSpec::new(slab)
        .with_prop("type", "top")
        .with_prop("waterlogged", "false");

    match axis {
        RoofAxis::AlongZ => {
            let half_span = (max_x - min_x) / 2;
            for i in 0..=half_span {
                let y = base_y + i;
                for z in min_z..=max_z {
                    if i == half_span && (max_x - min_x) % 2 == 0 {
                        world.set(BlockPos::new(min_x + i, y, z), ridge_slab.clone());
                    } else {
                        world.set(BlockPos::new(min_x + i, y, z), stair_course(Facing::East));
                        world.set(BlockPos::new(max_x - i, y, z), stair_course(Facing::West));
                    }
                }
            }
        }
        RoofAxis::AlongX => {
            let half_span = (max_z - min_z) / 2;
            for i in 0..=half_span {
                let y = base_y + i;
                for x in min_x..=max_x {
                    if i == half_span && (max_z - min_z) % 2 == 0 {
                        world.set(BlockPos::new(x, y, min_z + i), ridge_slab.clone());
                    } else {
                        world.set(BlockPos::new(x, y, min_z + i), stair_course(Facing::South));
                        world.set(BlockPos::new(x, y, max_z - i), stair_course(Facing::North));
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Place a two-block door with its lower half at `pos`.
pub fn place_door<W: World>(world: &mut W, pos: BlockPos, material: &str, facing: Facing) {
    let door = |half: &str| {
        BlockSpec::new(format!("{material}_door"))
            .with_prop("half", half)
            .with_prop("facing", facing.as_str())
            .with_prop("hinge", "left")
            .with_prop("open", "false")
            .with_prop("powered", "false")
    };
    world.set(pos, door("lower"));
    world.set(BlockPos::new(pos.x, pos.y + 1, pos.z), door("upper"));
}

/// Place a two-block bed with its foot at `pos` and its head one block
/// toward `facing`.
pub fn place_bed<W: World>(world: &mut W, pos: BlockPos, facing: Facing, color: &str) {
    let part = |name: &str| {
        BlockSpec::new(format!("{color}_bed"))
            .with_prop("facing", facing.as_str())
            .with_prop("part", name)
            .with_prop("occupied", "false")
    };
    let (dx, dz) = facing.offset();
    world.set(pos, part("foot"));
    world.set(BlockPos::new(pos.x + dx, pos.y, pos.z + dz), part("head"));
}

/// Punch glass panes into the perimeter walls of the footprint between `a`
/// and `b` at regular spacing, across the full Y range. Corner columns are
/// left alone; a non-positive spacing places nothing.
pub fn place_windows<W: World>(world: &mut W, a: BlockPos, b: BlockPos, spacing: i32) {
    if spacing <= 0 {
        return;
    }
    let min = a.min_corner(b);
    let max = a.max_corner(b);
    let pane = BlockSpec::new("glass_pane");
    for y in min.y..=max.y {
        for x in (min.x + 1)..max.x {
            if (x - min.x) % spacing == 0 {
                world.set(BlockPos::new(x, y, min.z), pane.clone());
                world.set(BlockPos::new(x, y, max.z), pane.clone());
            }
        }
        for z in (min.z + 1)..max.z {
            if (z - min.z) % spacing == 0 {
                world.set(BlockPos::new(min.x, y, z), pane.clone());
                world.set(BlockPos::new(max.x, y, z), pane.clone());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Preset: cottage
// ---------------------------------------------------------------------------

/// Dimensions for [`build_simple_house`].
#[derive(Clone, Copy, Debug)]
pub struct HouseParams {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Default for HouseParams {
    fn default() -> Self {
        Self {
            width: 7,
            height: 5,
            depth: 7,
        }
    }
}

/// Build a small cottage with its floor corner at `origin`: cobblestone
/// foundation, plank walls on log corner posts, slab roof, door on the west
/// face with a stoop, windows, and basic furnishing.
pub fn build_simple_house<W: World>(world: &mut W, origin: BlockPos, params: HouseParams) {
    let HouseParams {
        width: w,
        height: h,
        depth: d,
    } = params;
    let BlockPos { x: bx, y: by, z: bz } = origin;
    let far = Column::new(bx + w - 1, bz + d - 1);

    // Foundation and floor.
    build_floor(world, origin.column(), far, by - 1, &BlockSpec::new("cobblestone"), None);
    build_floor(world, origin.column(), far, by, &BlockSpec::new("oak_planks"), None);

    // Walls with log corner posts, then an emptied interior.
    build_walls(
        world,
        BlockPos::new(bx, by + 1, bz),
        BlockPos::new(bx + w - 1, by + h - 1, bz + d - 1),
        &BlockSpec::new("oak_planks"),
        Some(&BlockSpec::new("oak_log")),
    );
    clear_box(
        world,
        BlockPos::new(bx + 1, by + 1, bz + 1),
        BlockPos::new(bx + w - 2, by + h - 1, bz + d - 2),
    );

    // Flat slab roof.
    let slab_roof = BlockSpec::new("oak_slab")
        .with_prop("type", "top")
        .with_prop("waterlogged", "false");
    build_floor(world, origin.column(), far, by + h, &slab_roof, None);

    // Door on the west face, centered.
    let door_z = bz + d / 2;
    place_door(world, BlockPos::new(bx, by + 1, door_z), "oak", Facing::West);

    // Windows flanking the door and centered on the other three walls.
    let mid_x = bx + w / 2;
    let mid_z = bz + d / 2;
    let pane = BlockSpec::new("glass_pane");
    for wy in [by + 2, by + 3] {
        world.set(BlockPos::new(bx, wy, mid_z + 1), pane.clone());
        world.set(BlockPos::new(bx, wy, mid_z - 1), pane.clone());
        world.set(BlockPos::new(bx + w - 1, wy, mid_z), pane.clone());
        world.set(BlockPos::new(mid_x, wy, bz), pane.clone());
        world.set(BlockPos::new(mid_x, wy, bz + d - 1), pane.clone());
    }

    // Furnishing along the east wall, bed in the south-west corner, a
    // glowstone lamp under the roof.
    world.set(
        BlockPos::new(bx + w - 2, by + 1, bz + 1),
        BlockSpec::new("crafting_table"),
    );
    world.set(
        BlockPos::new(bx + w - 2, by + 1, bz + 2),
        BlockSpec::new("furnace")
            .with_prop("facing", "west")
            .with_prop("lit", "false"),
    );
    world.set(
        BlockPos::new(bx + w - 2, by + 1, bz + d - 2),
        BlockSpec::new("chest")
            .with_prop("facing", "west")
            .with_prop("type", "single")
            .with_prop("waterlogged", "false"),
    );
    place_bed(world, BlockPos::new(bx + 1, by + 1, bz + d - 2), Facing::East, "red");
    world.set(
        BlockPos::new(bx + w / 2, by + h - 1, bz + d / 2),
        BlockSpec::new("glowstone"),
    );

    // Stoop in front of the door.
    world.set(
        BlockPos::new(bx - 1, by, door_z),
        BlockSpec::new("oak_stairs")
            .with_prop("facing", "east")
            .with_prop("half", "bottom")
            .with_prop("shape", "straight")
            .with_prop("waterlogged", "false"),
    );

    log::debug!("built cottage at {origin}, {w}x{h}x{d}");
}

// ---------------------------------------------------------------------------
// Preset: tower
// ---------------------------------------------------------------------------

/// Dimensions for [`build_skyscraper`].
#[derive(Clone, Copy, Debug)]
pub struct SkyscraperParams {
    pub width: i32,
    pub depth: i32,
    pub floors: u32,
    pub floor_height: i32,
}

impl Default for SkyscraperParams {
    fn default() -> Self {
        Self {
            width: 15,
            depth: 15,
            floors: 12,
            floor_height: 5,
        }
    }
}

/// Stained glass curtain colors, cycled per floor.
const CURTAIN_COLORS: [&str; 4] = [
    "light_blue_stained_glass",
    "white_stained_glass",
    "light_gray_stained_glass",
    "cyan_stained_glass",
];

/// Build a glass-curtain tower with its ground-floor corner at `origin`:
/// deepslate foundation, iron corner columns with mullions every fourth
/// block, checkerboard floor slabs, a colonnaded entrance on the west face,
/// and a parapet roof with a lightning spire.
pub fn build_skyscraper<W: World>(world: &mut W, origin: BlockPos, params: SkyscraperParams) {
    let SkyscraperParams {
        width: w,
        depth: d,
        floors,
        floor_height: floor_h,
    } = params;
    let BlockPos { x: bx, y: by, z: bz } = origin;

    // Foundation pad, one block proud of the footprint, three deep.
    fill_box(
        world,
        BlockPos::new(bx - 1, by - 3, bz - 1),
        BlockPos::new(bx + w, by - 1, bz + d),
        &BlockSpec::new("deepslate_bricks"),
    );

    for fl in 0..floors as i32 {
        let fy = by + fl * floor_h;
        log::debug!("tower floor {}/{floors} at y={fy}", fl + 1);
        let curtain = BlockSpec::new(CURTAIN_COLORS[fl as usize % CURTAIN_COLORS.len()]);

        for y in fy..fy + floor_h {
            let ry = y - fy;
            for x in bx..bx + w {
                for z in bz..bz + d {
                    let edge_x = x == bx || x == bx + w - 1;
                    let edge_z = z == bz || z == bz + d - 1;
                    let pos = BlockPos::new(x, y, z);

                    if !(edge_x || edge_z) {
                        // Interior: slab floor, stone ceiling, open space.
                        if ry == 0 {
                            let spec = if (x + z).rem_euclid(2) == 0 {
                                BlockSpec::new("polished_diorite")
                            } else {
                                BlockSpec::new("polished_andesite")
                            };
                            world.set(pos, spec);
                        } else if ry == floor_h - 1 {
                            world.set(pos, BlockSpec::new("smooth_stone"));
                        } else {
                            world.clear(pos);
                        }
                    } else if edge_x && edge_z {
                        world.set(pos, BlockSpec::new("iron_block"));
                    } else if ry == 0 || ry == floor_h - 1 {
                        world.set(pos, BlockSpec::new("smooth_stone"));
                    } else if (1..=3).contains(&ry) {
                        // Curtain wall with an iron mullion every 4 blocks.
                        let along = if edge_x { z - bz } else { x - bx };
                        if along % 4 == 0 {
                            world.set(pos, BlockSpec::new("iron_block"));
                        } else {
                            world.set(pos, curtain.clone());
                        }
                    } else {
                        world.set(pos, BlockSpec::new("smooth_stone"));
                    }
                }
            }
        }

        // Ceiling lanterns near the four interior corners.
        for lx in [bx + 3, bx + w - 4] {
            for lz in [bz + 3, bz + d - 4] {
                world.set(
                    BlockPos::new(lx, fy + floor_h - 1, lz),
                    BlockSpec::new("sea_lantern"),
                );
            }
        }
    }

    // Entrance: a carved opening on the west face with pillars, lintel, and
    // entry stairs.
    let door_z = bz + d / 2;
    for dz_off in -2..=2 {
        let z = door_z + dz_off;
        clear_box(
            world,
            BlockPos::new(bx, by + 1, z),
            BlockPos::new(bx, by + 3, z),
        );
        world.set(BlockPos::new(bx, by, z), BlockSpec::new("polished_blackstone"));
    }
    for dz_off in [-3, 3] {
        let z = door_z + dz_off;
        fill_box(
            world,
            BlockPos::new(bx - 1, by, z),
            BlockPos::new(bx - 1, by + 4, z),
            &BlockSpec::new("quartz_pillar").with_prop("axis", "y"),
        );
        world.set(BlockPos::new(bx - 1, by + 5, z), BlockSpec::new("sea_lantern"));
    }
    for dz_off in -3..=3 {
        world.set(
            BlockPos::new(bx - 1, by + 4, door_z + dz_off),
            BlockSpec::new("polished_blackstone"),
        );
    }
    for dz_off in -2..=2 {
        world.set(
            BlockPos::new(bx - 1, by, door_z + dz_off),
            BlockSpec::new("polished_blackstone_stairs")
                .with_prop("facing", "east")
                .with_prop("half", "bottom")
                .with_prop("shape", "straight")
                .with_prop("waterlogged", "false"),
        );
    }

    // Roof: slab deck over the extended footprint, parapet, spire.
    let top_y = by + floors as i32 * floor_h;
    let deck = BlockSpec::new("smooth_stone_slab")
        .with_prop("type", "top")
        .with_prop("waterlogged", "false");
    build_floor(
        world,
        Column::new(bx - 1, bz - 1),
        Column::new(bx + w, bz + d),
        top_y,
        &deck,
        None,
    );

    let parapet = BlockSpec::new("stone_brick_wall")
        .with_prop("up", "true")
        .with_prop("north", "none")
        .with_prop("south", "none")
        .with_prop("east", "none")
        .with_prop("west", "none")
        .with_prop("waterlogged", "false");
    for x in bx..bx + w {
        for z in [bz, bz + d - 1] {
            world.set(BlockPos::new(x, top_y + 1, z), parapet.clone());
        }
    }
    for z in bz..bz + d {
        for x in [bx, bx + w - 1] {
            world.set(BlockPos::new(x, top_y + 1, z), parapet.clone());
        }
    }

    let spire = Column::new(bx + w / 2, bz + d / 2);
    fill_box(
        world,
        spire.at(top_y + 1),
        spire.at(top_y + 7),
        &BlockSpec::new("iron_block"),
    );
    world.set(spire.at(top_y + 8), BlockSpec::new("sea_lantern"));
    world.set(spire.at(top_y + 9), BlockSpec::new("lightning_rod"));

    log::debug!(
        "built tower at {origin}, {w}x{}x{d}, {floors} floors",
        floors as i32 * floor_h
    );
}

// ---------------------------------------------------------------------------
// Preset: meadow
// ---------------------------------------------------------------------------

/// Ground cover scattered by [`scatter_meadow`].
const MEADOW_COVER: [&str; 6] = [
    "short_grass",
    "dandelion",
    "poppy",
    "oxeye_daisy",
    "azure_bluet",
    "cornflower",
];

/// Scatter flowers and grass over grass blocks within `radius` of `center`.
///
/// Each grass-topped column with an empty cell above rolls `density` for a
/// plant from the cover table. Columns are visited in heightmap order, so a
/// given seed always produces the same meadow. Returns the number of plants
/// placed.
pub fn scatter_meadow<W: World + Sync>(
    world: &mut W,
    center: Column,
    radius: u32,
    scan: &ScanParams,
    palette: &TerrainPalette,
    density: f64,
    rng: &mut StdRng,
) -> usize {
    let heights = terrain::sample_around(world, center, radius, scan, palette, SurfaceRule::AnySurface);

    let mut placed = 0;
    for (&column, &ground) in &heights {
        let surface = column.at(ground);
        let is_grass = world
            .get(surface)
            .is_some_and(|spec| spec.path() == "grass_block");
        if !is_grass || !world.is_empty_at(column.at(ground + 1)) {
            continue;
        }
        if rng.gen_bool(density) {
            let cover = MEADOW_COVER[rng.gen_range(0..MEADOW_COVER.len())];
            world.set(column.at(ground + 1), BlockSpec::new(cover));
            placed += 1;
        }
    }

    log::debug!("scattered {placed} plants around {center} (radius {radius})");
    placed
}
