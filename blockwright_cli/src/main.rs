// blockwright — CLI entry point.
//
// A thin front end over `blockwright_core` that operates on JSON world
// snapshot files: load the snapshot, run one command (plan and pave a path,
// capture or paste a template, stamp a preset structure), write the snapshot
// back. Commands that only read leave the file untouched.
//
// Usage:
//   blockwright <world.json> <command> [args] [options]
//   blockwright default-config
//
// Run with --help for the full command list. Progress goes to stdout;
// diagnostics from the library go through `log` (set RUST_LOG=debug to see
// scan and paste statistics).

use blockwright_core::Result;
use blockwright_core::builder::{self, HouseParams, SkyscraperParams};
use blockwright_core::config::BuildConfig;
use blockwright_core::path::plan_route;
use blockwright_core::pave::pave_route;
use blockwright_core::store::TemplateStore;
use blockwright_core::template::Template;
use blockwright_core::terrain::{self, SurfaceRule, TerrainPalette};
use blockwright_core::transform::{PasteOptions, Rotation};
use blockwright_core::types::{BlockPos, Column, ColumnRect};
use blockwright_core::world::MemoryWorld;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

/// Options that take a value. Everything else starting with `--` is either
/// a bare switch or an error.
const VALUE_FLAGS: [&str; 14] = [
    "--config",
    "--templates",
    "--width",
    "--height",
    "--depth",
    "--surface",
    "--rotate",
    "--floors",
    "--floor-height",
    "--radius",
    "--density",
    "--seed",
    "--extent",
    "--ground-y",
];

struct Cli {
    world: PathBuf,
    command: String,
    args: Vec<String>,
    flags: BTreeMap<String, String>,
    mirror: bool,
}

fn main() {
    env_logger::init();

    let (positionals, flags, mirror) = split_args();

    if positionals.first().map(String::as_str) == Some("default-config") {
        match serde_json::to_string_pretty(&BuildConfig::default()) {
            Ok(json) => {
                println!("{json}");
                return;
            }
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }

    if positionals.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let cli = Cli {
        world: PathBuf::from(&positionals[0]),
        command: positionals[1].clone(),
        args: positionals[2..].to_vec(),
        flags,
        mirror,
    };

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    match cli.command.as_str() {
        "init" => cmd_init(cli),
        "path" => cmd_path(cli, &config),
        "capture" => cmd_capture(cli, &config),
        "paste" => cmd_paste(cli, &config),
        "templates" => cmd_templates(&config),
        "house" => cmd_house(cli),
        "skyscraper" => cmd_skyscraper(cli),
        "meadow" => cmd_meadow(cli, &config),
        "info" => cmd_info(cli),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_init(cli: &Cli) -> Result<()> {
    let extent: u32 = cli.flag("--extent", 32);
    let ground_y: i32 = cli.flag("--ground-y", 64);
    let world = MemoryWorld::flat(extent, ground_y);
    world.save_json(&cli.world)?;
    println!(
        "Initialized a flat {}x{} world with ground at y={ground_y} ({} blocks).",
        2 * extent + 1,
        2 * extent + 1,
        world.block_count()
    );
    println!("Wrote {}.", cli.world.display());
    Ok(())
}

fn cmd_path(cli: &Cli, config: &BuildConfig) -> Result<()> {
    const USAGE: &str = "path <x1> <z1> <x2> <z2> [--width N] [--surface NAME]";
    let start = Column::new(cli.arg_int(0, USAGE), cli.arg_int(1, USAGE));
    let goal = Column::new(cli.arg_int(2, USAGE), cli.arg_int(3, USAGE));

    let mut paving = config.paving.clone();
    if let Some(width) = cli.flag_opt("--width") {
        paving.width = width;
    }
    if let Some(surface) = cli.flags.get("--surface") {
        paving.surface_block = surface.clone();
    }

    let mut world = load_world(&cli.world)?;
    let palette = TerrainPalette::from_classes(&config.materials);
    let bounds = ColumnRect::from_corners(start, goal).expanded(config.route.sample_margin);

    let heights = terrain::sample_bounds(&world, bounds, &config.scan, &palette, SurfaceRule::GroundOnly);
    let blocked = terrain::blocked_columns(&world, &heights, bounds, &config.scan, &palette);
    println!(
        "Sampled {} of {} columns ({} blocked).",
        heights.len(),
        bounds.column_count(),
        blocked.len()
    );

    let route = plan_route(&heights, &blocked, start, goal, &config.route);
    if route.fallback {
        println!("No clear route from {start} to {goal}; paving a direct line through obstructions.");
    }
    println!("Route: {} steps, cost {:.1}.", route.len(), route.cost);

    let report = pave_route(&mut world, &route, &paving);
    println!(
        "Paved {} surface cells with {}, cleared {} cells above.",
        report.surface_blocks, paving.surface_block, report.cleared_blocks
    );

    world.save_json(&cli.world)?;
    Ok(())
}

fn cmd_capture(cli: &Cli, config: &BuildConfig) -> Result<()> {
    const USAGE: &str = "capture <x1> <y1> <z1> <x2> <y2> <z2> <key>";
    let a = BlockPos::new(
        cli.arg_int(0, USAGE),
        cli.arg_int(1, USAGE),
        cli.arg_int(2, USAGE),
    );
    let b = BlockPos::new(
        cli.arg_int(3, USAGE),
        cli.arg_int(4, USAGE),
        cli.arg_int(5, USAGE),
    );
    let key = cli.arg_str(6, USAGE);

    let world = load_world(&cli.world)?;
    let template = Template::capture(&world, a, b);
    let store = TemplateStore::new(config.template_dir.clone());
    let path = store.save(key, &template)?;
    println!(
        "Captured {} blocks ({}x{}x{}) into {}.",
        template.block_count(),
        template.size_x(),
        template.size_y(),
        template.size_z(),
        path.display()
    );
    Ok(())
}

fn cmd_paste(cli: &Cli, config: &BuildConfig) -> Result<()> {
    const USAGE: &str = "paste <key> <x> <y> <z> [--rotate DEG] [--mirror]";
    let key = cli.arg_str(0, USAGE);
    let origin = BlockPos::new(
        cli.arg_int(1, USAGE),
        cli.arg_int(2, USAGE),
        cli.arg_int(3, USAGE),
    );

    let degrees: u32 = cli.flag("--rotate", 0);
    let Some(rotation) = Rotation::from_degrees(degrees) else {
        eprintln!("--rotate must be a multiple of 90 (got {degrees})");
        process::exit(1);
    };
    let options = PasteOptions {
        rotation,
        mirror_x: cli.mirror,
    };

    let store = TemplateStore::new(config.template_dir.clone());
    let template = store.load(key)?;
    let stamped = options.apply(&template);

    let mut world = load_world(&cli.world)?;
    let placed = stamped.paste(&mut world, origin);

    let mut notes = Vec::new();
    if options.mirror_x {
        notes.push("mirrored".to_string());
    }
    if options.rotation != Rotation::None {
        notes.push(format!("rotated {}", options.rotation));
    }
    let suffix = if notes.is_empty() {
        String::new()
    } else {
        format!(" ({})", notes.join(", "))
    };
    println!("Pasted '{key}' at {origin}{suffix}: {placed} blocks.");

    world.save_json(&cli.world)?;
    Ok(())
}

fn cmd_templates(config: &BuildConfig) -> Result<()> {
    let store = TemplateStore::new(config.template_dir.clone());
    let summaries = store.list()?;
    if summaries.is_empty() {
        println!("No templates in {}.", store.dir().display());
        return Ok(());
    }
    println!("Templates in {}:", store.dir().display());
    for summary in &summaries {
        println!(
            "  {}  {}x{}x{}  {} blocks",
            summary.key, summary.size[0], summary.size[1], summary.size[2], summary.block_count
        );
    }
    Ok(())
}

fn cmd_house(cli: &Cli) -> Result<()> {
    const USAGE: &str = "house <x> <y> <z> [--width N] [--height N] [--depth N]";
    let origin = BlockPos::new(
        cli.arg_int(0, USAGE),
        cli.arg_int(1, USAGE),
        cli.arg_int(2, USAGE),
    );

    let mut params = HouseParams::default();
    if let Some(width) = cli.flag_opt("--width") {
        params.width = width;
    }
    if let Some(height) = cli.flag_opt("--height") {
        params.height = height;
    }
    if let Some(depth) = cli.flag_opt("--depth") {
        params.depth = depth;
    }

    let mut world = load_world(&cli.world)?;
    builder::build_simple_house(&mut world, origin, params);
    println!(
        "Built a {}x{}x{} cottage at {origin}.",
        params.width, params.height, params.depth
    );

    world.save_json(&cli.world)?;
    Ok(())
}

fn cmd_skyscraper(cli: &Cli) -> Result<()> {
    const USAGE: &str =
        "skyscraper <x> <y> <z> [--floors N] [--floor-height N] [--width N] [--depth N]";
    let origin = BlockPos::new(
        cli.arg_int(0, USAGE),
        cli.arg_int(1, USAGE),
        cli.arg_int(2, USAGE),
    );

    let mut params = SkyscraperParams::default();
    if let Some(floors) = cli.flag_opt("--floors") {
        params.floors = floors;
    }
    if let Some(floor_height) = cli.flag_opt("--floor-height") {
        params.floor_height = floor_height;
    }
    if let Some(width) = cli.flag_opt("--width") {
        params.width = width;
    }
    if let Some(depth) = cli.flag_opt("--depth") {
        params.depth = depth;
    }

    let mut world = load_world(&cli.world)?;
    builder::build_skyscraper(&mut world, origin, params);
    println!(
        "Built a {}-floor tower ({}x{} footprint) at {origin}.",
        params.floors, params.width, params.depth
    );

    world.save_json(&cli.world)?;
    Ok(())
}

fn cmd_meadow(cli: &Cli, config: &BuildConfig) -> Result<()> {
    const USAGE: &str = "meadow <x> <z> [--radius N] [--density F] [--seed N]";
    let center = Column::new(cli.arg_int(0, USAGE), cli.arg_int(1, USAGE));
    let radius: u32 = cli.flag("--radius", 16);
    let density: f64 = cli.flag("--density", 0.25);
    if !(0.0..=1.0).contains(&density) {
        eprintln!("--density must be between 0 and 1 (got {density})");
        process::exit(1);
    }

    let mut rng = match cli.flag_opt("--seed") {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut world = load_world(&cli.world)?;
    let palette = TerrainPalette::from_classes(&config.materials);
    let placed = builder::scatter_meadow(
        &mut world,
        center,
        radius,
        &config.scan,
        &palette,
        density,
        &mut rng,
    );
    println!("Scattered {placed} plants within {radius} of {center}.");

    world.save_json(&cli.world)?;
    Ok(())
}

fn cmd_info(cli: &Cli) -> Result<()> {
    let world = load_world(&cli.world)?;
    println!("{}: {} blocks.", cli.world.display(), world.block_count());
    if let Some((min, max)) = world.bounds() {
        println!("Occupied region: {min} to {max}.");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument plumbing
// ---------------------------------------------------------------------------

/// Split `std::env::args()` into positionals, valued options, and the
/// `--mirror` switch. Unknown options and missing values exit immediately.
fn split_args() -> (Vec<String>, BTreeMap<String, String>, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut positionals = Vec::new();
    let mut flags = BTreeMap::new();
    let mut mirror = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mirror" => mirror = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            name if VALUE_FLAGS.contains(&name) => {
                i += 1;
                match args.get(i) {
                    Some(value) => {
                        flags.insert(name.to_string(), value.clone());
                    }
                    None => {
                        eprintln!("{name} requires a value");
                        process::exit(1);
                    }
                }
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
            other => positionals.push(other.to_string()),
        }
        i += 1;
    }

    (positionals, flags, mirror)
}

impl Cli {
    /// Positional command argument parsed as an integer; prints the command
    /// usage and exits when missing or unparsable.
    fn arg_int(&self, index: usize, usage: &str) -> i32 {
        self.args
            .get(index)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                eprintln!("Usage: blockwright <world.json> {usage}");
                process::exit(1);
            })
    }

    fn arg_str(&self, index: usize, usage: &str) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or_else(|| {
            eprintln!("Usage: blockwright <world.json> {usage}");
            process::exit(1);
        })
    }

    /// Option value parsed as `T`, or `default` when the option was not
    /// given. An unparsable value exits.
    fn flag<T: FromStr>(&self, name: &str, default: T) -> T {
        self.flag_opt(name).unwrap_or(default)
    }

    fn flag_opt<T: FromStr>(&self, name: &str) -> Option<T> {
        let value = self.flags.get(name)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                eprintln!("{name} requires a valid value (got '{value}')");
                process::exit(1);
            }
        }
    }
}

fn load_config(cli: &Cli) -> Result<BuildConfig> {
    let mut config = match cli.flags.get("--config") {
        Some(path) => BuildConfig::load(Path::new(path))?,
        None => BuildConfig::default(),
    };
    if let Some(dir) = cli.flags.get("--templates") {
        config.template_dir = PathBuf::from(dir);
    }
    Ok(config)
}

fn load_world(path: &Path) -> Result<MemoryWorld> {
    if !path.exists() {
        eprintln!(
            "World file not found: {} (create one with 'blockwright {} init')",
            path.display(),
            path.display()
        );
        process::exit(1);
    }
    MemoryWorld::load_json(path)
}

fn print_usage() {
    println!("Usage: blockwright <world.json> <command> [args] [options]");
    println!("       blockwright default-config");
    println!();
    println!("Commands:");
    println!("  init                                   Create a flat world snapshot");
    println!("  path <x1> <z1> <x2> <z2>               Plan and pave a route between two points");
    println!("  capture <x1> <y1> <z1> <x2> <y2> <z2> <key>");
    println!("                                         Save a region as a named template");
    println!("  paste <key> <x> <y> <z>                Stamp a stored template into the world");
    println!("  templates                              List stored templates");
    println!("  house <x> <y> <z>                      Build a cottage");
    println!("  skyscraper <x> <y> <z>                 Build a glass tower");
    println!("  meadow <x> <z>                         Scatter flowers over nearby grass");
    println!("  info                                   Show snapshot statistics");
    println!("  default-config                         Print the default config JSON");
    println!();
    println!("Options:");
    println!("  --config <file>      Build parameters JSON (see default-config)");
    println!("  --templates <dir>    Template directory (default: templates)");
    println!("  --extent <N>         init: flat world half-width (default: 32)");
    println!("  --ground-y <N>       init: surface elevation (default: 64)");
    println!("  --width <N>          path width, or house/skyscraper width");
    println!("  --surface <NAME>     path: surface block (default: minecraft:gravel)");
    println!("  --rotate <DEG>       paste: 0, 90, 180, or 270");
    println!("  --mirror             paste: mirror across the x axis");
    println!("  --height <N>         house: wall height (default: 5)");
    println!("  --depth <N>          house/skyscraper depth");
    println!("  --floors <N>         skyscraper: floor count (default: 12)");
    println!("  --floor-height <N>   skyscraper: blocks per floor (default: 5)");
    println!("  --radius <N>         meadow: radius in columns (default: 16)");
    println!("  --density <F>        meadow: cover chance per column (default: 0.25)");
    println!("  --seed <N>           meadow: RNG seed (default: from OS entropy)");
    println!("  --help, -h           Show this help");
}
