use anyhow::Context;
use clap::Parser;
use log::info;
use robot_tilegrid::{
    GridConfig, GridRobot, MemoryScene, Placement, SampleTileFactory, TileGrid, TileObject,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Map file to build
    map: PathBuf,
    /// TOML grid config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print placements as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("Loading config {}", path.display()))?,
        None => GridConfig::default(),
    };
    let registry = config.registry().context("Building tile registry")?;

    let text = std::fs::read_to_string(&args.map)
        .with_context(|| format!("Reading {}", args.map.display()))?;

    let mut grid = TileGrid::with_config(MemoryScene::<TileObject>::new(), config.clone())?;
    grid.set_factory(SampleTileFactory::new(registry));
    grid.set_map_source(text);
    grid.clean_up()
        .with_context(|| format!("Building tile grid from {}", args.map.display()))?;

    let scene = grid.container();
    let placements: Vec<Placement<&TileObject>> = grid
        .nodes()
        .filter_map(|((row, col), node)| {
            Some(Placement {
                row,
                col,
                position: scene.local_position(node)?,
                object: scene.object(node)?,
            })
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&placements)?);
    } else {
        for p in &placements {
            println!(
                "{:>3},{:<3} ({:>6.2}, {:>5.2}, {:>6.2})  {}",
                p.row, p.col, p.position.x, p.position.y, p.position.z, p.object.name
            );
        }
    }

    if let Some(robot) = grid
        .char_grid()
        .and_then(|g| GridRobot::locate(g.clone(), &config))
    {
        let (row, col) = robot.cell();
        info!("Robot starts at {row}x{col} facing {:?}", robot.heading());
    }

    Ok(())
}
