//! Runs a search on a random or hand-drawn grid and prints it as text.
//!
//! Usage:
//!   cargo run --example ascii_search -- --size 16 --density 0.3 --seed 7
//!   cargo run --example ascii_search -- --file maze.txt --frames
//!
//! Grid files use one glyph per cell: `.` empty, `#` obstacle, `S` start, `E` end.
//! Enable logging to see search progress:
//!   RUST_LOG=info cargo run --example ascii_search
use clap::Parser;
use grid_stepsearch::{
    CellState, Grid, Heuristic, Manhattan, SearchEngine, SearchError, Step, UniformCost,
};
use grid_util::point::Point;
use rand::prelude::*;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cells per side of a generated grid
    #[arg(long, default_value_t = 20)]
    size: usize,

    /// Fraction of generated cells that are obstacles
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Read the grid from a text file instead of generating one
    #[arg(long)]
    file: Option<PathBuf>,

    /// Order the frontier by cost plus Manhattan distance to the end
    #[arg(long)]
    manhattan: bool,

    /// Print the grid after every expansion
    #[arg(long)]
    frames: bool,
}

fn check_generator(args: &Args) -> Result<(), &'static str> {
    if args.size == 0 {
        return Err("--size must be at least 1");
    }
    if !(0.0..=1.0).contains(&args.density) {
        return Err("--density must be between 0 and 1");
    }
    Ok(())
}

fn generate(args: &Args) -> Grid {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut grid = Grid::build(args.size);
    for row in 0..args.size {
        for col in 0..args.size {
            if rng.gen_bool(args.density) {
                grid.mark(row, col, CellState::Obstacle);
            }
        }
    }
    grid.mark(0, 0, CellState::Start);
    grid.mark(args.size - 1, args.size - 1, CellState::End);
    grid
}

fn animate<H: Heuristic>(
    engine: &SearchEngine<H>,
    grid: &mut Grid,
    start: Point,
    end: Point,
    frames: bool,
) -> Result<usize, SearchError> {
    let mut changes = 0;
    let mut search = engine.begin(grid, start, end)?;
    loop {
        let step = search.step(&mut |_, _| changes += 1)?;
        match step {
            Step::Expanded(p) if frames => {
                println!("Expanded {:?}:\n{}", p, search.grid());
            }
            Step::Found(path) => {
                println!("Path of {} steps:", path.steps());
                for p in path.waypoints() {
                    println!("{:?}", p);
                }
                return Ok(changes);
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut grid = match &args.file {
        Some(path) => std::fs::read_to_string(path)?.parse::<Grid>()?,
        None => {
            check_generator(&args)?;
            generate(&args)
        }
    };
    let start = grid.find(CellState::Start).ok_or("grid has no start cell")?;
    let end = grid.find(CellState::End).ok_or("grid has no end cell")?;
    grid.rebuild_adjacency();
    println!("{}", grid);

    let result = if args.manhattan {
        animate(
            &SearchEngine::with_heuristic(Manhattan::new()),
            &mut grid,
            start,
            end,
            args.frames,
        )
    } else {
        animate(
            &SearchEngine::with_heuristic(UniformCost),
            &mut grid,
            start,
            end,
            args.frames,
        )
    };
    match result {
        Ok(changes) => println!("{} cell changes", changes),
        Err(SearchError::NoPathFound) => println!("No path exists"),
        Err(e) => return Err(e.into()),
    }
    println!("{}", grid);
    Ok(())
}
