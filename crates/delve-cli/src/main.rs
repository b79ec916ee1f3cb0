//! Headless dungeon walker
//!
//! Builds a generator, walks the observer along a move script and prints
//! what is visible at the end.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use delve_core::dungeon::{Coord, DungeonGenerator, Observer, TileKind, TileRenderer};
use delve_core::world::{DungeonOptions, SeedMode};

/// Walk a procedurally generated dungeon
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Stream a procedural dungeon around a moving observer", long_about = None)]
struct Args {
    /// Options file (OPTIONS= lines)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Layout seed
    #[arg(short = 's', long = "seed", conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Seed from the clock (not reproducible)
    #[arg(short = 'r', long = "random-seed")]
    random_seed: bool,

    /// Moves to replay: U, D, L, R (case-insensitive)
    #[arg(short = 'm', long = "moves", default_value = "")]
    moves: String,

    /// Print the layout as JSON instead of a map
    #[arg(long = "json")]
    json: bool,

    /// Write the effective options to this file and exit
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,
}

/// Keeps what a terminal would show for each tile
#[derive(Default)]
struct TextRenderer {
    cells: BTreeMap<Coord, (TileKind, bool)>,
}

impl TileRenderer for TextRenderer {
    type Handle = Coord;

    fn create_visual(&mut self, at: Coord, kind: TileKind) -> Coord {
        self.cells.insert(at, (kind, false));
        at
    }

    fn set_visual_active(&mut self, handle: &Coord, active: bool) {
        if let Some(cell) = self.cells.get_mut(handle) {
            cell.1 = active;
        }
    }
}

impl TextRenderer {
    /// Active tiles as text, top row first. `+y` is up.
    fn draw(&self, observer: Coord) -> String {
        let active: Vec<_> = self.cells.iter().filter(|(_, (_, on))| *on).collect();
        let Some(min_x) = active.iter().map(|(c, _)| c.x).min() else {
            return String::new();
        };
        let max_x = active.iter().map(|(c, _)| c.x).max().unwrap_or(min_x);
        let min_y = active.iter().map(|(c, _)| c.y).min().unwrap_or(0);
        let max_y = active.iter().map(|(c, _)| c.y).max().unwrap_or(min_y);

        let mut out = String::new();
        for y in (min_y..=max_y).rev() {
            for x in min_x..=max_x {
                let at = Coord::new(x, y);
                let glyph = match self.cells.get(&at) {
                    _ if at == observer => '@',
                    Some((kind, true)) => kind.glyph(),
                    _ => ' ',
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

fn parse_moves(script: &str) -> anyhow::Result<Vec<(i32, i32)>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'U' => Ok((0, 1)),
            'D' => Ok((0, -1)),
            'L' => Ok((-1, 0)),
            'R' => Ok((1, 0)),
            other => bail!("unknown move '{other}' (expected U, D, L or R)"),
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("DELVE_LOG", "warn")).init();

    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => DungeonOptions::load_from_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => DungeonOptions::default(),
    };
    if let Some(seed) = args.seed {
        options.seed = SeedMode::Fixed(seed);
    }
    if args.random_seed {
        options.seed = SeedMode::Random;
    }

    if let Some(path) = &args.save_config {
        options.validate()?;
        options
            .save_to_file(path)
            .with_context(|| format!("writing options to {}", path.display()))?;
        return Ok(());
    }

    let moves = parse_moves(&args.moves)?;

    let mut dgen = DungeonGenerator::new(options, TextRenderer::default())?;
    let mut observer = Observer::default();
    dgen.start(observer.position())?;
    for (dx, dy) in moves {
        dgen.step_observer(&mut observer, dx, dy)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dgen.snapshot())?);
    } else {
        print!("{}", dgen.renderer().draw(observer.position()));
        println!(
            "seed {}  rooms {}  tiles {}  at {}",
            dgen.seed(),
            dgen.rooms().len(),
            dgen.tiles().len(),
            observer.position()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(parse_moves("rR u\nLd").unwrap(), vec![(1, 0), (1, 0), (0, 1), (-1, 0), (0, -1)]);
        assert!(parse_moves("RX").is_err());
        assert!(parse_moves("").unwrap().is_empty());
    }

    #[test]
    fn test_draw_marks_observer() {
        let mut r = TextRenderer::default();
        for (x, kind) in [(0, TileKind::Wall), (1, TileKind::Floor), (2, TileKind::Floor)] {
            let h = r.create_visual(Coord::new(x, 0), kind);
            r.set_visual_active(&h, true);
        }
        assert_eq!(r.draw(Coord::new(1, 0)), "#@.\n");

        r.set_visual_active(&Coord::new(0, 0), false);
        assert_eq!(r.draw(Coord::new(5, 5)), "..\n");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["delve", "--seed", "42", "-m", "RRU", "--json"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert!(args.json);
        assert!(Args::try_parse_from(["delve", "--seed", "1", "--random-seed"]).is_err());
    }
}
