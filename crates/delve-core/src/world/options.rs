//! Generator options and configuration file loading
//!
//! Options are fixed when the generator is constructed. They can be read
//! from an rc-style file made of `OPTIONS=` lines:
//!
//! ```text
//! # delve configuration
//! OPTIONS=seed:42,half_extent:20x15
//! OPTIONS=room_size:3-8,new_room_prob:0.02
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::OptionsError;
use crate::dungeon::{Coord, Rect};
use crate::rng::range_has_odd;

/// Upper bound for every extent and room size, keeping viewport and room
/// arithmetic far from `i32` overflow
pub const MAX_EXTENT: i32 = 1 << 16;

/// Where the layout seed comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedMode {
    /// Reproducible layout
    Fixed(u64),
    /// Derived once from the wall clock; layouts cannot be replayed
    Random,
}

impl SeedMode {
    /// Turn the mode into a concrete seed.
    pub fn resolve(self) -> u64 {
        match self {
            SeedMode::Fixed(seed) => seed,
            SeedMode::Random => {
                let seed = chrono::Utc::now().timestamp_millis() as u64;
                log::warn!("seed {seed} derived from the clock; this layout is not reproducible");
                seed
            }
        }
    }
}

impl Default for SeedMode {
    fn default() -> Self {
        SeedMode::Fixed(0)
    }
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonOptions {
    // Viewport
    pub half_extent_x: i32,
    pub half_extent_y: i32,

    // Startup region, full size, centered on the observer
    pub initial_area_x: i32,
    pub initial_area_y: i32,
    pub initial_attempts: u32,

    // Rooms, sizes drawn odd from [min, max)
    pub min_room_size: i32,
    pub max_room_size: i32,
    pub new_room_prob: f64,

    pub seed: SeedMode,
}

impl Default for DungeonOptions {
    fn default() -> Self {
        Self {
            half_extent_x: 20,
            half_extent_y: 15,

            initial_area_x: 40,
            initial_area_y: 30,
            initial_attempts: 200,

            min_room_size: 3,
            max_room_size: 8,
            new_room_prob: 0.02,

            seed: SeedMode::default(),
        }
    }
}

impl DungeonOptions {
    pub fn half_extent(&self) -> Coord {
        Coord::new(self.half_extent_x, self.half_extent_y)
    }

    /// The startup region centered on `center`.
    ///
    /// For even sizes this is `[center - size/2, center + size/2)`.
    pub fn initial_area_around(&self, center: Coord) -> Rect {
        let size = Coord::new(self.initial_area_x, self.initial_area_y);
        Rect::new(center - Coord::new(size.x / 2, size.y / 2), size)
    }

    /// Check every option against the generator's preconditions.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_extent("half_extent_x", self.half_extent_x, 1)?;
        check_extent("half_extent_y", self.half_extent_y, 1)?;

        // Room anchors are drawn odd from the initial area
        let min_area = if self.initial_attempts > 0 { 2 } else { 1 };
        check_extent("initial_area_x", self.initial_area_x, min_area)?;
        check_extent("initial_area_y", self.initial_area_y, min_area)?;

        check_room_sizes(self.min_room_size, self.max_room_size)?;

        if !(0.0..=1.0).contains(&self.new_room_prob) {
            return Err(OptionsError::ProbabilityOutOfRange(self.new_room_prob));
        }
        Ok(())
    }

    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }

        // Handle key:value and key=value options
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        // Boolean option, with negation
        let (negated, name) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "random_seed" => {
                self.seed = match (value, self.seed) {
                    (true, _) => SeedMode::Random,
                    (false, SeedMode::Fixed(seed)) => SeedMode::Fixed(seed),
                    (false, SeedMode::Random) => SeedMode::default(),
                };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "seed" => {
                self.seed = if value.eq_ignore_ascii_case("random") {
                    SeedMode::Random
                } else {
                    SeedMode::Fixed(value.parse().map_err(|_| invalid())?)
                };
            }
            "half_extent" => {
                (self.half_extent_x, self.half_extent_y) = parse_pair(value, 'x').ok_or_else(invalid)?;
            }
            "half_extent_x" => self.half_extent_x = value.parse().map_err(|_| invalid())?,
            "half_extent_y" => self.half_extent_y = value.parse().map_err(|_| invalid())?,
            "initial_area" => {
                (self.initial_area_x, self.initial_area_y) = parse_pair(value, 'x').ok_or_else(invalid)?;
            }
            "initial_area_x" => self.initial_area_x = value.parse().map_err(|_| invalid())?,
            "initial_area_y" => self.initial_area_y = value.parse().map_err(|_| invalid())?,
            "initial_attempts" => self.initial_attempts = value.parse().map_err(|_| invalid())?,
            "room_size" => {
                (self.min_room_size, self.max_room_size) = parse_pair(value, '-').ok_or_else(invalid)?;
            }
            "min_room_size" => self.min_room_size = value.parse().map_err(|_| invalid())?,
            "max_room_size" => self.max_room_size = value.parse().map_err(|_| invalid())?,
            "new_room_prob" => self.new_room_prob = value.parse().map_err(|_| invalid())?,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| OptionsError::Io(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# delve configuration file".to_string());
        lines.push(String::new());

        match self.seed {
            SeedMode::Fixed(seed) => lines.push(format!("OPTIONS=seed:{seed}")),
            SeedMode::Random => lines.push("OPTIONS=random_seed".to_string()),
        }
        lines.push(format!(
            "OPTIONS=half_extent:{}x{}",
            self.half_extent_x, self.half_extent_y
        ));
        lines.push(format!(
            "OPTIONS=initial_area:{}x{},initial_attempts:{}",
            self.initial_area_x, self.initial_area_y, self.initial_attempts
        ));
        lines.push(format!(
            "OPTIONS=room_size:{}-{},new_room_prob:{}",
            self.min_room_size, self.max_room_size, self.new_room_prob
        ));

        lines.join("\n") + "\n"
    }
}

fn check_extent(name: &'static str, value: i32, min: i32) -> Result<(), OptionsError> {
    if value < min {
        return Err(OptionsError::ExtentTooSmall { name, min, value });
    }
    if value > MAX_EXTENT {
        return Err(OptionsError::ExtentTooLarge {
            name,
            max: MAX_EXTENT,
            value,
        });
    }
    Ok(())
}

/// Room sizes are drawn odd from `[min, max)` and must be positive.
pub(crate) fn check_room_sizes(min: i32, max: i32) -> Result<(), OptionsError> {
    if !range_has_odd(min, max) {
        return Err(OptionsError::EmptyOddRange {
            name: "room_size",
            min,
            max,
        });
    }
    check_extent("min_room_size", min, 1)?;
    check_extent("max_room_size", max, 2)
}

/// Parse "AxB" style pairs
fn parse_pair(value: &str, sep: char) -> Option<(i32, i32)> {
    let (a, b) = value.split_once(sep)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}
