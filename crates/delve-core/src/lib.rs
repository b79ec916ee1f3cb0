//! delve-core: streaming procedural dungeon generation
//!
//! Generates a tile-based dungeon around a moving observer and streams
//! tiles in and out of an active working set as the observer moves.
//! Tiles are created once per coordinate and afterwards only toggled,
//! so already-committed structure is never regenerated.
//!
//! Presentation is delegated to a [`dungeon::TileRenderer`]; this crate
//! performs no I/O beyond optional options-file loading.

pub mod dungeon;
pub mod world;

mod rng;

pub use rng::{GameRng, range_has_odd};

#[cfg(test)]
pub(crate) mod test_support {
    /// Route `log` output through the test harness.
    pub fn init_test_log() {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().filter_or("DELVE_LOG", "trace"),
        )
        .is_test(true)
        .try_init();
    }
}
