//! Seasonal surface simulation.
//!
//! A loaded chunk is revisited over and over for its whole lifetime; each pass
//! nudges the surface toward the current climate. Work is amortized against the
//! simulated clock: a chunk that was dormant for long gets a denser pass so its
//! surface catches up, a chunk visited again too soon is skipped outright.

use tracing::trace;

use glam::IVec3;

use crate::chunk::{Chunk, CHUNK_WIDTH, CHUNK_HEIGHT};
use crate::provider::Climate;
use crate::rand::LcgRandom;
use crate::{block, config};


/// Width of the random widening applied to the skip threshold, spreads chunk
/// updates apart so they do not all fire on the same server pass.
const DELTA_JITTER: i32 = 40;

/// Humidity above which dirt turns to grass, at or below which grass dies off.
const GRASS_HUMIDITY: f64 = 0.2;
/// Storm intensity above which snow accumulates.
const SNOW_WEATHER: f64 = 0.5;

/// Driver of the per-chunk seasonal passes. One instance per simulation worker,
/// its RNG is reseeded from coordinates and clock at every chunk so results do
/// not depend on the order chunks are visited in.
pub struct SeasonSimulator {
    seed: i64,
    rand: LcgRandom,
}

impl SeasonSimulator {

    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            rand: LcgRandom::new(seed),
        }
    }

    /// Run one seasonal pass over a loaded chunk at simulated time `now`.
    ///
    /// The first pass on a never-simulated chunk runs at full density. Later
    /// passes are skipped entirely while too little simulated time has elapsed,
    /// and otherwise sample columns sparsely in proportion to the elapsed time.
    /// The stored tick moves only on executed passes, so a skipped call leaves
    /// the chunk byte-identical.
    pub fn simulate<C: Climate>(&mut self, climate: &C, chunk: &mut Chunk, cx: i32, cy: i32, now: u64) {

        let chunk_seed = i64::wrapping_add(
            (cx as i64).wrapping_mul(341873128712),
            (cy as i64).wrapping_mul(132897987541));
        self.rand.set_seed(self.seed ^ chunk_seed ^ now as i64);

        let last = chunk.last_simulated_tick();
        let density = if last == 0 {
            // Never simulated, consider every column once.
            1
        } else {
            let delta = now.saturating_sub(last);
            let threshold = config::season_delta_min()
                + self.rand.next_int_bounded(DELTA_JITTER) as u64;
            if delta < threshold {
                return;
            }
            (config::season_budget() / delta).max(1) as i32
        };

        trace!("season pass on chunk {cx}/{cy}, density 1/{density}");

        for y in 0..CHUNK_WIDTH as i32 {
            for x in 0..CHUNK_WIDTH as i32 {
                if density > 1 && self.rand.next_int_bounded(density) != 0 {
                    continue;
                }
                let wx = cx * CHUNK_WIDTH as i32 + x;
                let wy = cy * CHUNK_WIDTH as i32 + y;
                self.simulate_column(climate, chunk, wx, wy);
            }
        }

        chunk.set_last_simulated_tick(now);

    }

    /// Mutate the topmost solid block of a column and the block above it.
    fn simulate_column<C: Climate>(&mut self, climate: &C, chunk: &mut Chunk, x: i32, y: i32) {

        let Some(top) = chunk.top_solid(x, y) else { return };

        // Snow is its own layer, the soil to simulate sits below it.
        let (surface_z, above_z) = if chunk.block(IVec3::new(x, y, top)) == block::SNOW_LAYER {
            (top - 1, top)
        } else {
            (top, top + 1)
        };
        if surface_z < 0 {
            return;
        }

        let surface_pos = IVec3::new(x, y, surface_z);
        let surface_id = chunk.block(surface_pos);
        let humidity = climate.humidity3(x, y);
        let temperature = climate.temperature(x, y, surface_z);

        if surface_id == block::DIRT && humidity > GRASS_HUMIDITY {
            let variant = self.rand.next_int_bounded(block::GRASS_VARIANTS as i32) as u8;
            chunk.set_block_and_data(surface_pos, block::GRASS, variant);
        } else if surface_id == block::GRASS && humidity <= GRASS_HUMIDITY {
            chunk.set_block_and_data(surface_pos, block::DIRT, 0);
        }

        if above_z >= CHUNK_HEIGHT as i32 {
            return;
        }
        let above_pos = IVec3::new(x, y, above_z);
        let (above_id, snow_level) = chunk.block_and_data(above_pos);

        if temperature < 0.0 && climate.weather(x, y) > SNOW_WEATHER {
            if above_id == block::AIR && !matches!(surface_id, block::WATER | block::LAVA) {
                chunk.set_block_and_data(above_pos, block::SNOW_LAYER, 0);
            } else if above_id == block::SNOW_LAYER && snow_level < block::SNOW_MAX_LEVEL {
                chunk.set_data(above_pos, snow_level + 1);
            }
        } else if temperature > 1.0 && above_id == block::SNOW_LAYER {
            if snow_level > 0 {
                chunk.set_data(above_pos, snow_level - 1);
            } else {
                chunk.set_block_and_data(above_pos, block::AIR, 0);
            }
        }

    }

}
