//! Terrain column shaping and stone stratum classification.
//!
//! A column is shaped in a single downward scan: air and water above the surface,
//! then bedrock, magma, carved cave bands and solid rock below it, with the solid
//! cells refined into beach sand, topsoil or raw stone. All per-column randomness
//! comes from the worker RNG reseeded for this column by the caller, so columns
//! are independent of each other and of generation order.

use glam::IVec3;

use crate::chunk::Chunk;
use crate::provider::{TerrainShape, Climate};
use crate::rand::LcgRandom;
use crate::block;

use super::{StrataGenerator, GenEffect};


/// Seam between stratum band 0 and band 1, in shifted depth.
const BAND_SEAM_LOW: f64 = 96.0;
/// Seam between band 1 and the top bands, in shifted depth.
const BAND_SEAM_HIGH: f64 = 240.0;
/// Mountains push the whole stratum profile down by up to this many blocks.
const MOUNTAIN_SHIFT: f64 = 300.0;
/// Per-column jitter of the stratum seams, breaks flat band boundaries.
const STRATUM_JITTER: f64 = 6.0;

/// Sandstone layering only appears above this raw Z.
const SANDSTONE_FLOOR: i32 = 240;
/// Beach sand never reaches deeper than this below the surface.
const BEACH_MAX_DEPTH: i32 = 9;


/// Stratum band index for a shifted depth, 0 deepest. Bands 2 and 3 are mutually
/// exclusive alternatives for the top of the profile, picked by volcanic activity.
#[inline]
pub fn stratum_band(z_shifted: f64, volcano_factor: f64) -> usize {
    if z_shifted <= BAND_SEAM_LOW {
        0
    } else if z_shifted <= BAND_SEAM_HIGH {
        1
    } else if volcano_factor > 0.4 {
        2
    } else {
        3
    }
}

/// Resolve the stone type at a point, with the caller-provided seam jitter.
/// This is the same classification the shaper applies, re-exposed so the
/// populator can probe for stratum boundaries.
pub fn stratum_stone(shape: &impl TerrainShape, x: i32, y: i32, z: i32, jitter: f64) -> u8 {
    let shifted = z as f64 + shape.mountain_factor(x, y) * MOUNTAIN_SHIFT + jitter;
    shape.band_stone(stratum_band(shifted, shape.volcano_factor(x, y)), x, y)
}

/// Shape one column of the chunk, from `dz - 1` down to `z_floor`.
///
/// The RNG must have been reseeded for this column beforehand; every draw below
/// is per-column state and happens in a fixed order.
pub fn shape_column<S: TerrainShape, C: Climate>(
    gen: &StrataGenerator<S, C>,
    rand: &mut LcgRandom,
    chunk: &mut Chunk,
    x: i32,
    y: i32,
    z_floor: i32,
    dz: i32,
    effects: &mut Vec<GenEffect>,
) {

    let shape = gen.shape();
    let registry = gen.registry();
    let profile = shape.layer_profile(x, y);

    let mountain_shift = shape.mountain_factor(x, y) * MOUNTAIN_SHIFT;
    let volcano_factor = shape.volcano_factor(x, y);

    // Per-column draws, fixed order.
    let jitter = rand.next_float() as f64 * STRATUM_JITTER;
    let sand_depth = rand.next_int_bounded(BEACH_MAX_DEPTH);
    let soil_depth = 1 + rand.next_int_bounded(3);
    let grass_data = rand.next_int_bounded(block::GRASS_VARIANTS as i32) as u8;
    let lava_pocket = profile.lava_chance > 0
        && rand.next_int_bounded(profile.lava_chance) == 0;

    // Separately seeded so changing the column draws above cannot shift the
    // high-altitude sandstone layering.
    let mut sandstone_rand = LcgRandom::new(rand.next_int() as i64 ^ 0x5A5D);
    let sandstone_offset = sandstone_rand.next_int_bounded(7);

    let surfaced = profile.beach || profile.river > 0.0;
    let cave_half = profile.cave_intensity / 8.0;
    let cave_river_half = profile.cave_river_intensity / 16.0;

    // Stone type of the current band, fetched lazily and refreshed only when the
    // scan crosses a band seam, so the band oracle is hit at most three times.
    let mut band = usize::MAX;
    let mut stone_id = 0;

    // Lowest non-solid Z seen so far, tracks the effective local surface so that
    // cave floors get their own soil depth measurement.
    let mut last_free = dz;

    for z in (z_floor..dz).rev() {

        let pos = IVec3::new(x, y, z);

        // Above the terrain surface there is only the sea to fill.
        if z >= profile.height {
            if z < profile.water_height {
                chunk.set_block_and_data(pos, block::WATER, 0);
            }
            last_free = z;
            continue;
        }

        if z == 0 {
            chunk.set_block_and_data(pos, block::BEDROCK, 0);
            continue;
        }

        if z < profile.magma_height {
            chunk.set_block_and_data(pos, block::LAVA, 0);
            continue;
        }

        // Underground river band: water below its center, air pocket above.
        if ((z - profile.cave_river_height).abs() as f64) < cave_river_half {
            if z < profile.cave_river_height {
                chunk.set_block_and_data(pos, block::WATER, 0);
            }
            last_free = z;
            continue;
        }

        // Generic cave band.
        if ((z - profile.cave_height).abs() as f64) < cave_half {
            last_free = z;
            continue;
        }

        // Solid cell. Depth is measured from the local surface above, which may
        // be a cave ceiling rather than the column height.
        let depth = last_free - 1 - z;

        if surfaced && depth < BEACH_MAX_DEPTH && depth < sand_depth {
            chunk.set_block_and_data(pos, block::SAND, 0);
            continue;
        }

        if profile.soiled && depth == 0 && z + 1 >= profile.water_height {
            if lava_pocket {
                chunk.set_block_and_data(pos, block::LAVA, 0);
                effects.push(GenEffect::LavaFlow(pos));
            } else {
                chunk.set_block_and_data(pos, block::GRASS, grass_data);
            }
            continue;
        }

        if profile.soiled && depth <= soil_depth {
            chunk.set_block_and_data(pos, block::DIRT, 0);
            continue;
        }

        // Raw stone, classified into its stratum band. Only re-query the stone
        // oracle when crossing a seam.
        let z_shifted = z as f64 + mountain_shift + jitter;
        let z_band = stratum_band(z_shifted, volcano_factor);
        if z_band != band {
            band = z_band;
            stone_id = shape.band_stone(band, x, y);
            // Fail fast on a stone id missing from the locked catalog.
            registry.stone(stone_id);
        }

        if z > SANDSTONE_FLOOR && (z + sandstone_offset) % 7 < 3 {
            chunk.set_block_and_data(pos, block::SANDSTONE, 0);
        } else {
            chunk.set_block_and_data(pos, block::RAW_STONE, stone_id);
        }

    }

}
