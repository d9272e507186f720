//! Chunk population: structures, ore seeding and biome decoration.
//!
//! Population runs once per chunk, immediately after column shaping and before
//! the chunk is exposed. It only ever writes into its own chunk, so population
//! order across chunks is irrelevant; all randomness comes from a chunk-local
//! RNG reseeded from the chunk coordinates and the world seed.

use glam::IVec3;
use tracing::trace;

use crate::chunk::{Chunk, CHUNK_WIDTH, CHUNK_HEIGHT};
use crate::provider::{TerrainShape, Climate};
use crate::block;

use super::{GenWorker, column, ore, vein};


/// One in this many population passes tries a ruin placement.
const RUIN_CHANCE: i32 = 400;
/// Number of population passes for a full-size chunk, `(dx * dy) / 64`.
const PASSES: usize = CHUNK_WIDTH * CHUNK_WIDTH / 64;


/// Derive the chunk-local population seed from chunk coordinates and the world
/// seed, a plain 31-multiplier hash over the scaled coordinates.
fn chunk_seed(seed: i64, cx: i32, cy: i32) -> i64 {
    let mut h = 17i64;
    h = h.wrapping_mul(31).wrapping_add((cx as i64).wrapping_mul(31));
    h = h.wrapping_mul(31).wrapping_add((cy as i64).wrapping_mul(31));
    h.wrapping_add(seed)
}

pub(super) fn populate_chunk<S: TerrainShape, C: Climate>(
    worker: &mut GenWorker<'_, S, C>,
    cx: i32,
    cy: i32,
    chunk: &mut Chunk,
) {

    let (gen, rand) = worker.parts();
    rand.set_seed(chunk_seed(gen.seed, cx, cy));

    let center_x = cx * CHUNK_WIDTH as i32 + CHUNK_WIDTH as i32 / 2;
    let center_y = cy * CHUNK_WIDTH as i32 + CHUNK_WIDTH as i32 / 2;

    for _ in 0..PASSES {

        // Rare structure attempt at a random column of the chunk.
        if rand.next_int_bounded(RUIN_CHANCE) == 0 {
            let x = cx * CHUNK_WIDTH as i32 + rand.next_int_bounded(CHUNK_WIDTH as i32);
            let y = cy * CHUNK_WIDTH as i32 + rand.next_int_bounded(CHUNK_WIDTH as i32);
            if let Some(top) = chunk.top_solid(x, y) {
                if gen.structures.place_ruin(chunk, IVec3::new(x, y, top + 1), rand) {
                    trace!("placed ruin in chunk {cx}/{cy} at {x}/{y}");
                }
            }
        }

        // Ore seeding: probe the chunk center at a random depth and start a vein
        // when a jittered stratum re-sample disagrees with the stone actually
        // placed there, a cheap detector for stratum boundaries where deposits
        // concentrate.
        let z = 1 + rand.next_int_bounded(CHUNK_HEIGHT as i32 - 1);
        let probe = IVec3::new(center_x, center_y, z);
        let (id, stone_id) = chunk.block_and_data(probe);
        if id != block::RAW_STONE {
            continue;
        }

        let jitter = rand.next_float() as f64 * 6.0;
        let resampled = column::stratum_stone(gen.shape(), center_x, center_y, z, jitter);
        if resampled == stone_id {
            continue;
        }

        let Some(ore) = ore::select_ore(gen.registry(), stone_id, rand) else { continue };

        let placed = vein::grow_vein(
            chunk, probe, stone_id, ore.block, vein::vein_size(ore), ore.chance, rand);

        if placed > 0 {
            trace!("grew {} vein of {placed} blocks in chunk {cx}/{cy} at z {z}", ore.name);
            if ore.rock_chance > 0 && rand.next_int_bounded(ore.rock_chance) == 0 {
                vein::grow_surface_rock(chunk, probe, ore, stone_id, rand);
            }
        }

    }

    // One decorator for the whole chunk, weight-picked by the chooser noise at
    // the chunk center and applied to every column.
    let biome = gen.classify_biome(center_x, center_y);
    let weighted = gen.registry().weighted_decorators(biome);
    if !weighted.is_empty() {
        let index = weighted[gen.chooser.index(center_x, center_y, weighted.len())];
        let decorator = gen.registry().decorator(biome, index);
        for y in 0..CHUNK_WIDTH as i32 {
            for x in 0..CHUNK_WIDTH as i32 {
                let wx = cx * CHUNK_WIDTH as i32 + x;
                let wy = cy * CHUNK_WIDTH as i32 + y;
                decorator.decorate(chunk, wx, wy, rand);
            }
        }
    }

    // From here on the chunk only changes through the seasonal simulator, which
    // the host drives on every subsequent load.

}


#[cfg(test)]
mod tests {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::gen::tests::{FixedClimate, test_registry, flat_generator};
    use crate::gen::{ChunkGenerator, StrataGenerator};
    use crate::provider::LayerProfile;
    use crate::noise::PositionalNoise;
    use crate::registry::{RegistryBuilder, Decorator};
    use crate::rand::LcgRandom;
    use crate::biome::Biome;

    #[test]
    fn populate_is_deterministic() {

        let gen = flat_generator(42);

        let run = || {
            let mut chunk = Chunk::new();
            let mut worker = gen.worker();
            worker.generate(5, 9, &mut chunk);
            worker.populate(5, 9, &mut chunk);
            chunk
        };

        let a = run();
        let b = run();
        for x in 0..16 {
            for y in 0..16 {
                for z in 0..CHUNK_HEIGHT as i32 {
                    let pos = IVec3::new(x, y, z);
                    assert_eq!(a.block_and_data(pos), b.block_and_data(pos));
                }
            }
        }

    }

    /// Mountainous shape putting the band 1 / band 3 stratum seam underground,
    /// where the populator's boundary probe can hit it.
    struct MountainShape;

    impl TerrainShape for MountainShape {

        fn terrain_factor(&self, _x: i32, _y: i32) -> f64 { 1.0 }
        fn mountain_factor(&self, _x: i32, _y: i32) -> f64 { 0.5 }
        fn volcano_factor(&self, _x: i32, _y: i32) -> f64 { 0.0 }

        fn layer_profile(&self, _x: i32, _y: i32) -> LayerProfile {
            LayerProfile {
                height: 250,
                water_height: 63,
                soiled: true,
                ..LayerProfile::default()
            }
        }

        fn band_stone(&self, band: usize, _x: i32, _y: i32) -> u8 {
            band as u8
        }

    }

    #[test]
    fn veins_grow_near_stratum_seams() {

        let gen = StrataGenerator::new(42, MountainShape, FixedClimate::default(), test_registry());
        let mut worker = gen.worker();

        let mut ore_blocks = 0;
        for cx in 0..200 {
            let mut chunk = Chunk::new();
            worker.generate(cx, 0, &mut chunk);
            worker.populate(cx, 0, &mut chunk);
            for z in 0..CHUNK_HEIGHT as i32 {
                for x in 0..16 {
                    for y in 0..16 {
                        if matches!(chunk.block(IVec3::new(x, y, z)),
                                block::IRON_ORE | block::COPPER_ORE) {
                            ore_blocks += 1;
                        }
                    }
                }
            }
        }
        assert!(ore_blocks > 0, "no veins over 200 chunks");

    }

    struct Counting(Arc<AtomicUsize>);

    impl Decorator for Counting {
        fn decorate(&self, _chunk: &mut Chunk, _x: i32, _y: i32, _rand: &mut LcgRandom) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn chosen_decorator_covers_every_column() {

        let count = Arc::new(AtomicUsize::new(0));

        let mut builder = RegistryBuilder::new();
        for id in 0..4 {
            builder.register_stone(crate::registry::StoneType { id, name: "stone" });
        }
        builder.register_decorator(Biome::Plains, 1, Box::new(Counting(Arc::clone(&count))));
        let registry = builder.lock().unwrap();

        let gen = StrataGenerator::new(
            42, crate::gen::tests::FlatShape::default(), FixedClimate::default(), registry);

        let mut chunk = Chunk::new();
        let mut worker = gen.worker();
        worker.generate(0, 0, &mut chunk);
        worker.populate(0, 0, &mut chunk);

        // The flat fixture classifies as plains, its single decorator must have
        // run once per column.
        assert_eq!(count.load(Ordering::Relaxed), 256);

    }

    #[test]
    fn decorator_weights_are_respected() {
        // Weighted flat list {A:1, B:3} indexed by the chooser noise must pick B
        // for ~75% of chunk positions.
        let list = [0usize, 1, 1, 1];
        let chooser = PositionalNoise::new(42, 0x5EA50);
        let mut b_hits = 0usize;
        let total = 4000;
        for i in 0..total {
            let cx = (i % 64) as i32 * 16 + 8;
            let cy = (i / 64) as i32 * 16 + 8;
            if list[chooser.index(cx, cy, list.len())] == 1 {
                b_hits += 1;
            }
        }
        let ratio = b_hits as f64 / total as f64;
        assert!((0.70..0.80).contains(&ratio), "ratio {ratio}");
    }

}
