//! World generation module.
//!
//! The generator itself is immutable and shared between all workers; every worker
//! owns a [`GenWorker`] carrying its private RNG, so any number of chunks can be
//! generated concurrently with no locking. Determinism does not depend on worker
//! scheduling: the RNG is reseeded from coordinates before every column and every
//! population pass, so no chunk ever observes another chunk's draws.

use glam::IVec3;
use tracing::trace;

use crate::biome::{self, Biome};
use crate::chunk::{Chunk, CHUNK_WIDTH, CHUNK_HEIGHT};
use crate::provider::{TerrainShape, Climate, StructureHook, NoStructures};
use crate::noise::PositionalNoise;
use crate::registry::Registry;
use crate::rand::LcgRandom;

pub mod column;
pub mod ore;
pub mod vein;
pub mod plant;
pub mod populate;


/// Salt of the positional noise stream backing the decorator chooser.
const CHOOSER_SALT: i64 = 0x5EA50;

/// Side effects queued during generation for the host to run once the chunk is
/// exposed, currently only lava-flow ignitions from surface lava pockets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenEffect {
    /// A surface lava pocket was placed and wants a flow update at this position.
    LavaFlow(IVec3),
}

/// A trait common to all chunk generators. `generate` shapes the raw terrain of
/// a chunk, `populate` runs the ore/structure/decoration passes; both are called
/// exactly once per chunk, population immediately after generation and before
/// the chunk is exposed to players.
pub trait ChunkGenerator {

    /// Generate the chunk terrain but do not populate it.
    fn generate(&mut self, cx: i32, cy: i32, chunk: &mut Chunk) -> Vec<GenEffect>;

    /// Populate a freshly generated chunk.
    fn populate(&mut self, cx: i32, cy: i32, chunk: &mut Chunk);

}

/// The immutable generator structure, shared between all workers.
pub struct StrataGenerator<S, C> {
    /// World seed every derived seed is mixed from.
    seed: i64,
    shape: S,
    climate: C,
    registry: Registry,
    structures: Box<dyn StructureHook + Send + Sync>,
    /// Noise stream indexing the weighted decorator list per chunk.
    chooser: PositionalNoise,
}

impl<S: TerrainShape, C: Climate> StrataGenerator<S, C> {

    pub fn new(seed: i64, shape: S, climate: C, registry: Registry) -> Self {
        Self {
            seed,
            shape,
            climate,
            registry,
            structures: Box::new(NoStructures),
            chooser: PositionalNoise::new(seed, CHOOSER_SALT),
        }
    }

    /// Replace the structure placement hook.
    pub fn with_structures(mut self, structures: Box<dyn StructureHook + Send + Sync>) -> Self {
        self.structures = structures;
        self
    }

    #[inline]
    pub fn shape(&self) -> &S {
        &self.shape
    }

    #[inline]
    pub fn climate(&self) -> &C {
        &self.climate
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Create a worker for this generator, one per generation thread or task.
    pub fn worker(&self) -> GenWorker<'_, S, C> {
        GenWorker {
            gen: self,
            rand: LcgRandom::new(self.seed),
        }
    }

    /// Classify the biome of the given column, recomputed on demand from the
    /// climate and terrain samplers.
    pub fn classify_biome(&self, x: i32, y: i32) -> Biome {
        let profile = self.shape.layer_profile(x, y);
        biome::classify(
            self.climate.humidity2(x, y),
            self.climate.river_humidity(x, y),
            self.climate.temperature(x, y, profile.height),
            self.shape.terrain_factor(x, y),
            self.shape.mountain_factor(x, y),
        )
    }

}

/// Worker-local generation state: a borrow of the shared generator plus the
/// worker's own reseedable RNG.
pub struct GenWorker<'g, S, C> {
    gen: &'g StrataGenerator<S, C>,
    rand: LcgRandom,
}

/// Derive the deterministic seed of one column from the world seed.
fn column_seed(seed: i64, x: i32, y: i32) -> i64 {
    seed ^ i64::wrapping_add(
        (x as i64).wrapping_mul(341873128712),
        (y as i64).wrapping_mul(132897987541))
}

impl<'g, S: TerrainShape, C: Climate> GenWorker<'g, S, C> {

    /// Reseed the worker RNG for the given column, must precede any per-column
    /// draw for that column.
    pub fn seed(&mut self, x: i32, y: i32) {
        self.rand.set_seed(column_seed(self.gen.seed, x, y));
    }

    pub(crate) fn parts(&mut self) -> (&'g StrataGenerator<S, C>, &mut LcgRandom) {
        (self.gen, &mut self.rand)
    }

}

impl<S: TerrainShape, C: Climate> ChunkGenerator for GenWorker<'_, S, C> {

    fn generate(&mut self, cx: i32, cy: i32, chunk: &mut Chunk) -> Vec<GenEffect> {

        trace!("generate chunk {cx}/{cy}");
        let mut effects = Vec::new();

        for y in 0..CHUNK_WIDTH as i32 {
            for x in 0..CHUNK_WIDTH as i32 {
                let wx = cx * CHUNK_WIDTH as i32 + x;
                let wy = cy * CHUNK_WIDTH as i32 + y;
                self.seed(wx, wy);
                let (gen, rand) = self.parts();
                column::shape_column(gen, rand, chunk, wx, wy, 0, CHUNK_HEIGHT as i32, &mut effects);
            }
        }

        effects

    }

    fn populate(&mut self, cx: i32, cy: i32, chunk: &mut Chunk) {
        trace!("populate chunk {cx}/{cy}");
        populate::populate_chunk(self, cx, cy, chunk);
    }

}


#[cfg(test)]
pub(crate) mod tests {

    use super::*;
    use crate::provider::LayerProfile;
    use crate::registry::{RegistryBuilder, StoneType, OreType};
    use crate::block;

    /// A flat test world: uniform height and water level, no caves, no magma,
    /// topsoil everywhere, stone ids equal to the band index.
    pub struct FlatShape {
        pub height: i32,
        pub water_height: i32,
    }

    impl Default for FlatShape {
        fn default() -> Self {
            Self { height: 64, water_height: 63 }
        }
    }

    impl TerrainShape for FlatShape {

        fn terrain_factor(&self, _x: i32, _y: i32) -> f64 { 1.0 }
        fn mountain_factor(&self, _x: i32, _y: i32) -> f64 { 0.0 }
        fn volcano_factor(&self, _x: i32, _y: i32) -> f64 { 0.0 }

        fn layer_profile(&self, _x: i32, _y: i32) -> LayerProfile {
            LayerProfile {
                height: self.height,
                water_height: self.water_height,
                soiled: true,
                ..LayerProfile::default()
            }
        }

        fn band_stone(&self, band: usize, _x: i32, _y: i32) -> u8 {
            band as u8
        }

    }

    /// A constant climate for tests.
    pub struct FixedClimate {
        pub temperature: f64,
        pub humidity: f64,
        pub weather: f64,
    }

    impl Default for FixedClimate {
        fn default() -> Self {
            Self { temperature: 15.0, humidity: 0.4, weather: 0.0 }
        }
    }

    impl Climate for FixedClimate {

        fn temperature(&self, _x: i32, _y: i32, _z: i32) -> f64 { self.temperature }
        fn humidity2(&self, _x: i32, _y: i32) -> f64 { self.humidity }
        fn humidity3(&self, _x: i32, _y: i32) -> f64 { self.humidity }
        fn river_humidity(&self, _x: i32, _y: i32) -> f64 { 0.0 }
        fn weather(&self, _x: i32, _y: i32) -> f64 { self.weather }

    }

    /// A locked registry with four band stones and two ores.
    pub fn test_registry() -> Registry {
        let mut builder = RegistryBuilder::new();
        builder.register_stone(StoneType { id: 0, name: "granite" });
        builder.register_stone(StoneType { id: 1, name: "limestone" });
        builder.register_stone(StoneType { id: 2, name: "basalt" });
        builder.register_stone(StoneType { id: 3, name: "slate" });
        builder.register_ore(OreType {
            name: "iron",
            block: block::IRON_ORE,
            rarity: 5,
            size: 2,
            chance: 0.6,
            rock_chance: 2,
            rock_distance: 6,
            stones: vec![0, 1],
        });
        builder.register_ore(OreType {
            name: "copper",
            block: block::COPPER_ORE,
            rarity: 3,
            size: 2,
            chance: 0.6,
            rock_chance: 2,
            rock_distance: 6,
            stones: vec![0, 1, 2, 3],
        });
        builder.lock().unwrap()
    }

    pub fn flat_generator(seed: i64) -> StrataGenerator<FlatShape, FixedClimate> {
        StrataGenerator::new(seed, FlatShape::default(), FixedClimate::default(), test_registry())
    }

    #[test]
    fn generate_is_deterministic() {
        let gen = flat_generator(42);
        let mut a = Chunk::new();
        let mut b = Chunk::new();
        gen.worker().generate(3, -2, &mut a);
        gen.worker().generate(3, -2, &mut b);
        for x in 0..16 {
            for y in 0..16 {
                for z in 0..CHUNK_HEIGHT as i32 {
                    let pos = IVec3::new(x, y, z);
                    assert_eq!(a.block_and_data(pos), b.block_and_data(pos));
                }
            }
        }
    }

    #[test]
    fn generate_is_order_independent() {
        let gen = flat_generator(42);

        let mut worker = gen.worker();
        let mut a0 = Chunk::new();
        let mut a1 = Chunk::new();
        worker.generate(0, 0, &mut a0);
        worker.generate(1, 0, &mut a1);

        let mut worker = gen.worker();
        let mut b1 = Chunk::new();
        let mut b0 = Chunk::new();
        worker.generate(1, 0, &mut b1);
        worker.generate(0, 0, &mut b0);

        let probe = IVec3::new(7, 12, 63);
        assert_eq!(a0.block_and_data(probe), b0.block_and_data(probe));
        assert_eq!(a1.block_and_data(probe), b1.block_and_data(probe));
        for z in 0..CHUNK_HEIGHT as i32 {
            let pos = IVec3::new(0, 0, z);
            assert_eq!(a0.block_and_data(pos), b0.block_and_data(pos));
            assert_eq!(a1.block_and_data(pos), b1.block_and_data(pos));
        }
    }

    #[test]
    fn flat_world_column_layout() {
        // World seed 42, chunk (0, 0), flat profile: bedrock at 0, stone then
        // soil up to 63, grass with a variant in 0..=8 at 63, air above.
        let gen = flat_generator(42);
        let mut chunk = Chunk::new();
        gen.worker().generate(0, 0, &mut chunk);

        for x in 0..16 {
            for y in 0..16 {
                assert_eq!(chunk.block(IVec3::new(x, y, 0)), block::BEDROCK);
                let (top, top_data) = chunk.block_and_data(IVec3::new(x, y, 63));
                assert_eq!(top, block::GRASS);
                assert!(top_data <= 8);
                for z in 64..CHUNK_HEIGHT as i32 {
                    assert_eq!(chunk.block(IVec3::new(x, y, z)), block::AIR);
                }
                for z in 1..63 {
                    let id = chunk.block(IVec3::new(x, y, z));
                    assert!(matches!(id, block::RAW_STONE | block::DIRT),
                        "unexpected block {} at {x}/{y}/{z}", block::name(id));
                }
            }
        }
    }

    #[test]
    fn classify_biome_uses_surface_samples() {
        let gen = flat_generator(42);
        assert_eq!(gen.classify_biome(0, 0), Biome::Plains);
    }

}
