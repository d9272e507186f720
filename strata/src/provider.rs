//! Contracts on the external terrain shape and climate collaborators.
//!
//! The continuous scalar fields driving generation are computed elsewhere; this
//! core only requires them to be pure functions of position (and simulated time
//! for the climate) for a fixed world seed, and safe to sample concurrently from
//! any number of generation workers.

use glam::IVec3;

use crate::chunk::Chunk;
use crate::rand::LcgRandom;


/// Per-column vertical layout of terrain features, recomputed on demand from
/// (x, y), never cached across columns.
#[derive(Debug, Clone, Default)]
pub struct LayerProfile {
    /// Surface height, the first Z at or above which the column is no longer solid.
    pub height: i32,
    /// Sea level of the column, water fills `height..water_height`.
    pub water_height: i32,
    /// Everything below this Z is molten.
    pub magma_height: i32,
    /// Center of the generic cave band.
    pub cave_height: i32,
    /// Vertical extent factor of the generic cave band, 0 for no cave.
    pub cave_intensity: f64,
    /// Center of the underground river band.
    pub cave_river_height: i32,
    /// Vertical extent factor of the underground river band, 0 for none.
    pub cave_river_intensity: f64,
    /// Surface river intensity, 0 for none.
    pub river: f64,
    /// True when the column lies on a beach.
    pub beach: bool,
    /// True when the column carries topsoil.
    pub soiled: bool,
    /// One-in-N chance of a surface lava pocket, 0 for never.
    pub lava_chance: i32,
}

/// The four depth bands of the stratum classifier, ordered from deepest up.
pub const STRATUM_BANDS: usize = 4;

/// Terrain shape sampler. All methods must be deterministic for a fixed world
/// seed, and implementations must tolerate any finite (x, y): far-out columns
/// simply come back as ocean.
pub trait TerrainShape: Sync {

    fn terrain_factor(&self, x: i32, y: i32) -> f64;

    fn mountain_factor(&self, x: i32, y: i32) -> f64;

    fn volcano_factor(&self, x: i32, y: i32) -> f64;

    fn layer_profile(&self, x: i32, y: i32) -> LayerProfile;

    /// Which stone fills the given stratum band at this column. Stable for fixed
    /// (x, y) and band, must return an id from the locked stone catalog.
    fn band_stone(&self, band: usize, x: i32, y: i32) -> u8;

}

/// Climate sampler, parameterized by an externally advanced simulated clock.
pub trait Climate: Sync {

    fn temperature(&self, x: i32, y: i32, z: i32) -> f64;

    /// Broad two-dimensional humidity used by biome classification.
    fn humidity2(&self, x: i32, y: i32) -> f64;

    /// Local ground humidity used by the seasonal simulator.
    fn humidity3(&self, x: i32, y: i32) -> f64;

    /// Humidity contribution of nearby rivers.
    fn river_humidity(&self, x: i32, y: i32) -> f64;

    /// Storm intensity in `0.0..=1.0`.
    fn weather(&self, x: i32, y: i32) -> f64;

}

/// Hook for structure placement during population. Structures themselves are
/// host-defined; the populator only decides where and how often to try.
pub trait StructureHook: Sync {

    /// Attempt a ruin placement rooted at the given position, returning whether
    /// anything was placed.
    fn place_ruin(&self, chunk: &mut Chunk, pos: IVec3, rand: &mut LcgRandom) -> bool;

}

/// Default hook for hosts without structures.
pub struct NoStructures;

impl StructureHook for NoStructures {

    fn place_ruin(&self, _chunk: &mut Chunk, _pos: IVec3, _rand: &mut LcgRandom) -> bool {
        false
    }

}
