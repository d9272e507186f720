//! Stone, ore and decorator catalogs.
//!
//! Catalogs are filled during a distinct registration phase at plugin init and
//! then locked; generation code only ever receives the read-only [`Registry`]
//! handle. Registering an inconsistent catalog is a configuration error and is
//! rejected at lock time, never silently defaulted at generation time.

use indexmap::IndexMap;

use crate::biome::Biome;
use crate::chunk::Chunk;
use crate::rand::LcgRandom;


/// One entry of the stone catalog. The id doubles as the data nibble written to
/// raw stone voxels, so it must fit in four bits.
#[derive(Debug, Clone)]
pub struct StoneType {
    pub id: u8,
    pub name: &'static str,
}

/// One entry of the ore catalog.
#[derive(Debug, Clone)]
pub struct OreType {
    pub name: &'static str,
    /// Block id written into vein voxels.
    pub block: u8,
    /// Rarity weight, strictly positive, smaller is more common.
    pub rarity: i32,
    /// Vein scale, multiplies the populator's base vein dimensions.
    pub size: i32,
    /// Fraction of in-range voxels a vein actually converts, in `0.0..=1.0`.
    pub chance: f32,
    /// One-in-N chance of a surface rock marker after a successful vein, 0 for never.
    pub rock_chance: i32,
    /// Maximum horizontal offset of the surface rock marker from the vein origin.
    pub rock_distance: i32,
    /// Stone ids this ore may replace.
    pub stones: Vec<u8>,
}

/// An opaque decoration program, registered per biome with an integer weight.
/// Implementations must be pure with respect to everything but the chunk and the
/// RNG they are handed, so that population stays deterministic and chunk-local.
pub trait Decorator: Send + Sync {

    /// Decorate one column of the chunk. `x` and `y` are world coordinates of
    /// the column, the chunk is the one containing them.
    fn decorate(&self, chunk: &mut Chunk, x: i32, y: i32, rand: &mut LcgRandom);

}

struct DecoratorEntry {
    weight: u32,
    decorator: Box<dyn Decorator>,
}

/// Error of [`RegistryBuilder::lock`], raised on an inconsistent catalog.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("stone id {0} does not fit the data nibble")]
    StoneIdOutOfRange(u8),
    #[error("stone id {0} registered twice")]
    DuplicateStone(u8),
    #[error("ore {ore} references unknown stone id {stone}")]
    UnknownStone { ore: &'static str, stone: u8 },
    #[error("ore {0} has a non-positive rarity")]
    InvalidRarity(&'static str),
    #[error("ore {0} has a vein chance outside 0..=1")]
    InvalidChance(&'static str),
    #[error("decorator for {0:?} has zero weight")]
    ZeroWeight(Biome),
}

/// Mutable catalog state of the registration phase.
#[derive(Default)]
pub struct RegistryBuilder {
    stones: Vec<StoneType>,
    ores: Vec<OreType>,
    decorators: IndexMap<Biome, Vec<DecoratorEntry>>,
}

impl RegistryBuilder {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_stone(&mut self, stone: StoneType) -> &mut Self {
        self.stones.push(stone);
        self
    }

    pub fn register_ore(&mut self, ore: OreType) -> &mut Self {
        self.ores.push(ore);
        self
    }

    pub fn register_decorator(&mut self, biome: Biome, weight: u32, decorator: Box<dyn Decorator>) -> &mut Self {
        self.decorators.entry(biome).or_default().push(DecoratorEntry { weight, decorator });
        self
    }

    /// Validate the catalogs and freeze them into a read-only [`Registry`].
    pub fn lock(self) -> Result<Registry, RegistryError> {

        let mut stones = IndexMap::new();
        for stone in self.stones {
            if stone.id > 0x0F {
                return Err(RegistryError::StoneIdOutOfRange(stone.id));
            }
            let id = stone.id;
            if stones.insert(id, stone).is_some() {
                return Err(RegistryError::DuplicateStone(id));
            }
        }

        let mut ores_by_stone: IndexMap<u8, Vec<usize>> =
            stones.keys().map(|&id| (id, Vec::new())).collect();

        for (index, ore) in self.ores.iter().enumerate() {
            if ore.rarity <= 0 {
                return Err(RegistryError::InvalidRarity(ore.name));
            }
            if !(0.0..=1.0).contains(&ore.chance) {
                return Err(RegistryError::InvalidChance(ore.name));
            }
            for &stone in &ore.stones {
                ores_by_stone.get_mut(&stone)
                    .ok_or(RegistryError::UnknownStone { ore: ore.name, stone })?
                    .push(index);
            }
        }

        // Flatten decorator weights once, the chooser indexes this directly.
        let mut weighted = IndexMap::new();
        for (&biome, entries) in &self.decorators {
            let mut flat = Vec::new();
            for (index, entry) in entries.iter().enumerate() {
                if entry.weight == 0 {
                    return Err(RegistryError::ZeroWeight(biome));
                }
                flat.extend(std::iter::repeat_n(index, entry.weight as usize));
            }
            weighted.insert(biome, flat);
        }

        Ok(Registry {
            stones,
            ores: self.ores,
            ores_by_stone,
            decorators: self.decorators,
            weighted,
        })
    }

}

/// The read-only catalog handle held by generators. Shared freely across worker
/// threads, it is never mutated after lock.
pub struct Registry {
    stones: IndexMap<u8, StoneType>,
    ores: Vec<OreType>,
    ores_by_stone: IndexMap<u8, Vec<usize>>,
    decorators: IndexMap<Biome, Vec<DecoratorEntry>>,
    /// Per biome, decorator indices repeated by weight.
    weighted: IndexMap<Biome, Vec<usize>>,
}

impl Registry {

    /// Get a stone type by id.
    /// Panics on an unknown id: ids flowing here were validated at lock time, so
    /// an unknown one is a programming error and aborts generation.
    pub fn stone(&self, id: u8) -> &StoneType {
        self.stones.get(&id)
            .unwrap_or_else(|| panic!("unknown stone id {id}"))
    }

    /// All ore types that may replace the given stone id.
    /// Panics on an unknown stone id, like [`Self::stone`].
    pub fn ores_in_stone(&self, stone_id: u8) -> impl Iterator<Item = &OreType> + '_ {
        self.ores_by_stone.get(&stone_id)
            .unwrap_or_else(|| panic!("unknown stone id {stone_id}"))
            .iter()
            .map(|&index| &self.ores[index])
    }

    /// The weighted flat decorator index list for a biome, empty if the biome has
    /// no registered decorators.
    pub(crate) fn weighted_decorators(&self, biome: Biome) -> &[usize] {
        self.weighted.get(&biome).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn decorator(&self, biome: Biome, index: usize) -> &dyn Decorator {
        &*self.decorators[&biome][index].decorator
    }

}
