//! Vegetation scatter decoration.

use glam::IVec3;

use crate::chunk::{Chunk, CHUNK_HEIGHT};
use crate::registry::Decorator;
use crate::rand::LcgRandom;
use crate::block;


/// A decorator scattering a plant block over grassy columns, the stock
/// decoration program registered for most land biomes.
pub struct ScatterDecorator {
    plant_id: u8,
    plant_data: u8,
    /// One-in-N chance per column.
    density: i32,
}

impl ScatterDecorator {

    #[inline]
    pub fn new(plant_id: u8, plant_data: u8, density: i32) -> Self {
        Self {
            plant_id,
            plant_data,
            density,
        }
    }

    #[inline]
    pub fn new_tall_grass(density: i32) -> Self {
        Self::new(block::TALL_GRASS, 0, density)
    }

}

impl Decorator for ScatterDecorator {

    fn decorate(&self, chunk: &mut Chunk, x: i32, y: i32, rand: &mut LcgRandom) {

        if rand.next_int_bounded(self.density) != 0 {
            return;
        }

        let Some(top) = chunk.top_solid(x, y) else { return };
        if top + 1 >= CHUNK_HEIGHT as i32 {
            return;
        }

        if chunk.block(IVec3::new(x, y, top)) == block::GRASS {
            chunk.set_block_and_data(IVec3::new(x, y, top + 1), self.plant_id, self.plant_data);
        }

    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn scatter_only_on_grass() {

        let mut chunk = Chunk::new();
        for x in 0..16 {
            for y in 0..16 {
                let id = if x < 8 { block::GRASS } else { block::SAND };
                chunk.set_block_and_data(IVec3::new(x, y, 63), id, 0);
            }
        }

        let decorator = ScatterDecorator::new_tall_grass(2);
        let mut rand = LcgRandom::new(42);
        for x in 0..16 {
            for y in 0..16 {
                decorator.decorate(&mut chunk, x, y, &mut rand);
            }
        }

        let mut planted = 0;
        for x in 0..16 {
            for y in 0..16 {
                if chunk.block(IVec3::new(x, y, 64)) == block::TALL_GRASS {
                    assert!(x < 8, "tall grass on sand at {x}/{y}");
                    planted += 1;
                }
            }
        }
        assert!(planted > 0);

    }

}
