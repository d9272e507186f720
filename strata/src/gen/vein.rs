//! Ore vein and surface rock placement.
//!
//! A vein grows as a chain of overlapping ellipsoids along a random horizontal
//! direction, converting only raw stone of the requested stratum. The optional
//! surface rock is a single marker block dropped on the ground near the vein so
//! that prospecting players can spot buried deposits.

use glam::{IVec3, DVec3};

use crate::chunk::{Chunk, CHUNK_HEIGHT, calc_chunk_pos};
use crate::registry::OreType;
use crate::rand::LcgRandom;
use crate::block;


/// Grow an ore vein around the given origin, replacing raw stone of the given
/// stratum with the ore block. `size` is the vein extent per axis and `chance`
/// the fraction of in-range voxels actually converted. Returns the number of
/// placed ore blocks, 0 when the vein found no matching stone.
pub fn grow_vein(
    chunk: &mut Chunk,
    origin: IVec3,
    from_stone: u8,
    ore_block: u8,
    size: IVec3,
    chance: f32,
    rand: &mut LcgRandom,
) -> usize {

    let mut placed = 0;

    let angle = rand.next_float() * std::f32::consts::PI;
    let (angle_sin, angle_cos) = angle.sin_cos();
    let steps = size.max_element().max(1);

    let line_start = DVec3 {
        x: origin.x as f64 + (angle_sin * size.x as f32 / 2.0) as f64,
        y: origin.y as f64 + (angle_cos * size.y as f32 / 2.0) as f64,
        z: (origin.z + rand.next_int_bounded(3) - 1) as f64,
    };

    let line_stop = DVec3 {
        x: origin.x as f64 - (angle_sin * size.x as f32 / 2.0) as f64,
        y: origin.y as f64 - (angle_cos * size.y as f32 / 2.0) as f64,
        z: (origin.z + rand.next_int_bounded(3) - 1) as f64,
    };

    for i in 0..=steps {

        // Interpolation along the vein axis, each step carrying its own blob.
        let center = line_start + (line_stop - line_start) * i as f64 / steps as f64;

        let base_size = rand.next_double() * size.min_element() as f64 / 4.0;
        let blob = ((i as f32 * std::f32::consts::PI / steps as f32).sin() + 1.0) as f64 * base_size + 1.0;
        let half = blob / 2.0;

        let start = (center - half).floor().as_ivec3();
        let stop = (center + half).floor().as_ivec3();

        for x in start.x..=stop.x {
            for y in start.y..=stop.y {
                for z in start.z..=stop.z {

                    let place_pos = IVec3::new(x, y, z);

                    // Population is chunk-local, blobs are clipped at the border.
                    if calc_chunk_pos(place_pos) != calc_chunk_pos(origin)
                        || z < 1 || z >= CHUNK_HEIGHT as i32
                    {
                        continue;
                    }
                    let delta = (place_pos.as_dvec3() + 0.5 - center) / half;

                    if delta.length_squared() < 1.0
                        && chunk.block_and_data(place_pos) == (block::RAW_STONE, from_stone)
                        && rand.next_float() < chance
                    {
                        chunk.set_block_and_data(place_pos, ore_block, 0);
                        placed += 1;
                    }

                }
            }
        }

    }

    placed

}

/// Place a loose rock marking the vein below, on a surface column near the vein
/// origin. The marker carries the sampled stone id in its data nibble. Only
/// grass, dirt, sand or raw stone can support it, and the candidate column must
/// fall inside the vein's own chunk. Returns whether the rock was placed.
pub fn grow_surface_rock(
    chunk: &mut Chunk,
    origin: IVec3,
    ore: &OreType,
    sampled_stone: u8,
    rand: &mut LcgRandom,
) -> bool {

    let spread = ore.rock_distance.max(1);
    let x = origin.x + rand.next_int_bounded(spread * 2 + 1) - spread;
    let y = origin.y + rand.next_int_bounded(spread * 2 + 1) - spread;

    if calc_chunk_pos(IVec3::new(x, y, 0)) != calc_chunk_pos(origin) {
        return false;
    }

    let Some(top) = chunk.top_solid(x, y) else { return false };
    if top + 1 >= CHUNK_HEIGHT as i32 {
        return false;
    }

    if block::supports_loose_rock(chunk.block(IVec3::new(x, y, top))) {
        chunk.set_block_and_data(IVec3::new(x, y, top + 1), block::LOOSE_ROCK, sampled_stone & 0x0F);
        true
    } else {
        false
    }

}

/// Vein extent for an ore at a point, the populator scales a common base by the
/// per-ore size factor.
pub fn vein_size(ore: &OreType) -> IVec3 {
    IVec3::new(
        2 * ore.size.max(1),
        2 * ore.size.max(1),
        ore.size.max(1),
    )
}

#[cfg(test)]
mod tests {

    use super::*;

    fn stone_chunk(stone: u8) -> Box<Chunk> {
        let mut chunk = Chunk::new();
        for x in 0..16 {
            for y in 0..16 {
                for z in 1..128 {
                    chunk.set_block_and_data(IVec3::new(x, y, z), block::RAW_STONE, stone);
                }
            }
        }
        chunk
    }

    #[test]
    fn vein_replaces_only_matching_stone() {

        let mut chunk = stone_chunk(2);
        let mut rand = LcgRandom::new(42);

        // Wrong stratum: nothing to replace.
        let placed = grow_vein(&mut chunk, IVec3::new(8, 8, 40), 1, block::IRON_ORE,
            IVec3::new(4, 4, 2), 1.0, &mut rand);
        assert_eq!(placed, 0);

        // Matching stratum.
        let placed = grow_vein(&mut chunk, IVec3::new(8, 8, 40), 2, block::IRON_ORE,
            IVec3::new(4, 4, 2), 1.0, &mut rand);
        assert!(placed > 0);

        let mut counted = 0;
        for x in 0..16 {
            for y in 0..16 {
                for z in 1..128 {
                    if chunk.block(IVec3::new(x, y, z)) == block::IRON_ORE {
                        counted += 1;
                    }
                }
            }
        }
        assert_eq!(counted, placed);

    }

    #[test]
    fn vein_is_clipped_to_the_chunk() {
        let mut chunk = stone_chunk(0);
        let mut rand = LcgRandom::new(42);
        // An origin on the chunk edge must not panic nor wrap to the far side.
        let placed = grow_vein(&mut chunk, IVec3::new(0, 15, 64), 0, block::COAL_ORE,
            IVec3::new(6, 6, 3), 1.0, &mut rand);
        assert!(placed > 0);
        for z in 1..128 {
            // Wrapping would show up as ore along the opposite edge, far from the
            // clipped blob.
            assert_ne!(chunk.block(IVec3::new(15, 0, z)), block::COAL_ORE);
        }
    }

    #[test]
    fn surface_rock_lands_on_soil() {

        let mut chunk = Chunk::new();
        for x in 0..16 {
            for y in 0..16 {
                chunk.set_block_and_data(IVec3::new(x, y, 63), block::GRASS, 0);
            }
        }

        let ore = OreType {
            name: "iron",
            block: block::IRON_ORE,
            rarity: 5,
            size: 2,
            chance: 0.6,
            rock_chance: 2,
            rock_distance: 4,
            stones: vec![1],
        };

        let mut rand = LcgRandom::new(42);
        let mut placed = 0;
        for _ in 0..32 {
            if grow_surface_rock(&mut chunk, IVec3::new(8, 8, 40), &ore, 1, &mut rand) {
                placed += 1;
            }
        }
        assert!(placed > 0);

        let mut found = false;
        for x in 0..16 {
            for y in 0..16 {
                let (id, data) = chunk.block_and_data(IVec3::new(x, y, 64));
                if id == block::LOOSE_ROCK {
                    assert_eq!(data, 1);
                    found = true;
                }
            }
        }
        assert!(found);

    }

}
