//! A chunk storing block ids and data, optimized for runtime performance.
//!
//! The horizontal axes are X and Y, the vertical axis is Z. One chunk spans
//! 16x16 columns over the full 256 blocks of world height and is generated,
//! populated and simulated as a single unit.

use glam::IVec3;

use crate::block::AIR;


/// Chunk size in both X and Y coordinates.
pub const CHUNK_WIDTH: usize = 16;
/// Chunk height along Z.
pub const CHUNK_HEIGHT: usize = 256;
/// Internal chunk size, in number of elements per chunk.
const CHUNK_SIZE: usize = CHUNK_HEIGHT * CHUNK_WIDTH * CHUNK_WIDTH;


/// Calculate the index in the chunk's arrays for the given chunk-local position,
/// layout `xxxx yyyy zzzz zzzz`. Only the relevant low bits are taken from each
/// coordinate component, so global positions can be passed directly.
#[inline]
fn calc_index(pos: IVec3) -> usize {
    debug_assert!(pos.z >= 0 && pos.z < CHUNK_HEIGHT as i32);
    let x = pos.x as u32 & 0b1111;
    let y = pos.y as u32 & 0b1111;
    let z = pos.z as u32 & 0b11111111;
    ((x << 12) | (y << 8) | z) as usize
}

/// Calculate the chunk coordinate containing the given block position.
#[inline]
pub fn calc_chunk_pos(pos: IVec3) -> (i32, i32) {
    (pos.x >> 4, pos.y >> 4)
}


/// Voxel storage for one chunk, plus the single piece of simulation state that
/// persists with it.
pub struct Chunk {
    /// The numeric identifier of each block.
    block: ChunkByteArray,
    /// Four bits of metadata for each block.
    data: ChunkNibbleArray,
    /// Simulated-time stamp of the last executed seasonal pass, 0 for never.
    last_simulated_tick: u64,
}

impl Chunk {

    /// Create a new empty chunk, full of air blocks, never simulated.
    pub fn new() -> Box<Self> {
        Box::new(Self {
            block: [AIR; CHUNK_SIZE],
            data: ChunkNibbleArray::new(0),
            last_simulated_tick: 0,
        })
    }

    /// Get block id at the given position (rebased to chunk-local).
    /// Panics if the Z component is not between 0 and 256 (excluded).
    #[inline]
    pub fn block(&self, pos: IVec3) -> u8 {
        self.block[calc_index(pos)]
    }

    /// Get block id and data at the given position (rebased to chunk-local).
    #[inline]
    pub fn block_and_data(&self, pos: IVec3) -> (u8, u8) {
        let index = calc_index(pos);
        (self.block[index], self.data.get(index))
    }

    /// Set block id and data at the given position (rebased to chunk-local).
    #[inline]
    pub fn set_block_and_data(&mut self, pos: IVec3, block: u8, data: u8) {
        let index = calc_index(pos);
        self.block[index] = block;
        self.data.set(index, data);
    }

    /// Set only the data nibble at the given position.
    #[inline]
    pub fn set_data(&mut self, pos: IVec3, data: u8) {
        self.data.set(calc_index(pos), data);
    }

    /// Find the topmost non-air Z of the given column, if any block is set.
    pub fn top_solid(&self, x: i32, y: i32) -> Option<i32> {
        for z in (0..CHUNK_HEIGHT as i32).rev() {
            if self.block(IVec3::new(x, y, z)) != AIR {
                return Some(z);
            }
        }
        None
    }

    /// Simulated-time stamp of the last executed seasonal pass, 0 for never.
    #[inline]
    pub fn last_simulated_tick(&self) -> u64 {
        self.last_simulated_tick
    }

    /// Record the simulated-time stamp of an executed seasonal pass. Also used
    /// when restoring a chunk from persistent storage.
    #[inline]
    pub fn set_last_simulated_tick(&mut self, tick: u64) {
        self.last_simulated_tick = tick;
    }

}


/// Type alias for a byte array of the chunk size.
type ChunkByteArray = [u8; CHUNK_SIZE];

/// Special arrays for nibbles, packed two by two in bytes.
struct ChunkNibbleArray {
    inner: [u8; CHUNK_SIZE / 2],
}

impl ChunkNibbleArray {

    const fn new(init: u8) -> Self {
        debug_assert!(init <= 0x0F);
        let init = init << 4 | init;
        Self { inner: [init; CHUNK_SIZE / 2] }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        let slot = self.inner[index >> 1];
        if index & 1 == 0 {
            slot & 0x0F
        } else {
            (slot & 0xF0) >> 4
        }
    }

    #[inline]
    fn set(&mut self, index: usize, value: u8) {
        debug_assert!(value <= 0x0F);
        let slot = &mut self.inner[index >> 1];
        if index & 1 == 0 {
            *slot = (*slot & 0xF0) | value;
        } else {
            *slot = (*slot & 0x0F) | (value << 4);
        }
    }

}
