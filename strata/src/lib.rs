//! Deterministic world generation and seasonal simulation core for a voxel
//! world server.
//!
//! Everything produced here is a pure function of the world seed and the
//! coordinates: the same seed and chunk position always reproduce the same
//! blocks, regardless of the order chunks are generated in or how many worker
//! threads are running. The continuous terrain and climate fields are external
//! collaborators, consumed through the traits in [`provider`].

pub mod rand;
pub mod noise;

pub mod block;
pub mod chunk;
pub mod biome;

pub mod registry;
pub mod provider;
pub mod config;

pub mod gen;
pub mod season;
