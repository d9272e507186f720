//! Rarity-weighted ore selection.

use crate::registry::{Registry, OreType};
use crate::rand::LcgRandom;


/// Pick at most one ore type valid for the given stone at a point.
///
/// Every candidate draws a score uniform in `0..rarity` and the running maximum
/// wins; an exact tie is resolved by a coin flip from the same RNG stream, so tie
/// outcomes are reproducible for a fixed seed but not biased toward any
/// registration order. Returns nothing when the stone hosts no ore at all.
pub fn select_ore<'r>(registry: &'r Registry, stone_id: u8, rand: &mut LcgRandom) -> Option<&'r OreType> {

    let mut best: Option<(&OreType, i32)> = None;

    for ore in registry.ores_in_stone(stone_id) {
        let score = rand.next_int_bounded(ore.rarity);
        best = Some(match best {
            None => (ore, score),
            Some((_, best_score)) if score > best_score => (ore, score),
            Some((_, best_score)) if score == best_score && rand.next_bool() => (ore, score),
            Some(incumbent) => incumbent,
        });
    }

    best.map(|(ore, _)| ore)

}
