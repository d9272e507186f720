//! Block enumeration and predicates used by the generation core.
//!
//! This is the closed set of block ids the core reads or writes. Hosts register many
//! more block kinds, but the generator only ever needs to recognize the terrain
//! blocks below; everything else passes through untouched.

/// Internal macro to easily define the block id table.
macro_rules! blocks {
    (
        $($ident:ident / $id:literal : $name:literal),* $(,)?
    ) => {

        static NAMES: [&'static str; 256] = {
            let mut arr = [""; 256];
            $(arr[$id as usize] = $name;)*
            arr
        };

        $(pub const $ident: u8 = $id;)*

    };
}

blocks! {
    AIR/0:          "air",
    RAW_STONE/1:    "raw_stone",
    GRASS/2:        "grass",
    DIRT/3:         "dirt",
    SAND/4:         "sand",
    GRAVEL/5:       "gravel",
    SANDSTONE/6:    "sandstone",
    BEDROCK/7:      "bedrock",
    WATER/8:        "water",
    LAVA/9:         "lava",
    SNOW_LAYER/10:  "snow_layer",
    LOOSE_ROCK/11:  "loose_rock",
    TALL_GRASS/12:  "tall_grass",
    COPPER_ORE/16:  "copper_ore",
    IRON_ORE/17:    "iron_ore",
    COAL_ORE/18:    "coal_ore",
    GOLD_ORE/19:    "gold_ore",
}

/// Number of grass color variants encoded in the data nibble of [`GRASS`].
pub const GRASS_VARIANTS: u8 = 9;
/// Maximum stack level encoded in the data nibble of [`SNOW_LAYER`].
pub const SNOW_MAX_LEVEL: u8 = 7;

/// Get the name of the given block id, empty string if unknown.
#[inline]
pub fn name(id: u8) -> &'static str {
    NAMES[id as usize]
}

/// Return true if a surface rock outcrop may rest on this block.
#[inline]
pub fn supports_loose_rock(id: u8) -> bool {
    matches!(id, GRASS | DIRT | SAND | RAW_STONE)
}
