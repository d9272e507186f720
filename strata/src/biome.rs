//! Biomes are derived from climate and terrain factors, never stored: any consumer
//! recomputes them on demand so that chunk data stays a pure function of the seed.

/// The closed set of biomes, grouped into four climate zones.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Biome {
    #[default]
    Void,
    OceanArctic,
    OceanTemperate,
    OceanSubtropic,
    OceanTropic,
    Polar,
    Tundra,
    Taiga,
    Wasteland,
    Steppe,
    Plains,
    Forest,
    Rainforest,
    Oasis,
}

/// Coarse climate grouping of biomes, used by spawning and decoration registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateZone {
    Arctic,
    Temperate,
    Subtropic,
    Tropic,
}

impl Biome {

    /// All biomes that [`classify`] may return.
    pub const ALL: [Biome; 13] = [
        Biome::OceanArctic, Biome::OceanTemperate, Biome::OceanSubtropic, Biome::OceanTropic,
        Biome::Polar, Biome::Tundra, Biome::Taiga,
        Biome::Wasteland, Biome::Steppe, Biome::Plains, Biome::Forest,
        Biome::Rainforest, Biome::Oasis,
    ];

    pub fn zone(self) -> ClimateZone {
        match self {
            Biome::OceanArctic | Biome::Polar | Biome::Tundra => ClimateZone::Arctic,
            Biome::OceanTemperate | Biome::Taiga | Biome::Steppe |
            Biome::Plains | Biome::Forest | Biome::Void => ClimateZone::Temperate,
            Biome::OceanSubtropic | Biome::Wasteland => ClimateZone::Subtropic,
            Biome::OceanTropic | Biome::Rainforest | Biome::Oasis => ClimateZone::Tropic,
        }
    }

    /// Return true if players may spawn in this biome.
    pub fn is_valid_spawn(self) -> bool {
        match self {
            Biome::Void |
            Biome::OceanArctic | Biome::OceanTemperate |
            Biome::OceanSubtropic | Biome::OceanTropic |
            Biome::Polar | Biome::Wasteland => false,
            _ => true,
        }
    }

    pub fn is_ocean(self) -> bool {
        matches!(self, Biome::OceanArctic | Biome::OceanTemperate |
            Biome::OceanSubtropic | Biome::OceanTropic)
    }

}

/// Threshold below which a column is classified as ocean, exclusive on the
/// ocean side.
const OCEAN_THRESHOLD: f64 = 0.21;

/// Classify the biome at a column from its climate and terrain factors.
///
/// Pure function of its inputs; callers are expected to feed it samples from the
/// terrain shape and climate providers at the same (x, y).
pub fn classify(
    humidity2: f64,
    river_humidity: f64,
    temperature: f64,
    terrain_factor: f64,
    mountain_factor: f64,
) -> Biome {

    if terrain_factor + mountain_factor * 3.2 < OCEAN_THRESHOLD {
        return if temperature < -20.0 {
            Biome::OceanArctic
        } else if temperature < 20.0 {
            Biome::OceanTemperate
        } else if humidity2 < 0.8 {
            Biome::OceanSubtropic
        } else {
            Biome::OceanTropic
        };
    }

    if temperature < 0.0 {
        return if humidity2 < 0.2 {
            if temperature < -20.0 { Biome::Polar } else { Biome::Tundra }
        } else {
            Biome::Taiga
        };
    }

    // Hot river banks beat every dry-land choice below.
    if river_humidity > 0.2 && temperature >= 30.0 {
        return Biome::Oasis;
    }

    if humidity2 < 0.2 {
        Biome::Wasteland
    } else if humidity2 < 0.3 {
        Biome::Steppe
    } else if humidity2 < 0.5 {
        Biome::Plains
    } else if humidity2 < 0.7 {
        Biome::Forest
    } else {
        Biome::Rainforest
    }

}
