//! Material types and their movement properties.
//!
//! Displacement is an explicit lookup table rather than an ordinal comparison,
//! so reordering the enum never changes which material sinks through which.

use serde::{Deserialize, Serialize};

/// All material types in the simulation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Material {
    #[default]
    Empty = 0,
    Smoke = 1, // Buoyant - rises and drifts sideways
    Water = 2, // Liquid - settles and spreads horizontally
    Sand = 3,  // Powder - falls and slides diagonally
    Stone = 4, // Heavy - falls straight down through everything lighter
}

/// How a material moves each tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Behavior {
    /// Never initiates a move.
    Inert,
    /// Straight down only.
    Heavy,
    /// Down, then the two diagonals below.
    Powder,
    /// Down, diagonals below, then sideways.
    Liquid,
    /// Up, diagonals above, then sideways.
    Gas,
}

impl Material {
    pub const COUNT: usize = 5;

    pub const ALL: [Material; Self::COUNT] = [
        Material::Empty,
        Material::Smoke,
        Material::Water,
        Material::Sand,
        Material::Stone,
    ];

    /// Raw id as stored in render buffers.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Material::id`]. Unknown ids yield `None`.
    #[inline]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Material::Empty),
            1 => Some(Material::Smoke),
            2 => Some(Material::Water),
            3 => Some(Material::Sand),
            4 => Some(Material::Stone),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Material::Empty => "Empty",
            Material::Smoke => "Smoke",
            Material::Water => "Water",
            Material::Sand => "Sand",
            Material::Stone => "Stone",
        }
    }

    #[inline]
    pub const fn behavior(self) -> Behavior {
        match self {
            Material::Empty => Behavior::Inert,
            Material::Smoke => Behavior::Gas,
            Material::Water => Behavior::Liquid,
            Material::Sand => Behavior::Powder,
            Material::Stone => Behavior::Heavy,
        }
    }

    /// Returns true for every material except `Empty`.
    #[inline]
    pub const fn is_occupied(self) -> bool {
        !matches!(self, Material::Empty)
    }

    /// Settles-below table: can a cell of `self` move into a cell holding `target`?
    #[inline]
    pub const fn can_displace(self, target: Material) -> bool {
        match self {
            Material::Empty => false,
            Material::Smoke => matches!(target, Material::Empty),
            Material::Water => matches!(target, Material::Empty | Material::Smoke),
            Material::Sand => matches!(
                target,
                Material::Empty | Material::Smoke | Material::Water
            ),
            Material::Stone => matches!(
                target,
                Material::Empty | Material::Smoke | Material::Water | Material::Sand
            ),
        }
    }

    /// Base RGBA color for rendering.
    #[inline]
    pub const fn color(self) -> [u8; 4] {
        match self {
            Material::Empty => [12, 12, 18, 255],    // Dark background
            Material::Smoke => [150, 150, 160, 255], // Pale grey
            Material::Water => [30, 100, 200, 255],  // Blue
            Material::Sand => [220, 190, 90, 255],   // Sand yellow
            Material::Stone => [110, 110, 118, 255], // Slate
        }
    }

    /// Base color with a small deterministic per-position shade, so flat
    /// regions of one material do not render as a single block of color.
    #[inline]
    pub fn color_varied(self, x: i32, y: i32) -> [u8; 4] {
        let base = self.color();
        if !self.is_occupied() {
            return base;
        }

        // -8 to +7 per channel
        let hash = ((x.wrapping_mul(374761393)) ^ (y.wrapping_mul(668265263))) as u8;
        let variation = (hash & 0x0F) as i16 - 8;

        [
            (base[0] as i16 + variation).clamp(0, 255) as u8,
            (base[1] as i16 + variation).clamp(0, 255) as u8,
            (base[2] as i16 + variation).clamp(0, 255) as u8,
            base[3],
        ]
    }
}

impl TryFrom<u8> for Material {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Material::from_id(id).ok_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_table() {
        // Stone sinks through everything lighter
        assert!(Material::Stone.can_displace(Material::Sand));
        assert!(Material::Stone.can_displace(Material::Water));
        assert!(!Material::Stone.can_displace(Material::Stone));

        // Sand sinks through water but not stone
        assert!(Material::Sand.can_displace(Material::Water));
        assert!(Material::Sand.can_displace(Material::Smoke));
        assert!(!Material::Sand.can_displace(Material::Sand));
        assert!(!Material::Sand.can_displace(Material::Stone));

        // Water only pushes smoke and empty space around
        assert!(Material::Water.can_displace(Material::Smoke));
        assert!(!Material::Water.can_displace(Material::Water));

        assert!(Material::Smoke.can_displace(Material::Empty));
        assert!(!Material::Smoke.can_displace(Material::Smoke));
    }

    #[test]
    fn empty_never_displaces() {
        for target in Material::ALL {
            assert!(!Material::Empty.can_displace(target));
        }
    }

    #[test]
    fn ids_round_trip() {
        for material in Material::ALL {
            assert_eq!(Material::from_id(material.id()), Some(material));
        }
        assert_eq!(Material::from_id(5), None);
        assert_eq!(Material::try_from(9u8), Err(9));
    }

    #[test]
    fn behaviors() {
        assert_eq!(Material::Empty.behavior(), Behavior::Inert);
        assert_eq!(Material::Stone.behavior(), Behavior::Heavy);
        assert_eq!(Material::Sand.behavior(), Behavior::Powder);
        assert_eq!(Material::Water.behavior(), Behavior::Liquid);
        assert_eq!(Material::Smoke.behavior(), Behavior::Gas);
    }

    #[test]
    fn empty_color_is_flat() {
        assert_eq!(Material::Empty.color_varied(3, 7), Material::Empty.color());
    }
}
