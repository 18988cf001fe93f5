//! Height-map point records

use serde::Serialize;

use crate::format::reader::bits;

/// Number of paint layers a point can blend
pub const NUM_LAYER_SLOTS: usize = 4;

/// Four 4-bit blend weights packed into one 16-bit word.
///
/// Layer 1 lives in the lowest nibble, layer 4 in the highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "[u8; 4]")]
pub struct LayerAlpha(u16);

impl LayerAlpha {
    pub fn from_bits(word: u16) -> Self {
        Self(word)
    }

    /// Pack four nibbles (values above 15 are masked).
    pub fn new(layers: [u8; NUM_LAYER_SLOTS]) -> Self {
        let word = layers
            .iter()
            .enumerate()
            .fold(0u16, |acc, (i, &v)| acc | (((v & 0xF) as u16) << (i * 4)));
        Self(word)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Raw 0..=15 weight of a layer slot
    pub fn layer(&self, slot: usize) -> u8 {
        debug_assert!(slot < NUM_LAYER_SLOTS);
        bits(self.0 as u32, (slot * 4) as u32, 4) as u8
    }

    pub fn layers(&self) -> [u8; NUM_LAYER_SLOTS] {
        std::array::from_fn(|slot| self.layer(slot))
    }
}

impl From<LayerAlpha> for [u8; NUM_LAYER_SLOTS] {
    fn from(alpha: LayerAlpha) -> Self {
        alpha.layers()
    }
}

/// One height-map sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeightPoint {
    pub height: u16,
    pub normal: [i8; 3],
    /// Bit 0 of the flag byte
    pub hollowed: bool,
    /// Bit 7 of the flag byte
    pub invisible_poly: bool,
    pub layer_alpha: LayerAlpha,
}

impl HeightPoint {
    /// Split the flag byte into `(hollowed, invisible_poly)`; bits 1..=6 are reserved.
    pub fn unpack_flags(flags: u8) -> (bool, bool) {
        (bits(flags as u32, 0, 1) != 0, bits(flags as u32, 7, 1) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_alpha_nibble_order() {
        let alpha = LayerAlpha::from_bits(0x4321);
        assert_eq!(alpha.layers(), [1, 2, 3, 4]);
        assert_eq!(alpha.layer(0), 1);
        assert_eq!(alpha.layer(3), 4);
    }

    #[test]
    fn test_layer_alpha_pack() {
        let alpha = LayerAlpha::new([15, 0, 7, 9]);
        assert_eq!(alpha.bits(), 0x970F);
        assert_eq!(alpha.layers(), [15, 0, 7, 9]);
    }

    #[test]
    fn test_flag_bits() {
        assert_eq!(HeightPoint::unpack_flags(0b0000_0001), (true, false));
        assert_eq!(HeightPoint::unpack_flags(0b1000_0000), (false, true));
        // Reserved bits are ignored
        assert_eq!(HeightPoint::unpack_flags(0b0111_1110), (false, false));
    }
}
