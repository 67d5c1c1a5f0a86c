//! 7-bit RGB colors and the single-byte palette.

use serde::{Deserialize, Serialize};

use crate::utils::clamp7;

/// RGB color with 7-bit components, as sent in screen and LED frames.
///
/// Components are saturated to `0..=127` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    /// Neutral color used when the screens are reset.
    pub const GRAY: Rgb = Rgb {
        r: 127,
        g: 127,
        b: 127,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: clamp7(r),
            g: clamp7(g),
            b: clamp7(b),
        }
    }

    /// Scale host color components (`0.0..=1.0`) to the device range.
    ///
    /// Each component is multiplied by 127 and by `amplitude` (the host's
    /// alpha or a brightness factor), then saturated. NaN maps to 0.
    pub fn from_unit(r: f32, g: f32, b: f32, amplitude: f32) -> Self {
        let scale = |c: f32| -> u8 {
            let v = (c * 127.0 * amplitude).round();
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, 127.0) as u8
            }
        };
        Self {
            r: scale(r),
            g: scale(g),
            b: scale(b),
        }
    }

    /// Components as sent on the wire, saturated even if the fields were
    /// set directly.
    #[inline]
    pub fn components(&self) -> [u8; 3] {
        [clamp7(self.r), clamp7(self.g), clamp7(self.b)]
    }
}

/// Indices into the device's built-in color table, for the single-byte
/// LED commands.
pub mod palette {
    pub const OFF: u8 = 0;
    pub const DIM_WHITE: u8 = 1;
    pub const WHITE: u8 = 3;
    pub const RED: u8 = 5;
    pub const ORANGE: u8 = 9;
    pub const YELLOW: u8 = 13;
    pub const GREEN: u8 = 21;
    pub const CYAN: u8 = 37;
    pub const BLUE: u8 = 45;
    pub const PURPLE: u8 = 49;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_saturates() {
        let c = Rgb::new(200, 127, 0);
        assert_eq!(c.components(), [127, 127, 0]);
    }

    #[test]
    fn test_from_unit_scales_by_amplitude() {
        assert_eq!(Rgb::from_unit(1.0, 0.5, 0.0, 1.0), Rgb::new(127, 64, 0));
        assert_eq!(Rgb::from_unit(1.0, 1.0, 1.0, 0.5), Rgb::new(64, 64, 64));
    }

    #[test]
    fn test_from_unit_clamps_out_of_range() {
        assert_eq!(Rgb::from_unit(2.0, -1.0, f32::NAN, 1.0), Rgb::new(127, 0, 0));
    }
}
