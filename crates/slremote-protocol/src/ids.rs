//! InControl address tables.
//!
//! The SL MkIII addresses the same physical control through several
//! unrelated number spaces:
//!
//! - [`CcNumber`]: the Control Change a button/knob/fader sends on the
//!   InControl channel.
//! - [`PadNote`]: the note a pad sends on the InControl channel.
//! - [`LedRgbId`]: the LED address used by the RGB SysEx commands.
//! - [`LedIndexColorId`]: the LED address used by the single-byte
//!   palette command; it equals the control's CC number.
//!
//! Each space is its own type, so a pad note can never be passed where a
//! CC is expected even when the raw numbers coincide (pad 9 and Rewind
//! both use `0x70`, in different message types).
//!
//! Banked controls are addressed with typed indices ([`Strip`], [`Pad`],
//! [`SoftButtonRow`]) so the bank helpers cannot run past their range.

use serde::{Deserialize, Serialize};

use crate::STRIP_COUNT;

/// Channel strip index, `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Strip(u8);

impl Strip {
    pub const FIRST: Strip = Strip(0);

    pub fn new(index: usize) -> Option<Self> {
        (index < STRIP_COUNT).then_some(Strip(index as u8))
    }

    pub fn all() -> impl Iterator<Item = Strip> {
        (0..STRIP_COUNT as u8).map(Strip)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pad index, `0..16`. Pads `0..8` are the top row, `8..16` the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pad(u8);

impl Pad {
    pub const COUNT: usize = 16;

    pub fn new(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Pad(index as u8))
    }

    pub fn top(strip: Strip) -> Self {
        Pad(strip.0)
    }

    pub fn bottom(strip: Strip) -> Self {
        Pad(strip.0 + STRIP_COUNT as u8)
    }

    pub fn all() -> impl Iterator<Item = Pad> {
        (0..Self::COUNT as u8).map(Pad)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The three rows of eight soft buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoftButtonRow {
    /// Row under the knob screens.
    Knob,
    /// Upper row above the faders.
    FaderTop,
    /// Lower row above the faders.
    FaderBottom,
}

impl SoftButtonRow {
    pub const ALL: [SoftButtonRow; 3] = [
        SoftButtonRow::Knob,
        SoftButtonRow::FaderTop,
        SoftButtonRow::FaderBottom,
    ];

    #[inline]
    fn offset(self) -> u8 {
        match self {
            SoftButtonRow::Knob => 0,
            SoftButtonRow::FaderTop => 8,
            SoftButtonRow::FaderBottom => 16,
        }
    }
}

/// Control Change number sent by a control in InControl mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CcNumber(u8);

impl CcNumber {
    pub const ROTARY_KNOB_1: CcNumber = CcNumber(0x15);
    pub const FADER_1: CcNumber = CcNumber(0x29);
    pub const SOFTBUTTON_1: CcNumber = CcNumber(0x33);
    pub const SOFTBUTTON_9: CcNumber = CcNumber(0x3B);
    pub const SOFTBUTTON_17: CcNumber = CcNumber(0x43);
    pub const SCREEN_UP: CcNumber = CcNumber(0x51);
    pub const SCREEN_DOWN: CcNumber = CcNumber(0x52);
    pub const SCENE_LAUNCH_TOP: CcNumber = CcNumber(0x53);
    pub const SCENE_LAUNCH_BOTTOM: CcNumber = CcNumber(0x54);
    pub const PADS_UP: CcNumber = CcNumber(0x55);
    pub const PADS_DOWN: CcNumber = CcNumber(0x56);
    pub const RIGHT_SOFTBUTTONS_UP: CcNumber = CcNumber(0x57);
    pub const RIGHT_SOFTBUTTONS_DOWN: CcNumber = CcNumber(0x58);
    pub const GRID: CcNumber = CcNumber(0x59);
    pub const OPTIONS: CcNumber = CcNumber(0x5A);
    pub const SHIFT: CcNumber = CcNumber(0x5B);
    pub const DUPLICATE: CcNumber = CcNumber(0x5C);
    pub const CLEAR: CcNumber = CcNumber(0x5D);
    pub const TRACK_LEFT: CcNumber = CcNumber(0x66);
    pub const TRACK_RIGHT: CcNumber = CcNumber(0x67);
    pub const REWIND: CcNumber = CcNumber(0x70);
    pub const FAST_FORWARD: CcNumber = CcNumber(0x71);
    pub const STOP: CcNumber = CcNumber(0x72);
    pub const PLAY: CcNumber = CcNumber(0x73);
    pub const LOOP: CcNumber = CcNumber(0x74);
    pub const RECORD: CcNumber = CcNumber(0x75);

    /// Unbanked controls, in panel order.
    pub const FIXED: [CcNumber; 21] = [
        Self::SCREEN_UP,
        Self::SCREEN_DOWN,
        Self::SCENE_LAUNCH_TOP,
        Self::SCENE_LAUNCH_BOTTOM,
        Self::PADS_UP,
        Self::PADS_DOWN,
        Self::RIGHT_SOFTBUTTONS_UP,
        Self::RIGHT_SOFTBUTTONS_DOWN,
        Self::GRID,
        Self::OPTIONS,
        Self::SHIFT,
        Self::DUPLICATE,
        Self::CLEAR,
        Self::TRACK_LEFT,
        Self::TRACK_RIGHT,
        Self::REWIND,
        Self::FAST_FORWARD,
        Self::STOP,
        Self::PLAY,
        Self::LOOP,
        Self::RECORD,
    ];

    /// Raw 7-bit number; high bit is masked off.
    pub const fn new(raw: u8) -> Self {
        CcNumber(raw & 0x7F)
    }

    pub fn knob(strip: Strip) -> Self {
        CcNumber(Self::ROTARY_KNOB_1.0 + strip.0)
    }

    pub fn fader(strip: Strip) -> Self {
        CcNumber(Self::FADER_1.0 + strip.0)
    }

    pub fn soft_button(row: SoftButtonRow, strip: Strip) -> Self {
        CcNumber(Self::SOFTBUTTON_1.0 + row.offset() + strip.0)
    }

    /// Every CC number the surface can send, banks expanded.
    pub fn all() -> Vec<CcNumber> {
        let mut all = Self::FIXED.to_vec();
        for strip in Strip::all() {
            all.push(Self::knob(strip));
            all.push(Self::fader(strip));
            for row in SoftButtonRow::ALL {
                all.push(Self::soft_button(row, strip));
            }
        }
        all
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Note number sent by a pad in InControl mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PadNote(u8);

impl PadNote {
    pub const PAD_1: PadNote = PadNote(0x60);
    pub const PAD_9: PadNote = PadNote(0x70);

    pub fn pad(pad: Pad) -> Self {
        let index = pad.0;
        if (index as usize) < STRIP_COUNT {
            PadNote(Self::PAD_1.0 + index)
        } else {
            PadNote(Self::PAD_9.0 + index - STRIP_COUNT as u8)
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// LED address for the RGB SysEx commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedRgbId(u8);

impl LedRgbId {
    pub const PADS_UP: LedRgbId = LedRgbId(0x00);
    pub const PADS_DOWN: LedRgbId = LedRgbId(0x01);
    pub const SCENE_LAUNCH_TOP: LedRgbId = LedRgbId(0x02);
    pub const SCENE_LAUNCH_BOTTOM: LedRgbId = LedRgbId(0x03);
    pub const SOFTBUTTON_1: LedRgbId = LedRgbId(0x04);
    pub const SOFTBUTTON_9: LedRgbId = LedRgbId(0x0C);
    pub const SOFTBUTTON_17: LedRgbId = LedRgbId(0x14);
    pub const RIGHT_SOFTBUTTONS_UP: LedRgbId = LedRgbId(0x1C);
    pub const RIGHT_SOFTBUTTONS_DOWN: LedRgbId = LedRgbId(0x1D);
    pub const TRACK_LEFT: LedRgbId = LedRgbId(0x1E);
    pub const TRACK_RIGHT: LedRgbId = LedRgbId(0x1F);
    pub const RECORD: LedRgbId = LedRgbId(0x20);
    pub const REWIND: LedRgbId = LedRgbId(0x21);
    pub const FAST_FORWARD: LedRgbId = LedRgbId(0x22);
    pub const STOP: LedRgbId = LedRgbId(0x23);
    pub const PLAY: LedRgbId = LedRgbId(0x24);
    pub const LOOP: LedRgbId = LedRgbId(0x25);
    pub const PAD_1: LedRgbId = LedRgbId(0x26);
    pub const PAD_9: LedRgbId = LedRgbId(0x2E);
    pub const FADER_1: LedRgbId = LedRgbId(0x36);
    pub const SCREEN_UP: LedRgbId = LedRgbId(0x3E);
    pub const SCREEN_DOWN: LedRgbId = LedRgbId(0x3F);
    pub const GRID: LedRgbId = LedRgbId(0x40);
    pub const OPTIONS: LedRgbId = LedRgbId(0x41);
    pub const DUPLICATE: LedRgbId = LedRgbId(0x42);
    pub const CLEAR: LedRgbId = LedRgbId(0x43);

    const FIXED: [LedRgbId; 20] = [
        Self::PADS_UP,
        Self::PADS_DOWN,
        Self::SCENE_LAUNCH_TOP,
        Self::SCENE_LAUNCH_BOTTOM,
        Self::RIGHT_SOFTBUTTONS_UP,
        Self::RIGHT_SOFTBUTTONS_DOWN,
        Self::TRACK_LEFT,
        Self::TRACK_RIGHT,
        Self::RECORD,
        Self::REWIND,
        Self::FAST_FORWARD,
        Self::STOP,
        Self::PLAY,
        Self::LOOP,
        Self::SCREEN_UP,
        Self::SCREEN_DOWN,
        Self::GRID,
        Self::OPTIONS,
        Self::DUPLICATE,
        Self::CLEAR,
    ];

    /// Raw 7-bit address; high bit is masked off.
    pub const fn new(raw: u8) -> Self {
        LedRgbId(raw & 0x7F)
    }

    pub fn fader(strip: Strip) -> Self {
        LedRgbId(Self::FADER_1.0 + strip.0)
    }

    pub fn soft_button(row: SoftButtonRow, strip: Strip) -> Self {
        LedRgbId(Self::SOFTBUTTON_1.0 + row.offset() + strip.0)
    }

    pub fn pad(pad: Pad) -> Self {
        LedRgbId(Self::PAD_1.0 + pad.0)
    }

    /// Every RGB LED address, banks expanded.
    pub fn all() -> Vec<LedRgbId> {
        let mut all = Self::FIXED.to_vec();
        for strip in Strip::all() {
            all.push(Self::fader(strip));
            for row in SoftButtonRow::ALL {
                all.push(Self::soft_button(row, strip));
            }
        }
        all.extend(Pad::all().map(Self::pad));
        all
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// LED address for the single-byte palette command.
///
/// Only CC-addressed controls have one; pads take palette colors through
/// their note (see [`DeviceMessage::set_pad_color_index`](crate::DeviceMessage::set_pad_color_index)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedIndexColorId(u8);

impl LedIndexColorId {
    pub const fn new(raw: u8) -> Self {
        LedIndexColorId(raw & 0x7F)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<CcNumber> for LedIndexColorId {
    fn from(cc: CcNumber) -> Self {
        LedIndexColorId(cc.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_strip_bounds() {
        assert!(Strip::new(7).is_some());
        assert!(Strip::new(8).is_none());
        assert_eq!(Strip::all().count(), STRIP_COUNT);
    }

    #[test]
    fn test_bank_offsets() {
        let strip = Strip::new(3).unwrap();
        assert_eq!(CcNumber::knob(strip).value(), 0x18);
        assert_eq!(CcNumber::fader(strip).value(), 0x2C);
        assert_eq!(
            CcNumber::soft_button(SoftButtonRow::FaderTop, Strip::FIRST),
            CcNumber::SOFTBUTTON_9
        );
        assert_eq!(
            CcNumber::soft_button(SoftButtonRow::FaderBottom, Strip::FIRST),
            CcNumber::SOFTBUTTON_17
        );
        assert_eq!(LedRgbId::fader(Strip::FIRST).value(), 0x36);
        assert_eq!(
            LedRgbId::soft_button(SoftButtonRow::FaderBottom, Strip::FIRST),
            LedRgbId::SOFTBUTTON_17
        );
    }

    #[test]
    fn test_pad_notes() {
        assert_eq!(PadNote::pad(Pad::new(0).unwrap()), PadNote::PAD_1);
        assert_eq!(PadNote::pad(Pad::new(7).unwrap()).value(), 0x67);
        assert_eq!(PadNote::pad(Pad::new(8).unwrap()), PadNote::PAD_9);
        assert_eq!(PadNote::pad(Pad::bottom(Strip::new(7).unwrap())).value(), 0x77);
        assert_eq!(LedRgbId::pad(Pad::new(8).unwrap()), LedRgbId::PAD_9);
    }

    #[test]
    fn test_cc_table_has_no_collisions() {
        let all = CcNumber::all();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 21 + STRIP_COUNT * 5);
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_led_rgb_table_has_no_collisions() {
        let all = LedRgbId::all();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 20 + STRIP_COUNT * 4 + Pad::COUNT);
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_index_color_id_follows_cc() {
        let id = LedIndexColorId::from(CcNumber::RECORD);
        assert_eq!(id.value(), 0x75);
    }
}
