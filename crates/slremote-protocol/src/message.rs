//! Outbound device messages.

use smallvec::SmallVec;

use crate::color::Rgb;
use crate::display::{Layout, CENTER_COLUMN};
use crate::ids::{LedIndexColorId, LedRgbId, PadNote};
use crate::utils::{ascii_bytes, clamp7};
use crate::{SYSEX_END, SYSEX_HEADER};

/// Command byte following the SysEx header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    Layout = 0x01,
    DisplayProperty = 0x02,
    Led = 0x03,
    Notification = 0x04,
}

/// Screen property selector for [`Command::DisplayProperty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayProperty {
    Text = 0x01,
    ColorIndex = 0x02,
    Value = 0x03,
    Rgb = 0x04,
}

/// LED behavior selector for [`Command::Led`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedBehavior {
    Solid = 0x01,
    /// Alternate between this color and the previous one.
    Flash = 0x02,
    /// Fade between dim and bright.
    Pulse = 0x03,
}

/// A complete outbound message, ready for the MIDI output port.
///
/// Either a full SysEx frame or a short channel message. Constructors
/// saturate every numeric argument to the 7-bit range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceMessage {
    pub bytes: SmallVec<[u8; 16]>,
}

impl DeviceMessage {
    fn sysex(command: Command) -> Self {
        let mut bytes = SmallVec::new();
        bytes.extend_from_slice(&SYSEX_HEADER);
        bytes.push(command as u8);
        Self { bytes }
    }

    fn finish(mut self) -> Self {
        self.bytes.push(SYSEX_END);
        self
    }

    fn display_property(column: u8, property: DisplayProperty, field: u8) -> Self {
        let mut msg = Self::sysex(Command::DisplayProperty);
        msg.bytes
            .extend_from_slice(&[column.min(CENTER_COLUMN), property as u8, clamp7(field)]);
        msg
    }

    fn led(led: LedRgbId, behavior: LedBehavior, color: Rgb) -> Self {
        let mut msg = Self::sysex(Command::Led);
        msg.bytes.extend_from_slice(&[led.value(), behavior as u8]);
        msg.bytes.extend_from_slice(&color.components());
        msg.finish()
    }

    /// Select the layout of the eight knob screens.
    pub fn activate_layout(layout: Layout) -> Self {
        let mut msg = Self::sysex(Command::Layout);
        msg.bytes.push(layout as u8);
        msg.finish()
    }

    /// Set a text field. `column` 0-7 addresses a knob screen, 8 the
    /// center screen.
    pub fn set_display_text(column: u8, field: u8, text: &str) -> Self {
        let mut msg = Self::display_property(column, DisplayProperty::Text, field);
        msg.bytes.extend(ascii_bytes(text));
        msg.bytes.push(0x00);
        msg.finish()
    }

    pub fn set_display_value(column: u8, field: u8, value: u8) -> Self {
        let mut msg = Self::display_property(column, DisplayProperty::Value, field);
        msg.bytes.push(clamp7(value));
        msg.finish()
    }

    pub fn set_display_color(column: u8, field: u8, color: Rgb) -> Self {
        let mut msg = Self::display_property(column, DisplayProperty::Rgb, field);
        msg.bytes.extend_from_slice(&color.components());
        msg.finish()
    }

    pub fn set_led_color_rgb(led: LedRgbId, color: Rgb) -> Self {
        Self::led(led, LedBehavior::Solid, color)
    }

    pub fn set_led_flash_rgb(led: LedRgbId, color: Rgb) -> Self {
        Self::led(led, LedBehavior::Flash, color)
    }

    pub fn set_led_pulse_rgb(led: LedRgbId, color: Rgb) -> Self {
        Self::led(led, LedBehavior::Pulse, color)
    }

    /// Palette color via Control Change on channel 16.
    pub fn set_led_color_index(led: LedIndexColorId, color: u8) -> Self {
        Self {
            bytes: SmallVec::from_slice(&[0xBF, led.value(), clamp7(color)]),
        }
    }

    /// Flash between two palette colors: the base color on channel 16,
    /// the flash color on channel 2.
    pub fn flash_led_color_index(led: LedIndexColorId, color: u8, flash: u8) -> Self {
        Self {
            bytes: SmallVec::from_slice(&[
                0xBF,
                led.value(),
                clamp7(color),
                0xB1,
                led.value(),
                clamp7(flash),
            ]),
        }
    }

    /// Palette color for a pad, via Note On on channel 16.
    pub fn set_pad_color_index(pad: PadNote, color: u8) -> Self {
        Self {
            bytes: SmallVec::from_slice(&[0x9F, pad.value(), clamp7(color)]),
        }
    }

    /// Two-line pop-up on the center screen.
    pub fn set_notification(line1: &str, line2: &str) -> Self {
        let mut msg = Self::sysex(Command::Notification);
        msg.bytes.extend(ascii_bytes(line1));
        msg.bytes.push(0x00);
        msg.bytes.extend(ascii_bytes(line2));
        msg.bytes.push(0x00);
        msg.finish()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn is_sysex(&self) -> bool {
        self.bytes.first() == Some(&0xF0)
    }
}

impl AsRef<[u8]> for DeviceMessage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CcNumber, Pad, Strip};

    const HEADER: [u8; 7] = [0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01];

    #[test]
    fn test_display_text_frame() {
        for column in 0..=8u8 {
            for field in 0..=3u8 {
                let msg = DeviceMessage::set_display_text(column, field, "Vox 1");
                let bytes = msg.as_bytes();
                assert_eq!(&bytes[..7], &HEADER);
                assert_eq!(&bytes[7..11], &[0x02, column, 0x01, field]);
                assert_eq!(&bytes[11..16], b"Vox 1");
                assert_eq!(&bytes[16..], &[0x00, 0xF7]);
            }
        }
    }

    #[test]
    fn test_display_text_empty() {
        let msg = DeviceMessage::set_display_text(8, 0, "");
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01, 0x02, 0x08, 0x01, 0x00, 0x00, 0xF7]
        );
    }

    #[test]
    fn test_display_text_skips_non_ascii() {
        let msg = DeviceMessage::set_display_text(0, 0, "Caf\u{e9}");
        assert_eq!(&msg.as_bytes()[11..], &[b'C', b'a', b'f', 0x00, 0xF7]);
    }

    #[test]
    fn test_display_value_frame() {
        let msg = DeviceMessage::set_display_value(2, 0, 100);
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01, 0x02, 0x02, 0x03, 0x00, 100, 0xF7]
        );
    }

    #[test]
    fn test_display_color_frame() {
        let msg = DeviceMessage::set_display_color(8, 2, Rgb::new(1, 2, 3));
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01, 0x02, 0x08, 0x04, 0x02, 1, 2, 3, 0xF7]
        );
    }

    #[test]
    fn test_led_rgb_fader_one() {
        let msg = DeviceMessage::set_led_color_rgb(LedRgbId::fader(Strip::FIRST), Rgb::new(100, 50, 0));
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01, 0x03, 0x36, 0x01, 100, 50, 0, 0xF7]
        );
    }

    #[test]
    fn test_led_rgb_frame_shape() {
        for led in LedRgbId::all() {
            let msg = DeviceMessage::set_led_color_rgb(led, Rgb::new(127, 0, 64));
            let bytes = msg.as_bytes();
            assert_eq!(bytes.len(), 14);
            assert_eq!(&bytes[..7], &HEADER);
            assert_eq!(&bytes[7..], &[0x03, led.value(), 0x01, 127, 0, 64, 0xF7]);
        }
    }

    #[test]
    fn test_led_behaviors() {
        let led = LedRgbId::PLAY;
        let color = Rgb::new(0, 127, 0);
        assert_eq!(DeviceMessage::set_led_flash_rgb(led, color).as_bytes()[9], 0x02);
        assert_eq!(DeviceMessage::set_led_pulse_rgb(led, color).as_bytes()[9], 0x03);
        assert_eq!(DeviceMessage::set_led_color_rgb(led, color).as_bytes()[9], 0x01);
    }

    #[test]
    fn test_led_color_index() {
        let msg = DeviceMessage::set_led_color_index(CcNumber::PLAY.into(), 21);
        assert_eq!(msg.as_bytes(), &[0xBF, 0x73, 21]);
        assert!(!msg.is_sysex());
    }

    #[test]
    fn test_flash_led_color_index() {
        let msg = DeviceMessage::flash_led_color_index(CcNumber::RECORD.into(), 5, 0);
        assert_eq!(msg.as_bytes(), &[0xBF, 0x75, 5, 0xB1, 0x75, 0]);
    }

    #[test]
    fn test_pad_color_index() {
        let pad = PadNote::pad(Pad::new(8).unwrap());
        let msg = DeviceMessage::set_pad_color_index(pad, 45);
        assert_eq!(msg.as_bytes(), &[0x9F, 0x70, 45]);
    }

    #[test]
    fn test_notification_frame() {
        let msg = DeviceMessage::set_notification("Mixer", "Pan");
        let mut expected = HEADER.to_vec();
        expected.push(0x04);
        expected.extend_from_slice(b"Mixer");
        expected.push(0x00);
        expected.extend_from_slice(b"Pan");
        expected.extend_from_slice(&[0x00, 0xF7]);
        assert_eq!(msg.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_layout_frame() {
        let msg = DeviceMessage::activate_layout(Layout::Knob);
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01, 0x01, 0x01, 0xF7]
        );
    }

    #[test]
    fn test_out_of_range_values_saturate() {
        let msg = DeviceMessage::set_display_value(200, 255, 255);
        assert_eq!(&msg.as_bytes()[8..12], &[0x08, 0x03, 0x7F, 0x7F]);

        let msg = DeviceMessage::set_led_color_index(LedIndexColorId::new(0x75), 200);
        assert_eq!(msg.as_bytes()[2], 0x7F);

        let msg = DeviceMessage::set_led_color_rgb(LedRgbId::PLAY, Rgb { r: 255, g: 128, b: 7 });
        assert_eq!(&msg.as_bytes()[10..13], &[127, 127, 7]);
    }
}
