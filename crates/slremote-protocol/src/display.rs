//! Screen layouts, field tables and the display reset sequence.
//!
//! The eight knob screens (columns 0-7) share one layout; the center
//! screen is column 8. Text, value and color fields are numbered
//! independently per layout.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::message::DeviceMessage;

/// Column addressing the center screen.
pub const CENTER_COLUMN: u8 = 8;

/// Knob screens plus the center screen.
pub const COLUMN_COUNT: usize = 9;

/// Fields cleared per column on reset.
pub const FIELDS_PER_COLUMN: usize = 4;

/// Layout of the knob screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Layout {
    Empty = 0x00,
    #[default]
    Knob = 0x01,
    Box = 0x02,
}

/// Fields of the knob layout.
pub mod knob {
    pub mod color {
        pub const TOP_BAR: u8 = 0;
        pub const KNOB_ICON: u8 = 1;
        pub const BOTTOM_BAR: u8 = 2;
    }

    pub mod text {
        pub const TEXT_1: u8 = 0;
        pub const TEXT_2: u8 = 1;
        pub const TEXT_3: u8 = 2;
        pub const TEXT_4: u8 = 3;
    }

    pub mod value {
        pub const KNOB_VALUE: u8 = 0;
        /// Non-zero paints text line 4 with the bottom bar color.
        pub const SELECTED: u8 = 1;
    }
}

/// Fields of the box layout.
pub mod boxes {
    pub mod color {
        pub const TOP_BOX: u8 = 0;
        pub const CENTER_BOX: u8 = 1;
        pub const BOTTOM_BOX: u8 = 2;
    }

    pub mod text {
        pub const TOP_TEXT_1: u8 = 0;
        pub const TOP_TEXT_2: u8 = 1;
        pub const CENTER_TEXT_1: u8 = 2;
        pub const CENTER_TEXT_2: u8 = 3;
        pub const LOWER_TEXT_1: u8 = 4;
        pub const LOWER_TEXT_2: u8 = 5;
    }

    pub mod value {
        pub const TOP_SELECTED: u8 = 0;
        pub const CENTER_SELECTED: u8 = 1;
        pub const LOWER_SELECTED: u8 = 2;
    }
}

/// Fields of the center screen.
pub mod center {
    pub mod color {
        pub const LEFT_BAR: u8 = 0;
        pub const TOP_RIGHT_BAR: u8 = 1;
        pub const BOTTOM_RIGHT_BAR: u8 = 2;
    }

    pub mod text {
        pub const LEFT_1: u8 = 0;
        pub const LEFT_2: u8 = 1;
        pub const RIGHT_1: u8 = 2;
        pub const RIGHT_2: u8 = 3;
    }
}

/// Messages that return every screen to its initial state.
///
/// One knob-layout frame, then for each column and field a blank text
/// frame followed by a gray color frame: 1 + 9 × 4 × 2 = 73 messages,
/// each sendable on its own.
pub fn reset_displays() -> Vec<DeviceMessage> {
    let mut messages = Vec::with_capacity(1 + COLUMN_COUNT * FIELDS_PER_COLUMN * 2);
    messages.push(DeviceMessage::activate_layout(Layout::Knob));
    for column in 0..COLUMN_COUNT as u8 {
        for field in 0..FIELDS_PER_COLUMN as u8 {
            messages.push(DeviceMessage::set_display_text(column, field, ""));
            messages.push(DeviceMessage::set_display_color(column, field, Rgb::GRAY));
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_displays_count() {
        assert_eq!(reset_displays().len(), 73);
    }

    #[test]
    fn test_reset_displays_sequence() {
        let messages = reset_displays();
        assert_eq!(messages[0], DeviceMessage::activate_layout(Layout::Knob));

        let mut frames = messages[1..].chunks(2);
        for column in 0..=8u8 {
            for field in 0..=3u8 {
                let pair = frames.next().unwrap();
                assert_eq!(pair[0], DeviceMessage::set_display_text(column, field, ""));
                assert_eq!(
                    pair[1],
                    DeviceMessage::set_display_color(column, field, Rgb::new(127, 127, 127))
                );
            }
        }
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_reset_messages_are_complete_frames() {
        for msg in reset_displays() {
            assert!(msg.is_sysex());
            assert_eq!(msg.as_bytes().last(), Some(&0xF7));
        }
    }
}
