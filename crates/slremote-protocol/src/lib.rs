//! Novation SL MkIII InControl protocol.
//!
//! Outbound encoders for the SL MkIII screens and LEDs, and the typed
//! address tables of its InControl controls. Everything here is pure:
//! encoders build byte frames and never fail, out-of-range input is
//! saturated instead.
//!
//! ## Frame layout
//!
//! ```text
//! F0 00 20 29 02 0A 01 <command> <payload...> F7
//!    \______/ \______/
//!    Novation  SL MkIII
//! ```
//!
//! | Command | Meaning              | Sub-ops                            |
//! |---------|----------------------|------------------------------------|
//! | `01`    | screen layout        | `00` empty, `01` knob, `02` box    |
//! | `02`    | screen property      | `01` text, `03` value, `04` RGB    |
//! | `03`    | LED                  | `01` solid, `02` flash, `03` pulse |
//! | `04`    | center notification  | two NUL-terminated lines           |
//!
//! Single-byte palette colors bypass SysEx and use a Control Change on
//! channel 16 (`BF <led> <color>`).
//!
//! ## Example
//!
//! ```
//! use slremote_protocol::{DeviceMessage, LedRgbId, Rgb, Strip};
//!
//! let fader_1 = LedRgbId::fader(Strip::FIRST);
//! let msg = DeviceMessage::set_led_color_rgb(fader_1, Rgb::new(100, 50, 0));
//! assert_eq!(
//!     msg.as_bytes(),
//!     &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01, 0x03, 0x36, 0x01, 100, 50, 0, 0xF7]
//! );
//! ```

pub mod color;
pub mod display;
pub mod identity;
pub mod ids;
pub mod message;
mod utils;

pub use color::{palette, Rgb};
pub use display::{reset_displays, Layout, CENTER_COLUMN, COLUMN_COUNT, FIELDS_PER_COLUMN};
pub use identity::{Identity, IDENTITY_REQUEST};
pub use ids::{CcNumber, LedIndexColorId, LedRgbId, Pad, PadNote, SoftButtonRow, Strip};
pub use message::{Command, DeviceMessage, DisplayProperty, LedBehavior};

/// SysEx header shared by every SL MkIII frame: manufacturer `00 20 29`
/// followed by the fixed sub-ids `02 0A 01`.
pub const SYSEX_HEADER: [u8; 7] = [0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x01];

/// End of exclusive.
pub const SYSEX_END: u8 = 0xF7;

/// Zero-indexed MIDI channel used by InControl mode (channel 16).
pub const INCONTROL_CHANNEL: u8 = 15;

/// Number of channel strips (knob/fader columns) on the surface.
pub const STRIP_COUNT: usize = 8;
