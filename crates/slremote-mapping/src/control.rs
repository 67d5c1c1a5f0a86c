//! Physical surface controls.
//!
//! A [`Control`] describes one element of the hardware: where it sits on
//! the surface, which MIDI address it listens on (if any) and how its
//! values are to be read.

use serde::{Deserialize, Serialize};

/// Index of a control within its [`Surface`](crate::Surface).
///
/// Assigned in registration order, so ids are dense and stable for the
/// lifetime of the surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ControlId(pub(crate) u16);

impl ControlId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position and size on the surface grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Geometry {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Inbound MIDI address a control listens on.
///
/// Channels are zero-based (15 = MIDI channel 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MidiBinding {
    ControlChange { channel: u8, cc: u8 },
    Note { channel: u8, note: u8 },
    PitchBend { channel: u8 },
}

impl MidiBinding {
    pub fn control_change(channel: u8, cc: u8) -> Self {
        Self::ControlChange {
            channel: channel.min(15),
            cc: cc & 0x7F,
        }
    }

    pub fn note(channel: u8, note: u8) -> Self {
        Self::Note {
            channel: channel.min(15),
            note: note & 0x7F,
        }
    }

    pub fn pitch_bend(channel: u8) -> Self {
        Self::PitchBend {
            channel: channel.min(15),
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            Self::ControlChange { channel, .. }
            | Self::Note { channel, .. }
            | Self::PitchBend { channel } => channel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ButtonShape {
    #[default]
    Rectangle,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ButtonType {
    /// Sends a press and a release.
    #[default]
    Push,
    /// Latches on the device side.
    Toggle,
}

/// How a knob reports movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueEncoding {
    #[default]
    Absolute,
    /// Endless encoder sending 7-bit two's-complement deltas.
    RelativeTwosComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FaderOrientation {
    #[default]
    Vertical,
    Horizontal,
}

/// One physical element of the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Control {
    Button {
        geometry: Geometry,
        binding: Option<MidiBinding>,
        shape: ButtonShape,
        kind: ButtonType,
    },
    Knob {
        geometry: Geometry,
        binding: Option<MidiBinding>,
        encoding: ValueEncoding,
    },
    Fader {
        geometry: Geometry,
        binding: Option<MidiBinding>,
        orientation: FaderOrientation,
    },
    Pad {
        geometry: Geometry,
        binding: Option<MidiBinding>,
    },
    /// Text area; never sends MIDI.
    Label { geometry: Geometry },
    PianoKeys {
        geometry: Geometry,
        first_key: u8,
        last_key: u8,
    },
    BlindPanel { geometry: Geometry },
    PitchWheel {
        geometry: Geometry,
        binding: Option<MidiBinding>,
    },
    ModWheel {
        geometry: Geometry,
        binding: Option<MidiBinding>,
    },
}

impl Control {
    pub fn button(geometry: Geometry, binding: Option<MidiBinding>) -> Self {
        Self::Button {
            geometry,
            binding,
            shape: ButtonShape::Rectangle,
            kind: ButtonType::Push,
        }
    }

    pub fn round_button(geometry: Geometry, binding: Option<MidiBinding>) -> Self {
        Self::Button {
            geometry,
            binding,
            shape: ButtonShape::Circle,
            kind: ButtonType::Push,
        }
    }

    pub fn knob(geometry: Geometry, binding: Option<MidiBinding>, encoding: ValueEncoding) -> Self {
        Self::Knob {
            geometry,
            binding,
            encoding,
        }
    }

    pub fn fader(geometry: Geometry, binding: Option<MidiBinding>) -> Self {
        Self::Fader {
            geometry,
            binding,
            orientation: FaderOrientation::Vertical,
        }
    }

    pub fn pad(geometry: Geometry, binding: Option<MidiBinding>) -> Self {
        Self::Pad { geometry, binding }
    }

    pub fn geometry(&self) -> Geometry {
        match *self {
            Self::Button { geometry, .. }
            | Self::Knob { geometry, .. }
            | Self::Fader { geometry, .. }
            | Self::Pad { geometry, .. }
            | Self::Label { geometry }
            | Self::PianoKeys { geometry, .. }
            | Self::BlindPanel { geometry }
            | Self::PitchWheel { geometry, .. }
            | Self::ModWheel { geometry, .. } => geometry,
        }
    }

    pub fn midi_binding(&self) -> Option<MidiBinding> {
        match *self {
            Self::Button { binding, .. }
            | Self::Knob { binding, .. }
            | Self::Fader { binding, .. }
            | Self::Pad { binding, .. }
            | Self::PitchWheel { binding, .. }
            | Self::ModWheel { binding, .. } => binding,
            Self::Label { .. } | Self::PianoKeys { .. } | Self::BlindPanel { .. } => None,
        }
    }

    /// Value encoding of the control's incoming data.
    pub fn encoding(&self) -> ValueEncoding {
        match *self {
            Self::Knob { encoding, .. } => encoding,
            _ => ValueEncoding::Absolute,
        }
    }

    /// Buttons and pads: controls whose values are presses.
    pub fn is_momentary(&self) -> bool {
        matches!(self, Self::Button { .. } | Self::Pad { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Button { .. } => "button",
            Self::Knob { .. } => "knob",
            Self::Fader { .. } => "fader",
            Self::Pad { .. } => "pad",
            Self::Label { .. } => "label",
            Self::PianoKeys { .. } => "piano keys",
            Self::BlindPanel { .. } => "blind panel",
            Self::PitchWheel { .. } => "pitch wheel",
            Self::ModWheel { .. } => "mod wheel",
        }
    }
}
