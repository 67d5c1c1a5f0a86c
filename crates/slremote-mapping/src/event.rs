//! Inbound MIDI decoding and control events.

use crate::control::{ControlId, MidiBinding};

/// A channel message received from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundMessage {
    ControlChange { channel: u8, cc: u8, value: u8 },
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    /// 14-bit value, 8192 = center.
    PitchBend { channel: u8, value: u16 },
}

impl InboundMessage {
    /// Decode a raw message. Anything other than CC, notes and pitch bend
    /// (SysEx, clock, aftertouch) yields `None`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let d0 = *data.first()? & 0x7F;
        let d1 = *data.get(1)? & 0x7F;

        match status & 0xF0 {
            0x80 => Some(Self::NoteOff {
                channel,
                note: d0,
                velocity: d1,
            }),
            // Velocity 0 is a note off by convention.
            0x90 if d1 == 0 => Some(Self::NoteOff {
                channel,
                note: d0,
                velocity: 0,
            }),
            0x90 => Some(Self::NoteOn {
                channel,
                note: d0,
                velocity: d1,
            }),
            0xB0 => Some(Self::ControlChange {
                channel,
                cc: d0,
                value: d1,
            }),
            0xE0 => Some(Self::PitchBend {
                channel,
                value: (d0 as u16) | ((d1 as u16) << 7),
            }),
            _ => None,
        }
    }

    /// The listener address this message is delivered to.
    pub fn address(&self) -> MidiBinding {
        match *self {
            Self::ControlChange { channel, cc, .. } => MidiBinding::ControlChange { channel, cc },
            Self::NoteOn { channel, note, .. } | Self::NoteOff { channel, note, .. } => {
                MidiBinding::Note { channel, note }
            }
            Self::PitchBend { channel, .. } => MidiBinding::PitchBend { channel },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ControlChange,
    NoteOn,
    NoteOff,
    PitchBend,
}

/// A value change on a surface control, as delivered to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub control: ControlId,
    pub kind: EventKind,
    /// Raw value: 7-bit for CC and notes, 14-bit for pitch bend.
    pub value: u16,
}

impl ControlEvent {
    pub fn new(control: ControlId, kind: EventKind, value: u16) -> Self {
        Self {
            control,
            kind,
            value,
        }
    }

    /// Convenience for a 7-bit CC value.
    pub fn control_change(control: ControlId, value: u8) -> Self {
        Self::new(control, EventKind::ControlChange, (value & 0x7F) as u16)
    }

    pub(crate) fn from_message(control: ControlId, message: &InboundMessage) -> Self {
        match *message {
            InboundMessage::ControlChange { value, .. } => Self::control_change(control, value),
            InboundMessage::NoteOn { velocity, .. } => {
                Self::new(control, EventKind::NoteOn, velocity as u16)
            }
            InboundMessage::NoteOff { .. } => Self::new(control, EventKind::NoteOff, 0),
            InboundMessage::PitchBend { value, .. } => {
                Self::new(control, EventKind::PitchBend, value & 0x3FFF)
            }
        }
    }

    /// Value scaled to `0.0..=1.0`.
    #[inline]
    pub fn normalized(&self) -> f32 {
        match self.kind {
            EventKind::PitchBend => (self.value.min(16383)) as f32 / 16383.0,
            _ => (self.value.min(127)) as f32 / 127.0,
        }
    }

    /// Low seven bits of the value, for relative decoding.
    #[inline]
    pub fn data(&self) -> u8 {
        (self.value & 0x7F) as u8
    }

    /// True for the pressed edge of a momentary control.
    #[inline]
    pub fn is_press(&self) -> bool {
        match self.kind {
            EventKind::NoteOff => false,
            _ => self.value > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_bytes_control_change() {
        assert_eq!(
            InboundMessage::from_bytes(&[0xBF, 0x29, 100]),
            Some(InboundMessage::ControlChange {
                channel: 15,
                cc: 0x29,
                value: 100
            })
        );
    }

    #[test]
    fn test_from_bytes_note_on_zero_velocity_is_off() {
        assert_eq!(
            InboundMessage::from_bytes(&[0x9F, 0x60, 0]),
            Some(InboundMessage::NoteOff {
                channel: 15,
                note: 0x60,
                velocity: 0
            })
        );
        assert!(matches!(
            InboundMessage::from_bytes(&[0x9F, 0x60, 90]),
            Some(InboundMessage::NoteOn { velocity: 90, .. })
        ));
    }

    #[test]
    fn test_from_bytes_pitch_bend() {
        assert_eq!(
            InboundMessage::from_bytes(&[0xE0, 0x00, 0x40]),
            Some(InboundMessage::PitchBend {
                channel: 0,
                value: 8192
            })
        );
    }

    #[test]
    fn test_from_bytes_rejects_other_messages() {
        assert_eq!(InboundMessage::from_bytes(&[]), None);
        assert_eq!(InboundMessage::from_bytes(&[0xBF, 0x29]), None);
        assert_eq!(InboundMessage::from_bytes(&[0xF0, 0x00, 0x20, 0xF7]), None);
        assert_eq!(InboundMessage::from_bytes(&[0xC0, 0x01, 0x00]), None);
    }

    #[test]
    fn test_address() {
        let on = InboundMessage::NoteOn {
            channel: 15,
            note: 0x60,
            velocity: 1,
        };
        let off = InboundMessage::NoteOff {
            channel: 15,
            note: 0x60,
            velocity: 0,
        };
        assert_eq!(on.address(), off.address());
    }

    #[test]
    fn test_event_normalized() {
        let id = ControlId(0);
        assert_relative_eq!(ControlEvent::control_change(id, 127).normalized(), 1.0);
        assert_relative_eq!(ControlEvent::control_change(id, 0).normalized(), 0.0);
        assert_relative_eq!(
            ControlEvent::new(id, EventKind::PitchBend, 16383).normalized(),
            1.0
        );
    }

    #[test]
    fn test_event_press_edges() {
        let id = ControlId(0);
        assert!(ControlEvent::control_change(id, 127).is_press());
        assert!(!ControlEvent::control_change(id, 0).is_press());
        assert!(!ControlEvent::new(id, EventKind::NoteOff, 64).is_press());
    }
}
