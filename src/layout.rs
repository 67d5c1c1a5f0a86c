//! The SL MkIII 49 control surface.
//!
//! Geometry is in surface grid units (one knob column = 2 units). Every
//! MIDI-bound control listens on the InControl channel.

use slremote_mapping::{Control, ControlId, FaderOrientation, Geometry, MidiBinding, Surface, ValueEncoding};
use slremote_protocol::{
    CcNumber, LedIndexColorId, LedRgbId, Pad, PadNote, SoftButtonRow, Strip, INCONTROL_CHANNEL,
    STRIP_COUNT,
};

use crate::error::Result;

/// Zero-based index of the last piano key drawn.
pub const PIANO_KEY_COUNT: u8 = 60;

/// Knob column: knob, soft button under the screen and two pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnobStrip {
    pub strip: Strip,
    pub knob: ControlId,
    pub button: ControlId,
    pub pad_top: ControlId,
    pub pad_bottom: ControlId,
}

/// Fader column: two soft buttons and the fader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaderStrip {
    pub strip: Strip,
    pub button_top: ControlId,
    pub button_bottom: ControlId,
    pub fader: ControlId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportButtons {
    pub rewind: ControlId,
    pub forward: ControlId,
    pub stop: ControlId,
    pub start: ControlId,
    pub cycle: ControlId,
    pub record: ControlId,
}

/// Ids of every control on the surface, by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlMk3Layout {
    pub knob_strips: Vec<KnobStrip>,
    pub fader_strips: Vec<FaderStrip>,
    pub transport: TransportButtons,

    pub prev_page: ControlId,
    pub next_page: ControlId,
    pub prev_knob_sub_page: ControlId,
    pub next_knob_sub_page: ControlId,
    pub prev_fader_sub_page: ControlId,
    pub next_fader_sub_page: ControlId,

    pub options: ControlId,
    pub grid: ControlId,
    pub clear: ControlId,
    pub duplicate: ControlId,
    pub scene_launch_top: ControlId,
    pub scene_launch_bottom: ControlId,
    pub track_left: ControlId,
    pub track_right: ControlId,

    pub device_label: ControlId,
    pub piano_keys: ControlId,
    pub blind_panels: [ControlId; 2],
    pub mod_wheel: ControlId,
    pub pitch_wheel: ControlId,
}

fn incontrol_cc(cc: CcNumber) -> Option<MidiBinding> {
    Some(MidiBinding::control_change(INCONTROL_CHANNEL, cc.value()))
}

fn incontrol_note(note: PadNote) -> Option<MidiBinding> {
    Some(MidiBinding::note(INCONTROL_CHANNEL, note.value()))
}

fn button(surface: &mut Surface, x: f32, y: f32, w: f32, h: f32, cc: CcNumber) -> Result<ControlId> {
    Ok(surface.add(Control::button(Geometry::new(x, y, w, h), incontrol_cc(cc)))?)
}

fn round_button(surface: &mut Surface, x: f32, y: f32, cc: CcNumber) -> Result<ControlId> {
    Ok(surface.add(Control::round_button(Geometry::new(x, y, 2.0, 2.0), incontrol_cc(cc)))?)
}

impl SlMk3Layout {
    /// Add every SL MkIII control to `surface`.
    pub fn build(surface: &mut Surface) -> Result<Self> {
        let prev_page = round_button(surface, 4.0, 5.0, CcNumber::PADS_UP)?;
        let next_page = round_button(surface, 4.0, 7.0, CcNumber::PADS_DOWN)?;

        let options = button(surface, 22.0, 4.0, 2.0, 1.0, CcNumber::OPTIONS)?;
        let grid = button(surface, 4.0, 4.0, 2.0, 1.0, CcNumber::GRID)?;
        let clear = button(surface, 0.0, 6.0, 2.0, 1.0, CcNumber::CLEAR)?;
        let duplicate = button(surface, 0.0, 5.0, 2.0, 1.0, CcNumber::DUPLICATE)?;
        let scene_launch_top = round_button(surface, 22.0, 5.0, CcNumber::SCENE_LAUNCH_TOP)?;
        let scene_launch_bottom = round_button(surface, 22.0, 7.0, CcNumber::SCENE_LAUNCH_BOTTOM)?;

        let track_left = button(surface, 0.0, 7.0, 2.0, 1.0, CcNumber::TRACK_LEFT)?;
        let track_right = button(surface, 2.0, 7.0, 2.0, 1.0, CcNumber::TRACK_RIGHT)?;

        let prev_knob_sub_page = button(surface, 4.0, 2.0, 2.0, 1.0, CcNumber::SCREEN_UP)?;
        let next_knob_sub_page = button(surface, 4.0, 3.0, 2.0, 1.0, CcNumber::SCREEN_DOWN)?;
        let prev_fader_sub_page =
            button(surface, 40.0, 0.0, 2.0, 1.0, CcNumber::RIGHT_SOFTBUTTONS_UP)?;
        let next_fader_sub_page =
            button(surface, 40.0, 1.0, 2.0, 1.0, CcNumber::RIGHT_SOFTBUTTONS_DOWN)?;

        let device_label = surface.add(Control::Label {
            geometry: Geometry::new(45.0, 0.0, 7.0, 2.0),
        })?;

        let mut knob_strips = Vec::with_capacity(STRIP_COUNT);
        let mut fader_strips = Vec::with_capacity(STRIP_COUNT);
        for strip in Strip::all() {
            fader_strips.push(Self::fader_strip(surface, strip, 24.0, 0.0)?);
            knob_strips.push(Self::knob_strip(surface, strip, 6.0, 0.0)?);
        }

        let piano_keys = surface.add(Control::PianoKeys {
            geometry: Geometry::new(5.0, 10.0, 48.0, 7.0),
            first_key: 0,
            last_key: PIANO_KEY_COUNT,
        })?;

        let blind_panels = [
            surface.add(Control::BlindPanel {
                geometry: Geometry::new(6.0, 2.0, STRIP_COUNT as f32 * 2.0, 2.0),
            })?,
            surface.add(Control::BlindPanel {
                geometry: Geometry::new(22.0, 2.0, 2.0, 2.0),
            })?,
        ];

        let transport = Self::transport(surface, 41.0, 7.0)?;

        // Drawn only; the wheels play notes and are not InControl messages.
        let mod_wheel = surface.add(Control::ModWheel {
            geometry: Geometry::new(3.0, 11.0, 1.0, 6.0),
            binding: None,
        })?;
        let pitch_wheel = surface.add(Control::PitchWheel {
            geometry: Geometry::new(1.0, 11.0, 1.0, 6.0),
            binding: None,
        })?;

        Ok(Self {
            knob_strips,
            fader_strips,
            transport,
            prev_page,
            next_page,
            prev_knob_sub_page,
            next_knob_sub_page,
            prev_fader_sub_page,
            next_fader_sub_page,
            options,
            grid,
            clear,
            duplicate,
            scene_launch_top,
            scene_launch_bottom,
            track_left,
            track_right,
            device_label,
            piano_keys,
            blind_panels,
            mod_wheel,
            pitch_wheel,
        })
    }

    fn knob_strip(surface: &mut Surface, strip: Strip, x: f32, y: f32) -> Result<KnobStrip> {
        let x = x + 2.0 * strip.index() as f32;
        let knob = surface.add(Control::knob(
            Geometry::new(x, y, 2.0, 2.0),
            incontrol_cc(CcNumber::knob(strip)),
            ValueEncoding::RelativeTwosComplement,
        ))?;
        let button = button(
            surface,
            x,
            y + 4.0,
            2.0,
            1.0,
            CcNumber::soft_button(SoftButtonRow::Knob, strip),
        )?;
        let pad_top = surface.add(Control::pad(
            Geometry::new(x, y + 5.0, 2.0, 2.0),
            incontrol_note(PadNote::pad(Pad::top(strip))),
        ))?;
        let pad_bottom = surface.add(Control::pad(
            Geometry::new(x, y + 7.0, 2.0, 2.0),
            incontrol_note(PadNote::pad(Pad::bottom(strip))),
        ))?;

        Ok(KnobStrip {
            strip,
            knob,
            button,
            pad_top,
            pad_bottom,
        })
    }

    fn fader_strip(surface: &mut Surface, strip: Strip, x: f32, y: f32) -> Result<FaderStrip> {
        let x = x + 2.0 * strip.index() as f32;
        let button_top = button(
            surface,
            x,
            y,
            2.0,
            1.0,
            CcNumber::soft_button(SoftButtonRow::FaderTop, strip),
        )?;
        let button_bottom = button(
            surface,
            x,
            y + 1.0,
            2.0,
            1.0,
            CcNumber::soft_button(SoftButtonRow::FaderBottom, strip),
        )?;
        let fader = surface.add(Control::Fader {
            geometry: Geometry::new(x, y + 3.0, 2.0, 6.0),
            binding: incontrol_cc(CcNumber::fader(strip)),
            orientation: FaderOrientation::Vertical,
        })?;

        Ok(FaderStrip {
            strip,
            button_top,
            button_bottom,
            fader,
        })
    }

    fn transport(surface: &mut Surface, x: f32, y: f32) -> Result<TransportButtons> {
        let ccs = [
            CcNumber::REWIND,
            CcNumber::FAST_FORWARD,
            CcNumber::STOP,
            CcNumber::PLAY,
            CcNumber::LOOP,
            CcNumber::RECORD,
        ];
        let mut ids = [ControlId::default(); 6];
        for (i, cc) in ccs.into_iter().enumerate() {
            ids[i] = button(surface, x + 2.0 * i as f32, y, 2.0, 2.0, cc)?;
        }
        let [rewind, forward, stop, start, cycle, record] = ids;
        Ok(TransportButtons {
            rewind,
            forward,
            stop,
            start,
            cycle,
            record,
        })
    }

    pub fn knob_strip_of(&self, control: ControlId) -> Option<&KnobStrip> {
        self.knob_strips.iter().find(|s| {
            s.knob == control || s.button == control || s.pad_top == control || s.pad_bottom == control
        })
    }

    pub fn fader_strip_of(&self, control: ControlId) -> Option<&FaderStrip> {
        self.fader_strips
            .iter()
            .find(|s| s.fader == control || s.button_top == control || s.button_bottom == control)
    }

    /// RGB LED next to `control`, if it has one.
    pub fn rgb_led(&self, control: ControlId) -> Option<LedRgbId> {
        if let Some(s) = self.knob_strip_of(control) {
            return if control == s.button {
                Some(LedRgbId::soft_button(SoftButtonRow::Knob, s.strip))
            } else if control == s.pad_top {
                Some(LedRgbId::pad(Pad::top(s.strip)))
            } else if control == s.pad_bottom {
                Some(LedRgbId::pad(Pad::bottom(s.strip)))
            } else {
                None
            };
        }
        if let Some(s) = self.fader_strip_of(control) {
            return Some(if control == s.fader {
                LedRgbId::fader(s.strip)
            } else if control == s.button_top {
                LedRgbId::soft_button(SoftButtonRow::FaderTop, s.strip)
            } else {
                LedRgbId::soft_button(SoftButtonRow::FaderBottom, s.strip)
            });
        }

        let t = &self.transport;
        let fixed = [
            (self.prev_page, LedRgbId::PADS_UP),
            (self.next_page, LedRgbId::PADS_DOWN),
            (self.scene_launch_top, LedRgbId::SCENE_LAUNCH_TOP),
            (self.scene_launch_bottom, LedRgbId::SCENE_LAUNCH_BOTTOM),
            (self.prev_knob_sub_page, LedRgbId::SCREEN_UP),
            (self.next_knob_sub_page, LedRgbId::SCREEN_DOWN),
            (self.prev_fader_sub_page, LedRgbId::RIGHT_SOFTBUTTONS_UP),
            (self.next_fader_sub_page, LedRgbId::RIGHT_SOFTBUTTONS_DOWN),
            (self.track_left, LedRgbId::TRACK_LEFT),
            (self.track_right, LedRgbId::TRACK_RIGHT),
            (self.grid, LedRgbId::GRID),
            (self.options, LedRgbId::OPTIONS),
            (self.duplicate, LedRgbId::DUPLICATE),
            (self.clear, LedRgbId::CLEAR),
            (t.rewind, LedRgbId::REWIND),
            (t.forward, LedRgbId::FAST_FORWARD),
            (t.stop, LedRgbId::STOP),
            (t.start, LedRgbId::PLAY),
            (t.cycle, LedRgbId::LOOP),
            (t.record, LedRgbId::RECORD),
        ];
        fixed
            .into_iter()
            .find_map(|(id, led)| (id == control).then_some(led))
    }

    /// Single-byte palette LED address of a CC-bound control.
    pub fn index_led(&self, surface: &Surface, control: ControlId) -> Option<LedIndexColorId> {
        match surface.control(control)?.midi_binding()? {
            MidiBinding::ControlChange { cc, .. } => Some(CcNumber::new(cc).into()),
            _ => None,
        }
    }
}
