//! Host-to-device feedback: what the host reports and how it looks on the
//! surface.

use slremote_mapping::{HostParameter, MixerParameter, TransportParameter};
use slremote_protocol::{palette, Rgb};

/// State change reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostFeedback {
    ChannelTitle {
        channel: u8,
        title: String,
    },
    /// Unit-range components as hosts usually report them.
    ChannelColor {
        channel: u8,
        r: f32,
        g: f32,
        b: f32,
        alpha: f32,
    },
    ParameterValue {
        parameter: HostParameter,
        value: f32,
    },
}

/// Last title and color seen for a bank slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripState {
    pub title: String,
    pub color: Option<Rgb>,
}

/// Knob screen caption for a mixer parameter.
pub fn parameter_label(parameter: MixerParameter) -> String {
    match parameter {
        MixerParameter::Pan => "Pan".to_string(),
        MixerParameter::Volume => "Volume".to_string(),
        MixerParameter::Mute => "Mute".to_string(),
        MixerParameter::Solo => "Solo".to_string(),
        MixerParameter::Selected => "Select".to_string(),
        MixerParameter::SendLevel(slot) => format!("Send {}", slot as u16 + 1),
    }
}

/// Palette color of a lit switch LED.
pub fn switch_color(parameter: &HostParameter) -> u8 {
    match parameter {
        HostParameter::Mixer { parameter, .. } => match parameter {
            MixerParameter::Mute => palette::YELLOW,
            MixerParameter::Solo => palette::BLUE,
            MixerParameter::Selected => palette::WHITE,
            _ => palette::DIM_WHITE,
        },
        HostParameter::Transport(transport) => match transport {
            TransportParameter::Start => palette::GREEN,
            TransportParameter::Record => palette::RED,
            TransportParameter::Cycle => palette::ORANGE,
            TransportParameter::Stop | TransportParameter::Rewind | TransportParameter::Forward => {
                palette::WHITE
            }
        },
    }
}

/// Palette color for a switch at `value`.
pub fn switch_led_color(parameter: &HostParameter, value: f32) -> u8 {
    if value >= 0.5 {
        switch_color(parameter)
    } else {
        palette::OFF
    }
}

/// Normalized value as a 7-bit screen value.
pub fn to_seven_bit(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 127.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_labels() {
        assert_eq!(parameter_label(MixerParameter::Pan), "Pan");
        assert_eq!(parameter_label(MixerParameter::SendLevel(0)), "Send 1");
        assert_eq!(parameter_label(MixerParameter::SendLevel(255)), "Send 256");
    }

    #[test]
    fn test_switch_led_color() {
        let mute = HostParameter::mixer(0, MixerParameter::Mute);
        assert_eq!(switch_led_color(&mute, 1.0), palette::YELLOW);
        assert_eq!(switch_led_color(&mute, 0.0), palette::OFF);
        let record = HostParameter::Transport(TransportParameter::Record);
        assert_eq!(switch_led_color(&record, 1.0), palette::RED);
    }

    #[test]
    fn test_to_seven_bit() {
        assert_eq!(to_seven_bit(0.0), 0);
        assert_eq!(to_seven_bit(0.5), 64);
        assert_eq!(to_seven_bit(1.0), 127);
        assert_eq!(to_seven_bit(2.0), 127);
        assert_eq!(to_seven_bit(-1.0), 0);
    }
}
