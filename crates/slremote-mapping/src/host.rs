//! Host parameters and the access trait the driver writes through.
//!
//! All values are normalized to `0.0..=1.0`. Boolean parameters (mute,
//! solo, selected, transport switches) use `0.0` / `1.0`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-channel mixer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixerParameter {
    Pan,
    Mute,
    Solo,
    Volume,
    Selected,
    /// Level of the numbered send slot.
    SendLevel(u8),
}

impl MixerParameter {
    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Mute | Self::Solo | Self::Selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportParameter {
    Start,
    Stop,
    Record,
    Rewind,
    Forward,
    Cycle,
}

/// A parameter the host exposes for binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostParameter {
    /// `channel` is the slot within the mixer bank zone.
    Mixer {
        channel: u8,
        parameter: MixerParameter,
    },
    Transport(TransportParameter),
}

impl HostParameter {
    pub fn mixer(channel: u8, parameter: MixerParameter) -> Self {
        Self::Mixer { channel, parameter }
    }
}

/// Read and write access to host parameters.
pub trait HostAccess {
    fn value(&self, parameter: &HostParameter) -> f32;

    fn set_value(&mut self, parameter: &HostParameter, value: f32);
}

/// A fixed-size window over the host's mixer channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixerBankZone {
    pub channel_count: u8,
    pub exclude_input_channels: bool,
    pub exclude_output_channels: bool,
}

impl MixerBankZone {
    pub fn new(channel_count: u8) -> Self {
        Self {
            channel_count,
            exclude_input_channels: false,
            exclude_output_channels: false,
        }
    }

    pub fn exclude_input_channels(mut self) -> Self {
        self.exclude_input_channels = true;
        self
    }

    pub fn exclude_output_channels(mut self) -> Self {
        self.exclude_output_channels = true;
        self
    }

    /// Parameter of the bank slot `channel`, or `None` past the zone.
    pub fn parameter(&self, channel: u8, parameter: MixerParameter) -> Option<HostParameter> {
        (channel < self.channel_count).then_some(HostParameter::Mixer { channel, parameter })
    }

    pub fn channels(&self) -> impl Iterator<Item = u8> {
        0..self.channel_count
    }
}

/// In-memory [`HostAccess`] implementation.
///
/// Unset parameters read as `0.0`. Every write is counted, which lets
/// callers check that an event reached (or did not reach) the host.
#[derive(Debug, Default, Clone)]
pub struct ParameterStore {
    values: HashMap<HostParameter, f32>,
    writes: usize,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value without counting it as a write, as host-side changes do.
    pub fn preset(&mut self, parameter: HostParameter, value: f32) {
        self.values.insert(parameter, value.clamp(0.0, 1.0));
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl HostAccess for ParameterStore {
    fn value(&self, parameter: &HostParameter) -> f32 {
        self.values.get(parameter).copied().unwrap_or(0.0)
    }

    fn set_value(&mut self, parameter: &HostParameter, value: f32) {
        self.writes += 1;
        self.values.insert(*parameter, value.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_zone_bounds() {
        let zone = MixerBankZone::new(8)
            .exclude_input_channels()
            .exclude_output_channels();
        assert!(zone.exclude_input_channels && zone.exclude_output_channels);
        assert_eq!(
            zone.parameter(7, MixerParameter::Pan),
            Some(HostParameter::mixer(7, MixerParameter::Pan))
        );
        assert_eq!(zone.parameter(8, MixerParameter::Pan), None);
        assert_eq!(zone.channels().count(), 8);
    }

    #[test]
    fn test_store_defaults_and_clamps() {
        let mut store = ParameterStore::new();
        let p = HostParameter::Transport(TransportParameter::Cycle);
        assert_eq!(store.value(&p), 0.0);

        store.set_value(&p, 3.0);
        assert_eq!(store.value(&p), 1.0);
        assert_eq!(store.write_count(), 1);

        store.preset(p, 0.0);
        assert_eq!(store.value(&p), 0.0);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_switch_parameters() {
        assert!(MixerParameter::Mute.is_switch());
        assert!(!MixerParameter::SendLevel(0).is_switch());
    }
}
