//! Driver configuration.
//!
//! Pages are data: each page gets the standard bindings (page buttons,
//! transport, strip buttons) and optionally a knob and a fader subpage
//! area whose subpages decide what the knobs and faders control.

use serde::{Deserialize, Serialize};
use slremote_mapping::{DisplayLabel, MixerBankZone, MixerParameter, PortPair};
use slremote_protocol::STRIP_COUNT;

use crate::error::{Error, Result};

/// Name of the knob subpage area created for pages with knob subpages.
pub const KNOB_AREA_NAME: &str = "Knobs";
/// Name of the fader subpage area created for pages with fader subpages.
pub const FADER_AREA_NAME: &str = "Faders";

/// Highest send slot a subpage can address.
pub const MAX_SEND_SLOTS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnobAssignment {
    Pan,
    SendLevel(u8),
}

impl KnobAssignment {
    pub fn parameter(self) -> MixerParameter {
        match self {
            Self::Pan => MixerParameter::Pan,
            Self::SendLevel(slot) => MixerParameter::SendLevel(slot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaderAssignment {
    Volume,
    SendLevel(u8),
}

impl FaderAssignment {
    pub fn parameter(self) -> MixerParameter {
        match self {
            Self::Volume => MixerParameter::Volume,
            Self::SendLevel(slot) => MixerParameter::SendLevel(slot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnobSubPage {
    pub name: String,
    pub knobs: KnobAssignment,
    #[serde(default)]
    pub labels: Vec<DisplayLabel>,
}

impl KnobSubPage {
    pub fn new(name: impl Into<String>, knobs: KnobAssignment) -> Self {
        Self {
            name: name.into(),
            knobs,
            labels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaderSubPage {
    pub name: String,
    pub faders: FaderAssignment,
    #[serde(default)]
    pub labels: Vec<DisplayLabel>,
}

impl FaderSubPage {
    pub fn new(name: impl Into<String>, faders: FaderAssignment) -> Self {
        Self {
            name: name.into(),
            faders,
            labels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub name: String,
    /// Empty: knobs control pan directly.
    #[serde(default)]
    pub knob_sub_pages: Vec<KnobSubPage>,
    /// Empty: faders control volume directly.
    #[serde(default)]
    pub fader_sub_pages: Vec<FaderSubPage>,
    #[serde(default)]
    pub labels: Vec<DisplayLabel>,
}

impl PageConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            knob_sub_pages: Vec::new(),
            fader_sub_pages: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn knob_sub_page(mut self, name: impl Into<String>, knobs: KnobAssignment) -> Self {
        self.knob_sub_pages.push(KnobSubPage::new(name, knobs));
        self
    }

    pub fn fader_sub_page(mut self, name: impl Into<String>, faders: FaderAssignment) -> Self {
        self.fader_sub_pages.push(FaderSubPage::new(name, faders));
        self
    }

    pub fn label(mut self, label: DisplayLabel) -> Self {
        self.labels.push(label);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Mixer channels bound to the strips, `1..=8`.
    pub bank_size: u8,
    pub pages: Vec<PageConfig>,
    #[serde(default)]
    pub ports: PortPair,
}

impl Default for DriverConfig {
    /// A mixer page whose knobs switch between pan and the first send,
    /// and a plain test page.
    fn default() -> Self {
        Self {
            bank_size: STRIP_COUNT as u8,
            pages: vec![
                PageConfig::new("Mixer Page")
                    .knob_sub_page("Pan", KnobAssignment::Pan)
                    .knob_sub_page("Send", KnobAssignment::SendLevel(0)),
                PageConfig::new("Test Page"),
            ],
            ports: PortPair::default(),
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bank_size == 0 || self.bank_size as usize > STRIP_COUNT {
            return Err(Error::Config(format!(
                "bank size {} outside 1..={}",
                self.bank_size, STRIP_COUNT
            )));
        }
        if self.pages.is_empty() {
            return Err(Error::NoPages);
        }

        for (i, page) in self.pages.iter().enumerate() {
            if self.pages[..i].iter().any(|p| p.name == page.name) {
                return Err(Error::DuplicatePage(page.name.clone()));
            }

            let knob_slots = page.knob_sub_pages.iter().filter_map(|s| match s.knobs {
                KnobAssignment::SendLevel(slot) => Some(slot),
                KnobAssignment::Pan => None,
            });
            let fader_slots = page.fader_sub_pages.iter().filter_map(|s| match s.faders {
                FaderAssignment::SendLevel(slot) => Some(slot),
                FaderAssignment::Volume => None,
            });
            if let Some(slot) = knob_slots.chain(fader_slots).find(|&s| s >= MAX_SEND_SLOTS) {
                return Err(Error::Config(format!(
                    "page \"{}\" uses send slot {} (max {})",
                    page.name,
                    slot,
                    MAX_SEND_SLOTS - 1
                )));
            }
        }
        Ok(())
    }

    /// Channel window the strips bind to.
    pub fn mixer_bank_zone(&self) -> MixerBankZone {
        MixerBankZone::new(self.bank_size)
            .exclude_input_channels()
            .exclude_output_channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pages() {
        let config = DriverConfig::default();
        config.validate().unwrap();
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].name, "Mixer Page");
        assert_eq!(config.pages[0].knob_sub_pages.len(), 2);
        assert_eq!(config.pages[0].knob_sub_pages[1].knobs, KnobAssignment::SendLevel(0));
        assert_eq!(config.pages[1].name, "Test Page");
        assert!(config.pages[1].knob_sub_pages.is_empty());
        assert_eq!(config.mixer_bank_zone().channel_count, 8);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = DriverConfig::default();
        config.bank_size = 9;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = DriverConfig::default();
        config.pages.push(PageConfig::new("Test Page"));
        assert!(matches!(config.validate(), Err(Error::DuplicatePage(_))));

        let mut config = DriverConfig::default();
        config.pages.clear();
        assert!(matches!(config.validate(), Err(Error::NoPages)));

        let mut config = DriverConfig::default();
        config.pages[1] = PageConfig::new("Sends").fader_sub_page("Far", FaderAssignment::SendLevel(8));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_bincode_round_trip() {
        let config = DriverConfig::default();
        let bytes = bincode::serialize(&config).unwrap();
        let decoded: DriverConfig = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_assignment_parameters() {
        assert_eq!(KnobAssignment::Pan.parameter(), MixerParameter::Pan);
        assert_eq!(
            FaderAssignment::SendLevel(2).parameter(),
            MixerParameter::SendLevel(2)
        );
    }
}
