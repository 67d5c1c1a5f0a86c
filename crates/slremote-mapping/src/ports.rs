//! Port names the SL MkIII exposes for InControl traffic.

use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_PORT: &str = "MIDIIN2 (Novation SL MkIII)";
pub const DEFAULT_OUTPUT_PORT: &str = "MIDIOUT2 (Novation SL MkIII)";

/// Input and output port names of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPair {
    pub input: String,
    pub output: String,
}

impl Default for PortPair {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PORT, DEFAULT_OUTPUT_PORT)
    }
}

impl PortPair {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Virtual loopback ports for recording traffic with a MIDI monitor.
    pub fn loopback() -> Self {
        Self::new("To-Host", "From-Host")
    }

    /// Case-insensitive substring match, as OS port names carry
    /// driver-specific prefixes and suffixes.
    pub fn matches_input(&self, port_name: &str) -> bool {
        name_matches(port_name, &self.input)
    }

    pub fn matches_output(&self, port_name: &str) -> bool {
        name_matches(port_name, &self.output)
    }
}

fn name_matches(port_name: &str, wanted: &str) -> bool {
    port_name.to_lowercase().contains(&wanted.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let ports = PortPair::default();
        assert_eq!(ports.input, "MIDIIN2 (Novation SL MkIII)");
        assert_eq!(ports.output, "MIDIOUT2 (Novation SL MkIII)");
    }

    #[test]
    fn test_matching_ignores_case_and_affixes() {
        let ports = PortPair::default();
        assert!(ports.matches_input("3- midiin2 (novation sl mkiii) 1"));
        assert!(!ports.matches_input("MIDIIN (Novation SL MkIII)"));
        assert!(ports.matches_output("MIDIOUT2 (Novation SL MkIII)"));
    }
}
