//! Hardware MIDI I/O.
//!
//! Device enumeration and connection via midir, each direction on a
//! dedicated thread. Requires the `midi-io` feature.

mod input;
mod output;

pub use input::{MidiInputDevice, MidiInputManager};
pub use output::{MidiOutputDevice, MidiOutputManager};

use crate::error::Result;
use crate::ports::PortPair;

/// Connect both directions to the ports named by `ports`.
pub fn connect_port_pair(
    ports: &PortPair,
    input: &MidiInputManager,
    output: &MidiOutputManager,
) -> Result<()> {
    input.connect_by_name(&ports.input)?;
    output.connect_by_name(&ports.output)
}
