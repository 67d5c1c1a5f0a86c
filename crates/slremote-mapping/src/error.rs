//! Error types for surface construction, binding setup and MIDI I/O.
//!
//! Only setup and device connection can fail. Event dispatch and
//! navigation never return errors: unbound controls and unknown ids are
//! no-ops.

use thiserror::Error;

use crate::control::{ControlId, MidiBinding};
use crate::page::{PageId, SubPageAreaId, SubPageId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("MIDI address {0:?} is already bound to control {1:?}")]
    DuplicateMidiBinding(MidiBinding, ControlId),

    #[error("Control {control:?} already has a binding in scope {scope}")]
    DuplicateBinding { control: ControlId, scope: String },

    #[error("Unknown control {0:?}")]
    UnknownControl(ControlId),

    #[error("Unknown page {0:?}")]
    UnknownPage(PageId),

    #[error("Unknown subpage area {0:?}")]
    UnknownSubPageArea(SubPageAreaId),

    #[error("Unknown subpage {0:?}")]
    UnknownSubPage(SubPageId),

    #[error("Subpage area {area:?} does not belong to page {page:?}")]
    ForeignSubPageArea { area: SubPageAreaId, page: PageId },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("MIDI port error: {0}")]
    MidiPort(String),

    #[error("MIDI device error: {0}")]
    MidiDevice(String),
}

#[cfg(feature = "midi-io")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::MidiDevice(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
