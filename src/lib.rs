//! # slremote - Novation SL MkIII InControl remote
//!
//! Drives the SL MkIII in InControl mode from a host application.
//!
//! ## Architecture
//!
//! slremote is an umbrella crate that coordinates:
//! - **slremote-protocol** - Device message codec (SysEx screens, LEDs, notifications)
//! - **slremote-mapping** - Surface controls, page/subpage binding model, MIDI ports
//!
//! On top of those it lays out the SL MkIII surface, registers the
//! standard page bindings and renders navigation and host feedback.
//!
//! ## Quick Start
//!
//! ```
//! use slremote::prelude::*;
//!
//! let mut driver = Driver::builder().build(Vec::<DeviceMessage>::new())?;
//! driver.start();
//!
//! // Pads-down button: next page.
//! let mut host = ParameterStore::new();
//! driver.handle_midi(&[0xBF, 0x56, 0x7F], &mut host);
//! assert_eq!(driver.model().active_page(), driver.model().find_page("Test Page"));
//! # Ok::<(), slremote::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Codec, binding model and driver; no hardware access
//! - `midi-hardware` - midir ports and the input pump thread

/// Re-export of slremote-protocol for direct access
pub use slremote_protocol as protocol;

/// Re-export of slremote-mapping for direct access
pub use slremote_mapping as mapping;

pub use slremote_protocol::{palette, DeviceMessage, Identity, Rgb, IDENTITY_REQUEST};

pub use slremote_mapping::{
    Activation, BindingMode, BindingModel, ControlEvent, ControlId, DispatchResult, DisplayLabel,
    DisplayState, FeedbackConsumer, FeedbackProducer, HostAccess, HostParameter, InboundMessage,
    MidiSink, MixerBankZone, MixerParameter, PageId, ParameterStore, PortPair, SubPageAreaId,
    SubPageId, Surface, TransportParameter,
};

mod builder;
mod config;
mod driver;
mod error;
mod feedback;
mod layout;

#[cfg(feature = "midi-hardware")]
mod hardware;

pub use builder::DriverBuilder;
pub use config::{
    DriverConfig, FaderAssignment, FaderSubPage, KnobAssignment, KnobSubPage, PageConfig,
    FADER_AREA_NAME, KNOB_AREA_NAME,
};
pub use driver::{Driver, PageAreas, SharedDriver};
pub use error::{Error, Result};
pub use feedback::{HostFeedback, StripState};
pub use layout::{FaderStrip, KnobStrip, SlMk3Layout, TransportButtons};

#[cfg(feature = "midi-hardware")]
pub use hardware::{spawn_input_pump, Hardware};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Driver, DriverBuilder, DriverConfig, HostFeedback, PageConfig};

    pub use crate::{FaderAssignment, KnobAssignment};

    pub use crate::mapping::{HostAccess, HostParameter, MixerParameter, ParameterStore};

    pub use crate::protocol::DeviceMessage;

    #[cfg(feature = "midi-hardware")]
    pub use crate::Hardware;
}
