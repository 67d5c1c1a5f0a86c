//! Surface controls, binding model and feedback plumbing for the SL MkIII.
//!
//! - [`Surface`]: physical controls and their inbound MIDI listeners
//! - [`BindingModel`]: the page → subpage area → subpage tree, which
//!   binding is active for a control, and navigation between pages
//! - [`HostAccess`]: the host parameters bindings write to
//! - [`DisplayState`]: shadow copy of the device screens
//! - [`MidiSink`]: outbound hand-off, with a lock-free
//!   [`feedback_channel`] for crossing threads
//!
//! Hardware ports (midir) are behind the `midi-io` feature.
//!
//! ```
//! use slremote_mapping::{
//!     BindingMode, BindingModel, BindingScope, Control, ControlEvent, Geometry, HostAccess,
//!     HostParameter, MidiBinding, MixerParameter, ParameterStore, Surface,
//! };
//!
//! let mut surface = Surface::new();
//! let knob = surface
//!     .add(Control::fader(Geometry::default(), Some(MidiBinding::control_change(15, 0x29))))
//!     .unwrap();
//!
//! let mut model = BindingModel::with_control_count(surface.len());
//! let page = model.add_page("Mixer");
//! let volume = HostParameter::mixer(0, MixerParameter::Volume);
//! model
//!     .bind_parameter(knob, volume, BindingMode::Direct, BindingScope::Page(page))
//!     .unwrap();
//!
//! let mut host = ParameterStore::new();
//! model.dispatch(&ControlEvent::control_change(knob, 127), &mut host);
//! assert_eq!(host.value(&volume), 1.0);
//! ```

pub mod binding;
pub mod control;
pub mod display;
pub mod error;
pub mod event;
pub mod host;
pub mod model;
pub mod output;
pub mod page;
pub mod ports;
pub mod surface;

#[cfg(feature = "midi-io")]
pub mod io;

pub use binding::{relative_delta, Binding, BindingMode, BindingScope, BindingTarget, NavigationAction};
pub use control::{
    ButtonShape, ButtonType, Control, ControlId, FaderOrientation, Geometry, MidiBinding,
    ValueEncoding,
};
pub use display::{DisplayCell, DisplayState};
pub use error::{Error, Result};
pub use event::{ControlEvent, EventKind, InboundMessage};
pub use host::{
    HostAccess, HostParameter, MixerBankZone, MixerParameter, ParameterStore, TransportParameter,
};
pub use model::{Activation, Activations, BindingModel, DispatchResult, NavigationState};
pub use output::{
    feedback_channel, feedback_channel_with_capacity, FeedbackConsumer, FeedbackProducer, MidiSink,
};
pub use page::{DisplayLabel, Page, PageId, SubPage, SubPageArea, SubPageAreaId, SubPageId};
pub use ports::PortPair;
pub use surface::Surface;

#[cfg(feature = "midi-io")]
pub use io::{connect_port_pair, MidiInputDevice, MidiInputManager, MidiOutputDevice, MidiOutputManager};
