//! The set of physical controls and their inbound MIDI listeners.

use std::collections::HashMap;

use tracing::trace;

use crate::control::{Control, ControlId, MidiBinding};
use crate::error::{Error, Result};
use crate::event::{ControlEvent, InboundMessage};

/// Registry of surface controls.
///
/// Each MIDI-bound control owns exactly one listener; two controls can
/// never share an address.
#[derive(Debug, Default, Clone)]
pub struct Surface {
    controls: Vec<Control>,
    listeners: HashMap<MidiBinding, ControlId>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control and its listener.
    pub fn add(&mut self, control: Control) -> Result<ControlId> {
        let id = ControlId(u16::try_from(self.controls.len()).map_err(|_| {
            Error::InvalidConfig("too many surface controls".to_string())
        })?);

        if let Some(binding) = control.midi_binding() {
            if let Some(&owner) = self.listeners.get(&binding) {
                return Err(Error::DuplicateMidiBinding(binding, owner));
            }
            self.listeners.insert(binding, id);
        }

        self.controls.push(control);
        Ok(id)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: ControlId) -> bool {
        id.index() < self.controls.len()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, c)| (ControlId(i as u16), c))
    }

    /// Control listening on `binding`, if any.
    pub fn listener(&self, binding: &MidiBinding) -> Option<ControlId> {
        self.listeners.get(binding).copied()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Route an inbound message to the control listening on its address.
    pub fn resolve(&self, message: &InboundMessage) -> Option<ControlEvent> {
        match self.listener(&message.address()) {
            Some(control) => Some(ControlEvent::from_message(control, message)),
            None => {
                trace!("No listener for {:?}", message);
                None
            }
        }
    }
}
