//! MIDI input: device enumeration and connection on a dedicated thread.
//!
//! Decoded messages are queued on a bounded channel in arrival order;
//! the consumer feeds them to the driver one at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::ArcSwap;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use midir::{Ignore, MidiInput, MidiInputConnection};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::event::InboundMessage;

const EVENT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct MidiInputDevice {
    pub index: usize,
    pub name: String,
}

enum InputCommand {
    Connect(usize),
    Disconnect,
    Shutdown,
}

pub struct MidiInputManager {
    command_sender: Sender<InputCommand>,
    events: Receiver<InboundMessage>,
    connected_device: Arc<ArcSwap<Option<String>>>,
    is_connected: Arc<AtomicBool>,
}

impl MidiInputManager {
    pub fn new() -> Result<Self> {
        let (command_sender, command_receiver) = bounded(16);
        let (event_sender, events) = bounded(EVENT_QUEUE_CAPACITY);
        let connected_device = Arc::new(ArcSwap::new(Arc::new(None)));
        let is_connected = Arc::new(AtomicBool::new(false));

        let connected_device_clone = Arc::clone(&connected_device);
        let is_connected_clone = Arc::clone(&is_connected);

        thread::Builder::new()
            .name("slremote-midi-input".to_string())
            .spawn(move || {
                Self::input_thread(
                    command_receiver,
                    event_sender,
                    connected_device_clone,
                    is_connected_clone,
                );
            })
            .map_err(|e| Error::MidiDevice(format!("Failed to spawn MIDI input thread: {e}")))?;

        Ok(Self {
            command_sender,
            events,
            connected_device,
            is_connected,
        })
    }

    fn input_thread(
        command_receiver: Receiver<InputCommand>,
        event_sender: Sender<InboundMessage>,
        connected_device: Arc<ArcSwap<Option<String>>>,
        is_connected: Arc<AtomicBool>,
    ) {
        let mut connection: Option<MidiInputConnection<()>> = None;

        loop {
            match command_receiver.recv_timeout(Duration::from_millis(100)) {
                Ok(InputCommand::Connect(device_index)) => {
                    if connection.take().is_some() {
                        is_connected.store(false, Ordering::SeqCst);
                        connected_device.store(Arc::new(None));
                    }

                    match Self::connect_to_device(device_index, event_sender.clone()) {
                        Ok((conn, name)) => {
                            debug!("MIDI input connected to {}", name);
                            connection = Some(conn);
                            is_connected.store(true, Ordering::SeqCst);
                            connected_device.store(Arc::new(Some(name)));
                        }
                        Err(e) => debug!("MIDI input connection failed: {}", e),
                    }
                }
                Ok(InputCommand::Disconnect) => {
                    if connection.take().is_some() {
                        is_connected.store(false, Ordering::SeqCst);
                        connected_device.store(Arc::new(None));
                    }
                }
                Ok(InputCommand::Shutdown) => break,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn connect_to_device(
        device_index: usize,
        event_sender: Sender<InboundMessage>,
    ) -> Result<(MidiInputConnection<()>, String)> {
        let mut midi_input = MidiInput::new("slremote-input")?;
        midi_input.ignore(Ignore::TimeAndActiveSense);

        let ports = midi_input.ports();
        let port = ports.get(device_index).ok_or_else(|| {
            Error::MidiDevice(format!("MIDI input device {} not found", device_index))
        })?;

        let port_name = midi_input
            .port_name(port)
            .unwrap_or_else(|_| format!("Device {}", device_index));

        let connection = midi_input.connect(
            port,
            "slremote-incontrol",
            move |_timestamp, bytes, _| match InboundMessage::from_bytes(bytes) {
                Some(message) => {
                    if event_sender.try_send(message).is_err() {
                        debug!("MIDI input queue full, dropping event");
                    }
                }
                None => trace!("Ignoring MIDI message {:02X?}", bytes),
            },
            (),
        )?;

        Ok((connection, port_name))
    }

    pub fn list_devices() -> Vec<MidiInputDevice> {
        let mut devices = Vec::new();
        if let Ok(midi_input) = MidiInput::new("slremote-device-list") {
            for (index, port) in midi_input.ports().iter().enumerate() {
                let name = midi_input
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Unknown Device {}", index));
                devices.push(MidiInputDevice { index, name });
            }
        }
        devices
    }

    pub fn connect(&self, device_index: usize) -> Result<()> {
        self.command_sender
            .send(InputCommand::Connect(device_index))
            .map_err(|_| Error::MidiDevice("MIDI input thread not running".to_string()))
    }

    pub fn connect_by_name(&self, name: &str) -> Result<()> {
        let wanted = name.to_lowercase();
        let device = Self::list_devices()
            .into_iter()
            .find(|d| d.name.to_lowercase().contains(&wanted))
            .ok_or_else(|| {
                Error::MidiPort(format!("No MIDI input device found matching '{}'", name))
            })?;
        self.connect(device.index)
    }

    pub fn disconnect(&self) {
        let _ = self.command_sender.send(InputCommand::Disconnect);
    }

    /// Queue of decoded inbound messages.
    pub fn events(&self) -> Receiver<InboundMessage> {
        self.events.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected.load(Ordering::SeqCst)
    }

    pub fn connected_device_name(&self) -> Option<String> {
        self.connected_device.load().as_ref().clone()
    }
}

impl Drop for MidiInputManager {
    fn drop(&mut self) {
        let _ = self.command_sender.send(InputCommand::Shutdown);
    }
}
