//! MIDI output: device enumeration, connection and sending via a
//! dedicated thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::ArcSwap;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use midir::{MidiOutput, MidiOutputConnection};
use slremote_protocol::DeviceMessage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::output::MidiSink;

const CLIENT_NAME: &str = "slremote-output";

#[derive(Debug, Clone)]
pub struct MidiOutputDevice {
    pub index: usize,
    pub name: String,
}

enum OutputCommand {
    Connect(usize),
    Disconnect,
    Send(DeviceMessage),
    Shutdown,
}

/// Handle to the output thread.
///
/// Messages sent while no port is connected are dropped; nothing is
/// buffered for a later connection.
#[derive(Clone)]
pub struct MidiOutputManager {
    command_sender: Sender<OutputCommand>,
    connected_device: Arc<ArcSwap<Option<String>>>,
    is_connected: Arc<AtomicBool>,
}

impl MidiOutputManager {
    pub fn new() -> Result<Self> {
        let (command_sender, command_receiver) = bounded(1024);
        let connected_device = Arc::new(ArcSwap::new(Arc::new(None)));
        let is_connected = Arc::new(AtomicBool::new(false));

        let connected_device_clone = Arc::clone(&connected_device);
        let is_connected_clone = Arc::clone(&is_connected);

        thread::Builder::new()
            .name("slremote-midi-output".to_string())
            .spawn(move || {
                Self::output_thread(command_receiver, connected_device_clone, is_connected_clone);
            })
            .map_err(|e| Error::MidiDevice(format!("Failed to spawn MIDI output thread: {e}")))?;

        Ok(Self {
            command_sender,
            connected_device,
            is_connected,
        })
    }

    fn output_thread(
        command_receiver: Receiver<OutputCommand>,
        connected_device: Arc<ArcSwap<Option<String>>>,
        is_connected: Arc<AtomicBool>,
    ) {
        let mut connection: Option<MidiOutputConnection> = None;

        loop {
            match command_receiver.recv_timeout(Duration::from_millis(100)) {
                Ok(OutputCommand::Connect(device_index)) => {
                    connection = None;
                    match Self::connect_to_device(device_index) {
                        Ok((conn, name)) => {
                            debug!("MIDI output connected to {}", name);
                            connection = Some(conn);
                            is_connected.store(true, Ordering::SeqCst);
                            connected_device.store(Arc::new(Some(name)));
                        }
                        Err(e) => {
                            debug!("MIDI output connection failed: {}", e);
                            is_connected.store(false, Ordering::SeqCst);
                            connected_device.store(Arc::new(None));
                        }
                    }
                }
                Ok(OutputCommand::Disconnect) => {
                    if connection.take().is_some() {
                        is_connected.store(false, Ordering::SeqCst);
                        connected_device.store(Arc::new(None));
                    }
                }
                Ok(OutputCommand::Send(message)) => match connection {
                    Some(ref mut conn) => {
                        if let Err(e) = conn.send(message.as_bytes()) {
                            debug!("MIDI send failed: {}", e);
                        }
                    }
                    None => debug!("Cannot send MIDI message: no device connected"),
                },
                Ok(OutputCommand::Shutdown) => break,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn connect_to_device(device_index: usize) -> Result<(MidiOutputConnection, String)> {
        let midi_output = MidiOutput::new(CLIENT_NAME)?;

        let ports = midi_output.ports();
        let port = ports.get(device_index).ok_or_else(|| {
            Error::MidiDevice(format!("MIDI output device {} not found", device_index))
        })?;

        let port_name = midi_output
            .port_name(port)
            .unwrap_or_else(|_| format!("Device {}", device_index));

        let connection = midi_output.connect(port, "slremote-incontrol")?;
        Ok((connection, port_name))
    }

    pub fn list_devices() -> Vec<MidiOutputDevice> {
        let mut devices = Vec::new();
        if let Ok(midi_output) = MidiOutput::new("slremote-device-list") {
            for (index, port) in midi_output.ports().iter().enumerate() {
                let name = midi_output
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Unknown Device {}", index));
                devices.push(MidiOutputDevice { index, name });
            }
        }
        devices
    }

    pub fn connect(&self, device_index: usize) -> Result<()> {
        self.command_sender
            .send(OutputCommand::Connect(device_index))
            .map_err(|_| Error::MidiDevice("MIDI output thread not running".to_string()))
    }

    pub fn connect_by_name(&self, name: &str) -> Result<()> {
        let wanted = name.to_lowercase();
        let device = Self::list_devices()
            .into_iter()
            .find(|d| d.name.to_lowercase().contains(&wanted))
            .ok_or_else(|| {
                Error::MidiPort(format!("No MIDI output device found matching '{}'", name))
            })?;
        self.connect(device.index)
    }

    pub fn disconnect(&self) {
        let _ = self.command_sender.send(OutputCommand::Disconnect);
    }

    pub fn send_message(&self, message: DeviceMessage) {
        if let Err(e) = self.command_sender.try_send(OutputCommand::Send(message)) {
            debug!("MIDI output command channel full or disconnected: {}", e);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected.load(Ordering::SeqCst)
    }

    pub fn connected_device_name(&self) -> Option<String> {
        self.connected_device.load().as_ref().clone()
    }
}

impl MidiSink for MidiOutputManager {
    fn send(&mut self, message: &DeviceMessage) {
        self.send_message(message.clone());
    }
}

impl Drop for MidiOutputManager {
    fn drop(&mut self) {
        // Clones share the thread; only the last handle stops it.
        if Arc::strong_count(&self.is_connected) == 2 {
            let _ = self.command_sender.send(OutputCommand::Shutdown);
        }
    }
}
