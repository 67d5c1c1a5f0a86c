//! Hardware session: midir ports plus the thread that feeds inbound
//! messages to a shared driver.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use slremote_mapping::{
    connect_port_pair, HostAccess, InboundMessage, MidiInputManager, MidiOutputManager, MidiSink,
    PortPair,
};
use tracing::{debug, info};

use crate::builder::DriverBuilder;
use crate::driver::{Driver, SharedDriver};
use crate::error::Result;

/// Connected input and output ports of one SL MkIII.
pub struct Hardware {
    input: MidiInputManager,
    output: MidiOutputManager,
}

impl Hardware {
    pub fn open(ports: &PortPair) -> Result<Self> {
        let input = MidiInputManager::new()?;
        let output = MidiOutputManager::new()?;
        connect_port_pair(ports, &input, &output)?;
        info!(input = %ports.input, output = %ports.output, "SL MkIII ports connected");
        Ok(Self { input, output })
    }

    /// Build a driver that renders to this session's output port.
    pub fn driver(&self, builder: DriverBuilder) -> Result<Driver<MidiOutputManager>> {
        builder.build(self.output.clone())
    }

    pub fn events(&self) -> Receiver<InboundMessage> {
        self.input.events()
    }

    pub fn is_connected(&self) -> bool {
        self.input.is_connected() && self.output.is_connected()
    }

    pub fn disconnect(&self) {
        self.input.disconnect();
        self.output.disconnect();
    }
}

/// Feed every message from `events` to `driver` until the sender side
/// goes away. Host and driver locks are taken per message, host first.
pub fn spawn_input_pump<S, H>(
    driver: SharedDriver<S>,
    host: Arc<Mutex<H>>,
    events: Receiver<InboundMessage>,
) -> Result<JoinHandle<()>>
where
    S: MidiSink + Send + 'static,
    H: HostAccess + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("slremote-input-pump".to_string())
        .spawn(move || {
            for message in events.iter() {
                let mut host = host.lock();
                driver.lock().handle_inbound(&message, &mut *host);
            }
            debug!("Input pump stopped");
        })?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slremote_mapping::{HostParameter, MixerParameter, ParameterStore};
    use slremote_protocol::DeviceMessage;

    #[test]
    fn test_pump_drives_host() {
        let driver = Driver::builder().build(Vec::<DeviceMessage>::new()).unwrap().into_shared();
        let host = Arc::new(Mutex::new(ParameterStore::new()));
        let (sender, receiver) = crossbeam_channel::unbounded();

        let pump = spawn_input_pump(Arc::clone(&driver), Arc::clone(&host), receiver).unwrap();
        // Mute on strip 1, press then release.
        sender.send(InboundMessage::from_bytes(&[0xBF, 0x3C, 0x7F]).unwrap()).unwrap();
        sender.send(InboundMessage::from_bytes(&[0xBF, 0x3C, 0x00]).unwrap()).unwrap();
        drop(sender);
        pump.join().unwrap();

        let mute = HostParameter::mixer(1, MixerParameter::Mute);
        assert_eq!(host.lock().value(&mute), 1.0);
        assert!(!driver.lock().sink().is_empty());
    }
}
