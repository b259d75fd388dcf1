//! MIDI input handling
//!
//! Receives raw MIDI bytes from the midir callback, parses them, and
//! sends them to the foreground event loop via a flume channel. The
//! callback runs on the driver thread and must stay fast and
//! non-blocking; all map/table mutation (learn, note entry, bind
//! dispatch) happens when the event loop drains the channel.

use flume::{Receiver, Sender};
use midir::MidiInputConnection;

use crate::connection::{find_input_port, MidiConnectionError};
use crate::message::MidiMessage;

/// Owns the midir connection for one input device.
pub struct MidiInputHandler {
    // kept alive for the duration of the connection
    _connection: MidiInputConnection<Sender<MidiMessage>>,
}

impl MidiInputHandler {
    /// Connect to the named port and forward parsed messages to `tx`.
    pub fn connect(
        port_name: &str,
        tx: Sender<MidiMessage>,
    ) -> Result<Self, MidiConnectionError> {
        let (midi_in, port) = find_input_port(port_name)?;

        let connection = midi_in
            .connect(&port, "ferric-midi-input", Self::midi_callback, tx)
            .map_err(|e| MidiConnectionError::ConnectionError(e.to_string()))?;

        log::info!("MIDI: input handler connected");

        Ok(Self {
            _connection: connection,
        })
    }

    /// Called from the MIDI driver thread whenever a message is received.
    fn midi_callback(_timestamp: u64, data: &[u8], tx: &mut Sender<MidiMessage>) {
        let Some(msg) = MidiMessage::parse(data) else {
            return;
        };
        if tx.try_send(msg).is_err() {
            log::warn!("MIDI: message channel full, dropping message");
        }
    }
}

/// Open a device and return the handler plus the receiving end of its
/// message channel.
pub fn open_input(
    port_name: &str,
) -> Result<(MidiInputHandler, Receiver<MidiMessage>), MidiConnectionError> {
    let (tx, rx) = flume::bounded(256);
    let handler = MidiInputHandler::connect(port_name, tx)?;
    Ok((handler, rx))
}
