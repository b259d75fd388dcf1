//! MIDI port discovery and connection
//!
//! Uses midir for cross-platform MIDI I/O (ALSA on Linux, CoreMIDI on
//! macOS, WinMM on Windows). The settings screen lists input ports by
//! name; the selected name is stored in the config and resolved again on
//! the next run.

use midir::{MidiInput, MidiInputPort, MidiOutput};

/// Error type for MIDI connection operations
#[derive(Debug, thiserror::Error)]
pub enum MidiConnectionError {
    #[error("Failed to initialize MIDI input: {0}")]
    InputInitError(String),

    #[error("Failed to initialize MIDI output: {0}")]
    OutputInitError(String),

    #[error("No MIDI input ports available")]
    NoInputPorts,

    #[error("No MIDI port found matching: {0}")]
    PortNotFound(String),

    #[error("Failed to connect to MIDI port: {0}")]
    ConnectionError(String),

    #[error("Failed to get port info: {0}")]
    PortInfoError(String),
}

/// List all available MIDI input port names.
pub fn list_input_ports() -> Result<Vec<String>, MidiConnectionError> {
    let midi_in = MidiInput::new("ferric-midi-list")
        .map_err(|e| MidiConnectionError::InputInitError(e.to_string()))?;

    Ok(midi_in
        .ports()
        .iter()
        .filter_map(|port| midi_in.port_name(port).ok())
        .collect())
}

/// List all available MIDI output port names.
pub fn list_output_ports() -> Result<Vec<String>, MidiConnectionError> {
    let midi_out = MidiOutput::new("ferric-midi-list")
        .map_err(|e| MidiConnectionError::OutputInitError(e.to_string()))?;

    Ok(midi_out
        .ports()
        .iter()
        .filter_map(|port| midi_out.port_name(port).ok())
        .collect())
}

/// Resolve a stored device name to an input port.
///
/// Exact name match first; falls back to a case-insensitive substring
/// match so a stored name still resolves when the backend decorates port
/// names with changing client ids.
pub fn find_input_port(name: &str) -> Result<(MidiInput, MidiInputPort), MidiConnectionError> {
    let midi_in = MidiInput::new("ferric-midi-in")
        .map_err(|e| MidiConnectionError::InputInitError(e.to_string()))?;

    let ports = midi_in.ports();
    if ports.is_empty() {
        return Err(MidiConnectionError::NoInputPorts);
    }

    let exact = ports.iter().find(|port| {
        midi_in
            .port_name(port)
            .map(|n| n == name)
            .unwrap_or(false)
    });

    let port = match exact {
        Some(p) => p.clone(),
        None => {
            let pattern = name.to_lowercase();
            ports
                .iter()
                .find(|port| {
                    midi_in
                        .port_name(port)
                        .map(|n| n.to_lowercase().contains(&pattern))
                        .unwrap_or(false)
                })
                .ok_or_else(|| MidiConnectionError::PortNotFound(name.to_string()))?
                .clone()
        }
    };

    let port_name = midi_in
        .port_name(&port)
        .map_err(|e| MidiConnectionError::PortInfoError(e.to_string()))?;
    log::info!("MIDI: found input port: {}", port_name);

    Ok((midi_in, port))
}
