//! Per-device map file
//!
//! Each input device gets its own file, `midiIn_<name>.cfg` in the config
//! directory, with every character of the device name outside `[A-Za-z0-9]`
//! replaced by `-`. The format is line-oriented `key=value` records; a
//! record that cannot be parsed is logged and skipped, never fatal. Bind
//! rules persist their action by machine name so saved maps survive id
//! renumbering.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context as _;
use ferric_input::ActionRegistry;

use crate::bind::{MidiBind, CHANNEL_ANY, DATA_ANY};
use crate::map::MidiMap;
use crate::message::MessageKind;
use crate::value_input::{ColumnStyle, ValueInputStyle, COLUMN_TARGET_COUNT};

/// Replace every character outside `[A-Za-z0-9]` with `-`.
pub fn sanitize_device_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// File name for a device's map, e.g. `midiIn_USB-MIDI-Device.cfg`.
pub fn map_file_name(device: &str) -> String {
    format!("midiIn_{}.cfg", sanitize_device_name(device))
}

fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn column_index(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?
        .parse::<usize>()
        .ok()
        .filter(|&i| i < COLUMN_TARGET_COUNT)
}

fn parse_bind(value: &str, registry: &ActionRegistry) -> Option<MidiBind> {
    let fields: Vec<&str> = value.split(',').collect();
    if fields.len() < 4 {
        return None;
    }
    let kind_id = parse_int(fields[0])?;
    // 0 stands for "not configured yet"
    let kind = MessageKind::from_id(kind_id.clamp(0, 255) as u8);
    let channel = parse_int(fields[1])?.clamp(0, CHANNEL_ANY as i32) as u8;
    let data1 = parse_int(fields[2])?.clamp(0, DATA_ANY as i32) as u8;
    let data2 = parse_int(fields[3])?.clamp(0, DATA_ANY as i32) as u8;
    let action = match fields.get(4).map(|s| s.trim()) {
        None | Some("") => 0,
        Some(name) => match registry.find_by_name(name) {
            Some(id) => id,
            None => {
                log::warn!("unknown action in MIDI bind: {}", name);
                0
            }
        },
    };
    Some(MidiBind {
        kind,
        channel,
        data1,
        data2,
        action,
    })
}

fn apply_record(map: &mut MidiMap, registry: &ActionRegistry, key: &str, value: &str) {
    let flag = |v: &str| parse_int(v).map(|i| i != 0);
    let mut ok = true;
    match key {
        "noteInput" => match flag(value) {
            Some(v) => map.note_input = v,
            None => ok = false,
        },
        "volInput" => match flag(value) {
            Some(v) => map.vol_input = v,
            None => ok = false,
        },
        "rawVolume" => match flag(value) {
            Some(v) => map.raw_volume = v,
            None => ok = false,
        },
        "polyInput" => match flag(value) {
            Some(v) => map.poly_input = v,
            None => ok = false,
        },
        "directChannel" => match flag(value) {
            Some(v) => map.direct_channel = v,
            None => ok = false,
        },
        "programChange" => match flag(value) {
            Some(v) => map.program_change = v,
            None => ok = false,
        },
        "midiClock" => match flag(value) {
            Some(v) => map.midi_clock = v,
            None => ok = false,
        },
        "midiTimeCode" => match flag(value) {
            Some(v) => map.midi_time_code = v,
            None => ok = false,
        },
        "valueInputStyle" => {
            match parse_int(value).and_then(|i| ValueInputStyle::from_id(i.clamp(0, 6) as u8)) {
                Some(style) => map.value_input_style = style,
                None => ok = false,
            }
        }
        "valueInputControlMSB" => match parse_int(value) {
            Some(v) => map.value_assign.set_msb(v),
            None => ok = false,
        },
        "valueInputControlLSB" => match parse_int(value) {
            Some(v) => map.value_assign.set_lsb(v),
            None => ok = false,
        },
        "valueInputControlSingle" => match parse_int(value) {
            Some(v) => map.value_assign.set_single(v),
            None => ok = false,
        },
        "volExp" => match value.trim().parse::<f32>() {
            Ok(v) => map.set_vol_exp(v),
            Err(_) => ok = false,
        },
        "bind" => match parse_bind(value, registry) {
            Some(bind) => map.binds.push(bind),
            None => ok = false,
        },
        _ => {
            if let Some(i) = column_index(key, "valueInputSpecificStyle_") {
                match parse_int(value).and_then(|v| ColumnStyle::from_id(v.clamp(0, 3) as u8)) {
                    Some(style) => map.column_inputs[i].style = style,
                    None => ok = false,
                }
            } else if let Some(i) = column_index(key, "valueInputSpecificMSB_") {
                match parse_int(value) {
                    Some(v) => map.column_inputs[i].assign.set_msb(v),
                    None => ok = false,
                }
            } else if let Some(i) = column_index(key, "valueInputSpecificLSB_") {
                match parse_int(value) {
                    Some(v) => map.column_inputs[i].assign.set_lsb(v),
                    None => ok = false,
                }
            } else if let Some(i) = column_index(key, "valueInputSpecificSingle_") {
                match parse_int(value) {
                    Some(v) => map.column_inputs[i].assign.set_single(v),
                    None => ok = false,
                }
            } else {
                ok = false;
            }
        }
    }
    if !ok {
        log::warn!("line invalid: {}={}", key, value);
    }
}

/// Load a device map. Returns `None` when the file cannot be read (the
/// caller keeps whatever it had — usually a default map for a device that
/// has never been configured).
pub fn load_midi_map(path: &Path, registry: &ActionRegistry) -> Option<MidiMap> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("error while opening MIDI map for reading: {}", e);
            return None;
        }
    };

    let mut map = MidiMap::new();
    for line in contents.lines() {
        let Some((key, value)) = line.split_once('=') else {
            if !line.trim().is_empty() {
                log::warn!("line invalid: {}", line);
            }
            continue;
        };
        apply_record(&mut map, registry, key, value);
    }
    map.compile();
    log::info!(
        "loaded MIDI map from {:?} ({} binds)",
        path,
        map.binds.len()
    );
    Some(map)
}

/// Write a device map, creating parent directories if needed.
pub fn save_midi_map(map: &MidiMap, path: &Path, registry: &ActionRegistry) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory: {:?}", parent))?;
    }

    let mut out = String::new();
    let _ = writeln!(out, "noteInput={}", map.note_input as i32);
    let _ = writeln!(out, "volInput={}", map.vol_input as i32);
    let _ = writeln!(out, "rawVolume={}", map.raw_volume as i32);
    let _ = writeln!(out, "polyInput={}", map.poly_input as i32);
    let _ = writeln!(out, "directChannel={}", map.direct_channel as i32);
    let _ = writeln!(out, "programChange={}", map.program_change as i32);
    let _ = writeln!(out, "midiClock={}", map.midi_clock as i32);
    let _ = writeln!(out, "midiTimeCode={}", map.midi_time_code as i32);
    let _ = writeln!(out, "valueInputStyle={}", map.value_input_style.id());
    let _ = writeln!(out, "valueInputControlMSB={}", map.value_assign.msb());
    let _ = writeln!(out, "valueInputControlLSB={}", map.value_assign.lsb());
    let _ = writeln!(out, "valueInputControlSingle={}", map.value_assign.single());
    for (i, column) in map.column_inputs.iter().enumerate() {
        let _ = writeln!(out, "valueInputSpecificStyle_{}={}", i, column.style.id());
        let _ = writeln!(out, "valueInputSpecificMSB_{}={}", i, column.assign.msb());
        let _ = writeln!(out, "valueInputSpecificLSB_{}={}", i, column.assign.lsb());
        let _ = writeln!(out, "valueInputSpecificSingle_{}={}", i, column.assign.single());
    }
    let _ = writeln!(out, "volExp={}", map.vol_exp());
    for bind in &map.binds {
        let kind = bind.kind.map(|k| k.id()).unwrap_or(0);
        let name = if bind.action == 0 {
            ""
        } else {
            registry.def(bind.action).name
        };
        let _ = writeln!(
            out,
            "bind={},{},{},{},{}",
            kind, bind.channel, bind.data1, bind.data2, name
        );
    }

    fs::write(path, out).with_context(|| format!("failed to write MIDI map: {:?}", path))?;
    log::info!("saved MIDI map to {:?}", path);
    Ok(())
}
