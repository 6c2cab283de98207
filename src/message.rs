// message.rs - MIDI wire format: status bytes, message families, commands

pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const AFTERTOUCH: u8 = 0xa0;
pub const CONTROL_CHANGE: u8 = 0xb0;
pub const PROGRAM_CHANGE: u8 = 0xc0;
pub const CHANNEL_PRESSURE: u8 = 0xd0;
pub const PITCH_BEND: u8 = 0xe0;
pub const SYSTEM_CONTROL: u8 = 0xf0;

/// First MIDI channel ("channel 1" on the wire is 0).
pub const CHANNEL_01: u8 = 0x00;

pub const CONTROLLER_BANK_SELECT: u8 = 0x00;

// Launchpad commands carried as bank-select data
pub const RESET_BOARD: u8 = 0x00;
pub const GRID_LAYOUT: u8 = 0x01;
pub const DRUM_LAYOUT: u8 = 0x02;

/// Message family, selected by the high nibble of the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    NoteOff,
    NoteOn,
    Aftertouch,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
    SystemControl,
    /// Data byte in status position, or an empty message.
    Unrecognized,
}

impl MessageKind {
    pub fn from_status(status: u8) -> Self {
        match status >> 4 {
            0x8 => MessageKind::NoteOff,
            0x9 => MessageKind::NoteOn,
            0xa => MessageKind::Aftertouch,
            0xb => MessageKind::ControlChange,
            0xc => MessageKind::ProgramChange,
            0xd => MessageKind::ChannelPressure,
            0xe => MessageKind::PitchBend,
            0xf => MessageKind::SystemControl,
            _ => MessageKind::Unrecognized,
        }
    }

    pub fn classify(message: &[u8]) -> Self {
        match message.first() {
            Some(&status) => Self::from_status(status),
            None => MessageKind::Unrecognized,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::NoteOff => "NoteOff",
            MessageKind::NoteOn => "NoteOn",
            MessageKind::Aftertouch => "Aftertouch",
            MessageKind::ControlChange => "ControlChange",
            MessageKind::ProgramChange => "ProgramChange",
            MessageKind::ChannelPressure => "ChannelPressure",
            MessageKind::PitchBend => "PitchBend",
            MessageKind::SystemControl => "SystemControl",
            MessageKind::Unrecognized => "Unrecognized",
        }
    }
}

/// Three-byte channel message: `[command | channel, data1, data2]`.
pub fn command(command: u8, channel: u8, data1: u8, data2: u8) -> [u8; 3] {
    [command | (channel & 0x0f), data1, data2]
}

/// Note number of a pad: 16 notes per row, rows and columns masked to 4 bits.
pub fn pad_note(row: u8, col: u8) -> u8 {
    16 * (row & 15) + (col & 15)
}

/// Fields of an inbound channel message, with missing bytes read as 0.
pub fn channel_of(message: &[u8]) -> u8 {
    message.first().copied().unwrap_or(0) & 0x0f
}

pub fn data1_of(message: &[u8]) -> u8 {
    message.get(1).copied().unwrap_or(0)
}

pub fn data2_of(message: &[u8]) -> u8 {
    message.get(2).copied().unwrap_or(0)
}
