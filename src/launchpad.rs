// launchpad.rs - Launchpad Mini device link
//
// Grid operations become three-byte channel messages on the bound output;
// inbound messages are classified by family and handed to the controller.

use crate::color::{self, Color};
use crate::message::{self, MessageKind};
use crate::transport::{Endpoint, InputPort, OutputPort, Session, Transport};
use crate::grid::{COLS, ROWS};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

pub const DEFAULT_DEVICE_NAME: &str = "Launchpad Mini";

/// Receiver of link status lines and inbound traffic.
///
/// Handlers run on the transport's delivery thread and must return promptly.
/// Each receives the link so it can answer the device.
pub trait Controller: Send + Sync {
    fn print(&self, text: &str);

    fn on_note_off(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_note_on(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_aftertouch(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_control_change(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_program_change(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_channel_pressure(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_pitch_bend(&self, _link: &Launchpad, _message: &[u8]) {}
    fn on_system_control(&self, _link: &Launchpad, _message: &[u8]) {}
}

/// Something that can light up pads of the 8x8 grid.
pub trait PadSurface: Send + Sync {
    fn illuminate(&self, row: u8, col: u8, color: Color);
    fn extinguish(&self, row: u8, col: u8);
}

/// Outcome of a discovery round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Discovery {
    pub found_input: bool,
    pub found_output: bool,
}

pub struct Launchpad {
    name: String,
    controller: Arc<dyn Controller>,
    input: Mutex<Option<Box<dyn InputPort>>>,
    output: Mutex<Option<Box<dyn OutputPort>>>,
}

impl Launchpad {
    pub fn new(name: impl Into<String>, controller: Arc<dyn Controller>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            controller,
            input: Mutex::new(None),
            output: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_input(&self) -> bool {
        self.input.lock().is_some()
    }

    pub fn has_output(&self) -> bool {
        self.output.lock().is_some()
    }

    /// Request MIDI access and bind the first input and output whose names
    /// start with the device name. Never fails; outcomes go to `print`.
    pub async fn discover<T>(self: &Arc<Self>, transport: &T) -> Discovery
    where
        T: Transport + Sync,
    {
        let controller = &self.controller;
        let mut session = match transport.request_access().await {
            Ok(session) => session,
            Err(err) => {
                warn!(%err, "MIDI access request failed");
                controller.print("MIDI access has been denied");
                return Discovery::default();
            }
        };
        controller.print("MIDI access has been granted");

        let found_input = match self.find(session.inputs()) {
            Some(endpoint) => self.bind_input(&mut session, &endpoint),
            None => false,
        };
        let found_output = match self.find(session.outputs()) {
            Some(endpoint) => self.bind_output(&mut session, &endpoint),
            None => false,
        };

        if found_input {
            controller.print(&format!("MIDI input was found for <{}>", self.name));
        } else {
            controller.print(&format!("MIDI input was not found for <{}>", self.name));
        }
        if found_output {
            controller.print(&format!("MIDI output was found for <{}>", self.name));
        } else {
            controller.print(&format!("MIDI output was not found for <{}>", self.name));
        }
        info!(device = %self.name, found_input, found_output, "discovery finished");

        Discovery { found_input, found_output }
    }

    fn find(&self, endpoints: Vec<Endpoint>) -> Option<Endpoint> {
        endpoints
            .into_iter()
            .find(|endpoint| endpoint.name.starts_with(&self.name))
    }

    fn bind_input<S: Session>(self: &Arc<Self>, session: &mut S, endpoint: &Endpoint) -> bool {
        // Weak: the port owns this handler, and the link owns the port
        let link: Weak<Launchpad> = Arc::downgrade(self);
        let handler = Box::new(move |message: &[u8]| {
            if let Some(link) = link.upgrade() {
                link.dispatch(message);
            }
        });
        match session.open_input(endpoint, handler) {
            Ok(port) => {
                *self.input.lock() = Some(port);
                true
            }
            Err(err) => {
                warn!(%err, "cannot open MIDI input");
                false
            }
        }
    }

    fn bind_output<S: Session>(&self, session: &mut S, endpoint: &Endpoint) -> bool {
        match session.open_output(endpoint) {
            Ok(port) => {
                *self.output.lock() = Some(port);
                true
            }
            Err(err) => {
                warn!(%err, "cannot open MIDI output");
                false
            }
        }
    }

    /// Route one inbound message to the controller handler of its family.
    pub fn dispatch(&self, message: &[u8]) {
        let kind = MessageKind::classify(message);
        debug!(kind = kind.name(), ?message, "inbound MIDI message");
        let controller = &self.controller;
        match kind {
            MessageKind::NoteOff => controller.on_note_off(self, message),
            MessageKind::NoteOn => controller.on_note_on(self, message),
            MessageKind::Aftertouch => controller.on_aftertouch(self, message),
            MessageKind::ControlChange => controller.on_control_change(self, message),
            MessageKind::ProgramChange => controller.on_program_change(self, message),
            MessageKind::ChannelPressure => controller.on_channel_pressure(self, message),
            MessageKind::PitchBend => controller.on_pitch_bend(self, message),
            MessageKind::SystemControl => controller.on_system_control(self, message),
            MessageKind::Unrecognized => {}
        }
    }

    pub fn reset(&self) {
        self.send_control_change(message::CONTROLLER_BANK_SELECT, message::RESET_BOARD);
    }

    pub fn select_grid_layout(&self) {
        self.send_control_change(message::CONTROLLER_BANK_SELECT, message::GRID_LAYOUT);
    }

    pub fn select_drum_layout(&self) {
        self.send_control_change(message::CONTROLLER_BANK_SELECT, message::DRUM_LAYOUT);
    }

    /// Colour test card: red grows down the rows, green across the columns.
    pub fn check(&self) {
        for row in 0..ROWS as u8 {
            for col in 0..COLS as u8 {
                let color = Color::new(i32::from(row >> 1), i32::from(col >> 1));
                self.illuminate(row, col, color);
            }
        }
    }

    pub fn clear(&self) {
        for row in 0..ROWS as u8 {
            for col in 0..COLS as u8 {
                self.extinguish(row, col);
            }
        }
    }

    pub fn illuminate(&self, row: u8, col: u8, color: Color) {
        self.send_note_on(message::pad_note(row, col), color.byte());
    }

    pub fn extinguish(&self, row: u8, col: u8) {
        self.send_note_off(message::pad_note(row, col), 0);
    }

    pub fn send_note_on(&self, note: u8, velocity: u8) {
        self.send(&message::command(message::NOTE_ON, message::CHANNEL_01, note, velocity));
    }

    pub fn send_note_off(&self, note: u8, velocity: u8) {
        self.send(&message::command(message::NOTE_OFF, message::CHANNEL_01, note, velocity));
    }

    pub fn send_control_change(&self, controller: u8, data: u8) {
        self.send(&message::command(message::CONTROL_CHANGE, message::CHANNEL_01, controller, data));
    }

    /// Transmit if an output is bound; silently drop otherwise.
    pub fn send(&self, message: &[u8]) {
        if let Some(output) = self.output.lock().as_mut() {
            if let Err(err) = output.send(message) {
                warn!(%err, ?message, "dropped outbound MIDI message");
            }
        }
    }
}

impl PadSurface for Launchpad {
    fn illuminate(&self, row: u8, col: u8, color: Color) {
        Launchpad::illuminate(self, row, col, color);
    }

    fn extinguish(&self, row: u8, col: u8) {
        Launchpad::extinguish(self, row, col);
    }
}

/// Colour for an inbound velocity, as the board would show it.
pub fn velocity_color(velocity: u8) -> Color {
    let (red, green) = color::decode_velocity(velocity);
    Color::new(i32::from(red), i32::from(green))
}
