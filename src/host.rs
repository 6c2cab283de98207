// host.rs - Log panel and the controller that echoes pad presses back

use crate::color::Color;
use crate::launchpad::{Controller, Launchpad, velocity_color};
use crate::message::{self, MessageKind};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

pub const WELCOME: &str = "Welcome to the Launchpad Mini controller";

/// Text shown in the host's log panel, one line per `print`.
#[derive(Default)]
pub struct LogPanel {
    text: Mutex<String>,
}

impl LogPanel {
    pub fn new() -> Arc<Self> {
        let panel = Arc::new(Self::default());
        panel.flush();
        panel
    }

    pub fn print(&self, line: &str) {
        let mut text = self.text.lock();
        text.push_str(line);
        text.push('\n');
    }

    pub fn flush(&self) {
        self.text.lock().clear();
        self.print(WELCOME);
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text.lock().lines().map(str::to_owned).collect()
    }
}

/// Logs every inbound message and mirrors note and control traffic back
/// to the device, so pressing a pad lights it.
pub struct EchoController {
    log: Arc<LogPanel>,
}

impl EchoController {
    pub fn new(log: Arc<LogPanel>) -> Arc<Self> {
        Arc::new(Self { log })
    }

    fn note_fields(message: &[u8]) -> (u8, u8, u8) {
        let channel = message::channel_of(message);
        let note = message::data1_of(message) & 0x7f;
        let velocity = message::data2_of(message) & 0x7f;
        (channel, note, velocity)
    }

    fn note_line(kind: MessageKind, channel: u8, note: u8, velocity: u8) -> String {
        format!(
            "Message: {}, channel={channel}, note={note}, velocity={velocity}",
            kind.name()
        )
    }

    fn family(&self, kind: MessageKind) {
        self.print(&format!("Message: {}", kind.name()));
    }
}

impl Controller for EchoController {
    fn print(&self, text: &str) {
        info!(target: "launchpad_life::log", "{text}");
        self.log.print(text);
    }

    fn on_note_off(&self, link: &Launchpad, message: &[u8]) {
        let (channel, note, velocity) = Self::note_fields(message);
        let color: Color = velocity_color(velocity);
        self.print(&Self::note_line(MessageKind::NoteOff, channel, note, velocity));
        link.send_note_off(note, color.byte());
    }

    fn on_note_on(&self, link: &Launchpad, message: &[u8]) {
        let (channel, note, velocity) = Self::note_fields(message);
        let color: Color = velocity_color(velocity);
        self.print(&Self::note_line(MessageKind::NoteOn, channel, note, velocity));
        link.send_note_on(note, color.byte());
    }

    fn on_aftertouch(&self, _link: &Launchpad, _message: &[u8]) {
        self.family(MessageKind::Aftertouch);
    }

    fn on_control_change(&self, link: &Launchpad, message: &[u8]) {
        let channel = message::channel_of(message);
        let controller = message::data1_of(message);
        let data = message::data2_of(message);
        self.print(&format!(
            "Message: ControlChange, channel={channel}, controller=0x{controller:x}, data=0x{data:x}"
        ));
        link.send_control_change(controller, data);
    }

    fn on_program_change(&self, _link: &Launchpad, _message: &[u8]) {
        self.family(MessageKind::ProgramChange);
    }

    fn on_channel_pressure(&self, _link: &Launchpad, _message: &[u8]) {
        self.family(MessageKind::ChannelPressure);
    }

    fn on_pitch_bend(&self, _link: &Launchpad, _message: &[u8]) {
        self.family(MessageKind::PitchBend);
    }

    fn on_system_control(&self, _link: &Launchpad, _message: &[u8]) {
        self.family(MessageKind::SystemControl);
    }
}
