#![allow(dead_code)]

use launchpad_life::error::LinkError;
use launchpad_life::launchpad::{Controller, Launchpad, PadSurface};
use launchpad_life::life::RandomSource;
use launchpad_life::message::MessageKind;
use launchpad_life::transport::{Endpoint, InboundHandler, InputPort, OutputPort, Session, Transport};
use launchpad_life::Color;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ---------------------------------------------------------------------------
// Random sources
// ---------------------------------------------------------------------------

/// Returns the same draw forever.
pub struct Fixed(pub f64);

impl RandomSource for Fixed {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Plays back queued draws, then repeats `fallback`.
pub struct Sequence {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl Sequence {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self { draws: draws.into_iter().collect(), fallback }
    }
}

impl RandomSource for Sequence {
    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

/// Counts draws in a shared counter.
pub struct Counting {
    pub draws: Arc<AtomicUsize>,
    pub value: f64,
}

impl RandomSource for Counting {
    fn next_unit(&mut self) -> f64 {
        self.draws.fetch_add(1, Ordering::SeqCst);
        self.value
    }
}

// ---------------------------------------------------------------------------
// Pad surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pad {
    On(u8, u8, Color),
    Off(u8, u8),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub pads: Mutex<Vec<Pad>>,
}

impl RecordingSurface {
    pub fn take(&self) -> Vec<Pad> {
        std::mem::take(&mut *self.pads.lock())
    }
}

impl PadSurface for RecordingSurface {
    fn illuminate(&self, row: u8, col: u8, color: Color) {
        self.pads.lock().push(Pad::On(row, col, color));
    }

    fn extinguish(&self, row: u8, col: u8) {
        self.pads.lock().push(Pad::Off(row, col));
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingController {
    pub printed: Mutex<Vec<String>>,
    pub received: Mutex<Vec<(MessageKind, Vec<u8>)>>,
}

impl RecordingController {
    fn record(&self, kind: MessageKind, message: &[u8]) {
        self.received.lock().push((kind, message.to_vec()));
    }

    pub fn printed(&self) -> Vec<String> {
        self.printed.lock().clone()
    }

    pub fn received(&self) -> Vec<(MessageKind, Vec<u8>)> {
        self.received.lock().clone()
    }
}

impl Controller for RecordingController {
    fn print(&self, text: &str) {
        self.printed.lock().push(text.to_string());
    }

    fn on_note_off(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::NoteOff, message);
    }

    fn on_note_on(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::NoteOn, message);
    }

    fn on_aftertouch(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::Aftertouch, message);
    }

    fn on_control_change(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::ControlChange, message);
    }

    fn on_program_change(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::ProgramChange, message);
    }

    fn on_channel_pressure(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::ChannelPressure, message);
    }

    fn on_pitch_bend(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::PitchBend, message);
    }

    fn on_system_control(&self, _link: &Launchpad, message: &[u8]) {
        self.record(MessageKind::SystemControl, message);
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Both ends of a scripted MIDI link, shared between test and session.
#[derive(Clone, Default)]
pub struct Wire {
    pub sent: Arc<Mutex<Vec<Vec<u8>>>>,
    pub handler: Arc<Mutex<Option<InboundHandler>>>,
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl Wire {
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().clone()
    }

    pub fn take_sent(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.sent.lock())
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// Push a message from the device side.
    pub fn deliver(&self, message: &[u8]) {
        if let Some(handler) = self.handler.lock().as_mut() {
            handler(message);
        }
    }
}

pub struct ScriptedTransport {
    pub grant: bool,
    pub inputs: Vec<&'static str>,
    pub outputs: Vec<&'static str>,
    pub refuse_open: bool,
    pub wire: Wire,
}

impl ScriptedTransport {
    pub fn granting(inputs: Vec<&'static str>, outputs: Vec<&'static str>) -> Self {
        Self {
            grant: true,
            inputs,
            outputs,
            refuse_open: false,
            wire: Wire::default(),
        }
    }

    pub fn denying() -> Self {
        Self {
            grant: false,
            ..Self::granting(vec![], vec![])
        }
    }
}

impl Transport for ScriptedTransport {
    type Session = ScriptedSession;

    fn request_access(&self) -> impl Future<Output = Result<ScriptedSession, LinkError>> + Send {
        let result = if self.grant {
            Ok(ScriptedSession {
                inputs: self.inputs.iter().map(|s| s.to_string()).collect(),
                outputs: self.outputs.iter().map(|s| s.to_string()).collect(),
                refuse_open: self.refuse_open,
                wire: self.wire.clone(),
            })
        } else {
            Err(LinkError::AccessDenied("refused by test".into()))
        };
        async move { result }
    }
}

pub struct ScriptedSession {
    inputs: Vec<String>,
    outputs: Vec<String>,
    refuse_open: bool,
    wire: Wire,
}

fn endpoints(names: &[String]) -> Vec<Endpoint> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Endpoint::new(index, name.clone()))
        .collect()
}

impl Session for ScriptedSession {
    fn inputs(&self) -> Vec<Endpoint> {
        endpoints(&self.inputs)
    }

    fn outputs(&self) -> Vec<Endpoint> {
        endpoints(&self.outputs)
    }

    fn open_input(
        &mut self,
        endpoint: &Endpoint,
        handler: InboundHandler,
    ) -> Result<Box<dyn InputPort>, LinkError> {
        if self.refuse_open {
            return Err(LinkError::EndpointUnavailable {
                name: endpoint.name.clone(),
                reason: "busy".into(),
            });
        }
        self.wire.opened.lock().push(format!("in:{}", endpoint.name));
        *self.wire.handler.lock() = Some(handler);
        Ok(Box::new(ScriptedInput))
    }

    fn open_output(&mut self, endpoint: &Endpoint) -> Result<Box<dyn OutputPort>, LinkError> {
        if self.refuse_open {
            return Err(LinkError::EndpointUnavailable {
                name: endpoint.name.clone(),
                reason: "busy".into(),
            });
        }
        self.wire.opened.lock().push(format!("out:{}", endpoint.name));
        Ok(Box::new(ScriptedOutput { sent: Arc::clone(&self.wire.sent) }))
    }
}

struct ScriptedInput;

impl InputPort for ScriptedInput {}

struct ScriptedOutput {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl OutputPort for ScriptedOutput {
    fn send(&mut self, message: &[u8]) -> Result<(), LinkError> {
        self.sent.lock().push(message.to_vec());
        Ok(())
    }
}

/// A link bound to a scripted device named "Launchpad Mini".
pub async fn bound_link(controller: Arc<dyn Controller>) -> (Arc<Launchpad>, Wire) {
    let transport = ScriptedTransport::granting(vec!["Launchpad Mini"], vec!["Launchpad Mini"]);
    let link = Launchpad::new("Launchpad Mini", controller);
    link.discover(&transport).await;
    (link, transport.wire.clone())
}
