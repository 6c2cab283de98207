// midi.rs - Transport backed by midir

use crate::error::LinkError;
use crate::transport::{Endpoint, InboundHandler, InputPort, OutputPort, Session, Transport};
use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection, MidiOutputPort};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MidirTransport {
    client_name: String,
}

impl MidirTransport {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self { client_name: client_name.into() }
    }
}

impl Transport for MidirTransport {
    type Session = MidirSession;

    fn request_access(&self) -> impl std::future::Future<Output = Result<MidirSession, LinkError>> + Send {
        let client_name = self.client_name.clone();
        async move { MidirSession::open(client_name) }
    }
}

/// Both midir clients plus the ports they listed at access time.
///
/// midir consumes a client when it connects, so each direction can be opened
/// at most once per session.
pub struct MidirSession {
    client_name: String,
    input: Option<MidiInput>,
    output: Option<MidiOutput>,
    input_ports: Vec<(String, MidiInputPort)>,
    output_ports: Vec<(String, MidiOutputPort)>,
}

impl MidirSession {
    fn open(client_name: String) -> Result<Self, LinkError> {
        let mut input = MidiInput::new(&format!("{client_name} input"))
            .map_err(|err| LinkError::AccessDenied(err.to_string()))?;
        input.ignore(Ignore::None);
        let output = MidiOutput::new(&format!("{client_name} output"))
            .map_err(|err| LinkError::AccessDenied(err.to_string()))?;

        // Ports whose name cannot be read are skipped
        let input_ports = input
            .ports()
            .into_iter()
            .filter_map(|port| input.port_name(&port).ok().map(|name| (name, port)))
            .collect::<Vec<_>>();
        let output_ports = output
            .ports()
            .into_iter()
            .filter_map(|port| output.port_name(&port).ok().map(|name| (name, port)))
            .collect::<Vec<_>>();
        debug!(inputs = input_ports.len(), outputs = output_ports.len(), "enumerated MIDI ports");

        Ok(Self {
            client_name,
            input: Some(input),
            output: Some(output),
            input_ports,
            output_ports,
        })
    }
}

fn unavailable(endpoint: &Endpoint, reason: impl ToString) -> LinkError {
    LinkError::EndpointUnavailable {
        name: endpoint.name.clone(),
        reason: reason.to_string(),
    }
}

impl Session for MidirSession {
    fn inputs(&self) -> Vec<Endpoint> {
        self.input_ports
            .iter()
            .enumerate()
            .map(|(index, (name, _))| Endpoint::new(index, name.clone()))
            .collect()
    }

    fn outputs(&self) -> Vec<Endpoint> {
        self.output_ports
            .iter()
            .enumerate()
            .map(|(index, (name, _))| Endpoint::new(index, name.clone()))
            .collect()
    }

    fn open_input(
        &mut self,
        endpoint: &Endpoint,
        mut handler: InboundHandler,
    ) -> Result<Box<dyn InputPort>, LinkError> {
        let (_, port) = self
            .input_ports
            .get(endpoint.index)
            .ok_or_else(|| unavailable(endpoint, "no such port"))?;
        let input = self
            .input
            .take()
            .ok_or_else(|| unavailable(endpoint, "input client already connected"))?;
        let connection = input
            .connect(
                port,
                &self.client_name,
                move |_stamp, message, _| handler(message),
                (),
            )
            .map_err(|err| unavailable(endpoint, err))?;
        Ok(Box::new(MidirInput { _connection: connection }))
    }

    fn open_output(&mut self, endpoint: &Endpoint) -> Result<Box<dyn OutputPort>, LinkError> {
        let (_, port) = self
            .output_ports
            .get(endpoint.index)
            .ok_or_else(|| unavailable(endpoint, "no such port"))?;
        let output = self
            .output
            .take()
            .ok_or_else(|| unavailable(endpoint, "output client already connected"))?;
        let connection = output
            .connect(port, &self.client_name)
            .map_err(|err| unavailable(endpoint, err))?;
        Ok(Box::new(MidirOutput { connection }))
    }
}

struct MidirInput {
    _connection: MidiInputConnection<()>,
}

impl InputPort for MidirInput {}

struct MidirOutput {
    connection: MidiOutputConnection,
}

impl OutputPort for MidirOutput {
    fn send(&mut self, message: &[u8]) -> Result<(), LinkError> {
        self.connection
            .send(message)
            .map_err(|err| LinkError::Send(err.to_string()))
    }
}
