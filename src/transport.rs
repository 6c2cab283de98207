// transport.rs - Seam between the Launchpad link and a MIDI backend

use crate::error::LinkError;
use std::future::Future;

/// A named port as listed by the backend, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub index: usize,
    pub name: String,
}

impl Endpoint {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self { index, name: name.into() }
    }
}

/// Callback the backend invokes with every inbound byte sequence.
pub type InboundHandler = Box<dyn FnMut(&[u8]) + Send + 'static>;

/// A bound output; messages are fire-and-forget.
pub trait OutputPort: Send {
    fn send(&mut self, message: &[u8]) -> Result<(), LinkError>;
}

/// A bound input. Dropping it stops delivery.
pub trait InputPort: Send {}

/// Granted access to the MIDI system.
pub trait Session {
    fn inputs(&self) -> Vec<Endpoint>;
    fn outputs(&self) -> Vec<Endpoint>;

    fn open_input(
        &mut self,
        endpoint: &Endpoint,
        handler: InboundHandler,
    ) -> Result<Box<dyn InputPort>, LinkError>;

    fn open_output(&mut self, endpoint: &Endpoint) -> Result<Box<dyn OutputPort>, LinkError>;
}

pub trait Transport {
    type Session: Session;

    /// Ask for access; resolves once, to a session or a denial.
    fn request_access(&self) -> impl Future<Output = Result<Self::Session, LinkError>> + Send;
}
