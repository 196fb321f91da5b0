//! Core trait definitions

mod multiplexer;
mod transport;

pub use multiplexer::LocalMultiplexer;
pub use transport::RemoteTransport;
