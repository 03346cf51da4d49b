//! A network abstraction layer for embedded systems
//!
//! The packet builders never touch the network. These traits describe the
//! byte-stream channel the caller supplies so that the
//! [`Client`](application::mqtt::Client) can move the built packets over any
//! transport: a TCP socket on a hosted system, a modem driver, or a mock in tests.
//!

#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Protocol implementations layered on the traits below
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connection, Read, Write};
}

/// Read bytes from a connection.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Write bytes to a connection.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Shut a connection down.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}
