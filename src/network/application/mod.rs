//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols built on the core network traits.
//!
//! ## Available Protocols
//!
//! - **[`mqtt`]**: MQTT 3.1.1 packet encoder and a minimal blocking client
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connection`](crate::network::Connection)
//! - **No-std Compatible**: Designed for embedded systems without heap allocation
//! - **Resource Conscious**: Packets are built in caller-owned buffers

/// MQTT 3.1.1 packet encoder.
///
/// Builds CONNECT, PUBLISH, SUBSCRIBE and DISCONNECT packets in place and
/// checks the server's CONNACK answer.
pub mod mqtt;
