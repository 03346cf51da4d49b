//! # libmqtt - allocation-free MQTT 3.1.1 encoder
//!
//! A small MQTT 3.1.1 library for resource-constrained clients. Control packets
//! are assembled directly inside a buffer owned by the caller, so the crate
//! works in `no_std` environments without an allocator.
//!
//! ## Features
//!
//! - CONNECT with optional user name and password, clean session and keep-alive
//! - PUBLISH at QoS 0, optionally retained
//! - SUBSCRIBE to one topic filter at QoS 0
//! - DISCONNECT
//! - CONNACK validation
//! - A blocking [`Client`](network::application::mqtt::Client) over any
//!   [`Connection`](network::Connection)
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libmqtt = "0.1.0"
//! ```
//!
//! ### Building packets
//!
//! ```rust
//! use libmqtt::network::application::mqtt::{ConnectionParameters, Context};
//!
//! let mut buffer = [0u8; 512];
//! let mut context = Context::connect(ConnectionParameters {
//!     client_identifier: "my_device",
//!     user_name: None,
//!     password: None,
//!     clean_session: true,
//!     keep_alive: 60,
//!     buffer: &mut buffer,
//! });
//! // transport.write(context.message())
//!
//! context.publish("sensors/temperature", b"23.5");
//! // transport.write(context.message())
//!
//! context.disconnect();
//! assert_eq!(context.message(), &[0xE0, 0x00]);
//! ```
//!
//! ## Limits
//!
//! - QoS 0 only, no acknowledgement tracking
//! - One topic filter per SUBSCRIBE
//! - Packet bodies up to 16383 bytes (two Remaining Length bytes)
//!
//! Exceeding a limit or handing in a buffer that is too small is a programming
//! error and panics. Server answers are reported through
//! [`ConnackError`](network::application::mqtt::ConnackError).
//!
//! ## Optional Features
//!
//! - `std`: Implement `std::error::Error` for the error types (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Network abstraction layer and the MQTT protocol implementation.
///
/// The transport traits live at the top of this module; the MQTT encoder and
/// client live in [`network::application::mqtt`].
pub mod network;
