//! MQTT 3.1.1 packet encoding for embedded systems.
//!
//! This module builds MQTT 3.1.1 control packets inside a caller-supplied
//! buffer, without any heap allocation, for clients that only need to connect,
//! publish and subscribe at QoS 0.
//!
//! # Layout of a built packet
//!
//! ```text
//! buffer:  [ reserved header region (5 bytes) | variable header | payload ]
//!                    ^ fixed header back-filled here, ending at offset 5
//! ```
//!
//! The message therefore starts at offset 3 when the Remaining Length fits one
//! byte and at offset 2 when it needs two. Bodies above 16383 bytes are not
//! supported.
//!
//! # Components
//!
//! - [`encoding`]: length-prefixed strings and the Remaining Length / fixed header
//! - [`Context`]: CONNECT, PUBLISH, SUBSCRIBE and DISCONNECT builders
//! - [`check_connack`]: validation of the server's CONNACK
//! - [`Client`]: drives the builders over a [`Connection`](crate::network::Connection)
//!
//! # Usage
//!
//! ```rust
//! use libmqtt::network::application::mqtt::{check_connack, ConnectionParameters, Context};
//!
//! let mut buffer = [0u8; 256];
//! let mut context = Context::connect(ConnectionParameters {
//!     client_identifier: "iot_device_123",
//!     user_name: Some("device"),
//!     password: None,
//!     clean_session: true,
//!     keep_alive: 60,
//!     buffer: &mut buffer,
//! });
//! // connection.write(context.message())
//!
//! // Received from the server:
//! let connack = [0x20, 0x02, 0x00, 0x00];
//! assert!(check_connack(&connack).is_ok());
//!
//! let packet_identifier = context.subscribe("commands/+");
//! assert_eq!(packet_identifier, 1);
//! context.publish("status", b"online");
//! ```

mod client;
mod connack;
pub mod encoding;
mod packet;

pub use client::Client;
pub use connack::{
    CONNACK_MESSAGE_SIZE, ConnackError, ConnectReturnCode, check_connack, session_present,
};
pub use encoding::RESERVED_HEADER_SIZE;
pub use packet::{ConnectionParameters, Context, build_connect};
