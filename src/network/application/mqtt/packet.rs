//! MQTT 3.1.1 control packet builders.
//!
//! Every packet is assembled in place inside a caller-owned buffer. The body
//! (variable header and payload) is written from
//! [`RESERVED_HEADER_SIZE`] onwards, then the fixed header is back-filled right
//! in front of it, so the message starts at offset 2 or 3 depending on the
//! Remaining Length size. [`Context::message`] always returns the finished
//! packet, ready to hand to the transport.
//!
//! The same buffer is reused for every packet of a connection: building a new
//! packet overwrites the previous one.
//!
//! # Examples
//!
//! ```rust
//! use libmqtt::network::application::mqtt::{ConnectionParameters, Context};
//!
//! let mut buffer = [0u8; 128];
//! let mut context = Context::connect(ConnectionParameters {
//!     client_identifier: "sensor_01",
//!     user_name: None,
//!     password: None,
//!     clean_session: true,
//!     keep_alive: 60,
//!     buffer: &mut buffer,
//! });
//! assert_eq!(context.message()[0], 0x10);
//! // transport.write(context.message())
//!
//! context.publish("sensors/temperature", b"23.5");
//! assert_eq!(context.message()[0], 0x30);
//!
//! context.disconnect();
//! assert_eq!(context.message(), &[0xE0, 0x00]);
//! ```

use super::encoding::{
    MAX_REMAINING_LENGTH, RESERVED_HEADER_SIZE, write_bytes, write_fixed_header, write_string,
};

// Fixed header first byte: packet type in the high nibble, flags in the low one
const CONNECT: u8 = 0x10;
const PUBLISH: u8 = 0x30;
const PUBLISH_RETAIN: u8 = 0x01;
const SUBSCRIBE: u8 = 0x82;
const DISCONNECT: u8 = 0xE0;

const PROTOCOL_NAME: &[u8] = b"MQTT";
const PROTOCOL_LEVEL: u8 = 4; // MQTT 3.1.1

// CONNECT flags
const USER_NAME_FLAG: u8 = 0x80;
const PASSWORD_FLAG: u8 = 0x40;
const CLEAN_SESSION_FLAG: u8 = 0x02;

/// Requested QoS byte of a subscription, at most once delivery.
const REQUESTED_QOS: u8 = 0;

/// Size of the CONNECT variable header.
const CONNECT_VARIABLE_HEADER_SIZE: usize = 10;

/// Parameters of a CONNECT request.
///
/// `user_name` and `password` are tri-state: `None` leaves the field and its
/// flag out of the packet, while `Some("")` sets the flag and sends an empty
/// field.
///
/// # Examples
///
/// ```rust
/// use libmqtt::network::application::mqtt::ConnectionParameters;
///
/// let mut buffer = [0u8; 256];
/// let parameters = ConnectionParameters {
///     client_identifier: "weather_station",
///     user_name: Some("station"),
///     password: Some("secret"),
///     clean_session: true,
///     keep_alive: 120,
///     buffer: &mut buffer,
/// };
/// # let _ = parameters;
/// ```
#[derive(Debug)]
pub struct ConnectionParameters<'a> {
    /// Client identifier, always sent.
    pub client_identifier: &'a str,

    /// Optional user name.
    pub user_name: Option<&'a str>,

    /// Optional password.
    pub password: Option<&'a str>,

    /// Ask the server to discard any state kept from a previous session.
    pub clean_session: bool,

    /// Keep-alive interval in seconds, 0 disables it.
    pub keep_alive: u16,

    /// Buffer in which every packet of the connection is built.
    ///
    /// It must hold [`RESERVED_HEADER_SIZE`] bytes plus the largest packet body
    /// built with it.
    pub buffer: &'a mut [u8],
}

/// One in-flight message and the buffer it is built in.
///
/// Created by [`Context::connect`], then reused by [`Context::publish`],
/// [`Context::subscribe`] and [`Context::disconnect`]. After any of them
/// returns, `buffer[message_offset..message_offset + message_size]` is one
/// complete control packet.
#[derive(Debug)]
pub struct Context<'a> {
    buffer: &'a mut [u8],
    message_offset: usize,
    message_size: usize,
    packet_identifier: u16,
}

impl<'a> Context<'a> {
    /// Build a CONNECT packet and start a fresh context around `parameters.buffer`.
    ///
    /// Waiting for the CONNACK is left to the caller, see
    /// [`check_connack`](super::check_connack).
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too small for the packet or a field is longer
    /// than 65535 bytes.
    pub fn connect(parameters: ConnectionParameters<'a>) -> Self {
        let ConnectionParameters {
            client_identifier,
            user_name,
            password,
            clean_session,
            keep_alive,
            buffer,
        } = parameters;

        let mut context = Self {
            buffer,
            message_offset: 0,
            message_size: 0,
            packet_identifier: 1,
        };
        context.require_capacity(connect_body_size(client_identifier, user_name, password));

        let buffer = &mut *context.buffer;
        let mut cursor = RESERVED_HEADER_SIZE;

        // --- Variable Header ---
        write_string(buffer, &mut cursor, PROTOCOL_NAME);
        buffer[cursor] = PROTOCOL_LEVEL;
        let flags_index = cursor + 1;
        buffer[flags_index] = 0;
        buffer[flags_index + 1..flags_index + 3].copy_from_slice(&keep_alive.to_be_bytes());
        cursor += 4;

        // --- Payload ---
        let mut connect_flags = 0;
        write_string(buffer, &mut cursor, client_identifier.as_bytes());
        if let Some(user_name) = user_name {
            write_string(buffer, &mut cursor, user_name.as_bytes());
            connect_flags |= USER_NAME_FLAG;
        }
        if let Some(password) = password {
            write_string(buffer, &mut cursor, password.as_bytes());
            connect_flags |= PASSWORD_FLAG;
        }
        if clean_session {
            connect_flags |= CLEAN_SESSION_FLAG;
        }
        buffer[flags_index] = connect_flags;

        context.finalize(CONNECT, cursor);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "CONNECT built: flags={=u8:#x} keep_alive={=u16} size={=usize}",
            connect_flags,
            keep_alive,
            context.message_size
        );

        context
    }

    /// Build a QoS 0 PUBLISH packet.
    ///
    /// The payload is copied unprefixed after the topic name; its length is
    /// implied by the Remaining Length. An empty payload is allowed.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too small, the topic is longer than 65535 bytes
    /// or the packet body exceeds 16383 bytes.
    pub fn publish(&mut self, topic: &str, payload: &[u8]) {
        self.build_publish(PUBLISH, topic, payload);
    }

    /// Build a QoS 0 PUBLISH packet with the RETAIN flag set.
    ///
    /// The server keeps the message and hands it to future subscribers of the
    /// topic. An empty payload clears the retained message.
    pub fn publish_retained(&mut self, topic: &str, payload: &[u8]) {
        self.build_publish(PUBLISH | PUBLISH_RETAIN, topic, payload);
    }

    fn build_publish(&mut self, packet_byte: u8, topic: &str, payload: &[u8]) {
        self.require_capacity(2 + topic.len() + payload.len());

        let mut cursor = RESERVED_HEADER_SIZE;
        write_string(self.buffer, &mut cursor, topic.as_bytes());
        write_bytes(self.buffer, &mut cursor, payload);

        self.finalize(packet_byte, cursor);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "PUBLISH built: topic={=str} payload={=usize} size={=usize}",
            topic,
            payload.len(),
            self.message_size
        );
    }

    /// Build a SUBSCRIBE packet for a single topic filter at QoS 0.
    ///
    /// Several filters need several calls, one message each.
    ///
    /// # Returns
    ///
    /// The packet identifier carried by the packet. Identifiers start at 1
    /// after [`Context::connect`] and increase with every call, skipping 0.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too small or the filter is longer than 65535 bytes.
    pub fn subscribe(&mut self, topic_filter: &str) -> u16 {
        self.require_capacity(2 + 2 + topic_filter.len() + 1);

        let packet_identifier = self.next_packet_identifier();
        let mut cursor = RESERVED_HEADER_SIZE;
        write_bytes(self.buffer, &mut cursor, &packet_identifier.to_be_bytes());
        write_string(self.buffer, &mut cursor, topic_filter.as_bytes());
        write_bytes(self.buffer, &mut cursor, &[REQUESTED_QOS]);

        self.finalize(SUBSCRIBE, cursor);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "SUBSCRIBE built: id={=u16} filter={=str}",
            packet_identifier,
            topic_filter
        );

        packet_identifier
    }

    /// Build a DISCONNECT packet, always `[0xE0, 0x00]` at the buffer start.
    ///
    /// The network connection should be closed once it has been sent.
    pub fn disconnect(&mut self) {
        assert!(self.buffer.len() >= 2, "buffer too small for DISCONNECT");

        self.buffer[0] = DISCONNECT;
        self.buffer[1] = 0;
        self.message_offset = 0;
        self.message_size = 2;
    }

    /// The finished message.
    pub fn message(&self) -> &[u8] {
        &self.buffer[self.message_offset..self.message_offset + self.message_size]
    }

    /// Offset of the first message byte in the buffer.
    pub fn message_offset(&self) -> usize {
        self.message_offset
    }

    /// Size of the finished message in bytes.
    pub fn message_size(&self) -> usize {
        self.message_size
    }

    /// The whole working buffer, for instance to receive the CONNACK into.
    ///
    /// Writing to it invalidates the current message.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.message_size = 0;
        self.message_offset = 0;
        &mut *self.buffer
    }

    /// Give the working buffer back.
    pub fn into_buffer(self) -> &'a mut [u8] {
        self.buffer
    }

    fn next_packet_identifier(&mut self) -> u16 {
        let identifier = self.packet_identifier;
        self.packet_identifier = identifier.checked_add(1).unwrap_or(1);
        identifier
    }

    fn require_capacity(&self, body_size: usize) {
        assert!(
            body_size <= MAX_REMAINING_LENGTH,
            "packet body of {} bytes exceeds the 16383 byte limit",
            body_size
        );
        assert!(
            RESERVED_HEADER_SIZE + body_size <= self.buffer.len(),
            "buffer of {} bytes too small for a {} byte packet body",
            self.buffer.len(),
            body_size
        );
    }

    // `end` is the cursor after the last body byte
    fn finalize(&mut self, packet_byte: u8, end: usize) {
        let start = write_fixed_header(self.buffer, packet_byte, end - RESERVED_HEADER_SIZE);
        self.message_offset = start;
        self.message_size = end - start;
    }
}

/// Build a CONNECT packet, same as [`Context::connect`].
pub fn build_connect(parameters: ConnectionParameters<'_>) -> Context<'_> {
    Context::connect(parameters)
}

fn connect_body_size(client_identifier: &str, user_name: Option<&str>, password: Option<&str>) -> usize {
    CONNECT_VARIABLE_HEADER_SIZE
        + 2
        + client_identifier.len()
        + user_name.map_or(0, |field| 2 + field.len())
        + password.map_or(0, |field| 2 + field.len())
}
