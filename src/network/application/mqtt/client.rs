//! A minimal blocking MQTT 3.1.1 client.
//!
//! [`Client`] glues the packet builders of [`Context`] to any transport
//! implementing [`Connection`]. Every packet is built in the buffer handed over
//! in [`ConnectionParameters`] and written out verbatim; nothing is allocated.
//!
//! Only QoS 0 traffic is sent, so apart from the optional CONNACK the client
//! never reads from the connection.
//!
//! # Examples
//!
//! ```rust,no_run
//! use libmqtt::network::application::mqtt::{Client, ConnectionParameters};
//! # use libmqtt::network::Connection;
//! # struct TcpConnection;
//! # impl Connection for TcpConnection {}
//! # impl libmqtt::network::Read for TcpConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libmqtt::network::Write for TcpConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libmqtt::network::Close for TcpConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # fn main() -> Result<(), libmqtt::network::error::Error> {
//!
//! let mut buffer = [0u8; 1024];
//! let parameters = ConnectionParameters {
//!     client_identifier: "sensor_device_01",
//!     user_name: None,
//!     password: None,
//!     clean_session: true,
//!     keep_alive: 60,
//!     buffer: &mut buffer,
//! };
//!
//! let mut client = Client::connect(TcpConnection, parameters, true)?;
//! client.publish("sensors/temperature", b"23.5")?;
//! client.disconnect()?;
//! # Ok(())
//! # }
//! ```

use super::connack::{CONNACK_MESSAGE_SIZE, check_connack};
use super::packet::{ConnectionParameters, Context};
use crate::network::error::Error;
use crate::network::{Connection, Read, Write};

/// An MQTT 3.1.1 client sending QoS 0 traffic over a connection `C`.
pub struct Client<'a, C: Connection> {
    connection: C,
    context: Context<'a>,
}

impl<'a, C: Connection> Client<'a, C> {
    /// Send a CONNECT packet and optionally wait for the CONNACK.
    ///
    /// The protocol lets a client send further packets without waiting for the
    /// CONNACK, but a slow server may not keep up, so waiting is usually
    /// preferable.
    ///
    /// # Arguments
    ///
    /// * `connection` - An established connection to the server
    /// * `parameters` - CONNECT fields and the buffer used for every packet
    /// * `wait_for_connack` - Read and check the server's answer before returning
    ///
    /// # Errors
    ///
    /// * [`Error::WriteError`] - Failed to send the CONNECT packet
    /// * [`Error::ReadError`] - Failed to read the CONNACK
    /// * [`Error::ConnectionClosed`] - The connection closed mid-packet
    /// * [`Error::ProtocolError`] - The answer is not a CONNACK
    /// * [`Error::ConnectionRefused`] - The server refused the connection
    pub fn connect(
        mut connection: C,
        parameters: ConnectionParameters<'a>,
        wait_for_connack: bool,
    ) -> Result<Self, Error> {
        let mut context = Context::connect(parameters);
        send(&mut connection, context.message())?;

        if wait_for_connack {
            let connack = &mut context.buffer_mut()[..CONNACK_MESSAGE_SIZE];
            read_exact(&mut connection, connack)?;
            if let Err(error) = check_connack(connack) {
                #[cfg(feature = "defmt")]
                defmt::warn!("CONNACK check failed: {}", error);
                return Err(error.into());
            }

            #[cfg(feature = "defmt")]
            defmt::info!("connection accepted");
        }

        Ok(Self {
            connection,
            context,
        })
    }

    /// Publish `payload` on `topic` at QoS 0.
    ///
    /// # Errors
    ///
    /// * [`Error::WriteError`] - Failed to send the packet
    /// * [`Error::ConnectionClosed`] - The connection closed mid-packet
    pub fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Error> {
        self.context.publish(topic, payload);
        send(&mut self.connection, self.context.message())
    }

    /// Publish `payload` on `topic` at QoS 0 with the RETAIN flag.
    pub fn publish_retained(&mut self, topic: &str, payload: &[u8]) -> Result<(), Error> {
        self.context.publish_retained(topic, payload);
        send(&mut self.connection, self.context.message())
    }

    /// Subscribe to one topic filter at QoS 0.
    ///
    /// The SUBACK is not awaited; matching PUBLISH packets are read by the
    /// caller from the connection.
    ///
    /// # Returns
    ///
    /// The packet identifier of the SUBSCRIBE packet.
    pub fn subscribe(&mut self, topic_filter: &str) -> Result<u16, Error> {
        let packet_identifier = self.context.subscribe(topic_filter);
        send(&mut self.connection, self.context.message())?;
        Ok(packet_identifier)
    }

    /// Send a DISCONNECT packet and close the connection.
    ///
    /// # Errors
    ///
    /// * [`Error::WriteError`] - Failed to send the DISCONNECT packet
    /// * [`Error::NotOpen`] - The packet went out but closing the connection failed
    pub fn disconnect(mut self) -> Result<(), Error> {
        self.context.disconnect();
        send(&mut self.connection, self.context.message())?;
        self.connection.close().map_err(|_| Error::NotOpen)
    }

    /// The connection, for reading incoming packets.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Split the client back into its connection and working buffer.
    pub fn into_parts(self) -> (C, &'a mut [u8]) {
        (self.connection, self.context.into_buffer())
    }
}

impl<C: Connection + core::fmt::Debug> core::fmt::Debug for Client<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client")
            .field("connection", &self.connection)
            .field("context", &self.context)
            .finish()
    }
}

/// Write a whole message and flush it.
fn send<C: Write>(connection: &mut C, mut message: &[u8]) -> Result<(), Error> {
    while !message.is_empty() {
        match connection.write(message) {
            Ok(0) => return Err(Error::ConnectionClosed),
            Ok(n) => message = &message[n..],
            Err(_) => return Err(Error::WriteError),
        }
    }
    connection.flush().map_err(|_| Error::WriteError)
}

/// Fill `buf` from the connection.
fn read_exact<C: Read>(connection: &mut C, buf: &mut [u8]) -> Result<(), Error> {
    let mut total_read = 0;
    while total_read < buf.len() {
        match connection.read(&mut buf[total_read..]) {
            Ok(0) => return Err(Error::ConnectionClosed),
            Ok(n) => total_read += n,
            Err(_) => return Err(Error::ReadError),
        }
    }
    Ok(())
}
