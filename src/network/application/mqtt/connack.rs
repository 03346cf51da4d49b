//! CONNACK validation.
//!
//! After sending a CONNECT packet the client may wait for the server's
//! [`CONNACK_MESSAGE_SIZE`] byte answer and hand it to [`check_connack`]. This
//! is the only packet this crate decodes.

use core::fmt;

/// How many bytes a CONNACK packet is made of.
pub const CONNACK_MESSAGE_SIZE: usize = 4;

const CONNACK: u8 = 0x20;
const SESSION_PRESENT_FLAG: u8 = 0x01;

/// Reason given by the server for refusing a connection.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConnectReturnCode {
    /// The server does not support MQTT 3.1.1.
    UnacceptableProtocolVersion,
    /// The client identifier is well formed but not allowed.
    IdentifierRejected,
    /// The MQTT service is unavailable.
    ServerUnavailable,
    /// The user name or password is malformed.
    BadUserNameOrPassword,
    /// The client is not authorized to connect.
    NotAuthorized,
    /// A code the protocol keeps for future use.
    Reserved(u8),
}

impl ConnectReturnCode {
    /// The raw return code byte.
    pub fn code(self) -> u8 {
        match self {
            ConnectReturnCode::UnacceptableProtocolVersion => 1,
            ConnectReturnCode::IdentifierRejected => 2,
            ConnectReturnCode::ServerUnavailable => 3,
            ConnectReturnCode::BadUserNameOrPassword => 4,
            ConnectReturnCode::NotAuthorized => 5,
            ConnectReturnCode::Reserved(code) => code,
        }
    }
}

impl ConnectReturnCode {
    // 0 means accepted and never reaches this
    fn from_rejection(code: u8) -> Self {
        match code {
            1 => ConnectReturnCode::UnacceptableProtocolVersion,
            2 => ConnectReturnCode::IdentifierRejected,
            3 => ConnectReturnCode::ServerUnavailable,
            4 => ConnectReturnCode::BadUserNameOrPassword,
            5 => ConnectReturnCode::NotAuthorized,
            other => ConnectReturnCode::Reserved(other),
        }
    }
}

impl fmt::Display for ConnectReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectReturnCode::UnacceptableProtocolVersion => f.write_str("unacceptable protocol version"),
            ConnectReturnCode::IdentifierRejected => f.write_str("identifier rejected"),
            ConnectReturnCode::ServerUnavailable => f.write_str("server unavailable"),
            ConnectReturnCode::BadUserNameOrPassword => f.write_str("bad user name or password"),
            ConnectReturnCode::NotAuthorized => f.write_str("not authorized"),
            ConnectReturnCode::Reserved(code) => write!(f, "reserved return code {code:#04x}"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConnectReturnCode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConnectReturnCode::UnacceptableProtocolVersion => defmt::write!(f, "UnacceptableProtocolVersion"),
            ConnectReturnCode::IdentifierRejected => defmt::write!(f, "IdentifierRejected"),
            ConnectReturnCode::ServerUnavailable => defmt::write!(f, "ServerUnavailable"),
            ConnectReturnCode::BadUserNameOrPassword => defmt::write!(f, "BadUserNameOrPassword"),
            ConnectReturnCode::NotAuthorized => defmt::write!(f, "NotAuthorized"),
            ConnectReturnCode::Reserved(code) => defmt::write!(f, "Reserved({=u8})", *code),
        }
    }
}

/// Outcome of a CONNACK check that did not grant the connection.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConnackError {
    /// The bytes are not a CONNACK packet.
    Malformed,
    /// The server refused the connection.
    Rejected(ConnectReturnCode),
}

impl fmt::Display for ConnackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnackError::Malformed => f.write_str("malformed CONNACK packet"),
            ConnackError::Rejected(code) => write!(f, "connection rejected: {code}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConnackError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConnackError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConnackError::Malformed => defmt::write!(f, "Malformed"),
            ConnackError::Rejected(code) => defmt::write!(f, "Rejected({})", code),
        }
    }
}

/// Check a CONNACK packet received from the server.
///
/// `bytes` must be exactly what was read from the connection.
///
/// # Returns
///
/// * `Ok(())` - The server accepted the connection (return code 0)
/// * `Err(ConnackError::Malformed)` - Wrong size or packet type
/// * `Err(ConnackError::Rejected(code))` - The server refused the connection
///
/// # Examples
///
/// ```rust
/// use libmqtt::network::application::mqtt::{check_connack, ConnackError, ConnectReturnCode};
///
/// assert_eq!(check_connack(&[0x20, 0x02, 0x00, 0x00]), Ok(()));
/// assert_eq!(
///     check_connack(&[0x20, 0x02, 0x00, 0x05]),
///     Err(ConnackError::Rejected(ConnectReturnCode::NotAuthorized))
/// );
/// assert_eq!(check_connack(&[0x20, 0x02, 0x00]), Err(ConnackError::Malformed));
/// ```
pub fn check_connack(bytes: &[u8]) -> Result<(), ConnackError> {
    if bytes.len() != CONNACK_MESSAGE_SIZE || bytes[0] != CONNACK {
        #[cfg(feature = "defmt")]
        defmt::warn!("malformed CONNACK: {=[u8]:#x}", bytes);
        return Err(ConnackError::Malformed);
    }

    match bytes[3] {
        0 => Ok(()),
        code => Err(ConnackError::Rejected(ConnectReturnCode::from_rejection(code))),
    }
}

/// Whether an accepted CONNACK reports a session kept from a previous
/// connection.
///
/// Only meaningful once [`check_connack`] returned `Ok(())` for `bytes`.
pub fn session_present(bytes: &[u8]) -> bool {
    bytes.len() == CONNACK_MESSAGE_SIZE && bytes[2] & SESSION_PRESENT_FLAG != 0
}
