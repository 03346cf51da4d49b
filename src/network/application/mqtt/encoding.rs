//! Low-level MQTT 3.1.1 field encoders.
//!
//! Two encoders live here:
//!
//! - the length-prefixed string encoder used for protocol name, client
//!   identifier, credentials, topic names and topic filters
//! - the Remaining Length / fixed header builder which back-fills the fixed
//!   header into the reserved region once the body size is known
//!
//! Both write into a caller-owned slice and never allocate. Out-of-range input
//! is a programming error and panics.

/// Size of the scratch region kept in front of every packet body.
///
/// Large enough for the worst-case fixed header: one packet type byte followed
/// by up to four Remaining Length bytes.
pub const RESERVED_HEADER_SIZE: usize = 5;

/// Largest body this encoder accepts (two Remaining Length bytes).
pub const MAX_REMAINING_LENGTH: usize = 16_383;

/// Largest string the two-byte length prefix can describe.
pub const MAX_STRING_LENGTH: usize = u16::MAX as usize;

/// Append a length-prefixed string to `buffer` at `*cursor`.
///
/// Writes the byte length as a big-endian `u16` followed by the raw bytes and
/// advances `cursor` past them.
///
/// # Returns
///
/// The number of bytes written, always `2 + bytes.len()`.
///
/// # Panics
///
/// Panics if `bytes` is longer than [`MAX_STRING_LENGTH`] or if `buffer` has no
/// room left for the encoded field.
///
/// # Examples
///
/// ```rust
/// use libmqtt::network::application::mqtt::encoding::write_string;
///
/// let mut buffer = [0u8; 8];
/// let mut cursor = 0;
/// let written = write_string(&mut buffer, &mut cursor, b"MQTT");
///
/// assert_eq!(written, 6);
/// assert_eq!(cursor, 6);
/// assert_eq!(&buffer[..6], &[0x00, 0x04, b'M', b'Q', b'T', b'T']);
/// ```
pub fn write_string(buffer: &mut [u8], cursor: &mut usize, bytes: &[u8]) -> usize {
    assert!(
        bytes.len() <= MAX_STRING_LENGTH,
        "string of {} bytes does not fit a 16-bit length prefix",
        bytes.len()
    );
    let start = *cursor;
    let end = start + 2 + bytes.len();
    assert!(
        end <= buffer.len(),
        "buffer of {} bytes too small for string field ending at {}",
        buffer.len(),
        end
    );

    buffer[start..start + 2].copy_from_slice(&(bytes.len() as u16).to_be_bytes());
    buffer[start + 2..end].copy_from_slice(bytes);
    *cursor = end;

    end - start
}

/// Append raw bytes with no length prefix.
///
/// # Panics
///
/// Panics if `buffer` has no room left for `bytes`.
pub fn write_bytes(buffer: &mut [u8], cursor: &mut usize, bytes: &[u8]) -> usize {
    let start = *cursor;
    let end = start + bytes.len();
    assert!(
        end <= buffer.len(),
        "buffer of {} bytes too small for data ending at {}",
        buffer.len(),
        end
    );

    buffer[start..end].copy_from_slice(bytes);
    *cursor = end;

    bytes.len()
}

/// How many Remaining Length bytes encode `size`.
///
/// # Panics
///
/// Panics if `size` exceeds [`MAX_REMAINING_LENGTH`].
pub const fn remaining_length_size(size: usize) -> usize {
    if size < 128 {
        1
    } else if size <= MAX_REMAINING_LENGTH {
        2
    } else {
        panic!("remaining length above 16383 bytes is not supported")
    }
}

/// Encode `size` as an MQTT Remaining Length into `out`.
///
/// Each byte carries 7 bits of magnitude, low-order group first, with bit 7
/// set when another byte follows.
///
/// # Returns
///
/// The number of bytes used in `out` (1 or 2).
///
/// # Panics
///
/// Panics if `size` exceeds [`MAX_REMAINING_LENGTH`].
pub fn encode_remaining_length(size: usize, out: &mut [u8; 2]) -> usize {
    let length = remaining_length_size(size);
    if length == 1 {
        out[0] = size as u8;
    } else {
        out[0] = (size % 128) as u8 | 0x80;
        out[1] = (size / 128) as u8;
    }
    length
}

/// Decode an MQTT Remaining Length from the start of `bytes`.
///
/// Accepts the full protocol range (up to four bytes) so it can check any
/// received header.
///
/// # Returns
///
/// * `Some((value, consumed))` - the decoded value and how many bytes it used
/// * `None` - `bytes` is truncated or the encoding is longer than four bytes
pub fn decode_remaining_length(bytes: &[u8]) -> Option<(usize, usize)> {
    let mut value = 0usize;
    let mut multiplier = 1usize;

    for (index, &byte) in bytes.iter().enumerate().take(4) {
        value += (byte & 0x7F) as usize * multiplier;
        if byte & 0x80 == 0 {
            return Some((value, index + 1));
        }
        multiplier *= 128;
    }

    None
}

/// Back-fill the fixed header in front of a body written at
/// [`RESERVED_HEADER_SIZE`].
///
/// The header is placed so that its last byte sits immediately before the
/// body's first byte; no byte of the body moves.
///
/// # Arguments
///
/// * `buffer` - The working buffer, body already written from offset 5
/// * `packet_byte` - Packet type in the high nibble, flags in the low nibble
/// * `body_size` - Variable header plus payload size in bytes
///
/// # Returns
///
/// The offset of the first header byte, which is where the message starts.
///
/// # Panics
///
/// Panics if `body_size` exceeds [`MAX_REMAINING_LENGTH`] or the buffer is
/// shorter than the reserved region.
pub fn write_fixed_header(buffer: &mut [u8], packet_byte: u8, body_size: usize) -> usize {
    assert!(
        buffer.len() >= RESERVED_HEADER_SIZE,
        "buffer of {} bytes cannot hold the reserved header region",
        buffer.len()
    );

    let mut length_bytes = [0u8; 2];
    let length_size = encode_remaining_length(body_size, &mut length_bytes);

    let start = RESERVED_HEADER_SIZE - 1 - length_size;
    buffer[start] = packet_byte;
    buffer[start + 1..RESERVED_HEADER_SIZE].copy_from_slice(&length_bytes[..length_size]);

    start
}
