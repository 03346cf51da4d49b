use std::cell::{Cell, RefCell};
use std::rc::Rc;

use heapless::Vec;
use libmqtt::network::error::Error;
use libmqtt::network::*;

pub const MOCK_BUFFER_SIZE: usize = 1024;

pub type Sink = Rc<RefCell<Vec<u8, MOCK_BUFFER_SIZE>>>;

/// In-memory connection. Written bytes and the closed flag are shared so a
/// test can still inspect them once the client consumed the connection.
#[derive(Debug)]
pub struct MockConnection {
    read_buffer: Vec<u8, MOCK_BUFFER_SIZE>,
    read_pos: usize,
    pub written: Sink,
    pub closed: Rc<Cell<bool>>,
    /// Largest chunk accepted by a single `write` call
    pub max_write: usize,
    pub fail_writes: bool,
    pub fail_close: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            read_buffer: Vec::new(),
            read_pos: 0,
            written: Rc::new(RefCell::new(Vec::new())),
            closed: Rc::new(Cell::new(false)),
            max_write: MOCK_BUFFER_SIZE,
            fail_writes: false,
            fail_close: false,
        }
    }

    /// Helper for tests to inject data into the connection's read buffer
    pub fn with_read_data(data: &[u8]) -> Self {
        let mut connection = Self::new();
        connection.read_buffer.extend_from_slice(data).unwrap();
        connection
    }
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.closed.get() {
            return Err(Error::NotOpen);
        }
        // One byte per call to exercise partial reads
        if buf.is_empty() || self.read_pos == self.read_buffer.len() {
            return Ok(0);
        }
        buf[0] = self.read_buffer[self.read_pos];
        self.read_pos += 1;
        Ok(1)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.closed.get() {
            return Err(Error::NotOpen);
        }
        if self.fail_writes {
            return Err(Error::WriteError);
        }
        let len = buf.len().min(self.max_write);
        self.written
            .borrow_mut()
            .extend_from_slice(&buf[..len])
            .map_err(|_| Error::WriteError)?;
        Ok(len)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.closed.get() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        if self.fail_close {
            return Err(Error::ConnectionClosed);
        }
        if self.closed.replace(true) {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Connection for MockConnection {}
