//! The raw transport seam polled by the framed receiver.

use std::time::Duration;

use crate::error::Result;

/// A byte-stream transport with no message boundaries of its own.
///
/// Purpose: Separate raw I/O (a serial port, a socket, an in-memory pipe)
/// from the framing logic that sits above it. The receiver drives this trait
/// in a poll loop: it sets a short read timeout once per call, then issues
/// bounded reads that return whatever arrived within that window.
///
/// Implementations must treat "no data yet" as `Ok(0)`, never as an error;
/// every `Err` from this trait is a genuine transport failure and propagates
/// to the caller untranslated.
pub trait Transport {
    /// Opens the connection to the peer. Make sure to call `close`!
    fn open(&mut self) -> Result<()>;

    /// Closes the connection to the peer.
    fn close(&mut self) -> Result<()>;

    /// Sets the poll timeout applied to subsequent `recv` calls.
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()>;

    /// Reads up to `buf.len()` bytes, waiting at most the configured poll
    /// timeout. Returns the number of bytes placed at the front of `buf`;
    /// `Ok(0)` means nothing arrived within the window.
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Writes a prefix of `data`, returning the count actually written.
    ///
    /// `Ok(None)` means the transport could not report progress; callers
    /// treat it as zero bytes written and retry the full remainder.
    fn send(&mut self, data: &[u8]) -> Result<Option<usize>>;
}
