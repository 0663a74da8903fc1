//! The framed receiver: message delimitation over a boundary-less transport.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::Result;
use crate::framing::{ContentCheck, NoCheck};
use crate::transport::Transport;

/// Floor for the transport poll timeout. Keeps the receive loop responsive
/// even when the configured timeouts are long or absent.
const POLL_FLOOR: Duration = Duration::from_millis(1);

/// Framing configuration for a [`FramedReceiver`].
///
/// Both fields default to `None`. They may be changed between calls via
/// [`FramedReceiver::config_mut`], never concurrently with an in-flight
/// `recv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramingConfig {
    /// Total wall-clock budget per `recv` call, measured from its start.
    /// When it elapses, whatever has accumulated is returned as-is.
    pub timeout: Option<Duration>,
    /// Ends a message once the wire has been silent for this long, measured
    /// from the last byte arrival. Useful for protocols whose responses are
    /// done when data stops coming.
    pub message_separator_time: Option<Duration>,
}

impl FramingConfig {
    /// The poll timeout handed to the transport for one `recv` call: the
    /// minimum of the fixed floor and both configured timeouts. An absent
    /// timeout imposes no constraint and is excluded from the minimum
    /// rather than treated as zero (zero would busy-loop).
    fn poll_interval(&self) -> Duration {
        [Some(POLL_FLOOR), self.timeout, self.message_separator_time]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(POLL_FLOOR)
    }
}

/// A receiver that turns an unstructured byte stream into delimited messages.
///
/// Serial links and similar character-oriented transports provide no notion
/// of message boundaries. This receiver sits between a caller asking for
/// "the next message, up to `max_bytes`" and a [`Transport`] that only
/// supports short bounded reads, and decides where one message ends using
/// three composable policies:
///
/// 1. **Hard timeout** (`timeout`): return whatever has accumulated once the
///    per-call budget elapses.
/// 2. **Silence timeout** (`message_separator_time`): return once no new
///    bytes have arrived for the configured duration.
/// 3. **Content check** (`C`): a [`ContentCheck`] strategy that inspects the
///    accumulated bytes and reports how many of them form a complete
///    message. Bytes past the boundary are carried over to the next call,
///    never dropped.
///
/// Timeout-terminated receives hand back partial data with no error:
/// framing by timeout is lossy by design, and a truncated result is
/// best-effort. If no timeout is configured and the content check is
/// [`NoCheck`], `recv` has no termination condition besides filling
/// `max_bytes` and may block indefinitely. That is a documented caller
/// responsibility; no default timeout is imposed here.
///
/// The receiver is synchronous and not reentrant: at most one `recv` at a
/// time may be in flight.
pub struct FramedReceiver<T: Transport, C: ContentCheck = NoCheck> {
    transport: T,
    checker: C,
    config: FramingConfig,
    // Bytes past a detected message boundary, held for the next recv call.
    carryover: Vec<u8>,
}

impl<T: Transport> FramedReceiver<T, NoCheck> {
    /// Creates a receiver with timeout-based framing only.
    pub fn new(transport: T, config: FramingConfig) -> Self {
        Self::with_check(transport, NoCheck, config)
    }
}

impl<T: Transport, C: ContentCheck> FramedReceiver<T, C> {
    /// Creates a receiver with a content-completeness strategy.
    pub fn with_check(transport: T, checker: C, config: FramingConfig) -> Self {
        Self {
            transport,
            checker,
            config,
            carryover: Vec::new(),
        }
    }

    /// Opens the underlying transport. Make sure to call `close`!
    pub fn open(&mut self) -> Result<()> {
        self.transport.open()
    }

    /// Closes the underlying transport.
    pub fn close(&mut self) -> Result<()> {
        self.transport.close()
    }

    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Reconfigures framing between calls.
    pub fn config_mut(&mut self) -> &mut FramingConfig {
        &mut self.config
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the receiver, returning the underlying transport.
    /// Any carryover bytes still held are discarded.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Receives the next message, at most `max_bytes` long.
    ///
    /// Accumulates bytes from the transport until one of the termination
    /// policies fires, then returns the message. The content check runs on
    /// the seeded carryover before the first read (a message already
    /// complete in carryover is returned without touching the transport)
    /// and again after every read, ahead of the timeout checks, so a
    /// boundary is never truncated by a timeout that fires the same
    /// iteration.
    ///
    /// Bytes are returned in arrival order. A timeout return may carry
    /// partial or even empty data; that is a successful result, not an
    /// error. Only transport failures produce `Err`.
    pub fn recv(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let mut data = std::mem::take(&mut self.carryover);

        self.transport.set_read_timeout(self.config.poll_interval())?;

        let start_time = Instant::now();
        let mut last_growth = start_time;

        if let Some(message) = self.take_complete(&mut data) {
            return Ok(message);
        }

        let mut scratch = vec![0u8; max_bytes];
        loop {
            if data.len() >= max_bytes {
                // Carryover larger than this call's budget: hand back
                // max_bytes, keep the rest for the next call.
                if data.len() > max_bytes {
                    self.carryover = data.split_off(max_bytes);
                }
                trace!(len = data.len(), "message complete at max_bytes");
                return Ok(data);
            }

            let before = data.len();
            let n = self.transport.recv(&mut scratch[..max_bytes - before])?;
            data.extend_from_slice(&scratch[..n]);

            let now = Instant::now();
            if data.len() > before {
                // Silence is measured from the last byte arrival, not from
                // the start of the call.
                last_growth = now;
            }

            if let Some(message) = self.take_complete(&mut data) {
                return Ok(message);
            }
            if let Some(timeout) = self.config.timeout {
                if now.duration_since(start_time) >= timeout {
                    trace!(len = data.len(), "receive budget elapsed, returning as-is");
                    return Ok(data);
                }
            }
            if let Some(separator) = self.config.message_separator_time {
                if now.duration_since(last_growth) >= separator {
                    trace!(len = data.len(), "wire went silent, message considered complete");
                    return Ok(data);
                }
            }
        }
    }

    /// Runs the content check over the accumulated buffer. On a match the
    /// remainder moves into carryover and the message is returned. A claim
    /// past the end of the buffer is clamped to the buffer.
    fn take_complete(&mut self, data: &mut Vec<u8>) -> Option<Vec<u8>> {
        let complete = self.checker.check(data).min(data.len());
        if complete == 0 {
            return None;
        }
        self.carryover = data.split_off(complete);
        let message = std::mem::take(data);
        trace!(
            len = message.len(),
            carryover = self.carryover.len(),
            "message complete via content check"
        );
        Some(message)
    }

    /// Sends the whole payload, retrying until every byte is written.
    ///
    /// A transport that reports no progress (`Ok(None)`) is retried as if it
    /// had written zero bytes. A transport that never makes progress keeps
    /// this looping; there is no partial-failure path. Returns the total
    /// byte count, equal to `data.len()` on success.
    pub fn send(&mut self, data: &[u8]) -> Result<usize> {
        let mut sent = 0;
        while sent < data.len() {
            match self.transport.send(&data[sent..])? {
                Some(n) => {
                    sent += n;
                    trace!(sent, total = data.len(), "send progress");
                }
                None => {
                    trace!(sent, total = data.len(), "transport reported no progress, retrying");
                }
            }
        }
        Ok(sent)
    }
}
