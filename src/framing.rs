//! Content-completeness strategies for the byte stream.

//--- ContentCheck Trait and Implementations ---

/// A strategy that inspects accumulated bytes and reports message completion.
///
/// Purpose: Let callers delimit messages by content (a terminator byte, a
/// length header) instead of, or in addition to, the timeout policies.
/// Implementations are small strategy objects composed into `FramedReceiver`.
///
/// The receiver passes the *entire* accumulated buffer on every iteration,
/// never just the delta, so implementations stay stateless. A return of `0`
/// means no complete message is present yet; `n > 0` means the first `n`
/// bytes form one complete message and everything after them belongs to the
/// next message (the receiver carries those bytes over to its next call).
pub trait ContentCheck {
    fn check(&self, data: &[u8]) -> usize;
}

/// Any `Fn(&[u8]) -> usize` closure is a content check.
impl<F: Fn(&[u8]) -> usize> ContentCheck for F {
    fn check(&self, data: &[u8]) -> usize {
        self(data)
    }
}

/// The zero-cost "no content checking" strategy: never reports completion.
///
/// When to use: Timeout-only framing. A receive terminates only by filling
/// `max_bytes` or by one of the configured timeouts elapsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheck;

impl ContentCheck for NoCheck {
    #[inline(always)]
    fn check(&self, _data: &[u8]) -> usize {
        0
    }
}

/// Completes a message at the first occurrence of a delimiter byte.
///
/// The delimiter is part of the message: for `b"ABC\nDEF"` with a `b'\n'`
/// delimiter the first message is `b"ABC\n"` and `b"DEF"` is carried over.
///
/// When to use: terminal-style protocols with a machine-readable terminator.
#[derive(Debug, Clone, Copy)]
pub struct DelimiterCheck {
    delimiter: u8,
}

impl DelimiterCheck {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Line-oriented framing on `b'\n'`.
    pub fn newline() -> Self {
        Self::new(b'\n')
    }
}

impl ContentCheck for DelimiterCheck {
    fn check(&self, data: &[u8]) -> usize {
        match data.iter().position(|&b| b == self.delimiter) {
            Some(idx) => idx + 1,
            None => 0,
        }
    }
}

/// Completes a message once a `[4-byte length | payload]` frame is whole.
///
/// The length header is little-endian and counts payload bytes only. The
/// reported message is the full frame, header included: this strategy
/// delimits the stream, it does not strip or interpret anything.
///
/// When to use: binary protocols that length-prefix their payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthPrefixCheck;

impl ContentCheck for LengthPrefixCheck {
    fn check(&self, data: &[u8]) -> usize {
        if data.len() < 4 {
            return 0;
        }
        let payload_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        // A declared length that overflows the frame size is not yet complete
        match payload_len.checked_add(4) {
            Some(frame_len) if data.len() >= frame_len => frame_len,
            _ => 0,
        }
    }
}
