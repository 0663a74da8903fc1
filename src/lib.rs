//! # serialframe
//!
//! Configurable message framing over delimiter-less byte streams.
//!
//! ## Overview
//!
//! Serial links and similar character-oriented transports provide no notion
//! of message boundaries: bytes just arrive. `serialframe` sits on top of
//! such a transport and decides, for each receive request, how many bytes
//! constitute "one message", buffering any excess for the next call. Three
//! independent, composable policies delimit messages:
//!
//! * **Hard timeout**: return whatever has accumulated after a fixed
//!   per-call budget.
//! * **Silence timeout**: return once the wire has been quiet for a given
//!   duration, useful for terminal-style protocols where you know the
//!   response is done when data stops coming.
//! * **Content check**: a pluggable strategy that inspects the accumulated
//!   bytes and reports where the first complete message ends. Bytes past
//!   the boundary are carried over, never lost.
//!
//! If none of these policies is configured, a receive can block until it
//! fills its byte budget; that is the caller's contract to manage.
//!
//! ## Quick Start
//!
//! ```rust
//! use serialframe::*;
//! use std::collections::VecDeque;
//! use std::time::Duration;
//!
//! // A toy transport: an in-memory queue of received chunks.
//! struct Loopback {
//!     incoming: VecDeque<Vec<u8>>,
//!     outgoing: Vec<u8>,
//! }
//!
//! impl Transport for Loopback {
//!     fn open(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn close(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn set_read_timeout(&mut self, _timeout: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!     fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
//!         match self.incoming.pop_front() {
//!             Some(chunk) => {
//!                 buf[..chunk.len()].copy_from_slice(&chunk);
//!                 Ok(chunk.len())
//!             }
//!             None => Ok(0),
//!         }
//!     }
//!     fn send(&mut self, data: &[u8]) -> Result<Option<usize>> {
//!         self.outgoing.extend_from_slice(data);
//!         Ok(Some(data.len()))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let link = Loopback {
//!         incoming: VecDeque::from([b"PING\n".to_vec(), b"PONG\nextra".to_vec()]),
//!         outgoing: Vec::new(),
//!     };
//!
//!     // Line-oriented framing with a silence fallback
//!     let config = FramingConfig {
//!         message_separator_time: Some(Duration::from_millis(100)),
//!         ..Default::default()
//!     };
//!     let mut receiver = FramedReceiver::with_check(link, DelimiterCheck::newline(), config);
//!
//!     receiver.open()?;
//!     assert_eq!(receiver.recv(64)?, b"PING\n");
//!     assert_eq!(receiver.recv(64)?, b"PONG\n"); // "extra" is carried over
//!     receiver.send(b"ACK\n")?;
//!     receiver.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is built around two seams:
//!
//! * **`Transport`**: the raw byte stream: open/close lifecycle, bounded
//!   reads under a short poll timeout, and best-effort writes. The `serial`
//!   feature ships a `serialport`-backed implementation.
//! * **`ContentCheck`**: how message completion is detected in accumulated
//!   bytes. Closures `Fn(&[u8]) -> usize` work directly; `DelimiterCheck`
//!   and `LengthPrefixCheck` cover the common wire shapes, and `NoCheck`
//!   opts out at zero cost.
//!
//! `FramedReceiver` composes the two with the timeout policies and owns the
//! carryover buffer in between calls. It is synchronous and blocking by
//! design; timeouts are the only cancellation mechanism.

pub mod error;
pub mod framing;
pub mod receiver;
#[cfg(feature = "serial")]
pub mod serial;
pub mod transport;

// Re-export the main public API for user convenience.
pub use error::{Error, Result};
pub use framing::{ContentCheck, DelimiterCheck, LengthPrefixCheck, NoCheck};
pub use receiver::{FramedReceiver, FramingConfig};
pub use transport::Transport;

#[cfg(feature = "serial")]
pub use serial::SerialPortTransport;
