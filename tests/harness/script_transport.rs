use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use serialframe::{Result, Transport};

/// An in-memory transport driven by a script of timed chunks.
///
/// Each step's bytes become available only after its delay has elapsed,
/// measured from the moment the previous step was fully consumed. Reads
/// honor the poll timeout the receiver configured: a read against data that
/// is not yet available sleeps the poll window and reports zero bytes, just
/// like a quiet serial port.
pub struct ScriptTransport {
    script: VecDeque<Step>,
    ready_at: Option<Instant>,
    poll_timeout: Duration,
    pub reads: usize,
    pub sent: Vec<u8>,
    send_script: VecDeque<Option<usize>>,
    pub open: bool,
}

struct Step {
    delay: Duration,
    data: Vec<u8>,
}

impl ScriptTransport {
    /// Builds a transport from `(delay_ms, chunk)` steps.
    pub fn new(steps: &[(u64, &[u8])]) -> Self {
        Self {
            script: steps
                .iter()
                .map(|&(delay_ms, data)| Step {
                    delay: Duration::from_millis(delay_ms),
                    data: data.to_vec(),
                })
                .collect(),
            ready_at: None,
            poll_timeout: Duration::from_millis(1),
            reads: 0,
            sent: Vec::new(),
            send_script: VecDeque::new(),
            open: false,
        }
    }

    /// All chunks available immediately.
    pub fn immediate(chunks: &[&[u8]]) -> Self {
        let steps: Vec<(u64, &[u8])> = chunks.iter().map(|&c| (0, c)).collect();
        Self::new(&steps)
    }

    /// Scripts the per-call results of `send`; once exhausted, sends accept
    /// everything.
    pub fn with_send_script(mut self, script: &[Option<usize>]) -> Self {
        self.send_script = script.iter().copied().collect();
        self
    }

    pub fn drained(&self) -> bool {
        self.script.is_empty()
    }
}

impl Transport for ScriptTransport {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.poll_timeout = timeout;
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.reads += 1;
        let now = Instant::now();

        let Some(step) = self.script.front() else {
            thread::sleep(self.poll_timeout);
            return Ok(0);
        };
        let ready_at = *self.ready_at.get_or_insert(now + step.delay);

        if ready_at > now + self.poll_timeout {
            // The chunk lands beyond this poll window
            thread::sleep(self.poll_timeout);
            return Ok(0);
        }
        if ready_at > now {
            thread::sleep(ready_at - now);
        }

        let step = self
            .script
            .front_mut()
            .expect("front checked above");
        let n = step.data.len().min(buf.len());
        buf[..n].copy_from_slice(&step.data[..n]);
        step.data.drain(..n);
        if step.data.is_empty() {
            self.script.pop_front();
        } else {
            // Leftover bytes from a partially consumed chunk stay available
            step.delay = Duration::ZERO;
        }
        self.ready_at = None;
        Ok(n)
    }

    fn send(&mut self, data: &[u8]) -> Result<Option<usize>> {
        match self.send_script.pop_front() {
            Some(Some(n)) => {
                let n = n.min(data.len());
                self.sent.extend_from_slice(&data[..n]);
                Ok(Some(n))
            }
            Some(None) => Ok(None),
            None => {
                self.sent.extend_from_slice(data);
                Ok(Some(data.len()))
            }
        }
    }
}
