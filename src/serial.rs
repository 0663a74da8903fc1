//! A [`Transport`] over a physical serial port, via the `serialport` crate.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::debug;

use crate::error::Result;
use crate::transport::Transport;

/// A serial-port transport.
///
/// The port is configured up front (path and baud rate) and opened by
/// [`Transport::open`]. Reads honor the poll timeout set by the receiver;
/// a read window that passes without data is reported as zero bytes, never
/// as an error.
pub struct SerialPortTransport {
    path: String,
    baud_rate: u32,
    read_timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialPortTransport {
    /// Creates an unopened transport for the given port path and baud rate.
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            read_timeout: Duration::from_millis(1),
            port: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotConnected).into())
    }
}

impl Transport for SerialPortTransport {
    fn open(&mut self) -> Result<()> {
        let port = serialport::new(&self.path, self.baud_rate)
            .timeout(self.read_timeout)
            .open()?;
        self.port = Some(port);
        debug!(port = %self.path, baud = self.baud_rate, "serial port opened");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!(port = %self.path, "serial port closed");
        }
        Ok(())
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.read_timeout = timeout;
        if let Some(port) = self.port.as_mut() {
            port.set_timeout(timeout)?;
        }
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port_mut()?.read(buf) {
            Ok(n) => Ok(n),
            // An empty poll window is not a failure
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn send(&mut self, data: &[u8]) -> Result<Option<usize>> {
        let n = self.port_mut()?.write(data)?;
        Ok(Some(n))
    }
}
