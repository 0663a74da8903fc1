use thiserror::Error;

/// Custom error types for the serialframe library.
///
/// Framing itself defines no error kinds: hard-timeout and silence-timeout
/// expirations are successful returns carrying partial data. Everything here
/// is a transport failure propagated without translation.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors surfaced by a transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial-port failures from the `serialport` backend.
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
