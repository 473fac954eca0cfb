use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Configuration
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Invalid error correction level")]
    InvalidECLevel,
    #[error("Invalid masking pattern")]
    InvalidMaskPattern,

    // Data
    #[error("Empty data")]
    EmptyData,
    #[error("Invalid character")]
    InvalidChar,
    #[error("Data too long")]
    DataTooLong,
    #[error("Capacity overflow: {bits} bits exceed capacity of {capacity} bits")]
    CapacityOverflow { bits: usize, capacity: usize },

    // Matrix
    #[error("Module ({row}, {col}) is out of bounds for width {width}")]
    IndexOutOfBounds { row: usize, col: usize, width: usize },
    #[error("QR has not been built")]
    NotBuilt,

    // Galois field
    #[error("Logarithm of zero is undefined in GF(256)")]
    LogOfZero,
}

pub type QRResult<T> = Result<T, QRError>;
