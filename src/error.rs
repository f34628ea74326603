/// Reasons a calibration table is rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Fewer than two points, so there is no segment to interpolate on.
    #[error("calibration table needs at least two points")]
    NotEnoughData,
    /// The raw breakpoints are not strictly ascending.
    #[error("calibration breakpoints are not strictly ascending")]
    SegmentsNotAscending,
    /// The breakpoint and normalized sequences differ in length.
    #[error("breakpoint and normalized tables differ in length")]
    LengthMismatch,
}

/// Reasons a [`Bank`](crate::Bank) is not ready.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `configure` has not been called yet.
    #[error("bank has not been configured")]
    Uninitialized,
    #[error("sensor count exceeds the channel capacity")]
    BadSensorCount,
    #[error("no sensor list was provided")]
    NoSensorList,
    /// A sensor is missing from the list or its pin is out of range.
    #[error("sensor pin is missing or out of range")]
    BadPinNumber,
    #[error("vector size must be at least two")]
    BadVectorSize,
    #[error("a channel has no calibration table")]
    MissingCalibrationVector,
    #[error("no normalized table was provided")]
    MissingNormalizedVector,
    /// The tables for `channel` do not form a valid calibration table.
    #[error("invalid calibration table for channel {channel}: {reason}")]
    InvalidTable { channel: usize, reason: TableError },
}

/// Errors returned when reading a [`Bank`](crate::Bank).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bank is unconfigured or its last configuration failed.
    #[error("bank is not ready: {0}")]
    NotReady(#[from] ConfigError),
    /// The sample source for `channel` returned an error.
    #[error("failed to sample channel {channel}")]
    Sample { channel: usize, error: E },
}
