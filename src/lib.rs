//! Normalizes raw readings from several analog sensors onto a common
//! scale.
//!
//! Sensors rarely respond linearly, and no two respond identically. Each
//! sensor gets a table of raw readings taken at known reference points,
//! paired with the value those points should read as. A raw reading is
//! located between two breakpoints and linearly interpolated, so every
//! calibrated sensor reports the same value for the same stimulus.
//! Readings outside a table are clamped to its first or last value.
//!
//! - [`compensate`] and [`locate_segment`] do the interpolation on plain slices.
//! - [`CalibrationTable`] validates a (breakpoints, normalized) pair.
//! - [`Channel`] normalizes a single sensor.
//! - [`Bank`] configures up to [`MAX_CHANNELS`] sensors at once and reads
//!   and normalizes them together.
//!
//! Raw samples come from a [`SampleSource`], either a closure via
//! [`from_fn`] or an `embedded-hal` ADC via [`OneShotSource`].
//!
//! # Examples
//!
//! ```
//! use adc_normalizer::{from_fn, CalibrationTable, Channel, Segment};
//!
//! // Aperture values multiplied by ten (150 = f/15.0)
//! let aperture = [150, 124, 114, 106, 98, 88, 76, 64];
//! let sensor = [5, 9, 16, 24, 30, 47, 88, 127];
//!
//! let table = CalibrationTable::new(&sensor, &aperture).unwrap();
//! let mut channel = Channel::new(5, from_fn(|| 60), table);
//!
//! assert_eq!(channel.read(), Ok(85));
//! assert_eq!(channel.segment(), Some(Segment::Within(5)));
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod bank;
mod channel;
mod error;
mod interpolate;
mod source;
mod table;

pub use bank::{Bank, Config, Sensor};
pub use channel::Channel;
pub use error::{ConfigError, Error, TableError};
pub use interpolate::{compensate, interpolate, locate_segment, Segment};
pub use source::{from_fn, FromFn, OneShotSource, SampleSource};
pub use table::CalibrationTable;

/// The most channels a [`Bank`] can hold.
pub const MAX_CHANNELS: usize = 6;

/// The number of analog inputs. Sensor pins must be below this.
pub const ANALOG_INPUTS: u8 = 6;

// Every public type can be logged with `defmt` once its sample source can.
#[cfg(feature = "defmt")]
const _: () = {
    const fn assert_format<T: defmt::Format + ?Sized>() {}

    assert_format::<Bank<'static, u8>>();
    assert_format::<Config<'static, 'static, u8>>();
    assert_format::<Sensor<u8>>();
    assert_format::<Channel<'static, u8>>();
    assert_format::<CalibrationTable<'static>>();
    assert_format::<Segment>();
    assert_format::<ConfigError>();
    assert_format::<TableError>();
    assert_format::<Error<u8>>();
};
