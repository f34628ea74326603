use crate::{
    channel::Channel,
    error::{ConfigError, Error, TableError},
    interpolate::Segment,
    source::SampleSource,
    table::CalibrationTable,
    ANALOG_INPUTS, MAX_CHANNELS,
};
use heapless::Vec;

/// A sensor to be added to a [`Bank`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sensor<S> {
    /// External identifier, usually the analog pin number. Must be less
    /// than [`ANALOG_INPUTS`].
    pub pin: u8,
    pub source: S,
}

/// Configuration for a [`Bank`].
///
/// - `sensor_count`: The number of channels to configure, at most [`MAX_CHANNELS`]
/// - `sensors`: The pin and sample source of each channel
/// - `vector_size`: The number of points in each calibration table (at least 2)
/// - `calibration`: The ascending raw breakpoints of each channel
/// - `normalized`: The normalized values shared by all channels
///
/// Only the first `sensor_count` sensors and calibration tables, and the
/// first `vector_size` points of each table, are used.
///
/// The tables themselves are borrowed for `'a` by the configured [`Bank`].
/// The list referring to them is only borrowed for `'c`, the duration of
/// [`configure`](Bank::configure).
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config<'a, 'c, S> {
    pub sensor_count: usize,
    pub sensors: Option<Vec<Sensor<S>, MAX_CHANNELS>>,
    pub vector_size: usize,
    pub calibration: &'c [Option<&'a [i32]>],
    pub normalized: Option<&'a [i32]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Status {
    Unconfigured,
    Ready,
    Failed(ConfigError),
}

/// A fixed-capacity set of sensors normalized onto a common scale.
///
/// A bank does nothing until [`configure`](Bank::configure) succeeds.
/// After that, each [`read`](Bank::read) takes one raw sample per
/// channel and each [`normalize`](Bank::normalize) converts the stored
/// samples using the channel's calibration table.
///
/// # Examples
///
/// ```
/// use adc_normalizer::{from_fn, Bank, Config, Sensor};
/// use heapless::Vec;
///
/// let aperture = [150, 98, 64, 32];
/// let data1 = [5, 30, 88, 499];
/// let data2 = [7, 47, 141, 616];
/// let calibration = [Some(&data1[..]), Some(&data2[..])];
///
/// let source = from_fn(|| 47);
/// let mut sensors = Vec::new();
/// sensors.push(Sensor { pin: 5, source: source.clone() }).ok();
/// sensors.push(Sensor { pin: 4, source }).ok();
///
/// let mut bank = Bank::new();
/// bank.configure(Config {
///     sensor_count: 2,
///     sensors: Some(sensors),
///     vector_size: 4,
///     calibration: &calibration,
///     normalized: Some(&aperture),
/// })
/// .unwrap();
///
/// bank.read_and_normalize().unwrap();
///
/// assert_eq!(bank.value(0), Some(89));
/// assert_eq!(bank.value(1), Some(98));
/// assert_eq!(bank.index_of(4), Some(1));
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bank<'a, S> {
    channels: Vec<Channel<'a, S>, MAX_CHANNELS>,
    vector_size: usize,
    status: Status,
}

impl<'a, S> Default for Bank<'a, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S> Bank<'a, S> {
    /// Returns an unconfigured bank.
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
            vector_size: 0,
            status: Status::Unconfigured,
        }
    }

    /// Validates `config` and, if it is valid, replaces all channels with
    /// the ones it describes.
    ///
    /// Checks run in this order and stop at the first failure:
    ///
    /// 1. `sensor_count` is at most [`MAX_CHANNELS`]
    /// 2. `sensors` is present
    /// 3. there are `sensor_count` sensors, each with a pin below [`ANALOG_INPUTS`]
    /// 4. `vector_size` is at least 2
    /// 5. there are `sensor_count` calibration tables, none of them absent
    /// 6. `normalized` is present
    /// 7. each channel's tables hold `vector_size` points with ascending breakpoints
    ///
    /// On failure the bank keeps no channels and reports the reason from
    /// [`status`](Bank::status) until it is configured again.
    pub fn configure(&mut self, config: Config<'a, '_, S>) -> Result<(), ConfigError> {
        self.channels.clear();
        self.vector_size = 0;

        let vector_size = config.vector_size;
        match Self::channels_for(config) {
            Ok(channels) => {
                debug!(
                    "configured {} channels with vector size {}",
                    channels.len(),
                    vector_size
                );

                self.channels = channels;
                self.vector_size = vector_size;
                self.status = Status::Ready;
                Ok(())
            }
            Err(reason) => {
                warn!("configuration rejected: {}", reason);

                self.status = Status::Failed(reason);
                Err(reason)
            }
        }
    }

    fn channels_for(
        config: Config<'a, '_, S>,
    ) -> Result<Vec<Channel<'a, S>, MAX_CHANNELS>, ConfigError> {
        let Config {
            sensor_count,
            sensors,
            vector_size,
            calibration,
            normalized,
        } = config;

        if sensor_count > MAX_CHANNELS {
            return Err(ConfigError::BadSensorCount);
        }

        let sensors = sensors.ok_or(ConfigError::NoSensorList)?;

        if sensors.len() < sensor_count
            || sensors
                .iter()
                .take(sensor_count)
                .any(|sensor| sensor.pin >= ANALOG_INPUTS)
        {
            return Err(ConfigError::BadPinNumber);
        }

        if vector_size < 2 {
            return Err(ConfigError::BadVectorSize);
        }

        let calibration: Vec<&'a [i32], MAX_CHANNELS> = calibration
            .iter()
            .take(sensor_count)
            .map(|table| table.ok_or(ConfigError::MissingCalibrationVector))
            .collect::<Result<_, _>>()?;

        if calibration.len() < sensor_count {
            return Err(ConfigError::MissingCalibrationVector);
        }

        let normalized = normalized.ok_or(ConfigError::MissingNormalizedVector)?;

        sensors
            .into_iter()
            .zip(calibration)
            .enumerate()
            .map(|(channel, (sensor, breakpoints))| {
                calibration_table(breakpoints, normalized, vector_size)
                    .map(|table| Channel::new(sensor.pin, sensor.source, table))
                    .map_err(|reason| ConfigError::InvalidTable { channel, reason })
            })
            .collect()
    }

    /// `Ok` once configured, otherwise the reason the bank is not ready.
    pub fn status(&self) -> Result<(), ConfigError> {
        match self.status {
            Status::Ready => Ok(()),
            Status::Unconfigured => Err(ConfigError::Uninitialized),
            Status::Failed(reason) => Err(reason),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == Status::Ready
    }

    /// Number of configured channels.
    pub fn sensor_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of points in each calibration table, or 0 when not ready.
    pub fn vector_size(&self) -> usize {
        self.vector_size
    }

    pub fn channels(&self) -> &[Channel<'a, S>] {
        &self.channels
    }

    /// The last raw reading of `channel`.
    pub fn raw_value(&self, channel: usize) -> Option<i32> {
        self.channels.get(channel).map(Channel::raw_value)
    }

    /// The last normalized value of `channel`.
    pub fn value(&self, channel: usize) -> Option<i32> {
        self.channels.get(channel).map(Channel::value)
    }

    /// The segment used for the last normalized value of `channel`.
    pub fn segment(&self, channel: usize) -> Option<Segment> {
        self.channels.get(channel).and_then(Channel::segment)
    }

    /// The last raw reading of every channel, in channel order.
    pub fn raw_values(&self) -> impl Iterator<Item = i32> + '_ {
        self.channels.iter().map(Channel::raw_value)
    }

    /// The last normalized value of every channel, in channel order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.channels.iter().map(Channel::value)
    }

    /// Returns the index of the channel reading `pin`, or `None` if there
    /// is no such channel or the bank is not ready.
    pub fn index_of(&self, pin: u8) -> Option<usize> {
        if !self.is_ready() {
            return None;
        }

        self.channels.iter().position(|channel| channel.pin() == pin)
    }

    /// Takes one raw sample from every channel.
    ///
    /// Sources that are not ready yet are polled until they are. If any
    /// source fails, no stored reading changes.
    pub fn read(&mut self) -> Result<(), Error<S::Error>>
    where
        S: SampleSource,
    {
        self.status()?;

        let mut samples = [0; MAX_CHANNELS];
        for (index, channel) in self.channels.iter_mut().enumerate() {
            samples[index] = nb::block!(channel.sample()).map_err(|error| {
                warn!("failed to sample channel {}", index);
                Error::Sample {
                    channel: index,
                    error,
                }
            })?;
        }

        for (channel, sample) in self.channels.iter_mut().zip(samples) {
            channel.store(sample);
        }

        Ok(())
    }

    /// Normalizes the last raw reading of every channel.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        self.status()?;

        for channel in self.channels.iter_mut() {
            channel.normalize();
        }

        Ok(())
    }

    /// [`read`](Bank::read) followed by [`normalize`](Bank::normalize).
    /// Nothing is normalized if the read fails.
    pub fn read_and_normalize(&mut self) -> Result<(), Error<S::Error>>
    where
        S: SampleSource,
    {
        self.read()?;
        self.normalize()?;

        Ok(())
    }

    /// Destroys the bank and returns the source of each channel.
    pub fn free(self) -> Vec<S, MAX_CHANNELS> {
        self.channels.into_iter().map(Channel::free).collect()
    }
}

fn calibration_table<'a>(
    breakpoints: &'a [i32],
    normalized: &'a [i32],
    vector_size: usize,
) -> Result<CalibrationTable<'a>, TableError> {
    match (breakpoints.get(..vector_size), normalized.get(..vector_size)) {
        (Some(breakpoints), Some(normalized)) => CalibrationTable::new(breakpoints, normalized),
        _ => Err(TableError::NotEnoughData),
    }
}
