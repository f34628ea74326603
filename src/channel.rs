use crate::{interpolate::Segment, source::SampleSource, table::CalibrationTable};

/// One sensor: a sample source paired with its calibration table, plus
/// the most recent raw reading and normalized value.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel<'a, S> {
    pin: u8,
    source: S,
    table: CalibrationTable<'a>,
    raw_value: i32,
    value: i32,
    segment: Option<Segment>,
}

impl<'a, S> Channel<'a, S> {
    /// Returns a channel reading `pin` through `source` and normalizing
    /// with `table`.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_normalizer::{from_fn, CalibrationTable, Channel};
    ///
    /// let aperture = [150, 98, 64, 32];
    /// let table = CalibrationTable::new(&[5, 30, 88, 499], &aperture).unwrap();
    ///
    /// let mut channel = Channel::new(5, from_fn(|| 47), table);
    ///
    /// assert_eq!(channel.read(), Ok(89));
    /// ```
    pub fn new(pin: u8, source: S, table: CalibrationTable<'a>) -> Self {
        Self {
            pin,
            source,
            table,
            raw_value: 0,
            value: 0,
            segment: None,
        }
    }

    /// Destroys the channel and returns the source.
    pub fn free(self) -> S {
        self.source
    }

    /// The external identifier of the sensor.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn table(&self) -> &CalibrationTable<'a> {
        &self.table
    }

    /// The last raw reading.
    pub fn raw_value(&self) -> i32 {
        self.raw_value
    }

    /// The last normalized value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The segment used for the last normalized value, or `None` if
    /// nothing has been normalized yet.
    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    /// Normalizes `raw_value` instead of a sample from the source, and
    /// returns the normalized value.
    pub fn set_raw_value(&mut self, raw_value: i32) -> i32 {
        self.raw_value = raw_value;
        self.normalize()
    }

    /// Takes a sample from the source, normalizes it, and returns the
    /// normalized value.
    ///
    /// Nothing is stored if the source returns an error.
    pub fn read(&mut self) -> nb::Result<i32, S::Error>
    where
        S: SampleSource,
    {
        let raw_value = self.sample()?;

        Ok(self.set_raw_value(raw_value))
    }

    pub(crate) fn sample(&mut self) -> nb::Result<i32, S::Error>
    where
        S: SampleSource,
    {
        self.source.read()
    }

    pub(crate) fn store(&mut self, raw_value: i32) {
        self.raw_value = raw_value;
    }

    pub(crate) fn normalize(&mut self) -> i32 {
        let (value, segment) = self.table.compensate(self.raw_value);
        trace!("pin {}: {} -> {}", self.pin, self.raw_value, value);

        self.value = value;
        self.segment = Some(segment);
        value
    }
}
