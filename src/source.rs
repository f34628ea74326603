use core::{cell::RefCell, convert::Infallible, marker::PhantomData};
use embedded_hal::adc::{Channel, OneShot};

/// A source of raw samples for a single sensor.
pub trait SampleSource {
    type Error;

    /// Takes one raw sample.
    fn read(&mut self) -> nb::Result<i32, Self::Error>;
}

impl<S> SampleSource for &mut S
where
    S: SampleSource + ?Sized,
{
    type Error = S::Error;

    fn read(&mut self) -> nb::Result<i32, Self::Error> {
        (**self).read()
    }
}

/// A [`SampleSource`] that calls a closure. Created by [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Returns a [`SampleSource`] that takes each sample by calling `f`.
///
/// # Examples
///
/// ```
/// use adc_normalizer::{from_fn, SampleSource};
///
/// let mut source = from_fn(|| 512);
///
/// assert_eq!(source.read(), Ok(512));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> i32,
{
    FromFn(f)
}

impl<F> SampleSource for FromFn<F>
where
    F: FnMut() -> i32,
{
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<i32, Self::Error> {
        Ok((self.0)())
    }
}

/// Samples one pin of an `embedded-hal` ADC.
///
/// The ADC is shared through a `RefCell` so that several sources, one
/// per pin, can take turns using it.
///
/// # Examples
///
/// ```
/// use adc_normalizer::{OneShotSource, SampleSource};
/// use core::cell::RefCell;
/// # use embedded_hal_mock::adc::{Mock, MockAdc, MockChan0, Transaction};
/// #
/// # let expectations: [Transaction<u16>; 1] = [Transaction::read(0, 614)];
/// # let adc = RefCell::new(Mock::new(&expectations));
/// # let pin = MockChan0 {};
///
/// let mut source = OneShotSource::<_, MockAdc, u16, _>::new(&adc, pin);
///
/// assert_eq!(source.read(), Ok(614));
/// ```
pub struct OneShotSource<'a, Adc, ADC, Word, Pin> {
    adc: &'a RefCell<Adc>,
    pin: Pin,
    _adc: PhantomData<fn() -> (ADC, Word)>,
}

impl<'a, Adc, ADC, Word, Pin> OneShotSource<'a, Adc, ADC, Word, Pin> {
    pub fn new(adc: &'a RefCell<Adc>, pin: Pin) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self {
            adc,
            pin,
            _adc: PhantomData,
        }
    }

    /// Destroys the source and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }
}

impl<'a, Adc, ADC, Word, Pin> SampleSource for OneShotSource<'a, Adc, ADC, Word, Pin>
where
    Word: Into<i32>,
    Pin: Channel<ADC>,
    Adc: OneShot<ADC, Word, Pin>,
{
    type Error = <Adc as OneShot<ADC, Word, Pin>>::Error;

    fn read(&mut self) -> nb::Result<i32, Self::Error> {
        let word = self.adc.borrow_mut().read(&mut self.pin)?;

        Ok(word.into())
    }
}
