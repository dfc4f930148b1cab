use core::fmt::Debug;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::{
    error::{DhtError, ReadStatus},
    frame::RawFrame,
    model::{Interface, Model},
    timing::{Exclusive, NoopWindow, TimingWindow},
};

use super::Transport;

/// Spin-loop budget used when the core clock is not known.
pub const DEFAULT_LOOP_BUDGET: u32 = 1000;

const BITS_PER_FRAME: u8 = 40;

/// Timing configuration of the single-wire decoder.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleWireConfig {
    /// Number of pin polls after which a wait is abandoned.
    ///
    /// The wait for the sensor's first response uses twice this budget. A single
    /// data bit, low and high phase together, must complete within it.
    pub loop_budget: u32,
}

impl Default for SingleWireConfig {
    fn default() -> Self {
        SingleWireConfig {
            loop_budget: DEFAULT_LOOP_BUDGET,
        }
    }
}

impl SingleWireConfig {
    /// Derives the loop budget from the core clock frequency.
    pub const fn for_clock_hz(hz: u32) -> Self {
        let loop_budget = hz / 40_000;
        SingleWireConfig {
            loop_budget: if loop_budget == 0 { 1 } else { loop_budget },
        }
    }
}

/// Bit-banged transport for DHT11/DHT22 style sensors.
///
/// The pin must be open-drain with a pull-up: `set_low` drives the line,
/// `set_high` releases it so the sensor can answer.
pub struct SingleWire<PIN, D, W = NoopWindow> {
    pin: PIN,
    delay: D,
    window: W,
    config: SingleWireConfig,
}

impl<PIN, D> SingleWire<PIN, D> {
    /// Creates a transport that does not mask interrupts while decoding.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the sensor data line. Must support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(pin: PIN, delay: D) -> Self {
        Self::with_window(pin, delay, NoopWindow)
    }
}

impl<PIN, D, W> SingleWire<PIN, D, W> {
    /// Creates a transport that holds `window` for the duration of every decode.
    pub fn with_window(pin: PIN, delay: D, window: W) -> Self {
        SingleWire {
            pin,
            delay,
            window,
            config: SingleWireConfig::default(),
        }
    }

    /// Replaces the timing configuration.
    pub fn with_config(mut self, config: SingleWireConfig) -> Self {
        self.config = config;
        self
    }

    /// Current timing configuration.
    pub fn config(&self) -> SingleWireConfig {
        self.config
    }

    /// Gives back the pin, delay and window.
    pub fn release(self) -> (PIN, D, W) {
        (self.pin, self.delay, self.window)
    }
}

impl<PIN, D, W, E> SingleWire<PIN, D, W>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
    W: TimingWindow,
    E: Debug,
{
    /// Releases the line and decodes one frame while holding the timing window.
    fn transfer(
        pin: &mut PIN,
        window: &mut W,
        budget: u32,
        leading_zero_bits: u8,
    ) -> Result<[u8; 5], DhtError<E>> {
        let _window = Exclusive::enter(window);

        pin.set_high()?;
        Self::handshake(pin, budget)?;
        Self::read_bits(pin, budget, leading_zero_bits)
    }

    /// Waits for the sensor to take the line and send its 80us low / 80us high answer.
    fn handshake(pin: &mut PIN, budget: u32) -> Result<(), DhtError<E>> {
        spin_while(budget.saturating_mul(2), || pin.is_high(), DhtError::Connect)?;
        spin_while(budget, || pin.is_low(), DhtError::AckLow)?;
        spin_while(budget, || pin.is_high(), DhtError::AckHigh)
    }

    /// Reads 40 bits, MSB first.
    ///
    /// Each bit ends on a falling edge; the number of polls since the previous
    /// edge is the bit period. The leading bits are known zeros and calibrate the
    /// longest zero period (`zero_loop`, kept as the remaining budget). Later
    /// bits whose period exceeds it by at least a quarter are ones. Only the
    /// ratio of the two pulse widths matters, not the poll rate.
    fn read_bits(
        pin: &mut PIN,
        budget: u32,
        leading_zero_bits: u8,
    ) -> Result<[u8; 5], DhtError<E>> {
        let mut frame = [0u8; 5];
        let mut index = 0;
        let mut mask: u8 = 0x80;

        let calibrated_below = BITS_PER_FRAME - leading_zero_bits.min(BITS_PER_FRAME);
        let mut zero_loop = budget;
        let mut delta = 0;

        let mut bits_left = BITS_PER_FRAME;
        let mut remaining = budget;
        // The handshake ends with the line low.
        let mut was_low = true;

        loop {
            let low = pin.is_low()?;
            if low && !was_low {
                if bits_left > calibrated_below {
                    zero_loop = zero_loop.min(remaining);
                    delta = (budget - zero_loop) / 4;
                } else if remaining <= zero_loop.saturating_sub(delta) {
                    frame[index] |= mask;
                }

                mask >>= 1;
                if mask == 0 {
                    mask = 0x80;
                    index += 1;
                }

                bits_left -= 1;
                if bits_left == 0 {
                    return Ok(frame);
                }
                remaining = budget;
            }
            was_low = low;

            remaining -= 1;
            if remaining == 0 {
                return Err(DhtError::Timeout);
            }
        }
    }
}

/// Polls `condition` until it turns false, at most `budget` times.
fn spin_while<E, F>(budget: u32, mut condition: F, timeout: DhtError<E>) -> Result<(), DhtError<E>>
where
    E: Debug,
    F: FnMut() -> Result<bool, E>,
{
    let mut remaining = budget;
    while condition()? {
        remaining -= 1;
        if remaining == 0 {
            return Err(timeout);
        }
    }
    Ok(())
}

impl<PIN, D, W, E> Transport for SingleWire<PIN, D, W>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
    W: TimingWindow,
    E: Debug,
{
    type Error = E;

    fn read_frame(&mut self, model: Model) -> Result<RawFrame, DhtError<E>> {
        if model.interface() != Interface::SingleWire {
            return Err(DhtError::UnsupportedModel(model));
        }
        let budget = self.config.loop_budget.max(1);

        // MCU sends start request
        self.pin.set_low()?;
        self.delay.delay_ms(model.wakeup_ms());

        match Self::transfer(
            &mut self.pin,
            &mut self.window,
            budget,
            model.leading_zero_bits(),
        ) {
            Ok(bytes) => Ok(RawFrame::from(bytes)),
            Err(error) => {
                debug!("single-wire transfer failed: {:?}", ReadStatus::from(&error));
                Err(error)
            }
        }
    }
}
