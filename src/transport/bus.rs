use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as _, ErrorKind, I2c},
};

use crate::{error::DhtError, frame::RawFrame, model::Model};

use super::Transport;

/// I2C address shared by the DHT12 and the AM2320.
pub const DEFAULT_ADDRESS: u8 = 0x5C;

/// Register the DHT12 starts reading from.
const DHT12_START_REGISTER: u8 = 0x00;

/// Function code 0x03 (read registers), start address 0x00, 4 registers.
const AM2320_READ_REQUEST: [u8; 3] = [0x03, 0x00, 0x04];

/// Echoed function code and byte count that start every AM2320 reply.
const AM2320_REPLY_HEADER: [u8; 2] = [0x03, 0x04];

/// The AM2320 needs at least 800us after the wake write.
const AM2320_WAKE_US: u32 = 1_000;
/// ...and at least 1.5ms between the read request and fetching the result.
const AM2320_CONVERSION_US: u32 = 1_600;

/// Configuration of the I2C transport.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// 7-bit I2C address of the sensor.
    pub address: u8,
    /// Models tried, in order, by [`Dht::begin`](crate::Dht::begin).
    pub probe_order: [Model; 2],
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            address: DEFAULT_ADDRESS,
            probe_order: [Model::Dht12, Model::Am2320],
        }
    }
}

/// I2C transport for the DHT12 and AM2320.
pub struct Bus<I2C, D> {
    i2c: I2C,
    delay: D,
    config: BusConfig,
}

impl<I2C, D> Bus<I2C, D> {
    /// Creates a transport at [`DEFAULT_ADDRESS`] probing DHT12 before AM2320.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, BusConfig::default())
    }

    /// Creates a transport with a custom address and probe order.
    pub fn with_config(i2c: I2C, delay: D, config: BusConfig) -> Self {
        Bus { i2c, delay, config }
    }

    /// Current configuration.
    pub fn config(&self) -> BusConfig {
        self.config
    }

    /// Gives back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Bus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn request(&mut self, command: &[u8]) -> Result<(), DhtError<I2C::Error>> {
        let address = self.config.address;
        self.i2c.write(address, command).map_err(|e| {
            debug!("write to {} failed", address);
            bus_error(e.kind())
        })
    }

    fn fetch<const N: usize>(&mut self) -> Result<[u8; N], DhtError<I2C::Error>> {
        let address = self.config.address;
        let mut buf = [0; N];
        self.i2c.read(address, &mut buf).map_err(|e| {
            debug!("{} did not deliver {} bytes", address, N);
            bus_error(e.kind())
        })?;
        Ok(buf)
    }

    fn read_dht12(&mut self) -> Result<RawFrame, DhtError<I2C::Error>> {
        self.request(&[DHT12_START_REGISTER])?;
        let bytes: [u8; 5] = self.fetch()?;
        Ok(RawFrame::from(bytes))
    }

    fn read_am2320(&mut self) -> Result<RawFrame, DhtError<I2C::Error>> {
        // The sensor sleeps between reads and does not acknowledge the wake write.
        let _ = self.i2c.write(self.config.address, &[]);
        self.delay.delay_us(AM2320_WAKE_US);

        self.request(&AM2320_READ_REQUEST)?;
        self.delay.delay_us(AM2320_CONVERSION_US);

        let bytes: [u8; 8] = self.fetch()?;
        if bytes[..2] != AM2320_REPLY_HEADER {
            warn!("unexpected AM2320 reply header {:?}", &bytes[..2]);
            return Err(DhtError::ChecksumMismatch);
        }
        Ok(RawFrame::from(bytes))
    }
}

/// A NACK means nothing answered at the address; anything else means the
/// transfer started but did not complete.
fn bus_error<E: core::fmt::Debug>(kind: ErrorKind) -> DhtError<E> {
    match kind {
        ErrorKind::NoAcknowledge(_) => DhtError::Connect,
        _ => DhtError::Timeout,
    }
}

impl<I2C, D> Transport for Bus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn read_frame(&mut self, model: Model) -> Result<RawFrame, DhtError<I2C::Error>> {
        match model {
            Model::Dht12 => self.read_dht12(),
            Model::Am2320 => self.read_am2320(),
            _ => Err(DhtError::UnsupportedModel(model)),
        }
    }

    fn candidates(&self) -> &[Model] {
        &self.config.probe_order
    }
}
