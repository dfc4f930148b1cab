use crate::{
    decode::{Reading, decode},
    error::{DhtError, ReadStatus},
    model::Model,
    transport::{Bus, SingleWire, Transport},
};

/// Most models [`Dht::begin`] will try before giving up.
pub const MAX_PROBES: usize = 2;

/// Lifecycle of a [`Dht`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// No model selected.
    Uninitialized,
    /// A model is selected and no read has happened since.
    ModelSelected,
    /// The last read succeeded.
    ReadOk,
    /// The last read failed; the previous reading is still available.
    ReadFailed,
}

/// Driver for a DHT family temperature and humidity sensor.
///
/// Each [`read`](Dht::read) performs exactly one transaction over the transport,
/// validates the frame and decodes it. A failed read never touches the stored
/// reading.
pub struct Dht<T> {
    transport: T,
    model: Model,
    state: State,
    status: ReadStatus,
    reading: Option<Reading>,
}

impl<PIN, D> Dht<SingleWire<PIN, D>> {
    /// Creates a driver for a single-wire sensor on `pin`.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the sensor data line. Must support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `model` - Either [`Model::Dht11`] or [`Model::Dht22`].
    pub fn single_wire(pin: PIN, delay: D, model: Model) -> Self {
        Dht::new(SingleWire::new(pin, delay), model)
    }
}

impl<I2C, D> Dht<Bus<I2C, D>> {
    /// Creates a driver for an I2C sensor at the default address.
    ///
    /// The model is detected by [`begin`](Dht::begin).
    pub fn bus(i2c: I2C, delay: D) -> Self {
        Dht::new(Bus::new(i2c, delay), Model::None)
    }
}

impl<T> Dht<T> {
    /// Creates a driver over any [`Transport`]. Pass [`Model::None`] to detect
    /// the model in [`begin`](Dht::begin).
    pub fn new(transport: T, model: Model) -> Self {
        Dht {
            transport,
            model,
            state: Self::selected(model),
            status: ReadStatus::ErrorUnknown,
            reading: None,
        }
    }

    fn selected(model: Model) -> State {
        if model == Model::None {
            State::Uninitialized
        } else {
            State::ModelSelected
        }
    }

    /// Model used for reads.
    pub fn model(&self) -> Model {
        self.model
    }

    /// Selects `model` for subsequent reads. The last reading is kept.
    pub fn set_model(&mut self, model: Model) {
        self.model = model;
        self.state = Self::selected(model);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Status of the most recent transaction.
    pub fn last_status(&self) -> ReadStatus {
        self.status
    }

    /// Last successful reading, if any.
    pub fn reading(&self) -> Option<Reading> {
        self.reading
    }

    /// Last successfully read relative humidity in percent.
    pub fn humidity(&self) -> Option<f32> {
        self.reading.map(|r| r.humidity_percent())
    }

    /// Last successfully read temperature in degrees Celsius.
    pub fn temperature(&self) -> Option<f32> {
        self.reading.map(|r| r.celsius())
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Gives back the transport.
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T: Transport> Dht<T> {
    /// Prepares the driver and returns the model in use.
    ///
    /// With a model already selected this only confirms it. Otherwise the
    /// transport's candidates are read in order, at most [`MAX_PROBES`] of them;
    /// the first one that yields a valid reading is kept. If none does the model
    /// stays [`Model::None`].
    pub fn begin(&mut self) -> Model {
        if self.model != Model::None {
            if self.state == State::Uninitialized {
                self.state = State::ModelSelected;
            }
            return self.model;
        }

        let mut order = [Model::None; MAX_PROBES];
        for (slot, candidate) in order.iter_mut().zip(self.transport.candidates()) {
            *slot = *candidate;
        }

        for candidate in order.into_iter().filter(|m| *m != Model::None) {
            self.model = candidate;
            let status = self.read();
            debug!("probe {:?}: {:?}", candidate, status);
            if status.is_ok() {
                self.state = State::ModelSelected;
                return candidate;
            }
        }

        warn!("no sensor model answered");
        self.model = Model::None;
        self.state = State::Uninitialized;
        Model::None
    }

    /// Reads the sensor once and reports the outcome as a flat status.
    ///
    /// On [`ReadStatus::Ok`] the new values are available through
    /// [`reading`](Dht::reading); on any other status they are unchanged.
    pub fn read(&mut self) -> ReadStatus {
        ReadStatus::from(&self.try_read())
    }

    /// Like [`read`](Dht::read) but returns the reading or the detailed error.
    pub fn try_read(&mut self) -> Result<Reading, DhtError<T::Error>> {
        let result = self.acquire();
        self.status = ReadStatus::from(&result);

        match &result {
            Ok(reading) => {
                self.reading = Some(*reading);
                self.state = State::ReadOk;
            }
            Err(_) => {
                debug!("read of {:?} failed: {:?}", self.model, self.status);
                self.state = State::ReadFailed;
            }
        }
        result
    }

    /// Transport read, validation, decode.
    fn acquire(&mut self) -> Result<Reading, DhtError<T::Error>> {
        let model = self.model;
        if model == Model::None {
            return Err(DhtError::UnsupportedModel(model));
        }

        let frame = self.transport.read_frame(model)?;
        let checksum = model.checksum();
        if !checksum.verify(frame.as_bytes()) {
            match checksum.received_and_expected(frame.as_bytes()) {
                Some((received, expected)) => warn!(
                    "checksum mismatch for {:?}: received {:#x}, expected {:#x}",
                    model, received, expected
                ),
                None => warn!("frame too short for {:?}: {:?}", model, frame.as_bytes()),
            }
            return Err(DhtError::ChecksumMismatch);
        }

        decode(model, &frame)
    }
}
