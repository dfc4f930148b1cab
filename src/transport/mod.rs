//! Ways of getting a raw frame out of a sensor.
//!
//! Each transport only moves bytes: validation and decoding happen in
//! [`Dht`](crate::Dht), which is generic over [`Transport`].

use core::fmt::Debug;

use crate::{error::DhtError, frame::RawFrame, model::Model};

pub mod bus;
pub mod dummy;
pub mod single_wire;

pub use bus::{Bus, BusConfig};
pub use dummy::Dummy;
pub use single_wire::{SingleWire, SingleWireConfig};

/// A link to a sensor that can produce one raw frame per call.
pub trait Transport {
    /// Error type of the underlying HAL peripheral.
    type Error: Debug;

    /// Performs one transaction and returns the frame for `model`.
    ///
    /// Returns [`DhtError::UnsupportedModel`] if `model` cannot be reached over
    /// this transport.
    fn read_frame(&mut self, model: Model) -> Result<RawFrame, DhtError<Self::Error>>;

    /// Models to probe, in order, when no model was selected up front.
    fn candidates(&self) -> &[Model] {
        &[]
    }
}
