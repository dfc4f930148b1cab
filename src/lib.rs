//! DHT Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT family of temperature
//! and humidity sensors, built on top of the [`embedded-hal`] traits.
//!
//! # Supported sensors
//! - DHT11 and DHT22 (AM2302, DHT21/33/44) over the bit-banged single-wire protocol
//! - DHT12 and AM2320 over I2C, with automatic detection of which one is present
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Single-wire decoder that calibrates its bit threshold from the frame itself,
//!   so it does not depend on the speed of the host's pin polling
//! - Last good reading kept across failed reads
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access
//! - [`I2c`] for the bus sensors
//! - [`DelayNs`] for accurate timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs through `defmt`
//! - `log`: Logs through the `log` facade
//!
//! # Example
//!
//! ```
//! use dhtxx_sensor::{Dht, Model, ReadStatus, Reading, transport::Dummy};
//!
//! let sensor = Dummy::from_reading(Reading { humidity: 455, temperature: 213 });
//! let mut dht = Dht::new(sensor, Model::None);
//!
//! assert_eq!(dht.begin(), Model::Dummy);
//! assert_eq!(dht.read(), ReadStatus::Ok);
//! assert_eq!(dht.humidity(), Some(45.5));
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod checksum;
pub mod decode;
pub mod error;
pub mod frame;
pub mod model;
pub mod sensor;
pub mod timing;
pub mod transport;

pub use checksum::Checksum;
pub use decode::Reading;
pub use error::{DhtError, ReadStatus};
pub use frame::RawFrame;
pub use model::Model;
pub use sensor::{Dht, State};
pub use timing::{NoopWindow, TimingWindow};
