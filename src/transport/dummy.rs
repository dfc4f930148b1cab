use core::convert::Infallible;

use crate::{
    checksum::additive, decode::Reading, error::DhtError, frame::RawFrame, model::Model,
};

use super::Transport;

/// Synthetic sensor that answers [`Model::Dummy`] with a fixed frame.
///
/// Useful on hosts without hardware and in tests of code built on [`Dht`](crate::Dht).
#[derive(Clone, Debug)]
pub struct Dummy {
    frame: [u8; 5],
    reads: u32,
}

impl Dummy {
    /// Serves `frame` as-is, checksum byte included.
    pub fn new(frame: [u8; 5]) -> Self {
        Dummy { frame, reads: 0 }
    }

    /// Serves a correctly checksummed frame that decodes to `reading`.
    ///
    /// Humidity is carried in 10 bits, so values above 102.3% wrap.
    pub fn from_reading(reading: Reading) -> Self {
        Self::new(encode(reading))
    }

    /// Replaces the served frame.
    pub fn set_frame(&mut self, frame: [u8; 5]) {
        self.frame = frame;
    }

    /// Serves a frame for `reading` from now on.
    pub fn set_reading(&mut self, reading: Reading) {
        self.frame = encode(reading);
    }

    /// Number of frames served so far.
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

fn encode(reading: Reading) -> [u8; 5] {
    let [h_hi, h_lo] = (reading.humidity & 0x03FF).to_be_bytes();
    let [t_hi, t_lo] = (reading.temperature.unsigned_abs() & 0x7FFF).to_be_bytes();
    let sign = if reading.temperature < 0 { 0x80 } else { 0x00 };

    let mut frame = [h_hi, h_lo, t_hi | sign, t_lo, 0];
    frame[4] = additive(&frame[..4]);
    frame
}

impl Transport for Dummy {
    type Error = Infallible;

    fn read_frame(&mut self, model: Model) -> Result<RawFrame, DhtError<Infallible>> {
        if model != Model::Dummy {
            return Err(DhtError::UnsupportedModel(model));
        }
        self.reads += 1;
        Ok(RawFrame::from(self.frame))
    }

    fn candidates(&self) -> &[Model] {
        &[Model::Dummy]
    }
}
