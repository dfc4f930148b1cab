use core::fmt::Debug;

use crate::{error::DhtError, frame::RawFrame, model::Model};

/// Reading returned by the sensor.
///
/// Values are kept in tenths so every model shares one fixed-point convention.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    /// Relative humidity in tenths of a percent.
    pub humidity: u16,
    /// Temperature in tenths of a degree Celsius.
    pub temperature: i16,
}

impl Reading {
    /// Relative humidity in percent.
    pub fn humidity_percent(&self) -> f32 {
        self.humidity as f32 / 10.0
    }

    /// Temperature in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.temperature as f32 / 10.0
    }
}

/// 15-bit magnitude with a sign in bit 7 of the high byte.
fn signed_tenths(hi: u8, lo: u8) -> i16 {
    let magnitude = i16::from_be_bytes([hi & 0x7F, lo]);
    if hi & 0x80 != 0 { -magnitude } else { magnitude }
}

/// Converts a validated frame into a [`Reading`] using `model`'s layout.
///
/// The frame must already have passed `model.checksum()`.
pub fn decode<E: Debug>(model: Model, frame: &RawFrame) -> Result<Reading, DhtError<E>> {
    let bytes = frame.as_bytes();
    if bytes.len() < model.frame_len() {
        return Err(DhtError::Timeout);
    }

    let reading = match model {
        Model::None => return Err(DhtError::UnsupportedModel(model)),
        Model::Dht11 => {
            // Bit 7 of the integer bytes is always zero on this part; masking
            // filters line noise. No sign handling.
            Reading {
                humidity: u16::from(bytes[0] & 0x7F) * 10,
                temperature: i16::from(bytes[2] & 0x7F) * 10,
            }
        }
        Model::Dht22 | Model::Dummy => Reading {
            humidity: u16::from_be_bytes([bytes[0] & 0x03, bytes[1]]),
            temperature: signed_tenths(bytes[2], bytes[3]),
        },
        Model::Dht12 => Reading {
            humidity: u16::from(bytes[0]) * 10 + u16::from(bytes[1]),
            temperature: i16::from(bytes[2]) * 10 + i16::from(bytes[3]),
        },
        Model::Am2320 => Reading {
            humidity: u16::from_be_bytes([bytes[2], bytes[3]]),
            temperature: signed_tenths(bytes[4], bytes[5]),
        },
    };

    trace!(
        "decoded {:?}: {} / {}",
        model,
        reading.humidity,
        reading.temperature
    );
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_ok(model: Model, bytes: &[u8]) -> Reading {
        let frame = RawFrame::from_slice(bytes).unwrap();
        decode::<()>(model, &frame).unwrap()
    }

    #[test]
    fn test_dht11() {
        let reading = decode_ok(Model::Dht11, &[0x32, 0x00, 0x15, 0x02, 0x49]);
        assert_eq!(
            reading,
            Reading {
                humidity: 500,
                temperature: 210,
            }
        );
    }

    #[test]
    fn test_dht11_masks_high_bit() {
        // No sign semantics: bit 7 is simply dropped
        let reading = decode_ok(Model::Dht11, &[0xB2, 0x00, 0x85, 0x00, 0x37]);
        assert_eq!(reading.humidity, 500);
        assert_eq!(reading.temperature, 50);
    }

    #[test]
    fn test_dht22_positive_temp() {
        // Humidity: 55.5% -> [0x02, 0x2B] => 555
        // Temperature: 24.6C -> [0x00, 0xF6] => 246
        let reading = decode_ok(Model::Dht22, &[0x02, 0x2B, 0x00, 0xF6, 0x23]);

        assert_eq!(
            reading,
            Reading {
                humidity: 555,
                temperature: 246,
            }
        );
        assert_eq!(reading.humidity_percent(), 55.5);
        assert_eq!(reading.celsius(), 24.6);
    }

    #[test]
    fn test_dht22_negative_temp() {
        // Clear sign bit: 0x80 & 0x7F = 0x00, so [0x00, 0x0A] = 10 => 1.0 then negated
        let reading = decode_ok(Model::Dht22, &[0x01, 0x90, 0x80, 0x0A, 0x1B]);

        assert_eq!(
            reading,
            Reading {
                humidity: 400,
                temperature: -10,
            }
        );
        assert_eq!(reading.celsius(), -1.0);
    }

    #[test]
    fn test_dht22_negative_zero() {
        let reading = decode_ok(Model::Dht22, &[0x01, 0x90, 0x80, 0x00, 0x11]);
        assert_eq!(reading.temperature, 0);
        assert!(reading.celsius().is_sign_positive());

        let reading = decode_ok(Model::Dht22, &[0x01, 0x90, 0x00, 0x00, 0x91]);
        assert_eq!(reading.temperature, 0);
    }

    #[test]
    fn test_dht22_masks_humidity_high_bits() {
        let reading = decode_ok(Model::Dht22, &[0xFF, 0xFF, 0x7F, 0xFF, 0x00]);
        assert_eq!(reading.humidity, 0x03FF);
        assert_eq!(reading.temperature, i16::MAX);
    }

    #[test]
    fn test_dht12() {
        let reading = decode_ok(Model::Dht12, &[0x32, 0x00, 0x15, 0x02, 0x49]);
        assert_eq!(reading.humidity_percent(), 50.0);
        assert_eq!(reading.celsius(), 21.2);
    }

    #[test]
    fn test_am2320() {
        // 50.0 %RH, 25.0C
        let reading = decode_ok(Model::Am2320, &[0x03, 0x04, 0x01, 0xF4, 0x00, 0xFA, 0, 0]);
        assert_eq!(
            reading,
            Reading {
                humidity: 500,
                temperature: 250,
            }
        );

        let reading = decode_ok(Model::Am2320, &[0x03, 0x04, 0xFF, 0xFF, 0x80, 0x65, 0, 0]);
        assert_eq!(reading.humidity, u16::MAX);
        assert_eq!(reading.temperature, -101);

        let reading = decode_ok(Model::Am2320, &[0x03, 0x04, 0x00, 0x00, 0x80, 0x00, 0, 0]);
        assert_eq!(reading.temperature, 0);
    }

    #[test]
    fn test_dummy_uses_fixed_point_layout() {
        assert_eq!(
            decode_ok(Model::Dummy, &[0x01, 0x90, 0x80, 0x0A, 0x1B]),
            decode_ok(Model::Dht22, &[0x01, 0x90, 0x80, 0x0A, 0x1B]),
        );
    }

    #[test]
    fn test_none_and_short_frames() {
        let frame = RawFrame::from([0; 5]);
        assert_eq!(
            decode::<()>(Model::None, &frame),
            Err(DhtError::UnsupportedModel(Model::None))
        );
        assert_eq!(decode::<()>(Model::Am2320, &frame), Err(DhtError::Timeout));
    }

    #[test]
    fn test_total_over_sign_byte() {
        for hi in 0..=u8::MAX {
            let reading = decode_ok(Model::Dht22, &[0, 0, hi, 0x01, 0]);
            let expected = i16::from(hi & 0x7F) * 256 + 1;
            if hi & 0x80 != 0 {
                assert_eq!(reading.temperature, -expected);
            } else {
                assert_eq!(reading.temperature, expected);
            }
        }
    }
}
