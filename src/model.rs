use crate::checksum::Checksum;

/// Sensor models understood by the driver.
///
/// Picking a model fixes the wakeup timing, the number of leading zero bits used
/// to calibrate the single-wire decoder, the frame length, the checksum and the
/// decode rule.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    /// No model selected (yet), or auto-detection found nothing.
    #[default]
    None,
    /// Synthetic sensor served by [`Dummy`](crate::transport::Dummy).
    Dummy,
    /// Single-wire, whole-number bytes (DHT11).
    Dht11,
    /// Single-wire, 16-bit tenths with a sign bit (DHT21, DHT22, DHT33, DHT44, AM2302).
    Dht22,
    /// I2C, decimal-coded integer and fraction bytes.
    Dht12,
    /// I2C, 16-bit tenths with a sign bit, CRC-16/MODBUS protected.
    Am2320,
}

/// How a model is physically reached.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interface {
    /// No sensor.
    None,
    /// Served in software, see [`Dummy`](crate::transport::Dummy).
    Synthetic,
    /// Bit-banged on one open-drain GPIO line.
    SingleWire,
    /// I2C.
    Bus,
}

impl Model {
    /// Duration the host holds the line low to wake a single-wire sensor.
    pub const fn wakeup_ms(self) -> u32 {
        match self {
            Model::Dht11 => 18,
            _ => 1,
        }
    }

    /// Number of leading frame bits that are always zero.
    pub const fn leading_zero_bits(self) -> u8 {
        match self {
            Model::Dht11 => 1,
            _ => 6,
        }
    }

    /// Number of bytes in one frame, checksum included.
    pub const fn frame_len(self) -> usize {
        match self {
            Model::Am2320 => 8,
            _ => 5,
        }
    }

    /// Integrity check protecting the frame.
    pub const fn checksum(self) -> Checksum {
        match self {
            Model::Am2320 => Checksum::Crc16Modbus,
            _ => Checksum::Additive,
        }
    }

    /// Transport family the model is reached through.
    pub const fn interface(self) -> Interface {
        match self {
            Model::None => Interface::None,
            Model::Dummy => Interface::Synthetic,
            Model::Dht11 | Model::Dht22 => Interface::SingleWire,
            Model::Dht12 | Model::Am2320 => Interface::Bus,
        }
    }

    /// Minimum time to wait between two reads, in milliseconds.
    ///
    /// Reading faster than this returns stale data or fails the handshake.
    pub const fn min_interval_ms(self) -> u32 {
        match self {
            Model::None | Model::Dummy => 0,
            Model::Dht11 => 1000,
            Model::Dht22 | Model::Dht12 | Model::Am2320 => 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_wire_timing() {
        assert_eq!(Model::Dht11.wakeup_ms(), 18);
        assert_eq!(Model::Dht11.leading_zero_bits(), 1);
        assert_eq!(Model::Dht22.wakeup_ms(), 1);
        assert_eq!(Model::Dht22.leading_zero_bits(), 6);
    }

    #[test]
    fn test_frame_layout() {
        assert_eq!(Model::Am2320.frame_len(), 8);
        assert_eq!(Model::Am2320.checksum(), Checksum::Crc16Modbus);

        for model in [Model::Dummy, Model::Dht11, Model::Dht22, Model::Dht12] {
            assert_eq!(model.frame_len(), 5);
            assert_eq!(model.checksum(), Checksum::Additive);
        }
    }

    #[test]
    fn test_interfaces() {
        assert_eq!(Model::default(), Model::None);
        assert_eq!(Model::None.interface(), Interface::None);
        assert_eq!(Model::Dummy.interface(), Interface::Synthetic);
        assert_eq!(Model::Dht22.interface(), Interface::SingleWire);
        assert_eq!(Model::Am2320.interface(), Interface::Bus);
        assert_eq!(Model::Dht11.min_interval_ms(), 1000);
        assert_eq!(Model::Am2320.min_interval_ms(), 2000);
    }
}
