use crc::{CRC_16_MODBUS, Crc};

const MODBUS: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Frame integrity check used by a sensor model.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checksum {
    /// `byte[4]` is the truncated sum of `byte[0..4]`.
    Additive,
    /// CRC-16/MODBUS appended little-endian; the CRC over the whole frame is zero.
    Crc16Modbus,
}

impl Checksum {
    /// Returns `true` if `frame` passes this check.
    pub fn verify(self, frame: &[u8]) -> bool {
        match self {
            Checksum::Additive => frame.len() >= 5 && additive(&frame[..4]) == frame[4],
            Checksum::Crc16Modbus => frame.len() > 2 && crc16_modbus(frame) == 0,
        }
    }

    /// Check value carried by `frame` and the one computed over its payload,
    /// or `None` if the frame is too short to carry one.
    pub fn received_and_expected(self, frame: &[u8]) -> Option<(u16, u16)> {
        match self {
            Checksum::Additive => {
                let received = *frame.get(4)?;
                Some((u16::from(received), u16::from(additive(&frame[..4]))))
            }
            Checksum::Crc16Modbus => match frame {
                [payload @ .., lo, hi] if !payload.is_empty() => {
                    Some((u16::from_le_bytes([*lo, *hi]), crc16_modbus(payload)))
                }
                _ => None,
            },
        }
    }
}

/// Wrapping 8-bit sum of `data`.
pub fn additive(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, v| sum.wrapping_add(*v))
}

/// CRC-16/MODBUS: poly 0xA001 (reflected 0x8005), init 0xFFFF, no final XOR.
#[inline]
pub fn crc16_modbus(data: &[u8]) -> u16 {
    MODBUS.checksum(data)
}
