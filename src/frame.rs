/// Largest frame any supported sensor sends.
pub const FRAME_CAPACITY: usize = 8;

/// Raw bytes received from a sensor, before validation.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; FRAME_CAPACITY],
    len: usize,
}

impl RawFrame {
    /// Copies `data` into a frame. Returns `None` if it does not fit.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() > FRAME_CAPACITY {
            return None;
        }
        let mut bytes = [0; FRAME_CAPACITY];
        bytes[..data.len()].copy_from_slice(data);
        Some(RawFrame {
            bytes,
            len: data.len(),
        })
    }

    /// The received bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of received bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl From<[u8; 5]> for RawFrame {
    fn from(data: [u8; 5]) -> Self {
        let mut bytes = [0; FRAME_CAPACITY];
        bytes[..5].copy_from_slice(&data);
        RawFrame { bytes, len: 5 }
    }
}

impl From<[u8; FRAME_CAPACITY]> for RawFrame {
    fn from(bytes: [u8; FRAME_CAPACITY]) -> Self {
        RawFrame {
            bytes,
            len: FRAME_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let frame = RawFrame::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(frame.as_bytes(), &[1, 2, 3]);
        assert_eq!(frame.len(), 3);
        assert!(!frame.is_empty());

        assert!(RawFrame::from_slice(&[0; 9]).is_none());
        assert!(RawFrame::from_slice(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_from_arrays() {
        let short = RawFrame::from([0x32, 0x00, 0x15, 0x02, 0x49]);
        assert_eq!(short.as_bytes(), &[0x32, 0x00, 0x15, 0x02, 0x49]);

        let long = RawFrame::from([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(long.len(), 8);
        assert_eq!(long.as_bytes()[7], 8);
    }
}
