use core::fmt::Debug;

use crate::model::Model;

/// Possible errors from the DHT driver.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DhtError<E: Debug> {
    /// Timed out while reading the data bits, or the bus delivered fewer bytes than requested.
    #[error("timed out while reading the frame")]
    Timeout,
    /// Checksum did not match the received data.
    #[error("checksum did not match the received data")]
    ChecksumMismatch,
    /// The sensor never pulled the line low after wakeup, or the bus rejected the address.
    #[error("sensor did not respond")]
    Connect,
    /// The sensor's low acknowledgement pulse did not end in time.
    #[error("acknowledge low phase timed out")]
    AckLow,
    /// The sensor's high acknowledgement pulse did not end in time.
    #[error("acknowledge high phase timed out")]
    AckHigh,
    /// The transport cannot talk to this sensor model.
    #[error("model {0:?} is not served by this transport")]
    UnsupportedModel(Model),
    /// Error from the GPIO pin (input/output).
    #[error("pin error: {0:?}")]
    PinError(E),
}

impl<E: Debug> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

/// Outcome of a single sensor transaction.
///
/// This is the flat status reported by [`Dht::read`](crate::Dht::read). Exactly one
/// value is produced per transaction.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStatus {
    /// A valid frame was received and decoded.
    Ok,
    /// The frame failed its checksum.
    ErrorChecksum,
    /// The data bits, or the bus reply, did not arrive in time.
    ErrorTimeout,
    /// The sensor did not answer the wakeup or its address.
    ErrorConnect,
    /// The low acknowledgement pulse did not end in time.
    ErrorAckLow,
    /// The high acknowledgement pulse did not end in time.
    ErrorAckHigh,
    /// Pin failure or no usable model selected.
    ErrorUnknown,
}

impl ReadStatus {
    /// Returns `true` for [`ReadStatus::Ok`].
    pub fn is_ok(self) -> bool {
        self == ReadStatus::Ok
    }
}

impl<E: Debug> From<&DhtError<E>> for ReadStatus {
    fn from(error: &DhtError<E>) -> Self {
        match error {
            DhtError::Timeout => ReadStatus::ErrorTimeout,
            DhtError::ChecksumMismatch => ReadStatus::ErrorChecksum,
            DhtError::Connect => ReadStatus::ErrorConnect,
            DhtError::AckLow => ReadStatus::ErrorAckLow,
            DhtError::AckHigh => ReadStatus::ErrorAckHigh,
            DhtError::UnsupportedModel(_) | DhtError::PinError(_) => ReadStatus::ErrorUnknown,
        }
    }
}

impl<T, E: Debug> From<&Result<T, DhtError<E>>> for ReadStatus {
    fn from(result: &Result<T, DhtError<E>>) -> Self {
        match result {
            Ok(_) => ReadStatus::Ok,
            Err(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_phase() {
        let cases: [(DhtError<()>, ReadStatus); 7] = [
            (DhtError::Timeout, ReadStatus::ErrorTimeout),
            (DhtError::ChecksumMismatch, ReadStatus::ErrorChecksum),
            (DhtError::Connect, ReadStatus::ErrorConnect),
            (DhtError::AckLow, ReadStatus::ErrorAckLow),
            (DhtError::AckHigh, ReadStatus::ErrorAckHigh),
            (DhtError::UnsupportedModel(Model::None), ReadStatus::ErrorUnknown),
            (DhtError::PinError(()), ReadStatus::ErrorUnknown),
        ];

        for (error, status) in cases.iter() {
            assert_eq!(ReadStatus::from(error), *status);
        }
    }

    #[test]
    fn test_status_from_result() {
        let ok: Result<u8, DhtError<()>> = Ok(1);
        let failed: Result<u8, DhtError<()>> = Err(DhtError::AckHigh);

        assert!(ReadStatus::from(&ok).is_ok());
        assert_eq!(ReadStatus::from(&failed), ReadStatus::ErrorAckHigh);
    }

    #[test]
    fn test_pin_error_conversion() {
        let error: DhtError<u8> = 7u8.into();
        assert_eq!(error, DhtError::PinError(7));
    }
}
