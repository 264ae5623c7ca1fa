use crate::packet::MessageType;

/// Every error the core can raise, discriminated so a caller can inspect the
/// exact failure rather than match on a formatted string.
///
/// Propagation policy is flat: the core never retries or recovers on a
/// caller's behalf (see `EngineConfig` for the one exception, the bounded
/// zero-byte-read retry). Every variant that carries comparison data
/// (expected/actual opcodes, counters, raw device error codes) keeps it
/// structured.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The transport failed to write or read, or a write was short.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A read did not complete within the configured retry budget.
    #[error("timed out waiting for a response")]
    Timeout,

    /// The framer rejected the bytes read from the transport.
    #[error("malformed frame: {reason}")]
    MalformedFrame { reason: String },

    /// A response's `type` byte did not match what the transaction expected.
    #[error("unexpected packet: expected {expected:?}, got {actual:?}")]
    UnexpectedPacket {
        expected: MessageType,
        actual: MessageType,
    },

    /// A response's counter did not echo the counter of its request.
    #[error("out of sync response: expected counter {expected}, got {actual}")]
    OutOfSyncResponse { expected: u8, actual: u8 },

    /// A well-formed response reported a non-zero device error code.
    #[error("device reported operation failure (error code {code})")]
    DeviceOperationFailed { code: u32 },

    /// A constructor was given an argument the core cannot act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A structured payload failed to decode or encode.
    #[error("payload codec error: {0}")]
    Decode(#[from] scroll::Error),

    /// A frame would have exceeded the one-byte `length` field's range.
    #[error("frame of {len} bytes exceeds the protocol's 255-byte length field")]
    FrameTooLarge { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
