/// Identifier for a snapshot in a [`crate::gallery::Gallery`].
///
/// Ids are assigned monotonically and are unique within the lifetime
/// of a given `Gallery` instance.
pub type SnapshotId = u64;

/// Millisecond timestamp, as supplied by the host (e.g. unix epoch
/// millis). The core never reads a clock itself; callers pass
/// timestamps in so that generation and capture stay deterministic
/// under test.
pub type TimestampMs = u64;
