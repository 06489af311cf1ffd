//! # Stream configuration.
//!
//! Provides [`StreamConfig`], the per-host settings applied to every stream
//! it creates. Used in two ways:
//! 1. **Host creation**: `StreamHost::with_config(config)`
//! 2. **Direct stream construction** inside the crate (tests)

/// Settings applied to every stream a host creates.
///
/// ## Field semantics
/// - `min_capacity`: floor for the event buffer's backing capacity. Growth
///   always rounds up to a power of two, so values that are not powers of two
///   are rounded up (`min_capacity_clamped`).
#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Capacity floor for a stream's event buffer.
    ///
    /// Streams that stay small waste at most this many record slots; streams
    /// that grow large skip the first few reallocation rounds.
    pub min_capacity: usize,
}

impl StreamConfig {
    /// Returns the capacity floor clamped to a power of two, at least 1.
    #[inline]
    pub fn min_capacity_clamped(&self) -> usize {
        self.min_capacity.next_power_of_two().max(1)
    }
}

impl Default for StreamConfig {
    /// Default configuration:
    ///
    /// - `min_capacity = 64`
    fn default() -> Self {
        Self { min_capacity: 64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_floor() {
        assert_eq!(StreamConfig::default().min_capacity_clamped(), 64);
    }

    #[test]
    fn test_clamp_rounds_up() {
        assert_eq!(StreamConfig { min_capacity: 0 }.min_capacity_clamped(), 1);
        assert_eq!(StreamConfig { min_capacity: 3 }.min_capacity_clamped(), 4);
        assert_eq!(StreamConfig { min_capacity: 64 }.min_capacity_clamped(), 64);
    }
}
