//! Thread identifiers.

use core::fmt;

use static_assertions::const_assert_eq;

/// Process-wide identifier of a registered thread.
///
/// Identifiers are assigned from a monotonic counter starting at 1 and are
/// never reused within the lifetime of the process. The raw value `0` is
/// reserved as [`ThreadId::INVALID`], meaning "no thread".
// NOTE: The in-memory representation must stay a plain u32 for the C ABI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ThreadId(u32);

const_assert_eq!(size_of::<ThreadId>(), size_of::<u32>());

impl ThreadId {
    /// The reserved "no thread" identifier.
    pub const INVALID: ThreadId = ThreadId(0);

    /// Wraps a raw identifier, e.g. one received over the C ABI.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns `false` for [`ThreadId::INVALID`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for ThreadId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<ThreadId> for u32 {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_invalid_identifier() {
        assert_eq!(ThreadId::default(), ThreadId::INVALID);
        assert!(!ThreadId::from_raw(0).is_valid());
        assert!(ThreadId::from_raw(1).is_valid());
    }

    #[test]
    fn display_prefixes_the_raw_value() {
        assert_eq!(ThreadId::from_raw(42).to_string(), "#42");
        assert_eq!(u32::from(ThreadId::from_raw(42)), 42);
    }
}
