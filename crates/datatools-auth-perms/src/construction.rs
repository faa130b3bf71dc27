//! Result of building a lookup from profile data.

use crate::error::DegradedReason;

/// A value built from a user profile, tagged with whether the profile was
/// usable.
///
/// `Degraded` always carries a fail-closed value (no privileges, no
/// subscriptions) so callers can use it directly and treat malformed data
/// the same as missing permissions.
#[derive(Debug, Clone)]
pub enum Construction<T> {
    /// Built from the profile as given.
    Clean(T),
    /// Built empty because the profile could not be used.
    Degraded {
        /// The fallback value.
        value: T,
        /// Why the profile was not used.
        reason: DegradedReason,
    },
}

impl<T> Construction<T> {
    /// Wrap a fallback value with its reason.
    pub fn degraded(value: T, reason: DegradedReason) -> Self {
        Construction::Degraded { value, reason }
    }

    /// Whether the profile was unusable.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Construction::Degraded { .. })
    }

    /// Borrow the built value.
    pub fn value(&self) -> &T {
        match self {
            Construction::Clean(value) => value,
            Construction::Degraded { value, .. } => value,
        }
    }

    /// The degradation reason, if any.
    pub fn reason(&self) -> Option<&DegradedReason> {
        match self {
            Construction::Clean(_) => None,
            Construction::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Take the built value, discarding the reason.
    pub fn into_inner(self) -> T {
        self.into_parts().0
    }

    /// Split into the value and the optional reason.
    pub fn into_parts(self) -> (T, Option<DegradedReason>) {
        match self {
            Construction::Clean(value) => (value, None),
            Construction::Degraded { value, reason } => (value, Some(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_has_no_reason() {
        let c = Construction::Clean(7);
        assert!(!c.is_degraded());
        assert_eq!(c.reason(), None);
        assert_eq!(c.into_inner(), 7);
    }

    #[test]
    fn test_degraded_keeps_value_and_reason() {
        let c = Construction::degraded(1, DegradedReason::NotAList("string"));
        assert!(c.is_degraded());
        assert_eq!(*c.value(), 1);
        let (value, reason) = c.into_parts();
        assert_eq!(value, 1);
        assert_eq!(reason, Some(DegradedReason::NotAList("string")));
    }
}
