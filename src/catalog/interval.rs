//! Half-open time window attached to a slot.

use qtty::{Quantity, Unit};

/// Half-open range `[start, end)` covered by a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<U: Unit> {
    start: Quantity<U>,
    end: Quantity<U>,
}

impl<U: Unit> Interval<U> {
    /// Creates interval `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: Quantity<U>, end: Quantity<U>) -> Self {
        assert!(
            start.value() <= end.value(),
            "Interval start must be <= end"
        );
        Self { start, end }
    }

    /// Creates interval `[start, end)`, returning `None` if `start > end` or
    /// either bound is NaN.
    pub fn try_new(start: Quantity<U>, end: Quantity<U>) -> Option<Self> {
        if start.value() <= end.value() {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn from_f64(start: f64, end: f64) -> Self {
        Self::new(Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    pub fn start(&self) -> Quantity<U> {
        self.start
    }

    pub fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start.value() >= self.end.value()
    }

    /// Returns true if this window ends no later than `other` starts.
    pub fn precedes(&self, other: &Interval<U>) -> bool {
        self.end.value() <= other.start.value()
    }
}

// =============================================================================
// Interval Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Interval<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Interval<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: f64,
            end: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(Quantity::<U>::new(raw.start), Quantity::<U>::new(raw.end))
            .ok_or_else(|| serde::de::Error::custom("interval start must be <= end"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Minute;

    #[test]
    fn test_interval_creation() {
        let window = Interval::<Minute>::from_f64(1080.0, 1140.0);
        assert_eq!(window.start().value(), 1080.0);
        assert_eq!(window.end().value(), 1140.0);
        assert!(!window.is_empty());
        assert!(Interval::<Minute>::from_f64(60.0, 60.0).is_empty());
    }

    #[test]
    fn test_try_new_rejects_reversed_bounds() {
        let reversed =
            Interval::try_new(Quantity::<Minute>::new(10.0), Quantity::<Minute>::new(5.0));
        assert!(reversed.is_none());
    }

    #[test]
    fn test_back_to_back_windows_are_ordered() {
        let first = Interval::<Minute>::from_f64(0.0, 60.0);
        let second = Interval::<Minute>::from_f64(60.0, 120.0);
        let straddling = Interval::<Minute>::from_f64(30.0, 90.0);

        assert!(first.precedes(&second));
        assert!(!second.precedes(&first));
        assert!(!first.precedes(&straddling));
    }
}
