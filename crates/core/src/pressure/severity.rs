//! Peak-pressure severity classification.

use serde::{Deserialize, Serialize};

/// Alert severity tier, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    /// Numeric level stored with an alert (1 = low, 3 = high).
    pub fn level(self) -> i16 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn from_level(level: i16) -> Option<Self> {
        match level {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three ascending peak-pressure boundaries. A peak at or above a boundary
/// reaches that tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityThresholds {
    pub low: i32,
    pub medium: i32,
    pub high: i32,
}

impl SeverityThresholds {
    pub const DEFAULT: Self = Self {
        low: 40,
        medium: 60,
        high: 80,
    };

    /// Build thresholds, returning `None` unless `low < medium < high`.
    pub fn new(low: i32, medium: i32, high: i32) -> Option<Self> {
        (low < medium && medium < high).then_some(Self { low, medium, high })
    }

    /// Classify a frame's peak pressure. `None` means no alert.
    pub fn classify(&self, peak: i32) -> Option<SeverityTier> {
        if peak >= self.high {
            Some(SeverityTier::High)
        } else if peak >= self.medium {
            Some(SeverityTier::Medium)
        } else if peak >= self.low {
            Some(SeverityTier::Low)
        } else {
            None
        }
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        let t = SeverityThresholds::default();
        assert_eq!(t.classify(39), None);
        assert_eq!(t.classify(40), Some(SeverityTier::Low));
        assert_eq!(t.classify(59), Some(SeverityTier::Low));
        assert_eq!(t.classify(60), Some(SeverityTier::Medium));
        assert_eq!(t.classify(79), Some(SeverityTier::Medium));
        assert_eq!(t.classify(80), Some(SeverityTier::High));
        assert_eq!(t.classify(100), Some(SeverityTier::High));
    }

    #[test]
    fn classification_is_monotonic_in_peak() {
        let t = SeverityThresholds::default();
        let levels: Vec<i16> = (-10..=120)
            .map(|peak| t.classify(peak).map_or(0, SeverityTier::level))
            .collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn negative_peaks_raise_nothing() {
        assert_eq!(SeverityThresholds::default().classify(i32::MIN), None);
    }

    #[test]
    fn new_requires_strictly_ascending() {
        assert!(SeverityThresholds::new(1, 2, 3).is_some());
        assert!(SeverityThresholds::new(2, 2, 3).is_none());
        assert!(SeverityThresholds::new(1, 3, 3).is_none());
        assert!(SeverityThresholds::new(80, 60, 40).is_none());
    }

    #[test]
    fn level_round_trips_through_storage_value() {
        for tier in [SeverityTier::Low, SeverityTier::Medium, SeverityTier::High] {
            assert_eq!(SeverityTier::from_level(tier.level()), Some(tier));
        }
        assert_eq!(SeverityTier::from_level(0), None);
        assert_eq!(SeverityTier::from_level(4), None);
    }
}
