//! Named AQI bands.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl AqiCategory {
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Satisfactory,
            101..=150 => Self::Moderate,
            151..=200 => Self::Poor,
            201..=300 => Self::VeryPoor,
            _ => Self::Severe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Severe => "Severe",
        }
    }

    /// Base display colour as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#55A84F",
            Self::Satisfactory => "#A3C853",
            Self::Moderate => "#FFF833",
            Self::Poor => "#F29C33",
            Self::VeryPoor => "#E93F33",
            Self::Severe => "#AF2D24",
        }
    }

    /// Inclusive AQI range of the band.
    pub fn range(self) -> (u16, u16) {
        match self {
            Self::Good => (0, 50),
            Self::Satisfactory => (51, 100),
            Self::Moderate => (101, 150),
            Self::Poor => (151, 200),
            Self::VeryPoor => (201, 300),
            Self::Severe => (301, 500),
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(AqiCategory::from_aqi(0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(300), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::from_aqi(301), AqiCategory::Severe);
        assert_eq!(AqiCategory::from_aqi(500), AqiCategory::Severe);
    }

    #[test]
    fn test_ranges_match_classification() {
        for aqi in 0..=500u16 {
            let (lo, hi) = AqiCategory::from_aqi(aqi).range();
            assert!(lo <= aqi && aqi <= hi, "aqi {} outside its band", aqi);
        }
    }
}
