//! Cost strategies a route can be weighted by.
//!
//! # Examples
//! ```
//! use shadewalk_core::WeightingType;
//!
//! assert_eq!(WeightingType::HeatIndex.as_str(), "heat_index");
//! assert_eq!("fastest".parse::<WeightingType>(), Ok(WeightingType::Fastest));
//! ```

/// Selector for the cost model a path is scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WeightingType {
    /// Path length in metres.
    Shortest,
    /// Walking time in seconds.
    Fastest,
    /// Heat index integrated over walking time (°C × s).
    HeatIndex,
    /// Heat index above the caution threshold integrated over walking time
    /// (°C × s); cooler stretches add nothing.
    HeatIndexWeighted,
    /// Mean radiant temperature integrated over walking time (°C × s).
    MeanRadiantTemperature,
}

impl WeightingType {
    /// Every weighting, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Shortest,
        Self::Fastest,
        Self::HeatIndex,
        Self::HeatIndexWeighted,
        Self::MeanRadiantTemperature,
    ];

    /// Return the weighting as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shortest => "shortest",
            Self::Fastest => "fastest",
            Self::HeatIndex => "heat_index",
            Self::HeatIndexWeighted => "heat_index_weighted",
            Self::MeanRadiantTemperature => "mean_radiant_temperature",
        }
    }

    /// Return `true` when the cost depends on a thermal model.
    #[must_use]
    pub const fn is_thermal(&self) -> bool {
        matches!(
            self,
            Self::HeatIndex | Self::HeatIndexWeighted | Self::MeanRadiantTemperature
        )
    }
}

impl std::fmt::Display for WeightingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeightingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|weighting| weighting.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown weighting '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    fn display_round_trips_through_from_str() {
        for weighting in WeightingType::ALL {
            assert_eq!(
                WeightingType::from_str(&weighting.to_string()),
                Ok(weighting)
            );
        }
    }

    #[rstest]
    fn parsing_ignores_case() {
        assert_eq!(
            WeightingType::from_str("HEAT_INDEX"),
            Ok(WeightingType::HeatIndex)
        );
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = WeightingType::from_str("scenic").expect_err("unknown weighting");
        assert!(err.contains("unknown weighting"));
    }

    #[rstest]
    #[case(WeightingType::Shortest, false)]
    #[case(WeightingType::Fastest, false)]
    #[case(WeightingType::HeatIndex, true)]
    #[case(WeightingType::MeanRadiantTemperature, true)]
    fn thermal_weightings(#[case] weighting: WeightingType, #[case] expected: bool) {
        assert_eq!(weighting.is_thermal(), expected);
    }

    #[rstest]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&WeightingType::HeatIndexWeighted).expect("serialise");
        assert_eq!(json, "\"heat_index_weighted\"");
    }
}
