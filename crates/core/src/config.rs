// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grid configuration.
//!
//! Every field is optional in JSON. Omitted fields take defaults matching
//! the federation exports this tool was first written for: the 2025 spring
//! season, Italian roster headers and the fixed-position match extract.

use crate::error::CoreError;
use crate::render::RenderOptions;
use refgrid_domain::{CodeNormalization, DateOrder, DecimalSeparator, TestPeriod};
use refgrid_ingest::{
    ExtractionStrategy, MatchColumns, ParseSettings, RosterColumns, ScoreExtraction,
    UnavailabilityColumns,
};
use serde::{Deserialize, Serialize};

/// Date reading conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSettings {
    /// Field order for ambiguous numeric dates such as `03/05/2025`.
    pub order: DateOrder,
}

/// Everything the pipeline needs besides the raw inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// The period the grid covers.
    pub period: TestPeriod,
    /// Referee code canonicalization.
    pub normalization: CodeNormalization,
    /// Date reading conventions.
    pub dates: DateSettings,
    /// Decimal separator accepted in scores.
    pub decimal_separator: DecimalSeparator,
    /// Roster column mapping.
    pub roster: RosterColumns,
    /// Match extract column mapping.
    pub matches: MatchColumns,
    /// Unavailability sheet column mapping.
    pub unavailability: UnavailabilityColumns,
    /// Score line recognition.
    pub scores: ScoreExtraction,
    /// Cell text conventions.
    pub render: RenderOptions,
}

impl GridConfig {
    /// Reads and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if the JSON is malformed or names an
    /// inverted period, and any error from [`GridConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(text).map_err(|e| CoreError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the rules serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if a width rule is zero, no score strategy is
    /// configured, or a tagged strategy has an empty label.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.normalization.validate()?;

        if self.scores.strategies.is_empty() {
            return Err(CoreError::InvalidConfig {
                reason: String::from("scores.strategies must list at least one strategy"),
            });
        }

        let blank_label: bool = self.scores.strategies.iter().any(|strategy| {
            matches!(
                strategy,
                ExtractionStrategy::Tagged { score_a, score_b }
                    if score_a.trim().is_empty() || score_b.trim().is_empty()
            )
        });
        if blank_label {
            return Err(CoreError::InvalidConfig {
                reason: String::from("tagged score strategy needs two non-empty labels"),
            });
        }

        Ok(())
    }

    /// Returns the value conventions shared by every parser.
    #[must_use]
    pub const fn parse_settings(&self) -> ParseSettings {
        ParseSettings {
            normalization: self.normalization,
            date_order: self.dates.order,
            decimal_separator: self.decimal_separator,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use refgrid_domain::{CodeWidth, DomainError};
    use refgrid_ingest::ColumnRef;
    use time::macros::date;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: GridConfig = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.period.start(), date!(2025 - 05 - 01));
        assert_eq!(config.matches.referee_code, ColumnRef::Position(17));
        assert_eq!(
            config.scores.strategies,
            vec![ExtractionStrategy::TrailingPair { min_tokens: 6 }]
        );
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: GridConfig = GridConfig::from_json(
            r#"{
                "period": {"start": "2025-09-01", "end": "2025-09-30"},
                "normalization": {"width": {"pad_to": 6}},
                "dates": {"order": "month_first"},
                "decimal_separator": "comma",
                "matches": {"referee_code": "Arbitro"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.period.week_count(), 5);
        assert_eq!(config.normalization.width, CodeWidth::PadTo(6));
        assert!(config.normalization.strip_float_suffix);
        assert_eq!(config.dates.order, DateOrder::MonthFirst);
        assert_eq!(config.decimal_separator, DecimalSeparator::Comma);
        assert_eq!(config.matches.referee_code, ColumnRef::from("Arbitro"));
        assert_eq!(config.matches.match_id, ColumnRef::Position(1));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let result: Result<GridConfig, CoreError> =
            GridConfig::from_json(r#"{"period": {"start": "2025-06-30", "end": "2025-05-01"}}"#);
        assert!(matches!(result, Err(CoreError::InvalidConfig { .. })));
    }

    #[test]
    fn test_zero_width_rejected() {
        let result: Result<GridConfig, CoreError> =
            GridConfig::from_json(r#"{"normalization": {"width": {"last_digits": 0}}}"#);
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(DomainError::InvalidWidth { .. }))
        ));
    }

    #[test]
    fn test_empty_strategy_list_rejected() {
        let result: Result<GridConfig, CoreError> =
            GridConfig::from_json(r#"{"scores": {"strategies": []}}"#);
        assert!(matches!(result, Err(CoreError::InvalidConfig { .. })));
    }

    #[test]
    fn test_tagged_strategy_needs_labels() {
        let result: Result<GridConfig, CoreError> = GridConfig::from_json(
            r#"{"scores": {"strategies": [{"kind": "tagged", "score_a": "OA", "score_b": " "}]}}"#,
        );
        assert!(matches!(result, Err(CoreError::InvalidConfig { .. })));
    }

    #[test]
    fn test_parse_settings_follow_config() {
        let mut config: GridConfig = GridConfig::default();
        config.dates.order = DateOrder::MonthFirst;
        let settings: ParseSettings = config.parse_settings();
        assert_eq!(settings.date_order, DateOrder::MonthFirst);
        assert_eq!(settings.normalization, config.normalization);
    }
}
