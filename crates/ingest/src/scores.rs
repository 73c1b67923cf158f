// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Score extraction from report text.
//!
//! Score reports are PDFs whose extracted text has no reliable structure.
//! Extraction is a best-effort, line-by-line pattern match: each line is
//! split on whitespace and offered to the configured strategies in order.
//! The first strategy that recognizes the line wins. Lines no strategy
//! recognizes are ignored; lines a strategy recognizes but cannot read
//! (for example non-numeric score tokens) are skipped and reported.
//!
//! The result is approximate by nature and sensitive to token order and
//! spacing in the extracted text.

use crate::error::{IngestError, InputKind};
use crate::matches::MATCH_ID_FIELD;
use crate::outcome::Parsed;
use crate::settings::ParseSettings;
use crate::table::RawText;
use refgrid_domain::{DecimalSeparator, MatchId, ScoreRecord, parse_decimal};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One way of recognizing a score line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// The first token is the numeric match id and the last two tokens are
    /// the two scores, in order.
    TrailingPair {
        /// Minimum token count for a line to be considered.
        min_tokens: usize,
    },
    /// A numeric match id anywhere on the line plus two labeled scores,
    /// written `OA 7,5`, `OA: 7,5` or `OA:7,5`.
    Tagged {
        /// Label of the first score.
        score_a: String,
        /// Label of the second score.
        score_b: String,
    },
}

/// What a strategy made of a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch {
    /// The line is not a score line for this strategy.
    NotCandidate,
    /// The line looks like a score line but a value could not be read.
    Rejected(String),
    /// A score record.
    Score(ScoreRecord),
}

impl ExtractionStrategy {
    /// Applies this strategy to one whitespace-tokenized line.
    #[must_use]
    pub fn extract(&self, tokens: &[&str], separator: DecimalSeparator) -> LineMatch {
        match self {
            Self::TrailingPair { min_tokens } => trailing_pair(tokens, *min_tokens, separator),
            Self::Tagged { score_a, score_b } => tagged(tokens, score_a, score_b, separator),
        }
    }
}

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn trailing_pair(tokens: &[&str], min_tokens: usize, separator: DecimalSeparator) -> LineMatch {
    if tokens.len() < min_tokens.max(3) {
        return LineMatch::NotCandidate;
    }
    let (Some(first), [.., raw_a, raw_b]) = (tokens.first(), tokens) else {
        return LineMatch::NotCandidate;
    };
    if !is_numeric_token(first) {
        return LineMatch::NotCandidate;
    }
    let Some(match_id) = MatchId::parse(first) else {
        return LineMatch::NotCandidate;
    };

    match (
        parse_decimal(raw_a, separator),
        parse_decimal(raw_b, separator),
    ) {
        (Some(a), Some(b)) => LineMatch::Score(ScoreRecord {
            match_id,
            score_a: Some(a),
            score_b: Some(b),
        }),
        _ => LineMatch::Rejected(format!(
            "match {match_id}: trailing tokens '{raw_a}' '{raw_b}' are not decimals"
        )),
    }
}

/// Where a tag and its value were found on a line.
struct TagHit<'a> {
    /// The raw value, if any token carried one.
    raw: Option<&'a str>,
    /// Index of the token after a bare tag, which holds the value.
    value_slot: Option<usize>,
}

/// Finds `tag` in any of the accepted spellings.
fn find_tag<'a>(tokens: &[&'a str], tag: &str) -> Option<TagHit<'a>> {
    for (idx, token) in tokens.iter().enumerate() {
        let Some(rest) = strip_prefix_ignore_case(token, tag) else {
            continue;
        };
        let inline: &str = rest.strip_prefix(':').unwrap_or(rest);
        if !inline.is_empty() {
            if rest.starts_with(':') {
                return Some(TagHit {
                    raw: Some(inline),
                    value_slot: None,
                });
            }
            // A longer word that merely starts with the tag
            continue;
        }
        return Some(TagHit {
            raw: tokens.get(idx + 1).copied(),
            value_slot: Some(idx + 1),
        });
    }
    None
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let head: &str = token.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &token[prefix.len()..])
}

fn tagged(
    tokens: &[&str],
    tag_a: &str,
    tag_b: &str,
    separator: DecimalSeparator,
) -> LineMatch {
    let hit_a: Option<TagHit<'_>> = find_tag(tokens, tag_a);
    let hit_b: Option<TagHit<'_>> = find_tag(tokens, tag_b);
    let slots: Vec<usize> = [&hit_a, &hit_b]
        .into_iter()
        .filter_map(|hit| hit.as_ref().and_then(|h| h.value_slot))
        .collect();

    // A detached score value must not be read back as the match id
    let Some(match_id) = tokens
        .iter()
        .enumerate()
        .find(|(idx, t)| !slots.contains(idx) && is_numeric_token(t))
        .and_then(|(_, t)| MatchId::parse(t))
    else {
        return LineMatch::NotCandidate;
    };

    let value = |hit: &TagHit<'_>| hit.raw.and_then(|raw| parse_decimal(raw, separator));
    match (hit_a, hit_b) {
        (None, None) => LineMatch::NotCandidate,
        (Some(a), Some(b)) => match (value(&a), value(&b)) {
            (Some(a), Some(b)) => LineMatch::Score(ScoreRecord {
                match_id,
                score_a: Some(a),
                score_b: Some(b),
            }),
            _ => LineMatch::Rejected(format!(
                "match {match_id}: '{tag_a}'/'{tag_b}' values are not decimals"
            )),
        },
        _ => LineMatch::Rejected(format!(
            "match {match_id}: expected both '{tag_a}' and '{tag_b}' scores"
        )),
    }
}

/// Score extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreExtraction {
    /// Strategies tried in order on every line.
    pub strategies: Vec<ExtractionStrategy>,
}

impl Default for ScoreExtraction {
    fn default() -> Self {
        Self {
            strategies: vec![ExtractionStrategy::TrailingPair { min_tokens: 6 }],
        }
    }
}

/// Extracts score records from report text.
///
/// The first line for a match id wins; later lines for the same id are
/// reported as `DuplicateKey`. A non-blank report in which no line carries
/// a recognizable match id degrades to `MissingField(match_id)`.
#[must_use]
pub fn parse_scores(
    text: &RawText,
    extraction: &ScoreExtraction,
    settings: &ParseSettings,
) -> Parsed<ScoreRecord> {
    let mut parsed: Parsed<ScoreRecord> = Parsed::new(InputKind::Scores);
    let mut seen: HashSet<MatchId> = HashSet::new();
    let mut candidates: usize = 0;

    for (line, content) in text.lines() {
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let mut rejection: Option<String> = None;
        let mut record: Option<ScoreRecord> = None;
        for strategy in &extraction.strategies {
            match strategy.extract(&tokens, settings.decimal_separator) {
                LineMatch::NotCandidate => {}
                LineMatch::Rejected(reason) => {
                    rejection.get_or_insert(reason);
                }
                LineMatch::Score(score) => {
                    record = Some(score);
                    break;
                }
            }
        }

        if let Some(score) = record {
            candidates += 1;
            if seen.insert(score.match_id.clone()) {
                parsed.records.push(score);
            } else {
                parsed.duplicate(score.match_id.value());
            }
        } else if let Some(reason) = rejection {
            candidates += 1;
            parsed.skip(line, reason);
        }
    }

    if candidates == 0 && !text.is_blank() {
        return Parsed::degraded(
            InputKind::Scores,
            vec![IngestError::MissingField {
                input: InputKind::Scores,
                field: String::from(MATCH_ID_FIELD),
                column: String::from("a score line with a numeric match id"),
            }],
        );
    }

    parsed.log_summary();
    parsed
}
