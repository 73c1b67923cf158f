// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation join.
//!
//! Scores carry no referee code. They reach a referee only through the
//! match they were reported for, so the join is a left join of matches onto
//! scores by match id:
//!
//! - every match is kept, with absent scores when none was reported
//! - a score for an unknown match is discarded
//! - `|joined| == |matches|` always holds

use crate::error::CoreError;
use refgrid_domain::{MatchId, MatchRecord, MatchWithScore, ScoreRecord};
use refgrid_ingest::{InputKind, MATCH_ID_FIELD, Parsed};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Attaches scores to matches by match id.
///
/// If several scores share a match id the first one is used.
#[must_use]
pub fn left_join(matches: &[MatchRecord], scores: &[ScoreRecord]) -> Vec<MatchWithScore> {
    let mut by_id: HashMap<&MatchId, &ScoreRecord> = HashMap::with_capacity(scores.len());
    for score in scores {
        by_id.entry(&score.match_id).or_insert(score);
    }

    let joined: Vec<MatchWithScore> = matches
        .iter()
        .map(|assignment| {
            assignment
                .match_id
                .as_ref()
                .and_then(|id| by_id.get(id))
                .map_or_else(
                    || MatchWithScore::unscored(assignment.clone()),
                    |score| MatchWithScore {
                        assignment: assignment.clone(),
                        score_a: score.score_a,
                        score_b: score.score_b,
                    },
                )
        })
        .collect();

    let known: HashSet<&MatchId> = matches
        .iter()
        .filter_map(|m| m.match_id.as_ref())
        .collect();
    let orphaned: usize = by_id.keys().filter(|id| !known.contains(*id)).count();
    if orphaned > 0 {
        debug!(orphaned, "Discarding scores for matches not in the extract");
    }

    info!(
        matches = joined.len(),
        scored = joined.iter().filter(|m| m.is_scored()).count(),
        "Joined scores onto matches"
    );
    joined
}

/// Wraps every match without scores.
#[must_use]
pub fn unscored(matches: &[MatchRecord]) -> Vec<MatchWithScore> {
    matches
        .iter()
        .cloned()
        .map(MatchWithScore::unscored)
        .collect()
}

/// Joins parsed matches and scores, checking the join key first.
///
/// A score report that was not supplied is not an error: every match is
/// simply unscored.
///
/// # Errors
///
/// Returns `CoreError::MissingJoinKey` naming the input whose match id
/// column (or marker) was missing. The caller decides how to fall back;
/// [`unscored`] gives the unscored match set.
pub fn reconcile(
    matches: &Parsed<MatchRecord>,
    scores: &Parsed<ScoreRecord>,
) -> Result<Vec<MatchWithScore>, CoreError> {
    for (input, missing) in [
        (InputKind::Matches, matches.is_missing_field(MATCH_ID_FIELD)),
        (InputKind::Scores, scores.is_missing_field(MATCH_ID_FIELD)),
    ] {
        if missing {
            return Err(CoreError::MissingJoinKey { input });
        }
    }

    Ok(left_join(&matches.records, &scores.records))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use refgrid_domain::{CodeNormalization, RefereeCode};
    use refgrid_ingest::IngestError;
    use time::macros::date;

    fn assignment(match_id: &str, code: &str) -> MatchRecord {
        MatchRecord {
            match_id: MatchId::parse(match_id),
            category: String::from("U17"),
            group: String::from("A"),
            date: Some(date!(2025 - 05 - 03)),
            role: String::from("Referee"),
            referee_code: RefereeCode::parse(code, &CodeNormalization::default()).unwrap(),
        }
    }

    fn score(match_id: &str, a: f64, b: f64) -> ScoreRecord {
        ScoreRecord {
            match_id: MatchId::parse(match_id).unwrap(),
            score_a: Some(a),
            score_b: Some(b),
        }
    }

    #[test]
    fn test_left_join_keeps_every_match() {
        let matches: Vec<MatchRecord> = vec![
            assignment("4567", "123"),
            assignment("4567", "456"),
            assignment("4568", "123"),
        ];
        let scores: Vec<ScoreRecord> = vec![score("4567", 7.5, 7.0), score("9999", 8.0, 8.0)];

        let joined: Vec<MatchWithScore> = left_join(&matches, &scores);

        assert_eq!(joined.len(), matches.len());
        assert_eq!(joined[0].score_a, Some(7.5));
        assert_eq!(joined[1].score_b, Some(7.0));
        assert_eq!(joined[2].score_a, None);
        assert_eq!(joined[2].score_b, None);
    }

    #[test]
    fn test_left_join_without_scores() {
        let matches: Vec<MatchRecord> = vec![assignment("4567", "123")];
        let joined: Vec<MatchWithScore> = left_join(&matches, &[]);
        assert_eq!(joined, unscored(&matches));
        assert!(!joined[0].is_scored());
    }

    #[test]
    fn test_left_join_first_score_wins() {
        let matches: Vec<MatchRecord> = vec![assignment("4567", "123")];
        let scores: Vec<ScoreRecord> = vec![score("4567", 6.0, 6.5), score("4567", 9.0, 9.0)];
        let joined: Vec<MatchWithScore> = left_join(&matches, &scores);
        assert_eq!(joined[0].score_a, Some(6.0));
    }

    #[test]
    fn test_reconcile_missing_score_key() {
        let mut matches: Parsed<MatchRecord> = Parsed::new(InputKind::Matches);
        matches.records.push(assignment("4567", "123"));
        let scores: Parsed<ScoreRecord> = Parsed::degraded(
            InputKind::Scores,
            vec![IngestError::MissingField {
                input: InputKind::Scores,
                field: String::from(MATCH_ID_FIELD),
                column: String::from("a score line with a numeric match id"),
            }],
        );

        assert_eq!(
            reconcile(&matches, &scores),
            Err(CoreError::MissingJoinKey {
                input: InputKind::Scores
            })
        );
    }

    #[test]
    fn test_reconcile_missing_match_key() {
        let mut matches: Parsed<MatchRecord> = Parsed::new(InputKind::Matches);
        matches.conditions.push(IngestError::MissingField {
            input: InputKind::Matches,
            field: String::from(MATCH_ID_FIELD),
            column: String::from("column 'Gara'"),
        });
        let mut unkeyed: MatchRecord = assignment("4567", "123");
        unkeyed.match_id = None;
        matches.records.push(unkeyed);
        let mut scores: Parsed<ScoreRecord> = Parsed::new(InputKind::Scores);
        scores.records.push(score("4567", 7.5, 7.0));

        assert_eq!(
            reconcile(&matches, &scores),
            Err(CoreError::MissingJoinKey {
                input: InputKind::Matches
            })
        );
        assert_eq!(unscored(&matches.records).len(), 1);
    }

    #[test]
    fn test_left_join_never_scores_unkeyed_match() {
        let mut unkeyed: MatchRecord = assignment("4567", "123");
        unkeyed.match_id = None;
        let joined: Vec<MatchWithScore> = left_join(&[unkeyed], &[score("4567", 7.5, 7.0)]);
        assert_eq!(joined.len(), 1);
        assert!(!joined[0].is_scored());
    }

    #[test]
    fn test_reconcile_scores_not_supplied() {
        let mut matches: Parsed<MatchRecord> = Parsed::new(InputKind::Matches);
        matches.records.push(assignment("4567", "123"));
        let scores: Parsed<ScoreRecord> = Parsed::not_supplied(InputKind::Scores);

        let joined: Vec<MatchWithScore> = reconcile(&matches, &scores).unwrap();
        assert_eq!(joined.len(), 1);
        assert!(!joined[0].is_scored());
    }
}
