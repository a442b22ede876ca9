//! Min-max normalization of sub-scores across a batch.

use log::debug;
use serde::{Deserialize, Serialize};

use super::statistics::normalized_score;
use crate::holdings::{Holding, ScoreBounds, ScoreDimension};

/// Observed range of one dimension, `None` when no holding carries it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn of<'a>(
        holdings: impl IntoIterator<Item = &'a Holding>,
        dimension: ScoreDimension,
    ) -> Option<Self> {
        holdings
            .into_iter()
            .filter_map(|h| h.score(dimension))
            .fold(None, |range: Option<ScoreRange>, score| {
                Some(match range {
                    Some(r) => ScoreRange {
                        min: r.min.min(score),
                        max: r.max.max(score),
                    },
                    None => ScoreRange {
                        min: score,
                        max: score,
                    },
                })
            })
    }

    pub fn normalize(&self, score: f64) -> f64 {
        normalized_score(score, self.min, self.max)
    }
}

/// Rescales every present sub-score to 0-100 per dimension, in place.
///
/// A dimension whose values are all equal (including a single holding) maps to
/// 50.0. Absent scores stay absent and existing composites are cleared, since
/// they no longer match the rescaled inputs.
///
/// Holdings with any sub-score outside `bounds` take no part: they neither
/// widen the observed range nor get rescaled, so they keep their raw scores
/// and stay unscorable.
pub fn normalize_scores(holdings: &mut [Holding], bounds: &ScoreBounds) {
    if holdings.is_empty() {
        return;
    }

    let eligible: Vec<bool> = holdings
        .iter()
        .map(|h| !h.has_out_of_range_score(bounds))
        .collect();
    let excluded = eligible.iter().filter(|e| !**e).count();
    if excluded > 0 {
        debug!(
            "Leaving {} holding(s) with out-of-range scores unnormalized",
            excluded
        );
    }

    for dimension in ScoreDimension::ALL {
        let in_range = holdings
            .iter()
            .zip(&eligible)
            .filter(|(_, e)| **e)
            .map(|(h, _)| h);
        let Some(range) = ScoreRange::of(in_range, dimension) else {
            continue;
        };
        debug!(
            "Normalizing {} scores over [{}, {}]",
            dimension, range.min, range.max
        );
        let targets = holdings.iter_mut().zip(&eligible).filter(|(_, e)| **e);
        for (holding, _) in targets {
            if let Some(score) = holding.score(dimension) {
                holding.set_score(dimension, Some(range.normalize(score)));
            }
        }
    }

    for holding in holdings.iter_mut() {
        holding.composite = None;
    }
}

/// Pure variant of [`normalize_scores`].
pub fn normalized(holdings: &[Holding], bounds: &ScoreBounds) -> Vec<Holding> {
    let mut copies = holdings.to_vec();
    normalize_scores(&mut copies, bounds);
    copies
}

/// Linearly maps `value` from `[min_value, max_value]` onto `[target_min, target_max]`.
///
/// A degenerate source range maps to the target midpoint.
pub fn normalize_to_range(
    value: f64,
    min_value: f64,
    max_value: f64,
    target_min: f64,
    target_max: f64,
) -> f64 {
    if max_value == min_value {
        return (target_min + target_max) / 2.0;
    }
    let ratio = (value - min_value) / (max_value - min_value);
    target_min + ratio * (target_max - target_min)
}
