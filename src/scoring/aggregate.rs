// src/scoring/aggregate.rs
use crate::config::WeightSpec;
use crate::core::types::{clamp_score, round_score, ScoreRecord};

/// Weighted total of the enabled dimensions. Regular and bonus parts are
/// rounded independently, then added and capped at 20.
/// Dimensions missing from the record count as 0.
pub fn total_score(record: &ScoreRecord, weights: &WeightSpec) -> u8 {
    let (regular, bonus) = weights.iter().fold((0.0, 0.0), |(regular, bonus), (kind, w)| {
        let weighted = w.weight * f64::from(record.get(kind).unwrap_or(0));
        if w.is_bonus {
            (regular, bonus + weighted)
        } else {
            (regular + weighted, bonus)
        }
    });
    clamp_score(round_score(regular) + round_score(bonus))
}
