//! One calculator per creativity dimension, plus the weighted total.

pub mod aggregate;
pub mod novelty;
pub mod phonetic;
pub mod rhythm;
pub mod similarity;
