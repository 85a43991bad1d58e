// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod lookup;
pub mod persistence;
pub mod report;
pub mod scoring;

pub use crate::config::WeightSpec;
pub use crate::core::engine::ScoringEngine;
pub use crate::core::phonetic::Language;
pub use crate::error::{CreativityError, Result};
pub use crate::lookup::{HttpLookup, NoveltyLookup};
