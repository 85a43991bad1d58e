//! CSV-style score rows, plain for files and colored for the terminal.

use crate::config::WeightSpec;
use crate::core::types::{Sample, ScoreKind, ScoreRecord};
use crossterm::style::{Color, Stylize};

const IDENTITY_COLUMNS: [&str; 3] = ["subject", "variable", "sentence"];

fn color_of(kind: ScoreKind) -> Color {
    match kind {
        ScoreKind::WordNovelty
        | ScoreKind::ContextNovelty
        | ScoreKind::ParticipantSimilarity
        | ScoreKind::SentenceSimilarity => Color::Yellow,
        ScoreKind::RhythmicScore | ScoreKind::PhoneticScore => Color::Cyan,
        ScoreKind::TotalScore => Color::Red,
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Formats header and rows for a fixed set of columns.
pub struct ReportFormatter {
    columns: Vec<ScoreKind>,
}

impl ReportFormatter {
    pub fn new(weights: &WeightSpec) -> Self {
        Self { columns: weights.columns() }
    }

    pub fn columns(&self) -> &[ScoreKind] {
        &self.columns
    }

    /// `"subject","variable","sentence","WORD_NOVELTY",...,"TOTAL_SCORE"`
    pub fn header(&self, colored: bool) -> String {
        let identity = IDENTITY_COLUMNS.iter().map(|name| quoted(name));
        let scores = self.columns.iter().map(|&kind| {
            let name = quoted(kind.name());
            if colored {
                name.with(color_of(kind)).to_string()
            } else {
                name
            }
        });
        identity.chain(scores).collect::<Vec<_>>().join(",")
    }

    /// Missing scores render as 0.
    pub fn row(&self, sample: &Sample, record: &ScoreRecord, colored: bool) -> String {
        let identity = [sample.subject(), sample.variable(), sample.sentence()]
            .into_iter()
            .map(quoted);
        let scores = self.columns.iter().map(|&kind| {
            let value = record.get(kind).unwrap_or(0).to_string();
            if colored {
                value.with(color_of(kind)).to_string()
            } else {
                value
            }
        });
        identity.chain(scores).collect::<Vec<_>>().join(",")
    }
}
