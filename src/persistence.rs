// File: src/persistence.rs
use crate::core::types::{Sample, SampleSet};
use std::fs::{self, File};
use std::io::{BufWriter, Error, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

const FIELD_DELIMITER: u8 = b';';

/// Parses `subject;variable;sentence` records after a header row. A
/// sentence containing the delimiter must be quoted; columns past the
/// third are ignored. Invalid rows are dropped.
pub fn parse_samples<R: Read>(reader: R) -> Result<SampleSet, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut samples = SampleSet::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        let (Some(subject), Some(variable), Some(sentence)) = (record.get(0), record.get(1), record.get(2))
        else {
            debug!("line {}: fewer than 3 fields, skipped", line);
            continue;
        };
        match Sample::new(subject.trim(), variable.trim(), sentence) {
            Some(sample) => samples.insert(sample),
            None => debug!("line {}: '{}' is not a four-word sentence, skipped", line, sentence),
        }
    }
    Ok(samples)
}

pub fn load_samples(path: &Path) -> Result<SampleSet, Error> {
    let file = File::open(path)?;
    parse_samples(file)
}

/// Writes all report lines atomically: a temp file in the target
/// directory is filled, then moved into place.
pub fn save_report(path: &Path, lines: &[String]) -> Result<(), Error> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
    }

    temp_file.persist(path)?;
    Ok(())
}
