//! Training data export.
//!
//! One row per history item: the eleven assessment fields as `true` /
//! `false`, then the resolved action label. The column layout is consumed by
//! external training tooling and must not change.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::assess::Question;
use crate::error::ExportError;
use crate::history::HistoryItem;

/// Header line, without the trailing newline.
pub const CSV_HEADER: &str = "canEscape,nearExit,nearInput,inputActive,inputRelevant,requiresObject,requiresCostume,wearingCostume,hasObject,nearObject,allInputsActive,action";

/// Writes the header and one row per item to `out`.
pub fn write_csv<'a, W, I>(mut out: W, items: I) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a HistoryItem>,
{
    writeln!(out, "{CSV_HEADER}")?;

    let mut rows = 0;
    for item in items {
        for question in Question::ALL {
            write!(out, "{},", item.assessment.get(question))?;
        }
        writeln!(out, "{}", item.resolved.action)?;
        rows += 1;
    }

    out.flush()?;
    Ok(rows)
}

/// Creates (or truncates) `path` and writes the items to it.
///
/// Returns the number of data rows written.
pub fn export_csv<'a, I>(path: impl AsRef<Path>, items: I) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a HistoryItem>,
{
    let file = File::create(path.as_ref())?;
    let rows = write_csv(BufWriter::new(file), items)?;
    tracing::info!(rows, path = %path.as_ref().display(), "exported training data");
    Ok(rows)
}
