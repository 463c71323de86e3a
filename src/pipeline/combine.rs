//! Combining cleaned samples into one tagged table

use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::schema::SAMPLE_COLUMN;
use super::strip::coerce_numeric;

/// Observation field a table was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sample {
    GalacticPlane,
    MidPlane,
    Perpendicular,
}

impl Sample {
    pub const ALL: [Sample; 3] = [Sample::GalacticPlane, Sample::MidPlane, Sample::Perpendicular];

    /// Integer tag written to the `sample` column.
    pub fn tag(self) -> i32 {
        match self {
            Sample::GalacticPlane => 1,
            Sample::MidPlane => 2,
            Sample::Perpendicular => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sample::GalacticPlane => "galactic plane",
            Sample::MidPlane => "mid-plane",
            Sample::Perpendicular => "perpendicular",
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i32> for Sample {
    type Error = i32;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        Sample::ALL
            .into_iter()
            .find(|s| s.tag() == tag)
            .ok_or(tag)
    }
}

/// Stack cleaned tables row-wise, tagging each row with its sample.
///
/// Every table must have exactly the same columns in the same order as the
/// first one; mismatches are rejected rather than reconciled. The output has
/// one extra `sample` column (`Int32`) and every other column coerced to
/// `Float64`.
pub fn combine_samples(tables: &[(DataFrame, Sample)]) -> PipelineResult<DataFrame> {
    let Some((first, _)) = tables.first() else {
        return Err(PipelineError::NoTables);
    };
    let expected = column_names(first);

    let mut combined: Option<DataFrame> = None;
    for (table, sample) in tables {
        let found = column_names(table);
        if found != expected {
            return Err(PipelineError::SchemaMismatch {
                sample: sample.to_string(),
                expected,
                found,
            });
        }
        if found.iter().any(|name| name == SAMPLE_COLUMN) {
            return Err(PipelineError::ReservedColumn {
                sample: sample.to_string(),
                column: SAMPLE_COLUMN.to_string(),
            });
        }

        let tagged = tag_table(table, *sample)?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&tagged)?;
            }
            None => combined = Some(tagged),
        }
    }

    combined.ok_or(PipelineError::NoTables)
}

/// Numeric copy of `table` with the sample tag appended.
fn tag_table(table: &DataFrame, sample: Sample) -> PipelineResult<DataFrame> {
    let mut tagged = coerce_numeric(table)?;
    let tags = Column::new(SAMPLE_COLUMN.into(), vec![sample.tag(); table.height()]);
    tagged.with_column(tags)?;
    Ok(tagged)
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
