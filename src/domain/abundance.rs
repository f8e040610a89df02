// Sample abundance domain models
use serde::Serialize;
use thiserror::Error;

/// Name of the row-key column of the abundance table
pub const OTU_ID_COLUMN: &str = "otu_id";

/// Counts at or below this value are left out of a sample series.
const MIN_SERIES_COUNT: i64 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbundanceTableError {
    #[error("sample column {sample} has {found} rows, expected {expected}")]
    ColumnLength {
        sample: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate sample column {sample}")]
    DuplicateColumn { sample: String },
}

/// Per-sample counts for every OTU, one entry per table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleColumn {
    pub name: String,
    pub counts: Vec<i64>,
}

impl SampleColumn {
    pub fn new(name: String, counts: Vec<i64>) -> Self {
        Self { name, counts }
    }
}

/// Wide abundance table held column by column.
///
/// Row `i` of every column belongs to `otu_ids[i]`; columns keep the order of
/// the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbundanceTable {
    otu_ids: Vec<i64>,
    columns: Vec<SampleColumn>,
}

impl AbundanceTable {
    pub fn new(
        otu_ids: Vec<i64>,
        columns: Vec<SampleColumn>,
    ) -> Result<Self, AbundanceTableError> {
        for (index, column) in columns.iter().enumerate() {
            if column.counts.len() != otu_ids.len() {
                return Err(AbundanceTableError::ColumnLength {
                    sample: column.name.clone(),
                    expected: otu_ids.len(),
                    found: column.counts.len(),
                });
            }
            if columns[..index].iter().any(|other| other.name == column.name) {
                return Err(AbundanceTableError::DuplicateColumn {
                    sample: column.name.clone(),
                });
            }
        }
        Ok(Self { otu_ids, columns })
    }

    pub fn otu_ids(&self) -> &[i64] {
        &self.otu_ids
    }

    pub fn row_count(&self) -> usize {
        self.otu_ids.len()
    }

    /// Sample column names, excluding the row key
    pub fn sample_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn column(&self, sample_name: &str) -> Option<&SampleColumn> {
        self.columns.iter().find(|column| column.name == sample_name)
    }

    /// Row keys paired with one column's counts
    pub fn sample_counts(&self, sample_name: &str) -> Option<SampleCounts> {
        self.column(sample_name).map(|column| SampleCounts {
            otu_ids: self.otu_ids.clone(),
            counts: column.counts.clone(),
        })
    }
}

/// One sample column together with the row keys, in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleCounts {
    pub otu_ids: Vec<i64>,
    pub counts: Vec<i64>,
}

/// OTUs present in a sample, most abundant first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleSeries {
    pub otu_ids: Vec<i64>,
    pub sample_values: Vec<i64>,
}

impl SampleSeries {
    /// Keep the rows whose count exceeds one and order them by count,
    /// descending. Equal counts keep their table order.
    pub fn from_counts(counts: &SampleCounts) -> Self {
        let mut rows: Vec<(i64, i64)> = counts
            .otu_ids
            .iter()
            .copied()
            .zip(counts.counts.iter().copied())
            .filter(|&(_, count)| count > MIN_SERIES_COUNT)
            .collect();

        // sort_by is stable
        rows.sort_by(|a, b| b.1.cmp(&a.1));

        let (otu_ids, sample_values) = rows.into_iter().unzip();
        Self {
            otu_ids,
            sample_values,
        }
    }
}
