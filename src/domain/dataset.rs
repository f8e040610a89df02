// Sample dataset - the three read-only tables loaded at startup
use super::abundance::AbundanceTable;
use super::metadata::SampleMetadata;
use super::taxonomy::TaxonomicUnit;

#[derive(Debug, Clone, Default)]
pub struct SampleDataset {
    pub taxonomic_units: Vec<TaxonomicUnit>,
    pub abundances: AbundanceTable,
    pub metadata: Vec<SampleMetadata>,
}

impl SampleDataset {
    pub fn new(
        taxonomic_units: Vec<TaxonomicUnit>,
        abundances: AbundanceTable,
        metadata: Vec<SampleMetadata>,
    ) -> Self {
        Self {
            taxonomic_units,
            abundances,
            metadata,
        }
    }

    /// Abundance rows line up with taxonomic units by position, so both
    /// tables must have the same number of rows.
    pub fn is_aligned(&self) -> bool {
        self.abundances.row_count() == self.taxonomic_units.len()
    }
}
