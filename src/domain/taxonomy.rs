// Taxonomic unit domain model

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomicUnit {
    /// Semicolon-delimited taxonomy label, e.g. `Bacteria;Firmicutes`
    pub lowest_taxonomic_unit_found: String,
}

impl TaxonomicUnit {
    pub fn new(lowest_taxonomic_unit_found: String) -> Self {
        Self {
            lowest_taxonomic_unit_found,
        }
    }
}
