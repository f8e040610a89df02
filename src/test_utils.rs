use crate::domain::abundance::{AbundanceTable, SampleColumn};
use crate::domain::dataset::SampleDataset;
use crate::domain::metadata::SampleMetadata;
use crate::domain::taxonomy::TaxonomicUnit;

const HALOCOCCUS: &str =
    "Archaea;Euryarchaeota;Halobacteria;Halobacteriales;Halobacteriaceae;Halococcus";

fn metadata(
    sample_id: i64,
    ethnicity: &str,
    gender: &str,
    age: i64,
    location: &str,
    wfreq: Option<f64>,
) -> SampleMetadata {
    SampleMetadata {
        sample_id,
        ethnicity: Some(ethnicity.to_string()),
        gender: Some(gender.to_string()),
        age: Some(age),
        location: Some(location.to_string()),
        bbtype: Some("I".to_string()),
        wfreq,
    }
}

/// Create a small dataset with five OTUs and three samples.
///
/// `BB_943` has two metadata rows and no count above one; `BB_941` has no
/// recorded wash frequency.
pub(crate) fn test_dataset() -> SampleDataset {
    let taxonomic_units = [
        HALOCOCCUS,
        HALOCOCCUS,
        "Bacteria",
        "Bacteria;Firmicutes;Clostridia",
        "Bacteria;Actinobacteria",
    ]
    .into_iter()
    .map(|label| TaxonomicUnit::new(label.to_string()))
    .collect();

    let abundances = AbundanceTable::new(
        vec![1, 2, 3, 4, 5],
        vec![
            SampleColumn::new("BB_940".to_string(), vec![0, 3, 2, 3, 1]),
            SampleColumn::new("BB_941".to_string(), vec![5, 0, 1, 7, 2]),
            SampleColumn::new("BB_943".to_string(), vec![1, 1, 1, 1, 1]),
        ],
    )
    .unwrap();

    let metadata = vec![
        metadata(940, "Caucasian", "F", 24, "Beaufort/NC", Some(2.0)),
        metadata(941, "Caucasian", "M", 31, "Raleigh/NC", None),
        metadata(943, "Asian", "F", 45, "Durham/NC", Some(1.0)),
        metadata(943, "European", "F", 45, "Durham/NC", Some(4.0)),
    ];

    SampleDataset::new(taxonomic_units, abundances, metadata)
}
