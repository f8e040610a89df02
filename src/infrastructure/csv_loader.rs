// CSV dataset loader
use crate::domain::abundance::{AbundanceTable, OTU_ID_COLUMN, SampleColumn};
use crate::domain::dataset::SampleDataset;
use crate::domain::metadata::SampleMetadata;
use crate::domain::taxonomy::TaxonomicUnit;
use crate::infrastructure::config::CsvSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct OtuRecord {
    lowest_taxonomic_unit_found: String,
}

/// Metadata columns the service reads; other columns are ignored.
#[derive(Debug, Deserialize)]
struct MetadataRecord {
    #[serde(rename = "SAMPLEID")]
    sample_id: Option<i64>,
    #[serde(rename = "ETHNICITY")]
    ethnicity: Option<String>,
    #[serde(rename = "GENDER")]
    gender: Option<String>,
    #[serde(rename = "AGE")]
    age: Option<i64>,
    #[serde(rename = "LOCATION")]
    location: Option<String>,
    #[serde(rename = "BBTYPE")]
    bbtype: Option<String>,
    #[serde(rename = "WFREQ")]
    wfreq: Option<f64>,
}

impl MetadataRecord {
    /// `None` for rows without a `SAMPLEID`, which no lookup can match
    fn into_metadata(self) -> Option<SampleMetadata> {
        Some(SampleMetadata {
            sample_id: self.sample_id?,
            ethnicity: self.ethnicity,
            gender: self.gender,
            age: self.age,
            location: self.location,
            bbtype: self.bbtype,
            wfreq: self.wfreq,
        })
    }
}

fn open(path: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open CSV file {}", path))
}

/// Load the taxonomy, samples and metadata files named in `settings`
pub fn load_csv_dataset(settings: &CsvSettings) -> Result<SampleDataset> {
    info!(
        "Loading sample dataset from CSV files {}, {}, {}",
        settings.otu_path, settings.samples_path, settings.metadata_path
    );

    let taxonomic_units = read_taxonomic_units(open(&settings.otu_path)?)
        .with_context(|| format!("Failed to read {}", settings.otu_path))?;
    let abundances = read_abundances(open(&settings.samples_path)?)
        .with_context(|| format!("Failed to read {}", settings.samples_path))?;
    let metadata = read_metadata(open(&settings.metadata_path)?)
        .with_context(|| format!("Failed to read {}", settings.metadata_path))?;

    Ok(SampleDataset::new(taxonomic_units, abundances, metadata))
}

pub fn read_taxonomic_units<R: Read>(reader: R) -> Result<Vec<TaxonomicUnit>> {
    csv::Reader::from_reader(reader)
        .deserialize::<OtuRecord>()
        .map(|record| -> Result<TaxonomicUnit> {
            Ok(TaxonomicUnit::new(record?.lowest_taxonomic_unit_found))
        })
        .collect()
}

pub fn read_metadata<R: Read>(reader: R) -> Result<Vec<SampleMetadata>> {
    let mut metadata = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize::<MetadataRecord>() {
        match record?.into_metadata() {
            Some(row) => metadata.push(row),
            None => debug!("Skipping metadata row without SAMPLEID"),
        }
    }
    Ok(metadata)
}

/// Empty cells count as zero
fn parse_count(cell: Option<&str>) -> Result<i64> {
    match cell.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => Ok(value.parse()?),
    }
}

pub fn read_abundances<R: Read>(reader: R) -> Result<AbundanceTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let key_index = headers
        .iter()
        .position(|name| name == OTU_ID_COLUMN)
        .with_context(|| format!("Missing {} column", OTU_ID_COLUMN))?;

    let sample_indices: Vec<usize> = (0..headers.len())
        .filter(|&index| index != key_index)
        .collect();

    let mut otu_ids = Vec::new();
    let mut counts: Vec<Vec<i64>> = vec![Vec::new(); sample_indices.len()];

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        // Line 1 is the header
        let row = line + 2;

        let otu_id: i64 = record
            .get(key_index)
            .map(str::trim)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("Invalid {} on line {}", OTU_ID_COLUMN, row))?;
        otu_ids.push(otu_id);

        for (slot, &index) in sample_indices.iter().enumerate() {
            let count = parse_count(record.get(index)).with_context(|| {
                format!("Invalid count for {} on line {}", &headers[index], row)
            })?;
            counts[slot].push(count);
        }
    }

    let columns = sample_indices
        .iter()
        .zip(counts)
        .map(|(&index, counts)| SampleColumn::new(headers[index].to_string(), counts))
        .collect();

    Ok(AbundanceTable::new(otu_ids, columns)?)
}
