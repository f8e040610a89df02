// Sample metadata domain models
use serde::Serialize;

/// One row of the sample metadata table
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMetadata {
    pub sample_id: i64,
    pub ethnicity: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub bbtype: Option<String>,
    pub wfreq: Option<f64>,
}

impl SampleMetadata {
    /// Weekly wash frequency truncated toward zero, if one was recorded
    pub fn weekly_wash_frequency(&self) -> Option<i64> {
        self.wfreq
            .filter(|wfreq| wfreq.is_finite())
            .map(|wfreq| wfreq.trunc() as i64)
    }
}

/// The metadata attributes exposed to the dashboard, in response key order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataSummary {
    #[serde(rename = "SAMPLEID")]
    pub sample_id: i64,
    #[serde(rename = "ETHNICITY")]
    pub ethnicity: Option<String>,
    #[serde(rename = "GENDER")]
    pub gender: Option<String>,
    #[serde(rename = "AGE")]
    pub age: Option<i64>,
    #[serde(rename = "LOCATION")]
    pub location: Option<String>,
    #[serde(rename = "BBTYPE")]
    pub bbtype: Option<String>,
}

impl From<&SampleMetadata> for MetadataSummary {
    fn from(metadata: &SampleMetadata) -> Self {
        Self {
            sample_id: metadata.sample_id,
            ethnicity: metadata.ethnicity.clone(),
            gender: metadata.gender.clone(),
            age: metadata.age,
            location: metadata.location.clone(),
            bbtype: metadata.bbtype.clone(),
        }
    }
}
