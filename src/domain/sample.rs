// Sample naming shared by the metadata and abundance tables

/// Number of leading characters (`BB_`) dropped from a sample name before
/// matching it against `SAMPLEID`.
const SAMPLE_PREFIX_LEN: usize = 3;

/// Resolve a sample name such as `BB_940` to the numeric metadata id.
///
/// The prefix is dropped without checking that it reads `BB_`. A remainder
/// that does not parse as an integer, surrounding whitespace included,
/// matches no metadata row.
pub fn metadata_sample_id(sample_name: &str) -> Option<i64> {
    let suffix: String = sample_name.chars().skip(SAMPLE_PREFIX_LEN).collect();
    suffix.parse().ok()
}
