// SQLite dataset loader
//
// Reads the `otu`, `samples` and `samples_metadata` tables once at startup.
// Values are decoded by their stored type; a cell that does not hold the
// expected kind of value aborts the load.
use crate::domain::abundance::{AbundanceTable, OTU_ID_COLUMN, SampleColumn};
use crate::domain::dataset::SampleDataset;
use crate::domain::metadata::SampleMetadata;
use crate::domain::taxonomy::TaxonomicUnit;
use anyhow::{Context, Result, bail};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{ColumnIndex, Row, SqlitePool};
use tracing::{debug, info};

const OTU_TABLE: &str = "otu";
const SAMPLES_TABLE: &str = "samples";
const METADATA_TABLE: &str = "samples_metadata";

/// Open the database read-only and load all three tables
pub async fn load_sqlite_dataset(path: &str) -> Result<SampleDataset> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open SQLite dataset at {}", path))?;

    info!("Loading sample dataset from SQLite database {}", path);
    let dataset = read_dataset(&pool).await;
    pool.close().await;
    dataset
}

pub async fn read_dataset(pool: &SqlitePool) -> Result<SampleDataset> {
    let taxonomic_units = read_taxonomic_units(pool).await?;
    let abundances = read_abundances(pool).await?;
    let metadata = read_metadata(pool).await?;

    Ok(SampleDataset::new(taxonomic_units, abundances, metadata))
}

/// Decode an integer cell. REAL values are accepted only when they hold a
/// whole number; text and blobs are rejected.
fn decode_integer<I>(row: &SqliteRow, index: I) -> Result<Option<i64>>
where
    I: ColumnIndex<SqliteRow> + Copy,
{
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return Ok(value);
    }
    let value: f64 = row.try_get(index)?;
    if !value.is_finite() || value.fract() != 0.0 {
        bail!("{} is not a whole number", value);
    }
    Ok(Some(value as i64))
}

/// Decode a numeric cell stored as REAL or INTEGER
fn decode_real<I>(row: &SqliteRow, index: I) -> Result<Option<f64>>
where
    I: ColumnIndex<SqliteRow> + Copy,
{
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return Ok(value);
    }
    let value: i64 = row.try_get(index)?;
    Ok(Some(value as f64))
}

async fn read_taxonomic_units(pool: &SqlitePool) -> Result<Vec<TaxonomicUnit>> {
    let query = format!(
        "SELECT lowest_taxonomic_unit_found FROM {} ORDER BY rowid",
        OTU_TABLE
    );
    let rows = sqlx::query(&query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to read table {}", OTU_TABLE))?;

    rows.iter()
        .enumerate()
        .map(|(line, row)| -> Result<TaxonomicUnit> {
            let label: String = row.try_get(0).with_context(|| {
                format!(
                    "Invalid lowest_taxonomic_unit_found in table {} on row {}",
                    OTU_TABLE,
                    line + 1
                )
            })?;
            Ok(TaxonomicUnit::new(label))
        })
        .collect()
}

/// Column names of `table` in declaration order
async fn column_names(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to list columns of table {}", table))
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

async fn read_abundances(pool: &SqlitePool) -> Result<AbundanceTable> {
    let columns = column_names(pool, SAMPLES_TABLE).await?;
    let key_index = columns
        .iter()
        .position(|name| name == OTU_ID_COLUMN)
        .with_context(|| {
            format!("Table {} has no {} column", SAMPLES_TABLE, OTU_ID_COLUMN)
        })?;

    let selection = columns
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("SELECT {} FROM {} ORDER BY rowid", selection, SAMPLES_TABLE);

    let rows: Vec<SqliteRow> = sqlx::query(&query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to read table {}", SAMPLES_TABLE))?;
    debug!(
        "Read {} rows and {} columns from {}",
        rows.len(),
        columns.len(),
        SAMPLES_TABLE
    );

    let mut otu_ids = Vec::with_capacity(rows.len());
    for (line, row) in rows.iter().enumerate() {
        let otu_id = decode_integer(row, key_index)
            .and_then(|otu_id| otu_id.context("value is NULL"))
            .with_context(|| {
                format!(
                    "Invalid {} in table {} on row {}",
                    OTU_ID_COLUMN,
                    SAMPLES_TABLE,
                    line + 1
                )
            })?;
        otu_ids.push(otu_id);
    }

    let mut sample_columns = Vec::with_capacity(columns.len().saturating_sub(1));
    for (index, name) in columns.iter().enumerate() {
        if index == key_index {
            continue;
        }
        let mut counts = Vec::with_capacity(rows.len());
        for (line, row) in rows.iter().enumerate() {
            let count = decode_integer(row, index).with_context(|| {
                format!("Invalid count in column {} on row {}", name, line + 1)
            })?;
            counts.push(count.unwrap_or(0));
        }
        sample_columns.push(SampleColumn::new(name.clone(), counts));
    }

    Ok(AbundanceTable::new(otu_ids, sample_columns)?)
}

async fn read_metadata(pool: &SqlitePool) -> Result<Vec<SampleMetadata>> {
    let query = format!(
        "SELECT SAMPLEID, ETHNICITY, GENDER, AGE, LOCATION, BBTYPE, WFREQ \
         FROM {} ORDER BY rowid",
        METADATA_TABLE
    );
    let rows = sqlx::query(&query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to read table {}", METADATA_TABLE))?;

    let mut metadata = Vec::with_capacity(rows.len());
    for (line, row) in rows.iter().enumerate() {
        let context = || format!("Invalid row {} in table {}", line + 1, METADATA_TABLE);

        // A NULL SAMPLEID can never be looked up
        let Some(sample_id) = decode_integer(row, "SAMPLEID").with_context(context)? else {
            debug!("Skipping {} row without SAMPLEID", METADATA_TABLE);
            continue;
        };
        metadata.push(SampleMetadata {
            sample_id,
            ethnicity: row.try_get("ETHNICITY").with_context(context)?,
            gender: row.try_get("GENDER").with_context(context)?,
            age: decode_integer(row, "AGE").with_context(context)?,
            location: row.try_get("LOCATION").with_context(context)?,
            bbtype: row.try_get("BBTYPE").with_context(context)?,
            wfreq: decode_real(row, "WFREQ").with_context(context)?,
        });
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn execute(pool: &SqlitePool, statements: &[&str]) {
        for statement in statements {
            sqlx::query(statement).execute(pool).await.unwrap();
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = memory_pool().await;
        execute(
            &pool,
            &[
                "CREATE TABLE otu (otu_id INTEGER, lowest_taxonomic_unit_found TEXT)",
                "INSERT INTO otu VALUES (1, 'Bacteria'), (2, 'Bacteria'), (3, 'Archaea;Euryarchaeota')",
                "CREATE TABLE samples (otu_id INTEGER, BB_941 INTEGER, BB_940 BIGINT)",
                "INSERT INTO samples VALUES (1, 0, 5), (2, 3, NULL), (3, 2, 2)",
                "CREATE TABLE samples_metadata (SAMPLEID INTEGER, EVENT TEXT, ETHNICITY TEXT, \
                 GENDER TEXT, AGE REAL, WFREQ REAL, BBTYPE TEXT, LOCATION TEXT)",
                "INSERT INTO samples_metadata VALUES \
                 (940, 'BellyButtonsScience', 'Caucasian', 'F', 24.0, 2.0, 'I', 'Beaufort/NC'), \
                 (941, 'BellyButtonsScience', NULL, 'M', NULL, NULL, 'O', 'Raleigh/NC'), \
                 (NULL, 'BellyButtonsScience', 'Caucasian', 'F', 30, 1, 'I', 'Durham/NC')",
            ],
        )
        .await;
        pool
    }

    #[tokio::test]
    async fn test_read_dataset() {
        let pool = seeded_pool().await;
        let dataset = read_dataset(&pool).await.unwrap();

        let labels: Vec<_> = dataset
            .taxonomic_units
            .iter()
            .map(|unit| unit.lowest_taxonomic_unit_found.as_str())
            .collect();
        assert_eq!(labels, vec!["Bacteria", "Bacteria", "Archaea;Euryarchaeota"]);

        assert_eq!(
            dataset.abundances.sample_names().collect::<Vec<_>>(),
            vec!["BB_941", "BB_940"]
        );
        assert_eq!(dataset.abundances.otu_ids(), &[1, 2, 3]);
        assert_eq!(dataset.abundances.column("BB_940").unwrap().counts, vec![5, 0, 2]);
        assert!(dataset.is_aligned());
    }

    #[tokio::test]
    async fn test_read_metadata() {
        let pool = seeded_pool().await;
        let dataset = read_dataset(&pool).await.unwrap();

        assert_eq!(dataset.metadata.len(), 2);
        let first = &dataset.metadata[0];
        assert_eq!(first.sample_id, 940);
        assert_eq!(first.ethnicity.as_deref(), Some("Caucasian"));
        assert_eq!(first.age, Some(24));
        assert_eq!(first.location.as_deref(), Some("Beaufort/NC"));
        assert_eq!(first.weekly_wash_frequency(), Some(2));

        let second = &dataset.metadata[1];
        assert_eq!(second.ethnicity, None);
        assert_eq!(second.age, None);
        assert_eq!(second.wfreq, None);
    }

    #[tokio::test]
    async fn test_missing_row_key_column() {
        let pool = memory_pool().await;
        execute(
            &pool,
            &[
                "CREATE TABLE otu (lowest_taxonomic_unit_found TEXT)",
                "CREATE TABLE samples (id INTEGER, BB_940 INTEGER)",
            ],
        )
        .await;

        let error = read_dataset(&pool).await.unwrap_err();
        assert!(error.to_string().contains("otu_id"));
    }

    async fn samples_pool(samples_table: &str, samples_rows: &str) -> SqlitePool {
        let pool = memory_pool().await;
        execute(
            &pool,
            &[
                "CREATE TABLE otu (lowest_taxonomic_unit_found TEXT)",
                "INSERT INTO otu VALUES ('Bacteria'), ('Bacteria')",
                samples_table,
                samples_rows,
                "CREATE TABLE samples_metadata (SAMPLEID INTEGER, ETHNICITY TEXT, GENDER TEXT, \
                 AGE INTEGER, LOCATION TEXT, BBTYPE TEXT, WFREQ REAL)",
            ],
        )
        .await;
        pool
    }

    #[tokio::test]
    async fn test_text_count_is_rejected() {
        let pool = samples_pool(
            "CREATE TABLE samples (otu_id INTEGER, BB_940 INTEGER)",
            "INSERT INTO samples VALUES (1, 'many'), (2, 3)",
        )
        .await;

        let error = read_dataset(&pool).await.unwrap_err();
        assert!(format!("{:#}", error).contains("Invalid count in column BB_940 on row 1"));
    }

    #[tokio::test]
    async fn test_fractional_count_is_rejected() {
        let pool = samples_pool(
            "CREATE TABLE samples (otu_id INTEGER, BB_940 INTEGER)",
            "INSERT INTO samples VALUES (1, 0), (2, 1.5)",
        )
        .await;

        let error = read_dataset(&pool).await.unwrap_err();
        assert!(format!("{:#}", error).contains("Invalid count in column BB_940 on row 2"));
    }

    #[tokio::test]
    async fn test_whole_real_count_is_accepted() {
        let pool = samples_pool(
            "CREATE TABLE samples (otu_id INTEGER, BB_940 REAL)",
            "INSERT INTO samples VALUES (1, 3.0), (2, NULL)",
        )
        .await;

        let dataset = read_dataset(&pool).await.unwrap();
        assert_eq!(dataset.abundances.column("BB_940").unwrap().counts, vec![3, 0]);
    }

    #[tokio::test]
    async fn test_null_label_is_rejected() {
        let pool = memory_pool().await;
        execute(
            &pool,
            &[
                "CREATE TABLE otu (lowest_taxonomic_unit_found TEXT)",
                "INSERT INTO otu VALUES ('a'), (NULL)",
            ],
        )
        .await;

        let error = read_dataset(&pool).await.unwrap_err();
        assert!(format!("{:#}", error).contains("lowest_taxonomic_unit_found"));
    }

    #[tokio::test]
    async fn test_text_metadata_id_is_rejected() {
        let pool = samples_pool(
            "CREATE TABLE samples (otu_id INTEGER, BB_940 INTEGER)",
            "INSERT INTO samples VALUES (1, 0), (2, 3)",
        )
        .await;
        execute(&pool, &["INSERT INTO samples_metadata (SAMPLEID) VALUES ('BB_940')"]).await;

        let error = read_dataset(&pool).await.unwrap_err();
        assert!(format!("{:#}", error).contains("samples_metadata"));
    }

    #[tokio::test]
    async fn test_load_missing_database_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.sqlite");
        let path = path.to_str().unwrap();

        let error = load_sqlite_dataset(path).await.unwrap_err();
        assert!(error.to_string().contains(path));
        assert!(!dir.path().join("missing.sqlite").exists());
    }

    #[tokio::test]
    async fn test_load_database_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("biodiversity.sqlite");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        execute(
            &pool,
            &[
                "CREATE TABLE otu (lowest_taxonomic_unit_found TEXT)",
                "INSERT INTO otu VALUES ('Bacteria')",
                "CREATE TABLE samples (otu_id INTEGER, BB_940 INTEGER)",
                "INSERT INTO samples VALUES (1, 4)",
                "CREATE TABLE samples_metadata (SAMPLEID INTEGER, ETHNICITY TEXT, GENDER TEXT, \
                 AGE INTEGER, LOCATION TEXT, BBTYPE TEXT, WFREQ REAL)",
                "INSERT INTO samples_metadata VALUES (940, 'Caucasian', 'F', 24, 'Beaufort/NC', 'I', 2)",
            ],
        )
        .await;
        pool.close().await;

        let dataset = load_sqlite_dataset(path.to_str().unwrap()).await.unwrap();
        assert_eq!(dataset.abundances.column("BB_940").unwrap().counts, vec![4]);
        assert_eq!(dataset.metadata[0].weekly_wash_frequency(), Some(2));
        assert!(dataset.is_aligned());
    }
}
