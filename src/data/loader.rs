use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{
    IncidentRecord, IncidentTable, COL_AFFECTED_USERS, COL_ATTACK_SOURCE, COL_ATTACK_TYPE,
    COL_COUNTRY, COL_DEFENSE, COL_FINANCIAL_LOSS, COL_RESOLUTION_TIME, REQUIRED_COLUMNS,
};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an incident table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names (recommended)
/// * `.json`    – `[{ "Country": "...", "Attack Type": "...", ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<IncidentTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "csv" => std::fs::File::open(path)
            .with_context(|| format!("opening CSV file {}", path.display()))
            .and_then(parse_csv),
        "json" => std::fs::File::open(path)
            .with_context(|| format!("opening JSON file {}", path.display()))
            .and_then(parse_json),
        "parquet" | "pq" => load_parquet(path),
        other => Err(anyhow::anyhow!("Unsupported file extension: .{other}")),
    };

    let table = loaded.map_err(|e| DashboardError::data_load(path.display().to_string(), e))?;
    log::info!(
        "Loaded {} incidents from {} with attack types {:?}",
        table.len(),
        path.display(),
        table.attack_types()
    );
    Ok(table)
}

/// Parse CSV incident data from any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<IncidentTable> {
    parse_csv(reader).map_err(|e| DashboardError::data_load("<csv stream>", e))
}

/// Parse records-oriented JSON incident data from any reader.
pub fn read_json<R: Read>(reader: R) -> Result<IncidentTable> {
    parse_json(reader).map_err(|e| DashboardError::data_load("<json stream>", e))
}

fn ensure_columns(present: &[&str]) -> anyhow::Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|req| !present.contains(req))
        .collect();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; every required column must be
/// present, additional columns (`Year`, `Target Industry`, ...) are ignored.
fn parse_csv<R: Read>(reader: R) -> anyhow::Result<IncidentTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    ensure_columns(&headers.iter().map(String::as_str).collect::<Vec<_>>())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<IncidentRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV record {}", row_no + 1))?;
        records.push(record);
    }

    Ok(IncidentTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Country": "China",
///     "Attack Type": "Phishing",
///     "Financial Loss (in Million $)": 80.53,
///     ...
///   }
/// ]
/// ```
fn parse_json<R: Read>(reader: R) -> anyhow::Result<IncidentTable> {
    let root: serde_json::Value = serde_json::from_reader(reader).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        ensure_columns(&keys).with_context(|| format!("Row {i}"))?;
        let record: IncidentRecord =
            serde_json::from_value(row.clone()).with_context(|| format!("Row {i}"))?;
        records.push(record);
    }

    Ok(IncidentTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one incident per row.
///
/// String columns may be `Utf8` or `LargeUtf8`; numeric columns may be any
/// of `Float64`, `Float32`, `Int64`, `Int32` or `UInt64`.  Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**.
fn load_parquet(path: &Path) -> anyhow::Result<IncidentTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, &mut records)?;
    }

    Ok(IncidentTable::from_records(records))
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<IncidentRecord>) -> anyhow::Result<()> {
    let schema = batch.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    ensure_columns(&names)?;

    let country = column(batch, COL_COUNTRY)?;
    let attack_type = column(batch, COL_ATTACK_TYPE)?;
    let attack_source = column(batch, COL_ATTACK_SOURCE)?;
    let defense = column(batch, COL_DEFENSE)?;
    let loss = column(batch, COL_FINANCIAL_LOSS)?;
    let users = column(batch, COL_AFFECTED_USERS)?;
    let hours = column(batch, COL_RESOLUTION_TIME)?;

    for row in 0..batch.num_rows() {
        let record = IncidentRecord {
            country: extract_string(country, row)?,
            attack_type: extract_string(attack_type, row)?,
            attack_source: extract_string(attack_source, row)?,
            defense_mechanism: extract_string(defense, row)?,
            financial_loss_musd: extract_f64(loss, row)?,
            affected_users: extract_count(users, row)?,
            resolution_time_hours: extract_f64(hours, row)?,
        };
        records.push(record);
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> anyhow::Result<&'a Arc<dyn Array>> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<String> {
    if col.is_null(row) {
        bail!("Row {row}: null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Row {row}: expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<f64> {
    if col.is_null(row) {
        bail!("Row {row}: null value in numeric column");
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        DataType::UInt64 => downcast::<UInt64Array>(col)?.value(row) as f64,
        other => bail!("Row {row}: expected numeric column, got {other:?}"),
    };
    Ok(value)
}

fn extract_count(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<u64> {
    if col.data_type() == &DataType::UInt64 && !col.is_null(row) {
        return Ok(downcast::<UInt64Array>(col)?.value(row));
    }
    let v = extract_f64(col, row)?;
    if v < 0.0 || v.fract() != 0.0 {
        bail!("Row {row}: affected-user count {v} is not a non-negative integer");
    }
    Ok(v as u64)
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> anyhow::Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", col.data_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::ArrayRef;
    use parquet::arrow::ArrowWriter;

    const HEADER: &str = "Country,Year,Attack Type,Target Industry,Financial Loss (in Million $),\
Number of Affected Users,Attack Source,Security Vulnerability Type,Defense Mechanism Used,\
Incident Resolution Time (in Hours)\n";

    #[test]
    fn csv_rows_keep_file_order_and_ignore_extra_columns() {
        let text = format!(
            "{HEADER}China,2019,Phishing,Education,80.53,773169,Hacker Group,Unpatched Software,VPN,63\n\
             India,2017,Ransomware,Retail,62.19,295961,Hacker Group,Unpatched Software,Firewall,71\n\
             UK,2024,Man-in-the-Middle,IT,38.65,605895,Hacker Group,Weak Passwords,VPN,20\n"
        );
        let table = read_csv(text.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        let countries: Vec<&str> = table.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, ["China", "India", "UK"]);
        assert_eq!(table.records()[0].affected_users, 773_169);
        assert_eq!(table.records()[1].financial_loss_musd, 62.19);
        assert_eq!(table.records()[2].resolution_time_hours, 20.0);
        assert_eq!(
            table.attack_types(),
            ["Phishing", "Ransomware", "Man-in-the-Middle"]
        );
    }

    #[test]
    fn csv_missing_columns_are_named() {
        let text = "Country,Attack Type,Attack Source\nUSA,Phishing,Insider\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        let msg = err.to_string();

        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(msg.contains("Defense Mechanism Used"), "{msg}");
        assert!(msg.contains("Financial Loss (in Million $)"), "{msg}");
        assert!(!msg.contains("Attack Source,"), "{msg}");
    }

    #[test]
    fn csv_non_numeric_loss_is_rejected() {
        let text = format!(
            "{HEADER}China,2019,Phishing,Education,lots,773169,Hacker Group,Unpatched Software,VPN,63\n"
        );
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("CSV record 1"), "{err}");
    }

    #[test]
    fn json_records_are_loaded() {
        let text = r#"[
            {"Country": "USA", "Attack Type": "Phishing", "Attack Source": "Insider",
             "Defense Mechanism Used": "Firewall", "Financial Loss (in Million $)": 5,
             "Number of Affected Users": 100, "Incident Resolution Time (in Hours)": 2,
             "Year": 2020}
        ]"#;
        let table = read_json(text.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].financial_loss_musd, 5.0);
        assert_eq!(table.attack_types(), ["Phishing"]);
    }

    #[test]
    fn json_row_without_column_fails() {
        let text = r#"[{"Country": "USA", "Attack Type": "Phishing"}]"#;
        let err = read_json(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Attack Source"), "{err}");
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    // -- Parquet --

    fn write_parquet(columns: Vec<(&str, ArrayRef)>) -> tempfile::NamedTempFile {
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn parquet_columns(users: ArrayRef) -> Vec<(&'static str, ArrayRef)> {
        vec![
            (COL_COUNTRY, Arc::new(StringArray::from(vec!["USA", "UK"])) as ArrayRef),
            (COL_ATTACK_TYPE, Arc::new(StringArray::from(vec!["Phishing", "DDoS"])) as ArrayRef),
            (COL_FINANCIAL_LOSS, Arc::new(Float32Array::from(vec![5.5_f32, 3.0])) as ArrayRef),
            (COL_AFFECTED_USERS, users),
            (COL_ATTACK_SOURCE, Arc::new(StringArray::from(vec!["Insider", "Unknown"])) as ArrayRef),
            (COL_DEFENSE, Arc::new(StringArray::from(vec!["Firewall", "VPN"])) as ArrayRef),
            (COL_RESOLUTION_TIME, Arc::new(Int64Array::from(vec![2_i64, 4])) as ArrayRef),
        ]
    }

    #[test]
    fn parquet_numeric_columns_are_coerced() {
        let file = write_parquet(parquet_columns(Arc::new(Int32Array::from(vec![100, 50]))));
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let users: Vec<u64> = table.records().iter().map(|r| r.affected_users).collect();
        assert_eq!(users, [100, 50]);
        assert_eq!(table.records()[0].financial_loss_musd, 5.5);
        assert_eq!(table.records()[1].resolution_time_hours, 4.0);
        assert_eq!(table.attack_types(), ["Phishing", "DDoS"]);
    }

    #[test]
    fn parquet_fractional_user_count_is_rejected() {
        let file = write_parquet(parquet_columns(Arc::new(Float64Array::from(vec![1.5, 2.0]))));
        let err = load_file(file.path()).unwrap_err();

        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(err.to_string().contains("1.5 is not a non-negative integer"), "{err}");
    }

    #[test]
    fn parquet_missing_column_is_named() {
        let columns = parquet_columns(Arc::new(UInt64Array::from(vec![100_u64, 50])))
            .into_iter()
            .filter(|(name, _)| *name != COL_DEFENSE)
            .collect();
        let file = write_parquet(columns);
        let err = load_file(file.path()).unwrap_err();

        assert!(err.to_string().contains(COL_DEFENSE), "{err}");
    }

    #[test]
    fn unsupported_extension_is_a_load_error() {
        let err = load_file(Path::new("incidents.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"), "{err}");
    }
}
