use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Float64Array, Int64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use threat_lens::config::DEFAULT_DATA_PATH;

const ROWS: usize = 3000;

const COUNTRIES: [&str; 10] = [
    "China", "India", "UK", "Germany", "France", "Russia", "USA", "Japan", "Brazil", "Australia",
];
const ATTACK_TYPES: [&str; 6] = [
    "Phishing",
    "Ransomware",
    "Man-in-the-Middle",
    "DDoS",
    "SQL Injection",
    "Malware",
];
const INDUSTRIES: [&str; 7] = [
    "Education",
    "Retail",
    "IT",
    "Telecommunications",
    "Government",
    "Banking",
    "Healthcare",
];
const SOURCES: [&str; 4] = ["Hacker Group", "Nation-state", "Insider", "Unknown"];
const VULNERABILITIES: [&str; 4] = [
    "Unpatched Software",
    "Weak Passwords",
    "Social Engineering",
    "Zero-day",
];
const DEFENSES: [&str; 5] = [
    "VPN",
    "Firewall",
    "AI-based Detection",
    "Antivirus",
    "Encryption",
];

/// Full source row, including the columns the dashboard ignores.
#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "Country")]
    country: &'static str,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Attack Type")]
    attack_type: &'static str,
    #[serde(rename = "Target Industry")]
    industry: &'static str,
    #[serde(rename = "Financial Loss (in Million $)")]
    loss: f64,
    #[serde(rename = "Number of Affected Users")]
    users: u64,
    #[serde(rename = "Attack Source")]
    source: &'static str,
    #[serde(rename = "Security Vulnerability Type")]
    vulnerability: &'static str,
    #[serde(rename = "Defense Mechanism Used")]
    defense: &'static str,
    #[serde(rename = "Incident Resolution Time (in Hours)")]
    hours: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SampleRow> {
    (0..ROWS)
        .map(|_| SampleRow {
            country: rng.pick(&COUNTRIES),
            year: 2015 + (rng.next_u64() % 10) as i64,
            attack_type: rng.pick(&ATTACK_TYPES),
            industry: rng.pick(&INDUSTRIES),
            loss: (rng.range(0.5, 100.0) * 100.0).round() / 100.0,
            users: rng.range(424.0, 999_635.0) as u64,
            source: rng.pick(&SOURCES),
            vulnerability: rng.pick(&VULNERABILITIES),
            defense: rng.pick(&DEFENSES),
            hours: rng.range(1.0, 73.0).floor(),
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> anyhow::Result<()> {
    let strings = |f: fn(&SampleRow) -> &'static str| -> StringArray {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Country", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Attack Type", DataType::Utf8, false),
        Field::new("Target Industry", DataType::Utf8, false),
        Field::new("Financial Loss (in Million $)", DataType::Float64, false),
        Field::new("Number of Affected Users", DataType::UInt64, false),
        Field::new("Attack Source", DataType::Utf8, false),
        Field::new("Security Vulnerability Type", DataType::Utf8, false),
        Field::new("Defense Mechanism Used", DataType::Utf8, false),
        Field::new("Incident Resolution Time (in Hours)", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(strings(|r| r.country)),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
            Arc::new(strings(|r| r.attack_type)),
            Arc::new(strings(|r| r.industry)),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.loss).collect::<Vec<_>>())),
            Arc::new(UInt64Array::from(rows.iter().map(|r| r.users).collect::<Vec<_>>())),
            Arc::new(strings(|r| r.source)),
            Arc::new(strings(|r| r.vulnerability)),
            Arc::new(strings(|r| r.defense)),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.hours).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let parquet_path = csv_path.with_extension("parquet");

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&csv_path, &rows)?;
    write_parquet(&parquet_path, &rows)?;

    println!(
        "Wrote {} incidents to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
