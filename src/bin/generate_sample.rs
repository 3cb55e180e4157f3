//! Writes a deterministic synthetic launch-records dataset to
//! `launch_records.csv` and `launch_records.parquet`, for demoing the
//! dashboard without real data.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (64-bit LCG, Knuth constants).
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn index(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }
}

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
}

fn generate_rows(n: usize, seed: u64) -> Vec<Row> {
    let sites = [
        "CCAFS LC-40",
        "CCAFS SLC-40",
        "KSC LC-39A",
        "VAFB SLC-4E",
    ];
    // (generation, payload range kg, success probability)
    let boosters = [
        ("F9 v1.0", (0.0, 700.0), 0.40),
        ("F9 v1.1", (300.0, 4000.0), 0.55),
        ("F9 FT", (1000.0, 9600.0), 0.75),
        ("F9 B4", (2000.0, 9600.0), 0.80),
        ("F9 B5", (2500.0, 15600.0), 0.92),
    ];

    let mut rng = Lcg::new(seed);
    let mut rows = Vec::with_capacity(n);

    for flight in 0..n {
        let site = sites[rng.index(sites.len())];
        // Later flights fly later booster generations.
        let generation = (flight * boosters.len()) / n;
        let (name, (lo, hi), success_p) = boosters[generation];

        rows.push(Row {
            flight_number: flight as i64 + 1,
            site: site.to_string(),
            class: i64::from(rng.chance(success_p)),
            payload_mass: rng.uniform(lo, hi).round(),
            booster_version: format!("{name} B{}", 1000 + flight),
        });
    }

    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let flight_array = Int64Array::from(rows.iter().map(|r| r.flight_number).collect::<Vec<_>>());
    let site_array = StringArray::from(rows.iter().map(|r| r.site.as_str()).collect::<Vec<_>>());
    let class_array = Int64Array::from(rows.iter().map(|r| r.class).collect::<Vec<_>>());
    let payload_array = Float64Array::from(rows.iter().map(|r| r.payload_mass).collect::<Vec<_>>());
    let booster_array = StringArray::from(
        rows.iter()
            .map(|r| r.booster_version.as_str())
            .collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(flight_array),
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(booster_array),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let rows = generate_rows(120, 42);

    write_csv("launch_records.csv", &rows)?;
    write_parquet("launch_records.parquet", &rows)?;

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to launch_records.csv / .parquet",
        rows.len()
    );
    Ok(())
}
