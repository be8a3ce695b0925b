//! Synthetic outbreak generation.
//!
//! Produces ECDC-shaped daily records without a real report: each country
//! follows a logistic epidemic curve with log-normal day-to-day noise, deaths
//! trail cases by a fixed lag, and a few days are left blank the way real
//! reports occasionally are. The output is deterministic for a given seed.

use std::fs::File;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Metric, Record};
use crate::error::AppError;

/// Days between an infection being reported and a resulting death.
const DEATH_LAG_DAYS: usize = 7;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub countries: Vec<String>,
    pub start: NaiveDate,
    pub days: usize,
    pub seed: u64,
    /// Probability that a day's counters are missing.
    pub missing_prob: f64,
    /// Standard deviation of the log-normal noise on daily counts.
    pub noise_sigma: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            countries: ["Italy", "Spain", "Germany", "France", "United_Kingdom", "South_Korea"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            start: NaiveDate::from_ymd_opt(2020, 1, 31).unwrap_or_default(),
            days: 70,
            seed: 42,
            missing_prob: 0.03,
            noise_sigma: 0.2,
        }
    }
}

/// Generate date-sorted records for every configured country.
pub fn generate_outbreak(config: &SampleConfig) -> Result<Vec<Record>, AppError> {
    if config.countries.is_empty() {
        return Err(AppError::new(2, "Sample needs at least one country."));
    }
    if config.days == 0 {
        return Err(AppError::new(2, "Sample day count must be > 0."));
    }
    if !(0.0..1.0).contains(&config.missing_prob) {
        return Err(AppError::new(2, "Missing-value probability must be in [0, 1)."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_sigma.max(0.0))
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let mut per_country: Vec<Vec<Record>> = Vec::with_capacity(config.countries.len());
    for name in &config.countries {
        let ceiling = 10f64.powf(rng.gen_range(3.0..5.5));
        let rate = rng.gen_range(0.15..0.35);
        let midpoint = rng.gen_range(config.days as f64 * 0.4..config.days as f64 * 1.1);
        let fatality = rng.gen_range(0.01..0.1);

        let cumulative = |t: f64| ceiling / (1.0 + (-rate * (t - midpoint)).exp());
        let mut cases = Vec::with_capacity(config.days);
        for t in 0..config.days {
            let expected = cumulative(t as f64) - cumulative(t as f64 - 1.0);
            let noisy = expected * noise.sample(&mut rng).exp();
            cases.push(noisy.round().max(0.0));
        }

        let mut rows = Vec::with_capacity(config.days);
        for (t, &c) in cases.iter().enumerate() {
            let date = config.start + Duration::days(t as i64);
            let mut record = Record::new(date, name.as_str());
            if !rng.gen_bool(config.missing_prob) {
                let lagged = t.checked_sub(DEATH_LAG_DAYS).map(|i| cases[i]).unwrap_or(0.0);
                let deaths = (lagged * fatality * noise.sample(&mut rng).exp()).round();
                record = record
                    .with_field(Metric::Cases.column(), c)
                    .with_field(Metric::Deaths.column(), deaths);
            }
            rows.push(record);
        }
        per_country.push(rows);
    }

    // Interleave by date like a real daily report.
    let mut records: Vec<Record> = per_country.into_iter().flatten().collect();
    records.sort_by_key(|r| r.date);
    Ok(records)
}

/// Write records in the ECDC daily-report layout.
pub fn write_sample_csv(path: &Path, records: &[Record]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["dateRep", "day", "month", "year", "cases", "deaths", "countriesAndTerritories"])
        .map_err(|e| AppError::new(2, format!("Failed to write sample CSV header: {e}")))?;

    for r in records {
        let fmt = |field: &str| r.value(field).map(|v| format!("{v:.0}")).unwrap_or_default();
        writer
            .write_record([
                r.date.format("%d-%m-%Y").to_string(),
                r.date.day().to_string(),
                r.date.month().to_string(),
                r.date.year().to_string(),
                fmt(Metric::Cases.column()),
                fmt(Metric::Deaths.column()),
                r.country.clone(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write sample CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write sample CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::{IngestOptions, load_records};

    #[test]
    fn same_seed_same_data() {
        let config = SampleConfig::default();
        let a = generate_outbreak(&config).unwrap();
        let b = generate_outbreak(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), config.countries.len() * config.days);
        assert!(a.windows(2).all(|w| w[0].date <= w[1].date));

        let other = generate_outbreak(&SampleConfig { seed: 43, ..config }).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn rejects_bad_settings() {
        let config = SampleConfig {
            days: 0,
            ..SampleConfig::default()
        };
        assert_eq!(generate_outbreak(&config).unwrap_err().exit_code(), 2);

        let config = SampleConfig {
            missing_prob: 1.0,
            ..SampleConfig::default()
        };
        assert!(generate_outbreak(&config).is_err());
    }

    #[test]
    fn written_csv_loads_back() {
        let config = SampleConfig {
            countries: vec!["Italy".to_string(), "Spain".to_string()],
            days: 30,
            missing_prob: 0.2,
            ..SampleConfig::default()
        };
        let records = generate_outbreak(&config).unwrap();
        let missing = records.iter().filter(|r| r.value("cases").is_none()).count();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        write_sample_csv(&path, &records).unwrap();

        let data = load_records(&path, &IngestOptions::default()).unwrap();
        assert_eq!(data.rows_used, 60);
        assert!(data.row_errors.is_empty());
        assert_eq!(data.stats.countries, 2);
        let reloaded_missing = data.records.iter().filter(|r| r.value("cases").is_none()).count();
        assert_eq!(reloaded_missing, missing);
    }
}
