// src/process/aggregate.rs

use std::{collections::BTreeMap, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::process::date_parser::parse_year_month;

/// One day of raw weather observations. Input files may carry additional
/// columns; only the ones named here are read.
#[derive(Debug, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    pub actual_precipitation: Option<f64>,
    pub actual_mean_temp: Option<f64>,
    pub actual_min_temp: Option<f64>,
    pub actual_max_temp: Option<f64>,
}

/// Mean daily weather values for one city, year, and month.
/// Field order matches the combined CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub actual_precipitation: Option<f64>,
    pub actual_mean_temp: Option<f64>,
    pub actual_min_temp: Option<f64>,
    pub actual_max_temp: Option<f64>,
    pub city: String,
}

/// Running mean that skips missing values.
/// Zero observations yields `None`, never 0.0.
#[derive(Debug, Default)]
struct MeanState {
    sum: f64,
    count: u64,
}

impl MeanState {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct MonthState {
    precipitation: MeanState,
    mean_temp: MeanState,
    min_temp: MeanState,
    max_temp: MeanState,
}

/// Reads one city's daily CSV and reduces it to monthly means.
///
/// Rows are grouped by (year, month); each group's four numeric fields are
/// averaged with skip-missing semantics. Output rows are sorted ascending by
/// (year, month) and all carry `city`. An unparseable `date` is an error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display(), city = %city))]
pub fn aggregate_city_file<P: AsRef<Path>>(path: P, city: &str) -> Result<Vec<MonthlyAggregate>> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening input file {}", path.display()))?;

    let mut groups: BTreeMap<(i32, u32), MonthState> = BTreeMap::new();
    let mut rows = 0u64;

    for (idx, result) in rdr.deserialize().enumerate() {
        let record: DailyRecord = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;

        let (year, month) = parse_year_month(&record.date).ok_or_else(|| {
            anyhow!(
                "unparseable date {:?} in {} at record {}",
                record.date,
                path.display(),
                idx
            )
        })?;

        let state = groups.entry((year, month)).or_default();
        state.precipitation.push(record.actual_precipitation);
        state.mean_temp.push(record.actual_mean_temp);
        state.min_temp.push(record.actual_min_temp);
        state.max_temp.push(record.actual_max_temp);
        rows += 1;
    }

    debug!(rows, groups = groups.len(), "grouped daily records");

    Ok(groups
        .into_iter()
        .map(|((year, month), state)| MonthlyAggregate {
            year,
            month,
            actual_precipitation: state.precipitation.mean(),
            actual_mean_temp: state.mean_temp.mean(),
            actual_min_temp: state.min_temp.mean(),
            actual_max_temp: state.max_temp.mean(),
            city: city.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("create temp file");
        tmp.write_all(content.as_bytes()).expect("write temp file");
        tmp
    }

    #[test]
    fn one_row_per_distinct_year_month() -> Result<()> {
        let tmp = write_csv(
            "date,actual_precipitation,actual_mean_temp,actual_min_temp,actual_max_temp\n\
             2014-07-01,0.0,81,70,91\n\
             2014-07-02,0.1,82,72,93\n\
             2014-08-01,0.0,85,75,95\n\
             2015-07-01,0.2,80,69,90\n",
        );

        let monthly = aggregate_city_file(tmp.path(), "CLT")?;
        let keys: Vec<(i32, u32)> = monthly.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, vec![(2014, 7), (2014, 8), (2015, 7)]);
        assert!(monthly.iter().all(|m| m.city == "CLT"));
        Ok(())
    }

    #[test]
    fn means_match_hand_computed_values() -> Result<()> {
        // two January rows, one February row
        let tmp = write_csv(
            "date,actual_precipitation,actual_mean_temp,actual_min_temp,actual_max_temp\n\
             2015-01-10,1.0,50,40,60\n\
             2015-01-20,2.0,60,50,70\n\
             2015-02-05,3.0,70,60,80\n",
        );

        let monthly = aggregate_city_file(tmp.path(), "X")?;
        assert_eq!(monthly.len(), 2);

        let jan = &monthly[0];
        assert_eq!((jan.year, jan.month), (2015, 1));
        assert_eq!(jan.actual_precipitation, Some(1.5));
        assert_eq!(jan.actual_mean_temp, Some(55.0));
        assert_eq!(jan.actual_min_temp, Some(45.0));
        assert_eq!(jan.actual_max_temp, Some(65.0));

        let feb = &monthly[1];
        assert_eq!((feb.year, feb.month), (2015, 2));
        assert_eq!(feb.actual_precipitation, Some(3.0));
        assert_eq!(feb.actual_mean_temp, Some(70.0));
        Ok(())
    }

    #[test]
    fn missing_values_are_skipped_not_zeroed() -> Result<()> {
        let tmp = write_csv(
            "date,actual_precipitation,actual_mean_temp,actual_min_temp,actual_max_temp\n\
             2015-03-01,1.0,,40,60\n\
             2015-03-02,3.0,50,,70\n",
        );

        let monthly = aggregate_city_file(tmp.path(), "X")?;
        assert_eq!(monthly.len(), 1);
        let mar = &monthly[0];
        assert_eq!(mar.actual_precipitation, Some(2.0));
        // one non-missing value each, not averaged against an implicit zero
        assert_eq!(mar.actual_mean_temp, Some(50.0));
        assert_eq!(mar.actual_min_temp, Some(40.0));
        assert_eq!(mar.actual_max_temp, Some(65.0));
        Ok(())
    }

    #[test]
    fn all_missing_group_yields_none() -> Result<()> {
        let tmp = write_csv(
            "date,actual_precipitation,actual_mean_temp,actual_min_temp,actual_max_temp\n\
             2015-04-01,,50,40,60\n\
             2015-04-02,,52,42,62\n",
        );

        let monthly = aggregate_city_file(tmp.path(), "X")?;
        assert_eq!(monthly[0].actual_precipitation, None);
        assert_eq!(monthly[0].actual_mean_temp, Some(51.0));
        Ok(())
    }

    #[test]
    fn extra_columns_are_ignored() -> Result<()> {
        let tmp = write_csv(
            "date,actual_mean_temp,actual_min_temp,actual_max_temp,actual_precipitation,average_precipitation,record_precipitation\n\
             2014-07-01,81,70,91,0.5,0.1,1.2\n",
        );

        let monthly = aggregate_city_file(tmp.path(), "X")?;
        assert_eq!(monthly[0].actual_precipitation, Some(0.5));
        assert_eq!(monthly[0].actual_max_temp, Some(91.0));
        Ok(())
    }

    #[test]
    fn unparseable_date_is_fatal() {
        let tmp = write_csv(
            "date,actual_precipitation,actual_mean_temp,actual_min_temp,actual_max_temp\n\
             not-a-date,1.0,50,40,60\n",
        );

        let err = aggregate_city_file(tmp.path(), "X").unwrap_err();
        assert!(err.to_string().contains("unparseable date"));
    }

    #[test]
    fn missing_input_file_is_fatal() {
        let err = aggregate_city_file("does/not/exist.csv", "X").unwrap_err();
        assert!(err.to_string().contains("opening input file"));
    }
}
