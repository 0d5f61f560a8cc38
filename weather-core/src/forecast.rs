//! Day bucketing for the 3-hourly forecast feed.
//!
//! Dates and hours are taken in UTC, matching the epoch timestamps the
//! gateway returns, so the result does not depend on the host time zone.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use tracing::debug;

use crate::{
    condition::WeatherCondition,
    model::{ForecastDay, ForecastSet, RawForecastSample, TemperatureRange},
    units::round_temperature,
};

const NOON: u32 = 12;

/// Collapse `samples` into at most five days, one sample per UTC date.
///
/// The representative of a day is the sample whose hour is closest to noon.
/// On equal distance the sample seen first in `samples` is kept.
pub fn reduce(samples: &[RawForecastSample]) -> Vec<ForecastDay> {
    let mut by_day: BTreeMap<NaiveDate, (DateTime<Utc>, &RawForecastSample)> = BTreeMap::new();

    for sample in samples {
        let Some(at) = DateTime::from_timestamp(sample.timestamp, 0) else {
            debug!(timestamp = sample.timestamp, "skipping forecast sample with invalid timestamp");
            continue;
        };

        by_day
            .entry(at.date_naive())
            .and_modify(|best| {
                if noon_distance(&at) < noon_distance(&best.0) {
                    *best = (at, sample);
                }
            })
            .or_insert((at, sample));
    }

    by_day
        .into_values()
        .take(ForecastSet::MAX_DAYS)
        .map(|(at, sample)| to_forecast_day(at, sample))
        .collect()
}

fn noon_distance(at: &DateTime<Utc>) -> u32 {
    at.hour().abs_diff(NOON)
}

fn to_forecast_day(at: DateTime<Utc>, sample: &RawForecastSample) -> ForecastDay {
    ForecastDay {
        date: at.format("%a, %b %-d").to_string(),
        day_of_week: at.format("%a").to_string(),
        temperature: TemperatureRange {
            min: round_temperature(sample.temp_min),
            max: round_temperature(sample.temp_max),
        },
        condition: WeatherCondition::normalize(&sample.condition),
        icon: sample.icon.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap().timestamp()
    }

    fn sample(day: u32, hour: u32, min: f64, max: f64, condition: &str) -> RawForecastSample {
        RawForecastSample {
            timestamp: ts(day, hour),
            temp_min: min,
            temp_max: max,
            condition: condition.to_string(),
            icon: format!("{hour:02}d"),
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(reduce(&[]).is_empty());
    }

    #[test]
    fn picks_sample_closest_to_noon() {
        let samples = vec![
            sample(26, 0, 10.0, 11.0, "Clouds"),
            sample(26, 9, 14.0, 15.0, "Rain"),
            sample(26, 12, 16.2, 21.7, "Clear"),
            sample(26, 18, 13.0, 14.0, "Snow"),
        ];

        let days = reduce(&samples);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition, WeatherCondition::Clear);
        assert_eq!(days[0].temperature, TemperatureRange { min: 16, max: 22 });
        assert_eq!(days[0].icon, "12d");
    }

    #[test]
    fn equal_distance_keeps_first_seen() {
        let forward = vec![sample(26, 9, 1.0, 2.0, "Rain"), sample(26, 15, 3.0, 4.0, "Snow")];
        assert_eq!(reduce(&forward)[0].condition, WeatherCondition::Rain);

        let backward = vec![sample(26, 15, 3.0, 4.0, "Snow"), sample(26, 9, 1.0, 2.0, "Rain")];
        assert_eq!(reduce(&backward)[0].condition, WeatherCondition::Snow);
    }

    #[test]
    fn ten_samples_over_five_days() {
        let samples: Vec<_> = (26..=30)
            .flat_map(|d| [sample(d, 6, 10.0, 15.0, "Clouds"), sample(d, 15, 12.0, 20.0, "Clear")])
            .collect();
        assert_eq!(samples.len(), 10);

        let days = reduce(&samples);
        assert_eq!(days.len(), 5);
        // 15:00 is closer to noon than 06:00
        assert!(days.iter().all(|d| d.condition == WeatherCondition::Clear));
    }

    #[test]
    fn caps_at_five_days_and_orders_by_date() {
        let samples: Vec<_> = [24, 20, 23, 22, 21, 19, 25]
            .into_iter()
            .map(|d| sample(d, 12, 10.0, 20.0, "Clear"))
            .collect();

        let days = reduce(&samples);
        let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            ["Thu, Jun 19", "Fri, Jun 20", "Sat, Jun 21", "Sun, Jun 22", "Mon, Jun 23"]
        );
    }

    #[test]
    fn formats_dates_and_weekday() {
        let days = reduce(&[sample(26, 12, 16.0, 22.0, "Clear")]);
        assert_eq!(days[0].date, "Thu, Jun 26");
        assert_eq!(days[0].day_of_week, "Thu");
    }

    #[test]
    fn buckets_by_utc_date_at_midnight_boundary() {
        let samples = vec![
            RawForecastSample {
                timestamp: ts(26, 23) + 59 * 60,
                temp_min: 1.0,
                temp_max: 1.0,
                condition: "Rain".into(),
                icon: "10n".into(),
            },
            sample(27, 0, 2.0, 2.0, "Snow"),
        ];

        let days = reduce(&samples);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_of_week, "Thu");
        assert_eq!(days[1].day_of_week, "Fri");
    }

    #[test]
    fn unknown_condition_is_normalized() {
        let days = reduce(&[sample(26, 12, 5.0, 6.0, "Tornado")]);
        assert_eq!(days[0].condition, WeatherCondition::Clear);
    }

    #[test]
    fn out_of_range_timestamp_is_skipped() {
        let mut bad = sample(26, 12, 5.0, 6.0, "Rain");
        bad.timestamp = i64::MAX;

        let days = reduce(&[bad, sample(27, 12, 5.0, 6.0, "Snow")]);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition, WeatherCondition::Snow);
    }
}
