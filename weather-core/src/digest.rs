//! Collapse a 3-hourly forecast series into one entry per calendar day.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use crate::model::{DailyDigestEntry, RawSample};

pub const MAX_DIGEST_DAYS: usize = 7;

/// Pick one representative sample per calendar date.
///
/// The first sample of a day is kept unless a later one falls exactly on
/// noon, which then replaces it. The result is not an aggregate: it says
/// nothing about the daily min, max or mean.
pub fn build_daily_digest(samples: &[RawSample]) -> Vec<DailyDigestEntry> {
    let mut by_day: BTreeMap<NaiveDate, &RawSample> = BTreeMap::new();

    for sample in samples {
        let date = sample.date();
        if !by_day.contains_key(&date) || is_noon(sample) {
            by_day.insert(date, sample);
        }
    }

    by_day
        .into_values()
        .take(MAX_DIGEST_DAYS)
        .map(DailyDigestEntry::from)
        .collect()
}

fn is_noon(sample: &RawSample) -> bool {
    let t = sample.timestamp.time();
    t.hour() == 12 && t.minute() == 0 && t.second() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timefmt;

    fn sample(ts: &str, temp: f64, text: &str) -> RawSample {
        RawSample {
            timestamp: timefmt::parse(ts).expect("valid timestamp"),
            temperature: temp,
            condition_text: text.to_string(),
            condition_icon: "01d".to_string(),
            humidity: 50,
            wind_speed: 3.0,
            pressure: Some(1012),
        }
    }

    #[test]
    fn noon_replaces_first_seen() {
        let samples = vec![
            sample("2024-06-01 09:00:00", 22.0, "clouds"),
            sample("2024-06-01 12:00:00", 25.0, "clear"),
        ];

        let digest = build_daily_digest(&samples);

        assert_eq!(digest.len(), 1);
        assert_eq!(digest[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(digest[0].temperature, 25.0);
        assert_eq!(digest[0].condition_text, "clear");
    }

    #[test]
    fn first_seen_kept_without_noon() {
        let samples = vec![
            sample("2024-06-01 15:00:00", 20.0, "rain"),
            sample("2024-06-01 18:00:00", 18.0, "clouds"),
            sample("2024-06-01 21:00:00", 16.0, "clear"),
        ];

        let digest = build_daily_digest(&samples);

        assert_eq!(digest.len(), 1);
        assert_eq!(digest[0].temperature, 20.0);
        assert_eq!(digest[0].condition_text, "rain");
    }

    #[test]
    fn later_non_noon_does_not_replace_noon() {
        let samples = vec![
            sample("2024-06-01 12:00:00", 25.0, "clear"),
            sample("2024-06-01 15:00:00", 27.0, "clouds"),
        ];

        let digest = build_daily_digest(&samples);
        assert_eq!(digest[0].condition_text, "clear");
    }

    #[test]
    fn empty_series_yields_empty_digest() {
        assert!(build_daily_digest(&[]).is_empty());
    }

    #[test]
    fn sorted_and_capped_at_seven_days() {
        // Deliberately out of order, ten distinct days.
        let mut samples = Vec::new();
        for day in (1..=10).rev() {
            samples.push(sample(&format!("2024-06-{day:02} 06:00:00"), day as f64, "clear"));
        }

        let digest = build_daily_digest(&samples);

        assert_eq!(digest.len(), MAX_DIGEST_DAYS);
        assert!(digest.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(digest[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(digest[6].date, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
    }

    #[test]
    fn every_digest_date_comes_from_input() {
        let mut samples = Vec::new();
        let start = timefmt::parse("2024-06-01 00:00:00").unwrap();
        for slot in 0..40 {
            let ts = start + chrono::Duration::hours(3 * slot);
            samples.push(sample(&timefmt::format(&ts), slot as f64, "clear"));
        }

        let digest = build_daily_digest(&samples);

        assert_eq!(digest.len(), 5);
        for entry in &digest {
            assert!(samples.iter().any(|s| s.date() == entry.date));
            // Noon is always present in a full 3-hourly day.
            let noon = samples
                .iter()
                .find(|s| s.date() == entry.date && is_noon(s))
                .unwrap();
            assert_eq!(entry.temperature, noon.temperature);
        }
    }
}
