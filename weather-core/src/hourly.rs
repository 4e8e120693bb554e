//! Fixed-cadence hourly schedule for a single date.
//!
//! The upstream feed is 3-hourly; clients want a 4-hourly view of one day
//! (00, 04, 08, 12, 16, 20) plus the following midnight. Each intraday slot
//! takes the nearest real sample on that date and is stamped with the
//! canonical time. Dates the feed does not cover are filled with synthetic
//! values, but only when they lie in the future.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::model::{HourlySlot, RawSample};
use crate::random::RandomSource;

/// Hours past midnight of the intraday slots.
pub const INTRADAY_OFFSETS: [u32; 6] = [0, 4, 8, 12, 16, 20];

/// Intraday slots plus the next-day midnight anchor.
pub const SLOTS_PER_DAY: usize = INTRADAY_OFFSETS.len() + 1;

pub const PLACEHOLDER_CONDITION: &str = "clear sky";
pub const DAY_ICON: &str = "01d";
pub const NIGHT_ICON: &str = "01n";

pub const HUMIDITY_RANGE: (i32, i32) = (40, 90);
pub const PRESSURE_RANGE: (i32, i32) = (1000, 1020);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The feed has no samples for a date that is not in the future.
    #[error("No hourly forecast data available for {0}")]
    NotAvailable(NaiveDate),

    /// The date is the last one chrono can represent, so it has no next midnight.
    #[error("Date {0} has no following day")]
    OutOfRange(NaiveDate),
}

/// Build the 7-slot schedule for `requested`.
///
/// `today` decides whether an uncovered date may be synthesized: only dates
/// strictly after it are, anything else is [`ScheduleError::NotAvailable`].
pub fn build_hourly_schedule<R>(
    samples: &[RawSample],
    requested: NaiveDate,
    today: NaiveDate,
    rng: &mut R,
) -> Result<[HourlySlot; SLOTS_PER_DAY], ScheduleError>
where
    R: RandomSource + ?Sized,
{
    let next_day = requested.succ_opt().ok_or(ScheduleError::OutOfRange(requested))?;
    let midnight = requested.and_time(NaiveTime::MIN);
    let next_midnight = next_day.and_time(NaiveTime::MIN);

    let on_date: Vec<&RawSample> = samples.iter().filter(|s| s.date() == requested).collect();

    match on_date.split_first() {
        Some((first, rest)) => {
            let [s0, s1, s2, s3, s4, s5] = INTRADAY_OFFSETS.map(|hour| {
                let target = at_hour(midnight, hour);
                HourlySlot::sourced(target, nearest(first, rest, target))
            });

            let closing = match samples.iter().find(|s| s.date() == next_day) {
                Some(sample) => HourlySlot::sourced(next_midnight, sample),
                None => continue_into_midnight(&s5, next_midnight, rng),
            };

            Ok([s0, s1, s2, s3, s4, s5, closing])
        }
        None if requested > today => Ok(synthesize_day(midnight, next_midnight, rng)),
        None => Err(ScheduleError::NotAvailable(requested)),
    }
}

fn at_hour(midnight: NaiveDateTime, hour: u32) -> NaiveDateTime {
    midnight + Duration::hours(i64::from(hour))
}

/// Closest sample to `target`; on equal distance the earlier-listed one wins.
fn nearest<'a>(
    first: &'a RawSample,
    rest: &[&'a RawSample],
    target: NaiveDateTime,
) -> &'a RawSample {
    let distance = |s: &RawSample| (s.timestamp - target).num_seconds().abs();

    rest.iter().fold(first, |best, &candidate| {
        if distance(candidate) < distance(best) {
            candidate
        } else {
            best
        }
    })
}

/// Next-midnight slot derived from the last intraday slot.
fn continue_into_midnight<R>(
    last: &HourlySlot,
    timestamp: NaiveDateTime,
    rng: &mut R,
) -> HourlySlot
where
    R: RandomSource + ?Sized,
{
    let temperature = last.temperature - rng.float_in(1.0, 3.0);
    let humidity = clamp_humidity(i32::from(last.humidity) + rng.int_in(-5, 5));
    let wind_speed = (last.wind_speed - rng.float_in(0.0, 0.5)).max(0.0);
    let base_pressure = match last.pressure {
        Some(p) => p,
        None => rng.int_in(PRESSURE_RANGE.0, PRESSURE_RANGE.1),
    };

    HourlySlot {
        timestamp,
        temperature,
        condition_text: last.condition_text.clone(),
        condition_icon: NIGHT_ICON.to_string(),
        humidity,
        wind_speed,
        pressure: Some(base_pressure + rng.int_in(-2, 2)),
    }
}

fn synthesize_day<R>(
    midnight: NaiveDateTime,
    next_midnight: NaiveDateTime,
    rng: &mut R,
) -> [HourlySlot; SLOTS_PER_DAY]
where
    R: RandomSource + ?Sized,
{
    let [s0, s1, s2, s3, s4, s5] = INTRADAY_OFFSETS
        .map(|hour| synthesize_intraday(at_hour(midnight, hour), hour, &mut *rng));
    let closing = synthesize_midnight(next_midnight, rng);

    [s0, s1, s2, s3, s4, s5, closing]
}

fn synthesize_intraday<R>(timestamp: NaiveDateTime, hour: u32, rng: &mut R) -> HourlySlot
where
    R: RandomSource + ?Sized,
{
    let base = if hour < 8 {
        5.0
    } else if hour < 16 {
        15.0
    } else {
        10.0
    };
    let icon = if (6..=18).contains(&hour) {
        DAY_ICON
    } else {
        NIGHT_ICON
    };

    HourlySlot {
        timestamp,
        temperature: base + rng.float_in(-2.0, 5.0),
        condition_text: PLACEHOLDER_CONDITION.to_string(),
        condition_icon: icon.to_string(),
        humidity: clamp_humidity(rng.int_in(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1)),
        wind_speed: rng.float_in(1.0, 8.0),
        pressure: Some(rng.int_in(PRESSURE_RANGE.0, PRESSURE_RANGE.1)),
    }
}

/// Next-midnight slot for a fully synthesized day: a cool night band,
/// independent of the intraday slots.
fn synthesize_midnight<R>(timestamp: NaiveDateTime, rng: &mut R) -> HourlySlot
where
    R: RandomSource + ?Sized,
{
    HourlySlot {
        timestamp,
        temperature: 5.0 + rng.float_in(-2.0, 2.0),
        condition_text: PLACEHOLDER_CONDITION.to_string(),
        condition_icon: NIGHT_ICON.to_string(),
        humidity: clamp_humidity(rng.int_in(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1)),
        wind_speed: rng.float_in(1.0, 4.0),
        pressure: Some(rng.int_in(PRESSURE_RANGE.0, PRESSURE_RANGE.1)),
    }
}

fn clamp_humidity(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}
