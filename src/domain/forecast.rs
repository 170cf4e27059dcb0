//! Reduction of the 3-hour forecast feed to one entry per upcoming day.
//!
//! Samples are grouped by local calendar day. The first sample seen for a day
//! represents it unless a later sample of the same day falls at 11:00–13:00
//! local time, in which case the last such sample wins. Representatives are
//! sorted by timestamp, the earliest day is dropped as "today", and at most
//! [`FORECAST_DAYS`] days are kept.

use std::{
    collections::{HashMap, hash_map::Entry},
    ops::RangeInclusive,
};

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use super::weather::{ForecastSample, local_time};

/// Local hours whose samples replace a day's representative.
pub const MIDDAY_HOURS: RangeInclusive<u32> = 11..=13;

/// Number of days kept after dropping the first one.
pub const FORECAST_DAYS: usize = 5;

/// Buckets `samples` using the machine's local time zone.
#[must_use]
pub fn bucket_daily_forecast(
    samples: impl IntoIterator<Item = ForecastSample>,
) -> Vec<ForecastSample> {
    bucket_daily_forecast_in(samples, &Local)
}

/// Buckets `samples` using `tz` for both day grouping and the midday check.
#[must_use]
pub fn bucket_daily_forecast_in<Tz: TimeZone>(
    samples: impl IntoIterator<Item = ForecastSample>,
    tz: &Tz,
) -> Vec<ForecastSample> {
    daily_representatives_in(samples, tz)
        .into_iter()
        .skip(1)
        .take(FORECAST_DAYS)
        .collect()
}

/// One representative per calendar day, ascending by `dt`, before the
/// first day is dropped.
#[must_use]
pub fn daily_representatives_in<Tz: TimeZone>(
    samples: impl IntoIterator<Item = ForecastSample>,
    tz: &Tz,
) -> Vec<ForecastSample> {
    let mut by_day: HashMap<NaiveDate, ForecastSample> = HashMap::new();

    for sample in samples {
        let Some(local) = local_time(sample.dt, tz) else {
            continue;
        };
        let is_midday = MIDDAY_HOURS.contains(&local.hour());
        match by_day.entry(local.date_naive()) {
            Entry::Vacant(slot) => {
                slot.insert(sample);
            }
            Entry::Occupied(mut slot) => {
                if is_midday {
                    slot.insert(sample);
                }
            }
        }
    }

    let mut days = by_day.into_values().collect::<Vec<_>>();
    days.sort_by_key(|sample| sample.dt);
    days
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate};

    use super::*;
    use crate::domain::weather::{SampleCondition, SampleMain};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("utc offset")
    }

    fn at(date: NaiveDate, hour: u32) -> i64 {
        date.and_hms_opt(hour, 0, 0)
            .expect("valid time")
            .and_utc()
            .timestamp()
    }

    fn sample(dt: i64, temp: f32) -> ForecastSample {
        ForecastSample {
            dt,
            main: SampleMain { temp },
            weather: vec![SampleCondition {
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
        }
    }

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 12)
            .expect("valid date")
            .checked_add_days(chrono::Days::new(offset))
            .expect("date in range")
    }

    #[test]
    fn first_sample_is_default_representative() {
        let d = day(0);
        let days = daily_representatives_in(
            vec![sample(at(d, 3), 1.0), sample(at(d, 6), 2.0), sample(at(d, 21), 3.0)],
            &utc(),
        );
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].dt, at(d, 3));
    }

    #[test]
    fn later_midday_sample_overwrites() {
        let d = day(0);
        let days = daily_representatives_in(
            vec![sample(at(d, 11), 1.0), sample(at(d, 12), 2.0)],
            &utc(),
        );
        assert_eq!(days[0].dt, at(d, 12));
    }

    #[test]
    fn midday_window_is_inclusive_on_both_ends() {
        let d = day(0);
        let with_13 =
            daily_representatives_in(vec![sample(at(d, 0), 0.0), sample(at(d, 13), 1.0)], &utc());
        assert_eq!(with_13[0].dt, at(d, 13));

        let with_14 =
            daily_representatives_in(vec![sample(at(d, 0), 0.0), sample(at(d, 14), 1.0)], &utc());
        assert_eq!(with_14[0].dt, at(d, 0));

        let with_10 =
            daily_representatives_in(vec![sample(at(d, 0), 0.0), sample(at(d, 10), 1.0)], &utc());
        assert_eq!(with_10[0].dt, at(d, 0));
    }

    #[test]
    fn hour_is_taken_in_the_given_zone() {
        // 10:00 UTC is 12:00 at UTC+2, so the sample qualifies there only.
        let d = day(0);
        let samples = vec![sample(at(d, 1), 0.0), sample(at(d, 10), 1.0)];
        let plus_two = FixedOffset::east_opt(2 * 3600).expect("offset");

        assert_eq!(daily_representatives_in(samples.clone(), &utc())[0].dt, at(d, 1));
        assert_eq!(daily_representatives_in(samples, &plus_two)[0].dt, at(d, 10));
    }

    #[test]
    fn drop_first_applies_even_without_today() {
        let samples = vec![sample(at(day(3), 12), 3.0), sample(at(day(4), 12), 4.0)];
        let out = bucket_daily_forecast_in(samples, &utc());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].dt, at(day(4), 12));
    }

    #[test]
    fn unsorted_input_is_sorted_by_day() {
        let samples = vec![
            sample(at(day(2), 12), 2.0),
            sample(at(day(0), 12), 0.0),
            sample(at(day(1), 12), 1.0),
        ];
        let out = bucket_daily_forecast_in(samples, &utc());
        let dts = out.iter().map(|s| s.dt).collect::<Vec<_>>();
        assert_eq!(dts, vec![at(day(1), 12), at(day(2), 12)]);
    }

    #[test]
    fn out_of_range_timestamps_are_skipped() {
        let samples = vec![sample(i64::MAX, 0.0), sample(at(day(0), 12), 1.0)];
        let days = daily_representatives_in(samples, &utc());
        assert_eq!(days.len(), 1);
    }
}
