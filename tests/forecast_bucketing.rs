mod common;

use std::collections::HashSet;

use abweather::domain::{
    forecast::{FORECAST_DAYS, bucket_daily_forecast_in, daily_representatives_in},
    weather::local_time,
};
use chrono::FixedOffset;
use common::{at, day, sample, utc};
use proptest::prelude::*;

/// Eight samples per day at 01, 04, ..., 22 so 13:00 is present and 12:00 is not.
fn three_hour_feed(tz: &FixedOffset, days: u64) -> Vec<abweather::domain::weather::ForecastSample> {
    (0..days)
        .flat_map(|offset| {
            (0..8).map(move |slot| {
                let hour = 1 + slot * 3;
                sample(at(tz, day(offset), hour), offset as f32 * 10.0 + hour as f32)
            })
        })
        .collect()
}

#[test]
fn today_plus_five_days_yields_days_one_to_five_at_thirteen() {
    let tz = utc();
    let out = bucket_daily_forecast_in(three_hour_feed(&tz, 6), &tz);

    assert_eq!(out.len(), 5);
    for (idx, entry) in out.iter().enumerate() {
        assert_eq!(entry.dt, at(&tz, day(idx as u64 + 1), 13));
    }
    assert!(out.windows(2).all(|pair| pair[0].dt < pair[1].dt));
}

#[test]
fn single_day_is_dropped_as_today() {
    let tz = utc();
    let feed = vec![
        sample(at(&tz, day(0), 9), 10.0),
        sample(at(&tz, day(0), 12), 14.0),
        sample(at(&tz, day(0), 18), 12.0),
    ];
    assert!(bucket_daily_forecast_in(feed, &tz).is_empty());
}

#[test]
fn empty_feed_gives_empty_forecast() {
    assert!(bucket_daily_forecast_in(Vec::new(), &utc()).is_empty());
}

#[test]
fn seven_days_are_windowed_to_five() {
    let tz = utc();
    // Days numbered 1..=7; output keeps 2..=6.
    let feed = (1..=7)
        .map(|n| sample(at(&tz, day(n), 12), n as f32))
        .collect::<Vec<_>>();

    let out = bucket_daily_forecast_in(feed, &tz);
    let temps = out.iter().map(|s| s.main.temp).collect::<Vec<_>>();
    assert_eq!(temps, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn twelve_oclock_replaces_eleven_oclock() {
    let tz = utc();
    let eleven = sample(at(&tz, day(0), 11), 11.0);
    let twelve = sample(at(&tz, day(0), 12), 12.0);

    let days = daily_representatives_in(vec![eleven, twelve.clone()], &tz);
    assert_eq!(days, vec![twelve]);
}

#[test]
fn midday_tie_break_follows_input_order() {
    let tz = utc();
    let eleven = sample(at(&tz, day(1), 11), 11.0);
    let thirteen = sample(at(&tz, day(1), 13), 13.0);
    let today = sample(at(&tz, day(0), 12), 0.0);

    let forward = bucket_daily_forecast_in(
        vec![today.clone(), eleven.clone(), thirteen.clone()],
        &tz,
    );
    let reversed = bucket_daily_forecast_in(vec![today, thirteen, eleven], &tz);

    assert_eq!(forward[0].main.temp, 13.0);
    assert_eq!(reversed[0].main.temp, 11.0);
}

#[test]
fn grouping_uses_the_given_zone() {
    // 23:00 UTC on day 1 is already day 2 in UTC+2.
    let plus_two = FixedOffset::east_opt(2 * 3600).expect("offset");
    let late = at(&utc(), day(1), 23);
    let feed = vec![
        sample(at(&utc(), day(0), 12), 0.0),
        sample(at(&utc(), day(1), 12), 1.0),
        sample(late, 2.0),
    ];

    assert_eq!(bucket_daily_forecast_in(feed.clone(), &utc()).len(), 1);
    assert_eq!(bucket_daily_forecast_in(feed, &plus_two).len(), 2);
}

fn feed_strategy() -> impl Strategy<Value = Vec<(i64, f32)>> {
    // Roughly five days of timestamps around 2026-03-02, any order.
    prop::collection::vec(
        (1_772_400_000_i64..1_772_900_000_i64, -30.0f32..45.0f32),
        0..48,
    )
}

fn zone_strategy() -> impl Strategy<Value = FixedOffset> {
    (-12 * 4..=14 * 4_i32)
        .prop_map(|quarters| FixedOffset::east_opt(quarters * 900).expect("offset in range"))
}

proptest! {
    #[test]
    fn bucketing_properties_hold(raw in feed_strategy(), tz in zone_strategy()) {
        let feed = raw.iter().map(|&(dt, temp)| sample(dt, temp)).collect::<Vec<_>>();
        let distinct_days = feed
            .iter()
            .filter_map(|s| local_time(s.dt, &tz).map(|t| t.date_naive()))
            .collect::<HashSet<_>>()
            .len();

        let out = bucket_daily_forecast_in(feed.clone(), &tz);

        prop_assert!(out.len() <= FORECAST_DAYS);
        prop_assert!(out.len() <= distinct_days.saturating_sub(1));
        prop_assert!(out.windows(2).all(|pair| pair[0].dt < pair[1].dt));

        let out_days = out
            .iter()
            .filter_map(|s| local_time(s.dt, &tz).map(|t| t.date_naive()))
            .collect::<HashSet<_>>();
        prop_assert_eq!(out_days.len(), out.len());

        prop_assert_eq!(bucket_daily_forecast_in(feed, &tz), out);
    }

    #[test]
    fn every_output_entry_comes_from_the_input(raw in feed_strategy()) {
        let tz = utc();
        let feed = raw.iter().map(|&(dt, temp)| sample(dt, temp)).collect::<Vec<_>>();
        for entry in bucket_daily_forecast_in(feed.clone(), &tz) {
            prop_assert!(feed.contains(&entry));
        }
    }
}
