//! Condenses the provider's 3-hour forecast into one summary per day.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use std::{collections::BTreeMap, ops::RangeInclusive};

use crate::model::{DailySummary, ForecastSample, IconSize, icon_url, round_temp};

/// Number of upcoming days shown on the dashboard.
pub const FORECAST_DAYS: usize = 5;

/// Local hours whose sample best represents the day.
const MIDDAY_HOURS: RangeInclusive<u32> = 11..=14;

/// Icon settings applied to each summary.
#[derive(Debug, Clone, Copy)]
pub struct IconStyle<'a> {
    pub base_url: &'a str,
    pub size: IconSize,
}

/// Group `samples` by local calendar day (in `now`'s time zone), skip today,
/// and summarise each remaining day. At most [`FORECAST_DAYS`] entries are
/// returned, earliest first.
///
/// Min/max come from all samples of the day. Icon, description, wind and
/// humidity come from the first sample between 11:00 and 14:00, or the day's
/// first sample if none falls in that window.
pub fn daily_summaries<Tz: TimeZone>(
    samples: &[ForecastSample],
    now: &DateTime<Tz>,
    icon: IconStyle<'_>,
) -> Vec<DailySummary> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut days: BTreeMap<NaiveDate, Vec<(u32, &ForecastSample)>> = BTreeMap::new();
    for sample in samples {
        let local = sample.timestamp.with_timezone(&tz);
        let day = local.date_naive();
        if day == today {
            continue;
        }
        days.entry(day).or_default().push((local.hour(), sample));
    }

    days.into_iter()
        .filter_map(|(date, members)| summarize_day(date, &members, icon))
        .take(FORECAST_DAYS)
        .collect()
}

fn summarize_day(
    date: NaiveDate,
    members: &[(u32, &ForecastSample)],
    icon: IconStyle<'_>,
) -> Option<DailySummary> {
    let (_, first) = members.first()?;

    let (min, max) = members.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, s)| {
        (lo.min(s.temperature_c), hi.max(s.temperature_c))
    });

    let representative = members
        .iter()
        .find(|(hour, _)| MIDDAY_HOURS.contains(hour))
        .map(|(_, s)| *s)
        .unwrap_or(*first);

    Some(DailySummary {
        date,
        max_temp: round_temp(max),
        min_temp: round_temp(min),
        icon_url: icon_url(icon.base_url, &representative.icon_code, icon.size),
        description: representative.description.clone(),
        wind_speed_mps: representative.wind_speed_mps,
        humidity_pct: representative.humidity_pct,
    })
}
