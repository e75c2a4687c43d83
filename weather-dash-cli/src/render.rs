use std::fmt::Write;

use weather_dash_core::{DailySummary, WeatherView};

/// Current conditions followed by the daily forecast table.
pub fn dashboard(view: &WeatherView<'_>, days: &[DailySummary]) -> String {
    let mut out = String::new();

    let (Some(city), Some(temp)) = (view.city_name(), view.temperature()) else {
        return out;
    };

    let place = match view.country_code().filter(|c| !c.is_empty()) {
        Some(country) => format!("{city}, {country}"),
        None => city.to_string(),
    };
    let _ = writeln!(out, "{place}");
    let _ = writeln!(
        out,
        "  {temp}°C  {}  ({})",
        view.condition().unwrap_or_default(),
        view.description().unwrap_or_default()
    );
    if let Some(feels) = view.feels_like() {
        let _ = writeln!(out, "  Feels like {feels}°C");
    }
    if let (Some(humidity), Some(wind)) = (view.humidity(), view.wind_speed()) {
        let _ = writeln!(out, "  Humidity {humidity}%  Wind {wind:.1} m/s");
    }
    if let Some(icon) = view.icon_url() {
        let _ = writeln!(out, "  Icon {icon}");
    }
    if let Some(updated) = view.formatted_last_updated() {
        let _ = writeln!(out, "  Updated {updated}");
    }

    if !days.is_empty() {
        let _ = writeln!(out);
        out.push_str(&forecast_table(days));
    }

    out
}

pub fn forecast_table(days: &[DailySummary]) -> String {
    let mut out = String::new();
    for day in days {
        let _ = writeln!(
            out,
            "{:<12} {:>4}° / {:>4}°  {:<20} {:>3}%  {:>4.1} m/s",
            day.date.format("%a %d %b").to_string(),
            day.max_temp,
            day.min_temp,
            day.description,
            day.humidity_pct,
            day.wind_speed_mps,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, max: i32, min: i32) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            max_temp: max,
            min_temp: min,
            icon_url: "https://openweathermap.org/img/wn/10d@2x.png".into(),
            description: "light rain".into(),
            wind_speed_mps: 2.04,
            humidity_pct: 81,
        }
    }

    #[test]
    fn forecast_table_has_one_line_per_day() {
        let table = forecast_table(&[day(11, 27, 20), day(12, 25, -3)]);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Mon 11 Mar"));
        assert!(lines[0].contains("27° /   20°"));
        assert!(lines[1].contains("-3°"));
        assert!(lines[1].contains("81%"));
        assert!(lines[1].contains("2.0 m/s"));
    }
}
