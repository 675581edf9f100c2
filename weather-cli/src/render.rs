//! Plain-text rendering of dashboard state.

use chrono::Local;
use std::fmt::Write;
use weather_core::{
    CurrentConditions, DayBucket, DayBuckets, ForecastSample, Theme, ViewState, hour_label,
};

/// Markers for the selected day tab, per theme.
fn selection_marks(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Light => ("[", "]"),
        Theme::Dark => ("<", ">"),
    }
}

pub fn view(state: &ViewState, days: &DayBuckets, selected: usize, theme: Theme) -> String {
    match state {
        ViewState::Idle => "Search for a city to see the weather.\n".to_string(),
        ViewState::Loading { query } => format!("Searching {query}...\n"),
        ViewState::Error { message, .. } => format!("{message}\n"),
        ViewState::Success(report) => {
            let mut out = current(&report.current);
            if !days.is_empty() {
                out.push('\n');
                out.push_str(&forecast(days, selected, theme));
            }
            out
        }
    }
}

pub fn current(c: &CurrentConditions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", c.name);
    let _ = writeln!(out, "  {}°C, {}", c.temperature.round(), c.description);
    let _ = writeln!(
        out,
        "  Humidity {}%  Wind {} m/s  Feels like {}°C",
        c.humidity,
        c.wind_speed,
        c.feels_like.round()
    );
    out
}

pub fn forecast(days: &DayBuckets, selected: usize, theme: Theme) -> String {
    let selected = days.clamp_index(selected);
    let (open, close) = selection_marks(theme);

    let tabs: Vec<String> = days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            if i == selected {
                format!("{open}{}{close}", day.tab_label())
            } else {
                format!(" {} ", day.tab_label())
            }
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}-Day Forecast", days.len());
    let _ = writeln!(out, "{}", tabs.join(" "));

    if let Some(day) = days.select(selected) {
        out.push_str(&day_detail(day));
    }
    out
}

fn day_detail(day: &DayBucket) -> String {
    let mut out = String::new();
    for sample in &day.samples {
        let _ = writeln!(out, "  {}", sample_line(sample));
    }
    out
}

fn sample_line(s: &ForecastSample) -> String {
    let mut line = format!(
        "{:>5}  {:>3}°C  {:<20} 💧 {}%  💨 {} m/s",
        hour_label(s, &Local),
        s.temperature.round(),
        s.description,
        s.humidity,
        s.wind_speed.round()
    );
    if let Some(rain) = s.precipitation_3h {
        let _ = write!(line, "  🌧️ {rain}mm");
    }
    let _ = write!(line, "  {}", s.icon_url());
    line
}

pub fn history(entries: &[String]) -> String {
    if entries.is_empty() {
        return "No recent searches.\n".to_string();
    }

    let mut out = String::from("Recent Searches\n");
    for (i, city) in entries.iter().enumerate() {
        let _ = writeln!(out, "  {}. {city}", i + 1);
    }
    out
}
