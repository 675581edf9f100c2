//! Grouping of flat forecast samples into calendar-day buckets.
//!
//! Day keys follow first-seen order of the input, and samples keep their
//! input order within a day. Since the provider returns samples in time
//! order, the buckets come out chronologically.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::collections::HashMap;

use crate::model::ForecastSample;

/// Forecast samples that fall on one local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Numeric date label, e.g. `1/5/2025`. Doubles as the grouping key.
    pub label: String,
    pub samples: Vec<ForecastSample>,
}

impl DayBucket {
    /// Short label for a day selector, e.g. `Sun, Jan 5`.
    pub fn tab_label(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }
}

/// Ordered day buckets produced by [`group_by_day`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBuckets(Vec<DayBucket>);

impl DayBuckets {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayBucket> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DayBucket> {
        self.0.get(index)
    }

    /// Clamp a day index into the selectable range. Returns 0 when empty.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.0.len().saturating_sub(1))
    }

    /// Bucket at `index`, clamped to the last bucket. `None` only when there are no buckets.
    pub fn select(&self, index: usize) -> Option<&DayBucket> {
        self.0.get(self.clamp_index(index))
    }

    pub fn into_inner(self) -> Vec<DayBucket> {
        self.0
    }
}

impl<'a> IntoIterator for &'a DayBuckets {
    type Item = &'a DayBucket;
    type IntoIter = std::slice::Iter<'a, DayBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Group samples by calendar day in the viewer's local time zone.
pub fn group_by_day(samples: &[ForecastSample]) -> DayBuckets {
    group_by_day_in(samples, &Local)
}

/// Group samples by calendar day in `tz`.
pub fn group_by_day_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> DayBuckets {
    let mut buckets: Vec<DayBucket> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = local_time(sample, tz).date_naive();

        let idx = *positions.entry(date).or_insert_with(|| {
            buckets.push(DayBucket {
                date,
                label: date_label(date),
                samples: Vec::new(),
            });
            buckets.len() - 1
        });

        buckets[idx].samples.push(sample.clone());
    }

    DayBuckets(buckets)
}

/// Hour-of-day label for a sample, e.g. `3 PM`.
pub fn hour_label<Tz: TimeZone>(sample: &ForecastSample, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local_time(sample, tz).format("%-I %p").to_string()
}

fn local_time<Tz: TimeZone>(sample: &ForecastSample, tz: &Tz) -> DateTime<Tz> {
    sample.time().with_timezone(tz)
}

fn date_label(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2025-01-05T00:00:00Z
    const JAN_5: i64 = 1_736_035_200;
    const HOUR: i64 = 3_600;

    fn sample(timestamp: i64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature: 5.0,
            humidity: 70,
            wind_speed: 3.0,
            description: "clear sky".into(),
            icon: "01d".into(),
            precipitation_3h: None,
        }
    }

    fn three_hourly(start: i64, count: i64) -> Vec<ForecastSample> {
        (0..count).map(|i| sample(start + i * 3 * HOUR)).collect()
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        let buckets = group_by_day_in(&[], &Utc);
        assert!(buckets.is_empty());
        assert_eq!(buckets.select(0), None);
        assert_eq!(buckets.clamp_index(3), 0);
    }

    #[test]
    fn concatenation_reproduces_input() {
        let samples = three_hourly(JAN_5 + 9 * HOUR, 40);
        let buckets = group_by_day_in(&samples, &Utc);

        let flattened: Vec<ForecastSample> =
            buckets.iter().flat_map(|b| b.samples.clone()).collect();
        assert_eq!(flattened, samples);
    }

    #[test]
    fn buckets_are_chronological_with_labels() {
        let samples = three_hourly(JAN_5 + 18 * HOUR, 6);
        let buckets = group_by_day_in(&samples, &Utc);

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["1/5/2025", "1/6/2025"]);
        assert_eq!(buckets.get(0).map(|b| b.samples.len()), Some(2));
        assert_eq!(buckets.get(1).map(|b| b.samples.len()), Some(4));
        assert_eq!(buckets.get(0).map(DayBucket::tab_label).as_deref(), Some("Sun, Jan 5"));
    }

    #[test]
    fn day_boundary_follows_time_zone() {
        // 23:00 UTC on Jan 5 is already Jan 6 two hours east.
        let samples = vec![sample(JAN_5 + 23 * HOUR)];
        let east = FixedOffset::east_opt(2 * 3600).expect("valid offset");

        let utc_label = group_by_day_in(&samples, &Utc).get(0).map(|b| b.label.clone());
        let east_label = group_by_day_in(&samples, &east).get(0).map(|b| b.label.clone());

        assert_eq!(utc_label.as_deref(), Some("1/5/2025"));
        assert_eq!(east_label.as_deref(), Some("1/6/2025"));
    }

    #[test]
    fn unordered_days_keep_first_seen_order() {
        let day_two = sample(JAN_5 + 30 * HOUR);
        let day_one_a = sample(JAN_5 + 3 * HOUR);
        let day_one_b = sample(JAN_5 + 6 * HOUR);
        let samples = vec![day_two.clone(), day_one_a.clone(), day_one_b.clone()];

        let buckets = group_by_day_in(&samples, &Utc).into_inner();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].samples, vec![day_two]);
        assert_eq!(buckets[1].samples, vec![day_one_a, day_one_b]);
    }

    #[test]
    fn selection_clamps_to_last_bucket() {
        let samples = three_hourly(JAN_5, 3);
        let buckets = group_by_day_in(&samples, &Utc);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.clamp_index(2), 0);
        assert_eq!(buckets.select(2), buckets.get(0));
    }

    #[test]
    fn hour_label_is_twelve_hour_clock() {
        assert_eq!(hour_label(&sample(JAN_5 + 15 * HOUR), &Utc), "3 PM");
        assert_eq!(hour_label(&sample(JAN_5), &Utc), "12 AM");
    }
}
