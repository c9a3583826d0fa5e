use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{loose_string, loose_u64};

/// Totals plus per-day counters from `/api/v1/analytics/all`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default, deserialize_with = "loose_u64")]
    pub visits: u64,
    #[serde(default, deserialize_with = "loose_u64")]
    pub project_view: u64,
    #[serde(default, deserialize_with = "loose_u64")]
    pub blog_views: u64,
    #[serde(default, deserialize_with = "loose_string")]
    pub last_updated: String,
    #[serde(default)]
    pub daily_stats: Vec<DailyStat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyStat {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "loose_u64")]
    pub site_visits: u64,
    #[serde(default, deserialize_with = "loose_u64")]
    pub project_views: u64,
    #[serde(default, deserialize_with = "loose_u64")]
    pub blog_views: u64,
    #[serde(default, deserialize_with = "loose_u64")]
    pub unique_ips: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Short weekday, e.g. "Mon"
    pub day_name: String,
    pub value: u64,
}

impl AnalyticsSummary {
    pub fn visit_series(&self, today: NaiveDate) -> Vec<ChartPoint> {
        seven_day_series(&self.daily_stats, today, |s| s.site_visits)
    }

    pub fn project_view_series(&self, today: NaiveDate) -> Vec<ChartPoint> {
        seven_day_series(&self.daily_stats, today, |s| s.project_views)
    }
}

/// The seven days ending `today`, oldest first, missing days counted as zero.
pub fn seven_day_series<F>(stats: &[DailyStat], today: NaiveDate, value: F) -> Vec<ChartPoint>
where
    F: Fn(&DailyStat) -> u64,
{
    (0..7)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let total = stats
                .iter()
                .filter(|s| NaiveDate::parse_from_str(s.date.trim(), "%Y-%m-%d").ok() == Some(date))
                .map(&value)
                .sum();
            ChartPoint {
                date,
                day_name: date.format("%a").to_string(),
                value: total,
            }
        })
        .collect()
}
