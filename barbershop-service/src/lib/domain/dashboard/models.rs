use std::fmt;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveTime;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::client::models::ClientId;
use crate::domain::offering::models::OfferingId;

/// Headline counts for one barbershop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    pub total_clients: i64,
    /// Active catalog entries only.
    pub total_services: i64,
    pub total_barbers: i64,
}

/// Reporting window for statistics, always starting at a UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatisticsPeriod {
    Day,
    /// Weeks start on Sunday.
    Week,
    #[default]
    Month,
    Year,
}

impl StatisticsPeriod {
    /// Unknown or missing period names fall back to `Month`.
    pub fn parse_lenient(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("day") => StatisticsPeriod::Day,
            Some("week") => StatisticsPeriod::Week,
            Some("year") => StatisticsPeriod::Year,
            _ => StatisticsPeriod::Month,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatisticsPeriod::Day => "day",
            StatisticsPeriod::Week => "week",
            StatisticsPeriod::Month => "month",
            StatisticsPeriod::Year => "year",
        }
    }

    /// Start of the period containing `now`.
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let days_back = match self {
            StatisticsPeriod::Day => 0,
            StatisticsPeriod::Week => today.weekday().num_days_from_sunday(),
            StatisticsPeriod::Month => today.day0(),
            StatisticsPeriod::Year => today.ordinal0(),
        };

        (today - Duration::days(i64::from(days_back)))
            .and_time(NaiveTime::MIN)
            .and_utc()
    }
}

impl fmt::Display for StatisticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub period: StatisticsPeriod,
    pub since: DateTime<Utc>,
    pub new_clients: i64,
}

/// How many recent records to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityLimit(i64);

impl ActivityLimit {
    pub const DEFAULT: i64 = 10;
    pub const MAX: i64 = 100;

    /// Missing means 10; values are clamped to 1..=100.
    pub fn new(requested: Option<i64>) -> Self {
        Self(requested.unwrap_or(Self::DEFAULT).clamp(1, Self::MAX))
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl Default for ActivityLimit {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentClient {
    pub id: ClientId,
    pub name: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivity {
    pub recent_clients: Vec<RecentClient>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveServiceSummary {
    pub id: OfferingId,
    pub name: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarberSummary {
    pub id: AccountId,
    pub name: String,
}

/// Shortcuts for the front desk: what can be booked and by whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickActions {
    pub active_services: Vec<ActiveServiceSummary>,
    pub available_barbers: Vec<BarberSummary>,
}
