use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};

use crate::error::{LoggerError, Result};

const DAY_FORMAT: &str = "%Y%m%d";

/// Target calendar day plus the previous day used to widen remote queries.
///
/// The service indexes timestamps in a zone that may not match ours, so
/// searches start one day early and every record is re-checked against
/// [`DayWindow::contains`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    day: NaiveDate,
    ymd: String,
}

impl DayWindow {
    /// Parse a `YYYYMMDD` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use evernote_logger_core::DayWindow;
    ///
    /// let window = DayWindow::parse("20240301").unwrap();
    /// assert_eq!(window.previous_ymd(), "20240229");
    /// assert_eq!(window.short_label(), "240301");
    /// assert!(DayWindow::parse("2024011").is_err());
    /// ```
    pub fn parse(ymd: &str) -> Result<Self> {
        if ymd.chars().count() != 8 || !ymd.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LoggerError::InvalidDay(ymd.to_string()));
        }
        let field = |range: std::ops::Range<usize>| ymd[range].parse::<u32>().ok();
        let day = match (field(0..4), field(4..6), field(6..8)) {
            (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y as i32, m, d),
            _ => None,
        };
        day.map(Self::from_date)
            .ok_or_else(|| LoggerError::InvalidDay(ymd.to_string()))
    }

    pub fn from_date(day: NaiveDate) -> Self {
        Self {
            day,
            ymd: day.format(DAY_FORMAT).to_string(),
        }
    }

    /// Window for the current local date
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn ymd(&self) -> &str {
        &self.ymd
    }

    /// `YYMMDD`, used in the heading and the published note title
    pub fn short_label(&self) -> &str {
        &self.ymd[2..]
    }

    /// Lower bound for both remote searches
    pub fn previous_day(&self) -> NaiveDate {
        self.day
            .checked_sub_days(Days::new(1))
            .unwrap_or(self.day)
    }

    pub fn previous_ymd(&self) -> String {
        self.previous_day().format(DAY_FORMAT).to_string()
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_index(&self) -> u32 {
        self.day.weekday().num_days_from_sunday()
    }

    /// Whether a local timestamp falls on the target day
    pub fn contains(&self, local: &NaiveDateTime) -> bool {
        local.date() == self.day
    }
}
