use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// One calendar month, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: month_start(date),
            end: month_end(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|date| self.contains(date))
    }

    /// Short label such as `Jan-23`.
    pub fn label(&self) -> String {
        self.start.format("%b-%y").to_string()
    }

    fn next(&self) -> Option<Self> {
        self.start
            .checked_add_months(Months::new(1))
            .map(Self::containing)
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Every calendar month touched by `start..=end`, oldest first. Empty when
/// `start` falls in a later month than `end`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<MonthWindow> {
    let last = month_start(end);
    let mut months = Vec::new();
    let mut cursor = Some(MonthWindow::containing(start));

    while let Some(month) = cursor {
        if month.start > last {
            break;
        }
        months.push(month);
        cursor = month.next();
    }

    months
}

/// Start of the default window: `months_back` months ending with `today`'s
/// month, never earlier than `epoch`'s month. `None` when `months_back` is 0.
pub fn default_window_start(
    today: NaiveDate,
    months_back: u32,
    epoch: NaiveDate,
) -> Option<NaiveDate> {
    let offset = months_back.checked_sub(1)?;
    let start = month_start(today)
        .checked_sub_months(Months::new(offset))
        .unwrap_or(NaiveDate::MIN);
    Some(start.max(month_start(epoch)))
}
