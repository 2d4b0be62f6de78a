//! Server clock. Dates and timestamps are local time, second precision.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
