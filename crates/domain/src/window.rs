//! Testimonial submission window.
//!
//! The window opens Tuesday at 12:00:00 local time and closes at the end
//! of Friday (23:59:59). The historical predicate carried redundant
//! hour-bound clauses that made all of Tuesday look open; the documented
//! intent (Tuesday noon onward) is what we implement, in both the gate
//! and the next-window calculator.
//!
//! Both functions are pure over an injected wall-clock value so handlers
//! stay testable; nothing in here reads the global clock.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};

const OPENING_HOUR: u32 = 12;

/// Whether testimonial submissions are accepted at `now`.
pub fn is_open(now: NaiveDateTime) -> bool {
    match now.weekday() {
        Weekday::Tue => now.hour() >= OPENING_HOUR,
        Weekday::Wed | Weekday::Thu | Weekday::Fri => true,
        _ => false,
    }
}

/// Start of the next submission window strictly after `now`, regardless
/// of whether the window is currently open.
pub fn next_open_time(now: NaiveDateTime) -> NaiveDateTime {
    let opening = NaiveTime::from_hms_opt(OPENING_HOUR, 0, 0).expect("valid opening time");

    let mut date = now.date();
    if date.weekday() != Weekday::Tue || now.time() >= opening {
        loop {
            date = date.succ_opt().expect("date within chrono range");
            if date.weekday() == Weekday::Tue {
                break;
            }
        }
    }
    date.and_time(opening)
}
