use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use std::fmt;

/// Time of day carrying a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTz {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl TimeTz {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> TimeTz {
        TimeTz { time, offset }
    }

    pub fn utc(time: NaiveTime) -> TimeTz {
        TimeTz {
            time,
            offset: Utc.fix(),
        }
    }
}

impl fmt::Display for TimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.offset.local_minus_utc();
        let sign = if secs < 0 { '-' } else { '+' };
        let secs = secs.abs();

        write!(
            f,
            "{}{}{:02}:{:02}",
            super::value_json::format_time(self.time),
            sign,
            secs / 3600,
            secs / 60 % 60
        )
    }
}

