use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::{TimeTz, Value};
use crate::Result;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, Utc};

/// Dates, times, timestamps and intervals.
pub(super) struct TemporalCoercer<'a> {
    ty: &'a Type,
}

impl<'a> TemporalCoercer<'a> {
    pub(super) fn new(ty: &'a Type) -> TemporalCoercer<'a> {
        TemporalCoercer { ty }
    }

    fn parse(&self, raw: &str) -> Option<Value> {
        let src = raw.trim();

        match self.ty {
            Type::Date => NaiveDate::parse_from_str(src, "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            Type::Time => {
                // An offset, if given, is normalized to UTC and dropped
                let (time, offset) = split_offset(src);
                let time = parse_time(time)?;
                match offset {
                    Some(offset) => {
                        let offset = parse_offset(offset)?;
                        let shift = TimeDelta::seconds(offset.local_minus_utc().into());
                        Some(Value::Time(time.overflowing_sub_signed(shift).0))
                    }
                    None => Some(Value::Time(time)),
                }
            }
            Type::TimeTz => {
                let (time, offset) = split_offset(src);
                let offset = match offset {
                    Some(offset) => parse_offset(offset)?,
                    None => Utc.fix(),
                };
                Some(Value::TimeTz(TimeTz::new(parse_time(time)?, offset)))
            }
            Type::Timestamp => {
                let (ts, offset) = parse_datetime(src)?;
                // Offsets are normalized to UTC, then dropped
                let ts = match offset {
                    Some(offset) => ts - TimeDelta::seconds(offset.local_minus_utc().into()),
                    None => ts,
                };
                Some(Value::Timestamp(ts))
            }
            Type::TimestampTz => {
                let (ts, offset) = parse_datetime(src)?;
                let ts = match offset {
                    Some(offset) => ts.and_local_timezone(offset).single()?.with_timezone(&Utc),
                    None => ts.and_utc(),
                };
                Some(Value::TimestampTz(ts))
            }
            Type::Interval => {
                let secs: f64 = src.parse().ok()?;
                interval(secs)
            }
            _ => None,
        }
    }
}

impl TypeCoercer for TemporalCoercer<'_> {
    fn ty(&self) -> &Type {
        self.ty
    }

    fn supports(&self, op: Operator) -> bool {
        matches!(
            op,
            Operator::Eq | Operator::From | Operator::To | Operator::List
        )
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        self.parse(raw).ok_or_else(|| coercion_error(self.ty, raw))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::String(s) => self.from_param(s),
            serde_json::Value::Number(n) if *self.ty == Type::Interval => n
                .as_f64()
                .and_then(interval)
                .ok_or_else(|| coercion_error(self.ty, n.to_string())),
            other => Err(coercion_error(self.ty, json_raw(other))),
        }
    }
}

fn interval(secs: f64) -> Option<Value> {
    let micros = (secs * 1_000_000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Value::Interval(TimeDelta::microseconds(micros as i64)))
}

fn parse_time(src: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(src, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(src, "%H:%M"))
        .ok()
}

/// Splits a trailing `Z` or `±HH[:MM]` offset off a time of day.
fn split_offset(src: &str) -> (&str, Option<&str>) {
    if let Some(time) = src.strip_suffix(['Z', 'z']) {
        return (time, Some("+00:00"));
    }

    match src.rfind(['+', '-']) {
        Some(at) => (&src[..at], Some(&src[at..])),
        None => (src, None),
    }
}

fn parse_offset(src: &str) -> Option<FixedOffset> {
    let (sign, rest) = match src.as_bytes().first()? {
        b'+' => (1, &src[1..]),
        b'-' => (-1, &src[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };

    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parses an ISO-8601 timestamp with a `T` or space separator and an
/// optional offset. A bare date is midnight.
fn parse_datetime(src: &str) -> Option<(NaiveDateTime, Option<FixedOffset>)> {
    if let Ok(date) = NaiveDate::parse_from_str(src, "%Y-%m-%d") {
        return Some((date.and_time(NaiveTime::MIN), None));
    }

    let date = NaiveDate::parse_from_str(src.get(..10)?, "%Y-%m-%d").ok()?;
    let rest = src.get(10..)?;
    let rest = rest.strip_prefix(['T', 't', ' '])?;

    let (time, offset) = split_offset(rest);
    let time = parse_time(time)?;
    let offset = match offset {
        Some(offset) => Some(parse_offset(offset)?),
        None => None,
    };

    Some((date.and_time(time), offset))
}
