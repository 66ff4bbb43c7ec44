//! Five-field cron expressions for recurring tasks.
//!
//! Supports the standard field syntax: `*`, single values, `a-b` ranges,
//! comma lists, `/n` steps, and three-letter month and weekday names.
//! Matching works at minute granularity, and day-of-month and day-of-week
//! follow the usual rule: when both are restricted, a day matches if
//! either field matches it.

use std::str::FromStr;

use jiff::civil::{Date, DateTime};
use jiff::Span;

use crate::error::{Result, WrenError};

const MONTH_NAMES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const DAY_NAMES: &[&str] = &["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// How far `next_after` searches before concluding the expression never
/// fires (guards impossible dates such as `0 0 30 2 *`).
const SEARCH_HORIZON_YEARS: i64 = 4;

/// One parsed cron field: a set of permitted values plus whether the
/// field was written as a bare `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldSpec {
    mask: u64,
    restricted: bool,
}

impl FieldSpec {
    fn contains(self, value: i8) -> bool {
        value >= 0 && self.mask & (1u64 << value as u32) != 0
    }
}

/// Bounds and name table for one field position.
struct FieldDef {
    name: &'static str,
    min: u8,
    max: u8,
    names: &'static [&'static str],
    name_base: u8,
}

const MINUTE: FieldDef = FieldDef {
    name: "minute",
    min: 0,
    max: 59,
    names: &[],
    name_base: 0,
};
const HOUR: FieldDef = FieldDef {
    name: "hour",
    min: 0,
    max: 23,
    names: &[],
    name_base: 0,
};
const DAY_OF_MONTH: FieldDef = FieldDef {
    name: "day of month",
    min: 1,
    max: 31,
    names: &[],
    name_base: 0,
};
const MONTH: FieldDef = FieldDef {
    name: "month",
    min: 1,
    max: 12,
    names: MONTH_NAMES,
    name_base: 1,
};
// Both 0 and 7 mean Sunday; 7 is folded onto 0 after parsing.
const DAY_OF_WEEK: FieldDef = FieldDef {
    name: "day of week",
    min: 0,
    max: 7,
    names: DAY_NAMES,
    name_base: 0,
};

/// A parsed five-field cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CronExpr {
    minute: FieldSpec,
    hour: FieldSpec,
    day_of_month: FieldSpec,
    month: FieldSpec,
    day_of_week: FieldSpec,
}

impl FromStr for CronExpr {
    type Err = WrenError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.replace('＊', "*");
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.len() != 5 {
            return Err(WrenError::schedule(
                s,
                format!("expected 5 fields, found {}", tokens.len()),
            ));
        }
        let minute = parse_field(s, tokens[0], &MINUTE)?;
        let hour = parse_field(s, tokens[1], &HOUR)?;
        let day_of_month = parse_field(s, tokens[2], &DAY_OF_MONTH)?;
        let month = parse_field(s, tokens[3], &MONTH)?;
        let mut day_of_week = parse_field(s, tokens[4], &DAY_OF_WEEK)?;
        if day_of_week.mask & (1 << 7) != 0 {
            day_of_week.mask = (day_of_week.mask | 1) & !(1 << 7);
        }
        Ok(Self {
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
        })
    }
}

impl CronExpr {
    /// Returns the first matching minute strictly after `after`, or None
    /// when no occurrence exists within the search horizon.
    pub fn next_after(&self, after: DateTime) -> Option<DateTime> {
        let truncated = after.with().second(0).subsec_nanosecond(0).build().ok()?;
        let mut t = truncated.checked_add(Span::new().minutes(1)).ok()?;
        let horizon = t.checked_add(Span::new().years(SEARCH_HORIZON_YEARS)).ok()?;
        while t <= horizon {
            if !self.month.contains(t.month()) {
                let next_month = t
                    .date()
                    .first_of_month()
                    .checked_add(Span::new().months(1))
                    .ok()?;
                t = next_month.at(0, 0, 0, 0);
                continue;
            }
            if !self.day_matches(t.date()) {
                t = t.date().tomorrow().ok()?.at(0, 0, 0, 0);
                continue;
            }
            if !self.hour.contains(t.hour()) {
                t = if t.hour() >= 23 {
                    t.date().tomorrow().ok()?.at(0, 0, 0, 0)
                } else {
                    t.date().at(t.hour() + 1, 0, 0, 0)
                };
                continue;
            }
            if !self.minute.contains(t.minute()) {
                t = t.checked_add(Span::new().minutes(1)).ok()?;
                continue;
            }
            return Some(t);
        }
        None
    }

    fn day_matches(&self, date: Date) -> bool {
        let dom_ok = self.day_of_month.contains(date.day());
        let dow_ok = self
            .day_of_week
            .contains(date.weekday().to_sunday_zero_offset());
        match (self.day_of_month.restricted, self.day_of_week.restricted) {
            (true, true) => dom_ok || dow_ok,
            (true, false) => dom_ok,
            (false, true) => dow_ok,
            (false, false) => true,
        }
    }
}

fn parse_field(expr: &str, token: &str, def: &FieldDef) -> Result<FieldSpec> {
    if token == "*" {
        return Ok(FieldSpec {
            mask: range_mask(def.min, def.max),
            restricted: false,
        });
    }
    let mut mask = 0u64;
    for part in token.split(',') {
        let (base, step) = match part.split_once('/') {
            Some((base, step)) => {
                let step: u8 = step.parse().map_err(|_| {
                    WrenError::schedule(expr, format!("invalid step '{step}' in {} field", def.name))
                })?;
                if step == 0 {
                    return Err(WrenError::schedule(
                        expr,
                        format!("step of 0 in {} field", def.name),
                    ));
                }
                (base, Some(step))
            }
            None => (part, None),
        };
        let (lo, hi) = if base == "*" {
            (def.min, def.max)
        } else if let Some((start, end)) = base.split_once('-') {
            let start = parse_value(expr, start, def)?;
            let end = parse_value(expr, end, def)?;
            if start > end {
                return Err(WrenError::schedule(
                    expr,
                    format!("reversed range '{base}' in {} field", def.name),
                ));
            }
            (start, end)
        } else {
            let value = parse_value(expr, base, def)?;
            // A bare value with a step runs to the end of the field.
            match step {
                Some(_) => (value, def.max),
                None => (value, value),
            }
        };
        let step = u32::from(step.unwrap_or(1));
        let mut value = u32::from(lo);
        while value <= u32::from(hi) {
            mask |= 1u64 << value;
            value += step;
        }
    }
    Ok(FieldSpec {
        mask,
        restricted: true,
    })
}

fn parse_value(expr: &str, s: &str, def: &FieldDef) -> Result<u8> {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        let value: u8 = s.parse().map_err(|_| {
            WrenError::schedule(expr, format!("value '{s}' out of range for {}", def.name))
        })?;
        if value < def.min || value > def.max {
            return Err(WrenError::schedule(
                expr,
                format!("value {value} out of range for {} ({}-{})", def.name, def.min, def.max),
            ));
        }
        return Ok(value);
    }
    let lower = s.to_ascii_lowercase();
    def.names
        .iter()
        .position(|name| *name == lower)
        .map(|i| i as u8 + def.name_base)
        .ok_or_else(|| WrenError::schedule(expr, format!("unrecognized {} '{s}'", def.name)))
}

fn range_mask(min: u8, max: u8) -> u64 {
    let mut mask = 0u64;
    for value in min..=max {
        mask |= 1u64 << u32::from(value);
    }
    mask
}
