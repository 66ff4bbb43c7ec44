//! Task name scheduling: classification, due resolution, display names.
//!
//! A task name optionally carries its schedule as a filename prefix.
//! `0 9 ＊ ＊ ＊ Water plants` recurs daily at 09:00, `2024-01-10 Renew
//! passport` appears on January 10th, and anything else is an ordinary
//! always-due task. The engine here decides, from the name plus a
//! completion record, whether a task should currently be shown.
//!
//! Every function takes the reference time as an argument. Callers
//! snapshot `now` once per listing so one listing never straddles a
//! minute boundary.

pub mod cron;
pub mod dateparse;

use jiff::civil::DateTime;

pub use cron::CronExpr;
pub use dateparse::DateToken;

/// How a task name encodes its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// No recognized prefix. Always due.
    Plain,
    /// A leading date token. Due once the date arrives.
    Dated,
    /// A leading five-field cron expression. Recurs.
    Cron,
}

/// Classifies a task name. Pure: the same string always yields the same
/// variant, and unparseable prefixes fall back to `Plain` rather than
/// erroring.
pub fn classify(name: &str) -> Schedule {
    if is_cron(name) {
        return Schedule::Cron;
    }
    let dated = name
        .split_whitespace()
        .next()
        .and_then(dateparse::parse)
        .is_some();
    if dated {
        Schedule::Dated
    } else {
        Schedule::Plain
    }
}

/// True when the name starts with a five-field cron prefix followed by a
/// title. Only the first three fields are shape-checked here; stored
/// names may carry month and weekday names in the last two fields, which
/// the full parser handles at resolution time.
pub fn is_cron(name: &str) -> bool {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() < 6 {
        return false;
    }
    tokens.iter().take(3).all(|t| is_field_token(t))
}

/// True when the first token parses as a date and the name is not cron.
/// The cron check wins when both could match.
pub fn is_dated(name: &str) -> bool {
    classify(name) == Schedule::Dated
}

fn is_field_token(token: &str) -> bool {
    token == "*" || token == "＊" || token.chars().all(|c| c.is_ascii_digit())
}

/// Decides whether a task should currently be shown.
///
/// `last_done` supplies the completion record lazily; it is only
/// consulted for recurring tasks. A name whose first character is not an
/// ASCII digit is due unconditionally, which means wildcard-led cron
/// names skip recurrence checking entirely. That shortcut is part of the
/// stored-name contract and is kept: plain tasks are the overwhelmingly
/// common case, and `＊`-led names have always been shown on every
/// listing.
pub fn is_due(
    name: &str,
    now: DateTime,
    last_done: impl FnOnce() -> Option<DateTime>,
) -> bool {
    let digit_led = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    if !digit_led {
        return true;
    }
    match classify(name) {
        Schedule::Cron => {
            let Some(done) = last_done() else {
                // Never completed: the first occurrence is due now.
                return true;
            };
            let expr: String = name
                .split_whitespace()
                .take(5)
                .collect::<Vec<_>>()
                .join(" ");
            let Ok(parsed) = expr.parse::<CronExpr>() else {
                // The classifier only shape-checks three fields, so a
                // stored name can still fail the full parse. Show it
                // rather than hiding it forever.
                return true;
            };
            match parsed.next_after(done) {
                Some(next) => next <= now,
                None => false,
            }
        }
        Schedule::Dated => {
            let token = name.split_whitespace().next().unwrap_or("");
            dateparse::parse(token)
                .and_then(|t| t.resolve(now))
                .is_some_and(|due| due <= now)
        }
        Schedule::Plain => false,
    }
}

/// Strips the schedule prefix for presentation. Cron names lose five
/// tokens, dated names one; interior whitespace collapses to single
/// spaces as a side effect of the rejoin. Plain names pass through
/// untouched.
pub fn display_name(name: &str) -> String {
    match classify(name) {
        Schedule::Cron => name
            .split_whitespace()
            .skip(5)
            .collect::<Vec<_>>()
            .join(" "),
        Schedule::Dated => name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" "),
        Schedule::Plain => name.to_string(),
    }
}
