// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use std::{env, error::Error, io};
use timeset_algebra::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();
}

type Stamp = DateTime<Utc>;

#[derive(Debug, Clone)]
struct ReportConfig {
    day: NaiveDate,
    /// Margin added on both sides of every contact window.
    pad_minutes: i64,
    /// Contact windows of two spacecraft over one ground station, in minutes after midnight.
    passes_a: Vec<(i64, i64)>,
    passes_b: Vec<(i64, i64)>,
    /// Station outage events: `(minute, is_start)`. A leading stop means the
    /// outage began before midnight; a trailing start runs until the end of the day.
    outage_events: Vec<(i64, bool)>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            pad_minutes: 5,
            passes_a: vec![(95, 107), (190, 203), (640, 655), (735, 749), (1320, 1331)],
            passes_b: vec![(100, 118), (400, 410), (645, 660), (1000, 1012)],
            outage_events: vec![(60, false), (630, true), (650, false), (1380, true)],
        }
    }
}

impl ReportConfig {
    /// Defaults, overridden by `TIMESET_DAY` (YYYY-MM-DD) and `TIMESET_PAD_MINUTES`.
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`; values that do not parse are logged and skipped.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("TIMESET_DAY") {
            match raw.parse::<NaiveDate>() {
                Ok(day) => cfg.day = day,
                Err(err) => warn!(value = %raw, %err, "ignoring invalid TIMESET_DAY"),
            }
        }
        if let Some(raw) = lookup("TIMESET_PAD_MINUTES") {
            match raw.parse::<i64>() {
                Ok(pad) if TimeDelta::try_minutes(pad).is_some() => cfg.pad_minutes = pad,
                Ok(pad) => warn!(pad, "ignoring out-of-range TIMESET_PAD_MINUTES"),
                Err(err) => warn!(value = %raw, %err, "ignoring invalid TIMESET_PAD_MINUTES"),
            }
        }
        cfg
    }

    fn day_start(&self) -> Stamp {
        self.day.and_time(NaiveTime::MIN).and_utc()
    }

    fn at(&self, minute: i64) -> Stamp {
        self.day_start() + TimeDelta::minutes(minute)
    }

    fn day_span(&self) -> Interval<Stamp> {
        Interval::new(self.day_start(), self.at(24 * 60))
    }

    fn windows(&self, passes: &[(i64, i64)]) -> Result<IntervalSet<Stamp>, IntervalError> {
        let pad = TimeDelta::try_minutes(self.pad_minutes)
            .ok_or(InvalidArgumentError::new(InvalidArgumentKind::ShiftOverflow))?;
        passes
            .iter()
            .map(|&(a, b)| Interval::new(self.at(a), self.at(b)).pad(pad))
            .collect()
    }

    fn outages(&self) -> Result<IntervalSet<Stamp>, IntervalError> {
        let span = self.day_span();
        let mut builder = IntervalSetBuilder::new(Some(span.start()), Some(span.stop()));
        for &(minute, is_start) in &self.outage_events {
            if is_start {
                builder.add_start(self.at(minute))?;
            } else {
                builder.add_stop(self.at(minute))?;
            }
        }
        builder.build()
    }
}

#[derive(Debug, Clone, Serialize)]
struct WindowReport {
    start: String,
    stop: String,
    minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
struct SetReport {
    count: usize,
    total_minutes: i64,
    windows: Vec<WindowReport>,
}

impl SetReport {
    fn new(set: &IntervalSet<Stamp>) -> Self {
        Self {
            count: set.len(),
            total_minutes: set.total_duration().num_minutes(),
            windows: set
                .iter()
                .map(|w| WindowReport {
                    start: w.start().to_rfc3339(),
                    stop: w.stop().to_rfc3339(),
                    minutes: w.duration().num_minutes(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ContactReport {
    day: String,
    pad_minutes: i64,
    spacecraft_a: SetReport,
    spacecraft_b: SetReport,
    outages: SetReport,
    any_contact: SetReport,
    simultaneous: SetReport,
    usable: SetReport,
    idle: SetReport,
}

fn build_report(cfg: &ReportConfig) -> Result<ContactReport, IntervalError> {
    let a = cfg.windows(&cfg.passes_a)?;
    let b = cfg.windows(&cfg.passes_b)?;
    let outages = cfg.outages()?;

    let any = &a | &b;
    let simultaneous = &a & &b;
    let usable = &any - &outages;
    let idle = usable.complement(Some(cfg.day_span()))?;
    info!(
        any = any.len(),
        simultaneous = simultaneous.len(),
        usable = usable.len(),
        idle = idle.len(),
        "computed contact plan"
    );

    Ok(ContactReport {
        day: cfg.day.to_string(),
        pad_minutes: cfg.pad_minutes,
        spacecraft_a: SetReport::new(&a),
        spacecraft_b: SetReport::new(&b),
        outages: SetReport::new(&outages),
        any_contact: SetReport::new(&any),
        simultaneous: SetReport::new(&simultaneous),
        usable: SetReport::new(&usable),
        idle: SetReport::new(&idle),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let cfg = ReportConfig::from_env();
    info!(day = %cfg.day, pad_minutes = cfg.pad_minutes, "building contact report");

    let report = build_report(&cfg)?;
    serde_json::to_writer_pretty(io::stdout().lock(), &report)?;
    println!();
    Ok(())
}
