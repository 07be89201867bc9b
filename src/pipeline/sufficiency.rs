//! Decides whether a source's result satisfies the output contract.
//!
//! Validation works entry by entry: an entry with a missing or unreadable
//! field is discarded on its own, and only the surviving entries are checked
//! against the contract.

use crate::types::climate::{MonthlyClimate, TrendPoint};
use crate::types::farm::WaterUsage;
use crate::types::month::Month;
use crate::types::raw::{RawMonthlyClimate, RawTrendRecord, RawWaterUsage};
use log::debug;

pub const MONTHS_PER_YEAR: usize = 12;

/// Minimum shape a series must have to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The series must have exactly this many entries.
    Exactly(usize),
    /// The series must have at least this many entries.
    AtLeast(usize),
}

impl Requirement {
    /// Monthly series: one entry per calendar month.
    pub const FULL_YEAR: Requirement = Requirement::Exactly(MONTHS_PER_YEAR);
    /// Yearly trends: any single valid year is enough.
    pub const ANY: Requirement = Requirement::AtLeast(1);
}

pub fn is_sufficient<T>(series: &[T], requirement: Requirement) -> bool {
    match requirement {
        Requirement::Exactly(n) => series.len() == n,
        Requirement::AtLeast(n) => series.len() >= n,
    }
}

/// Entries that carry a calendar month.
pub trait MonthIndexed {
    fn month(&self) -> Month;
}

impl MonthIndexed for MonthlyClimate {
    fn month(&self) -> Month {
        self.month
    }
}

impl MonthIndexed for WaterUsage {
    fn month(&self) -> Month {
        self.month
    }
}

/// Exactly twelve entries, Jan..Dec, in calendar order.
pub fn is_complete_year<T: MonthIndexed>(series: &[T]) -> bool {
    is_sufficient(series, Requirement::FULL_YEAR)
        && series
            .iter()
            .zip(Month::ALL)
            .all(|(entry, month)| entry.month() == month)
}

/// Result of checking one source's records.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation<T> {
    Sufficient {
        value: T,
        valid: usize,
        discarded: usize,
    },
    Insufficient {
        valid: usize,
        discarded: usize,
    },
}

#[cfg(test)]
impl<T> Evaluation<T> {
    pub fn is_sufficient(&self) -> bool {
        matches!(self, Evaluation::Sufficient { .. })
    }
}

impl<T> Evaluation<T> {
    fn from_validated<U>(
        validated: Validated<U>,
        accept: impl FnOnce(&[U]) -> bool,
        wrap: impl FnOnce(Vec<U>) -> T,
    ) -> Self {
        let valid = validated.entries.len();
        let discarded = validated.discarded;
        if accept(&validated.entries) {
            Evaluation::Sufficient {
                value: wrap(validated.entries),
                valid,
                discarded,
            }
        } else {
            Evaluation::Insufficient { valid, discarded }
        }
    }
}

/// Entries that passed validation and how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub entries: Vec<T>,
    pub discarded: usize,
}

impl<T> Validated<T> {
    fn collect<R>(raw: &[R], mut parse: impl FnMut(&R) -> Option<T>) -> Self {
        let mut entries = Vec::with_capacity(raw.len());
        let mut discarded = 0;
        for record in raw {
            match parse(record) {
                Some(entry) => entries.push(entry),
                None => discarded += 1,
            }
        }
        if discarded > 0 {
            debug!("Discarded {} malformed of {} records", discarded, raw.len());
        }
        Self { entries, discarded }
    }
}

/// Keeps records with both a readable year and value, in source order.
pub fn validate_trend(raw: &[RawTrendRecord], unit: &'static str) -> Validated<TrendPoint> {
    Validated::collect(raw, |r| {
        Some(TrendPoint {
            year: r.year.as_ref()?.as_year()?,
            value: r.value.as_ref()?.as_f64()?,
            unit,
        })
    })
}

pub fn validate_monthly_climate(raw: &[RawMonthlyClimate]) -> Validated<MonthlyClimate> {
    Validated::collect(raw, |r| {
        Some(MonthlyClimate {
            month: r.month,
            temperature: r.temperature.as_ref()?.as_f64()?,
            rainfall: r.rainfall.as_ref()?.as_f64()?,
        })
    })
}

pub fn validate_water_usage(raw: &[RawWaterUsage]) -> Validated<WaterUsage> {
    Validated::collect(raw, |r| {
        Some(WaterUsage {
            month: Month::from_label(r.month.as_deref()?)?,
            rainfall: r.rainfall.as_ref()?.as_f64()?,
            irrigation: r.irrigation.as_ref()?.as_f64()?,
            efficiency: r.efficiency.as_ref()?.as_f64()?,
        })
    })
}

pub fn evaluate_trend(raw: &[RawTrendRecord], unit: &'static str) -> Evaluation<Vec<TrendPoint>> {
    Evaluation::from_validated(
        validate_trend(raw, unit),
        |entries| is_sufficient(entries, Requirement::ANY),
        |entries| entries,
    )
}

pub fn evaluate_monthly_climate(raw: &[RawMonthlyClimate]) -> Evaluation<Vec<MonthlyClimate>> {
    Evaluation::from_validated(validate_monthly_climate(raw), is_complete_year, |e| e)
}

pub fn evaluate_water_usage(raw: &[RawWaterUsage]) -> Evaluation<Vec<WaterUsage>> {
    Evaluation::from_validated(validate_water_usage(raw), is_complete_year, |e| e)
}
