// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            _ => Err(ParseError::Kind(s.to_string())),
        }
    }
}

/// A calendar month. Ordering is numeric: year first, then month, so
/// `2024-9` sorts before `2024-10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthKey")]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

#[derive(Deserialize)]
struct RawMonthKey {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthKey> for MonthKey {
    type Error = ParseError;

    fn try_from(raw: RawMonthKey) -> Result<Self, Self::Error> {
        MonthKey::new(raw.year, raw.month)
            .ok_or_else(|| ParseError::Month(format!("{}-{}", raw.year, raw.month)))
    }
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

// Bucket keys are unpadded ("2024-9"); parsing accepts both forms.
impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Month(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        MonthKey::new(year, month).ok_or_else(err)
    }
}

/// Clamp a date to the first day of its month. Transactions are recorded per
/// month, never per day.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i64,
}

impl Transaction {
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxKind::Expense
    }
}

/// Transaction fields as submitted for insert or replace.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i64,
}

impl From<&Transaction> for NewTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind,
            amount: tx.amount,
            date: tx.date,
            category_id: tx.category_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedExpense {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub category_id: i64,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl EstimatedExpense {
    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEstimate {
    pub month: MonthKey,
    pub category_id: i64,
    pub amount: Decimal,
}

impl From<&EstimatedExpense> for NewEstimate {
    fn from(est: &EstimatedExpense) -> Self {
        Self {
            month: est.month_key(),
            category_id: est.category_id,
            amount: est.amount,
        }
    }
}

/// Estimated vs. actual spend for one month. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub estimated: Decimal,
    pub actual: Decimal,
}

impl MonthlyBucket {
    pub fn empty(key: MonthKey) -> Self {
        Self {
            year: key.year,
            month: key.month,
            estimated: Decimal::ZERO,
            actual: Decimal::ZERO,
        }
    }

    pub fn key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }

    pub fn difference(&self) -> Decimal {
        self.estimated - self.actual
    }
}
