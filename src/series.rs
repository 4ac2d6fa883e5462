// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::CategoryTotal;
use crate::models::{MonthKey, MonthlyBucket};

/// Estimated-vs-actual chart input. All four sequences share one index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    #[serde(rename = "estimatedSeries")]
    pub estimated: Vec<Decimal>,
    #[serde(rename = "actualSeries")]
    pub actual: Vec<Decimal>,
    #[serde(rename = "differenceSeries")]
    pub difference: Vec<Decimal>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn trends(&self) -> Vec<Trend> {
        self.difference.iter().copied().map(Trend::of).collect()
    }
}

/// Presentation hint for a difference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    OnTrack,
    Over,
}

impl Trend {
    pub fn of(difference: Decimal) -> Self {
        if difference.is_sign_negative() && !difference.is_zero() {
            Trend::Over
        } else {
            Trend::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::OnTrack => "on track",
            Trend::Over => "over",
        }
    }
}

/// `"Sep 2024"` style label.
pub fn month_label(key: MonthKey) -> String {
    key.first_day()
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| key.to_string())
}

pub fn build_series(buckets: &[MonthlyBucket]) -> ChartSeries {
    let mut sorted: Vec<&MonthlyBucket> = buckets.iter().collect();
    sorted.sort_by_key(|b| b.key());

    let mut series = ChartSeries::default();
    for b in sorted {
        series.labels.push(month_label(b.key()));
        series.estimated.push(b.estimated);
        series.actual.push(b.actual);
        series.difference.push(b.difference());
    }
    series
}

/// Pie chart input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySeries {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

pub fn build_category_series(totals: &[CategoryTotal]) -> CategorySeries {
    CategorySeries {
        labels: totals.iter().map(|t| t.category.clone()).collect(),
        values: totals.iter().map(|t| t.total).collect(),
    }
}
