// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod events;
pub mod ledger;
pub mod models;
pub mod report;
pub mod series;
pub mod store;
pub mod utils;

pub use aggregate::aggregate_monthly;
pub use report::format_report;
pub use series::build_series;
