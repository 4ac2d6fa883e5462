// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::store::SqliteStore;

pub type AppLedger = Ledger<SqliteStore>;

pub mod categories;
pub mod transactions;
pub mod estimates;
pub mod reports;
pub mod exporter;
pub mod config;
pub mod doctor;
