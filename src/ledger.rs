// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Binds a record store to the aggregation functions.
//!
//! Mutations go through [`Ledger`] so subscribers learn about them; queries
//! fetch what they need and hand it to the pure functions. The month to look
//! at is always passed in by the caller.

use std::sync::mpsc::Receiver;
use tracing::debug;

use crate::aggregate::{
    CategoryTotal, MonthTotals, aggregate_monthly, category_spending, month_totals,
};
use crate::error::StoreResult;
use crate::events::{ChangeEvent, ChangeFeed};
use crate::models::{Category, MonthKey, MonthlyBucket, NewEstimate, NewTransaction};
use crate::report::{MonthReport, build_report};
use crate::series::{ChartSeries, build_series};
use crate::store::RecordStore;

pub struct Ledger<S: RecordStore> {
    store: S,
    feed: ChangeFeed,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            feed: ChangeFeed::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.feed.subscribe()
    }

    pub fn add_category(&mut self, name: &str) -> StoreResult<Category> {
        let c = self.store.add_category(name)?;
        self.feed.publish(ChangeEvent::CategoryAdded(c.id));
        Ok(c)
    }

    pub fn add_transaction(&mut self, tx: &NewTransaction) -> StoreResult<i64> {
        let id = self.store.add_transaction(tx)?;
        self.feed.publish(ChangeEvent::TransactionAdded(id));
        Ok(id)
    }

    pub fn update_transaction(&mut self, id: i64, tx: &NewTransaction) -> StoreResult<()> {
        self.store.update_transaction(id, tx)?;
        self.feed.publish(ChangeEvent::TransactionUpdated(id));
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: i64) -> StoreResult<()> {
        self.store.delete_transaction(id)?;
        self.feed.publish(ChangeEvent::TransactionDeleted(id));
        Ok(())
    }

    pub fn add_estimate(&mut self, est: &NewEstimate) -> StoreResult<i64> {
        let id = self.store.add_estimate(est)?;
        self.feed.publish(ChangeEvent::EstimateAdded(id));
        Ok(id)
    }

    pub fn update_estimate(&mut self, id: i64, est: &NewEstimate) -> StoreResult<()> {
        self.store.update_estimate(id, est)?;
        self.feed.publish(ChangeEvent::EstimateUpdated(id));
        Ok(())
    }

    pub fn delete_estimate(&mut self, id: i64) -> StoreResult<()> {
        self.store.delete_estimate(id)?;
        self.feed.publish(ChangeEvent::EstimateDeleted(id));
        Ok(())
    }

    pub fn monthly_buckets(&self, filter: Option<MonthKey>) -> StoreResult<Vec<MonthlyBucket>> {
        let transactions = self.store.fetch_transactions()?;
        let estimates = self.store.fetch_estimates(filter)?;
        let buckets = aggregate_monthly(&transactions, &estimates, filter);
        debug!(buckets = buckets.len(), ?filter, "aggregated months");
        Ok(buckets)
    }

    pub fn comparison(&self, filter: Option<MonthKey>) -> StoreResult<ChartSeries> {
        Ok(build_series(&self.monthly_buckets(filter)?))
    }

    pub fn month_totals(&self, month: MonthKey) -> StoreResult<MonthTotals> {
        let transactions = self.store.fetch_transactions()?;
        let estimates = self.store.fetch_estimates(Some(month))?;
        Ok(month_totals(&transactions, &estimates, month))
    }

    pub fn category_spending(&self, filter: Option<MonthKey>) -> StoreResult<Vec<CategoryTotal>> {
        let categories = self.store.fetch_categories()?;
        let transactions = self.store.fetch_transactions()?;
        Ok(category_spending(&transactions, &categories, filter))
    }

    pub fn month_report(&self, month: MonthKey) -> StoreResult<MonthReport> {
        let categories = self.store.fetch_categories()?;
        let transactions = self.store.fetch_transactions()?;
        let estimates = self.store.fetch_estimates(Some(month))?;
        Ok(build_report(month, &transactions, &estimates, &categories))
    }
}
