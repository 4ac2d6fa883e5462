// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store: CRUD over categories, transactions and estimated expenses,
//! with lookup by (year, month) and by category.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info};

use crate::db;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Category, EstimatedExpense, MonthKey, NewEstimate, NewTransaction, Transaction, TxKind,
    month_start,
};

pub trait RecordStore {
    fn fetch_categories(&self) -> StoreResult<Vec<Category>>;
    fn find_category(&self, name: &str) -> StoreResult<Option<Category>>;
    fn add_category(&self, name: &str) -> StoreResult<Category>;

    fn fetch_transactions(&self) -> StoreResult<Vec<Transaction>>;
    fn transactions_for_category(&self, category_id: i64) -> StoreResult<Vec<Transaction>>;
    fn get_transaction(&self, id: i64) -> StoreResult<Transaction>;
    fn add_transaction(&self, tx: &NewTransaction) -> StoreResult<i64>;
    fn update_transaction(&self, id: i64, tx: &NewTransaction) -> StoreResult<()>;
    fn delete_transaction(&self, id: i64) -> StoreResult<()>;

    /// Exact (year, month) matches when `month` is given, every row otherwise.
    fn fetch_estimates(&self, month: Option<MonthKey>) -> StoreResult<Vec<EstimatedExpense>>;
    fn estimates_for_category(&self, category_id: i64) -> StoreResult<Vec<EstimatedExpense>>;
    fn get_estimate(&self, id: i64) -> StoreResult<EstimatedExpense>;
    fn add_estimate(&self, est: &NewEstimate) -> StoreResult<i64>;
    fn update_estimate(&self, id: i64, est: &NewEstimate) -> StoreResult<()>;
    fn delete_estimate(&self, id: i64) -> StoreResult<()>;
}

/// SQLite-backed store. Owns its connection; drop it or call [`close`] when done.
///
/// [`close`]: SqliteStore::close
pub struct SqliteStore {
    conn: Connection,
}

const TX_COLUMNS: &str = "SELECT id, type, amount, date, category_id FROM transactions";
const EST_COLUMNS: &str =
    "SELECT id, year, month, category_id, amount, timestamp FROM estimated_expenses";

type TxRow = (i64, String, String, String, i64);
type EstRow = (i64, i32, u32, i64, String, String);

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(mut conn: Connection) -> StoreResult<Self> {
        db::init_schema(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn setting(&self, key: &str) -> StoreResult<Option<String>> {
        let v = self
            .conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn query_transactions(
        &self,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> StoreResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(transaction_from_row(row?)?);
        }
        Ok(data)
    }

    fn query_estimates(
        &self,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> StoreResult<Vec<EstimatedExpense>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?))
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(estimate_from_row(row?)?);
        }
        Ok(data)
    }
}

fn parse_amount(id: i64, s: &str) -> StoreResult<Decimal> {
    s.parse::<Decimal>().map_err(|_| StoreError::Corrupt {
        column: "amount",
        id,
        value: s.to_string(),
    })
}

fn transaction_from_row((id, kind, amount, date, category_id): TxRow) -> StoreResult<Transaction> {
    let kind: TxKind = kind.parse().map_err(|_| StoreError::Corrupt {
        column: "type",
        id,
        value: kind.clone(),
    })?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| StoreError::Corrupt {
        column: "date",
        id,
        value: date.clone(),
    })?;
    Ok(Transaction {
        id,
        kind,
        amount: parse_amount(id, &amount)?,
        date,
        category_id,
    })
}

fn estimate_from_row(
    (id, year, month, category_id, amount, timestamp): EstRow,
) -> StoreResult<EstimatedExpense> {
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| StoreError::Corrupt {
            column: "timestamp",
            id,
            value: timestamp.clone(),
        })?;
    Ok(EstimatedExpense {
        id,
        year,
        month,
        category_id,
        amount: parse_amount(id, &amount)?,
        timestamp,
    })
}

fn expect_one(changed: usize, kind: &'static str, id: i64) -> StoreResult<()> {
    if changed == 0 {
        return Err(StoreError::NotFound { kind, id });
    }
    Ok(())
}

impl RecordStore for SqliteStore {
    fn fetch_categories(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        debug!(count = data.len(), "fetched categories");
        Ok(data)
    }

    fn find_category(&self, name: &str) -> StoreResult<Option<Category>> {
        let c = self
            .conn
            .query_row(
                "SELECT id, name FROM categories WHERE name=?1",
                params![name],
                |r| {
                    Ok(Category {
                        id: r.get(0)?,
                        name: r.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(c)
    }

    fn add_category(&self, name: &str) -> StoreResult<Category> {
        match self
            .conn
            .execute("INSERT INTO categories(name) VALUES (?1)", params![name])
        {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::DuplicateCategory(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        let id = self.conn.last_insert_rowid();
        info!(id, name, "added category");
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    fn fetch_transactions(&self) -> StoreResult<Vec<Transaction>> {
        let data = self.query_transactions(&format!("{TX_COLUMNS} ORDER BY date, id"), params![])?;
        debug!(count = data.len(), "fetched transactions");
        Ok(data)
    }

    fn transactions_for_category(&self, category_id: i64) -> StoreResult<Vec<Transaction>> {
        self.query_transactions(
            &format!("{TX_COLUMNS} WHERE category_id=?1 ORDER BY date, id"),
            params![category_id],
        )
    }

    fn get_transaction(&self, id: i64) -> StoreResult<Transaction> {
        self.query_transactions(&format!("{TX_COLUMNS} WHERE id=?1"), params![id])?
            .pop()
            .ok_or(StoreError::NotFound {
                kind: "transaction",
                id,
            })
    }

    fn add_transaction(&self, tx: &NewTransaction) -> StoreResult<i64> {
        let date = month_start(tx.date);
        self.conn.execute(
            "INSERT INTO transactions(type, amount, date, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                tx.kind.as_str(),
                tx.amount.to_string(),
                date.to_string(),
                tx.category_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, kind = %tx.kind, amount = %tx.amount, %date, "recorded transaction");
        Ok(id)
    }

    fn update_transaction(&self, id: i64, tx: &NewTransaction) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE transactions SET type=?1, amount=?2, date=?3, category_id=?4 WHERE id=?5",
            params![
                tx.kind.as_str(),
                tx.amount.to_string(),
                month_start(tx.date).to_string(),
                tx.category_id,
                id
            ],
        )?;
        expect_one(changed, "transaction", id)?;
        info!(id, "updated transaction");
        Ok(())
    }

    fn delete_transaction(&self, id: i64) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        expect_one(changed, "transaction", id)?;
        info!(id, "deleted transaction");
        Ok(())
    }

    fn fetch_estimates(&self, month: Option<MonthKey>) -> StoreResult<Vec<EstimatedExpense>> {
        let data = match month {
            Some(m) => self.query_estimates(
                &format!("{EST_COLUMNS} WHERE year=?1 AND month=?2 ORDER BY id"),
                params![m.year, m.month],
            )?,
            None => self.query_estimates(
                &format!("{EST_COLUMNS} ORDER BY year, month, id"),
                params![],
            )?,
        };
        debug!(count = data.len(), filter = ?month, "fetched estimates");
        Ok(data)
    }

    fn estimates_for_category(&self, category_id: i64) -> StoreResult<Vec<EstimatedExpense>> {
        self.query_estimates(
            &format!("{EST_COLUMNS} WHERE category_id=?1 ORDER BY year, month, id"),
            params![category_id],
        )
    }

    fn get_estimate(&self, id: i64) -> StoreResult<EstimatedExpense> {
        self.query_estimates(&format!("{EST_COLUMNS} WHERE id=?1"), params![id])?
            .pop()
            .ok_or(StoreError::NotFound { kind: "estimate", id })
    }

    fn add_estimate(&self, est: &NewEstimate) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO estimated_expenses(year, month, category_id, amount, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                est.month.year,
                est.month.month,
                est.category_id,
                est.amount.to_string(),
                Utc::now().to_rfc3339()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, month = %est.month, amount = %est.amount, "recorded estimate");
        Ok(id)
    }

    // The creation timestamp is kept across edits.
    fn update_estimate(&self, id: i64, est: &NewEstimate) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE estimated_expenses SET year=?1, month=?2, category_id=?3, amount=?4
             WHERE id=?5",
            params![
                est.month.year,
                est.month.month,
                est.category_id,
                est.amount.to_string(),
                id
            ],
        )?;
        expect_one(changed, "estimate", id)?;
        info!(id, "updated estimate");
        Ok(())
    }

    fn delete_estimate(&self, id: i64) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM estimated_expenses WHERE id=?1", params![id])?;
        expect_one(changed, "estimate", id)?;
        info!(id, "deleted estimate");
        Ok(())
    }
}
