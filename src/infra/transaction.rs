//! Unit-of-work helpers for repository operations.
//!
//! Every mutating repository method runs through [`mutate`] or
//! [`mutate_and_refresh`]: the body stages changes against a transaction and
//! the helper owns the commit/rollback decision, so individual methods are
//! written as if they always succeed. Read-only operations execute directly
//! against the pooled connection and never commit or refresh.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, SqlErr,
    TransactionTrait,
};

use super::repositories::CatalogEntity;
use crate::domain::CatalogEntry;
use crate::errors::{AppError, AppResult};

/// Boxed future produced by a transaction body
pub(crate) type TxnFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Run a mutating operation inside a transaction.
///
/// Commits when the body succeeds and rolls back on every error path.
/// Already-typed domain errors (e.g. an invalid-field rejection raised by
/// the body itself) cross this boundary unchanged; storage failures arrive
/// here already mapped through [`storage_error`].
pub(crate) async fn mutate<T, F>(
    db: &DatabaseConnection,
    operation: &'static str,
    body: F,
) -> AppResult<T>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
    T: Send,
{
    let txn = db
        .begin()
        .await
        .map_err(|e| storage_error(operation, e))?;

    let result = match body(&txn).await {
        Ok(value) => value,
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            return Err(err);
        }
    };

    txn.commit()
        .await
        .map_err(|e| storage_error(operation, e))?;

    Ok(result)
}

/// Run a mutating operation that produces one entity row, then re-read the
/// row after commit so storage-assigned fields (id, server-default
/// created_at) are populated on the returned entry.
pub(crate) async fn mutate_and_refresh<E, F>(
    db: &DatabaseConnection,
    operation: &'static str,
    body: F,
) -> AppResult<CatalogEntry>
where
    E: CatalogEntity,
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, E::Model> + Send,
{
    let staged = mutate(db, operation, body).await.map(E::to_entry)?;
    refresh::<E>(db, operation, staged).await
}

async fn refresh<E: CatalogEntity>(
    db: &DatabaseConnection,
    operation: &'static str,
    entry: CatalogEntry,
) -> AppResult<CatalogEntry> {
    let id = entry.id.ok_or_else(|| {
        AppError::database(
            format!("Unexpected repository error in operation: {operation}"),
            "committed row carries no id",
        )
    })?;

    let model = E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await
        .map_err(|e| storage_error(operation, e))?
        .ok_or_else(|| {
            AppError::database(
                format!("Database operation failure: {operation}"),
                format!("row {id} disappeared after commit"),
            )
        })?;

    Ok(E::to_entry(model))
}

/// Map a storage failure onto the error taxonomy.
///
/// Integrity violations keep the driver's detail string; any other storage
/// failure names the repository operation that raised it.
pub(crate) fn storage_error(operation: &'static str, err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail))
        | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            AppError::database("Data integrity violation", detail)
        }
        _ => match &err {
            DbErr::Conn(_) | DbErr::Exec(_) | DbErr::Query(_) => AppError::database(
                format!("Database operation failure: {operation}"),
                err.to_string(),
            ),
            _ => AppError::database(
                format!("Unexpected repository error in operation: {operation}"),
                err.to_string(),
            ),
        },
    }
}
