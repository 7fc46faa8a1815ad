//! Transaction helper.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionError, TransactionTrait};
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Runs `f` inside a database transaction.
///
/// The transaction commits when `f` returns `Ok` and rolls back otherwise.
/// Errors raised inside `f` come back unchanged, so a domain error such as a
/// missing reference keeps its variant across the rollback.
///
/// ```rust,ignore
/// let id = with_transaction(&db, |txn| {
///     Box::pin(async move {
///         let report = report.insert(txn).await?;
///         Ok(report.production_status_code)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, T, E>(db: &DatabaseConnection, f: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, E>> + Send,
    T: Send,
    E: std::error::Error + From<DbErr> + Send,
{
    db.transaction::<F, T, E>(f).await.map_err(|e| match e {
        TransactionError::Connection(db_err) => E::from(db_err),
        TransactionError::Transaction(err) => err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ServiceError};
    use assert_matches::assert_matches;
    use sea_orm::{ConnectionTrait, Database, Statement};

    async fn scratch_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "CREATE TABLE marks (id INTEGER PRIMARY KEY)".to_string(),
        ))
        .await
        .unwrap();
        db
    }

    async fn count(db: &DatabaseConnection) -> i64 {
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM marks".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get("", "n").unwrap()
    }

    #[tokio::test]
    async fn domain_error_rolls_back_and_is_preserved() {
        let db = scratch_db().await;

        let result: Result<(), ServiceError> = with_transaction(&db, |txn| {
            Box::pin(async move {
                txn.execute(Statement::from_string(
                    txn.get_database_backend(),
                    "INSERT INTO marks (id) VALUES (1)".to_string(),
                ))
                .await?;
                Err(ServiceError::NotFound(ErrorCode::NotFoundWorkOrder))
            })
        })
        .await;

        assert_matches!(
            result,
            Err(ServiceError::NotFound(ErrorCode::NotFoundWorkOrder))
        );
        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn success_commits() {
        let db = scratch_db().await;

        let value = with_transaction::<_, _, ServiceError>(&db, |txn| {
            Box::pin(async move {
                txn.execute(Statement::from_string(
                    txn.get_database_backend(),
                    "INSERT INTO marks (id) VALUES (1)".to_string(),
                ))
                .await?;
                Ok(7)
            })
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(count(&db).await, 1);
    }
}
