//! Postgres document store: every collection lives in the `documents` table as JSONB.

use assetvault_core::models::{DocumentId, RawDocument};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::store::{StoreError, StoreGateway, StoreResult};

/// Row type for the documents table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub body: serde_json::Value,
}

impl DocumentRow {
    pub fn to_raw_document(self) -> RawDocument {
        RawDocument {
            id: DocumentId::from(self.id),
            body: self.body,
        }
    }
}

/// Errors that mean the database could not be reached, as opposed to a
/// statement the database refused.
fn is_connectivity_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed
    )
}

fn write_error(err: sqlx::Error) -> StoreError {
    if is_connectivity_error(&err) {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::WriteRejected(err.to_string())
    }
}

fn read_error(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

const BINDS_PER_ROW: usize = 3;

/// Postgres accepts at most `u16::MAX` bind parameters per statement.
const MAX_ROWS_PER_STATEMENT: usize = u16::MAX as usize / BINDS_PER_ROW;

/// One multi-row `INSERT` for `rows`, in order.
fn insert_statement<'a>(
    collection: &'a str,
    rows: &'a [(Uuid, serde_json::Value)],
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO documents (id, collection, body) ");
    builder.push_values(rows, |mut row, (id, body)| {
        row.push_bind(*id).push_bind(collection).push_bind(body);
    });
    builder
}

fn check_inserted(affected: u64, expected: usize) -> StoreResult<()> {
    if affected != expected as u64 {
        return Err(StoreError::WriteRejected(format!(
            "Inserted {} rows for {} documents",
            affected, expected
        )));
    }
    Ok(())
}

/// Document store backed by a shared `PgPool`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreGateway for PgDocumentStore {
    #[tracing::instrument(skip(self, documents), fields(db.table = "documents", db.collection = %collection, count = documents.len()))]
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<serde_json::Value>,
    ) -> StoreResult<Vec<DocumentId>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(Uuid, serde_json::Value)> = documents
            .into_iter()
            .map(|body| (Uuid::new_v4(), body))
            .collect();

        if rows.len() <= MAX_ROWS_PER_STATEMENT {
            let mut builder = insert_statement(collection, &rows);
            let result = builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(write_error)?;
            check_inserted(result.rows_affected(), rows.len())?;
        } else {
            // Too many binds for one statement: split, but keep the batch atomic.
            let mut tx = self.pool.begin().await.map_err(write_error)?;
            for chunk in rows.chunks(MAX_ROWS_PER_STATEMENT) {
                let mut builder = insert_statement(collection, chunk);
                let result = builder
                    .build()
                    .execute(&mut *tx)
                    .await
                    .map_err(write_error)?;
                check_inserted(result.rows_affected(), chunk.len())?;
            }
            tx.commit().await.map_err(write_error)?;
        }

        tracing::debug!(inserted = rows.len(), "Documents inserted");
        Ok(rows.into_iter().map(|(id, _)| DocumentId::from(id)).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.collection = %collection))]
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>> {
        let rows: Vec<DocumentRow> = sqlx::query_as::<Postgres, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows.into_iter().map(DocumentRow::to_raw_document).collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(read_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_errors_map_to_unavailable() {
        assert!(matches!(
            write_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            write_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_statement_errors_map_to_write_rejected() {
        assert!(matches!(
            write_error(sqlx::Error::RowNotFound),
            StoreError::WriteRejected(_)
        ));
    }

    #[test]
    fn test_read_errors_are_always_unavailable() {
        assert!(matches!(
            read_error(sqlx::Error::RowNotFound),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_insert_is_one_multi_row_statement() {
        let rows = vec![
            (Uuid::new_v4(), serde_json::json!({"player_name": "John", "score": 4500})),
            (Uuid::new_v4(), serde_json::json!({"player_name": "Jane", "score": 3900})),
        ];
        let builder = insert_statement("scores", &rows);
        let sql = builder.sql();
        assert!(sql.starts_with("INSERT INTO documents (id, collection, body) VALUES"));
        assert!(sql.contains("($1, $2, $3)"));
        assert!(sql.contains("($4, $5, $6)"));
        assert!(!sql.contains("$7"));
    }

    #[test]
    fn test_statement_stays_under_bind_limit() {
        assert!(MAX_ROWS_PER_STATEMENT * BINDS_PER_ROW <= u16::MAX as usize);
    }

    #[test]
    fn test_short_insert_is_rejected() {
        assert!(check_inserted(2, 2).is_ok());
        assert!(matches!(
            check_inserted(1, 2),
            Err(StoreError::WriteRejected(_))
        ));
    }

    #[test]
    fn test_row_to_raw_document_keeps_id() {
        let id = Uuid::new_v4();
        let doc = DocumentRow {
            id,
            body: serde_json::json!({"player_name": "John", "score": 1}),
        }
        .to_raw_document();
        assert_eq!(doc.id.as_str(), id.to_string());
        assert_eq!(doc.body["score"], 1);
    }
}
