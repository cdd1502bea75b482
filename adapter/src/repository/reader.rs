use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::ReaderId,
        reader::{
            event::{CreateReader, DeleteReader, UpdateReader},
            Reader, ReaderListOptions,
        },
    },
    repository::reader::ReaderRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::reader::ReaderRow, ConnectionPool};

use super::map_unique_violation;

#[derive(new)]
pub struct ReaderRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReaderRepository for ReaderRepositoryImpl {
    async fn create(&self, event: CreateReader) -> AppResult<Reader> {
        let row: ReaderRow = sqlx::query_as(
            "INSERT INTO readers (name, email, registration_number)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, registration_number",
        )
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.registration_number)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| map_unique_violation(e, "email or registration number is already registered"))?;
        Ok(row.into())
    }

    async fn find_all(&self, options: ReaderListOptions) -> AppResult<Vec<Reader>> {
        let search = options.search.map(|s| format!("%{s}%"));
        let rows: Vec<ReaderRow> = sqlx::query_as(
            "SELECT id, name, email, registration_number
             FROM readers
             WHERE ($1::VARCHAR IS NULL
                    OR name ILIKE $1
                    OR email ILIKE $1
                    OR registration_number ILIKE $1)
             ORDER BY name ASC, id ASC",
        )
        .bind(search)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Reader::from).collect())
    }

    async fn find_by_id(&self, reader_id: ReaderId) -> AppResult<Option<Reader>> {
        let row: Option<ReaderRow> = sqlx::query_as(
            "SELECT id, name, email, registration_number FROM readers WHERE id = $1",
        )
        .bind(reader_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Reader::from))
    }

    async fn update(&self, event: UpdateReader) -> AppResult<Reader> {
        let row: Option<ReaderRow> = sqlx::query_as(
            "UPDATE readers
             SET name = $1, email = $2, registration_number = $3
             WHERE id = $4
             RETURNING id, name, email, registration_number",
        )
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.registration_number)
        .bind(event.reader_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(|e| map_unique_violation(e, "email or registration number is already registered"))?;
        row.map(Reader::from)
            .ok_or_else(|| AppError::EntityNotFound("reader not found".into()))
    }

    async fn delete(&self, event: DeleteReader) -> AppResult<()> {
        // loans 側の外部キーが RESTRICT なので、貸出履歴があると削除は弾かれる
        let res = sqlx::query("DELETE FROM readers WHERE id = $1")
            .bind(event.reader_id.raw())
            .execute(self.db.inner_ref())
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::ResourceConflict("reader has loan history".into())
                }
                e => AppError::SpecificOperationError(e),
            })?;
        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("reader not found".into()));
        }
        Ok(())
    }
}
