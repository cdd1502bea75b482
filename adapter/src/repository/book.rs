use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        book::{
            event::{CreateBook, DeleteBook, UpdateBook},
            Book, BookListOptions, BookRemoval, BookStatus,
        },
        id::BookId,
    },
    repository::book::BookRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::book::BookRow, ConnectionPool};

use super::map_unique_violation;

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, event: CreateBook) -> AppResult<Book> {
        let row: BookRow = sqlx::query_as(
            "INSERT INTO books (title, author, isbn, status)
             VALUES ($1, $2, $3, 'available')
             RETURNING id, title, author, isbn, status",
        )
        .bind(&event.title)
        .bind(&event.author)
        .bind(&event.isbn)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| map_unique_violation(e, "isbn is already registered"))?;
        row.try_into()
    }

    async fn find_all(&self, options: BookListOptions) -> AppResult<Vec<Book>> {
        let search = options.search.map(|s| format!("%{s}%"));
        let status = options.status.map(|s| s.to_string());
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, title, author, isbn, status
             FROM books
             WHERE ($1::VARCHAR IS NULL OR title ILIKE $1 OR author ILIKE $1 OR isbn ILIKE $1)
               AND ($2::VARCHAR IS NULL OR status = $2)
             ORDER BY title ASC, id ASC",
        )
        .bind(search)
        .bind(status)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Book::try_from).collect()
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>> {
        let row: Option<BookRow> =
            sqlx::query_as("SELECT id, title, author, isbn, status FROM books WHERE id = $1")
                .bind(book_id.raw())
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        row.map(Book::try_from).transpose()
    }

    async fn update(&self, event: UpdateBook) -> AppResult<Book> {
        let row: Option<BookRow> = sqlx::query_as(
            "UPDATE books
             SET title = $1, author = $2, isbn = $3
             WHERE id = $4
             RETURNING id, title, author, isbn, status",
        )
        .bind(&event.title)
        .bind(&event.author)
        .bind(&event.isbn)
        .bind(event.book_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(|e| map_unique_violation(e, "isbn is already registered"))?;
        row.ok_or_else(|| AppError::EntityNotFound("book not found".into()))?
            .try_into()
    }

    async fn delete(&self, event: DeleteBook) -> AppResult<BookRemoval> {
        let mut tx = self.db.begin().await?;

        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, author, isbn, status FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(event.book_id.raw())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let book: Book = row
            .ok_or_else(|| AppError::EntityNotFound("book not found".into()))?
            .try_into()?;
        if book.status == BookStatus::Loaned {
            return Err(AppError::ResourceConflict("book is loaned".into()));
        }

        let loan_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE book_id = $1")
            .bind(event.book_id.raw())
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        // 貸出履歴の残る蔵書は参照整合性のため物理削除せず discarded に落とす
        let removal = if loan_count == 0 {
            let res = sqlx::query("DELETE FROM books WHERE id = $1")
                .bind(event.book_id.raw())
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            if res.rows_affected() < 1 {
                return Err(AppError::NoRowAffectedError(
                    "no book record has been deleted".into(),
                ));
            }
            BookRemoval::Deleted
        } else {
            let res = sqlx::query("UPDATE books SET status = 'discarded' WHERE id = $1")
                .bind(event.book_id.raw())
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            if res.rows_affected() < 1 {
                return Err(AppError::NoRowAffectedError(
                    "no book record has been updated".into(),
                ));
            }
            BookRemoval::Discarded
        };

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(removal)
    }
}
