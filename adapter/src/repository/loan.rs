use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::{
    clock::Clock,
    model::{
        book::Book,
        id::{BookId, LoanId, ReaderId},
        loan::{
            event::{CreateLoan, ReturnLoan},
            Loan, LoanListOptions,
        },
    },
    repository::loan::LoanRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{book::BookRow, loan::LoanRow},
    ConnectionPool,
};

#[derive(new)]
pub struct LoanRepositoryImpl {
    db: ConnectionPool,
    clock: Arc<dyn Clock>,
}

// JOIN 済みの貸出 1 件分を引く SELECT 句。find 系で共用する
const SELECT_LOAN: &str = "
    SELECT
        l.id AS loan_id,
        l.checked_out_on,
        l.due_on,
        l.returned_on,
        b.id AS book_id,
        b.title AS book_title,
        b.author AS book_author,
        b.isbn AS book_isbn,
        b.status AS book_status,
        r.id AS reader_id,
        r.name AS reader_name,
        r.email AS reader_email,
        r.registration_number AS reader_registration_number
    FROM loans AS l
    INNER JOIN books AS b ON b.id = l.book_id
    INNER JOIN readers AS r ON r.id = l.reader_id
";

#[async_trait]
impl LoanRepository for LoanRepositoryImpl {
    async fn create(&self, event: CreateLoan) -> AppResult<Loan> {
        let mut tx = self.db.begin().await?;

        // 可用性チェックと status 更新が別リクエストと交差しないよう、蔵書の行をロックして読む
        let book_row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, author, isbn, status FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(event.book_id.raw())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let book: Book = book_row
            .ok_or_else(|| AppError::EntityNotFound("book not found".into()))?
            .try_into()?;
        book.ensure_loanable()?;

        // 貸出先の存在確認のみ。内容は最後の再取得で JOIN して返す
        sqlx::query_scalar::<_, i64>("SELECT id FROM readers WHERE id = $1")
            .bind(event.reader_id.raw())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .ok_or_else(|| AppError::EntityNotFound("reader not found".into()))?;

        let checked_out_on = self.clock.today();
        let due_on = event.due_on(checked_out_on);

        let loan_id: i64 = sqlx::query_scalar(
            "INSERT INTO loans (book_id, reader_id, checked_out_on, due_on)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(event.book_id.raw())
        .bind(event.reader_id.raw())
        .bind(checked_out_on)
        .bind(due_on)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("UPDATE books SET status = 'loaned' WHERE id = $1")
            .bind(event.book_id.raw())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowAffectedError(
                "no book record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.find_by_id(LoanId::new(loan_id))
            .await?
            .ok_or_else(|| AppError::EntityNotFound("loan not found".into()))
    }

    async fn update_returned(&self, event: ReturnLoan) -> AppResult<Loan> {
        let mut tx = self.db.begin().await?;

        let row: Option<(i64, Option<NaiveDate>)> =
            sqlx::query_as("SELECT book_id, returned_on FROM loans WHERE id = $1 FOR UPDATE")
                .bind(event.loan_id.raw())
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let (book_id, returned_on) =
            row.ok_or_else(|| AppError::EntityNotFound("loan not found".into()))?;
        if returned_on.is_some() {
            return Err(AppError::ResourceConflict("loan already returned".into()));
        }

        let returned_on = self.clock.today();
        let res = sqlx::query("UPDATE loans SET returned_on = $1 WHERE id = $2")
            .bind(returned_on)
            .bind(event.loan_id.raw())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowAffectedError(
                "no loan record has been updated".into(),
            ));
        }

        let res = sqlx::query("UPDATE books SET status = 'available' WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowAffectedError(
                "no book record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.find_by_id(event.loan_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound("loan not found".into()))
    }

    async fn find_unreturned(&self, options: LoanListOptions) -> AppResult<Vec<Loan>> {
        let query = format!(
            "{SELECT_LOAN}
             WHERE l.returned_on IS NULL
               AND ($1::BIGINT IS NULL OR l.reader_id = $1)
               AND ($2::BIGINT IS NULL OR l.book_id = $2)
             ORDER BY l.checked_out_on DESC, l.id DESC"
        );
        let rows: Vec<LoanRow> = sqlx::query_as(&query)
            .bind(options.reader_id.map(ReaderId::raw))
            .bind(options.book_id.map(BookId::raw))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Loan::try_from).collect()
    }

    async fn find_history(&self, options: LoanListOptions) -> AppResult<Vec<Loan>> {
        let query = format!(
            "{SELECT_LOAN}
             WHERE ($1::BIGINT IS NULL OR l.reader_id = $1)
               AND ($2::BIGINT IS NULL OR l.book_id = $2)
             ORDER BY l.checked_out_on DESC, l.id DESC"
        );
        let rows: Vec<LoanRow> = sqlx::query_as(&query)
            .bind(options.reader_id.map(ReaderId::raw))
            .bind(options.book_id.map(BookId::raw))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Loan::try_from).collect()
    }

    async fn find_by_id(&self, loan_id: LoanId) -> AppResult<Option<Loan>> {
        let query = format!("{SELECT_LOAN} WHERE l.id = $1");
        let row: Option<LoanRow> = sqlx::query_as(&query)
            .bind(loan_id.raw())
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(Loan::try_from).transpose()
    }
}
