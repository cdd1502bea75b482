use chrono::NaiveDate;
use kernel::model::{
    book::BookStatus,
    id::{BookId, LoanId, ReaderId},
    loan::{Loan, LoanBook, LoanReader},
};
use shared::error::AppError;

// loans / books / readers を JOIN した 1 行分
#[derive(sqlx::FromRow)]
pub struct LoanRow {
    pub loan_id: i64,
    pub checked_out_on: NaiveDate,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
    pub book_isbn: String,
    pub book_status: String,
    pub reader_id: i64,
    pub reader_name: String,
    pub reader_email: String,
    pub reader_registration_number: String,
}

impl TryFrom<LoanRow> for Loan {
    type Error = AppError;

    fn try_from(row: LoanRow) -> Result<Self, Self::Error> {
        let status = row.book_status.parse::<BookStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!("unknown book status: {}", row.book_status))
        })?;
        Ok(Loan {
            id: LoanId::new(row.loan_id),
            book: LoanBook {
                id: BookId::new(row.book_id),
                title: row.book_title,
                author: row.book_author,
                isbn: row.book_isbn,
                status,
            },
            reader: LoanReader {
                id: ReaderId::new(row.reader_id),
                name: row.reader_name,
                email: row.reader_email,
                registration_number: row.reader_registration_number,
            },
            checked_out_on: row.checked_out_on,
            due_on: row.due_on,
            returned_on: row.returned_on,
        })
    }
}
