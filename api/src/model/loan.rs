use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    id::{BookId, ReaderId},
    loan::{event::CreateLoan, Loan, LoanBook, LoanListOptions, LoanReader},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    #[garde(skip)]
    pub book_id: i64,
    #[garde(skip)]
    pub reader_id: i64,
    // 貸出期間は暦日数。省略時は 14 日
    #[serde(default = "default_loan_days")]
    #[garde(range(min = 1, max = 365))]
    pub loan_days: i64,
}

fn default_loan_days() -> i64 {
    14
}

impl From<CreateLoanRequest> for CreateLoan {
    fn from(value: CreateLoanRequest) -> Self {
        Self {
            book_id: BookId::new(value.book_id),
            reader_id: ReaderId::new(value.reader_id),
            loan_days: value.loan_days,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanListQuery {
    pub reader_id: Option<i64>,
    pub book_id: Option<i64>,
}

impl From<LoanListQuery> for LoanListOptions {
    fn from(value: LoanListQuery) -> Self {
        Self {
            reader_id: value.reader_id.map(ReaderId::new),
            book_id: value.book_id.map(BookId::new),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub id: i64,
    pub book: LoanBookResponse,
    pub reader: LoanReaderResponse,
    pub checked_out_on: NaiveDate,
    pub due_on: NaiveDate,
    // 未返却の間は null のまま
    pub returned_on: Option<NaiveDate>,
    pub overdue_days: i64,
}

impl LoanResponse {
    // overdue_days は未返却の間も伸び続けるため、評価時点の today を渡して組み立てる
    pub fn new(loan: Loan, today: NaiveDate) -> Self {
        let overdue_days = loan.overdue_days(today);
        let Loan {
            id,
            book,
            reader,
            checked_out_on,
            due_on,
            returned_on,
        } = loan;
        Self {
            id: id.raw(),
            book: book.into(),
            reader: reader.into(),
            checked_out_on,
            due_on,
            returned_on,
            overdue_days,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: String,
}

impl From<LoanBook> for LoanBookResponse {
    fn from(value: LoanBook) -> Self {
        Self {
            id: value.id.raw(),
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            status: value.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanReaderResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

impl From<LoanReader> for LoanReaderResponse {
    fn from(value: LoanReader) -> Self {
        Self {
            id: value.id.raw(),
            name: value.name,
            email: value.email,
            registration_number: value.registration_number,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedLoanResponse {
    #[serde(flatten)]
    pub loan: LoanResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl ReturnedLoanResponse {
    pub fn new(loan: Loan, today: NaiveDate) -> Self {
        let loan = LoanResponse::new(loan, today);
        let alert = (loan.overdue_days > 0)
            .then(|| format!("returned {} day(s) overdue", loan.overdue_days));
        Self { loan, alert }
    }
}
