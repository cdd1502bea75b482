use chrono::{Duration, NaiveDate};

use super::super::id::{BookId, LoanId, ReaderId};

#[derive(Debug)]
pub struct CreateLoan {
    pub book_id: BookId,
    pub reader_id: ReaderId,
    // 暦日数。返却期日は貸出日 + loan_days になる
    pub loan_days: i64,
}

impl CreateLoan {
    pub fn due_on(&self, checked_out_on: NaiveDate) -> NaiveDate {
        checked_out_on + Duration::days(self.loan_days)
    }
}

#[derive(Debug)]
pub struct ReturnLoan {
    pub loan_id: LoanId,
}
