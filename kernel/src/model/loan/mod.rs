use chrono::NaiveDate;

use super::{
    book::BookStatus,
    id::{BookId, LoanId, ReaderId},
};

pub mod event;

// 貸出レコード。book/reader は取得時点のスナップショットを埋め込んで返す
#[derive(Debug, Clone)]
pub struct Loan {
    pub id: LoanId,
    pub book: LoanBook,
    pub reader: LoanReader,
    pub checked_out_on: NaiveDate,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
}

// Book 型と似ているが、貸出ビューに埋め込む専用のスナップショットとして別の型にしている
#[derive(Debug, Clone)]
pub struct LoanBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: BookStatus,
}

#[derive(Debug, Clone)]
pub struct LoanReader {
    pub id: ReaderId,
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

impl Loan {
    pub fn is_returned(&self) -> bool {
        self.returned_on.is_some()
    }

    // 延滞日数。実効終了日（返却済みなら返却日、未返却なら today）と
    // 返却期日の差を丸一日単位で数え、期日内は 0 に丸める。
    // 保存はせず、常に読み出し時に計算する
    pub fn overdue_days(&self, today: NaiveDate) -> i64 {
        let end_on = self.returned_on.unwrap_or(today);
        (end_on - self.due_on).num_days().max(0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoanListOptions {
    pub reader_id: Option<ReaderId>,
    pub book_id: Option<BookId>,
}
