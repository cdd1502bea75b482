use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::LoanId,
    loan::{
        event::{CreateLoan, ReturnLoan},
        Loan, LoanListOptions,
    },
};

#[mockall::automock]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    // 貸出操作。蔵書の可用性検査と status 更新を同一トランザクションで行う
    async fn create(&self, event: CreateLoan) -> AppResult<Loan>;
    // 返却操作。貸出は一度しか返却できない
    async fn update_returned(&self, event: ReturnLoan) -> AppResult<Loan>;
    // 未返却の貸出情報を取得する
    async fn find_unreturned(&self, options: LoanListOptions) -> AppResult<Vec<Loan>>;
    // 返却済みも含めた貸出履歴
    async fn find_history(&self, options: LoanListOptions) -> AppResult<Vec<Loan>>;
    async fn find_by_id(&self, loan_id: LoanId) -> AppResult<Option<Loan>>;
}
