use shared::error::{AppError, AppResult};
use strum::{Display, EnumString};

use super::id::BookId;

pub mod event;

// available/loaned の遷移は貸出エンジンのみが行う。
// discarded は貸出履歴の残る蔵書を削除フローが落とし込む終端状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BookStatus {
    Available,
    Loaned,
    Discarded,
}

#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: BookStatus,
}

impl Book {
    // 貸出作成のゲート。available 以外は貸し出せない
    pub fn ensure_loanable(&self) -> AppResult<()> {
        match self.status {
            BookStatus::Available => Ok(()),
            BookStatus::Loaned => Err(AppError::ResourceConflict("book is loaned".into())),
            BookStatus::Discarded => Err(AppError::ResourceConflict("book is discarded".into())),
        }
    }
}

// 削除フローの結果。貸出履歴の有無で物理削除か廃棄かが分かれる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BookRemoval {
    Deleted,
    Discarded,
}

#[derive(Debug, Default)]
pub struct BookListOptions {
    pub search: Option<String>,
    pub status: Option<BookStatus>,
}
