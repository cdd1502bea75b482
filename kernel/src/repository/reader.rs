use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::ReaderId,
    reader::{
        event::{CreateReader, DeleteReader, UpdateReader},
        Reader, ReaderListOptions,
    },
};

#[mockall::automock]
#[async_trait]
pub trait ReaderRepository: Send + Sync {
    async fn create(&self, event: CreateReader) -> AppResult<Reader>;
    async fn find_all(&self, options: ReaderListOptions) -> AppResult<Vec<Reader>>;
    async fn find_by_id(&self, reader_id: ReaderId) -> AppResult<Option<Reader>>;
    async fn update(&self, event: UpdateReader) -> AppResult<Reader>;
    // 貸出履歴のある利用者は削除できない
    async fn delete(&self, event: DeleteReader) -> AppResult<()>;
}
