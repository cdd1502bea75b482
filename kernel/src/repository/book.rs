use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        Book, BookListOptions, BookRemoval,
    },
    id::BookId,
};

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, event: CreateBook) -> AppResult<Book>;
    async fn find_all(&self, options: BookListOptions) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>>;
    // メタデータの編集のみ。status はここでは変更しない
    async fn update(&self, event: UpdateBook) -> AppResult<Book>;
    // 貸出中は削除不可。貸出履歴があれば discarded へ、無ければ物理削除
    async fn delete(&self, event: DeleteBook) -> AppResult<BookRemoval>;
}
