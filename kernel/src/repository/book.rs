use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{event::CreateBook, Book},
    id::BookId,
};

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    // 著者が指定されている場合は、存在する著者でなければならない
    async fn create(&self, event: CreateBook) -> AppResult<BookId>;
    // 書名の昇順
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>>;
    // 書名は一意ではないので、登録順で最初に見つかったものを返す
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>>;
    async fn find_genres(&self) -> AppResult<Vec<String>>;
}
