use chrono::{DateTime, Utc};
use kernel::model::{
    book::{Book, BookAuthor, BookStatus},
    id::{AuthorId, BookId},
};
use shared::error::AppError;

// books と authors を LEFT JOIN した行
#[derive(sqlx::FromRow)]
pub struct BookRow {
    pub book_id: BookId,
    pub title: String,
    pub author_id: Option<AuthorId>,
    pub author_name: Option<String>,
    pub genre: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = AppError;

    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        let BookRow {
            book_id,
            title,
            author_id,
            author_name,
            genre,
            description,
            status,
            created_at,
        } = value;
        let status = status
            .parse::<BookStatus>()
            .map_err(|e| AppError::ConversionEntityError(format!("book status: {e}")))?;
        let author = match (author_id, author_name) {
            (Some(id), Some(name)) => Some(BookAuthor { id, name }),
            _ => None,
        };
        Ok(Book {
            id: book_id,
            title,
            author,
            genre,
            description,
            status,
            created_at,
        })
    }
}

// 貸出処理で状態を判定するために引く最小限の列
#[derive(sqlx::FromRow)]
pub struct BookStatusRow {
    pub book_id: BookId,
    pub status: String,
}

impl BookStatusRow {
    pub fn status(&self) -> Result<BookStatus, AppError> {
        self.status
            .parse::<BookStatus>()
            .map_err(|e| AppError::ConversionEntityError(format!("book status: {e}")))
    }
}
