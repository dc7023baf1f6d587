use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    book::{event::CreateBook, Book, BookAuthor, BookStatus},
    id::{AuthorId, BookId},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[garde(length(min = 1))]
    title: String,
    #[garde(skip)]
    author_id: Option<AuthorId>,
    #[garde(skip)]
    #[serde(default)]
    genre: String,
    #[garde(skip)]
    #[serde(default)]
    description: String,
}

impl From<CreateBookRequest> for CreateBook {
    fn from(value: CreateBookRequest) -> Self {
        let CreateBookRequest {
            title,
            author_id,
            genre,
            description,
        } = value;
        CreateBook::new(title, author_id, genre, description)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookResponse {
    pub id: BookId,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BookStatusName {
    Available,
    Borrowed,
}

impl From<BookStatus> for BookStatusName {
    fn from(value: BookStatus) -> Self {
        match value {
            BookStatus::Available => Self::Available,
            BookStatus::Borrowed => Self::Borrowed,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthorResponse {
    pub id: AuthorId,
    pub name: String,
}

impl From<BookAuthor> for BookAuthorResponse {
    fn from(value: BookAuthor) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: Option<BookAuthorResponse>,
    pub genre: String,
    pub description: String,
    pub status: BookStatusName,
    pub created_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        let Book {
            id,
            title,
            author,
            genre,
            description,
            status,
            created_at,
        } = value;
        Self {
            id,
            title,
            author: author.map(BookAuthorResponse::from),
            genre,
            description,
            status: status.into(),
            created_at,
        }
    }
}

#[derive(Serialize)]
pub struct BooksResponse {
    pub items: Vec<BookResponse>,
}

impl From<Vec<Book>> for BooksResponse {
    fn from(value: Vec<Book>) -> Self {
        Self {
            items: value.into_iter().map(BookResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct GenresResponse {
    pub items: Vec<String>,
}
