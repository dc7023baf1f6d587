use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

use super::id::{AuthorId, BookId};

pub mod event;

#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Option<BookAuthor>,
    pub genre: String,
    pub description: String,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}

// 著者が削除された蔵書は author が None になる
#[derive(Debug, Clone)]
pub struct BookAuthor {
    pub id: AuthorId,
    pub name: String,
}

// 蔵書の状態。未返却の貸出記録が存在するときだけ Borrowed になる
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Default)]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed,
}
