use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        book::{event::CreateBook, Book, BookStatus},
        id::BookId,
    },
    repository::book::BookRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::SqliteConnection;

use super::author::author_exists;
use crate::database::{
    model::book::{BookRow, BookStatusRow},
    ConnectionPool,
};

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, event: CreateBook) -> AppResult<BookId> {
        let mut tx = self.db.begin().await?;

        // 著者の存在確認と蔵書の登録を同じトランザクションで行う
        if let Some(author_id) = event.author_id {
            if !author_exists(&mut tx, author_id).await? {
                return Err(AppError::EntityNotFound(format!(
                    "著者 {author_id} が見つかりません。"
                )));
            }
        }

        let book_id = BookId::new();
        sqlx::query(
            r#"
                INSERT INTO books (book_id, title, author_id, genre, description, status)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book_id)
        .bind(&event.title)
        .bind(event.author_id)
        .bind(&event.genre)
        .bind(&event.description)
        .bind(BookStatus::Available.to_string())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::debug!(%book_id, title = %event.title, "book registered");
        Ok(book_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
                SELECT
                    b.book_id,
                    b.title,
                    b.author_id,
                    a.name AS author_name,
                    b.genre,
                    b.description,
                    b.status,
                    b.created_at
                FROM books AS b
                LEFT JOIN authors AS a ON a.author_id = b.author_id
                ORDER BY b.title ASC, b.rowid ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
                SELECT
                    b.book_id,
                    b.title,
                    b.author_id,
                    a.name AS author_name,
                    b.genre,
                    b.description,
                    b.status,
                    b.created_at
                FROM books AS b
                LEFT JOIN authors AS a ON a.author_id = b.author_id
                WHERE b.book_id = ?
            "#,
        )
        .bind(book_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Book::try_from).transpose()
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
                SELECT
                    b.book_id,
                    b.title,
                    b.author_id,
                    a.name AS author_name,
                    b.genre,
                    b.description,
                    b.status,
                    b.created_at
                FROM books AS b
                LEFT JOIN authors AS a ON a.author_id = b.author_id
                WHERE b.title = ?
                ORDER BY b.rowid ASC
                LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Book::try_from).transpose()
    }

    async fn find_genres(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
                SELECT DISTINCT genre
                FROM books
                ORDER BY genre ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}

// 書名から蔵書を 1 件に解決する。同名の蔵書がある場合は登録順で先頭のもの
pub(crate) async fn find_book_status_by_title(
    conn: &mut SqliteConnection,
    title: &str,
) -> AppResult<Option<BookStatusRow>> {
    sqlx::query_as::<_, BookStatusRow>(
        r#"
            SELECT book_id, status
            FROM books
            WHERE title = ?
            ORDER BY rowid ASC
            LIMIT 1
        "#,
    )
    .bind(title)
    .fetch_optional(conn)
    .await
    .map_err(AppError::SpecificOperationError)
}

pub(crate) async fn update_book_status(
    conn: &mut SqliteConnection,
    book_id: BookId,
    status: BookStatus,
) -> AppResult<()> {
    let res = sqlx::query("UPDATE books SET status = ? WHERE book_id = ?")
        .bind(status.to_string())
        .bind(book_id)
        .execute(conn)
        .await
        .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowAffectedError(format!(
            "No book status has been updated: {book_id}"
        )));
    }
    Ok(())
}
