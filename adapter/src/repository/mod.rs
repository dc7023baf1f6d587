use shared::error::AppError;

pub mod author;
pub mod book;
pub mod circulation;
pub mod feedback;
pub mod health;
pub mod membership;
pub mod payment;
pub mod user;

// 外部キー制約違反は参照先が存在しないことを意味するので、EntityNotFound に読み替える
pub(crate) fn map_reference_error(e: sqlx::Error, what: &str) -> AppError {
    let missing_reference = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation());
    if missing_reference {
        AppError::EntityNotFound(format!("{what} が見つかりません。"))
    } else {
        AppError::SpecificOperationError(e)
    }
}
