use shared::error::AppError;

pub mod book;
pub mod health;
pub mod loan;
pub mod reader;

// Postgres の一意制約違反を 409 相当のエラーへ読み替える
pub(crate) fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref e) if e.is_unique_violation() => {
            AppError::ResourceConflict(message.into())
        }
        e => AppError::SpecificOperationError(e),
    }
}
