use kernel::model::{
    book::{Book, BookStatus},
    id::BookId,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: String,
}

impl TryFrom<BookRow> for Book {
    type Error = AppError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<BookStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!("unknown book status: {}", row.status))
        })?;
        Ok(Book {
            id: BookId::new(row.id),
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_into_book() {
        let row = BookRow {
            id: 1,
            title: "Dom Casmurro".into(),
            author: "Machado de Assis".into(),
            isbn: "9788535914849".into(),
            status: "available".into(),
        };
        let book = Book::try_from(row).unwrap();
        assert_eq!(book.id, BookId::new(1));
        assert_eq!(book.status, BookStatus::Available);
    }

    #[test]
    fn unknown_status_is_a_conversion_error() {
        let row = BookRow {
            id: 1,
            title: "t".into(),
            author: "a".into(),
            isbn: "1234567890".into(),
            status: "lost".into(),
        };
        assert!(matches!(
            Book::try_from(row),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
