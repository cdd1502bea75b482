use garde::Validate;
use kernel::model::{
    book::{
        event::{CreateBook, UpdateBook},
        Book, BookListOptions, BookRemoval, BookStatus,
    },
    id::BookId,
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[garde(length(min = 3, max = 200))]
    pub title: String,
    #[garde(length(min = 1, max = 150))]
    pub author: String,
    #[garde(custom(validate_isbn))]
    pub isbn: String,
}

impl From<CreateBookRequest> for CreateBook {
    fn from(value: CreateBookRequest) -> Self {
        let CreateBookRequest {
            title,
            author,
            isbn,
        } = value;
        Self {
            title,
            author,
            isbn,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[garde(length(min = 3, max = 200))]
    pub title: String,
    #[garde(length(min = 1, max = 150))]
    pub author: String,
    #[garde(custom(validate_isbn))]
    pub isbn: String,
}

// book_id は path から渡ってくるため、(id, body) の組から組み立てる
// NOTE: `impl From<(BookId, UpdateBookRequest)> for UpdateBook` はコヒーレンス
// （orphan rule）違反になるため、同じ変換を inherent method として提供する。
impl UpdateBookRequest {
    pub fn into_event(self, book_id: BookId) -> UpdateBook {
        UpdateBook {
            book_id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<BookListQuery> for BookListOptions {
    type Error = AppError;

    fn try_from(value: BookListQuery) -> Result<Self, Self::Error> {
        let status = value
            .status
            .map(|s| {
                s.parse::<BookStatus>()
                    .map_err(|_| AppError::UnprocessableEntity(format!("unknown book status: {s}")))
            })
            .transpose()?;
        Ok(Self {
            search: value.search,
            status,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: String,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id.raw(),
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            status: value.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRemovalResponse {
    pub result: String,
}

impl From<BookRemoval> for BookRemovalResponse {
    fn from(value: BookRemoval) -> Self {
        Self {
            result: value.to_string(),
        }
    }
}

// ISBN はハイフンを除いた 10 桁または 13 桁の数字のみ許容する
fn validate_isbn(value: &str, _context: &()) -> garde::Result {
    let digits: Vec<char> = value.chars().filter(|c| *c != '-').collect();
    if !matches!(digits.len(), 10 | 13) || digits.iter().any(|c| !c.is_ascii_digit()) {
        return Err(garde::Error::new("isbn must be 10 or 13 digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("9788535914849", true)]
    #[case("978-8535914849", true)]
    #[case("8535914848", true)]
    #[case("85359", false)]
    #[case("97885359148491", false)]
    #[case("97885359148AB", false)]
    fn isbn_accepts_10_or_13_digits(#[case] isbn: &str, #[case] ok: bool) {
        assert_eq!(validate_isbn(isbn, &()).is_ok(), ok);
    }

    #[test]
    fn create_request_rejects_short_title() {
        let req = CreateBookRequest {
            title: "ab".into(),
            author: "Machado de Assis".into(),
            isbn: "9788535914849".into(),
        };
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        let query = BookListQuery {
            search: None,
            status: Some("lost".into()),
        };
        assert!(matches!(
            BookListOptions::try_from(query),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn status_filter_parses_known_values() {
        let query = BookListQuery {
            search: Some("casmurro".into()),
            status: Some("available".into()),
        };
        let options = BookListOptions::try_from(query).unwrap();
        assert_eq!(options.status, Some(BookStatus::Available));
        assert_eq!(options.search.as_deref(), Some("casmurro"));
    }
}
