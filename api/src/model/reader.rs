use garde::Validate;
use kernel::model::{
    id::ReaderId,
    reader::{
        event::{CreateReader, UpdateReader},
        Reader, ReaderListOptions,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReaderRequest {
    #[garde(length(min = 3, max = 150))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 20))]
    pub registration_number: String,
}

impl From<CreateReaderRequest> for CreateReader {
    fn from(value: CreateReaderRequest) -> Self {
        let CreateReaderRequest {
            name,
            email,
            registration_number,
        } = value;
        Self {
            name,
            email,
            registration_number,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReaderRequest {
    #[garde(length(min = 3, max = 150))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 20))]
    pub registration_number: String,
}

// reader_id は path から渡ってくる。orphan rule 回避のため inherent method で変換する。
impl UpdateReaderRequest {
    pub fn into_event(self, reader_id: ReaderId) -> UpdateReader {
        UpdateReader {
            reader_id,
            name: self.name,
            email: self.email,
            registration_number: self.registration_number,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderListQuery {
    pub search: Option<String>,
}

impl From<ReaderListQuery> for ReaderListOptions {
    fn from(value: ReaderListQuery) -> Self {
        Self {
            search: value.search,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

impl From<Reader> for ReaderResponse {
    fn from(value: Reader) -> Self {
        Self {
            id: value.id.raw(),
            name: value.name,
            email: value.email,
            registration_number: value.registration_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_invalid_email() {
        let req = CreateReaderRequest {
            name: "Joao Silva".into(),
            email: "not-an-email".into(),
            registration_number: "R-0001".into(),
        };
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn create_request_accepts_valid_input() {
        let req = CreateReaderRequest {
            name: "Joao Silva".into(),
            email: "joao@example.com".into(),
            registration_number: "R-0001".into(),
        };
        assert!(req.validate(&()).is_ok());
    }
}
