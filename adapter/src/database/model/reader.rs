use kernel::model::{id::ReaderId, reader::Reader};

#[derive(sqlx::FromRow)]
pub struct ReaderRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

impl From<ReaderRow> for Reader {
    fn from(row: ReaderRow) -> Self {
        Reader {
            id: ReaderId::new(row.id),
            name: row.name,
            email: row.email,
            registration_number: row.registration_number,
        }
    }
}
