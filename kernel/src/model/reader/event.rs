use super::super::id::ReaderId;

#[derive(Debug)]
pub struct CreateReader {
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

#[derive(Debug)]
pub struct UpdateReader {
    pub reader_id: ReaderId,
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

#[derive(Debug)]
pub struct DeleteReader {
    pub reader_id: ReaderId,
}
