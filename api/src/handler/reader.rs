use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::ReaderId,
    reader::event::DeleteReader,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::reader::{
    CreateReaderRequest, ReaderListQuery, ReaderResponse, UpdateReaderRequest,
};

pub async fn register_reader(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReaderRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let reader = registry.reader_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ReaderResponse::from(reader))))
}

pub async fn show_reader_list(
    State(registry): State<AppRegistry>,
    Query(query): Query<ReaderListQuery>,
) -> AppResult<impl IntoResponse> {
    let readers = registry.reader_repository().find_all(query.into()).await?;
    Ok(Json(
        readers
            .into_iter()
            .map(ReaderResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn show_reader(
    State(registry): State<AppRegistry>,
    Path(reader_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let reader = registry
        .reader_repository()
        .find_by_id(ReaderId::new(reader_id))
        .await?
        .ok_or_else(|| AppError::EntityNotFound("reader not found".into()))?;
    Ok(Json(ReaderResponse::from(reader)))
}

pub async fn update_reader(
    State(registry): State<AppRegistry>,
    Path(reader_id): Path<i64>,
    Json(req): Json<UpdateReaderRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let reader = registry
        .reader_repository()
        .update(req.into_event(ReaderId::new(reader_id)))
        .await?;
    Ok(Json(ReaderResponse::from(reader)))
}

pub async fn delete_reader(
    State(registry): State<AppRegistry>,
    Path(reader_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    registry
        .reader_repository()
        .delete(DeleteReader {
            reader_id: ReaderId::new(reader_id),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
