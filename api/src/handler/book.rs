use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    book::event::DeleteBook,
    id::BookId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::book::{
    BookListQuery, BookRemovalResponse, BookResponse, CreateBookRequest, UpdateBookRequest,
};

pub async fn register_book(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let book = registry.book_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

pub async fn show_book_list(
    State(registry): State<AppRegistry>,
    Query(query): Query<BookListQuery>,
) -> AppResult<impl IntoResponse> {
    let books = registry.book_repository().find_all(query.try_into()?).await?;
    Ok(Json(
        books.into_iter().map(BookResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn show_book(
    State(registry): State<AppRegistry>,
    Path(book_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let book = registry
        .book_repository()
        .find_by_id(BookId::new(book_id))
        .await?
        .ok_or_else(|| AppError::EntityNotFound("book not found".into()))?;
    Ok(Json(BookResponse::from(book)))
}

pub async fn update_book(
    State(registry): State<AppRegistry>,
    Path(book_id): Path<i64>,
    Json(req): Json<UpdateBookRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let book = registry
        .book_repository()
        .update(req.into_event(BookId::new(book_id)))
        .await?;
    Ok(Json(BookResponse::from(book)))
}

pub async fn delete_book(
    State(registry): State<AppRegistry>,
    Path(book_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let removal = registry
        .book_repository()
        .delete(DeleteBook {
            book_id: BookId::new(book_id),
        })
        .await?;
    Ok(Json(BookRemovalResponse::from(removal)))
}
