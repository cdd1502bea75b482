use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::LoanId,
    loan::event::{CreateLoan, ReturnLoan},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::loan::{CreateLoanRequest, LoanListQuery, LoanResponse, ReturnedLoanResponse};

pub async fn register_loan(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateLoanRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let loan = registry
        .loan_repository()
        .create(CreateLoan::from(req))
        .await?;
    let today = registry.clock().today();
    Ok((StatusCode::CREATED, Json(LoanResponse::new(loan, today))))
}

pub async fn return_loan(
    State(registry): State<AppRegistry>,
    Path(loan_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let loan = registry
        .loan_repository()
        .update_returned(ReturnLoan {
            loan_id: LoanId::new(loan_id),
        })
        .await?;
    let today = registry.clock().today();
    Ok(Json(ReturnedLoanResponse::new(loan, today)))
}

pub async fn show_unreturned_loan_list(
    State(registry): State<AppRegistry>,
    Query(query): Query<LoanListQuery>,
) -> AppResult<impl IntoResponse> {
    let loans = registry
        .loan_repository()
        .find_unreturned(query.into())
        .await?;
    let today = registry.clock().today();
    Ok(Json(
        loans
            .into_iter()
            .map(|loan| LoanResponse::new(loan, today))
            .collect::<Vec<_>>(),
    ))
}

pub async fn show_loan_history(
    State(registry): State<AppRegistry>,
    Query(query): Query<LoanListQuery>,
) -> AppResult<impl IntoResponse> {
    let loans = registry
        .loan_repository()
        .find_history(query.into())
        .await?;
    let today = registry.clock().today();
    Ok(Json(
        loans
            .into_iter()
            .map(|loan| LoanResponse::new(loan, today))
            .collect::<Vec<_>>(),
    ))
}

pub async fn show_loan(
    State(registry): State<AppRegistry>,
    Path(loan_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let loan = registry
        .loan_repository()
        .find_by_id(LoanId::new(loan_id))
        .await?
        .ok_or_else(|| AppError::EntityNotFound("loan not found".into()))?;
    let today = registry.clock().today();
    Ok(Json(LoanResponse::new(loan, today)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        routing::{get, post, put},
        Router,
    };
    use chrono::NaiveDate;
    use kernel::{
        clock::FixedClock,
        model::{
            book::BookStatus,
            id::{BookId, LoanId, ReaderId},
            loan::{Loan, LoanBook, LoanListOptions, LoanReader},
        },
        repository::loan::MockLoanRepository,
    };
    use registry::{AppRegistry, MockAppRegistryExt};
    use tower::ServiceExt;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan_fixture(returned_on: Option<NaiveDate>) -> Loan {
        Loan {
            id: LoanId::new(100),
            book: LoanBook {
                id: BookId::new(1),
                title: "Dom Casmurro".into(),
                author: "Machado de Assis".into(),
                isbn: "9788535914849".into(),
                status: if returned_on.is_some() {
                    BookStatus::Available
                } else {
                    BookStatus::Loaned
                },
            },
            reader: LoanReader {
                id: ReaderId::new(1),
                name: "Joao Silva".into(),
                email: "joao@example.com".into(),
                registration_number: "R-0001".into(),
            },
            checked_out_on: date(2024, 1, 1),
            due_on: date(2024, 1, 15),
            returned_on,
        }
    }

    fn build_app(loan_repository: MockLoanRepository, today: NaiveDate) -> Router {
        let mut registry = MockAppRegistryExt::new();
        let loan_repository = Arc::new(loan_repository);
        registry
            .expect_loan_repository()
            .returning(move || loan_repository.clone());
        registry
            .expect_clock()
            .returning(move || Arc::new(FixedClock(today)));
        let registry: AppRegistry = Arc::new(registry);
        Router::new()
            .route("/loans", post(register_loan).get(show_loan_history))
            .route("/loans/active", get(show_unreturned_loan_list))
            .route("/loans/:loan_id", get(show_loan))
            .route("/loans/:loan_id/return", put(return_loan))
            .with_state(registry)
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_loan_returns_created_loan() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository.expect_create().returning(|event| {
            assert_eq!(event.book_id, BookId::new(1));
            assert_eq!(event.reader_id, ReaderId::new(1));
            assert_eq!(event.loan_days, 14);
            Ok(loan_fixture(None))
        });
        let app = build_app(loan_repository, date(2024, 1, 1));

        let req = Request::builder()
            .method(Method::POST)
            .uri("/loans")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"bookId":1,"readerId":1}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = body_json(res).await;
        assert_eq!(body["id"], 100);
        assert_eq!(body["checkedOutOn"], "2024-01-01");
        assert_eq!(body["dueOn"], "2024-01-15");
        assert_eq!(body["returnedOn"], serde_json::Value::Null);
        assert_eq!(body["overdueDays"], 0);
        assert_eq!(body["book"]["title"], "Dom Casmurro");
        assert_eq!(body["reader"]["name"], "Joao Silva");
    }

    #[tokio::test]
    async fn register_loan_maps_conflict_to_409() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository
            .expect_create()
            .returning(|_| Err(AppError::ResourceConflict("book is loaned".into())));
        let app = build_app(loan_repository, date(2024, 1, 1));

        let req = Request::builder()
            .method(Method::POST)
            .uri("/loans")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"bookId":1,"readerId":1}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body = body_json(res).await;
        assert_eq!(body["error"], "book is loaned");
    }

    #[tokio::test]
    async fn register_loan_maps_missing_book_to_404() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository
            .expect_create()
            .returning(|_| Err(AppError::EntityNotFound("book not found".into())));
        let app = build_app(loan_repository, date(2024, 1, 1));

        let req = Request::builder()
            .method(Method::POST)
            .uri("/loans")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"bookId":999,"readerId":1}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["error"], "book not found");
    }

    #[tokio::test]
    async fn return_loan_reports_overdue_days_and_alert() {
        // 期日 2024-01-10 の貸出を 2024-01-15 に返却すると 5 日の延滞になる
        let mut loan_repository = MockLoanRepository::new();
        loan_repository.expect_update_returned().returning(|event| {
            assert_eq!(event.loan_id, LoanId::new(100));
            let mut loan = loan_fixture(Some(date(2024, 1, 15)));
            loan.due_on = date(2024, 1, 10);
            Ok(loan)
        });
        let app = build_app(loan_repository, date(2024, 1, 15));

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/loans/100/return")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["returnedOn"], "2024-01-15");
        assert_eq!(body["overdueDays"], 5);
        assert_eq!(body["alert"], "returned 5 day(s) overdue");
    }

    #[tokio::test]
    async fn return_loan_on_time_has_no_alert() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository
            .expect_update_returned()
            .returning(|_| Ok(loan_fixture(Some(date(2024, 1, 15)))));
        let app = build_app(loan_repository, date(2024, 1, 15));

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/loans/100/return")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["overdueDays"], 0);
        assert!(body.get("alert").is_none());
    }

    #[tokio::test]
    async fn return_loan_twice_maps_conflict_to_409() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository
            .expect_update_returned()
            .returning(|_| Err(AppError::ResourceConflict("loan already returned".into())));
        let app = build_app(loan_repository, date(2024, 1, 15));

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/loans/100/return")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body = body_json(res).await;
        assert_eq!(body["error"], "loan already returned");
    }

    #[tokio::test]
    async fn show_loan_returns_404_when_missing() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository.expect_find_by_id().returning(|_| Ok(None));
        let app = build_app(loan_repository, date(2024, 1, 1));

        let req = Request::builder()
            .method(Method::GET)
            .uri("/loans/999")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["error"], "loan not found");
    }

    #[tokio::test]
    async fn unreturned_loan_list_passes_filters_through() {
        let mut loan_repository = MockLoanRepository::new();
        loan_repository
            .expect_find_unreturned()
            .withf(|options: &LoanListOptions| {
                options.reader_id == Some(ReaderId::new(5)) && options.book_id.is_none()
            })
            .returning(|_| Ok(vec![loan_fixture(None)]));
        let app = build_app(loan_repository, date(2024, 1, 1));

        let req = Request::builder()
            .method(Method::GET)
            .uri("/loans/active?readerId=5")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["returnedOn"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn open_loan_overdue_days_grows_with_the_clock() {
        // 期日 2024-01-15 の未返却貸出を 2024-01-20 に参照すると 5 日の延滞
        let mut loan_repository = MockLoanRepository::new();
        loan_repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(loan_fixture(None))));
        let app = build_app(loan_repository, date(2024, 1, 20));

        let req = Request::builder()
            .method(Method::GET)
            .uri("/loans/100")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["overdueDays"], 5);
        assert_eq!(body["returnedOn"], serde_json::Value::Null);
    }
}
