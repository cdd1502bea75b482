use axum::Router;
use registry::AppRegistry;

pub mod book;
pub mod health;
pub mod loan;
pub mod reader;

// UI からは /api 配下でアクセスする。health は素の /health に出す
pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(book::build_book_routers())
        .merge(reader::build_reader_routers())
        .merge(loan::build_loan_routers());
    Router::new()
        .nest("/api", router)
        .merge(health::build_health_check_routers())
}
