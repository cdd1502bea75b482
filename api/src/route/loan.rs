use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::loan::{
    register_loan, return_loan, show_loan, show_loan_history, show_unreturned_loan_list,
};

pub fn build_loan_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(register_loan).get(show_loan_history))
        .route("/active", get(show_unreturned_loan_list))
        .route("/:loan_id", get(show_loan))
        .route("/:loan_id/return", put(return_loan));
    Router::new().nest("/loans", routers)
}
