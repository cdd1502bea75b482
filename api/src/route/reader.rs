use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reader::{
    delete_reader, register_reader, show_reader, show_reader_list, update_reader,
};

pub fn build_reader_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(register_reader).get(show_reader_list))
        .route(
            "/:reader_id",
            get(show_reader).put(update_reader).delete(delete_reader),
        );
    Router::new().nest("/readers", routers)
}
