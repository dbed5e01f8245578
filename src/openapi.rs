//! OpenAPI document for the counter API.

use crate::handlers::counter;
use crate::model::{Counter, ErrorResponse, SetCounterRequest};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Counter API",
        version = "1.0.0",
        description = "Counter API with PostgreSQL backend"
    ),
    paths(
        counter::get_counter,
        counter::increment_counter,
        counter::reset_counter,
        counter::set_counter
    ),
    components(schemas(Counter, SetCounterRequest, ErrorResponse)),
    tags((name = "counter", description = "Singleton counter"))
)]
pub struct ApiDoc;
