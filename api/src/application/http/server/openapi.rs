use crate::application::http::{
    bootcamp::router::BootcampApiDoc, course::router::CourseApiDoc, health::HealthApiDoc,
    review::router::ReviewApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bootcamp Marketplace API"
    ),
    nest(
        (path = "/api/v1/bootcamps", api = BootcampApiDoc),
        (path = "/api/v1/courses", api = CourseApiDoc),
        (path = "/api/v1/reviews", api = ReviewApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
