use actix_web::{web, HttpRequest, HttpResponse};

use super::{authenticate, data_response, error_response, list_response, parse_json, AppState};
use crate::operations;
use crate::operations::create_course::CreateCourseInput;

pub(crate) async fn list(state: web::Data<AppState>) -> HttpResponse {
    match operations::list_courses::list_courses(&state.courses).await {
        Ok(courses) => list_response(courses),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn describe(state: web::Data<AppState>, course_id: web::Path<String>) -> HttpResponse {
    match operations::describe_course::describe_course(&state.courses, &course_id).await {
        Ok(course) => data_response(course),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    if let Err(response) = authenticate(&state, &req).await {
        return response;
    }
    let input: CreateCourseInput = match parse_json(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match operations::create_course::create_course(&state.courses, &state.categories, input).await {
        Ok(course) => HttpResponse::Created().json(serde_json::json!({ "success": true, "data": course })),
        Err(err) => error_response(err),
    }
}
