use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use super::{authenticate, data_response, error_response, list_response, parse_json, AppState};
use crate::operations;
use crate::operations::add_review::AddReviewInput;
use crate::operations::enroll::EnrollInput;
use crate::operations::update_progress::UpdateProgressInput;

pub(crate) async fn enroll(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let input: EnrollInput = match parse_json(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let result = operations::enroll::enroll(
        &state.enrollments,
        &state.courses,
        &state.users,
        &claims.sub,
        input,
    )
    .await;

    match result {
        Ok(enrollment) => HttpResponse::Created().json(json!({
            "success": true,
            "message": "Enrolled successfully.",
            "data": enrollment,
        })),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match operations::list_enrollments::list_enrollments(&state.enrollments, &state.courses, &claims.sub).await {
        Ok(enrollments) => list_response(enrollments),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_all(state: web::Data<AppState>) -> HttpResponse {
    match operations::list_all_enrollments::list_all_enrollments(&state.enrollments, &state.courses).await {
        Ok(enrollments) => list_response(enrollments),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn check(state: web::Data<AppState>, req: HttpRequest, course_id: web::Path<String>) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match operations::check_enrollment::check_enrollment(&state.enrollments, &claims.sub, &course_id).await {
        Ok(enrollment) => HttpResponse::Ok().json(json!({
            "success": true,
            "enrolled": enrollment.is_some(),
            "enrollment": enrollment,
        })),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_progress(
    state: web::Data<AppState>,
    req: HttpRequest,
    enrollment_id: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let input: UpdateProgressInput = match parse_json(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let result =
        operations::update_progress::update_progress(&state.enrollments, &claims.sub, &enrollment_id, input).await;

    match result {
        Ok(enrollment) => data_response(enrollment.progress),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn complete(
    state: web::Data<AppState>,
    req: HttpRequest,
    enrollment_id: web::Path<String>,
) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match operations::complete_course::complete_course(&state.enrollments, &state.users, &claims.sub, &enrollment_id)
        .await
    {
        Ok(enrollment) => data_response(enrollment),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn review(
    state: web::Data<AppState>,
    req: HttpRequest,
    enrollment_id: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let input: AddReviewInput = match parse_json(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match operations::add_review::add_review(&state.enrollments, &claims.sub, &enrollment_id, input).await {
        Ok(enrollment) => data_response(enrollment),
        Err(err) => error_response(err),
    }
}
