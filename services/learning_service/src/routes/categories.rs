use actix_web::{web, HttpRequest, HttpResponse};

use super::{authenticate, data_response, error_response, list_response, parse_json, AppState};
use crate::operations;
use crate::operations::create_category::CreateCategoryInput;

pub(crate) async fn list(state: web::Data<AppState>) -> HttpResponse {
    match operations::list_categories::list_categories(&state.categories).await {
        Ok(categories) => list_response(categories),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn describe(state: web::Data<AppState>, category_id: web::Path<String>) -> HttpResponse {
    match operations::describe_category::describe_category(&state.categories, &category_id).await {
        Ok(category) => data_response(category),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    if let Err(response) = authenticate(&state, &req).await {
        return response;
    }
    let input: CreateCategoryInput = match parse_json(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match operations::create_category::create_category(&state.categories, input).await {
        Ok(category) => HttpResponse::Created().json(serde_json::json!({ "success": true, "data": category })),
        Err(err) => error_response(err),
    }
}
