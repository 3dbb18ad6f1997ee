use actix_web::{web, HttpRequest, HttpResponse};

use super::{authenticate, data_response, error_response, parse_json, AppState};
use crate::operations;
use crate::operations::register_user::RegisterUserInput;
use crate::user::ProfileChanges;

pub(crate) async fn register(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let input: RegisterUserInput = match parse_json(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match operations::register_user::register_user(&state.users, &claims, input).await {
        Ok(user) => HttpResponse::Created().json(serde_json::json!({ "success": true, "data": user })),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_profile(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match operations::get_profile::get_profile(&state.users, &claims).await {
        Ok(user) => data_response(user),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_profile(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let claims = match authenticate(&state, &req).await {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let changes: ProfileChanges = match parse_json(&body) {
        Ok(changes) => changes,
        Err(response) => return response,
    };

    match operations::update_profile::update_profile(&state.users, &claims.sub, changes).await {
        Ok(user) => data_response(user),
        Err(err) => error_response(err),
    }
}
