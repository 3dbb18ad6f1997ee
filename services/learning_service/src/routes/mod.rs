pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod courses;
pub(crate) mod enrollments;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::{json, Value};
use service_core::ddb::Adapter;
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use crate::category::ddb_repository::DdbCategoriesRepository;
use crate::context::Context;
use crate::course::ddb_repository::DdbCoursesRepository;
use crate::enrollment::ddb_repository::DdbEnrollmentsRepository;
use crate::identity::{Claims, IdentityVerifier, JwtIdentityVerifier};
use crate::user::ddb_repository::DdbUsersRepository;

pub(crate) struct AppState {
    pub users: DdbUsersRepository<Adapter>,
    pub courses: DdbCoursesRepository<Adapter>,
    pub categories: DdbCategoriesRepository<Adapter>,
    pub enrollments: DdbEnrollmentsRepository<Adapter>,
    pub verifier: JwtIdentityVerifier,
}

impl AppState {
    pub fn from_context(ctx: &Context) -> Self {
        AppState {
            users: DdbUsersRepository::new(ctx.dynamodb_adapter.clone(), &ctx.users_table_name),
            courses: DdbCoursesRepository::new(ctx.dynamodb_adapter.clone(), &ctx.courses_table_name),
            categories: DdbCategoriesRepository::new(ctx.dynamodb_adapter.clone(), &ctx.categories_table_name),
            enrollments: DdbEnrollmentsRepository::new(ctx.dynamodb_adapter.clone(), &ctx.enrollments_table_name),
            verifier: JwtIdentityVerifier::new(ctx.token_signing_key.as_bytes()),
        }
    }
}

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/profile", web::get().to(auth::get_profile))
                .route("/profile", web::put().to(auth::update_profile)),
        )
        .service(
            web::scope("/courses")
                .route("", web::get().to(courses::list))
                .route("", web::post().to(courses::create))
                .route("/{course_id}", web::get().to(courses::describe)),
        )
        .service(
            web::scope("/categories")
                .route("", web::get().to(categories::list))
                .route("", web::post().to(categories::create))
                .route("/{category_id}", web::get().to(categories::describe)),
        )
        .service(
            web::scope("/enrollments")
                .route("", web::get().to(enrollments::list))
                .route("/enroll", web::post().to(enrollments::enroll))
                .route("/all", web::get().to(enrollments::list_all))
                .route("/check/{course_id}", web::get().to(enrollments::check))
                .route("/{enrollment_id}/progress", web::put().to(enrollments::update_progress))
                .route("/{enrollment_id}/complete", web::put().to(enrollments::complete))
                .route("/{enrollment_id}/review", web::put().to(enrollments::review)),
        );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

pub(crate) fn extract_bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the caller's identity or produces the 401 response directly.
pub(crate) async fn authenticate(state: &AppState, req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let Some(token) = extract_bearer(req) else {
        return Err(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "error": "No token provided.",
        })));
    };

    state.verifier.verify(token).await.map_err(|_| {
        HttpResponse::Unauthorized().json(json!({
            "success": false,
            "error": "Invalid token.",
        }))
    })
}

/// Decodes a request body after authentication has already run, so auth
/// failures always win over malformed bodies. An empty body reads as the
/// input type's defaults; field-level checks stay with the operations.
pub(crate) fn parse_json<T>(body: &web::Bytes) -> Result<T, HttpResponse>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|_| {
        HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "Invalid JSON body.",
        }))
    })
}

/// Renders an operation failure. Operation errors that serialize to an
/// object contribute their fields to the body, next to `success` and
/// `error`; that is how the enroll endpoint attaches the existing record.
pub(crate) fn error_response<E>(err: EndpointError<E>) -> HttpResponse
where
    E: OperationError + Serialize,
{
    let message = match &err {
        EndpointError::Validation(msg) => msg.clone(),
        EndpointError::Internal => "Internal server error.".to_string(),
        EndpointError::Operation(e) => e.to_string(),
    };

    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), Value::Bool(false));
    body.insert("error".to_string(), Value::String(message));

    if let EndpointError::Operation(e) = &err {
        if let Ok(Value::Object(extra)) = serde_json::to_value(e) {
            body.extend(extra);
        }
    }

    HttpResponse::build(err.status_code()).json(Value::Object(body))
}

pub(crate) fn data_response(data: impl Serialize) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "data": data }))
}

pub(crate) fn list_response(data: Vec<impl Serialize>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "count": data.len(), "data": data }))
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;
    use crate::enrollment::Enrollment;
    use crate::operations::enroll::EnrollError;

    const SIGNING_KEY: &[u8] = b"test-secret";

    fn test_state() -> web::Data<AppState> {
        let client = aws_sdk_dynamodb::Client::from_conf(aws_sdk_dynamodb::Config::builder().build());
        let adapter = Adapter::from(client);
        web::Data::new(AppState {
            users: DdbUsersRepository::new(adapter.clone(), "users"),
            courses: DdbCoursesRepository::new(adapter.clone(), "courses"),
            categories: DdbCategoriesRepository::new(adapter.clone(), "categories"),
            enrollments: DdbEnrollmentsRepository::new(adapter, "enrollments"),
            verifier: JwtIdentityVerifier::new(SIGNING_KEY),
        })
    }

    fn bearer_for(sub: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            email: "john.doe@example.com".to_string(),
            name: None,
            exp: u64::MAX,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SIGNING_KEY)).unwrap();
        format!("Bearer {}", token)
    }

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn bearer_extraction() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(extract_bearer(&req), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(extract_bearer(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_bearer(&req), None);
    }

    #[actix_web::test]
    async fn validation_errors_render_as_bad_request() {
        let response = error_response::<EnrollError>(EndpointError::validation("Course ID is required."));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Course ID is required.");
    }

    #[actix_web::test]
    async fn duplicate_enrollment_attaches_the_existing_record() {
        let existing = Enrollment::new("user-1", "course-1");
        let response = error_response(EndpointError::operation(EnrollError::AlreadyEnrolled {
            enrollment: Box::new(existing.clone()),
        }));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Already enrolled in this course.");
        assert_eq!(body["enrollment"]["enrollment_id"], existing.enrollment_id.to_string());
    }

    #[actix_web::test]
    async fn operation_errors_use_their_status_code() {
        let response = error_response(EndpointError::operation(EnrollError::CourseNotFound));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Course not found.");
        assert!(body.get("enrollment").is_none());
    }

    // Auth runs before the body is even parsed, so a tokenless request gets
    // 401 no matter how broken its payload is.
    #[actix_web::test]
    async fn missing_token_wins_over_body_validation() {
        let app = init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = TestRequest::post()
            .uri("/enrollments/enroll")
            .set_payload("{not json")
            .to_request();
        let response = call_service(&app, req).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = read_body_json(response).await;
        assert_eq!(body["error"], "No token provided.");
    }

    #[actix_web::test]
    async fn empty_body_reaches_field_validation_once_authenticated() {
        let app = init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = TestRequest::post()
            .uri("/enrollments/enroll")
            .insert_header((header::AUTHORIZATION, bearer_for("user-1")))
            .to_request();
        let response = call_service(&app, req).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(response).await;
        assert_eq!(body["error"], "Course ID is required.");
    }

    #[actix_web::test]
    async fn malformed_body_is_rejected_after_authentication() {
        let app = init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = TestRequest::post()
            .uri("/enrollments/enroll")
            .insert_header((header::AUTHORIZATION, bearer_for("user-1")))
            .set_payload("{not json")
            .to_request();
        let response = call_service(&app, req).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(response).await;
        assert_eq!(body["error"], "Invalid JSON body.");
    }

    #[actix_web::test]
    async fn list_response_carries_a_count() {
        let body = body_json(list_response(vec![1, 2, 3])).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert_eq!(body["data"], json!([1, 2, 3]));
    }
}
