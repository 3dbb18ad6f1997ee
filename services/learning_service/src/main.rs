mod category;
mod context;
mod course;
mod enrollment;
mod identity;
mod operations;
mod routes;
mod store;
#[cfg(test)]
mod testing;
mod user;

use actix_web::{web, App, HttpServer};
use context::Context;
use service_core::telemetry::logging::{init_subscriber, make_subscriber};
use tracing_actix_web::TracingLogger;

use crate::routes::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = make_subscriber("learning_service", "info");
    init_subscriber(subscriber);

    let ctx = Context::from_env().await;
    let bind_address = ctx.bind_address.clone();
    let state = web::Data::new(AppState::from_context(&ctx));

    log::info!("Listening on {}.", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
