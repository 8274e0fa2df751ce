//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
pub use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use users_service::Trace;
#[cfg(debug_assertions)]
use users_service::doc::ApiDoc;
use users_service::inbound::http::health::{HealthState, live, ready};
use users_service::inbound::http::state::HttpState;
use users_service::inbound::http::{diagnostics, users};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(users::configure)
        .configure(diagnostics::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// The users schema must already exist; readiness is reported as soon as
/// the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Drain the server on Ctrl-C: liveness starts failing before the listener
/// stops accepting connections.
pub fn drain_on_interrupt(server: &Server, health_state: web::Data<HealthState>) {
    let handle = server.handle();
    actix_web::rt::spawn(drain_after(tokio::signal::ctrl_c(), health_state, handle));
}

async fn drain_after<S>(signal: S, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    S: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("interrupt received, draining");
            health_state.mark_unhealthy();
            handle.stop(true).await;
        }
        Err(error) => warn!(%error, "cannot listen for interrupt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use users_service::domain::ports::UserRepository;
    use users_service::outbound::persistence::{DieselUserRepository, SqliteStoreConfig};

    #[rstest]
    #[actix_web::test]
    async fn assembled_app_serves_users_probes_and_trace_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repository = DieselUserRepository::new(SqliteStoreConfig::new(
            dir.path().join("database/CRUD.db"),
        ));
        repository.initialize().await.expect("schema created");

        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = actix_test::init_service(build_app(
            health,
            build_http_state(Arc::new(repository)),
        ))
        .await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(json!({ "name": "Ann", "email": "ann@x.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.headers().contains_key("trace-id"));

        let listed: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        assert_eq!(listed, json!([{ "id": 1, "name": "Ann", "email": "ann@x.com" }]));

        let readiness = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(readiness.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn interrupt_fails_liveness_and_stops_the_server() {
        let health = web::Data::new(HealthState::new());
        let server = HttpServer::new(App::new)
            .bind(("127.0.0.1", 0))
            .expect("bind test server")
            .disable_signals()
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_after(async { Ok(()) }, health.clone(), handle).await;

        assert!(!health.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }

    #[rstest]
    #[actix_web::test]
    async fn failed_signal_listener_keeps_the_service_alive() {
        let health = web::Data::new(HealthState::new());
        let server = HttpServer::new(App::new)
            .bind(("127.0.0.1", 0))
            .expect("bind test server")
            .disable_signals()
            .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        drain_after(
            async { Err(std::io::Error::other("no signal driver")) },
            health.clone(),
            handle.clone(),
        )
        .await;

        assert!(health.is_alive());
        handle.stop(false).await;
    }
}
