#![allow(dead_code)]
#![allow(unused_variables)]

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::Method,
    routing::{get, post},
    BoxError, Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    app::{env::Envy, errors::DefaultApiError},
    generations::backend::{ModelBackend, SimulatedModelBackend},
};

mod app;
mod auth;
mod client;
mod generations;
mod users;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub envy: Arc<Envy>,
    pub backend: Arc<dyn ModelBackend>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt::init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // properties
    let port = envy.port.to_owned().unwrap_or(3000);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::POST, Method::GET]);

    let pool = PgPoolOptions::new()
        .max_connections(50)
        .idle_timeout(Some(Duration::from_secs(60)))
        .connect(&envy.database_url)
        .await
        .expect("failed to connect to database");

    println!("connected to db");

    let backend = SimulatedModelBackend::from_envy(&envy);

    let state = Arc::new(AppState {
        pool,
        envy: Arc::new(envy),
        backend: Arc::new(backend),
    });

    // app
    let app = Router::new()
        .route("/", get(app::controller::get_root))
        // auth
        .route("/auth/signup", post(auth::controller::signup))
        .route("/auth/login", post(auth::controller::login))
        // generations
        .route(
            "/generations",
            post(generations::controller::create_generation)
                .get(generations::controller::get_generations),
        )
        // layers
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    DefaultApiError::InternalServerError.value();
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(5, Duration::from_secs(1))),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
