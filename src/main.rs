use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tawzeef_backend::{
    AppState,
    config::Config,
    middleware::{
        RateLimiter, log_errors, rate_limit, require_admin, require_auth, require_candidate,
        require_employer,
    },
    routes,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'tawzeef_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        pool,
        config: config.clone(),
    };

    let rate_limiter = Arc::new(RateLimiter::new(&config));

    let public_routes = Router::new()
        .route("/health", get(routes::health::ping))
        // Accounts
        .route(
            "/auth/register-candidate",
            post(routes::auth::register_candidate),
        )
        .route(
            "/auth/register-employer",
            post(routes::auth::register_employer),
        )
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        // Public job board
        .route("/jobs", get(routes::job::list_jobs))
        .route("/jobs/{id}", get(routes::job::get_job))
        // Public site content
        .route("/content/about", get(routes::content::get_about))
        .route("/content/blog", get(routes::content::list_posts))
        .route("/content/blog/{slug}", get(routes::content::get_post))
        .route("/content/settings", get(routes::content::get_settings))
        .route("/lookups", get(routes::lookup::get_lookups));

    let authenticated_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let candidate_routes = Router::new()
        .route(
            "/candidate/profile",
            get(routes::candidate::get_profile).put(routes::candidate::update_profile),
        )
        .route("/jobs/{id}/apply", post(routes::application::apply))
        .route(
            "/candidate/applications",
            get(routes::application::my_applications),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_candidate,
        ));

    let employer_routes = Router::new()
        .route(
            "/employer/profile",
            get(routes::employer::get_profile).put(routes::employer::update_profile),
        )
        .route(
            "/employer/jobs",
            get(routes::job::my_jobs).post(routes::job::create_job),
        )
        .route(
            "/employer/jobs/{id}",
            put(routes::job::update_job).delete(routes::job::delete_job),
        )
        .route("/employer/jobs/{id}/close", post(routes::job::close_job))
        .route(
            "/employer/jobs/{id}/applications",
            get(routes::application::job_applications),
        )
        .route(
            "/employer/applications/{id}/status",
            put(routes::application::update_status),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_employer,
        ));

    let admin_routes = Router::new()
        .route("/admin/content/about", put(routes::content::update_about))
        .route(
            "/admin/content/settings",
            put(routes::content::update_settings),
        )
        .route("/admin/blog", post(routes::content::create_post))
        .route(
            "/admin/blog/{id}",
            put(routes::content::update_post).delete(routes::content::delete_post),
        )
        .route("/admin/users", get(routes::content::list_users))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    let router = Router::new().nest(
        &config.api_base_uri.clone(),
        Router::new()
            .merge(public_routes)
            .merge(authenticated_routes)
            .merge(candidate_routes)
            .merge(employer_routes)
            .merge(admin_routes),
    );

    let router = router.layer(axum::middleware::from_fn(log_errors)).layer(
        axum::middleware::from_fn_with_state(rate_limiter, rate_limit),
    );

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let app = router.with_state(state.clone());

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
