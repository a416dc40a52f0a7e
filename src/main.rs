use std::sync::Arc;

use axum::ServiceExt;
use axum::extract::{MatchedPath, Request};
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use book_api::application::ports::password_hasher::PasswordHasher;
use book_api::bootstrap::app_context::{AppContext, AppServices};
use book_api::bootstrap::config::{Config, PasswordScheme};
use book_api::infrastructure::auth::jwt::JwtTokenService;
use book_api::infrastructure::crypto::{Argon2PasswordHasher, Sha256PasswordHasher};
use book_api::infrastructure::db::session::PgSessionFactory;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            book_api::presentation::http::health::health,
            book_api::presentation::http::auth::register,
            book_api::presentation::http::auth::login,
            book_api::presentation::http::auth::me,
            book_api::presentation::http::users::list_users,
            book_api::presentation::http::users::get_user,
            book_api::presentation::http::users::update_user,
            book_api::presentation::http::users::delete_user,
            book_api::presentation::http::books::list_books,
            book_api::presentation::http::books::get_book,
            book_api::presentation::http::books::create_book,
            book_api::presentation::http::books::update_book,
            book_api::presentation::http::books::delete_book,
            book_api::presentation::http::library::list_my_books,
            book_api::presentation::http::library::add_my_book,
            book_api::presentation::http::library::remove_my_book,
        ),
        components(schemas(
            book_api::presentation::http::error::ErrorBody,
            book_api::presentation::http::health::HealthResp,
            book_api::presentation::http::auth::RegisterRequest,
            book_api::presentation::http::auth::LoginRequest,
            book_api::presentation::http::auth::LoginResponse,
            book_api::presentation::http::auth::UserResponse,
            book_api::presentation::http::users::UpdateUserRequest,
            book_api::presentation::http::books::Book,
            book_api::presentation::http::books::CreateBookRequest,
            book_api::presentation::http::books::UpdateBookRequest,
            book_api::presentation::http::library::LibraryItem,
            book_api::presentation::http::library::AddBookRequest,
        )),
        tags(
            (name = "Auth", description = "Registration, login and token checks"),
            (name = "Users", description = "User accounts"),
            (name = "Books", description = "Book catalog"),
            (name = "Library", description = "Books saved by the current user"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn build_cors(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let origin = match cfg.cors_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        Some(Err(_)) => {
            tracing::warn!(origin = ?cfg.cors_origin, "invalid_cors_origin_mirroring_requests");
            AllowOrigin::mirror_request()
        }
        None => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "book_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting book API");

    // Database
    let pool =
        book_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.database_max_connections)
            .await?;
    book_api::infrastructure::db::migrate(&pool).await?;

    let password_hasher: Arc<dyn PasswordHasher> = match cfg.password_scheme {
        PasswordScheme::Sha256 => Arc::new(Sha256PasswordHasher),
        PasswordScheme::Argon2 => Arc::new(Argon2PasswordHasher),
    };
    let services = AppServices::new(
        Arc::new(PgSessionFactory::new(pool)),
        Arc::new(JwtTokenService::new(&cfg.jwt_secret)),
        password_hasher,
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let routes = book_api::presentation::http::routes(ctx.clone())
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()));
    let app = book_api::presentation::http::scoped(routes, ctx)
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );
    let app = book_api::presentation::http::normalize(app);

    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port)).await?;
    info!(addr = %listener.local_addr()?, "HTTP API listening");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("shutting_down");
}
