use axum::Router;
use clap::Parser;
use dotenvy::dotenv;
use pizza_store::{DEFAULT_DATABASE_URL, Database};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod handlers;
mod models;
mod serializer;

use handlers::{
    ApiDoc, AppState, index_router, pizza_router, restaurant_pizza_router, restaurant_router,
};

#[derive(Parser, Debug)]
#[command(about = "HTTP API for restaurants, pizzas and their prices")]
struct Args {
    /// Path of the SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5555")]
    bind: String,
}

pub fn app(db: Database) -> Router {
    let state = AppState { db };

    Router::new()
        .merge(index_router())
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let db = Database::new(args.database_url);
    db.setup()?;
    info!(database = db.url(), "database ready");

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("Pizza API listening on {}", listener.local_addr()?);

    axum::serve(listener, app(db)).await?;

    Ok(())
}
