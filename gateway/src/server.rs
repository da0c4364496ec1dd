use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use catalog_engine::{Engine, ProductDraft, ProductStore, Request, Variables};
use serde::Deserialize;
use tokio::signal;
use tower_http::cors::CorsLayer;

/// Builds the engine over a freshly seeded store and listens for requests
/// until a termination signal arrives.
pub async fn serve(addr: SocketAddr, path: &str) -> anyhow::Result<()> {
    let store = Arc::new(ProductStore::new());
    seed_catalog(&store);

    let engine = Engine::new(store).map_err(|err| anyhow::anyhow!("declaring the schema: {err}"))?;
    tracing::debug!("declared schema:\n{}", engine.registry().export_sdl());

    let router = Router::new()
        .route(path, get(execute_from_query_params).post(execute))
        .route("/sdl", get(sdl))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(engine));

    tracing::info!("GraphQL endpoint exposed at http://{addr}{path}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// The records the catalog starts with, ids 1 through 3.
fn seed_catalog(store: &ProductStore) {
    store.insert(ProductDraft {
        name: "Chicha Morada".to_string(),
        info: "Chicha morada is a beverage originated in the Andean regions of Perú but is actually consumed at a national level (wiki)".to_string(),
        price: 7.99,
    });
    store.insert(ProductDraft {
        name: "Chicha de jora".to_string(),
        info: "Chicha de jora is a corn beer chicha prepared by germinating maize, extracting the malt sugars, boiling the wort, and fermenting it in large vessels (traditionally huge earthenware vats) for several days (wiki)".to_string(),
        price: 5.95,
    });
    store.insert(ProductDraft {
        name: "Pisco".to_string(),
        info: "Pisco is a colorless or yellowish-to-amber colored brandy produced in winemaking regions of Peru and Chile (wiki)".to_string(),
        price: 9.95,
    });
}

async fn execute(State(engine): State<Arc<Engine>>, Json(request): Json<Request>) -> impl IntoResponse {
    Json(engine.execute(request).await)
}

/// GraphQL-over-HTTP GET: the request arrives as query parameters, with
/// `variables` as a JSON-encoded string.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryParamsRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    operation_name: Option<String>,
    #[serde(default)]
    variables: Option<String>,
}

async fn execute_from_query_params(
    State(engine): State<Arc<Engine>>,
    Query(params): Query<QueryParamsRequest>,
) -> axum::response::Response {
    let variables = match params.variables.as_deref() {
        Some(raw) => match serde_json::from_str(raw) {
            Ok(value) => Variables::from_json(value),
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("could not deserialize variables: {err}"),
                )
                    .into_response()
            }
        },
        None => Variables::default(),
    };

    let mut request = Request::new(params.query).with_variables(variables);
    if let Some(name) = params.operation_name {
        request = request.with_operation_name(name);
    }

    Json(engine.execute(request).await).into_response()
}

/// The declared schema surface, for documentation purposes.
async fn sdl(State(engine): State<Arc<Engine>>) -> String {
    engine.registry().export_sdl()
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Waits for a termination signal so ongoing requests can complete before
/// the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
