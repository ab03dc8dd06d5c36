// Business Valuation Dashboard - API Server
// Serves the precomputed chart payload, valuation metrics, and revenue stats

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use business_valuation::{
    calculate_valuation, load_or_build, ChartPayload, RevenueStats, ValuationExplanation,
    ValuationMetrics, DEFAULT_CACHE_PATH, DEFAULT_CSV_PATH, TARGET_YEAR,
};

/// Shared application state
///
/// Everything is computed once at startup and never mutated afterwards, so
/// handlers just clone out of an `Arc`.
#[derive(Clone)]
struct AppState {
    dashboard: Arc<Dashboard>,
}

#[derive(Serialize)]
struct Dashboard {
    chart: ChartPayload,
    metrics: ValuationMetrics,
    explanation: ValuationExplanation,
    stats: RevenueStats,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/chart - Chart payload (bar + trend series, layout)
async fn get_chart(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dashboard.chart.clone()))
}

/// GET /api/valuation - Formatted metrics plus the explanation object
async fn get_valuation(State(state): State<AppState>) -> impl IntoResponse {
    #[derive(Serialize)]
    struct ValuationResponse {
        metrics: ValuationMetrics,
        explanation: ValuationExplanation,
    }

    Json(ApiResponse::ok(ValuationResponse {
        metrics: state.dashboard.metrics.clone(),
        explanation: state.dashboard.explanation.clone(),
    }))
}

/// GET /api/stats - Supplementary revenue stats
async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dashboard.stats.clone()))
}

#[tokio::main]
async fn main() {
    println!("💼 Business Valuation Dashboard Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Compute everything once before serving anything
    let payload = match load_or_build(
        Path::new(DEFAULT_CSV_PATH),
        Path::new(DEFAULT_CACHE_PATH),
        TARGET_YEAR,
    ) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("❌ Failed to load revenue data: {:#}", e);
            eprintln!("   Expected {} or a cache at {}", DEFAULT_CSV_PATH, DEFAULT_CACHE_PATH);
            std::process::exit(1);
        }
    };
    println!("✓ Chart payload ready ({} series)", payload.data.len());

    let (metrics, explanation) = calculate_valuation(&payload);
    let stats = RevenueStats::from_payload(&payload);
    println!("✓ Valuation computed: {}", metrics.business_value);

    let state = AppState {
        dashboard: Arc::new(Dashboard {
            chart: payload,
            metrics,
            explanation,
            stats,
        }),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/chart", get(get_chart))
        .route("/valuation", get(get_valuation))
        .route("/stats", get(get_stats))
        .with_state(state.clone());

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Listen port comes from the environment (deploy targets set PORT)
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = format!("0.0.0.0:{}", port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("\n🚀 Server running on http://localhost:{}", port);
    println!("   Chart:     http://localhost:{}/api/chart", port);
    println!("   Valuation: http://localhost:{}/api/valuation", port);
    println!("\n   Press Ctrl+C to stop\n");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
