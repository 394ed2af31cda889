/**
 * API REST ENERGY - Serveur HTTP du kernel
 *
 * RÔLE :
 * Expose les relevés énergétiques par type d'équipement et par date pour le
 * dashboard web. Lecture seule, pas d'authentification.
 *
 * ROUTES :
 * - GET /                          → bannière de vie
 * - GET /health                    → "ok"
 * - GET /system/health             → uptime, mémoire, dossiers joignables
 * - GET /api/energy/{type}/all     → historique complet trié par ts
 * - GET /api/energy/{type}/dates   → dates disponibles (croissantes)
 * - GET /api/energy/{type}/{date}  → relevés du jour (complet ou matin + après-midi)
 *
 * ERREURS :
 * JSON `{"error": CODE, "message": ...}` ; 404 type inconnu / pas de données,
 * 500 dossier illisible ou fichier complet invalide.
 *
 * CORS :
 * Ouvert (`*`) pour le dashboard, pré-vol OPTIONS répondu 204.
 */

use crate::config::KernelConfig;
use crate::error::EnergyResult;
use crate::health::{HealthTracker, KernelHealth};
use crate::models::{DateKey, Reading};
use crate::stats::StatsService;
use axum::extract::{Path, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<StatsService>,
    pub health_tracker: HealthTracker,
}

impl AppState {
    pub fn new(config: Arc<KernelConfig>) -> Self {
        Self {
            stats: Arc::new(StatsService::new(config)),
            health_tracker: HealthTracker::new(),
        }
    }
}

async fn allow_cors(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = res.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, OPTIONS"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    res
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "✅ Serveur opérationnel" }))
        .route("/health", get(|| async { "ok" }))
        .route("/system/health", get(get_system_health))
        .route("/api/energy/{kind}/all", get(get_all))
        .route("/api/energy/{kind}/dates", get(get_dates))
        .route("/api/energy/{kind}/{date}", get(get_day))
        .with_state(app_state)
        .layer(middleware::from_fn(allow_cors))
}

// GET /api/energy/{type}/all
async fn get_all(
    State(app): State<AppState>,
    Path(kind): Path<String>,
) -> EnergyResult<Json<Vec<Reading>>> {
    info!(%kind, "requête historique complet");
    Ok(Json(app.stats.all(&kind).await?))
}

// GET /api/energy/{type}/dates
async fn get_dates(
    State(app): State<AppState>,
    Path(kind): Path<String>,
) -> EnergyResult<Json<Vec<DateKey>>> {
    info!(%kind, "requête dates disponibles");
    Ok(Json(app.stats.dates(&kind).await?))
}

// GET /api/energy/{type}/{date}
async fn get_day(
    State(app): State<AppState>,
    Path((kind, date)): Path<(String, String)>,
) -> EnergyResult<Json<Vec<Reading>>> {
    info!(%kind, %date, "requête reçue");
    Ok(Json(app.stats.day(&kind, &date).await?))
}

// GET /system/health
async fn get_system_health(State(app): State<AppState>) -> Json<KernelHealth> {
    Json(app.health_tracker.get_health(app.stats.config()).await)
}
