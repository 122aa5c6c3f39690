use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    Connection, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    MatchCriteria, Page, Role, UserProfile,
};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CandidateCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CandidateCache>,
    pub matcher: Matcher,
    pub max_page_size: u16,
    pub pool_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/buddies", web::post().to(find_buddies))
        .route("/matches/trainers", web::post().to(find_trainers));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let backend_healthy = state.appwrite.health_check().await.unwrap_or(false);

    let status = if backend_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find buddy matches endpoint
///
/// POST /api/v1/matches/buddies
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "criteria": { "maxDistanceKm": 25.0, "ageRange": [18, 65] },
///   "page": 0,
///   "pageSize": 20
/// }
/// ```
async fn find_buddies(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    run_matching(&state, req.into_inner(), Role::Buddy, true).await
}

/// Browse trainers endpoint
///
/// POST /api/v1/matches/trainers
///
/// Same request shape as the buddies endpoint. Trainer browsing does not
/// exclude already-connected users; a client books sessions with trainers
/// it is connected to.
async fn find_trainers(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    run_matching(&state, req.into_inner(), Role::Trainer, false).await
}

/// Shared pipeline behind both match endpoints: fetch the viewer, the
/// candidate pool and (for buddies) the connections, then run the matcher
/// on the snapshot.
async fn run_matching(
    state: &web::Data<AppState>,
    req: FindMatchesRequest,
    role: Role,
    exclude_connections: bool,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let page_size = req.page_size.min(state.max_page_size);

    let mut criteria = req.criteria.clone();
    criteria.role = Some(role);

    tracing::info!(
        "Matching for user: {}, role: {:?}, page: {}, page_size: {}",
        user_id,
        role,
        req.page,
        page_size
    );

    // Fetch the viewer profile (location reference for the distance filter)
    let viewer = match state.appwrite.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(AppwriteError::NotFound(msg)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Profile not found".to_string(),
                message: msg,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch user profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Connections are fetched fresh so a new connection drops out of the
    // results immediately; failure degrades to no exclusion rather than
    // failing the request.
    let connections: Vec<Connection> = if exclude_connections {
        match state.appwrite.get_connections(user_id).await {
            Ok(conns) => conns,
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch connections for {}, matching without exclusion: {}",
                    user_id,
                    e
                );
                vec![]
            }
        }
    } else {
        vec![]
    };

    // Candidate pool: cached snapshot per viewer and query shape
    let cache_key = CacheKey::candidates(user_id, &pool_fingerprint(&criteria));
    let candidates: Vec<UserProfile> = match state.cache.get(&cache_key).await {
        Ok(pool) => pool,
        Err(_) => {
            let pool = match state
                .appwrite
                .query_candidates(&viewer, &criteria, state.pool_limit)
                .await
            {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!("Failed to query candidates for {}: {}", user_id, e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to query candidates".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };

            if let Err(e) = state.cache.set(&cache_key, &pool).await {
                tracing::warn!("Failed to cache candidate pool for {}: {}", user_id, e);
            }

            pool
        }
    };

    tracing::debug!("Candidate pool for {}: {} profiles", user_id, candidates.len());

    let page = Page {
        page: req.page as usize,
        page_size: page_size as usize,
    };

    let result = state
        .matcher
        .find_matches(&viewer, candidates, &connections, &criteria, &page);

    tracing::info!(
        "Returning {} of {} matches for user {} (pool of {})",
        result.candidates.len(),
        result.total_matched,
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        candidates: result.candidates,
        page: req.page,
        page_size,
        total_matched: result.total_matched,
        total_candidates: result.total_candidates,
    })
}

/// Key suffix for the parts of the criteria pushed into the backend query
fn pool_fingerprint(criteria: &MatchCriteria) -> String {
    let role = match criteria.role {
        Some(Role::Buddy) => "buddy",
        Some(Role::Trainer) => "trainer",
        None => "-",
    };
    let gender = criteria.gender.as_deref().filter(|g| !g.is_empty()).unwrap_or("-");
    let distance = criteria
        .max_distance_km
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!("{}:{}:{}", role, gender, distance)
}
