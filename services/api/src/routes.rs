use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use pe_portal::portal::admin::{admin_router, AdminState};
use pe_portal::portal::equipment::{equipment_router, EquipmentLedger, EquipmentStore};
use pe_portal::portal::fitness::{
    fitness_router, CommentGateway, FitnessRepository, FitnessService,
};
use pe_portal::portal::news::{news_router, NewsRepository, NewsService};
use pe_portal::portal::reading::reading_router;
use pe_portal::portal::stars::{stars_router, StarsRepository, StarsService};
use serde_json::json;
use std::sync::Arc;

/// Everything the HTTP surface needs, bundled so `server` and the tests can
/// assemble the same router.
pub(crate) struct PortalServices<R, G, N, S, E> {
    pub(crate) fitness: Arc<FitnessService<R, G>>,
    pub(crate) news: Arc<NewsService<N>>,
    pub(crate) stars: Arc<StarsService<S>>,
    pub(crate) equipment: Arc<EquipmentLedger<E>>,
    pub(crate) admin: AdminState<R, G, N, S, E>,
}

pub(crate) fn with_portal_routes<R, G, N, S, E>(
    services: PortalServices<R, G, N, S, E>,
) -> axum::Router
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    fitness_router(services.fitness)
        .merge(news_router(services.news))
        .merge(stars_router(services.stars))
        .merge(equipment_router(services.equipment))
        .merge(reading_router())
        .merge(admin_router(services.admin))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        default_scoring_config, sample_news, sample_stars, CannedCommentGateway,
        InMemoryEquipmentStore, InMemoryFitnessRepository, InMemoryNewsRepository,
        InMemoryStarsRepository,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pe_portal::config::AdminConfig;
    use pe_portal::portal::equipment::standard_inventory;
    use tower::util::ServiceExt;

    fn test_router() -> axum::Router {
        let repository = Arc::new(InMemoryFitnessRepository::default());
        let comments = Arc::new(CannedCommentGateway);
        let fitness = Arc::new(FitnessService::new(
            repository,
            comments,
            default_scoring_config(),
        ));

        let news_store = Arc::new(InMemoryNewsRepository::default());
        for post in sample_news() {
            news_store.insert(post).expect("news seed");
        }
        let news = Arc::new(NewsService::new(news_store));

        let stars_store = Arc::new(InMemoryStarsRepository::default());
        for star in sample_stars() {
            stars_store.insert(star).expect("stars seed");
        }
        let stars = Arc::new(StarsService::new(stars_store));

        let equipment = Arc::new(EquipmentLedger::new(Arc::new(
            InMemoryEquipmentStore::default(),
        )));
        equipment
            .seed(standard_inventory())
            .expect("inventory seed");

        let admin = AdminState {
            config: Arc::new(AdminConfig {
                email: "pe-head@school.test".to_string(),
                password: "pe-dev-password".to_string(),
                token: "pe-dev-token".to_string(),
            }),
            fitness: Arc::clone(&fitness),
            news: Arc::clone(&news),
            stars: Arc::clone(&stars),
            equipment: Arc::clone(&equipment),
        };

        with_portal_routes(PortalServices {
            fitness,
            news,
            stars,
            equipment,
            admin,
        })
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn news_feed_lists_seeded_posts_newest_first() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/news")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        let posts = body["news"].as_array().expect("news array");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["title"], "Fitness assessment week");
    }

    #[tokio::test]
    async fn equipment_inventory_is_seeded() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/equipment")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body.as_array().expect("array").len(), 4);
    }

    #[tokio::test]
    async fn admin_export_requires_bearer_token() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/admin/fitness/export")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
