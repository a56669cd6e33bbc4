use crate::cli::ServeArgs;
use crate::infra::{
    default_scoring_config, sample_news, sample_stars, AppState, CannedCommentGateway,
    CommentBackend, InMemoryEquipmentStore, InMemoryFitnessRepository, InMemoryNewsRepository,
    InMemoryStarsRepository,
};
use crate::routes::{with_portal_routes, PortalServices};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pe_portal::config::AppConfig;
use pe_portal::error::AppError;
use pe_portal::portal::admin::AdminState;
use pe_portal::portal::equipment::{standard_inventory, EquipmentLedger};
use pe_portal::portal::fitness::{FitnessService, OpenRouterClient};
use pe_portal::portal::news::{NewsRepository, NewsService};
use pe_portal::portal::stars::{StarsRepository, StarsService};
use pe_portal::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let comments = match config.ai.clone() {
        Some(ai) => {
            info!(model = %ai.model, "coach comments via OpenRouter");
            CommentBackend::OpenRouter(OpenRouterClient::with_runtime(ai)?)
        }
        None => {
            info!("OPENROUTER_API_KEY unset; coach comments use the offline gateway");
            CommentBackend::Canned(CannedCommentGateway)
        }
    };

    let repository = Arc::new(InMemoryFitnessRepository::default());
    let fitness = Arc::new(FitnessService::new(
        repository,
        Arc::new(comments),
        default_scoring_config(),
    ));

    let news_store = Arc::new(InMemoryNewsRepository::default());
    for post in sample_news() {
        news_store
            .insert(post)
            .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;
    }
    let news = Arc::new(NewsService::new(news_store));

    let stars_store = Arc::new(InMemoryStarsRepository::default());
    for star in sample_stars() {
        stars_store
            .insert(star)
            .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;
    }
    let stars = Arc::new(StarsService::new(stars_store));

    let equipment = Arc::new(EquipmentLedger::new(Arc::new(
        InMemoryEquipmentStore::default(),
    )));
    equipment
        .seed(standard_inventory())
        .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;

    let admin = AdminState {
        config: Arc::new(config.admin.clone()),
        fitness: Arc::clone(&fitness),
        news: Arc::clone(&news),
        stars: Arc::clone(&stars),
        equipment: Arc::clone(&equipment),
    };

    let app = with_portal_routes(PortalServices {
        fitness,
        news,
        stars,
        equipment,
        admin,
    })
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "PE portal API ready");

    axum::serve(listener, app).await?;
    Ok(())
}
