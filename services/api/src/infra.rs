use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use pe_portal::portal::equipment::{
    BorrowLogEntry, EquipmentId, EquipmentItem, EquipmentStore, EquipmentStoreError,
};
use pe_portal::portal::fitness::{
    CommentError, CommentGateway, FitnessRecord, FitnessRepository, OpenRouterClient, RecordId,
    RepositoryError, ScoringConfig,
};
use pe_portal::portal::news::{NewsError, NewsPost, NewsRepository};
use pe_portal::portal::stars::{StarProfile, StarsError, StarsRepository};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFitnessRepository {
    records: Arc<Mutex<HashMap<RecordId, FitnessRecord>>>,
}

impl FitnessRepository for InMemoryFitnessRepository {
    fn insert(&self, record: FitnessRecord) -> Result<FitnessRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.record_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.record_id.clone(), record.clone());
        Ok(record)
    }

    fn attach_comment(&self, id: &RecordId, comment: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(id) {
            Some(record) => {
                record.coach_comment = Some(comment.to_string());
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<FitnessRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<FitnessRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<FitnessRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNewsRepository {
    posts: Arc<Mutex<Vec<NewsPost>>>,
}

impl NewsRepository for InMemoryNewsRepository {
    fn insert(&self, post: NewsPost) -> Result<NewsPost, NewsError> {
        let mut guard = self.posts.lock().expect("news mutex poisoned");
        guard.push(post.clone());
        Ok(post)
    }

    fn list(&self) -> Result<Vec<NewsPost>, NewsError> {
        let guard = self.posts.lock().expect("news mutex poisoned");
        let mut posts = guard.clone();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStarsRepository {
    stars: Arc<Mutex<Vec<StarProfile>>>,
}

impl StarsRepository for InMemoryStarsRepository {
    fn insert(&self, star: StarProfile) -> Result<StarProfile, StarsError> {
        let mut guard = self.stars.lock().expect("stars mutex poisoned");
        guard.push(star.clone());
        Ok(star)
    }

    fn list(&self) -> Result<Vec<StarProfile>, StarsError> {
        let guard = self.stars.lock().expect("stars mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEquipmentStore {
    items: Arc<Mutex<Vec<EquipmentItem>>>,
    log: Arc<Mutex<Vec<BorrowLogEntry>>>,
}

impl EquipmentStore for InMemoryEquipmentStore {
    fn list(&self) -> Result<Vec<EquipmentItem>, EquipmentStoreError> {
        let guard = self.items.lock().expect("equipment mutex poisoned");
        Ok(guard.clone())
    }

    fn fetch(&self, id: &EquipmentId) -> Result<Option<EquipmentItem>, EquipmentStoreError> {
        let guard = self.items.lock().expect("equipment mutex poisoned");
        Ok(guard.iter().find(|item| &item.id == id).cloned())
    }

    fn save(&self, item: EquipmentItem) -> Result<(), EquipmentStoreError> {
        let mut guard = self.items.lock().expect("equipment mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => guard.push(item),
        }
        Ok(())
    }

    fn append_log(&self, entry: BorrowLogEntry) -> Result<(), EquipmentStoreError> {
        let mut guard = self.log.lock().expect("equipment log mutex poisoned");
        guard.push(entry);
        Ok(())
    }

    fn logs(&self) -> Result<Vec<BorrowLogEntry>, EquipmentStoreError> {
        let guard = self.log.lock().expect("equipment log mutex poisoned");
        Ok(guard.clone())
    }
}

/// Offline stand-in for the OpenRouter gateway, used when no API key is
/// configured and in the CLI demo.
#[derive(Default, Clone)]
pub(crate) struct CannedCommentGateway;

impl CommentGateway for CannedCommentGateway {
    fn generate(&self, _prompt: &str) -> Result<String, CommentError> {
        Ok("Great effort this term! Keep up the regular training, focus a little \
            extra on your weakest station, and talk to the PE office about the \
            team tryouts that match your strengths."
            .to_string())
    }
}

/// Comment backend selected at startup: OpenRouter when `OPENROUTER_API_KEY`
/// is present, the canned gateway otherwise.
pub(crate) enum CommentBackend {
    OpenRouter(OpenRouterClient),
    Canned(CannedCommentGateway),
}

impl CommentGateway for CommentBackend {
    fn generate(&self, prompt: &str) -> Result<String, CommentError> {
        match self {
            CommentBackend::OpenRouter(client) => client.generate(prompt),
            CommentBackend::Canned(gateway) => gateway.generate(prompt),
        }
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(crate) fn sample_stars() -> Vec<StarProfile> {
    vec![
        StarProfile {
            id: "star-2025-basketball-mvp".to_string(),
            name: "Lee Ka-yan".to_string(),
            team: "Basketball (Girls A)".to_string(),
            award: "Inter-school MVP".to_string(),
            school_year: "2025-2026".to_string(),
            photo_url: None,
        },
        StarProfile {
            id: "star-2025-swimming-record".to_string(),
            name: "Wong Chun-hei".to_string(),
            team: "Swimming".to_string(),
            award: "District 100m freestyle record".to_string(),
            school_year: "2025-2026".to_string(),
            photo_url: None,
        },
        StarProfile {
            id: "star-2024-squash-finalist".to_string(),
            name: "Chau Hiu-ching".to_string(),
            team: "Squash".to_string(),
            award: "All-schools finalist".to_string(),
            school_year: "2024-2025".to_string(),
            photo_url: None,
        },
    ]
}

pub(crate) fn sample_news() -> Vec<NewsPost> {
    vec![
        NewsPost {
            id: "news-20250901-fitness-week".to_string(),
            title: "Fitness assessment week".to_string(),
            content: "All classes complete the four-station fitness test during \
                      PE lessons this week. Results and coach feedback appear \
                      in the portal the same day."
                .to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid seed date"),
        },
        NewsPost {
            id: "news-20250825-team-tryouts".to_string(),
            title: "Team tryouts open".to_string(),
            content: "Tryouts for soccer, squash, table tennis, and the swimming \
                      squad start next Monday. Sign up at the PE office."
                .to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 25).expect("valid seed date"),
        },
    ]
}
