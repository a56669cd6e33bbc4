//! Integration specifications for the fitness evaluation workflow.
//!
//! Scenarios drive the public service facade and HTTP router end to end:
//! submit a measurement, read the scored record back, and request the coach
//! comment, all without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use pe_portal::portal::fitness::{
        CommentError, CommentGateway, FitnessRecord, FitnessRepository, FitnessService,
        FitnessSubmission, Gender, RecordId, RepositoryError, ScoringConfig, StudentIdentity,
    };

    pub(super) fn submission() -> FitnessSubmission {
        FitnessSubmission {
            student: StudentIdentity {
                name: "Chan Tai-man".to_string(),
                class: "6A".to_string(),
                class_no: 12,
            },
            gender: Gender::Male,
            sit_ups: 30,
            flexibility_cm: 20.0,
            hand_grip_kg: 25.0,
            run_9min_m: 1400.0,
            height_cm: 150.0,
            weight_kg: 40.0,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<RecordId, FitnessRecord>>>,
    }

    impl FitnessRepository for MemoryRepository {
        fn insert(&self, record: FitnessRecord) -> Result<FitnessRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.record_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.record_id.clone(), record.clone());
            Ok(record)
        }

        fn attach_comment(&self, id: &RecordId, comment: &str) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            match guard.get_mut(id) {
                Some(record) => {
                    record.coach_comment = Some(comment.to_string());
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }

        fn fetch(&self, id: &RecordId) -> Result<Option<FitnessRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<FitnessRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            let mut records: Vec<FitnessRecord> = guard.values().cloned().collect();
            records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
            Ok(records)
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryComments {
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MemoryComments {
        pub(super) fn prompts(&self) -> Vec<String> {
            self.prompts.lock().expect("lock").clone()
        }
    }

    impl CommentGateway for MemoryComments {
        fn generate(&self, prompt: &str) -> Result<String, CommentError> {
            self.prompts.lock().expect("lock").push(prompt.to_string());
            Ok("Strong all-round term; try out for the soccer team.".to_string())
        }
    }

    pub(super) fn build_service() -> (
        Arc<FitnessService<MemoryRepository, MemoryComments>>,
        Arc<MemoryRepository>,
        Arc<MemoryComments>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let comments = Arc::new(MemoryComments::default());
        let service = Arc::new(FitnessService::new(
            repository.clone(),
            comments.clone(),
            ScoringConfig::default(),
        ));
        (service, repository, comments)
    }
}

mod scoring {
    use super::common::*;
    use pe_portal::portal::fitness::{FitnessRepository, TestItem};

    #[test]
    fn worked_example_scores_and_persists() {
        let (service, repository, _) = build_service();
        let record = service.submit(submission()).expect("submission succeeds");

        assert_eq!(record.result.bmi, 17.8);
        assert_eq!(record.result.total_score, 21);
        assert_eq!(record.result.best_item.item, TestItem::SitUps);
        assert_eq!(record.result.worst_item.item, TestItem::Bmi);
        assert_eq!(record.result.recommendations.len(), 4);

        let stored = repository
            .fetch(&record.record_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.result.total_score, 21);
        assert!(stored.coach_comment.is_none());
    }

    #[test]
    fn comment_generation_stores_and_caches() {
        let (service, repository, comments) = build_service();
        let record = service.submit(submission()).expect("submission succeeds");

        let first = service
            .coach_comment(&record.record_id)
            .expect("comment generated");
        let second = service
            .coach_comment(&record.record_id)
            .expect("comment reused");

        assert_eq!(first, second);
        assert_eq!(comments.prompts().len(), 1);
        assert!(comments.prompts()[0].contains("Sit-ups: 30 reps (score 5/5)"));

        let stored = repository
            .fetch(&record.record_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.coach_comment.as_deref(), Some(first.as_str()));
    }

    #[test]
    fn invalid_measurement_never_reaches_the_repository() {
        let (service, repository, _) = build_service();
        let mut bad = submission();
        bad.height_cm = 0.0;

        assert!(service.submit(bad).is_err());
        assert!(repository.list().expect("repo list").is_empty());
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pe_portal::portal::fitness::fitness_router;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn post_evaluation_returns_scored_view() {
        let (service, _, _) = build_service();
        let router = fitness_router(service);

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/fitness/evaluations")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&submission()).expect("serialize submission"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["total_score"], 21);
        assert_eq!(payload["best_item"], "Sit-ups");
        assert_eq!(payload["worst_item"], "BMI");
        assert_eq!(payload["badges"].as_array().expect("badges").len(), 5);
    }

    #[tokio::test]
    async fn get_evaluation_round_trips_through_the_router() {
        let (service, _, _) = build_service();
        let record = service.submit(submission()).expect("submission succeeds");
        let router = fitness_router(service);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/fitness/evaluations/{}", record.record_id.0))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["record_id"], record.record_id.0.as_str());
        assert_eq!(payload["student_name"], "Chan Tai-man");
    }

    #[tokio::test]
    async fn comment_endpoint_returns_generated_text() {
        let (service, _, _) = build_service();
        let record = service.submit(submission()).expect("submission succeeds");
        let router = fitness_router(service);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!(
                        "/api/v1/fitness/evaluations/{}/comment",
                        record.record_id.0
                    ))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(payload["comment"]
            .as_str()
            .expect("comment text")
            .contains("soccer"));
    }

    #[tokio::test]
    async fn unknown_record_is_a_404() {
        let (service, _, _) = build_service();
        let router = fitness_router(service);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/fitness/evaluations/fit-999999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
