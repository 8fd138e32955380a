//! Flow and router tests for the recruitment crate

/// Shared fixtures: in-memory stores with one open job (id 42)
#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::application::{SignUpInput, SignUpUseCase};
    use auth::config::AuthConfig;
    use auth::InMemoryUserRepository;
    use chrono::Utc;
    use kernel::id::{JobId, UserId};
    use platform::cache::MemoryCache;

    use crate::domain::entities::Job;
    use crate::infra::InMemoryRecruitmentRepository;

    pub const JOB_ID: JobId = JobId::new(42);

    pub struct Harness {
        pub repo: Arc<InMemoryRecruitmentRepository>,
        pub users: Arc<InMemoryUserRepository>,
        cache: Arc<MemoryCache>,
        config: Arc<AuthConfig>,
    }

    impl Harness {
        pub async fn new() -> Self {
            let h = Self {
                repo: Arc::new(InMemoryRecruitmentRepository::new()),
                users: Arc::new(InMemoryUserRepository::new()),
                cache: Arc::new(MemoryCache::new()),
                config: Arc::new(AuthConfig::default()),
            };
            h.repo.insert_job(job(JOB_ID, "Backend Engineer", true)).await;
            h
        }

        pub async fn register(&self, email: &str, phone: &str) -> UserId {
            SignUpUseCase::new(self.users.clone(), self.cache.clone(), self.config.clone())
                .execute(SignUpInput {
                    name: "Alice Liddell".to_string(),
                    gender: "female".to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    password: "Correct-Horse-42".to_string(),
                    code: None,
                })
                .await
                .unwrap()
                .user_id
        }
    }

    pub fn job(job_id: JobId, title: &str, is_open: bool) -> Job {
        let now = Utc::now();
        Job {
            job_id,
            title: title.to_string(),
            description: "Build and operate Rust services".to_string(),
            location: Some("Remote".to_string()),
            salary_range: None,
            is_open,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod apply_tests {
    use axum::http::StatusCode;
    use kernel::id::{JobId, UserId};

    use super::support::*;
    use crate::application::{ApplyUseCase, ListUserApplicationsUseCase};
    use crate::domain::value_objects::ApplicationStatus;
    use crate::error::RecruitmentError;

    #[tokio::test]
    async fn test_apply_creates_pending_application() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;

        let application = ApplyUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID, alice)
            .await
            .unwrap();

        assert_eq!(application.job_id, JOB_ID);
        assert_eq!(application.user_id, alice);
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert!(application.decided_at.is_none());
    }

    #[tokio::test]
    async fn test_apply_twice_conflicts() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;
        let use_case = ApplyUseCase::new(h.repo.clone(), h.users.clone());

        use_case.execute(JOB_ID, alice).await.unwrap();
        let err = use_case.execute(JOB_ID, alice).await.unwrap_err();

        assert!(matches!(err, RecruitmentError::DuplicateApplication));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let mine = ListUserApplicationsUseCase::new(h.repo.clone(), h.users.clone())
            .execute(alice)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_applies_yield_one_application() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let use_case = ApplyUseCase::new(h.repo.clone(), h.users.clone());
                tokio::spawn(async move { use_case.execute(JOB_ID, alice).await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, RecruitmentError::DuplicateApplication)),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_apply_to_unknown_job_or_user() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;
        let use_case = ApplyUseCase::new(h.repo.clone(), h.users.clone());

        let err = use_case.execute(JobId::new(7), alice).await.unwrap_err();
        assert!(matches!(err, RecruitmentError::JobNotFound));

        let err = use_case.execute(JOB_ID, UserId::new()).await.unwrap_err();
        assert!(matches!(err, RecruitmentError::UserNotFound));
    }

    #[tokio::test]
    async fn test_closed_job_rejects_applications() {
        let h = Harness::new().await;
        h.repo.insert_job(job(JobId::new(43), "Closed Role", false)).await;
        let alice = h.register("alice@example.com", "+15550000001").await;

        let err = ApplyUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JobId::new(43), alice)
            .await
            .unwrap_err();

        assert!(matches!(err, RecruitmentError::JobClosed));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_status_lists_job_titles() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;
        ApplyUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID, alice)
            .await
            .unwrap();

        let mine = ListUserApplicationsUseCase::new(h.repo.clone(), h.users.clone())
            .execute(alice)
            .await
            .unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].job_title, "Backend Engineer");
        assert_eq!(mine[0].status, ApplicationStatus::Pending);

        let err = ListUserApplicationsUseCase::new(h.repo.clone(), h.users.clone())
            .execute(UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RecruitmentError::UserNotFound));
    }
}

#[cfg(test)]
mod admin_tests {
    use axum::http::StatusCode;
    use kernel::id::{ApplicationId, JobId};

    use super::support::*;
    use crate::application::{
        ApplyUseCase, CreateJobInput, CreateJobUseCase, DashboardUseCase, JobDetailsUseCase,
        ListAllJobsUseCase, ListApplicationsUseCase, ReviewApplicationUseCase,
        SetJobStatusUseCase,
    };
    use crate::domain::repository::ApplicationRepository;
    use crate::domain::value_objects::ApplicationStatus;
    use crate::error::RecruitmentError;

    #[tokio::test]
    async fn test_decision_is_final() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;
        let application = ApplyUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID, alice)
            .await
            .unwrap();

        let review = ReviewApplicationUseCase::new(h.repo.clone());
        let approved = review
            .execute(application.application_id, "approved")
            .await
            .unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert!(approved.decided_at.is_some());

        let err = review
            .execute(application.application_id, "rejected")
            .await
            .unwrap_err();
        assert!(matches!(err, RecruitmentError::AlreadyDecided));

        let stored = h
            .repo
            .find_application(application.application_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn test_review_rejects_unknown_decision_and_application() {
        let h = Harness::new().await;
        let review = ReviewApplicationUseCase::new(h.repo.clone());

        let err = review
            .execute(ApplicationId::new(1), "maybe")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = review
            .execute(ApplicationId::new(1), "approved")
            .await
            .unwrap_err();
        assert!(matches!(err, RecruitmentError::ApplicationNotFound));
    }

    #[tokio::test]
    async fn test_applicants_include_contact_details() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;
        ApplyUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID, alice)
            .await
            .unwrap();

        let applicants = ListApplicationsUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID)
            .await
            .unwrap();

        assert_eq!(applicants.len(), 1);
        assert_eq!(applicants[0].applicant_email, "alice@example.com");
        assert_eq!(applicants[0].applicant_name, "Alice Liddell");

        let err = ListApplicationsUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JobId::new(999))
            .await
            .unwrap_err();
        assert!(matches!(err, RecruitmentError::JobNotFound));
    }

    #[tokio::test]
    async fn test_job_management_and_counts() {
        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;

        let created = CreateJobUseCase::new(h.repo.clone())
            .execute(CreateJobInput {
                title: "Data Engineer".to_string(),
                description: "Pipelines".to_string(),
                location: None,
                salary_range: Some("90-110k".to_string()),
            })
            .await
            .unwrap();
        assert!(created.is_open);
        assert_eq!(created.job_id, JobId::new(43));

        let application = ApplyUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID, alice)
            .await
            .unwrap();
        ReviewApplicationUseCase::new(h.repo.clone())
            .execute(application.application_id, "rejected")
            .await
            .unwrap();

        SetJobStatusUseCase::new(h.repo.clone())
            .execute(created.job_id, false)
            .await
            .unwrap();

        let stats = DashboardUseCase::new(h.repo.clone()).execute().await.unwrap();
        assert_eq!(stats.jobs.total, 2);
        assert_eq!(stats.jobs.open, 1);
        assert_eq!(stats.applications.rejected, 1);
        assert_eq!(stats.applications.total(), 1);

        let details = JobDetailsUseCase::new(h.repo.clone())
            .execute(JOB_ID)
            .await
            .unwrap();
        assert_eq!(details.applications.rejected, 1);

        let all = ListAllJobsUseCase::new(h.repo.clone()).execute().await.unwrap();
        assert_eq!(all.len(), 2);

        let err = SetJobStatusUseCase::new(h.repo.clone())
            .execute(JobId::new(999), true)
            .await
            .unwrap_err();
        assert!(matches!(err, RecruitmentError::JobNotFound));
    }

    #[tokio::test]
    async fn test_deleted_account_leaves_no_applications() {
        use auth::domain::repository::UserRepository;

        let h = Harness::new().await;
        let alice = h.register("alice@example.com", "+15550000001").await;
        let bob = h.register("bob@example.com", "+15550000002").await;
        for user in [alice, bob] {
            ApplyUseCase::new(h.repo.clone(), h.users.clone())
                .execute(JOB_ID, user)
                .await
                .unwrap();
        }

        assert!(h.users.delete(&alice).await.unwrap());
        h.repo.remove_user(alice).await;

        let applicants = ListApplicationsUseCase::new(h.repo.clone(), h.users.clone())
            .execute(JOB_ID)
            .await
            .unwrap();
        assert_eq!(applicants.len(), 1);
        assert_eq!(applicants[0].applicant_email, "bob@example.com");

        let details = JobDetailsUseCase::new(h.repo.clone())
            .execute(JOB_ID)
            .await
            .unwrap();
        assert_eq!(details.applications.pending, 1);
        assert!(h.repo.list_applications_by_user(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_job_validates_input() {
        let h = Harness::new().await;

        let err = CreateJobUseCase::new(h.repo.clone())
            .execute(CreateJobInput {
                title: "   ".to_string(),
                description: "Pipelines".to_string(),
                location: None,
                salary_range: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod router_tests {
    use auth::config::AuthConfig;
    use auth::{AuthAppState, InMemoryUserRepository, auth_router, profile_router};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::cache::MemoryCache;
    use platform::mail::OutboxMailer;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::infra::InMemoryRecruitmentRepository;
    use crate::presentation::{
        RecruitmentAppState, admin_router, application_status_router, recruitment_router,
    };

    const PASSWORD: &str = "Correct-Horse-42";

    async fn app() -> Router {
        let users = InMemoryUserRepository::new();
        let jobs = InMemoryRecruitmentRepository::new();
        jobs.insert_job(job(JOB_ID, "Backend Engineer", true)).await;

        let auth_state = AuthAppState::new(
            users.clone(),
            MemoryCache::new(),
            OutboxMailer::new(),
            AuthConfig {
                admin_emails: vec!["admin@example.com".to_string()],
                ..Default::default()
            },
        );
        let tokens = auth_state.tokens.clone();
        let state = RecruitmentAppState::new(jobs, users);

        Router::new()
            .nest("/auth", auth_router(auth_state.clone()))
            .nest(
                "/profile",
                profile_router(auth_state).merge(application_status_router(state.clone(), tokens.clone())),
            )
            .nest("/recruitment", recruitment_router(state.clone(), tokens.clone()))
            .nest("/admin", admin_router(state, tokens))
    }

    fn request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Register and log in; returns (user id, token)
    async fn account(app: &Router, email: &str, phone: &str) -> (String, String) {
        let (status, _) = send(
            app,
            request(
                "POST",
                "/auth/signup",
                Some(json!({
                    "name": "Alice",
                    "gender": "female",
                    "email": email,
                    "phone": phone,
                    "password": PASSWORD,
                })),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        (
            body["userId"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_apply_and_review_end_to_end() {
        let app = app().await;
        let (alice_id, alice_token) = account(&app, "alice@example.com", "+15550000001").await;
        let (_, admin_token) = account(&app, "admin@example.com", "+15550000009").await;

        let (status, body) = send(
            &app,
            request(
                "POST",
                &format!("/recruitment/job/42/apply/{alice_id}"),
                None,
                Some(&alice_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        let application_id = body["applicationId"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            request(
                "PUT",
                &format!("/admin/application/{application_id}"),
                Some(json!({ "decision": "approved" })),
                Some(&admin_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");

        let (status, body) = send(
            &app,
            request(
                "PUT",
                &format!("/admin/application/{application_id}"),
                Some(json!({ "decision": "rejected" })),
                Some(&admin_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], 409);

        let (status, body) = send(
            &app,
            request(
                "GET",
                &format!("/profile/status/{alice_id}"),
                None,
                Some(&alice_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["status"], "approved");
        assert_eq!(body[0]["jobTitle"], "Backend Engineer");
        assert!(body[0]["decidedAt"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_apply_over_http() {
        let app = app().await;
        let (alice_id, token) = account(&app, "alice@example.com", "+15550000001").await;
        let uri = format!("/recruitment/job/42/apply/{alice_id}");

        let (status, _) = send(&app, request("POST", &uri, None, Some(&token))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, request("POST", &uri, None, Some(&token))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_apply_requires_matching_token() {
        let app = app().await;
        let (alice_id, _) = account(&app, "alice@example.com", "+15550000001").await;
        let (_, bob_token) = account(&app, "bob@example.com", "+15550000002").await;
        let uri = format!("/recruitment/job/42/apply/{alice_id}");

        let (status, _) = send(&app, request("POST", &uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, request("POST", &uri, None, Some(&bob_token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_job_listing_is_public() {
        let app = app().await;

        let (status, body) = send(&app, request("GET", "/recruitment/jobs", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["jobId"], 42);

        let (status, body) = send(&app, request("GET", "/recruitment/job/42", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Backend Engineer");

        let (status, _) = send(&app, request("GET", "/recruitment/job/999", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, request("GET", "/recruitment/job/abc", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin_role() {
        let app = app().await;
        let (_, alice_token) = account(&app, "alice@example.com", "+15550000001").await;
        let (_, admin_token) = account(&app, "admin@example.com", "+15550000009").await;

        let (status, _) = send(&app, request("GET", "/admin/dashboard", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, request("GET", "/admin/dashboard", None, Some(&alice_token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) =
            send(&app, request("GET", "/admin/dashboard", None, Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"]["total"], 1);
        assert_eq!(body["applications"]["pending"], 0);
    }

    #[tokio::test]
    async fn test_admin_creates_and_closes_job() {
        let app = app().await;
        let (alice_id, alice_token) = account(&app, "alice@example.com", "+15550000001").await;
        let (_, admin_token) = account(&app, "admin@example.com", "+15550000009").await;

        let (status, body) = send(
            &app,
            request(
                "POST",
                "/admin/jobs",
                Some(json!({
                    "title": "Data Engineer",
                    "description": "Pipelines",
                    "salaryRange": "90-110k",
                })),
                Some(&admin_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let job_id = body["jobId"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            request(
                "PUT",
                &format!("/admin/job/{job_id}/status"),
                Some(json!({ "open": false })),
                Some(&admin_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isOpen"], false);

        let (_, body) = send(&app, request("GET", "/recruitment/jobs", None, None)).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            request(
                "POST",
                &format!("/recruitment/job/{job_id}/apply/{alice_id}"),
                None,
                Some(&alice_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &app,
            request("GET", &format!("/admin/job/{job_id}"), None, Some(&admin_token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applications"]["total"], 0);

        let (status, body) =
            send(&app, request("GET", "/admin/applications/42", None, Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_job_body_is_bad_request_problem() {
        let app = app().await;
        let (_, admin_token) = account(&app, "admin@example.com", "+15550000009").await;

        let req = Request::builder()
            .method("POST")
            .uri("/admin/jobs")
            .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);

        let (status, body) = send(
            &app,
            request(
                "PUT",
                "/admin/application/1",
                Some(json!({ "decision": 5 })),
                Some(&admin_token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_status_of_other_user_is_forbidden() {
        let app = app().await;
        let (alice_id, _) = account(&app, "alice@example.com", "+15550000001").await;
        let (_, bob_token) = account(&app, "bob@example.com", "+15550000002").await;
        let (_, admin_token) = account(&app, "admin@example.com", "+15550000009").await;
        let uri = format!("/profile/status/{alice_id}");

        let (status, _) = send(&app, request("GET", &uri, None, Some(&bob_token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, request("GET", &uri, None, Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }
}
