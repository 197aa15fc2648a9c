//! End-to-end flows over the real HTTP client and file token store against
//! a mocked backend.

use advisor_application::{AppContext, DashboardState};
use advisor_core::SessionPhase;
use advisor_core::auth::{AccessToken, SignupRequest, TokenStore};
use advisor_core::onboarding::{AssetSymbol, InvestorType};
use advisor_core::routing::{GuardDecision, Route, guard_route, resolve};
use advisor_core::validation::OnboardingForm;
use advisor_core::vote::{SectionType, VoteKey, VoteType};
use advisor_infrastructure::{ClientConfig, FileTokenStore};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer, dir: &TempDir) -> ClientConfig {
    ClientConfig {
        api_base_url: server.uri(),
        token_file: Some(dir.path().join("token.json")),
        ..Default::default()
    }
}

fn identity_body(onboarding_done: bool) -> serde_json::Value {
    json!({
        "id": "u1",
        "email": "new@b.com",
        "name": "Newbie",
        "onboarding_done": onboarding_done
    })
}

#[tokio::test]
async fn register_lands_on_onboarding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "u1", "email": "new@b.com", "name": "Newbie"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-1", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body(false)))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);
    let context = AppContext::from_config(&config).unwrap();
    context.session.bootstrap().await;
    assert_eq!(
        resolve(Route::Dashboard, &context.session.snapshot()),
        (Route::Login, GuardDecision::ShowChildren)
    );

    let who = context
        .session
        .register(&SignupRequest::new("new@b.com", "Newbie", "secret1"))
        .await
        .unwrap();
    assert!(!who.onboarding_done);

    let snapshot = context.session.snapshot();
    assert_eq!(
        guard_route(Route::Dashboard, &snapshot),
        GuardDecision::RedirectTo(Route::Onboarding)
    );
    assert_eq!(
        resolve(Route::Login, &snapshot),
        (Route::Onboarding, GuardDecision::ShowChildren)
    );

    // The token outlives the process
    let store = FileTokenStore::with_path(config.token_path().unwrap());
    assert_eq!(store.load().unwrap(), Some(AccessToken::new("tok-1")));
}

#[tokio::test]
async fn restart_with_rejected_token_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);
    FileTokenStore::with_path(config.token_path().unwrap())
        .save(&AccessToken::new("stale"))
        .unwrap();

    let context = AppContext::from_config(&config).unwrap();
    assert_eq!(context.session.phase(), SessionPhase::Initializing);
    assert_eq!(
        guard_route(Route::Dashboard, &context.session.snapshot()),
        GuardDecision::ShowLoading
    );

    context.session.bootstrap().await;

    assert_eq!(context.session.phase(), SessionPhase::Unauthenticated);
    let store = FileTokenStore::with_path(config.token_path().unwrap());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn onboarded_user_loads_dashboard_and_votes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body(false)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body(true)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/onboarding"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "user_id": "u1",
            "assets": ["BTC"],
            "investor_type": "DayTrader",
            "content_types": ["price"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "news": [],
            "prices": {"BTC": 65000.5},
            "ai_insight": "",
            "meme": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vote"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "Internal Server Error"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);
    FileTokenStore::with_path(config.token_path().unwrap())
        .save(&AccessToken::new("tok-1"))
        .unwrap();

    let context = AppContext::from_config(&config).unwrap();
    context.session.bootstrap().await;
    assert_eq!(
        resolve(Route::Dashboard, &context.session.snapshot()).0,
        Route::Onboarding
    );

    context
        .onboarding
        .submit(OnboardingForm {
            assets: vec![AssetSymbol::Btc],
            investor_type: Some(InvestorType::DayTrader),
            content_types: vec![SectionType::Price],
        })
        .await
        .unwrap();
    assert_eq!(
        resolve(Route::Onboarding, &context.session.snapshot()),
        (Route::Dashboard, GuardDecision::ShowChildren)
    );

    let view = context.dashboard.reload().await.unwrap();
    assert!(matches!(context.dashboard.state(), DashboardState::Ready(_)));
    let keys: Vec<VoteKey> = view.vote_keys().cloned().collect();
    assert_eq!(keys, vec![VoteKey::new(SectionType::Price, "BTC|65000.5")]);

    // Backend refuses the vote, so the optimistic value is rolled back
    let outcome = context.votes.cast_vote(&keys[0], VoteType::Up).await;
    assert!(!outcome.is_confirmed());
    assert_eq!(context.votes.current_vote(&keys[0]), None);
}
