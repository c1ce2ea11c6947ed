//! Session gate against a live dashboard server: delegated login, token persistence across
//! restarts of the gate, and logout that always clears the local token.

use grade_dashboard::domain::session::{
    FileTokenStore, MemoryTokenStore, RemoteAuthenticator, TokenStore,
};
use grade_dashboard::transport::http::{build_app, AppState};
use grade_dashboard::{DashboardError, DashboardService, SessionGate, SessionState};

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let state = AppState::new(DashboardService::with_sample_data()?, "dist");
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(format!("http://{}", addr))
}

async fn session_status(base_url: &str, token: &str) -> u16 {
    reqwest::Client::new()
        .get(format!("{}/api/session", base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .status()
        .as_u16()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remote_login_persists_and_restores() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let dir = tempfile::tempdir()?;
    let token_file = dir.path().join("session.json");

    // --- First run: log in through the server ---
    let mut gate = SessionGate::new(
        RemoteAuthenticator::new(&base_url),
        FileTokenStore::new(&token_file),
    );
    assert_eq!(gate.restore(), &SessionState::Anonymous);

    let state = gate.login("admin", "admin123").await?.clone();
    assert_eq!(state.display_label(), Some("管理员"));
    let token = gate.token().expect("token persisted after login");
    assert_eq!(token.len(), 43);
    assert!(token_file.exists());
    assert_eq!(session_status(&base_url, &token).await, 200);

    // --- Second run: a fresh gate over the same file restores without a login ---
    let mut restarted = SessionGate::new(
        RemoteAuthenticator::new(&base_url),
        FileTokenStore::new(&token_file),
    );
    let restored = restarted.restore().clone();
    assert!(restored.is_authenticated());
    assert_eq!(restored.display_label(), Some("教师用户"));

    // --- Logout revokes the server token and removes the file ---
    assert_eq!(restarted.logout().await, &SessionState::Anonymous);
    assert!(restarted.token().is_none());
    assert!(!token_file.exists());
    assert_eq!(session_status(&base_url, &token).await, 401);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remote_rejection_leaves_state_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let dir = tempfile::tempdir()?;
    let token_file = dir.path().join("session.json");

    let mut gate = SessionGate::new(
        RemoteAuthenticator::new(format!("{}/", base_url)),
        FileTokenStore::new(&token_file),
    );
    let err = gate.login("teacher", "nope").await.unwrap_err();
    assert_eq!(err, DashboardError::AuthRejected);
    assert_eq!(gate.state(), &SessionState::Anonymous);
    assert!(gate.token().is_none());
    assert!(!token_file.exists());

    let state = gate.login("teacher", "teacher123").await?.clone();
    assert_eq!(state.display_label(), Some("教师用户"));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_logout_with_unreachable_server_still_clears() -> Result<(), Box<dyn std::error::Error>> {
    let mut gate = SessionGate::new(
        RemoteAuthenticator::new("http://127.0.0.1:9"),
        MemoryTokenStore::with_token("left-over"),
    );
    assert!(gate.restore().is_authenticated());

    let err = gate.login("teacher", "teacher123").await.unwrap_err();
    assert!(matches!(err, DashboardError::Network(_)));
    // A failed login keeps the restored session.
    assert!(gate.state().is_authenticated());

    assert_eq!(gate.logout().await, &SessionState::Anonymous);
    assert!(gate.token_store().load().is_none());

    Ok(())
}
