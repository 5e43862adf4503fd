use super::*;
use crate::net::AuthorizationInfoClient;
use crate::state::navigation::NavigationEvent;
use crate::test_support::{spawn_server, test_config};
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn healthz_reports_shell_loading_flag() {
    let config = test_config("http://auth.example.test");
    let client = AuthorizationInfoClient::new(&config).unwrap();
    let state = AppState::new(config, client);
    let url = spawn_server(app(state.clone())).await;

    let body: Value = reqwest::get(format!("{url}/healthz")).await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok", "loading": true }));

    let mut loading = state.shell.subscribe();
    state.navigator.emit(NavigationEvent::End { id: 0, url: "/".into() });
    timeout(Duration::from_millis(500), loading.wait_for(|v| !*v))
        .await
        .expect("loading flag did not clear")
        .expect("shell channel closed");

    let body: Value = reqwest::get(format!("{url}/healthz")).await.unwrap().json().await.unwrap();
    assert_eq!(body["loading"], json!(false));
}
