//! Starts the health endpoint on a free port and checks it over HTTP.

use inclusive_brief_transport_telegram::config::TelegramSettings;
use inclusive_brief_transport_telegram::health::{spawn, HEALTH_BODY};
use std::time::Duration;

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

#[tokio::test]
async fn health_endpoint_answers_on_configured_port() {
    let port = free_port();
    let settings = TelegramSettings {
        token: "1:x".to_string(),
        health_port: Some(port),
        health_bind: "127.0.0.1".to_string(),
    };
    let handle = spawn(&settings).expect("health port is set");

    let url = format!("http://127.0.0.1:{port}/");
    let client = reqwest::Client::new();
    let mut last_err = None;
    for _ in 0..100 {
        match client.get(&url).send().await {
            Ok(resp) => {
                assert!(resp.status().is_success());
                assert_eq!(resp.text().await.expect("body"), HEALTH_BODY);
                handle.abort();
                return;
            }
            Err(e) => last_err = Some(e),
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    handle.abort();
    panic!("health endpoint never answered: {last_err:?}");
}
