use axum::Router;
use glyco::adapters::mock_service::MockService;
use glyco::config::MockServerSettings;

pub struct TestServer {
    pub base_url: String,
    pub service: MockService,
}

impl TestServer {
    pub async fn new(label: &str, fail_message: Option<&str>) -> Self {
        let settings = MockServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            label: label.to_string(),
            fail_message: fail_message.map(str::to_string),
        };
        let service = MockService::new(&settings);
        let base_url = spawn_router(service.router()).await;

        TestServer {
            base_url,
            service,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serves `app` on a random local port and returns its base URL
pub async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
