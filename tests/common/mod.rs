use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use benchboard::config::Config;
use benchboard::store::ResultStore;

pub const DASHBOARD_HTML: &str =
    "<!DOCTYPE html><html><body><h1>Benchmark Dashboard</h1></body></html>\n";

/// A running test server with its own data and template directories.
/// The directories are removed when the app is dropped.
#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub data_dir: TempDir,
    pub templates_dir: TempDir,
}

/// Knobs for [`spawn_app_with`].
pub struct TestOptions {
    pub with_dashboard: bool,
    pub base_url: Option<String>,
    pub max_body_size: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            with_dashboard: true,
            base_url: None,
            max_body_size: 10 * 1024 * 1024,
        }
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn data_path(&self, name: &str) -> PathBuf {
        self.data_dir.path().join(name)
    }

    /// File names currently in the data directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        list_dir(self.data_dir.path())
    }

    /// Upload a report (and optional config archive) as multipart form data.
    pub async fn upload(&self, report: &[u8], config: Option<&[u8]>) -> (Value, StatusCode) {
        let mut form = Form::new().part(
            "file",
            Part::bytes(report.to_vec())
                .file_name("report.json")
                .mime_str("application/json")
                .unwrap(),
        );
        if let Some(archive) = config {
            form = form.part(
                "config_file",
                Part::bytes(archive.to_vec())
                    .file_name("config.zip")
                    .mime_str("application/zip")
                    .unwrap(),
            );
        }
        self.upload_form(form).await
    }

    /// Upload a JSON value with no config archive and return the new id.
    pub async fn upload_json(&self, report: &Value) -> String {
        let (body, status) = self.upload(report.to_string().as_bytes(), None).await;
        assert_eq!(status, StatusCode::OK, "upload failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn upload_form(&self, form: Form) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await
            .expect("upload request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET a path and decode the body as JSON.
    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a dashboard template and default limits.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default()).await
}

pub async fn spawn_app_with(options: TestOptions) -> TestApp {
    let data_dir = TempDir::new().expect("Failed to create data dir");
    let templates_dir = TempDir::new().expect("Failed to create templates dir");

    if options.with_dashboard {
        std::fs::write(templates_dir.path().join("dashboard.html"), DASHBOARD_HTML)
            .expect("Failed to write dashboard template");
    }

    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        data_dir: data_dir.path().to_path_buf(),
        templates_dir: templates_dir.path().to_path_buf(),
        base_url: options.base_url,
        max_body_size: options.max_body_size,
        log_level: "warn".to_string(),
    };

    let store = ResultStore::open(&config.data_dir)
        .await
        .expect("Failed to open result store");
    let app = benchboard::build_app(config, store);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        data_dir,
        templates_dir,
    }
}

pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
