//! Test helpers: build the app on a temporary upload root for integration tests.
//!
//! Run from workspace root: `cargo test -p ecoscan-api`.

#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use ecoscan_api::setup;
use ecoscan_api::state::AppState;
use ecoscan_core::config::{DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_ALLOWED_EXTENSIONS};
use ecoscan_core::{BaseConfig, Config, UploadFolder, UploadServiceConfig};
use tempfile::TempDir;

pub const PUBLIC_BASE_URL: &str = "http://localhost:5000";
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Nothing is expected to listen here
const UNREACHABLE_ECO_SCORE_URL: &str = "http://127.0.0.1:9";

/// Test application: server, state and the upload root it owns.
pub struct TestApp {
    pub server: TestServer,
    /// The same router the server wraps, for requests built by hand
    pub router: Router,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn folder_dir(&self, folder: UploadFolder) -> PathBuf {
        self.state.slots.directory(folder).to_path_buf()
    }

    /// Sorted names of everything in `folder`.
    pub fn files_in(&self, folder: UploadFolder) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.folder_dir(folder))
            .expect("Failed to read upload folder")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .into_string()
                    .expect("Non UTF-8 filename")
            })
            .collect();
        names.sort();
        names
    }

    pub fn set_modified(&self, folder: UploadFolder, filename: &str, modified: SystemTime) {
        std::fs::File::options()
            .write(true)
            .open(self.folder_dir(folder).join(filename))
            .expect("Failed to open stored image")
            .set_modified(modified)
            .expect("Failed to set modification time");
    }
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn create_test_config(upload_root: &Path, eco_score_api_url: &str) -> Config {
    Config::new(UploadServiceConfig {
        base: BaseConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            log_format: "compact".to_string(),
        },
        public_base_url: PUBLIC_BASE_URL.to_string(),
        upload_root: upload_root.to_path_buf(),
        max_file_size_bytes: MAX_FILE_SIZE,
        max_request_body_bytes: 4 * MAX_FILE_SIZE,
        http_concurrency_limit: 64,
        allowed_extensions: list(DEFAULT_ALLOWED_EXTENSIONS),
        allowed_content_types: list(DEFAULT_ALLOWED_CONTENT_TYPES),
        eco_score_api_url: eco_score_api_url.to_string(),
        eco_score_timeout_secs: 5,
    })
}

/// Setup test app on a fresh temporary upload root.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_eco_score(UNREACHABLE_ECO_SCORE_URL).await
}

pub async fn setup_production_test_app() -> TestApp {
    setup_test_app_with(UNREACHABLE_ECO_SCORE_URL, |config| {
        config.base.environment = "production".to_string();
        config.base.cors_origins = vec!["https://ecoscan.example".to_string()];
    })
    .await
}

pub async fn setup_test_app_with_eco_score(eco_score_api_url: &str) -> TestApp {
    setup_test_app_with(eco_score_api_url, |_| {}).await
}

/// Setup test app with the default test config adjusted by `configure`.
pub async fn setup_test_app_with(
    eco_score_api_url: &str,
    configure: impl FnOnce(&mut UploadServiceConfig),
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(temp_dir.path(), eco_score_api_url);
    configure(&mut config.0);

    let (state, router) = setup::build_app(config)
        .await
        .expect("Failed to build app");
    let server =
        TestServer::new(router.clone().into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        router,
        state,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with a single `image` field.
pub fn image_form(data: Vec<u8>, filename: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("image", part)
}

pub async fn upload(client: &TestServer, path: &str, form: MultipartForm) -> TestResponse {
    client.post(path).multipart(form).await
}

/// Stored filename from a `fileUrl`.
pub fn filename_from_url(file_url: &str) -> String {
    file_url
        .rsplit('/')
        .next()
        .expect("fileUrl has no path")
        .to_string()
}
