#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tempfile::TempDir;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub data_file: PathBuf,
    pub upload_dir: PathBuf,
    pub frontend_dir: PathBuf,
    // Held so the storage tempdir outlives the server
    storage: TempDir,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Isolated storage per test binary
        let storage = tempfile::tempdir().context("failed to create storage tempdir")?;
        let data_file = storage.path().join("data/recipes.json");
        let upload_dir = storage.path().join("uploads");
        let frontend_dir = storage.path().join("dist");

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_recipe-api-rust"));
        cmd.env("RECIPE_API_PORT", port.to_string())
            .env("RECIPE_DATA_FILE", &data_file)
            .env("RECIPE_UPLOAD_DIR", &upload_dir)
            .env("RECIPE_FRONTEND_DIR", &frontend_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            data_file,
            upload_dir,
            frontend_dir,
            storage,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/api/recipes", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

fn init_tracing() {
    // try_init: every test in the binary calls ensure_server
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    init_tracing();
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    tracing::debug!("test server ready on {}", server.base_url);
    Ok(server)
}

/// Build a recipe multipart form from optional parts.
pub fn recipe_form(title: Option<&str>, tags: Option<&str>, image: Option<(&str, &[u8])>) -> Form {
    let mut form = Form::new();
    if let Some(title) = title {
        form = form.text("title", title.to_string());
    }
    if let Some(tags) = tags {
        form = form.text("tags", tags.to_string());
    }
    if let Some((filename, bytes)) = image {
        let part = Part::bytes(bytes.to_vec()).file_name(filename.to_string());
        form = form.part("image", part);
    }
    form
}

/// Create a recipe and return the response body, asserting success.
pub async fn create_recipe(
    server: &TestServer,
    client: &reqwest::Client,
    title: &str,
    tags: Option<&str>,
    image: (&str, &[u8]),
) -> Result<serde_json::Value> {
    let res = client
        .post(format!("{}/api/recipes", server.base_url))
        .multipart(recipe_form(Some(title), tags, Some(image)))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create failed with {}", res.status());
    Ok(res.json().await?)
}

/// Filesystem location of an image given its public `/uploads/<name>` path.
pub fn image_disk_path(server: &TestServer, image: &str) -> PathBuf {
    let name = image.rsplit('/').next().unwrap_or(image);
    server.upload_dir.join(name)
}
