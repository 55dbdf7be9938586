use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::Path,
    time::Duration,
};

use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::{
        ACCEPT_ENCODING,
        USER_AGENT,
    },
};

use crate::core::CloudError;

const MAX_ATTEMPTS: usize = 3;

pub fn http_client() -> Result<Client, CloudError> {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| CloudError::Custom(format!("HTTP client build failed: {e}")))
}

/// Streams `url` into `path`, retrying with a linear backoff.
pub fn download_to_file(client: &Client, url: &str, path: &Path) -> Result<(), CloudError> {
    let mut attempts: usize = 0;
    loop {
        attempts += 1;

        let resp = client
            .get(url)
            .header(USER_AGENT, concat!("mdcloud/", env!("CARGO_PKG_VERSION"), " (+reqwest)"))
            .header(ACCEPT_ENCODING, "identity")
            .send();

        let mut resp = match resp {
            Ok(r) => r,
            Err(e) if attempts < MAX_ATTEMPTS => {
                tracing::warn!("GET {} failed (attempt {}): {}", url, attempts, e);
                backoff(attempts);
                continue;
            }
            Err(e) => {
                return Err(CloudError::Custom(format!("Failed HTTP GET {}: {}", url, e)));
            }
        };

        ensure_success(&resp)?;

        let mut writer = BufWriter::new(File::create(path).map_err(|e| {
            CloudError::Custom(format!("Create download file {:?} failed: {}", path, e))
        })?);

        match resp.copy_to(&mut writer) {
            Ok(n) if n > 0 => {
                writer.flush()?;
                return Ok(());
            }
            Ok(_) | Err(_) if attempts < MAX_ATTEMPTS => {
                tracing::warn!("Empty or interrupted body from {} (attempt {})", url, attempts);
                backoff(attempts);
            }
            Ok(_) | Err(_) => {
                return Err(CloudError::Custom(
                    "Failed to copy response body to file".to_string(),
                ));
            }
        }
    }
}

fn backoff(attempts: usize) {
    std::thread::sleep(Duration::from_secs(2 * attempts as u64));
}

fn ensure_success(resp: &Response) -> Result<(), CloudError> {
    if !resp.status().is_success() {
        return Err(CloudError::Custom(format!(
            "HTTP error {} from {}",
            resp.status(),
            resp.url()
        )));
    }
    Ok(())
}
