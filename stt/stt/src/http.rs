use crate::error::from_reqwest_error;
use crate::errors::SttError;
use log::{debug, trace};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::time::Duration;

/// Blocking HTTP client with a bounded retry budget for transient failures.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    pub fn new(timeout_secs: u64, max_retries: u32) -> Result<Self, SttError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SttError::internal(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            max_retries,
        })
    }

    /// GET whose body the caller consumes, e.g. by streaming it to disk.
    pub fn get(&self, url: &str) -> Result<Response, SttError> {
        self.execute("GET", url, |client| client.get(url))
    }

    pub fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<(StatusCode, String), SttError> {
        let resp = self.execute("POST", url, |client| client.post(url).form(form))?;
        read_text(resp)
    }

    pub fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        bearer_token: &str,
        body: &T,
    ) -> Result<(StatusCode, String), SttError> {
        let resp = self.execute("POST", url, |client| {
            client.post(url).bearer_auth(bearer_token).json(body)
        })?;
        read_text(resp)
    }

    /// Sends the request built by `build`, retrying transport errors and
    /// retryable statuses. The last response is returned whatever its status.
    fn execute<F>(&self, method: &str, url: &str, build: F) -> Result<Response, SttError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            trace!("{method} {url} attempt {attempt}");
            let outcome = build(&self.client)
                .send()
                .map_err(|e| from_reqwest_error(format!("{method} {url}"), e));

            let exhausted = attempt > self.max_retries;
            match outcome {
                Ok(resp) if exhausted || !is_retryable_status(resp.status()) => return Ok(resp),
                Ok(resp) => {
                    debug!("{method} {url} returned {} on attempt {attempt}", resp.status());
                }
                Err(e) if exhausted || !e.is_retryable() => return Err(e),
                Err(e) => {
                    debug!("retryable error on attempt {attempt}: {e}");
                }
            }
            let backoff = backoff_delay(attempt);
            debug!("backing off {backoff:?} before retrying {method} {url}");
            std::thread::sleep(backoff);
        }
    }
}

fn read_text(resp: Response) -> Result<(StatusCode, String), SttError> {
    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| SttError::network(format!("read body error: {e}")))?;
    Ok((status, text))
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::INTERNAL_SERVER_ERROR
        || status == StatusCode::BAD_GATEWAY
        || status == StatusCode::SERVICE_UNAVAILABLE
        || status == StatusCode::GATEWAY_TIMEOUT
}

fn backoff_delay(attempt: u32) -> Duration {
    // Exponential backoff with deterministic jitter
    let base = 100u64; // ms
    let exp = base.saturating_mul(1u64 << (attempt.min(6).saturating_sub(1)));
    let mut x = exp.wrapping_mul(0x9E3779B97F4A7C15);
    x ^= x >> 33;
    x = x.wrapping_mul(0xC2B2AE3D27D4EB4F);
    let jitter = x % 100;
    Duration::from_millis(exp + jitter)
}
