// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP with reqwest.
//
// Key functionality:
// - One shared client with browser-like default headers (connection pooling)
// - Follows redirects up to a configured limit
// - Per-request timeout
// - Retries transient failures, waiting a little longer each time
// - Sorts failures into categories (timeout, DNS, TLS, status code, ...)
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: For error handling
// - Error source chains: reqwest wraps the real cause (hyper, rustls, DNS)
// =============================================================================

use super::{FetchedPage, Fetcher};
use crate::config::ScraperConfig;
use crate::error::{ConfigError, FetchError};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder};
use url::Url;

/// Fetcher backed by a reqwest Client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: ScraperConfig,
}

impl HttpFetcher {
    // Builds the HTTP client from our config
    //
    // We reuse this client for all requests (connection pooling)
    pub fn new(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let client = client_builder(config).build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    // Makes one request, without retrying
    async fn fetch_once(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        let final_url = response.url().clone();

        // reqwest already followed redirects, so anything that isn't 2xx here
        // is a real failure (404, 500, or a 3xx without a Location header)
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let attempts = self.config.max_retries.max(1);
        let mut attempt = 1;

        loop {
            debug!("GET {} (attempt {}/{})", url, attempt, attempts);

            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) if attempt < attempts && e.is_transient() => {
                    let wait = self.config.backoff_for(attempt);
                    warn!(
                        "Fetch of {} failed (attempt {}/{}): {}; retrying in {:?}",
                        url, attempt, attempts, e, wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Client settings: timeout, redirects, headers, compression
fn client_builder(config: &ScraperConfig) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true)
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
//
// The interesting detail is usually a few levels down the source chain,
// so we flatten the whole chain into one string before looking at it.
fn categorize_error(error: reqwest::Error) -> FetchError {
    let chain = error_chain(&error);
    let lower = chain.to_lowercase();

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if lower.contains("dns") || lower.contains("failed to lookup address") {
        FetchError::Dns(chain)
    } else if lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl") {
        FetchError::Tls(chain)
    } else if error.is_connect() {
        FetchError::Connect(chain)
    } else {
        FetchError::Other(chain)
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why build the Client once?
//    - A reqwest Client keeps a pool of open connections
//    - Reusing it means we don't redo the TCP/TLS handshake for every page
//    - Creating a new Client per request would be much slower
//
// 2. What is #[async_trait]?
//    - The macro rewrites async trait methods to return a boxed future
//    - The boxed future is Send, so it can run on tokio's thread pool
//    - That lets the crawler take "any Fetcher", real or fake
//
// 3. What does the `if` in a match arm do?
//    - Err(e) if attempt < attempts && e.is_transient() => ...
//    - It's a match guard: the arm only matches when the condition holds
//    - Otherwise the next arm, Err(e) => return Err(e), is tried
//
// 4. What is error.source()?
//    - Errors in Rust can wrap other errors (the "cause")
//    - source() returns the wrapped one, or None at the bottom
//    - We walk the chain to find words like "dns" or "certificate"
//
// 5. Why map_err?
//    - send() gives us reqwest::Error, but our function returns FetchError
//    - map_err converts the error, then ? returns it early
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Tiny HTTP server: answers each incoming connection with the next
    // canned response, then closes it
    async fn serve(responses: Vec<String>) -> (SocketAddr, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            for response in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (addr, hits)
    }

    fn reply(status: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
            status,
            body.len(),
            extra_headers,
            body
        )
    }

    fn test_config() -> ScraperConfig {
        ScraperConfig {
            backoff_base: Duration::from_millis(1),
            timeout: Duration::from_secs(5),
            ..ScraperConfig::default()
        }
    }

    // Same as HttpFetcher::new, but ignores proxy environment variables
    fn local_fetcher(config: &ScraperConfig) -> HttpFetcher {
        HttpFetcher {
            client: client_builder(config).no_proxy().build().unwrap(),
            config: config.clone(),
        }
    }

    fn url_for(addr: SocketAddr, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", addr, path)).unwrap()
    }

    #[test]
    fn test_client_builds_with_defaults() {
        assert!(HttpFetcher::new(&ScraperConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let (addr, hits) = serve(vec![reply("200 OK", "", "<title>Hi</title>")]).await;
        let fetcher = local_fetcher(&test_config());

        let page = fetcher.fetch(&url_for(addr, "/")).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<title>Hi</title>");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_follows_redirect_and_reports_final_url() {
        let (addr, _) = serve(vec![
            reply("301 Moved Permanently", "Location: /final\r\n", ""),
            reply("200 OK", "", "done"),
        ])
        .await;
        let fetcher = local_fetcher(&test_config());

        let page = fetcher.fetch(&url_for(addr, "/start")).await.unwrap();

        assert_eq!(page.final_url.path(), "/final");
        assert_eq!(page.body, "done");
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let (addr, hits) = serve(vec![
            reply("404 Not Found", "", ""),
            reply("200 OK", "", "should not be reached"),
        ])
        .await;
        let fetcher = local_fetcher(&test_config());

        let err = fetcher.fetch(&url_for(addr, "/missing")).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let (addr, hits) = serve(vec![
            reply("503 Service Unavailable", "", ""),
            reply("200 OK", "", "recovered"),
        ])
        .await;
        let fetcher = local_fetcher(&test_config());

        let page = fetcher.fetch(&url_for(addr, "/")).await.unwrap();

        assert_eq!(page.body, "recovered");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (addr, hits) = serve(vec![
            reply("500 Internal Server Error", "", ""),
            reply("500 Internal Server Error", "", ""),
            reply("500 Internal Server Error", "", ""),
        ])
        .await;
        let config = ScraperConfig {
            max_retries: 2,
            ..test_config()
        };
        let fetcher = local_fetcher(&config);

        let err = fetcher.fetch(&url_for(addr, "/")).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(500)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ScraperConfig {
            max_retries: 1,
            ..test_config()
        };
        let fetcher = local_fetcher(&config);

        let err = fetcher.fetch(&url_for(addr, "/")).await.unwrap_err();

        assert!(matches!(err, FetchError::Connect(_) | FetchError::Other(_)));
    }
}
