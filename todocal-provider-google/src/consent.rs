//! Browser consent flow for a desktop OAuth client.
//!
//! A listener is bound on an ephemeral loopback port, Google redirects the
//! browser there with `code` and `state`, and the code is exchanged for tokens.

use std::time::Duration;

use anyhow::{Context, Result};
use google_calendar::Client;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::info;

use crate::SCOPES;
use crate::app_config::Credentials;
use crate::session::SessionData;

/// How long the browser flow may take before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub async fn run(creds: &Credentials, timeout: Duration) -> Result<SessionData> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind OAuth callback listener")?;
    let port = listener.local_addr()?.port();

    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

    let mut client = Client::new(
        creds.client_id.clone(),
        creds.client_secret.clone(),
        redirect_uri(port),
        String::new(),
        String::new(),
    );

    let auth_url = client.user_consent_url(&scopes);

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, state) = wait_for_callback_within(listener, timeout).await?;

    info!("received authorization code, exchanging for tokens");

    let access_token = client
        .get_access_token(&code, &state)
        .await
        .context("Failed to exchange authorization code")?;

    Ok((&access_token).into())
}

fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

async fn wait_for_callback_within(
    listener: TcpListener,
    timeout: Duration,
) -> Result<(String, String)> {
    tokio::time::timeout(timeout, wait_for_callback(listener))
        .await
        .map_err(|_| anyhow::anyhow!("No OAuth callback within {}s", timeout.as_secs()))?
}

async fn wait_for_callback(listener: TcpListener) -> Result<(String, String)> {
    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let (code, state) = parse_callback(&request_line)?;

    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>Authentication successful!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok((code, state))
}

/// Pull `code` and `state` out of a request line like `GET /callback?code=..&state=.. HTTP/1.1`.
fn parse_callback(request_line: &str) -> Result<(String, String)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;

    if let Some((_, error)) = url.query_pairs().find(|(k, _)| k == "error") {
        anyhow::bail!("Consent was not granted: {}", error);
    }

    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| anyhow::anyhow!("No code in callback"))?;

    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    Ok((code, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_and_state() {
        let (code, state) =
            parse_callback("GET /callback?state=abc&code=4%2F0Adeu HTTP/1.1\r\n").unwrap();

        assert_eq!(code, "4/0Adeu");
        assert_eq!(state, "abc");
    }

    #[test]
    fn denied_consent_is_reported() {
        let err = parse_callback("GET /callback?error=access_denied HTTP/1.1").unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn garbage_request_is_rejected() {
        assert!(parse_callback("\r\n").is_err());
    }

    #[tokio::test]
    async fn callback_wait_gives_up() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let err = wait_for_callback_within(listener, Duration::from_millis(100))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("No OAuth callback"));
    }

    #[tokio::test]
    async fn callback_within_timeout_is_accepted() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let browser = tokio::spawn(async move {
            let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", port)).await.unwrap();
            stream
                .write_all(b"GET /callback?code=c0de&state=st HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .await
                .unwrap();
            let mut response = String::new();
            tokio::io::AsyncReadExt::read_to_string(&mut stream, &mut response)
                .await
                .unwrap();
            response
        });

        let (code, state) = wait_for_callback_within(listener, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!((code.as_str(), state.as_str()), ("c0de", "st"));
        assert!(browser.await.unwrap().starts_with("HTTP/1.1 200 OK"));
    }
}
