//! Deliver payloads to a Slack incoming webhook.

use super::{error::SlackError, payload::WebhookForm};
use reqwest::StatusCode;
use tracing::warn;
use url::Url;

/// The path every incoming webhook lives under on a Slack domain.
pub const HOOK_PATH: &str = "/services/hooks/incoming-webhook";

/// Build the webhook URL for a Slack domain, authenticated by `token`.
///
/// ```
/// let url = webhook_url("acme.slack.com", "abc123").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://acme.slack.com/services/hooks/incoming-webhook?token=abc123"
/// );
/// ```
pub fn webhook_url(domain: &str, token: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(&format!("https://{}{}", domain, HOOK_PATH), &[("token", token)])
}

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client]. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: Url,
}

impl WebhookClient {
    pub fn new(url: Url) -> Self {
        WebhookClient {
            http: reqwest::Client::new(),
            url,
        }
    }

    /// The host we deliver to, for logging without leaking the token.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Form POST a payload to the webhook. Anything other than a 200 is a
    /// failure; the body of a 200 isn't inspected.
    pub async fn post_form(&self, form: &WebhookForm) -> Result<(), SlackError> {
        let res = self.http.post(self.url.clone()).form(form).send().await?;

        let status = res.status();
        if status != StatusCode::OK {
            // Keep the status even if the body is lost.
            let body = res.text().await.unwrap_or_else(|e| {
                warn!("Failed to read webhook response body ({}): {}", status, e);
                String::new()
            });

            return Err(SlackError::BadResponse {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn form() -> WebhookForm {
        WebhookForm {
            payload: r#"{"attachments":[]}"#.into(),
        }
    }

    fn client(srv: &mockito::ServerGuard) -> WebhookClient {
        let url = Url::parse(&format!("{}{}?token=t0k3n", srv.url(), HOOK_PATH)).unwrap();
        WebhookClient::new(url)
    }

    #[test]
    fn test_webhook_url() {
        let url = webhook_url("acme.slack.com", "abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://acme.slack.com/services/hooks/incoming-webhook?token=abc123"
        );

        let escaped = webhook_url("acme.slack.com", "a&b=c").unwrap();
        assert_eq!(escaped.query(), Some("token=a%26b%3Dc"));

        assert!(webhook_url("not a domain", "abc123").is_err());
    }

    #[tokio::test]
    async fn test_post_form_success() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", HOOK_PATH)
            .match_query(Matcher::UrlEncoded("token".into(), "t0k3n".into()))
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded(
                "payload".into(),
                r#"{"attachments":[]}"#.into(),
            ))
            .with_body("ok")
            .create_async()
            .await;

        assert!(client(&srv).post_form(&form()).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_form_bad_response() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", HOOK_PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("no_service")
            .create_async()
            .await;

        let res = client(&srv).post_form(&form()).await;
        mock.assert_async().await;

        match res {
            Err(SlackError::BadResponse { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "no_service");
            }
            _ => panic!("expected a bad response"),
        }
    }

    #[tokio::test]
    async fn test_post_form_other_success_status_is_failure() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("POST", HOOK_PATH)
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let res = client(&srv).post_form(&form()).await;
        assert!(matches!(
            res,
            Err(SlackError::BadResponse { status: 204, .. })
        ));
    }

    #[tokio::test]
    async fn test_post_form_truncated_body_keeps_status() {
        use tokio::{
            io::{AsyncReadExt, AsyncWriteExt},
            net::TcpListener,
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Promise a longer body than we send, then hang up.
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();

            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !String::from_utf8_lossy(&req).contains("%7D") {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                req.extend_from_slice(&buf[..n]);
            }

            sock.write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
                .await
                .unwrap();
        });

        let url = Url::parse(&format!("http://{}{}", addr, HOOK_PATH)).unwrap();
        let res = WebhookClient::new(url).post_form(&form()).await;

        match res {
            Err(SlackError::BadResponse { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.is_empty());
            }
            _ => panic!("expected a bad response"),
        }
    }

    #[tokio::test]
    async fn test_post_form_unreachable() {
        // Nothing listens on port 1.
        let url = Url::parse("http://127.0.0.1:1/services/hooks/incoming-webhook").unwrap();

        let res = WebhookClient::new(url).post_form(&form()).await;
        assert!(matches!(res, Err(SlackError::RequestFailed(_))));
    }
}
