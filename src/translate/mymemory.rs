use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Translation, TranslateError, TranslationRequest, Translator, GENERIC_FAILURE};

const STATUS_OK: u16 = 200;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
    detected_language: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    response_status: Value,
    #[serde(default)]
    response_data: Option<ResponseData>,
    #[serde(default)]
    response_details: Option<Value>,
}

impl Response {
    // The live service sends the status as a number, but some error paths
    // send it as a string.
    fn status(&self) -> Option<u16> {
        match &self.response_status {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn details(&self) -> String {
        self.response_details
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|details| !details.is_empty())
            .unwrap_or(GENERIC_FAILURE)
            .to_string()
    }
}

#[derive(Clone)]
pub struct MyMemoryTranslate {
    client: reqwest::Client,
    endpoint: String,
    email: Option<String>,
}

impl MyMemoryTranslate {
    pub fn new(endpoint: &str, email: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            email: email.map(str::to_string),
        }
    }

    /// Full GET url. The text is percent-encoded, the language pair is sent as is.
    pub fn request_url(&self, request: &TranslationRequest) -> String {
        let mut url = format!(
            "{}?q={}&langpair={}",
            self.endpoint,
            urlencoding::encode(&request.text),
            request.language_pair()
        );
        if let Some(email) = &self.email {
            url.push_str("&de=");
            url.push_str(&urlencoding::encode(email));
        }
        url
    }
}

/// Turns a response body into a translation or the service's own error.
pub(super) fn parse_body(body: &str) -> Result<Translation, TranslateError> {
    let res = serde_json::from_str::<Response>(body)?;
    if res.status() != Some(STATUS_OK) {
        return Err(TranslateError::Upstream(res.details()));
    }

    let data = res.response_data.unwrap_or_default();
    let text = match data.translated_text {
        Some(text) => text,
        None => return Err(TranslateError::Upstream(GENERIC_FAILURE.to_string())),
    };
    let detected_language = data
        .detected_language
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    Ok(Translation {
        text,
        detected_language,
    })
}

#[async_trait]
impl Translator for MyMemoryTranslate {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        let url = self.request_url(request);
        debug!("GET {}", url);

        let res = self.client.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(TranslateError::Http(status.as_u16()));
        }

        let body = res.text().await?;
        parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::languages::Language;

    fn request(text: &str, source: Language, target: Language) -> TranslationRequest {
        TranslationRequest {
            text: text.to_string(),
            source,
            target,
        }
    }

    #[test]
    fn url_encodes_text_and_autodetect_pair() {
        let client = MyMemoryTranslate::new("https://api.mymemory.translated.net/get", None);
        let url = client.request_url(&request(
            "hello world & more",
            Language::Auto,
            Language::code("fr"),
        ));
        assert_eq!(
            url,
            "https://api.mymemory.translated.net/get?q=hello%20world%20%26%20more&langpair=autodetect|fr"
        );
    }

    #[test]
    fn url_carries_contact_email() {
        let client = MyMemoryTranslate::new("http://localhost/get", Some("me+tl@example.com"));
        let url = client.request_url(&request("hi", Language::code("en"), Language::code("de")));
        assert_eq!(
            url,
            "http://localhost/get?q=hi&langpair=en|de&de=me%2Btl%40example.com"
        );
    }

    #[test]
    fn parses_successful_body() {
        let body = r#"{"responseStatus":200,"responseData":{"translatedText":"hola","detectedLanguage":"en"},"responseDetails":""}"#;
        let translation = parse_body(body).expect("success");
        assert_eq!(translation.text, "hola");
        assert_eq!(translation.detected_language.as_deref(), Some("en"));
    }

    #[test]
    fn missing_detection_is_none() {
        let body = r#"{"responseStatus":200,"responseData":{"translatedText":"bonjour","detectedLanguage":null}}"#;
        let translation = parse_body(body).expect("success");
        assert_eq!(translation.text, "bonjour");
        assert!(translation.detected_language.is_none());
    }

    #[test]
    fn upstream_failure_uses_details() {
        let body = r#"{"responseStatus":"403","responseData":{"translatedText":"INVALID LANGUAGE PAIR"},"responseDetails":"INVALID LANGUAGE PAIR SPECIFIED"}"#;
        match parse_body(body) {
            Err(TranslateError::Upstream(message)) => {
                assert_eq!(message, "INVALID LANGUAGE PAIR SPECIFIED")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn upstream_failure_without_details_is_generic() {
        let body = r#"{"responseStatus":429,"responseData":null}"#;
        match parse_body(body) {
            Err(TranslateError::Upstream(message)) => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn garbage_body_is_parse_error() {
        assert!(matches!(
            parse_body("<html>busy</html>"),
            Err(TranslateError::ParseFailed(_))
        ));
    }

    // Answers a single request and hands back its request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let endpoint = format!("http://{}/get", listener.local_addr().expect("addr"));
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.expect("write");
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&head)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (endpoint, server)
    }

    #[tokio::test]
    async fn translate_returns_service_result() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"responseStatus":200,"responseData":{"translatedText":"hola","detectedLanguage":"en"}}"#,
        )
        .await;
        let client = MyMemoryTranslate::new(&endpoint, None);

        let translation = client
            .translate(&request("hello world", Language::Auto, Language::code("es")))
            .await
            .expect("translation");
        assert_eq!(
            translation,
            Translation {
                text: "hola".to_string(),
                detected_language: Some("en".to_string()),
            }
        );
        assert_eq!(
            server.await.expect("server"),
            "GET /get?q=hello%20world&langpair=autodetect|es HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn translate_reports_http_status() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "busy").await;
        let client = MyMemoryTranslate::new(&endpoint, None);

        let result = client
            .translate(&request("hello", Language::code("en"), Language::code("fr")))
            .await;
        assert!(matches!(result, Err(TranslateError::Http(503))));
        assert_eq!(
            server.await.expect("server"),
            "GET /get?q=hello&langpair=en|fr HTTP/1.1"
        );
    }

    #[test]
    fn http_error_message_names_status() {
        assert_eq!(TranslateError::Http(503).to_string(), "Network error: 503");
    }
}
