use async_trait::async_trait;
use pinmap_core::{CreatedPin, Error, NewPin, Pin, PinService, Result, ServerConfig};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use std::time::Duration;

/// Path of the pin listing endpoint, relative to the base URL.
const GET_PINS_PATH: &str = "api/get_pins";
/// Path of the pin creation endpoint, relative to the base URL.
const ADD_PIN_PATH: &str = "api/add_pin";

/// Pin service backed by the pin server's HTTP API.
pub struct HttpPinService {
    /// HTTP client for API requests.
    client: Client,
    /// Base URL, always ending with `/`.
    base_url: Url,
}

impl HttpPinService {
    /// Creates a client for the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the client cannot be built.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut raw = config.base_url.trim().to_owned();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|err| Error::Config(format!("Invalid server URL {raw}: {err}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Resolves an API path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::Other(format!("Failed to build URL for {path}: {err}")))
    }

    /// Turns a non-success status into [`Error::Rejected`].
    async fn check_status(response: Response, endpoint: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_owned());
        tracing::warn!("{endpoint} answered {status}: {body}");
        Err(Error::Rejected {
            status: status.as_u16(),
        })
    }
}

/// Builds the multipart body for a new pin.
fn pin_form(pin: NewPin) -> Result<Form> {
    let mut form = Form::new()
        .text("name", pin.name)
        .text("lat", pin.location.lat.to_string())
        .text("lng", pin.location.lng.to_string());

    if let Some(image) = pin.image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(image.mime_type)?;
        form = form.part("image", part);
    }

    Ok(form)
}

#[async_trait]
impl PinService for HttpPinService {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list_pins(&self) -> Result<Vec<Pin>> {
        let url = self.endpoint(GET_PINS_PATH)?;
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response, GET_PINS_PATH).await?;
        let body = response.text().await?;
        let pins: Vec<Pin> = serde_json::from_str(&body)?;

        tracing::info!("Fetched {} pins", pins.len());
        Ok(pins)
    }

    async fn add_pin(&self, pin: NewPin) -> Result<Option<CreatedPin>> {
        let url = self.endpoint(ADD_PIN_PATH)?;
        tracing::info!(
            "POST {url} name={:?} lat={} lng={} image={}",
            pin.name,
            pin.location.lat,
            pin.location.lng,
            pin.image
                .as_ref()
                .map_or("none", |image| image.file_name.as_str())
        );

        let form = pin_form(pin)?;
        let response = self.client.post(url).multipart(form).send().await?;
        let response = Self::check_status(response, ADD_PIN_PATH).await?;

        let body = response.text().await?;
        match serde_json::from_str::<CreatedPin>(&body) {
            Ok(created) => Ok(Some(created)),
            Err(err) => {
                tracing::debug!("add_pin answer carried no pin: {err}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_core::{ImageAttachment, LatLng};
    use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Reads one HTTP request (headers and body) from the stream.
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 4096];
        loop {
            let read = stream.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let Some(header_end) = buffer.windows(4).position(|window| window == b"\r\n\r\n")
            else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            if headers.contains("transfer-encoding: chunked") {
                if buffer.ends_with(b"0\r\n\r\n") {
                    break;
                }
                continue;
            }
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Serves exactly one request with a canned answer and hands back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });

        (format!("http://{address}"), handle)
    }

    fn service(base_url: String) -> HttpPinService {
        HttpPinService::new(&ServerConfig {
            base_url,
            timeout_seconds: 5,
        })
        .unwrap()
    }

    fn new_pin(image: Option<ImageAttachment>) -> NewPin {
        NewPin {
            name: "Vishnupad".to_owned(),
            location: LatLng::new(24.7663, 85.0089),
            image,
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let svc = service("http://pins.example.org/gaya".to_owned());
        assert_eq!(
            svc.endpoint(GET_PINS_PATH).unwrap().as_str(),
            "http://pins.example.org/gaya/api/get_pins"
        );

        let svc = service("http://pins.example.org/".to_owned());
        assert_eq!(
            svc.endpoint(ADD_PIN_PATH).unwrap().as_str(),
            "http://pins.example.org/api/add_pin"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpPinService::new(&ServerConfig {
            base_url: "::not a url::".to_owned(),
            timeout_seconds: 5,
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_list_pins_parses_array() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"name":"Temple","lat":24.69,"lng":84.99,"author":"asha","image_url":null},
                {"name":"Ghat","lat":24.8,"lng":85.0,"author":"ravi","image_url":"/static/uploads/ghat.jpg"}]"#,
        )
        .await;

        let pins = service(base).list_pins().await.unwrap();
        assert_eq!(pins.len(), 2);
        assert_eq!(pins[0].name, "Temple");
        assert_eq!(pins[1].image_url.as_deref(), Some("/static/uploads/ghat.jpg"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/get_pins HTTP/1.1"), "{request}");
    }

    #[tokio::test]
    async fn test_list_pins_empty() {
        let (base, server) = serve_once("200 OK", "[]").await;
        let pins = service(base).list_pins().await.unwrap();
        assert!(pins.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_pins_invalid_json() {
        let (base, server) = serve_once("200 OK", "<html>login</html>").await;
        let result = service(base).list_pins().await;
        assert!(matches!(result, Err(Error::Json(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_pins_server_error() {
        let (base, server) = serve_once("500 Internal Server Error", "{}").await;
        let result = service(base).list_pins().await;
        assert!(matches!(result, Err(Error::Rejected { status: 500 })));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_add_pin_sends_multipart_with_image() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"message":"Pin added!","pin":{"name":"Vishnupad","lat":24.7663,"lng":85.0089,"author":"asha","image_url":"/static/uploads/steps.png"}}"#,
        )
        .await;

        let image = ImageAttachment {
            file_name: "steps.png".to_owned(),
            mime_type: "image/png",
            bytes: b"PNGDATA".to_vec(),
        };
        let created = service(base).add_pin(new_pin(Some(image))).await.unwrap();
        let created = created.expect("Server answer should carry the pin");
        assert_eq!(created.pin.author, "asha");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/add_pin HTTP/1.1"), "{request}");
        assert!(request.to_lowercase().contains("content-type: multipart/form-data"));
        assert!(request.contains("name=\"name\""));
        assert!(request.contains("Vishnupad"));
        assert!(request.contains("name=\"lat\""));
        assert!(request.contains("24.7663"));
        assert!(request.contains("name=\"lng\""));
        assert!(request.contains("85.0089"));
        assert!(request.contains("name=\"image\"; filename=\"steps.png\""));
        assert!(request.contains("PNGDATA"));
    }

    #[tokio::test]
    async fn test_add_pin_without_image_omits_part() {
        let (base, server) = serve_once("200 OK", r#"{"message":"Pin added!"}"#).await;

        let created = service(base).add_pin(new_pin(None)).await.unwrap();
        assert!(created.is_none(), "Body without pin should yield None");

        let request = server.await.unwrap();
        assert!(request.contains("name=\"name\""));
        assert!(!request.contains("name=\"image\""));
    }

    #[tokio::test]
    async fn test_add_pin_rejected() {
        let (base, server) = serve_once("400 Bad Request", r#"{"error":"Missing data"}"#).await;
        let result = service(base).add_pin(new_pin(None)).await;
        assert!(matches!(result, Err(Error::Rejected { status: 400 })));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let result = service(format!("http://{address}")).list_pins().await;
        let error = result.expect_err("Closed port should fail");
        assert!(error.is_network(), "Unexpected error: {error}");
    }
}
