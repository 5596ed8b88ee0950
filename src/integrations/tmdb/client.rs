// src/integrations/tmdb/client.rs
//
// Remote Client - the single gateway to the movie metadata API
//
// ARCHITECTURE:
// - Wraps a `Transport` with the global interception policy
// - Busy indicator: counted, so overlapping calls keep it on until the last
//   one finishes (success, failure or cancellation)
// - Failures are classified (Network / Api / Decode), announced once as a
//   toast, then returned to the caller as a typed error
// - No retries
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Returns payloads; never writes to the application store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::events::{EventBus, NetworkActivityChanged, ToastRaised};
use crate::integrations::tmdb::transport::{
    HttpMethod, Transport, TransportRequest, TransportResponse,
};

const GENERIC_API_MESSAGE: &str = "Something went wrong!";

pub struct RemoteClient {
    transport: Arc<dyn Transport>,
    event_bus: Arc<EventBus>,
    in_flight: Arc<AtomicUsize>,
}

/// Keeps the busy counter balanced even if the request future is dropped
struct BusyGuard {
    in_flight: Arc<AtomicUsize>,
    event_bus: Arc<EventBus>,
}

impl BusyGuard {
    fn begin(in_flight: &Arc<AtomicUsize>, event_bus: &Arc<EventBus>) -> Self {
        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        if now == 1 {
            event_bus.emit(NetworkActivityChanged::new(true, now));
        }
        Self {
            in_flight: Arc::clone(in_flight),
            event_bus: Arc::clone(event_bus),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        if remaining == 0 {
            self.event_bus.emit(NetworkActivityChanged::new(false, 0));
        }
    }
}

impl RemoteClient {
    pub fn new(transport: Arc<dyn Transport>, event_bus: Arc<EventBus>) -> Self {
        Self {
            transport,
            event_bus,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests currently on the wire
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        self.execute(TransportRequest::get(path, query.to_vec())).await
    }

    /// GET and decode into `T`. A payload that does not match `T` is reported
    /// like any other failure.
    pub async fn get_json<T>(&self, path: &str, query: &[(String, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.get(path, query).await?;
        serde_json::from_value(value).map_err(|e| {
            let err = AppError::Decode(format!("{}: {}", path, e));
            self.report(&err);
            err
        })
    }

    pub async fn post(&self, path: &str, body: Value) -> AppResult<Value> {
        self.execute(self.write_request(HttpMethod::Post, path, Some(body)))
            .await
    }

    pub async fn put(&self, path: &str, body: Value) -> AppResult<Value> {
        self.execute(self.write_request(HttpMethod::Put, path, Some(body)))
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> AppResult<Value> {
        self.execute(self.write_request(HttpMethod::Patch, path, Some(body)))
            .await
    }

    pub async fn delete(&self, path: &str) -> AppResult<Value> {
        self.execute(self.write_request(HttpMethod::Delete, path, None))
            .await
    }

    fn write_request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> TransportRequest {
        TransportRequest {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body,
        }
    }

    // ========================================================================
    // INTERNAL: Interception
    // ========================================================================

    async fn execute(&self, request: TransportRequest) -> AppResult<Value> {
        let method = request.method;
        let path = request.path.clone();
        let started = Instant::now();

        info!("API Request: {} {}", method, path);

        let outcome = {
            let _busy = BusyGuard::begin(&self.in_flight, &self.event_bus);
            self.transport.send(request).await
        };

        let result = match outcome {
            Err(failure) => {
                error!("Network Error: {} {}: {}", method, path, failure);
                Err(AppError::Network(failure.message))
            }
            Ok(response) => {
                let elapsed = started.elapsed().as_millis();
                if response.is_success() {
                    info!("API Response: {} {} ({}ms)", method, path, elapsed);
                    parse_body(&response)
                } else {
                    let message = server_message(&response);
                    warn!("API Error: {} - {} ({}ms)", response.status, message, elapsed);
                    Err(AppError::Api {
                        status: response.status,
                        message,
                    })
                }
            }
        };

        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    fn report(&self, err: &AppError) {
        self.event_bus.emit(ToastRaised::error(err.user_message()));
    }
}

/// Empty bodies (e.g. 204) decode to `null`
fn parse_body(response: &TransportResponse) -> AppResult<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(AppError::from)
}

/// Server-supplied failure message, if any
fn server_message(response: &TransportResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["message", "status_message"]
                .iter()
                .find_map(|field| body.get(*field).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::tmdb::transport::{MockTransport, TransportError};
    use serde::Deserialize;
    use std::sync::Mutex;

    fn recorder(bus: &EventBus) -> (Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<bool>>>) {
        let toasts = Arc::new(Mutex::new(Vec::new()));
        let busy = Arc::new(Mutex::new(Vec::new()));

        let t = Arc::clone(&toasts);
        bus.subscribe::<ToastRaised, _>(move |e| t.lock().unwrap().push(e.title.clone()));
        let b = Arc::clone(&busy);
        bus.subscribe::<NetworkActivityChanged, _>(move |e| b.lock().unwrap().push(e.busy));

        (toasts, busy)
    }

    fn client_with(mock: MockTransport) -> (RemoteClient, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        (RemoteClient::new(Arc::new(mock), Arc::clone(&bus)), bus)
    }

    #[tokio::test]
    async fn test_successful_get_toggles_busy_once() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.path == "/3/genre/movie/list" && req.method == HttpMethod::Get)
            .times(1)
            .returning(|_| {
                Ok(TransportResponse {
                    status: 200,
                    body: r#"{"genres":[]}"#.to_string(),
                })
            });

        let (client, bus) = client_with(mock);
        let (toasts, busy) = recorder(&bus);

        let value = client.get("/3/genre/movie/list", &[]).await.unwrap();

        assert_eq!(value["genres"], serde_json::json!([]));
        assert_eq!(*busy.lock().unwrap(), vec![true, false]);
        assert!(toasts.lock().unwrap().is_empty());
        assert_eq!(client.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(TransportError::new("connection refused")));

        let (client, bus) = client_with(mock);
        let (toasts, busy) = recorder(&bus);

        let result = client.get("/3/movie/now_playing", &[]).await;

        assert_eq!(result, Err(AppError::Network("connection refused".into())));
        assert_eq!(*toasts.lock().unwrap(), vec!["Network Error!".to_string()]);
        assert_eq!(*busy.lock().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_api_error_carries_server_message() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|_| {
            Ok(TransportResponse {
                status: 401,
                body: r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key."}"#
                    .to_string(),
            })
        });

        let (client, bus) = client_with(mock);
        let (toasts, _) = recorder(&bus);

        let result = client.get("/3/movie/top_rated", &[]).await;

        assert_eq!(
            result,
            Err(AppError::Api {
                status: 401,
                message: "Invalid API key: You must be granted a valid key.".into()
            })
        );
        assert_eq!(toasts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_api_error_without_message_is_generic() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|_| {
            Ok(TransportResponse {
                status: 502,
                body: "<html>Bad Gateway</html>".to_string(),
            })
        });

        let (client, bus) = client_with(mock);
        let (toasts, _) = recorder(&bus);

        let result = client.get("/3/movie/upcoming", &[]).await;

        assert_eq!(
            result,
            Err(AppError::Api {
                status: 502,
                message: GENERIC_API_MESSAGE.into()
            })
        );
        assert_eq!(*toasts.lock().unwrap(), vec![GENERIC_API_MESSAGE.to_string()]);
    }

    #[derive(Debug, Deserialize)]
    struct NeedsId {
        #[allow(dead_code)]
        id: u64,
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|_| {
            Ok(TransportResponse {
                status: 200,
                body: r#"{"title":"no id"}"#.to_string(),
            })
        });

        let (client, bus) = client_with(mock);
        let (toasts, _) = recorder(&bus);

        let result: AppResult<NeedsId> = client.get_json("/3/movie/42", &[]).await;

        assert!(matches!(result, Err(AppError::Decode(_))));
        assert_eq!(toasts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_write_verbs_share_policy() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.method == HttpMethod::Delete && req.body.is_none())
            .times(1)
            .returning(|_| {
                Ok(TransportResponse {
                    status: 204,
                    body: String::new(),
                })
            });

        let (client, _bus) = client_with(mock);
        assert_eq!(client.delete("/3/list/1").await.unwrap(), Value::Null);
    }
}
