use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// In-process stand-in for the CRM API.
///
/// Answers every request with a canned status and body while counting hits
/// and recording what was sent, so tests can assert both passthrough
/// behavior and the zero-outbound-calls properties.
pub struct MockCrm {
    pub base_url: url::Url,
    pub hits: Arc<AtomicUsize>,
    pub requests: Arc<std::sync::Mutex<Vec<RecordedRequest>>>,
}

impl MockCrm {
    pub fn hit_count(&self) -> usize {
        self.hits.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

pub async fn start_mock_crm(status: StatusCode, body: &'static str) -> MockCrm {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock CRM");
    let port = listener.local_addr().unwrap().port();

    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(std::sync::Mutex::new(Vec::new()));

    let task_hits = hits.clone();
    let task_requests = requests.clone();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let io = TokioIo::new(stream);
            let hits = task_hits.clone();
            let requests = task_requests.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                    let hits = hits.clone();
                    let requests = requests.clone();
                    async move {
                        use http_body_util::BodyExt;

                        hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

                        let method = req.method().to_string();
                        let path = req.uri().path().to_string();
                        let body_bytes = req
                            .into_body()
                            .collect()
                            .await
                            .map(|c| c.to_bytes())
                            .unwrap_or_default();
                        requests.lock().unwrap().push(RecordedRequest {
                            method,
                            path,
                            body: String::from_utf8_lossy(&body_bytes).to_string(),
                        });

                        let mut response =
                            Response::new(http_body_util::Full::new(hyper::body::Bytes::from(
                                body,
                            )));
                        *response.status_mut() = status;
                        Ok::<_, Infallible>(response)
                    }
                });

                let _ = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                    .serve_connection(io, service)
                    .await;
            });
        }
    });

    MockCrm {
        base_url: url::Url::parse(&format!("http://127.0.0.1:{port}")).unwrap(),
        hits,
        requests,
    }
}
