#![allow(dead_code)]

use std::{
  collections::HashMap,
  net::SocketAddr,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
  time::Duration,
};

use axum::{
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, put},
  Router,
};
use instance_info::imds;
use tokio::net::TcpListener;

pub const TOKEN: &str = "AQAEAMockSessionToken==";

/// Per-call timeout used by test clients; `Reply::Delay` sleeps well past it
pub const TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub enum Reply {
  Body(String),
  Status(StatusCode),
  Delay(Duration),
}

impl Reply {
  pub fn body(value: &str) -> Self {
    Self::Body(value.to_owned())
  }

  async fn respond(&self) -> Response {
    match self {
      Reply::Body(body) => body.clone().into_response(),
      Reply::Status(status) => (*status, "mock failure").into_response(),
      Reply::Delay(delay) => {
        tokio::time::sleep(*delay).await;
        "too late".into_response()
      }
    }
  }
}

/// In-process stand-in for the EC2 instance metadata service
#[derive(Debug)]
pub struct MockImds {
  token: Reply,
  fields: HashMap<String, Reply>,
  token_requests: AtomicUsize,
  metadata_requests: AtomicUsize,
  token_ttl: Mutex<Option<String>>,
}

impl MockImds {
  /// Metadata of a typical instance in us-east-1 with a public address
  pub fn ec2() -> Self {
    Self {
      token: Reply::body(TOKEN),
      fields: HashMap::new(),
      token_requests: AtomicUsize::new(0),
      metadata_requests: AtomicUsize::new(0),
      token_ttl: Mutex::new(None),
    }
    .field("instance-id", Reply::body("i-0123456789abcdef0"))
    .field("public-ipv4", Reply::body("54.210.10.20"))
    .field("local-ipv4", Reply::body("10.0.1.25"))
    .field("placement/availability-zone", Reply::body("us-east-1a"))
    .field("placement/region", Reply::body("us-east-1"))
    .field("instance-type", Reply::body("t3.micro"))
  }

  pub fn token(mut self, reply: Reply) -> Self {
    self.token = reply;
    self
  }

  pub fn field(mut self, path: &str, reply: Reply) -> Self {
    self.fields.insert(path.to_owned(), reply);
    self
  }

  pub fn without(mut self, path: &str) -> Self {
    self.fields.remove(path);
    self
  }

  pub fn token_requests(&self) -> usize {
    self.token_requests.load(Ordering::SeqCst)
  }

  pub fn metadata_requests(&self) -> usize {
    self.metadata_requests.load(Ordering::SeqCst)
  }

  /// Value of the TTL header sent with the last token request
  pub fn token_ttl(&self) -> Option<String> {
    self.token_ttl.lock().unwrap().clone()
  }

  /// Serve the mock on an ephemeral local port
  pub async fn start(self) -> (Arc<Self>, SocketAddr) {
    let mock = Arc::new(self);
    let app = Router::new()
      .route(imds::TOKEN_PATH, put(token))
      .route("/latest/meta-data/*path", get(metadata))
      .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (mock, addr)
  }
}

async fn token(State(mock): State<Arc<MockImds>>, headers: HeaderMap) -> Response {
  mock.token_requests.fetch_add(1, Ordering::SeqCst);
  *mock.token_ttl.lock().unwrap() = headers
    .get(imds::TOKEN_TTL_HEADER)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);

  mock.token.respond().await
}

async fn metadata(State(mock): State<Arc<MockImds>>, Path(path): Path<String>, headers: HeaderMap) -> Response {
  mock.metadata_requests.fetch_add(1, Ordering::SeqCst);

  let token = headers.get(imds::TOKEN_HEADER).and_then(|v| v.to_str().ok());
  if token != Some(TOKEN) {
    return StatusCode::UNAUTHORIZED.into_response();
  }

  match mock.fields.get(&path) {
    Some(reply) => reply.respond().await,
    None => StatusCode::NOT_FOUND.into_response(),
  }
}

/// Client pointed at a mock started with [`MockImds::start`]
pub fn client(addr: SocketAddr) -> imds::Client {
  imds::Client::builder()
    .endpoint(format!("http://{addr}"))
    .timeout(TIMEOUT)
    .build()
    .unwrap()
}

/// Address that refuses connections
pub async fn closed_addr() -> SocketAddr {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  listener.local_addr().unwrap()
}
