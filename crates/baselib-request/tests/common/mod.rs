//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use baselib_request::{
    BoxStream, HttpClient, HttpRequest, HttpResponse, TransportError, TransportErrorKind,
};
use bytes::Bytes;
use tokio::sync::mpsc;

/// What the mock answers for one request.
pub enum Reply {
    /// A response whose body is delivered as the given chunks.
    Body { status: u16, chunks: Vec<Bytes> },
    /// A response whose body chunks are fed by the test through a channel.
    Stream {
        status: u16,
        chunks: mpsc::UnboundedReceiver<Result<Bytes, TransportError>>,
    },
    /// The request itself fails.
    Fail(TransportError),
}

pub fn respond_json(status: u16, body: serde_json::Value) -> Reply {
    Reply::Body {
        status,
        chunks: vec![Bytes::from(serde_json::to_vec(&body).unwrap())],
    }
}

pub fn respond_raw(status: u16, body: &'static str) -> Reply {
    Reply::Body {
        status,
        chunks: vec![Bytes::from_static(body.as_bytes())],
    }
}

pub fn chunks<I, B>(status: u16, parts: I) -> Reply
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    Reply::Body {
        status,
        chunks: parts
            .into_iter()
            .map(|part| Bytes::copy_from_slice(part.as_ref()))
            .collect(),
    }
}

/// A body fed from the returned sender; dropping the sender ends the stream.
pub fn channel(status: u16) -> (Reply, mpsc::UnboundedSender<Result<Bytes, TransportError>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Reply::Stream { status, chunks: rx }, tx)
}

/// Transport answering each URL from a queue of scripted replies.
///
/// A URL with no reply left fails like an unreachable server.
#[derive(Default)]
pub struct MockClient {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, url: &str, reply: Reply) -> Self {
        self.push(url, reply);
        self
    }

    pub fn push(&self, url: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_owned())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&request.url)
            .and_then(VecDeque::pop_front);
        self.requests.lock().unwrap().push(request);

        match reply {
            None => Err(TransportError::new(
                TransportErrorKind::Connect,
                "Failed to fetch",
            )),
            Some(Reply::Body { status, chunks }) => {
                let body: BoxStream<'static, Result<Bytes, TransportError>> =
                    Box::pin(futures_util::stream::iter(chunks.into_iter().map(Ok)));
                Ok(HttpResponse::new(status, body))
            }
            Some(Reply::Stream { status, chunks }) => {
                let body: BoxStream<'static, Result<Bytes, TransportError>> =
                    Box::pin(futures_util::stream::unfold(chunks, |mut rx| async move {
                        rx.recv().await.map(|item| (item, rx))
                    }));
                Ok(HttpResponse::new(status, body))
            }
            Some(Reply::Fail(error)) => Err(error),
        }
    }
}
