//! Recording transport for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::protocol::{OutboundRequest, TransportResponse};

use super::Transport;

/// Records every request and replays queued responses in order.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<OutboundRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.responses.lock().push_back(Err(Error::transport(message)));
        self
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn last_request(&self) -> OutboundRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, "{}")))
    }
}
