//! Query Dispatcher
//!
//! Runs submitted requests against a [`QueryService`] off the UI task and
//! hands the outcomes back through a channel. The surface's event loop pulls
//! [`Completion`]s out and feeds them to [`QueryPanel::resolve`], so every
//! state change still happens in one place.
//!
//! [`QueryPanel::resolve`]: crate::panel::QueryPanel::resolve

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::service::QueryService;
use crate::state::{Completion, QueryRequest};

/// Completion channel capacity
const CHANNEL_CAPACITY: usize = 16;

/// Spawns service calls and collects their completions
pub struct QueryDispatcher<S: QueryService + 'static> {
    /// The service answering queries
    service: Arc<S>,
    /// Sender cloned into each spawned call
    tx: mpsc::Sender<Completion>,
    /// Receiver drained by the event loop
    rx: mpsc::Receiver<Completion>,
}

impl<S: QueryService + 'static> QueryDispatcher<S> {
    /// Create a dispatcher for a service
    pub fn new(service: S) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            service: Arc::new(service),
            tx,
            rx,
        }
    }

    /// Shared handle to the service
    #[must_use]
    pub fn service(&self) -> Arc<S> {
        Arc::clone(&self.service)
    }

    /// Run a request in the background
    ///
    /// The service is called exactly once. There is no cancellation: the call
    /// runs to completion even if nobody is listening anymore.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, request: QueryRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();

        debug!(request_id = %request.id, service = service.name(), "Dispatching query");

        tokio::spawn(async move {
            let QueryRequest { id, query } = request;
            let outcome = service.query(&query).await;

            if tx.send(Completion { id, outcome }).await.is_err() {
                warn!(request_id = %id, "Completion dropped, dispatcher is gone");
            }
        });
    }

    /// Wait for the next completion
    pub async fn recv(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Drain all completions that are ready now
    pub fn try_recv_all(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            completions.push(completion);
        }
        completions
    }
}
