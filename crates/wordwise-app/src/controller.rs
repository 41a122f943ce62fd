use std::collections::BTreeMap;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wordwise_types::{AppEvent, AppResponse};

use crate::events::event_loop;
use crate::state::AppState;

#[derive(Debug)]
pub struct Request {
    pub id: u64,
    pub event: AppEvent,
}

#[derive(Debug)]
pub struct Reply {
    pub id: u64,
    pub response: AppResponse,
}

/// Centralized channel management
pub struct ChannelSet {
    pub requests: (AsyncSender<Request>, AsyncReceiver<Request>),
    pub replies: (AsyncSender<Reply>, AsyncReceiver<Reply>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            requests: kanal::bounded_async(64),
            replies: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.requests.1.clone(),
            self.channels.replies.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Send every event, then wait for all replies; responses come back in event order
    pub async fn dispatch(&self, events: Vec<AppEvent>) -> anyhow::Result<Vec<AppResponse>> {
        let expected = events.len();
        let sender = self.channels.requests.0.clone();

        // Sending runs alongside the reply loop so a full channel cannot stall it
        let send_all = tokio::spawn(async move {
            for (id, event) in (0u64..).zip(events) {
                sender.send(Request { id, event }).await?;
            }
            anyhow::Ok(())
        });

        let mut responses = BTreeMap::new();
        while responses.len() < expected {
            let reply = self.channels.replies.1.recv().await?;
            responses.insert(reply.id, reply.response);
        }

        send_all.await??;
        Ok(responses.into_values().collect())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
