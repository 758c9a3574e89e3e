use crate::core::dispatcher::Dispatcher;
use crate::core::response::build_response;
use crate::domain::model::{AddressRequest, WireResponse};
use crate::domain::ports::ReplyChannel;
use crate::utils::error::{Result, ServiceError};
use std::future::Future;
use std::time::Instant;

/// Consecutive receive/send failures tolerated before the channel is considered dead.
pub const MAX_CONSECUTIVE_TRANSPORT_FAILURES: u32 = 8;

async fn respond(dispatcher: &Dispatcher, raw: &[u8]) -> WireResponse {
    match AddressRequest::from_message(raw) {
        Ok(request) => build_response(&dispatcher.validate(&request).await),
        Err(e) => {
            tracing::debug!("Rejected request envelope: {}", e);
            WireResponse::from(e)
        }
    }
}

/// The request/reply loop. One message is handled at a time and each one gets exactly one
/// reply, whatever happens while handling it.
pub struct Listener<C: ReplyChannel> {
    channel: C,
    dispatcher: Dispatcher,
}

impl<C: ReplyChannel> Listener<C> {
    pub fn new(channel: C, dispatcher: Dispatcher) -> Self {
        Self {
            channel,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Produces the reply for one raw message.
    pub async fn respond(&self, raw: &[u8]) -> WireResponse {
        respond(&self.dispatcher, raw).await
    }

    /// Serves until the process is killed.
    pub async fn run(self) -> Result<u64> {
        self.run_until(std::future::pending()).await
    }

    /// Serves until `shutdown` resolves while waiting for a request. Returns the number of
    /// replies sent.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<u64>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut replies: u64 = 0;
        let mut failures: u32 = 0;

        loop {
            let received = tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down after {} replies", replies);
                    return Ok(replies);
                }
                received = self.channel.receive() => received,
            };

            let raw = match received {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Failed to receive request: {}", e);
                    failures = Self::note_failure(failures)?;
                    continue;
                }
            };

            let started = Instant::now();
            let response = respond(&self.dispatcher, &raw).await;
            let payload = response.to_json();

            match self.channel.reply(payload.clone()).await {
                Ok(()) => {
                    failures = 0;
                    replies += 1;
                    tracing::debug!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Sent: {}",
                        payload
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to send reply: {}", e);
                    failures = Self::note_failure(failures)?;
                }
            }
        }
    }

    fn note_failure(failures: u32) -> Result<u32> {
        let failures = failures + 1;
        if failures >= MAX_CONSECUTIVE_TRANSPORT_FAILURES {
            return Err(ServiceError::ChannelExhausted { failures });
        }
        Ok(failures)
    }
}
