//! Executes API requests off the UI thread.
//!
//! The UI pushes [`ApiCommand`]s with `try_send`; the worker spawns one task
//! per command and posts the outcome back as [`AppEvent::Api`].

use std::sync::mpsc::Sender;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::api::{ApiRequest, InventoryClient};
use crate::ui::events::{ApiOutcome, AppEvent};
use crate::ui::request::RequestToken;

const COMMAND_BUFFER: usize = 16;

#[derive(Debug)]
pub struct ApiCommand {
    pub token: RequestToken,
    pub request: ApiRequest,
}

pub type ApiCommandSender = mpsc::Sender<ApiCommand>;

pub fn spawn_api_worker(
    handle: &Handle,
    client: InventoryClient,
    events: Sender<AppEvent>,
) -> ApiCommandSender {
    let (sender, mut receiver) = mpsc::channel::<ApiCommand>(COMMAND_BUFFER);

    handle.spawn(async move {
        while let Some(ApiCommand { token, request }) = receiver.recv().await {
            let client = client.clone();
            let events = events.clone();
            tokio::spawn(async move {
                tracing::debug!(request = request.name(), seq = token.seq(), "api call");
                let result = request.execute(&client).await;
                if let Err(err) = &result {
                    tracing::warn!(request = request.name(), error = %err, "api call failed");
                }
                // Receiver gone means the UI is shutting down.
                let _ = events.send(AppEvent::Api(ApiOutcome {
                    token,
                    request,
                    result,
                }));
            });
        }
        tracing::debug!("api worker stopped");
    });

    sender
}
