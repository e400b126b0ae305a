use std::collections::HashMap;
use std::fmt;

use anyhow::Result;
use log::{debug, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use uuid::Uuid;

use crate::shared::types::{Receiver, SharedRegistry};
use crate::ws;

/// Server-assigned connection identifier, logged in simple form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        ClientId(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_simple())
    }
}

/// Active connections. Every entry corresponds to exactly one live
/// connection, keyed by its id and holding the write half.
pub struct Registry<W> {
    clients: HashMap<ClientId, W>,
}

impl<W: AsyncWrite + Unpin> Registry<W> {
    pub fn new() -> Self {
        Registry {
            clients: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: ClientId, writer: W) {
        self.clients.insert(id, writer);
    }

    pub fn unregister(&mut self, id: ClientId) -> Option<W> {
        self.clients.remove(&id)
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Writes a buffer to every connected client, the sender included.
    /// A failed write is logged and skipped so the rest still get it;
    /// failures are never surfaced to the caller.
    pub async fn broadcast_all(&mut self, buffer: &[u8]) {
        for (id, writer) in self.clients.iter_mut() {
            if let Err(e) = writer.write_all(buffer).await {
                warn!("failed to send to client {}: {}", id, e);
            }
        }
    }

    /// Writes a buffer to a single client.
    pub async fn send_to(&mut self, id: ClientId, buffer: &[u8]) {
        match self.clients.get_mut(&id) {
            Some(writer) => {
                if let Err(e) = writer.write_all(buffer).await {
                    warn!("failed to send to client {}: {}", id, e);
                }
            }
            None => debug!("can't send, client {} not found", id),
        }
    }
}

/// Drains the relay channel, fanning each event out to every client.
/// Events are written in the order they were queued; the loop ends when
/// the last sender is dropped.
pub async fn run_broadcast<W: AsyncWrite + Unpin>(
    mut receiver: Receiver,
    registry: SharedRegistry<W>,
) -> Result<()> {
    while let Some(event) = receiver.recv().await {
        let buffer = ws::encode_text(&event.encode()?);
        let mut registry = registry.lock().await;
        debug!("broadcasting {:?} to {} clients", event, registry.len());
        registry.broadcast_all(&buffer).await;
    }

    debug!("relay channel closed, stopping broadcasts");

    Ok(())
}
