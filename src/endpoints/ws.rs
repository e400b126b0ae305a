use anyhow::Result;
use hyper::header::{HeaderValue, CONNECTION, SEC_WEBSOCKET_ACCEPT, SEC_WEBSOCKET_KEY, UPGRADE};
use hyper::upgrade::Upgraded;
use hyper::{Body, Request, Response, StatusCode};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::relay::event::WireEvent;
use crate::relay::registry::ClientId;
use crate::shared::types::{RegistryArc, Sender, SharedRegistry};
use crate::ws::{self, frame::Opcode};

/// Decodes a text frame payload and queues it for broadcast. Payloads
/// that don't parse as a known event are logged and dropped, the
/// connection stays up.
fn relay_event(id: ClientId, payload: &[u8], sender: &Sender) -> Result<()> {
    let event = match WireEvent::decode(payload) {
        Ok(event) => event,
        Err(e) => {
            debug!("client {} sent an unreadable message: {}", id, e);
            return Ok(());
        }
    };
    match &event {
        WireEvent::MouseDown { pos } => info!("client {} clicked [{},{}]", id, pos[0], pos[1]),
        WireEvent::MouseUp => info!("client {} released mouse", id),
    }
    sender.send(event)?;
    Ok(())
}

async fn read_events<R, W>(
    reader: &mut R,
    id: ClientId,
    sender: &Sender,
    registry: &SharedRegistry<W>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let frame = ws::read_frame(reader).await?;
        match frame.opcode {
            Opcode::Text => relay_event(id, &frame.payload, sender)?,
            Opcode::Ping => {
                let pong = ws::encode_pong(&frame.payload);
                registry.lock().await.send_to(id, &pong).await;
            }
            Opcode::Close => {
                let close = ws::encode_close_frame();
                registry.lock().await.send_to(id, &close).await;
                return Ok(());
            }
            other => debug!("ignoring {:?} frame from client {}", other, id),
        }
    }
}

async fn handle_connection(upgraded: Upgraded, sender: Sender, registry: RegistryArc) -> Result<()> {
    let id = ClientId::new();
    let (mut reader, writer) = tokio::io::split(upgraded);

    registry.lock().await.register(id, writer);
    info!("client {} connected", id);

    let result = read_events(&mut reader, id, &sender, &registry).await;

    registry.lock().await.unregister(id);
    info!("client {} disconnected", id);

    result
}

fn bad_request() -> Response<Body> {
    let mut response = Response::new(Body::from("Bad request"));
    *response.status_mut() = StatusCode::BAD_REQUEST;
    response
}

pub fn handle_ws(mut req: Request<Body>, sender: Sender, registry: RegistryArc) -> Response<Body> {
    debug!("ws incoming connection");
    let sec_key = match req.headers().get(SEC_WEBSOCKET_KEY) {
        Some(value) => value,
        None => {
            debug!("upgrade request without sec-websocket-key");
            return bad_request();
        }
    };
    let sec_accept = ws::handshake::accept_key(sec_key.as_bytes());
    let accept_value = match HeaderValue::from_str(&sec_accept) {
        Ok(value) => value,
        Err(e) => {
            warn!("bad accept key value: {}", e);
            return bad_request();
        }
    };

    tokio::spawn(async move {
        match hyper::upgrade::on(&mut req).await {
            Ok(upgraded) => {
                if let Err(e) = handle_connection(upgraded, sender, registry).await {
                    warn!("error handling upgraded connection: {}", e);
                }
            }
            Err(e) => warn!("upgrade error: {}", e),
        }
    });

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::SWITCHING_PROTOCOLS;
    let headers = response.headers_mut();
    headers.insert(UPGRADE, HeaderValue::from_static("websocket"));
    headers.insert(CONNECTION, HeaderValue::from_static("upgrade"));
    headers.insert(SEC_WEBSOCKET_ACCEPT, accept_value);
    response
}
