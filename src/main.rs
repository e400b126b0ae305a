use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use futures::future::try_join;
use futures::TryFutureExt;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use log::{debug, info};
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::Mutex;

mod endpoints;
mod relay;
mod shared;
mod ws;

use endpoints::*;
use relay::registry::{run_broadcast, Registry};
use shared::types::*;

const LISTEN_ADDR: &str = "127.0.0.1:7778";

async fn request_router(
    req: Request<Body>,
    sender: Sender,
    registry: RegistryArc,
) -> Result<Response<Body>, Infallible> {
    debug!("request for {}", req.uri());
    let response = match req.uri().path() {
        "/" => index(),
        "/ws" => handle_ws(req, sender, registry),
        _ => not_found(),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let addr = LISTEN_ADDR.parse()?;

    let registry: RegistryArc = Arc::new(Mutex::new(Registry::new()));
    let (sender, receiver) = unbounded_channel();

    let broadcast_future = run_broadcast(receiver, registry.clone());

    let service = make_service_fn(move |_addr| {
        let registry = registry.clone();
        let sender = sender.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                request_router(req, sender.clone(), registry.clone())
            }))
        }
    });
    let server_future = Server::bind(&addr).serve(service).map_err(Into::into);

    info!("Server listening at http://{}/", addr);

    try_join(broadcast_future, server_future).await?;

    Ok(())
}
