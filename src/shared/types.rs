use std::sync::Arc;

use hyper::upgrade::Upgraded;
use tokio::io::WriteHalf;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;

use crate::relay::event::WireEvent;
use crate::relay::registry::Registry;

pub type Receiver = UnboundedReceiver<WireEvent>;
pub type Sender = UnboundedSender<WireEvent>;
pub type SharedRegistry<W> = Arc<Mutex<Registry<W>>>;
pub type RegistryArc = SharedRegistry<WriteHalf<Upgraded>>;
