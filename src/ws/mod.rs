pub mod frame;
pub mod handshake;
mod read;
mod write;

pub use read::read_frame;
pub use write::{encode_close_frame, encode_pong, encode_text};
