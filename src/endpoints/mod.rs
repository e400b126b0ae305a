mod index;
mod not_found;
mod ws;

pub use index::index;
pub use not_found::not_found;
pub use ws::handle_ws;
