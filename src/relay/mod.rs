pub mod event;
pub mod registry;
