//! Host integration: collaborators, panel protocol, and command dispatch.

mod collaborators;
mod dispatch;
mod protocol;

pub use collaborators::{FilePicker, Notifier, PickRequest};
pub use dispatch::{CommandOutcome, Host};
pub use protocol::PanelCommand;
