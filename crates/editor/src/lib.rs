#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Editor core for the Lucien Markdown editor.
//!
//! The crate is split along the two cooperating sides of the application:
//!
//! - The host side owns the single open document ([`FileState`]) and gates
//!   every destructive action (open another file, new document, quit) behind
//!   the save/discard confirmation workflow run by [`Manager`].
//! - The display side keeps the source pane and the rendered preview aligned
//!   through a [`ScrollSyncGroup`].
//!
//! The two sides never share memory. They talk through the
//! [`protocol`] messages, carried by the channels owned by [`host`].
//!
//! ```text
//! display surface ──HostRequest──▶ Host ──▶ Manager ──▶ Storage / Prompt
//!        ▲                           │
//!        └──────DisplayMessage───────┘
//! ```

pub mod config;
/// Drag-and-drop classification of dropped paths.
pub mod drag_drop;
pub mod error;
pub mod file_state;
pub mod host;
pub mod manager;
/// Markdown to HTML preview rendering.
pub mod preview;
pub mod prompt;
pub mod protocol;
pub mod scroll_sync;
pub mod storage;
#[cfg(test)]
mod test_support;

pub use config::{Config, ConfigLoadReport};
pub use error::FileError;
pub use file_state::{FileState, UiState};
pub use host::{Host, HostExit, HostHandle};
pub use manager::{DiscardChoice, Manager, Resolution, SaveOutcome};
pub use prompt::Prompt;
pub use protocol::{DisplayMessage, HostRequest, MenuCommand};
pub use scroll_sync::{ScrollCommand, ScrollMetrics, ScrollOutcome, ScrollSyncGroup, SurfaceId};
pub use storage::{Storage, TokioStorage};

/// Application name shown in window titles and dialogs.
pub const APP_NAME: &str = "Lucien";
