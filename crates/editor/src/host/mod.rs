//! The privileged side of the editor.
//!
//! [`Host`] owns the [`Manager`] and serves [`HostRequest`]s one at a time
//! from an unbounded channel, so every document mutation happens in the
//! order the display surface issued it. Replies travel back as
//! [`DisplayMessage`]s. The display side only ever holds a [`HostHandle`].

use std::ops::ControlFlow;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::manager::Manager;
use crate::prompt::Prompt;
use crate::protocol::{DisplayMessage, HostRequest, MenuCommand};
use crate::storage::Storage;

#[cfg(test)]
mod tests;

/// Why [`Host::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostExit {
	/// Quitting was confirmed.
	Quit,
	/// The display surface went away.
	Disconnected,
}

/// Serves display requests against the open document.
pub struct Host<S, P> {
	manager: Manager<S, P>,
	requests: mpsc::UnboundedReceiver<HostRequest>,
	display: mpsc::UnboundedSender<DisplayMessage>,
}

/// The display surface's end of the host channel.
#[derive(Debug)]
pub struct HostHandle {
	requests: mpsc::UnboundedSender<HostRequest>,
	messages: mpsc::UnboundedReceiver<DisplayMessage>,
}

impl HostHandle {
	/// Queues `request`; returns `false` once the host has stopped.
	pub fn send(&self, request: HostRequest) -> bool {
		self.requests.send(request).is_ok()
	}

	/// Whether the host is still serving requests.
	pub fn is_connected(&self) -> bool {
		!self.requests.is_closed()
	}

	/// Next pending message, if any, without waiting.
	pub fn try_recv(&mut self) -> Option<DisplayMessage> {
		self.messages.try_recv().ok()
	}

	/// Waits for the next message; `None` once the host has stopped.
	pub async fn recv(&mut self) -> Option<DisplayMessage> {
		self.messages.recv().await
	}

	/// Drains every pending message, oldest first.
	pub fn drain(&mut self) -> Vec<DisplayMessage> {
		std::iter::from_fn(|| self.try_recv()).collect()
	}
}

impl<S: Storage, P: Prompt> Host<S, P> {
	/// Connects `manager` to a new display channel.
	pub fn new(manager: Manager<S, P>) -> (Self, HostHandle) {
		let (request_tx, request_rx) = mpsc::unbounded_channel();
		let (display_tx, display_rx) = mpsc::unbounded_channel();

		let host = Self {
			manager,
			requests: request_rx,
			display: display_tx,
		};
		let handle = HostHandle {
			requests: request_tx,
			messages: display_rx,
		};
		(host, handle)
	}

	pub fn manager(&self) -> &Manager<S, P> {
		&self.manager
	}

	/// Serves requests until quitting is confirmed or the display disconnects.
	///
	/// `initial` is opened before the first request, as if it had been passed
	/// on the command line.
	pub async fn run(mut self, initial: Option<PathBuf>) -> HostExit {
		info!(path = ?initial, "host started");

		let startup = match initial {
			Some(path) => self.handle(HostRequest::OpenPath(path)).await,
			None => {
				let state = self.manager.ui_state();
				self.send(DisplayMessage::State(state))
			}
		};
		if let ControlFlow::Break(exit) = startup {
			return exit;
		}

		while let Some(request) = self.requests.recv().await {
			if let ControlFlow::Break(exit) = self.handle(request).await {
				info!(?exit, "host stopped");
				return exit;
			}
		}

		info!("display disconnected");
		HostExit::Disconnected
	}

	/// Applies one request and forwards the resulting display messages.
	pub async fn handle(&mut self, request: HostRequest) -> ControlFlow<HostExit> {
		debug!(?request, "host request");

		let mut close = false;
		match request {
			HostRequest::ContentChanged { generation, data } => {
				if generation == self.manager.generation() {
					self.manager.content_changed(data);
				} else {
					debug!(generation, current = self.manager.generation(), "dropped edit to replaced document");
				}
			}
			HostRequest::RequestSave | HostRequest::Menu(MenuCommand::Save) => {
				let _ = self.manager.save().await;
			}
			HostRequest::Menu(MenuCommand::SaveAs) => {
				let _ = self.manager.save_as().await;
			}
			HostRequest::Menu(MenuCommand::New) => {
				self.manager.new_document_guarded().await;
			}
			HostRequest::Menu(MenuCommand::Open) => {
				let _ = self.manager.open_interactive().await;
			}
			HostRequest::Menu(MenuCommand::TogglePreview) => self.send(DisplayMessage::TogglePreview)?,
			HostRequest::Menu(MenuCommand::Quit) | HostRequest::CloseRequested => {
				close = self.manager.quit().await.is_proceed();
			}
			HostRequest::DroppedFiles(paths) => {
				let _ = self.manager.drop_files(&paths).await;
			}
			HostRequest::OpenPath(path) => {
				let _ = self.manager.open_path(path).await;
			}
		}

		for message in self.manager.drain_messages() {
			self.send(message)?;
		}

		if close {
			let _ = self.display.send(DisplayMessage::Close);
			return ControlFlow::Break(HostExit::Quit);
		}
		ControlFlow::Continue(())
	}

	fn send(&self, message: DisplayMessage) -> ControlFlow<HostExit> {
		match self.display.send(message) {
			Ok(()) => ControlFlow::Continue(()),
			Err(_) => ControlFlow::Break(HostExit::Disconnected),
		}
	}
}
