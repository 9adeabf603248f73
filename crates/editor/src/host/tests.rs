use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::*;
use crate::file_state::UiState;
use crate::test_support::{MemoryStorage, ScriptedPrompt};

fn host_with(storage: MemoryStorage) -> (Host<MemoryStorage, ScriptedPrompt>, HostHandle) {
	Host::new(Manager::new(storage, ScriptedPrompt::default()))
}

fn clean_ui() -> UiState {
	crate::FileState::new().ui_state(crate::APP_NAME)
}

fn edit(generation: u64, data: &str) -> HostRequest {
	HostRequest::ContentChanged {
		generation,
		data: data.into(),
	}
}

fn titles(messages: &[DisplayMessage]) -> Vec<String> {
	messages
		.iter()
		.filter_map(|message| match message {
			DisplayMessage::State(UiState { title, .. }) => Some(title.clone()),
			_ => None,
		})
		.collect()
}

#[tokio::test]
async fn run_opens_initial_path_and_serves_until_disconnect() {
	let (host, handle) = host_with(MemoryStorage::default().with_file("a.md", "# A\n"));

	assert!(handle.send(edit(1, "# A!")));
	assert!(handle.send(HostRequest::Menu(MenuCommand::TogglePreview)));
	let HostHandle { requests, mut messages } = handle;
	drop(requests);

	let exit = host.run(Some(PathBuf::from("a.md"))).await;
	assert_eq!(exit, HostExit::Disconnected);

	let mut received = Vec::new();
	while let Ok(message) = messages.try_recv() {
		received.push(message);
	}

	assert_eq!(received[0], DisplayMessage::OpenFile {
			generation: 1,
			content: "# A".into()
		});
	assert_eq!(titles(&received), vec!["a.md - Lucien", "● a.md - Lucien"]);
	assert_eq!(received.last(), Some(&DisplayMessage::TogglePreview));
}

#[tokio::test]
async fn run_without_path_publishes_initial_state() {
	let (host, mut handle) = host_with(MemoryStorage::default());
	let run = tokio::spawn(host.run(None));

	assert_eq!(handle.recv().await, Some(DisplayMessage::State(clean_ui())));

	handle.send(HostRequest::Menu(MenuCommand::Quit));
	assert_eq!(run.await.ok(), Some(HostExit::Quit));
	assert_eq!(handle.drain(), vec![DisplayMessage::Close]);
}

#[tokio::test]
async fn cancelled_quit_keeps_serving() {
	let (mut host, mut handle) = host_with(MemoryStorage::default());
	host.handle(edit(0, "draft")).await;
	host.manager().prompt().answer_confirm(2);

	let flow = host.handle(HostRequest::CloseRequested).await;

	assert_eq!(flow, ControlFlow::Continue(()));
	assert!(host.manager().state().is_dirty());
	assert!(!handle.drain().contains(&DisplayMessage::Close));
}

#[tokio::test]
async fn request_save_routes_through_save_prompt() {
	let (mut host, mut handle) = host_with(MemoryStorage::default());
	host.handle(edit(0, "body")).await;
	host.manager().prompt().answer_save(Some("out.md"));

	host.handle(HostRequest::RequestSave).await;

	assert_eq!(host.manager().storage().contents("out.md").as_deref(), Some("body\n"));
	assert_eq!(titles(&handle.drain()), vec!["● Untitled - Lucien", "out.md - Lucien"]);
}

#[tokio::test]
async fn dropped_file_opens_through_confirmation() {
	let (mut host, mut handle) = host_with(MemoryStorage::default().with_file("drop.md", "dropped"));
	host.handle(edit(0, "draft")).await;
	handle.drain();
	host.manager().prompt().answer_confirm(1);

	host.handle(HostRequest::DroppedFiles(vec![PathBuf::from("drop.md")])).await;

	assert_eq!(host.manager().state().data(), "dropped");
	assert_eq!(handle.drain()[0], DisplayMessage::OpenFile {
			generation: 1,
			content: "dropped".into()
		});
}

#[tokio::test]
async fn handle_reports_stopped_host() {
	let (host, handle) = host_with(MemoryStorage::default());
	assert!(handle.is_connected());

	drop(host);

	assert!(!handle.is_connected());
	assert!(!handle.send(HostRequest::RequestSave));
}

#[tokio::test]
async fn disconnected_display_stops_host() {
	let (mut host, handle) = host_with(MemoryStorage::default());
	drop(handle);

	let flow = host.handle(HostRequest::Menu(MenuCommand::New)).await;

	assert_eq!(flow, ControlFlow::Break(HostExit::Disconnected));
}

#[tokio::test]
async fn edit_to_replaced_document_is_dropped() {
	let storage = MemoryStorage::default().with_file("a.md", "A").with_file("b.md", "B");
	let (mut host, mut handle) = host_with(storage);
	host.handle(HostRequest::OpenPath(PathBuf::from("a.md"))).await;
	host.manager().prompt().answer_open(Some("b.md"));
	host.handle(HostRequest::Menu(MenuCommand::Open)).await;

	// Typed into a.md while the open dialog was up.
	host.handle(edit(1, "A edited")).await;
	host.handle(HostRequest::RequestSave).await;

	assert_eq!(host.manager().generation(), 2);
	assert_eq!(host.manager().state().data(), "B");
	assert!(!host.manager().state().is_dirty());
	assert_eq!(host.manager().storage().contents("b.md").as_deref(), Some("B\n"));
	assert!(handle.drain().contains(&DisplayMessage::OpenFile {
		generation: 2,
		content: "B".into()
	}));
}

#[tokio::test]
async fn edit_to_current_document_applies() {
	let (mut host, _handle) = host_with(MemoryStorage::default().with_file("a.md", "A"));
	host.handle(HostRequest::OpenPath(PathBuf::from("a.md"))).await;

	host.handle(edit(1, "A edited")).await;

	assert_eq!(host.manager().state().data(), "A edited");
	assert!(host.manager().state().is_dirty());
}
