use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{Id, button, column, container, operation, row, rule, scrollable, text, text_editor};
use iced::{Element, Event, Fill, Font, Subscription, Task, event, keyboard, time, window};
use lucien_editor::drag_drop::{self, DragHint};
use lucien_editor::preview::{MarkdownRenderer, PlainHighlighter, PreviewBlock, Renderer};
use lucien_editor::{
	APP_NAME, DisplayMessage, FileState, Host, HostRequest, Manager, MenuCommand, ScrollCommand, ScrollMetrics, ScrollSyncGroup, SurfaceId,
	TokioStorage, UiState,
};
use tracing::{debug, error, warn};

use super::StartupOptions;
use crate::dialogs::RfdPrompt;
use crate::platform::configure_linux_backend;

mod preview;

const TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub(crate) enum Message {
	Tick(time::Instant),
	Edit(text_editor::Action),
	Scrolled(SurfaceId, ScrollMetrics),
	Menu(MenuCommand),
	Event(Event),
}

pub(crate) struct LucienApp {
	host: lucien_editor::HostHandle,
	source: text_editor::Content,
	/// Generation of the document the source pane is showing.
	generation: u64,
	renderer: Box<dyn Renderer>,
	preview: Vec<PreviewBlock>,
	ui: UiState,
	show_preview: bool,
	sync_scroll: bool,
	scroll: ScrollSyncGroup,
	hovered: Vec<PathBuf>,
	dropped: Vec<PathBuf>,
	closing: bool,
}

fn source_id() -> Id {
	Id::new("source")
}

fn preview_id() -> Id {
	Id::new("preview")
}

impl LucienApp {
	pub(crate) fn boot(options: StartupOptions) -> (Self, Task<Message>) {
		let manager = Manager::new(TokioStorage, RfdPrompt::new(options.config.dialog_dir()));
		let (host, handle) = Host::new(manager);

		let mut scroll = ScrollSyncGroup::new();
		scroll.register(SurfaceId::SOURCE, ScrollMetrics::default());
		scroll.register(SurfaceId::PREVIEW, ScrollMetrics::default());

		let app = Self {
			host: handle,
			source: text_editor::Content::new(),
			generation: 0,
			renderer: Box::new(MarkdownRenderer::<PlainHighlighter>::default()),
			preview: Vec::new(),
			ui: FileState::new().ui_state(APP_NAME),
			show_preview: options.config.show_preview,
			sync_scroll: options.config.sync_scroll,
			scroll,
			hovered: Vec::new(),
			dropped: Vec::new(),
			closing: false,
		};

		match spawn_host(host, options.path) {
			Ok(()) => (app, Task::none()),
			Err(error) => {
				error!(%error, "failed to start host thread");
				(app, iced::exit())
			}
		}
	}

	pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
		match message {
			Message::Tick(_now) => return self.tick(),
			Message::Edit(action) => {
				let before = action.is_edit().then(|| self.source.text());
				self.source.perform(action);
				if let Some(data) = before.and_then(|before| changed_text(before, self.source.text())) {
					self.preview = self.renderer.blocks(&data);
					self.request(HostRequest::ContentChanged {
						generation: self.generation,
						data,
					});
				}
			}
			Message::Scrolled(surface, metrics) => {
				if self.sync_scroll && self.show_preview {
					self.scroll.update_metrics(surface, metrics.content_height, metrics.viewport_height);
					self.scroll.on_scroll(surface, metrics.offset);
				}
			}
			Message::Menu(command) => self.request(HostRequest::Menu(command)),
			Message::Event(event) => self.on_event(event),
		}

		Task::none()
	}

	/// Flushes queued drops, applies host output, and advances scroll sync.
	fn tick(&mut self) -> Task<Message> {
		if !self.dropped.is_empty() {
			let paths = std::mem::take(&mut self.dropped);
			self.request(HostRequest::DroppedFiles(paths));
		}

		for message in self.host.drain() {
			self.apply(message);
		}

		if self.closing || !self.host.is_connected() {
			return iced::exit();
		}

		if !self.scroll.needs_frame() {
			return Task::none();
		}
		Task::batch(self.scroll.on_frame().into_iter().map(scroll_task))
	}

	fn apply(&mut self, message: DisplayMessage) {
		match message {
			DisplayMessage::OpenFile { generation, content } => self.replace_source(generation, &content),
			DisplayMessage::NewFile { generation } => self.replace_source(generation, ""),
			DisplayMessage::TogglePreview => self.show_preview = !self.show_preview,
			DisplayMessage::State(ui) => self.ui = ui,
			DisplayMessage::Close => self.closing = true,
		}
	}

	fn replace_source(&mut self, generation: u64, content: &str) {
		self.generation = generation;
		self.source = text_editor::Content::with_text(content);
		self.preview = self.renderer.blocks(content);
	}

	fn on_event(&mut self, event: Event) {
		match event {
			Event::Window(window::Event::CloseRequested) => self.request(HostRequest::CloseRequested),
			Event::Window(window::Event::FileHovered(path)) => self.hovered.push(path),
			Event::Window(window::Event::FilesHoveredLeft) => self.hovered.clear(),
			Event::Window(window::Event::FileDropped(path)) => {
				self.hovered.clear();
				self.dropped.push(path);
			}
			Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
				if let Some(command) = shortcut(&key, modifiers) {
					self.request(HostRequest::Menu(command));
				}
			}
			_ => {}
		}
	}

	fn request(&mut self, request: HostRequest) {
		if !self.host.send(request) {
			warn!("host stopped; closing window");
			self.closing = true;
		}
	}

	pub(crate) fn view(&self) -> Element<'_, Message> {
		let editor = text_editor(&self.source)
			.placeholder("Start writing Markdown…")
			.on_action(Message::Edit)
			.font(Font::MONOSPACE)
			.padding(8);
		let source = scrollable(editor)
			.id(source_id())
			.on_scroll(|viewport| Message::Scrolled(SurfaceId::SOURCE, metrics_of(&viewport)))
			.height(Fill)
			.width(Fill);

		let panes = if self.show_preview {
			let rendered = scrollable(preview::view(&self.preview))
				.id(preview_id())
				.on_scroll(|viewport| Message::Scrolled(SurfaceId::PREVIEW, metrics_of(&viewport)))
				.height(Fill)
				.width(Fill);
			row![source, rule::vertical(1), rendered].spacing(8).height(Fill)
		} else {
			row![source].height(Fill)
		};

		let mut content = column![toolbar(&self.ui), panes].spacing(8).padding(12).width(Fill).height(Fill);
		if let Some(status) = hover_status(&self.hovered) {
			content = content.push(text(status).size(13));
		}

		container(content).width(Fill).height(Fill).into()
	}

	pub(crate) fn subscription(&self) -> Subscription<Message> {
		Subscription::batch([event::listen_with(window_or_key_event), time::every(TICK_INTERVAL).map(Message::Tick)])
	}

	pub(crate) fn title(&self) -> String {
		self.ui.title.clone()
	}
}

fn window_or_key_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
	match &event {
		Event::Window(_) | Event::Keyboard(keyboard::Event::KeyPressed { .. }) => Some(Message::Event(event)),
		_ => None,
	}
}

fn metrics_of(viewport: &scrollable::Viewport) -> ScrollMetrics {
	ScrollMetrics::new(viewport.absolute_offset().y, viewport.content_bounds().height, viewport.bounds().height)
}

fn scroll_task(command: ScrollCommand) -> Task<Message> {
	let id = if command.surface == SurfaceId::SOURCE { source_id() } else { preview_id() };
	operation::scroll_to(id, scrollable::AbsoluteOffset { x: 0.0, y: command.offset })
}

fn toolbar(ui: &UiState) -> Element<'_, Message> {
	let buttons = MenuCommand::ALL.into_iter().map(|command| {
		let enabled = command != MenuCommand::Save || ui.save_enabled;
		button(text(command.label()).size(13))
			.padding([4, 10])
			.on_press_maybe(enabled.then_some(Message::Menu(command)))
			.into()
	});
	iced::widget::Row::with_children(buttons).spacing(4).into()
}

/// Text to report after an edit action, or `None` when it left the text unchanged.
pub(crate) fn changed_text(before: String, after: String) -> Option<String> {
	(before != after).then_some(after)
}

/// Menu command bound to a key press, if any.
pub(crate) fn shortcut(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<MenuCommand> {
	if !modifiers.command() {
		return None;
	}
	let keyboard::Key::Character(character) = key.as_ref() else {
		return None;
	};

	match (character.to_ascii_lowercase().as_str(), modifiers.shift()) {
		("n", false) => Some(MenuCommand::New),
		("o", false) => Some(MenuCommand::Open),
		("s", false) => Some(MenuCommand::Save),
		("s", true) => Some(MenuCommand::SaveAs),
		("q", _) => Some(MenuCommand::Quit),
		("p", false) => Some(MenuCommand::TogglePreview),
		_ => None,
	}
}

/// Status line shown while files hover over the window.
pub(crate) fn hover_status(hovered: &[PathBuf]) -> Option<&'static str> {
	if hovered.is_empty() {
		return None;
	}
	match drag_drop::drag_hint(hovered) {
		DragHint::Accept => Some("Drop to open"),
		DragHint::Reject => Some("This file type cannot be opened"),
		DragHint::Ignore => None,
	}
}

fn spawn_host(host: Host<TokioStorage, RfdPrompt>, path: Option<PathBuf>) -> std::io::Result<()> {
	std::thread::Builder::new().name("lucien-host".into()).spawn(move || {
		let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
			Ok(runtime) => runtime,
			Err(error) => {
				error!(%error, "failed to build host runtime");
				return;
			}
		};
		let exit = runtime.block_on(host.run(path));
		debug!(?exit, "host thread finished");
	})?;
	Ok(())
}

pub fn run(options: StartupOptions) -> anyhow::Result<()> {
	configure_linux_backend();

	let size = (options.config.window_width, options.config.window_height);
	iced::application(move || LucienApp::boot(options.clone()), LucienApp::update, LucienApp::view)
		.title(LucienApp::title)
		.subscription(LucienApp::subscription)
		.window_size(size)
		.exit_on_close_request(false)
		.run()?;
	Ok(())
}

#[cfg(test)]
mod tests;
