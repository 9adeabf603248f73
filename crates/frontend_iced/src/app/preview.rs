use iced::widget::text::Span;
use iced::widget::{Column, container, rich_text, row, rule, span, text};
use iced::{Color, Element, Fill, Font, Padding, font};
use lucien_editor::preview::{BlockKind, Highlight, PreviewBlock};

use super::Message;

const BOLD: Font = Font {
	weight: font::Weight::Bold,
	..Font::DEFAULT
};

const LIST_INDENT_PX: f32 = 18.0;

pub(super) fn view(blocks: &[PreviewBlock]) -> Column<'_, Message> {
	Column::with_children(blocks.iter().map(block)).spacing(10).padding(12).width(Fill)
}

fn block(block: &PreviewBlock) -> Element<'_, Message> {
	match &block.kind {
		BlockKind::Heading(level) => text(&block.text).size(heading_size(*level)).font(BOLD).into(),
		BlockKind::Paragraph => text(&block.text).into(),
		BlockKind::Code { highlights, .. } => container(code(highlights))
			.padding(8)
			.width(Fill)
			.style(container::rounded_box)
			.into(),
		BlockKind::Quote => container(text(&block.text).style(text::secondary))
			.padding(Padding::ZERO.left(12.0))
			.into(),
		BlockKind::ListItem { depth, marker } => row![text(marker.as_str()), text(&block.text)]
			.spacing(6)
			.padding(Padding::ZERO.left(list_indent(*depth)))
			.into(),
		BlockKind::Rule => rule::horizontal(1).into(),
	}
}

fn code(highlights: &[Highlight]) -> Element<'_, Message> {
	let mut spans: Vec<Span<'_, ()>> = highlights
		.iter()
		.map(|run| {
			let segment = span::<(), _>(run.text.as_str());
			match run.class.as_deref().and_then(class_color) {
				Some(color) => segment.color(color),
				None => segment,
			}
		})
		.collect();

	if spans.is_empty() {
		spans.push(span::<(), _>(String::new()));
	}

	rich_text(spans).font(Font::MONOSPACE).size(14).into()
}

/// Foreground colour for a highlighter token class.
pub(super) fn class_color(class: &str) -> Option<Color> {
	match class {
		"keyword" => Some(Color::from_rgb8(0xc6, 0x78, 0xdd)),
		"string" => Some(Color::from_rgb8(0x98, 0xc3, 0x79)),
		"number" | "constant" => Some(Color::from_rgb8(0xd1, 0x9a, 0x66)),
		"comment" => Some(Color::from_rgb8(0x7f, 0x84, 0x8e)),
		"type" => Some(Color::from_rgb8(0xe5, 0xc0, 0x7b)),
		"function" => Some(Color::from_rgb8(0x61, 0xaf, 0xef)),
		_ => None,
	}
}

pub(super) fn heading_size(level: u8) -> f32 {
	match level {
		1 => 30.0,
		2 => 24.0,
		3 => 20.0,
		4 => 18.0,
		_ => 16.0,
	}
}

pub(super) fn list_indent(depth: usize) -> f32 {
	LIST_INDENT_PX * depth as f32
}
