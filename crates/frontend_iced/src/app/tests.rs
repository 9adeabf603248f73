use std::path::PathBuf;

use super::*;

fn key(character: &str) -> keyboard::Key {
	keyboard::Key::Character(character.into())
}

#[test]
fn shortcut_maps_command_keys_to_menu() {
	assert_eq!(shortcut(&key("n"), keyboard::Modifiers::COMMAND), Some(MenuCommand::New));
	assert_eq!(shortcut(&key("o"), keyboard::Modifiers::COMMAND), Some(MenuCommand::Open));
	assert_eq!(shortcut(&key("s"), keyboard::Modifiers::COMMAND), Some(MenuCommand::Save));
	assert_eq!(shortcut(&key("q"), keyboard::Modifiers::COMMAND), Some(MenuCommand::Quit));
	assert_eq!(shortcut(&key("p"), keyboard::Modifiers::COMMAND), Some(MenuCommand::TogglePreview));
}

#[test]
fn shortcut_shift_s_is_save_as() {
	let modifiers = keyboard::Modifiers::COMMAND | keyboard::Modifiers::SHIFT;
	assert_eq!(shortcut(&key("S"), modifiers), Some(MenuCommand::SaveAs));
	assert_eq!(shortcut(&key("s"), modifiers), Some(MenuCommand::SaveAs));
}

#[test]
fn shortcut_requires_command_modifier() {
	assert_eq!(shortcut(&key("s"), keyboard::Modifiers::default()), None);
	assert_eq!(shortcut(&key("x"), keyboard::Modifiers::COMMAND), None);
}

#[test]
fn hover_status_follows_drag_hint() {
	assert_eq!(hover_status(&[]), None);
	assert_eq!(hover_status(&[PathBuf::from("notes.md")]), Some("Drop to open"));
	assert_eq!(hover_status(&[PathBuf::from("photo.png")]), Some("This file type cannot be opened"));
	assert_eq!(hover_status(&[PathBuf::from("a.md"), PathBuf::from("b.md")]), None);
}

#[test]
fn heading_sizes_shrink_with_level() {
	let sizes: Vec<f32> = (1..=6).map(preview::heading_size).collect();
	assert!(sizes.windows(2).all(|pair| pair[0] >= pair[1]));
	assert_eq!(preview::list_indent(0), 0.0);
	assert_eq!(preview::list_indent(2), 36.0);
}

#[test]
fn changed_text_ignores_no_op_edits() {
	assert_eq!(changed_text("abc".into(), "abc".into()), None);
	assert_eq!(changed_text("ab".into(), "abc".into()), Some("abc".to_string()));
}

#[test]
fn highlight_classes_map_to_palette() {
	assert!(preview::class_color("keyword").is_some());
	assert!(preview::class_color("comment").is_some());
	assert_eq!(preview::class_color("unheard-of"), None);
}
