use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Turns Markdown source into something a display surface can show.
pub trait Renderer: Send + Sync {
	/// HTML fragment for surfaces that embed a browser view.
	fn render(&self, markdown: &str) -> String;

	/// Styled text blocks for native display surfaces.
	fn blocks(&self, markdown: &str) -> Vec<PreviewBlock>;
}

/// A run of code text, optionally tagged with a token class such as `keyword`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
	pub text: String,
	pub class: Option<String>,
}

impl Highlight {
	pub fn plain(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			class: None,
		}
	}
}

/// Splits the body of a fenced code block into highlighted runs.
pub trait Highlighter: Send + Sync {
	/// `language` is the fence's info string, if it had one.
	fn highlight(&self, code: &str, language: Option<&str>) -> Vec<Highlight>;
}

/// Leaves code as a single unclassified run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
	fn highlight(&self, code: &str, _language: Option<&str>) -> Vec<Highlight> {
		vec![Highlight::plain(code)]
	}
}

/// [`Renderer`] backed by pulldown-cmark, with code blocks routed through `H`.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer<H = PlainHighlighter> {
	highlighter: H,
}

impl<H: Highlighter> MarkdownRenderer<H> {
	pub fn new(highlighter: H) -> Self {
		Self { highlighter }
	}
}

fn parser_options() -> Options {
	let mut options = Options::empty();
	options.insert(Options::ENABLE_STRIKETHROUGH);
	options.insert(Options::ENABLE_TABLES);
	options.insert(Options::ENABLE_TASKLISTS);
	options.insert(Options::ENABLE_FOOTNOTES);
	options
}

impl<H: Highlighter> Renderer for MarkdownRenderer<H> {
	fn render(&self, markdown: &str) -> String {
		let mut events = Vec::new();
		let mut code: Option<(Option<String>, String)> = None;

		for event in Parser::new_ext(markdown, parser_options()) {
			match event {
				Event::Start(Tag::CodeBlock(kind)) => code = Some((fence_language(kind), String::new())),
				Event::Text(text) if code.is_some() => {
					if let Some((_, body)) = code.as_mut() {
						body.push_str(&text);
					}
				}
				Event::End(TagEnd::CodeBlock) => {
					if let Some((language, body)) = code.take() {
						let runs = self.highlighter.highlight(&body, language.as_deref());
						events.push(Event::Html(CowStr::from(code_block_html(language.as_deref(), &runs))));
					}
				}
				event => events.push(event),
			}
		}

		let mut out = String::with_capacity(markdown.len() * 3 / 2);
		html::push_html(&mut out, events.into_iter());
		out
	}

	fn blocks(&self, markdown: &str) -> Vec<PreviewBlock> {
		let mut builder = BlockBuilder::new(&self.highlighter);
		for event in Parser::new_ext(markdown, parser_options()) {
			builder.push(event);
		}
		builder.finish()
	}
}

/// `<pre><code>` markup for highlighted runs; classed runs become `hl-<class>` spans.
fn code_block_html(language: Option<&str>, runs: &[Highlight]) -> String {
	let mut out = String::new();
	match language {
		Some(language) => {
			out.push_str("<pre><code class=\"language-");
			escape_html(&mut out, language);
			out.push_str("\">");
		}
		None => out.push_str("<pre><code>"),
	}
	for run in runs {
		match &run.class {
			Some(class) => {
				out.push_str("<span class=\"hl-");
				escape_html(&mut out, class);
				out.push_str("\">");
				escape_html(&mut out, &run.text);
				out.push_str("</span>");
			}
			None => escape_html(&mut out, &run.text),
		}
	}
	out.push_str("</code></pre>\n");
	out
}

/// First word of a fence's info string.
fn fence_language(kind: CodeBlockKind<'_>) -> Option<String> {
	match kind {
		CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
		CodeBlockKind::Indented => None,
	}
}

/// Appends `text` to `out` with HTML metacharacters escaped.
pub fn escape_html(out: &mut String, text: &str) {
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(ch),
		}
	}
}

/// Block-level shape of a preview line, for surfaces that cannot show HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
	Heading(u8),
	Paragraph,
	Code { language: Option<String>, highlights: Vec<Highlight> },
	Quote,
	ListItem { depth: usize, marker: String },
	Rule,
}

/// One block of rendered preview text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBlock {
	pub kind: BlockKind,
	pub text: String,
}

struct BlockBuilder<'a> {
	highlighter: &'a dyn Highlighter,
	blocks: Vec<PreviewBlock>,
	current: Option<PreviewBlock>,
	lists: Vec<Option<u64>>,
	quote_depth: usize,
}

impl<'a> BlockBuilder<'a> {
	fn new(highlighter: &'a dyn Highlighter) -> Self {
		Self {
			highlighter,
			blocks: Vec::new(),
			current: None,
			lists: Vec::new(),
			quote_depth: 0,
		}
	}

	fn push(&mut self, event: Event<'_>) {
		match event {
			Event::Start(Tag::Heading { level, .. }) => self.open(BlockKind::Heading(heading_level(level))),
			Event::Start(Tag::Paragraph) => {
				if self.current.is_none() {
					let kind = if self.quote_depth > 0 { BlockKind::Quote } else { BlockKind::Paragraph };
					self.open(kind);
				}
			}
			Event::Start(Tag::CodeBlock(kind)) => self.open(BlockKind::Code {
				language: fence_language(kind),
				highlights: Vec::new(),
			}),
			Event::Start(Tag::BlockQuote { .. }) => self.quote_depth += 1,
			Event::End(TagEnd::BlockQuote { .. }) => self.quote_depth = self.quote_depth.saturating_sub(1),
			Event::Start(Tag::List(start)) => self.lists.push(start),
			Event::End(TagEnd::List(_)) => {
				self.lists.pop();
			}
			Event::Start(Tag::Item) => {
				let depth = self.lists.len().saturating_sub(1);
				let marker = match self.lists.last_mut() {
					Some(Some(next)) => {
						let marker = format!("{next}.");
						*next += 1;
						marker
					}
					_ => "•".to_string(),
				};
				self.open(BlockKind::ListItem { depth, marker });
			}
			Event::End(TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::CodeBlock | TagEnd::Item) => self.close(),
			Event::Text(text) | Event::Code(text) => self.text(&text),
			Event::SoftBreak => self.text(" "),
			Event::HardBreak => self.text("\n"),
			Event::TaskListMarker(done) => self.text(if done { "[x] " } else { "[ ] " }),
			Event::Rule => {
				self.close();
				self.blocks.push(PreviewBlock {
					kind: BlockKind::Rule,
					text: String::new(),
				});
			}
			_ => {}
		}
	}

	fn open(&mut self, kind: BlockKind) {
		self.close();
		self.current = Some(PreviewBlock { kind, text: String::new() });
	}

	fn text(&mut self, text: &str) {
		let block = self.current.get_or_insert_with(|| PreviewBlock {
			kind: BlockKind::Paragraph,
			text: String::new(),
		});
		block.text.push_str(text);
	}

	fn close(&mut self) {
		if let Some(mut block) = self.current.take() {
			if let BlockKind::Code { language, highlights } = &mut block.kind {
				if block.text.ends_with('\n') {
					block.text.pop();
				}
				*highlights = self.highlighter.highlight(&block.text, language.as_deref());
			}
			self.blocks.push(block);
		}
	}

	fn finish(mut self) -> Vec<PreviewBlock> {
		self.close();
		self.blocks
	}
}

fn heading_level(level: HeadingLevel) -> u8 {
	match level {
		HeadingLevel::H1 => 1,
		HeadingLevel::H2 => 2,
		HeadingLevel::H3 => 3,
		HeadingLevel::H4 => 4,
		HeadingLevel::H5 => 5,
		HeadingLevel::H6 => 6,
	}
}
