//! Markdown + math rendering to sanitized HTML fragments.
//!
//! Conversion walks the pulldown-cmark event stream once. Every code-like
//! node (inline code span, fenced or indented block) is handed to
//! [`classify_code`], which decides whether it becomes math or stays code.
//! A paragraph whose whole source is one `$$…$$` line is treated like the
//! code-span form. Dollar signs anywhere else are ordinary text.
//! Backend markup is cleaned with a MathML-only policy, and the finished
//! fragment always passes through ammonia before it is returned.

mod math;
mod sanitize;

pub use math::{MathBackend, MathScale, MathmlBackend};

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::fmt;

/// Whether a code-like node sits inside a paragraph or stands as a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Inline,
    Block,
}

/// A code-like region as seen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeNode<'a> {
    /// Region body. For blocks, without the line ending that closes the body.
    pub text: &'a str,
    /// First word of a fenced block's info string, if any.
    pub language: Option<&'a str>,
}

/// What the renderer does with a code-like node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeDisposition<'a> {
    Math { tex: &'a str, scale: MathScale },
    Code,
}

/// Fixed precedence for code-like nodes.
///
/// 1. Text entirely wrapped in `$$…$$` (single line) renders the inner text as math.
/// 2. Otherwise a `katex` language tag (any case) renders the whole text as display math.
/// 3. Otherwise the node stays code.
pub fn classify_code<'a>(node: &CodeNode<'a>) -> CodeDisposition<'a> {
    if let Some(tex) = strip_double_dollars(node.text) {
        return CodeDisposition::Math {
            tex,
            scale: MathScale::Inline,
        };
    }
    if node
        .language
        .is_some_and(|language| language.eq_ignore_ascii_case("katex"))
    {
        return CodeDisposition::Math {
            tex: node.text,
            scale: MathScale::Display,
        };
    }
    CodeDisposition::Code
}

// Equivalent to matching `^\$\$(.*)\$\$$` where `.` excludes newlines.
fn strip_double_dollars(text: &str) -> Option<&str> {
    if text.len() < 4 || text.contains('\n') {
        return None;
    }
    text.strip_prefix("$$")?.strip_suffix("$$")
}

// Raw paragraph source that is a single `$$…$$` span and nothing else.
fn bare_math_paragraph(raw: &str) -> Option<&str> {
    let tex = strip_double_dollars(raw.trim())?;
    (!tex.contains("$$")).then_some(tex)
}

/// Sanitized HTML ready for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHtml(String);

impl RenderedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

struct PendingBlock<'a> {
    kind: CodeBlockKind<'a>,
    text: String,
}

/// Markdown renderer with a pluggable math backend.
///
/// Holds no mutable state, so rendering the same source twice yields identical output.
pub struct Renderer<M = MathmlBackend> {
    math: M,
    sanitizer: ammonia::Builder<'static>,
    math_sanitizer: ammonia::Builder<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_backend(MathmlBackend)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MathBackend> Renderer<M> {
    pub fn with_backend(math: M) -> Self {
        Self {
            math,
            sanitizer: sanitize::sanitizer(),
            math_sanitizer: sanitize::math_sanitizer(),
        }
    }

    /// Render markdown `source` into a sanitized fragment.
    ///
    /// # Returns
    /// The HTML fragment; empty for empty input. Never fails.
    pub fn render(&self, source: &str) -> RenderedHtml {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut pending: Option<PendingBlock<'_>> = None;
        let mut in_math_paragraph = false;

        for (event, range) in Parser::new_ext(source, markdown_options()).into_offset_iter() {
            if in_math_paragraph {
                if matches!(event, Event::End(TagEnd::Paragraph)) {
                    in_math_paragraph = false;
                    events.push(event);
                }
                continue;
            }
            match event {
                event @ Event::Start(Tag::Paragraph) => {
                    events.push(event);
                    // Raw source keeps TeX backslashes that the text events would unescape.
                    if let Some(tex) = source.get(range).and_then(bare_math_paragraph) {
                        let markup = self.math_markup(tex, MathScale::Inline, CodeKind::Inline);
                        events.push(Event::InlineHtml(markup.into()));
                        in_math_paragraph = true;
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    pending = Some(PendingBlock {
                        kind,
                        text: String::new(),
                    });
                }
                Event::Text(chunk) if pending.is_some() => {
                    if let Some(block) = pending.as_mut() {
                        block.text.push_str(&chunk);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = pending.take() {
                        self.emit_block(block, &mut events);
                    }
                }
                Event::Code(text) => self.emit_inline(text, &mut events),
                other => events.push(other),
            }
        }

        let mut unsafe_html = String::new();
        html::push_html(&mut unsafe_html, events.into_iter());
        RenderedHtml(self.sanitizer.clean(&unsafe_html).to_string())
    }

    fn emit_inline<'a>(&self, text: CowStr<'a>, events: &mut Vec<Event<'a>>) {
        let node = CodeNode {
            text: &text,
            language: None,
        };
        let markup = match classify_code(&node) {
            CodeDisposition::Math { tex, scale } => {
                Some(self.math_markup(tex, scale, CodeKind::Inline))
            }
            CodeDisposition::Code => None,
        };
        match markup {
            Some(markup) => events.push(Event::InlineHtml(markup.into())),
            None => events.push(Event::Code(text)),
        }
    }

    fn emit_block<'a>(&self, block: PendingBlock<'a>, events: &mut Vec<Event<'a>>) {
        let language = match &block.kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
            CodeBlockKind::Indented => None,
        };
        let body = block
            .text
            .strip_suffix("\r\n")
            .or_else(|| block.text.strip_suffix('\n'))
            .unwrap_or(&block.text);
        let node = CodeNode {
            text: body,
            language,
        };
        let markup = match classify_code(&node) {
            CodeDisposition::Math { tex, scale } => {
                Some(self.math_markup(tex, scale, CodeKind::Block))
            }
            CodeDisposition::Code => None,
        };
        match markup {
            Some(markup) => events.push(Event::Html(format!("{}\n", markup).into())),
            None => {
                events.push(Event::Start(Tag::CodeBlock(block.kind)));
                events.push(Event::Text(block.text.into()));
                events.push(Event::End(TagEnd::CodeBlock));
            }
        }
    }

    fn math_markup(&self, tex: &str, scale: MathScale, kind: CodeKind) -> String {
        let element = match kind {
            CodeKind::Inline => "span",
            CodeKind::Block => "div",
        };
        let class = match scale {
            MathScale::Inline => "math math-inline",
            MathScale::Display => "math math-display",
        };
        let mathml = self.math.render_math(tex, scale);
        format!(
            r#"<{element} class="{class}">{}</{element}>"#,
            self.math_sanitizer.clean(&mathml)
        )
    }
}

/// Render with the default MathML backend.
pub fn render(source: &str) -> RenderedHtml {
    Renderer::new().render(source)
}
