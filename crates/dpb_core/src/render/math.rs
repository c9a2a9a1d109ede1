//! LaTeX math rendering via pulldown-latex → MathML.

use pulldown_latex::{
    config::DisplayMode, config::RenderConfig, mathml::push_mathml, Parser, Storage,
};
use tracing::debug;

/// Size at which a math expression is typeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathScale {
    /// Text-sized math, used for `$$…$$` regions.
    Inline,
    /// Larger display-style math, used for `katex` blocks.
    Display,
}

/// Turns a TeX expression into markup. Implementations must not panic on bad input.
pub trait MathBackend {
    fn render_math(&self, tex: &str, scale: MathScale) -> String;
}

/// Default backend producing MathML.
///
/// Parse errors are rendered inline by pulldown-latex, so a malformed
/// expression still yields as much markup as can be recovered.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathmlBackend;

impl MathBackend for MathmlBackend {
    fn render_math(&self, tex: &str, scale: MathScale) -> String {
        let storage = Storage::new();
        let parser = Parser::new(tex, &storage);
        let config = RenderConfig {
            display_mode: match scale {
                MathScale::Inline => DisplayMode::Inline,
                MathScale::Display => DisplayMode::Block,
            },
            ..Default::default()
        };

        let mut mathml = String::new();
        match push_mathml(&mut mathml, parser, config) {
            Ok(()) => mathml,
            Err(err) => {
                debug!("math rendering fell back to source: {}", err);
                error_fallback(tex, &err.to_string())
            }
        }
    }
}

/// Escaped TeX source shown when no markup could be produced.
pub(crate) fn error_fallback(tex: &str, error: &str) -> String {
    format!(
        r#"<span class="math math-error" title="{}">{}</span>"#,
        ammonia::clean_text(error),
        ammonia::clean_text(tex)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_superscript() {
        let mathml = MathmlBackend.render_math("a^2+b^2", MathScale::Inline);
        assert!(mathml.contains("<math"));
        assert!(mathml.contains("<msup"));
    }

    #[test]
    fn renders_display_root() {
        let mathml = MathmlBackend.render_math(r"c=\sqrt{2}", MathScale::Display);
        assert!(mathml.contains("<math"));
        assert!(mathml.contains("<msqrt"));
    }

    #[test]
    fn malformed_input_still_produces_markup() {
        let output = MathmlBackend.render_math(r"\frac{a", MathScale::Inline);
        assert!(!output.is_empty());
        assert!(output.contains("<math") || output.contains("math-error"));
    }

    #[test]
    fn error_fallback_escapes_source() {
        let html = error_fallback("<b>x</b>", "bad \"input\"");
        assert!(html.contains("math-error"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("\"input\""));
    }
}
