//! Ammonia policies for rendered fragments and for math backend output.

/// MathML elements emitted by the math backend.
const MATHML_TAGS: &[&str] = &[
    "math", "semantics", "annotation", "mrow", "mi", "mo", "mn", "ms", "mtext", "mspace",
    "msup", "msub", "msubsup", "mfrac", "msqrt", "mroot", "mover", "munder", "munderover",
    "mtable", "mtr", "mtd", "mstyle", "mpadded", "mphantom", "menclose", "merror",
];

/// Presentational MathML attributes. None of these can carry script.
const MATHML_ATTRIBUTES: &[&str] = &[
    "display",
    "displaystyle",
    "scriptlevel",
    "mathvariant",
    "mathsize",
    "stretchy",
    "fence",
    "separator",
    "symmetric",
    "largeop",
    "movablelimits",
    "form",
    "accent",
    "accentunder",
    "lspace",
    "rspace",
    "minsize",
    "maxsize",
    "width",
    "height",
    "depth",
    "voffset",
    "linethickness",
    "columnalign",
    "rowalign",
    "columnspacing",
    "rowspacing",
    "columnlines",
    "rowlines",
    "notation",
    "encoding",
];

/// Wrapper classes the renderer puts around math markup.
pub(crate) const MATH_CLASSES: &[&str] = &["math", "math-inline", "math-display", "math-error"];

/// Build the sanitizer used by [`super::Renderer`].
///
/// Starts from ammonia's defaults (no scripts, no event handlers, no `style`,
/// only safe URL schemes) and widens it just enough for MathML, the math
/// wrapper classes, code language classes and task-list checkboxes.
pub(crate) fn sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder.add_tags(MATHML_TAGS);
    for tag in MATHML_TAGS {
        builder.add_tag_attributes(*tag, MATHML_ATTRIBUTES);
    }
    builder.add_tag_attributes("code", &["class"]);
    builder.add_allowed_classes("span", MATH_CLASSES);
    builder.add_allowed_classes("div", MATH_CLASSES);
    builder.add_tags(&["input"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    builder
}

/// Policy for raw math backend output, applied before it joins the fragment.
///
/// Only MathML and the error fallback span survive. HTML that a TeX `\text{}`
/// argument smuggles into `<mtext>` is stripped here, since the fragment
/// policy would otherwise accept it as ordinary HTML.
pub(crate) fn math_sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::empty();
    builder.add_tags(MATHML_TAGS);
    for tag in MATHML_TAGS {
        builder.add_tag_attributes(*tag, MATHML_ATTRIBUTES);
    }
    builder.add_tags(&["span"]);
    builder.add_tag_attributes("span", &["title"]);
    builder.add_allowed_classes("span", MATH_CLASSES);
    builder.add_clean_content_tags(&["script", "style"]);
    builder
}
