//! Label decoration shared by every formatter.

/// Semantic labels that a formatter may decorate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Title,
    Project,
    Application,
    Type,
    Date,
    Time,
    Status,
    Error,
    Link,
}

/// Prefixes `text` with `glyph` and a space when `enabled`, otherwise returns `text` unchanged.
pub fn decorate(enabled: bool, glyph: &str, text: &str) -> String {
    if enabled && !glyph.is_empty() {
        format!("{glyph} {text}")
    } else {
        text.to_string()
    }
}

/// A formatter's fixed glyph table bound to one config's decoration flag.
#[derive(Clone, Copy)]
pub struct Decorator {
    enabled: bool,
    glyphs: fn(Label) -> &'static str,
}

impl Decorator {
    pub fn new(enabled: bool, glyphs: fn(Label) -> &'static str) -> Self {
        Self { enabled, glyphs }
    }

    pub fn label(&self, label: Label, text: &str) -> String {
        decorate(self.enabled, (self.glyphs)(label), text)
    }
}
