//! Gotify push-text formatter.

use super::decoration::{Decorator, Label};
use crate::models::{DispatchContext, GotifyConfig, GotifyMessage};

/// Gotify renders message bodies with plain `\n` line breaks.
const NEWLINE: &str = "\n";

fn glyph(label: Label) -> &'static str {
    match label {
        Label::Title | Label::Status | Label::Error => "⚠️",
        Label::Project => "🛠️",
        Label::Application => "⚙️",
        Label::Type => "❔",
        Label::Date | Label::Time => "🕒",
        Label::Link => "🔗",
    }
}

pub fn format(ctx: &DispatchContext, config: &GotifyConfig) -> GotifyMessage {
    let d = Decorator::new(config.decoration, glyph);
    let event = ctx.event();

    let lines = [
        d.label(Label::Project, &format!("Project: {}", event.project_name)),
        d.label(
            Label::Application,
            &format!("Application: {}", event.application_name),
        ),
        d.label(Label::Type, &format!("Type: {}", event.application_type)),
        d.label(Label::Date, &format!("Date: {}", ctx.display_time())),
        d.label(Label::Error, &format!("Error:{NEWLINE}{}", event.error_message)),
        d.label(
            Label::Link,
            &format!("Build details:{NEWLINE}{}", event.build_link),
        ),
    ];

    let mut message = String::new();
    for line in &lines {
        message.push_str(line);
        message.push_str(NEWLINE);
    }

    GotifyMessage {
        title: d.label(Label::Title, "Build Failed"),
        message,
        priority: config.priority,
    }
}
