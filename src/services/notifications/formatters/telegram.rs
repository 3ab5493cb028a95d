//! Telegram HTML formatter.
//!
//! Only `<b>` and `<pre>` are emitted. User text is embedded verbatim; the
//! error message is not escaped, so markup inside it reaches Telegram as-is.

use super::decoration::{Decorator, Label};
use crate::models::{DispatchContext, TelegramConfig, TelegramMessage};

pub const PARSE_MODE: &str = "HTML";

/// Title line text; carries its alert glyph whether or not labels are decorated.
pub const TITLE: &str = "⚠️ Build Failed";

fn glyph(label: Label) -> &'static str {
    match label {
        Label::Status | Label::Error => "⚠️",
        Label::Title => "",
        Label::Project => "🛠️",
        Label::Application => "⚙️",
        Label::Type => "❔",
        Label::Date | Label::Time => "🕒",
        Label::Link => "🔗",
    }
}

pub fn format(ctx: &DispatchContext, config: &TelegramConfig) -> TelegramMessage {
    let d = Decorator::new(config.decoration, glyph);
    let event = ctx.event();

    let text = format!(
        "<b>{title}</b>\n\
         \n\
         <b>{project}:</b> {project_name}\n\
         <b>{application}:</b> {application_name}\n\
         <b>{kind}:</b> {application_type}\n\
         <b>{time}:</b> {display_time}\n\
         \n\
         <b>{error}:</b>\n\
         <pre>{error_message}</pre>\n\
         \n\
         <b>{link}:</b> {build_link}",
        title = TITLE,
        project = d.label(Label::Project, "Project"),
        project_name = event.project_name,
        application = d.label(Label::Application, "Application"),
        application_name = event.application_name,
        kind = d.label(Label::Type, "Type"),
        application_type = event.application_type,
        time = d.label(Label::Time, "Time"),
        display_time = ctx.display_time(),
        error = d.label(Label::Error, "Error"),
        error_message = event.error_message,
        link = d.label(Label::Link, "Build Details"),
        build_link = event.build_link,
    );

    TelegramMessage {
        chat_id: config.chat_id.clone(),
        text,
        parse_mode: PARSE_MODE.to_string(),
        disable_web_page_preview: true,
    }
}
