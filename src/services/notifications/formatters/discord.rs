//! Discord embed formatter.

use super::decoration::{Decorator, Label};
use crate::models::{
    DiscordConfig, DiscordEmbed, DiscordField, DiscordFooter, DiscordMessage, DispatchContext,
};

/// Discord's red alert color.
pub const ALERT_COLOR: u32 = 0xED4245;

fn glyph(label: Label) -> &'static str {
    match label {
        Label::Title => ">",
        Label::Project => "`🛠️`",
        Label::Application => "`⚙️`",
        Label::Type => "`❔`",
        Label::Date => "`📅`",
        Label::Time => "`⌚`",
        Label::Status => "`❓`",
        Label::Error => "`⚠️`",
        Label::Link => "`🧷`",
    }
}

fn field(name: String, value: String, inline: bool) -> DiscordField {
    DiscordField {
        name,
        value,
        inline,
    }
}

pub fn format(ctx: &DispatchContext, config: &DiscordConfig, footer: &str) -> DiscordMessage {
    let d = Decorator::new(config.decoration, glyph);
    let event = ctx.event();
    let unix = ctx.unix_seconds();

    let fields = vec![
        field(d.label(Label::Project, "Project"), event.project_name.clone(), true),
        field(
            d.label(Label::Application, "Application"),
            event.application_name.clone(),
            true,
        ),
        field(d.label(Label::Type, "Type"), event.application_type.clone(), true),
        field(d.label(Label::Date, "Date"), format!("<t:{unix}:D>"), true),
        field(d.label(Label::Time, "Time"), format!("<t:{unix}:t>"), true),
        field(d.label(Label::Status, "Status"), "Failed".to_string(), true),
        field(
            d.label(Label::Error, "Error Message"),
            format!("```{}```", event.error_message),
            false,
        ),
        field(
            d.label(Label::Link, "Build Link"),
            format!("[Click here to access build link]({})", event.build_link),
            false,
        ),
    ];

    DiscordMessage {
        embeds: vec![DiscordEmbed {
            title: d.label(Label::Title, "`⚠️` Build Failed"),
            color: ALERT_COLOR,
            fields,
            timestamp: ctx.iso_timestamp(),
            footer: DiscordFooter {
                text: footer.to_string(),
            },
        }],
    }
}
