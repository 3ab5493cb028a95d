//! Slack attachment formatter.

use super::decoration::{Decorator, Label};
use crate::models::{
    DispatchContext, SlackAction, SlackAttachment, SlackConfig, SlackField, SlackMessage,
};

pub const ALERT_COLOR: &str = "#FF0000";

/// Pretext is fixed; decoration only touches field titles.
pub const PRETEXT: &str = ":warning: *Build Failed*";

fn glyph(label: Label) -> &'static str {
    match label {
        Label::Status | Label::Error => ":warning:",
        Label::Title => "",
        Label::Project => ":hammer_and_wrench:",
        Label::Application => ":gear:",
        Label::Type => ":grey_question:",
        Label::Date | Label::Time => ":clock3:",
        Label::Link => ":link:",
    }
}

fn field(title: String, value: String, short: bool) -> SlackField {
    SlackField {
        title,
        value,
        short,
    }
}

pub fn format(ctx: &DispatchContext, config: &SlackConfig) -> SlackMessage {
    let d = Decorator::new(config.decoration, glyph);
    let event = ctx.event();

    let attachment = SlackAttachment {
        color: ALERT_COLOR.to_string(),
        pretext: PRETEXT.to_string(),
        fields: vec![
            field(d.label(Label::Project, "Project"), event.project_name.clone(), true),
            field(
                d.label(Label::Application, "Application"),
                event.application_name.clone(),
                true,
            ),
            field(d.label(Label::Type, "Type"), event.application_type.clone(), true),
            field(d.label(Label::Time, "Time"), ctx.display_time().to_string(), true),
            field(
                d.label(Label::Error, "Error"),
                format!("```{}```", event.error_message),
                false,
            ),
        ],
        actions: vec![SlackAction {
            action_type: "button".to_string(),
            text: "View Build Details".to_string(),
            url: event.build_link.clone(),
        }],
    };

    SlackMessage {
        channel: config.channel.clone(),
        attachments: vec![attachment],
    }
}
