//! Email formatter.
//!
//! Produces template input only; the HTML body comes from a
//! [`TemplateRenderer`](crate::services::notifications::TemplateRenderer).

use crate::models::{BuildFailedEmail, DispatchContext};

pub fn format(ctx: &DispatchContext) -> BuildFailedEmail {
    let event = ctx.event();
    BuildFailedEmail {
        project_name: event.project_name.clone(),
        application_name: event.application_name.clone(),
        application_type: event.application_type.clone(),
        error_message: event.error_message.clone(),
        build_link: event.build_link.clone(),
        date: ctx.display_time().to_string(),
    }
}
