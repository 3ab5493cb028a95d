//! Service layer.
//!
//! Services coordinate the injected collaborators (resolver, senders,
//! template renderer) around the notification core.

pub mod notifications;

pub use notifications::{
    ChannelSender, ChannelSenders, NotificationDispatcher, NotificationService, StaticResolver,
    SubscriptionResolver, TemplateRenderer,
};
