mod app_error;
mod channel_error;

pub use app_error::{AppError, AppResult, ValidationFieldError};
pub use channel_error::{DeliveryError, FormatterError, RenderDegradation, RenderError};
