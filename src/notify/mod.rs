pub mod email;

pub use email::{EmailNotifier, NotifyError, NOTIFICATION_SUBJECT};
