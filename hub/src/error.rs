use std::any::Any;
use std::error::Error;
use thiserror::Error;

/// Failure of a single listener during dispatch. These never reach the caller
/// of `trigger`; the hub reports them through the log and carries on.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("{}", .0)]
    Failed(Box<dyn Error>),
    #[error("listener panicked: {}", .0)]
    Panicked(String),
}

impl ListenerError {
    pub fn failed<T: Error + 'static>(err: T) -> ListenerError {
        ListenerError::Failed(Box::new(err))
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> ListenerError {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_owned(),
                None => "unknown panic payload".to_owned(),
            },
        };
        ListenerError::Panicked(message)
    }
}
