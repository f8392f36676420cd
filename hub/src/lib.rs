mod callback;
mod context;
mod error;
mod event;
mod hub;
mod mixin;
mod names;
mod registry;

pub use callback::{Callback, IntoOutcome, Reply};
pub use context::Context;
pub use error::ListenerError;
pub use event::{Channel, Event};
pub use hub::{EventHub, HubBuilder};
pub use mixin::{mix_to, Evented, Events};
pub use names::ALL;
