use std::any::Any;
use std::rc::Rc;

use crate::{Callback, Context, EventHub};

/// Channel an [Event] was delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// The listener was registered under the event's own name.
    Named,
    /// The listener was registered under [ALL](crate::ALL).
    All,
}

/// Passed to every listener invocation. Gives access to the trigger's
/// arguments, the listener's context, and the hub itself so a listener can
/// register, remove or trigger further events.
pub struct Event<'a, A> {
    pub(crate) name: &'a str,
    pub(crate) channel: Channel,
    pub(crate) args: &'a A,
    pub(crate) context: &'a Context,
    pub(crate) callback: &'a Callback<A>,
    pub(crate) hub: &'a EventHub<A>,
}

impl<'a, A> Event<'a, A> {
    /// Name of the event being dispatched. Listeners on the `all` channel see
    /// the name that was actually triggered here.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn args(&self) -> &'a A {
        self.args
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// Gets the bound context as a `T`. Returns [None] for listeners bound to
    /// the hub or to an object of another type.
    pub fn context_as<T: Any>(&self) -> Option<Rc<T>> {
        self.context.downcast()
    }

    /// The callback currently being invoked, e.g. to remove itself.
    pub fn callback(&self) -> &'a Callback<A> {
        self.callback
    }

    pub fn hub(&self) -> &'a EventHub<A> {
        self.hub
    }
}
