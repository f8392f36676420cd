use std::ops::{Deref, DerefMut};

use crate::{Callback, Context, Event, EventHub, IntoOutcome, Reply};

/// The `on`/`off`/`trigger` capability set, available on any type that can
/// hand out its own [EventHub].
///
/// Implement it for a type with [mix_to!](crate::mix_to!) so every instance
/// gets the capability backed by its own registry, or wrap a single value
/// with [mix_to()].
pub trait Events {
    type Args;

    fn hub(&self) -> &EventHub<Self::Args>;

    fn on<F, O>(&self, names: &str, callback: F) -> &Self
        where F: 'static + Fn(&Event<'_, Self::Args>) -> O,
              O: IntoOutcome {
        self.hub().on(names, callback);
        self
    }

    fn on_with(&self, names: &str, callback: Option<&Callback<Self::Args>>, context: Option<&Context>) -> &Self {
        self.hub().on_with(names, callback, context);
        self
    }

    fn once<F, O>(&self, names: &str, callback: F) -> &Self
        where F: 'static + Fn(&Event<'_, Self::Args>) -> O,
              O: IntoOutcome {
        self.hub().once(names, callback);
        self
    }

    fn off(&self, names: Option<&str>, callback: Option<&Callback<Self::Args>>, context: Option<&Context>) -> &Self {
        self.hub().off(names, callback, context);
        self
    }

    fn off_all(&self) -> &Self {
        self.hub().off_all();
        self
    }

    fn trigger(&self, names: &str, args: &Self::Args) -> Reply {
        self.hub().trigger(names, args)
    }

    fn emit(&self, names: &str, args: &Self::Args) -> Reply {
        self.hub().trigger(names, args)
    }
}

impl<A> Events for EventHub<A> {
    type Args = A;

    fn hub(&self) -> &EventHub<A> {
        self
    }
}

/// A value with the [Events] capability attached. Dereferences to the value.
///
/// As with [mix_to!](crate::mix_to!), listeners without a context are bound
/// to the hub, so a listener that needs the value has to capture it.
pub struct Evented<T, A = ()> {
    target: T,
    hub: EventHub<A>,
}

impl<T, A> Evented<T, A> {
    pub fn new(target: T) -> Self {
        Self::with_hub(target, EventHub::new())
    }

    pub fn with_hub(target: T, hub: EventHub<A>) -> Self {
        Evented { target, hub }
    }

    /// Detaches the capability, dropping every listener.
    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T, A> Events for Evented<T, A> {
    type Args = A;

    fn hub(&self) -> &EventHub<A> {
        &self.hub
    }
}

impl<T, A> Deref for Evented<T, A> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.target
    }
}

impl<T, A> DerefMut for Evented<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.target
    }
}

/// Grants the [Events] capability to a single value, backed by a private
/// registry of its own.
pub fn mix_to<T, A>(target: T) -> Evented<T, A> {
    Evented::new(target)
}

/// Grants the [Events] capability to every instance of a type, through a
/// field holding the instance's own [EventHub].
///
/// Listeners registered without a context are bound to that embedded hub,
/// not to the host value. A listener that needs the host captures it itself
/// (e.g. a `Weak` to it) or is registered with a [Context](crate::Context)
/// wrapping it.
///
/// ```
/// use event_hub::{EventHub, Events};
///
/// struct Door {
///     events: EventHub,
/// }
///
/// event_hub::mix_to!(Door, events);
///
/// let door = Door { events: EventHub::new() };
/// door.on("open", |_| true);
/// assert!(door.trigger("open", &()).passed());
/// ```
#[macro_export]
macro_rules! mix_to {
    ($target:ty, $field:ident) => {
        $crate::mix_to!($target, $field, ());
    };
    ($target:ty, $field:ident, $args:ty) => {
        impl $crate::Events for $target {
            type Args = $args;

            fn hub(&self) -> &$crate::EventHub<$args> {
                &self.$field
            }
        }
    };
}
