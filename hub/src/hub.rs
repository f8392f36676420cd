use std::cell::RefCell;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{debug, error, trace};

use crate::names::{self, ALL};
use crate::registry::{Listener, Registry};
use crate::{Callback, Channel, Context, Event, IntoOutcome, ListenerError, Reply};

/// Builds an [EventHub] with non-default settings.
pub struct HubBuilder {
    label: String,
    catch_panics: bool,
}

impl HubBuilder {
    pub fn new() -> Self {
        HubBuilder {
            label: "events".to_owned(),
            catch_panics: true,
        }
    }

    /// Name the hub reports itself under in diagnostics.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// When disabled, a panicking listener unwinds through `trigger` instead
    /// of being reported and skipped.
    pub fn catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    pub fn build<A>(self) -> EventHub<A> {
        EventHub {
            registry: RefCell::new(Registry::new()),
            label: self.label,
            catch_panics: self.catch_panics,
        }
    }
}

impl Default for HubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of named-event listeners with synchronous dispatch.
///
/// Every method takes `&self`, so listeners may call back into the hub while
/// it is dispatching. Such changes never affect listeners already picked up
/// for the event in flight; they apply to the `all` channel of the current
/// event and to later triggers.
pub struct EventHub<A = ()> {
    registry: RefCell<Registry<A>>,
    label: String,
    catch_panics: bool,
}

impl<A> EventHub<A> {
    pub fn new() -> Self {
        HubBuilder::new().build()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Registers `callback` for every space separated name in `names`.
    pub fn on<F, O>(&self, names: &str, callback: F) -> &Self
        where F: 'static + Fn(&Event<'_, A>) -> O,
              O: IntoOutcome {
        self.on_with(names, Some(&Callback::new(callback)), None)
    }

    /// Registers an existing callback, optionally bound to `context`.
    /// Without a callback nothing is registered.
    pub fn on_with(&self, names: &str, callback: Option<&Callback<A>>, context: Option<&Context>) -> &Self {
        if let Some(callback) = callback {
            self.register(names, callback, context, Listener::new);
        }
        self
    }

    /// Like [on](Self::on), but each registration is removed the first time
    /// it is invoked.
    pub fn once<F, O>(&self, names: &str, callback: F) -> &Self
        where F: 'static + Fn(&Event<'_, A>) -> O,
              O: IntoOutcome {
        self.once_with(names, Some(&Callback::new(callback)), None)
    }

    pub fn once_with(&self, names: &str, callback: Option<&Callback<A>>, context: Option<&Context>) -> &Self {
        if let Some(callback) = callback {
            self.register(names, callback, context, Listener::once);
        }
        self
    }

    fn register(&self, names: &str, callback: &Callback<A>, context: Option<&Context>, listener: fn(Callback<A>, Context) -> Listener<A>) {
        let context = context.cloned().unwrap_or_default();
        let mut registry = self.registry.borrow_mut();
        for name in names::split(names) {
            trace!("{}: registered {:?} for `{}`", self.label, callback, name);
            registry.add(name, listener(callback.clone(), context.clone()));
        }
    }

    /// Removes every listener that matches all of the given filters. A filter
    /// left as [None] matches anything, so `off(None, None, None)` clears the
    /// hub.
    pub fn off(&self, names: Option<&str>, callback: Option<&Callback<A>>, context: Option<&Context>) -> &Self {
        let names: Option<Vec<&str>> = names.map(|names| names::split(names).collect());
        let removed = self.registry
            .borrow_mut()
            .remove(names.as_deref(), callback, context);

        if removed > 0 {
            trace!("{}: removed {} listener(s)", self.label, removed);
        }
        self
    }

    pub fn off_all(&self) -> &Self {
        self.off(None, None, None)
    }

    /// Dispatches each event in `names`, left to right, to its listeners and
    /// then to the `all` channel.
    ///
    /// Listener errors and panics are logged and skipped. The returned
    /// [Reply] aggregates every listener invoked: [Reply::Reject] if any of
    /// them rejected.
    pub fn trigger(&self, names: &str, args: &A) -> Reply {
        let mut reply = Reply::Silent;

        for name in names::split(names) {
            if !names::is_all(name) {
                let listeners = self.registry.borrow().snapshot(name);
                if let Some(listeners) = listeners {
                    reply = reply.merge(self.dispatch(name, Channel::Named, &listeners, args));
                }
            }

            // Taken only now, so `all` listeners added by the named listeners
            // above take part.
            let listeners = self.registry.borrow().snapshot(ALL);
            if let Some(listeners) = listeners {
                reply = reply.merge(self.dispatch(name, Channel::All, &listeners, args));
            }
        }

        reply
    }

    pub fn emit(&self, names: &str, args: &A) -> Reply {
        self.trigger(names, args)
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.registry.borrow().count(name)
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name) > 0
    }

    /// Names that currently have at least one listener, in no particular order.
    pub fn event_names(&self) -> Vec<String> {
        self.registry.borrow().names().map(str::to_owned).collect()
    }

    fn dispatch(&self, name: &str, channel: Channel, listeners: &[Listener<A>], args: &A) -> Reply {
        let key = match channel {
            Channel::Named => name,
            Channel::All => ALL,
        };

        let mut reply = Reply::Silent;
        let mut failures = 0;
        for listener in listeners {
            if !listener.claim() {
                continue;
            }
            if listener.is_once() {
                self.registry.borrow_mut().remove_registration(key, listener);
            }

            let event = Event {
                name,
                channel,
                args,
                context: &listener.context,
                callback: &listener.callback,
                hub: self,
            };

            match self.invoke(&listener.callback, &event) {
                Ok(listener_reply) => reply = reply.merge(listener_reply),
                Err(err) => {
                    failures += 1;
                    error!("{}: listener for `{}` failed: {}", self.label, name, err);
                }
            }
        }

        debug!("{}: dispatched `{}` to {} listener(s) on {:?}, {} failed, {:?}",
            self.label, name, listeners.len(), channel, failures, reply);
        reply
    }

    fn invoke(&self, callback: &Callback<A>, event: &Event<'_, A>) -> Result<Reply, ListenerError> {
        if !self.catch_panics {
            return callback.call(event);
        }

        catch_unwind(AssertUnwindSafe(|| callback.call(event)))
            .unwrap_or_else(|payload| Err(ListenerError::from_panic(payload)))
    }
}

impl<A> Default for EventHub<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventHub<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("label", &self.label)
            .field("events", &self.event_names())
            .field("catch_panics", &self.catch_panics)
            .finish()
    }
}
