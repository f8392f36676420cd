use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Callback, Context};

/// One registration of a callback, bound to a context, under one event name.
pub(crate) struct Listener<A> {
    pub(crate) callback: Callback<A>,
    pub(crate) context: Context,
    fired: Option<Rc<Cell<bool>>>,
}

impl<A> Listener<A> {
    pub(crate) fn new(callback: Callback<A>, context: Context) -> Self {
        Listener { callback, context, fired: None }
    }

    /// A listener that is only ever invoked once.
    pub(crate) fn once(callback: Callback<A>, context: Context) -> Self {
        Listener { callback, context, fired: Some(Rc::new(Cell::new(false))) }
    }

    pub(crate) fn is_once(&self) -> bool {
        self.fired.is_some()
    }

    /// Claims the right to invoke this listener. Always succeeds for regular
    /// listeners; once listeners succeed a single time.
    pub(crate) fn claim(&self) -> bool {
        match &self.fired {
            None => true,
            Some(fired) => !fired.replace(true),
        }
    }

    fn matches(&self, callback: Option<&Callback<A>>, context: Option<&Context>) -> bool {
        callback.map_or(true, |callback| self.callback.ptr_eq(callback))
            && context.map_or(true, |context| self.context.same(context))
    }

    fn is_registration(&self, other: &Listener<A>) -> bool {
        match (&self.fired, &other.fired) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Listener {
            callback: self.callback.clone(),
            context: self.context.clone(),
            fired: self.fired.clone(),
        }
    }
}

/// Listener list as seen by a dispatch. Holding one keeps it unchanged no
/// matter what the registry does afterwards.
pub(crate) type Snapshot<A> = Rc<Vec<Listener<A>>>;

/// Event name to listeners, in registration order.
///
/// Lists are never edited while shared: adding copies the list if a dispatch
/// still holds it, removing always builds a replacement.
pub(crate) struct Registry<A> {
    lists: HashMap<String, Snapshot<A>>,
}

impl<A> Registry<A> {
    pub(crate) fn new() -> Self {
        Registry { lists: HashMap::new() }
    }

    pub(crate) fn add(&mut self, name: &str, listener: Listener<A>) {
        let list = self.lists.entry(name.to_owned()).or_default();
        Rc::make_mut(list).push(listener);
    }

    pub(crate) fn snapshot(&self, name: &str) -> Option<Snapshot<A>> {
        self.lists.get(name).cloned()
    }

    /// Removes the listeners under `names` (every name when [None]) matching
    /// both filters. Returns the number of listeners removed.
    pub(crate) fn remove(&mut self, names: Option<&[&str]>, callback: Option<&Callback<A>>, context: Option<&Context>) -> usize {
        let keys: Vec<String> = match names {
            Some(names) => names.iter().map(|name| (*name).to_owned()).collect(),
            None => self.lists.keys().cloned().collect(),
        };

        let mut removed = 0;
        for key in keys {
            removed += self.retain(&key, |listener| !listener.matches(callback, context));
        }
        removed
    }

    /// Removes one specific once-registration from under `name`.
    pub(crate) fn remove_registration(&mut self, name: &str, registration: &Listener<A>) {
        self.retain(name, |listener| !listener.is_registration(registration));
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.lists.get(name).map_or(0, |list| list.len())
    }

    pub(crate) fn names(&self) -> impl Iterator<Item=&str> {
        self.lists.keys().map(String::as_str)
    }

    fn retain(&mut self, name: &str, keep: impl Fn(&Listener<A>) -> bool) -> usize {
        let Some(list) = self.lists.get(name) else {
            return 0;
        };

        let kept: Vec<Listener<A>> = list.iter().filter(|listener| keep(listener)).cloned().collect();
        let removed = list.len() - kept.len();

        if kept.is_empty() {
            self.lists.remove(name);
        } else if removed > 0 {
            self.lists.insert(name.to_owned(), Rc::new(kept));
        }
        removed
    }
}
