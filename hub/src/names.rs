/// Name of the wildcard channel. Listeners registered under it are notified of
/// every event the hub dispatches, after that event's own listeners.
pub const ALL: &str = "all";

/// Splits a multi-event string such as `"change:name change:age"` into the
/// individual event names, in the order they appear.
pub(crate) fn split(names: &str) -> impl Iterator<Item=&str> {
    names.split_whitespace()
}

pub(crate) fn is_all(name: &str) -> bool {
    name == ALL
}
