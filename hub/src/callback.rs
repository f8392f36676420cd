use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::{Event, ListenerError};

/// What a listener hands back to [trigger](crate::EventHub::trigger), and the
/// aggregate of a whole dispatch.
///
/// `Reject` is contagious: once any listener in a dispatch rejects, the
/// aggregate stays `Reject`. `Silent` never overrides an earlier reply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    #[default]
    Silent,
    Accept,
    Reject,
}

impl Reply {
    /// True unless some listener rejected the event.
    pub fn passed(self) -> bool {
        self != Reply::Reject
    }

    /// Folds the reply of one listener into the running aggregate.
    pub(crate) fn merge(self, reply: Reply) -> Reply {
        match (self, reply) {
            (Reply::Reject, _) | (_, Reply::Reject) => Reply::Reject,
            (_, Reply::Accept) => Reply::Accept,
            (aggregate, Reply::Silent) => aggregate,
        }
    }
}

impl From<()> for Reply {
    fn from(_: ()) -> Self {
        Reply::Silent
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        if value { Reply::Accept } else { Reply::Reject }
    }
}

impl From<Option<bool>> for Reply {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Reply::Silent, Reply::from)
    }
}

/// Return types a listener closure may have. Plain replies always succeed,
/// a `Result` reports its error to the hub's diagnostics.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Reply, ListenerError>;
}

macro_rules! reply_outcome {
    ($($reply:ty),* $(,)?) => {
        $(
            impl IntoOutcome for $reply {
                fn into_outcome(self) -> Result<Reply, ListenerError> {
                    Ok(self.into())
                }
            }
        )*
    };
}

reply_outcome!((), bool, Option<bool>, Reply);

impl<T, E> IntoOutcome for Result<T, E>
    where T: Into<Reply>,
          E: Into<Box<dyn Error>> {
    fn into_outcome(self) -> Result<Reply, ListenerError> {
        self.map(Into::into)
            .map_err(|err| ListenerError::Failed(err.into()))
    }
}

type ListenerFn<A> = dyn Fn(&Event<'_, A>) -> Result<Reply, ListenerError>;

/// Shared handle to a listener function.
///
/// Clones refer to the same function, and [off](crate::EventHub::off) removes
/// registrations by that identity. Keep a clone around to remove a listener
/// later.
pub struct Callback<A> {
    function: Rc<ListenerFn<A>>,
}

impl<A> Callback<A> {
    pub fn new<F, O>(function: F) -> Self
        where F: 'static + Fn(&Event<'_, A>) -> O,
              O: IntoOutcome {
        let function: Rc<ListenerFn<A>> = Rc::new(move |event: &Event<'_, A>| {
            function(event).into_outcome()
        });
        Callback { function }
    }

    /// Whether both handles refer to the same listener function.
    pub fn ptr_eq(&self, other: &Callback<A>) -> bool {
        Rc::as_ptr(&self.function) as *const () == Rc::as_ptr(&other.function) as *const ()
    }

    pub(crate) fn call(&self, event: &Event<'_, A>) -> Result<Reply, ListenerError> {
        (self.function)(event)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Callback { function: Rc::clone(&self.function) }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.function) as *const ())
    }
}
