use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// The object a listener is bound to.
///
/// Listeners registered without a context are bound to the hub dispatching
/// them. Contexts compare by identity, never by value.
#[derive(Clone, Default)]
pub enum Context {
    #[default]
    Hub,
    Object(Rc<dyn Any>),
}

impl Context {
    pub fn new<T: Any>(object: Rc<T>) -> Self {
        Context::Object(object)
    }

    pub fn is_hub(&self) -> bool {
        matches!(self, Context::Hub)
    }

    /// Gets the bound object as a `T`, if it is one.
    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        match self {
            Context::Hub => None,
            Context::Object(object) => Rc::clone(object).downcast::<T>().ok(),
        }
    }

    /// Whether both contexts refer to the same object.
    pub fn same(&self, other: &Context) -> bool {
        match (self, other) {
            (Context::Hub, Context::Hub) => true,
            (Context::Object(a), Context::Object(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl<T: Any> From<Rc<T>> for Context {
    fn from(object: Rc<T>) -> Self {
        Context::new(object)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Hub => write!(f, "Context::Hub"),
            Context::Object(object) => write!(f, "Context::Object({:p})", Rc::as_ptr(object) as *const ()),
        }
    }
}
