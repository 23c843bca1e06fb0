use crate::engine::InstanceId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// [`crate::Engine::render`] was called without a root element.
    #[error("cannot render an absent root element")]
    InvalidInput,

    #[error("invalid element type: {0:?}")]
    InvalidElementType(String),

    /// The state hook was used outside of a component render.
    #[error("use_state must be called inside a component render")]
    NoActiveComponent,

    #[error("component instance {0} does not exist")]
    InstanceNotFound(InstanceId),

    /// A hook slot holds a value of a different type than requested.
    ///
    /// Happens when a component does not call its hooks in the same order on
    /// every render.
    #[error("hook slot {slot} of instance {instance} does not hold a `{expected}`")]
    HookTypeMismatch {
        instance: InstanceId,
        slot: usize,
        expected: &'static str,
    },

    /// A setter refers to a slot its instance never claimed.
    #[error("instance {instance} has no hook slot {slot}")]
    MissingHookSlot { instance: InstanceId, slot: usize },

    #[error("dom operation '{op}' failed: {message}")]
    Backend { op: &'static str, message: String },
}

impl Error {
    pub(crate) fn backend(op: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            op,
            message: message.into(),
        }
    }
}
