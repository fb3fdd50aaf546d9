/// Presence of an external capability, resolved once at startup.
///
/// The hosting environment may or may not expose a speech engine. Rather
/// than probing ambient globals at each call site, the composition root
/// resolves each capability exactly once and injects the result; consumers
/// degrade to a logged no-op on `Unavailable`.
#[derive(Debug)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// Borrow the capability if present.
    pub fn available(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => Capability::Available(inner),
            None => Capability::Unavailable,
        }
    }
}
