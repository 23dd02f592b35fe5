use std::fmt::{Display, Formatter};

/// The two blocking notifications a lookup can raise.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Alert {
    ProductNotFound,
    LookupFailed,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::ProductNotFound => "No product found with the given ID.",
            Alert::LookupFailed => "Error fetching product or product not found.",
        }
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Signals the user synchronously. Implementations must not return until the
/// message has been delivered.
pub trait Notifier: Send + Sync {
    fn alert(&self, alert: Alert);
}
