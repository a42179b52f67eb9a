use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for passenger identity numbers and other sensitive strings.
///
/// `Debug` and `Display` never print the wrapped value, so a `Passenger`
/// can go through `tracing::info!("{:?}", ..)` safely. Serialization passes
/// the real value through because API clients need it back.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    /// Last four characters with everything before them starred out,
    /// e.g. `********9012`. Values of four characters or less are fully starred.
    pub fn redacted(&self) -> String {
        let raw = self.0.as_ref();
        let len = raw.chars().count();
        if len <= 4 {
            return "*".repeat(len);
        }
        let tail: String = raw.chars().skip(len - 4).collect();
        format!("{}{}", "*".repeat(len - 4), tail)
    }

    pub fn expose(&self) -> &str {
        self.0.as_ref()
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Masked(value.to_string())
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Masked(value)
    }
}
