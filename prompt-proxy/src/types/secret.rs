use std::fmt::{self, Debug, Display, Formatter};

const REDACTED: &str = "*****";

/// A wrapper around a type containing secrets, e.g. the upstream API key.
///
/// The wrapped value can only be reached through [`Secret::expose`]. The
/// [`Debug`], [`Display`] and [`serde::Serialize`] impls never print the
/// inner value, so a `Secret` can sit inside the config without leaking into
/// logs or the printed configuration.
#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(transparent)]
pub struct Secret<T>(T);

impl<T> Secret<T>
where
    T: AsRef<str>,
{
    pub fn expose(&self) -> &str {
        self.0.as_ref()
    }

    /// Drops secrets that are empty or only whitespace, which is what an
    /// unset-but-declared environment variable usually looks like.
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        if self.0.as_ref().trim().is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> serde::Serialize for Secret<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

impl<T> Debug for Secret<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Display for Secret<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_prints_inner_value() {
        let secret = Secret::from("AIza-very-secret".to_string());
        assert_eq!(format!("{secret}"), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(
            serde_json::to_string(&secret).unwrap(),
            format!("\"{REDACTED}\"")
        );
        assert_eq!(secret.expose(), "AIza-very-secret");
    }

    #[test]
    fn blank_secrets_are_dropped() {
        assert!(Secret::from(String::new()).non_empty().is_none());
        assert!(Secret::from("  ".to_string()).non_empty().is_none());
        assert!(Secret::from("key".to_string()).non_empty().is_some());
    }
}
