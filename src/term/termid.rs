use core::fmt::Debug;
use std::fmt::Display;

use crate::{PhenoError, PhenoResult};

/// Returns the byte position of the `:` separating prefix and value
///
/// Both prefix and value must be non-empty and must not contain whitespace.
pub(crate) fn separator_position(s: &str) -> PhenoResult<usize> {
    let Some(idx) = s.find(':') else {
        return Err(PhenoError::InvalidId(s.to_string()));
    };
    if idx == 0 || idx + 1 == s.len() || s.chars().any(char::is_whitespace) {
        return Err(PhenoError::InvalidId(s.to_string()));
    }
    Ok(idx)
}

/// Unique identifier of a [`Term`](`crate::Term`), e.g. `HP:0002066`
///
/// A `TermId` always has the shape `<PREFIX>:<value>`. The prefix names the
/// vocabulary, the value identifies the term within it. Both parts are
/// kept as plain strings, no numerical format is assumed.
///
/// # Examples
///
/// ```
/// use phenodiff::TermId;
///
/// let id = TermId::try_from("HP:0002066").unwrap();
/// assert_eq!(id.prefix(), "HP");
/// assert_eq!(id.value(), "0002066");
/// assert_eq!(id.to_string(), "HP:0002066");
///
/// assert!(TermId::try_from("0002066").is_err());
/// assert!(TermId::try_from("HP:").is_err());
/// ```
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TermId {
    inner: String,
    sep: usize,
}

impl TermId {
    /// Returns the vocabulary prefix, e.g. `HP`
    pub fn prefix(&self) -> &str {
        &self.inner[..self.sep]
    }

    /// Returns the part after the `:`, e.g. `0002066`
    pub fn value(&self) -> &str {
        &self.inner[self.sep + 1..]
    }

    /// Returns the full identifier as `str`
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl TryFrom<&str> for TermId {
    type Error = PhenoError;
    fn try_from(s: &str) -> PhenoResult<Self> {
        let sep = separator_position(s)?;
        Ok(TermId {
            inner: s.to_string(),
            sep,
        })
    }
}

impl TryFrom<String> for TermId {
    type Error = PhenoError;
    fn try_from(s: String) -> PhenoResult<Self> {
        let sep = separator_position(&s)?;
        Ok(TermId { inner: s, sep })
    }
}

impl AsRef<str> for TermId {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Debug for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermId({})", self)
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq<str> for TermId {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for TermId {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}
