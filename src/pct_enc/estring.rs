use super::{encode_to, Assert, EStr, Encoder};
use alloc::{borrow::ToOwned, string::String};
use core::{borrow::Borrow, fmt, hash, marker::PhantomData, ops::Deref};

/// A percent-encoded, growable string.
///
/// The borrowed counterpart of `EString` is [`EStr`].
/// See its documentation for the meaning of the type parameter `E`.
///
/// # Examples
///
/// Encode a path segment that contains the slash (`'/'`) character:
///
/// ```
/// use uribuilder_tiny::{pct_enc::{encoder::Segment, EString}, UriBuilder};
///
/// let mut seg = EString::<Segment>::new();
/// seg.encode_str::<Segment>("2024/05");
/// seg.push('-');
/// seg.encode_str::<Segment>("report");
/// assert_eq!(seg, "2024%2F05-report");
///
/// let uri = UriBuilder::new().append_path(seg).build().unwrap();
/// assert_eq!(uri, "/2024%2F05-report");
/// ```
pub struct EString<E: Encoder> {
    buf: String,
    encoder: PhantomData<E>,
}

// Implemented by hand to avoid bounds on `E`.
impl<E: Encoder> Clone for EString<E> {
    fn clone(&self) -> Self {
        Self::new_validated(self.buf.clone())
    }
}

impl<E: Encoder> Default for EString<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoder> Deref for EString<E> {
    type Target = EStr<E>;

    fn deref(&self) -> &EStr<E> {
        EStr::new_validated(&self.buf)
    }
}

impl<E: Encoder> EString<E> {
    pub(crate) fn new_validated(buf: String) -> Self {
        Self {
            buf,
            encoder: PhantomData,
        }
    }

    /// Creates a new empty `EString`.
    #[must_use]
    pub fn new() -> Self {
        Self::new_validated(String::new())
    }

    /// Percent-encodes a string with `E` into a new `EString`.
    ///
    /// ```
    /// use uribuilder_tiny::pct_enc::{encoder::QueryParam, EString};
    ///
    /// assert_eq!(EString::<QueryParam>::encode("a=1 & b"), "a%3D1%20%26%20b");
    /// ```
    #[must_use]
    pub fn encode(s: &str) -> Self {
        let mut buf = String::new();
        encode_to(E::TABLE, s, &mut buf);
        Self::new_validated(buf)
    }

    /// Coerces to an `EStr` slice.
    #[must_use]
    pub fn as_estr(&self) -> &EStr<E> {
        self
    }

    /// Percent-encodes a string with a sub-encoder and appends it.
    ///
    /// Characters that `SubE::TABLE` [allows] are kept and all others are
    /// percent-encoded, so a space becomes `%20`.
    ///
    /// [allows]: super::Table::allows
    ///
    /// # Panics
    ///
    /// Panics at compile time if `SubE` is not a [sub-encoder](Encoder#sub-encoders) of `E`,
    /// or if `SubE::TABLE` does not [allow percent-encoded octets].
    ///
    /// [allow percent-encoded octets]: super::Table::allows_pct_encoded
    pub fn encode_str<SubE: Encoder>(&mut self, s: &str) {
        () = Assert::<SubE, E>::L_IS_SUB_ENCODER_OF_R;
        () = EStr::<SubE>::ASSERT_ALLOWS_PCT_ENCODED;

        encode_to(SubE::TABLE, s, &mut self.buf);
    }

    /// Appends an unencoded character onto the end of this `EString`.
    ///
    /// # Panics
    ///
    /// Panics if `E::TABLE` does not [allow] the character.
    ///
    /// [allow]: super::Table::allows
    pub fn push(&mut self, ch: char) {
        assert!(E::TABLE.allows(ch), "table does not allow the char");
        self.buf.push(ch);
    }

    /// Appends an `EStr` slice onto the end of this `EString`.
    pub fn push_estr(&mut self, s: &EStr<E>) {
        self.buf.push_str(s.as_str());
    }

    /// Consumes this `EString` and yields the underlying `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl<E: Encoder> AsRef<EStr<E>> for EString<E> {
    fn as_ref(&self) -> &EStr<E> {
        self
    }
}

impl<E: Encoder> AsRef<str> for EString<E> {
    fn as_ref(&self) -> &str {
        &self.buf
    }
}

impl<E: Encoder> Borrow<EStr<E>> for EString<E> {
    fn borrow(&self) -> &EStr<E> {
        self
    }
}

impl<E: Encoder> From<&EStr<E>> for EString<E> {
    fn from(s: &EStr<E>) -> Self {
        s.to_owned()
    }
}

impl<E: Encoder> PartialEq for EString<E> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<E: Encoder> PartialEq<EStr<E>> for EString<E> {
    fn eq(&self, other: &EStr<E>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<E: Encoder> PartialEq<str> for EString<E> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<E: Encoder> PartialEq<&str> for EString<E> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<E: Encoder> Eq for EString<E> {}

impl<E: Encoder> hash::Hash for EString<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.buf.hash(state);
    }
}

impl<E: Encoder> fmt::Debug for EString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.buf, f)
    }
}

impl<E: Encoder> fmt::Display for EString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.buf, f)
    }
}
