//! Percent-encoding utilities.

pub mod encoder;
mod estring;
pub mod table;

pub use estring::EString;
pub use table::Table;

use alloc::{
    borrow::{Cow, ToOwned},
    string::String,
    vec::Vec,
};
use core::{fmt, hash, marker::PhantomData};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A trait used by [`EStr`] and [`EString`] to specify the table used for encoding.
///
/// # Sub-encoders
///
/// A sub-encoder `SubE` of `E` is an encoder such that `SubE::TABLE` is a [subset] of `E::TABLE`.
///
/// [subset]: Table::is_subset
pub trait Encoder: 'static {
    /// The table used for encoding.
    const TABLE: Table;
}

/// Percent-encoded string slices.
///
/// The owned counterpart of `EStr` is [`EString`].
///
/// An `EStr<E>` is what the builder accepts wherever a caller already holds
/// percent-encoded text: the contents are validated against `E::TABLE` once,
/// on construction, and are then emitted verbatim instead of being encoded again.
///
/// # Examples
///
/// ```
/// use uribuilder_tiny::{pct_enc::{encoder::Segment, EStr}, UriBuilder};
///
/// let uri = UriBuilder::new()
///     .with_scheme("https")
///     .with_host("example.com")
///     .append_path(EStr::<Segment>::new_or_panic("caf%C3%A9"))
///     .append_path("menü")
///     .build()
///     .unwrap();
/// assert_eq!(uri, "https://example.com/caf%C3%A9/men%C3%BC");
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr<E: Encoder> {
    encoder: PhantomData<E>,
    inner: str,
}

struct Assert<L: Encoder, R: Encoder> {
    _marker: PhantomData<(L, R)>,
}

impl<L: Encoder, R: Encoder> Assert<L, R> {
    const L_IS_SUB_ENCODER_OF_R: () = assert!(L::TABLE.is_subset(R::TABLE), "not a sub-encoder");
}

impl<E: Encoder> EStr<E> {
    const ASSERT_ALLOWS_PCT_ENCODED: () = assert!(
        E::TABLE.allows_pct_encoded(),
        "table does not allow percent-encoded octets"
    );

    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Panics
    ///
    /// Panics if the string is not properly encoded with `E`.
    /// For a non-panicking variant, use [`new`](Self::new).
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Self {
        match Self::new(s) {
            Some(s) => s,
            None => panic!("improperly encoded string"),
        }
    }

    /// Converts a string slice to an `EStr` slice, returning `None` if the conversion fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use uribuilder_tiny::pct_enc::{encoder::QueryParam, EStr};
    ///
    /// assert!(EStr::<QueryParam>::new("caf%C3%A9").is_some());
    /// assert!(EStr::<QueryParam>::new("a=b").is_none());
    /// assert!(EStr::<QueryParam>::new("100%").is_none());
    /// ```
    #[must_use]
    pub const fn new(s: &str) -> Option<&Self> {
        if E::TABLE.validate(s.as_bytes()) {
            Some(Self::new_validated(s))
        } else {
            None
        }
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a decoder for the `EStr` slice.
    ///
    /// Always **split before decoding**, as otherwise the data may be
    /// mistaken for component delimiters.
    ///
    /// `U+002B` (+) is **not** decoded as `0x20` (space).
    ///
    /// # Panics
    ///
    /// Panics at compile time if `E::TABLE` does not [allow percent-encoded octets].
    ///
    /// [allow percent-encoded octets]: Table::allows_pct_encoded
    ///
    /// # Examples
    ///
    /// ```
    /// use uribuilder_tiny::pct_enc::{encoder::Segment, EStr};
    ///
    /// let dec = EStr::<Segment>::new_or_panic("%C2%A1Hola%21").decode();
    /// assert_eq!(*dec.clone().to_bytes(), [0xc2, 0xa1, 0x48, 0x6f, 0x6c, 0x61, 0x21]);
    /// assert_eq!(dec.to_string().unwrap(), "¡Hola!");
    /// ```
    pub fn decode(&self) -> Decode<'_> {
        () = Self::ASSERT_ALLOWS_PCT_ENCODED;
        Decode::new(&self.inner)
    }

    /// Returns an iterator over subslices of the `EStr` slice separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use uribuilder_tiny::pct_enc::{encoder::Query, EStr};
    ///
    /// assert!(EStr::<Query>::new_or_panic("a&b&c").split('&').eq(["a", "b", "c"]));
    /// assert!(EStr::<Query>::new_or_panic("&").split('&').eq(["", ""]));
    /// assert!(EStr::<Query>::EMPTY.split('&').eq([""]));
    /// ```
    pub fn split(&self, delim: char) -> impl DoubleEndedIterator<Item = &Self> + '_ {
        assert_reserved(delim);
        self.inner.split(delim).map(Self::new_validated)
    }

    /// Splits the `EStr` slice on the first occurrence of the given delimiter and
    /// returns prefix before delimiter and suffix after delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert_reserved(delim);
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }

    // Splitting on a delimiter that a narrower encoder does not allow
    // leaves pieces that are valid under it.
    pub(crate) fn cast<F: Encoder>(&self) -> &EStr<F> {
        debug_assert!(F::TABLE.validate(self.inner.as_bytes()));
        EStr::new_validated(&self.inner)
    }
}

impl<E: Encoder> AsRef<str> for EStr<E> {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl<E: Encoder> PartialEq for EStr<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<E: Encoder> PartialEq<str> for EStr<E> {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl<E: Encoder> PartialEq<EStr<E>> for str {
    fn eq(&self, other: &EStr<E>) -> bool {
        self == &other.inner
    }
}

impl<E: Encoder> Eq for EStr<E> {}

impl<E: Encoder> hash::Hash for EStr<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<E: Encoder> ToOwned for EStr<E> {
    type Owned = EString<E>;

    fn to_owned(&self) -> EString<E> {
        EString::new_validated(self.inner.to_owned())
    }
}

impl<E: Encoder> fmt::Debug for EStr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<E: Encoder> fmt::Display for EStr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

fn assert_reserved(delim: char) {
    assert!(
        table::RESERVED.allows(delim),
        "splitting with non-reserved character"
    );
}

pub(crate) const fn is_hexdig_pair(x: u8, y: u8) -> bool {
    x.is_ascii_hexdigit() && y.is_ascii_hexdigit()
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn hex_value(x: u8) -> u8 {
    match x {
        b'0'..=b'9' => x - b'0',
        b'A'..=b'F' => x - b'A' + 10,
        _ => x - b'a' + 10,
    }
}

/// Percent-encodes `s` with `table` and appends the result onto `buf`.
///
/// Each byte of a character the table does not allow is written as `%XX`
/// with uppercase hex digits.
pub(crate) fn encode_to(table: Table, s: &str, buf: &mut String) {
    buf.reserve(s.len());
    let mut utf8 = [0; 4];
    for ch in s.chars() {
        if table.allows(ch) {
            buf.push(ch);
            continue;
        }
        for &x in ch.encode_utf8(&mut utf8).as_bytes() {
            buf.push('%');
            buf.push(HEX_UPPER[usize::from(x >> 4)].into());
            buf.push(HEX_UPPER[usize::from(x & 0xf)].into());
        }
    }
}

/// A decoder for an [`EStr`] slice, created by [`EStr::decode`].
#[derive(Clone, Debug)]
#[must_use]
pub struct Decode<'a> {
    source: &'a str,
}

impl<'a> Decode<'a> {
    // `source` must be properly percent-encoded.
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn decode_owned(&self) -> Vec<u8> {
        let bytes = self.source.as_bytes();
        let mut buf = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                buf.push((hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2]));
                i += 3;
            } else {
                buf.push(bytes[i]);
                i += 1;
            }
        }
        buf
    }

    fn is_unencoded(&self) -> bool {
        !self.source.contains('%')
    }

    /// Decodes the slice to bytes.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    #[must_use]
    pub fn to_bytes(self) -> Cow<'a, [u8]> {
        if self.is_unencoded() {
            Cow::Borrowed(self.source.as_bytes())
        } else {
            Cow::Owned(self.decode_owned())
        }
    }

    /// Attempts to decode the slice to a string.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    ///
    /// # Errors
    ///
    /// Returns `Err` containing the decoded bytes if they are not valid UTF-8.
    pub fn to_string(self) -> Result<Cow<'a, str>, Vec<u8>> {
        if self.is_unencoded() {
            return Ok(Cow::Borrowed(self.source));
        }
        String::from_utf8(self.decode_owned())
            .map(Cow::Owned)
            .map_err(|e| e.into_bytes())
    }

    /// Decodes the slice to a string, replacing any invalid UTF-8 sequences with
    /// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
    ///
    /// [U+FFFD]: char::REPLACEMENT_CHARACTER
    #[must_use]
    pub fn to_string_lossy(self) -> Cow<'a, str> {
        if self.is_unencoded() {
            return Cow::Borrowed(self.source);
        }
        Cow::Owned(String::from_utf8_lossy(&self.decode_owned()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    fn encode(table: Table, s: &str) -> String {
        let mut buf = String::new();
        encode_to(table, s, &mut buf);
        buf
    }

    #[test]
    fn encode_multibyte() {
        assert_eq!(encode(table::UNRESERVED, "a b€c"), "a%20b%E2%82%ACc");
        assert_eq!(encode(table::UNRESERVED, ""), "");
        assert_eq!(encode(table::UNRESERVED, "\0\u{ff}"), "%00%C3%BF");
    }

    #[test]
    fn encode_appends() {
        let mut buf = String::from("x=");
        encode_to(table::QUERY_PARAM, "1&2", &mut buf);
        assert_eq!(buf, "x=1%262");
    }

    #[test]
    fn decode_mixed_case_hex() {
        assert_eq!(Decode::new("a%2Fb%2f").to_string().unwrap(), "a/b/");
        assert_eq!(*Decode::new("%aB%Cd").to_bytes(), [0xab, 0xcd]);
    }

    #[test]
    fn decode_invalid_utf8() {
        let dec = Decode::new("%FFa");
        assert_eq!(dec.clone().to_string(), Err(vec![0xff, b'a']));
        assert_eq!(dec.to_string_lossy(), "\u{FFFD}a");
    }

    #[test]
    fn decode_borrows_unencoded() {
        assert!(matches!(Decode::new("abc").to_bytes(), Cow::Borrowed(b"abc")));
        assert!(matches!(Decode::new("").to_string(), Ok(Cow::Borrowed(""))));
        assert_eq!(Decode::new("x%20y").to_string_lossy().to_string(), "x y");
    }
}
