use crate::{error::ParseError, UriBuilder};
use alloc::string::String;
use borrow_or_share::{BorrowOrShare, Bos};
use core::{borrow::Borrow, cmp::Ordering, hash, str::FromStr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub trait Parse {
    type Val;
    type Err;

    fn parse(self) -> Result<BaseUri<Self::Val>, Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError;

    fn parse(self) -> Result<BaseUri<Self::Val>, Self::Err> {
        UriBuilder::parse(self).map(|proto| BaseUri { val: self, proto })
    }
}

impl Parse for String {
    type Val = Self;
    type Err = (ParseError, Self);

    fn parse(self) -> Result<BaseUri<Self::Val>, Self::Err> {
        match UriBuilder::parse(&self) {
            Ok(proto) => Ok(BaseUri { val: self, proto }),
            Err(e) => Err((e, self)),
        }
    }
}

/// A base URI reference that hands out pre-filled builders.
///
/// The base is parsed once, on construction. Each call to [`builder`]
/// returns an independent [`UriBuilder`] holding the components of the base,
/// so a single `BaseUri` can be shared and reused for any number of URIs.
///
/// The generic parameter `T` is either `&str` or [`String`].
///
/// [`builder`]: Self::builder
///
/// # Examples
///
/// ```
/// use uribuilder_tiny::BaseUri;
///
/// let api = BaseUri::parse("https://api.example.com/v2?key=abc")?;
///
/// let users = api.builder().append_path("users").build()?;
/// let repo = api
///     .builder()
///     .append_paths(["repos", "a b"])
///     .add_query_param("page", "2")
///     .build()?;
///
/// assert_eq!(users, "https://api.example.com/v2/users?key=abc");
/// assert_eq!(repo, "https://api.example.com/v2/repos/a%20b?key=abc&page=2");
/// assert_eq!(api.as_str(), "https://api.example.com/v2?key=abc");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct BaseUri<T> {
    val: T,
    proto: UriBuilder,
}

impl<T> BaseUri<T> {
    /// Parses a base URI reference from a string into a `BaseUri`.
    ///
    /// The return type is
    ///
    /// - `Result<BaseUri<&str>, ParseError>` for `I = &str`;
    /// - `Result<BaseUri<String>, (ParseError, String)>` for `I = String`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a valid URI reference.
    /// See [`UriBuilder::parse`] for details.
    pub fn parse<I>(input: I) -> Result<Self, I::Err>
    where
        I: Parse<Val = T>,
    {
        input.parse()
    }

    /// Returns a new builder pre-filled with the components of this base.
    pub fn builder(&self) -> UriBuilder {
        self.proto.clone()
    }

    pub(crate) fn as_builder(&self) -> &UriBuilder {
        &self.proto
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> BaseUri<T> {
    /// Returns the base URI reference as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<BaseUri<U>> for BaseUri<T> {
    fn eq(&self, other: &BaseUri<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<str> for BaseUri<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<&str> for BaseUri<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> Eq for BaseUri<T> {}

impl<T: Bos<str>> hash::Hash for BaseUri<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for BaseUri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for BaseUri<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Bos<str>> AsRef<str> for BaseUri<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bos<str>> Borrow<str> for BaseUri<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> TryFrom<&'a str> for BaseUri<&'a str> {
    type Error = ParseError;

    /// Equivalent to [`parse`](Self::parse).
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        BaseUri::parse(value)
    }
}

impl TryFrom<String> for BaseUri<String> {
    type Error = (ParseError, String);

    /// Equivalent to [`parse`](Self::parse).
    fn try_from(value: String) -> Result<Self, Self::Error> {
        BaseUri::parse(value)
    }
}

impl<'a> From<BaseUri<&'a str>> for &'a str {
    /// Equivalent to [`as_str`](BaseUri::as_str).
    fn from(value: BaseUri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<BaseUri<String>> for String {
    fn from(value: BaseUri<String>) -> String {
        value.val
    }
}

impl FromStr for BaseUri<String> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriBuilder::parse(s).map(|proto| BaseUri {
            val: s.into(),
            proto,
        })
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for BaseUri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de: 'a, 'a> Deserialize<'de> for BaseUri<&'a str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        BaseUri::parse(s).map_err(|e| {
            de::Error::custom(format_args!("failed to parse {s:?} as base URI: {e}"))
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for BaseUri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUri::parse(s).map_err(|(e, s)| {
            de::Error::custom(format_args!("failed to parse {s:?} as base URI: {e}"))
        })
    }
}
