//! Module for URI reference building.

mod imp;

pub(crate) use imp::{Components, HostData, Piece, QueryPair, TrailingSlash};

use imp::{AsHost, IntoPiece};

use crate::{
    component::Host,
    error::{BuildError, ParseError},
    pct_enc::{
        encoder::{Fragment, Path, QueryParam, Segment, Userinfo},
        EStr,
    },
};
use alloc::{borrow::Cow, string::String};
use core::str::FromStr;

/// A builder for URI references.
///
/// A `UriBuilder` accumulates components in their logical (unencoded) form and
/// percent-encodes them only when [`build`] is called. Every setter consumes
/// the builder and returns it, and none of them fail: the components are
/// validated as a whole by [`build`], which can be called any number of times.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use uribuilder_tiny::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .with_scheme("https")
///     .with_host("example.com")
///     .append_paths(["a b", "c"])
///     .add_query_param("q", "1 2")
///     .build()
///     .unwrap();
///
/// assert_eq!(uri, "https://example.com/a%20b/c?q=1%202");
/// ```
///
/// Starting from a base URI:
///
/// ```
/// use uribuilder_tiny::UriBuilder;
///
/// let uri = UriBuilder::parse("http://example.com:8080/api?v=1")?
///     .append_path("users")
///     .append_path("a/b")
///     .set_query_param("v", "2")
///     .with_fragment("top")
///     .build()?;
///
/// assert_eq!(uri, "http://example.com:8080/api/users/a%2Fb?v=2#top");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// Text that is already percent-encoded can be passed as
/// an [`EStr`] or [`EString`], in which case it is emitted verbatim.
///
/// [`build`]: Self::build
/// [`EStr`]: crate::pct_enc::EStr
/// [`EString`]: crate::pct_enc::EString
///
/// # Output policy
///
/// - `"//"` is written only when a host is present. A host without a scheme
///   yields a network-path reference such as `//example.com:8080`.
/// - Each path segment is preceded by `'/'`. Empty segments are kept,
///   so `append_path("")` produces adjacent slashes.
/// - A query parameter with an empty value renders as `key=`, while one
///   added with [`add_query_key`] renders as `key`.
/// - A path segment of `"."` or `".."` cannot be written so that a URI parser
///   keeps it, so [`build`] rejects it with [`BuildError::DotSegment`].
///   Percent-encoded segments and those of a parsed base are written as given.
/// - An empty fragment renders as a bare `'#'`.
/// - An empty builder builds the empty string.
///
/// [`add_query_key`]: Self::add_query_key
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[must_use]
pub struct UriBuilder {
    inner: Components,
}

impl UriBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled with the components of a base URI reference.
    ///
    /// The components are validated against their RFC 3986 syntax and kept
    /// as percent-encoded text, so they are never encoded again on output.
    /// No normalization is performed, but the output of [`build`](Self::build)
    /// can still differ from `s`:
    ///
    /// - A rootless path is written back as an absolute one, so `mailto:a@b`
    ///   builds `mailto:/a@b` and `a/b` builds `/a/b`.
    /// - An empty query is dropped, as are empty `&`-separated terms:
    ///   `http://h/?` builds `http://h/`.
    /// - An empty port is dropped, and leading zeros of a port are removed.
    ///
    /// A path ending in `'/'` keeps its slash until segments are appended
    /// or replaced. See [`with_trailing_slash`](Self::with_trailing_slash).
    ///
    /// IPvFuture literals such as `[v1.x]` are not supported and fail with
    /// [`InvalidIpv6Addr`](crate::error::ParseErrorKind::InvalidIpv6Addr).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a valid URI reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::parse("https://user@example.com/caf%C3%A9?a=1&b#frag")?;
    /// assert_eq!(b.scheme(), Some("https"));
    /// assert_eq!(b.userinfo().as_deref(), Some("user"));
    /// assert!(b.path_segments().eq(["café"]));
    /// assert_eq!(b.build()?, "https://user@example.com/caf%C3%A9?a=1&b#frag");
    ///
    /// assert!(UriBuilder::parse("http://[::1").is_err());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        crate::parse::parse(s).map(|inner| Self { inner })
    }

    /// Sets the [scheme] component.
    ///
    /// The scheme is checked by [`build`](Self::build) against
    /// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` and is never percent-encoded.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.inner.scheme = Some(scheme.into());
        self
    }

    /// Sets the [userinfo] subcomponent of authority.
    ///
    /// This method takes either a string (logical text) or
    /// an <code>[EStr]&lt;[Userinfo]&gt;</code> (percent-encoded text).
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    /// [EStr]: crate::pct_enc::EStr
    pub fn with_userinfo<U: IntoPiece<Userinfo>>(mut self, userinfo: U) -> Self {
        self.inner.userinfo = Some(userinfo.into_piece());
        self
    }

    /// Sets the [host] subcomponent of authority.
    ///
    /// This method takes an argument of one of the following types:
    ///
    /// - A string, taken as a logical registered name.
    /// - <code>&amp;[EStr]&lt;[RegName]&gt;</code>, taken as a percent-encoded registered name.
    /// - [`Ipv4Addr`] or [`Ipv6Addr`] or [`IpAddr`]. IPv6 addresses are written in brackets.
    ///
    /// An empty registered name still counts as a present host, as in `file:///etc/hosts`.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    /// [EStr]: crate::pct_enc::EStr
    /// [RegName]: crate::pct_enc::encoder::RegName
    /// [`Ipv4Addr`]: core::net::Ipv4Addr
    /// [`Ipv6Addr`]: core::net::Ipv6Addr
    /// [`IpAddr`]: core::net::IpAddr
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::Ipv4Addr;
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::new().with_scheme("http").with_host(Ipv4Addr::new(127, 0, 0, 1));
    /// assert_eq!(b.build().unwrap(), "http://127.0.0.1");
    ///
    /// let b = UriBuilder::new().with_scheme("file").with_host("").append_paths(["etc", "hosts"]);
    /// assert_eq!(b.build().unwrap(), "file:///etc/hosts");
    /// ```
    pub fn with_host<H: AsHost>(mut self, host: H) -> Self {
        self.inner.host = Some(host.into_host());
        self
    }

    /// Sets the [port] subcomponent of authority.
    ///
    /// Any integer type is accepted. A port outside `0..=65535` is accepted
    /// here and rejected by [`build`](Self::build). A value that does not fit
    /// in an `i64` is reported as `PortOutOfRange(i64::MAX)`.
    ///
    /// ```
    /// use uribuilder_tiny::{error::BuildError, UriBuilder};
    ///
    /// let b = UriBuilder::new().with_host("h");
    /// assert_eq!(b.clone().with_port(8080usize).build().unwrap(), "//h:8080");
    /// assert_eq!(
    ///     b.with_port(u64::MAX).build(),
    ///     Err(BuildError::PortOutOfRange(i64::MAX))
    /// );
    /// ```
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    pub fn with_port<P: TryInto<i64>>(mut self, port: P) -> Self {
        self.inner.port = Some(port.try_into().unwrap_or(i64::MAX));
        self
    }

    /// Sets the [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    pub fn with_fragment<F: IntoPiece<Fragment>>(mut self, fragment: F) -> Self {
        self.inner.fragment = Some(fragment.into_piece());
        self
    }

    /// Sets whether a `'/'` is written after the last path segment.
    ///
    /// A slash set here is kept however the path changes afterwards.
    /// A slash that ends a base path read by [`parse`](Self::parse) is different:
    /// it is dropped as soon as segments are appended or replaced, so that
    /// `https://h/v1/` with `"users"` appended builds `https://h/v1/users`.
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::new().with_host("example.com").append_path("dir");
    /// assert_eq!(b.clone().with_trailing_slash(true).build().unwrap(), "//example.com/dir/");
    /// assert_eq!(b.with_trailing_slash(false).build().unwrap(), "//example.com/dir");
    /// ```
    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.inner.trailing_slash = if trailing_slash {
            TrailingSlash::Explicit
        } else {
            TrailingSlash::Absent
        };
        self
    }

    /// Appends a path segment.
    ///
    /// A string is taken as logical text, so any `'/'` in it is
    /// percent-encoded. Use [`append_path_str`] to append several segments
    /// from a slash-separated string.
    ///
    /// [`append_path_str`]: Self::append_path_str
    pub fn append_path<S: IntoPiece<Segment>>(mut self, segment: S) -> Self {
        self.inner.extend_segments(Some(segment.into_piece()));
        self
    }

    /// Appends path segments in order.
    pub fn append_paths<I>(mut self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoPiece<Segment>,
    {
        self.inner
            .extend_segments(segments.into_iter().map(IntoPiece::into_piece));
        self
    }

    /// Replaces all path segments.
    pub fn set_paths<I>(mut self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoPiece<Segment>,
    {
        self.inner.clear_segments();
        self.append_paths(segments)
    }

    /// Splits a string on `'/'` and appends the pieces as path segments.
    ///
    /// Empty pieces are dropped, so leading, trailing and doubled slashes
    /// have no effect.
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::new().append_path_str("/a//b c/").append_path_str("d");
    /// assert!(b.path_segments().eq(["a", "b c", "d"]));
    /// assert_eq!(b.build().unwrap(), "/a/b%20c/d");
    /// ```
    pub fn append_path_str(self, path: &str) -> Self {
        self.append_paths(path.split('/').filter(|s| !s.is_empty()))
    }

    /// Replaces all path segments with the non-empty pieces of a string split on `'/'`.
    pub fn set_path_str(mut self, path: &str) -> Self {
        self.inner.clear_segments();
        self.append_path_str(path)
    }

    /// Splits a percent-encoded path on `'/'` and appends the non-empty pieces
    /// as path segments, which are emitted verbatim.
    ///
    /// ```
    /// use uribuilder_tiny::{pct_enc::{encoder::Path, EStr}, UriBuilder};
    ///
    /// let b = UriBuilder::new()
    ///     .append_path("a/b")
    ///     .append_encoded_path_str(EStr::<Path>::new_or_panic("/c%2Fd/e/"));
    /// assert!(b.path_segments().eq(["a/b", "c/d", "e"]));
    /// assert_eq!(b.build().unwrap(), "/a%2Fb/c%2Fd/e");
    /// ```
    pub fn append_encoded_path_str(self, path: &EStr<Path>) -> Self {
        self.append_paths(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(|s| s.cast::<Segment>()),
        )
    }

    /// Appends a query parameter.
    ///
    /// Duplicate keys are kept, in insertion order.
    /// Keys and values are encoded so that `'&'`, `'='`, `'+'` and `'#'`
    /// never leak through, and a space is encoded as `%20`.
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::new()
    ///     .add_query_param("tag", "a&b")
    ///     .add_query_param("tag", "c+d")
    ///     .add_query_param("empty", "");
    /// assert_eq!(b.build().unwrap(), "?tag=a%26b&tag=c%2Bd&empty=");
    /// ```
    pub fn add_query_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: IntoPiece<QueryParam>,
        V: IntoPiece<QueryParam>,
    {
        self.inner.query.push(QueryPair {
            key: key.into_piece(),
            value: Some(value.into_piece()),
        });
        self
    }

    /// Appends a query parameter with no value, rendered as the key alone.
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::new().add_query_key("debug").add_query_param("x", "1");
    /// assert_eq!(b.build().unwrap(), "?debug&x=1");
    /// ```
    pub fn add_query_key<K: IntoPiece<QueryParam>>(mut self, key: K) -> Self {
        self.inner.query.push(QueryPair {
            key: key.into_piece(),
            value: None,
        });
        self
    }

    /// Appends query parameters in order.
    pub fn add_query_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: IntoPiece<QueryParam>,
        V: IntoPiece<QueryParam>,
    {
        params
            .into_iter()
            .fold(self, |b, (key, value)| b.add_query_param(key, value))
    }

    /// Replaces all query parameters.
    pub fn set_query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: IntoPiece<QueryParam>,
        V: IntoPiece<QueryParam>,
    {
        self.inner.query.clear();
        self.add_query_params(params)
    }

    /// Removes every query parameter whose logical key equals `key`,
    /// then appends the given parameter.
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::parse("?page=1&q=rust&page=2")
    ///     .unwrap()
    ///     .set_query_param("page", "3");
    /// assert_eq!(b.build().unwrap(), "?q=rust&page=3");
    /// ```
    pub fn set_query_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: IntoPiece<QueryParam>,
        V: IntoPiece<QueryParam>,
    {
        let key = key.into_piece();
        self.inner.retain_query(&key.logical());
        self.inner.query.push(QueryPair {
            key,
            value: Some(value.into_piece()),
        });
        self
    }

    /// Removes every query parameter whose logical key equals `key`.
    pub fn remove_query_param(mut self, key: &str) -> Self {
        self.inner.retain_query(key);
        self
    }

    /// Optionally calls a builder method with a value.
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let port: Option<u16> = None;
    /// let uri = UriBuilder::new()
    ///     .with_host("example.com")
    ///     .optional(UriBuilder::with_port, port)
    ///     .optional(UriBuilder::with_fragment, Some("top"))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(uri, "//example.com#top");
    /// ```
    pub fn optional<F, V>(self, f: F, opt: Option<V>) -> Self
    where
        F: FnOnce(Self, V) -> Self,
    {
        match opt {
            Some(value) => f(self, value),
            None => self,
        }
    }

    /// Returns the scheme, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.inner.scheme.as_deref()
    }

    /// Returns the logical userinfo, if any.
    #[must_use]
    pub fn userinfo(&self) -> Option<Cow<'_, str>> {
        self.inner.userinfo.as_ref().map(Piece::logical)
    }

    /// Returns the host, if any.
    #[must_use]
    pub fn host(&self) -> Option<Host<'_>> {
        self.inner.host.as_ref().map(HostData::to_host)
    }

    /// Returns the port as it was set, if any.
    #[must_use]
    pub fn port(&self) -> Option<i64> {
        self.inner.port
    }

    /// Returns an iterator over the logical path segments.
    pub fn path_segments(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.inner.segments.iter().map(Piece::logical)
    }

    /// Returns an iterator over the logical query parameters, in insertion order.
    ///
    /// The value is `None` for a parameter added with [`add_query_key`](Self::add_query_key).
    ///
    /// ```
    /// use uribuilder_tiny::UriBuilder;
    ///
    /// let b = UriBuilder::parse("?a=1&b&c=&d=%26").unwrap();
    /// let params: Vec<(String, Option<String>)> = b
    ///     .query_params()
    ///     .map(|(k, v)| (k.into_owned(), v.map(|v| v.into_owned())))
    ///     .collect();
    /// assert_eq!(
    ///     params,
    ///     [
    ///         ("a".to_owned(), Some("1".to_owned())),
    ///         ("b".to_owned(), None),
    ///         ("c".to_owned(), Some(String::new())),
    ///         ("d".to_owned(), Some("&".to_owned())),
    ///     ]
    /// );
    /// ```
    pub fn query_params(
        &self,
    ) -> impl Iterator<Item = (Cow<'_, str>, Option<Cow<'_, str>>)> + '_ {
        self.inner
            .query
            .iter()
            .map(|pair| (pair.key.logical(), pair.value.as_ref().map(Piece::logical)))
    }

    /// Returns the logical fragment, if any.
    #[must_use]
    pub fn fragment(&self) -> Option<Cow<'_, str>> {
        self.inner.fragment.as_ref().map(Piece::logical)
    }

    /// Checks whether a `'/'` is written after the last path segment.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.inner.has_trailing_slash()
    }

    /// Builds the URI reference.
    ///
    /// The builder is left untouched, so this method returns
    /// the same result every time it is called.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any of the following holds, checked in this order:
    ///
    /// - The scheme is malformed ([`InvalidScheme`]).
    /// - The port is outside `0..=65535` ([`PortOutOfRange`]).
    /// - A path segment given as unencoded text is `"."` or `".."` ([`DotSegment`]).
    /// - Userinfo is present, but host is not ([`UserinfoWithoutHost`]).
    /// - Port is present, but host is not ([`PortWithoutHost`]).
    /// - Host is not present, but the path would start with `"//"` ([`PathStartsWithDoubleSlash`]).
    ///
    /// [`InvalidScheme`]: BuildError::InvalidScheme
    /// [`PortOutOfRange`]: BuildError::PortOutOfRange
    /// [`DotSegment`]: BuildError::DotSegment
    /// [`UserinfoWithoutHost`]: BuildError::UserinfoWithoutHost
    /// [`PortWithoutHost`]: BuildError::PortWithoutHost
    /// [`PathStartsWithDoubleSlash`]: BuildError::PathStartsWithDoubleSlash
    ///
    /// # Examples
    ///
    /// ```
    /// use uribuilder_tiny::{error::BuildError, UriBuilder};
    ///
    /// assert_eq!(UriBuilder::new().build().unwrap(), "");
    /// assert_eq!(
    ///     UriBuilder::new().with_host("example.com").with_port(8080u16).build().unwrap(),
    ///     "//example.com:8080"
    /// );
    /// assert_eq!(
    ///     UriBuilder::new().with_port(80).build(),
    ///     Err(BuildError::PortWithoutHost)
    /// );
    /// ```
    pub fn build(&self) -> Result<String, BuildError> {
        self.inner.validate()?;
        let mut buf = String::new();
        self.inner.push_to(&mut buf);
        Ok(buf)
    }
}

impl FromStr for UriBuilder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        Self::parse(s)
    }
}

impl<S: IntoPiece<Segment>> Extend<S> for UriBuilder {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.inner
            .extend_segments(iter.into_iter().map(IntoPiece::into_piece));
    }
}
