//! Error types.

/// The category of a [`BuildError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BuildErrorKind {
    /// A component value is out of range or malformed.
    InvalidArgument,
    /// The components cannot be combined into a valid URI reference.
    InvalidState,
}

/// An error occurred when building a URI reference.
///
/// Returned by [`UriBuilder::build`]. The components are checked in the order
/// they appear in a URI and the first failing check is reported.
///
/// [`UriBuilder::build`]: crate::UriBuilder::build
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BuildError {
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    InvalidScheme,
    /// The port is negative or greater than 65535.
    PortOutOfRange(i64),
    /// A path segment given as unencoded text is `"."` or `".."`.
    ///
    /// Such a segment would be removed by URI reference resolution.
    DotSegment,
    /// Userinfo is present, but host is not.
    UserinfoWithoutHost,
    /// Port is present, but host is not.
    PortWithoutHost,
    /// Host is not present, but the path would start with `"//"`.
    PathStartsWithDoubleSlash,
}

impl BuildError {
    /// Returns the category of the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use uribuilder_tiny::{error::BuildErrorKind, UriBuilder};
    ///
    /// let err = UriBuilder::new().with_host("example.com").with_port(-1).build().unwrap_err();
    /// assert_eq!(err.kind(), BuildErrorKind::InvalidArgument);
    ///
    /// let err = UriBuilder::new().with_userinfo("user").build().unwrap_err();
    /// assert_eq!(err.kind(), BuildErrorKind::InvalidState);
    /// ```
    #[must_use]
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            Self::InvalidScheme | Self::PortOutOfRange(_) | Self::DotSegment => {
                BuildErrorKind::InvalidArgument
            }
            Self::UserinfoWithoutHost | Self::PortWithoutHost | Self::PathStartsWithDoubleSlash => {
                BuildErrorKind::InvalidState
            }
        }
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for BuildError {}

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// Unexpected character or end of input.
    ///
    /// The error index points to the first byte of the character or the end of input.
    UnexpectedCharOrEnd,
    /// Invalid IPv6 address.
    ///
    /// Also returned for IPvFuture literals such as `[v1.x]`,
    /// which are not supported.
    ///
    /// The error index points to the first byte of the address.
    InvalidIpv6Addr,
    /// Port number greater than 65535.
    ///
    /// The error index points to the first digit of the port.
    InvalidPort,
}

/// An error occurred when parsing a base URI.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ParseError {}
