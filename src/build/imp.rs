use crate::{
    component::Host,
    error::BuildError,
    pct_enc::{self, encoder::*, table, Decode, EStr, EString, Encoder},
};
use alloc::{
    borrow::{Cow, ToOwned},
    string::{String, ToString},
    vec::Vec,
};
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A piece of component text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Piece {
    /// Logical text, percent-encoded on output.
    Decoded(String),
    /// Percent-encoded text, emitted verbatim.
    Encoded(String),
}

impl Piece {
    fn push_to<E: Encoder>(&self, buf: &mut String) {
        match self {
            Self::Decoded(s) => pct_enc::encode_to(E::TABLE, s, buf),
            Self::Encoded(s) => buf.push_str(s),
        }
    }

    pub fn logical(&self) -> Cow<'_, str> {
        match self {
            Self::Decoded(s) => Cow::Borrowed(s),
            Self::Encoded(s) => Decode::new(s).to_string_lossy(),
        }
    }

    // Only logical text is checked. Encoded text is emitted as given.
    fn is_dot_segment(&self) -> bool {
        matches!(self, Self::Decoded(s) if s == "." || s == "..")
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Decoded(s) | Self::Encoded(s) => s.is_empty(),
        }
    }
}

/// Conversion into component text encoded with `E`.
///
/// String types are taken as logical text. [`EStr<E>`] and [`EString<E>`]
/// are taken as text that is already percent-encoded.
pub trait IntoPiece<E: Encoder> {
    fn into_piece(self) -> Piece;
}

impl<E: Encoder> IntoPiece<E> for &str {
    fn into_piece(self) -> Piece {
        Piece::Decoded(self.to_owned())
    }
}

impl<E: Encoder> IntoPiece<E> for String {
    fn into_piece(self) -> Piece {
        Piece::Decoded(self)
    }
}

impl<E: Encoder> IntoPiece<E> for &String {
    fn into_piece(self) -> Piece {
        Piece::Decoded(self.clone())
    }
}

impl<E: Encoder> IntoPiece<E> for Cow<'_, str> {
    fn into_piece(self) -> Piece {
        Piece::Decoded(self.into_owned())
    }
}

impl<E: Encoder> IntoPiece<E> for &EStr<E> {
    fn into_piece(self) -> Piece {
        Piece::Encoded(self.as_str().to_owned())
    }
}

impl<E: Encoder> IntoPiece<E> for EString<E> {
    fn into_piece(self) -> Piece {
        Piece::Encoded(self.into_string())
    }
}

impl<E: Encoder> IntoPiece<E> for &EString<E> {
    fn into_piece(self) -> Piece {
        Piece::Encoded(self.as_str().to_owned())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum HostData {
    RegName(Piece),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl HostData {
    fn push_to(&self, buf: &mut String) {
        match self {
            Self::RegName(name) => name.push_to::<RegName>(buf),
            Self::Ipv4(addr) => buf.push_str(&addr.to_string()),
            Self::Ipv6(addr) => {
                buf.push('[');
                buf.push_str(&addr.to_string());
                buf.push(']');
            }
        }
    }

    pub fn to_host(&self) -> Host<'_> {
        match self {
            Self::RegName(name) => Host::RegName(name.logical()),
            Self::Ipv4(addr) => Host::Ipv4(*addr),
            Self::Ipv6(addr) => Host::Ipv6(*addr),
        }
    }
}

/// Conversion into a host.
///
/// Implemented for string types (logical registered names),
/// <code>&amp;[EStr]&lt;[RegName]&gt;</code> (percent-encoded registered names),
/// and IP addresses.
pub trait AsHost {
    fn into_host(self) -> HostData;
}

impl<T: IntoPiece<RegName>> AsHost for T {
    fn into_host(self) -> HostData {
        HostData::RegName(self.into_piece())
    }
}

impl AsHost for Ipv4Addr {
    fn into_host(self) -> HostData {
        HostData::Ipv4(self)
    }
}

impl AsHost for Ipv6Addr {
    fn into_host(self) -> HostData {
        HostData::Ipv6(self)
    }
}

impl AsHost for IpAddr {
    fn into_host(self) -> HostData {
        match self {
            Self::V4(addr) => HostData::Ipv4(addr),
            Self::V6(addr) => HostData::Ipv6(addr),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct QueryPair {
    pub key: Piece,
    pub value: Option<Piece>,
}

/// Whether a `'/'` follows the last path segment, and where it comes from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TrailingSlash {
    #[default]
    Absent,
    /// Parsed from a base path ending in `'/'`. Dropped once the path changes.
    Base,
    /// Set on the builder. Kept until unset.
    Explicit,
}

/// The accumulated components of a URI reference.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Components {
    pub scheme: Option<String>,
    pub userinfo: Option<Piece>,
    pub host: Option<HostData>,
    pub port: Option<i64>,
    pub segments: Vec<Piece>,
    pub trailing_slash: TrailingSlash,
    pub query: Vec<QueryPair>,
    pub fragment: Option<Piece>,
}

fn is_valid_scheme(s: &str) -> bool {
    matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
}

impl Components {
    pub fn validate(&self) -> Result<(), BuildError> {
        if let Some(scheme) = &self.scheme {
            if !is_valid_scheme(scheme) {
                return Err(BuildError::InvalidScheme);
            }
        }
        if let Some(port) = self.port {
            if u16::try_from(port).is_err() {
                return Err(BuildError::PortOutOfRange(port));
            }
        }
        if self.segments.iter().any(Piece::is_dot_segment) {
            return Err(BuildError::DotSegment);
        }
        if self.host.is_none() {
            if self.userinfo.is_some() {
                return Err(BuildError::UserinfoWithoutHost);
            }
            if self.port.is_some() {
                return Err(BuildError::PortWithoutHost);
            }
            if self.path_starts_with_double_slash() {
                return Err(BuildError::PathStartsWithDoubleSlash);
            }
        }
        Ok(())
    }

    fn path_starts_with_double_slash(&self) -> bool {
        match self.segments.as_slice() {
            [first, rem @ ..] => first.is_empty() && (!rem.is_empty() || self.has_trailing_slash()),
            [] => false,
        }
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash != TrailingSlash::Absent
    }

    fn path_changed(&mut self) {
        if self.trailing_slash == TrailingSlash::Base {
            self.trailing_slash = TrailingSlash::Absent;
        }
    }

    pub fn extend_segments<I: IntoIterator<Item = Piece>>(&mut self, segments: I) {
        let len = self.segments.len();
        self.segments.extend(segments);
        if self.segments.len() > len {
            self.path_changed();
        }
    }

    pub fn clear_segments(&mut self) {
        self.segments.clear();
        self.path_changed();
    }

    /// Writes the components out. Call [`validate`](Self::validate) first.
    pub fn push_to(&self, buf: &mut String) {
        if let Some(scheme) = &self.scheme {
            buf.push_str(scheme);
            buf.push(':');
        }

        if let Some(host) = &self.host {
            buf.push_str("//");
            if let Some(userinfo) = &self.userinfo {
                userinfo.push_to::<Userinfo>(buf);
                buf.push('@');
            }
            host.push_to(buf);
            if let Some(port) = self.port {
                buf.push(':');
                buf.push_str(&port.to_string());
            }
        }

        for segment in &self.segments {
            buf.push('/');
            segment.push_to::<Segment>(buf);
        }
        if self.has_trailing_slash() {
            buf.push('/');
        }

        for (i, pair) in self.query.iter().enumerate() {
            buf.push(if i == 0 { '?' } else { '&' });
            pair.key.push_to::<QueryParam>(buf);
            if let Some(value) = &pair.value {
                buf.push('=');
                value.push_to::<QueryParam>(buf);
            }
        }

        if let Some(fragment) = &self.fragment {
            buf.push('#');
            fragment.push_to::<Fragment>(buf);
        }
    }

    pub fn retain_query(&mut self, key: &str) {
        self.query.retain(|pair| pair.key.logical() != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn decoded(s: &str) -> Piece {
        Piece::Decoded(s.to_owned())
    }

    #[test]
    fn piece_logical() {
        assert_eq!(decoded("a%20b").logical(), "a%20b");
        assert_eq!(Piece::Encoded("a%20b".to_owned()).logical(), "a b");
    }

    #[test]
    fn piece_push_to() {
        let mut buf = String::new();
        decoded("a b/c").push_to::<Segment>(&mut buf);
        Piece::Encoded("%2F".to_owned()).push_to::<Segment>(&mut buf);
        assert_eq!(buf, "a%20b%2Fc%2F");
    }

    #[test]
    fn double_slash_detection() {
        let mut c = Components {
            segments: vec![decoded(""), decoded("x")],
            ..Components::default()
        };
        assert_eq!(c.validate(), Err(BuildError::PathStartsWithDoubleSlash));

        c.segments.truncate(1);
        assert_eq!(c.validate(), Ok(()));
        c.trailing_slash = TrailingSlash::Explicit;
        assert_eq!(c.validate(), Err(BuildError::PathStartsWithDoubleSlash));

        c.host = Some(HostData::RegName(decoded("h")));
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn base_trailing_slash_dropped_on_path_change() {
        let mut c = Components {
            segments: vec![decoded("v1")],
            trailing_slash: TrailingSlash::Base,
            ..Components::default()
        };
        c.extend_segments(None);
        assert!(c.has_trailing_slash());
        c.extend_segments(Some(decoded("users")));
        assert_eq!(c.trailing_slash, TrailingSlash::Absent);

        c.trailing_slash = TrailingSlash::Explicit;
        c.extend_segments(Some(decoded("x")));
        c.clear_segments();
        assert_eq!(c.trailing_slash, TrailingSlash::Explicit);
    }

    #[test]
    fn scheme_syntax() {
        assert!(is_valid_scheme("http"));
        assert!(is_valid_scheme("svn+ssh"));
        assert!(is_valid_scheme("a.b-c"));
        assert!(!is_valid_scheme(""));
        assert!(!is_valid_scheme("1http"));
        assert!(!is_valid_scheme("ht tp"));
        assert!(!is_valid_scheme("http:"));
    }
}
