use crate::{
    build::{Components, HostData, Piece, QueryPair, TrailingSlash},
    error::{ParseError, ParseErrorKind},
    pct_enc::table::{self, Table},
};
use alloc::borrow::ToOwned;
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    ops::{Deref, DerefMut},
    str::FromStr,
};

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

/// Characters that may appear between the brackets of an IPv6 literal.
const IPV6_LITERAL: Table = table::HEXDIG.or(Table::new(b":."));

pub(crate) fn parse(s: &str) -> Result<Components> {
    let mut parser = Parser {
        reader: Reader::new(s),
        out: Components::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// Base URI parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
///
/// Every component written to `out` has been validated against its table
/// and is stored as percent-encoded text.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Components,
}

struct Reader<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl DerefMut for Parser<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        Reader { s, pos: 0 }
    }

    fn len(&self) -> usize {
        self.s.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn remaining(&self) -> &'a str {
        &self.s[self.pos..]
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.s.as_bytes().get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    /// Reads the longest prefix allowed by the table and returns it.
    fn read(&mut self, table: Table) -> &'a str {
        let start = self.pos;
        // INVARIANT: Tables only allow ASCII, so the prefix ends on a code point boundary.
        self.skip(table.valid_prefix_len(self.remaining().as_bytes()));
        &self.s[start..self.pos]
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.remaining().starts_with(s) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }
}

fn encoded(s: &str) -> Piece {
    Piece::Encoded(s.to_owned())
}

impl Parser<'_> {
    fn parse_from_scheme(&mut self) -> Result<()> {
        let bytes = self.s.as_bytes();
        let len = table::SCHEME.valid_prefix_len(bytes);

        if bytes.get(len) == Some(&b':') {
            // Scheme starts with a letter.
            if len == 0 || !bytes[0].is_ascii_alphabetic() {
                err!(0, UnexpectedCharOrEnd);
            }
            self.out.scheme = Some(self.s[..len].to_owned());
            // INVARIANT: Skipping the scheme and ":" is fine.
            self.skip(len + 1);
        }

        if self.read_str("//") {
            self.parse_from_authority()?;
            // Path must be empty or start with "/" after authority.
            if self.has_remaining() && !matches!(self.peek(0), Some(b'/' | b'?' | b'#')) {
                err!(self.pos, UnexpectedCharOrEnd);
            }
        }
        self.parse_from_path()
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        let auth_len = self
            .remaining()
            .find(['/', '?', '#'])
            .unwrap_or(self.remaining().len());

        if self.remaining()[..auth_len].contains('@') {
            let userinfo = self.read(table::USERINFO);
            if !self.read_str("@") {
                err!(self.pos, UnexpectedCharOrEnd);
            }
            self.out.userinfo = Some(encoded(userinfo));
        }

        let host = self.read_host()?;
        self.out.host = Some(host);

        if self.read_str(":") {
            let start = self.pos;
            let digits = self.read(table::PORT);
            if !digits.is_empty() {
                match digits.parse::<u16>() {
                    Ok(port) => self.out.port = Some(port.into()),
                    Err(_) => err!(start, InvalidPort),
                }
            }
        }
        Ok(())
    }

    fn read_host(&mut self) -> Result<HostData> {
        if self.read_str("[") {
            let start = self.pos;
            let addr = self.read(IPV6_LITERAL);
            let Ok(addr) = Ipv6Addr::from_str(addr) else {
                err!(start, InvalidIpv6Addr);
            };
            if !self.read_str("]") {
                err!(self.pos, UnexpectedCharOrEnd);
            }
            return Ok(HostData::Ipv6(addr));
        }

        let name = self.read(table::REG_NAME);
        Ok(match Ipv4Addr::from_str(name) {
            Ok(addr) => HostData::Ipv4(addr),
            Err(_) => HostData::RegName(encoded(name)),
        })
    }

    fn parse_from_path(&mut self) -> Result<()> {
        let path = self.read(table::PATH);
        if path == "/" {
            self.out.trailing_slash = TrailingSlash::Base;
        } else if !path.is_empty() {
            let path = path.strip_prefix('/').unwrap_or(path);
            let path = match path.strip_suffix('/') {
                Some(path) => {
                    self.out.trailing_slash = TrailingSlash::Base;
                    path
                }
                None => path,
            };
            self.out.segments = path.split('/').map(encoded).collect();
        }

        if self.read_str("?") {
            let query = self.read(table::QUERY);
            self.out.query = query
                .split('&')
                .filter(|term| !term.is_empty())
                .map(|term| match term.split_once('=') {
                    Some((key, value)) => QueryPair {
                        key: encoded(key),
                        value: Some(encoded(value)),
                    },
                    None => QueryPair {
                        key: encoded(term),
                        value: None,
                    },
                })
                .collect();
        }

        if self.read_str("#") {
            let fragment = self.read(table::FRAGMENT);
            self.out.fragment = Some(encoded(fragment));
        }

        if self.has_remaining() {
            err!(self.pos, UnexpectedCharOrEnd);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn fail(s: &str) -> (usize, ParseErrorKind) {
        let e = parse(s).unwrap_err();
        (e.index(), e.kind())
    }

    #[test]
    fn scheme_detection() {
        assert_eq!(parse("http:").unwrap().scheme.as_deref(), Some("http"));
        assert_eq!(parse("a/b:c").unwrap().scheme, None);
        assert_eq!(parse("./a:b").unwrap().scheme, None);
        assert_eq!(fail("1http:x"), (0, ParseErrorKind::UnexpectedCharOrEnd));
        assert_eq!(fail(":x"), (0, ParseErrorKind::UnexpectedCharOrEnd));
    }

    #[test]
    fn authority() {
        let c = parse("//u%20s:p@h.example:8080").unwrap();
        assert_eq!(c.userinfo, Some(encoded("u%20s:p")));
        assert_eq!(c.host, Some(HostData::RegName(encoded("h.example"))));
        assert_eq!(c.port, Some(8080));

        let c = parse("//127.0.0.1:").unwrap();
        assert_eq!(c.host, Some(HostData::Ipv4(Ipv4Addr::LOCALHOST)));
        assert_eq!(c.port, None);

        let c = parse("//[::1]/x").unwrap();
        assert_eq!(c.host, Some(HostData::Ipv6(Ipv6Addr::LOCALHOST)));

        let c = parse("//127.0.0.01").unwrap();
        assert_eq!(c.host, Some(HostData::RegName(encoded("127.0.0.01"))));
    }

    #[test]
    fn authority_errors() {
        assert_eq!(fail("//[::1"), (6, ParseErrorKind::UnexpectedCharOrEnd));
        assert_eq!(fail("//[1::2::3]"), (3, ParseErrorKind::InvalidIpv6Addr));
        assert_eq!(fail("//[::g]"), (5, ParseErrorKind::UnexpectedCharOrEnd));
        assert_eq!(fail("//h:65536"), (4, ParseErrorKind::InvalidPort));
        assert_eq!(fail("//a b@h"), (3, ParseErrorKind::UnexpectedCharOrEnd));
        assert_eq!(fail("//h:8x"), (5, ParseErrorKind::UnexpectedCharOrEnd));
    }

    #[test]
    fn path_segments() {
        let segs = |s: &str| -> (Vec<Piece>, TrailingSlash) {
            let c = parse(s).unwrap();
            (c.segments, c.trailing_slash)
        };
        assert_eq!(segs(""), (Vec::new(), TrailingSlash::Absent));
        assert_eq!(segs("//h"), (Vec::new(), TrailingSlash::Absent));
        assert_eq!(segs("/"), (Vec::new(), TrailingSlash::Base));
        assert_eq!(segs("//h//"), (Vec::from([encoded("")]), TrailingSlash::Base));
        assert_eq!(
            segs("/a//b/"),
            (Vec::from(["a", "", "b"].map(encoded)), TrailingSlash::Base)
        );
        assert_eq!(
            segs("a/b"),
            (Vec::from(["a", "b"].map(encoded)), TrailingSlash::Absent)
        );
        assert_eq!(fail("/a%2"), (2, ParseErrorKind::UnexpectedCharOrEnd));
    }

    #[test]
    fn query_and_fragment() {
        let c = parse("?a=1&&b&c=x=y#f?/").unwrap();
        assert_eq!(
            c.query,
            [
                QueryPair {
                    key: encoded("a"),
                    value: Some(encoded("1")),
                },
                QueryPair {
                    key: encoded("b"),
                    value: None,
                },
                QueryPair {
                    key: encoded("c"),
                    value: Some(encoded("x=y")),
                },
            ]
        );
        assert_eq!(c.fragment, Some(encoded("f?/")));
        assert_eq!(fail("#a#b"), (2, ParseErrorKind::UnexpectedCharOrEnd));
    }
}
