use crate::{
    base::BaseUri,
    component::Host,
    error::{BuildError, ParseError, ParseErrorKind},
};
use borrow_or_share::Bos;
use core::fmt::{Debug, Display, Formatter, Result};

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let msg = match self {
            Self::InvalidScheme => "scheme should match ALPHA *( ALPHA / DIGIT / \"+\" / \"-\" / \".\" )",
            Self::PortOutOfRange(port) => {
                return write!(f, "port {port} is out of range 0..=65535");
            }
            Self::DotSegment => "path segment should not be \".\" or \"..\"",
            Self::UserinfoWithoutHost => "when host is not present, userinfo should not be present",
            Self::PortWithoutHost => "when host is not present, port should not be present",
            Self::PathStartsWithDoubleSlash => {
                "when host is not present, path should not start with \"//\""
            }
        };
        f.write_str(msg)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let msg = match self.kind {
            ParseErrorKind::UnexpectedCharOrEnd => "unexpected character or end of input",
            ParseErrorKind::InvalidIpv6Addr => "invalid IPv6 address",
            ParseErrorKind::InvalidPort => "port number greater than 65535",
        };
        write!(f, "{} at index {}", msg, self.index)
    }
}

impl Display for Host<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::RegName(name) => f.write_str(name),
            Self::Ipv4(addr) => Display::fmt(addr, f),
            Self::Ipv6(addr) => write!(f, "[{addr}]"),
        }
    }
}

impl<T: Bos<str>> Debug for BaseUri<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("BaseUri")
            .field("uri", &self.as_str())
            .field("builder", self.as_builder())
            .finish()
    }
}

impl<T: Bos<str>> Display for BaseUri<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Display::fmt(self.as_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{component::Host, error::BuildError, UriBuilder};
    use alloc::string::ToString;
    use core::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn build_error_messages() {
        assert_eq!(
            BuildError::PortOutOfRange(-1).to_string(),
            "port -1 is out of range 0..=65535"
        );
        assert_eq!(
            BuildError::DotSegment.to_string(),
            "path segment should not be \".\" or \"..\""
        );
        assert_eq!(
            BuildError::UserinfoWithoutHost.to_string(),
            "when host is not present, userinfo should not be present"
        );
    }

    #[test]
    fn parse_error_messages() {
        let e = UriBuilder::parse("//h:99999").unwrap_err();
        assert_eq!(e.to_string(), "port number greater than 65535 at index 4");
        let e = UriBuilder::parse("a b").unwrap_err();
        assert_eq!(e.to_string(), "unexpected character or end of input at index 1");
    }

    #[test]
    fn host_display() {
        assert_eq!(Host::RegName("a.b".into()).to_string(), "a.b");
        assert_eq!(Host::Ipv4(Ipv4Addr::new(10, 0, 0, 1)).to_string(), "10.0.0.1");
        assert_eq!(Host::Ipv6(Ipv6Addr::LOCALHOST).to_string(), "[::1]");
    }
}
