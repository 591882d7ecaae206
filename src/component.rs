//! URI components.

use alloc::borrow::Cow;
use core::net::{Ipv4Addr, Ipv6Addr};

/// The [host] subcomponent of authority, as held by a [`UriBuilder`].
///
/// Registered names are given in their logical (percent-decoded) form.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
/// [`UriBuilder`]: crate::UriBuilder
///
/// # Examples
///
/// ```
/// use std::net::Ipv6Addr;
/// use uribuilder_tiny::{component::Host, UriBuilder};
///
/// let b = UriBuilder::new().with_host("b\u{fc}cher.example");
/// assert_eq!(b.host(), Some(Host::RegName("b\u{fc}cher.example".into())));
///
/// let b = UriBuilder::new().with_host(Ipv6Addr::LOCALHOST);
/// assert_eq!(b.host(), Some(Host::Ipv6(Ipv6Addr::LOCALHOST)));
/// assert_eq!(b.build().unwrap(), "//[::1]");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Host<'a> {
    /// A registered name, such as `example.com`.
    RegName(Cow<'a, str>),
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address, written in brackets in a URI.
    Ipv6(Ipv6Addr),
}

impl Host<'_> {
    /// Checks whether the host is an empty registered name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::RegName(name) if name.is_empty())
    }
}
