#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use std::net::{Ipv4Addr, Ipv6Addr};
use uribuilder_tiny::{component::Host, UriBuilder};

#[derive(Arbitrary, Clone, Debug)]
enum HostWrapper {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    RegName(String),
}

#[derive(Arbitrary, Clone, Debug)]
struct Components {
    scheme: Option<String>,
    userinfo: Option<String>,
    host: Option<HostWrapper>,
    port: Option<u16>,
    segments: Vec<String>,
    query: Vec<(String, Option<String>)>,
    fragment: Option<String>,
}

fuzz_target!(|c: Components| {
    let mut b = UriBuilder::new()
        .optional(UriBuilder::with_scheme, c.scheme.clone())
        .optional(UriBuilder::with_userinfo, c.userinfo.clone())
        .optional(UriBuilder::with_port, c.port)
        .append_paths(&c.segments)
        .optional(UriBuilder::with_fragment, c.fragment.clone());

    b = match c.host.clone() {
        Some(HostWrapper::Ipv4(addr)) => b.with_host(addr),
        Some(HostWrapper::Ipv6(addr)) => b.with_host(addr),
        Some(HostWrapper::RegName(name)) => b.with_host(name),
        None => b,
    };

    // A lone empty key renders as nothing and cannot come back.
    let query: Vec<_> = c
        .query
        .into_iter()
        .filter(|(k, v)| !k.is_empty() || v.is_some())
        .collect();
    for (k, v) in &query {
        b = match v {
            Some(v) => b.add_query_param(k, v),
            None => b.add_query_key(k),
        };
    }

    let Ok(s) = b.build() else {
        return;
    };
    let parsed = UriBuilder::parse(&s).unwrap_or_else(|e| panic!("{s:?}: {e}"));

    assert_eq!(parsed.scheme(), c.scheme.as_deref());
    assert_eq!(parsed.userinfo().as_deref(), c.userinfo.as_deref());
    assert_eq!(parsed.port(), c.port.map(i64::from));

    match (parsed.host(), b.host()) {
        (Some(Host::Ipv4(addr)), Some(Host::RegName(name))) => {
            assert_eq!(addr, name.parse::<Ipv4Addr>().unwrap());
        }
        (h1, h2) => assert_eq!(h1, h2),
    }

    // A path ending in '/' comes back as a trailing slash.
    let mut segments: Vec<_> = parsed.path_segments().map(|s| s.into_owned()).collect();
    if parsed.has_trailing_slash() {
        segments.push(String::new());
    }
    assert_eq!(segments, c.segments);
    assert!(parsed
        .query_params()
        .map(|(k, v)| (k.into_owned(), v.map(|v| v.into_owned())))
        .eq(query));
    assert_eq!(parsed.fragment().as_deref(), c.fragment.as_deref());

    assert_eq!(parsed.build().unwrap(), s);
});
