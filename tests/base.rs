use std::{collections::HashSet, thread};

use uribuilder_tiny::{error::ParseErrorKind, BaseUri, UriBuilder};

#[test]
fn builders_start_from_base() {
    let base = BaseUri::parse("https://user@api.example.com:8443/v1/?key=k%20v#top").unwrap();

    let b = base.builder();
    assert_eq!(b.scheme(), Some("https"));
    assert_eq!(b.userinfo().as_deref(), Some("user"));
    assert_eq!(b.port(), Some(8443));
    assert!(b.path_segments().eq(["v1"]));
    assert!(b.has_trailing_slash());
    assert_eq!(b.fragment().as_deref(), Some("top"));
    assert_eq!(b.build().unwrap(), base.as_str());

    let built = base
        .builder()
        .set_path_str("v2/items")
        .add_query_param("id", "7")
        .with_fragment("bottom")
        .build()
        .unwrap();
    assert_eq!(
        built,
        "https://user@api.example.com:8443/v2/items?key=k%20v&id=7#bottom"
    );
}

#[test]
fn append_to_base_ending_in_slash() {
    let root = BaseUri::parse("https://api.example.com/").unwrap();
    assert_eq!(root.builder().build().unwrap(), "https://api.example.com/");
    assert_eq!(
        root.builder().append_path("users").build().unwrap(),
        "https://api.example.com/users"
    );

    let v1 = BaseUri::parse("https://api.example.com/v1/?key=k").unwrap();
    assert_eq!(v1.builder().build().unwrap(), "https://api.example.com/v1/?key=k");
    assert_eq!(
        v1.builder().append_path("users").build().unwrap(),
        "https://api.example.com/v1/users?key=k"
    );
    assert_eq!(
        v1.builder().append_paths(["users", "7"]).build().unwrap(),
        "https://api.example.com/v1/users/7?key=k"
    );
    assert_eq!(
        v1.builder()
            .append_path("users")
            .with_trailing_slash(true)
            .build()
            .unwrap(),
        "https://api.example.com/v1/users/?key=k"
    );
    assert_eq!(
        v1.builder()
            .with_trailing_slash(true)
            .append_path("users")
            .build()
            .unwrap(),
        "https://api.example.com/v1/users/?key=k"
    );
}

#[test]
fn modifying_a_builder_leaves_base_alone() {
    let base = BaseUri::parse("http://example.com/root?a=1").unwrap();
    let _ = base
        .builder()
        .with_scheme("https")
        .append_path("x")
        .remove_query_param("a")
        .build()
        .unwrap();
    assert_eq!(base.builder().build().unwrap(), "http://example.com/root?a=1");
    assert_eq!(base.as_str(), "http://example.com/root?a=1");
}

#[test]
fn shared_across_threads() {
    let base = BaseUri::parse("https://example.com/items").unwrap();

    let built: HashSet<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let base = &base;
                s.spawn(move || {
                    base.builder()
                        .append_path(i.to_string())
                        .build()
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(built.len(), 8);
    assert!(built.contains("https://example.com/items/0"));
    assert!(built.contains("https://example.com/items/7"));
}

#[test]
fn owned_and_borrowed() {
    let s = String::from("http://example.com/a");
    let borrowed = BaseUri::parse(s.as_str()).unwrap();
    let owned = BaseUri::parse(s.clone()).unwrap();
    assert_eq!(borrowed, owned);
    assert_eq!(borrowed.as_str(), owned.as_str());

    let from_str: BaseUri<String> = "http://example.com/a".parse().unwrap();
    assert_eq!(from_str, owned);

    let try_from = BaseUri::try_from("http://example.com/a").unwrap();
    assert_eq!(try_from, borrowed);

    assert_eq!(String::from(owned), s);
}

#[test]
fn display_and_debug() {
    let base = BaseUri::parse("http://example.com/a%20b").unwrap();
    assert_eq!(base.to_string(), "http://example.com/a%20b");
    assert!(format!("{base:?}").contains("example.com"));
}

#[test]
fn parse_errors() {
    let e = BaseUri::parse("http://h:99999/").unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::InvalidPort);
    assert_eq!(e.index(), 9);
    assert_eq!(
        e.to_string(),
        "port number greater than 65535 at index 9"
    );

    let (e, s) = BaseUri::parse(String::from("http://h/a b")).unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::UnexpectedCharOrEnd);
    assert_eq!(s, "http://h/a b");

    assert!("http://[::1".parse::<BaseUri<String>>().is_err());
}

#[test]
fn same_as_parsed_builder() {
    for s in [
        "",
        "//h",
        "/a/b/",
        "?q",
        "mailto:/x@y",
        "http://[::1]:80/?a=b#c",
    ] {
        let base = BaseUri::parse(s).unwrap();
        assert_eq!(base.builder(), UriBuilder::parse(s).unwrap());
    }
}
