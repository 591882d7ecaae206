#![cfg(feature = "serde")]

use serde::{Deserialize, Serialize};
use uribuilder_tiny::BaseUri;

#[derive(Serialize, Deserialize)]
struct Config<'a> {
    #[serde(borrow)]
    api: BaseUri<&'a str>,
    cdn: BaseUri<String>,
}

#[test]
fn serialize() {
    let config = Config {
        api: BaseUri::parse("https://api.example.com/v1").unwrap(),
        cdn: BaseUri::parse(String::from("https://cdn.example.com/")).unwrap(),
    };
    assert_eq!(
        serde_json::to_string(&config).unwrap(),
        r#"{"api":"https://api.example.com/v1","cdn":"https://cdn.example.com/"}"#
    );
}

#[test]
fn deserialize() {
    let json = r#"{"api":"https://api.example.com/v1","cdn":"https://cdn.example.com/"}"#;
    let config: Config<'_> = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.api.builder().append_path("users").build().unwrap(),
        "https://api.example.com/v1/users"
    );
    assert_eq!(config.cdn.as_str(), "https://cdn.example.com/");
}

#[test]
fn deserialize_error() {
    let err = serde_json::from_str::<BaseUri<String>>(r#""http://h:99999""#).unwrap_err();
    assert!(err
        .to_string()
        .starts_with(r#"failed to parse "http://h:99999" as base URI: port number greater than 65535 at index 9"#));
}
