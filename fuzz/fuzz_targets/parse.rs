#![no_main]
use libfuzzer_sys::fuzz_target;
use uribuilder_tiny::UriBuilder;

fuzz_target!(|data: &str| {
    let Ok(b1) = UriBuilder::parse(data) else {
        return;
    };
    let s = b1.build().unwrap();
    let b2 = UriBuilder::parse(&s).unwrap();
    assert_eq!(b1, b2);
    assert_eq!(s, b2.build().unwrap());
});
