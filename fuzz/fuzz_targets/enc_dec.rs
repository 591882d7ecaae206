#![no_main]
use libfuzzer_sys::fuzz_target;
use uribuilder_tiny::pct_enc::{
    encoder::{Fragment, Path, Query, QueryParam, Segment, Userinfo},
    Encoder, EStr, EString,
};

fn check<E: Encoder>(data: &str) {
    let buf = EString::<E>::encode(data);
    assert!(EStr::<E>::new(buf.as_str()).is_some());
    assert_eq!(data.as_bytes(), &*buf.decode().to_bytes());
    assert_eq!(data, buf.decode().to_string().unwrap());
}

fuzz_target!(|data: &str| {
    check::<Userinfo>(data);
    check::<Path>(data);
    check::<Segment>(data);
    check::<Query>(data);
    check::<QueryParam>(data);
    check::<Fragment>(data);
});
