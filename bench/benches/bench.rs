use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uribuilder_tiny::{BaseUri, UriBuilder};
use url::Url;

criterion_group!(
    benches,
    bench_build,
    bench_build_url,
    bench_build_encoded,
    bench_build_from_base,
    bench_parse,
    bench_parse_url,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com:8042/search/%E6%B5%8B?q=%E6%B5%8B%E8%AF%95&page=2#fragment";
const BASE_CASE: &str = "https://api.example.com/v2?key=abc";

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            UriBuilder::new()
                .with_scheme("foo")
                .with_userinfo("user")
                .with_host("example.com")
                .with_port(8042)
                .append_paths(["over", "there"])
                .add_query_param("name", "ferret")
                .with_fragment("nose")
                .build()
        })
    });
}

fn bench_build_url(c: &mut Criterion) {
    c.bench_function("build_url", |b| {
        b.iter(|| {
            let mut url = Url::parse("foo://user@example.com:8042").unwrap();
            url.path_segments_mut().unwrap().extend(["over", "there"]);
            url.query_pairs_mut().append_pair("name", "ferret");
            url.set_fragment(Some("nose"));
            url.to_string()
        })
    });
}

fn bench_build_encoded(c: &mut Criterion) {
    c.bench_function("build_encoded", |b| {
        b.iter(|| {
            UriBuilder::new()
                .with_scheme("https")
                .with_host("例子.测试")
                .append_paths(["a b", "测试/路径"])
                .add_query_param("q", "1 + 1 = 2 & more")
                .with_fragment("片段")
                .build()
        })
    });
}

fn bench_build_from_base(c: &mut Criterion) {
    let base = BaseUri::parse(BASE_CASE).unwrap();
    c.bench_function("build_from_base", |b| {
        b.iter(|| {
            base.builder()
                .append_path(black_box("users"))
                .add_query_param("page", "2")
                .build()
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| UriBuilder::parse(black_box(PARSE_CASE)))
    });
}

fn bench_parse_url(c: &mut Criterion) {
    c.bench_function("parse_url", |b| {
        b.iter(|| Url::parse(black_box(PARSE_CASE)))
    });
}
