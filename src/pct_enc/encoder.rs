//! Percent-encoders for URI components.

#![allow(missing_debug_implementations)]

use super::{table, Encoder, Table};

/// An encoder for userinfo.
pub struct Userinfo(());

impl Encoder for Userinfo {
    const TABLE: Table = table::USERINFO;
}

/// An encoder for registered name.
pub struct RegName(());

impl Encoder for RegName {
    const TABLE: Table = table::REG_NAME;
}

/// An encoder for path.
pub struct Path(());

impl Encoder for Path {
    const TABLE: Table = table::PATH;
}

/// An encoder for a single path segment.
///
/// Unlike [`Path`], this encoder percent-encodes `'/'`, so that a logical
/// segment such as `"a/b"` stays one segment.
pub struct Segment(());

impl Encoder for Segment {
    const TABLE: Table = table::SEGMENT;
}

/// An encoder for query.
pub struct Query(());

impl Encoder for Query {
    const TABLE: Table = table::QUERY;
}

/// An encoder for a key or a value of a query parameter.
///
/// This is a sub-encoder of [`Query`] that percent-encodes
/// the delimiters `'&'` and `'='` as well as `'+'`.
pub struct QueryParam(());

impl Encoder for QueryParam {
    const TABLE: Table = table::QUERY_PARAM;
}

/// An encoder for fragment.
pub struct Fragment(());

impl Encoder for Fragment {
    const TABLE: Table = table::FRAGMENT;
}
