use super::builder::Builder;
use crate::error::Result;
use crate::{decode, encode, Compound, Compression, Tag};

// Truncated and hostile inputs, of the kind the fuzz targets produce.

#[test]
fn partial_input_in_string() {
    let input = Builder::new().start_compound("some long name").build();
    let v: Result<(String, Compound)> = decode(&input[0..3]);
    assert!(v.is_err());
}

#[test]
fn list_of_end() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", Tag::End, 1)
        .tag(Tag::End)
        .end_compound()
        .build();

    assert!(decode(&input).is_err());
}

#[test]
fn many_empty_lists_of_compounds() {
    // Each list claims a billion compounds, each of which is a single byte.
    let mut builder = Builder::new().start_compound("");
    for _ in 0..64 {
        builder = builder.start_list("", Tag::Compound, 1_000_000_000);
    }
    let input = builder.build();

    assert!(decode(&input).is_err());
}

#[test]
fn every_prefix_of_a_document_fails_cleanly() {
    let c = crate::compound! {
        "a" => vec![1i64, 2, 3],
        "b" => crate::compound! { "c" => "d" },
    };
    let bs = encode(&c, "root", Compression::None).unwrap();

    for end in 0..bs.len() {
        let err = decode(&bs[..end]).unwrap_err();
        assert!(
            err.is_eof() || matches!(err, crate::error::Error::Malformed(_)),
            "prefix {}: {}",
            end,
            err
        );
    }
    assert!(decode(&bs).is_ok());
}
