#![no_main]
use libfuzzer_sys::fuzz_target;

use nedit::{decode_with_opts, encode, Compression, ReadOpts};

// Compared as bytes, since NaN payloads make Value equality useless here.
fuzz_target!(|data: &[u8]| {
    let opts = ReadOpts::new().max_seq_len(100);
    if let Ok((name, compound)) = decode_with_opts(data, opts) {
        let bs = encode(&compound, &name, Compression::None).unwrap();
        let (name2, compound2) = decode_with_opts(&bs, opts).unwrap();
        assert_eq!(name, name2);
        assert_eq!(bs, encode(&compound2, &name2, Compression::None).unwrap());
    }
});
