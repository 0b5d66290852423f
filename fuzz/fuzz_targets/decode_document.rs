#![no_main]
use libfuzzer_sys::fuzz_target;

use nedit::{decode_with_opts, encode, Compression, ReadOpts};

fuzz_target!(|data: &[u8]| {
    let opts = ReadOpts::new().max_seq_len(100).max_depth(64);
    if let Ok((name, compound)) = decode_with_opts(data, opts) {
        let _bs = encode(&compound, &name, Compression::None).unwrap();
    }
});
