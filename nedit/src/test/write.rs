use super::builder::Builder;
use crate::error::{Error, Result};
use crate::write::Writer;
use crate::{
    compound, encode, encode_with_opts, to_writer, Compound, Compression, List, Strings, Tag,
    Value, WriteOpts,
};

fn raw(compound: &Compound) -> Vec<u8> {
    encode(compound, "", Compression::None).unwrap()
}

#[test]
fn empty_document() {
    assert_eq!(raw(&Compound::new()), [10, 0, 0, 0]);
}

#[test]
fn root_name() -> Result<()> {
    let bs = encode(&Compound::new(), "root", Compression::None)?;
    let expected = Builder::new().start_compound("root").end_compound().build();

    assert_eq!(expected, bs);
    Ok(())
}

#[test]
fn simple_numbers() {
    let c = compound! {
        "i8" => i8::MAX,
        "i16" => i16::MAX,
        "i32" => i32::MAX,
        "i64" => i64::MAX,
        "f32" => f32::MAX,
        "f64" => f64::MAX,
    };

    let expected = Builder::new()
        .start_compound("")
        .byte("i8", i8::MAX)
        .short("i16", i16::MAX)
        .int("i32", i32::MAX)
        .long("i64", i64::MAX)
        .float("f32", f32::MAX)
        .double("f64", f64::MAX)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn unsigned_values_keep_their_bits() {
    let c = compound! { "u8" => u8::MAX, "u32" => u32::MAX };
    let expected = Builder::new()
        .start_compound("")
        .byte("u8", -1)
        .int("u32", -1)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn bool_is_byte() {
    let c = compound! { "yes" => true, "no" => false };
    let expected = Builder::new()
        .start_compound("")
        .byte("yes", 1)
        .byte("no", 0)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn empty_string_is_two_zero_bytes() {
    let c = compound! { "s" => "" };
    let bs = raw(&c);

    // Root header (4 bytes), String tag, name, then the payload.
    let payload = &bs[3 + 1 + 3..bs.len() - 1];
    assert_eq!(payload, [0, 0]);
}

#[test]
fn string_length_is_in_bytes() {
    let c = compound! { "s" => "héllo" };
    let expected = Builder::new()
        .start_compound("")
        .tag(Tag::String)
        .name("s")
        .raw_bytes(&[0, 6])
        .raw_bytes("héllo".as_bytes())
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn long_array_of_129() {
    let longs: Vec<i64> = (0..129).collect();
    let c = compound! { "longs" => longs.clone() };
    let bs = raw(&c);

    // Root header, LongArray tag, name "longs", then the count.
    let start = 3 + 1 + 2 + 5;
    assert_eq!(bs[start..start + 4], 129i32.to_be_bytes());
    let data = &bs[start + 4..bs.len() - 1];
    assert_eq!(data.len(), 129 * 8);
    assert_eq!(data[8..16], 1i64.to_be_bytes());

    let expected = Builder::new()
        .start_compound("")
        .long_array("longs", &longs)
        .end_compound()
        .build();
    assert_eq!(expected, bs);
}

#[test]
fn arrays() {
    let c = compound! {
        "bytes" => vec![1i8, -1, 3],
        "ints" => vec![1i32, 2, 3],
        "longs" => Vec::<i64>::new(),
    };
    let expected = Builder::new()
        .start_compound("")
        .byte_array("bytes", &[1, -1, 3])
        .int_array("ints", &[1, 2, 3])
        .long_array("longs", &[])
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn list_elements_have_no_headers() -> Result<()> {
    let list = List::try_from_values(vec![Value::Short(1), Value::Short(2)])?;
    let c = compound! { "list" => list };

    let expected = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Short, 2)
        .short_payload(1)
        .short_payload(2)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
    Ok(())
}

#[test]
fn empty_untyped_list_is_list_of_end() {
    let c = compound! { "list" => List::empty() };
    let expected = Builder::new()
        .start_compound("")
        .start_list("list", Tag::End, 0)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn empty_typed_list_keeps_its_type() {
    let c = compound! { "list" => List::new(Tag::Compound) };
    let expected = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Compound, 0)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn every_compound_ends_with_end() -> Result<()> {
    let mut items = List::new(Tag::Compound);
    items.push(compound! { "a" => 1i8 })?;
    items.push(compound! {})?;

    let c = compound! {
        "nested" => compound! { "inner" => compound! {} },
        "items" => items,
        "last" => 2i8,
    };

    let expected = Builder::new()
        .start_compound("")
        .start_compound("nested")
        .start_compound("inner")
        .end_compound()
        .end_compound()
        .start_list("items", Tag::Compound, 2)
        .start_anon_compound()
        .byte("a", 1)
        .end_compound()
        .start_anon_compound()
        .end_compound()
        .byte("last", 2)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
    Ok(())
}

#[test]
fn insertion_order_is_wire_order() {
    let mut c = Compound::new();
    c.insert("z", 1i8);
    c.insert("a", 2i8);
    c.insert("z", 3i8);

    let expected = Builder::new()
        .start_compound("")
        .byte("z", 3)
        .byte("a", 2)
        .end_compound()
        .build();

    assert_eq!(expected, raw(&c));
}

#[test]
fn write_value_is_payload_only() -> Result<()> {
    let mut writer = Writer::new(Vec::new());
    writer.write_value(&Value::Int(7))?;
    writer.write_value(&Value::String("ab".into()))?;

    assert_eq!(writer.into_inner(), [0, 0, 0, 7, 0, 2, b'a', b'b']);
    Ok(())
}

#[test]
fn name_too_long() {
    let long = "a".repeat(u16::MAX as usize + 1);
    let mut c = Compound::new();
    c.insert(long.clone(), 1i8);

    assert!(matches!(
        encode(&c, "", Compression::None),
        Err(Error::LimitExceeded { .. })
    ));
    assert!(matches!(
        encode(&Compound::new(), &long, Compression::None),
        Err(Error::LimitExceeded { .. })
    ));
}

#[test]
fn longest_string_fits() -> Result<()> {
    let longest = "a".repeat(u16::MAX as usize);
    let bs = encode(&compound! { "s" => longest }, "", Compression::None)?;
    assert_eq!(bs[7..9], [0xff, 0xff]);
    Ok(())
}

#[test]
fn java_cesu8_strings() -> Result<()> {
    let c = compound! { "s" => "😈" };
    let opts = WriteOpts::new().strings(Strings::JavaCesu8);
    let bs = encode_with_opts(&c, "", Compression::None, opts)?;

    let modified = cesu8::to_java_cesu8("😈");
    let expected = Builder::new()
        .start_compound("")
        .tag(Tag::String)
        .name("s")
        .raw_str_len(modified.len())
        .raw_bytes(&modified)
        .end_compound()
        .build();

    assert_eq!(expected, bs);
    Ok(())
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_are_io() {
    let c = compound! { "a" => 1 };
    assert!(matches!(
        to_writer(FailingWriter, &c, "", Compression::None),
        Err(Error::Io(_))
    ));
    assert!(matches!(
        to_writer(FailingWriter, &c, "", Compression::Gzip),
        Err(Error::Io(_))
    ));
}
