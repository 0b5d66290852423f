use crate::error::Error;
use crate::{compound, List, Tag, Value};

#[test]
fn push_checks_element_tag() {
    let mut list = List::new(Tag::Short);
    list.push(1i16).unwrap();

    assert!(matches!(
        list.push(1i32),
        Err(Error::ListTypeMismatch {
            expected: Tag::Short,
            found: Tag::Int
        })
    ));
    assert_eq!(list.len(), 1);
}

#[test]
fn empty_list_adopts_first_tag() {
    let mut list = List::empty();
    assert_eq!(list.element_tag(), Tag::End);

    list.push("a").unwrap();
    assert_eq!(list.element_tag(), Tag::String);
    assert!(list.push(1).is_err());
}

#[test]
fn typed_empty_list_does_not_adopt() {
    let mut list = List::new(Tag::Compound);
    assert!(list.push(1).is_err());
    assert!(list.push(compound! {}).is_ok());
}

#[test]
fn clear_keeps_tag() {
    let mut list = List::new(Tag::Int);
    list.push(1).unwrap();
    list.clear();

    assert!(list.is_empty());
    assert_eq!(list.element_tag(), Tag::Int);
}

#[test]
fn try_from_values() {
    let list = List::try_from_values(vec![Value::Long(1), Value::Long(2)]).unwrap();
    assert_eq!(list.element_tag(), Tag::Long);
    assert_eq!(list.len(), 2);

    let empty = List::try_from_values(vec![]).unwrap();
    assert_eq!(empty.element_tag(), Tag::End);

    let mixed = List::try_from(vec![Value::Long(1), Value::Int(2)]);
    assert!(matches!(
        mixed,
        Err(Error::ListTypeMismatch {
            expected: Tag::Long,
            found: Tag::Int
        })
    ));
}

#[test]
fn set_checks_element_tag() {
    let mut list = List::try_from_values(vec![Value::Int(1), Value::Int(2)]).unwrap();

    assert_eq!(list.set(0, 10).unwrap(), Value::Int(1));
    assert!(list.set(1, 10i64).is_err());
    assert_eq!(
        list.iter().cloned().collect::<Vec<_>>(),
        [Value::Int(10), Value::Int(2)]
    );
}

#[test]
fn pop_and_iterate() {
    let mut list = List::new(Tag::Byte);
    for b in 0..3i8 {
        list.push(b).unwrap();
    }

    assert_eq!(list.pop(), Some(Value::Byte(2)));
    let bytes: Vec<i8> = list.into_iter().filter_map(|v| v.as_i8()).collect();
    assert_eq!(bytes, [0, 1]);
}
