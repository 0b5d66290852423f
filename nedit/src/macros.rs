/// Build a [`Compound`][`crate::Compound`] from `name => value` pairs. Values
/// can be anything that converts into a [`Value`][`crate::Value`], including
/// nested compounds and lists.
///
/// ```
/// use nedit::{compound, List, Tag};
///
/// let pos = List::try_from_values(vec![1.0f64.into(), 64.0f64.into(), 1.0f64.into()]).unwrap();
///
/// let entity = compound! {
///     "id" => "minecraft:pig",
///     "Pos" => pos,
///     "Saddle" => true,
///     "Attributes" => compound! {
///         "generic.max_health" => 10.0f64,
///     },
/// };
///
/// assert_eq!(entity.get_list("Pos").map(List::element_tag), Some(Tag::Double));
/// assert_eq!(entity.get_byte("Saddle"), Some(1));
/// ```
///
/// Entries are inserted in the order written, which is the order they will
/// be encoded in. Note that plain integer literals become `Int`, and plain
/// float literals become `Double`.
#[macro_export]
macro_rules! compound {
    () => {
        $crate::Compound::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut compound = $crate::Compound::new();
        $(
            compound.insert($key, $value);
        )+
        compound
    }};
}
