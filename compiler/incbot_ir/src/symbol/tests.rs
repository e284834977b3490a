use super::*;

#[test]
fn undefined_is_zero() {
    assert_eq!(SymbolId::UNDEFINED.raw(), 0);
    assert!(!SymbolId::UNDEFINED.is_defined());
    assert_eq!(SymbolId::UNDEFINED.index(), None);
    assert_eq!(SymbolId::default(), SymbolId::UNDEFINED);
}

#[test]
fn index_round_trip() {
    let id = SymbolId::from_index(0).unwrap();
    assert_eq!(id.raw(), 1);
    assert_eq!(id.index(), Some(0));

    let id = SymbolId::from_index(41).unwrap();
    assert_eq!(id, SymbolId::from_raw(42));
    assert_eq!(id.index(), Some(41));
}

#[test]
fn from_index_rejects_overflow() {
    assert_eq!(SymbolId::from_index(u32::MAX as usize), None);
    assert_eq!(SymbolId::from_index(usize::MAX), None);
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", SymbolId::from_raw(7)), "SymbolId(7)");
    assert_eq!(format!("{:?}", SymbolId::UNDEFINED), "SymbolId(undefined)");
}
