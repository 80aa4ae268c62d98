use super::*;

#[test]
fn primitives_are_below_first_dynamic() {
    for ty in [
        TypeId::BOOLEAN,
        TypeId::BYTE,
        TypeId::SHORT,
        TypeId::CHAR,
        TypeId::INT,
        TypeId::LONG,
        TypeId::FLOAT,
        TypeId::DOUBLE,
        TypeId::VOID,
    ] {
        assert!(ty.is_primitive(), "{ty:?} should be primitive");
        assert!(ty.raw() < TypeId::FIRST_DYNAMIC);
    }
}

#[test]
fn null_and_unknown_are_not_primitive() {
    assert!(!TypeId::NULL.is_primitive());
    assert!(!TypeId::UNKNOWN.is_primitive());
    assert!(TypeId::UNKNOWN.is_unknown());
    assert!(!TypeId::INT.is_unknown());
}

#[test]
fn raw_round_trip() {
    let ty = TypeId::from_raw(42);
    assert_eq!(ty.raw(), 42);
    assert_eq!(ty.index(), 42);
    assert_eq!(format!("{ty:?}"), "TypeId(42)");
}
