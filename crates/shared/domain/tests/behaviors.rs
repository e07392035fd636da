use folio_domain::behaviors::Behaviors;
use folio_domain::constants::{COUNTERS, SMOOTH_SCROLL, TYPING};

#[test]
fn names_map_to_flags() {
    assert_eq!(Behaviors::from(TYPING), Behaviors::TYPING);
    assert_eq!(Behaviors::from(SMOOTH_SCROLL), Behaviors::SMOOTH_SCROLL);
    assert_eq!(Behaviors::from("*"), Behaviors::ALL);
    assert_eq!(Behaviors::from("marquee"), Behaviors::empty());
}

#[test]
fn default_enables_everything() {
    assert_eq!(Behaviors::default(), Behaviors::ALL);
}

#[test]
fn deserializes_every_spelling() {
    let bits: Behaviors = serde_json::from_str("9").expect("bits");
    assert_eq!(bits, Behaviors::NAVIGATION | Behaviors::COUNTERS);

    let list: Behaviors = serde_json::from_str(r#"["typing", "counters"]"#).expect("list");
    assert_eq!(list, Behaviors::TYPING | Behaviors::from(COUNTERS));

    let joined: Behaviors = serde_json::from_str(r#""contact, progress""#).expect("joined");
    assert_eq!(joined, Behaviors::CONTACT | Behaviors::PROGRESS);
}

#[test]
fn serializes_as_bits() {
    let json = serde_json::to_string(&(Behaviors::NAVIGATION | Behaviors::TYPING)).expect("json");
    assert_eq!(json, "5");
}
