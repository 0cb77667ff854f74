use super::*;

#[test]
fn physical_size_is_ratio_multiple() {
    let logical = LogicalSize::new(430, 250);
    let physical = logical.to_physical(2);
    assert_eq!(physical.width, 860);
    assert_eq!(physical.height, 500);
    assert_eq!(physical.byte_len(), 860 * 500 * 4);
}

#[test]
fn empty_when_any_side_is_zero() {
    assert!(LogicalSize::new(0, 10).is_empty());
    assert!(LogicalSize::new(10, 0).is_empty());
    assert!(!LogicalSize::new(1, 1).is_empty());
}

#[test]
fn surface_id_serializes_as_plain_string() {
    let id = SurfaceId::from("c4");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"c4\"");
    assert_eq!(id.to_string(), "c4");
    let back: SurfaceId = serde_json::from_str("\"c9\"").unwrap();
    assert_eq!(back.as_str(), "c9");
}
