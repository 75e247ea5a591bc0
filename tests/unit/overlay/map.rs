use super::*;

#[test]
fn json_object_keys_frames() {
    let raw = r#"{"0": "data:image/png;base64,AAAA", "12": "data:image/png;base64,BBBB"}"#;
    let map = OverlayMap::parse(raw);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(0), Some("data:image/png;base64,AAAA"));
    assert_eq!(map.get(12), Some("data:image/png;base64,BBBB"));
    assert_eq!(map.get(1), None);
}

#[test]
fn bare_data_uri_applies_to_frame_0() {
    let map = OverlayMap::parse("data:image/png;base64,AAAA");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(0), Some("data:image/png;base64,AAAA"));
}

#[test]
fn blank_input_is_empty() {
    assert!(OverlayMap::parse("").is_empty());
    assert!(OverlayMap::parse("   \n\t ").is_empty());
}

#[test]
fn malformed_payload_drops_all_overlays() {
    assert!(OverlayMap::parse("{not json").is_empty());
    assert!(OverlayMap::parse("hello world").is_empty());
    assert!(OverlayMap::parse("[1, 2, 3]").is_empty());
}

#[test]
fn unusable_entries_are_dropped_individually() {
    let raw = r#"{"a": "data:image/png;base64,AAAA", "1": 5, "2": "data:image/png;base64,CCCC"}"#;
    let map = OverlayMap::parse(raw);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(2), Some("data:image/png;base64,CCCC"));
    assert_eq!(map.get(1), None);
}

#[test]
fn non_canonical_keys_are_dropped() {
    let raw = r#"{"05": "data:image/png;base64,AAAA", "+7": "data:image/png;base64,BBBB"}"#;
    assert!(OverlayMap::parse(raw).is_empty());

    let map = OverlayMap::parse(r#"{"0": "data:image/png;base64,CCCC"}"#);
    assert_eq!(map.get(0), Some("data:image/png;base64,CCCC"));
}

#[test]
fn from_entries_builds_directly() {
    let map = OverlayMap::from_entries([(3, "x".to_string()), (7, "y".to_string())]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(7), Some("y"));
}
