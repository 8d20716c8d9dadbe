use georef_core::{Error, GeoPoint, GroundControlPoint, PixelPoint};
use georef_session::persist::{decode, encode, STORAGE_KEY};

fn controls() -> [GroundControlPoint; 4] {
    [
        GroundControlPoint::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(52.52, 13.40)),
        GroundControlPoint::new(PixelPoint::new(800.0, 0.0), GeoPoint::new(52.52, 13.42)),
        GroundControlPoint::new(PixelPoint::new(800.0, 600.0), GeoPoint::new(52.50, 13.42)),
        GroundControlPoint::new(PixelPoint::new(0.0, 600.0), GeoPoint::new(52.50, 13.40)),
    ]
}

fn assert_rejected(bytes: &[u8]) {
    assert_eq!(decode(bytes), Err(Error::InvalidPersistedData));
}

#[test]
fn round_trips_through_the_stored_representation() {
    let bytes = encode(&controls()).unwrap();
    assert_eq!(decode(&bytes).unwrap(), controls());
}

#[test]
fn the_storage_key_is_stable() {
    // Stored data outlives the process, so the key is part of the
    // schema and must never drift.
    assert_eq!(STORAGE_KEY, "georef.control-points");
}

#[test]
fn encodes_the_documented_shape() {
    let bytes = encode(&controls()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(4));
    assert_eq!(value[0]["pixel"]["x"], 0.0);
    assert_eq!(value[1]["pixel"]["x"], 800.0);
    assert_eq!(value[2]["geo"]["lon"], 13.42);
    assert_eq!(value[3]["geo"]["lat"], 52.50);
}

#[test]
fn decodes_the_documented_shape() {
    let decoded = decode(
        br#"[
            {"pixel": {"x": 0.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}}
        ]"#,
    )
    .unwrap();
    assert_eq!(decoded, controls());
}

#[test]
fn wrong_record_counts_are_rejected() {
    assert_rejected(b"[]");
    assert_rejected(
        br#"[
            {"pixel": {"x": 0.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}}
        ]"#,
    );
    assert_rejected(
        br#"[
            {"pixel": {"x": 0.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}},
            {"pixel": {"x": 400.0, "y": 300.0}, "geo": {"lat": 52.51, "lon": 13.41}}
        ]"#,
    );
}

#[test]
fn malformed_data_is_rejected() {
    assert_rejected(b"");
    assert_rejected(b"not json");
    assert_rejected(b"{}");
    assert_rejected(b"[1, 2, 3, 4]");
    // A record missing a coordinate.
    assert_rejected(
        br#"[
            {"pixel": {"x": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}}
        ]"#,
    );
    // A coordinate of the wrong type.
    assert_rejected(
        br#"[
            {"pixel": {"x": "0.0", "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}}
        ]"#,
    );
}

#[test]
fn unknown_fields_are_rejected() {
    assert_rejected(
        br#"[
            {"pixel": {"x": 0.0, "y": 0.0, "z": 1.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}}
        ]"#,
    );
    assert_rejected(
        br#"[
            {"pixel": {"x": 0.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}, "label": "a"},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}}
        ]"#,
    );
}

#[test]
fn non_finite_coordinates_are_rejected() {
    // 1e999 overflows f64; whether the parser reports an error or
    // produces infinity, the record must not get through.
    assert_rejected(
        br#"[
            {"pixel": {"x": 1e999, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.40}},
            {"pixel": {"x": 800.0, "y": 0.0}, "geo": {"lat": 52.52, "lon": 13.42}},
            {"pixel": {"x": 800.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.42}},
            {"pixel": {"x": 0.0, "y": 600.0}, "geo": {"lat": 52.50, "lon": 13.40}}
        ]"#,
    );
}
