mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use stac_schema::*;

#[test]
fn test_minimal_round_trip() {
    let engine = default_engine();
    let raw = minimal_item();

    let item = engine.validate_item(&raw).unwrap();
    let wire = item.to_value().unwrap();

    assert_eq!(wire, raw);
    let object = wire.as_object().unwrap();
    assert!(!object.contains_key("collection"));
    assert!(!object.contains_key("stac_extensions"));
    assert!(!object.contains_key("type"));
    assert!(!object.contains_key("geometry"));
}

#[test]
fn test_reparse_is_equivalent() {
    let engine = default_engine();
    let raw = item_with_extensions(
        &["view", "eo"],
        json!({
            "datetime": "2020-01-01T00:00:00Z",
            "view:off_nadir": 4.2,
            "eo:cloud_cover": 12,
            "eo:bands": [{"name": "B1", "center_wavelength": 0.44}],
            "custom:thing": {"nested": true}
        }),
    );

    let item = engine.validate_item(&raw).unwrap();
    let again = engine.validate_item(&item.to_value().unwrap()).unwrap();

    assert_eq!(item, again);
    assert_eq!(again.to_value().unwrap(), raw);
}

#[test]
fn test_stac_version_is_always_emitted() {
    let engine = default_engine();
    let mut raw = minimal_item();
    raw.as_object_mut().unwrap().remove("stac_version");

    let item = engine.validate_item(&raw).unwrap();
    assert_eq!(item.stac_version(), STAC_VERSION);
    assert_eq!(item.to_value().unwrap()["stac_version"], json!("1.0.0"));
}

#[test]
fn test_stac_version_mismatch_is_rejected() {
    let engine = default_engine();
    let mut raw = minimal_item();
    raw["stac_version"] = json!("0.9.0");

    let err = engine.validate_item(&raw).unwrap_err();
    let StacSchemaError::Validation(validation) = err else {
        panic!("expected a validation error");
    };
    assert!(validation.has_issue_at("stac_version"));
    assert_eq!(validation.issues.len(), 1);
}

#[test]
fn test_missing_required_fields() {
    let engine = default_engine();
    let raw = json!({"stac_version": "1.0.0", "properties": {}});

    let err = engine.validate_item(&raw).unwrap_err();
    let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
    for expected in ["id", "properties.datetime", "assets", "links", "bbox"] {
        assert!(paths.contains(&expected), "missing issue for {expected}: {paths:?}");
    }
}

#[test]
fn test_bbox_length() {
    let engine = default_engine();

    let mut six = minimal_item();
    six["bbox"] = json!([0, 0, 0, 1, 1, 1]);
    assert_eq!(engine.validate_item(&six).unwrap().bbox().len(), 6);

    let mut five = minimal_item();
    five["bbox"] = json!([0, 0, 0, 1, 1]);
    let err = engine.validate_item(&five).unwrap_err();
    assert!(err.issues().iter().any(|i| i.path == "bbox"));
}

#[test]
fn test_extension_fields_are_type_checked() {
    let engine = default_engine();
    let raw = item_with_extensions(
        &["view"],
        json!({"datetime": "2020-01-01T00:00:00Z", "view:off_nadir": "steep"}),
    );

    let err = engine.validate_item(&raw).unwrap_err();
    assert_eq!(err.issues()[0].path, "properties.view:off_nadir");
    assert_eq!(err.issues()[0].message, "expected a number");
}

#[test]
fn test_without_extensions_fields_pass_through() {
    let engine = default_engine();
    let mut raw = minimal_item();
    raw["properties"]["view:off_nadir"] = json!("not checked");

    let item = engine.validate_item(&raw).unwrap();
    let properties = item.properties().unwrap();
    assert_eq!(properties.extra()["view:off_nadir"], json!("not checked"));
}

#[test]
fn test_required_extension_fields() {
    let engine = default_engine();
    let raw = item_with_extensions(&["sar"], json!({"datetime": "2020-01-01T00:00:00Z"}));

    let err = engine.validate_item(&raw).unwrap_err();
    let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "properties.sar:instrument_mode",
            "properties.sar:frequency_band",
            "properties.sar:polarizations",
            "properties.sar:product_type",
        ]
    );
}

#[test]
fn test_unknown_extension_fails_before_validation() {
    let engine = default_engine();
    let raw = item_with_extensions(&["not-a-real-extension"], json!({}));

    let err = engine.validate_item(&raw).unwrap_err();
    assert!(matches!(err, StacSchemaError::UnknownExtension { .. }));
    assert_eq!(engine.cache_stats().entries, 0);

    engine.validate_item(&minimal_item()).unwrap();
}

#[test]
fn test_accessors() {
    let engine = default_engine();
    let raw = json!({
        "type": "Feature",
        "id": "scene-7",
        "stac_version": "1.0.0",
        "stac_extensions": ["checksum", "view"],
        "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
        "properties": {"datetime": "2021-06-01T10:30:00+02:00", "view:sun_azimuth": 140.0},
        "assets": {
            "visual": {
                "href": "https://example.com/visual.tif",
                "type": "image/tiff",
                "roles": ["visual"]
            }
        },
        "links": [{"rel": "self", "href": "https://example.com/scene-7.json"}],
        "bbox": [1, 2, 3, 4],
        "collection": "scenes"
    });

    let item = engine.validate_item(&raw).unwrap();
    assert_eq!(item.id(), "scene-7");
    assert_eq!(item.collection(), Some("scenes"));
    assert_eq!(item.stac_extensions(), Some(vec!["checksum", "view"]));
    assert_eq!(item.bbox(), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(item.property("sun_azimuth"), Some(json!(140.0)));
    assert_eq!(item.geometry().unwrap()["type"], json!("Point"));
    assert_eq!(item.datetime().unwrap().to_rfc3339(), "2021-06-01T10:30:00+02:00");

    let visual = item.asset("visual").unwrap();
    assert_eq!(visual.str("media_type"), Some("image/tiff"));
    assert_eq!(item.assets().count(), 1);

    let links: Vec<LinkRef<'_>> = item.links().collect();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].rel(), "self");

    assert_eq!(item.to_value().unwrap(), raw);
}

#[test]
fn test_defaults_are_not_emitted() {
    let engine = default_engine();
    let raw = item_with_extensions(&["version"], json!({"datetime": "2020-01-01T00:00:00Z"}));

    let item = engine.validate_item(&raw).unwrap();
    assert_eq!(item.property("deprecated"), Some(json!(false)));
    assert!(!item.properties().unwrap().is_set("deprecated"));
    assert_eq!(item.to_value().unwrap(), raw);
}

#[test]
fn test_item_extra_fields_policy() {
    let mut raw = minimal_item();
    raw["foreign"] = json!(1);

    let allow = default_engine();
    assert_eq!(allow.validate_item(&raw).unwrap().to_value().unwrap(), raw);

    let forbid = engine_with(
        colliding_registry(),
        StacSchemaConfig::default().with_item_extra_fields(ExtraFields::Forbid),
    );
    let err = forbid.validate_item(&raw).unwrap_err();
    assert_eq!(err.issues()[0].path, "foreign");
}

#[test]
fn test_serde_and_json_text() {
    let engine = default_engine();
    let raw = minimal_item();
    let item = engine.parse_item(&raw.to_string()).unwrap();

    assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    let text = item.to_json().unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), raw);
}

#[test]
fn test_geometry_must_be_geojson() {
    let engine = default_engine();

    for geometry in [json!("POINT(1 2)"), json!({"coordinates": [1.0, 2.0]}), json!([1.0, 2.0])] {
        let mut raw = minimal_item();
        raw["geometry"] = geometry;
        let err = engine.validate_item(&raw).unwrap_err();
        assert_eq!(
            err.issues(),
            &[ValidationIssue::new("geometry", "expected a GeoJSON geometry object or null")]
        );
    }

    let mut raw = minimal_item();
    raw["geometry"] = json!(null);
    let item = engine.validate_item(&raw).unwrap();
    assert_eq!(item.geometry(), Some(&json!(null)));
}

#[test]
fn test_wrong_item_type() {
    let engine = default_engine();
    let mut raw = minimal_item();
    raw["type"] = json!("FeatureCollection");

    let err = engine.validate_item(&raw).unwrap_err();
    assert_eq!(
        err.issues(),
        &[ValidationIssue::new("type", "unexpected value; permitted: \"Feature\"")]
    );
}

#[test]
fn test_malformed_extension_list() {
    let engine = default_engine();

    let mut raw = minimal_item();
    raw["stac_extensions"] = json!(["view", 3]);
    let err = engine.validate_item(&raw).unwrap_err();
    assert_eq!(
        err.issues(),
        &[ValidationIssue::new("stac_extensions[1]", "expected a string")]
    );

    raw["stac_extensions"] = json!("view");
    let err = engine.validate_item(&raw).unwrap_err();
    assert_eq!(err.issues(), &[ValidationIssue::new("stac_extensions", "expected an array")]);

    // nothing was composed for either shape
    assert!(engine.factory().cache().is_empty());
}
