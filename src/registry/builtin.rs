// Built-in extension definitions. Internal names are unprefixed; wire aliases carry
// the extension prefix.

use std::sync::Arc;

use super::ExtensionDefinition;
use crate::types::{ExtraFields, FieldSpec, FieldType, Schema};

fn prefixed(prefix: &str, name: &str, field_type: FieldType, required: bool) -> FieldSpec {
    let spec = if required {
        FieldSpec::required(name, field_type)
    } else {
        FieldSpec::optional(name, field_type)
    };
    spec.with_alias(format!("{prefix}:{name}"))
}

fn optional(prefix: &str, name: &str, field_type: FieldType) -> FieldSpec {
    prefixed(prefix, name, field_type, false)
}

fn required(prefix: &str, name: &str, field_type: FieldType) -> FieldSpec {
    prefixed(prefix, name, field_type, true)
}

fn eo() -> ExtensionDefinition {
    let band = Schema::new("Band")
        .with_field(FieldSpec::optional("name", FieldType::String))
        .with_field(FieldSpec::optional("common_name", FieldType::String))
        .with_field(FieldSpec::optional("description", FieldType::String))
        .with_field(FieldSpec::optional("center_wavelength", FieldType::Number))
        .with_field(FieldSpec::optional("full_width_half_max", FieldType::Number))
        .with_extra(ExtraFields::Allow);

    ExtensionDefinition::from_fields(
        "eo",
        [
            optional("eo", "bands", FieldType::array(FieldType::object(band))),
            optional("eo", "cloud_cover", FieldType::Number),
        ],
    )
}

fn view() -> ExtensionDefinition {
    ExtensionDefinition::from_fields(
        "view",
        ["off_nadir", "incidence_angle", "azimuth", "sun_azimuth", "sun_elevation"]
            .map(|name| optional("view", name, FieldType::Number)),
    )
}

fn projection() -> ExtensionDefinition {
    let centroid = Arc::new(
        Schema::new("Centroid")
            .with_field(FieldSpec::required("lat", FieldType::Number))
            .with_field(FieldSpec::required("lon", FieldType::Number))
            .with_extra(ExtraFields::Forbid),
    );

    ExtensionDefinition::from_fields(
        "proj",
        [
            optional("proj", "epsg", FieldType::nullable(FieldType::Integer)),
            optional("proj", "wkt2", FieldType::nullable(FieldType::String)),
            optional("proj", "projjson", FieldType::Any),
            optional("proj", "geometry", FieldType::Geometry),
            optional("proj", "bbox", FieldType::tuple(FieldType::Number, [4, 6])),
            optional("proj", "centroid", FieldType::object(centroid)),
            optional("proj", "shape", FieldType::tuple(FieldType::Integer, [2])),
            optional("proj", "transform", FieldType::tuple(FieldType::Number, [6, 9])),
        ],
    )
}

fn sat() -> ExtensionDefinition {
    ExtensionDefinition::from_fields(
        "sat",
        [
            optional("sat", "platform_international_designator", FieldType::String),
            optional(
                "sat",
                "orbit_state",
                FieldType::one_of_literals(["ascending", "descending", "geostationary"]),
            ),
            optional("sat", "absolute_orbit", FieldType::Integer),
            optional("sat", "relative_orbit", FieldType::Integer),
            optional("sat", "anx_datetime", FieldType::DateTime),
        ],
    )
}

fn sar() -> ExtensionDefinition {
    let polarization = FieldType::one_of_literals(["HH", "VV", "HV", "VH"]);

    ExtensionDefinition::from_fields(
        "sar",
        [
            required("sar", "instrument_mode", FieldType::String),
            required(
                "sar",
                "frequency_band",
                FieldType::one_of_literals(["P", "L", "S", "C", "X", "Ku", "K", "Ka"]),
            ),
            optional("sar", "center_frequency", FieldType::Number),
            required("sar", "polarizations", FieldType::array(polarization)),
            required("sar", "product_type", FieldType::String),
            optional("sar", "resolution_range", FieldType::Number),
            optional("sar", "resolution_azimuth", FieldType::Number),
            optional("sar", "pixel_spacing_range", FieldType::Number),
            optional("sar", "pixel_spacing_azimuth", FieldType::Number),
            optional("sar", "looks_range", FieldType::Integer),
            optional("sar", "looks_azimuth", FieldType::Integer),
            optional("sar", "looks_equivalent_number", FieldType::Number),
            optional(
                "sar",
                "observation_direction",
                FieldType::one_of_literals(["left", "right"]),
            ),
        ],
    )
}

fn sci() -> ExtensionDefinition {
    let publication = Schema::new("Publication")
        .with_field(FieldSpec::optional("doi", FieldType::String))
        .with_field(FieldSpec::optional("citation", FieldType::String))
        .with_extra(ExtraFields::Forbid);

    ExtensionDefinition::from_fields(
        "sci",
        [
            optional("sci", "doi", FieldType::String),
            optional("sci", "citation", FieldType::String),
            optional("sci", "publications", FieldType::array(FieldType::object(publication))),
        ],
    )
}

fn version() -> ExtensionDefinition {
    // The versioning fields are unprefixed on the wire.
    ExtensionDefinition::from_fields(
        "version",
        [
            FieldSpec::optional("version", FieldType::String),
            FieldSpec::optional("deprecated", FieldType::Boolean).with_default(false),
        ],
    )
}

pub fn definitions() -> Vec<ExtensionDefinition> {
    vec![eo(), view(), projection(), sat(), sar(), sci(), version()]
}
