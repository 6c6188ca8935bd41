use serde::Deserialize;

/// The companion's marker dataset: one feature per tracked restaurant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkerSet {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]`, GeoJSON order.
    #[serde(default)]
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub last_checked: String,
    /// Machine state word as published upstream ("working", "broken", ...).
    #[serde(default)]
    pub dot: String,
}

impl Feature {
    /// Placeholder shown for a saved slot that matched nothing.
    #[must_use]
    pub fn not_found_placeholder() -> Self {
        Self {
            geometry: Geometry::default(),
            properties: Properties {
                street: "Location not found".to_string(),
                city: "Check address".to_string(),
                last_checked: "Checked 67 minutes ago".to_string(),
                dot: "...".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_schema_and_ignores_extra_fields() {
        let raw = r#"{
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-87.6, 41.9] },
                "properties": {
                    "street": "123 Main St",
                    "city": "Chicago",
                    "last_checked": "Checked 3 minutes ago",
                    "dot": "working",
                    "is_broken": false,
                    "is_active": true,
                    "state": "IL",
                    "country": "USA"
                }
            }]
        }"#;
        let set: MarkerSet = serde_json::from_str(raw).expect("valid markers");
        assert_eq!(set.features.len(), 1);
        let feature = &set.features[0];
        assert_eq!(feature.properties.street, "123 Main St");
        assert_eq!(feature.geometry.coordinates, [-87.6, 41.9]);
    }

    #[test]
    fn missing_properties_default_to_empty() {
        let raw = r#"{"features": [{"geometry": {"coordinates": [0, 0]}, "properties": {}}]}"#;
        let set: MarkerSet = serde_json::from_str(raw).expect("valid markers");
        assert_eq!(set.features[0].properties.dot, "");
    }
}
