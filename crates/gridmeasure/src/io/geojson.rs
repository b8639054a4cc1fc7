use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{error::Result, indexer::ContourIndex};

impl ContourIndex {
    /// One polygon feature per indexed hole, in index order
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .iter()
            .enumerate()
            .map(|(i, (centroid, contour))| {
                let ring: Vec<Vec<f64>> = contour
                    .points
                    .iter()
                    .chain(contour.points.first())
                    .map(|&[x, y]| vec![f64::from(x), f64::from(y)])
                    .collect();

                let mut properties = Map::new();
                properties.insert("centroid_x".to_string(), JsonValue::from(centroid.x));
                properties.insert("centroid_y".to_string(), JsonValue::from(centroid.y));
                properties.insert(
                    "area".to_string(),
                    Number::from_f64(contour.area()).map(JsonValue::Number).unwrap_or(JsonValue::Null),
                );

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                    id: Some(geojson::feature::Id::Number(Number::from(i))),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let mut foreign_members = Map::new();
        foreign_members.insert("image_width".to_string(), JsonValue::from(self.image_width()));
        foreign_members.insert("image_height".to_string(), JsonValue::from(self.image_height()));
        foreign_members.insert("hole_count".to_string(), JsonValue::from(self.len()));

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        }
    }

    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }

    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }
}
