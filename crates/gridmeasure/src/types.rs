use geo_types::{Coord, LineString, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Integer pixel location of a detected hole. Ordered by `x`, then `y`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema,
)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another centroid
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn scaled(self, scale: f64) -> [f64; 2] {
        [f64::from(self.x) * scale, f64::from(self.y) * scale]
    }
}

impl From<Click> for Centroid {
    fn from(click: Click) -> Self {
        Self::new(click.x, click.y)
    }
}

/// A mouse click in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Click {
    pub x: i32,
    pub y: i32,
}

impl Click {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, centroid: Centroid) -> f64 {
        Centroid::from(self).distance_to(centroid)
    }
}

/// Closed boundary of a detected blob, as traced from the edge map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    /// Convert to a geo-types Polygon for geometric operations.
    /// The ring is closed implicitly.
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self.points
            .iter()
            .map(|&[x, y]| Coord { x: f64::from(x), y: f64::from(y) })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area of the boundary polygon (absolute shoelace area)
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Moment centroid truncated to whole pixels, or `None` for a
    /// degenerate (zero-area) contour.
    pub fn centroid(&self) -> Option<Centroid> {
        use geo::{Area, Centroid as _};

        let polygon = self.to_geo_polygon();
        if polygon.unsigned_area() == 0.0 {
            return None;
        }
        let center = polygon.centroid()?;
        if !center.x().is_finite() || !center.y().is_finite() {
            return None;
        }
        Some(Centroid::new(center.x() as i32, center.y() as i32))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
