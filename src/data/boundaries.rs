//! Country boundary dataset: GeoJSON in, projected and triangulated shapes out.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use geo::{
    BoundingRect, Contains, Coord, Intersects, LineString, MultiPolygon, Point, Polygon, Rect,
    RemoveRepeatedPoints, Triangle, TriangulateEarcut,
};

use crate::analysis::projection::{project, union};

/// Coarse outlines of the supported countries and a few neighbours.
static BUNDLED_COUNTRIES: &str = include_str!("../../assets/world-countries.geojson");

const BUNDLED_ATTRIBUTION: &str = "Boundaries: simplified outlines bundled with User Atlas";

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("failed to read boundary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: Option<GeoJsonProperties>,
    #[serde(default)]
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonProperties {
    #[serde(default)]
    name: Option<String>,
}

/// Positions stay `Vec<f64>`: GeoJSON allows a third (altitude) component.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// One country (or other named area) ready to draw.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    /// `properties.name`; the join key against region countries.
    pub name: Option<String>,
    /// Projected outline, holes included.
    pub shape: MultiPolygon<f64>,
    /// Fill triangles; holes are left uncovered.
    pub triangles: Vec<Triangle<f64>>,
    pub bbox: Rect<f64>,
}

impl BoundaryFeature {
    fn from_geojson(feature: GeoJsonFeature) -> Option<Self> {
        let name = feature.properties.and_then(|p| p.name);
        let raw_polygons = match feature.geometry? {
            GeoJsonGeometry::Polygon { coordinates } => vec![coordinates],
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates,
            GeoJsonGeometry::Unsupported => return None,
        };

        let mut shape: MultiPolygon<f64> = raw_polygons
            .iter()
            .filter_map(|rings| project_polygon(rings))
            .collect::<MultiPolygon<f64>>()
            .remove_repeated_points();
        // A closed ring needs three distinct corners plus the closing point
        shape.0.retain(|polygon| polygon.exterior().0.len() >= 4);

        let bbox = shape.bounding_rect()?;
        let triangles = shape.iter().flat_map(|polygon| polygon.earcut_triangles()).collect();

        Some(Self {
            name,
            shape,
            triangles,
            bbox,
        })
    }

    pub fn contains(&self, p: Coord<f64>) -> bool {
        let p = Point::from(p);
        self.bbox.intersects(&p) && self.shape.contains(&p)
    }
}

/// Outer ring first, then holes. `Polygon::new` closes open rings.
fn project_polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| project_ring(ring));
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

fn project_ring(ring: &[Vec<f64>]) -> LineString<f64> {
    ring.iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| project(pos[0], pos[1]))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BoundaryDataset {
    pub features: Vec<BoundaryFeature>,
    pub attribution: String,
}

impl BoundaryDataset {
    pub fn from_geojson_str(json: &str, attribution: impl Into<String>) -> Result<Self, BoundaryError> {
        let collection: GeoJsonFeatureCollection = serde_json::from_str(json)?;
        let total = collection.features.len();
        let features: Vec<BoundaryFeature> = collection
            .features
            .into_iter()
            .filter_map(BoundaryFeature::from_geojson)
            .collect();

        if features.len() < total {
            log::debug!(
                "Skipped {} of {} features without drawable polygons",
                total - features.len(),
                total
            );
        }

        Ok(Self {
            features,
            attribution: attribution.into(),
        })
    }

    pub fn bundled() -> Result<Self, BoundaryError> {
        Self::from_geojson_str(BUNDLED_COUNTRIES, BUNDLED_ATTRIBUTION)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &Path) -> Result<Self, BoundaryError> {
        let json = std::fs::read_to_string(path).map_err(|source| BoundaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_geojson_str(&json, format!("Boundaries: {}", file_name))
    }

    /// Index of the topmost feature under `p` (later features draw on top).
    pub fn feature_at(&self, p: Coord<f64>) -> Option<usize> {
        self.features.iter().rposition(|f| f.contains(p))
    }

    /// Union of the extents of every feature called `name`.
    pub fn bounds_of(&self, name: &str) -> Option<Rect<f64>> {
        self.features
            .iter()
            .filter(|f| f.name.as_deref() == Some(name))
            .map(|f| f.bbox)
            .reduce(|acc, bbox| union(&acc, &bbox))
    }

    pub fn triangle_count(&self) -> usize {
        self.features.iter().map(|f| f.triangles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SUPPORTED_COUNTRIES;
    use geo::{Area, Centroid};

    const SQUARES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Squareland"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
            {"type": "Feature", "properties": {"name": "Twin Isles"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[20,0,5],[22,0,5],[22,2,5],[20,2,5],[20,0,5]]],
                [[[30,0],[32,0],[32,2],[30,2],[30,0]]]
             ]}},
            {"type": "Feature", "properties": {"name": "Pointy"},
             "geometry": {"type": "Point", "coordinates": [1,1]}},
            {"type": "Feature", "properties": {}, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_parse_polygon_and_multipolygon() {
        let dataset = BoundaryDataset::from_geojson_str(SQUARES, "test").unwrap();
        assert_eq!(dataset.features.len(), 2);
        assert_eq!(dataset.features[0].name.as_deref(), Some("Squareland"));
        assert_eq!(dataset.features[0].triangles.len(), 2);
        assert_eq!(dataset.features[1].shape.0.len(), 2);
        assert_eq!(dataset.triangle_count(), 6);
    }

    #[test]
    fn test_hit_testing() {
        let dataset = BoundaryDataset::from_geojson_str(SQUARES, "test").unwrap();
        assert_eq!(dataset.feature_at(project(5.0, 5.0)), Some(0));
        assert_eq!(dataset.feature_at(project(31.0, 1.0)), Some(1));
        assert_eq!(dataset.feature_at(project(15.0, 5.0)), None);
    }

    #[test]
    fn test_bounds_of() {
        let dataset = BoundaryDataset::from_geojson_str(SQUARES, "test").unwrap();
        let bbox = dataset.bounds_of("Twin Isles").unwrap();
        assert!((bbox.min().x - 20.0).abs() < 1e-9);
        assert!((bbox.max().x - 32.0).abs() < 1e-9);
        assert!(dataset.bounds_of("Atlantis").is_none());
    }

    #[test]
    fn test_holes_are_neither_filled_nor_hit() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"name": "Ringland"},
             "geometry": {"type": "Polygon", "coordinates": [
                [[0,0],[10,0],[10,10],[0,10],[0,0]],
                [[4,4],[6,4],[6,6],[4,6],[4,4]]
             ]}}
        ]}"#;
        let dataset = BoundaryDataset::from_geojson_str(json, "test").unwrap();
        let feature = &dataset.features[0];

        assert_eq!(dataset.feature_at(project(1.0, 1.0)), Some(0));
        assert_eq!(dataset.feature_at(project(5.0, 5.0)), None);

        // The triangles cover exactly the ring, not the hole
        let filled: f64 = feature.triangles.iter().map(|t| t.unsigned_area()).sum();
        assert!((filled - feature.shape.unsigned_area()).abs() < 1e-6);
        for triangle in &feature.triangles {
            let center = triangle.centroid();
            assert!(feature.contains(center.0), "triangle {:?} paints the hole", triangle);
        }
    }

    #[test]
    fn test_duplicate_vertices_and_open_rings() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"name": "Sloppy"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[4,0],[4,0],[4,4],[0,4]]]}},
            {"type": "Feature", "properties": {"name": "Sliver"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,1],[0,0]]]}}
        ]}"#;
        let dataset = BoundaryDataset::from_geojson_str(json, "test").unwrap();
        assert_eq!(dataset.features.len(), 1);
        assert_eq!(dataset.features[0].shape.0[0].exterior().0.len(), 5);
        assert_eq!(dataset.features[0].triangles.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = BoundaryDataset::from_geojson_str("{\"features\": 3}", "x").unwrap_err();
        assert!(matches!(err, BoundaryError::Json(_)));
    }

    #[test]
    fn test_bundled_dataset_covers_supported_countries() {
        let dataset = BoundaryDataset::bundled().unwrap();
        for country in SUPPORTED_COUNTRIES {
            assert!(dataset.bounds_of(country).is_some(), "missing {country}");
        }
        // Central Germany lands on Germany
        let idx = dataset.feature_at(project(10.0, 51.0)).unwrap();
        assert_eq!(dataset.features[idx].name.as_deref(), Some("Germany"));
    }
}
