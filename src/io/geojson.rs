use crate::coord::Coordinates;
use crate::error::QthError;
use crate::locator::GridSquare;
use geo_types::LineString;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use wkt::ToWkt;

fn square_feature(square: &GridSquare) -> Feature {
    let geometry = Geometry::new(Value::from(&square.to_polygon()));

    let mut properties = JsonObject::new();
    properties.insert("locator".to_string(), square.locator.clone().into());

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Grid squares as a GeoJSON `FeatureCollection`, one polygon feature per square
/// with a `locator` property.
///
/// # Example
/// ```
/// use qth_locator::{Bounds, GridLevel, generate_grids, squares_to_geojson};
///
/// let squares = generate_grids(&Bounds::new(49.0, 48.0, 18.0, 16.0), GridLevel::Square);
/// let collection = squares_to_geojson(&squares);
/// assert_eq!(collection.features.len(), 1);
/// ```
pub fn squares_to_geojson(squares: &[GridSquare]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: squares.iter().map(square_feature).collect(),
        foreign_members: None,
    }
}

/// Serialized form of [`squares_to_geojson`].
pub fn squares_to_geojson_string(squares: &[GridSquare]) -> Result<String, QthError> {
    serde_json::to_string(&GeoJson::FeatureCollection(squares_to_geojson(squares)))
        .map_err(|e| QthError::SerializationError(e.to_string()))
}

/// A grid square's polygon as WKT.
pub fn square_to_wkt(square: &GridSquare) -> String {
    square.to_polygon().wkt_string()
}

/// A sampled path as a GeoJSON `LineString` geometry.
///
/// Points stay in the order given; an antimeridian crossing is not split.
pub fn path_to_geojson(path: &[Coordinates]) -> Geometry {
    let line: LineString<f64> = path.iter().map(|c| (c.longitude, c.latitude)).collect();
    Geometry::new(Value::from(&line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::great_circle_path;
    use crate::grid::generate_grids;
    use crate::locator::{Bounds, GridLevel};

    #[test]
    fn test_squares_feature_collection() -> Result<(), QthError> {
        let squares = generate_grids(&Bounds::new(50.0, 48.0, 18.0, 16.0), GridLevel::Square);
        let collection = squares_to_geojson(&squares);

        assert_eq!(collection.features.len(), 2);
        let locators: Vec<&str> = collection
            .features
            .iter()
            .filter_map(|f| f.property("locator").and_then(|v| v.as_str()))
            .collect();
        assert_eq!(locators, ["JN88", "JN89"]);

        let first = collection
            .features
            .first()
            .and_then(|f| f.geometry.as_ref())
            .map(|g| g.value.clone());
        match first {
            Some(Value::Polygon(rings)) => assert_eq!(rings[0].len(), 5),
            other => panic!("expected polygon, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_geojson_string_parses_back() -> Result<(), QthError> {
        let square = GridSquare::from_locator("JN88ee")?;
        let text = squares_to_geojson_string(std::slice::from_ref(&square))?;
        let parsed: GeoJson = text
            .parse()
            .map_err(|e: geojson::Error| QthError::SerializationError(e.to_string()))?;
        assert!(matches!(parsed, GeoJson::FeatureCollection(fc) if fc.features.len() == 1));
        Ok(())
    }

    #[test]
    fn test_square_to_wkt() -> Result<(), QthError> {
        let square = GridSquare::from_locator("JN88")?;
        let wkt = square_to_wkt(&square);
        assert!(wkt.starts_with("POLYGON(("));
        assert!(wkt.contains("16 48"));
        assert!(wkt.contains("18 49"));
        Ok(())
    }

    #[test]
    fn test_path_line_string() {
        let path = great_circle_path(&(16.3738, 48.2082), &(-74.0060, 40.7128), 10);
        let geometry = path_to_geojson(&path);
        match geometry.value {
            Value::LineString(points) => {
                assert_eq!(points.len(), 10);
                assert_eq!(points[0], vec![16.3738, 48.2082]);
                assert_eq!(points[9], vec![-74.006, 40.7128]);
            }
            other => panic!("expected line string, got {:?}", other),
        }
    }
}
