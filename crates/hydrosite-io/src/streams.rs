//! Stream network input from GeoJSON.

use anyhow::{bail, Context, Result};
use geojson::{feature::Id, Feature, GeoJson, Value};
use hydrosite_core::{Coord, Polyline, StreamId, StreamLine};
use std::path::Path;
use tracing::{debug, warn};

/// Properties checked, in order, for a stream id.
const ID_PROPERTIES: &[&str] = &["cat", "id"];

/// Read every line of a GeoJSON file as a stream.
pub fn read_streams(path: impl AsRef<Path>) -> Result<Vec<StreamLine>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading streams {}", path.display()))?;
    parse_streams(&text).with_context(|| format!("parsing streams {}", path.display()))
}

/// Parse a FeatureCollection (or a single Feature) of line features.
///
/// The stream id comes from the `cat` or `id` property, then the feature id,
/// then the 1-based feature ordinal. Each part of a MultiLineString becomes
/// its own stream with the feature's id; the search numbers such lines as
/// parts. Other geometry types are skipped.
pub fn parse_streams(text: &str) -> Result<Vec<StreamLine>> {
    let geojson: GeoJson = text.parse().context("invalid GeoJSON")?;
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            bail!("expected a Feature or FeatureCollection, found a bare geometry")
        }
    };

    let mut streams = Vec::with_capacity(features.len());
    for (ordinal, feature) in features.iter().enumerate() {
        let id = stream_id(feature).unwrap_or(StreamId::new(ordinal as u64 + 1));
        let Some(geometry) = &feature.geometry else {
            warn!(stream = %id, "feature without geometry, skipped");
            continue;
        };
        let parts = match &geometry.value {
            Value::LineString(positions) => vec![positions],
            Value::MultiLineString(lines) => lines.iter().collect(),
            other => {
                warn!(stream = %id, kind = other.type_name(), "not a line, skipped");
                continue;
            }
        };
        for positions in parts {
            let coords = positions
                .iter()
                .map(|p| match p.as_slice() {
                    [x, y, ..] => Ok(Coord { x: *x, y: *y }),
                    _ => bail!("stream {id}: position with fewer than two ordinates"),
                })
                .collect::<Result<Vec<_>>>()?;
            if coords.is_empty() {
                warn!(stream = %id, "empty line, skipped");
                continue;
            }
            streams.push(StreamLine::new(id, Polyline::new(coords)));
        }
    }
    debug!(streams = streams.len(), "read stream network");
    Ok(streams)
}

fn stream_id(feature: &Feature) -> Option<StreamId> {
    let from_properties = ID_PROPERTIES
        .iter()
        .find_map(|key| feature.property(key).and_then(json_id));
    from_properties.or_else(|| match feature.id.as_ref()? {
        Id::Number(n) => json_id(&serde_json::Value::Number(n.clone())),
        Id::String(s) => s.trim().parse().ok().map(StreamId::new),
    })
}

fn json_id(value: &serde_json::Value) -> Option<StreamId> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .map(StreamId::new),
        serde_json::Value::String(s) => s.trim().parse().ok().map(StreamId::new),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature", "properties": {"cat": 12},
         "geometry": {"type": "LineString", "coordinates": [[0, 0], [10, 0], [20, 5]]}},
        {"type": "Feature", "id": 40, "properties": {"name": "creek"},
         "geometry": {"type": "LineString", "coordinates": [[0, 1], [3, 4]]}},
        {"type": "Feature", "properties": {},
         "geometry": {"type": "Point", "coordinates": [1, 1]}},
        {"type": "Feature", "properties": {"id": "7"},
         "geometry": {"type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]], [[5, 5], [6, 6], [7, 7]]]}},
        {"type": "Feature", "properties": null,
         "geometry": {"type": "LineString", "coordinates": [[0, 0, 100], [0, 9, 90]]}}
      ]
    }"#;

    #[test]
    fn test_ids_and_parts() {
        let streams = parse_streams(NETWORK).unwrap();
        let ids: Vec<u64> = streams.iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![12, 40, 7, 7, 5]);
        assert_eq!(streams[0].geometry.len(), 3);
        assert_eq!(streams[3].geometry.len(), 3);
        assert!((streams[1].geometry.length() - 18f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_z_ordinate_ignored() {
        let streams = parse_streams(NETWORK).unwrap();
        assert_eq!(streams[4].geometry.coords()[1], Coord { x: 0.0, y: 9.0 });
    }

    #[test]
    fn test_bare_geometry_rejected() {
        let err = parse_streams(r#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.geojson");
        std::fs::write(&path, NETWORK).unwrap();
        assert_eq!(read_streams(&path).unwrap().len(), 5);
        assert!(read_streams(dir.path().join("missing.geojson")).is_err());
    }
}
