use hydrosite_core::{
    AttributeValue, Coord, FeatureGeometry, Field, FieldType, LayerKind, Polyline, RasterSampler,
};
use hydrosite_io::{create_writer, parse_streams, AsciiGrid};
use std::fs;
use tempfile::tempdir;

const SCHEMA: &[Field] = &[
    Field::new("plant_id", FieldType::Integer),
    Field::new("rank", FieldType::Text),
];

fn write_two_lines(path: &std::path::Path) {
    let mut writer = create_writer(path).unwrap();
    writer.begin(LayerKind::Lines, SCHEMA).unwrap();
    for (id, rank) in [(1, "4"), (2, "4.1")] {
        let x = id as f64 * 100.0;
        writer
            .write(
                &FeatureGeometry::Line(Polyline::from_xy(&[(x, 0.0), (x + 50.0, 10.0)])),
                &[AttributeValue::Integer(id), AttributeValue::Text(rank.into())],
            )
            .unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn geojson_layer_reads_back_as_streams() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plants.geojson");
    write_two_lines(&path);

    // plant_id is not an id property, so ordinals are used
    let streams = parse_streams(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[1].id.value(), 2);
    assert_eq!(streams[1].geometry.coords()[1], Coord { x: 250.0, y: 10.0 });
}

#[test]
fn csv_layer_quotes_line_wkt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plants.csv");
    write_two_lines(&path);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "wkt,plant_id,rank");
    assert_eq!(lines[1], "\"LINESTRING (100 0, 150 10)\",1,4");
    assert_eq!(lines[2], "\"LINESTRING (200 0, 250 10)\",2,4.1");
}

#[test]
fn grid_from_file_samples_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dem.asc");
    fs::write(
        &path,
        "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 5\nNODATA_value -1\n10 20\n-1 40\n",
    )
    .unwrap();
    let grid = AsciiGrid::from_path(&path).unwrap();
    assert_eq!(grid.sample(7.0, 8.0), Some(20.0));
    assert_eq!(grid.sample(2.0, 2.0), None);
    assert_eq!(grid.sample(7.0, 2.0), Some(40.0));
    assert!(AsciiGrid::from_path(dir.path().join("none.asc")).is_err());
}
