//! CSV and GeoJSON writers for stop tables and clusters.

use std::io::Write;

use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, Geometry, Value};

use crate::aggregate::{ClusterRecord, StopCluster};
use crate::models::types::Result;
use crate::table::{StopRecord, StopTable};

/// Write one row per stop with a header. Returns the number of rows.
pub fn write_stops_csv<W: Write>(table: &StopTable, writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for record in table.records() {
        csv.serialize(&record)?;
        rows += 1;
    }

    csv.flush()?;
    Ok(rows)
}

/// Write one row per cluster with a header. Returns the number of rows.
pub fn write_clusters_csv<W: Write>(clusters: &[StopCluster], writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);

    for cluster in clusters {
        csv.serialize(ClusterRecord::from(cluster))?;
    }

    csv.flush()?;
    Ok(clusters.len())
}

fn stop_to_feature(record: StopRecord) -> Result<Option<Feature>> {
    let (Some(lat), Some(lon)) = (record.latitude, record.longitude) else {
        return Ok(None);
    };

    let id = format!("{}/{}", record.object_kind, record.id);
    let properties = match serde_json::to_value(&record)? {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    };

    Ok(Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
        id: Some(Id::String(id)),
        properties,
        foreign_members: None,
    }))
}

/// Point features for every locatable stop, in table order.
pub fn stops_to_geojson(table: &StopTable) -> Result<GeoJson> {
    let mut features = Vec::new();
    for record in table.records() {
        if let Some(feature) = stop_to_feature(record)? {
            features.push(feature);
        }
    }

    Ok(GeoJson::from(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }))
}

/// Write the point FeatureCollection. Returns the number of features.
pub fn write_stops_geojson<W: Write>(table: &StopTable, mut writer: W) -> Result<usize> {
    let geojson = stops_to_geojson(table)?;
    let count = match &geojson {
        GeoJson::FeatureCollection(fc) => fc.features.len(),
        _ => 0,
    };

    serde_json::to_writer_pretty(&mut writer, &geojson)?;
    writer.flush()?;
    Ok(count)
}
