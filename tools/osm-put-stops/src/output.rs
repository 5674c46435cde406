use anyhow::{Context, Result};
use put_stops::{write_clusters_csv, write_stops_csv, write_stops_geojson, StopCluster, StopTable};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Write the stop table as CSV
pub fn write_stops(table: &StopTable, output_path: &Path) -> Result<()> {
    log::info!("Writing {} stops to {}", table.len(), output_path.display());

    let rows = write_stops_csv(table, create(output_path)?)
        .with_context(|| format!("Failed to write stop CSV to {}", output_path.display()))?;
    log::debug!("  {} rows written", rows);

    Ok(())
}

/// Write locatable stops as GeoJSON points
pub fn write_stops_points(table: &StopTable, output_path: &Path) -> Result<()> {
    let features = write_stops_geojson(table, create(output_path)?)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;
    log::info!("Wrote {} stop points to {}", features, output_path.display());

    Ok(())
}

pub fn write_clusters(clusters: &[StopCluster], output_path: &Path) -> Result<()> {
    log::info!(
        "Writing {} stop clusters to {}",
        clusters.len(),
        output_path.display()
    );

    write_clusters_csv(clusters, create(output_path)?)
        .with_context(|| format!("Failed to write cluster CSV to {}", output_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use put_stops::tags::collect_relevant;
    use put_stops::{cluster_stops, extract, ExtractOptions, NodeRecord};

    fn table() -> StopTable {
        let nodes = vec![NodeRecord {
            id: 1,
            tags: collect_relevant([
                ("public_transport", "platform"),
                ("highway", "bus_stop"),
                ("name", "Rathaus"),
            ]),
            lat: 48.78,
            lon: 9.18,
        }];
        extract(ExtractOptions::default(), Vec::new(), Vec::new(), nodes)
    }

    #[test]
    fn test_write_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let table = table();

        let csv_path = dir.path().join("stops.csv");
        write_stops(&table, &csv_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("1,node,Rathaus,48.78,9.18"));

        let geojson_path = dir.path().join("stops.geojson");
        write_stops_points(&table, &geojson_path).unwrap();
        let geojson = std::fs::read_to_string(&geojson_path).unwrap();
        assert!(geojson.contains("\"FeatureCollection\""));
        assert!(geojson.contains("\"node/1\""));

        let clusters_path = dir.path().join("clusters.csv");
        write_clusters(&cluster_stops(&table), &clusters_path).unwrap();
        let clusters = std::fs::read_to_string(&clusters_path).unwrap();
        assert!(clusters.lines().nth(1).unwrap().starts_with("Rathaus,bus,"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("stops.csv");
        let err = write_stops(&table(), &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create"));
    }
}
