use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use osmpbf::{Element, ElementReader, RelMemberType};
use put_stops::pipeline::{ExtractOptions, NodePass, RelationPass, WayPass};
use put_stops::tags::collect_relevant;
use put_stops::{ElementKind, Member, NodeRecord, RelationRecord, StopTable, Tags, WayRecord};
use std::path::Path;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("spinner template is a valid literal"),
    );
    pb.set_message(message.to_string());
    pb
}

fn open(path: &Path) -> Result<ElementReader<std::io::BufReader<std::fs::File>>> {
    ElementReader::from_path(path)
        .with_context(|| format!("Failed to open PBF file: {}", path.display()))
}

pub fn member_kind(member_type: RelMemberType) -> ElementKind {
    match member_type {
        RelMemberType::Node => ElementKind::Node,
        RelMemberType::Way => ElementKind::Way,
        RelMemberType::Relation => ElementKind::Relation,
    }
}

/// Run all three passes over the PBF file. The file is read once per pass.
pub fn extract_stops(path: &Path, options: ExtractOptions) -> Result<StopTable> {
    log::info!("Reading PBF file: {}", path.display());

    let relations = relation_pass(path, RelationPass::new(options))?;
    let ways = way_pass(path, relations.finish())?;
    let nodes = node_pass(path, ways.finish())?;

    Ok(nodes.finish())
}

fn relation_pass(path: &Path, mut pass: RelationPass) -> Result<RelationPass> {
    let pb = spinner("Scanning relations...");
    let mut count = 0u64;

    open(path)?
        .for_each(|element| {
            if let Element::Relation(rel) = element {
                let members = rel
                    .members()
                    .map(|m| {
                        Member::new(
                            member_kind(m.member_type),
                            m.member_id,
                            m.role().unwrap_or(""),
                        )
                    })
                    .collect();

                pass.process(&RelationRecord {
                    id: rel.id(),
                    tags: collect_relevant(rel.tags()),
                    members,
                });

                count += 1;
                if count % 100_000 == 0 {
                    pb.set_message(format!("Processed {} relations...", count));
                }
            }
        })
        .context("Failed to read relations")?;

    pb.finish_with_message(format!("Processed {} relations", count));
    Ok(pass)
}

fn way_pass(path: &Path, mut pass: WayPass) -> Result<WayPass> {
    let pb = spinner("Scanning ways...");
    let mut count = 0u64;

    open(path)?
        .for_each(|element| {
            if let Element::Way(way) = element {
                let tags = collect_relevant(way.tags());
                if pass.wants(way.id(), &tags) {
                    pass.process(&WayRecord {
                        id: way.id(),
                        tags,
                        node_refs: way.refs().collect(),
                    });
                } else {
                    pass.skip();
                }

                count += 1;
                if count % 1_000_000 == 0 {
                    pb.set_message(format!("Processed {} ways...", count));
                }
            }
        })
        .context("Failed to read ways")?;

    pb.finish_with_message(format!("Processed {} ways", count));
    Ok(pass)
}

fn node_pass(path: &Path, mut pass: NodePass) -> Result<NodePass> {
    let pb = spinner("Scanning nodes...");
    let mut count = 0u64;

    let mut handle = |id: i64, tags: Tags, lat: f64, lon: f64| {
        if pass.wants(id, &tags) {
            pass.process(&NodeRecord { id, tags, lat, lon });
        } else {
            pass.skip();
        }

        count += 1;
        if count % 10_000_000 == 0 {
            pb.set_message(format!("Processed {} nodes...", count));
        }
    };

    open(path)?
        .for_each(|element| match element {
            Element::Node(node) => {
                handle(node.id(), collect_relevant(node.tags()), node.lat(), node.lon())
            }
            Element::DenseNode(node) => {
                handle(node.id(), collect_relevant(node.tags()), node.lat(), node.lon())
            }
            _ => {}
        })
        .context("Failed to read nodes")?;

    pb.finish_with_message(format!("Processed {} nodes", count));
    Ok(pass)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_kind_mapping() {
        assert_eq!(member_kind(RelMemberType::Node), ElementKind::Node);
        assert_eq!(member_kind(RelMemberType::Way), ElementKind::Way);
        assert_eq!(member_kind(RelMemberType::Relation), ElementKind::Relation);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.osm.pbf");
        let err = extract_stops(&path, ExtractOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to open PBF file"));
    }
}
