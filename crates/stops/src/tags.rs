//! Tag storage and the tag keys/values the pipeline reacts to.

use hashbrown::HashMap;

/// Tag storage type
pub type Tags = HashMap<String, String>;

pub const NAME: &str = "name";
pub const PUBLIC_TRANSPORT: &str = "public_transport";
pub const RAILWAY: &str = "railway";
pub const STATION: &str = "station";
pub const ROUTE: &str = "route";
pub const SERVICE: &str = "service";
pub const BUS: &str = "bus";
pub const HIGHWAY: &str = "highway";

/// Every key read anywhere in the pipeline. Readers drop all other tags.
pub const RELEVANT_KEYS: [&str; 12] = [
    NAME,
    PUBLIC_TRANSPORT,
    RAILWAY,
    STATION,
    "train",
    "subway",
    "light_rail",
    "tram",
    BUS,
    HIGHWAY,
    ROUTE,
    SERVICE,
];

/// `public_transport` values that make an element a stop.
pub const STOP_VALUES: [&str; 2] = ["platform", "stop_position"];

/// `railway` values that make an element a station.
pub const RAILWAY_STATION_VALUES: [&str; 3] = ["station", "halt", "tram_stop"];

pub fn is_relevant_key(key: &str) -> bool {
    RELEVANT_KEYS.contains(&key)
}

/// Collect the relevant subset of a raw tag iterator.
pub fn collect_relevant<'a, I>(tags: I) -> Tags
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    tags.into_iter()
        .filter(|(k, _)| is_relevant_key(k))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Restrict a tag set to the given keys.
pub fn filter_keys(tags: &Tags, keys: &[&str]) -> Tags {
    tags.iter()
        .filter(|(k, _)| keys.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

pub fn tag_is(tags: &Tags, key: &str, value: &str) -> bool {
    tags.get(key).map(|v| v == value).unwrap_or(false)
}

pub fn tag_in(tags: &Tags, key: &str, values: &[&str]) -> bool {
    tags.get(key)
        .map(|v| values.contains(&v.as_str()))
        .unwrap_or(false)
}

/// True when the tags alone make an element a stop or station candidate.
pub fn is_stop_candidate(tags: &Tags) -> bool {
    tag_in(tags, PUBLIC_TRANSPORT, &STOP_VALUES)
        || tag_is(tags, PUBLIC_TRANSPORT, "station")
        || tag_in(tags, RAILWAY, &RAILWAY_STATION_VALUES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_collect_relevant_drops_other_keys() {
        let raw = vec![
            ("name", "Hauptbahnhof"),
            ("public_transport", "platform"),
            ("wheelchair", "yes"),
            ("operator", "DB"),
        ];
        let collected = collect_relevant(raw);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected.get("name").map(String::as_str), Some("Hauptbahnhof"));
        assert!(!collected.contains_key("wheelchair"));
    }

    #[test]
    fn test_filter_keys() {
        let t = tags(&[("bus", "yes"), ("railway", "platform"), ("name", "X")]);
        let filtered = filter_keys(&t, &["bus", "highway"]);
        assert_eq!(filtered, tags(&[("bus", "yes")]));
    }

    #[test]
    fn test_is_stop_candidate() {
        assert!(is_stop_candidate(&tags(&[("public_transport", "platform")])));
        assert!(is_stop_candidate(&tags(&[("public_transport", "stop_position")])));
        assert!(is_stop_candidate(&tags(&[("public_transport", "station")])));
        assert!(is_stop_candidate(&tags(&[("railway", "halt")])));
        assert!(is_stop_candidate(&tags(&[("railway", "tram_stop")])));

        assert!(!is_stop_candidate(&tags(&[("public_transport", "stop_area")])));
        assert!(!is_stop_candidate(&tags(&[("railway", "rail")])));
        assert!(!is_stop_candidate(&tags(&[("highway", "bus_stop")])));
    }
}
