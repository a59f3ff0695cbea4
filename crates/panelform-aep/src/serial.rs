//! Country serial assignment.
//!
//! Serials are a pure function of the distinct country set: sort the
//! non-missing country names ascending and number them 1..N. The mapping is
//! computed once per run and threaded through the normalizer, so it never
//! depends on file order or any process-wide state.

use std::collections::BTreeMap;

use crate::ingest::Observation;

/// Dense 1..N serial per distinct country name, in lexicographic order
#[derive(Debug, Default)]
pub struct SerialMap {
    map: BTreeMap<String, u32>,
}

impl SerialMap {
    /// Build the mapping from all observed country names.
    ///
    /// Missing names are skipped; duplicates collapse. The BTreeMap keeps
    /// the keys sorted, so serials follow string order regardless of the
    /// order observations arrive in.
    pub fn build(observations: &[Observation]) -> Self {
        let mut map: BTreeMap<String, u32> = observations
            .iter()
            .filter_map(|o| o.country_name.clone())
            .map(|name| (name, 0))
            .collect();
        for (serial, value) in map.values_mut().enumerate() {
            *value = serial as u32 + 1;
        }
        Self { map }
    }

    /// Serial for `country`, or `None` when the country was never observed
    pub fn get(&self, country: &str) -> Option<u32> {
        self.map.get(country).copied()
    }

    /// Number of distinct countries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn obs(name: Option<&str>) -> Observation {
        Observation {
            country_code: None,
            country_name: name.map(str::to_string),
            year: Value::Null,
            value: Value::Null,
            unit: None,
            region_name: None,
            indicator_topic: None,
            indicator_group: None,
            indicator_name: None,
            indicator_source: None,
            metric: None,
            source_file: "test.json".to_string(),
        }
    }

    #[test]
    fn serials_follow_lexicographic_order() {
        let observations = vec![
            obs(Some("Kenya")),
            obs(Some("Algeria")),
            obs(Some("Zimbabwe")),
            obs(Some("Ghana")),
        ];
        let serials = SerialMap::build(&observations);
        assert_eq!(serials.get("Algeria"), Some(1));
        assert_eq!(serials.get("Ghana"), Some(2));
        assert_eq!(serials.get("Kenya"), Some(3));
        assert_eq!(serials.get("Zimbabwe"), Some(4));
    }

    #[test]
    fn duplicates_and_missing_names_are_ignored() {
        let observations = vec![
            obs(Some("Kenya")),
            obs(None),
            obs(Some("Kenya")),
            obs(Some("Algeria")),
        ];
        let serials = SerialMap::build(&observations);
        assert_eq!(serials.len(), 2);
        assert_eq!(serials.get("Kenya"), Some(2));
    }

    #[test]
    fn order_of_observations_does_not_matter() {
        let forward = vec![obs(Some("Algeria")), obs(Some("Kenya"))];
        let reverse = vec![obs(Some("Kenya")), obs(Some("Algeria"))];
        let a = SerialMap::build(&forward);
        let b = SerialMap::build(&reverse);
        assert_eq!(a.get("Algeria"), b.get("Algeria"));
        assert_eq!(a.get("Kenya"), b.get("Kenya"));
    }

    #[test]
    fn unknown_country_has_no_serial() {
        let serials = SerialMap::build(&[obs(Some("Kenya"))]);
        assert_eq!(serials.get("Mali"), None);
    }
}
