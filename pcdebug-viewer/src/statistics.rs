//! Summary statistics over item annotations
//!
//! Annotation lines look like `key: value`. Values for the same key are
//! pooled across all items of a catalog, in catalog order.

use crate::catalog::Catalog;
use pcdebug_core::{Error, Result};
use std::collections::BTreeMap;

/// Separator between key and value in an annotation line
pub const SEPARATOR: char = ':';

/// Aggregate of one annotation key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ParameterStats {
    /// `None` for an empty slice
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count: values.len(),
            mean,
            std: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Parse one annotation line
///
/// Returns `None` when the line has no separator and is not a parameter at all.
pub fn parse_parameter_line(line: &str) -> Option<Result<(&str, f64)>> {
    if !line.contains(SEPARATOR) {
        return None;
    }

    let mut parts = line.split(SEPARATOR);
    let (key, value) = match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => (key.trim(), value.trim()),
        _ => return Some(Err(Error::Parse(format!("expected a single '{}'", SEPARATOR)))),
    };
    if key.is_empty() {
        return Some(Err(Error::Parse("empty key".to_string())));
    }

    Some(
        value
            .parse::<f64>()
            .map(|v| (key, v))
            .map_err(|e| Error::Parse(format!("value '{}' of '{}': {}", value, key, e))),
    )
}

/// Pool parameter values per key from `(item id, annotation text)` pairs
pub fn collect_parameters<'a, I>(annotations: I) -> BTreeMap<String, Vec<f64>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut parameters: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (id, text) in annotations {
        for line in text.lines() {
            match parse_parameter_line(line) {
                None => {}
                Some(Ok((key, value))) => {
                    tracing::debug!("item {}::{}={}", id, key, value);
                    parameters.entry(key.to_string()).or_default().push(value);
                }
                Some(Err(e)) => {
                    tracing::warn!("Could not parse line '{}' of item {}: {}", line, id, e);
                }
            }
        }
    }
    parameters
}

/// Statistics for every key with at least one parsed value
pub fn compute(catalog: &Catalog) -> BTreeMap<String, ParameterStats> {
    let annotations = catalog
        .items()
        .iter()
        .map(|item| (item.id.as_str(), item.annotation_text.as_str()));

    collect_parameters(annotations)
        .into_iter()
        .filter_map(|(key, values)| ParameterStats::from_values(&values).map(|stats| (key, stats)))
        .collect()
}

/// Log one line per key
pub fn report(stats: &BTreeMap<String, ParameterStats>) {
    if stats.is_empty() {
        tracing::info!("No parameters found");
        return;
    }
    for (key, s) in stats {
        tracing::info!(
            "{}: mean={} std={} min={} max={} (n={})",
            key, s.mean, s.std, s.min, s.max, s.count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use approx::assert_relative_eq;
    use pcdebug_core::ColoredPointCloud3f;

    fn catalog_of(texts: &[&str]) -> Catalog {
        let items = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Item::new(format!("item_{}", i), ColoredPointCloud3f::new(), *text))
            .collect();
        Catalog::new(items)
    }

    #[test]
    fn test_pooled_statistics_skip_bad_values() {
        let catalog = catalog_of(&["a: 1\nb: 2", "a: 3", "a: bad"]);

        let values = collect_parameters(
            catalog.items().iter().map(|i| (i.id.as_str(), i.annotation_text.as_str())),
        );
        assert_eq!(values["a"], vec![1.0, 3.0]);

        let stats = compute(&catalog);
        assert_eq!(stats.len(), 2);

        let a = stats["a"];
        assert_eq!(a.count, 2);
        assert_relative_eq!(a.mean, 2.0);
        assert_relative_eq!(a.std, 1.0);
        assert_relative_eq!(a.min, 1.0);
        assert_relative_eq!(a.max, 3.0);

        let b = stats["b"];
        assert_relative_eq!(b.mean, 2.0);
        assert_relative_eq!(b.std, 0.0);
        assert_relative_eq!(b.min, 2.0);
        assert_relative_eq!(b.max, 2.0);
    }

    #[test]
    fn test_empty_catalog_has_no_statistics() {
        assert!(compute(&Catalog::default()).is_empty());
    }

    #[test]
    fn test_key_without_valid_values_is_omitted() {
        let stats = compute(&catalog_of(&["only: nope", "", "free text line"]));
        assert!(stats.is_empty());
    }

    #[test]
    fn test_parse_parameter_line() {
        assert!(parse_parameter_line("no separator here").is_none());
        assert!(parse_parameter_line("").is_none());

        let (key, value) = parse_parameter_line("  fitness :  0.75\r").unwrap().unwrap();
        assert_eq!(key, "fitness");
        assert_relative_eq!(value, 0.75);

        assert!(matches!(parse_parameter_line("time: 12:30"), Some(Err(Error::Parse(_)))));
        assert!(matches!(parse_parameter_line(": 4"), Some(Err(Error::Parse(_)))));
        assert!(matches!(parse_parameter_line("k:"), Some(Err(Error::Parse(_)))));
    }

    #[test]
    fn test_population_standard_deviation() {
        let stats = ParameterStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std, 2.0);
        assert!(ParameterStats::from_values(&[]).is_none());
    }
}
