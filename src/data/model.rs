use std::fmt;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Outcome – launch outcome class
// ---------------------------------------------------------------------------

/// Outcome of a launch, encoded as class 0 (failure) or 1 (success) in the
/// source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class as it appears in the source columns.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Parse a source class value; anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// Record – one launch observation
// ---------------------------------------------------------------------------

/// A single launch record (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Launch site name, non-empty.
    pub site: String,
    /// Payload mass in kg, non-negative.
    pub payload_mass: f64,
    pub outcome: Outcome,
    pub booster_version: String,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded collection
// ---------------------------------------------------------------------------

/// The full loaded launch dataset. Immutable after construction; the site
/// list and payload bounds are computed once and cached.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    /// Distinct sites in first-seen order.
    sites: Vec<String>,
    /// Cached (min, max) over `payload_mass`.
    payload_bounds: (f64, f64),
}

impl Dataset {
    /// Build the dataset and its cached indices. An empty record list is a
    /// load failure, not a valid dataset.
    pub fn from_records(records: Vec<Record>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for rec in &records {
            if !sites.iter().any(|s| s == &rec.site) {
                sites.push(rec.site.clone());
            }
            min = min.min(rec.payload_mass);
            max = max.max(rec.payload_mass);
        }

        Ok(Dataset {
            records,
            sites,
            payload_bounds: (min, max),
        })
    }

    /// Read-only view of every record, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct launch sites in first-seen order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Cached (min, max) payload mass.
    pub fn payload_bounds(&self) -> (f64, f64) {
        self.payload_bounds
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct booster versions in first-seen order (scatter legend order).
    pub fn booster_versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = Vec::new();
        for rec in &self.records {
            if !versions.contains(&rec.booster_version.as_str()) {
                versions.push(&rec.booster_version);
            }
        }
        versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, payload: f64, class: i64, booster: &str) -> Record {
        Record {
            site: site.to_string(),
            payload_mass: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version: booster.to_string(),
        }
    }

    #[test]
    fn test_sites_first_seen_order() {
        let ds = Dataset::from_records(vec![
            rec("CCAFS LC-40", 500.0, 1, "v1.0"),
            rec("VAFB SLC-4E", 1500.0, 0, "v1.1"),
            rec("CCAFS LC-40", 3000.0, 1, "FT"),
            rec("KSC LC-39A", 4200.0, 1, "FT"),
        ])
        .unwrap();

        assert_eq!(ds.sites(), &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
    }

    #[test]
    fn test_payload_bounds_cached() {
        let ds = Dataset::from_records(vec![
            rec("A", 500.0, 1, "v1.0"),
            rec("A", 1500.0, 0, "v1.0"),
            rec("B", 3000.0, 1, "v1.1"),
        ])
        .unwrap();

        assert_eq!(ds.payload_bounds(), (500.0, 3000.0));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_empty_dataset_is_load_error() {
        let err = Dataset::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_outcome_class_round_trip() {
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::Success.class(), 1);
        assert_eq!(Outcome::Failure.to_string(), "0");
    }

    #[test]
    fn test_booster_versions_first_seen_order() {
        let ds = Dataset::from_records(vec![
            rec("A", 500.0, 1, "FT"),
            rec("A", 1500.0, 0, "v1.0"),
            rec("B", 3000.0, 1, "FT"),
        ])
        .unwrap();

        assert_eq!(ds.booster_versions(), vec!["FT", "v1.0"]);
    }
}
