//! Derived views over the dataset: the success aggregation feeding the
//! pie-style chart and the filtered point set feeding the scatter.
//!
//! Both computations are pure functions of `(Dataset, SelectionState)`; they
//! hold no state and no reference that outlives the call. Zero matches is a
//! normal empty result, never an error.

use std::fmt;

use super::model::{Dataset, Outcome};
use super::selection::{SelectionState, SiteSelection};

// ---------------------------------------------------------------------------
// AggregationView
// ---------------------------------------------------------------------------

/// What a pie slice stands for: a site (all-sites mode) or an outcome class
/// (single-site mode). Rendering beyond the raw label is the UI's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceLabel {
    Site(String),
    Outcome(Outcome),
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceLabel::Site(site) => write!(f, "{site}"),
            SliceLabel::Outcome(outcome) => write!(f, "{outcome}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: SliceLabel,
    pub value: u64,
}

/// Counts by label for the proportion chart. Labels appear in dataset site
/// order (all-sites mode) or outcome-class order (single-site mode).
///
/// Policy: slices whose value would be zero are omitted in both modes, so an
/// empty view means "nothing matched" and every present slice is drawable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationView {
    slices: Vec<Slice>,
}

impl AggregationView {
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Sum over all slice values.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

// ---------------------------------------------------------------------------
// PointSetView
// ---------------------------------------------------------------------------

/// One scatter point: a record projected to the fields the chart needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPoint {
    pub payload_mass: f64,
    pub outcome: Outcome,
    pub booster_version: String,
}

/// The filtered, unaggregated record list, in dataset order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSetView {
    points: Vec<LaunchPoint>,
}

impl PointSetView {
    pub fn points(&self) -> &[LaunchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// View computation
// ---------------------------------------------------------------------------

fn in_range(range: (f64, f64), mass: f64) -> bool {
    // Inclusive on both bounds.
    mass >= range.0 && mass <= range.1
}

/// Compute the success/failure aggregation for the current selection.
///
/// * All-sites mode: success count per site over the records inside the
///   payload range, labelled by site in dataset order.
/// * Single-site mode: count per outcome class over the selected site's
///   records inside the payload range.
pub fn compute_aggregation(dataset: &Dataset, selection: &SelectionState) -> AggregationView {
    let range = selection.payload_range();
    let mut slices = Vec::new();

    match selection.site() {
        SiteSelection::All => {
            let sites = dataset.sites();
            let mut successes = vec![0u64; sites.len()];
            for rec in dataset.records() {
                if rec.outcome == Outcome::Success && in_range(range, rec.payload_mass) {
                    if let Some(idx) = sites.iter().position(|s| s == &rec.site) {
                        successes[idx] += 1;
                    }
                }
            }
            for (site, &count) in sites.iter().zip(&successes) {
                if count > 0 {
                    slices.push(Slice {
                        label: SliceLabel::Site(site.clone()),
                        value: count,
                    });
                }
            }
        }
        SiteSelection::Site(_) => {
            let mut counts = [0u64; 2]; // indexed by outcome class
            for rec in dataset.records() {
                if selection.site().matches(&rec.site) && in_range(range, rec.payload_mass) {
                    counts[rec.outcome.class() as usize] += 1;
                }
            }
            for outcome in [Outcome::Failure, Outcome::Success] {
                let count = counts[outcome.class() as usize];
                if count > 0 {
                    slices.push(Slice {
                        label: SliceLabel::Outcome(outcome),
                        value: count,
                    });
                }
            }
        }
    }

    AggregationView { slices }
}

/// Compute the filtered point set for the current selection.
///
/// The predicate is a pure conjunction: payload mass inside the inclusive
/// range, and site equality when a single site is selected. Record order is
/// preserved.
pub fn compute_point_set(dataset: &Dataset, selection: &SelectionState) -> PointSetView {
    let range = selection.payload_range();

    let points = dataset
        .records()
        .iter()
        .filter(|rec| in_range(range, rec.payload_mass) && selection.site().matches(&rec.site))
        .map(|rec| LaunchPoint {
            payload_mass: rec.payload_mass,
            outcome: rec.outcome,
            booster_version: rec.booster_version.clone(),
        })
        .collect();

    PointSetView { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(site: &str, payload: f64, class: i64, booster: &str) -> Record {
        Record {
            site: site.to_string(),
            payload_mass: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version: booster.to_string(),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("A", 500.0, 1, "v1.0"),
            rec("A", 1500.0, 0, "v1.1"),
            rec("B", 3000.0, 1, "FT"),
        ])
        .unwrap()
    }

    fn selection(dataset: &Dataset, site: SiteSelection, low: f64, high: f64) -> SelectionState {
        let mut sel = SelectionState::new(dataset);
        sel.set_site(site);
        sel.set_payload_range(low, high).unwrap();
        sel
    }

    #[test]
    fn test_all_sites_aggregation_counts_successes_per_site() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::All, 0.0, 10000.0);

        let agg = compute_aggregation(&ds, &sel);
        assert_eq!(
            agg.slices(),
            &[
                Slice {
                    label: SliceLabel::Site("A".to_string()),
                    value: 1
                },
                Slice {
                    label: SliceLabel::Site("B".to_string()),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn test_all_sites_total_equals_dataset_success_count() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::All, 0.0, 10000.0);

        let dataset_successes: u64 = ds
            .records()
            .iter()
            .map(|r| u64::from(r.outcome.class()))
            .sum();
        assert_eq!(compute_aggregation(&ds, &sel).total(), dataset_successes);
    }

    #[test]
    fn test_single_site_aggregation_counts_by_outcome() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("A".to_string()), 0.0, 1000.0);

        // Only the 500 kg success of site A is in range; the zero-count
        // failure slice is omitted per the documented policy.
        let agg = compute_aggregation(&ds, &sel);
        assert_eq!(
            agg.slices(),
            &[Slice {
                label: SliceLabel::Outcome(Outcome::Success),
                value: 1
            }]
        );
    }

    #[test]
    fn test_single_site_full_range_has_both_classes() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("A".to_string()), 0.0, 10000.0);

        let agg = compute_aggregation(&ds, &sel);
        assert_eq!(
            agg.slices(),
            &[
                Slice {
                    label: SliceLabel::Outcome(Outcome::Failure),
                    value: 1
                },
                Slice {
                    label: SliceLabel::Outcome(Outcome::Success),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn test_no_matches_yield_empty_views_not_errors() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::All, 4000.0, 5000.0);

        assert!(compute_aggregation(&ds, &sel).is_empty());
        assert!(compute_point_set(&ds, &sel).is_empty());
    }

    #[test]
    fn test_site_with_no_successes_omitted_in_all_mode() {
        let ds = Dataset::from_records(vec![
            rec("A", 500.0, 1, "v1.0"),
            rec("C", 700.0, 0, "v1.0"),
        ])
        .unwrap();
        let sel = SelectionState::new(&ds);

        let agg = compute_aggregation(&ds, &sel);
        assert_eq!(
            agg.slices(),
            &[Slice {
                label: SliceLabel::Site("A".to_string()),
                value: 1
            }]
        );
    }

    #[test]
    fn test_point_set_preserves_dataset_order() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::All, 0.0, 10000.0);

        let points = compute_point_set(&ds, &sel);
        let masses: Vec<f64> = points.points().iter().map(|p| p.payload_mass).collect();
        assert_eq!(masses, vec![500.0, 1500.0, 3000.0]);
    }

    #[test]
    fn test_point_set_range_bounds_inclusive() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::All, 500.0, 1500.0);

        let points = compute_point_set(&ds, &sel);
        let masses: Vec<f64> = points.points().iter().map(|p| p.payload_mass).collect();
        assert_eq!(masses, vec![500.0, 1500.0]);
    }

    #[test]
    fn test_point_set_single_site_and_range() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("A".to_string()), 0.0, 1000.0);

        let points = compute_point_set(&ds, &sel);
        assert_eq!(
            points.points(),
            &[LaunchPoint {
                payload_mass: 500.0,
                outcome: Outcome::Success,
                booster_version: "v1.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_point_set_matches_predicate_exactly() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("A".to_string()), 400.0, 2000.0);

        let points = compute_point_set(&ds, &sel);
        let (low, high) = sel.payload_range();
        for p in points.points() {
            assert!(p.payload_mass >= low && p.payload_mass <= high);
        }
        // Same cardinality as a manual filter over the dataset.
        let expected = ds
            .records()
            .iter()
            .filter(|r| r.site == "A" && r.payload_mass >= low && r.payload_mass <= high)
            .count();
        assert_eq!(points.len(), expected);
    }

    #[test]
    fn test_filter_order_independence() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("A".to_string()), 1000.0, 3500.0);
        let (low, high) = sel.payload_range();

        // Site first, then range.
        let site_then_range: Vec<&Record> = ds
            .records()
            .iter()
            .filter(|r| r.site == "A")
            .filter(|r| r.payload_mass >= low && r.payload_mass <= high)
            .collect();
        // Range first, then site.
        let range_then_site: Vec<&Record> = ds
            .records()
            .iter()
            .filter(|r| r.payload_mass >= low && r.payload_mass <= high)
            .filter(|r| r.site == "A")
            .collect();
        assert_eq!(site_then_range, range_then_site);

        let points = compute_point_set(&ds, &sel);
        let masses: Vec<f64> = points.points().iter().map(|p| p.payload_mass).collect();
        let expected: Vec<f64> = site_then_range.iter().map(|r| r.payload_mass).collect();
        assert_eq!(masses, expected);
    }

    #[test]
    fn test_views_are_idempotent() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("B".to_string()), 0.0, 5000.0);

        assert_eq!(
            compute_aggregation(&ds, &sel),
            compute_aggregation(&ds, &sel)
        );
        assert_eq!(compute_point_set(&ds, &sel), compute_point_set(&ds, &sel));
    }

    #[test]
    fn test_unknown_site_yields_empty_views() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::Site("Nowhere".to_string()), 0.0, 10000.0);

        assert!(compute_aggregation(&ds, &sel).is_empty());
        assert!(compute_point_set(&ds, &sel).is_empty());
    }

    #[test]
    fn test_range_wider_than_dataset_matches_everything() {
        let ds = sample_dataset();
        let sel = selection(&ds, SiteSelection::All, -1e9, 1e9);

        assert_eq!(compute_point_set(&ds, &sel).len(), ds.len());
    }
}
