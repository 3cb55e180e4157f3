use crate::color::ColorMap;
use crate::data::model::Dataset;
use crate::data::selection::{InvalidRangeError, SelectionState, SiteSelection};
use crate::data::view::{self, AggregationView, PointSetView};

// ---------------------------------------------------------------------------
// Workspace – dataset + selection + derived views
// ---------------------------------------------------------------------------

/// A loaded dataset together with the current selection and the two views
/// derived from it. The views are recomputed synchronously on every accepted
/// selection change, so whatever the renderer reads always reflects the most
/// recently applied selection. A rejected change leaves selection and views
/// untouched.
pub struct Workspace {
    dataset: Dataset,
    selection: SelectionState,
    aggregation: AggregationView,
    point_set: PointSetView,
}

impl Workspace {
    /// Start from the default selection (all sites, full payload range).
    pub fn new(dataset: Dataset) -> Self {
        let selection = SelectionState::new(&dataset);
        let aggregation = view::compute_aggregation(&dataset, &selection);
        let point_set = view::compute_point_set(&dataset, &selection);
        Workspace {
            dataset,
            selection,
            aggregation,
            point_set,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn aggregation(&self) -> &AggregationView {
        &self.aggregation
    }

    pub fn point_set(&self) -> &PointSetView {
        &self.point_set
    }

    /// Apply a site-selection event and recompute both views.
    pub fn select_site(&mut self, site: SiteSelection) {
        self.selection.set_site(site);
        self.recompute();
    }

    /// Apply a payload-range event. An inverted range is rejected and the
    /// prior selection and views stay in effect.
    pub fn set_payload_range(&mut self, low: f64, high: f64) -> Result<(), InvalidRangeError> {
        self.selection.set_payload_range(low, high)?;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.aggregation = view::compute_aggregation(&self.dataset, &self.selection);
        self.point_set = view::compute_point_set(&self.dataset, &self.selection);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded data and derived views (None until a file is loaded).
    pub workspace: Option<Workspace>,

    /// Colours for pie slices in all-sites mode, keyed by site.
    pub site_colors: Option<ColorMap>,

    /// Colours for scatter points, keyed by booster version.
    pub booster_colors: Option<ColorMap>,

    /// Slider-bound draft of the payload range, committed via `apply_range`.
    pub range_input: (f64, f64),

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            workspace: None,
            site_colors: None,
            booster_colors: None,
            range_input: (0.0, 0.0),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, initialise selection and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.site_colors = Some(ColorMap::from_labels(
            dataset.sites().iter().map(String::as_str),
        ));
        self.booster_colors = Some(ColorMap::from_labels(dataset.booster_versions()));

        let workspace = Workspace::new(dataset);
        self.range_input = workspace.selection().payload_range();
        self.workspace = Some(workspace);
        self.status_message = None;
    }

    /// Forward a site-selection event to the workspace.
    pub fn select_site(&mut self, site: SiteSelection) {
        if let Some(ws) = &mut self.workspace {
            ws.select_site(site);
        }
    }

    /// Commit the slider draft as the payload range. On rejection the draft
    /// stays visible so the user can fix it, the committed range is kept,
    /// and the error text is surfaced as the status message.
    pub fn apply_range(&mut self) {
        let Some(ws) = &mut self.workspace else {
            return;
        };
        let (low, high) = self.range_input;
        match ws.set_payload_range(low, high) {
            Ok(()) => self.status_message = None,
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Outcome, Record};
    use crate::data::view::{Slice, SliceLabel};

    fn rec(site: &str, payload: f64, class: i64, booster: &str) -> Record {
        Record {
            site: site.to_string(),
            payload_mass: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version: booster.to_string(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("A", 500.0, 1, "v1.0"),
            rec("A", 1500.0, 0, "v1.1"),
            rec("B", 3000.0, 1, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn test_workspace_initial_views_cover_everything() {
        let ws = Workspace::new(dataset());
        assert_eq!(ws.point_set().len(), 3);
        assert_eq!(ws.aggregation().total(), 2);
        assert_eq!(ws.selection().payload_range(), (500.0, 3000.0));
    }

    #[test]
    fn test_site_change_recomputes_both_views() {
        let mut ws = Workspace::new(dataset());
        ws.select_site(SiteSelection::Site("B".to_string()));

        assert_eq!(ws.point_set().len(), 1);
        assert_eq!(
            ws.aggregation().slices(),
            &[Slice {
                label: SliceLabel::Outcome(Outcome::Success),
                value: 1
            }]
        );
    }

    #[test]
    fn test_rejected_range_keeps_prior_views() {
        let mut ws = Workspace::new(dataset());
        ws.set_payload_range(0.0, 1000.0).unwrap();
        assert_eq!(ws.point_set().len(), 1);

        let err = ws.set_payload_range(900.0, 100.0);
        assert!(err.is_err());
        // Selection and views are unchanged by the rejected transition.
        assert_eq!(ws.selection().payload_range(), (0.0, 1000.0));
        assert_eq!(ws.point_set().len(), 1);
    }

    #[test]
    fn test_apply_range_surfaces_error_as_status() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.range_input, (500.0, 3000.0));

        state.range_input = (2000.0, 100.0);
        state.apply_range();
        assert!(state.status_message.is_some());

        state.range_input = (100.0, 2000.0);
        state.apply_range();
        assert!(state.status_message.is_none());
        let ws = state.workspace.as_ref().unwrap();
        assert_eq!(ws.selection().payload_range(), (100.0, 2000.0));
    }
}
