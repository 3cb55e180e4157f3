use std::fmt;

use thiserror::Error;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Which launch sites the user is looking at: everything, or one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionState
// ---------------------------------------------------------------------------

/// A payload range transition with `low > high` is rejected; the previous
/// valid range stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid payload range: low {low} exceeds high {high}")]
pub struct InvalidRangeError {
    pub low: f64,
    pub high: f64,
}

/// The current pair of selectors: site and inclusive payload-mass range.
/// Created once at startup, mutated in place by input events.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    site: SiteSelection,
    payload_range: (f64, f64),
}

impl SelectionState {
    /// Default selection: all sites, full dataset payload range.
    pub fn new(dataset: &Dataset) -> Self {
        SelectionState {
            site: SiteSelection::All,
            payload_range: dataset.payload_bounds(),
        }
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    /// Inclusive (low, high) payload-mass bounds.
    pub fn payload_range(&self) -> (f64, f64) {
        self.payload_range
    }

    /// Select a site. The value is not validated against the dataset's site
    /// set; an unknown site simply matches nothing.
    pub fn set_site(&mut self, site: SiteSelection) {
        self.site = site;
    }

    /// Update the payload range. Bounds outside the dataset's payload range
    /// are accepted as-is (no clamping); an inverted range is rejected and
    /// the prior range retained.
    pub fn set_payload_range(&mut self, low: f64, high: f64) -> Result<(), InvalidRangeError> {
        if low > high {
            return Err(InvalidRangeError { low, high });
        }
        self.payload_range = (low, high);
        Ok(())
    }
}
