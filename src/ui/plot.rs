use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, Points};

use crate::data::model::Outcome;
use crate::data::selection::SiteSelection;
use crate::data::view::SliceLabel;
use crate::state::AppState;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
const FAILURE_COLOR: Color32 = Color32::from_rgb(0xe5, 0x57, 0x3c);

// ---------------------------------------------------------------------------
// Success pie (central panel)
// ---------------------------------------------------------------------------

/// Render the aggregation as a donut chart with a legend underneath.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    let Some(ws) = &state.workspace else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch records file  (File → Open…)");
        });
        return;
    };

    let title = match ws.selection().site() {
        SiteSelection::All => "Total Success Launches by Site".to_string(),
        SiteSelection::Site(site) => format!("Total Success/Failure for {site}"),
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(title);
    });
    ui.add_space(4.0);

    let agg = ws.aggregation();
    if agg.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
        return;
    }

    // ---- Donut ----
    let size = ui
        .available_width()
        .min(ui.available_height() - 40.0)
        .max(120.0);
    ui.vertical_centered(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;
        let total = agg.total() as f32;

        let point_at = |angle: f32| center + radius * egui::vec2(angle.cos(), angle.sin());

        // Start at 12 o'clock, sweep clockwise. Each slice is tessellated
        // into a fan of thin triangles; epaint only fills convex shapes.
        let mut angle = -FRAC_PI_2;
        for slice in agg.slices() {
            let color = slice_color(state, &slice.label);
            let sweep = (slice.value as f32 / total) * TAU;
            let steps = ((sweep / 0.05).ceil() as usize).max(1);

            let mut prev = point_at(angle);
            for i in 1..=steps {
                let next = point_at(angle + sweep * (i as f32 / steps as f32));
                painter.add(Shape::convex_polygon(
                    vec![center, prev, next],
                    color,
                    Stroke::NONE,
                ));
                prev = next;
            }
            angle += sweep;
        }

        // Donut hole, 0.3 of the pie radius.
        painter.circle_filled(center, radius * 0.3, ui.visuals().panel_fill);
    });

    // ---- Legend ----
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for slice in agg.slices() {
            let color = slice_color(state, &slice.label);
            let text = format!("■ {}: {}", legend_label(&slice.label), slice.value);
            ui.label(RichText::new(text).color(color));
        }
    });
}

fn slice_color(state: &AppState, label: &SliceLabel) -> Color32 {
    match label {
        SliceLabel::Site(site) => state
            .site_colors
            .as_ref()
            .map(|cm| cm.color_for(site))
            .unwrap_or(Color32::LIGHT_BLUE),
        SliceLabel::Outcome(Outcome::Success) => SUCCESS_COLOR,
        SliceLabel::Outcome(Outcome::Failure) => FAILURE_COLOR,
    }
}

/// Human-readable legend text; the raw view labels stay untouched.
fn legend_label(label: &SliceLabel) -> String {
    match label {
        SliceLabel::Site(site) => site.clone(),
        SliceLabel::Outcome(Outcome::Success) => "Success (1)".to_string(),
        SliceLabel::Outcome(Outcome::Failure) => "Failure (0)".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Payload scatter (bottom panel)
// ---------------------------------------------------------------------------

/// Render the filtered point set: payload mass against outcome class,
/// coloured by booster version, marker size scaled by payload.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    let Some(ws) = &state.workspace else {
        return;
    };

    let points = ws.point_set();
    if points.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
        return;
    }

    let (min_mass, max_mass) = ws.dataset().payload_bounds();
    let mass_span = (max_mass - min_mass).max(1.0);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome class")
        .include_y(-0.5)
        .include_y(1.5)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One Points item per launch so the marker radius can scale
            // with payload; the legend groups items by booster name.
            for p in points.points() {
                let color = state
                    .booster_colors
                    .as_ref()
                    .map(|cm| cm.color_for(&p.booster_version))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let radius = 2.5 + 5.0 * ((p.payload_mass - min_mass) / mass_span) as f32;

                let marker = Points::new(vec![[p.payload_mass, f64::from(p.outcome.class())]])
                    .name(&p.booster_version)
                    .color(color)
                    .shape(MarkerShape::Circle)
                    .radius(radius);
                plot_ui.points(marker);
            }
        });
}
