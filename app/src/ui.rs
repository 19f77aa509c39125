use crate::app::{KnnPlaygroundApp, StatusKind};

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Shape, Stroke, Ui};
use knnlab::{SessionError, SessionState};

/// Stroke/fill used for the unclassified query point and the neighbor lines.
const INK: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// Seconds the neighbor lines take to fade in, matching the classic demo.
const LINE_FADE_SECONDS: f32 = 0.8;

/// Draws the entire left-side panel with all the controls.
pub fn draw_side_panel(app: &mut KnnPlaygroundApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel").show(ctx, |ui| {
        ui.heading("KNN Playground");
        ui.separator();

        draw_parameter_controls(app, ui);
        ui.separator();

        draw_action_buttons(app, ui);
        ui.separator();

        draw_status(app, ui);
    });
}

fn draw_parameter_controls(app: &mut KnnPlaygroundApp, ui: &mut Ui) {
    ui.heading("Parameters");

    let k_changed = ui
        .add(egui::Slider::new(&mut app.k, 1..=15).text("k (neighbors)"))
        .changed();
    if k_changed {
        let had_ranking = matches!(
            app.session.state(),
            SessionState::Ranked | SessionState::Classified
        );
        if app.session.change_k(app.k).is_ok() && had_ranking {
            app.set_status(
                StatusKind::Info,
                "K value changed. Find the nearest neighbors again to update",
            );
        }
    }

    let mixing_changed = ui
        .add(
            egui::Slider::new(&mut app.mixing_level, 0.0..=1.0)
                .text("mixing level")
                .fixed_decimals(2),
        )
        .changed();
    if mixing_changed && app.session.set_mixing_level(app.mixing_level).is_ok() {
        app.set_status(
            StatusKind::Info,
            "Mixing level changed. Regenerate the data to see the effect",
        );
    }
}

fn draw_action_buttons(app: &mut KnnPlaygroundApp, ui: &mut Ui) {
    let state = app.session.state();

    let find = ui.add_enabled(
        state == SessionState::Placed,
        egui::Button::new("Find K-Nearest Neighbors"),
    );
    if find.clicked() {
        match app.session.find_k_nearest(app.k) {
            Ok(neighbors) => {
                let found = neighbors.len();
                app.set_status(
                    StatusKind::Success,
                    format!("Found {found} nearest neighbors. Classify the point to see the prediction"),
                );
            }
            Err(e) => app.set_status(StatusKind::Error, e.to_string()),
        }
    }

    let classify = ui.add_enabled(
        state == SessionState::Ranked,
        egui::Button::new("Classify Point"),
    );
    if classify.clicked() {
        match app.session.classify() {
            Ok(outcome) => {
                let name = KnnPlaygroundApp::class_name(outcome.label);
                app.set_status(
                    StatusKind::Success,
                    format!(
                        "Classified as Class {} with {}/{} votes ({:.0}% confidence)",
                        name,
                        outcome.votes,
                        outcome.total,
                        outcome.confidence() * 100.0
                    ),
                );
            }
            Err(e) => app.set_status(StatusKind::Error, e.to_string()),
        }
    }

    if ui.button("Reset").clicked() {
        app.session.reset();
        app.set_status(
            StatusKind::Info,
            "Reset complete. Click anywhere on the plot to add a new point",
        );
    }

    if ui.button("Regenerate Data").clicked() {
        match app.session.regenerate(app.mixing_level) {
            Ok(_) => {
                let mixing = mixing_text(app.mixing_level);
                app.set_status(
                    StatusKind::Success,
                    format!("New dataset generated with {mixing}. Click to add a point!"),
                );
            }
            Err(e) => app.set_status(StatusKind::Error, e.to_string()),
        }
    }
}

fn draw_status(app: &KnnPlaygroundApp, ui: &mut Ui) {
    let color = match app.status.kind {
        StatusKind::Info => ui.visuals().text_color(),
        StatusKind::Success => Color32::from_rgb(0x2e, 0x7d, 0x32),
        StatusKind::Error => Color32::from_rgb(0xc6, 0x28, 0x28),
    };
    ui.colored_label(color, &app.status.text);
}

/// Draws the central panel containing the main visualization plot.
pub fn draw_central_panel(app: &mut KnnPlaygroundApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Allocate painter and handle coordinate transformations.
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let bounds = app.session.bounds();
        let data_rect = Rect::from_min_max(
            Pos2::new(bounds.min_x as f32, bounds.min_y as f32),
            Pos2::new(bounds.max_x as f32, bounds.max_y as f32),
        );
        let to_screen = egui::emath::RectTransform::from_to(data_rect, response.rect);
        let to_data = to_screen.inverse();

        // --- Drawing Layers ---

        // Neighbor lines go underneath the points, fading in like the lines
        // of the classic demo. State is already final; only the opacity lags.
        let query_pos = app
            .session
            .query_point()
            .map(|q| to_screen * Pos2::new(q.x() as f32, q.y() as f32));
        let fade_target = if app.session.neighbors().is_empty() {
            0.0
        } else {
            0.8
        };
        let fade = ctx.animate_value_with_time(
            egui::Id::new("neighbor-line-fade"),
            fade_target,
            LINE_FADE_SECONDS,
        );
        if let Some(query_pos) = query_pos {
            if fade > 0.0 {
                let stroke = Stroke::new(2.0, INK.gamma_multiply(fade));
                for (point, _distance) in app.session.neighbor_points() {
                    let neighbor_pos = to_screen * Pos2::new(point.x() as f32, point.y() as f32);
                    painter.extend(Shape::dashed_line(
                        &[query_pos, neighbor_pos],
                        stroke,
                        5.0,
                        5.0,
                    ));
                }
            }
        }

        for point in app.session.dataset() {
            let center = to_screen * Pos2::new(point.x() as f32, point.y() as f32);
            painter.circle_filled(center, 6.0, KnnPlaygroundApp::class_color(point.label));
            painter.circle_stroke(center, 6.0, Stroke::new(1.5, INK));
        }

        if let (Some(query), Some(query_pos)) = (app.session.query_point(), query_pos) {
            let fill = query
                .predicted
                .map(KnnPlaygroundApp::class_color)
                .unwrap_or(INK);
            painter.circle_filled(query_pos, 8.0, fill);
            painter.circle_stroke(query_pos, 8.0, Stroke::new(2.0, Color32::BLACK));
        }

        // --- Interaction Handling ---
        if response.clicked() {
            if let Some(click_pos) = response.interact_pointer_pos() {
                let data_pos = to_data * click_pos;
                handle_plot_click(app, data_pos);
            }
        }
    });
}

fn handle_plot_click(app: &mut KnnPlaygroundApp, pos: Pos2) {
    match app.session.place_query_point(pos.x as f64, pos.y as f64) {
        Ok(_) => app.set_status(
            StatusKind::Success,
            "New point added! Find the k-nearest neighbors to continue",
        ),
        Err(SessionError::Guard { .. }) => {
            app.set_status(StatusKind::Info, "Please reset before adding a new point");
        }
        // A click that lands outside the plot bounds is simply ignored.
        Err(SessionError::InvalidParameter { .. }) => {}
        Err(e) => app.set_status(StatusKind::Error, e.to_string()),
    }
}

fn mixing_text(level: f64) -> &'static str {
    if level == 0.0 {
        "distinct clusters"
    } else if level <= 0.2 {
        "low mixing"
    } else if level <= 0.35 {
        "medium mixing"
    } else if level <= 0.5 {
        "high mixing"
    } else {
        "very high mixing"
    }
}
