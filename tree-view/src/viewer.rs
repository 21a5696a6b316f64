//! Interactive fractal tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Config`] and the
//! [`Skeleton`] generated from it, and implements [`eframe::App`] to
//! draw the skeleton with an orbiting orthographic camera and edit
//! every generation parameter through an egui side panel.

use eframe::App;
use glam::{Mat4, Vec3};
use rand::Rng;
use tree_core::{Config, Skeleton, generate};

/// Main application state for the interactive viewer.
///
/// The per-frame update is:
/// 1. Build the UI panels; any edited parameter marks the state dirty.
/// 2. If dirty, regenerate the skeleton (keeping the previous one and
///    showing the error message if the new config is invalid).
/// 3. Project every branch segment and joint to screen space and draw.
///
/// ### Fields
/// - `cfg` - Generation parameters, edited live in the side panel.
/// - `skeleton` - The last successfully generated skeleton.
/// - `error` - Validation error from the last failed regeneration.
///
/// - `yaw`/`pitch` - Orbit angles (radians); primary drag updates them.
/// - `zoom` - World-to-screen scale factor.
/// - `pan` - Screen-space offset in pixels; secondary drag updates it.
///
/// - `dirty` - Whether the skeleton must be regenerated this frame.
pub struct Viewer {
    cfg: Config,
    skeleton: Skeleton,
    error: Option<String>,

    yaw: f32,
    pitch: f32,
    zoom: f32,
    pan: egui::Vec2,

    dirty: bool,
}

impl Viewer {
    /// Creates a viewer with the default configuration, an initial
    /// skeleton generated from it, and a slightly tilted camera.
    pub fn new() -> Self {
        let cfg = Config::default();
        // The default configuration always validates.
        let skeleton = generate(&cfg).unwrap_or_default();

        Self {
            cfg,
            skeleton,
            error: None,
            yaw: 0.6,
            pitch: 0.35,
            zoom: 12.0,
            pan: egui::vec2(0.0, 0.0),
            dirty: false,
        }
    }

    /// Regenerates the skeleton from the current configuration.
    ///
    /// On a validation error the previous skeleton is kept and the
    /// error message is shown in the status bar instead.
    fn regenerate(&mut self) {
        match generate(&self.cfg) {
            Ok(skeleton) => {
                self.skeleton = skeleton;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.dirty = false;
    }

    /// The orbit rotation: maps the tree's +Z growth axis to screen-up
    /// (+Y), then applies the turntable yaw and the tilt pitch.
    fn view_rotation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch)
            * Mat4::from_rotation_y(self.yaw)
            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
    }

    /// Projects a world-space position to screen-space.
    ///
    /// Orthographic: the view-rotated x/y are scaled by `zoom`, offset
    /// by `pan`, and centered inside `rect`, with y flipped so that
    /// world-up is up on screen.
    fn world_to_screen(&self, p: Vec3, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let v = self.view_rotation().transform_point3(p);
        egui::pos2(
            center.x + v.x * self.zoom + self.pan.x,
            center.y - v.y * self.zoom + self.pan.y,
        )
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`], reporting
    /// whether the value was edited.
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(label);
            changed = ui
                .add(egui::DragValue::new(value).range(range).speed(speed))
                .changed();
        });
        changed
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(label);
            changed = ui
                .add(egui::DragValue::new(value).range(range).speed(1.0))
                .changed();
        });
        changed
    }

    /// Builds the top panel (regenerate, seed controls, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⟳ Regenerate").clicked() {
                    self.dirty = true;
                }

                if ui.button("🎲 Random seed").clicked() {
                    self.cfg.seed = Some(rand::rng().random());
                    self.dirty = true;
                }

                let mut seeded = self.cfg.seed.is_some();
                if ui.checkbox(&mut seeded, "seeded").changed() {
                    self.cfg.seed = if seeded { Some(0) } else { None };
                    self.dirty = true;
                }

                if let Some(seed) = self.cfg.seed.as_mut() {
                    self.dirty |= ui
                        .add(egui::DragValue::new(seed).prefix("seed = "))
                        .changed();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 1.0..=100.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (counts, camera, errors).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("branches = {}", self.skeleton.branches.len()));
                ui.label(format!("joints = {}", self.skeleton.joints.len()));
                ui.separator();
                ui.label(format!(
                    "yaw = {:.2} pitch = {:.2}",
                    self.yaw, self.pitch
                ));

                if let Some(err) = &self.error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    /// Builds the right-hand configuration panel for all generation
    /// parameters. Editing any of them triggers a regeneration.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Shape");
                self.dirty |=
                    Self::labeled_drag_f32(ui, "angle (deg):", &mut self.cfg.angle, 0.0..=90.0, 0.5);
                self.dirty |= Self::labeled_drag_f32(
                    ui,
                    "branch length:",
                    &mut self.cfg.initial_branch_length,
                    0.1..=50.0,
                    0.1,
                );
                self.dirty |= Self::labeled_drag_f32(
                    ui,
                    "branch divisor:",
                    &mut self.cfg.branch_divisor,
                    1.01..=4.0,
                    0.01,
                );
                self.dirty |=
                    Self::labeled_drag_f32(ui, "radius:", &mut self.cfg.radius, 0.01..=2.0, 0.01);
                self.dirty |=
                    Self::labeled_drag_usize(ui, "max depth:", &mut self.cfg.max_depth, 0..=8);

                ui.separator();
                ui.label("Joints");
                self.dirty |= ui
                    .checkbox(&mut self.cfg.soft_ends_enabled, "soft ends")
                    .changed();

                ui.separator();
                ui.label("Twist");
                self.dirty |= ui
                    .checkbox(&mut self.cfg.twist_enabled, "twist")
                    .changed();
                self.dirty |= Self::labeled_drag_f32(
                    ui,
                    "twist (deg):",
                    &mut self.cfg.twist_amount,
                    -180.0..=180.0,
                    1.0,
                );

                ui.separator();
                ui.label("Variation");
                self.dirty |= ui
                    .checkbox(&mut self.cfg.variation_enabled, "variation")
                    .changed();
                self.dirty |= Self::labeled_drag_f32(
                    ui,
                    "length spread:",
                    &mut self.cfg.length_variation,
                    0.0..=10.0,
                    0.1,
                );
                self.dirty |= Self::labeled_drag_f32(
                    ui,
                    "twist spread:",
                    &mut self.cfg.twist_variation,
                    0.0..=90.0,
                    0.5,
                );
                self.dirty |= Self::labeled_drag_f32(
                    ui,
                    "angle spread:",
                    &mut self.cfg.angle_variation,
                    0.0..=45.0,
                    0.5,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    self.dirty = true;
                }
            });
    }

    /// Builds the central panel where the skeleton is drawn and the
    /// camera is controlled.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Primary drag orbits, secondary drag pans.
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                self.yaw += delta.x * 0.01;
                self.pitch = (self.pitch + delta.y * 0.01).clamp(-1.5, 1.5);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.pan += response.drag_delta();
            }

            // Scroll to zoom.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(1.0, 100.0);
            }

            // Draw branches as lines between their projected endpoints,
            // with stroke width following the configured radius.
            let stroke_width = (self.cfg.radius * self.zoom).clamp(0.5, 8.0);
            for seg in &self.skeleton.branches {
                let a = self.world_to_screen(seg.start(), rect);
                let b = self.world_to_screen(seg.end(), rect);
                painter.line_segment(
                    [a, b],
                    egui::Stroke::new(stroke_width, egui::Color32::LIGHT_GREEN),
                );
            }

            // Draw joints.
            for joint in &self.skeleton.joints {
                let p = self.world_to_screen(joint.position, rect);
                let r = (joint.radius * self.zoom).max(1.5);
                painter.circle_filled(p, r, egui::Color32::LIGHT_BLUE);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame and
    /// regenerates the skeleton when parameters changed.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);

        if self.dirty {
            self.regenerate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn new_viewer_starts_with_a_generated_skeleton() {
        let viewer = Viewer::new();
        assert!(!viewer.skeleton.branches.is_empty());
        assert!(viewer.error.is_none());
    }

    #[test]
    fn world_origin_projects_to_panned_center() {
        let mut viewer = Viewer::new();
        viewer.pan = egui::vec2(10.0, -4.0);
        let rect = test_rect();

        // The origin is fixed under every orbit rotation, so it always
        // lands on the rect center plus the pan offset.
        let p = viewer.world_to_screen(Vec3::ZERO, rect);
        let center = rect.center();
        assert!((p.x - (center.x + 10.0)).abs() < 1e-4);
        assert!((p.y - (center.y - 4.0)).abs() < 1e-4);
    }

    #[test]
    fn growth_axis_maps_to_screen_up_at_rest() {
        let mut viewer = Viewer::new();
        viewer.yaw = 0.0;
        viewer.pitch = 0.0;
        viewer.pan = egui::vec2(0.0, 0.0);
        viewer.zoom = 10.0;
        let rect = test_rect();

        let base = viewer.world_to_screen(Vec3::ZERO, rect);
        let tip = viewer.world_to_screen(Vec3::new(0.0, 0.0, 1.0), rect);

        // Same horizontal position, tip above base (screen y grows down).
        assert!((tip.x - base.x).abs() < 1e-3);
        assert!(tip.y < base.y);
        assert!((base.y - tip.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn regenerate_follows_config_changes() {
        let mut viewer = Viewer::new();
        viewer.cfg.max_depth = 0;
        viewer.regenerate();
        assert_eq!(viewer.skeleton.branches.len(), 1);

        viewer.cfg.max_depth = 1;
        viewer.regenerate();
        assert_eq!(viewer.skeleton.branches.len(), 5);
        assert!(viewer.error.is_none());
    }

    #[test]
    fn invalid_config_keeps_the_previous_skeleton() {
        let mut viewer = Viewer::new();
        let before = viewer.skeleton.branches.len();

        viewer.cfg.branch_divisor = 0.5;
        viewer.regenerate();

        assert_eq!(viewer.skeleton.branches.len(), before);
        assert!(viewer.error.is_some());
    }
}
