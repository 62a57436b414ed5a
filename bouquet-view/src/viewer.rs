//! Interactive bouquet studio built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the whole session state
//! (selection, generated compositions, circle world, scheduler,
//! gallery) and implements [`eframe::App`] to render and control it.
//! No other component reads or writes state it does not own: the core
//! library is driven purely through the viewer's methods.

use bouquet_core::catalog::{Item, Tier};
use bouquet_core::compose::{self, Composition};
use bouquet_core::gallery::Gallery;
use bouquet_core::physics::{SimConfig, World};
use bouquet_core::placement::STYLE_PRESETS;
use bouquet_core::raster;
use bouquet_core::scheduler::Scheduler;
use bouquet_core::selection::Selection;
use bouquet_core::types::{SnapshotId, TimestampMs};
use eframe::App;
use glam::Vec2;
use log::warn;

/// Logical pixel size of the circle world; the canvas panel maps it
/// onto whatever screen rectangle is available.
const WORLD_BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

/// Background used both on screen and in exported images.
const CANVAS_BG: [u8; 3] = [24, 22, 30];

/// The item catalog offered by the picker. The core never sees this
/// list as a whole, only the entries the user selects.
const CATALOG: [Item; 8] = [
    Item {
        id: "rose",
        name: "Rose",
        price: 150,
        tier: Tier::Focal,
        colors: &[[255, 107, 157], [255, 23, 68], [255, 193, 227]],
    },
    Item {
        id: "tulip",
        name: "Tulip",
        price: 120,
        tier: Tier::Secondary,
        colors: &[[255, 107, 157], [255, 215, 0], [147, 112, 219]],
    },
    Item {
        id: "sunflower",
        name: "Sunflower",
        price: 100,
        tier: Tier::Secondary,
        colors: &[[255, 215, 0], [255, 165, 0]],
    },
    Item {
        id: "daisy",
        name: "Daisy",
        price: 80,
        tier: Tier::Filler,
        colors: &[[255, 255, 255], [255, 215, 0]],
    },
    Item {
        id: "lily",
        name: "Lily",
        price: 180,
        tier: Tier::Focal,
        colors: &[[255, 105, 180], [255, 255, 255], [255, 23, 68]],
    },
    Item {
        id: "orchid",
        name: "Orchid",
        price: 250,
        tier: Tier::Focal,
        colors: &[[221, 160, 221], [255, 255, 255], [255, 105, 180]],
    },
    Item {
        id: "lavender",
        name: "Lavender",
        price: 90,
        tier: Tier::Filler,
        colors: &[[147, 112, 219], [138, 132, 226]],
    },
    Item {
        id: "peony",
        name: "Peony",
        price: 200,
        tier: Tier::Focal,
        colors: &[[255, 182, 193], [255, 105, 180], [255, 255, 255]],
    },
];

/// Unix epoch milliseconds; the wall-clock source for composition ids,
/// snapshot timestamps and export file names.
fn now_ms() -> TimestampMs {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as TimestampMs)
        .unwrap_or(0)
}

/// Main application state.
///
/// The per-frame update is:
/// 1. Handle UI interactions (picker, generation, sim controls).
/// 2. If the world is running and the scheduler grants a step,
///    advance the simulation, then render — strictly in that order.
/// 3. Request a repaint while running so the chain continues.
pub struct Viewer {
    selection: Selection,
    compositions: Vec<Composition>,
    /// Index of the active composition in `compositions`.
    active: usize,

    world: World,
    scheduler: Scheduler,
    gallery: Gallery,
    sim_cfg: SimConfig,

    rng: rand::rngs::ThreadRng,
}

impl Viewer {
    /// Creates a viewer with an empty selection and a freshly spawned
    /// circle world, paused.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let mut world = World::new(WORLD_BOUNDS);
        let sim_cfg = SimConfig::default();
        world.spawn(sim_cfg, &mut rng);

        Self {
            selection: Selection::new(),
            compositions: Vec::new(),
            active: 0,
            world,
            scheduler: Scheduler::new(1.0 / 60.0),
            gallery: Gallery::new(),
            sim_cfg,
            rng,
        }
    }

    /// Generates one composition per style preset from the current
    /// selection and activates the first. An empty selection is a
    /// no-op: previously generated compositions stay untouched.
    fn generate(&mut self, timestamp_ms: TimestampMs) {
        if self.selection.is_empty() {
            return;
        }
        self.compositions =
            compose::generate_compositions(&self.selection, &STYLE_PRESETS, timestamp_ms, &mut self.rng);
        self.active = 0;
    }

    /// Starts or pauses the animation. Starting arms the scheduler at
    /// `now`; pausing disarms it synchronously so no further step can
    /// fire.
    fn toggle_running(&mut self, now: f64) {
        if self.world.is_running() {
            self.world.set_running(false);
            self.scheduler.stop();
        } else {
            self.world.set_running(true);
            self.scheduler.start(now);
        }
    }

    /// Replaces the circle population from the current config. The
    /// run state is left as is.
    fn respawn(&mut self) {
        self.world.spawn(self.sim_cfg, &mut self.rng);
    }

    fn save_snapshot(&mut self, timestamp_ms: TimestampMs) -> SnapshotId {
        self.gallery.save(&self.world, timestamp_ms)
    }

    /// Loads a snapshot back into the world. The core forces the
    /// world idle; the scheduler is disarmed to match.
    fn load_snapshot(&mut self, id: SnapshotId) {
        if self.gallery.load(id, &mut self.world) {
            self.scheduler.stop();
        }
    }

    /// Writes the current canvas content to a timestamped PNG next to
    /// the executable. Failures are logged, never fatal.
    fn export(&mut self, timestamp_ms: TimestampMs) {
        let path = std::path::PathBuf::from(raster::export_filename(timestamp_ms));
        if let Err(e) = raster::export_png(
            &self.world.circles,
            self.world.bounds.x as u32,
            self.world.bounds.y as u32,
            CANVAS_BG,
            &path,
        ) {
            warn!("export failed: {e}");
        }
    }

    fn entity_color(item: &Item, variant: Option<usize>) -> egui::Color32 {
        let rgb = variant
            .and_then(|v| item.colors.get(v))
            .or_else(|| item.colors.first())
            .copied()
            .unwrap_or([255, 255, 255]);
        egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Maps a world-space position into the canvas rectangle with a
    /// uniform scale.
    fn world_to_canvas(&self, p: Vec2, rect: egui::Rect) -> (egui::Pos2, f32) {
        let scale = (rect.width() / self.world.bounds.x).min(rect.height() / self.world.bounds.y);
        (
            egui::pos2(rect.left() + p.x * scale, rect.top() + p.y * scale),
            scale,
        )
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (run controls, stepping, export).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.world.is_running() {
                        "⏸ Pause"
                    } else {
                        "▶ Run"
                    })
                    .clicked()
                {
                    let now = ctx.input(|i| i.time);
                    self.toggle_running(now);
                }

                let mut interval = self.scheduler.interval();
                ui.add(
                    egui::DragValue::new(&mut interval)
                        .prefix("dt target = ")
                        .range(0.001..=1.0)
                        .speed(0.001),
                );
                self.scheduler.set_interval(interval);

                if ui.button("Step").clicked() {
                    self.world.step();
                }

                if ui.button("Respawn").clicked() {
                    self.respawn();
                }

                ui.separator();

                if ui.button("💾 Save to gallery").clicked() {
                    self.save_snapshot(now_ms());
                }

                if ui.button("🖼 Export PNG").clicked() {
                    self.export(now_ms());
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("circles = {}", self.world.circles.len()));
                ui.label(format!("snapshots = {}", self.gallery.len()));
                ui.separator();
                ui.label(format!(
                    "selection: {} items, {} ₽",
                    self.selection.total_count(),
                    self.selection.total_price()
                ));
            });
        });
    }

    /// Builds the left panel: item picker, selection and composition
    /// previews.
    fn ui_bouquet_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("bouquet_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Catalog");
                for item in &CATALOG {
                    if ui
                        .button(format!("{}  ·  {} ₽", item.name, item.price))
                        .clicked()
                    {
                        self.selection.add(*item);
                    }
                }

                ui.separator();
                ui.heading("Your pick");

                // Collect count changes first; the entry list cannot
                // be mutated while it is being drawn.
                let entries = self.selection.entries().to_vec();
                let mut deltas: Vec<(&'static str, i32)> = Vec::new();
                for entry in &entries {
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "{} × {} = {} ₽",
                            entry.item.name,
                            entry.count,
                            entry.item.price * entry.count
                        ));
                        if ui.small_button("−").clicked() {
                            deltas.push((entry.item.id, -1));
                        }
                        if ui.small_button("+").clicked() {
                            deltas.push((entry.item.id, 1));
                        }
                    });
                }
                for (id, delta) in deltas {
                    self.selection.adjust(id, delta);
                }

                ui.separator();
                if ui.button("✨ Generate bouquets").clicked() {
                    self.generate(now_ms());
                }

                if !self.compositions.is_empty() {
                    ui.separator();
                    ui.heading("Compositions");
                    for idx in 0..self.compositions.len() {
                        let comp = &self.compositions[idx];
                        let label = format!("{}  ·  {} ₽", comp.style.name, comp.price);
                        if ui.selectable_label(self.active == idx, label).clicked() {
                            self.active = idx;
                        }
                    }

                    ui.add_space(8.0);
                    self.ui_composition_preview(ui);
                }
            });
    }

    /// Draws the active composition into a square canvas: entities in
    /// paint order as tinted circles with a rotation marker.
    fn ui_composition_preview(&self, ui: &mut egui::Ui) {
        let side = ui.available_width().min(260.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
        if rect.width() < 1.0 {
            // Surface not sized yet: silent skip.
            return;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(
            rect,
            4.0,
            egui::Color32::from_rgb(CANVAS_BG[0], CANVAS_BG[1], CANVAS_BG[2]),
        );

        let Some(comp) = self.compositions.get(self.active) else {
            return;
        };

        let base_radius = rect.width() * 0.045;
        for e in &comp.entities {
            // Percent coordinates; may fall slightly outside the square.
            let pos = egui::pos2(
                rect.left() + e.pos.x / 100.0 * rect.width(),
                rect.top() + e.pos.y / 100.0 * rect.height(),
            );
            let radius = base_radius * e.scale;
            painter.circle_filled(pos, radius, Self::entity_color(&e.item, e.variant));

            let dir = egui::Vec2::angled(e.rotation.to_radians()) * radius;
            painter.line_segment(
                [pos, pos + dir],
                egui::Stroke::new(1.0, egui::Color32::WHITE.gamma_multiply(0.5)),
            );
        }
    }

    /// Builds the right-hand panel: sim config and the gallery.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Simulation");

                Self::labeled_drag_usize(ui, "circles:", &mut self.sim_cfg.circle_count, 5..=100, 1.0);
                Self::labeled_drag_f32(ui, "size:", &mut self.sim_cfg.circle_size, 10.0..=50.0, 0.5);
                Self::labeled_drag_usize(
                    ui,
                    "palette:",
                    &mut self.sim_cfg.palette,
                    0..=bouquet_core::physics::PALETTES.len() - 1,
                    1.0,
                );

                if ui.button("Respawn").clicked() {
                    self.respawn();
                }

                ui.separator();
                ui.heading("Gallery");
                if self.gallery.is_empty() {
                    ui.label("No snapshots yet.");
                }

                let mut load_requested = None;
                for snapshot in self.gallery.snapshots() {
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "#{}  ·  {} circles",
                            snapshot.id,
                            snapshot.circles.len()
                        ));
                        if ui.small_button("Load").clicked() {
                            load_requested = Some(snapshot.id);
                        }
                    });
                }
                if let Some(id) = load_requested {
                    self.load_snapshot(id);
                }
            });
    }

    /// Builds the central canvas: full repaint of the circle world,
    /// then the simulate-then-render chain while running.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            if rect.width() < 1.0 || rect.height() < 1.0 {
                // Canvas not attached/sized yet: silent skip.
                return;
            }

            // Simulate before rendering so no frame observes a
            // partially updated tick.
            let now = ctx.input(|i| i.time);
            if self.world.is_running() && self.scheduler.due(now) {
                self.world.step();
            }

            let painter = ui.painter_at(rect);
            painter.rect_filled(
                rect,
                0.0,
                egui::Color32::from_rgb(CANVAS_BG[0], CANVAS_BG[1], CANVAS_BG[2]),
            );

            for c in &self.world.circles {
                let (pos, scale) = self.world_to_canvas(c.pos, rect);
                painter.circle_filled(
                    pos,
                    c.radius * scale,
                    egui::Color32::from_rgb(c.color[0], c.color[1], c.color[2]),
                );
            }

            if self.world.is_running() {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_bouquet_panel(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_with_empty_selection_keeps_prior_compositions() {
        let mut viewer = Viewer::new();
        viewer.selection.add(CATALOG[0]);
        viewer.generate(100);
        assert_eq!(viewer.compositions.len(), 4);
        let prior_ids: Vec<_> = viewer.compositions.iter().map(|c| c.id.clone()).collect();

        // Empty the selection and try again: nothing changes.
        viewer.selection.adjust(CATALOG[0].id, -1);
        viewer.generate(200);

        let ids: Vec<_> = viewer.compositions.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, prior_ids);
    }

    #[test]
    fn generate_activates_the_first_composition() {
        let mut viewer = Viewer::new();
        viewer.selection.add(CATALOG[0]);
        viewer.active = 3;

        viewer.generate(100);

        assert_eq!(viewer.active, 0);
        assert_eq!(viewer.compositions[0].style, STYLE_PRESETS[0]);
    }

    #[test]
    fn toggle_running_arms_and_disarms_both_world_and_scheduler() {
        let mut viewer = Viewer::new();
        assert!(!viewer.world.is_running());

        viewer.toggle_running(1.0);
        assert!(viewer.world.is_running());
        assert!(viewer.scheduler.enabled());

        viewer.toggle_running(2.0);
        assert!(!viewer.world.is_running());
        assert!(!viewer.scheduler.enabled());
        // No step can be granted after the pause.
        assert!(!viewer.scheduler.due(100.0));
    }

    #[test]
    fn loading_a_snapshot_pauses_everything() {
        let mut viewer = Viewer::new();
        let id = viewer.save_snapshot(1);

        viewer.toggle_running(0.0);
        assert!(viewer.world.is_running());

        viewer.load_snapshot(id);

        assert!(!viewer.world.is_running());
        assert!(!viewer.scheduler.enabled());
    }

    #[test]
    fn world_to_canvas_maps_bounds_onto_the_rect() {
        let viewer = Viewer::new();
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(400.0, 300.0));

        let (origin, scale) = viewer.world_to_canvas(Vec2::ZERO, rect);
        assert_eq!(origin, egui::pos2(10.0, 20.0));

        // 400/800 and 300/600 both give 0.5.
        assert_eq!(scale, 0.5);

        let (corner, _) = viewer.world_to_canvas(WORLD_BOUNDS, rect);
        assert_eq!(corner, egui::pos2(410.0, 320.0));
    }

    #[test]
    fn catalog_items_all_have_variants_and_prices() {
        for item in &CATALOG {
            assert!(!item.colors.is_empty());
            assert!(item.price > 0);
        }
    }
}
