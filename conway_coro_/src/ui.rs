// ui.rs - egui front end
// Reads generations through a GridView and sends every edit to the worker.

use crate::worker::{Command, WorkerStatus};
use conway::{BuiltinPattern, Cell, GridView, Seed};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::warn;

pub struct LifeApp {
    view: GridView,
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<WorkerStatus>,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
}

impl LifeApp {
    pub fn new(
        view: GridView,
        commands: mpsc::UnboundedSender<Command>,
        status: watch::Receiver<WorkerStatus>,
    ) -> Self {
        Self {
            view,
            commands,
            status,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
        }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!(?command, "worker has stopped, command dropped");
        }
    }
}

/// Maps a pointer position inside the board to a `(row, col)` cell.
fn cell_at(pos: egui::Pos2, origin: egui::Pos2, pitch: f32, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let (row, col) = ((offset.y / pitch) as usize, (offset.x / pitch) as usize);
    (row < rows && col < cols).then_some((row, col))
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let status = *self.status.borrow();
        let snapshot = self.view.snapshot();
        let grid = snapshot.grid;
        let (rows, cols) = grid.dimensions();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if status.running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.send(if status.running { Command::Pause } else { Command::Start });
                }

                if ui.button("⏭ Step").clicked() {
                    self.send(Command::Step);
                }

                if ui.button("⏹ Clear").clicked() {
                    self.send(Command::Clear);
                }

                if ui.button("🎲 Random").clicked() {
                    self.send(Command::Seed(Seed::Random));
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(BuiltinPattern::ALL[self.selected_pattern].name())
                    .show_ui(ui, |ui| {
                        for (i, pattern) in BuiltinPattern::ALL.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name());
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    let pattern = BuiltinPattern::ALL[self.selected_pattern];
                    self.send(Command::Seed(Seed::NamedCentered(pattern)));
                }

                ui.separator();

                ui.label(format!("Generation: {}", snapshot.generation));
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / status.interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.send(Command::SetInterval(Duration::from_millis((1000.0 / speed) as u64)));
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();
            ui.label("Click cells to toggle them alive/dead. Use Start/Pause to run the simulation.");
            if status.last_tick.is_some_and(|t| t.cycle_detected) && !status.running {
                ui.label("Pattern has settled into a cycle.");
            }
            ui.separator();

            // Draw the grid, shrinking cells to fit the panel width
            let spacing = 0.5;
            let box_size = if cols == 0 {
                15.0
            } else {
                (ui.available_width() / cols as f32 - spacing).clamp(2.0, 15.0)
            };
            let pitch = box_size + spacing;
            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * cols as f32, pitch * rows as f32);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for row in 0..rows {
                let Some(cells) = grid.row(row) else { continue };
                for (col, &cell) in cells.iter().enumerate() {
                    let x = start_pos.x + col as f32 * pitch;
                    let y = start_pos.y + row as f32 * pitch;
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = match cell {
                        Cell::Alive => self.live_color,
                        Cell::Dead => self.dead_color,
                    };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            // Handle clicking (only when not running)
            if !status.running && response.clicked() {
                if let Some((row, col)) = response
                    .interact_pointer_pos()
                    .and_then(|pos| cell_at(pos, start_pos, pitch, rows, cols))
                {
                    self.send(Command::Toggle { row, col });
                }
            }

            ui.separator();

            let live_cells = grid.population();
            let total = (rows * cols).max(1);
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", rows * cols - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        // Keep polling for fresh generations while the worker runs
        if status.running {
            ctx.request_repaint_after(status.interval);
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_to_cells() {
        let origin = egui::pos2(10.0, 20.0);
        assert_eq!(cell_at(egui::pos2(10.5, 20.5), origin, 5.0, 4, 6), Some((0, 0)));
        assert_eq!(cell_at(egui::pos2(26.0, 31.0), origin, 5.0, 4, 6), Some((2, 3)));
        assert_eq!(cell_at(egui::pos2(9.0, 25.0), origin, 5.0, 4, 6), None);
        assert_eq!(cell_at(egui::pos2(45.0, 25.0), origin, 5.0, 4, 6), None);
    }
}
