// ui.rs - Controller window: device buttons, board mirror, log panel

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use launchpad_life::Color;
use launchpad_life::grid::{self, COLS, ROWS};
use std::time::Duration;
use crate::LaunchpadApp;

fn pad_color(color: Color) -> Color32 {
    if color == Color::OFF {
        return Color32::from_gray(40);
    }
    Color32::from_rgb(color.red() * 85, color.green() * 85, 0)
}

impl eframe::App for LaunchpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Launchpad Mini");

            // Device controls
            ui.horizontal(|ui| {
                if ui.add_enabled(!self.is_discovering(), egui::Button::new("Start")).clicked() {
                    self.on_start();
                }
                if ui.button("Reset").clicked() {
                    self.link.reset();
                }
                if ui.button("Check").clicked() {
                    self.link.check();
                }
                if ui.button("Clear").clicked() {
                    self.link.clear();
                }

                ui.separator();

                ui.label(format!(
                    "in: {}  out: {}",
                    if self.link.has_input() { "yes" } else { "no" },
                    if self.link.has_output() { "yes" } else { "no" },
                ));
            });

            // Game of Life controls
            ui.horizontal(|ui| {
                if ui.button("▶ Play").clicked() {
                    self.player.play();
                }
                if ui.button("⏹ Stop").clicked() {
                    self.player.stop();
                }

                ui.separator();

                let engine = self.player.engine().lock();
                ui.label(format!("Generation: {}", engine.generation()));
                ui.label(format!("Alive: {}", engine.population()));
            });

            ui.separator();

            // Board mirror
            let box_size = 48.0;
            let spacing = 4.0;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * COLS as f32 - spacing,
                (box_size + spacing) * ROWS as f32 - spacing,
            );
            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            {
                let engine = self.player.engine().lock();
                for (index, &state) in engine.cells().iter().enumerate() {
                    let (row, col) = grid::position(index);
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    painter.rect_filled(rect, 4.0, pad_color(engine.palette().color(state)));
                    painter.rect_stroke(rect, 4.0, Stroke::new(0.5, Color32::from_gray(60)));
                }
            }

            ui.separator();

            // Log panel
            ui.horizontal(|ui| {
                ui.label("Log");
                if ui.button("Flush").clicked() {
                    self.log.flush();
                }
            });
            let text = self.log.text();
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut text.as_str())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });
        });

        // Ticks and inbound messages arrive off the UI thread
        let interval = if self.player.is_running() {
            self.player.period().min(Duration::from_millis(100))
        } else {
            Duration::from_millis(100)
        };
        ctx.request_repaint_after(interval);
    }
}
