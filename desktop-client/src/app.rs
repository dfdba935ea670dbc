use eframe::egui;
use tokio::sync::mpsc;

use engine::game::{GameSnapshot, Phase, overlay_screen, speed_label};
use engine::{Command, Direction, SessionCommand};

use crate::state::SharedState;

pub const CELL_SIZE: f32 = 20.0;

pub struct SnakeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    speed_ms: u32,
}

impl SnakeApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<SessionCommand>,
        initial_speed_ms: u32,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            speed_ms: initial_speed_ms,
        }
    }

    fn send(&self, command: SessionCommand) {
        let _ = self.command_tx.send(command);
    }

    fn handle_keys(&mut self, ctx: &egui::Context, phase: Phase) {
        ctx.input(|i| {
            let mut requested = None;
            if i.key_pressed(egui::Key::ArrowUp) {
                requested = Some(Direction::Up);
            } else if i.key_pressed(egui::Key::ArrowDown) {
                requested = Some(Direction::Down);
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                requested = Some(Direction::Left);
            } else if i.key_pressed(egui::Key::ArrowRight) {
                requested = Some(Direction::Right);
            }

            // Forward every press: the engine's pending buffer overwrites,
            // so repeats are free, and filtering here would drop a repeated
            // key that becomes a real turn after a restart.
            if let Some(direction) = requested {
                self.send(SessionCommand::Turn(direction));
            }

            if i.key_pressed(egui::Key::Escape) {
                match phase {
                    Phase::Playing => self.send(SessionCommand::Game(Command::Pause)),
                    Phase::Paused => self.send(SessionCommand::Game(Command::Resume)),
                    _ => {}
                }
            }
        });
    }

    fn render_board(&self, painter: &egui::Painter, canvas: egui::Rect, snapshot: &GameSnapshot) {
        let cell = |p: engine::Point| {
            egui::Rect::from_min_size(
                canvas.min + egui::vec2(p.x as f32 * CELL_SIZE, p.y as f32 * CELL_SIZE),
                egui::vec2(CELL_SIZE, CELL_SIZE),
            )
        };

        painter.rect_filled(cell(snapshot.food), 0.0, egui::Color32::RED);
        for segment in &snapshot.snake {
            painter.rect_filled(cell(*segment), 0.0, egui::Color32::from_rgb(0x22, 0xAA, 0x22));
        }
    }

    fn render_overlay(
        &self,
        painter: &egui::Painter,
        response: &egui::Response,
        canvas: egui::Rect,
        snapshot: &GameSnapshot,
    ) {
        let Some(screen) = overlay_screen(snapshot.phase, canvas.width()) else {
            return;
        };

        // Start gets a clean backdrop; pause and game over dim the last frame.
        if snapshot.phase == Phase::Start {
            painter.rect_filled(canvas, 0.0, egui::Color32::from_rgb(0x10, 0x10, 0x10));
        } else {
            painter.rect_filled(canvas, 0.0, egui::Color32::from_black_alpha(178));
        }

        let center_x = canvas.center().x;
        let mid_y = canvas.min.y + canvas.height() / 2.0;

        painter.text(
            egui::pos2(center_x, mid_y - 80.0),
            egui::Align2::CENTER_CENTER,
            screen.title,
            egui::FontId::proportional(32.0),
            egui::Color32::WHITE,
        );

        let mut info_lines: Vec<(String, egui::Color32)> = Vec::new();
        match snapshot.phase {
            Phase::Start => {
                info_lines.push((
                    format!("High Score: {}", snapshot.high_score),
                    egui::Color32::WHITE,
                ));
            }
            Phase::GameOver => {
                info_lines.push((format!("Final Score: {}", snapshot.score), egui::Color32::WHITE));
                info_lines.push((
                    format!("High Score: {}", snapshot.high_score),
                    egui::Color32::WHITE,
                ));
                if snapshot.score == snapshot.high_score && snapshot.score > 0 {
                    info_lines.push(("New High Score!".to_string(), egui::Color32::GOLD));
                }
            }
            _ => {}
        }

        for (offset, (line, color)) in info_lines.iter().enumerate() {
            painter.text(
                egui::pos2(center_x, mid_y - 50.0 + offset as f32 * 25.0),
                egui::Align2::CENTER_CENTER,
                line,
                egui::FontId::proportional(18.0),
                *color,
            );
        }

        for button in &screen.buttons {
            let rect = egui::Rect::from_min_size(
                canvas.min + egui::vec2(button.rect.x, button.rect.y),
                egui::vec2(button.rect.width, button.rect.height),
            );
            painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(0x22, 0x88, 0x22));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                button.label,
                egui::FontId::proportional(18.0),
                egui::Color32::WHITE,
            );
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let local = pos - canvas.min;
            for button in &screen.buttons {
                if button.rect.contains(local.x, local.y) {
                    self.send(SessionCommand::Game(button.command));
                    break;
                }
            }
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.shared_state.get_snapshot();

        if let Some(snapshot) = &snapshot {
            self.handle_keys(ctx, snapshot.phase);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(snapshot) = snapshot else {
                ui.heading("Starting session...");
                ui.spinner();
                return;
            };

            ui.horizontal(|ui| {
                ui.label(format!("Score: {}", snapshot.score));
                ui.separator();
                ui.label(format!("High Score: {}", snapshot.high_score));
            });

            ui.horizontal(|ui| {
                ui.label("Speed:");
                if ui
                    .add(egui::Slider::new(&mut self.speed_ms, 50..=300).suffix(" ms"))
                    .changed()
                {
                    self.send(SessionCommand::SetSpeed(self.speed_ms));
                }
                ui.label(speed_label(self.speed_ms));
            });
            ui.separator();

            let side = snapshot.grid_size as f32 * CELL_SIZE;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(side, side), egui::Sense::click());
            let canvas = response.rect;

            painter.rect_filled(canvas, 0.0, egui::Color32::from_rgb(0x10, 0x10, 0x10));
            if snapshot.phase != Phase::Start {
                self.render_board(&painter, canvas, &snapshot);
            }
            self.render_overlay(&painter, &response, canvas, &snapshot);
        });

        ctx.request_repaint();
    }
}

impl Drop for SnakeApp {
    fn drop(&mut self) {
        let _ = self.command_tx.send(SessionCommand::Shutdown);
    }
}
