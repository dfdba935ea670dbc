use super::types::{Command, Phase};

/// Axis-aligned region in canvas pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayRect {
    fn centered_button(canvas: f32, y: f32) -> Self {
        Self {
            x: canvas / 2.0 - 60.0,
            y,
            width: 120.0,
            height: 40.0,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Clickable region on an overlay screen and the command a hit produces.
#[derive(Clone, Copy, Debug)]
pub struct OverlayButton {
    pub rect: OverlayRect,
    pub label: &'static str,
    pub command: Command,
}

/// Declarative description of a phase overlay. The adapter draws it however
/// it likes; hit-testing the buttons is all the input wiring it needs.
#[derive(Clone, Debug)]
pub struct OverlayScreen {
    pub title: &'static str,
    pub buttons: Vec<OverlayButton>,
}

/// Overlay for a phase, laid out for a square canvas of `canvas` pixels.
/// Playing has no overlay.
pub fn overlay_screen(phase: Phase, canvas: f32) -> Option<OverlayScreen> {
    let mid = canvas / 2.0;
    match phase {
        Phase::Playing => None,
        Phase::Start => Some(OverlayScreen {
            title: "SnakeEscape",
            buttons: vec![OverlayButton {
                rect: OverlayRect::centered_button(canvas, mid),
                label: "Start Game",
                command: Command::Begin,
            }],
        }),
        Phase::Paused => Some(OverlayScreen {
            title: "Paused",
            buttons: vec![
                OverlayButton {
                    rect: OverlayRect::centered_button(canvas, mid - 30.0),
                    label: "Resume",
                    command: Command::Resume,
                },
                OverlayButton {
                    rect: OverlayRect::centered_button(canvas, mid + 30.0),
                    label: "Restart",
                    command: Command::Restart,
                },
            ],
        }),
        Phase::GameOver => Some(OverlayScreen {
            title: "Game Over",
            buttons: vec![
                OverlayButton {
                    rect: OverlayRect::centered_button(canvas, mid + 20.0),
                    label: "Restart",
                    command: Command::Restart,
                },
                OverlayButton {
                    rect: OverlayRect::centered_button(canvas, mid + 80.0),
                    label: "Main Menu",
                    command: Command::ReturnToMenu,
                },
            ],
        }),
    }
}
