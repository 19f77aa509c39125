use crate::ui;

use ecolor::Hsva;
use eframe::egui::{self, Color32};
use eframe::{App, Frame};
use knnlab::{ClassId, GeneratorConfig, Session};

/// Mixing level the app starts with.
pub const DEFAULT_MIXING: f64 = 0.2;

/// The palette of the classic demo, indexed by class id.
const CLASS_COLORS: [&str; 4] = ["#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4"];
const CLASS_NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// How the status line should be tinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// The user-facing status line. The core never produces these strings; the
/// UI layer maps results and errors to them.
#[derive(Debug, Clone)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

/// The main application struct.
/// It holds the session plus the UI-side control values and delegates all
/// classification logic to the session.
pub struct KnnPlaygroundApp {
    /// The classification session the panels render and drive.
    pub session: Session,
    /// The `k` currently selected in the UI, passed to the session on demand.
    pub k: usize,
    /// The mixing level currently selected in the UI.
    pub mixing_level: f64,
    /// The last user-facing message.
    pub status: Status,
}

impl Default for KnnPlaygroundApp {
    fn default() -> Self {
        let session = Session::new(GeneratorConfig::default(), DEFAULT_MIXING)
            .expect("default mixing level is in range");
        Self {
            session,
            k: 5,
            mixing_level: DEFAULT_MIXING,
            status: Status {
                text: "Click anywhere on the plot to add a new point".to_string(),
                kind: StatusKind::Info,
            },
        }
    }
}

impl App for KnnPlaygroundApp {
    /// The main update loop, called by eframe on every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_side_panel(self, ctx);
        ui::draw_central_panel(self, ctx);
    }
}

impl KnnPlaygroundApp {
    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Status {
            text: text.into(),
            kind,
        };
    }

    /// Display name for a class ("A".."D", then numbered).
    pub fn class_name(class: ClassId) -> String {
        CLASS_NAMES
            .get(class.0)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("{}", class.0 + 1))
    }

    /// Color for a class: the classic palette for the first four, a
    /// golden-ratio hue walk for anything beyond it.
    pub fn class_color(class: ClassId) -> Color32 {
        CLASS_COLORS
            .get(class.0)
            .and_then(|hex| Color32::from_hex(hex).ok())
            .unwrap_or_else(|| {
                let golden_ratio_conjugate = 0.61803398875;
                let hue = (class.0 as f32 * golden_ratio_conjugate).fract();
                let hsva = Hsva {
                    h: hue,
                    s: 0.85,
                    v: 0.9,
                    a: 1.0,
                };
                Color32::from(hsva)
            })
    }
}
