mod app;
mod ui;

use app::KnnPlaygroundApp;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "KNN Playground",
        native_options,
        Box::new(|_cc| Ok(Box::new(KnnPlaygroundApp::default()))),
    )
}
