use color_hex::color_from_hex;
use eframe::{egui, NativeOptions};
use egui::{Align2, CentralPanel, Color32, FontId, Ui};
use egui_dnd_dock::{ConfigError, Dock, DockConfig, DockResponse};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Tile {
    label: &'static str,
    color: Color32,
}

impl Tile {
    fn new(label: &'static str, [r, g, b]: [u8; 3]) -> Self {
        Self {
            label,
            color: Color32::from_rgb(r, g, b),
        }
    }
}

fn tiles() -> Vec<Tile> {
    vec![
        Tile::new("Files", color_from_hex!("#4e79a7")),
        Tile::new("Mail", color_from_hex!("#f28e2b")),
        Tile::new("Music", color_from_hex!("#e15759")),
        Tile::new("Photos", color_from_hex!("#76b7b2")),
        Tile::new("Notes", color_from_hex!("#59a14f")),
        Tile::new("Term", color_from_hex!("#edc948")),
    ]
}

fn draw_tile(ui: &mut Ui, tile: &Tile) {
    let rect = ui.max_rect().shrink(4.0);
    let painter = ui.painter();
    painter.rect_filled(rect, 10.0, tile.color);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        tile.label,
        FontId::proportional(rect.height() * 0.22),
        Color32::WHITE,
    );
}

struct DockApp {
    dock: Dock<Tile>,
    last_response: DockResponse,
}

impl DockApp {
    fn new(config: DockConfig) -> Result<Self, ConfigError> {
        let dock = Dock::new("demo_dock", tiles(), draw_tile)
            .with_config(config)?
            .on_reorder(|from, to| tracing::info!(from, to, "tiles reordered"));
        Ok(Self {
            dock,
            last_response: DockResponse::Idle,
        })
    }
}

impl eframe::App for DockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Drag the tiles to reorder them");
            ui.add_space(8.0);

            let response = self.dock.ui(ui);
            if response != self.last_response {
                tracing::debug!(?response, "dock response changed");
                self.last_response = response;
            }

            ui.add_space(8.0);
            let order = self
                .dock
                .items()
                .iter()
                .map(|tile| tile.label)
                .collect::<Vec<_>>()
                .join(" · ");
            ui.label(order);
        });
    }
}

impl Drop for DockApp {
    fn drop(&mut self) {
        self.dock.dispose();
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,egui_dnd_dock=debug")),
        )
        .init();

    let app = match DockApp::new(DockConfig::default()) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(%err, "invalid dock config");
            std::process::exit(1);
        }
    };

    let options = NativeOptions {
        initial_window_size: Some(egui::vec2(520.0, 200.0)),
        ..Default::default()
    };
    eframe::run_native(
        "egui_dnd_dock",
        options,
        Box::new(|_cc| Box::new(app)),
    )
}
