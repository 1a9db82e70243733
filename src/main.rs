#![warn(clippy::all)]

//! Region Atlas - an interactive map of regions and their facilities.
//!
//! Click a region to zoom in and browse its facilities by category, search
//! them by name, and open a facility for contact details and map links.

mod ui;

use eframe::egui;
use region_atlas::data::RegionStore;
use region_atlas::{AppViewModel, AtlasConfig, Message};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AtlasConfig::from_env();
    let [width, height] = config.transform.viewport;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Region Atlas")
            .with_inner_size([width as f32 + 80.0, height as f32 + 160.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Region Atlas",
        native_options,
        Box::new(|cc| Ok(Box::new(AtlasApp::new(cc, config, RegionStore::from_env())))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    Ok(Box::new(AtlasApp::new(
                        cc,
                        AtlasConfig::default(),
                        RegionStore::bundled(),
                    )))
                }),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct AtlasApp {
    /// View state: transform, interaction state and region data
    model: AppViewModel,

    /// Parsed region outlines, in store order
    outlines: Vec<ui::RegionOutline>,

    /// Fits the logical viewport into the canvas
    projection: ui::SurfaceProjection,

    /// Page scroll suppression while a detail view is open
    scroll_lock: ui::PageScrollLock,

    /// Messages produced while drawing this frame
    outbox: Vec<Message>,

    /// Monotonic clock origin for the model's millisecond timeline
    started_at: web_time::Instant,
}

impl AtlasApp {
    /// Creates a new AtlasApp instance.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AtlasConfig,
        regions: RegionStore,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let outlines = ui::outlines_from_store(&regions);
        let projection = ui::SurfaceProjection::new(config.transform.viewport);

        let mut model = AppViewModel::new(config, regions);
        model.start(0.0);

        Self {
            model,
            outlines,
            projection,
            scroll_lock: ui::PageScrollLock::default(),
            outbox: Vec::new(),
            started_at: web_time::Instant::now(),
        }
    }

    /// Milliseconds since startup.
    fn now(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.outbox.push(Message::Escape);
        }

        // Draw from the current model; input collected here applies below
        ui::render_canvas(
            ctx,
            &self.model,
            &self.outlines,
            &mut self.projection,
            &mut self.outbox,
        );
        ui::render_title(ctx, &self.model);
        ui::render_zoom_controls(ctx, &self.model, &mut self.outbox);
        ui::render_region_modal(ctx, &self.model, &mut self.outbox);
        ui::render_facility_modal(ctx, &self.model, &mut self.outbox);

        for message in self.outbox.drain(..) {
            self.model.send(message);
        }
        let now = self.now();
        let busy = self.model.update(now);

        self.scroll_lock.sync(self.model.scroll_locked());

        if busy {
            ctx.request_repaint();
        }
    }
}
