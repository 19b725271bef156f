use boardprep::BoardPrepApp;
use boardprep::config::AppConfig;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let config = AppConfig::from_env();
    log::info!("Starting BoardPrep Pro (history in {})", config.storage_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "BoardPrep Pro",
        options,
        Box::new(move |cc| Ok(Box::new(BoardPrepApp::from_creation_context(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Info).ok();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");
        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    Ok(Box::new(BoardPrepApp::from_creation_context(
                        cc,
                        AppConfig::from_env(),
                    )))
                }),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start BoardPrep Pro: {err:?}");
        }
    });
}
