use kitchenette::KitchenApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = KitchenApp::new();
    if let Some(dir) = std::env::args().nth(1) {
        app = app.with_model_dir(dir);
    }
    app.run()
}
