/// Color flipper entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use color_flipper::{AppConfig, LogLevel};

    let loaded = AppConfig::load_from_default_path();
    let level = match &loaded {
        Ok(Some(config)) => config.preferences.log_level,
        _ => LogLevel::default(),
    };

    // Logger first, so a rejected config file is reported
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();

    let source = AppConfig::default_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "the config directory".to_string());
    let config = AppConfig::resolve_loaded(loaded, &source);
    log::debug!("Config: {:?}", config);

    if let Err(e) = color_flipper::native::run(&config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
