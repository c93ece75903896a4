//! Formwright
//!
//! Drag-and-drop visual form designer
//!
//! This is the main entry point for the Dioxus Desktop application.

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let (settings, settings_error) = formwright_ui::Settings::load_or_default();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .pretty()
        .init();

    if let Some(e) = settings_error {
        tracing::warn!("Using default settings: {}", e);
    }

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   📝 Formwright v{:<41}║", formwright_ui::VERSION);
    println!("║   Drag-and-drop visual form designer                      ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    formwright_ui::launch(settings);
    Ok(())
}
