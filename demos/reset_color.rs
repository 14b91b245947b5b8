//! Example: Change a few settings, then reset the color.
//!
//! Run with: `cargo run --example reset_color`

use std::sync::Arc;

use trafficmeter_core::{
    MaskConfig, MemoryStore, ProcNetDev, ScreenChoices, SettingChange, SettingsError,
    TrafficSettingsController, standard_resources,
};

fn main() -> Result<(), SettingsError> {
    // Initialize logging (optional)
    env_logger::init();

    let masks = MaskConfig::load(&standard_resources())?;
    let store = Arc::new(MemoryStore::new());

    // Packed settings are only loaded when the host reports traffic
    let mut controller = TrafficSettingsController::new(
        store,
        masks,
        ScreenChoices::standard(&masks),
        &ProcNetDev::new(),
    )?;

    let view = controller.view();
    println!(
        "Current: display={}, period={}, color={}",
        view.display.summary, view.period.summary, view.color_summary
    );

    match controller.apply(SettingChange::Period("1000".into())) {
        Ok(true) => println!("Period set to {}", controller.view().period.summary),
        Ok(false) => println!("Traffic statistics unsupported, period unchanged"),
        Err(e) => eprintln!("Error changing period: {}", e),
    }

    controller.apply(SettingChange::Color("#ff33b5e5".parse()?))?;
    println!("Color: {}", controller.view().color_summary);

    controller.reset_color()?;
    println!("Color after reset: {}", controller.view().color_summary);

    Ok(())
}
