use scriptpanel::{init_logging, PanelConfig, SettingsStore, BUILD_DATE, VERSION};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("Script Panel {} (built {})", VERSION, BUILD_DATE);

    let config = PanelConfig::from_env()?;
    let store = SettingsStore::open_with_config(&config)?;
    info!(
        "Settings for host '{}' in {}",
        store.host_name(),
        store.root().display()
    );

    let active = store.active_layout();
    for name in store.list_layout_names()? {
        let marker = if name == active { "*" } else { " " };
        let doc = store.get_layout(&name)?;
        println!(
            "{} {} ({} script(s))",
            marker,
            name,
            doc.scripts_display.len()
        );
    }

    Ok(())
}
