use sd_types::{api::Discoverer, config::Config};
use tracing::info;

pub fn run(config: &Config) -> eyre::Result<()> {
    let registry = config.registry()?;

    for source in registry.iter() {
        info!(
            "{} discovery '{}' ok (enabled: {})",
            source.service(),
            source.id(),
            source.enabled()
        );
    }

    println!(
        "{} discovery sources ok, {} enabled",
        registry.len(),
        registry.enabled().count()
    );

    Ok(())
}
