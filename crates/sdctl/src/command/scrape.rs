use sd_types::{config::Config, source::SourceKind};

pub fn run(
    config: &Config,
    kind: SourceKind,
    id: &str,
    reveal_secrets: bool,
) -> eyre::Result<()> {
    let registry = config.registry()?;

    let Some(scrape) = registry.scrape_config(kind, id) else {
        eyre::bail!("no {kind} discovery named '{id}'");
    };

    let scrape = if reveal_secrets {
        scrape
    } else {
        scrape.redacted()
    };

    println!("{}", serde_json::to_string_pretty(&scrape)?);

    Ok(())
}
