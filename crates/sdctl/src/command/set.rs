use sd_types::{config::Config, source::SourceKind};
use serde_json::{Map, Value};

pub fn run(config: &Config, kind: SourceKind, id: &str, options: &str) -> eyre::Result<()> {
    let set: Map<String, Value> = serde_json::from_str(options)
        .map_err(|e| eyre::eyre!("overrides must be a JSON object: {e}"))?;

    let mut registry = config.registry()?;
    let source = registry.set(kind, id, &set)?;

    println!("{}", serde_json::to_string_pretty(&source.element()?)?);

    Ok(())
}
