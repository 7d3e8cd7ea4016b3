use std::collections::BTreeMap;

use sd_types::{
    api::{Discoverer, Element},
    config::Config,
    source::SourceKind,
};

pub fn run(config: &Config, kind: Option<SourceKind>, id: Option<&str>) -> eyre::Result<()> {
    let registry = config.registry()?;

    let mut sections: BTreeMap<&'static str, Vec<Element>> = BTreeMap::new();
    for source in registry.iter() {
        if kind.is_some_and(|kind| source.kind() != kind) || id.is_some_and(|id| source.id() != id)
        {
            continue;
        }
        sections
            .entry(source.service())
            .or_default()
            .push(source.element()?);
    }

    if let (Some(id), true) = (id, sections.is_empty()) {
        eyre::bail!("no discovery source named '{id}'");
    }

    println!("{}", serde_json::to_string_pretty(&sections)?);

    Ok(())
}
