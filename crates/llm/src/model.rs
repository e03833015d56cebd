use config::ModelAliases;

/// Names with a namespace separator are already backend-qualified and pass unchanged.
/// Bare names go through the alias table and otherwise pass unchanged as well.
pub(crate) fn map_model_name(name: &str, aliases: &ModelAliases) -> String {
    if name.contains('/') {
        return name.to_owned();
    }

    match aliases.get(name) {
        Some(alias) => {
            log::debug!("Mapping model '{name}' to '{alias}'");
            alias.to_owned()
        }
        None => name.to_owned(),
    }
}
