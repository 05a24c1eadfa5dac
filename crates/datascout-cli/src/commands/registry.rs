//! Registry command implementation.

use crate::cli::{RegistryAction, RegistryArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use datascout_domain::DatasetCandidate;
use datascout_registry::JsonRegistryFile;

/// Execute the registry command.
pub fn execute_registry(args: RegistryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args.registry.unwrap_or_else(|| config.paths.registry.clone());
    let registry = JsonRegistryFile::new(path).load_or_seed()?;

    match args.action {
        RegistryAction::List => {
            println!("{}", formatter.format_entries(registry.entries())?);
        }
        RegistryAction::Match { name, authors, doi } => {
            let candidate = DatasetCandidate::new(name.trim(), authors.trim(), doi.trim());
            let entry = registry
                .find_match(&candidate)
                .and_then(|id| registry.get(id));
            println!("{}", formatter.format_match(&candidate.dataset_name, entry)?);
        }
    }

    Ok(())
}
