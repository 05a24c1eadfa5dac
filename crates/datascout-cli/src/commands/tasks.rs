//! Tasks command implementation.

use crate::cli::TasksArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use datascout_domain::ExtractionTask;
use datascout_extractor::PromptBuilder;
use datascout_registry::JsonRegistryFile;

/// Execute the tasks command.
pub fn execute_tasks(args: TasksArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let listing = if args.show_prompt {
        let registry = JsonRegistryFile::new(&config.paths.registry).load_or_seed()?;
        let builder = PromptBuilder::new()
            .with_registry(registry.entries(), config.extraction.registry_hint_limit);
        task_listing(&config.extraction.tasks, Some(&builder))
    } else {
        task_listing(&config.extraction.tasks, None)
    };

    println!("{}", formatter.format_tasks(&listing)?);
    Ok(())
}

fn task_listing(
    tasks: &[ExtractionTask],
    builder: Option<&PromptBuilder>,
) -> Vec<(ExtractionTask, Option<String>)> {
    tasks
        .iter()
        .map(|&task| (task, builder.map(|b| b.build_instructions(task))))
        .collect()
}
