use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use typedgql_engine::{OperationLocator, SchemaStore};

use super::{ConfigArgs, UnwrapOrExit};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory to search for operation files (defaults to current
    /// directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = self.config.load();

        let store = SchemaStore::load(&config.schema_path).unwrap_or_exit();
        let locator = OperationLocator::new(&config.include, &config.exclude).unwrap_or_exit();

        match self.config.source() {
            Some(path) => println!("✓ {} is valid\n", path.display()),
            None => println!("no config file found; using defaults\n"),
        }

        let type_count = store.document().definitions.len();
        println!(
            "  schema: {} ({} definition{})",
            store.path(),
            type_count,
            if type_count == 1 { "" } else { "s" }
        );

        let operations: Vec<String> = locator
            .discover(&self.root)
            .into_iter()
            .filter(|path| !store.is_schema_file(path))
            .filter(|path| locator.should_process(path))
            .collect();
        println!(
            "  {} operation file{}:",
            operations.len(),
            if operations.len() == 1 { "" } else { "s" }
        );
        for path in &operations {
            println!("    {path}");
        }

        Ok(())
    }
}
