use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use typedgql_engine::DeclarationWriter;

use super::{ConfigArgs, UnwrapOrExit};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory to search for operation files (defaults to current
    /// directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = self.config.load();

        let mut writer = DeclarationWriter::from_config(&config).unwrap_or_exit();
        let report = writer.write_all(&self.root).unwrap_or_exit();

        if report.skipped {
            println!("declaration generation is disabled; nothing to do");
            return Ok(());
        }

        let count = report.written.len();
        println!(
            "✓ {} artifact{} written",
            count,
            if count == 1 { "" } else { "s" }
        );
        for path in &report.written {
            println!("  {path}");
        }

        if !report.is_clean() {
            eprintln!();
            for (path, error) in report.failures {
                eprintln!("error: {path}");
                eprintln!("{:?}", miette::Report::new(error));
            }
            std::process::exit(1);
        }

        Ok(())
    }
}
