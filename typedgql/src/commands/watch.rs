use std::path::PathBuf;
use std::sync::mpsc;

use clap::Args;
use eyre::{Context, Result};
use notify::{EventKind, RecursiveMode, Watcher};
use typedgql_core::{DECLARATION_SUFFIX, is_operation_file, normalize_path};
use typedgql_engine::{ChangeCoordinator, DeclarationWriter, PassReport, ReloadNotifier};

use super::{ConfigArgs, UnwrapOrExit};

/// Prints host-reload signals to the terminal. In an embedded dev-server
/// integration this would forward to the module graph instead.
struct LogNotifier;

impl ReloadNotifier for LogNotifier {
    fn invalidate(&self, id: &str) {
        println!("  stale: {id}");
    }

    fn full_reload(&self) {
        println!("  schema changed; full reload");
    }
}

#[derive(Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory to watch for changes (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

impl WatchCommand {
    /// Run the watch command
    pub fn run(&self) -> Result<()> {
        let config = self.config.load();

        // Watcher events carry absolute paths; the engine keeps the schema
        // path absolute, so only the watch root needs resolving here.
        let root = std::path::absolute(&self.root).wrap_err("failed to resolve watch root")?;

        let writer = DeclarationWriter::from_config(&config).unwrap_or_exit();
        let mut coordinator = ChangeCoordinator::new(writer, LogNotifier);

        let report = coordinator.writer_mut().write_all(&root).unwrap_or_exit();
        print_report(&report);

        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(tx).wrap_err("failed to create file watcher")?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .wrap_err_with(|| format!("failed to watch {}", root.display()))?;
        println!("watching {} for changes", root.display());

        for event in rx {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    eprintln!("watch error: {e}");
                    continue;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                continue;
            }

            for path in &event.paths {
                let path = normalize_path(path);
                let relevant = coordinator.writer().store().is_schema_file(&path)
                    || (is_operation_file(&path) && coordinator.writer().should_process(&path));
                if !relevant {
                    continue;
                }

                // A reload or regeneration failure keeps watching; the next
                // change gets a fresh attempt against unchanged state.
                match coordinator.handle_change(&path, &root) {
                    Ok(Some(report)) => print_report(&report),
                    Ok(None) => {
                        if coordinator.writer().generate_declarations() {
                            println!("  regenerated {path}{DECLARATION_SUFFIX}");
                        }
                    }
                    Err(e) => eprintln!("{:?}", miette::Report::new(e)),
                }
            }
        }

        Ok(())
    }
}

fn print_report(report: &PassReport) {
    if report.skipped {
        println!("declaration generation is disabled; watching transforms only");
        return;
    }
    println!("✓ {} artifacts written", report.written.len());
    for (path, error) in &report.failures {
        eprintln!("error: {path}");
        eprintln!("  {error}");
    }
}
