use clap::ValueEnum;
use colored::Colorize;
use product_lookup::display::render::{render_json, render_table};
use product_lookup::display::ProductTable;
use product_lookup::notification::{Alert, Notifier};
use std::io::{self, Write};

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Alerts on stderr. The write is flushed before returning.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, alert: Alert) {
        let marker = match alert {
            Alert::ProductNotFound => "⚠".yellow(),
            Alert::LookupFailed => "✗".red(),
        };
        let mut stderr = io::stderr().lock();
        // Nothing left to tell the user if stderr itself is gone.
        let _ = writeln!(stderr, "{marker} {}", alert.message().bold());
        let _ = stderr.flush();
    }
}

pub fn write_surface<W: Write>(
    table: &ProductTable,
    format: OutputFormat,
    mut writer: W,
) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Table => render_table(table),
        OutputFormat::Json => render_json(table)?,
    };
    if let Some(rendered) = rendered {
        writeln!(writer, "{rendered}")?;
    }
    Ok(())
}
