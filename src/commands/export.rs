use super::FilterArgs;
use crate::{
    db::db::Db,
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
    /// Output file (default: punchlist_export_<timestamp>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    filter: FilterArgs,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let db = Db::new()?;
    let exporter = Exporter::new(args.format, args.output);
    let count = exporter.export(&db, &args.filter.into())?;

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string(), count));
    Ok(())
}
