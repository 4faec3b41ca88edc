use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, notify_export_success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { file, range, force } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let path = ExportLogic::export(&pool, file, range.as_deref(), *force, &cfg.week_label)?;
        notify_export_success(&path);
    }
    Ok(())
}
