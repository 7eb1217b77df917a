//! `stats`: table sizes and index build state.

use anyhow::{Context, Result};
use lexigraph_storage::{IndexKind, LexiconDb, RelationalStore};

use crate::config::AppConfig;

pub fn render_stats(db: &LexiconDb) -> Result<Vec<String>> {
    let store = RelationalStore::new(db.clone());
    let mut lines = vec![store.table_counts()?.to_string()];
    for kind in IndexKind::ALL {
        let state = match db.marker(kind.marker_key())? {
            Some(records) => format!("built ({} records)", records),
            None => "not built".to_string(),
        };
        lines.push(format!("{}: {}", kind, state));
    }
    Ok(lines)
}

pub fn handle_stats(config: AppConfig) -> Result<()> {
    let db = LexiconDb::open_read_only(&config.db_path, &config.storage)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    db.health_check()?;
    for line in render_stats(&db)? {
        println!("{}", line);
    }
    Ok(())
}
