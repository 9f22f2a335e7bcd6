use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Schema steps in order; entry `i` upgrades `user_version` from `i` to `i + 1`.
const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

const CURRENT_SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("could not read statistics schema version")?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "statistics were written by a newer movie-quiz (schema {version}, this build knows {CURRENT_SCHEMA_VERSION})"
        );
    }
    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("could not start statistics schema upgrade")?;
    for (step, sql) in MIGRATIONS.iter().enumerate().skip(version.max(0) as usize) {
        tx.execute_batch(sql)
            .with_context(|| format!("statistics schema step {} failed", step + 1))?;
    }
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("could not record statistics schema version")?;
    tx.commit()
        .context("could not commit statistics schema upgrade")?;

    Ok(())
}
