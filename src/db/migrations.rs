use anyhow::{bail, Context, Result};
use rusqlite::{Connection, Transaction};

const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let mut version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "storage version ({}) is newer than supported schema ({})",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        apply_migration(&tx, next_version)
            .with_context(|| format!("migration to version {next_version} failed"))?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> Result<()> {
    match version {
        1 => tx
            .execute_batch(SCHEMA_V1)
            .context("failed to create kv_store table"),
        _ => bail!("unknown migration target version: {version}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
            .unwrap();
        assert!(run_migrations(&mut conn).is_err());
    }
}
