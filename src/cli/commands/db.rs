use crate::cli::commands::{open_store, report_migrations};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::migrate::{applied_versions, run_pending_migrations};
use crate::db::stats;
use crate::errors::AppResult;
use crate::store::OpContext;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // opening already applies pending migrations
        let store = open_store(cfg)?;
        let ctx = OpContext::unbounded();

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let mut applied = store.migrations_applied().to_vec();
            applied.extend(store.maintenance(&ctx, run_pending_migrations)?);
            report_migrations(&applied);
            println!(
                "{}✔ Migration completed ({} pending applied).{}\n",
                GREEN,
                applied.len(),
                RESET
            );
            let versions = store.maintenance(&ctx, applied_versions)?;
            if let Some(current) = versions.last() {
                println!("  schema version: {current} ({} migrations)\n", versions.len());
            }
        }

        //
        // 2) INFO
        //
        if *info {
            let db_info = store.maintenance(&ctx, |conn| stats::collect_db_info(conn, store.path()))?;
            stats::print_db_info(&db_info, store.path());
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = store.maintenance(&ctx, |conn| {
                let result: String =
                    conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
                ttlog(conn, "check", "database", &result)?;
                Ok(result)
            })?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            store.maintenance(&ctx, |conn| {
                conn.execute_batch("VACUUM;")?;
                ttlog(conn, "vacuum", "database", "VACUUM completed")
            })?;

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
