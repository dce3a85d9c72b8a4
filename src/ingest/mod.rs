//! Results ingestion
//!
//! The engine consumes a flat table of per-game rows (game id, the two team
//! names and their final scores) and mirrors it into the graph store.

pub mod csv;
pub mod synthetic;

// Re-export commonly used functions
pub use csv::read_results_csv;
pub use synthetic::{placeholder_teams, synthetic_schedule};

use crate::error::Result;
use crate::graph::GraphStore;
use crate::types::GameRow;
use tracing::info;

/// Register every referenced team, then store every result
///
/// Teams are upserted first so result edges never reference a missing node.
pub fn register_and_store(store: &dyn GraphStore, rows: &[GameRow]) -> Result<()> {
    for row in rows {
        store.upsert_team(&row.home_team)?;
        store.upsert_team(&row.away_team)?;
    }

    for row in rows {
        store.upsert_result(
            row.game_id,
            &row.home_team,
            &row.away_team,
            row.home_score,
            row.away_score,
        )?;
    }

    info!(
        rows = rows.len(),
        teams = store.team_count()?,
        "ingested results"
    );

    Ok(())
}
