//! CSV export of all stations.

use fp_store::{ListQuery, StationStore};
use log::info;
use std::io::Write;
use std::path::Path;

/// Write `stations` as CSV with a header row. Returns the number of rows.
pub fn write_csv<W: Write>(writer: W, stations: &[fp_core::Station]) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for station in stations {
        wtr.serialize(station)?;
    }
    wtr.flush()?;
    Ok(stations.len())
}

pub async fn export_csv<S: StationStore>(store: &S, output: &Path) -> anyhow::Result<usize> {
    let stations = store.list(&ListQuery::default()).await?;
    let file = std::fs::File::create(output)?;
    let count = write_csv(file, &stations)?;
    info!("exported {} feeding points to {}", count, output.display());
    Ok(count)
}
