// Export for downstream consumers
//
// CSV is the interchange encoding for reconstructed tables. Channel
// grouping follows the plot tooling's naming convention: names starting
// with 'V' are voltages, names starting with 'I' are currents, everything
// else lands in the third group.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::types::RecordTable;

/// Writes a reassembled table as CSV: channel-name header, one line per
/// acquisition, fixed 6-decimal values.
pub fn write_csv(table: &RecordTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.channels)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|value| format!("{value:.6}")))?;
    }
    writer.flush()?;
    log::info!(
        "exported {} rows x {} channels to {}",
        table.num_rows(),
        table.num_channels(),
        path.display()
    );
    Ok(())
}

/// Presentation category of a channel, by naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelCategory {
    Voltage,
    Current,
    Other,
}

/// Categorizes a channel name by its first letter.
pub fn categorize(name: &str) -> ChannelCategory {
    if name.starts_with('V') {
        ChannelCategory::Voltage
    } else if name.starts_with('I') {
        ChannelCategory::Current
    } else {
        ChannelCategory::Other
    }
}

/// Channel names split into the three plot groups, input order kept
/// within each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelGroups {
    pub voltages: Vec<String>,
    pub currents: Vec<String>,
    pub others: Vec<String>,
}

impl ChannelGroups {
    pub fn from_names(names: &[String]) -> Self {
        let mut groups = Self::default();
        for name in names {
            match categorize(name) {
                ChannelCategory::Voltage => groups.voltages.push(name.clone()),
                ChannelCategory::Current => groups.currents.push(name.clone()),
                ChannelCategory::Other => groups.others.push(name.clone()),
            }
        }
        groups
    }
}
