use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::schedule::LineTimetables;

/// Writes the assembled timetables as the flat JSON record the route finder
/// reads. Insertion order is preserved on disk.
pub fn save_timetables(path: &Path, timetables: &LineTimetables) -> Result<()> {
    let json = serde_json::to_string(timetables)?;

    fs::write(path, json).with_context(|| format!("writing timetables to {}", path.display()))?;

    Ok(())
}

pub fn load_timetables(path: &Path) -> Result<LineTimetables> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading timetables from {}", path.display()))?;

    serde_json::from_str(&json).context("parsing the timetables file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::StopTimetables;

    #[test]
    fn timetables_survive_a_save_and_load() {
        let mut stops = StopTimetables::new();
        stops.insert("Teatr".to_string(), vec![vec![310, 340]]);
        stops.insert("Dworzec".to_string(), Vec::new());

        let mut timetables = LineTimetables::new();
        timetables.insert("194_1".to_string(), stops);

        let dir = std::env::temp_dir().join("mpk_timetables_dal_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lines_stops_times_dict");

        save_timetables(&path, &timetables).unwrap();
        let loaded = load_timetables(&path).unwrap();

        assert_eq!(loaded, timetables);
        assert_eq!(
            loaded["194_1"].keys().collect::<Vec<_>>(),
            vec!["Teatr", "Dworzec"]
        );
    }
}
