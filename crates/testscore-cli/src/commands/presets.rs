//! The `testscore presets` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use testscore_core::config::{validate_scoring_config, ScoringPreset};

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Preset", "Time", "Difficulty", "Accuracy", "Sum"]);

    for preset in ScoringPreset::ALL {
        let config = preset.config();
        let validation = validate_scoring_config(&config);
        table.add_row(vec![
            Cell::new(preset),
            Cell::new(format!("{:.2}", config.time_weight)),
            Cell::new(format!("{:.2}", config.difficulty_weight)),
            Cell::new(format!("{:.2}", config.accuracy_weight)),
            Cell::new(format!("{:.2}", validation.total)),
        ]);
    }

    println!("{table}");
    Ok(())
}
