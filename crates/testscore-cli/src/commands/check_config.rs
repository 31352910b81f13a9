//! The `testscore check-config` command.
//!
//! Advisory only: non-normalized weights still score, so this never fails.

use anyhow::Result;

use testscore_core::config::{validate_scoring_config, ScoringConfig};

pub fn execute(time_weight: f64, difficulty_weight: f64, accuracy_weight: f64) -> Result<()> {
    let config = ScoringConfig::new(time_weight, difficulty_weight, accuracy_weight);
    let validation = validate_scoring_config(&config);

    println!("Sum of weights: {:.3}", validation.total);
    for name in &validation.out_of_range {
        println!("  {name} is outside [0, 1]");
    }

    if validation.is_valid {
        println!("Config is valid.");
    } else {
        println!("Config is not normalized: weights should each lie in [0, 1] and sum to 1.0.");
    }

    Ok(())
}
