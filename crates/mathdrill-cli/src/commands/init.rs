//! The `mathdrill init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("mathdrill.toml");
    if path.exists() {
        println!("mathdrill.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created mathdrill.toml");
    }

    println!("\nNext steps:");
    println!(
        "  1. Print a worksheet: mathdrill test --operation multiplication --number 5 \
         --output batch.json"
    );
    println!("  2. Grade it: mathdrill grade --batch batch.json --answers 5,10,15,...");
    println!("  3. Practice: mathdrill drill --operation addition --sessions sessions.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

# How repeated operands are handled in a test batch:
#   spread      - use every possible operand before repeating one
#   strict      - never repeat; refuse batches that cannot be filled
#   independent - independent random draws
uniqueness = "spread"

# Correct answers needed to finish a study drill
study_goal = 25

# Fixed seed for reproducible drills (or set MATHDRILL_SEED)
# seed = 42
"#;
