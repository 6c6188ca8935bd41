use anyhow::Result;

use crate::workflow::FetchOutcome;

/// Print the outcome as human-readable lines.
pub fn print_plain(outcome: &FetchOutcome) {
    match &outcome.message {
        Some(message) => println!("{}: {message}", outcome.status),
        None => println!("{}", outcome.status),
    }
    for slot in &outcome.machines {
        println!(
            "{} | {} | {} | {}",
            slot.status.as_str(),
            slot.street,
            slot.city,
            slot.last_checked
        );
    }
}

/// Print the outcome as pretty JSON.
pub fn print_json(outcome: &FetchOutcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}
