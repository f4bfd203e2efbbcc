//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - nine-qubit Shor code pipeline",
        style("nonet").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  nonet-ir           Circuit representation");
    println!("  nonet-hal          Backend abstraction");
    println!("  nonet-adapter-sim  Statevector simulator");
    println!("  nonet-qec          Encode, syndrome, correct, decode");
    println!("  nonet-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
