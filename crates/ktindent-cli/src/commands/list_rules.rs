//! List rules command implementation.

use ktindent_rules::{all_rules, indent::settings};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nProperties:");
    println!(
        "  {:<26} block indent (default: {}, `unset` disables)",
        settings::INDENT_SIZE,
        settings::DEFAULT_INDENT_SIZE
    );
    println!(
        "  {:<26} continuation indent (default: {})",
        settings::CONTINUATION_INDENT_SIZE,
        settings::INDENT_SIZE
    );

    println!("\nOverride them per run, e.g.:");
    println!("  ktindent check --indent-size 2 --continuation-indent-size 4");
}
