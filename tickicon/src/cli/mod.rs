use console::Style;
use std::path::Path;

use crate::built_info;

pub mod cmd;

/// Print the title of a command, framed by rules.
pub fn print_banner(title: &str) {
    let rule = "=".repeat(50);
    // Styles are dropped automatically when the terminal lacks color support
    let style = Style::new().yellow();

    println!("{}", style.apply_to(&rule));
    println!(
        "{} {}",
        style.clone().bold().apply_to(title),
        style.clone().dim().apply_to(format!("(tickicon {})", built_info::PKG_VERSION))
    );
    println!("{}", style.apply_to(&rule));
    println!();
}

pub fn success_style() -> Style {
    Style::new().green()
}

pub fn failure_style() -> Style {
    Style::new().red()
}

/// Print where the icon was written and how large it is.
pub fn print_summary(path: &Path, size: u32) {
    println!("{}", success_style().apply_to("✓ Done!"));
    println!("Output file: {}", path.display());
    println!("Size: {size}x{size}px");
}
