//! Human-readable console output

use std::path::Path;

use crate::capture::{resolve_height, ScreenshotArtifact};
use crate::config::{display_value, MergeOutcome};

const RULE_WIDTH: usize = 60;

/// A centered title rule, e.g. `──── title ────`
pub fn rule(title: &str) -> String {
    let inner = format!(" {} ", title);
    let fill = RULE_WIDTH.saturating_sub(inner.chars().count());
    let left = fill / 2;
    format!("{}{}{}", "─".repeat(left), inner, "─".repeat(fill - left))
}

/// A boxed panel with the title in the top border
pub fn panel(title: &str, lines: &[String]) -> String {
    let heading = format!(" {} ", title);
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(heading.chars().count());

    let mut out = String::new();
    let top_fill = content_width + 2 - heading.chars().count();
    let left = top_fill / 2;
    out.push_str(&format!(
        "╭{}{}{}╮\n",
        "─".repeat(left),
        heading,
        "─".repeat(top_fill - left)
    ));
    for line in lines {
        let pad = content_width - line.chars().count();
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", "─".repeat(content_width + 2)));
    out
}

/// Lines of the "Configuration" panel
pub fn summary_lines(root_file: &Path, outcome: &MergeOutcome) -> Vec<String> {
    let config = &outcome.config;
    let mut lines = vec![
        format!("Config Path: {}", root_file.display()),
        format!("Dishes: {}", config.dish_names().join(", ")),
        format!(
            "Layout: {}",
            config.layout_width().unwrap_or_else(|| "Unknown".to_string())
        ),
        format!("Bar height: {}px", resolve_height(config.layout())),
    ];

    for (section, dishes) in config.layout_modules() {
        lines.push(format!("Modules ({}): {}", section, dishes.join(", ")));
    }
    lines
}

/// The configuration panel plus include details
pub fn config_summary(root_file: &Path, outcome: &MergeOutcome) -> String {
    let mut out = panel("Configuration", &summary_lines(root_file, outcome));

    if let Some(includes) = outcome.config.includes() {
        out.push_str(&format!("\nIncludes: {}", display_value(includes)));
    }
    for path in &outcome.applied {
        out.push_str(&format!("\n  applied {}", path.display()));
    }
    for failure in &outcome.failures {
        out.push_str(&format!("\nFailed to load included config {}", failure));
    }
    out
}

/// Lines reported after a successful capture
pub fn capture_summary(artifact: &ScreenshotArtifact, output_dir: &Path) -> String {
    format!(
        "Cleaned up {} old screenshot(s) in {}\nCropped {} from {}x{} capture\nSaved exact bar screenshot to: {}",
        artifact.purged,
        output_dir.display(),
        artifact.crop,
        artifact.screen_width,
        artifact.screen_height,
        artifact.path.display()
    )
}
