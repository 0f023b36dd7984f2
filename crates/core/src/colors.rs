//! Label colors for target names in terminal output
//!
//! Targets of one family (`clean`, `clean-cfg`, `clean-test`, `clean-all`)
//! share a color so related steps read as a group in long runs.

use colored::Color;

/// Label colors that stay clear of the red/yellow/green used for status
const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::BrightCyan,
    Color::BrightMagenta,
    Color::BrightBlue,
];

/// Part of the name before the first `-`
fn family(target_name: &str) -> &str {
    target_name.split('-').next().unwrap_or(target_name)
}

/// Stable color for a target, shared by every target of the same family
pub fn get_target_color(target_name: &str) -> Color {
    // FNV-1a
    let hash = family(target_name)
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_shares_a_color() {
        let clean = get_target_color("clean");
        for name in ["clean-cfg", "clean-test", "clean-all"] {
            assert_eq!(get_target_color(name), clean, "{name}");
        }
        assert_eq!(get_target_color("docs-pdf"), get_target_color("docs"));
    }

    #[test]
    fn test_status_colors_are_never_used() {
        for name in ["build", "publish", "dev-install", "test", "docs", "clean"] {
            let color = get_target_color(name);
            assert!(!matches!(color, Color::Red | Color::Yellow | Color::Green));
        }
    }
}
