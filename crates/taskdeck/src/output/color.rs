//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green   (Done column, completed projects, high scores)
//!   - Warning/Active: yellow  (In Progress, medium priority, middling scores)
//!   - Error/Urgent:   red     (high priority, On Hold, low scores)
//!   - Info/Reference: cyan    (IDs, In Review, Planning)
//!   - Muted:          dimmed  (field labels, other statuses)
//!   - Emphasis:       bold    (section headers)

use crate::domain::{Priority, ProjectStatus, TaskStatus};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply color to a task status.
pub(crate) fn colorize_task_status(status: TaskStatus, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        TaskStatus::ToDo => text.white().to_string(),
        TaskStatus::InProgress => text.yellow().to_string(),
        TaskStatus::InReview => text.cyan().to_string(),
        TaskStatus::Done => text.green().to_string(),
    }
}

/// Apply color to a project status.
pub(crate) fn colorize_project_status(status: ProjectStatus, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        ProjectStatus::InProgress => text.yellow().to_string(),
        ProjectStatus::Completed => text.green().to_string(),
        ProjectStatus::OnHold => text.red().to_string(),
        ProjectStatus::Planning => text.cyan().to_string(),
        _ => text.dimmed().to_string(),
    }
}

/// Apply color to a priority.
pub(crate) fn colorize_priority(priority: Priority, config: &OutputConfig) -> String {
    let text = priority.to_string();
    if !config.use_colors {
        return text;
    }
    match priority {
        Priority::High => text.red().bold().to_string(),
        Priority::Medium => text.yellow().to_string(),
        Priority::Low => text.green().to_string(),
    }
}

/// Color text by a completion percentage: red below 30, yellow below 70.
pub(crate) fn progress_color(text: &str, percent: f64, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    if percent < 30.0 {
        text.red().to_string()
    } else if percent < 70.0 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

/// Color text by a health score, matching the health buckets.
pub(crate) fn health_color(text: &str, score: f64, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    if score >= 80.0 {
        text.green().to_string()
    } else if score >= 60.0 {
        text.yellow().to_string()
    } else if score >= 40.0 {
        text.truecolor(253, 126, 20).to_string()
    } else {
        text.red().to_string()
    }
}

/// Colorize an ID (cyan).
pub(crate) fn colorize_id(id: impl std::fmt::Display, config: &OutputConfig) -> String {
    let text = id.to_string();
    if !config.use_colors {
        return text;
    }
    text.cyan().to_string()
}

/// Checkbox for a task's completion flag, with ASCII fallback.
pub(crate) fn completion_mark(completed: bool, config: &OutputConfig) -> String {
    let mark = match (config.use_ascii, completed) {
        (true, true) => "[x]",
        (true, false) => "[ ]",
        (false, true) => "☑",
        (false, false) => "☐",
    };
    if completed {
        success(mark, config)
    } else {
        mark.to_string()
    }
}

/// A fixed-width bar filled to `percent`, with ASCII fallback.
pub(crate) fn progress_bar(percent: f64, width: usize, config: &OutputConfig) -> String {
    let (full, empty) = if config.use_ascii {
        ("#", "-")
    } else {
        ("█", "░")
    };

    // Clamped to 0..=width before the cast
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;

    let bar = format!("{}{}", full.repeat(filled), empty.repeat(width - filled));
    progress_color(&bar, percent, config)
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    static GLOBAL_STATE_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl ColorGuard<'_> {
        fn new() -> Self {
            let guard = GLOBAL_STATE_MUTEX
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    #[test]
    fn colors_disabled_returns_plain_text() {
        let config = plain();
        assert_eq!(colorize_task_status(TaskStatus::InReview, &config), "In Review");
        assert_eq!(colorize_priority(Priority::High, &config), "high");
        assert_eq!(
            colorize_project_status(ProjectStatus::OnHold, &config),
            "On Hold"
        );
        assert_eq!(health_color("42", 42.0, &config), "42");
    }

    #[test]
    fn colors_enabled_adds_ansi_codes() {
        let _guard = ColorGuard::new();
        let config = OutputConfig::new(80, false, true);

        let done = colorize_task_status(TaskStatus::Done, &config);
        let low = progress_color("10%", 10.0, &config);

        assert!(done.contains("Done"));
        assert!(done.contains("\x1b["));
        assert!(low.contains("\x1b["));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        let config = OutputConfig::new(80, true, false);
        assert_eq!(progress_bar(50.0, 10, &config), "#####-----");
        assert_eq!(progress_bar(0.0, 4, &config), "----");
        assert_eq!(progress_bar(100.0, 4, &config), "####");
    }

    #[test]
    fn progress_bar_clamps_out_of_range() {
        let config = OutputConfig::new(80, true, false);
        assert_eq!(progress_bar(150.0, 4, &config), "####");
    }

    #[test]
    fn completion_mark_ascii_fallback() {
        let ascii = OutputConfig::new(80, true, false);
        let unicode = OutputConfig::new(80, false, false);

        assert_eq!(completion_mark(true, &ascii), "[x]");
        assert_eq!(completion_mark(false, &ascii), "[ ]");
        assert_eq!(completion_mark(true, &unicode), "☑");
    }
}
