//! Rendering and logging configuration for built statements.

use crate::statement::{PlaceholderStyle, Statement};
use tracing::Level;

/// Configuration for rendering and logging built statements.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Placeholder style used when rendering a [`Statement`] for a driver.
    pub placeholder: PlaceholderStyle,
    /// Tracing event level built statements are logged at.
    pub log_level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::Question,
            log_level: Level::DEBUG,
            max_logged_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults (`?` placeholders, DEBUG, 200 bytes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style.
    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Override the tracing event level.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_logged_sql_length(mut self, len: usize) -> Self {
        self.max_logged_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_length = None;
        self
    }

    /// Render a statement's text in the configured placeholder style.
    pub fn render(&self, statement: &Statement) -> String {
        statement.to_sql_with(self.placeholder)
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_logged_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    pub(crate) fn log_statement(&self, statement: &Statement) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(&self.render(statement));
        emit_at_level!(
            self.log_level,
            target: "sqlcraft.sql",
            param_count = statement.params().len(),
            sql = %sql,
        );
    }
}

/// Cut `sql` to at most `max` bytes on a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max: usize) -> &str {
    if sql.len() <= max {
        return sql;
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_sql_bytes("héllo", 2), "h");
        assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    }

    #[test]
    fn builder_methods() {
        let config = RenderConfig::new()
            .with_placeholder(PlaceholderStyle::Dollar)
            .with_log_level(Level::INFO)
            .no_truncate();
        assert_eq!(config.placeholder, PlaceholderStyle::Dollar);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.max_logged_sql_length, None);
        assert_eq!(config.truncate_sql("SELECT 1"), "SELECT 1");
        assert_eq!(
            RenderConfig::new().max_logged_sql_length(3).truncate_sql("SELECT 1"),
            "SEL..."
        );
    }
}
