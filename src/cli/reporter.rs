use colored::Colorize;
use rustc_hash::FxHashMap;
use std::path::Path;

use zodgen_common::{Diagnostic, DiagnosticCategory, LineMap};

/// Formats syntax diagnostics and failures for stderr.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Use `text` for `file` instead of reading it from disk.
    pub fn add_source(&mut self, file: &str, text: &str) {
        self.sources.insert(file.to_string(), text.to_string());
        self.line_maps.remove(file);
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `file:line:col - error TS1005: message`, then the source line with
    /// the span underlined.
    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self
            .format_location(&diagnostic.file, diagnostic.start)
            .unwrap_or_else(|| diagnostic.file.clone());
        let mut output = format!(
            "{location} - {}",
            self.format_category(diagnostic.category)
        );
        if diagnostic.code != 0 {
            output.push(' ');
            output.push_str(&self.paint_code(&format!("TS{}", diagnostic.code)));
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// `error: message` followed by one `caused by:` line per source.
    pub fn format_error(&self, error: &anyhow::Error) -> String {
        let label = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        let mut output = format!("{label}: {error}");
        for cause in error.chain().skip(1) {
            output.push_str(&format!("\n  caused by: {cause}"));
        }
        output
    }

    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        let (line, column) = self.position_for(file, start)?;
        let line_text = self.sources.get(file)?.lines().nth(line as usize - 1)?;

        let width = if length == 0 {
            1
        } else {
            let rest = line_text.chars().count().saturating_sub(column as usize - 1);
            (length as usize).clamp(1, rest.max(1))
        };
        let mut underline: String = line_text
            .chars()
            .take(column as usize - 1)
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        let marks = "~".repeat(width);
        underline.push_str(&if self.color {
            marks.red().to_string()
        } else {
            marks
        });

        Some(format!("\n  {line:>3}   {line_text}\n        {underline}"))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    /// 1-based line and column of `offset`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        if file.is_empty() {
            return None;
        }
        if !self.sources.contains_key(file) {
            let text = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), text);
        }
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn paint_code(&self, code: &str) -> String {
        if self.color {
            code.bright_blue().to_string()
        } else {
            code.to_string()
        }
    }
}
