/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    /// A completed step or final result.
    fn success(&self, message: &str);
    /// A fatal problem, written to stderr.
    fn error(&self, message: &str);
    /// A non-fatal problem, written to stderr.
    fn warn(&self, message: &str);
    /// Supporting detail under the last success line.
    fn info(&self, message: &str);
    /// Structured result payload (JSON mode only).
    fn print_json(&self, value: &serde_json::Value);
}

/// Checkmark-and-indent formatter for terminals
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {message}");
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {message}");
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} {message}");
    }
    fn info(&self, message: &str) {
        println!("  {message}");
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // Structured payloads are a JSON-mode concern.
    }
}

/// Line-delimited JSON formatter for scripting
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!("{}", serde_json::json!({"ok": true, "message": message}));
    }
    fn error(&self, message: &str) {
        eprintln!("{}", serde_json::json!({"ok": false, "error": message}));
    }
    fn warn(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"ok": true, "warning": message})
        );
    }
    fn info(&self, _message: &str) {
        // Detail lines would corrupt line-delimited JSON output.
    }
    fn print_json(&self, value: &serde_json::Value) {
        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}
