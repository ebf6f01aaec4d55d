//! Where reports are rendered.

/// Sink for report content.
///
/// Reports say what kind of content each piece is; the sink decides how it
/// looks.
pub trait Output {
    /// Heading followed by list items.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// A newly created file or directory.
    fn added_item(&mut self, text: &str);

    /// A file that was deleted and written again.
    fn replaced_item(&mut self, text: &str);

    fn warning(&mut self, msg: &str);

    /// A diagnostic already rendered by miette.
    fn diagnostic(&mut self, rendered: &str);

    /// Labelled separator, used between previewed files.
    fn divider(&mut self, label: &str);

    /// Text printed as is.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// Data that knows how to present itself.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the terminal: warnings and diagnostics on stderr, the rest on
/// stdout.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn replaced_item(&mut self, text: &str) {
        println!("  ~ {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn diagnostic(&mut self, rendered: &str) {
        eprintln!("{rendered}");
    }

    fn divider(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

#[cfg(test)]
impl BufferOutput {
    pub fn stdout_text(&self) -> String {
        self.stdout.join("\n")
    }
}

#[cfg(test)]
impl Output for BufferOutput {
    fn section(&mut self, name: &str) {
        self.stdout.push(format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.stdout.push(format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.stdout.push(format!("  - {text}"));
    }

    fn added_item(&mut self, text: &str) {
        self.stdout.push(format!("  + {text}"));
    }

    fn replaced_item(&mut self, text: &str) {
        self.stdout.push(format!("  ~ {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.stderr.push(format!("warning: {msg}"));
    }

    fn diagnostic(&mut self, rendered: &str) {
        self.stderr.push(rendered.to_string());
    }

    fn divider(&mut self, label: &str) {
        self.stdout.push(format!("── {label} ──"));
    }

    fn preformatted(&mut self, text: &str) {
        self.stdout.push(text.to_string());
    }

    fn newline(&mut self) {
        self.stdout.push(String::new());
    }
}
