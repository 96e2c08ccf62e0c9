//! Workflow command formatting
//!
//! Escaping rules follow the GitHub Actions runner: command data escapes
//! `%`, `\r` and `\n`; property values additionally escape `:` and `,`.

use crate::error::{Error, Result};

/// Escape the message part of a workflow command
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a property value of a workflow command
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Format `::name key=value,...::message`
pub fn format_command(name: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{name}");

    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(key, value)| format!("{key}={}", escape_property(value)))
            .collect();
        line.push(' ');
        line.push_str(&props.join(","));
    }

    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Format a `name<<delimiter` block for a file command (`GITHUB_OUTPUT`)
pub fn format_file_command(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) {
        return Err(Error::Internal(format!(
            "output name must not contain the delimiter '{delimiter}'"
        )));
    }
    if value.contains(delimiter) {
        return Err(Error::Internal(format!(
            "output value must not contain the delimiter '{delimiter}'"
        )));
    }

    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}
