use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// Prints a heading line, the way every step of the run announces itself.
/// Green when stdout is a terminal.
pub fn heading(message: &str) {
    tracing::debug!("{}", message);
    println!(
        "{}",
        message.if_supports_color(Stream::Stdout, |text| text.green())
    );
}

/// Pretty-prints a request or response payload as JSON.
pub fn payload<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            tracing::debug!(payload = %json, "payload");
            println!("{}", json);
        }
        Err(e) => tracing::warn!("Could not render payload as JSON: {}", e),
    }
}
