//! Prompt rendering with fixed per-variant wording.
//!
//! `build_prompt` is a plain string interpolation: neither the data nor the
//! chart type is validated, whatever the caller sends is passed through to
//! the model verbatim.
use crate::variant::Variant;

/// System message sent ahead of every prompt.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "Be precise and concise.";

/// Render the user prompt for `variant`.
///
/// For Mermaid, `data` is expected to already be the summary of the user's
/// text; the builder does not summarize.
pub fn build_prompt(data: &str, output_type: &str, variant: Variant) -> String {
    match variant {
        Variant::Apex => format!(
            "Convert the following data into an {} chart using ApexCharts syntax: {}",
            output_type, data
        ),
        Variant::ChartJs => format!(
            "Convert the following data into a {} chart using Chart.js syntax: {}",
            output_type, data
        ),
        Variant::Mermaid => format!(
            "Convert the following text into a {} using Mermaid.js syntax: {}",
            output_type, data
        ),
    }
}
