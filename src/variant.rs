//! The three flavours of the service and everything that differs between them.
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// Which chart library the service produces syntax for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// ApexCharts configuration.
    Apex,
    /// Chart.js configuration. Runs with the strict error policy.
    #[value(name = "chartjs", alias = "chart-js")]
    ChartJs,
    /// Mermaid.js diagrams, summarizing the input first.
    Mermaid,
}

/// How the completion client treats an unsuccessful upstream response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Only status 200 counts as success; other statuses are reported with
    /// their code and raw body.
    Lenient,
    /// Any 2xx counts as success; 4xx/5xx are raised as status errors.
    Strict,
}

impl Variant {
    pub fn syntax_name(self) -> &'static str {
        match self {
            Variant::Apex => "ApexCharts",
            Variant::ChartJs => "Chart.js",
            Variant::Mermaid => "Mermaid.js",
        }
    }

    /// Path of the generate endpoint.
    pub fn route(self) -> &'static str {
        match self {
            Variant::Apex | Variant::ChartJs => "/generate_chart",
            Variant::Mermaid => "/generate_diagram",
        }
    }

    /// Key of the JSON field carrying the result.
    pub fn result_key(self) -> &'static str {
        match self {
            Variant::Apex | Variant::ChartJs => "chart_syntax",
            Variant::Mermaid => "mermaid_syntax",
        }
    }

    /// Name of the request field holding the chart or diagram type.
    pub fn type_field(self) -> &'static str {
        match self {
            Variant::Apex | Variant::ChartJs => "chart_type",
            Variant::Mermaid => "diagram_type",
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            Variant::Apex => "ApexCharts API is running!",
            Variant::ChartJs => "Chart.js API is running!",
            Variant::Mermaid => "Mermaid Diagram API is running!",
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Variant::Apex | Variant::ChartJs => 700,
            Variant::Mermaid => 500,
        }
    }

    pub fn error_policy(self) -> ErrorPolicy {
        match self {
            Variant::ChartJs => ErrorPolicy::Strict,
            Variant::Apex | Variant::Mermaid => ErrorPolicy::Lenient,
        }
    }

    /// Hardened variants report handler failures as `500 {"detail": ...}`.
    pub fn is_hardened(self) -> bool {
        self.error_policy() == ErrorPolicy::Strict
    }

    pub fn summarizes_input(self) -> bool {
        matches!(self, Variant::Mermaid)
    }

    /// Question shown by the interactive entry point when asking for the type.
    pub fn type_question(self) -> &'static str {
        match self {
            Variant::Apex => "Enter chart type (Line, Bar, Pie, Donut, Area, Radar, Scatter, Bubble, Heatmap, Mixed): ",
            Variant::ChartJs => "Enter chart type (Line, Bar, Pie, Doughnut, PolarArea, Radar, Scatter, Bubble): ",
            Variant::Mermaid => "Enter diagram type (flowchart, sequenceDiagram, classDiagram, mindmap, timeline): ",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Apex => "apex",
            Variant::ChartJs => "chartjs",
            Variant::Mermaid => "mermaid",
        };
        f.write_str(name)
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apex" | "apexcharts" => Ok(Variant::Apex),
            "chartjs" | "chart-js" | "chart.js" => Ok(Variant::ChartJs),
            "mermaid" => Ok(Variant::Mermaid),
            other => Err(format!("unknown variant '{}', expected apex, chartjs or mermaid", other)),
        }
    }
}
