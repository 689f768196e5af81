use serde::Serialize;

/// What the page shows after a request cycle. The three states are exclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionResult {
    #[default]
    Absent,
    Value(f64),
    Error(String),
}

impl PredictionResult {
    pub fn value(&self) -> Option<f64> {
        match self {
            PredictionResult::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictionResult::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Display line for a value, e.g. `Predicted: ₹ 12,34,567`.
    pub fn headline(&self) -> Option<String> {
        self.value().map(|v| format!("Predicted: ₹ {}", format_inr(v)))
    }

    pub fn view(&self) -> ResultView {
        ResultView {
            value: self.value(),
            formatted: self.value().map(format_inr),
            error: self.error().map(str::to_string),
        }
    }
}

/// Flattened JSON shape of a [`PredictionResult`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultView {
    pub value: Option<f64>,
    pub formatted: Option<String>,
    pub error: Option<String>,
}

const LARGE_MAGNITUDE: f64 = 1e30;

/// Formats a number with Indian digit grouping: `1234567` -> `12,34,567`.
///
/// At most three fractional digits are kept, trailing zeros dropped.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Scaling by 1000 would overflow u128 past this point.
    if value.abs() >= LARGE_MAGNITUDE {
        let grouped = group_indian(&format!("{:.0}", value.abs()));
        return if value < 0.0 { format!("-{grouped}") } else { grouped };
    }

    let scaled = (value.abs() * 1000.0).round() as u128;
    let int_part = scaled / 1000;
    let frac_part = scaled % 1000;

    let digits = int_part.to_string();
    let grouped = group_indian(&digits);

    let mut out = String::with_capacity(grouped.len() + 5);
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac_part != 0 {
        let frac = format!("{frac_part:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
