//! Deterministic formatting of the calculation and recommendation records
//! into a display structure. No validation; absent text renders as "n/a".

use shared::protocol::CalcResponse;

pub const EMPTY_LIST_PLACEHOLDER: &str = "None noted";
const MISSING_TEXT: &str = "n/a";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// Six labelled machining parameters, in presentation order.
    pub parameters: Vec<(&'static str, String)>,
    pub risks: Vec<String>,
    pub notes: Vec<String>,
    pub coolant: String,
    pub temperature_risk: String,
    pub work_hardening: String,
}

pub fn build_results_view(response: &CalcResponse) -> ResultsView {
    let calc = &response.calculation;
    let recs = &response.recommendations;
    ResultsView {
        parameters: vec![
            ("Cutting speed vc, m/min", format_value(calc.vc)),
            ("Spindle speed n, rpm", format_value(calc.n)),
            ("Feed per tooth fz, mm", format_value(calc.fz)),
            ("Feed rate, mm/min", format_value(calc.feed)),
            ("Axial depth ap, mm", format_value(calc.ap)),
            ("Radial depth ae, mm", format_value(calc.ae)),
        ],
        risks: or_placeholder(&recs.risks),
        notes: or_placeholder(&recs.notes),
        coolant: text_or_missing(&recs.coolant),
        temperature_risk: text_or_missing(&recs.temperature_risk),
        work_hardening: text_or_missing(&recs.work_hardening),
    }
}

fn format_value(value: f64) -> String {
    // Shortest round-trip representation; integral values drop the fraction.
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn or_placeholder(items: &[String]) -> Vec<String> {
    let kept: Vec<String> = items.iter().filter(|s| !s.is_empty()).cloned().collect();
    if kept.is_empty() {
        vec![EMPTY_LIST_PLACEHOLDER.to_string()]
    } else {
        kept
    }
}

fn text_or_missing(text: &str) -> String {
    if text.trim().is_empty() {
        MISSING_TEXT.to_string()
    } else {
        text.to_string()
    }
}
