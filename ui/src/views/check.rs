use dioxus::prelude::*;
use tracing::warn;

use crate::core::criteria::{Scope, CRITERIA};
use crate::core::{platform, run_diagnostics, DiagnosticsReport};

/// Class that keeps an element out of the layout until it is revealed.
const HIDDEN_CLASS: &str = "nodisplay";
const PENDING_SUMMARY: &str = "Checking your device…";

#[component]
pub fn CompatibilityCheck() -> Element {
    let report = use_resource(|| async move {
        let env = platform::page_environment();
        run_diagnostics(&env).await
    });
    let mut copy_status = use_signal(|| Option::<Result<(), String>>::None);

    let finished: Option<DiagnosticsReport> = (*report.read()).clone();
    let CheckView {
        summary,
        summary_class,
        results_class,
        rows,
    } = CheckView::from_report(finished.as_ref());

    let copy_source = finished.clone();
    let on_copy = move |_: Event<MouseData>| {
        let Some(report) = copy_source.as_ref() else {
            return;
        };
        let result = report
            .to_json()
            .and_then(|json| platform::copy_to_clipboard(&json));
        if let Err(err) = &result {
            warn!(error = %err, "report copy failed");
        }
        copy_status.set(Some(result));
    };

    let copy_message = match copy_status() {
        Some(Ok(())) => Some("Report copied to the clipboard.".to_string()),
        Some(Err(err)) => Some(format!("Couldn't copy the report: {err}")),
        None => None,
    };

    rsx! {
        section { class: "page page-check",
            h1 { "Device compatibility check" }
            p { class: "page-check__intro",
                "Before you continue we check your browser, screen and permissions."
            }

            p {
                id: "compatibility-summary",
                class: "{summary_class}",
                "{summary}"
            }

            div { class: "{results_class}",
                table { class: "results__table",
                    tbody {
                        for row in rows.into_iter() {
                            tr {
                                key: "{row.id}",
                                id: "row-{row.id}",
                                class: "{row.row_class}",
                                th { scope: "row", "{row.label}" }
                                td { id: "{row.id}", class: "{row.value_class}", "{row.text}" }
                            }
                        }
                    }
                }

                if platform::CLIPBOARD_AVAILABLE {
                    div { class: "results__actions",
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: on_copy,
                            "Copy report"
                        }
                        if let Some(message) = copy_message {
                            span { class: "results__copy-status", "{message}" }
                        }
                    }
                }
            }
        }
    }
}

/// Everything the page needs to render, derived from the (possibly unfinished) report.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckView {
    pub summary: &'static str,
    pub summary_class: String,
    pub results_class: String,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RowView {
    pub id: &'static str,
    pub label: &'static str,
    pub text: String,
    pub value_class: &'static str,
    pub row_class: &'static str,
}

impl CheckView {
    pub fn from_report(report: Option<&DiagnosticsReport>) -> Self {
        let Some(report) = report else {
            return Self {
                summary: PENDING_SUMMARY,
                summary_class: "results__summary".to_string(),
                results_class: format!("results {HIDDEN_CLASS}"),
                rows: Vec::new(),
            };
        };

        let evaluation = &report.evaluation;
        let rows = CRITERIA
            .iter()
            .map(|criterion| {
                let outcome = evaluation.outcome(criterion.id);
                // Brand/model rows stay hidden whenever they were exempted.
                let row_class = match (criterion.scope, outcome) {
                    (Scope::BrandModel, None) => HIDDEN_CLASS,
                    _ => "",
                };
                RowView {
                    id: criterion.id,
                    label: criterion.label,
                    text: outcome.map(|o| o.display_text()).unwrap_or_default(),
                    value_class: outcome.map(|o| o.css_class()).unwrap_or(""),
                    row_class,
                }
            })
            .collect();

        let verdict = report.verdict();
        Self {
            summary: verdict.summary(),
            summary_class: format!("results__summary {}", verdict.css_class())
                .trim_end()
                .to_string(),
            results_class: "results".to_string(),
            rows,
        }
    }
}
