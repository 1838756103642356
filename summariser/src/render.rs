use chrono::{DateTime, SecondsFormat, Utc};
use dashboard_summary_model::{OverallSummary, RunSummary, ScenarioSummary, Summary};

/// File name of the detailed Newman HTML report, looked up next to the dashboard
pub const DEFAULT_DETAILED_REPORT: &str = "html-report.html";

const STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f4f4f4; color: #333; }
        .container { background-color: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
        h1 { color: #333; text-align: center; }
        h2 { color: #555; border-bottom: 2px solid #eee; padding-bottom: 10px; }
        table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }
        th, td { text-align: left; padding: 12px; border-bottom: 1px solid #ddd; }
        th { background-color: #f0f0f0; }
        .summary-card { background-color: #e9ecef; padding: 15px; border-radius: 5px; margin-bottom: 15px; }
        .summary-card p { margin: 5px 0; font-size: 1.1em; }
        .status-passed { color: green; }
        .status-failed { color: red; }
        .status-neutral { color: orange; }
        .report-link { margin-top: 10px; }
        .report-link a { color: #007bff; text-decoration: none; }
        .report-link a:hover { text-decoration: underline; }
        .error-message { color: #D8000C; background-color: #FFD2D2; padding: 10px; border-radius: 5px; margin-bottom: 15px; }
        footer { margin-top: 20px; font-size: 0.8em; color: #777; }
"#;

/// Render the dashboard without a generation time.
pub fn render_dashboard(
    request_run: &RunSummary,
    scenario_run: &ScenarioSummary,
    overall: &OverallSummary,
    detailed_report_exists: bool,
) -> String {
    Dashboard::new(request_run, scenario_run, overall)
        .detailed_report(detailed_report_exists.then_some(DEFAULT_DETAILED_REPORT))
        .render()
}

/// The HTML test dashboard
///
/// Rendering is a pure function of the fields, the only varying part is the optional generation
/// time which is confined to the footer.
pub struct Dashboard<'a> {
    request_run: &'a RunSummary,
    scenario_run: &'a ScenarioSummary,
    overall: &'a OverallSummary,
    detailed_report: Option<&'a str>,
    generated_at: Option<DateTime<Utc>>,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        request_run: &'a RunSummary,
        scenario_run: &'a ScenarioSummary,
        overall: &'a OverallSummary,
    ) -> Self {
        Self {
            request_run,
            scenario_run,
            overall,
            detailed_report: None,
            generated_at: None,
        }
    }

    /// Link to the detailed report at `href`, only set this when the report exists
    pub fn detailed_report(mut self, href: Option<&'a str>) -> Self {
        self.detailed_report = href;
        self
    }

    /// Set `generated_at` footer time
    pub fn generated_at(mut self, generated_at: Option<DateTime<Utc>>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n",
        );
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Test Dashboard</title>\n    <style>\n");
        html.push_str(STYLE);
        html.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
        html.push_str("        <h1>Test Dashboard</h1>\n");

        html.push_str(&error_banner("Newman", self.request_run));
        html.push_str(&error_banner("Cucumber", self.scenario_run));
        html.push_str(&self.overall_section());

        html.push_str(&metrics_table(
            "Request Run Metrics (Newman)",
            "Total Assertions/Tests",
            self.request_run,
        ));
        html.push_str(&self.detailed_report_link());

        html.push_str(&metrics_table(
            "Scenario Run Metrics (Cucumber)",
            "Total Scenarios",
            self.scenario_run,
        ));

        if let Some(generated_at) = self.generated_at {
            html.push_str(&format!(
                "        <footer>Generated at {}</footer>\n",
                generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }

        html.push_str("    </div>\n</body>\n</html>\n");
        html
    }

    fn overall_section(&self) -> String {
        let overall = self.overall;
        let (total, passed, failed) = if overall.unavailable {
            (
                "N/A (due to errors)".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
            )
        } else {
            (
                overall.total.to_string(),
                overall.passed.to_string(),
                overall.failed.to_string(),
            )
        };
        let (passed_class, failed_class) = match (overall.unavailable, overall.failed > 0) {
            (true, _) => ("status-neutral", "status-neutral"),
            (false, true) => ("status-failed", "status-failed"),
            (false, false) => ("status-passed", "status-neutral"),
        };

        format!(
            r#"        <h2>Overall Summary</h2>
        <div class="summary-card">
            <p>Total Tests Executed: <strong>{total}</strong></p>
            <p class="{passed_class}">Total Passed: <strong>{passed}</strong></p>
            <p class="{failed_class}">Total Failed: <strong>{failed}</strong></p>
        </div>
"#
        )
    }

    fn detailed_report_link(&self) -> String {
        match self.detailed_report {
            Some(href) => format!(
                "        <div class=\"report-link\"><a href=\"{}\" target=\"_blank\">View Detailed Newman HTML Report</a></div>\n",
                escape_html(href)
            ),
            None => "        <p>Detailed Newman HTML report not found.</p>\n".to_string(),
        }
    }
}

fn error_banner(source: &str, summary: &dyn Summary) -> String {
    if !summary.is_error() {
        return String::new();
    }
    let message = summary
        .error_message()
        .map(escape_html)
        .unwrap_or_else(|| "Check the console logs.".to_string());

    format!(
        "        <div class=\"error-message\"><strong>Error processing {source} report:</strong> {message}</div>\n"
    )
}

fn metrics_table(heading: &str, total_label: &str, summary: &dyn Summary) -> String {
    let rows = if summary.is_error() {
        [
            row(total_label, "<strong>Error</strong>", None),
            row("Passed", "Error", None),
            row("Failed", "Error", None),
            row("Duration", "Error", None),
        ]
    } else {
        let failed = summary.failed();
        [
            row(
                total_label,
                &format!("<strong>{}</strong>", summary.total()),
                None,
            ),
            row(
                "Passed",
                &summary.passed().to_string(),
                (failed == 0).then_some("status-passed"),
            ),
            row(
                "Failed",
                &failed.to_string(),
                Some(if failed > 0 {
                    "status-failed"
                } else {
                    "status-passed"
                }),
            ),
            row("Duration", &format!("{} ms", summary.duration_ms()), None),
        ]
    };

    format!(
        r#"        <h2>{heading}</h2>
        <table>
            <thead>
                <tr>
                    <th>Metric</th>
                    <th>Value</th>
                </tr>
            </thead>
            <tbody>
{}            </tbody>
        </table>
"#,
        rows.concat()
    )
}

fn row(label: &str, value: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => {
            format!("                <tr><td>{label}</td><td class=\"{class}\">{value}</td></tr>\n")
        }
        None => format!("                <tr><td>{label}</td><td>{value}</td></tr>\n"),
    }
}

/// Escape HTML entities for safe embedding.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scenarios(total: u64, passed: u64, failed: u64) -> ScenarioSummary {
        ScenarioSummary {
            total_scenarios: total,
            passed_scenarios: passed,
            failed_scenarios: failed,
            duration_ms: 1234,
            ..Default::default()
        }
    }

    #[test]
    fn healthy_sources_render_numbers() {
        let request_run = RunSummary::new(10, 2, 500);
        let scenario_run = scenarios(5, 4, 1);
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let html = render_dashboard(&request_run, &scenario_run, &overall, false);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Overall Summary</h2>"));
        assert!(html.contains("Total Tests Executed: <strong>15</strong>"));
        assert!(html.contains("<p class=\"status-failed\">Total Passed: <strong>12</strong></p>"));
        assert!(html.contains("<p class=\"status-failed\">Total Failed: <strong>3</strong></p>"));
        assert!(html.contains("<h2>Request Run Metrics (Newman)</h2>"));
        assert!(html.contains("<tr><td>Total Assertions/Tests</td><td><strong>10</strong></td></tr>"));
        assert!(html.contains("<tr><td>Duration</td><td>500 ms</td></tr>"));
        assert!(html.contains("<h2>Scenario Run Metrics (Cucumber)</h2>"));
        assert!(html.contains("<tr><td>Total Scenarios</td><td><strong>5</strong></td></tr>"));
        assert!(html.contains("<tr><td>Duration</td><td>1234 ms</td></tr>"));
        assert!(!html.contains("class=\"error-message\""));
        assert!(!html.contains("<footer>"));
    }

    #[test]
    fn failures_are_styled() {
        let request_run = RunSummary::new(3, 0, 1);
        let scenario_run = scenarios(2, 1, 1);
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let html = render_dashboard(&request_run, &scenario_run, &overall, false);

        assert!(html.contains("<tr><td>Passed</td><td class=\"status-passed\">3</td></tr>"));
        assert!(html.contains("<tr><td>Failed</td><td class=\"status-passed\">0</td></tr>"));
        assert!(html.contains("<tr><td>Passed</td><td>1</td></tr>"));
        assert!(html.contains("<tr><td>Failed</td><td class=\"status-failed\">1</td></tr>"));
    }

    #[test]
    fn all_passing_overall_is_styled_passed() {
        let request_run = RunSummary::new(3, 0, 1);
        let scenario_run = scenarios(1, 1, 0);
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let html = render_dashboard(&request_run, &scenario_run, &overall, false);

        assert!(html.contains("<p class=\"status-passed\">Total Passed: <strong>4</strong></p>"));
        assert!(html.contains("<p class=\"status-neutral\">Total Failed: <strong>0</strong></p>"));
    }

    #[test]
    fn error_source_renders_banner_and_na() {
        let request_run = RunSummary::failure("JSON error: expected value at line 1 column 1");
        let scenario_run = scenarios(5, 4, 1);
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let html = render_dashboard(&request_run, &scenario_run, &overall, false);

        assert!(html.contains(
            "<div class=\"error-message\"><strong>Error processing Newman report:</strong> JSON error: expected value at line 1 column 1</div>"
        ));
        assert!(!html.contains("Error processing Cucumber report"));
        assert!(html.contains("Total Tests Executed: <strong>N/A (due to errors)</strong>"));
        assert!(html.contains("Total Passed: <strong>N/A</strong>"));
        assert!(html.contains("Total Failed: <strong>N/A</strong>"));
        // Partial counts must not colour the overall block
        assert!(html.contains("<p class=\"status-neutral\">Total Passed: <strong>N/A</strong></p>"));
        assert!(html.contains("<p class=\"status-neutral\">Total Failed: <strong>N/A</strong></p>"));
        assert!(html.contains("<tr><td>Total Assertions/Tests</td><td><strong>Error</strong></td></tr>"));
        assert!(html.contains("<tr><td>Duration</td><td>Error</td></tr>"));
        // The healthy source still shows its own numbers
        assert!(html.contains("<tr><td>Total Scenarios</td><td><strong>5</strong></td></tr>"));
    }

    #[test]
    fn error_message_is_escaped() {
        let request_run = RunSummary::empty();
        let scenario_run = ScenarioSummary::failure("unexpected <script> & \"quotes\"");
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let html = render_dashboard(&request_run, &scenario_run, &overall, false);

        assert!(html.contains(
            "<strong>Error processing Cucumber report:</strong> unexpected &lt;script&gt; &amp; &quot;quotes&quot;</div>"
        ));
    }

    #[test]
    fn error_without_message_points_to_logs() {
        let request_run = RunSummary {
            error: true,
            ..Default::default()
        };
        let scenario_run = ScenarioSummary::empty();
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let html = render_dashboard(&request_run, &scenario_run, &overall, false);

        assert!(html.contains("Error processing Newman report:</strong> Check the console logs."));
    }

    #[test]
    fn detailed_report_link_only_when_present() {
        let request_run = RunSummary::empty();
        let scenario_run = ScenarioSummary::empty();
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        let with_link = render_dashboard(&request_run, &scenario_run, &overall, true);
        assert!(with_link.contains(
            "<div class=\"report-link\"><a href=\"html-report.html\" target=\"_blank\">View Detailed Newman HTML Report</a></div>"
        ));
        assert!(!with_link.contains("report not found"));

        let without_link = render_dashboard(&request_run, &scenario_run, &overall, false);
        assert!(without_link.contains("<p>Detailed Newman HTML report not found.</p>"));
        assert!(!without_link.contains("report-link\">"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let request_run = RunSummary::new(7, 1, 20);
        let scenario_run = scenarios(3, 2, 1);
        let overall = OverallSummary::merge(&request_run, &scenario_run);

        assert_eq!(
            render_dashboard(&request_run, &scenario_run, &overall, true),
            render_dashboard(&request_run, &scenario_run, &overall, true)
        );
    }

    #[test]
    fn generation_time_is_confined_to_footer() {
        let request_run = RunSummary::new(7, 1, 20);
        let scenario_run = scenarios(3, 2, 1);
        let overall = OverallSummary::merge(&request_run, &scenario_run);
        let at = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();

        let plain = Dashboard::new(&request_run, &scenario_run, &overall).render();
        let stamped = Dashboard::new(&request_run, &scenario_run, &overall)
            .generated_at(Some(at))
            .render();

        let footer = "        <footer>Generated at 2024-05-17T08:30:00Z</footer>\n";
        assert!(stamped.contains(footer));
        assert_eq!(plain, stamped.replace(footer, ""));
    }

    #[test]
    fn escape_html_replaces_entities() {
        assert_eq!(
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;",
            escape_html("<a href=\"x\">Tom & Jerry's</a>")
        );
    }
}
