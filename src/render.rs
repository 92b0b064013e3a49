use crate::domain::solve::{format_money, Plan};
use crate::domain::validate::INVALID_COSTS_MESSAGE;
use crate::models::CostForm;

const PAGE: &str = include_str!("../static/bauxite.html");

/// Render the planner page: the form refilled with `form`, then either a
/// validation error or the plan.
pub fn render_page(form: &CostForm, error: Option<&str>, plan: Option<&Plan>) -> String {
    fill_template(PAGE, |key| match key {
        "costoB" => Some(escape_html(&form.cost_b)),
        "costoC" => Some(escape_html(&form.cost_c)),
        "costoD" => Some(escape_html(&form.cost_d)),
        "costoE" => Some(escape_html(&form.cost_e)),
        "error" => Some(error.map(render_error).unwrap_or_default()),
        "result" => Some(plan.map(render_plan).unwrap_or_default()),
        _ => None,
    })
}

/// Substitute `{{key}}` markers in one pass, so substituted text is never
/// scanned again. Unknown markers are left as they are.
fn fill_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_error(detail: &str) -> String {
    format!(
        "  <div class=\"error\"><p>{}</p><p>{}</p></div>",
        INVALID_COSTS_MESSAGE,
        escape_html(detail)
    )
}

fn render_plan(plan: &Plan) -> String {
    let mut html = String::from("  <div class=\"result\">\n");
    html.push_str(&format!("    <h2>{}</h2>\n", escape_html(&plan.summary())));
    if let Some(objective) = plan.objective {
        html.push_str(&format!("    <p>Objective value: {}</p>\n", format_money(objective)));
    }
    if let Some(error) = &plan.error {
        html.push_str(&format!("    <p>Solver message: {}</p>\n", escape_html(error)));
    }

    if !plan.open_plants.is_empty() {
        html.push_str("    <h3>Open plants</h3>\n");
        html.push_str("    <table><tr><th>Plant</th><th>Open</th></tr>\n");
        for (plant, open) in &plan.open_plants {
            html.push_str(&format!("      <tr><td>{}</td><td>{}</td></tr>\n", plant, open));
        }
        html.push_str("    </table>\n");
    }

    if !plan.bauxite_shipments.is_empty() {
        html.push_str("    <h3>Bauxite shipments</h3>\n");
        html.push_str("    <table><tr><th>Mine</th><th>Plant</th><th>Tonnes</th></tr>\n");
        for s in &plan.bauxite_shipments {
            html.push_str(&shipment_row(s.from, s.to, s.tonnes));
        }
        html.push_str("    </table>\n");
    }

    if !plan.alumina_shipments.is_empty() {
        html.push_str("    <h3>Alumina shipments</h3>\n");
        html.push_str("    <table><tr><th>Plant</th><th>Smelter</th><th>Tonnes</th></tr>\n");
        for s in &plan.alumina_shipments {
            html.push_str(&shipment_row(s.from, s.to, s.tonnes));
        }
        html.push_str("    </table>\n");
    }

    if !plan.aluminum_output.is_empty() {
        html.push_str("    <h3>Aluminium output</h3>\n");
        html.push_str(
            "    <table><tr><th>Smelter</th><th>Alumina received</th><th>Aluminium</th></tr>\n",
        );
        for (smelter, tonnes) in &plan.aluminum_output {
            html.push_str(&format!(
                "      <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                smelter,
                format_money(plan.delivered(*smelter)),
                format_money(*tonnes)
            ));
        }
        html.push_str("    </table>\n");
    }

    html.push_str(&format!("    <p>Solved with {}</p>\n", escape_html(&plan.solver)));
    html.push_str("  </div>");
    html
}

fn shipment_row(from: impl std::fmt::Display, to: impl std::fmt::Display, tonnes: f64) -> String {
    format!(
        "      <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        from,
        to,
        format_money(tonnes)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
