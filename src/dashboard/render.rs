//! Server-rendered HTML for the dashboard pages.

use std::fmt::Write;

use chrono::NaiveDate;

use super::stats::{chronological, mood_trend, round1, summarize, TrendPoint};
use crate::models::daily_log::LogEntry;

pub const INSIGHT_UNAVAILABLE: &str = "Insight not available yet.";
pub const EMPTY_STATE: &str = "Start logging to unlock insights.";

#[derive(Debug, Clone, PartialEq)]
pub enum Flash {
    Saved,
    Error(String),
}

/// Everything the dashboard page shows, already fetched from the API.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub today: NaiveDate,
    pub flash: Option<Flash>,
    /// `Err` carries the message shown when the list could not be loaded.
    pub entries: Result<Vec<LogEntry>, String>,
    /// `None` when the insight request failed.
    pub insight: Option<String>,
}

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #e8e8f0;
  background: linear-gradient(180deg, #0b0b14, #0a0a12 60%); }
main { max-width: 760px; margin: 0 auto; padding: 2rem 1rem 3rem; }
nav a { color: #a7a9be; margin-right: 1rem; }
.card { padding: 1.4rem; border-radius: 18px; background: rgba(255,255,255,0.07);
  border: 1px solid rgba(255,255,255,0.14); margin-bottom: 1.6rem; }
.accent-bar { height: 4px; width: 88px; border-radius: 999px; margin-bottom: 1rem;
  background: linear-gradient(270deg, #7f5af0, #2cb67d, #7f5af0); }
.muted { opacity: .75; }
.flash-ok { color: #2cb67d; } .flash-err { color: #ef4565; }
label { display: block; margin: .6rem 0 .2rem; }
input, textarea { width: 100%; box-sizing: border-box; }
table { width: 100%; border-collapse: collapse; font-size: .9rem; }
td, th { padding: .3rem; border-bottom: 1px solid rgba(255,255,255,.1); text-align: left; }
.metric { font-size: 1.6rem; font-weight: 600; }
footer { margin-top: 3.5rem; text-align: center; font-size: .85rem; opacity: .75; }
"#;

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut body = String::new();

    card(&mut body, "LifeLog Dashboard", Some("Track patterns gently. Reflect without pressure."), "");

    let mut form = String::new();
    match &view.flash {
        Some(Flash::Saved) => form.push_str(r#"<p class="flash-ok">Saved</p>"#),
        Some(Flash::Error(msg)) => {
            let _ = write!(form, r#"<p class="flash-err">{}</p>"#, escape(msg));
        }
        None => {}
    }
    let _ = write!(
        form,
        r#"<form method="post" action="/">
<label for="log_date">Date</label><input type="date" id="log_date" name="log_date" value="{today}" required>
<label for="mood">Mood (1–10)</label><input type="range" id="mood" name="mood" min="1" max="10" value="5">
<label for="sleep_hours">Sleep (hours)</label><input type="number" id="sleep_hours" name="sleep_hours" min="0" max="24" step="0.5" value="0">
<label for="steps">Steps</label><input type="number" id="steps" name="steps" min="0" step="100" value="0">
<label for="notes">Notes (optional)</label><textarea id="notes" name="notes"></textarea>
<p><button type="submit">Save Entry</button></p>
</form>"#,
        today = view.today
    );
    card(&mut body, "Daily Log", Some("One entry per day is enough."), &form);

    match &view.entries {
        Err(msg) => {
            let _ = write!(body, r#"<p class="flash-err">{}</p>"#, escape(msg));
        }
        Ok(entries) if entries.is_empty() => {
            let _ = write!(body, r#"<p class="muted">{EMPTY_STATE}</p>"#);
        }
        Ok(entries) => {
            render_metrics(&mut body, entries);

            let insight = match &view.insight {
                Some(text) => format!("<p>{}</p>", escape(text)),
                None => format!(r#"<p class="muted">{INSIGHT_UNAVAILABLE}</p>"#),
            };
            card(&mut body, "Weekly Insight", None, &insight);

            card(&mut body, "Mood Trend", None, &trend_svg(&mood_trend(entries)));
            card(&mut body, "Details", None, &details_table(entries));
        }
    }

    page("LifeLog AI", &body)
}

pub fn render_about() -> String {
    let mut body = String::new();
    card(
        &mut body,
        "LifeLog AI — Case Study",
        Some("A calm, intentional approach to personal analytics and responsible AI."),
        "",
    );
    card(
        &mut body,
        "Overview",
        None,
        "<p>LifeLog AI helps individuals understand behavioral patterns through structured \
         daily data and short, non-judgmental AI reflections.</p>",
    );
    card(
        &mut body,
        "Design Philosophy",
        None,
        "<ul><li>Clarity over density</li><li>Patterns over noise</li>\
         <li>Reflection over optimization</li><li>AI as an assistant, not an authority</li></ul>",
    );
    card(
        &mut body,
        "Technical Architecture",
        None,
        "<pre>Dashboard\n    ↓\nLifeLog API (axum)\n    ↓\nPostgreSQL\n    ↓\nInsight layer (LLM)</pre>",
    );
    page("About LifeLog AI", &body)
}

fn render_metrics(out: &mut String, entries: &[LogEntry]) {
    let summary = summarize(entries);
    let fmt1 = |v: Option<f64>| v.map_or_else(|| "–".to_string(), |v| format!("{:.1}", round1(v)));

    let metrics = format!(
        r#"<p>Average Mood<br><span class="metric" id="avg-mood">{}</span></p>
<p>Average Sleep (hrs)<br><span class="metric" id="avg-sleep">{}</span></p>
<p>Average Steps<br><span class="metric" id="avg-steps">{}</span></p>"#,
        fmt1(summary.average_mood),
        fmt1(summary.average_sleep),
        summary
            .average_steps
            .map_or_else(|| "–".to_string(), |s| s.to_string()),
    );
    card(out, "At a Glance", None, &metrics);
}

fn trend_svg(points: &[TrendPoint]) -> String {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 200.0;
    const PAD: f64 = 16.0;

    if points.is_empty() {
        return r#"<p class="muted">No mood data yet.</p>"#.to_string();
    }

    let first = points[0].date;
    let span_days = (points[points.len() - 1].date - first).num_days().max(1) as f64;
    // Keep the 1–10 scale unless a stored value falls outside it.
    let lo = points.iter().map(|p| p.mood).min().unwrap_or(1).min(1) as f64;
    let hi = points.iter().map(|p| p.mood).max().unwrap_or(10).max(10) as f64;

    let coords: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            let x = if points.len() == 1 {
                WIDTH / 2.0
            } else {
                PAD + (p.date - first).num_days() as f64 / span_days * (WIDTH - 2.0 * PAD)
            };
            let y = HEIGHT - PAD - (p.mood as f64 - lo) / (hi - lo) * (HEIGHT - 2.0 * PAD);
            (x, y)
        })
        .collect();

    let polyline: Vec<String> = coords.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    let mut svg = format!(
        r##"<svg id="mood-trend" viewBox="0 0 {WIDTH} {HEIGHT}" width="100%" role="img" aria-label="Mood trend">
<polyline fill="none" stroke="#7f5af0" stroke-width="3" points="{}"/>"##,
        polyline.join(" ")
    );
    for (p, (x, y)) in points.iter().zip(&coords) {
        let _ = write!(
            svg,
            r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="#2cb67d"><title>{}: {}</title></circle>"##,
            p.date, p.mood
        );
    }
    svg.push_str("</svg>");
    svg
}

fn details_table(entries: &[LogEntry]) -> String {
    let mut table = String::from(
        "<table><thead><tr><th>Date</th><th>Mood</th><th>Sleep</th><th>Steps</th><th>Notes</th></tr></thead><tbody>",
    );
    for e in chronological(entries) {
        let _ = write!(
            table,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            e.log_date,
            cell(e.mood),
            cell(e.sleep_hours),
            cell(e.steps),
            escape(e.notes.as_deref().unwrap_or("")),
        );
    }
    table.push_str("</tbody></table>");
    table
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn card(out: &mut String, title: &str, subtitle: Option<&str>, inner: &str) {
    let _ = write!(out, r#"<section class="card"><div class="accent-bar"></div><h3>{title}</h3>"#);
    if let Some(sub) = subtitle {
        let _ = write!(out, r#"<p class="muted">{sub}</p>"#);
    }
    out.push_str(inner);
    out.push_str("</section>\n");
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title><style>{STYLE}</style></head>
<body><main>
<nav><a href="/">Dashboard</a><a href="/about">About</a></nav>
{body}
<footer>LifeLog AI · Rust · axum · PostgreSQL</footer>
</main></body>
</html>"#
    )
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
