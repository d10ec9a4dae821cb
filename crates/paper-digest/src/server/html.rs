//! Dashboard page rendering.
//!
//! Plain string building; every value that came from the API or the user
//! goes through [`escape`].

use crate::formatters::PaperCard;
use crate::session::DashboardSession;

/// Number of card columns.
const COLUMNS: usize = 3;

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{flex:1;padding:1rem 2rem}\
.banner{background:#ffe0e0;color:#900;padding:.75rem;border-radius:.25rem}\
.warning{background:#fff4d6;padding:.5rem;border-radius:.25rem}\
.grid{display:grid;grid-template-columns:repeat(3,1fr);gap:1.5rem}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:.25rem .5rem;text-align:left}";

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render the full dashboard for `session`.
///
/// `answer` is the reply to a question asked in this request, if any.
#[must_use]
pub fn render_page(session: &DashboardSession, cards: &[PaperCard], answer: Option<&str>) -> String {
    let topic = session.query().map(|q| q.topic()).unwrap_or_default();
    let count = session.query().map_or(crate::config::api::DEFAULT_RESULTS, |q| q.count());

    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Paper Reader &amp; Analyzer</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    html.push_str(&render_sidebar(topic, count));

    html.push_str("<main>\n<h1>Paper Reader &amp; Analyzer</h1>\n");
    if let Some(banner) = session.banner() {
        html.push_str(&format!("<div class=\"banner\">{}</div>\n", escape(banner)));
    }
    if let Some(at) = session.searched_at() {
        html.push_str(&format!(
            "<p><small>Results loaded {}</small></p>\n",
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    html.push_str(&render_grid(cards));
    html.push_str(&render_question(answer));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(topic: &str, count: u8) -> String {
    use crate::config::api::{MAX_RESULTS, MIN_RESULTS};

    format!(
        "<aside>\n<form action=\"/search\" method=\"get\">\n\
         <label>Enter the topic<br><input name=\"topic\" placeholder=\"chatgpt\" value=\"{}\"></label><br><br>\n\
         <label>Enter the number of papers to analyze<br>\
         <input type=\"number\" name=\"count\" min=\"{MIN_RESULTS}\" max=\"{MAX_RESULTS}\" value=\"{count}\"></label><br><br>\n\
         <button type=\"submit\">Analyze Papers</button>\n</form>\n</aside>\n",
        escape(topic)
    )
}

/// Cards in three columns; paper `i` goes to column `i % 3`.
fn render_grid(cards: &[PaperCard]) -> String {
    if cards.is_empty() {
        return String::new();
    }

    let mut columns = vec![String::new(); COLUMNS];
    for (i, card) in cards.iter().enumerate() {
        columns[i % COLUMNS].push_str(&render_card(card, i));
    }

    let mut html = String::from("<div class=\"grid\">\n");
    for column in columns {
        html.push_str(&format!("<div class=\"column\">\n{column}</div>\n"));
    }
    html.push_str("</div>\n");
    html
}

fn render_card(card: &PaperCard, index: usize) -> String {
    let number = index + 1;
    let mut html = String::from("<section class=\"card\">\n");

    html.push_str(&format!("<h3>Paper {number}: {}</h3>\n", escape(&card.title)));
    html.push_str(&format!("<p><a href=\"{}\">{}</a></p>\n", escape(card.link()), escape(&card.title)));
    if let Some(warning) = &card.warning {
        html.push_str(&format!("<p class=\"warning\">{}</p>\n", escape(warning)));
    }
    html.push_str(&format!("<p><strong>Authors:</strong> {}</p>\n", escape(&card.authors)));
    html.push_str(&format!("<p><strong>Summary:</strong> {}</p>\n", escape(&card.summary)));

    html.push_str(&format!("<details>\n<summary>View additional information for Paper {number}</summary>\n"));
    html.push_str("<table>\n<tr><th>Field</th><th>Data</th></tr>\n");
    for row in &card.details {
        html.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", escape(row.field), escape(&row.value)));
    }
    html.push_str("</table>\n</details>\n</section>\n");
    html
}

fn render_question(answer: Option<&str>) -> String {
    let mut html = String::from(
        "<hr>\n<form action=\"/ask\" method=\"get\">\n\
         <label>Enter your question<br><input name=\"question\"></label>\n\
         <button type=\"submit\">Answer Question</button>\n</form>\n",
    );
    if let Some(answer) = answer {
        html.push_str(&format!("<p class=\"answer\">{}</p>\n", escape(answer)));
    }
    html
}
