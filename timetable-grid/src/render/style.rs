use maud::{html, Markup};

use crate::session::SessionType;

/// Background and border colour for each session type
pub fn type_colors(kind: SessionType) -> (&'static str, &'static str) {
    match kind {
        SessionType::Lecture => ("#dbeafe", "#2563eb"),
        SessionType::Tutorial => ("#dcfce7", "#16a34a"),
        SessionType::Practical => ("#fef3c7", "#d97706"),
        SessionType::Exam => ("#fee2e2", "#dc2626"),
        SessionType::Makeup => ("#ede9fe", "#7c3aed"),
    }
}

pub fn type_class(kind: SessionType) -> String {
    format!("session-{}", kind.as_str())
}

/// Legend of all session types, whether or not they occur in the data
pub fn render_legend() -> Markup {
    html! {
        div.timetable-legend {
            @for kind in SessionType::ALL {
                @let (background, border) = type_colors(kind);
                span.legend-item {
                    span class={"legend-swatch " (type_class(kind))}
                        style={"background: " (background) "; border-color: " (border) ";"} {}
                    (kind.label())
                }
            }
            span.legend-item {
                span.legend-swatch.cancelled {}
                "Cancelled"
            }
        }
    }
}

/// Stylesheet for the grid. Type colours are generated from `type_colors`.
pub fn stylesheet() -> String {
    let mut css = String::from(BASE_CSS);
    for kind in SessionType::ALL {
        let (background, border) = type_colors(kind);
        css.push_str(&format!(
            ".{} {{ background: {}; border-left: 4px solid {}; }}\n",
            type_class(kind),
            background,
            border
        ));
    }
    css
}

const BASE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 24px; color: #1f2937; }
.timetable-grid { display: grid; border: 1px solid #e5e7eb; }
.grid-corner, .day-header { padding: 8px; font-weight: 600; text-align: center; border-bottom: 1px solid #e5e7eb; background: #f9fafb; }
.time-label { font-size: 12px; color: #6b7280; text-align: right; padding-right: 6px; box-sizing: border-box; border-top: 1px solid #f3f4f6; }
.day-column { position: relative; border-left: 1px solid #e5e7eb; }
.slot-cell { display: block; width: 100%; box-sizing: border-box; border: 0; border-top: 1px solid #f3f4f6; background: transparent; padding: 0; }
.slot-cell.clickable { cursor: pointer; }
.slot-cell.clickable:hover { background: #f0f9ff; }
.session-block { position: absolute; left: 2px; right: 2px; box-sizing: border-box; padding: 4px 6px; border-radius: 4px; overflow: hidden; font-size: 12px; }
.session-block .session-code { font-weight: 700; }
.session-block .session-meta, .session-block .session-time { color: #4b5563; }
.session-block.cancelled { opacity: 0.55; }
.cancelled-overlay { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; font-weight: 700; color: #b91c1c; background: repeating-linear-gradient(45deg, rgba(255,255,255,0.6), rgba(255,255,255,0.6) 6px, rgba(254,226,226,0.6) 6px, rgba(254,226,226,0.6) 12px); }
.session-actions { position: absolute; top: 2px; right: 2px; display: flex; gap: 2px; z-index: 2; }
.session-actions button { font-size: 11px; padding: 0 4px; cursor: pointer; }
.timetable-legend { display: flex; flex-wrap: wrap; gap: 16px; margin-top: 12px; font-size: 13px; }
.legend-swatch { display: inline-block; width: 14px; height: 14px; margin-right: 6px; vertical-align: middle; border: 1px solid; border-left-width: 4px; }
.legend-swatch.cancelled { background: #fee2e2; opacity: 0.55; border-color: #b91c1c; }
.rejected-sessions { margin-top: 16px; padding: 8px 12px; border: 1px solid #fca5a5; background: #fef2f2; font-size: 13px; }
.admin-bar { display: flex; gap: 8px; align-items: center; margin-bottom: 12px; font-size: 13px; }
#session-form form { display: grid; grid-template-columns: 1fr 1fr; gap: 8px 16px; font-size: 13px; }
#session-form h2, #session-form menu, #session-form .form-error { grid-column: 1 / -1; margin: 0; }
#session-form label { display: flex; flex-direction: column; gap: 2px; }
.form-error { color: #b91c1c; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_type_has_distinct_colors() {
        let backgrounds: HashSet<&str> = SessionType::ALL.iter().map(|k| type_colors(*k).0).collect();
        assert_eq!(backgrounds.len(), SessionType::ALL.len());
    }

    #[test]
    fn legend_lists_every_type() {
        let legend = render_legend().into_string();
        for kind in SessionType::ALL {
            assert!(legend.contains(&type_class(kind)));
            assert!(legend.contains(kind.label()));
        }
    }

    #[test]
    fn stylesheet_covers_every_type() {
        let css = stylesheet();
        assert!(css.contains(".session-exam {"));
        assert!(css.contains(".session-makeup {"));
    }
}
