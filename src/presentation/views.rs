//! HTML views for the posture dashboard.
//!
//! The domain [`DashboardView`] is flattened into plain view structs and
//! rendered with Askama. The page shell embeds the body fragment, which is
//! also served on its own so HTMX can swap it in once loading settles.

use askama::Template;

use crate::domain::cards::MetricCard;
use crate::domain::dashboard::{DashboardView, LoadingView, ReadyView};
use crate::domain::layout::{LayoutRow, WidgetKind, WidgetMount};
use crate::infrastructure::config::WidgetSources;

/// Route the loading fragment polls until the snapshot settles.
pub const BODY_ROUTE: &str = "/dashboard/body";

pub fn render<T: Template>(tmpl: &T) -> String {
    tmpl.render()
        .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>"))
}

// ── Page shell ──────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct PageTemplate {
    pub title: &'static str,
    pub body: String,
}

// ── Loading ─────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "_loading.html")]
pub struct LoadingTemplate {
    pub placeholders: Vec<usize>,
    pub poll_url: &'static str,
}

impl LoadingTemplate {
    pub fn from_view(view: &LoadingView) -> Self {
        Self {
            placeholders: view.placeholders.iter().map(|p| p.index).collect(),
            poll_url: BODY_ROUTE,
        }
    }
}

// ── Ready ───────────────────────────────────────────────────────

pub struct CardView {
    pub label: &'static str,
    pub caption: &'static str,
    pub icon: &'static str,
    pub badge_class: &'static str,
    pub icon_class: &'static str,
    pub text_class: &'static str,
    pub value: i64,
    pub test_id: &'static str,
    pub trend_icon: &'static str,
    pub trend_value: &'static str,
    pub trend_caption: &'static str,
}

impl CardView {
    pub fn from_card(card: &MetricCard) -> Self {
        let spec = card.spec;
        Self {
            label: spec.label,
            caption: spec.caption,
            icon: spec.icon.name(),
            badge_class: spec.theme.badge_class(),
            icon_class: spec.theme.icon_class(),
            text_class: spec.theme.text_class(),
            value: card.value,
            test_id: spec.test_id,
            trend_icon: spec.trend.icon.name(),
            trend_value: spec.trend.value,
            trend_caption: spec.trend.caption,
        }
    }
}

pub struct WidgetView {
    pub name: &'static str,
    pub source: String,
    /// JSON object sent along with the widget's own request; empty if none.
    pub vals: String,
}

impl WidgetView {
    pub fn from_mount(mount: &WidgetMount, sources: &WidgetSources) -> Self {
        let source = match mount.kind {
            WidgetKind::ManualScan => &sources.manual_scan_url,
            WidgetKind::SecurityOverview => &sources.security_overview_url,
            WidgetKind::OpenPortsTable => &sources.open_ports_url,
            WidgetKind::CveTable => &sources.cves_url,
        };
        let vals = mount
            .props
            .and_then(|props| serde_json::to_string(&props).ok())
            .unwrap_or_default();

        Self {
            name: mount.kind.name(),
            source: source.clone(),
            vals,
        }
    }
}

pub struct RowView {
    pub split: bool,
    pub widgets: Vec<WidgetView>,
}

#[derive(Template)]
#[template(path = "_ready.html")]
pub struct ReadyTemplate {
    pub cards: Vec<CardView>,
    pub rows: Vec<RowView>,
}

impl ReadyTemplate {
    pub fn from_view(view: &ReadyView, sources: &WidgetSources) -> Self {
        let rows = view
            .layout
            .rows
            .iter()
            .map(|row| RowView {
                split: matches!(row, LayoutRow::Split(_)),
                widgets: row
                    .widgets()
                    .iter()
                    .map(|w| WidgetView::from_mount(w, sources))
                    .collect(),
            })
            .collect();

        Self {
            cards: view.cards.iter().map(CardView::from_card).collect(),
            rows,
        }
    }
}

/// Render the body fragment for whichever state the view is in.
pub fn render_body(view: &DashboardView, sources: &WidgetSources) -> String {
    match view {
        DashboardView::Loading(loading) => render(&LoadingTemplate::from_view(loading)),
        DashboardView::Ready(ready) => render(&ReadyTemplate::from_view(ready, sources)),
    }
}

pub fn render_page(view: &DashboardView, sources: &WidgetSources) -> String {
    render(&PageTemplate {
        title: "Network Security Dashboard",
        body: render_body(view, sources),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::DashboardSnapshot;

    fn ready_html(snapshot: Option<DashboardSnapshot>) -> String {
        let view = DashboardView::compose(snapshot.as_ref(), false);
        render_body(&view, &WidgetSources::default())
    }

    fn card_value(html: &str, test_id: &str) -> String {
        let marker = format!("data-testid=\"{test_id}\">");
        let start = html.find(&marker).expect("card value missing") + marker.len();
        let end = start + html[start..].find('<').unwrap();
        html[start..end].trim().to_string()
    }

    #[test]
    fn test_loading_body_has_three_placeholders() {
        let view = DashboardView::compose(
            Some(&DashboardSnapshot {
                device_count: Some(77),
                ..Default::default()
            }),
            true,
        );
        let html = render_body(&view, &WidgetSources::default());

        assert_eq!(html.matches("data-placeholder=").count(), 3);
        assert!(html.contains("animate-pulse"));
        assert!(html.contains(BODY_ROUTE));
        assert!(!html.contains("data-testid"));
        assert!(!html.contains("77"));
        assert!(!html.contains("data-widget"));
    }

    #[test]
    fn test_ready_cards_in_order() {
        let html = ready_html(Some(DashboardSnapshot {
            device_count: Some(5),
            ..Default::default()
        }));

        let devices = html.find("text-device-count").unwrap();
        let ports = html.find("text-open-ports-count").unwrap();
        let cves = html.find("text-critical-cve-count").unwrap();
        assert!(devices < ports && ports < cves);
        assert_eq!(html.matches("data-metric-card").count(), 3);

        assert_eq!(card_value(&html, "text-device-count"), "5");
        assert_eq!(card_value(&html, "text-open-ports-count"), "0");
        assert_eq!(card_value(&html, "text-critical-cve-count"), "0");
        assert!(!html.contains("data-placeholder="));
        assert!(!html.contains("hx-trigger=\"every"));
    }

    #[test]
    fn test_ready_absent_snapshot_all_zero() {
        let html = ready_html(None);

        assert_eq!(card_value(&html, "text-device-count"), "0");
        assert_eq!(card_value(&html, "text-open-ports-count"), "0");
        assert_eq!(card_value(&html, "text-critical-cve-count"), "0");
    }

    #[test]
    fn test_static_trend_annotations() {
        let html = ready_html(None);

        assert!(html.contains("12%"));
        assert!(html.contains("vs last week"));
        assert!(html.contains("attention required"));
        assert!(html.contains("new this week"));
    }

    #[test]
    fn test_widgets_in_fixed_order() {
        let html = ready_html(Some(DashboardSnapshot {
            critical_cve_count: Some(3),
            ..Default::default()
        }));

        let positions: Vec<usize> = [
            "data-widget=\"manual-scan\"",
            "data-widget=\"security-overview\"",
            "data-widget=\"open-ports-table\"",
            "data-widget=\"cves-table\"",
        ]
        .iter()
        .map(|w| html.find(w).unwrap())
        .collect();

        assert!(positions.windows(2).all(|p| p[0] < p[1]));
        assert_eq!(html.matches("lg:grid-cols-2").count(), 1);
    }

    #[test]
    fn test_only_overview_carries_props() {
        let view = DashboardView::compose(
            Some(&DashboardSnapshot {
                device_count: Some(4),
                security_items_count: Some(9),
                ..Default::default()
            }),
            false,
        );
        let DashboardView::Ready(ready) = &view else {
            panic!("expected ready view");
        };
        let template = ReadyTemplate::from_view(ready, &WidgetSources::default());
        let widgets: Vec<&WidgetView> =
            template.rows.iter().flat_map(|r| r.widgets.iter()).collect();

        assert_eq!(widgets.len(), 4);
        for widget in widgets {
            if widget.name == "security-overview" {
                let props: serde_json::Value = serde_json::from_str(&widget.vals).unwrap();
                assert_eq!(props["deviceCount"], 4);
                assert_eq!(props["securityItemsCount"], 9);
                assert_eq!(widget.source, "/widgets/security-overview");
            } else {
                assert!(widget.vals.is_empty());
            }
        }
    }

    #[test]
    fn test_page_wraps_body() {
        let view = DashboardView::compose(None, false);
        let html = render_page(&view, &WidgetSources::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"dashboard-body\""));
        assert!(html.contains("text-device-count"));
        assert!(!html.contains("@latest"));
    }
}
