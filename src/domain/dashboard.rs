// Dashboard domain model
use super::cards::{metric_cards, placeholder_cards, MetricCard, PlaceholderCard, CARD_COUNT};
use super::layout::WidgetLayout;
use super::snapshot::{DashboardMetrics, DashboardSnapshot};

/// What the dashboard shows for one observation of the snapshot query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Loading(LoadingView),
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingView {
    pub placeholders: [PlaceholderCard; CARD_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub metrics: DashboardMetrics,
    pub cards: [MetricCard; CARD_COUNT],
    pub layout: WidgetLayout,
}

impl DashboardView {
    /// Build the view from the query's `(value, is_loading)` pair.
    ///
    /// While loading, the snapshot is never looked at, even if one is cached.
    pub fn compose(snapshot: Option<&DashboardSnapshot>, is_loading: bool) -> Self {
        if is_loading {
            return DashboardView::Loading(LoadingView {
                placeholders: placeholder_cards(),
            });
        }

        let metrics = DashboardMetrics::derive(snapshot);
        DashboardView::Ready(ReadyView {
            metrics,
            cards: metric_cards(&metrics),
            layout: WidgetLayout::compose(&metrics),
        })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardView::Loading(_))
    }
}
