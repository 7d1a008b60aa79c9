// Child widget layout
use super::snapshot::DashboardMetrics;

/// The four widgets mounted below the card row. Each one owns its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    ManualScan,
    SecurityOverview,
    OpenPortsTable,
    CveTable,
}

impl WidgetKind {
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::ManualScan => "manual-scan",
            WidgetKind::SecurityOverview => "security-overview",
            WidgetKind::OpenPortsTable => "open-ports-table",
            WidgetKind::CveTable => "cves-table",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetMount {
    pub kind: WidgetKind,
    /// Only the security overview receives props.
    pub props: Option<DashboardMetrics>,
}

impl WidgetMount {
    fn bare(kind: WidgetKind) -> Self {
        Self { kind, props: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRow {
    /// Two widgets sharing a row on wide viewports.
    Split([WidgetMount; 2]),
    FullWidth(WidgetMount),
}

impl LayoutRow {
    pub fn widgets(&self) -> &[WidgetMount] {
        match self {
            LayoutRow::Split(pair) => pair.as_slice(),
            LayoutRow::FullWidth(widget) => std::slice::from_ref(widget),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLayout {
    pub rows: [LayoutRow; 3],
}

impl WidgetLayout {
    /// Fixed arrangement; the metrics only flow into the overview's props.
    pub fn compose(metrics: &DashboardMetrics) -> Self {
        Self {
            rows: [
                LayoutRow::Split([
                    WidgetMount::bare(WidgetKind::ManualScan),
                    WidgetMount {
                        kind: WidgetKind::SecurityOverview,
                        props: Some(*metrics),
                    },
                ]),
                LayoutRow::FullWidth(WidgetMount::bare(WidgetKind::OpenPortsTable)),
                LayoutRow::FullWidth(WidgetMount::bare(WidgetKind::CveTable)),
            ],
        }
    }

    #[cfg(test)]
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetMount> {
        self.rows.iter().flat_map(LayoutRow::widgets)
    }
}
