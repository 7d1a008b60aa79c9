// Summary card domain model
use super::snapshot::DashboardMetrics;

/// Number of cards in both the placeholder row and the metric row.
pub const CARD_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIcon {
    Monitor,
    DoorOpen,
    AlertTriangle,
    TrendingUp,
}

impl CardIcon {
    /// Icon name in the lucide set.
    pub fn name(self) -> &'static str {
        match self {
            CardIcon::Monitor => "monitor",
            CardIcon::DoorOpen => "door-open",
            CardIcon::AlertTriangle => "alert-triangle",
            CardIcon::TrendingUp => "trending-up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTheme {
    Primary,
    Warning,
    Destructive,
}

impl CardTheme {
    pub fn text_class(self) -> &'static str {
        match self {
            CardTheme::Primary => "text-primary",
            CardTheme::Warning => "text-yellow-500",
            CardTheme::Destructive => "text-destructive",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            CardTheme::Primary => "bg-primary",
            CardTheme::Warning => "bg-yellow-500",
            CardTheme::Destructive => "bg-destructive",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            CardTheme::Primary => "text-primary-foreground",
            CardTheme::Warning => "text-white",
            CardTheme::Destructive => "text-destructive-foreground",
        }
    }
}

/// Which derived metric a card is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Devices,
    OpenPorts,
    CriticalCves,
}

impl MetricKind {
    pub fn value(self, metrics: &DashboardMetrics) -> i64 {
        match self {
            MetricKind::Devices => metrics.device_count,
            MetricKind::OpenPorts => metrics.open_ports_count,
            MetricKind::CriticalCves => metrics.critical_cve_count,
        }
    }
}

/// Static trend line shown under a card's value. Not computed from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub icon: CardIcon,
    pub value: &'static str,
    pub caption: &'static str,
}

/// Fixed presentation metadata for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub kind: MetricKind,
    pub label: &'static str,
    pub caption: &'static str,
    pub icon: CardIcon,
    pub theme: CardTheme,
    pub trend: Trend,
    pub test_id: &'static str,
}

pub static CARD_SPECS: [CardSpec; CARD_COUNT] = [
    CardSpec {
        kind: MetricKind::Devices,
        label: "Devices",
        caption: "Active network devices",
        icon: CardIcon::Monitor,
        theme: CardTheme::Primary,
        trend: Trend {
            icon: CardIcon::TrendingUp,
            value: "12%",
            caption: "vs last week",
        },
        test_id: "text-device-count",
    },
    CardSpec {
        kind: MetricKind::OpenPorts,
        label: "Open Ports",
        caption: "Detected open ports",
        icon: CardIcon::DoorOpen,
        theme: CardTheme::Warning,
        trend: Trend {
            icon: CardIcon::AlertTriangle,
            value: "High",
            caption: "attention required",
        },
        test_id: "text-open-ports-count",
    },
    CardSpec {
        kind: MetricKind::CriticalCves,
        label: "Critical CVEs",
        caption: "Critical vulnerabilities",
        icon: CardIcon::AlertTriangle,
        theme: CardTheme::Destructive,
        trend: Trend {
            icon: CardIcon::TrendingUp,
            value: "5",
            caption: "new this week",
        },
        test_id: "text-critical-cve-count",
    },
];

/// A card with its value bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricCard {
    pub spec: &'static CardSpec,
    pub value: i64,
}

/// The three metric cards, always in Devices, Open Ports, Critical CVEs order.
pub fn metric_cards(metrics: &DashboardMetrics) -> [MetricCard; CARD_COUNT] {
    CARD_SPECS.each_ref().map(|spec| MetricCard {
        spec,
        value: spec.kind.value(metrics),
    })
}

/// Shape-only stand-in for a card while the snapshot is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderCard {
    pub index: usize,
}

pub fn placeholder_cards() -> [PlaceholderCard; CARD_COUNT] {
    std::array::from_fn(|index| PlaceholderCard { index })
}
