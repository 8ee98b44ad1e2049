use energy_core::model::{ModuleId, Rank};
use services::ProgressOverview;

/// Achievement badge shown next to the score box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankBadgeVm {
    pub icon: &'static str,
    pub title: &'static str,
}

impl From<Rank> for RankBadgeVm {
    fn from(rank: Rank) -> Self {
        let icon = match rank {
            Rank::CleanEnergyExplorer => "🥉",
            Rank::RenewableEnergySpecialist => "🥈",
            Rank::AdvancedEnergyEngineer => "🥇",
            Rank::EnergySystemsExpert => "🏆",
        };
        Self {
            icon,
            title: rank.title(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub id: ModuleId,
    pub title: String,
    pub icon: String,
    pub stars: String,
    pub completed: bool,
    pub status_label: &'static str,
}

/// Dashboard view model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub score_label: String,
    pub systems_label: String,
    pub progress_label: String,
    pub progress_percent: u32,
    pub rank: Option<RankBadgeVm>,
    pub cards: Vec<ModuleCardVm>,
}

/// Row of the technical comparison table on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TechSummaryRow {
    pub system: &'static str,
    pub typical_power: &'static str,
    pub efficiency: &'static str,
    pub capacity_factor: &'static str,
    pub lcoe: &'static str,
}

const TECH_SUMMARY: [TechSummaryRow; 4] = [
    TechSummaryRow {
        system: "Solar PV",
        typical_power: "5-400 kW",
        efficiency: "15-22%",
        capacity_factor: "15-25%",
        lcoe: "50-120",
    },
    TechSummaryRow {
        system: "Wind Turbine",
        typical_power: "1.5-3 MW",
        efficiency: "35-45%",
        capacity_factor: "25-40%",
        lcoe: "30-80",
    },
    TechSummaryRow {
        system: "Hydroelectric",
        typical_power: "1-700 MW",
        efficiency: "80-95%",
        capacity_factor: "40-60%",
        lcoe: "20-100",
    },
    TechSummaryRow {
        system: "Biomass",
        typical_power: "100 kW-10 MW",
        efficiency: "25-40%",
        capacity_factor: "70-85%",
        lcoe: "60-150",
    },
];

#[must_use]
pub fn technical_summary() -> &'static [TechSummaryRow] {
    &TECH_SUMMARY
}

#[must_use]
pub fn status_label(completed: bool) -> &'static str {
    if completed { "✅ Completed" } else { "🔄 Available" }
}

#[must_use]
pub fn stars(count: u8) -> String {
    "⭐".repeat(usize::from(count))
}

#[must_use]
pub fn map_home(overview: &ProgressOverview) -> HomeVm {
    let cards = overview
        .modules
        .iter()
        .map(|module| ModuleCardVm {
            id: module.id,
            title: module.title.clone(),
            icon: module.icon.clone(),
            stars: stars(module.difficulty.stars()),
            completed: module.completed,
            status_label: status_label(module.completed),
        })
        .collect();

    HomeVm {
        score_label: format!("{}/{}", overview.total_score, overview.max_score),
        systems_label: format!("{}/{}", overview.completed_count, overview.module_count),
        progress_label: format!("{}%", overview.completion_rate),
        progress_percent: overview.completion_rate,
        rank: overview.rank.map(RankBadgeVm::from),
        cards,
    }
}
