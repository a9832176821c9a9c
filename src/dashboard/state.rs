use super::page::{paginate, Page};
use crate::config::{Config, PAGE_SIZES};
use crate::players::{filter_records, unique_positions, unique_teams, ModelType, PlayerFilter, PlayerStatRecord, ALL};
use crate::scoring::{
    generate_fantasy_projections, rank_by_fantasy_score, FantasyProjection, ScoringWeights, StatCategory,
    WeightPreset,
};

/// Which numbers the table ranks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The selected model's forecast
    #[default]
    Predictions,
    /// Six core categories replaced by the recent-form blend
    RecentForm,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Predictions => "Model predictions",
            ViewMode::RecentForm => "Recent-form blend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Everything the player table is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub records: Vec<PlayerStatRecord>,
    pub weights: ScoringWeights,
    pub model: ModelType,
    pub filter: PlayerFilter,
    /// 1-based; clamped when the view is built
    pub page: usize,
    pub page_size: usize,
    pub view_mode: ViewMode,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    DataLoaded {
        model: ModelType,
        records: Vec<PlayerStatRecord>,
    },
    LoadFailed(String),
    SelectModel(ModelType),
    SetWeights(ScoringWeights),
    SetWeight(StatCategory, f64),
    ApplyPreset(WeightPreset),
    SetPosition(String),
    SetTeam(String),
    SetSearch(String),
    ClearFilters,
    SetPage(usize),
    NextPage,
    PreviousPage,
    SetPageSize(usize),
    ToggleViewMode,
}

/// What the table shows for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub page: Page<FantasyProjection>,
    /// Rows passing the filter, across all pages
    pub filtered_count: usize,
    pub total_count: usize,
}

impl DashboardState {
    pub fn new(weights: ScoringWeights, model: ModelType, page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            weights,
            model,
            filter: PlayerFilter::default(),
            page: 1,
            page_size: page_size.max(1),
            view_mode: ViewMode::default(),
            status: LoadStatus::Idle,
        }
    }

    pub fn from_config(config: &Config, weights: ScoringWeights) -> Self {
        Self::new(weights, config.default_model, config.page_size)
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Score and rank every record. Ranks are over the full set, so a
    /// filtered row keeps its overall rank.
    pub fn ranked(&self) -> Vec<FantasyProjection> {
        match self.view_mode {
            ViewMode::Predictions => rank_by_fantasy_score(&self.records, &self.weights),
            ViewMode::RecentForm => generate_fantasy_projections(&self.records, &self.weights),
        }
    }

    /// rank -> filter -> paginate
    pub fn view(&self) -> DashboardView {
        let ranked = self.ranked();
        let total_count = ranked.len();
        let filtered = filter_records(&ranked, &self.filter);
        let filtered_count = filtered.len();
        DashboardView {
            page: paginate(&filtered, self.page, self.page_size),
            filtered_count,
            total_count,
        }
    }

    /// "All" followed by every team present in the data
    pub fn team_options(&self) -> Vec<String> {
        with_all(unique_teams(&self.records))
    }

    pub fn position_options(&self) -> Vec<String> {
        with_all(unique_positions(&self.records))
    }
}

fn with_all(values: Vec<String>) -> Vec<String> {
    std::iter::once(ALL.to_string()).chain(values).collect()
}

/// Next value after `current` in `options`, wrapping. Unknown values restart
/// at the first option.
pub fn cycle_option(options: &[String], current: &str) -> String {
    if options.is_empty() {
        return ALL.to_string();
    }
    let next = options
        .iter()
        .position(|o| o.eq_ignore_ascii_case(current))
        .map(|idx| (idx + 1) % options.len())
        .unwrap_or(0);
    options[next].clone()
}

/// Next offered page size after `current`, wrapping.
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZES
        .iter()
        .position(|s| *s == current)
        .map(|idx| PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()])
        .unwrap_or(PAGE_SIZES[0])
}

/// Apply one action. Filter, page size and model changes send the user back
/// to page 1.
pub fn reduce(state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::LoadStarted => DashboardState {
            status: LoadStatus::Loading,
            ..state
        },
        Action::DataLoaded { model, records } => {
            if model != state.model {
                // Response for a model the user already switched away from
                return state;
            }
            DashboardState {
                records,
                status: LoadStatus::Loaded,
                ..state
            }
        }
        Action::LoadFailed(message) => DashboardState {
            status: LoadStatus::Failed(message),
            ..state
        },
        Action::SelectModel(model) => {
            if model == state.model {
                return state;
            }
            DashboardState {
                model,
                page: 1,
                status: LoadStatus::Loading,
                ..state
            }
        }
        Action::SetWeights(weights) => DashboardState { weights, ..state },
        Action::SetWeight(category, value) => {
            if !value.is_finite() {
                return state;
            }
            DashboardState {
                weights: state.weights.with(category, value),
                ..state
            }
        }
        Action::ApplyPreset(preset) => DashboardState {
            weights: preset.weights(),
            ..state
        },
        Action::SetPosition(position) => {
            let filter = PlayerFilter {
                position,
                ..state.filter.clone()
            };
            DashboardState {
                filter,
                page: 1,
                ..state
            }
        }
        Action::SetTeam(team) => {
            let filter = PlayerFilter {
                team,
                ..state.filter.clone()
            };
            DashboardState {
                filter,
                page: 1,
                ..state
            }
        }
        Action::SetSearch(search_text) => {
            let filter = PlayerFilter {
                search_text,
                ..state.filter.clone()
            };
            DashboardState {
                filter,
                page: 1,
                ..state
            }
        }
        Action::ClearFilters => DashboardState {
            filter: PlayerFilter::default(),
            page: 1,
            ..state
        },
        Action::SetPage(page) => {
            let page = page.clamp(1, current_total_pages(&state));
            DashboardState { page, ..state }
        }
        Action::NextPage => {
            let page = (state.page + 1).min(current_total_pages(&state));
            DashboardState { page, ..state }
        }
        Action::PreviousPage => {
            let page = state.page.saturating_sub(1).max(1);
            DashboardState { page, ..state }
        }
        Action::SetPageSize(page_size) => DashboardState {
            page_size: page_size.max(1),
            page: 1,
            ..state
        },
        Action::ToggleViewMode => {
            let view_mode = match state.view_mode {
                ViewMode::Predictions => ViewMode::RecentForm,
                ViewMode::RecentForm => ViewMode::Predictions,
            };
            DashboardState { view_mode, ..state }
        }
    }
}

fn current_total_pages(state: &DashboardState) -> usize {
    let filtered = state
        .records
        .iter()
        .filter(|r| state.filter.matches(r))
        .count();
    super::page::total_pages(filtered, state.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::StatLine;

    fn record(id: i64, name: &str, team: &str, position: &str, points: f64) -> PlayerStatRecord {
        let mut r = PlayerStatRecord::new(id, name, team, position);
        r.projected = Some(StatLine::default().with(StatCategory::Points, points));
        r
    }

    fn loaded_state(count: i64) -> DashboardState {
        let records = (1..=count)
            .map(|i| {
                let team = if i % 2 == 0 { "BOS" } else { "LAL" };
                record(i, &format!("Player {}", i), team, "Guard", i as f64)
            })
            .collect();
        let state = DashboardState::new(ScoringWeights::default(), ModelType::default(), 10);
        reduce(
            state,
            Action::DataLoaded {
                model: ModelType::default(),
                records,
            },
        )
    }

    #[test]
    fn test_data_loaded_sets_status() {
        let state = loaded_state(3);
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.records.len(), 3);
    }

    #[test]
    fn test_stale_model_response_ignored() {
        let state = loaded_state(3);
        let state = reduce(state, Action::SelectModel(ModelType::Ridge));
        assert!(state.is_loading());

        let state = reduce(
            state,
            Action::DataLoaded {
                model: ModelType::Xgboost,
                records: vec![],
            },
        );
        assert_eq!(state.records.len(), 3);
        assert!(state.is_loading());
    }

    #[test]
    fn test_view_ranks_then_filters_then_paginates() {
        let state = loaded_state(25);
        let view = state.view();
        assert_eq!(view.total_count, 25);
        assert_eq!(view.page.items.len(), 10);
        assert_eq!(view.page.items[0].record.person_id, 25);
        assert_eq!(view.page.items[0].rank, 1);

        let state = reduce(state, Action::SetTeam("BOS".to_string()));
        let view = state.view();
        assert_eq!(view.filtered_count, 12);
        // Player 24 is second overall and keeps that rank after filtering
        assert_eq!(view.page.items[0].record.person_id, 24);
        assert_eq!(view.page.items[0].rank, 2);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let state = reduce(loaded_state(25), Action::SetPage(3));
        assert_eq!(state.page, 3);
        let state = reduce(state, Action::SetSearch("player 1".to_string()));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_page_navigation_clamped() {
        let state = loaded_state(25);
        let state = reduce(state, Action::PreviousPage);
        assert_eq!(state.page, 1);
        let state = reduce(state, Action::SetPage(99));
        assert_eq!(state.page, 3);
        let state = reduce(state, Action::NextPage);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_weight_change_reorders() {
        let mut state = loaded_state(0);
        state = reduce(
            state,
            Action::DataLoaded {
                model: ModelType::default(),
                records: vec![
                    record(1, "Scorer", "LAL", "Guard", 30.0),
                    {
                        let mut r = record(2, "Blocker", "BOS", "Center", 5.0);
                        r.projected = r.projected.map(|l| l.with(StatCategory::Blocks, 4.0));
                        r
                    },
                ],
            },
        );
        assert_eq!(state.view().page.items[0].record.display_name, "Scorer");

        let state = reduce(state, Action::SetWeight(StatCategory::Blocks, 10.0));
        assert_eq!(state.view().page.items[0].record.display_name, "Blocker");

        let state = reduce(state, Action::SetWeight(StatCategory::Blocks, f64::NAN));
        assert_eq!(state.weights.blocks, 10.0);
    }

    #[test]
    fn test_apply_preset_and_clear_filters() {
        let state = reduce(loaded_state(3), Action::ApplyPreset(WeightPreset::Equal));
        assert_eq!(state.weights, WeightPreset::Equal.weights());

        let state = reduce(state, Action::SetPosition("Center".to_string()));
        assert_eq!(state.view().filtered_count, 0);
        let state = reduce(state, Action::ClearFilters);
        assert_eq!(state.view().filtered_count, 3);
    }

    #[test]
    fn test_recent_form_view_mode() {
        let mut r = PlayerStatRecord::new(1, "Hot", "DEN", "Center");
        r.current = StatLine::default().with(StatCategory::Points, 10.0);
        r.recent.points = Some(20.0);
        let state = DashboardState::new(
            ScoringWeights::zero().with(StatCategory::Points, 1.0),
            ModelType::default(),
            10,
        );
        let state = reduce(
            state,
            Action::DataLoaded {
                model: ModelType::default(),
                records: vec![r],
            },
        );
        assert_eq!(state.view().page.items[0].score, 10.0);

        let state = reduce(state, Action::ToggleViewMode);
        assert_eq!(state.view_mode, ViewMode::RecentForm);
        assert_eq!(state.view().page.items[0].score, 17.0);
    }

    #[test]
    fn test_cycle_options() {
        let state = loaded_state(4);
        let teams = state.team_options();
        assert_eq!(teams, vec!["All", "BOS", "LAL"]);
        assert_eq!(cycle_option(&teams, "All"), "BOS");
        assert_eq!(cycle_option(&teams, "LAL"), "All");
        assert_eq!(cycle_option(&teams, "XYZ"), "All");
    }

    #[test]
    fn test_next_page_size() {
        assert_eq!(next_page_size(10), 20);
        assert_eq!(next_page_size(20), 50);
        assert_eq!(next_page_size(50), 10);
        assert_eq!(next_page_size(7), 10);
    }
}
