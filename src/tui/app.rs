use crate::dashboard::{cycle_option, next_page_size, reduce, Action, DashboardState, DashboardView};
use crate::players::{ModelType, PlayerStatRecord};
use crate::scoring::{parse_weight, score_breakdown, FantasyProjection, ScoreBreakdown, StatCategory, WeightPreset};
use crate::settings::{reset_weights, save_weights};
use crate::tui::theme::ThemeColors;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    WeightEditor,
    WeightInput,
    ScoreBreakdown,
    Help,
}

pub struct App {
    pub state: DashboardState,
    /// Derived from `state` after every action
    pub view: DashboardView,
    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub search_input: String,
    /// Row in the weight editor
    pub weight_cursor: usize,
    pub weight_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub last_refresh: Instant,
    pub needs_fetch: bool,
    pub force_refresh: bool,
    pub should_quit: bool,
    pub spinner_frame: usize,
    pub weights_path: PathBuf,
    pub default_preset: WeightPreset,
    pub theme: ThemeColors,
}

impl App {
    /// App with no records yet; the first fetch starts on entering the loop.
    pub fn new(state: DashboardState, weights_path: PathBuf, default_preset: WeightPreset) -> Self {
        let view = state.view();
        let mut app = Self {
            state,
            view,
            table_state: ratatui::widgets::TableState::default(),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            weight_cursor: 0,
            weight_input: String::new(),
            flash_message: None,
            last_refresh: Instant::now(),
            needs_fetch: true,
            force_refresh: false,
            should_quit: false,
            spinner_frame: 0,
            weights_path,
            default_preset,
            theme: ThemeColors::default(),
        };
        app.clamp_selection();
        app
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), action);
        self.view = self.state.view();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.view.page.items.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(selected));
        }
    }

    pub fn rows(&self) -> &[FantasyProjection] {
        &self.view.page.items
    }

    pub fn next_row(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&FantasyProjection> {
        self.table_state.selected().and_then(|i| self.rows().get(i))
    }

    pub fn selected_breakdown(&self) -> Option<(&PlayerStatRecord, ScoreBreakdown)> {
        self.selected()
            .map(|p| (&p.record, score_breakdown(&p.record, &self.state.weights)))
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn next_page(&mut self) {
        self.dispatch(Action::NextPage);
        self.table_state.select(if self.rows().is_empty() { None } else { Some(0) });
    }

    pub fn previous_page(&mut self) {
        self.dispatch(Action::PreviousPage);
        self.table_state.select(if self.rows().is_empty() { None } else { Some(0) });
    }

    pub fn cycle_position(&mut self) {
        let next = cycle_option(&self.state.position_options(), &self.state.filter.position);
        self.dispatch(Action::SetPosition(next));
    }

    pub fn cycle_team(&mut self) {
        let next = cycle_option(&self.state.team_options(), &self.state.filter.team);
        self.dispatch(Action::SetTeam(next));
    }

    pub fn cycle_page_size(&mut self) {
        let size = next_page_size(self.state.page_size);
        self.dispatch(Action::SetPageSize(size));
        self.show_flash(format!("{} players per page", size));
    }

    pub fn toggle_view_mode(&mut self) {
        self.dispatch(Action::ToggleViewMode);
        self.show_flash(format!("Ranking on: {}", self.state.view_mode.label()));
    }

    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.dispatch(Action::ClearFilters);
    }

    /// Switch model and request a fetch for it
    pub fn select_model(&mut self, model: ModelType) {
        if model == self.state.model {
            return;
        }
        self.dispatch(Action::SelectModel(model));
        self.needs_fetch = true;
        self.show_flash(format!("Model: {}", model.display_name()));
    }

    pub fn request_refresh(&mut self) {
        self.needs_fetch = true;
        self.force_refresh = true;
        self.show_flash("Refreshing (fresh data)...".to_string());
    }

    pub fn data_loaded(&mut self, model: ModelType, records: Vec<PlayerStatRecord>) {
        if model != self.state.model {
            return;
        }
        let count = records.len();
        self.dispatch(Action::DataLoaded { model, records });
        self.last_refresh = Instant::now();
        self.show_flash(format!("Refreshed ({} players)", count));
    }

    pub fn load_failed(&mut self, message: String) {
        self.show_flash(format!("Failed to load players: {}", message));
        self.dispatch(Action::LoadFailed(message));
    }

    // Search: filter updates as the user types

    pub fn start_search(&mut self) {
        self.search_input = self.state.filter.search_text.clone();
        self.input_mode = InputMode::Search;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.dispatch(Action::SetSearch(self.search_input.clone()));
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.dispatch(Action::SetSearch(self.search_input.clone()));
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.search_input.clear();
        self.dispatch(Action::SetSearch(String::new()));
        self.input_mode = InputMode::Normal;
    }

    // Weight editor

    pub fn open_weight_editor(&mut self) {
        self.weight_cursor = 0;
        self.input_mode = InputMode::WeightEditor;
    }

    pub fn close_weight_editor(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn selected_category(&self) -> StatCategory {
        StatCategory::ALL[self.weight_cursor % StatCategory::ALL.len()]
    }

    pub fn next_weight(&mut self) {
        self.weight_cursor = (self.weight_cursor + 1) % StatCategory::ALL.len();
    }

    pub fn previous_weight(&mut self) {
        self.weight_cursor = self
            .weight_cursor
            .checked_sub(1)
            .unwrap_or(StatCategory::ALL.len() - 1);
    }

    pub fn start_weight_input(&mut self) {
        self.weight_input = self.state.weights.get(self.selected_category()).to_string();
        self.input_mode = InputMode::WeightInput;
    }

    pub fn cancel_weight_input(&mut self) {
        self.weight_input.clear();
        self.input_mode = InputMode::WeightEditor;
    }

    pub fn confirm_weight_input(&mut self) {
        let category = self.selected_category();
        match parse_weight(&self.weight_input) {
            Ok(value) => {
                self.dispatch(Action::SetWeight(category, value));
                self.persist_weights(format!("{} weight set to {}", category.label(), value));
                self.weight_input.clear();
                self.input_mode = InputMode::WeightEditor;
            }
            Err(e) => self.show_flash(format!("Error: {}", e)),
        }
    }

    /// Apply the preset after the one whose weights are active
    pub fn cycle_preset(&mut self) {
        let current = WeightPreset::ALL
            .iter()
            .position(|p| p.weights() == self.state.weights);
        let next = match current {
            Some(idx) => WeightPreset::ALL[(idx + 1) % WeightPreset::ALL.len()],
            None => WeightPreset::ALL[0],
        };
        self.dispatch(Action::ApplyPreset(next));
        self.persist_weights(format!("Applied preset: {}", next.name()));
    }

    pub fn reset_weights(&mut self) {
        self.dispatch(Action::SetWeights(self.default_preset.weights()));
        match reset_weights(&self.weights_path) {
            Ok(()) => self.show_flash(format!("Weights reset to {}", self.default_preset.name())),
            Err(e) => self.show_flash(format!("Failed to reset weights: {}", e)),
        }
    }

    fn persist_weights(&mut self, success: String) {
        match save_weights(&self.weights_path, &self.state.weights) {
            Ok(()) => self.show_flash(success),
            Err(e) => self.show_flash(format!("Failed to save weights: {}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_score_breakdown(&mut self) {
        if self.selected().is_some() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::StatLine;
    use crate::scoring::ScoringWeights;
    use tempfile::TempDir;

    fn record(id: i64, team: &str, position: &str, points: f64) -> PlayerStatRecord {
        let mut r = PlayerStatRecord::new(id, &format!("Player {}", id), team, position);
        r.projected = Some(StatLine::default().with(StatCategory::Points, points));
        r
    }

    fn loaded_app(dir: &TempDir, count: i64) -> App {
        let state = DashboardState::new(ScoringWeights::default(), ModelType::default(), 10);
        let mut app = App::new(state, dir.path().join("weights.json"), WeightPreset::Standard);
        let records = (1..=count)
            .map(|i| record(i, if i % 2 == 0 { "BOS" } else { "LAL" }, "Guard", i as f64))
            .collect();
        app.data_loaded(ModelType::default(), records);
        app
    }

    #[test]
    fn test_new_app_requests_fetch() {
        let dir = TempDir::new().unwrap();
        let state = DashboardState::new(ScoringWeights::default(), ModelType::default(), 10);
        let app = App::new(state, dir.path().join("w.json"), WeightPreset::Standard);
        assert!(app.needs_fetch);
        assert!(app.selected().is_none());
    }

    #[test]
    fn test_row_navigation_wraps() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 3);
        assert_eq!(app.table_state.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(2));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_page_change_selects_first_row() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 25);
        app.next_row();
        app.next_page();
        assert_eq!(app.state.page, 2);
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.selected().unwrap().rank, 11);
    }

    #[test]
    fn test_search_filters_as_you_type() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 12);
        app.start_search();
        for c in "player 12".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.view.filtered_count, 1);
        app.cancel_search();
        assert_eq!(app.view.filtered_count, 12);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_cycle_team_filter() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 4);
        app.cycle_team();
        assert_eq!(app.state.filter.team, "BOS");
        assert_eq!(app.view.filtered_count, 2);
    }

    #[test]
    fn test_weight_input_saves_to_disk() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 2);
        app.open_weight_editor();
        app.start_weight_input();
        app.weight_input = "2.5".to_string();
        app.confirm_weight_input();

        assert_eq!(app.state.weights.points, 2.5);
        assert_eq!(app.input_mode, InputMode::WeightEditor);
        assert!(app.weights_path.exists());
    }

    #[test]
    fn test_invalid_weight_input_keeps_editing() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 2);
        app.open_weight_editor();
        app.start_weight_input();
        app.weight_input = "abc".to_string();
        app.confirm_weight_input();

        assert_eq!(app.input_mode, InputMode::WeightInput);
        assert_eq!(app.state.weights, ScoringWeights::default());
        assert!(!app.weights_path.exists());
    }

    #[test]
    fn test_cycle_preset_then_reset() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 2);
        app.cycle_preset();
        assert_eq!(app.state.weights, WeightPreset::Equal.weights());
        app.reset_weights();
        assert_eq!(app.state.weights, WeightPreset::Standard.weights());
        assert!(!app.weights_path.exists());
    }

    #[test]
    fn test_stale_model_data_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = loaded_app(&dir, 3);
        app.select_model(ModelType::Ridge);
        app.data_loaded(ModelType::Xgboost, vec![]);
        assert_eq!(app.state.records.len(), 3);
        assert!(app.state.is_loading());
    }

    #[test]
    fn test_breakdown_requires_selection() {
        let dir = TempDir::new().unwrap();
        let state = DashboardState::new(ScoringWeights::default(), ModelType::default(), 10);
        let mut app = App::new(state, dir.path().join("w.json"), WeightPreset::Standard);
        app.show_score_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
