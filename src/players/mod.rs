pub mod analytics;
pub mod combine;
pub mod filter;
pub mod types;

pub use analytics::{
    average_stats_by_position, position_breakdown, top_by_category, top_projections, unique_positions, unique_teams,
    PositionAverages,
};
pub use combine::{combine_records, projected_line, record_from_roster};
pub use filter::{filter_records, PlayerFilter, ALL};
pub use types::{ModelType, PlayerStatRecord, RecentForm, StatLine};
