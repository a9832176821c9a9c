pub mod formatter;

pub use formatter::{
    format_breakdown, format_history, format_model_comparison, format_models, format_page_footer,
    format_position_summary, format_projection_table, format_score, format_stat, format_tsv, format_weights,
    should_use_colors, truncate_name,
};
