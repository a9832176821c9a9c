use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::api::{AvailableModels, ModelComparison, PlayerHistory};
use crate::dashboard::Page;
use crate::players::{ModelType, PositionAverages};
use crate::scoring::{round_to, FantasyProjection, ScoreBreakdown, ScoringWeights, StatCategory};

/// Stat columns shown in the player table, after the fantasy score
const TABLE_STATS: [StatCategory; 6] = [
    StatCategory::Points,
    StatCategory::Rebounds,
    StatCategory::Assists,
    StatCategory::Steals,
    StatCategory::Blocks,
    StatCategory::Turnovers,
];

const RANK_WIDTH: usize = 4;
const TEAM_WIDTH: usize = 4;
const POSITION_WIDTH: usize = 14;
const SCORE_WIDTH: usize = 8;
const STAT_WIDTH: usize = 6;
const MIN_NAME_WIDTH: usize = 12;
const DEFAULT_NAME_WIDTH: usize = 24;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Fantasy score for display: two decimals
pub fn format_score(score: f64) -> String {
    format!("{:.2}", round_to(score, 2))
}

/// Stat value for display: one decimal
pub fn format_stat(value: f64) -> String {
    format!("{:.1}", value)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

fn name_width(term_width: Option<usize>) -> usize {
    let fixed = RANK_WIDTH
        + 1
        + TEAM_WIDTH
        + 1
        + POSITION_WIDTH
        + 1
        + SCORE_WIDTH
        + (STAT_WIDTH + 1) * (TABLE_STATS.len() + 1);
    match term_width {
        Some(width) if width > fixed + MIN_NAME_WIDTH => (width - fixed).min(40),
        Some(_) => MIN_NAME_WIDTH,
        None => DEFAULT_NAME_WIDTH,
    }
}

/// Player table with a header row.
/// Columns: rank, name, team, position, fantasy points, PTS REB AST STL BLK TO MIN
pub fn format_projection_table(rows: &[FantasyProjection], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No players found.".to_string();
    }

    let name_width = name_width(get_terminal_width());

    let mut header = format!(
        "{:>rw$} {} {} {} {:>sw$}",
        "#",
        pad("Player", name_width),
        pad("Team", TEAM_WIDTH),
        pad("Pos", POSITION_WIDTH),
        "FPTS",
        rw = RANK_WIDTH,
        sw = SCORE_WIDTH,
    );
    for category in TABLE_STATS {
        let label = match category {
            StatCategory::Points => "PTS",
            other => other.abbreviation(),
        };
        header.push_str(&format!(" {:>w$}", label, w = STAT_WIDTH));
    }
    header.push_str(&format!(" {:>w$}", "MIN", w = STAT_WIDTH));

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for row in rows {
        let record = &row.record;
        let line = record.scoring_line();
        let rank = format!("{:>w$}", format!("{}.", row.rank), w = RANK_WIDTH);
        let name = pad(&truncate_name(&record.display_name, name_width), name_width);
        let team = pad(&record.team, TEAM_WIDTH);
        let position = pad(&truncate_name(&record.position, POSITION_WIDTH), POSITION_WIDTH);
        let score = format!("{:>w$}", format_score(row.score), w = SCORE_WIDTH);

        let mut stats = String::new();
        for category in TABLE_STATS {
            stats.push_str(&format!(" {:>w$}", format_stat(line.get(category)), w = STAT_WIDTH));
        }
        stats.push_str(&format!(" {:>w$}", format_stat(line.minutes), w = STAT_WIDTH));

        if use_colors {
            lines.push(format!(
                "{} {} {} {} {}{}",
                rank.dimmed(),
                name.bold(),
                team.cyan(),
                position,
                score.green(),
                stats
            ));
        } else {
            lines.push(format!("{} {} {} {} {}{}", rank, name, team, position, score, stats));
        }
    }

    lines.join("\n")
}

/// Format rows as tab-separated values for scripting
/// Columns: rank, person_id, name, team, position, score, PTS REB AST STL BLK TO MIN
/// (no headers, no colors)
pub fn format_tsv(rows: &[FantasyProjection]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    rows.iter()
        .map(|row| {
            let record = &row.record;
            let line = record.scoring_line();
            let mut fields = vec![
                row.rank.to_string(),
                record.person_id.to_string(),
                record.display_name.clone(),
                record.team.clone(),
                record.position.clone(),
                format_score(row.score),
            ];
            fields.extend(TABLE_STATS.iter().map(|c| format_stat(line.get(*c))));
            fields.push(format_stat(line.minutes));
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "Showing 11-20 of 53 players (page 2/6)"
pub fn format_page_footer<T>(page: &Page<T>) -> String {
    if page.items.is_empty() {
        return format!("Showing 0 of {} players", page.total_items);
    }
    format!(
        "Showing {}-{} of {} players (page {}/{})",
        page.first_index(),
        page.last_index(),
        page.total_items,
        page.page,
        page.total_pages
    )
}

/// One line per category: label, key, weight. Zero weights are dimmed.
pub fn format_weights(weights: &ScoringWeights, use_colors: bool) -> String {
    weights
        .iter()
        .map(|(category, weight)| {
            let label = pad(category.label(), 24);
            let key = pad(category.key(), 22);
            let value = format!("{:>6}", weight);
            if !use_colors {
                format!("{}{}{}", label, key, value)
            } else if weight == 0.0 {
                format!("{}{}{}", label.dimmed(), key.dimmed(), value.dimmed())
            } else if weight < 0.0 {
                format!("{}{}{}", label, key.dimmed(), value.red())
            } else {
                format!("{}{}{}", label, key.dimmed(), value.green())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Itemized score: "Points   25.0 x 1.0 = 25.00"
pub fn format_breakdown(breakdown: &ScoreBreakdown) -> String {
    let mut lines: Vec<String> = breakdown
        .contributions
        .iter()
        .map(|c| {
            format!(
                "{} {:>6} x {:>5} = {:>7}",
                pad(c.category.label(), 22),
                format_stat(c.stat),
                c.weight,
                format_score(c.points)
            )
        })
        .collect();
    lines.push(format!("{} {:>26}", pad("Total", 22), format_score(breakdown.score)));
    lines.join("\n")
}

/// Model list with availability as reported by the API.
pub fn format_models(available: &AvailableModels, default_model: ModelType, use_colors: bool) -> String {
    ModelType::ALL
        .iter()
        .map(|model| {
            let marker = if *model == default_model { "*" } else { " " };
            let status = match available.get(model.slug()) {
                Some(entry) if entry.available => "available",
                Some(_) => "missing",
                None => "unknown",
            };
            let name = pad(model.slug(), 18);
            let display = pad(model.display_name(), 28);
            if use_colors {
                let status = if status == "available" {
                    status.green().to_string()
                } else {
                    status.red().to_string()
                };
                format!("{} {}{}{}", marker, name.bold(), display, status)
            } else {
                format!("{} {}{}{}", marker, name, display, status)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Position counts and per-position averages.
pub fn format_position_summary(
    breakdown: &BTreeMap<String, usize>,
    averages: &BTreeMap<String, PositionAverages>,
) -> String {
    let mut lines = vec![format!(
        "{} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
        pad("Position", POSITION_WIDTH),
        "Players",
        "PTS",
        "REB",
        "AST",
        "STL",
        "BLK"
    )];
    for (position, count) in breakdown {
        let name = if position.is_empty() { "(none)" } else { position.as_str() };
        match averages.get(position) {
            Some(avg) => lines.push(format!(
                "{} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
                pad(name, POSITION_WIDTH),
                count,
                format_stat(avg.avg_points),
                format_stat(avg.avg_rebounds),
                format_stat(avg.avg_assists),
                format_stat(avg.avg_steals),
                format_stat(avg.avg_blocks)
            )),
            None => lines.push(format!("{} {:>7}", pad(name, POSITION_WIDTH), count)),
        }
    }
    lines.join("\n")
}

/// Season-by-season career table.
pub fn format_history(history: &PlayerHistory) -> String {
    if history.history.is_empty() {
        return format!("No history for player {}.", history.player_id);
    }
    let opt = |v: Option<f64>| v.map(format_stat).unwrap_or_else(|| "-".to_string());

    let mut lines = vec![format!(
        "{} {} {:>5} {:>7} {:>7} {:>6} {:>6} {:>5} {:>5} {:>5}",
        pad("Season", 9),
        pad("Team", TEAM_WIDTH),
        "GP",
        "MIN",
        "PTS",
        "REB",
        "AST",
        "STL",
        "BLK",
        "TOV"
    )];
    for season in &history.history {
        lines.push(format!(
            "{} {} {:>5} {:>7} {:>7} {:>6} {:>6} {:>5} {:>5} {:>5}",
            pad(season.season_id.as_deref().unwrap_or("-"), 9),
            pad(season.team.as_deref().unwrap_or("-"), TEAM_WIDTH),
            season
                .games_played
                .map(|g| format!("{:.0}", g))
                .unwrap_or_else(|| "-".to_string()),
            opt(season.minutes),
            opt(season.points),
            opt(season.rebounds),
            opt(season.assists),
            opt(season.steals),
            opt(season.blocks),
            opt(season.turnovers)
        ));
    }
    lines.join("\n")
}

/// Per-model averages, one block per category.
pub fn format_model_comparison(results: &[(StatCategory, ModelComparison)]) -> String {
    results
        .iter()
        .map(|(category, comparison)| {
            let mut lines = vec![format!("{}:", category.label())];
            for model in ModelType::ALL {
                let value = comparison
                    .get(model.slug())
                    .copied()
                    .flatten()
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "n/a".to_string());
                lines.push(format!("  {} {:>8}", pad(model.display_name(), 28), value));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
