use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::assessment::{AssessmentRecord, AssessmentSummary, ReadinessLevel};
use crate::markets::{market_name, MARKETS};
use crate::scoring::{explain_dimension, Dimension, MarketFitResult, Priority, ScoreBreakdown};

const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fixed-width bar, one block per 5 points
fn score_bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn paint_score(text: &str, score: u8) -> String {
    match ReadinessLevel::from_score(score) {
        ReadinessLevel::HighlyPrepared => text.green().to_string(),
        ReadinessLevel::WellPrepared => text.cyan().to_string(),
        ReadinessLevel::Moderate => text.yellow().to_string(),
        ReadinessLevel::NeedsStrengthening => text.red().to_string(),
    }
}

fn paint_priority(priority: Priority) -> String {
    match priority {
        Priority::High => priority.label().red().bold().to_string(),
        Priority::Medium => priority.label().yellow().to_string(),
        Priority::Low => priority.label().green().to_string(),
    }
}

fn format_header(record: &AssessmentRecord, use_colors: bool) -> String {
    let level = record.readiness();
    let company = if record.contact.company_name.is_empty() {
        "Unnamed company"
    } else {
        record.contact.company_name.as_str()
    };
    let total = format!("{}/100", record.total_score);

    if use_colors {
        format!(
            "{}\nReadiness score: {}  {}\nAssessment {}",
            company.bold(),
            paint_score(&total, record.total_score).bold(),
            level,
            record.id.to_string().dimmed()
        )
    } else {
        format!(
            "{}\nReadiness score: {}  {}\nAssessment {}",
            company, total, level, record.id
        )
    }
}

/// One line per dimension: label, bar, score
pub fn format_dimensions(record: &AssessmentRecord, use_colors: bool) -> String {
    record
        .scores
        .iter()
        .map(|(dimension, score)| {
            let bar = score_bar(score);
            if use_colors {
                format!(
                    "  {:<21} {} {:>3}",
                    dimension.label(),
                    paint_score(&bar, score),
                    score.bold()
                )
            } else {
                format!("  {:<21} {} {:>3}", dimension.label(), bar, score)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-factor arithmetic for one dimension (verbose mode)
fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(breakdown.factors.len() + 1);
    let heading = format!("{} = {}", breakdown.dimension.label(), breakdown.score);
    lines.push(if use_colors {
        format!("  {}", heading.bold())
    } else {
        format!("  {}", heading)
    });

    for factor in &breakdown.factors {
        let delta = factor.after - factor.before;
        lines.push(format!(
            "    {:<24} {:+7.2}  -> {:6.2}  {}",
            factor.label, delta, factor.after, factor.description
        ));
    }
    lines.join("\n")
}

/// Format ranked markets, one per line.
/// Selected markets are marked with `*`; highlights are truncated to the terminal.
pub fn format_market_table(fits: &[MarketFitResult], use_colors: bool) -> String {
    if fits.is_empty() {
        return "No markets ranked.".to_string();
    }

    let term_width = get_terminal_width();
    let name_width = fits
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);

    fits.iter()
        .enumerate()
        .map(|(idx, fit)| {
            let index_str = format!("{:>2}.", idx + 1);
            let marker = if fit.selected { "*" } else { " " };
            let name = format!("{:<width$}", fit.name, width = name_width);
            // index + marker + flag + name + score + separators
            let fixed_width = 3 + 2 + 3 + name_width + 4 + 2 * 2;

            let highlights = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&fit.highlights, width - fixed_width)
                }
                Some(_) => truncate_text(&fit.highlights, 20),
                None => fit.highlights.clone(),
            };

            if use_colors {
                format!(
                    "{} {} {} {}  {:>3}  {}",
                    index_str.dimmed(),
                    marker.bold(),
                    fit.flag,
                    if fit.selected {
                        name.bold().to_string()
                    } else {
                        name
                    },
                    paint_score(&fit.score.to_string(), fit.score),
                    highlights.dimmed()
                )
            } else {
                format!(
                    "{} {} {} {}  {:>3}  {}",
                    index_str, marker, fit.flag, name, fit.score, highlights
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_recommendations(record: &AssessmentRecord, use_colors: bool) -> String {
    if record.recommendations.is_empty() {
        return "  No recommendations.".to_string();
    }

    record
        .recommendations
        .iter()
        .map(|rec| {
            let priority = if use_colors {
                paint_priority(rec.priority)
            } else {
                rec.priority.label().to_string()
            };
            let title = if use_colors {
                rec.title.bold().to_string()
            } else {
                rec.title.clone()
            };
            let mut lines = vec![
                format!("  {} [{}] {}", rec.icon, priority, title),
                format!("     {}", rec.description),
            ];
            lines.extend(rec.action_items.iter().map(|item| format!("     - {}", item)));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn section(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().underline().to_string()
    } else {
        title.to_string()
    }
}

/// Full text report for one assessment.
///
/// With `verbose`, each dimension's factor arithmetic follows the score rows.
pub fn format_report(record: &AssessmentRecord, verbose: bool, use_colors: bool) -> String {
    let mut parts = vec![
        format_header(record, use_colors),
        format!("{}\n{}", section("Dimensions", use_colors), format_dimensions(record, use_colors)),
    ];

    if verbose {
        let breakdowns = Dimension::ALL
            .iter()
            .map(|d| format_breakdown(&explain_dimension(&record.responses, *d), use_colors))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("{}\n{}", section("Breakdown", use_colors), breakdowns));
    }

    parts.push(format!(
        "{}\n{}",
        section("Markets", use_colors),
        format_market_table(&record.market_fit, use_colors)
    ));
    parts.push(format!(
        "{}\n{}",
        section("Recommendations", use_colors),
        format_recommendations(record, use_colors)
    ));

    parts.join("\n\n")
}

/// Format the market ranking as tab-separated values for scripting
/// Columns: score, key, name, selected (no headers, no colors)
pub fn format_tsv(fits: &[MarketFitResult]) -> String {
    fits.iter()
        .map(|fit| format!("{}\t{}\t{}\t{}", fit.score, fit.key, fit.name, fit.selected))
        .collect::<Vec<_>>()
        .join("\n")
}

const CSV_HEADERS: [&str; 8] = [
    "Date", "Company", "Contact", "Email", "Phone", "Position", "Score", "Markets",
];

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Format assessments as a lead export with a header row.
/// Every cell is quoted; embedded quotes are doubled.
pub fn format_csv(records: &[AssessmentRecord]) -> String {
    let mut lines = vec![CSV_HEADERS.iter().map(|h| csv_cell(h)).collect::<Vec<_>>().join(",")];
    for record in records {
        let contact = &record.contact;
        let markets = record
            .selected_markets
            .iter()
            .map(|key| market_name(key))
            .collect::<Vec<_>>()
            .join(", ");
        let row = [
            record.created_at.format("%Y-%m-%d").to_string(),
            contact.company_name.clone(),
            contact.contact_name.clone(),
            contact.company_email.clone(),
            contact.contact_phone.clone(),
            contact.contact_position.clone(),
            record.total_score.to_string(),
            markets,
        ];
        lines.push(row.iter().map(|cell| csv_cell(cell)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

/// Format the static market catalog
pub fn format_catalog(use_colors: bool) -> String {
    MARKETS
        .iter()
        .map(|m| {
            let attrs = format!(
                "size {}  complexity {}  digital {}",
                m.size, m.complexity, m.digital
            );
            if use_colors {
                format!(
                    "{} {:<12} {:<18} {}\n   {}",
                    m.flag,
                    m.key.cyan(),
                    m.name.bold(),
                    attrs,
                    m.highlights.dimmed()
                )
            } else {
                format!("{} {:<12} {:<18} {}\n   {}", m.flag, m.key, m.name, attrs, m.highlights)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format stored assessments as one line each
/// Format: "{score} | {company} | {contact} | {age} | {id}"
pub fn format_summaries(summaries: &[AssessmentSummary], now: DateTime<Utc>, use_colors: bool) -> String {
    if summaries.is_empty() {
        return "No assessments found.".to_string();
    }

    summaries
        .iter()
        .map(|s| {
            let score = format!("{:>3}", s.total_score);
            let age = format_age(now - s.created_at);
            if use_colors {
                format!(
                    "{} | {} | {} | {} | {}",
                    paint_score(&score, s.total_score).bold(),
                    s.company_name.bold(),
                    s.contact_name.yellow(),
                    age,
                    s.id.to_string().dimmed()
                )
            } else {
                format!(
                    "{} | {} | {} | {} | {}",
                    score, s.company_name, s.contact_name, age, s.id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
