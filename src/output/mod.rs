pub mod formatter;

pub use formatter::{
    format_age, format_catalog, format_csv, format_dimensions, format_market_table, format_report,
    format_summaries, format_tsv, should_use_colors,
};
