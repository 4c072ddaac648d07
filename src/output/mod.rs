pub mod export;
pub mod formatter;

pub use export::{read_records, write_records, DEFAULT_CSV_PATH};
pub use formatter::{
    format_export_message, format_minutes, format_record_list, format_summary, should_use_colors,
};
