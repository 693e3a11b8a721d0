pub mod commands;
pub mod handlers;

pub use commands::command_argument_builder;
pub use handlers::{
    CheckSettings, SourceSettings, build_check_options, check_settings_from_matches,
    describe_page, expand_path, load_known_bad, normalize_file, run_check,
};
