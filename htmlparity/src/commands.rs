use clap::{ArgGroup, arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("htmlparity")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("htmlparity")
        .about("Checks locally rendered HTML pages against a reference HTML export")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and per-page output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log debug output to stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("check")
                .about(
                    "Walk every page under a root page, render it and compare it with the \
                reference export.",
                )
                .arg(
                    arg!(-r --"root" <PAGE_ID>)
                        .required(true)
                        .help("Id of the root page, dashed or not"),
                )
                .arg(
                    arg!(-u --"api-url" <URL>)
                        .required(false)
                        .help("Base URL of the page API")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"token" <TOKEN>)
                        .required(false)
                        .help("API token, sent as a bearer token")
                        .env("HTMLPARITY_TOKEN")
                        .hide_env_values(true),
                )
                .arg(
                    arg!(--"pages-dir" <PATH>)
                        .required(false)
                        .help("Read pages from <PATH>/<id>.json instead of the API")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .requires("export-dir"),
                )
                .arg(
                    arg!(--"export-dir" <PATH>)
                        .required(false)
                        .help("Directory holding an unpacked reference export")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .requires("pages-dir"),
                )
                .group(
                    ArgGroup::new("source")
                        .args(["api-url", "pages-dir"])
                        .required(true),
                )
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Working directory; mismatches are written to <PATH>/diff")
                        .default_value("~/.config/htmlparity/"),
                )
                .arg(
                    arg!(-k --"known-bad" <PATH>)
                        .required(false)
                        .help("File listing page ids that are allowed to mismatch")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"no-compat")
                        .required(false)
                        .help("Render without the reference exporter's quirks")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"no-dir-diff")
                        .required(false)
                        .help("Stop at the first mismatch even if a directory diff tool is installed")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                ),
        )
        .subcommand(
            command!("normalize")
                .about("Pretty-print an HTML file the way pages are normalized for comparison")
                .arg(
                    arg!(<FILE>)
                        .required(true)
                        .help("HTML file to normalize")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write to <PATH> instead of stdout")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
