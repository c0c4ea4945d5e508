pub mod audit;
pub mod auth;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_DATA_DIR: &str = "data-dir";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_DATA_DIR: &str = ".greenaudit";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("greenaudit")
        .about("GreenAudit sustainability platform client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_BASE_URL)
                .short('u')
                .long(ARG_BASE_URL)
                .help("API base URL")
                .default_value(DEFAULT_BASE_URL)
                .env("GREENAUDIT_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_DATA_DIR)
                .long(ARG_DATA_DIR)
                .help("Directory holding the local session store")
                .default_value(DEFAULT_DATA_DIR)
                .env("GREENAUDIT_DATA_DIR")
                .global(true),
        );

    let command = auth::with_args(command);
    let command = audit::with_args(command);
    logging::with_args(command)
}
