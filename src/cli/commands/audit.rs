use clap::{Arg, Command};

pub const CMD_AUDIT: &str = "audit";
pub const CMD_CREATE: &str = "create";
pub const CMD_GET: &str = "get";
pub const CMD_LIST: &str = "list";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";

pub const ARG_KIND: &str = "kind";
pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_PERIOD: &str = "period";
pub const ARG_DATA: &str = "data";

fn kind_arg() -> Arg {
    Arg::new(ARG_KIND)
        .short('k')
        .long(ARG_KIND)
        .help("Audit family: carbon, igbc or esg")
        .value_parser(["carbon", "igbc", "esg"])
        .required(true)
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("Audit record id").required(true)
}

fn data_arg() -> Arg {
    Arg::new(ARG_DATA)
        .long(ARG_DATA)
        .help("Audit data as a JSON object")
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.subcommand(
        Command::new(CMD_AUDIT)
            .about("Create, inspect and manage audit records")
            .subcommand_required(true)
            .subcommand(
                Command::new(CMD_CREATE)
                    .about("Create an audit record")
                    .arg(kind_arg())
                    .arg(
                        Arg::new(ARG_NAME)
                            .help("Facility, building or organization name")
                            .required(true),
                    )
                    .arg(
                        Arg::new(ARG_PERIOD)
                            .long(ARG_PERIOD)
                            .help("Audit period, e.g. 2025-Q1")
                            .required(true),
                    )
                    .arg(data_arg().default_value("{}")),
            )
            .subcommand(
                Command::new(CMD_GET)
                    .about("Fetch one audit record")
                    .arg(kind_arg())
                    .arg(id_arg()),
            )
            .subcommand(
                Command::new(CMD_LIST)
                    .about("List your audit records for one family")
                    .arg(kind_arg()),
            )
            .subcommand(
                Command::new(CMD_UPDATE)
                    .about("Replace the audit data of a record")
                    .arg(kind_arg())
                    .arg(id_arg())
                    .arg(data_arg().required(true)),
            )
            .subcommand(
                Command::new(CMD_DELETE)
                    .about("Delete an audit record")
                    .arg(kind_arg())
                    .arg(id_arg()),
            ),
    )
}
