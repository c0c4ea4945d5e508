use clap::{Arg, Command};

pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_ME: &str = "me";
pub const CMD_RESET_REQUEST: &str = "reset-request";
pub const CMD_RESET_CONFIRM: &str = "reset-confirm";
pub const CMD_RESET_CANCEL: &str = "reset-cancel";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_NEW_PASSWORD: &str = "new-password";
pub const ARG_OTP: &str = "otp";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .help("Account email address")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("GREENAUDIT_PASSWORD")
        .required(true)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create a new account")
                .arg(email_arg())
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_CONFIRM_PASSWORD)
                        .long(ARG_CONFIRM_PASSWORD)
                        .help("Password confirmation (defaults to --password)")
                        .env("GREENAUDIT_CONFIRM_PASSWORD"),
                ),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Log in and persist the session locally")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_LOGOUT)
                .about("Clear the local session and notify the server"),
        )
        .subcommand(Command::new(CMD_ME).about("Show the current user profile"))
        .subcommand(
            Command::new(CMD_RESET_REQUEST)
                .about("Request a password-reset OTP by email")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new(CMD_RESET_CONFIRM)
                .about("Complete a pending password reset with the emailed OTP")
                .arg(
                    Arg::new(ARG_OTP)
                        .long(ARG_OTP)
                        .help("Six-digit OTP from the reset email")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_NEW_PASSWORD)
                        .long(ARG_NEW_PASSWORD)
                        .help("New account password")
                        .env("GREENAUDIT_NEW_PASSWORD")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_CONFIRM_PASSWORD)
                        .long(ARG_CONFIRM_PASSWORD)
                        .help("New password confirmation (defaults to --new-password)")
                        .env("GREENAUDIT_CONFIRM_PASSWORD"),
                ),
        )
        .subcommand(
            Command::new(CMD_RESET_CANCEL).about("Abandon a pending password reset"),
        )
}
