use clap::{Arg, Command};
use const_format::formatcp;

const ABOUT: &str = formatcp!(
    "Manage the shared book list (hylla {})",
    env!("CARGO_PKG_VERSION")
);

pub fn arg_parser_repl() -> Command {
    Command::new("hylla")
        .about(ABOUT)
        .multicall(true)
        .subcommand_required(true)
        .subcommand(Command::new("list").about("Show the book list"))
        .subcommand(Command::new("add").about("Add a new book"))
        .subcommand(
            Command::new("edit")
                .about("Edit an existing book")
                .arg(Arg::new("isbn").required(true)),
        )
        .subcommand(
            Command::new("remove")
                .about("Delete a book")
                .arg(Arg::new("isbn").required(true)),
        )
        .subcommand(Command::new("cancel").about("Abandon the edit in progress"))
        .subcommand(Command::new("refresh").about("Re-fetch the list from the server"))
        .subcommand(Command::new("exit").about("Leave the repl"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser_repl().subcommand(Command::new("repl").about("Launch a read eval print loop"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser_repl();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!(
            "{parent_fn_name} {cmd_name}",
            parent_fn_name = parent_fn_name,
            cmd_name = cmd.get_name()
        )
        .trim()
        .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}
