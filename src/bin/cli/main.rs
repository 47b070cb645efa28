use std::{env, process::exit};

use anyhow::Result;

use dotenvy::dotenv;
use inquire::{validator::Validation, CustomUserError};
use reedline::Signal;

mod command_parser;
mod prompt;
mod repl;

use hylla::{
    api::HttpApi,
    config::Config,
    store::LoadState,
    sync::SyncController,
    traits::ConfirmPrompt,
};

struct InquireConfirm;

impl ConfirmPrompt for InquireConfirm {
    fn confirm_delete(&self, isbn: &str, title: &str) -> Result<bool> {
        Ok(inquire::Confirm::new(&format!("Delete \"{title}\" ({isbn})?"))
            .with_default(false)
            .prompt()?)
    }
}

type Controller = SyncController<HttpApi, InquireConfirm>;

fn validator_non_empty(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        return Ok(Validation::Invalid(
            inquire::validator::ErrorMessage::Custom("Empty string not allowed".to_string()),
        ));
    }
    Ok(Validation::Valid)
}

fn prompt_field(prompt: &str, initial_value: Option<&str>) -> Result<String> {
    let mut prompt = inquire::Text::new(prompt).with_validator(validator_non_empty);
    if let Some(initial_value) = initial_value {
        prompt = prompt.with_initial_value(initial_value);
    }
    Ok(prompt.prompt()?)
}

fn print_status(controller: &Controller, config: &Config) {
    if let Some(status) = controller.status.current() {
        println!("{}", status.styled(config));
    }
}

fn print_collection(controller: &Controller, config: &Config) {
    match controller.store.state() {
        LoadState::Loading => println!("Loading..."),
        LoadState::Failed => {
            if let Some(error) = controller.store.error() {
                println!("{}", config.output_error.format(error));
            }
            // whatever was last loaded successfully stays visible
            for book in controller.store.books() {
                println!("{}", book.styled(config));
            }
        }
        LoadState::Ready => {
            if controller.store.books().is_empty() {
                println!("No books yet.");
            }
            for book in controller.store.books() {
                println!("{}", book.styled(config));
            }
        }
    }
}

async fn handle_command(
    command: String,
    controller: &mut Controller,
    config: &Config,
) -> Result<()> {
    let args = command_parser::arg_parser_repl();
    let command = shlex::split(&command);
    if command.is_none() {
        anyhow::bail!("Invalid command");
    }
    let command = command.unwrap();
    let matches = args.try_get_matches_from(command);
    if let Err(e) = matches {
        anyhow::bail!(e);
    }
    let matches = matches.unwrap();
    match matches.subcommand() {
        Some(("list", _matches)) => {
            print_collection(controller, config);
        }
        Some(("add", _matches)) => {
            controller.session.start_create();
            controller.session.isbn = prompt_field("ISBN:", None)?;
            controller.session.title = prompt_field("Title:", None)?;
            controller.session.author = prompt_field("Author:", None)?;
            controller.submit().await;
            print_status(controller, config);
            print_collection(controller, config);
        }
        Some(("edit", _matches)) => {
            let isbn: &String = _matches.get_one("isbn").expect("argument required");
            let record = match controller.store.find(isbn) {
                Some(record) => record.clone(),
                None => anyhow::bail!("No book with isbn {isbn} in the current list"),
            };
            controller.edit(&record);
            print_status(controller, config);
            controller.session.isbn = prompt_field("ISBN:", Some(&record.isbn))?;
            controller.session.title = prompt_field("Title:", Some(&record.title))?;
            controller.session.author = prompt_field("Author:", Some(&record.author))?;
            controller.submit().await;
            print_status(controller, config);
            print_collection(controller, config);
        }
        Some(("remove", _matches)) => {
            let isbn: &String = _matches.get_one("isbn").expect("argument required");
            let record = match controller.store.find(isbn) {
                Some(record) => record.clone(),
                None => anyhow::bail!("No book with isbn {isbn} in the current list"),
            };
            controller.remove(&record.isbn, &record.title).await?;
            print_status(controller, config);
            print_collection(controller, config);
        }
        Some(("cancel", _matches)) => {
            controller.cancel();
            println!("Draft cleared.");
        }
        Some(("refresh", _matches)) => {
            controller.refresh().await;
            print_collection(controller, config);
        }
        Some(("exit", _matches)) => {
            exit(0);
        }
        Some((name, _matches)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    tracing_subscriber::fmt::init();

    let args_parsed = command_parser::arg_parser_cli().get_matches_from(env::args_os().skip(1));

    let config = Config::read_config()?;
    let api = HttpApi::new(config.api_base_url.clone());
    let mut controller = SyncController::new(api, InquireConfirm);

    // the mount fetch
    controller.load().await;

    if let Some(("repl", _)) = args_parsed.subcommand() {
        print_collection(&controller, &config);
        let mut repl = repl::Repl::new(command_parser::generate_completions());
        loop {
            match repl.read_line() {
                Ok(Signal::Success(buffer)) => {
                    match handle_command(buffer.clone(), &mut controller, &config).await {
                        Ok(_) => (),
                        Err(e) => println!("Error: {}", e),
                    };
                }
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                    println!("\nAborted!");
                    break;
                }
                x => {
                    println!("Event: {:?}", x);
                }
            }
        }
    } else {
        let args = env::args_os()
            .skip(1)
            .map(|x| x.into_string().expect("Invalid unicode in arguments"))
            .collect::<Vec<String>>()
            .join(" ");
        handle_command(args, &mut controller, &config).await?;
    }

    Ok(())
}
