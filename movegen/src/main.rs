use std::io;

use clap::Parser;
use movegen::{
    cli::{handle_command, split_ignore_quotes, Cli, Command, Session},
    lookup,
};

fn main() {
    let args = Cli::parse();
    lookup::init();
    let mut session = Session::default();

    match args.command {
        Command::Interactive => loop {
            let mut std_in = String::new();
            match io::stdin().read_line(&mut std_in) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    println!("Error: {err}");
                    break;
                }
            }

            let mut args = split_ignore_quotes(std_in.trim());
            if args.is_empty() {
                continue;
            }
            args.push_front("movegen".to_owned());
            match Cli::try_parse_from(args) {
                Ok(args) => match args.command {
                    Command::Exit => break,
                    cmd => handle_command(cmd, &mut session),
                },
                Err(err) => {
                    err.print()
                        .unwrap_or_else(|_| println!("Failed to display parsing error"));
                }
            }
        },
        cmd => handle_command(cmd, &mut session),
    };
}
