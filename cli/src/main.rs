//! Interactive shell over a single order book.
//!
//! Each input line is tokenized and re-parsed as a clap command, so the
//! grammar, validation and help text all come from one place. Trades are
//! printed as they happen via the book's trade listener.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use matchbook_rs::prelude::*;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "matchbook-cli",
    about = "Order book shell",
    no_binary_name = true,
    disable_version_flag = true
)]
struct Shell {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "snake_case")]
enum Action {
    /// Add a new order
    AddOrder {
        /// Order side: 'buy' or 'sell'
        #[arg(value_enum)]
        side: SideArg,
        /// Order volume
        volume: u64,
        /// Order price
        price: f64,
    },
    /// Modify an order (cancel-then-add; issues a fresh id)
    ModifyOrder {
        /// Order id
        id: u64,
        /// New order volume
        volume: u64,
        /// New order price
        price: f64,
    },
    /// Delete an order
    DeleteOrder {
        /// Order id
        id: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => Side::Bid,
            SideArg::Sell => Side::Ask,
        }
    }
}

fn dispatch(book: &mut OrderBook, action: Action) {
    match action {
        Action::AddOrder { side, volume, price } => {
            match book.add_order(side.into(), price, volume) {
                Ok(id) => println!("order accepted id={id}"),
                Err(error) => println!("order rejected: {error}"),
            }
        }
        Action::ModifyOrder { id, volume, price } => match book.modify_order(id, price, volume) {
            Some(new_id) => println!("order {id} replaced by id={new_id}"),
            None => println!("modify_order failed for id={id}"),
        },
        Action::DeleteOrder { id } => {
            if book.delete_order(id) {
                println!("order {id} deleted");
            } else {
                println!("delete_order failed for id={id}");
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut book = OrderBook::new("SHELL");
    book.set_trade_listener(Arc::new(|trade: &Trade| println!("{trade}")));

    println!("Welcome to the order book shell. Type 'help' for commands or 'quit' to exit.");
    let stdin = io::stdin();
    loop {
        print!(">> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "help" || line == "-h" || line == "--help" {
            let _ = Shell::command().print_help();
            continue;
        }

        debug!("parsing command line: {}", line);
        let tokens = line.split_whitespace();
        match Shell::try_parse_from(tokens) {
            Ok(shell) => dispatch(&mut book, shell.action),
            Err(error) => {
                let _ = error.print();
            }
        }
    }
}
