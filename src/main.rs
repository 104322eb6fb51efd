use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process;

use royalty_ledger::{build_ledger, telemetry, AuthorId, LedgerEngine, ServerConfig};

const USAGE: &str = "\
Usage: royalty-ledger [report] [--seed FILE] [--sales CSV]
       royalty-ledger sales <author_id> [--seed FILE] [--sales CSV]";

#[derive(Debug, PartialEq)]
enum Command {
    Report,
    Sales(AuthorId),
}

fn main() -> Result<()> {
    telemetry::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, config) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            process::exit(2);
        }
    };

    let ledger = build_ledger(&config)?;

    match command {
        Command::Report => run_report(&ledger),
        Command::Sales(author_id) => run_sales(&ledger, author_id),
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<(Command, ServerConfig)> {
    let mut config = ServerConfig::from_env()?;
    let mut command = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let path = iter.next().context("--seed needs a file path")?;
                config.seed_file = Some(PathBuf::from(path));
            }
            "--sales" => {
                let path = iter.next().context("--sales needs a CSV path")?;
                config.sales_csv = Some(PathBuf::from(path));
            }
            "report" if command.is_none() => command = Some(Command::Report),
            "sales" if command.is_none() => {
                let raw = iter.next().context("sales needs an author id")?;
                let author_id = raw
                    .parse()
                    .with_context(|| format!("Invalid author id: {:?}", raw))?;
                command = Some(Command::Sales(author_id));
            }
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok((command.unwrap_or(Command::Report), config))
}

fn run_report(ledger: &LedgerEngine) {
    println!("{:<4} {:<24} {:>12} {:>12}", "ID", "AUTHOR", "EARNINGS", "BALANCE");
    println!("{}", "─".repeat(55));

    for summary in ledger.list_authors_with_finances() {
        println!(
            "{:<4} {:<24} {:>12} {:>12}",
            summary.id,
            summary.name,
            format!("₹{}", summary.finances.total_earnings),
            format!("₹{}", summary.finances.current_balance),
        );
    }
}

fn run_sales(ledger: &LedgerEngine, author_id: AuthorId) {
    let author = match ledger.require_author(author_id) {
        Ok(author) => author,
        Err(err) => {
            eprintln!("{} (id {})", err, author_id);
            process::exit(1);
        }
    };

    println!("Sales for {} (newest first)", author.name);
    println!("{}", "─".repeat(55));

    for line in ledger.author_sales(author_id) {
        println!(
            "{}  {:<24} {:>5} units  ₹{}",
            line.sale_date, line.book_title, line.quantity, line.royalty_earned
        );
    }
}
