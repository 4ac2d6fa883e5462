// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const KINDS: [&str; 2] = ["income", "expense"];

fn output_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn month_arg(required: bool, help: &'static str) -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .required(required)
        .help(help)
}

fn id_arg(what: &'static str) -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(what)
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Track income, expenses and monthly estimates; compare estimated vs actual spend")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("SPENDWISE_DB")
                .value_name("PATH")
                .help("SQLite database file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database if needed and print its path"))
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(estimate_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(config_cmd())
        .subcommand(
            Command::new("doctor").about("Look for dangling categories and suspicious records"),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("list").about("List categories").args(output_flags()))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse income/expense transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction (dated to the first of its month)")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(KINDS),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .value_name("YYYY-MM[-DD]"),
                )
                .arg(Arg::new("category").long("category").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a transaction")
                .arg(id_arg("Transaction id"))
                .arg(Arg::new("type").long("type").value_parser(KINDS))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM[-DD]"))
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(id_arg("Transaction id")),
        )
        .subcommand(
            Command::new("list")
                .about("List transactions")
                .arg(month_arg(false, "Only this month"))
                .arg(Arg::new("type").long("type").value_parser(KINDS))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(output_flags()),
        )
}

fn estimate_cmd() -> Command {
    Command::new("estimate")
        .about("Manage monthly estimated expenses")
        .subcommand(
            Command::new("add")
                .about("Add an estimate; repeated estimates for one month and category add up")
                .arg(month_arg(true, "Month the estimate applies to"))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of an estimate")
                .arg(id_arg("Estimate id"))
                .arg(month_arg(false, "New month"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("amount").long("amount")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an estimate")
                .arg(id_arg("Estimate id")),
        )
        .subcommand(
            Command::new("list")
                .about("List estimates")
                .arg(month_arg(false, "Only this month"))
                .arg(Arg::new("category").long("category"))
                .args(output_flags()),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries, comparisons and monthly reports")
        .subcommand(
            Command::new("summary")
                .about("Income, expenses and estimated totals for a month")
                .arg(month_arg(false, "Month to summarize (default: current month)"))
                .args(output_flags()),
        )
        .subcommand(
            Command::new("compare")
                .about("Estimated vs actual expenses per month")
                .arg(month_arg(false, "Only this month (default: all months)"))
                .args(output_flags()),
        )
        .subcommand(
            Command::new("spending")
                .about("Expenses by category")
                .arg(month_arg(false, "Only this month (default: all months)"))
                .args(output_flags()),
        )
        .subcommand(
            Command::new("months")
                .about("Months that have data")
                .arg(
                    Arg::new("estimates")
                        .long("estimates")
                        .action(ArgAction::SetTrue)
                        .help("Look at estimates instead of transactions"),
                )
                .args(output_flags()),
        )
        .subcommand(
            Command::new("month")
                .about("Full text report for one month")
                .arg(month_arg(true, "Month to report"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("FILE")
                        .help("Write the report to FILE instead of stdout"),
                ),
        )
}

fn export_cmd() -> Command {
    let target = |name: &'static str, about: &'static str| {
        Command::new(name)
            .about(about)
            .arg(Arg::new("format").long("format").required(true).help("csv|json"))
            .arg(Arg::new("out").long("out").required(true).value_name("FILE"))
    };
    Command::new("export")
        .about("Export records to CSV or JSON")
        .subcommand(target("transactions", "Export all transactions"))
        .subcommand(target("estimates", "Export all estimates"))
}

fn config_cmd() -> Command {
    let key = || {
        Arg::new("key")
            .required(true)
            .value_parser(["currency-symbol"])
    };
    Command::new("config")
        .about("Read or change settings")
        .subcommand(Command::new("get").about("Show a setting").arg(key()))
        .subcommand(
            Command::new("set")
                .about("Change a setting")
                .arg(key())
                .arg(Arg::new("value").required(true)),
        )
}
