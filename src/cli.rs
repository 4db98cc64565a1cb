// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const PERIOD_HELP: &str = "Period: day|week|month|all (or harian|mingguan|bulanan|semua)";

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("period").long("period").help(PERIOD_HELP))
        .arg(
            Arg::new("date")
                .long("date")
                .help("Reference date YYYY-MM-DD (default: today in the configured timezone)"),
        )
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(required)
        .value_parser(["income", "expense"])
        .help("income or expense")
}

fn export_target(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .required(true)
            .help("csv or json"),
    )
    .arg(
        Arg::new("out")
            .long("out")
            .required(true)
            .help("Output file path"),
    )
}

pub fn build_cli() -> Command {
    Command::new("bukukas")
        .about("Buku Kas Umum: tournament cash book with period reports and receipts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("owner")
                .long("owner")
                .global(true)
                .help("Owner id to read and write records as (overrides `config set owner`)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true).help("timezone|owner|event"))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .help("Required when the category is 'lainnya'"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)")),
                )
                .subcommand(json_flags(period_args(
                    Command::new("list")
                        .arg(kind_arg(false))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))),
        )
        .subcommand(
            Command::new("category")
                .about("Suggested and used categories")
                .subcommand(Command::new("list").arg(kind_arg(false))),
        )
        .subcommand(
            Command::new("report")
                .about("Period reports")
                .subcommand(json_flags(period_args(
                    Command::new("summary").about("Totals and per-period buckets"),
                ))),
        )
        .subcommand(
            Command::new("receipt")
                .about("Registration receipts (kwitansi) and referee receipts")
                .subcommand(
                    Command::new("add")
                        .about("Team registration receipt; also records the income")
                        .arg(Arg::new("team").long("team").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("referee")
                        .about("Referee payment receipt (tanda terima wasit)")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["team", "referee"]),
                        ),
                ))
                .subcommand(Command::new("show").arg(Arg::new("number").required(true))),
        )
        .subcommand(
            Command::new("export")
                .about("Export to CSV or JSON")
                .subcommand(export_target(period_args(Command::new("transactions"))))
                .subcommand(export_target(period_args(Command::new("report")))),
        )
        .subcommand(
            Command::new("terbilang")
                .about("Spell an amount in Indonesian words")
                .arg(
                    Arg::new("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
