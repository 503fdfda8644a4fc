// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Emit pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Emit one JSON object per line"),
    )
}

fn today_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("today")
            .long("today")
            .value_name("YYYY-MM-DD")
            .help("Compute as of this date instead of the system date"),
    )
}

fn month_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .value_name("YYYY-MM")
            .help("Month to report on (defaults to the current month)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("plana")
        .about("Personal and couples finance: accounts, bills, debt payoff, goals, trips")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("checking|savings|credit|cash|investment|crypto|loan|other"),
                        )
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(
                            Arg::new("ownership")
                                .long("ownership")
                                .help("member-a|member-b|joint"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts with resolved balances").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include archived accounts"),
                    ),
                ))
                .subcommand(
                    Command::new("archive")
                        .about("Archive (or restore) an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("restore")
                                .long("restore")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Signed amount: income positive, expense negative"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense|transfer"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("paid-by")
                                .long("paid-by")
                                .help("member-a|member-b, for couples splitting"),
                        )
                        .arg(Arg::new("trip").long("trip").help("Trip name to tag")),
                )
                .subcommand(json_flags(month_arg(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category")),
                ))),
        )
        .subcommand(
            Command::new("bill")
                .about("Manage recurring bills and subscriptions")
                .subcommand(
                    Command::new("add")
                        .about("Add a recurring bill")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("cadence")
                                .long("cadence")
                                .required(true)
                                .help("weekly|monthly|yearly"),
                        )
                        .arg(
                            Arg::new("due")
                                .long("due")
                                .required(true)
                                .help("Weekday 1-7 (weekly), day 1-31 (monthly), month 1-12 (yearly)"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("account").long("account").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List bills with monthly equivalents").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include cancelled bills"),
                    ),
                ))
                .subcommand(
                    Command::new("cancel")
                        .about("Cancel a bill (soft delete, history kept)")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("on").long("on").help("Cancellation date")),
                )
                .subcommand(json_flags(today_arg(
                    Command::new("upcoming").about("Bills due soonest, with next due dates"),
                ))),
        )
        .subcommand(
            Command::new("debt")
                .about("Track debts and payoff plans")
                .subcommand(
                    Command::new("add")
                        .about("Add a debt")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").required(true))
                        .arg(Arg::new("apr").long("apr").required(true))
                        .arg(Arg::new("minimum").long("minimum").required(true))
                        .arg(Arg::new("due-day").long("due-day").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(
                            Arg::new("strategy")
                                .long("strategy")
                                .help("snowball|avalanche override for this debt"),
                        ),
                )
                .subcommand(json_flags(today_arg(
                    Command::new("list").about("List debts with next payment dates"),
                )))
                .subcommand(json_flags(
                    Command::new("plan")
                        .about("Simulate the payoff order and timelines")
                        .arg(
                            Arg::new("strategy")
                                .long("strategy")
                                .help("snowball|avalanche (defaults to the configured strategy)"),
                        )
                        .arg(
                            Arg::new("horizon")
                                .long("horizon")
                                .value_parser(clap::value_parser!(u32))
                                .help("Simulation cap in months (default 60)"),
                        ),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("current").long("current").default_value("0"))
                        .arg(Arg::new("due").long("due").help("Target date"))
                        .arg(
                            Arg::new("shared")
                                .long("shared")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(today_arg(
                    Command::new("list").about("List goals with progress"),
                )))
                .subcommand(
                    Command::new("contribute")
                        .about("Add to a goal's saved amount")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set a category budget for a month")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(month_arg(
                    Command::new("status").about("Budget vs. actual spend, with overspends"),
                ))),
        )
        .subcommand(
            Command::new("couples")
                .about("Shared-finance mode for two members")
                .subcommand(
                    Command::new("setup")
                        .about("Enable and configure couples mode")
                        .arg(
                            Arg::new("disable")
                                .long("disable")
                                .action(ArgAction::SetTrue)
                                .help("Turn couples mode off"),
                        )
                        .arg(
                            Arg::new("fun-money")
                                .long("fun-money")
                                .help("Monthly discretionary allowance per member"),
                        )
                        .arg(
                            Arg::new("threshold")
                                .long("threshold")
                                .help("Joint-spending discussion threshold"),
                        )
                        .arg(
                            Arg::new("check-in")
                                .long("check-in")
                                .help("weekly|biweekly|monthly"),
                        ),
                )
                .subcommand(json_flags(today_arg(
                    Command::new("status").about("Couples settings and check-in state"),
                )))
                .subcommand(json_flags(month_arg(
                    Command::new("settle").about("Split the month's joint expenses"),
                )))
                .subcommand(json_flags(month_arg(
                    Command::new("fun-money")
                        .about("Fun money remaining for a member")
                        .arg(Arg::new("member").long("member").required(true)),
                )))
                .subcommand(
                    Command::new("check-in")
                        .about("Record a couples check-in")
                        .arg(Arg::new("date").long("date").help("Defaults to today")),
                ),
        )
        .subcommand(
            Command::new("trip")
                .about("Trip planning and budgets")
                .subcommand(
                    Command::new("add")
                        .about("Add a trip")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("destination").long("destination").required(true))
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end").required(true))
                        .arg(Arg::new("budget").long("budget").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List trips")))
                .subcommand(
                    Command::new("plan-item")
                        .about("Add an itinerary item")
                        .arg(Arg::new("trip").long("trip").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("time").long("time").help("HH:MM"))
                        .arg(Arg::new("activity").long("activity").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("other")
                                .help("flight|stay|food|activity|transport|other"),
                        )
                        .arg(Arg::new("location").long("location"))
                        .arg(Arg::new("cost").long("cost")),
                )
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Trip spend vs. budget")
                        .arg(Arg::new("trip").long("trip").required(true)),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Derived financial reports")
                .subcommand(json_flags(Command::new("net-worth").about(
                    "Sum of resolved balances over non-archived accounts",
                )))
                .subcommand(json_flags(today_arg(Command::new("safe-to-spend").about(
                    "Checking cash minus bills still due this month",
                ))))
                .subcommand(json_flags(month_arg(
                    Command::new("cashflow").about("Income, expenses, and bills for a month"),
                )))
                .subcommand(json_flags(today_arg(
                    Command::new("projection").about("Rough projection for next month"),
                ))),
        )
        .subcommand(
            Command::new("doctor").about("Audit the ledger for inconsistencies"),
        )
}
