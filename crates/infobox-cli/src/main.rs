use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use infobox_cli::{apply, inspect, logging, summarize, ApplyOptions, Overrides};
use infobox_template::MUNICIPALITY_TEMPLATE;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("infobox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reference-safe batch updates of municipality infoboxes")
        .subcommand_required(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter, e.g. debug or infobox_core=trace (default: RUST_LOG, then info)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply entity records to a directory of articles")
                .arg(
                    Arg::new("documents")
                        .long("documents")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory of <title>.wiki files"),
                )
                .arg(
                    Arg::new("records")
                        .long("records")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of entity records"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML session configuration"),
                )
                .arg(
                    Arg::new("history")
                        .long("history")
                        .value_parser(value_parser!(PathBuf))
                        .help("History ledger to record this session in"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Compute edits without writing documents"),
                )
                .arg(
                    Arg::new("relocate-shared-citations")
                        .long("relocate-shared-citations")
                        .action(ArgAction::SetTrue)
                        .help("Move overwritten shared citation bodies to their first reuse"),
                )
                .arg(Arg::new("state").long("state").help("Default state, acronym or name"))
                .arg(Arg::new("summary").long("summary").help("Edit summary"))
                .arg(Arg::new("operator").long("operator").help("Operator name for the history ledger"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the parsed infobox of one article")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Article file"),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .default_value(MUNICIPALITY_TEMPLATE)
                        .help("Template name"),
                ),
        )
}

fn run_apply(args: &ArgMatches) -> anyhow::Result<i32> {
    let path = |name: &str| args.get_one::<PathBuf>(name).cloned();
    let text = |name: &str| args.get_one::<String>(name).cloned();

    let options = ApplyOptions {
        documents: path("documents").context("--documents is required")?,
        records: path("records").context("--records is required")?,
        config: path("config"),
        history: path("history"),
        overrides: Overrides {
            dry_run: args.get_flag("dry-run"),
            state: text("state"),
            summary: text("summary"),
            operator: text("operator"),
            relocate_shared_citations: args.get_flag("relocate-shared-citations"),
        },
    };

    let report = apply(&options)?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summarize(&report));
    }
    Ok(i32::from(report.failed() > 0))
}

fn run_inspect(args: &ArgMatches) -> anyhow::Result<i32> {
    let file = args.get_one::<PathBuf>("file").context("file is required")?;
    let template = args
        .get_one::<String>("template")
        .map_or(MUNICIPALITY_TEMPLATE, String::as_str);
    let document = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    print!("{}", inspect(&document, template)?);
    Ok(0)
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    logging::init(
        matches.get_one::<String>("log-level").map(String::as_str),
        matches.get_flag("json-logs"),
    )?;

    let code = match matches.subcommand() {
        Some(("apply", args)) => run_apply(args)?,
        Some(("inspect", args)) => run_inspect(args)?,
        _ => 2,
    };
    std::process::exit(code);
}
