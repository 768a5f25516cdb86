//! Command-line interface for grove
//! Parses prerequisite descriptions and reports which catalog courses a student can take.
//!
//! Usage:
//!   grove parse `<text>` [--format tokens|tree|json] [--comma and|or]
//!   grove check `<catalog>` --completed `<file>` [--major `<major>`] [--level `<level>`] [--eligible]
//!   grove stats `<catalog>` [--completed `<file>`] [--major `<major>`] [--level `<level>`]
//!   grove graph `<catalog>` [--major `<major>`]

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grove::catalog::{
    eligibility_report, load_catalog, AcademicLevel, Catalog, CatalogQuery, CatalogStats,
    DependencyGraph,
};
use grove::config::{GroveConfig, Loader};
use grove::prereq::{parse, tokenize, CompletedCourses, EligibilityResult, LoadedCompleted};

fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_tracing(matches.get_count("verbose"));
    let config = load_config(&matches)?;
    debug!(?config, "configuration loaded");

    match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub, &config),
        Some(("check", sub)) => handle_check_command(sub, &config),
        Some(("stats", sub)) => handle_stats_command(sub, &config),
        Some(("graph", sub)) => handle_graph_command(sub, &config),
        _ => unreachable!(),
    }
}

fn cli() -> Command {
    let catalog_arg = Arg::new("catalog")
        .help("Catalog file (.json, .yaml or .yml)")
        .required(true)
        .index(1);
    let major_arg = Arg::new("major")
        .long("major")
        .short('m')
        .help("Only courses tagged with this major");
    let level_arg = Arg::new("level")
        .long("level")
        .short('l')
        .help("Student level; undergraduates do not see graduate courses")
        .value_parser(["undergraduate", "graduate"])
        .default_value("undergraduate");

    Command::new("grove")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prerequisite parser and course eligibility checker")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("comma")
                .long("comma")
                .global(true)
                .help("Where a bare comma binds")
                .value_parser(["and", "or"]),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log more (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse one prerequisite description")
                .arg(
                    Arg::new("text")
                        .help("Prerequisite text, e.g. \"EEL 3801C and (EEE 3342C or MAC 2311)\"")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["tokens", "tree", "json"])
                        .default_value("tree"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report eligibility for every selected course")
                .arg(catalog_arg.clone())
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .help("File of completed courses, one per line or comma separated")
                        .required(true),
                )
                .arg(major_arg.clone())
                .arg(level_arg.clone())
                .arg(
                    Arg::new("eligible")
                        .long("eligible")
                        .help("Only list courses that can be taken next")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Count the selected courses by level and major")
                .arg(catalog_arg.clone())
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .help("Add progress figures for this completed-course file"),
                )
                .arg(major_arg.clone())
                .arg(level_arg),
        )
        .subcommand(
            Command::new("graph")
                .about("Emit the prerequisite dependency graph")
                .arg(catalog_arg)
                .arg(major_arg),
        )
}

/// Logs go to stderr so stdout stays machine readable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<GroveConfig> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("grove.toml"),
    };
    if let Some(comma) = matches.get_one::<String>("comma") {
        loader = loader.set_override("parser.comma", comma.as_str())?;
    }
    loader.build().context("failed to load configuration")
}

fn query_from(matches: &ArgMatches) -> CatalogQuery {
    let major = matches.get_one::<String>("major").cloned();
    let level = matches
        .get_one::<String>("level")
        .and_then(|label| AcademicLevel::from_label(label))
        .unwrap_or(AcademicLevel::Undergraduate);
    CatalogQuery::new(major, level)
}

fn open_catalog(matches: &ArgMatches, config: &GroveConfig) -> Result<Catalog> {
    let path = matches
        .get_one::<String>("catalog")
        .context("catalog path is required")?;
    let catalog = load_catalog(path, config)?;
    Ok(catalog)
}

fn open_completed(path: &str, config: &GroveConfig) -> Result<LoadedCompleted> {
    CompletedCourses::from_path(path, &config.completed.comment_prefix)
        .with_context(|| format!("failed to read completed courses from {}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, config: &GroveConfig) -> Result<()> {
    let text = matches
        .get_one::<String>("text")
        .context("text is required")?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("tree");
    let tokens = tokenize(text);

    if format == "tokens" {
        for (token, span) in &tokens {
            println!("{}..{}\t{}", span.start, span.end, token.describe());
        }
        return Ok(());
    }

    let expression = match parse(&tokens, text.len(), config.parse_options()) {
        Ok(expression) => expression,
        Err(err) => bail!("could not parse {:?}: {}", text, err),
    };

    match format {
        "json" => print_json(&expression),
        _ => {
            println!("{}", expression);
            Ok(())
        }
    }
}

/// One course line of the check output
#[derive(Serialize)]
struct CourseView {
    code: String,
    title: String,
    status: String,
    prerequisites: String,
    missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&EligibilityResult> for CourseView {
    fn from(result: &EligibilityResult) -> Self {
        Self {
            code: result.course.to_string(),
            title: result.title.clone(),
            status: result.status.to_string(),
            prerequisites: result.prerequisites.clone(),
            missing: result.missing.iter().map(ToString::to_string).collect(),
            error: result.parse_error.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Serialize)]
struct CheckOutput {
    courses: Vec<CourseView>,
    skipped_completed: Vec<String>,
    skipped_records: Vec<String>,
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches, config: &GroveConfig) -> Result<()> {
    let catalog = open_catalog(matches, config)?;
    let completed_path = matches
        .get_one::<String>("completed")
        .context("completed-course file is required")?;
    let completed = open_completed(completed_path, config)?;
    let query = query_from(matches);

    let report = eligibility_report(&catalog, &query, &completed.courses);
    let courses = if matches.get_flag("eligible") {
        report.eligible().map(CourseView::from).collect()
    } else {
        report.results.iter().map(CourseView::from).collect()
    };

    print_json(&CheckOutput {
        courses,
        skipped_completed: completed.skipped.into_iter().map(|err| err.input).collect(),
        skipped_records: catalog
            .skipped()
            .iter()
            .map(|skipped| skipped.error.input.clone())
            .collect(),
    })
}

/// Handle the stats command
fn handle_stats_command(matches: &ArgMatches, config: &GroveConfig) -> Result<()> {
    let catalog = open_catalog(matches, config)?;
    let query = query_from(matches);
    let selection = catalog.select(&query);

    let report = match matches.get_one::<String>("completed") {
        Some(path) => {
            let completed = open_completed(path, config)?;
            Some(eligibility_report(&catalog, &query, &completed.courses))
        }
        None => None,
    };

    print_json(&CatalogStats::compute(&selection, report.as_ref()))
}

/// Handle the graph command
fn handle_graph_command(matches: &ArgMatches, config: &GroveConfig) -> Result<()> {
    let catalog = open_catalog(matches, config)?;
    let query = CatalogQuery::new(
        matches.get_one::<String>("major").cloned(),
        AcademicLevel::Graduate,
    );
    print_json(&DependencyGraph::build(&catalog, &catalog.select(&query)))
}
