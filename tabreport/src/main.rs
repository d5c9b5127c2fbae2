//! # tabreport
//!
//! A CLI tool for turning delimited data into formatted reports.
//!
//! ## Overview
//!
//! tabreport is built on top of tabreportlib. It loads a CSV file into a
//! report, optionally derives calculated columns and summary figures, and
//! writes the result through one of the registered exporters.
//!
//! ## Features
//!
//! - **Exporter selection**: by kind (`xlsx`) or by listing index (`3`)
//! - **Calculated columns**: `--calc PROD:1,2:Total`
//! - **Summary figures**: `--summary SUM:3:Grand total`
//! - **Formatting**: title, header and border styles for formatting exporters
//!
//! ## Usage
//!
//! ```bash
//! # List available exporters
//! tabreport exporters
//!
//! # Export a CSV file as a spreadsheet with a computed column and a total
//! tabreport export --input orders.csv --exporter xlsx --filename orders \
//!     --title "Orders" --row-numbers \
//!     --calc PROD:1,2:Total --summary SUM:3:"Grand total"
//!
//! # Plain text, no formatting
//! tabreport export -i orders.csv -e txt -f orders --plain
//! ```
//!
//! Logging goes to stderr and is controlled by `TABREPORT_LOG`
//! (e.g. `TABREPORT_LOG=debug`).

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use tabreportlib::{
    export_report, Alignment, BorderStyle, Calculation, CellFormat, Color, ExportOptions,
    Exporter, ExporterRegistry, FontStyle, FormatReportBuilder, RecordSet, ReportBuilder,
    ReportDraft, ReportPayload, SummaryFormat, SummaryKind, TableFormat, TitleFormat,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TABREPORT_LOG";

/// A `--calc` request: operation, source column indices, optional header
#[derive(Debug, Clone, PartialEq)]
struct CalcSpec {
    op: Calculation,
    indices: Vec<usize>,
    header: Option<String>,
}

/// A `--summary` request: aggregation, column index, optional key
#[derive(Debug, Clone, PartialEq)]
struct SummarySpec {
    kind: SummaryKind,
    index: usize,
    key: Option<String>,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tabreport")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Build tabular reports from delimited data and export them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("exporters")
                .about("List available exporters")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the listing as JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Build a report from a CSV file and export it")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("CSV file whose first record holds the column names"),
                )
                .arg(
                    Arg::new("exporter")
                        .short('e')
                        .long("exporter")
                        .required(true)
                        .help("Exporter kind (txt, csv, xlsx, json) or listing index"),
                )
                .arg(
                    Arg::new("filename")
                        .short('f')
                        .long("filename")
                        .required(true)
                        .help("Output filename without extension ([A-Za-z0-9_-])"),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory receiving the exported file"),
                )
                .arg(Arg::new("title").short('t').long("title").help("Report title"))
                .arg(
                    Arg::new("row-numbers")
                        .short('n')
                        .long("row-numbers")
                        .action(ArgAction::SetTrue)
                        .help("Prepend a row-number column"),
                )
                .arg(
                    Arg::new("plain")
                        .long("plain")
                        .action(ArgAction::SetTrue)
                        .help("Ignore formatting even if the exporter supports it"),
                )
                .arg(
                    Arg::new("calc")
                        .long("calc")
                        .action(ArgAction::Append)
                        .help("Calculated column OP:i,j[,k..][:header] (OP: ADD, SUB, PROD, DIV)"),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .action(ArgAction::Append)
                        .help("Summary entry KIND:index[:key] (KIND: SUM, AVERAGE, COUNT)"),
                )
                .arg(
                    Arg::new("title-size")
                        .long("title-size")
                        .value_parser(value_parser!(u32))
                        .help("Title font size"),
                )
                .arg(Arg::new("title-color").long("title-color").help("Title text color"))
                .arg(Arg::new("header-color").long("header-color").help("Header text color"))
                .arg(
                    Arg::new("header-background")
                        .long("header-background")
                        .help("Header background color"),
                )
                .arg(
                    Arg::new("header-align")
                        .long("header-align")
                        .help("Header alignment (left, center, right)"),
                )
                .arg(
                    Arg::new("header-style")
                        .long("header-style")
                        .help("Header font style (normal, bold, italic, underline, bold-italic, bold-underline)"),
                )
                .arg(
                    Arg::new("border-style")
                        .long("border-style")
                        .help("Table border style (normal, bold, dashed)"),
                )
                .arg(
                    Arg::new("precision")
                        .long("precision")
                        .value_parser(value_parser!(usize))
                        .help("Decimal places of numeric summary values"),
                ),
        )
}

/// Parse `OP:i,j[,k..][:header]`
fn parse_calc(spec: &str) -> anyhow::Result<CalcSpec> {
    let mut parts = spec.splitn(3, ':');
    let op = parts.next().unwrap_or_default().parse::<Calculation>()?;
    let indices = parts
        .next()
        .ok_or_else(|| anyhow!("missing column indices in '{}'", spec))?
        .split(',')
        .map(|i| {
            i.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid column index '{}' in '{}'", i, spec))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let header = parts.next().map(str::to_string);

    Ok(CalcSpec {
        op,
        indices,
        header,
    })
}

/// Parse `KIND:index[:key]`
fn parse_summary(spec: &str) -> anyhow::Result<SummarySpec> {
    let mut parts = spec.splitn(3, ':');
    let kind = parts.next().unwrap_or_default().parse::<SummaryKind>()?;
    let index = parts
        .next()
        .ok_or_else(|| anyhow!("missing column index in '{}'", spec))?;
    let index = index
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid column index '{}' in '{}'", index, spec))?;
    let key = parts.next().map(str::to_string);

    Ok(SummarySpec { kind, index, key })
}

fn parse_all<T>(
    matches: &ArgMatches,
    id: &str,
    parse: fn(&str) -> anyhow::Result<T>,
) -> anyhow::Result<Vec<T>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.map(|v| parse(v)).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

/// Parse an optional flag through its `FromStr` impl
fn parse_opt<T>(matches: &ArgMatches, id: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .get_one::<String>(id)
        .map(|v| v.parse::<T>().with_context(|| format!("invalid --{}", id)))
        .transpose()
}

/// Load the source and apply every content flag to a builder
fn fill_draft<B: ReportDraft>(builder: &mut B, matches: &ArgMatches) -> anyhow::Result<()> {
    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or_else(|| anyhow!("--input is required"))?;
    let mut source = RecordSet::from_csv_path(input)
        .with_context(|| format!("failed to load '{}'", input.display()))?;

    if let Some(title) = matches.get_one::<String>("title") {
        builder.set_title(title.as_str());
    }
    builder.set_include_row_numbers(matches.get_flag("row-numbers"));
    builder.populate_from_source(&mut source);

    for calc in parse_all(matches, "calc", parse_calc)? {
        let header = calc.header.clone().unwrap_or_else(|| default_calc_header(&calc));
        builder
            .add_calculated_column_from(header, &calc.indices, calc.op)
            .with_context(|| format!("cannot compute {} column", calc.op))?;
    }

    for summary in parse_all(matches, "summary", parse_summary)? {
        let key = match &summary.key {
            Some(key) => key.clone(),
            None => default_summary_key(&*builder, &summary),
        };
        builder
            .add_summary_from_column(key, summary.index, summary.kind, |_| true)
            .with_context(|| format!("cannot compute {} summary", summary.kind))?;
    }
    Ok(())
}

fn default_calc_header(calc: &CalcSpec) -> String {
    let indices: Vec<String> = calc.indices.iter().map(|i| i.to_string()).collect();
    format!("{}({})", calc.op, indices.join(","))
}

fn default_summary_key<B: ReportDraft>(builder: &B, summary: &SummarySpec) -> String {
    match builder.column(summary.index) {
        Some(column) if !column.header().is_empty() => {
            format!("{} {}", summary.kind, column.header())
        }
        _ => format!("{} {}", summary.kind, summary.index),
    }
}

/// Apply the style flags to a formatted builder
fn apply_styles(builder: &mut FormatReportBuilder, matches: &ArgMatches) -> anyhow::Result<()> {
    let mut title = TitleFormat::new();
    if let Some(size) = matches.get_one::<u32>("title-size") {
        title = title.font_size(*size);
    }
    if let Some(color) = parse_opt::<Color>(matches, "title-color")? {
        title = title.text_color(color);
    }
    builder.set_title_format(title);

    let mut header = CellFormat::new().font_style(FontStyle::Bold);
    if let Some(color) = parse_opt::<Color>(matches, "header-color")? {
        header = header.text_color(color);
    }
    if let Some(color) = parse_opt::<Color>(matches, "header-background")? {
        header = header.background_color(color);
    }
    if let Some(alignment) = parse_opt::<Alignment>(matches, "header-align")? {
        header = header.alignment(alignment);
    }
    if let Some(style) = parse_opt::<FontStyle>(matches, "header-style")? {
        header = header.font_style(style);
    }
    builder.set_header_format(header);

    if let Some(style) = parse_opt::<BorderStyle>(matches, "border-style")? {
        builder.set_table_format(TableFormat::all_borders(style, Color::BLACK));
    }

    if let Some(precision) = matches.get_one::<usize>("precision") {
        builder.set_summary_format(SummaryFormat::new().rounding_precision(*precision));
    }
    Ok(())
}

/// Build the payload the selected exporter will receive
fn build_payload(matches: &ArgMatches, exporter: &dyn Exporter) -> anyhow::Result<ReportPayload> {
    let filename = matches
        .get_one::<String>("filename")
        .ok_or_else(|| anyhow!("--filename is required"))?;

    let formatted = exporter.supports_formatting() && !matches.get_flag("plain");
    tracing::debug!(exporter = exporter.kind(), formatted, "building report");

    if formatted {
        let mut builder = FormatReportBuilder::new(filename)?;
        fill_draft(&mut builder, matches)?;
        apply_styles(&mut builder, matches)?;
        Ok(ReportPayload::Formatted(builder.build()?))
    } else {
        let mut builder = ReportBuilder::new(filename)?;
        fill_draft(&mut builder, matches)?;
        Ok(ReportPayload::Plain(builder.build()?))
    }
}

fn export_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let registry = ExporterRegistry::builtin(ExportOptions::new().output_dir(output_dir));

    let selector = matches
        .get_one::<String>("exporter")
        .ok_or_else(|| anyhow!("--exporter is required"))?;
    let exporter = registry.select(selector).ok_or_else(|| {
        anyhow!(
            "unknown exporter '{}' (run `tabreport exporters` to list them)",
            selector
        )
    })?;

    let payload = build_payload(matches, exporter)?;
    let path = export_report(exporter, &payload)?;

    println!(
        "{} {} report to {}",
        Style::new().green().bold().apply_to("Exported"),
        exporter.kind(),
        path.display()
    );
    Ok(())
}

fn exporters_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let registry = ExporterRegistry::builtin(ExportOptions::new());
    let rows = render::exporter_rows(&registry);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render::render_exporters(&rows));
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("exporters", sub)) => exporters_handler(sub),
        Some(("export", sub)) => export_handler(sub),
        Some((name, _)) => bail!("unknown command '{}'", name),
        None => bail!("no command given"),
    }
}

fn main() -> ExitCode {
    init_logging();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_parse_calc() {
        let calc = parse_calc("prod:1,2:Total").unwrap();
        assert_eq!(
            calc,
            CalcSpec {
                op: Calculation::Prod,
                indices: vec![1, 2],
                header: Some("Total".into()),
            }
        );
        assert_eq!(default_calc_header(&parse_calc("ADD:0, 1,2").unwrap()), "ADD(0,1,2)");
    }

    #[test]
    fn test_parse_calc_errors() {
        assert!(parse_calc("MOD:1,2").is_err());
        assert!(parse_calc("ADD").is_err());
        assert!(parse_calc("ADD:1,x").is_err());
    }

    #[test]
    fn test_parse_summary() {
        let summary = parse_summary("average:3:Mean: price").unwrap();
        assert_eq!(summary.kind, SummaryKind::Average);
        assert_eq!(summary.index, 3);
        assert_eq!(summary.key.as_deref(), Some("Mean: price"));
        assert_eq!(parse_summary("COUNT:0").unwrap().key, None);
        assert!(parse_summary("SUM").is_err());
    }

    #[test]
    fn test_default_summary_key_uses_header() {
        let mut builder = ReportBuilder::new("r").unwrap();
        builder.add_number_column("price", vec![1.0]);
        let spec = SummarySpec {
            kind: SummaryKind::Sum,
            index: 0,
            key: None,
        };
        assert_eq!(default_summary_key(&builder, &spec), "SUM price");
    }
}
