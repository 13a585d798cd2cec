//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - prompts for whatever inputs are still missing
//! - runs the report pipeline
//! - prints the report, draws the chart, writes the optional export

use std::io::{self, IsTerminal, Write};

use clap::Parser;

use crate::cli::Cli;
use crate::cli::prompt::{BANNER, accept_given_path, prompt_for_column, prompt_for_path};
use crate::domain::{ChartMode, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `nps` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` first, so clap's `env = ...` fallbacks can see it.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let config = resolve_config(&cli, &mut input, &mut out)?;

    run_with_config(&config, &mut out)
}

/// Run the pipeline and present its result on `out`.
///
/// Pipeline halts are printed and count as a normal exit.
pub fn run_with_config<W: Write>(config: &RunConfig, out: &mut W) -> Result<(), AppError> {
    log::info!("file: {} | column: {}", config.file_path.display(), config.column);

    let run = match pipeline::run_report(&config.file_path, &config.column) {
        Ok(run) => run,
        Err(err) => {
            log::debug!("pipeline halted: {err:?}");
            writeln!(out, "{err}").map_err(output_error)?;
            return Ok(());
        }
    };

    write!(out, "{}", crate::report::format_summary(&run.summary)).map_err(output_error)?;

    if let Some(path) = &config.export_json {
        crate::io::export::write_summary_json(path, &run)?;
    }

    match resolve_chart_mode(config.chart, io::stdout().is_terminal()) {
        ChartMode::Window => {
            out.flush().map_err(output_error)?;
            if let Err(err) = crate::tui::show_histogram(&run.extraction.series, &run.column) {
                log::warn!("chart window unavailable ({err}); printing a text histogram instead");
                print_ascii_chart(&run, out)?;
            }
        }
        ChartMode::Ascii => print_ascii_chart(&run, out)?,
        ChartMode::None => {}
    }

    Ok(())
}

fn print_ascii_chart<W: Write>(run: &pipeline::RunOutput, out: &mut W) -> Result<(), AppError> {
    let title = crate::tui::chart_title(&run.column);
    let chart = crate::plot::render_ascii_histogram(&run.histogram, &title, ASCII_CHART_HEIGHT);
    write!(out, "\n{chart}").map_err(output_error)
}

const ASCII_CHART_HEIGHT: usize = 12;

/// A chart window needs an interactive terminal; otherwise fall back to text.
fn resolve_chart_mode(requested: ChartMode, stdout_is_terminal: bool) -> ChartMode {
    match requested {
        ChartMode::Window if !stdout_is_terminal => {
            log::warn!("stdout is not a terminal; printing a text histogram instead");
            ChartMode::Ascii
        }
        mode => mode,
    }
}

/// Combine flags, environment defaults, and prompts into a [`RunConfig`].
pub fn resolve_config<R, W>(cli: &Cli, input: &mut R, out: &mut W) -> Result<RunConfig, AppError>
where
    R: io::BufRead,
    W: Write,
{
    let given_path = match &cli.file {
        Some(path) => accept_given_path(path, out)?,
        None => None,
    };

    if given_path.is_none() || cli.column.is_none() {
        writeln!(out, "{BANNER}").map_err(output_error)?;
    }

    let file_path = match given_path {
        Some(path) => path,
        None => prompt_for_path(input, out)?,
    };
    let column = match &cli.column {
        Some(column) => column.trim().to_string(),
        None => prompt_for_column(input, out)?,
    };

    Ok(RunConfig {
        file_path,
        column,
        chart: cli.chart,
        export_json: cli.json.clone(),
    })
}

fn output_error(e: io::Error) -> AppError {
    AppError::new(2, format!("Failed to write output: {e}"))
}

/// Logs go to stderr so the report on stdout stays clean.
///
/// Default level is `warn`; `-v` raises it, `-q` limits it to errors, and
/// `RUST_LOG` overrides both.
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["nps"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config(path: PathBuf, column: &str, chart: ChartMode) -> RunConfig {
        RunConfig {
            file_path: path,
            column: column.to_string(),
            chart,
            export_json: None,
        }
    }

    #[test]
    fn flags_skip_prompts() {
        let file = csv_file("NPS\n9\n");
        let path = file.path().display().to_string();
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let config = resolve_config(&cli(&["-f", path.as_str(), "-c", "NPS"]), &mut input, &mut out).unwrap();
        assert_eq!(config.file_path, file.path());
        assert_eq!(config.column, "NPS");
        assert!(out.is_empty());
    }

    #[test]
    fn missing_inputs_are_prompted() {
        let file = csv_file("NPS\n9\n");
        let answers = format!("missing.csv\n{}\nNPS\n", file.path().display());
        let mut input = Cursor::new(answers);
        let mut out = Vec::new();

        let config = resolve_config(&cli(&[]), &mut input, &mut out).unwrap();
        assert_eq!(config.file_path, file.path());
        assert_eq!(config.column, "NPS");

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.starts_with(BANNER));
        assert!(transcript.contains("Invalid path or file does not exist. Please try again.\n"));
    }

    #[test]
    fn report_then_ascii_chart() {
        let file = csv_file("NPS\n10\n10\n9\n8\n7\n6\n5\n0\n");
        let mut out = Vec::new();
        run_with_config(&config(file.path().to_path_buf(), "NPS", ChartMode::Ascii), &mut out).unwrap();

        let txt = String::from_utf8(out).unwrap();
        assert!(txt.starts_with("----------------------------------------\nNPS Calculation Results:\n"));
        assert!(txt.contains("** Net Promoter Score (NPS): 0.00 **\n"));
        assert!(txt.contains("Distribution of NPS Ratings in \"NPS\"\n"));
    }

    #[test]
    fn mixed_column_prints_float_extremes() {
        let file = csv_file("NPS\n9\nabc\n11\n-1\n7.5\n");
        let mut out = Vec::new();
        run_with_config(&config(file.path().to_path_buf(), "NPS", ChartMode::None), &mut out).unwrap();

        let txt = String::from_utf8(out).unwrap();
        assert!(txt.contains("Total valid responses:   2\n"));
        assert!(txt.ends_with("Min rating:              7.5\nMax rating:              9.0\n"));
    }

    #[test]
    fn halts_print_message_and_skip_chart() {
        let file = csv_file("id,score\n1,9\n");
        let mut out = Vec::new();
        run_with_config(&config(file.path().to_path_buf(), "NPS", ChartMode::Ascii), &mut out).unwrap();

        let txt = String::from_utf8(out).unwrap();
        assert_eq!(
            txt,
            "Error: Column 'NPS' not found in the file.\nAvailable columns are: ['id', 'score']\n"
        );
    }

    #[test]
    fn unsupported_format_is_reported_not_raised() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let mut out = Vec::new();
        run_with_config(&config(file.path().to_path_buf(), "NPS", ChartMode::None), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Unsupported file format. Please use .csv, .xlsx, or .xls.\n"
        );
    }

    #[test]
    fn json_export_contains_summary() {
        let file = csv_file("NPS\n9\nabc\n11\n-1\n7.5\n");
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("summary.json");
        let mut cfg = config(file.path().to_path_buf(), "NPS", ChartMode::None);
        cfg.export_json = Some(json_path.clone());

        let mut out = Vec::new();
        run_with_config(&cfg, &mut out).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["column"], "NPS");
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["nps"], 50.0);
        assert_eq!(value["audit"]["dropped_non_numeric"], 1);
        assert_eq!(value["audit"]["dropped_out_of_range"], 2);
        assert_eq!(value["histogram"][9], 1);
    }

    #[test]
    fn window_falls_back_without_terminal() {
        assert_eq!(resolve_chart_mode(ChartMode::Window, false), ChartMode::Ascii);
        assert_eq!(resolve_chart_mode(ChartMode::Window, true), ChartMode::Window);
        assert_eq!(resolve_chart_mode(ChartMode::None, false), ChartMode::None);
    }
}
