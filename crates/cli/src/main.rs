mod optspec;
mod render;

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use optsift_getopt::scan;
use optsift_getopt::table::LongOpt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::optspec::{LongSpec, ShortSpec};
use crate::render::Sink;

fn main() -> ExitCode {
    init_tracing();
    let argv: Vec<String> = env::args().collect();
    match run(&argv) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("optsift: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(argv: &[String]) -> Result<ExitCode> {
    // Compatibility form: `optsift OPTSTRING PARAMS...`. The optstring
    // token doubles as the program-name slot the scanner skips.
    if argv.len() > 1 && !argv[1].starts_with('-') {
        let shorts = optspec::parse_optstring(&argv[1])?;
        tracing::debug!(mode = "short", compat = true, "scanning parameters");
        return Ok(emit_short(&argv[1..], &shorts, "optsift", false));
    }

    let own = collect_own_args(argv)?;
    if own.help {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }
    let name = own.name.unwrap_or_else(|| "optsift".to_string());

    // The scanner expects a program-name slot at index 0.
    let mut scan_argv = Vec::with_capacity(own.parameters.len() + 1);
    scan_argv.push(name.clone());
    scan_argv.extend(own.parameters.iter().cloned());

    if own.longoptions.is_empty() {
        let optstring = own
            .optstring
            .context("nothing to scan for; give -o OPTSTRING or -l LIST (see --help)")?;
        let shorts = optspec::parse_optstring(&optstring)?;
        tracing::debug!(mode = "short", "scanning parameters");
        Ok(emit_short(&scan_argv, &shorts, &name, own.quiet))
    } else {
        if own.optstring.is_some() {
            bail!("-o cannot be combined with -l; short equivalents come from the SHORT=NAME pairs");
        }
        let mut longs = Vec::new();
        for list in &own.longoptions {
            longs.extend(optspec::parse_longoptions(list)?);
        }
        let mode = if own.alternative { "long-only" } else { "long" };
        tracing::debug!(mode, "scanning parameters");
        Ok(emit_long(&scan_argv, &longs, &name, own.alternative, own.quiet))
    }
}

struct OwnArgs {
    optstring: Option<String>,
    longoptions: Vec<String>,
    alternative: bool,
    name: Option<String>,
    quiet: bool,
    help: bool,
    parameters: Vec<String>,
}

/// optsift scans its own command line with the library it ships.
fn collect_own_args(argv: &[String]) -> Result<OwnArgs> {
    let mut optstring: Option<String> = None;
    let mut longoptions: Vec<String> = Vec::new();
    let mut alternative = false;
    let mut name: Option<String> = None;
    let mut quiet = false;
    let mut help = false;

    let parameters = {
        let mut opts = vec![
            LongOpt::required("options", 'o', |v: &str| optstring = Some(v.to_string())),
            LongOpt::required("longoptions", 'l', |v: &str| longoptions.push(v.to_string())),
            LongOpt::flag("alternative", 'a', || alternative = true),
            LongOpt::required("name", 'n', |v: &str| name = Some(v.to_string())),
            LongOpt::flag("quiet", 'q', || quiet = true),
            LongOpt::flag("help", 'h', || help = true),
        ];
        scan::parse_long(argv, &mut opts)?.to_vec()
    };

    Ok(OwnArgs {
        optstring,
        longoptions,
        alternative,
        name,
        quiet,
        help,
        parameters,
    })
}

fn emit_short(argv: &[String], specs: &[ShortSpec], name: &str, quiet: bool) -> ExitCode {
    let sink = Sink::new();
    let scanned = {
        let mut opts: Vec<_> = specs.iter().map(|spec| sink.short_opt(spec)).collect();
        scan::parse_short(argv, &mut opts).map(|rest| rest.to_vec())
    };
    report(sink, scanned, name, quiet)
}

fn emit_long(
    argv: &[String],
    specs: &[LongSpec],
    name: &str,
    alternative: bool,
    quiet: bool,
) -> ExitCode {
    let sink = Sink::new();
    let scanned = {
        let mut opts: Vec<_> = specs.iter().map(|spec| sink.long_opt(spec)).collect();
        if alternative {
            scan::parse_long_only(argv, &mut opts).map(|rest| rest.to_vec())
        } else {
            scan::parse_long(argv, &mut opts).map(|rest| rest.to_vec())
        }
    };
    report(sink, scanned, name, quiet)
}

/// Success prints the normalized line; a parameter error prints the
/// diagnostic under the caller-chosen name and still emits a bare ` --`
/// so shell consumers always see the separator.
fn report(
    sink: Sink,
    scanned: Result<Vec<String>, scan::Error>,
    name: &str,
    quiet: bool,
) -> ExitCode {
    match scanned {
        Ok(rest) => {
            println!("{}", sink.finish(&rest));
            ExitCode::SUCCESS
        }
        Err(err) => {
            if !quiet {
                eprintln!("{name}: {err}");
            }
            println!(" --");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("optsift - normalize command line options for shell scripts");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  optsift -o OPTSTRING [-n NAME] [-q] [--] PARAMETERS...");
    eprintln!("  optsift -l LIST [-a] [-n NAME] [-q] [--] PARAMETERS...");
    eprintln!("  optsift OPTSTRING PARAMETERS...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --options OPTSTRING   short options, getopt-style (a, b:, c::)");
    eprintln!("  -l, --longoptions LIST    comma-separated SHORT=NAME[:|::] pairs; may repeat");
    eprintln!("  -a, --alternative         allow long options with a single '-'");
    eprintln!("  -n, --name NAME           program name used in error messages");
    eprintln!("  -q, --quiet               do not print parameter errors");
    eprintln!("  -h, --help                show this help");
    eprintln!();
    eprintln!("Matched options are printed normalized and shell-quoted, then '--',");
    eprintln!("then the remaining parameters, ready for eval in a shell script.");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
