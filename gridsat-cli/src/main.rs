use std::env;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::Error;
use clap::{values_t, App, AppSettings, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};

use gridsat::config::{SolverConfig, SolverConfigUpdate};
use gridsat::solver::Solver;
use gridsat::{Grid, Lit, Segment};

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(()) => 0,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("GRIDSAT_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is gridsat {}", env!("GRIDSAT_VERSION"));
    info!(
        "  {} build - {}",
        env!("GRIDSAT_PROFILE"),
        env!("GRIDSAT_RUSTC_VERSION")
    );
}

/// Orientation of every segment, e.g. `v s1=E s2=W a1=S`.
fn model_line(grid: Grid, model: &[Lit]) -> String {
    let mut line = String::from("v");
    for &lit in model {
        let (name, index, direction) = match grid.segment(lit.var()) {
            Segment::Street(index) => ('s', index, if lit.is_positive() { 'E' } else { 'W' }),
            Segment::Avenue(index) => ('a', index, if lit.is_positive() { 'S' } else { 'N' }),
        };
        line.push_str(&format!(" {}{}={}", name, index, direction));
    }
    line
}

fn main_with_err() -> Result<(), Error> {
    let matches = App::new("gridsat")
        .version(env!("GRIDSAT_VERSION"))
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[INPUT] 'The case file to use (stdin if omitted)'")
        .arg_from_usage("[output-file] --output=[FILE] 'Write the answers to a file (stdout if omitted)'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'gridsat -C help' for a list of options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .arg_from_usage("--model 'Print the orientation of every segment for satisfiable cases'")
        .arg_from_usage("--self-check 'Verify every orientation against the trips of its case'")
        .get_matches();

    if values_t!(matches, "config-option", String)
        .unwrap_or(vec![])
        .iter()
        .any(|option| option == "help")
    {
        print!("{}", SolverConfig::help());
        return Ok(());
    }

    init_logging();
    banner();

    let mut config_update = SolverConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        let mut config_contents = String::new();
        fs::File::open(config_path)?.read_to_string(&mut config_contents)?;

        config_update.merge(toml::from_str(&config_contents)?);
    }

    for config_option in values_t!(matches, "config-option", String).unwrap_or(vec![]) {
        config_update.merge(toml::from_str(&config_option)?);
    }

    let mut solver = Solver::new();

    solver.config(&config_update);

    if matches.is_present("self-check") {
        solver.enable_self_checking();
    }

    let print_model = matches.is_present("model");

    let stdin = io::stdin();

    let mut locked_stdin;
    let mut opened_file;

    let file = match matches.value_of("INPUT") {
        Some(path) => {
            info!("Reading file '{}'", path);
            opened_file = fs::File::open(path)?;
            &mut opened_file as &mut dyn io::Read
        }
        None => {
            info!("Reading from stdin");
            locked_stdin = stdin.lock();
            &mut locked_stdin as &mut dyn io::Read
        }
    };

    let mut output: Box<dyn Write> = match matches.value_of("output-file") {
        Some(path) => {
            info!("Writing answers to '{}'", path);
            Box::new(io::BufWriter::new(fs::File::create(path)?))
        }
        None => Box::new(io::stdout()),
    };

    solver.solve_cases(file, |case, model| {
        match model {
            Some(model) => {
                writeln!(output, "Yes")?;
                if print_model {
                    writeln!(output, "{}", model_line(case.grid, model))?;
                }
            }
            None => writeln!(output, "No")?,
        }
        Ok(())
    })?;

    output.flush()?;

    Ok(())
}
