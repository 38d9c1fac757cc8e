use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tocsim::loader::AutomatonLoader;
use tocsim::validator::{validate, validate_input};
use tocsim::SimulationEngine;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The automaton definition file to load (JSON)
    #[clap(short, long)]
    automaton: String,

    /// Input strings to simulate
    #[clap(short, long)]
    input: Vec<String>,

    /// Validate the automaton and exit without simulating
    #[clap(long)]
    validate_only: bool,

    /// Print each step of the simulation
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let automaton = match AutomatonLoader::load_automaton(Path::new(&cli.automaton)) {
        Ok(automaton) => automaton,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = validate(&automaton);
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }
    if !report.is_valid {
        for error in &report.errors {
            eprintln!("error: {}", error);
        }
        return ExitCode::FAILURE;
    }
    if cli.validate_only {
        println!("{} is valid", automaton.name);
        return ExitCode::SUCCESS;
    }

    let engine = SimulationEngine::new(automaton);
    let mut all_accepted = true;

    for input in &cli.input {
        let input_report = validate_input(input, &engine.automaton().alphabet);
        for warning in &input_report.warnings {
            eprintln!("warning: {}", warning);
        }
        // Out-of-alphabet characters are reported but still simulated; the
        // engine treats them as an ordinary rejection.
        for error in &input_report.errors {
            eprintln!("error: {}", error);
        }

        let result = engine.simulate(input);

        if cli.debug {
            for step in &result.steps {
                let mut line = format!(
                    "Step: {}, State: [{}], Remaining: {:?}",
                    step.step,
                    step.display_state(),
                    step.remaining_input
                );
                if let Some(tape) = &step.tape {
                    line.push_str(&format!(
                        ", Tape: {}, Head: {}",
                        tape.cells.iter().collect::<String>(),
                        tape.position
                    ));
                }
                println!("{}", line);
            }
        }

        match &result.error {
            Some(error) => println!("{:?}: error: {}", input, error),
            None if result.is_accepted => println!("{:?}: accepted", input),
            None => println!("{:?}: rejected", input),
        }
        all_accepted &= result.is_accepted;
    }

    if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
