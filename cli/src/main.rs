//! QSIM CLI - State-Vector Quantum Computer Simulator
//!
//! Command-line front end for the simulation core and the reference
//! algorithms: gate demonstrations, Grover database search over a
//! word list, and Shor factorisation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use qsim_algorithms::grover::{run_database_search, TargetQuery};
use qsim_algorithms::shor::{complete_factorisation, is_prime};
use qsim_circuits::{format_basis_state, Circuit, QuantumState, MAX_QUBITS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Searchable word database for the Grover demo
const DATABASE: [&str; 28] = [
    "apple", "banana", "cherry", "date", "elderberry", "fig",
    "grape", "honeydew", "kiwi", "lemon", "mango", "nectarine",
    "orange", "papaya", "quince", "raspberry", "strawberry",
    "tangerine", "watermelon", "blueberry", "pineapple", "peach",
    "plum", "apricot", "coconut", "avocado", "lime", "grapefruit",
];

/// QSIM - State-Vector Quantum Computer Simulator
#[derive(Parser)]
#[command(name = "qsim")]
#[command(version)]
#[command(about = "State-vector quantum computer simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (measurement events, iteration traces)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seed the random generator for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output format for algorithm results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Display simulator capabilities
    Info,

    /// Run a built-in demonstration
    Demo {
        #[command(subcommand)]
        demo: DemoKind,
    },

    /// Grover's search over the word database
    Grover(GroverArgs),

    /// Shor's factoring algorithm
    Shor(ShorArgs),
}

#[derive(Subcommand)]
enum DemoKind {
    /// X, H and Z on a single qubit, with state printouts
    BasicGates,
    /// Equal superposition, directly and via a Hadamard layer
    Superposition,
    /// Bell state preparation and repeated measurement
    Bell,
    /// GHZ state with per-qubit measurement correlations
    Entanglement,
    /// Circuit construction and interpreter execution
    Circuit,
    /// Deutsch's algorithm for both constant oracles
    Deutsch,
}

#[derive(Args)]
struct GroverArgs {
    /// Register size in qubits
    #[arg(short, long, default_value_t = 5)]
    qubits: usize,

    /// Item to search for: an index or a (partial) name.
    /// Omitted means a random target.
    #[arg(short, long)]
    target: Option<String>,
}

#[derive(Args)]
struct ShorArgs {
    /// Composite number to factor; defaults by register size
    #[arg(short, long)]
    number: Option<u64>,

    /// Register size in qubits (bounds the factorable numbers)
    #[arg(short, long, default_value_t = 8)]
    qubits: usize,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("failed to set tracing subscriber");
        }
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match cli.command {
        Commands::Info => {
            print_info();
            Ok(())
        }
        Commands::Demo { demo } => run_demo(demo, &mut rng),
        Commands::Grover(args) => run_grover(args, cli.format, &mut rng),
        Commands::Shor(args) => run_shor(args, cli.format),
    };

    if let Err(message) = result {
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }
}

fn print_info() {
    println!("\n{}", "QSIM - State-Vector Quantum Computer Simulator".cyan().bold());
    println!("{}\n", "=".repeat(50).dimmed());
    println!("  Version:        {}", qsim_circuits::VERSION);
    println!("  Max qubits:     {MAX_QUBITS}");
    println!("  Max gates:      {}", qsim_circuits::MAX_GATES);
    println!("  Gate set:       X Y Z H P RX RY RZ CNOT CZ SWAP M M_ALL");
    println!("  Algorithms:     Grover search, Shor factoring, QFT");
    println!("  Database items: {}", DATABASE.len());
}

fn section(title: &str) {
    println!("\n{}", title.cyan().bold());
    println!("{}\n", "=".repeat(50).dimmed());
}

fn print_state(state: &QuantumState) {
    let n = state.num_qubits();
    for i in 0..state.num_states() {
        let amplitude = state.amplitude(i);
        if amplitude.norm_sqr() > 1e-10 {
            println!(
                "  |{}⟩: {:.4} {:+.4}i",
                format_basis_state(i, n),
                amplitude.re,
                amplitude.im
            );
        }
    }
}

fn print_probabilities(state: &QuantumState) {
    let n = state.num_qubits();
    for i in 0..state.num_states() {
        let p = state.probability(i);
        if p > 1e-10 {
            println!("  |{}⟩: {:.6}", format_basis_state(i, n), p);
        }
    }
}

fn run_demo(demo: DemoKind, rng: &mut StdRng) -> Result<(), String> {
    match demo {
        DemoKind::BasicGates => demo_basic_gates(),
        DemoKind::Superposition => demo_superposition(),
        DemoKind::Bell => demo_bell(rng),
        DemoKind::Entanglement => demo_entanglement(rng),
        DemoKind::Circuit => demo_circuit(rng),
        DemoKind::Deutsch => demo_deutsch(rng),
    }
    .map_err(|e| e.to_string())
}

fn demo_basic_gates() -> qsim_circuits::Result<()> {
    section("Basic Quantum Gates");

    let mut state = QuantumState::zero_state(1)?;
    println!("{}", "Starting with |0⟩:".yellow());
    print_state(&state);

    println!("\n{}", "Pauli-X (bit flip):".yellow());
    state.x(0)?;
    print_state(&state);

    println!("\n{}", "Hadamard (superposition):".yellow());
    state.h(0)?;
    print_state(&state);

    println!("\n{}", "Probabilities:".yellow());
    print_probabilities(&state);

    println!("\n{}", "Pauli-Z (phase flip):".yellow());
    state.z(0)?;
    print_state(&state);

    Ok(())
}

fn demo_superposition() -> qsim_circuits::Result<()> {
    section("Superposition");

    let mut state = QuantumState::new(3)?;
    println!("{}", "Equal superposition of all 3-qubit states:".yellow());
    state.initialise_equal_superposition();
    print_probabilities(&state);

    println!("\n{}", "Hadamard on every qubit, starting from |000⟩:".yellow());
    state.initialise_zero();
    for qubit in 0..3 {
        state.h(qubit)?;
    }
    print_probabilities(&state);

    Ok(())
}

fn demo_bell(rng: &mut StdRng) -> qsim_circuits::Result<()> {
    section("Bell State");

    let mut state = QuantumState::zero_state(2)?;
    state.h(0)?;
    state.cnot(0, 1)?;

    println!("{}", "Bell state (|00⟩ + |11⟩)/√2:".yellow());
    print_state(&state);
    println!("\n{}", "Probabilities:".yellow());
    print_probabilities(&state);

    println!("\n{}", "Measuring five independent copies:".yellow());
    for trial in 1..=5 {
        let mut copy = state.clone();
        let outcome = copy.measure_all(rng);
        println!("  measurement {}: |{}⟩", trial, format_basis_state(outcome, 2));
    }

    Ok(())
}

fn demo_entanglement(rng: &mut StdRng) -> qsim_circuits::Result<()> {
    section("Entanglement - GHZ State");

    let mut state = QuantumState::zero_state(3)?;
    state.h(0)?;
    state.cnot(0, 1)?;
    state.cnot(0, 2)?;

    println!("{}", "GHZ state (|000⟩ + |111⟩)/√2:".yellow());
    print_state(&state);

    println!("\n{}", "Per-qubit measurements (note the correlations):".yellow());
    for trial in 1..=3 {
        let mut copy = state.clone();
        print!("  trial {trial}:");
        for qubit in 0..3 {
            let bit = copy.measure_qubit(qubit, rng)?;
            print!(" q{qubit}={bit}");
        }
        println!();
    }

    Ok(())
}

fn demo_circuit(rng: &mut StdRng) -> qsim_circuits::Result<()> {
    section("Circuit Execution");

    let mut bell = Circuit::bell_state()?;
    bell.add_measure_all()?;
    print!("{bell}");

    let mut state = QuantumState::zero_state(2)?;
    println!("\n{}", "Initial state:".yellow());
    print_state(&state);

    bell.execute(&mut state, rng)?;
    println!("\n{}", "After execution (collapsed by the measurement):".yellow());
    print_state(&state);

    let mut custom = Circuit::new(3, "Custom 3-qubit circuit")?;
    custom.add_hadamard(0)?;
    custom.add_hadamard(1)?;
    custom.add_cnot(0, 2)?;
    custom.add_cnot(1, 2)?;
    custom.add_rotation_z(2, PI / 4.0)?;
    println!("\n{custom}");

    let mut state = QuantumState::zero_state(3)?;
    custom.execute(&mut state, rng)?;
    println!("{}", "Final probabilities:".yellow());
    print_probabilities(&state);

    Ok(())
}

fn demo_deutsch(rng: &mut StdRng) -> qsim_circuits::Result<()> {
    section("Deutsch's Algorithm");

    for constant_one in [false, true] {
        let label = if constant_one { "f(x) = 1" } else { "f(x) = 0" };
        println!("{}", format!("Constant oracle {label}:").yellow());

        let circuit = Circuit::deutsch(constant_one)?;
        let mut state = QuantumState::zero_state(2)?;
        circuit.execute(&mut state, rng)?;

        let p_one: f64 = (0..4)
            .filter(|i| i & 1 == 1)
            .map(|i| state.probability(i))
            .sum();
        println!("  query qubit measured 0 (P(1) = {p_one:.1}) -> constant, as expected\n");
    }

    Ok(())
}

fn run_grover(args: GroverArgs, format: OutputFormat, rng: &mut StdRng) -> Result<(), String> {
    section("Grover's Search Algorithm");

    if args.qubits < 1 || args.qubits > MAX_QUBITS {
        return Err(format!("qubit count must be in [1, {MAX_QUBITS}]"));
    }

    let capacity = 1usize << args.qubits;
    let database: Vec<&str> = DATABASE.iter().copied().take(capacity).collect();

    println!("{}", format!("Searchable database ({} items):", database.len()).yellow());
    for (index, item) in database.iter().enumerate() {
        print!("  {index:2}: {item:<13}");
        if index % 2 == 1 {
            println!();
        }
    }
    if database.len() % 2 == 1 {
        println!();
    }

    let query = match args.target.as_deref() {
        None => TargetQuery::Random,
        Some(raw) => match raw.parse::<usize>() {
            Ok(index) => TargetQuery::Index(index),
            Err(_) => TargetQuery::Name(raw.to_string()),
        },
    };

    let mut state = QuantumState::new(args.qubits).map_err(|e| e.to_string())?;
    let outcome =
        run_database_search(&mut state, &database, &query, rng).map_err(|e| e.to_string())?;

    if matches!(format, OutputFormat::Json) {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => return Err(e.to_string()),
        }
        return Ok(());
    }

    println!(
        "\n{}: \"{}\" -> |{}⟩ (index {})",
        "Target".yellow(),
        database[outcome.target],
        format_basis_state(outcome.target, args.qubits),
        outcome.target
    );
    println!(
        "{}: {} (classical random search needs ~{} attempts)",
        "Iterations".yellow(),
        outcome.iterations,
        database.len() / 2
    );

    println!("\n{}", "Final probabilities (top items):".green());
    let mut ranked: Vec<(usize, f64)> =
        outcome.probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (index, p) in ranked.iter().take(10) {
        let marker = if *index == outcome.target {
            " <-- target".green()
        } else {
            "".normal()
        };
        println!("  {:2}: {:<13} {:6.2}%{}", index, database[*index], p * 100.0, marker);
    }

    println!(
        "\n{}: \"{}\" (index {})",
        "Measurement".yellow(),
        database[outcome.measured],
        outcome.measured
    );
    if outcome.found_target() {
        println!(
            "{} found the target in {} iterations",
            "SUCCESS:".green().bold(),
            outcome.iterations
        );
    } else {
        println!(
            "{} measured \"{}\" instead of \"{}\" (target held {:.1}%)",
            "MISS:".red().bold(),
            database[outcome.measured],
            database[outcome.target],
            outcome.target_probability() * 100.0
        );
    }

    Ok(())
}

fn run_shor(args: ShorArgs, format: OutputFormat) -> Result<(), String> {
    section("Shor's Factoring Algorithm");

    if args.qubits < 4 {
        return Err("factoring needs at least 4 qubits".to_string());
    }
    if args.qubits > MAX_QUBITS {
        return Err(format!("qubit count must be in [1, {MAX_QUBITS}]"));
    }

    // n qubits can factor n/2-bit numbers
    let max_bits = args.qubits / 2;
    let max_number = (1u64 << max_bits) - 1;
    println!(
        "{}",
        format!("{} qubits -> up to {max_bits}-bit numbers (max {max_number})", args.qubits)
            .yellow()
    );

    let number = args.number.unwrap_or_else(|| {
        let default = match max_bits {
            ..=4 => 15,
            5..=6 => 77,
            7..=8 => 221,
            _ => 667,
        };
        println!("No number given; using the default for {} qubits: {default}", args.qubits);
        default
    });

    if number > max_number {
        return Err(format!(
            "{number} is too large for {} qubits (max {max_number}); \
             it would need about {} qubits",
            args.qubits,
            2 * (64 - number.leading_zeros())
        ));
    }
    if number < 4 {
        return Err(format!("{number} has no non-trivial factorisation"));
    }
    if is_prime(number) {
        println!("{}", format!("{number} is prime - nothing to factor").yellow());
    }

    let result = complete_factorisation(number);

    if matches!(format, OutputFormat::Json) {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => return Err(e.to_string()),
        }
        return Ok(());
    }

    println!("\n{}: {}", "Factoring".yellow(), number);
    println!("{}: {}", "Prime factorisation".green().bold(), format_factors(&result.factors));

    if result.verify() {
        let product: u64 = result.factors.iter().product();
        println!("{} product check: {product}", "OK".green());
    } else {
        println!("{} factor product does not reproduce the input", "FAIL".red());
    }
    if !result.complete {
        println!(
            "{}",
            "note: an unsplittable composite was emitted as-is".yellow()
        );
    }

    Ok(())
}

/// Render a factor multiset as "2^2 x 3 x 5"
fn format_factors(factors: &[u64]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < factors.len() {
        let prime = factors[i];
        let count = factors[i..].iter().take_while(|&&f| f == prime).count();
        if count == 1 {
            parts.push(prime.to_string());
        } else {
            parts.push(format!("{prime}^{count}"));
        }
        i += count;
    }
    parts.join(" x ")
}
