//! Monkey interpreter CLI.

use monkey_eval::Value;
use monkeyc::{init_tracing, repl, run_file, Session};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        start_repl();
        return;
    };

    match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: monkey run <file.monkey>");
                std::process::exit(1);
            };
            run(path);
        }
        "repl" => start_repl(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("Monkey {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("monkey"))
            {
                run(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn start_repl() {
    let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
    println!("Hello {user}! This is the Monkey programming language!");
    println!("Feel free to type in commands");

    let mut session = Session::default();
    let stdin = std::io::stdin();
    if let Err(err) = repl(stdin.lock(), &mut std::io::stdout(), &mut session) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(path: &str) {
    let mut session = Session::default();
    match run_file(path, &mut session) {
        Ok(Value::Null) => {}
        Ok(value) => println!("{}", value.inspect()),
        Err(err) => {
            eprintln!("{}", err.to_string().trim_end());
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Monkey interpreter");
    println!();
    println!("Usage: monkey [command]");
    println!();
    println!("Commands:");
    println!("  (none)               Start the interactive REPL");
    println!("  repl                 Start the interactive REPL");
    println!("  run <file.monkey>    Evaluate a Monkey program");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable logging (e.g. RUST_LOG=monkey_eval=debug)");
}
