use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Once,
    time::Duration,
};

use blast::{
    interpreter::{
        evaluator::core::{
            DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_STRING_LEN, Interpreter, InterpreterConfig,
        },
        parser::line::{Line, LineKind},
    },
    run_file, script_path,
};
use clap::Parser;

/// blast is a small scripting language with functions, loops and
/// conditionals over numbers, strings and booleans.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run. The `.blast` extension may be omitted. Without a script,
    /// blast starts an interactive prompt.
    file: Option<PathBuf>,

    /// Pipe mode is a feature that automatically prints out the value of the
    /// last statement of a blast script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Deepest allowed nesting of function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Timeout of the requests made by `get`, in seconds. 0 waits
    /// indefinitely.
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    http_timeout: u64,

    /// Longest string, in bytes, a script may build with `+` or `*`.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_STRING_LEN)]
    max_string_len: usize,
}

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber, only if `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
                    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

                    if std::env::var("RUST_LOG").is_ok() {
                        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                                        .with_target(true)
                                                                        .with_level(true))
                                                      .with(EnvFilter::from_default_env())
                                                      .init();
                    }
                });
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let http_timeout = (args.http_timeout > 0).then(|| Duration::from_secs(args.http_timeout));
    let config = InterpreterConfig { max_call_depth: args.max_call_depth,
                                     http_timeout,
                                     max_string_len: args.max_string_len };
    let mut interpreter = Interpreter::with_config(config);

    let Some(file) = args.file else {
        repl(&mut interpreter);
        return ExitCode::SUCCESS;
    };

    match run_file(&mut interpreter, &script_path(file)) {
        Ok(value) => {
            if args.pipe_mode && !value.is_nil() {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Reads lines from stdin until it is closed.
///
/// Single lines are evaluated and their value echoed. A line that opens a
/// block starts buffering, and the buffered program runs once every block in
/// it is closed. Errors are reported and the session goes on.
fn repl(interpreter: &mut Interpreter) {
    let stdin = io::stdin();
    let mut pending = String::new();
    let mut depth = 0usize;

    loop {
        print!("{}", if depth == 0 { "> " } else { ". " });
        if io::stdout().flush().is_err() {
            return;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => return,
            Ok(_) => {},
            Err(e) => {
                eprintln!("{e}");
                return;
            },
        }

        let kind = Line::parse(&input, 1).map(|line| line.kind).ok();

        if depth == 0 && !kind.is_some_and(LineKind::opens_block) {
            match interpreter.evaluate(input.trim_end()) {
                Ok(output) if output.is_empty() => {},
                Ok(output) => println!("{output}"),
                Err(e) => eprintln!("{e}"),
            }
            continue;
        }

        pending.push_str(&input);
        match kind {
            Some(kind) if kind.opens_block() => depth += 1,
            Some(LineKind::End) => depth -= 1,
            _ => {},
        }

        if depth == 0 {
            let program = std::mem::take(&mut pending);
            if let Err(e) = interpreter.run(&program) {
                eprintln!("{e}");
            }
        }
    }
}
