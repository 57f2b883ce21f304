use std::io::Read;
use std::process::ExitCode;

use gene_lib::cli::{CliArgs, Input, USAGE};
use gene_lib::{compile_source, output, CompilerSettings, GeneError, GeneResult};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genec=info,gene_lib=info".into()),
        )
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> GeneResult<()> {
    let mut settings = match &args.settings {
        Some(path) => CompilerSettings::load_from(path)?,
        None => CompilerSettings::load(),
    };
    args.apply_to(&mut settings);

    let source = read_source(args.input.as_ref().ok_or(GeneError::MissingInput)?)?;
    let compilation = compile_source(&source, &settings);
    if compilation.is_empty() {
        return Err(GeneError::EmptyInput);
    }
    if !compilation.diagnostics.is_empty() {
        tracing::warn!("{} line(s) dropped", compilation.diagnostics.len());
    }

    output::emit(
        &compilation,
        args.format,
        args.out.as_deref(),
        settings.export.pretty,
    )
}

fn read_source(input: &Input) -> GeneResult<String> {
    match input {
        Input::File(path) => {
            let source = std::fs::read_to_string(path).map_err(|e| GeneError::io(path, e))?;
            tracing::info!("Loaded {} ({} bytes)", path.display(), source.len());
            Ok(source)
        }
        Input::Stdin => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| GeneError::io("<stdin>", e))?;
            Ok(source)
        }
    }
}
