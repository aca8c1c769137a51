use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use keyhole::jvm::{self, ClassFile, class_file::JAVA_LANG_OBJECT};
use thiserror::Error;

/// Formatting of decoded class files
mod printer;

/// Command line arguments
#[derive(Parser)]
#[command(name = "keyhole", version)]
#[command(about = "Provides introspection and instrumentation for JVM bytecode", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Examines data in a .class file
    Inspect {
        /// Class file to inspect
        file: PathBuf,
    },
    /// Writes an example .class file
    TestClass {
        /// Where to write the class file
        file: PathBuf,
        /// Binary name of the generated class
        #[arg(long, default_value = "MyClass")]
        name: String,
        /// Binary name of the superclass
        #[arg(long = "super", default_value = JAVA_LANG_OBJECT)]
        super_name: String,
    },
}

/// Errors raised by the command line front end
#[derive(Debug, Error)]
enum CliError {
    /// Error when reading or writing files
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error when decoding or resolving a class file
    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: jvm::Error },

    /// Error when encoding a class file
    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: jvm::EncodeError,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let result = match args.command {
        Command::Inspect { file } => inspect(&file),
        Command::TestClass {
            file,
            name,
            super_name,
        } => write_test_class(&file, &name, &super_name),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn inspect(path: &Path) -> Result<(), CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    let class = ClassFile::parse(&bytes).map_err(|source| CliError::Parse {
        path: path.to_owned(),
        source,
    })?;
    printer::ClassPrinter::new(&class)
        .print()
        .map_err(|source| CliError::Parse {
            path: path.to_owned(),
            source,
        })
}

fn write_test_class(path: &Path, name: &str, super_name: &str) -> Result<(), CliError> {
    let class = ClassFile::new(name, super_name);
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })?;
    class
        .to_writer(BufWriter::new(file))
        .and_then(|writer| writer.into_inner().map_err(|e| e.into_error().into()))
        .map_err(|source| CliError::Encode {
            path: path.to_owned(),
            source,
        })?;
    log::info!("Wrote {name} extending {super_name} to {}", path.display());
    Ok(())
}
