use std::path::{Path, PathBuf};

use scoperec::record_file::read_record;
use scoperec::{export, reassemble};

use crate::cli::ConvertArgs;
use crate::exit_codes;

pub fn execute(args: ConvertArgs) -> i32 {
    let input = Path::new(&args.file);
    let frame = match read_record(input) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let table = match reassemble(frame) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    if args.json {
        return match serde_json::to_string_pretty(&table) {
            Ok(json) => {
                println!("{}", json);
                exit_codes::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                exit_codes::EXECUTION_ERROR
            }
        };
    }

    let output = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("csv"));
    if let Err(e) = export::write_csv(&table, &output) {
        eprintln!("Error: {}", e);
        return exit_codes::EXECUTION_ERROR;
    }
    eprintln!(
        "Wrote {} rows x {} channels to {}",
        table.num_rows(),
        table.num_channels(),
        output.display()
    );
    exit_codes::SUCCESS
}
