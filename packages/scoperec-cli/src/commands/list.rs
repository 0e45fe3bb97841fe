use std::path::Path;

use serde::Serialize;

use scoperec::record_file::record_timestamp;

use crate::cli::ListArgs;
use crate::exit_codes;

#[derive(Serialize)]
struct RecordEntry {
    file: String,
    recorded_at: String,
}

pub fn execute(args: ListArgs) -> i32 {
    let dir = Path::new(&args.records_dir);
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", dir.display(), e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let mut records: Vec<(chrono::NaiveDateTime, String)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            record_timestamp(&name).map(|ts| (ts, name))
        })
        .collect();
    records.sort_by_key(|(ts, _)| *ts);

    if args.json {
        let list: Vec<RecordEntry> = records
            .iter()
            .map(|(ts, name)| RecordEntry {
                file: name.clone(),
                recorded_at: ts.to_string(),
            })
            .collect();
        return match serde_json::to_string_pretty(&list) {
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

    if records.is_empty() {
        println!("No records found in {}", dir.display());
    } else {
        for (_, name) in &records {
            println!("{}", name);
        }
    }
    exit_codes::SUCCESS
}
