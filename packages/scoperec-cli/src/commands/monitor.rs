use std::io::Write;

use tokio::io::AsyncReadExt;
use tokio_serial::SerialPortBuilderExt;

use scoperec::record_file::RecordWriter;
use scoperec::{export, reassemble, Frame, RecordFramer};

use crate::cli::MonitorArgs;
use crate::exit_codes;

pub async fn execute(args: MonitorArgs) -> i32 {
    log::info!("Opening serial port: {} at {} baud", args.port, args.baud);
    let mut port = match tokio_serial::new(&args.port, args.baud).open_native_async() {
        Ok(port) => port,
        Err(e) => {
            eprintln!("Error: failed to open {}: {}", args.port, e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let writer = RecordWriter::new(&args.records_dir);
    let mut framer = RecordFramer::new();
    let mut read_buf = [0u8; 1024];
    let stdout = std::io::stdout();

    loop {
        let n = match port.read(&mut read_buf).await {
            Ok(0) => {
                log::warn!("Serial port closed unexpectedly");
                break;
            }
            Ok(n) => n,
            Err(e) => {
                eprintln!("Error: serial read failed: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        };

        let chunk = String::from_utf8_lossy(&read_buf[..n]);
        let echo = framer.ingest(&chunk);
        if !args.no_echo {
            let mut handle = stdout.lock();
            let _ = handle.write_all(echo.as_bytes());
            let _ = handle.flush();
        }

        while let Some(frame) = framer.next_frame() {
            persist_frame(&writer, frame, args.raw_only);
        }
    }

    exit_codes::SUCCESS
}

/// Persists one completed frame and, unless raw-only, exports it as CSV.
/// A frame the reassembler rejects keeps its raw record file; the monitor
/// session continues either way.
fn persist_frame(writer: &RecordWriter, frame: Frame, raw_only: bool) {
    let path = match writer.write(&frame) {
        Ok(path) => {
            eprintln!("Recorded {}", path.display());
            path
        }
        Err(e) => {
            log::error!("Failed to persist record: {}", e);
            return;
        }
    };
    if raw_only {
        return;
    }
    match reassemble(frame) {
        Ok(table) => {
            let csv_path = path.with_extension("csv");
            if let Err(e) = export::write_csv(&table, &csv_path) {
                log::error!("CSV export failed: {}", e);
            } else {
                eprintln!(
                    "Exported {} rows x {} channels to {}",
                    table.num_rows(),
                    table.num_channels(),
                    csv_path.display()
                );
            }
        }
        Err(e) => log::error!("Malformed frame, raw record kept: {}", e),
    }
}
