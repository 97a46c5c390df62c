use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use swc_engine::{DEFAULT_SOMA_EXCLUSION_MICRONS, report, run_pipeline};

const USAGE: &str = r#"swc_cli (swc-engine)

USAGE:
  swc_cli run --swc <file> --spine <file> [options]

OPTIONS (run):
  --swc <file>        SWC morphology input (required)
  --spine <file>      Spine observation input (required)
  --output <path>     Write semicolon-separated CSV here (default: output.csv)
  --json <path>       Also write the records as JSON
  --threshold <um>    Soma exclusion radius in micrometers (default: 60)
  --overwrite         Overwrite existing output files
  -h, --help          Show this help
"#;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("swc_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut args = Args::new(args);

    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "run" => cmd_run(&mut args),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }
}

fn print_usage() {
    println!("{USAGE}");
}

fn cmd_run(args: &mut Args) -> Result<(), String> {
    let mut swc_path: Option<PathBuf> = None;
    let mut spine_path: Option<PathBuf> = None;
    let mut output_path = PathBuf::from("output.csv");
    let mut json_path: Option<PathBuf> = None;
    let mut threshold = DEFAULT_SOMA_EXCLUSION_MICRONS;
    let mut overwrite = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--swc" => swc_path = Some(PathBuf::from(args.value("--swc")?)),
            "--spine" => spine_path = Some(PathBuf::from(args.value("--spine")?)),
            "--output" => output_path = PathBuf::from(args.value("--output")?),
            "--json" => json_path = Some(PathBuf::from(args.value("--json")?)),
            "--threshold" => {
                threshold = args
                    .value("--threshold")?
                    .parse()
                    .map_err(|err| format!("invalid --threshold value: {err}"))?;
            }
            "--overwrite" => overwrite = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
        }
    }

    let swc_path = swc_path.ok_or("missing --swc <file>")?;
    let spine_path = spine_path.ok_or("missing --spine <file>")?;

    let swc_text = read_input(&swc_path)?;
    let spine_text = read_input(&spine_path)?;

    let output = run_pipeline(&swc_text, &spine_text, threshold).map_err(|err| err.to_string())?;

    if !output.spine_report.is_clean() {
        eprintln!(
            "warning: {} spine observation(s) reference unknown samples: {:?}",
            output.spine_report.unresolved.len(),
            output.spine_report.unresolved
        );
    }

    write_csv_file(&output_path, &output.metrics, overwrite)?;
    eprintln!("wrote {}", output_path.display());

    if let Some(path) = json_path.as_deref() {
        write_json_file(path, &output.metrics, overwrite)?;
        eprintln!("wrote {}", path.display());
    }

    eprintln!(
        "{} branch record(s), {} spine(s) attached, threshold {threshold} um",
        output.metrics.len(),
        output.spine_report.attached
    );

    Ok(())
}

fn read_input(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("cannot read {}: {err}", path.display()))
}

fn write_csv_file(
    path: &Path,
    records: &[swc_engine::morph::metrics::BranchMetrics],
    overwrite: bool,
) -> Result<(), String> {
    ensure_writable(path, overwrite)?;
    let file = File::create(path).map_err(|err| format!("create {}: {err}", path.display()))?;
    let mut writer = BufWriter::new(file);
    report::write_csv(&mut writer, records)
        .and_then(|()| writer.flush())
        .map_err(|err| format!("write {}: {err}", path.display()))
}

fn write_json_file(
    path: &Path,
    records: &[swc_engine::morph::metrics::BranchMetrics],
    overwrite: bool,
) -> Result<(), String> {
    ensure_writable(path, overwrite)?;
    let json = report::to_json(records).map_err(|err| format!("serialize json: {err}"))?;
    fs::write(path, json).map_err(|err| format!("write {}: {err}", path.display()))
}

fn ensure_writable(path: &Path, overwrite: bool) -> Result<(), String> {
    if path.exists() && !overwrite {
        return Err(format!(
            "refusing to overwrite existing file {} (use --overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("create dir {}: {err}", parent.display()))?;
        }
    }
    Ok(())
}

struct Args {
    args: Vec<String>,
    pos: usize,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self { args, pos: 0 }
    }

    fn next(&mut self) -> Option<String> {
        let arg = self.args.get(self.pos)?.clone();
        self.pos += 1;
        Some(arg)
    }

    fn value(&mut self, flag: &str) -> Result<String, String> {
        self.next()
            .ok_or_else(|| format!("missing value for {flag}"))
    }
}
