//! Subcommand inference for the forgiving command line.
//!
//! `mhfpac in.bin out.csv` means export and `mhfpac in.bin edits.csv out.bin`
//! means import. A subcommand written anywhere on the line is moved to the front.

use std::ffi::OsString;

const SUBCOMMANDS: [&str; 4] = ["export", "import", "tables", "help"];

/// Options that consume the following argument
const VALUE_OPTIONS: [&str; 4] = ["--encoding", "--tables", "--report", "--blob-pointer"];

fn has_extension(arg: &OsString, extensions: &[&str]) -> bool {
    let lower = arg.to_string_lossy().to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}

fn looks_bin(arg: &OsString) -> bool {
    has_extension(arg, &[".bin", ".pac"])
}

fn looks_csv(arg: &OsString) -> bool {
    has_extension(arg, &[".csv"])
}

/// Positions of positional arguments, skipping option values
fn positional_indices(args: &[OsString]) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut skip_next = false;
    for (i, arg) in args.iter().enumerate().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        let text = arg.to_string_lossy();
        if text.starts_with('-') {
            skip_next = VALUE_OPTIONS.iter().any(|opt| *opt == text);
            continue;
        }
        indices.push(i);
    }
    indices
}

/// Rewrite `args` (program name first) so clap sees a subcommand first
pub fn infer_command(mut args: Vec<OsString>) -> Vec<OsString> {
    let positions = positional_indices(&args);

    if let Some(&pos) = positions
        .iter()
        .find(|&&i| SUBCOMMANDS.iter().any(|cmd| args[i] == **cmd))
    {
        let command = args.remove(pos);
        args.insert(1, command);
        return args;
    }

    let command = {
        let files: Vec<&OsString> = positions.iter().map(|&i| &args[i]).collect();
        match files.as_slice() {
            [bin, csv] if looks_bin(bin) && looks_csv(csv) => Some("export"),
            [bin, csv, out] if looks_bin(bin) && looks_csv(csv) && looks_bin(out) => {
                Some("import")
            }
            _ => None,
        }
    };

    if let Some(command) = command {
        args.insert(1, OsString::from(command));
    }
    args
}
