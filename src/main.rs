use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use cleandistro::{
    confirm, load_presets, resolve_presets, scan, write_report, Confirmation, ExtensionSet,
    IgnoreSet, MatchCriteria, ScanOptions,
};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find files by extension under a folder and delete them after confirmation",
    long_about = None
)]
struct Args {
    /// The root folder to search for the given extensions
    #[arg(
        long = "root-folder",
        short = 'r',
        alias = "root_folder",
        required_unless_present = "list_presets"
    )]
    root_folder: Option<PathBuf>,

    /// Extensions to look for and delete, matched literally against the end of each path
    #[arg(
        long,
        short,
        num_args = 1..,
        required_unless_present_any = ["preset", "list_presets"],
        value_parser = NonEmptyStringValueParser::new()
    )]
    ext: Vec<String>,

    /// Add the extensions of a named preset (see --list-presets)
    #[arg(long, short)]
    preset: Vec<String>,

    /// Files whose path contains any of these strings are never deleted
    #[arg(
        long = "ignore-in-path",
        short = 'i',
        alias = "ignore_in_path",
        num_args = 0..,
        value_parser = NonEmptyStringValueParser::new()
    )]
    ignore_in_path: Vec<String>,

    /// Show the size of each file and the total
    #[arg(long, short)]
    sizes: bool,

    /// Show detailed information about every file visited
    #[arg(long, short)]
    verbose: bool,

    /// Print the available presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn print_presets() -> Result<()> {
    for preset in load_presets().context("Failed to load presets")? {
        println!("{}", preset.name.bold());
        println!("  {}", preset.description);
        println!("  {}", preset.suffixes.join(" "));
    }
    Ok(())
}

fn build_criteria(args: &Args) -> Result<MatchCriteria> {
    let mut extensions = ExtensionSet::new(args.ext.iter().cloned());
    extensions.extend(resolve_presets(&args.preset).context("Failed to resolve presets")?);

    let ignore = IgnoreSet::new(args.ignore_in_path.iter().cloned());

    Ok(MatchCriteria::new(extensions, ignore))
}

fn run(args: Args) -> Result<()> {
    if args.list_presets {
        return print_presets();
    }

    let root = args
        .root_folder
        .clone()
        .context("A root folder is required")?;
    let criteria = build_criteria(&args)?;
    let options = ScanOptions {
        verbose: args.verbose,
        calculate_sizes: args.sizes,
    };

    let extension_list = criteria
        .extensions
        .iter()
        .map(|ext| format!("'{}'", ext))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Search for [{}] files in '{}' directory and all subdirectories ...\n",
        extension_list,
        root.display()
    );
    for item in criteria.ignore.iter() {
        println!("Ignoring filenames with: {}", item);
    }
    println!("Scanning ...");

    let matches = scan(&root, &criteria, options)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    if matches.is_empty() {
        println!("No matching files found");
        println!("[Done]");
        return Ok(());
    }

    let total = matches.count();
    let confirmation = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(&mut out, &matches, options).context("Failed to write report")?;
        writeln!(out)?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        confirm(matches, &mut input, &mut out)
    };

    match confirmation {
        Confirmation::Approved(approved) => {
            let outcome = approved.execute_with(|item| match &item.result {
                Ok(()) => println!("Deleting {}", item.path.display()),
                Err(err) => eprintln!("Error removing {}", err),
            });

            let tally = format!(
                "Deleted {} of {} files ({} failed)",
                outcome.succeeded(),
                total,
                outcome.failed()
            );
            if outcome.failed() > 0 {
                println!("\n{}", tally.red().bold());
            } else {
                println!("\n{}", tally.green().bold());
            }
        }
        Confirmation::Declined => println!("No files deleted"),
    }

    println!("[Done]");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    run(args)?;

    Ok(())
}
