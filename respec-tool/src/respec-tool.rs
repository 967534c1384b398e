#![allow(clippy::uninlined_format_args)]

use log::info;
use respec::{backends, Flags, MatchArray, Regex};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
    time::Instant,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "respec-tool")]
struct Opt {
    /// The regular expression.
    pattern: String,

    /// The flags of the regular expression, any of "gimy".
    #[structopt(long, short)]
    flags: Option<Flags>,

    /// Dump the AST to stdout.
    #[structopt(long)]
    dump_ast: bool,

    /// Split the inputs instead of matching against them.
    #[structopt(long)]
    split: bool,

    /// The maximum number of pieces to split into.
    #[structopt(long, requires = "split")]
    limit: Option<usize>,

    /// The input values to match against.
    #[structopt(conflicts_with_all = &["bench", "file"])]
    inputs: Vec<String>,

    /// Match against the contents of a specified file.
    #[structopt(long, conflicts_with_all = &["bench", "inputs"])]
    file: Option<PathBuf>,

    /// Benchmark the matches of the specified file.
    #[structopt(long, conflicts_with_all = &["file", "inputs"])]
    bench: Option<PathBuf>,
}

/// Render an optional string the way a JavaScript console would.
fn format_element(element: &Option<&str>) -> String {
    match element {
        Some(s) => format!("{:?}", s),
        None => "undefined".to_string(),
    }
}

fn format_match_array(m: &MatchArray) -> String {
    let elements: Vec<String> = m.iter().map(format_element).collect();
    format!("[{}] index={}", elements.join(", "), m.index)
}

/// Run exec() on the input, repeatedly for global and sticky regexes.
fn exec_re_on_string(re: &mut Regex, input: &str) {
    re.set_last_index(0);
    let mut found = false;
    while let Some(m) = re.exec(input) {
        found = true;
        println!("{}", format_match_array(&m));
        if !(re.global() || re.sticky()) {
            break;
        }
        if m[0].map_or(true, str::is_empty) {
            // Step past an empty match, as String.prototype.match does.
            let next = input[re.last_index()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            re.set_last_index(re.last_index() + next);
        }
    }
    if !found {
        println!("null");
    }
}

fn split_string(re: &Regex, input: &str, limit: Option<usize>) {
    let pieces: Vec<String> = re.split(input, limit).iter().map(format_element).collect();
    println!("[{}]", pieces.join(", "));
}

fn bench_re_on_path(re: &Regex, path: &Path) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            println!("{}: {}", err, path.display());
            return;
        }
    };
    let input = contents.as_str();
    // Warmup
    re.find_iter(input).count();
    let start = Instant::now();
    for _ in 0..25 {
        re.find_iter(input).count();
    }
    let duration = start.elapsed();
    println!("{} ms", duration.as_millis());
}

fn run(args: Opt) -> Result<(), respec::Error> {
    let flags = args.flags.unwrap_or_default();
    if args.dump_ast {
        let ast = backends::parse(&args.pattern)?;
        println!("AST:\n{}", ast);
    }
    let mut re = Regex::with_options(&args.pattern, flags)?;
    info!("compiled {} with {} capturing groups", re, re.capture_count());

    if let Some(ref path) = args.file {
        match fs::read_to_string(path) {
            Ok(contents) if args.split => split_string(&re, contents.as_str(), args.limit),
            Ok(contents) => exec_re_on_string(&mut re, contents.as_str()),
            Err(err) => println!("{}: {}", err, path.display()),
        };
    } else if let Some(ref path) = args.bench {
        bench_re_on_path(&re, path);
    } else {
        for input in &args.inputs {
            if args.split {
                split_string(&re, input, args.limit);
            } else {
                exec_re_on_string(&mut re, input);
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Opt::from_args()) {
        println!("{}", err);
        process::exit(1);
    }
}
