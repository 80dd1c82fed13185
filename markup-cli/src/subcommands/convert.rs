use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::Args as ClapArgs;
use markup_converters_core::{GeneratorMetadata, Options, PrettyDuration, Processable};
use markup_parser::Node;
use rayon::prelude::*;

use crate::error;

/// Convert plain-text markup documents to XHTML
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// List of files to convert
    #[arg(conflicts_with = "stdin")]
    pub files: Vec<PathBuf>,

    /// Input from stdin, output to stdout
    #[arg(long, conflicts_with = "files")]
    pub stdin: bool,

    /// Suppress the enclosing document structure and output an embeddable fragment
    ///
    /// When enabled, the output excludes the DOCTYPE, html, head, and body tags.
    #[arg(short = 'e', long)]
    pub embedded: bool,

    /// Show timing information
    #[arg(long)]
    pub timings: bool,

    /// Number of spaces a tab expands to
    #[arg(long, value_name = "N", default_value_t = markup_parser::text::TAB_WIDTH)]
    pub tab_width: usize,

    /// Write the output to FILE instead of next to the input
    ///
    /// Only valid with a single input file or with --stdin.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// A parsed input, with the source text kept for error reports.
struct Parsed {
    file: PathBuf,
    source: Option<String>,
    result: Result<Node, markup_parser::Error>,
}

impl Parsed {
    fn source_context(&self) -> Option<(&Path, &str)> {
        self.source
            .as_deref()
            .map(|source| (self.file.as_path(), source))
    }
}

pub fn run(args: &Args) -> miette::Result<()> {
    if !args.stdin && args.files.is_empty() {
        return Err(miette::miette!(
            help = "pass one or more files, or --stdin",
            "no input to convert"
        ));
    }
    if args.output.is_some() && args.files.len() > 1 {
        return Err(miette::miette!(
            "--output can only be used with a single input file"
        ));
    }

    let options = Options::builder()
        .generator_metadata(GeneratorMetadata::new(
            env!("CARGO_BIN_NAME"),
            env!("CARGO_PKG_VERSION"),
        ))
        .timings(args.timings)
        .embedded(args.embedded)
        .build();
    let mut parser_builder = markup_parser::Options::builder().with_tab_width(args.tab_width);
    if args.timings {
        parser_builder = parser_builder.with_timings();
    }
    let parser_options = parser_builder.build();

    if args.stdin {
        return run_stdin(args, options, &parser_options);
    }
    run_processor::<markup_converters_html::Processor>(args, &options, &parser_options)
}

fn run_stdin(
    args: &Args,
    options: Options,
    parser_options: &markup_parser::Options,
) -> miette::Result<()> {
    let mut source = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut source)
        .map_err(|e| error::display(&e, None))?;
    let root = markup_parser::parse_with_options(&source, parser_options)
        .map_err(|e| error::display(&e, Some((Path::new("<stdin>"), source.as_str()))))?;
    let processor = markup_converters_html::Processor::new(options);
    let result = match &args.output {
        Some(output) => write_output(&processor, &root, output),
        None => processor.convert(&root, None),
    };
    result.map_err(|e| error::display(&e, None))
}

fn write_output(
    processor: &markup_converters_html::Processor,
    root: &Node,
    output: &Path,
) -> Result<(), markup_converters_html::Error> {
    let file = std::fs::File::create(output)?;
    processor.write_to(root, file)?;
    tracing::info!(destination = ?output, "generated XHTML file");
    Ok(())
}

fn parse_file(file: &Path, parser_options: &markup_parser::Options) -> Parsed {
    let now = std::time::Instant::now();
    let (source, result) = match std::fs::read_to_string(file) {
        Ok(source) => {
            let result = markup_parser::parse_with_options(&source, parser_options);
            (Some(source), result)
        }
        Err(e) => (None, Err(e.into())),
    };
    if parser_options.timings && result.is_ok() {
        eprintln!("  Parsed {} in {}", file.display(), now.elapsed().pretty_print());
    }
    Parsed {
        file: file.to_path_buf(),
        source,
        result,
    }
}

#[tracing::instrument(skip_all, fields(files = args.files.len()))]
fn run_processor<P>(
    args: &Args,
    options: &Options,
    parser_options: &markup_parser::Options,
) -> miette::Result<()>
where
    P: Processable<Options = Options>,
    P::Error: Send + std::error::Error + 'static + From<markup_parser::Error>,
{
    // Parse all files in parallel; parses share no state.
    let parsed: Vec<Parsed> = args
        .files
        .par_iter()
        .map(|file| parse_file(file, parser_options))
        .collect();

    // With --output there is exactly one file, written where the user asked.
    if let (Some(output), [single]) = (&args.output, parsed.as_slice()) {
        let root = single
            .result
            .as_ref()
            .map_err(|e| error::display(e, single.source_context()))?;
        if output == &single.file {
            let e = markup_converters_html::Error::OutputPathSameAsInput(output.clone());
            return Err(error::display(&e, None));
        }
        let processor = markup_converters_html::Processor::new(options.clone());
        return write_output(&processor, root, output).map_err(|e| error::display(&e, None));
    }

    // Each file converts to its own output file, so conversion parallelizes too.
    let results: Vec<(PathBuf, Option<String>, Result<(), P::Error>)> = parsed
        .into_par_iter()
        .map(|Parsed { file, source, result }| {
            let processor = P::new(options.clone());
            let convert_result = match result {
                Ok(root) => processor.convert(&root, Some(file.as_path())),
                Err(e) => Err(e.into()),
            };
            (file, source, convert_result)
        })
        .collect();

    let errors: Vec<_> = results
        .iter()
        .filter_map(|(file, source, result)| result.as_ref().err().map(|e| (file, source, e)))
        .collect();

    if !errors.is_empty() {
        eprintln!("\nFailed to process {} file(s):", errors.len());
        for (idx, (file, source, error)) in errors.iter().enumerate() {
            eprintln!("\n{}. File: {}", idx + 1, file.display());
            let context = source.as_deref().map(|source| (file.as_path(), source));
            let report = error::display(*error, context);
            eprintln!("{report:?}");
        }
        return Err(miette::miette!("failed to process {} file(s)", errors.len()));
    }

    Ok(())
}
