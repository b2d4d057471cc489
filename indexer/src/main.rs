use anyhow::{Context, Result};
use boolsearch_core::corpus::{build, CorpusOptions};
use boolsearch_core::document::repair_file;
use boolsearch_core::persist::{save_index, save_results, ResultsFormat};
use boolsearch_core::query::parse;
use boolsearch_core::search::{evaluate, MatchMode, Outcome};
use boolsearch_core::tokenizer::SnowballPreprocessor;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boolsearch")]
#[command(about = "Index a directory of French texts and run a boolean keyword query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the corpus and evaluate one query
    Search(SearchArgs),
    /// Repair a single garbled document
    Repair {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Index the corpus and write every (term, document, frequency) triple
    DumpIndex {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long, default_value = "index.tsv")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory holding the documents
    #[arg(long, env = "BOOLSEARCH_CORPUS")]
    corpus: PathBuf,
    /// Extension of indexable files
    #[arg(long, default_value = "txt")]
    extension: String,
    /// Index surface forms instead of Snowball stems
    #[arg(long, default_value_t = false)]
    no_stemming: bool,
    /// Leave `<name>!.<ext>` files unrepaired
    #[arg(long, default_value_t = false)]
    no_repair: bool,
}

impl CorpusArgs {
    fn options(&self) -> CorpusOptions {
        CorpusOptions {
            extension: self.extension.clone(),
            repair_garbled: !self.no_repair,
            stemming: !self.no_stemming,
            ..CorpusOptions::default()
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    /// Query such as `chapeau +pardessus -cou`; read from stdin when absent
    #[arg(long)]
    query: Option<String>,
    /// Results file, written only when the query matched
    #[arg(long, env = "BOOLSEARCH_OUTPUT", default_value = "indexInverse.txt")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
    #[arg(long, value_enum, env = "BOOLSEARCH_MODE", default_value_t = ModeArg::Strict)]
    mode: ModeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ResultsFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => ResultsFormat::Text,
            FormatArg::Json => ResultsFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Enforce `+` and `-`
    Strict,
    /// Treat every term as optional
    Lenient,
}

impl From<ModeArg> for MatchMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Strict => MatchMode::Strict,
            ModeArg::Lenient => MatchMode::Lenient,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_search(&args, &mut stdin.lock(), &mut stdout.lock())
        }
        Commands::Repair { input, output } => {
            repair_file(&input, &output, &SnowballPreprocessor::default())
                .with_context(|| format!("repairing {}", input.display()))?;
            tracing::info!(output = %output.display(), "repaired document written");
            Ok(())
        }
        Commands::DumpIndex { corpus, output } => {
            let options = corpus.options();
            let report = build(&corpus.corpus, &options, &options.normalizer())?;
            save_index(&output, &report.index)?;
            tracing::info!(output = %output.display(), terms = report.index.num_terms(), "index dump written");
            Ok(())
        }
    }
}

fn run_search<R: BufRead, W: Write>(args: &SearchArgs, input: &mut R, out: &mut W) -> Result<()> {
    let dir = &args.corpus.corpus;
    writeln!(out, "Traitement du dossier : {}", dir.display())?;

    let raw = match &args.query {
        Some(q) => q.clone(),
        None => {
            writeln!(out, "Votre recherche :")?;
            out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            line
        }
    };
    let query = parse(&raw)?;

    let options = args.corpus.options();
    let normalizer = options.normalizer();
    let report = build(dir, &options, &normalizer)?;
    let evaluation = evaluate(&report.index, &query.normalize(&normalizer), args.mode.into());

    match evaluation.outcome() {
        Outcome::Matched { documents } => {
            save_results(&args.output, &evaluation, args.format.into())
                .with_context(|| format!("writing results to {}", args.output.display()))?;
            tracing::info!(documents, output = %args.output.display(), "results saved");
            writeln!(out, "\nSauvegarde de l'index inversé : {}", args.output.display())?;
        }
        Outcome::NoResults => {
            writeln!(out, "Le mot(s) recherché(s) n'existe(nt) pas dans le corpus")?;
        }
    }
    writeln!(out, "\nNombre total de fichiers traités : {}", report.index.num_documents())?;
    writeln!(out, "Nombre total d'occurrences trouvées : {}", evaluation.global_frequency)?;

    writeln!(out, "\nDocuments trouvés : ")?;
    for hit in &evaluation.hits {
        writeln!(out, "{hit}")?;
    }
    Ok(())
}
