use std::{
    path::{
        Path,
        PathBuf,
    },
    process::ExitCode,
};

use clap::Parser;
use mdcloud::{
    core::{
        pipeline::{
            AnalyzerSource,
            LanguageTools,
        },
        CloudError,
        NormalizeConfig,
        StopwordSet,
    },
    dictionary::DictType,
    render::{
        parse_color,
        CloudFont,
        RenderOptions,
        WordCloud,
    },
    tools::analysis::{
        analyze_files,
        export_log,
        find_markdown_files,
    },
};
use tracing_subscriber::EnvFilter;

const DEFAULT_STOPWORDS_EN: &str = "stopwords_en.txt";
const DEFAULT_STOPWORDS_JA: &str = "stopwords_ja.txt";
const DEFAULT_NORMALIZE: &str = "normalize.json";

/// Build a word cloud from a directory of English and Japanese markdown posts.
#[derive(Parser, Debug)]
#[command(name = "mdcloud", version)]
struct Args {
    /// Directory searched recursively for `.md` files.
    target: PathBuf,

    /// Number of top tokens to render and log.
    #[arg(long, default_value_t = 80)]
    top: usize,

    #[arg(long, default_value_t = 900)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// `white`, `transparent`, a basic CSS colour name or a hex code.
    #[arg(long, default_value = "white")]
    bg_color: String,

    /// TTF/OTF font. Needed when the cloud contains Japanese.
    #[arg(long, value_name = "FILE")]
    font_path: Option<PathBuf>,

    #[arg(long, value_name = "FILE", default_value = "word_cloud.png")]
    output: PathBuf,

    /// Tab-separated `token count` lines for the top tokens.
    #[arg(long, value_name = "FILE", default_value = "word_cloud.log")]
    log: PathBuf,

    /// English stopword list, one word per line [default: stopwords_en.txt]
    #[arg(long, value_name = "FILE")]
    stopwords_en: Option<PathBuf>,

    /// Japanese stopword list, one word per line [default: stopwords_ja.txt]
    #[arg(long, value_name = "FILE")]
    stopwords_ja: Option<PathBuf>,

    /// JSON map of `{"en": {...}, "ja": {...}}` normalization rules [default: normalize.json]
    #[arg(long, value_name = "FILE")]
    normalize_case: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DictType::Ipadic)]
    dict_type: DictType,

    /// Local vibrato `system.dic`; skips the download.
    #[arg(long, value_name = "FILE")]
    dict_path: Option<PathBuf>,

    /// Seed for word placement and colours.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Largest font size in pixels [default: height / 3]
    #[arg(long)]
    max_font_size: Option<f32>,

    /// How strongly size follows frequency; 0 gives equal sizes.
    #[arg(long, default_value_t = 0.5)]
    relative_scaling: f32,
}

/// Explicitly passed config paths must exist; the defaults may be absent.
fn config_path<'a>(explicit: &'a Option<PathBuf>, default: &'a str) -> (&'a Path, bool) {
    match explicit {
        Some(path) => (path.as_path(), true),
        None => (Path::new(default), false),
    }
}

fn run(args: Args) -> Result<(), CloudError> {
    tracing::info!("Scanning markdown files under {}", args.target.display());
    let files = find_markdown_files(&args.target)?;
    tracing::info!("Found {} markdown files", files.len());

    let (path, required) = config_path(&args.stopwords_en, DEFAULT_STOPWORDS_EN);
    let stopwords_en = StopwordSet::load(path, required)?;
    let (path, required) = config_path(&args.stopwords_ja, DEFAULT_STOPWORDS_JA);
    let stopwords_ja = StopwordSet::load(path, required)?;
    let (path, required) = config_path(&args.normalize_case, DEFAULT_NORMALIZE);
    let normalize = NormalizeConfig::load(path, required)?;

    let background = parse_color(&args.bg_color)?;

    let mut language_tools = LanguageTools::new(
        stopwords_en,
        stopwords_ja,
        normalize,
        AnalyzerSource { dict_type: args.dict_type, dict_path: args.dict_path.clone() },
    );

    let result = analyze_files(&files, &mut language_tools)?;
    tracing::info!(
        "Counted {} tokens ({} unique) across {} files",
        result.total_terms,
        result.unique_terms,
        result.files_processed
    );

    let top = result.frequencies.top_n(args.top);
    export_log(&top, &args.log)?;
    tracing::info!("Top tokens written to {}", args.log.display());

    let font = CloudFont::resolve(args.font_path.as_deref())?;
    let options = RenderOptions {
        width: args.width,
        height: args.height,
        background,
        max_font_size: args.max_font_size,
        relative_scaling: args.relative_scaling,
        seed: args.seed,
    };
    WordCloud::new(font, options).save(&top, &args.output)?;
    tracing::info!("Word cloud image saved to {}", args.output.display());

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
