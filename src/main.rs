use clap::{Args, Parser, Subcommand};
use simrec_api::{RestApi, TmdbConfig, TmdbProvider};
use simrec_core::{ItemId, MetadataError, MetadataProvider, NoMetadata, Recommender};
use simrec_storage::{read_matrix, write_matrix, ArtifactSource, DatasetLoader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend similar items from a precomputed similarity matrix
#[derive(Parser, Debug)]
#[command(name = "simrec")]
#[command(about = "Item-to-item recommendations from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        tmdb: TmdbArgs,

        /// HTTP API port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,
    },
    /// Print recommendations for one title
    Recommend {
        /// Title of the item to find neighbors for
        title: String,

        /// Number of recommendations
        #[arg(short, default_value_t = simrec_core::DEFAULT_LIMIT)]
        k: usize,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        tmdb: TmdbArgs,
    },
    /// Rewrite a matrix artifact in another format and print its SHA-256
    Convert {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Catalog artifact (.json or .json.gz)
    #[arg(long, default_value = "movies.json")]
    catalog: PathBuf,

    /// Similarity matrix artifact (.bin, .json or .json.gz)
    #[arg(long, default_value = "similarity.bin")]
    matrix: PathBuf,

    /// Expected SHA-256 of the matrix artifact
    #[arg(long)]
    matrix_sha256: Option<String>,
}

#[derive(Args, Debug)]
struct TmdbArgs {
    /// TMDB read-access token; posters are skipped without one
    #[arg(long)]
    tmdb_token: Option<String>,

    #[arg(long, default_value = simrec_api::DEFAULT_API_BASE)]
    tmdb_api_base: String,

    #[arg(long, default_value = simrec_api::DEFAULT_IMAGE_BASE)]
    tmdb_image_base: String,

    #[arg(long, default_value = "en-US")]
    tmdb_language: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    tmdb_timeout_secs: u64,
}

/// Poster source picked at start-up
enum Posters {
    Tmdb(TmdbProvider),
    Offline(NoMetadata),
}

impl MetadataProvider for Posters {
    async fn image_url(&self, id: ItemId) -> Result<Option<String>, MetadataError> {
        match self {
            Posters::Tmdb(provider) => provider.image_url(id).await,
            Posters::Offline(provider) => provider.image_url(id).await,
        }
    }
}

impl TmdbArgs {
    fn into_provider(self) -> anyhow::Result<Posters> {
        let Some(token) = self.tmdb_token else {
            info!("No TMDB token given, posters disabled");
            return Ok(Posters::Offline(NoMetadata));
        };
        let config = TmdbConfig {
            api_base: self.tmdb_api_base,
            image_base: self.tmdb_image_base,
            language: self.tmdb_language,
            timeout: Duration::from_secs(self.tmdb_timeout_secs),
        };
        Ok(Posters::Tmdb(TmdbProvider::new(token, config)?))
    }
}

impl DataArgs {
    fn loader(&self) -> DatasetLoader {
        let loader = DatasetLoader::from_paths(&self.catalog, &self.matrix);
        match &self.matrix_sha256 {
            Some(checksum) => loader.with_matrix_sha256(checksum.clone()),
            None => loader,
        }
    }
}

fn build_recommender(data: DataArgs, tmdb: TmdbArgs) -> anyhow::Result<Arc<Recommender<Posters>>> {
    info!("Catalog: {:?}", data.catalog);
    info!("Similarity matrix: {:?}", data.matrix);
    let dataset = data.loader().load()?;
    let provider = tmdb.into_provider()?;
    Ok(Arc::new(Recommender::new(dataset, provider)))
}

async fn serve(recommender: Arc<Recommender<Posters>>, http_port: u16) -> anyhow::Result<()> {
    let http_handle = RestApi::spawn(recommender, http_port);
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            match joined? {
                Ok(Ok(())) => info!("HTTP server stopped"),
                Ok(Err(e)) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("HTTP server on port {} failed", http_port)));
                }
                Err(_) => anyhow::bail!("HTTP server thread panicked"),
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

async fn print_recommendations(
    recommender: &Recommender<Posters>,
    title: &str,
    k: usize,
) -> anyhow::Result<()> {
    let results = match recommender.recommend(title, k).await {
        Ok(results) => results,
        Err(e) if e.is_not_found() => {
            println!("No item titled {:?} in the catalog", title);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Top {} items similar to {}:", results.len(), title);
    for (rank, rec) in results.iter().enumerate() {
        match &rec.image_url {
            Some(url) => println!("{}. {} ({:.3}) {}", rank + 1, rec.title, rec.score, url),
            None => println!("{}. {} ({:.3})", rank + 1, rec.title, rec.score),
        }
    }
    Ok(())
}

fn convert(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let matrix = read_matrix(&ArtifactSource::new(&input))?;
    let checksum = write_matrix(&output, &matrix)?;
    info!("Converted {:?} -> {:?} ({}x{})", input, output, matrix.dim(), matrix.dim());
    println!("{}  {}", checksum, output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting simrec v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve {
            data,
            tmdb,
            http_port,
        } => {
            let recommender = build_recommender(data, tmdb)?;
            serve(recommender, http_port).await
        }
        Command::Recommend { title, k, data, tmdb } => {
            let recommender = build_recommender(data, tmdb)?;
            print_recommendations(&recommender, &title, k).await
        }
        Command::Convert { input, output } => convert(input, output),
    }
}
