//! Command-line client for the DPB paste store.

mod guide;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use dpb_core::lifecycle::RenderedPaste;
use dpb_core::{
    render, ClientConfig, CreateController, CreateOutcome, ExpirationChoice, PasteDraft,
    TransportClient, ViewController, ViewOutcome,
};
use guide::MARKDOWN_GUIDE;
use serde_json::json;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dpb", about = "DPB paste client", version)]
struct Cli {
    /// Store API URL (can also be set via DPB_SERVER env var)
    #[arg(short, long, env = "DPB_SERVER", global = true)]
    server: Option<String>,

    /// Public site URL used for share links (can also be set via DPB_SHARE_URL)
    #[arg(long, env = "DPB_SHARE_URL", global = true)]
    share_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExpireArg {
    Hour,
    Day,
    Week,
    Never,
    Custom,
}

impl From<ExpireArg> for ExpirationChoice {
    fn from(value: ExpireArg) -> Self {
        match value {
            ExpireArg::Hour => ExpirationChoice::Hour,
            ExpireArg::Day => ExpirationChoice::Day,
            ExpireArg::Week => ExpirationChoice::Week,
            ExpireArg::Never => ExpirationChoice::Never,
            ExpireArg::Custom => ExpirationChoice::Custom,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Publish a new paste (content from --file or stdin)
    New {
        #[arg(short = 'T', long)]
        title: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        expire: Option<ExpireArg>,
        /// Custom lifetime in seconds; implies --expire custom
        #[arg(long)]
        seconds: Option<String>,
    },
    /// Fetch and render a paste
    View {
        key: String,
        /// Print the raw markdown instead of HTML
        #[arg(long, conflicts_with = "page")]
        source: bool,
        /// Print a standalone HTML page
        #[arg(long)]
        page: bool,
    },
    /// Render local markdown without contacting the store
    Render {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the markdown and math usage guide
    Guide {
        /// Print the rendered guide instead of its source
        #[arg(long)]
        html: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
    Fragment,
    Source,
    Page,
}

fn view_mode(source: bool, page: bool) -> ViewMode {
    match (source, page) {
        (true, _) => ViewMode::Source,
        (false, true) => ViewMode::Page,
        (false, false) => ViewMode::Fragment,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dpb=warn,dpb_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_source(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {}", path.display(), err)),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn resolve_config(
    server: Option<String>,
    share_url: Option<String>,
    timeout: Option<u64>,
) -> ClientConfig {
    ClientConfig::from_env().with_overrides(server, share_url, timeout)
}

fn expiration_choice(expire: Option<ExpireArg>, seconds: Option<&str>) -> ExpirationChoice {
    match (expire, seconds) {
        (Some(expire), _) => expire.into(),
        (None, Some(_)) => ExpirationChoice::Custom,
        (None, None) => ExpirationChoice::default(),
    }
}

fn build_draft(
    title: String,
    content: String,
    expire: Option<ExpireArg>,
    seconds: Option<String>,
) -> PasteDraft {
    let expiration = expiration_choice(expire, seconds.as_deref());
    PasteDraft {
        title,
        content,
        expiration,
        custom_seconds: seconds.unwrap_or_default(),
    }
}

fn format_published(key: &str, url: &str, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(&json!({ "key": key, "url": url }));
    }
    Ok(url.to_string())
}

fn format_view_output(
    paste: &RenderedPaste,
    mode: ViewMode,
    json: bool,
) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(&json!({
            "key": paste.document.key,
            "title": paste.document.title,
            "created_at": paste.document.created_at,
            "expire_at": paste.document.expire_at,
            "content": paste.document.content,
            "html": paste.html.as_str(),
        }));
    }
    Ok(match mode {
        ViewMode::Fragment => paste.html.to_string(),
        ViewMode::Source => paste.document.content.clone(),
        ViewMode::Page => paste.to_page(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        server,
        share_url,
        timeout,
        json,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    init_tracing();
    let config = resolve_config(server, share_url, timeout);
    tracing::debug!(
        server = %config.base_url,
        share_url = %config.share_url,
        timeout_secs = config.timeout.as_secs(),
        "resolved client config"
    );

    match command {
        Commands::Completions { .. } => unreachable!("completions handled before client setup"),
        Commands::New {
            title,
            file,
            expire,
            seconds,
        } => {
            let content = read_source(file.as_deref())?;
            let draft = build_draft(title, content, expire, seconds);
            let client = TransportClient::new(config.clone())?;
            let mut controller = CreateController::new(draft);

            match controller.submit(&client).await {
                CreateOutcome::Published { key, .. } => {
                    let url = config.share_link(&key)?;
                    println!("{}", format_published(&key, &url, json)?);
                }
                CreateOutcome::Rejected(failure) => {
                    for message in failure.messages() {
                        eprintln!("New failed: {}", message);
                    }
                    std::process::exit(1);
                }
                CreateOutcome::Failed { message } => {
                    eprintln!("New failed: {}", message);
                    std::process::exit(1);
                }
                other => {
                    eprintln!("New failed: unexpected outcome {:?}", other);
                    std::process::exit(1);
                }
            }
        }
        Commands::View { key, source, page } => {
            let client = TransportClient::new(config.clone())?;
            let mut view = ViewController::new();

            match view.load(&client, &key).await {
                Some(ViewOutcome::Rendered) => {
                    let Some(paste) = view.rendered() else {
                        anyhow::bail!("view rendered without a paste");
                    };
                    println!("{}", format_view_output(paste, view_mode(source, page), json)?);
                }
                Some(ViewOutcome::Redirected(_)) => {
                    eprintln!(
                        "Paste '{}' is unavailable. Create a new one at {}",
                        key,
                        config.create_page()?
                    );
                    std::process::exit(1);
                }
                Some(ViewOutcome::Stale) | None => {
                    eprintln!("View failed: paste key cannot be empty");
                    std::process::exit(1);
                }
            }
        }
        Commands::Render { file } => {
            let source = read_source(file.as_deref())?;
            println!("{}", render(&source));
        }
        Commands::Guide { html } => {
            if html {
                println!("{}", render(MARKDOWN_GUIDE));
            } else {
                println!("{}", MARKDOWN_GUIDE);
            }
        }
    }

    Ok(())
}
