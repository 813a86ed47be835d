use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use practice_core::Clock;
use practice_core::model::{AuthToken, UserId, WordStatus};
use services::{
    ApiClient, ApiConfig, DashboardView, GradeOutcome, HostContext, ReviewController,
    ReviewStart, Session, ViewState, VocabularyView, bootstrap,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::host::EnvHost;

#[derive(Parser)]
#[command(name = "practice", version, about = "Language practice client", long_about = None)]
pub struct Cli {
    /// Backend base URL (defaults to PRACTICE_API_URL or http://localhost:8000).
    #[arg(long)]
    api_url: Option<String>,

    /// Signed launch payload, forwarded verbatim as the auth token.
    #[arg(long, env = "PRACTICE_INIT_DATA")]
    init_data: Option<String>,

    /// User id, when the launch payload does not carry one.
    #[arg(long, env = "PRACTICE_USER_ID")]
    user_id: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the progress dashboard.
    Dashboard {
        /// Chart window in days (1-30).
        #[arg(long)]
        days: Option<u32>,
    },
    /// List vocabulary and the due queue.
    Words {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Add a word to the vocabulary.
    Add { word: String },
    /// Remove a word from the vocabulary.
    Remove { word: String },
    /// Review the words due today.
    Review,
    /// Check the launch payload against the backend.
    Validate,
    /// Check that the backend is up.
    Health,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    New,
    Learning,
    Mastered,
}

impl From<StatusArg> for WordStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::New => WordStatus::New,
            StatusArg::Learning => WordStatus::Learning,
            StatusArg::Mastered => WordStatus::Mastered,
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ApiConfig::from_env().context("invalid backend configuration")?;
    if let Some(url) = &cli.api_url {
        config = ApiConfig::new(url)
            .context("invalid --api-url")?
            .with_chart_days(config.chart_days)
            .with_due_limit(config.due_limit);
    }
    let api = ApiClient::new(config);

    // These two never need an identity.
    match &cli.command {
        Command::Health => {
            let health = api.health().await?;
            println!("backend: {}", health.status);
            return Ok(());
        }
        Command::Validate => {
            let token = AuthToken::new(cli.init_data.clone().unwrap_or_default());
            let validated = api.validate_token(&token).await?;
            println!("{}: user {}", validated.status, validated.user.id);
            return Ok(());
        }
        _ => {}
    }

    let host = EnvHost::from_args(cli.init_data.clone(), cli.user_id.map(UserId::new))
        .map(|host| Arc::new(host) as Arc<dyn HostContext>);
    let session = bootstrap(host.as_deref())?;

    match cli.command {
        Command::Dashboard { days } => dashboard(api, session, days).await,
        Command::Words { status } => words(api, session, status.map(WordStatus::from)).await,
        Command::Add { word } => {
            let mut view = VocabularyView::new(api, session);
            let added = view.add_word(&word).await?;
            println!("added {} (next review {})", added.word, added.next_review);
            Ok(())
        }
        Command::Remove { word } => {
            let mut view = VocabularyView::new(api, session);
            view.remove_word(&word).await?;
            println!("removed {word}");
            Ok(())
        }
        Command::Review => {
            let Some(host) = host else {
                bail!("review needs a host");
            };
            review(ReviewController::new(api, session, host)).await
        }
        Command::Health | Command::Validate => Ok(()),
    }
}

async fn dashboard(api: ApiClient, session: Session, days: Option<u32>) -> anyhow::Result<()> {
    let mut view = DashboardView::new(api, session);
    if let Some(days) = days {
        view = view.with_days(days);
    }
    view.load().await;

    let data = match view.state() {
        ViewState::Ready(data) => data,
        ViewState::Error(err) => bail!("dashboard unavailable: {err}"),
        ViewState::Idle | ViewState::Loading => return Ok(()),
    };

    let snapshot = &data.snapshot;
    println!("messages   {} ({} this week)", snapshot.total_messages, snapshot.messages_this_week);
    println!(
        "voice      {:.0}% ({} voice, {} text)",
        snapshot.voice_share(),
        snapshot.voice_messages,
        snapshot.text_messages
    );
    println!("errors     {} ({:.1}%)", snapshot.total_errors, snapshot.error_rate);
    println!("streak     {} days", snapshot.streak);
    println!();
    println!("activity");
    for ((label, messages), (_, errors)) in data.activity.points().zip(data.errors_per_day.points()) {
        println!("  {label:>7}  {messages:>3} msgs  {errors:>3} errs");
    }
    if !data.breakdown.is_empty() {
        println!();
        println!("error types ({} total)", data.chart.error_types.total());
        for (label, count) in data.breakdown.points() {
            println!("  {label:<20} {count}");
        }
    }
    Ok(())
}

async fn words(
    api: ApiClient,
    session: Session,
    status: Option<WordStatus>,
) -> anyhow::Result<()> {
    let mut view = VocabularyView::new(api, session);
    view.set_filter(status).await;

    let data = match view.state() {
        ViewState::Ready(data) => data,
        ViewState::Error(err) => bail!("vocabulary unavailable: {err}"),
        ViewState::Idle | ViewState::Loading => return Ok(()),
    };

    let stats = &data.list.stats;
    let by_status: Vec<String> = WordStatus::all()
        .into_iter()
        .map(|status| format!("{} {status}", stats.count_for(status)))
        .collect();
    println!(
        "{} words: {}; {} due today",
        stats.total,
        by_status.join(", "),
        stats.due_today
    );

    let today = Clock::default().today();
    for entry in &data.list.words {
        let due = if entry.next_review <= today { "*" } else { " " };
        let accuracy = entry
            .accuracy()
            .map_or_else(|| "-".to_string(), |share| format!("{:.0}%", share * 100.0));
        println!(
            "{due} {:<20} {:<20} {:<9} {accuracy:>4}",
            entry.word,
            entry.translation,
            entry.status.as_str()
        );
    }
    Ok(())
}

async fn review(mut controller: ReviewController) -> anyhow::Result<()> {
    match controller.restart().await? {
        ReviewStart::NothingDue => {
            println!("Nothing to review right now.");
            return Ok(());
        }
        ReviewStart::Started { total } => println!("{total} words due."),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(entry) = controller.current() {
        let progress = controller.engine().progress();
        println!();
        println!("[{}/{}] {}", progress.answered + 1, progress.total, entry.word);
        if !entry.example.is_empty() {
            println!("  e.g. {}", entry.example);
        }
        println!("Did you know it? [y/n/q]");

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let correct = match line.trim() {
            "y" | "Y" => true,
            "n" | "N" => false,
            "q" | "Q" => break,
            _ => continue,
        };

        let translation = entry.translation.clone();
        let outcome = controller.grade(correct).await?;
        println!("  -> {translation}");
        // The host already printed the completion alert.
        if let GradeOutcome::Completed {
            refreshed: Ok(data), ..
        } = outcome
        {
            println!("{} words still due.", data.due_words().len());
        }
    }
    Ok(())
}
