use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use skincare_mentor::clock::{Clock, SystemClock};
use skincare_mentor::config::AppConfig;
use skincare_mentor::dashboard::{Dashboard, ProfileSummary};
use skincare_mentor::diary::{Diary, DiaryEntry};
use skincare_mentor::knowledge::KnowledgeLibrary;
use skincare_mentor::onboarding::{OnboardingFlow, OnboardingStage, reset_onboarding};
use skincare_mentor::profile::{ANSWER_SCALE, MAX_ANSWER, QUESTION_COUNT, SkinConcern};
use skincare_mentor::routine::{Routine, RoutineSession};
use skincare_mentor::store::{self, SkinStore};

/// Line-oriented stdin reader.
struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on EOF.
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        eprint!("{prompt} ");
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("Skincare Mentor v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());

    // ── Storage ─────────────────────────────────────────────────────────
    let store = store::open(&config)
        .await
        .with_context(|| format!("opening database at {}", config.db_path.display()))?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut console = Console::new();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("today") => {}
        Some("reset") => {
            reset_onboarding(&store).await?;
            eprintln!("Onboarding will run again on next launch.");
            return Ok(());
        }
        Some("diary") => return record_diary(&store, clock.as_ref(), &config, &args[1..]).await,
        Some("articles") => return list_articles(&store, &args[1..].join(" ")).await,
        Some("profile") => return show_profile(&store).await,
        Some(other) => {
            bail!("unknown command `{other}` (try: today, diary, articles, profile, reset)")
        }
    }

    if !store.is_onboarding_complete().await? {
        run_onboarding(&mut console, store.clone(), Arc::clone(&clock)).await?;
    }

    let dashboard = Dashboard::load(&store, clock.as_ref(), &config).await?;
    if let Some(profile) = &dashboard.profile {
        match profile.skin_type {
            Some(skin_type) => eprintln!("\nSkin type: {skin_type}"),
            None => eprintln!("\nSkin type: not determined"),
        }
    }
    for entry in &dashboard.recent_entries {
        eprintln!(
            "   {}  condition {}/5  {}",
            entry.date.format("%Y-%m-%d"),
            entry.skin_condition,
            entry.notes
        );
    }

    match dashboard.current_routine {
        Some(routine) => run_session(&mut console, store, routine, &config).await?,
        None => eprintln!("\nNothing left to do right now."),
    }

    Ok(())
}

async fn run_onboarding(
    console: &mut Console,
    store: SkinStore,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<()> {
    let mut flow = OnboardingFlow::new(store, clock);
    eprintln!("\nWelcome! A few questions about your skin, then we'll build your routine.");
    flow.advance();

    while let OnboardingStage::Question(number) = flow.stage() {
        let question = flow.current_question().unwrap_or_default();
        eprintln!("\nQuestion {number}/{QUESTION_COUNT}: {question}");
        for (value, label) in ANSWER_SCALE.iter().enumerate() {
            eprintln!("   {value}) {label}");
        }
        let Some(line) = console.ask(">").await? else {
            bail!("input closed during onboarding");
        };

        if line == "b" && number > 1 {
            flow.retreat();
            continue;
        }
        match line.parse::<u8>() {
            Ok(value) if flow.record_answer(value) => flow.advance(),
            _ => eprintln!("Pick a number from 0 to {MAX_ANSWER}, or b to go back."),
        }
    }

    if let Some(skin_type) = flow.skin_type() {
        eprintln!("\nYour skin type looks {skin_type}.");
    }

    eprintln!("\nAny concerns? Enter numbers separated by commas, or leave blank.");
    for (i, concern) in SkinConcern::ALL.iter().enumerate() {
        eprintln!("   {}) {concern}", i + 1);
    }
    let picks = console.ask(">").await?.unwrap_or_default();
    flow.set_concerns(
        picks
            .split(',')
            .filter_map(|s| s.trim().parse::<usize>().ok())
            .filter_map(|i| i.checked_sub(1))
            .filter_map(|i| SkinConcern::ALL.get(i).copied()),
    );

    let allergies = console.ask("Allergies (comma-separated, optional):").await?;
    flow.set_allergies(allergies.unwrap_or_default());

    let outcome = flow.finalize().await?;
    eprintln!("Created {} routines.", outcome.routines.len());
    Ok(())
}

async fn run_session(
    console: &mut Console,
    store: SkinStore,
    routine: Routine,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut session = RoutineSession::new(routine, store, config.timer_tick);

    loop {
        let routine = session.routine();
        eprintln!("\n{} routine ({:.0}% done)", routine.time_of_day, session.progress() * 100.0);
        for step in &routine.steps {
            let mark = if step.is_completed { "x" } else { " " };
            let timer = step
                .timer_duration
                .map(|s| format!(" ({} min)", s / 60))
                .unwrap_or_default();
            eprintln!("   [{mark}] {}. {}{timer}", step.order, step.product_name);
            eprintln!("         {}", step.instructions);
        }
        if session.is_running().await {
            eprintln!("   Timer: {}", session.formatted_timer().await);
        }

        let Some(line) = console
            .ask("<n> toggle, t<n> timer, s stop, c complete, q quit >")
            .await?
        else {
            break;
        };

        match line.as_str() {
            "q" => break,
            "s" => session.stop_timer().await,
            "c" => {
                session.complete_routine().await?;
                eprintln!("Routine complete.");
                break;
            }
            "" => {}
            other => {
                let (timer, number) = match other.strip_prefix('t') {
                    Some(rest) => (true, rest.trim()),
                    None => (false, other),
                };
                let Some(step_id) = number
                    .parse::<u32>()
                    .ok()
                    .and_then(|n| session.routine().steps.iter().find(|s| s.order == n))
                    .map(|s| s.id)
                else {
                    eprintln!("No such step.");
                    continue;
                };

                if timer {
                    if !session.start_timer(step_id).await {
                        eprintln!("That step has no timer.");
                    }
                } else {
                    session.toggle_step_completion(step_id).await?;
                }
            }
        }
    }

    session.close().await;
    Ok(())
}

async fn record_diary(
    store: &SkinStore,
    clock: &dyn Clock,
    config: &AppConfig,
    args: &[String],
) -> anyhow::Result<()> {
    let mut diary = Diary::load(store.clone(), config.utc_offset).await?;
    let now = clock.now();

    let Some(condition) = args.first() else {
        for entry in diary.recent(10) {
            eprintln!(
                "{}  {}/5  {}",
                entry.date.format("%Y-%m-%d"),
                entry.skin_condition,
                entry.notes
            );
        }
        eprintln!("Average condition: {:.1}", diary.average_condition());
        return Ok(());
    };
    let condition: u8 = condition
        .parse()
        .with_context(|| format!("condition must be 1-5, got `{condition}`"))?;

    let mut entry = diary
        .entry_for_date(now)
        .cloned()
        .unwrap_or_else(|| DiaryEntry::new(now));
    entry.set_condition(condition);
    if args.len() > 1 {
        entry.notes = args[1..].join(" ");
    }
    diary.save_entry(entry).await?;
    eprintln!("Saved today's entry.");
    Ok(())
}

async fn list_articles(store: &SkinStore, search: &str) -> anyhow::Result<()> {
    let library = KnowledgeLibrary::load(store.clone()).await?;
    let profile = store.load_profile().await?;

    for article in library.filter(None, search) {
        let bookmark = if library.is_bookmarked(article.id) { "*" } else { " " };
        eprintln!(
            "{bookmark} [{}] {} ({})",
            article.category, article.title, article.difficulty
        );
    }

    let recommended = library.recommended_for(profile.and_then(|p| p.skin_type));
    if !recommended.is_empty() && search.is_empty() {
        eprintln!("\nRecommended for you:");
        for article in recommended {
            eprintln!("   {}", article.title);
        }
    }
    Ok(())
}

async fn show_profile(store: &SkinStore) -> anyhow::Result<()> {
    let summary = ProfileSummary::load(store).await?;
    let Some(profile) = &summary.profile else {
        eprintln!("No profile yet. Run without arguments to start onboarding.");
        return Ok(());
    };

    let skin_type = profile
        .skin_type
        .map_or_else(|| "not determined".to_string(), |t| t.to_string());
    eprintln!("Skin type: {skin_type}");
    let concerns: Vec<String> = profile.skin_concerns.iter().map(ToString::to_string).collect();
    eprintln!("Concerns: {}", concerns.join(", "));
    eprintln!("Allergies: {}", profile.allergies.join(", "));
    eprintln!("Completed routines: {}", summary.completed_routines);
    eprintln!("Diary entries: {}", summary.total_diary_entries);
    eprintln!("Average condition: {:.1}", summary.average_condition);
    Ok(())
}
