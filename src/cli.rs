use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, DataConfig};
use crate::error::AppError;
use crate::guidance::import;
use crate::guidance::{
    CorpusFilter, CorpusStatistics, EngineConfig, GuidanceCatalog, GuidanceEngine,
    GuidanceError, GuidanceService, InMemoryGraduateCorpus, InMemoryProfileRepository,
    QuestionAnswer, Username,
};
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "graduate-guidance",
    about = "Recommend similar graduates, forecast destinations, and classify questionnaires",
    version
)]
struct Cli {
    /// Override the configured graduate CSV snapshot
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,
    /// Override the configured profile store (JSON)
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank past graduates by similarity to a user
    Recommend(UserArgs),
    /// List same-major graduates with the closest GPA
    Closest(UserArgs),
    /// List graduate records matching optional filters
    Graduates(GraduatesArgs),
    /// Forecast destinations among graduates on a career path
    Predict(PredictArgs),
    /// Forecast admissions among same-major peers
    Admission(AdmissionArgs),
    /// Classify a personality questionnaire into a four-letter type
    Personality(QuestionnaireArgs),
    /// Classify a career interest questionnaire into Holland categories
    Interest(QuestionnaireArgs),
    /// Aggregate the graduate corpus for dashboards
    Stats(StatsArgs),
    /// Default direction tables plus the most similar cases
    Guide(UserArgs),
}

#[derive(Args, Debug)]
struct UserArgs {
    /// Username of the profile to evaluate
    #[arg(long)]
    user: String,
    /// Maximum number of graduates to return
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct GraduatesArgs {
    #[arg(long)]
    major: Option<String>,
    /// Career path label, e.g. 考研
    #[arg(long)]
    path: Option<String>,
    /// Experience type, e.g. internship
    #[arg(long)]
    experience_type: Option<String>,
}

impl GraduatesArgs {
    fn into_filter(self) -> CorpusFilter {
        CorpusFilter {
            major: self.major,
            career_path: self.path,
            experience_type: self.experience_type,
        }
    }
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    user: String,
    /// Career path label to forecast, e.g. 出国
    #[arg(long)]
    path: String,
    /// Maximum GPA gap for a graduate to join the cohort
    #[arg(long)]
    tolerance: Option<f64>,
}

#[derive(Args, Debug)]
struct AdmissionArgs {
    #[arg(long)]
    user: String,
    #[arg(long, value_enum)]
    target: AdmissionTarget,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AdmissionTarget {
    GraduateSchool,
    Overseas,
}

#[derive(Args, Debug)]
struct QuestionnaireArgs {
    /// Comma separated answers in question order
    #[arg(long, conflicts_with = "answers_file", required_unless_present = "answers_file")]
    answers: Option<String>,
    /// JSON array of {"question_id", "answer"} objects
    #[arg(long)]
    answers_file: Option<PathBuf>,
    /// Record the classification on this user's profile
    #[arg(long)]
    user: Option<String>,
    /// Persist the updated profile store
    #[arg(long, requires = "user")]
    save: bool,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Report date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct StatisticsReport {
    generated_on: NaiveDate,
    #[serde(flatten)]
    statistics: CorpusStatistics,
}

type Service = GuidanceService<InMemoryProfileRepository, InMemoryGraduateCorpus>;

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(corpus) = cli.corpus {
        config.data.corpus_path = corpus;
    }
    if let Some(profiles) = cli.profiles {
        config.data.profiles_path = profiles;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "graduate guidance starting");

    let engine = GuidanceEngine::new(engine_config(&config)?).map_err(GuidanceError::from)?;

    match cli.command {
        Command::Recommend(args) => {
            let service = open_service(&config.data, engine)?;
            print_json(&service.recommend_similar(&Username::new(args.user), args.limit)?)
        }
        Command::Closest(args) => {
            let service = open_service(&config.data, engine)?;
            print_json(&service.closest_graduates(&Username::new(args.user), args.limit)?)
        }
        Command::Graduates(args) => {
            let service = open_service(&config.data, engine)?;
            print_json(&service.graduates(&args.into_filter())?)
        }
        Command::Predict(args) => {
            let service = open_service(&config.data, engine)?;
            let distribution =
                service.predict_outcome(&Username::new(args.user), &args.path, args.tolerance)?;
            print_json(&distribution)
        }
        Command::Admission(args) => {
            let service = open_service(&config.data, engine)?;
            let username = Username::new(args.user);
            let distribution = match args.target {
                AdmissionTarget::GraduateSchool => service.predict_graduate_school(&username)?,
                AdmissionTarget::Overseas => service.predict_overseas(&username)?,
            };
            print_json(&distribution)
        }
        Command::Personality(args) => run_personality(&config.data, engine, args),
        Command::Interest(args) => run_interest(&config.data, engine, args),
        Command::Stats(args) => {
            let service = open_service(&config.data, engine)?;
            let report = StatisticsReport {
                generated_on: args.today.unwrap_or_else(|| Local::now().date_naive()),
                statistics: service.compute_statistics()?,
            };
            print_json(&report)
        }
        Command::Guide(args) => {
            let service = open_service(&config.data, engine)?;
            let bundle =
                service.comprehensive_recommendations(&Username::new(args.user), args.limit)?;
            print_json(&bundle)
        }
    }
}

fn run_personality(
    data: &DataConfig,
    engine: GuidanceEngine,
    args: QuestionnaireArgs,
) -> Result<(), AppError> {
    let answers = read_answers(&args)?;

    match args.user {
        None => print_json(
            &engine
                .classify_personality(&answers)
                .map_err(GuidanceError::from)?,
        ),
        Some(user) => {
            let (repository, service) = open_profiles(data, engine)?;
            let (result, _) = service.submit_personality_test(&Username::new(user), &answers)?;
            if args.save {
                persist_profiles(data, &repository)?;
            }
            print_json(&result)
        }
    }
}

fn run_interest(
    data: &DataConfig,
    engine: GuidanceEngine,
    args: QuestionnaireArgs,
) -> Result<(), AppError> {
    let answers = read_answers(&args)?;

    match args.user {
        None => print_json(
            &engine
                .classify_career_interest(&answers)
                .map_err(GuidanceError::from)?,
        ),
        Some(user) => {
            let (repository, service) = open_profiles(data, engine)?;
            let (result, _) =
                service.submit_career_interest_test(&Username::new(user), &answers)?;
            if args.save {
                persist_profiles(data, &repository)?;
            }
            print_json(&result)
        }
    }
}

fn engine_config(config: &AppConfig) -> Result<EngineConfig, AppError> {
    let catalog = match &config.data.catalog_path {
        Some(path) => import::load_catalog(path)?,
        None => GuidanceCatalog::default(),
    };

    Ok(EngineConfig {
        recommend_limit: config.engine.recommend_limit,
        gpa_tolerance: config.engine.gpa_tolerance,
        catalog,
        ..EngineConfig::default()
    })
}

fn open_service(data: &DataConfig, engine: GuidanceEngine) -> Result<Service, AppError> {
    let profiles = Arc::new(InMemoryProfileRepository::new(import::load_profiles(
        &data.profiles_path,
    )?));
    let records = import::load_graduates(&data.corpus_path)?;
    info!(records = records.len(), path = %data.corpus_path.display(), "corpus loaded");

    Ok(GuidanceService::new(
        profiles,
        Arc::new(InMemoryGraduateCorpus::new(records)),
        engine,
    ))
}

/// Service over the profile store only; questionnaires never read the corpus.
fn open_profiles(
    data: &DataConfig,
    engine: GuidanceEngine,
) -> Result<(Arc<InMemoryProfileRepository>, Service), AppError> {
    let repository = Arc::new(InMemoryProfileRepository::new(import::load_profiles(
        &data.profiles_path,
    )?));
    let service = GuidanceService::new(
        repository.clone(),
        Arc::new(InMemoryGraduateCorpus::default()),
        engine,
    );
    Ok((repository, service))
}

fn persist_profiles(
    data: &DataConfig,
    repository: &InMemoryProfileRepository,
) -> Result<(), AppError> {
    let profiles = repository.profiles().map_err(GuidanceError::from)?;
    import::save_profiles(&data.profiles_path, &profiles)?;
    info!(path = %data.profiles_path.display(), "profile store saved");
    Ok(())
}

fn read_answers(args: &QuestionnaireArgs) -> Result<Vec<QuestionAnswer>, AppError> {
    match (&args.answers, &args.answers_file) {
        (Some(raw), _) => Ok(parse_answer_list(raw)),
        (None, Some(path)) => read_answer_file(path),
        (None, None) => Err(AppError::Usage(
            "either --answers or --answers-file is required".to_string(),
        )),
    }
}

fn parse_answer_list(raw: &str) -> Vec<QuestionAnswer> {
    QuestionAnswer::sequence(raw.split(',').map(str::trim))
}

fn read_answer_file(path: &Path) -> Result<Vec<QuestionAnswer>, AppError> {
    let file = std::fs::File::open(path)?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|err| AppError::Data(import::ImportError::from(err)))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_lists_are_numbered_in_order() {
        let answers = parse_answer_list("A, b ,E");
        assert_eq!(
            answers,
            vec![
                QuestionAnswer::new(1, "A"),
                QuestionAnswer::new(2, "b"),
                QuestionAnswer::new(3, "E"),
            ]
        );
    }

    #[test]
    fn parses_report_dates() {
        assert_eq!(
            parse_date(" 2026-06-30 "),
            Ok(NaiveDate::from_ymd_opt(2026, 6, 30).expect("valid date"))
        );
        assert!(parse_date("30/06/2026").is_err());
    }

    #[test]
    fn graduates_command_builds_a_corpus_filter() {
        let parsed = Cli::try_parse_from([
            "graduate-guidance",
            "graduates",
            "--path",
            "出国",
            "--experience-type",
            "research",
        ])
        .expect("valid invocation");

        match parsed.command {
            Command::Graduates(args) => assert_eq!(
                args.into_filter(),
                CorpusFilter {
                    major: None,
                    career_path: Some("出国".to_string()),
                    experience_type: Some("research".to_string()),
                }
            ),
            other => panic!("expected graduates command, got {other:?}"),
        }
    }

    #[test]
    fn answer_source_is_required_outside_the_parser() {
        let args = QuestionnaireArgs {
            answers: None,
            answers_file: None,
            user: None,
            save: false,
        };

        match read_answers(&args) {
            Err(err @ AppError::Usage(_)) => {
                assert!(err.to_string().starts_with("usage error:"))
            }
            other => panic!("expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn questionnaire_commands_require_answers() {
        let parsed = Cli::try_parse_from(["graduate-guidance", "personality"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "graduate-guidance",
            "interest",
            "--answers",
            "1,2,3",
            "--save",
        ]);
        assert!(parsed.is_err(), "--save requires --user");

        let parsed = Cli::try_parse_from([
            "graduate-guidance",
            "personality",
            "--answers",
            "A,B",
            "--user",
            "alice",
            "--save",
        ])
        .expect("valid invocation");
        assert!(matches!(parsed.command, Command::Personality(_)));
    }
}
