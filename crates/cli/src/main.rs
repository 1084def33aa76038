#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use talk_review_core::capture::JsonCaptureFile;
use talk_review_core::config::{
    resolve_f64_with_default, AnalysisConfig, Env, PauseConfig, RecommendationConfig, StdEnv,
    DEFAULT_MIN_PAUSE_SECS, DEFAULT_PRAISE_THRESHOLD, DEFAULT_REMARK_THRESHOLD,
    DEFAULT_SILENCE_THRESHOLD, ENV_MIN_PAUSE_SECS, ENV_PRAISE_THRESHOLD, ENV_REMARK_THRESHOLD,
    ENV_SILENCE_THRESHOLD,
};
use talk_review_core::Pipeline;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "talk-review")]
#[command(about = "Score a recorded technical talk and suggest improvements")]
struct Args {
    /// JSON capture with frame observations, voice signals and transcript.
    #[arg(long)]
    input: PathBuf,

    /// Relative RMS level below which a frame counts as silent.
    #[arg(long)]
    silence_threshold: Option<f64>,

    /// Shortest silence, in seconds, reported as a pause.
    #[arg(long)]
    min_pause_secs: Option<f64>,

    /// Scores below this trigger remarks.
    #[arg(long)]
    remark_threshold: Option<f64>,

    /// Overall score needed for the praise remark.
    #[arg(long)]
    praise_threshold: Option<f64>,

    #[arg(long, default_value_t = false)]
    pretty: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let config = build_config(&args, &env)?;

    tracing::info!(
        input = %args.input.display(),
        silence_threshold = config.pauses.silence_threshold,
        remark_threshold = config.recommendations.remark_threshold,
        "config loaded"
    );

    let pipeline = Pipeline::new(JsonCaptureFile::new(&args.input), config);
    let analysis = pipeline
        .run()
        .await
        .with_context(|| format!("failed to analyze {}", args.input.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{json}");

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    // stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &Args, env: &impl Env) -> anyhow::Result<AnalysisConfig> {
    let silence_threshold = resolve_f64_with_default(
        args.silence_threshold,
        ENV_SILENCE_THRESHOLD,
        env,
        DEFAULT_SILENCE_THRESHOLD,
    )?;
    let min_pause_secs = resolve_f64_with_default(
        args.min_pause_secs,
        ENV_MIN_PAUSE_SECS,
        env,
        DEFAULT_MIN_PAUSE_SECS,
    )?;
    let remark_threshold = resolve_f64_with_default(
        args.remark_threshold,
        ENV_REMARK_THRESHOLD,
        env,
        DEFAULT_REMARK_THRESHOLD,
    )?;
    let praise_threshold = resolve_f64_with_default(
        args.praise_threshold,
        ENV_PRAISE_THRESHOLD,
        env,
        DEFAULT_PRAISE_THRESHOLD,
    )?;

    Ok(AnalysisConfig {
        pauses: PauseConfig::new(silence_threshold, min_pause_secs)?,
        recommendations: RecommendationConfig::new(remark_threshold, praise_threshold)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use talk_review_core::config::MapEnv;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["talk-review", "--input", "talk.json"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let cfg = build_config(&args(&[]), &MapEnv::default()).expect("valid config");
        assert_eq!(cfg, AnalysisConfig::default());
    }

    #[test]
    fn flags_override_environment() {
        let env = MapEnv::default()
            .with_var(ENV_REMARK_THRESHOLD, "6.0")
            .with_var(ENV_MIN_PAUSE_SECS, "0.5");
        let cfg = build_config(&args(&["--remark-threshold", "6.5"]), &env).expect("valid config");
        assert_eq!(cfg.recommendations.remark_threshold, 6.5);
        assert_eq!(cfg.pauses.min_pause_secs, 0.5);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = build_config(&args(&["--praise-threshold", "11"]), &MapEnv::default())
            .unwrap_err();
        assert!(err.to_string().contains("11"));
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["talk-review"]).is_err());
    }
}
