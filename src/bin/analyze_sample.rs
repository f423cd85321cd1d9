// Command-line front end for the acid-base engine
//
// Usage:
//   cargo run --features cli --bin analyze_sample -- ph=7,20 pco2=30 hco3=12 na=140 cl=100 context=sepsis
//   cargo run --features cli --bin analyze_sample -- samples.json
//
// Environment:
//   ACID_BASE_CONFIG  JSON config file (tolerances, strict bands)
//   REPORT_FORMAT     json | markdown (default: markdown)
//   STUDENT_MODE      1 to include formulas in markdown output

use acid_base_engine::{
    parse_decimal, AcidBaseAnalyzer, AnalysisConfig, BloodGasSample, ClinicalContext, ContextFlag,
    JsonFormatter, MarkdownFormatter,
};
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing (structured logging to stderr)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "acid_base_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        anyhow::bail!(
            "usage: analyze_sample <samples.json> | ph=<v> pco2=<v> hco3=<v> [na= cl= k= lactate= albumin= context=copd,vomiting,sepsis,diarrhea]"
        );
    }

    let config = AnalysisConfig::from_env()?;
    tracing::debug!("Configuration: {:?}", config);

    let samples = if args.len() == 1 && !args[0].contains('=') {
        load_samples(Path::new(&args[0]))?
    } else {
        vec![sample_from_args(&args)?]
    };

    let analyzer = AcidBaseAnalyzer::try_new(config)?;
    let reports = if samples.len() > 1 {
        analyzer.analyze_batch_parallel(&samples)
    } else {
        analyzer.analyze_batch(&samples)
    };

    let format = std::env::var("REPORT_FORMAT").unwrap_or_else(|_| "markdown".to_string());
    match format.to_lowercase().as_str() {
        "json" => {
            let output = if reports.len() == 1 {
                JsonFormatter::format(&reports[0])?
            } else {
                JsonFormatter::format_all(&reports)?
            };
            println!("{}", output);
        }
        "markdown" | "md" | "text" => {
            let student_mode = std::env::var("STUDENT_MODE").map_or(false, |v| v == "1");
            let formatter = MarkdownFormatter::new(student_mode);
            for report in &reports {
                println!("{}", formatter.format(report));
            }
        }
        other => anyhow::bail!("Unknown REPORT_FORMAT '{}' (expected json or markdown)", other),
    }

    Ok(())
}

/// Load one sample or an array of samples from a JSON file
fn load_samples(path: &Path) -> Result<Vec<BloodGasSample>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file: {:?}", path))?;

    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| "Failed to parse sample JSON")?;

    let samples = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    tracing::info!("Loaded {} sample(s) from {:?}", samples.len(), path);
    Ok(samples)
}

/// Build a sample from key=value arguments (decimal comma accepted)
fn sample_from_args(args: &[String]) -> Result<BloodGasSample> {
    let mut ph = None;
    let mut pco2 = None;
    let mut hco3 = None;
    let mut sample_fields: Vec<(String, f64)> = Vec::new();
    let mut context = ClinicalContext::default();

    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", arg))?;
        let key = key.trim().to_lowercase();

        if key == "context" {
            for flag in value.split(',').filter(|f| !f.trim().is_empty()) {
                let flag: ContextFlag = flag.parse().map_err(anyhow::Error::msg)?;
                context = context.with_flag(flag);
            }
            continue;
        }

        let number = parse_decimal(value)
            .with_context(|| format!("Invalid number for {}: '{}'", key, value))?;
        match key.as_str() {
            "ph" => ph = Some(number),
            "pco2" => pco2 = Some(number),
            "hco3" => hco3 = Some(number),
            "na" | "k" | "cl" | "lactate" | "albumin" => sample_fields.push((key, number)),
            other => anyhow::bail!("Unknown field '{}'", other),
        }
    }

    let (Some(ph), Some(pco2), Some(hco3)) = (ph, pco2, hco3) else {
        anyhow::bail!("ph, pco2 and hco3 are required");
    };

    let mut sample = BloodGasSample::new(ph, pco2, hco3);
    for (key, number) in sample_fields {
        sample = match key.as_str() {
            "na" => sample.with_sodium(number),
            "k" => sample.with_potassium(number),
            "cl" => sample.with_chloride(number),
            "lactate" => sample.with_lactate(number),
            _ => sample.with_albumin(number),
        };
    }
    sample.context = context;

    Ok(sample)
}
