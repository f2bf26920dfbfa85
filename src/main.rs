use anyhow::Context;
use carotid_grader::config::loader::{config_or_default, read_config};
use carotid_grader::presenter::{render_category_table, render_json, render_text};
use carotid_grader::{
    validate_inputs, Config, Inputs, OutputFormat, StenosisGrader, VisualFinding,
};
use clap::parser::ValueSource;
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("carotid-grader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Grade carotid artery stenosis from duplex ultrasound findings")
        .long_about("Carotid Grader - classifies ICA stenosis from a visual assessment combined with\n\
                    Doppler velocities (ICA PSV, ICA EDV, CCA PSV).\n\
                    Decision support only; not a substitute for clinical judgment.")
        .arg(
            Arg::new("finding")
                .short('f')
                .long("finding")
                .value_name("FINDING")
                .help("Visual finding: normal, plaque, near-occlusion, total-occlusion"),
        )
        .arg(
            Arg::new("psv")
                .long("psv")
                .value_name("CM_S")
                .help("ICA peak systolic velocity (cm/s)")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("edv")
                .long("edv")
                .value_name("CM_S")
                .help("ICA end-diastolic velocity (cm/s)")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("cca-psv")
                .long("cca-psv")
                .value_name("CM_S")
                .help("CCA peak systolic velocity (cm/s), used for the ICA/CCA ratio")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("case")
                .long("case")
                .value_name("FILE")
                .help("Read the observations from a YAML or JSON case file")
                .conflicts_with_all(["finding", "psv", "edv", "cca-psv"]),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/carotid-grader.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration file and print the active criteria")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-categories")
                .long("list-categories")
                .help("List every category with its color hint and recommendation")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging of every rule that fires")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/carotid-grader.yaml");

    let config_given = matches.value_source("config") == Some(ValueSource::CommandLine);

    if matches.get_flag("test-config") {
        init_logger(&matches, None);
        test_config(config_path);
        return;
    }

    let loaded = read_config(config_path, config_given);
    let file_level = loaded
        .as_ref()
        .ok()
        .and_then(Option::as_ref)
        .and_then(|c| c.log_level());
    init_logger(&matches, file_level);

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    if matches.get_flag("list-categories") {
        print!("{}", render_category_table());
        return;
    }

    let config = config_or_default(loaded, config_path);

    let grader = match StenosisGrader::from_config(&config) {
        Ok(grader) => grader,
        Err(e) => {
            eprintln!("❌ Invalid criteria: {e:#}");
            process::exit(1);
        }
    };

    let inputs = match read_inputs(&matches) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("❌ {e:#}");
            process::exit(2);
        }
    };

    for issue in validate_inputs(&inputs) {
        log::warn!("Input check: {}", issue);
    }

    let result = grader.grade(&inputs);

    let format = if matches.get_flag("json") {
        OutputFormat::Json
    } else {
        config.output_format()
    };

    match format {
        OutputFormat::Json => match render_json(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ {e:#}");
                process::exit(1);
            }
        },
        OutputFormat::Text => print!("{}", render_text(&result)),
    }
}

fn init_logger(matches: &ArgMatches, file_level: Option<LevelFilter>) {
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        file_level.unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();
}

fn read_inputs(matches: &ArgMatches) -> anyhow::Result<Inputs> {
    if let Some(case_file) = matches.get_one::<String>("case") {
        return load_case_file(case_file);
    }

    let visual_finding = matches
        .get_one::<String>("finding")
        .map(|s| s.parse::<VisualFinding>())
        .transpose()?;

    Ok(Inputs {
        visual_finding,
        psv: matches.get_one::<f64>("psv").copied(),
        edv: matches.get_one::<f64>("edv").copied(),
        cca_psv: matches.get_one::<f64>("cca-psv").copied(),
    })
}

fn load_case_file(path: &str) -> anyhow::Result<Inputs> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file: {path}"))?;

    let is_json = Path::new(path)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let inputs: Inputs = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON case file: {path}"))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML case file: {path}"))?
    };

    log::debug!("Loaded case from {}: {:?}", path, inputs);
    Ok(inputs)
}

fn test_config(path: &str) {
    println!("🔍 Testing configuration...");
    println!();

    if !Path::new(path).exists() {
        println!("Configuration file '{path}' not found; built-in criteria would be used");
        print_criteria(&Config::default());
        return;
    }

    match Config::from_file(path) {
        Ok(config) => {
            print_criteria(&config);
            println!("✅ Configuration validated");
        }
        Err(e) => {
            println!("❌ Configuration validation failed:");
            println!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn print_criteria(config: &Config) {
    let c = &config.criteria;
    println!("Active criteria:");
    println!(
        "  ICA PSV bands:        <{} | {}-{} | ≥{} cm/s",
        c.psv_moderate, c.psv_moderate, c.psv_severe, c.psv_severe
    );
    println!(
        "  ICA EDV escalation:   ≥{} cm/s (50-69% band from {} cm/s)",
        c.edv_severe, c.edv_moderate
    );
    println!(
        "  ICA/CCA ratio escalation: ≥{} (50-69% band from {})",
        c.ratio_severe, c.ratio_moderate
    );
    println!(
        "  Indeterminate when secondary band is {} tier(s) below PSV",
        c.discordance_tiers
    );
    println!("  Output format: {:?}", config.output_format());
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Confirm the thresholds against your clinical reference before use.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}
