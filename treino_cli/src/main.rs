use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use treino_core::*;

#[derive(Parser)]
#[command(name = "treinolog")]
#[command(about = "Workout logging and analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override deployment variant (basic, advanced, simple)
    #[arg(long, global = true)]
    variant: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout session
    Add {
        /// Session date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Perceived quality (ruim, medio, bom, excelente)
        #[arg(long)]
        quality: String,

        /// Workout type label (e.g. Resistencia, Forca, Cardio)
        #[arg(long)]
        tipo: String,

        /// Exercises performed / session notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Duration in minutes (advanced variant only)
        #[arg(long)]
        duration: Option<u32>,

        /// Intensity (baixa, media, alta; advanced variant only)
        #[arg(long)]
        intensity: Option<String>,

        /// Average heart rate in bpm (advanced variant only)
        #[arg(long)]
        heart_rate: Option<u16>,
    },

    /// Show the workout history in log order (default)
    List,

    /// Per-type aggregate statistics
    Stats,

    /// Quality scores in chronological order
    Series,
}

fn main() -> Result<()> {
    // Initialize logging
    treino_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let variant = match cli.variant {
        Some(ref s) => {
            Variant::parse(s).ok_or_else(|| Error::Other(format!("Unknown variant: {}", s)))?
        }
        None => config.log.variant,
    };
    let log_path = match cli.data_dir {
        Some(dir) => dir.join(&config.log.file_name),
        None => config.log_path(),
    };

    let store = CsvStore::new(log_path, variant);
    let mut log = WorkoutLog::open(variant, store)?;

    match cli.command {
        Some(Commands::Add {
            date,
            quality,
            tipo,
            notes,
            duration,
            intensity,
            heart_rate,
        }) => cmd_add(
            &mut log, date, &quality, tipo, notes, duration, intensity, heart_rate,
        ),
        Some(Commands::Stats) => cmd_stats(&log),
        Some(Commands::Series) => cmd_series(&log),
        Some(Commands::List) | None => cmd_list(&log),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_add(
    log: &mut WorkoutLog<CsvStore>,
    date: Option<NaiveDate>,
    quality: &str,
    tipo: String,
    notes: String,
    duration: Option<u32>,
    intensity: Option<String>,
    heart_rate: Option<u16>,
) -> Result<()> {
    let quality = Quality::parse(quality)
        .ok_or_else(|| Error::Other(format!("Unknown quality: {}", quality)))?;
    let intensity = intensity
        .map(|s| {
            Intensity::parse(&s).ok_or_else(|| Error::Other(format!("Unknown intensity: {}", s)))
        })
        .transpose()?;

    let entry = RawEntry {
        date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        quality,
        workout_type: tipo,
        notes,
        duration_minutes: duration,
        intensity,
        heart_rate_bpm: heart_rate,
    };

    match log.validate(&entry) {
        Ok(record) => {
            log.append(record)?;
            println!("✓ Treino registrado! ({} no histórico)", log.len());
            Ok(())
        }
        Err(e) => {
            // Rejected entries are not committed; surface the reason
            eprintln!("⚠ {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_list(log: &WorkoutLog<CsvStore>) -> Result<()> {
    if log.is_empty() {
        println!("Nenhum treino registrado.");
        return Ok(());
    }

    for record in log.records() {
        let mut line = format!(
            "{}  {:<9}  {:<20}",
            record.date,
            record.quality.label(),
            record.workout_type
        );
        if log.variant().has_vitals() {
            line.push_str(&format!(
                "  {:>4} min  {:<5}  {:>3} bpm",
                display_opt(record.duration_minutes),
                display_opt(record.intensity.map(Intensity::label)),
                display_opt(record.heart_rate_bpm),
            ));
        }
        if let Some(ref notes) = record.notes {
            line.push_str("  ");
            line.push_str(notes);
        }
        println!("{}", line);
    }

    Ok(())
}

fn cmd_stats(log: &WorkoutLog<CsvStore>) -> Result<()> {
    let groups = log.aggregate_by_type();
    if groups.is_empty() {
        println!("Nenhum treino registrado.");
        return Ok(());
    }

    println!(
        "{:<20} {:>5} {:>10} {:>10} {:>10}",
        "Tipo de Treino", "Qtd", "Qualidade", "Duracao", "FC"
    );

    // HashMap order is arbitrary; sort by label for stable output
    let mut labels: Vec<&String> = groups.keys().collect();
    labels.sort();

    for label in labels {
        let stats = &groups[label];
        println!(
            "{:<20} {:>5} {:>10.2} {:>10} {:>10}",
            label,
            stats.count,
            stats.mean_quality_score,
            display_mean(stats.mean_duration_minutes),
            display_mean(stats.mean_heart_rate_bpm),
        );
    }

    Ok(())
}

fn cmd_series(log: &WorkoutLog<CsvStore>) -> Result<()> {
    let series = log.chronological_series();
    if series.is_empty() {
        println!("Nenhum treino registrado.");
        return Ok(());
    }

    for point in series {
        println!(
            "{}  {}  {}",
            point.date,
            point.quality_score,
            "█".repeat(point.quality_score as usize)
        );
    }

    Ok(())
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

fn display_mean(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".into())
}
