use crate::infra::{
    default_scoring_config, CannedCommentGateway, InMemoryEquipmentStore, InMemoryFitnessRepository,
};
use chrono::Local;
use clap::Args;
use pe_portal::error::AppError;
use pe_portal::portal::equipment::{standard_inventory, EquipmentId, EquipmentLedger};
use pe_portal::portal::fitness::{
    export_filename, records_to_csv, BadgeView, FitnessService, FitnessSubmission, Gender,
    RecordView, StudentIdentity,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Student name for the scored submission
    #[arg(long, default_value = "Chan Tai-man")]
    pub(crate) name: String,
    /// Class label, e.g. 6A
    #[arg(long, default_value = "6A")]
    pub(crate) class: String,
    /// Class number
    #[arg(long, default_value_t = 12)]
    pub(crate) class_no: u16,
    /// Gender (M or F)
    #[arg(long, default_value = "M", value_parser = parse_gender)]
    pub(crate) gender: Gender,
    /// One-minute sit-ups (reps)
    #[arg(long, default_value_t = 30)]
    pub(crate) sit_ups: u32,
    /// Sit-and-reach flexibility (cm)
    #[arg(long, default_value_t = 20.0)]
    pub(crate) flexibility: f64,
    /// Hand grip strength (kg)
    #[arg(long, default_value_t = 25.0)]
    pub(crate) hand_grip: f64,
    /// Nine-minute run distance (m)
    #[arg(long, default_value_t = 1400.0)]
    pub(crate) run: f64,
    /// Height (cm)
    #[arg(long, default_value_t = 150.0)]
    pub(crate) height: f64,
    /// Weight (kg)
    #[arg(long, default_value_t = 40.0)]
    pub(crate) weight: f64,
    /// Skip the equipment ledger portion of the demo
    #[arg(long)]
    pub(crate) skip_equipment: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Output path for the CSV report (defaults to fitness_report_<date>.csv)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "M" | "MALE" => Ok(Gender::Male),
        "F" | "FEMALE" => Ok(Gender::Female),
        other => Err(format!("expected M or F, got '{other}'")),
    }
}

fn demo_service() -> Arc<FitnessService<InMemoryFitnessRepository, CannedCommentGateway>> {
    Arc::new(FitnessService::new(
        Arc::new(InMemoryFitnessRepository::default()),
        Arc::new(CannedCommentGateway),
        default_scoring_config(),
    ))
}

fn submission_from_args(args: &DemoArgs) -> FitnessSubmission {
    FitnessSubmission {
        student: StudentIdentity {
            name: args.name.clone(),
            class: args.class.clone(),
            class_no: args.class_no,
        },
        gender: args.gender,
        sit_ups: args.sit_ups,
        flexibility_cm: args.flexibility,
        hand_grip_kg: args.hand_grip,
        run_9min_m: args.run,
        height_cm: args.height,
        weight_kg: args.weight,
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("PE portal demo");

    let service = demo_service();
    let record = match service.submit(submission_from_args(&args)) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };

    println!(
        "\nScored {} ({} no. {})",
        record.student.name, record.student.class, record.student.class_no
    );
    println!(
        "BMI {:.1} | total score {}",
        record.result.bmi, record.result.total_score
    );

    println!("\nBadges");
    for entry in &record.result.items {
        let badge = BadgeView::for_item(entry);
        println!(
            "- {}: {}/5 ({} {})",
            badge.subject,
            badge.score,
            badge.tier.label(),
            badge.color
        );
    }

    println!(
        "\nStrongest: {} | needs work: {}",
        record.result.best_item.subject, record.result.worst_item.subject
    );

    if record.result.recommendations.is_empty() {
        println!("Team recommendations: none yet, keep training");
    } else {
        println!("Team recommendations");
        for team in &record.result.recommendations {
            println!("- {team}");
        }
    }

    match service.coach_comment(&record.record_id) {
        Ok(comment) => println!("\nCoach comment\n{comment}"),
        Err(err) => println!("\nCoach comment unavailable: {err}"),
    }

    let view = RecordView::from_record(
        &service
            .get(&record.record_id)
            .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?,
    );
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("\nAPI payload\n{json}"),
        Err(err) => println!("\nAPI payload unavailable: {err}"),
    }

    if args.skip_equipment {
        return Ok(());
    }

    println!("\nEquipment ledger demo");
    let ledger = EquipmentLedger::new(Arc::new(InMemoryEquipmentStore::default()));
    let seeded = ledger
        .seed(standard_inventory())
        .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;
    println!("- Seeded {seeded} inventory lines");

    let soccer = EquipmentId("soccer-balls".to_string());
    match ledger.borrow(&soccer, &record.student.name) {
        Ok(item) => println!("- Borrowed one '{}'; {} left", item.name, item.stock),
        Err(err) => println!("- Borrow failed: {err}"),
    }
    match ledger.return_item(&soccer, &record.student.name) {
        Ok(item) => println!("- Returned one '{}'; {} in stock", item.name, item.stock),
        Err(err) => println!("- Return failed: {err}"),
    }

    match ledger.logs() {
        Ok(entries) => {
            println!("- Ledger entries:");
            for entry in entries {
                println!(
                    "    {} {} by {} at {}",
                    entry.action.label(),
                    entry.item_name,
                    entry.actor,
                    entry.at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        Err(err) => println!("- Ledger unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let service = demo_service();

    for submission in demo_roster() {
        if let Err(err) = service.submit(submission) {
            println!("Skipping invalid roster entry: {err}");
        }
    }

    let records = service
        .list()
        .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;
    let bytes = records_to_csv(&records)?;

    let today = Local::now().date_naive();
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(export_filename(today)));
    std::fs::write(&path, bytes)?;

    println!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn demo_roster() -> Vec<FitnessSubmission> {
    vec![
        FitnessSubmission {
            student: StudentIdentity {
                name: "Chan Tai-man".to_string(),
                class: "6A".to_string(),
                class_no: 12,
            },
            gender: Gender::Male,
            sit_ups: 30,
            flexibility_cm: 20.0,
            hand_grip_kg: 25.0,
            run_9min_m: 1400.0,
            height_cm: 150.0,
            weight_kg: 40.0,
        },
        FitnessSubmission {
            student: StudentIdentity {
                name: "Lam Siu-ling".to_string(),
                class: "6A".to_string(),
                class_no: 18,
            },
            gender: Gender::Female,
            sit_ups: 24,
            flexibility_cm: 28.0,
            hand_grip_kg: 18.0,
            run_9min_m: 1250.0,
            height_cm: 148.0,
            weight_kg: 42.0,
        },
        FitnessSubmission {
            student: StudentIdentity {
                name: "Ho Ka-lok".to_string(),
                class: "6B".to_string(),
                class_no: 3,
            },
            gender: Gender::Male,
            sit_ups: 17,
            flexibility_cm: 12.0,
            hand_grip_kg: 21.0,
            run_9min_m: 1100.0,
            height_cm: 152.0,
            weight_kg: 55.0,
        },
    ]
}
