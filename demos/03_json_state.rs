/// json state - serialization handed to the persistence layer
use chrono::{TimeZone, Utc};
use coop_finance_rs::{
    EngineConfig, FinancialEngine, Money, RateScheduleKind, SafeTimeProvider, TimeSource,
    TimeDepositRecord, Uuid, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    ));

    // configuration is plain json
    let config = EngineConfig::standard().with_rate_schedule(RateScheduleKind::FlatTop);
    println!("=== engine config ===\n{}\n", config.to_json()?);
    let engine = FinancialEngine::new(EngineConfig::from_json(&config.to_json()?)?)?;

    let deposit = engine.open_deposit("M-0200", Money::from_major(1_200_000), 12, &time)?;
    println!("=== new deposit ===\n{}\n", deposit.json());

    // a record fetched from storage without a start date
    let fetched = TimeDepositRecord::existing(
        Uuid::new_v4(),
        "M-0201",
        Money::from_major(40_000),
        6,
        Utc.with_ymd_and_hms(2024, 8, 31, 0, 0, 0).unwrap(),
        Rate::from_bps(75),
        Money::from_str_exact("148.77")?,
    );
    println!("=== fetched deposit ===\n{}\n", fetched.json());

    let quote = engine.compute_early_withdrawal_now(&fetched, fetched.principal, &time)?;
    println!("=== early withdrawal quote ===\n{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}
