//! Database seeder for FinReport development and testing.
//!
//! Seeds a demo user, one company and two quarters of figures with their
//! metric sets. Running it again leaves existing data alone.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

use finreport_core::auth::TelegramAuthData;
use finreport_core::company::{CompanyProfile, CompanySize, Industry};
use finreport_core::statements::{BalanceSheet, FinancialPeriod, PeriodMetadata, ProfitAndLoss};
use finreport_db::repositories::CreatePeriodInput;
use finreport_db::{CompanyRepository, FinancialPeriodRepository, UserRepository};

/// Telegram ID of the demo user.
const DEMO_TELEGRAM_ID: i64 = 100_000_001;
/// INN of the demo company.
const DEMO_INN: &str = "7707083893";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("FINREPORT__DATABASE__URL"))
        .context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = finreport_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding demo user...");
    let user_id = seed_demo_user(&db).await?;

    println!("Seeding demo company...");
    let Some(company_id) = seed_demo_company(&db, user_id).await? else {
        println!("  Demo company already exists, skipping periods...");
        println!("Seeding complete!");
        return Ok(());
    };

    println!("Seeding financial periods...");
    seed_periods(&db, user_id, company_id).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_demo_user(db: &DatabaseConnection) -> anyhow::Result<uuid::Uuid> {
    let data = TelegramAuthData {
        id: DEMO_TELEGRAM_ID,
        first_name: "Demo".to_string(),
        last_name: Some("User".to_string()),
        username: Some("finreport_demo".to_string()),
        photo_url: None,
        auth_date: chrono::Utc::now().timestamp(),
        hash: String::new(),
    };

    let (user, created) = UserRepository::new(db.clone())
        .upsert_from_telegram(&data)
        .await?;
    if !created {
        println!("  Demo user already exists, refreshed profile...");
    }
    Ok(user.id)
}

async fn seed_demo_company(
    db: &DatabaseConnection,
    owner_id: uuid::Uuid,
) -> anyhow::Result<Option<uuid::Uuid>> {
    let repo = CompanyRepository::new(db.clone());
    if repo.inn_exists_for_owner(owner_id, DEMO_INN, None).await? {
        return Ok(None);
    }

    let company = repo
        .create(
            owner_id,
            CompanyProfile {
                name: "Romashka LLC".to_string(),
                inn: DEMO_INN.to_string(),
                industry: Industry::Trade,
                size: CompanySize::Small,
                description: Some("Demo wholesale company".to_string()),
                address: None,
                phone: None,
                website: None,
            },
        )
        .await?;
    Ok(Some(company.id))
}

async fn seed_periods(
    db: &DatabaseConnection,
    owner_id: uuid::Uuid,
    company_id: uuid::Uuid,
) -> anyhow::Result<()> {
    let repo = FinancialPeriodRepository::new(db.clone());

    let quarters = [
        (
            "Q1 2025",
            date(2025, 1, 1)?,
            date(2025, 3, 31)?,
            FinancialPeriod {
                pnl: ProfitAndLoss {
                    revenue: dec!(1_000_000),
                    cost_of_goods_sold: dec!(650_000),
                    gross_profit: dec!(350_000),
                    operating_expenses: dec!(220_000),
                    ebit: dec!(130_000),
                    net_profit: dec!(104_000),
                },
                balance: BalanceSheet {
                    current_assets: dec!(900_000),
                    non_current_assets: dec!(1_100_000),
                    current_liabilities: dec!(600_000),
                    non_current_liabilities: dec!(400_000),
                    equity: dec!(1_000_000),
                    cash: dec!(150_000),
                    receivables: dec!(300_000),
                    inventory: dec!(350_000),
                },
            },
            None,
        ),
        (
            "Q2 2025",
            date(2025, 4, 1)?,
            date(2025, 6, 30)?,
            FinancialPeriod {
                pnl: ProfitAndLoss {
                    revenue: dec!(1_150_000),
                    cost_of_goods_sold: dec!(740_000),
                    gross_profit: dec!(410_000),
                    operating_expenses: dec!(240_000),
                    ebit: dec!(170_000),
                    net_profit: dec!(136_000),
                },
                balance: BalanceSheet {
                    current_assets: dec!(1_000_000),
                    non_current_assets: dec!(1_120_000),
                    current_liabilities: dec!(620_000),
                    non_current_liabilities: dec!(380_000),
                    equity: dec!(1_120_000),
                    cash: dec!(210_000),
                    receivables: dec!(320_000),
                    inventory: dec!(360_000),
                },
            },
            Some(dec!(1_250_000)),
        ),
    ];

    for (name, start, end, figures, revenue_forecast) in quarters {
        let (period, metrics) = repo
            .create_with_metrics(
                owner_id,
                company_id,
                CreatePeriodInput {
                    metadata: PeriodMetadata {
                        period_name: name.to_string(),
                        period_start: start,
                        period_end: end,
                        source_filename: None,
                        source_file_type: None,
                        upload_notes: Some("Seeded demo data".to_string()),
                    },
                    figures,
                    revenue_forecast,
                },
            )
            .await
            .with_context(|| format!("Failed to seed {name}"))?;
        println!(
            "  {} stored: gross margin {}%, ROE {}%",
            period.period_name, metrics.gross_margin, metrics.roe
        );
    }

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).context("invalid seed date")
}
