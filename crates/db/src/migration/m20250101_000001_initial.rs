//! Initial database migration.
//!
//! Creates the enums, the four tables and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(FINANCIAL_PERIODS_SQL).await?;
        db.execute_unprepared(METRIC_SETS_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE industry AS ENUM (
    'trade',
    'manufacturing',
    'services',
    'it',
    'construction',
    'finance',
    'other'
);

CREATE TYPE company_size AS ENUM ('small', 'medium');

CREATE TYPE metric_status AS ENUM ('good', 'warning', 'bad');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    telegram_id BIGINT NOT NULL UNIQUE,
    telegram_username VARCHAR(255),
    telegram_first_name VARCHAR(255),
    telegram_last_name VARCHAR(255),
    telegram_photo_url VARCHAR(500),
    email VARCHAR(255) UNIQUE,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_superuser BOOLEAN NOT NULL DEFAULT false,
    last_login_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    name VARCHAR(200) NOT NULL,
    inn VARCHAR(12) NOT NULL,
    industry industry NOT NULL DEFAULT 'other',
    size company_size NOT NULL DEFAULT 'small',
    description VARCHAR(1000),
    address VARCHAR(500),
    phone VARCHAR(20),
    website VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_inn_format CHECK (inn ~ '^([0-9]{10}|[0-9]{12})$'),
    CONSTRAINT uq_companies_owner_inn UNIQUE (owner_id, inn)
);

CREATE INDEX idx_companies_owner ON companies(owner_id, created_at DESC);
";

const FINANCIAL_PERIODS_SQL: &str = r"
CREATE TABLE financial_periods (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE RESTRICT,
    period_start DATE NOT NULL,
    period_end DATE NOT NULL,
    period_name VARCHAR(100) NOT NULL,

    -- Profit & loss
    revenue NUMERIC(20, 4) NOT NULL,
    cost_of_goods_sold NUMERIC(20, 4) NOT NULL,
    gross_profit NUMERIC(20, 4) NOT NULL,
    operating_expenses NUMERIC(20, 4) NOT NULL,
    ebit NUMERIC(20, 4) NOT NULL,
    net_profit NUMERIC(20, 4) NOT NULL,

    -- Balance sheet
    current_assets NUMERIC(20, 4) NOT NULL,
    non_current_assets NUMERIC(20, 4) NOT NULL,
    current_liabilities NUMERIC(20, 4) NOT NULL,
    non_current_liabilities NUMERIC(20, 4) NOT NULL,
    equity NUMERIC(20, 4) NOT NULL,
    cash NUMERIC(20, 4) NOT NULL,
    receivables NUMERIC(20, 4) NOT NULL,
    inventory NUMERIC(20, 4) NOT NULL,

    source_filename VARCHAR(255),
    source_file_type VARCHAR(20),
    upload_notes TEXT,
    version INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_period_range CHECK (period_start <= period_end),
    CONSTRAINT chk_revenue_positive CHECK (revenue > 0)
);

CREATE INDEX idx_financial_periods_company ON financial_periods(company_id, period_end DESC);
";

const METRIC_SETS_SQL: &str = r"
CREATE TABLE metric_sets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE RESTRICT,
    financial_period_id UUID NOT NULL UNIQUE REFERENCES financial_periods(id) ON DELETE RESTRICT,

    revenue NUMERIC(20, 4) NOT NULL,
    revenue_forecast NUMERIC(20, 4),
    gross_margin NUMERIC(20, 4) NOT NULL,
    ros NUMERIC(20, 4) NOT NULL,
    total_assets NUMERIC(20, 4) NOT NULL,
    roa NUMERIC(20, 4) NOT NULL,
    roe NUMERIC(20, 4) NOT NULL,
    current_ratio NUMERIC(20, 4) NOT NULL,
    quick_ratio NUMERIC(20, 4) NOT NULL,
    cash_ratio NUMERIC(20, 4) NOT NULL,
    autonomy_ratio NUMERIC(20, 4) NOT NULL,
    asset_turnover NUMERIC(20, 4) NOT NULL,
    net_working_capital NUMERIC(20, 4) NOT NULL,
    working_capital_ratio NUMERIC(20, 4) NOT NULL,

    gross_margin_status metric_status NOT NULL,
    ros_status metric_status NOT NULL,
    roa_status metric_status NOT NULL,
    roe_status metric_status NOT NULL,
    liquidity_status metric_status NOT NULL,

    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_metric_sets_company ON metric_sets(company_id);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at() RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_companies_updated_at BEFORE UPDATE ON companies
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_financial_periods_updated_at BEFORE UPDATE ON financial_periods
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_metric_sets_updated_at BEFORE UPDATE ON metric_sets
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS metric_sets;
DROP TABLE IF EXISTS financial_periods;
DROP TABLE IF EXISTS companies;
DROP TABLE IF EXISTS users;
DROP FUNCTION IF EXISTS set_updated_at();
DROP TYPE IF EXISTS metric_status;
DROP TYPE IF EXISTS company_size;
DROP TYPE IF EXISTS industry;
";
