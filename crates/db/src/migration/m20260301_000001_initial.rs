//! Initial database migration.
//!
//! Creates accounts, owner profiles, properties, manager assignments, stays,
//! payouts, the ledger and refresh-token storage.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ACCOUNTS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(OWNERS_SQL).await?;
        db.execute_unprepared(REFRESH_TOKENS_SQL).await?;

        // ============================================================
        // PART 2: PROPERTIES & ASSIGNMENTS
        // ============================================================
        db.execute_unprepared(PROPERTIES_SQL).await?;
        db.execute_unprepared(MANAGER_PROPERTIES_SQL).await?;

        // ============================================================
        // PART 3: STAYS, PAYOUTS & LEDGER
        // ============================================================
        db.execute_unprepared(STAYS_SQL).await?;
        db.execute_unprepared(PAYOUTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role VARCHAR(16) NOT NULL,
    can_create_owners BOOLEAN NOT NULL DEFAULT false,
    can_create_properties BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_users_role CHECK (role IN ('ADMIN', 'MANAGER', 'OWNER'))
);

CREATE INDEX idx_users_role_created ON users(role, created_at DESC);
";

const OWNERS_SQL: &str = r"
CREATE TABLE owners (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    phone VARCHAR(64),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const REFRESH_TOKENS_SQL: &str = r"
CREATE TABLE refresh_tokens (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token_hash VARCHAR(128) NOT NULL UNIQUE,
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_refresh_tokens_user ON refresh_tokens(user_id);
";

const PROPERTIES_SQL: &str = r"
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(255) NOT NULL,
    address VARCHAR(512) NOT NULL,
    owner_id UUID NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_properties_owner ON properties(owner_id);
CREATE INDEX idx_properties_title ON properties(title);
";

const MANAGER_PROPERTIES_SQL: &str = r"
CREATE TABLE manager_properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    assigned_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_manager_properties_pair UNIQUE (user_id, property_id)
);

CREATE INDEX idx_manager_properties_property ON manager_properties(property_id);
CREATE INDEX idx_manager_properties_assigned ON manager_properties(assigned_at DESC);
";

const STAYS_SQL: &str = r"
CREATE TABLE stays (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    guest_name VARCHAR(255) NOT NULL,
    check_in TIMESTAMPTZ NOT NULL,
    check_out TIMESTAMPTZ NOT NULL,
    total_amount NUMERIC(14, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_stays_dates CHECK (check_out > check_in),
    CONSTRAINT chk_stays_total CHECK (total_amount > 0)
);

CREATE INDEX idx_stays_property_check_in ON stays(property_id, check_in DESC);
CREATE INDEX idx_stays_check_in ON stays(check_in DESC);
";

const PAYOUTS_SQL: &str = r"
CREATE TABLE payouts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    amount NUMERIC(14, 2) NOT NULL,
    comment TEXT,
    paid_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_payouts_amount CHECK (amount > 0)
);

CREATE INDEX idx_payouts_owner_paid ON payouts(owner_id, paid_at DESC);
CREATE INDEX idx_payouts_property_paid ON payouts(property_id, paid_at DESC);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    type VARCHAR(16) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL,
    comment TEXT,
    owner_id UUID NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    stay_id UUID REFERENCES stays(id) ON DELETE SET NULL,
    payout_id UUID REFERENCES payouts(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_transactions_type
        CHECK (type IN ('INCOME', 'COMMISSION', 'CLEANING', 'EXPENSE', 'PAYOUT')),
    CONSTRAINT chk_transactions_amount CHECK (amount > 0)
);

CREATE INDEX idx_transactions_owner_created ON transactions(owner_id, created_at DESC);
CREATE INDEX idx_transactions_property_created ON transactions(property_id, created_at DESC);
CREATE INDEX idx_transactions_stay ON transactions(stay_id) WHERE stay_id IS NOT NULL;
CREATE INDEX idx_transactions_payout ON transactions(payout_id) WHERE payout_id IS NOT NULL;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS payouts CASCADE;
DROP TABLE IF EXISTS stays CASCADE;
DROP TABLE IF EXISTS manager_properties CASCADE;
DROP TABLE IF EXISTS properties CASCADE;
DROP TABLE IF EXISTS refresh_tokens CASCADE;
DROP TABLE IF EXISTS owners CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
