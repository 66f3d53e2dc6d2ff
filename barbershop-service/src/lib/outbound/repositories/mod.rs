//! PostgreSQL adapters for the domain repository ports.
//!
//! Queries are built at runtime (`sqlx::query_as` over `FromRow` rows), so
//! the crate compiles without a live database.

pub mod account;
pub mod barbershop;
pub mod client;
pub mod dashboard;
pub mod offering;

pub use account::PostgresAccountRepository;
pub use barbershop::PostgresBarbershopRepository;
pub use client::PostgresClientRepository;
pub use dashboard::PostgresDashboardRepository;
pub use offering::PostgresOfferingRepository;

/// Constraint names declared in the migrations.
pub(crate) mod constraints {
    pub const ACCOUNTS_EMAIL: &str = "accounts_email_key";
    pub const ACCOUNTS_BARBERSHOP: &str = "accounts_barbershop_id_fkey";
    pub const BARBERSHOPS_OWNER: &str = "barbershops_owner_id_fkey";
    pub const CLIENTS_BARBERSHOP: &str = "clients_barbershop_id_fkey";
    pub const SERVICES_BARBERSHOP: &str = "services_barbershop_id_fkey";
}

/// Integrity constraint a statement ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation<'a> {
    Unique(&'a str),
    ForeignKey(&'a str),
}

pub(crate) fn violation(err: &sqlx::Error) -> Option<Violation<'_>> {
    let db_err = err.as_database_error()?;
    let constraint = db_err.constraint()?;

    if db_err.is_unique_violation() {
        Some(Violation::Unique(constraint))
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey(constraint))
    } else {
        None
    }
}
