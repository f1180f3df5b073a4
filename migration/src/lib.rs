pub use sea_orm_migration::prelude::*;

mod seed;
mod v1_13_0;
mod v1_3_0_generated;
mod v1_3_1_consistency;
mod v1_4_0;
mod v1_5_0;

/// Named fixture content a test database can be reset to.
///
/// Each set is an ordered chain of schema migrations interleaved with the seed
/// migrations that populate it. Seeds rely on the schema at their position in
/// the chain, so the order is part of the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureSet {
    /// Users, tools and workflows from public repositories.
    Public,
    /// Public content plus private tools of the `DockstoreTestUser` organization.
    Confidential1,
    /// Public content plus unrefreshed workflows of the `DockstoreTestUser2` organization.
    Confidential2,
}

impl FixtureSet {
    /// Migrations of this set in the order they must be applied.
    pub fn migrations(&self) -> Vec<Box<dyn MigrationTrait>> {
        let (seed, seed_topics): (Box<dyn MigrationTrait>, Box<dyn MigrationTrait>) = match self {
            Self::Public => (
                Box::new(seed::public::Seed),
                Box::new(seed::public::SeedTopics),
            ),
            Self::Confidential1 => (
                Box::new(seed::confidential1::Seed),
                Box::new(seed::confidential1::SeedTopics),
            ),
            Self::Confidential2 => (
                Box::new(seed::confidential2::Seed),
                Box::new(seed::confidential2::SeedTopics),
            ),
        };

        vec![
            Box::new(v1_3_0_generated::Migration),
            Box::new(v1_3_1_consistency::Migration),
            seed,
            Box::new(v1_4_0::Migration),
            Box::new(v1_5_0::Migration),
            seed_topics,
            Box::new(v1_13_0::Migration),
        ]
    }

    /// Version strings of [`Self::migrations`], in order.
    pub fn versions(&self) -> Vec<String> {
        self.migrations()
            .iter()
            .map(|migration| migration.name().to_string())
            .collect()
    }
}

/// Schema only, without fixture content.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(v1_3_0_generated::Migration),
            Box::new(v1_3_1_consistency::Migration),
            Box::new(v1_4_0::Migration),
            Box::new(v1_5_0::Migration),
            Box::new(v1_13_0::Migration),
        ]
    }
}

pub struct PublicMigrator;

#[async_trait::async_trait]
impl MigratorTrait for PublicMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        FixtureSet::Public.migrations()
    }
}

pub struct Confidential1Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Confidential1Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        FixtureSet::Confidential1.migrations()
    }
}

pub struct Confidential2Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Confidential2Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        FixtureSet::Confidential2.migrations()
    }
}
