//! Tests for database reset determinism.

use dockstore_test_utils::database::{connect, reset_database, table_names};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, Statement,
};

use super::*;

struct Snapshot {
    users: Vec<entity::enduser::Model>,
    tokens: Vec<entity::token::Model>,
    tools: Vec<entity::tool::Model>,
    tags: Vec<entity::tag::Model>,
    workflows: Vec<entity::workflow::Model>,
    versions: Vec<entity::workflowversion::Model>,
    sourcefiles: Vec<entity::sourcefile::Model>,
}

async fn snapshot(db: &DatabaseConnection) -> Result<Snapshot, TestError> {
    use entity::prelude::*;

    Ok(Snapshot {
        users: Enduser::find()
            .order_by_asc(entity::enduser::Column::Id)
            .all(db)
            .await?,
        tokens: Token::find()
            .order_by_asc(entity::token::Column::Id)
            .all(db)
            .await?,
        tools: Tool::find()
            .order_by_asc(entity::tool::Column::Id)
            .all(db)
            .await?,
        tags: Tag::find()
            .order_by_asc(entity::tag::Column::Id)
            .all(db)
            .await?,
        workflows: Workflow::find()
            .order_by_asc(entity::workflow::Column::Id)
            .all(db)
            .await?,
        versions: Workflowversion::find()
            .order_by_asc(entity::workflowversion::Column::Id)
            .all(db)
            .await?,
        sourcefiles: Sourcefile::find()
            .order_by_asc(entity::sourcefile::Column::Id)
            .all(db)
            .await?,
    })
}

fn assert_same(first: &Snapshot, second: &Snapshot) {
    assert_eq!(first.users, second.users);
    assert_eq!(first.tokens, second.tokens);
    assert_eq!(first.tools, second.tools);
    assert_eq!(first.tags, second.tags);
    assert_eq!(first.workflows, second.workflows);
    assert_eq!(first.versions, second.versions);
    assert_eq!(first.sourcefiles, second.sourcefiles);
}

/// Tests that resetting to the same fixture set always yields the same rows.
///
/// Changes made between the resets must not survive the second reset.
///
/// Expected: Ok with identical snapshots
#[tokio::test]
async fn reset_is_deterministic() -> Result<(), TestError> {
    for set in [
        FixtureSet::Public,
        FixtureSet::Confidential1,
        FixtureSet::Confidential2,
    ] {
        let db = connect().await?;

        reset_database(&db, set).await?;
        let first = snapshot(&db).await?;

        db.execute_unprepared("UPDATE tool SET is_published = TRUE WHERE id = 1")
            .await?;
        db.execute_unprepared("DELETE FROM tag WHERE id = 2").await?;

        reset_database(&db, set).await?;
        let second = snapshot(&db).await?;

        assert_same(&first, &second);
    }

    Ok(())
}

/// Tests that a reset restores data changed through the CLI.
///
/// Expected: Ok with the tool unpublished again after the reset
#[tokio::test]
async fn reset_discards_cli_changes() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let published =
        "SELECT COUNT(*) AS count FROM tool WHERE name = 'quayandgithub' AND is_published";

    test.cli
        .run_expect(
            &["tool", "publish", "--entry", "quay.io/dockstoretestuser/quayandgithub"],
            ExitCode::Success,
        )
        .await?;
    assert_eq!(test.count(published).await?, 1);

    reset_database(&test.db, FixtureSet::Public).await?;
    assert_eq!(test.count(published).await?, 0);

    test.assert_no_leaked_connections().await
}

/// Tests that fixture sets differ only in their extra content.
///
/// Expected: Ok with the confidential sets adding tools or workflows to the public rows
#[tokio::test]
async fn fixture_sets_extend_public_content() -> Result<(), TestError> {
    let db = connect().await?;

    reset_database(&db, FixtureSet::Confidential1).await?;
    let confidential1 = snapshot(&db).await?;
    assert_eq!(confidential1.tools.len(), 6);
    assert_eq!(confidential1.workflows.len(), 2);

    reset_database(&db, FixtureSet::Confidential2).await?;
    let confidential2 = snapshot(&db).await?;
    assert_eq!(confidential2.tools.len(), 4);
    assert_eq!(confidential2.workflows.len(), 4);
    assert!(table_names(&db).await?.iter().any(|table| table == "seaql_migrations"));

    Ok(())
}

#[derive(Debug, FromQueryResult)]
struct AppliedVersion {
    version: String,
}

/// Tests that a reset records exactly the versions its fixture set declares.
///
/// Expected: Ok with the migration table listing every version of the set, for each set
#[tokio::test]
async fn reset_records_declared_versions() -> Result<(), TestError> {
    let db = connect().await?;

    for set in [
        FixtureSet::Public,
        FixtureSet::Confidential1,
        FixtureSet::Confidential2,
    ] {
        reset_database(&db, set).await?;

        let mut applied: Vec<String> = AppliedVersion::find_by_statement(Statement::from_string(
            db.get_database_backend(),
            "SELECT version FROM seaql_migrations",
        ))
        .all(&db)
        .await?
        .into_iter()
        .map(|row| row.version)
        .collect();
        applied.sort();

        let mut declared = set.versions();
        declared.sort();

        assert_eq!(applied, declared, "{set:?}");
    }

    Ok(())
}
