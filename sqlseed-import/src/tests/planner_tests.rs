use super::*;
use crate::fake::FakeDatabase;

fn metric(has_identity: bool, key: &[&str]) -> TableMetadata {
    TableMetadata {
        schema: Some("dbo".to_string()),
        table_name: "Metric".to_string(),
        has_identity,
        primary_key_columns: key.iter().map(|c| c.to_string()).collect(),
    }
}

fn row(pairs: &[(&str, Value)]) -> Row {
    Row::new(
        pairs.iter().map(|(c, _)| c.to_string()).collect(),
        pairs.iter().map(|(_, v)| v.clone()).collect(),
    )
    .unwrap()
}

const KEY_PROBE: &str = "SELECT 1 FROM [dbo].[Metric] WHERE [Id] = 1";

#[test]
fn table_without_key_is_always_inserted() {
    let db = FakeDatabase::new(Dialect::SqlServer);
    let planned = plan(&db, &metric(false, &[]), &row(&[("Name", "x".into())])).unwrap();

    assert_eq!(
        planned,
        PlannedStatement::Insert {
            sql: "INSERT INTO [dbo].[Metric] ([Name]) VALUES ('x');".to_string()
        }
    );
    assert!(db.probes.borrow().is_empty());
}

#[test]
fn missing_row_is_inserted() {
    let db = FakeDatabase::new(Dialect::SqlServer);
    let planned = plan(
        &db,
        &metric(false, &["Id"]),
        &row(&[("Id", "1".into()), ("Name", "x".into())]),
    )
    .unwrap();

    assert_eq!(
        planned.sql(),
        Some("INSERT INTO [dbo].[Metric] ([Id], [Name]) VALUES (1, 'x');")
    );
    assert_eq!(*db.probes.borrow(), vec![KEY_PROBE.to_string()]);
}

#[test]
fn identity_insert_is_bracketed_per_statement() {
    let db = FakeDatabase::new(Dialect::SqlServer);
    let planned = plan(
        &db,
        &metric(true, &["Id"]),
        &row(&[("Id", "1".into()), ("Name", "x".into())]),
    )
    .unwrap();

    assert_eq!(
        planned.sql(),
        Some(
            "SET IDENTITY_INSERT [dbo].[Metric] ON; \
             INSERT INTO [dbo].[Metric] ([Id], [Name]) VALUES (1, 'x'); \
             SET IDENTITY_INSERT [dbo].[Metric] OFF;"
        )
    );
}

#[test]
fn identity_toggle_is_omitted_for_sqlite() {
    let db = FakeDatabase::new(Dialect::Sqlite);
    let planned = plan(
        &db,
        &metric(true, &["Id"]),
        &row(&[("Id", "1".into()), ("Name", "x".into())]),
    )
    .unwrap();

    assert_eq!(
        planned.sql(),
        Some("INSERT INTO \"dbo\".\"Metric\" (\"Id\", \"Name\") VALUES (1, 'x');")
    );
}

#[test]
fn changed_row_is_updated_by_key() {
    let db = FakeDatabase::new(Dialect::SqlServer).with_existing(KEY_PROBE);
    let planned = plan(
        &db,
        &metric(true, &["Id"]),
        &row(&[("Id", "1".into()), ("Name", "it's".into()), ("Scale", "2.50".into())]),
    )
    .unwrap();

    assert_eq!(
        planned,
        PlannedStatement::Update {
            sql: "UPDATE [dbo].[Metric] SET [Name] = 'it''s', [Scale] = 2.50 WHERE [Id] = 1;"
                .to_string()
        }
    );
    assert_eq!(
        db.probes.borrow()[1],
        "SELECT 1 FROM [dbo].[Metric] WHERE [Id] = 1 AND [Name] = 'it''s' AND [Scale] = 2.50"
    );
}

#[test]
fn unchanged_row_is_a_no_op() {
    let db = FakeDatabase::new(Dialect::SqlServer)
        .with_existing(KEY_PROBE)
        .with_existing("SELECT 1 FROM [dbo].[Metric] WHERE [Id] = 1 AND [Name] = 'x'");
    let planned = plan(
        &db,
        &metric(false, &["Id"]),
        &row(&[("Id", "1".into()), ("Name", "x".into())]),
    )
    .unwrap();

    assert_eq!(
        planned,
        PlannedStatement::NoOpUpdate {
            table: "[dbo].[Metric]".to_string(),
            key: "[Id] = 1".to_string(),
        }
    );
    assert!(planned.is_no_op());
    assert_eq!(planned.sql(), None);
}

#[test]
fn key_only_row_that_exists_is_a_no_op() {
    let db = FakeDatabase::new(Dialect::SqlServer).with_existing(KEY_PROBE);
    let planned = plan(&db, &metric(false, &["Id"]), &row(&[("Id", "1".into())])).unwrap();

    assert!(planned.is_no_op());
    assert_eq!(db.probes.borrow().len(), 1);
}

#[test]
fn nulls_compare_with_is_null() {
    let db = FakeDatabase::new(Dialect::SqlServer).with_existing(KEY_PROBE);
    let planned = plan(
        &db,
        &metric(false, &["Id"]),
        &row(&[("Id", "1".into()), ("Note", "".into())]),
    )
    .unwrap();

    assert_eq!(
        db.probes.borrow()[1],
        "SELECT 1 FROM [dbo].[Metric] WHERE [Id] = 1 AND [Note] IS NULL"
    );
    assert_eq!(
        planned.sql(),
        Some("UPDATE [dbo].[Metric] SET [Note] = null WHERE [Id] = 1;")
    );
}

#[test]
fn composite_key_follows_declared_order() {
    let db = FakeDatabase::new(Dialect::SqlServer);
    let meta = metric(false, &["VariantId", "MetricId"]);
    let row = row(&[
        ("MetricId", "7".into()),
        ("Label", "a".into()),
        ("variantid", "3".into()),
    ]);

    assert_eq!(
        key_predicate(Dialect::SqlServer, &meta, &row).unwrap(),
        "[VariantId] = 3 AND [MetricId] = 7"
    );
    plan(&db, &meta, &row).unwrap();
    assert_eq!(
        db.probes.borrow()[0],
        "SELECT 1 FROM [dbo].[Metric] WHERE [VariantId] = 3 AND [MetricId] = 7"
    );
}

#[test]
fn row_missing_a_key_column_is_rejected() {
    let db = FakeDatabase::new(Dialect::SqlServer);
    let err = plan(&db, &metric(false, &["Id"]), &row(&[("Name", "x".into())])).unwrap_err();

    assert_eq!(
        err,
        PlanError::MissingKeyColumn {
            table: "Metric".to_string(),
            column: "Id".to_string(),
        }
    );
    assert!(db.probes.borrow().is_empty());
}
