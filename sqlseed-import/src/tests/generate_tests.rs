use super::*;
use sqlseed_db::open_memory;

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE Metric (Id INTEGER PRIMARY KEY AUTOINCREMENT, Code TEXT, Scale REAL);
         INSERT INTO Metric (Id, Code, Scale) VALUES (1, '007', 1.5);
         INSERT INTO Metric (Id, Code, Scale) VALUES (2, 'O''Neil', NULL);
         CREATE TABLE Tag (Name TEXT);
         INSERT INTO Tag VALUES ('a');",
    )
    .unwrap();
    conn
}

#[test]
fn file_name_follows_table() {
    assert_eq!(insert_script_file_name("Metric"), "InsertDataForMetric.sql");
}

#[test]
fn sqlite_script_has_no_identity_toggles() {
    let script = generate_insert_script(&seeded(), "metric", Dialect::Sqlite).unwrap();
    assert_eq!(
        script,
        "INSERT INTO \"main\".\"Metric\" (\"Id\", \"Code\", \"Scale\") VALUES (1, '007', 1.5);\n\
         INSERT INTO \"main\".\"Metric\" (\"Id\", \"Code\", \"Scale\") VALUES (2, 'O''Neil', null);\n"
    );
}

#[test]
fn sql_server_script_is_bracketed_once() {
    let script = generate_insert_script(&seeded(), "Metric", Dialect::SqlServer).unwrap();
    let lines: Vec<&str> = script.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "SET IDENTITY_INSERT [main].[Metric] ON;");
    assert!(lines[1].starts_with("INSERT INTO [main].[Metric] ([Id], [Code], [Scale])"));
    assert_eq!(lines[3], "SET IDENTITY_INSERT [main].[Metric] OFF;");
}

#[test]
fn table_without_identity_is_not_bracketed() {
    let script = generate_insert_script(&seeded(), "Tag", Dialect::SqlServer).unwrap();
    assert_eq!(script, "INSERT INTO [main].[Tag] ([Name]) VALUES ('a');\n");
}

#[test]
fn script_replays_into_a_fresh_database() {
    let script = generate_insert_script(&seeded(), "Metric", Dialect::Sqlite).unwrap();

    let fresh = open_memory().unwrap();
    fresh
        .execute_batch(
            "CREATE TABLE Metric (Id INTEGER PRIMARY KEY AUTOINCREMENT, Code TEXT, Scale REAL);",
        )
        .unwrap();
    fresh.execute_batch(&script).unwrap();

    let code: String = fresh
        .query_row("SELECT Code FROM Metric WHERE Id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(code, "007");
}

#[test]
fn missing_table_is_a_metadata_error() {
    let err = generate_insert_script(&seeded(), "Nope", Dialect::Sqlite).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Metadata(MetadataError::TableNotFound(_))
    ));
}

#[test]
fn writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_insert_script(&seeded(), "Tag", Dialect::Sqlite, dir.path()).unwrap();

    assert_eq!(path, dir.path().join("InsertDataForTag.sql"));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "INSERT INTO \"main\".\"Tag\" (\"Name\") VALUES ('a');\n"
    );
}

#[test]
fn schema_qualified_table_names_resolve() {
    let script = generate_insert_script(&seeded(), "main.Tag", Dialect::SqlServer).unwrap();
    assert_eq!(script, "INSERT INTO [main].[Tag] ([Name]) VALUES ('a');\n");

    let err = generate_insert_script(&seeded(), "metric.Tag", Dialect::Sqlite).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Metadata(MetadataError::TableNotFound(_))
    ));
}

#[test]
fn qualified_name_is_kept_in_the_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_insert_script(&seeded(), "main.Tag", Dialect::Sqlite, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("InsertDataFormain.Tag.sql"));
}
