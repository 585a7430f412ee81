use std::path::Path;
use std::process::{Command, Output};

fn sqlseed(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlseed"))
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .args(args)
        .output()
        .unwrap()
}

fn query_count(db: &Path, sql: &str) -> i64 {
    let conn = rusqlite::Connection::open(db).unwrap();
    conn.query_row(sql, [], |r| r.get(0)).unwrap()
}

#[test]
fn scripts_then_csv_then_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let db = root.join("seed.db");
    let scripts = root.join("scripts");
    let data = root.join("data");
    std::fs::create_dir_all(scripts.join("Security")).unwrap();
    std::fs::create_dir_all(scripts.join("Tables")).unwrap();
    std::fs::create_dir_all(&data).unwrap();

    std::fs::write(
        scripts.join("Tables/Variant.sql"),
        "CREATE TABLE MetricVariant (\n\
         Id INTEGER PRIMARY KEY,\n\
         MetricId INTEGER NOT NULL REFERENCES Metric(Id),\n\
         Label TEXT\n);\nGO\n",
    )
    .unwrap();
    std::fs::write(
        scripts.join("Security/Metric.sql"),
        "CREATE TABLE Metric (Id INTEGER PRIMARY KEY, Name TEXT NOT NULL);\nGO\n",
    )
    .unwrap();
    std::fs::write(scripts.join("Manifest.sql"), "this is not sql\n").unwrap();
    std::fs::write(data.join("a.MetricVariant.csv"), "Id,MetricId,Label\n1,1,daily\n").unwrap();
    std::fs::write(data.join("b.Metric.csv"), "Id,Name\n1,Revenue\n").unwrap();

    let db_arg = db.to_str().unwrap();
    let out = sqlseed(
        root,
        &["--database", db_arg, "run-scripts", "--path", scripts.to_str().unwrap(), "--yes"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stdout));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("No failures"));
    assert!(!stdout.contains("Manifest.sql"));

    let out = sqlseed(
        root,
        &["--database", db_arg, "load-csv", "--path", data.to_str().unwrap()],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stdout));
    assert_eq!(query_count(&db, "SELECT COUNT(*) FROM MetricVariant"), 1);

    let out = sqlseed(
        root,
        &["--database", db_arg, "run-scripts", "--path", scripts.to_str().unwrap(), "--yes"],
    );
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Skipped:    2"));
}

#[test]
fn permanent_failures_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let db = root.join("seed.db");
    let scripts = root.join("scripts");
    std::fs::create_dir_all(&scripts).unwrap();
    std::fs::write(scripts.join("Broken.sql"), "CREAT TABLE Nope (x INT);\n").unwrap();

    let out = sqlseed(
        root,
        &[
            "--database",
            db.to_str().unwrap(),
            "run-scripts",
            "--path",
            scripts.to_str().unwrap(),
            "--yes",
        ],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("1 operation(s) failed"));
}

#[test]
fn missing_database_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let out = sqlseed(
        dir.path(),
        &["generate-insert", "--table", "Metric", "--output", dir.path().to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("no database given"));
}

#[test]
fn generate_insert_writes_the_script() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("seed.db");
    {
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE Metric (Id INTEGER PRIMARY KEY, Name TEXT);
             INSERT INTO Metric VALUES (1, 'Revenue');",
        )
        .unwrap();
    }

    let out = sqlseed(
        dir.path(),
        &[
            "--database",
            db.to_str().unwrap(),
            "generate-insert",
            "--table",
            "Metric",
            "--output",
            dir.path().to_str().unwrap(),
            "--dialect",
            "sqlserver",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stdout));

    let script = std::fs::read_to_string(dir.path().join("InsertDataForMetric.sql")).unwrap();
    assert_eq!(
        script,
        "INSERT INTO [main].[Metric] ([Id], [Name]) VALUES (1, 'Revenue');\n"
    );
}

#[test]
fn script_directories_run_against_their_own_databases() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let app_db = root.join("Application.db");
    let dw_db = root.join("DashboardDW.db");
    let scripts = root.join("scripts");
    std::fs::create_dir_all(scripts.join("Application/Security")).unwrap();
    std::fs::create_dir_all(scripts.join("DashboardDW")).unwrap();
    std::fs::create_dir_all(scripts.join("Unmapped")).unwrap();

    std::fs::write(
        scripts.join("Application/Tables.sql"),
        "INSERT INTO AppUser VALUES (1);\nGO\n",
    )
    .unwrap();
    std::fs::write(
        scripts.join("Application/Security/Users.sql"),
        "CREATE TABLE AppUser (Id INTEGER PRIMARY KEY);\nGO\n",
    )
    .unwrap();
    std::fs::write(
        scripts.join("DashboardDW/Facts.sql"),
        "CREATE TABLE Fact (Id INTEGER PRIMARY KEY);\nGO\n",
    )
    .unwrap();
    std::fs::write(scripts.join("Unmapped/Other.sql"), "CREATE TABLE Other (x INT);\n").unwrap();

    let settings_dir = root.join("sqlseed");
    std::fs::create_dir_all(&settings_dir).unwrap();
    std::fs::write(
        settings_dir.join("settings.toml"),
        format!(
            "[scripts.databases]\nApplication = '{}'\nDashboardDW = '{}'\n",
            app_db.display(),
            dw_db.display()
        ),
    )
    .unwrap();

    let out = sqlseed(root, &["run-scripts", "--path", scripts.to_str().unwrap(), "--yes"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "{}", stdout);
    assert!(stdout.contains("No database mapped for Unmapped"));

    assert_eq!(query_count(&app_db, "SELECT COUNT(*) FROM AppUser"), 1);
    assert_eq!(
        query_count(&app_db, "SELECT COUNT(*) FROM sqlite_master WHERE name = 'Fact'"),
        0
    );
    assert_eq!(
        query_count(&dw_db, "SELECT COUNT(*) FROM sqlite_master WHERE name = 'Fact'"),
        1
    );
    assert_eq!(
        query_count(&dw_db, "SELECT COUNT(*) FROM sqlite_master WHERE name = 'AppUser'"),
        0
    );
}
