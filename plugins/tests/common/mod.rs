#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use parquet_viewer_core::api::{JsonConfig, JsonSpace, ParquetToolsConfig, Settings};
use tempfile::TempDir;

pub const SMALL_ROWS: [&str; 2] = [
    r#"{"id":1,"name":"alice","scores":[1.5,2],"meta":{}}"#,
    r#"{"id":2,"name":"bob","scores":[],"meta":{"team":"blue"}}"#,
];

/// Stand-in for parquet-tools: `cat -j <abs path>` prints `<path>.json`
/// next to the given `.parquet`, failing like the real tool when it is absent.
/// `*-slow.parquet` records its pid in `<path>.pid`, prints two rows and then
/// hangs.
const FAKE_PARQUET_TOOLS: &str = r#"#!/bin/sh
if [ "$1" != "cat" ] || [ "$2" != "-j" ]; then
  echo "unexpected arguments: $*" >&2
  exit 2
fi
case "$3" in
  /*) ;;
  *) echo "path is not absolute: $3" >&2; exit 2 ;;
esac
case "$3" in
  *-slow.parquet)
    echo $$ > "${3%.parquet}.pid"
    echo '{"id":1}'
    echo '{"id":2}'
    exec sleep 30
    ;;
esac
ref="${3%.parquet}.json"
if [ ! -f "$ref" ]; then
  echo "java.io.IOException: Could not read footer for file $3" >&2
  exit 1
fi
cat "$ref"
"#;

/// Stand-in for `java`: accepts `-jar <file>.jar ...` and hands the rest to
/// the fake launcher.
const FAKE_JAVA: &str = r#"#!/bin/sh
if [ "$1" != "-jar" ]; then
  echo "expected -jar, got $1" >&2
  exit 2
fi
case "$2" in
  *.jar) ;;
  *) echo "not a jar: $2" >&2; exit 2 ;;
esac
shift 2
exec "$(dirname "$0")/parquet-tools" "$@"
"#;

pub fn large_rows() -> Vec<String> {
    (0..2000)
        .map(|i| format!(r#"{{"id":{i},"value":"row-{i}","flag":{}}}"#, i % 2 == 0))
        .collect()
}

/// What `JSON.stringify(row, null, gap)` gives for [`SMALL_ROWS`].
pub fn small_rows_indented(gap: &str) -> Vec<String> {
    let g = gap;
    let gg = format!("{gap}{gap}");
    vec![
        format!("{{\n{g}\"id\": 1,\n{g}\"name\": \"alice\",\n{g}\"scores\": [\n{gg}1.5,\n{gg}2\n{g}],\n{g}\"meta\": {{}}\n}}"),
        format!("{{\n{g}\"id\": 2,\n{g}\"name\": \"bob\",\n{g}\"scores\": [],\n{g}\"meta\": {{\n{gg}\"team\": \"blue\"\n{g}}}\n}}"),
    ]
}

fn write_executable(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Shared directory with the fake tools and data files. Built once so no test
/// execs a script another thread is still writing.
pub fn fixture() -> &'static TempDir {
    static DIR: OnceLock<TempDir> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write_executable(&root.join("parquet-tools"), FAKE_PARQUET_TOOLS);
        write_executable(&root.join("java"), FAKE_JAVA);
        std::fs::write(root.join("parquet-tools-1.12.0.jar"), b"PK").unwrap();

        std::fs::write(root.join("small.parquet"), b"PAR1").unwrap();
        std::fs::write(root.join("small.json"), format!("{}\n", SMALL_ROWS.join("\n"))).unwrap();

        std::fs::write(root.join("large.parquet"), b"PAR1").unwrap();
        std::fs::write(root.join("large.json"), format!("{}\n", large_rows().join("\n"))).unwrap();

        std::fs::write(root.join("broken.parquet"), b"not parquet").unwrap();

        std::fs::write(root.join("garbage.parquet"), b"PAR1").unwrap();
        std::fs::write(root.join("garbage.json"), "{\"id\":1}\nnot json\n{\"id\":3}\n").unwrap();

        std::fs::write(root.join("blanks.parquet"), b"PAR1").unwrap();
        std::fs::write(root.join("blanks.json"), "{\"id\":1}\n\n   \n{\"id\":2}\n").unwrap();

        for name in ["cancel-slow.parquet", "drop-slow.parquet"] {
            std::fs::write(root.join(name), b"PAR1").unwrap();
        }
        dir
    })
}

/// Waits for the fake tool that wrote `pid_file` to be gone.
pub async fn assert_exits(pid_file: &Path) {
    let pid = std::fs::read_to_string(pid_file).unwrap();
    let pid = pid.trim();
    for _ in 0..100 {
        let alive = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("kill -0 {pid} 2>/dev/null"))
            .status()
            .unwrap()
            .success();
        if !alive {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("parquet-tools (pid {pid}) is still running");
}

pub fn launcher_settings(space: JsonSpace) -> Settings {
    Settings {
        json: JsonConfig { space },
        parquet_tools: ParquetToolsConfig {
            path: Some(fixture().path().join("parquet-tools").display().to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn jar_settings() -> Settings {
    let root = fixture().path();
    Settings {
        parquet_tools: ParquetToolsConfig {
            path: Some(root.join("parquet-tools-1.12.0.jar").display().to_string()),
            java: root.join("java").display().to_string(),
        },
        ..Default::default()
    }
}
