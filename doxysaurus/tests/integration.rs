use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doxysaurus")))
}

fn fixture_dir() -> String {
    format!("{}/tests/fixtures/xml", env!("CARGO_MANIFEST_DIR"))
}

fn run(args: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["-o", dir.path().to_str().unwrap()])
        .args(args)
        .assert()
        .success();
    dir
}

fn read(dir: &TempDir, path: &str) -> String {
    fs::read_to_string(dir.path().join(path)).unwrap_or_else(|e| panic!("{path}: {e}"))
}

// -- pages --

#[test]
fn writes_one_page_per_compound() {
    let dir = run(&[]);
    for path in [
        "classes/ns/widget.mdx",
        "namespaces/ns.mdx",
        "groups/core.mdx",
        "files/src/widget-h.mdx",
        "folders/src.mdx",
        "pages/index.mdx",
        "sidebar.json",
    ] {
        assert!(dir.path().join(path).is_file(), "missing {path}");
    }
}

#[test]
fn markdown_page_has_frontmatter() {
    let dir = run(&[]);
    let widget = read(&dir, "classes/ns/widget.mdx");
    assert!(widget.starts_with(
        "---\ntitle: \"ns::Widget\"\nslug: \"/api/classes/ns/widget\"\ndescription: \"A drawable widget.\"\n---\n\nA drawable widget.\n"
    ));
    assert!(widget.contains("#include <widget.h>"));
    assert!(widget.contains("class ns::Widget final"));
    assert!(widget.contains("### size() {#a3f2a}"));
    assert!(widget.contains("[Mode](/api/classes/ns/widget#a77c1)"));
    assert!(widget.contains("Widgets live in [ns](/api/namespaces/ns) and are drawn by Painter."));
}

#[test]
fn no_frontmatter_uses_a_heading() {
    let dir = run(&["--no-frontmatter"]);
    let widget = read(&dir, "classes/ns/widget.mdx");
    assert!(widget.starts_with("# ns::Widget\n\nA drawable widget.\n"));
}

#[test]
fn html_format() {
    let dir = run(&["-f", "html"]);
    let widget = read(&dir, "classes/ns/widget.html");
    assert!(widget.starts_with("<h1>ns::Widget</h1>\n\n<p>A drawable widget.</p>\n"));
    assert!(widget.contains(r#"<a href="/api/namespaces/ns">ns</a>"#));
}

#[test]
fn text_format() {
    let dir = run(&["-f", "text"]);
    let page = read(&dir, "pages/index.txt");
    assert!(page.starts_with("Overview\n========\n"));
    assert!(page.contains("Start with Widget."));
}

#[test]
fn page_sections_are_nested_headings() {
    let dir = run(&[]);
    let page = read(&dir, "pages/index.mdx");
    assert!(page.contains("title: \"Overview\""));
    assert!(page.contains("## Usage {#usage}"));
    assert!(page.contains("Start with [Widget](/api/classes/ns/widget)."));
}

#[test]
fn file_page_embeds_program_listing() {
    let dir = run(&[]);
    let file = read(&dir, "files/src/widget-h.mdx");
    assert!(file.contains("## Source"));
    assert!(file.contains("namespace ns {}"));

    let dir = run(&["--no-program-listing"]);
    let file = read(&dir, "files/src/widget-h.mdx");
    assert!(!file.contains("## Source"));
}

// -- options --

#[test]
fn base_url_prefixes_links_and_slugs() {
    let dir = run(&["--base-url", "/docs/cpp"]);
    let widget = read(&dir, "classes/ns/widget.mdx");
    assert!(widget.contains("slug: \"/docs/cpp/classes/ns/widget\""));
    assert!(widget.contains("[ns](/docs/cpp/namespaces/ns)"));
    assert!(read(&dir, "sidebar.json").contains("\"/docs/cpp/classes/ns/widget\""));
}

#[test]
fn config_file_is_read_and_flags_win() {
    let config = TempDir::new().unwrap();
    let config_path = config.path().join("doxysaurus.json");
    fs::write(&config_path, r#"{"baseUrl": "/cfg/", "renderProgramListing": false}"#).unwrap();

    let dir = run(&["--config", config_path.to_str().unwrap()]);
    assert!(read(&dir, "classes/ns/widget.mdx").contains("slug: \"/cfg/classes/ns/widget\""));
    assert!(!read(&dir, "files/src/widget-h.mdx").contains("## Source"));

    let dir = run(&["--config", config_path.to_str().unwrap(), "--base-url", "/flag/"]);
    assert!(read(&dir, "classes/ns/widget.mdx").contains("slug: \"/flag/classes/ns/widget\""));
}

#[test]
fn exclude_drops_pages_and_sidebar_entries() {
    let dir = run(&["--exclude", "ns::*", "--exclude", "src"]);
    assert!(!dir.path().join("classes/ns/widget.mdx").exists());
    assert!(!dir.path().join("folders/src.mdx").exists());
    assert!(!dir.path().join("files/src/widget-h.mdx").exists());
    assert!(dir.path().join("namespaces/ns.mdx").exists());

    let sidebar = read(&dir, "sidebar.json");
    assert!(!sidebar.contains("\"Classes\""));
    assert!(!sidebar.contains("\"Files\""));
    assert!(sidebar.contains("\"Namespaces\""));
}

// -- sidebar --

#[test]
fn sidebar_categories() {
    let dir = run(&[]);
    let sidebar: serde_json::Value = serde_json::from_str(&read(&dir, "sidebar.json")).unwrap();
    let labels: Vec<&str> = sidebar
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["Topics", "Namespaces", "Classes", "Files", "Pages"]);
    assert_eq!(sidebar[0]["children"][0]["label"], "Core API");
    assert_eq!(sidebar[0]["children"][0]["permalink"], "/api/groups/core");
    assert_eq!(sidebar[3]["children"][0]["label"], "src");
    assert_eq!(sidebar[3]["children"][0]["children"][0]["label"], "widget.h");
    assert!(sidebar[2].get("permalink").is_none());
}

// -- diagnostics and errors --

#[test]
fn unresolved_reference_is_reported() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("unresolved reference 'classns_1_1_painter'"));
}

#[test]
fn unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["-o", dir.path().to_str().unwrap(), "-f", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: pdf"));
}

#[test]
fn missing_index_fails() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    cmd()
        .arg(input.path())
        .args(["-o", output.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index.xml"));
}

#[test]
fn malformed_compound_names_the_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        input.path().join("index.xml"),
        r#"<doxygenindex version="1.9.8"><compound refid="classbad" kind="class"><name>Bad</name></compound></doxygenindex>"#,
    )
    .unwrap();
    fs::write(
        input.path().join("classbad.xml"),
        r#"<doxygen version="1.9.8"><compounddef id="classbad" kind="class"><bogus/></compounddef></doxygen>"#,
    )
    .unwrap();
    cmd()
        .arg(input.path())
        .args(["-o", output.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("classbad.xml").and(predicate::str::contains("bogus")));
}

#[test]
fn requires_output_dir() {
    cmd().arg(fixture_dir()).assert().failure();
}
