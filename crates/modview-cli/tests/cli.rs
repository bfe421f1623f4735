use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UNMODERATED: &str = "\
comment_id,thread_id,parent_id,step,author_id,subreddit,text
1,0,,0,3,r/cats,Look at my <b>cat</b>
2,0,1.0,1,4,r/cats,So cute
3,0,2.0,2,5,r/cats,You are an idiot
4,0,1.0,3,6,r/cats,Nice
5,1,,4,7,r/dogs,Dogs are better
6,1,99.0,5,8,r/dogs,Orphaned reply
";

const MODERATED: &str = "\
comment_id,thread_id,parent_id,step,author_id,subreddit,text,flagged,moderation_message
1,0,,0,3,r/cats,Look at my <b>cat</b>,False,
2,0,1.0,1,4,r/cats,So cute,False,
3,0,2.0,2,5,r/cats,You are an idiot,True,
4,0,1.0,3,6,r/cats,Nice,False,
5,1,,4,7,r/dogs,Dogs are better,False,
6,1,99.0,5,8,r/dogs,Orphaned reply,False,
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(moderated: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("raw.csv"), UNMODERATED).unwrap();
        fs::write(dir.path().join("mod.csv"), moderated).unwrap();
        fs::write(
            dir.path().join("modview.toml"),
            "[data]\nunmoderated = \"raw.csv\"\nmoderated = \"mod.csv\"\n",
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("modview").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("MODVIEW_UNMODERATED")
            .env_remove("MODVIEW_MODERATED")
            .arg("--no-color")
            .arg("--config")
            .arg(self.path("modview.toml"));
        cmd
    }
}

#[test]
fn test_render_text_both_views() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .args(["render", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== Original conversations (no moderator) =="))
        .stdout(predicate::str::contains("== Conversations with ToxiMuncher (Lite model) =="))
        .stdout(predicate::str::contains("Post 1 in r/cats"))
        .stdout(predicate::str::contains("      You are an idiot"))
        .stdout(predicate::str::contains(
            "[removed] ToxiMuncher (Lite): comment removed for toxic or aggressive behaviour.",
        ))
        .stdout(predicate::str::contains("Orphaned reply").not());
}

#[test]
fn test_render_html_to_file() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .args(["render", "--subreddit", "r/cats", "--output", "out/page"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered 1 thread(s)"));

    let html = fs::read_to_string(fixture.path("out/page.html")).unwrap();
    assert!(html.contains("Look at my &lt;b&gt;cat&lt;/b&gt;"));
    assert!(html.contains("comment-removed depth-2"));
    assert!(!html.contains("r/dogs"));
}

#[test]
fn test_render_json_moderated_only() {
    let fixture = Fixture::new(MODERATED);

    let output = fixture
        .cmd()
        .args(["render", "--view", "moderated", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let views = value["views"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["mode"], "moderated");
    assert_eq!(views[0]["threads"].as_array().unwrap().len(), 2);
}

#[test]
fn test_render_unknown_subreddit_is_empty() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .args(["render", "--subreddit", "r/none", "--format", "text"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No threads found"))
        .stdout(predicate::str::contains("Post ").not());
}

#[test]
fn test_subreddits_lists_all_first() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .arg("subreddits")
        .assert()
        .success()
        .stdout("All\nr/cats\nr/dogs\n");
}

#[test]
fn test_threads_reports_unreachable() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .arg("threads")
        .assert()
        .success()
        .stdout(predicate::str::contains("Post 1"))
        .stdout(predicate::str::contains("[1 unreachable]"))
        .stdout(predicate::str::contains("2 thread(s)"));
}

#[test]
fn test_check_clean_datasets() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("datasets are structurally identical"));
}

#[test]
fn test_check_fails_on_parity_mismatch() {
    let truncated: String = MODERATED.lines().take(4).map(|l| format!("{}\n", l)).collect();
    let fixture = Fixture::new(&truncated);

    fixture
        .cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Datasets differ in structure"));

    fixture
        .cmd()
        .args(["render", "--strict"])
        .assert()
        .failure();
}

#[test]
fn test_malformed_dataset_aborts() {
    let broken = MODERATED.replace("4,0,1.0,3,6", "4,0,1.0,three,6");
    let fixture = Fixture::new(&broken);

    fixture
        .cmd()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("column 'step'"));
}

#[test]
fn test_config_init_replaces_broken_file() {
    let fixture = Fixture::new(MODERATED);
    fs::write(fixture.path("modview.toml"), "[render\nbroken").unwrap();

    fixture.cmd().args(["config", "path"]).assert().success();
    fixture
        .cmd()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));

    fixture
        .cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let written = fs::read_to_string(fixture.path("modview.toml")).unwrap();
    assert!(written.contains("[render]"));
    fixture.cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_render_rejects_excessive_max_depth() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .args(["render", "--max-depth", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-depth"));
}

#[test]
fn test_render_markdown_stats_toggle() {
    let fixture = Fixture::new(MODERATED);

    fixture
        .cmd()
        .args(["render", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Threads:**"));

    fixture
        .cmd()
        .args(["render", "--format", "markdown", "--no-stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#### Post 1 in r/cats"))
        .stdout(predicate::str::contains("**Threads:**").not());
}
