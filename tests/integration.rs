//! End-to-end tests for the inheritance wizard
//!
//! These tests verify the complete wizard flow by:
//! 1. Driving a session through the library API the way a browser check does
//! 2. Running the `kalkulator` binary with answers files and scripted stdin
//! 3. Checking step titles, the spouse field and the collected data

use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use kalkulator::wizard::{FieldId, FieldValue, SpouseField, StepKind};
use kalkulator::{Advance, Error, FieldOutcome, WizardSession};

/// Test context with an isolated config directory
struct TestContext {
    /// Temporary directory for this test
    temp_dir: PathBuf,
    /// Path to the kalkulator binary
    bin: PathBuf,
    /// Path to fixtures directory
    fixtures_dir: PathBuf,
    /// Config directory (XDG_CONFIG_HOME)
    config_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context
    fn new(test_name: &str) -> Self {
        let temp_dir = env::temp_dir().join("kalkulator-tests").join(test_name);

        // Clean up any previous test artifacts
        let _ = fs::remove_dir_all(&temp_dir);
        let config_dir = temp_dir.join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        let manifest_dir = env!("CARGO_MANIFEST_DIR");

        Self {
            temp_dir,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_kalkulator")),
            fixtures_dir: PathBuf::from(manifest_dir).join("tests").join("fixtures"),
            config_dir,
        }
    }

    /// Write a config file for the test
    fn create_config(&self, content: &str) {
        let config_path = self.config_dir.join("kalkulator-waris").join("config.toml");
        fs::create_dir_all(config_path.parent().unwrap()).expect("Failed to create config dir");
        fs::write(&config_path, content).expect("Failed to write config");
    }

    /// Run the binary with optional stdin
    fn run(&self, args: &[&str], stdin: Option<&str>) -> RunOutput {
        let mut child = Command::new(&self.bin)
            .args(args)
            .env("XDG_CONFIG_HOME", &self.config_dir)
            .env("RUST_LOG", "off")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to run kalkulator");

        if let Some(text) = stdin {
            child
                .stdin
                .take()
                .unwrap()
                .write_all(text.as_bytes())
                .expect("Failed to write stdin");
        } else {
            drop(child.stdin.take());
        }

        let output = child.wait_with_output().expect("Failed to wait for kalkulator");
        RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }

    fn fixture(&self, name: &str) -> String {
        self.fixtures_dir.join(name).display().to_string()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.temp_dir);
    }
}

struct RunOutput {
    stdout: String,
    stderr: String,
    success: bool,
}

// === Library scenarios ===

#[test]
fn test_browser_check_scenario() {
    let mut session = WizardSession::new();
    assert_eq!(session.current_step().unwrap().title, "Data Awal");

    session.set_field("gender", "Laki-laki").unwrap();
    assert!(session.type_text("harta_kotor", "1.000.000.000").unwrap().is_accepted());
    assert!(session.advance().unwrap().accepted());
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.current_step().unwrap().title, "Step 2: Total Hutang");

    session.type_text("hutang", "50.000.000").unwrap();
    assert!(session.advance().unwrap().accepted());
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.current_step().unwrap().title, "Step 3: Wasiat");

    session.type_text("wasiat", "10.000.000").unwrap();
    assert!(session.advance().unwrap().accepted());
    assert_eq!(session.current_index(), 3);

    let step = session.current_step().unwrap();
    assert_eq!(step.title, "Step 4: Data Ahli Waris");
    assert!(step.shows("Istri"));
    assert!(!step.shows("Suami"));
}

#[test]
fn test_spouse_field_follows_gender() {
    for (gender, shown, hidden) in [("Laki-laki", "Istri", "Suami"), ("Perempuan", "Suami", "Istri")] {
        let mut session = WizardSession::new();
        session.set_field("gender", gender).unwrap();
        session.set_field("harta_kotor", "1.000").unwrap();
        session.advance().unwrap();
        session.set_field("hutang", "0").unwrap();
        session.advance().unwrap();
        session.set_field("wasiat", "0").unwrap();
        session.advance().unwrap();

        let step = session.current_step().unwrap();
        assert!(step.shows(shown), "{gender}: {shown} should be shown");
        assert!(!step.shows(hidden), "{gender}: {hidden} should be absent");
        assert!(matches!(
            session.set_field(hidden, "ya"),
            Err(Error::FieldNotActive { .. })
        ));
    }
}

#[test]
fn test_injected_characters_never_change_amount() {
    let mut session = WizardSession::new();
    session.set_field("harta_kotor", "2.500").unwrap();

    for bad in ["2.500a", "2,500", "2.500 ", "-2.500", "2.5e3", "Rp2.500"] {
        let outcome = session.set_field("harta_kotor", bad).unwrap();
        assert!(matches!(outcome, FieldOutcome::Rejected(_)), "{bad:?}");
        let amount = session
            .step(0)
            .unwrap()
            .value(FieldId::HartaKotor)
            .and_then(FieldValue::as_amount);
        assert_eq!(amount, Some(2_500), "{bad:?}");
    }
}

#[test]
fn test_incomplete_steps_never_advance() {
    let mut session = WizardSession::new();
    for _ in 0..3 {
        assert!(matches!(
            session.advance().unwrap(),
            Advance::Blocked { step: StepKind::DataAwal, .. }
        ));
    }
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.spouse_field(), None);

    session.set_field("gender", "Perempuan").unwrap();
    session.set_field("harta_kotor", "9").unwrap();
    session.advance().unwrap();
    assert_eq!(session.spouse_field(), Some(SpouseField::Suami));
}

// === Binary runs ===

#[test]
fn test_run_with_answers_file() {
    let ctx = TestContext::new("run_with_answers_file");
    let output = ctx.run(
        &["run", "--answers", &ctx.fixture("male_decedent.yaml")],
        None,
    );

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Harta bersih:          Rp 940.000.000"));
    assert!(output.stdout.contains("Istri, Ibu, Anak Laki-laki (1 orang), Anak Perempuan (2 orang)"));
}

#[test]
fn test_run_with_answers_file_json() {
    let ctx = TestContext::new("run_with_answers_file_json");
    let output = ctx.run(
        &["run", "--json", "--answers", &ctx.fixture("male_decedent.yaml")],
        None,
    );

    assert!(output.success, "stderr: {}", output.stderr);
    let value: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(value["gender"], "male");
    assert_eq!(value["harta_bersih"], 940_000_000u64);
    assert_eq!(value["ahli_waris"]["spouse_field"], "istri");
    assert_eq!(value["ahli_waris"]["anak_perempuan"], 2);
}

#[test]
fn test_run_with_inactive_spouse_answer_fails() {
    let ctx = TestContext::new("run_with_inactive_spouse_answer_fails");
    let output = ctx.run(&["run", "--answers", &ctx.fixture("wrong_spouse.yaml")], None);

    assert!(!output.success);
    assert!(output.stderr.contains("Field 'istri' is not shown on step 'Step 4: Data Ahli Waris'"));
}

#[test]
fn test_run_interactive_from_stdin() {
    let ctx = TestContext::new("run_interactive_from_stdin");
    ctx.create_config("[display]\ncolor = false\ncurrency_prefix = \"IDR\"\n");

    let script = "Perempuan\n300.000\n\n100.000\nya\nya\ntidak\n0\n0\n";
    let output = ctx.run(&["run"], Some(script));

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Batas maksimal: IDR 100.000"));
    assert!(output.stdout.contains("Suami [ya/tidak]: "));
    assert!(!output.stdout.contains("Istri"));
    assert!(output.stdout.contains("Harta bersih:          IDR 200.000"));
}

#[test]
fn test_parse_and_format_commands() {
    let ctx = TestContext::new("parse_and_format_commands");
    ctx.create_config("[display]\ncolor = false\n");

    let output = ctx.run(&["parse", "1.000.000.000"], None);
    assert!(output.success);
    assert_eq!(output.stdout, "1000000000\nRp 1.000.000.000\n");

    let wide = format!("1{}", ".000".repeat(13));
    let output = ctx.run(&["parse", &wide], None);
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(output.stdout, format!("1{}\nRp {}\n", "0".repeat(39), wide));

    let output = ctx.run(&["parse", "12x"], None);
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid character 'x'"));

    let output = ctx.run(&["format", "50000000"], None);
    assert!(output.success);
    assert_eq!(output.stdout, "Rp 50.000.000\n");
}

#[test]
fn test_invalid_config_is_reported() {
    let ctx = TestContext::new("invalid_config_is_reported");
    ctx.create_config("[display\n");

    let output = ctx.run(&["format", "1"], None);
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid configuration file"));
}
