use std::{fs, process::Command};

fn snake() -> Command {
    Command::new(env!("CARGO_BIN_EXE_snake"))
}

#[test]
fn plays_until_game_over_and_reports_the_score() {
    let output = snake()
        .args([
            "--width", "8", "--height", "8", "--difficulty", "hard", "--seed", "3",
            "--max-ticks", "60", "--player", "tester",
        ])
        .output()
        .expect("failed to run the snake binary");

    assert!(output.status.success(), "snake exited with {:?}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("utf8 output");
    assert!(stdout.starts_with("snake (hard)\n"));
    assert!(stdout.contains("##########\n"), "missing border in:\n{stdout}");
    let last = stdout.lines().last().expect("at least one line");
    assert!(last.starts_with("final score: "), "unexpected last line {last:?}");
    assert!(last.ends_with("(tester, hard)"));
}

#[test]
fn rejects_a_malformed_config_file() {
    let path = std::env::temp_dir().join(format!("snake-cli-{}.toml", std::process::id()));
    fs::write(&path, "[grid]\nwidth = \"wide\"\n").expect("write config");

    let output = snake()
        .arg("--config")
        .arg(&path)
        .output()
        .expect("failed to run the snake binary");
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "stderr was:\n{stderr}");
}

#[test]
fn rejects_an_empty_grid() {
    let output = snake()
        .args(["--width", "0", "--max-ticks", "1"])
        .output()
        .expect("failed to run the snake binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid width must be positive"), "stderr was:\n{stderr}");
}

#[test]
fn rejects_a_grid_too_large_to_allocate() {
    let output = snake()
        .args(["--width", "2000000000", "--height", "2000000000", "--max-ticks", "1"])
        .output()
        .expect("failed to run the snake binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is too large"), "stderr was:\n{stderr}");
}
